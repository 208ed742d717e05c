use std::{
    io::{self, Write},
    path::PathBuf,
};

use anyhow::Context;
use clap::{Args as ClapArgs, Parser, Subcommand};
use nmview_core::{export::DEFAULT_EXPORT_FILE, NormalModeBrowser, ViewParameters};

use config::ConfigSession;
use dialog::FlagOverrides;
use lj::LjCluster;
use view::XyzStreamView;

mod config;
mod dialog;
mod lj;
mod view;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: NmCommand,
}

#[derive(ClapArgs, Debug)]
struct SessionArgs {
    /// A json file with the configuration (and optionally its normal modes)
    input: PathBuf,
    /// A json file with view parameters
    #[arg(long, short)]
    params: Option<PathBuf>,
    /// How far to displace the configuration along the mode
    #[arg(long, short)]
    amplitude: Option<f64>,
    /// Number of frames in the preview
    #[arg(long)]
    nframes: Option<usize>,
    /// Number of frames in one exported oscillation
    #[arg(long)]
    export_nframes: Option<usize>,
    /// Use the modes as computed, without projecting out translations and
    /// rotations
    #[arg(long)]
    keep_zero_eigenvectors: bool,
}

#[derive(Subcommand, Debug)]
enum NmCommand {
    /// List the normal modes, lowest frequency first
    #[command(name = "modes")]
    Modes {
        #[command(flatten)]
        session: SessionArgs,
    },
    /// Print the preview path of a mode as xyz, labeled with energies
    #[command(name = "preview")]
    Preview {
        #[command(flatten)]
        session: SessionArgs,
        /// Index of the mode in the listing
        #[arg(long, short)]
        mode: usize,
    },
    /// Write one oscillation along a mode to a file (.xyz or json)
    #[command(name = "export")]
    Export {
        #[command(flatten)]
        session: SessionArgs,
        /// Index of the mode in the listing
        #[arg(long, short)]
        mode: usize,
        #[arg(long, short, default_value = DEFAULT_EXPORT_FILE)]
        output: PathBuf,
    },
}

type Browser = NormalModeBrowser<LjCluster, XyzStreamView<Box<dyn Write>>>;

/// `frames_out` receives every preview path the browser shows.
fn open_session(args: SessionArgs, frames_out: Box<dyn Write>) -> anyhow::Result<Browser> {
    let params = match &args.params {
        Some(path) => ViewParameters::load(path)
            .with_context(|| format!("loading parameters from {}", path.display()))?,
        None => ViewParameters::default(),
    };

    let overrides = FlagOverrides {
        amplitude: args.amplitude,
        n_frames: args.nframes,
        export_n_frames: args.export_nframes,
        keep_zero_eigenvectors: args.keep_zero_eigenvectors,
    };

    let mut session = ConfigSession::load(&args.input)?;
    let mut browser = NormalModeBrowser::new(
        LjCluster::new(session.epsilon, session.sigma),
        XyzStreamView::new(frames_out),
        params,
        move || Box::new(overrides.clone()),
    )?;
    browser.open_parameters()?;

    let coords = session.coords();
    // normal modes only describe vibrations near a minimum
    if log::log_enabled!(log::Level::Info) {
        let gradient = browser
            .system()
            .gradient(&coords)
            .map_err(|err| anyhow::anyhow!(err))?;
        log::info!(
            "rms gradient {:.3e}",
            gradient.norm() / (gradient.len() as f64).sqrt()
        );
    }

    let modes = session.take_modes();
    browser.set_coords(coords, modes)?;
    log::info!(
        "{} normal modes for {}",
        browser.catalog().len(),
        args.input.display()
    );

    Ok(browser)
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();

    let args: Args = Args::parse();

    match args.command {
        NmCommand::Modes { session } => {
            let browser = open_session(session, Box::new(io::sink()))?;

            let mut out = io::stdout().lock();
            for (i, label) in browser.labels().iter().enumerate() {
                writeln!(out, "{i:>4}  {label}")?;
            }
        }
        NmCommand::Preview { session, mode } => {
            let mut browser = open_session(session, Box::new(io::stdout()))?;
            browser.select(Some(mode))?;
            browser.set_running(true);
        }
        NmCommand::Export {
            session,
            mode,
            output,
        } => {
            let mut browser = open_session(session, Box::new(io::sink()))?;
            browser.select(Some(mode))?;
            browser
                .export(&output)
                .with_context(|| format!("exporting to {}", output.display()))?;
            println!("wrote {}", output.display());
        }
    }

    Ok(())
}
