use std::{fs::File, io::BufReader, path::Path};

use anyhow::{ensure, Context};
use nalgebra::DVector;
use nmview_core::{Coordinates, NormalMode};
use serde::Deserialize;

/// A configuration to browse, as stored on disk.
///
/// `modes` is optional. Without it the modes are computed from the
/// Lennard-Jones parameters.
#[derive(Deserialize)]
pub struct ConfigSession {
    coords: Vec<[f64; 3]>,
    #[serde(default)]
    modes: Option<Vec<ConfigMode>>,
    #[serde(default = "unit")]
    pub epsilon: f64,
    #[serde(default = "unit")]
    pub sigma: f64,
}

#[derive(Deserialize)]
struct ConfigMode {
    frequency: f64,
    eigenvector: Vec<f64>,
}

fn unit() -> f64 {
    1.0
}

impl From<ConfigMode> for NormalMode {
    fn from(value: ConfigMode) -> Self {
        NormalMode::new(value.frequency, DVector::from_vec(value.eigenvector))
    }
}

impl ConfigSession {
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
        let session: Self = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("parsing {}", path.display()))?;

        ensure!(!session.coords.is_empty(), "{} has no atoms", path.display());
        ensure!(
            session.epsilon > 0.0 && session.sigma > 0.0,
            "epsilon and sigma must be positive"
        );
        Ok(session)
    }

    /// The flat 3N coordinate vector.
    pub fn coords(&self) -> Coordinates {
        DVector::from_iterator(
            3 * self.coords.len(),
            self.coords.iter().flatten().copied(),
        )
    }

    /// Takes the precomputed modes out of the session, if any.
    pub fn take_modes(&mut self) -> Option<Vec<NormalMode>> {
        self.modes
            .take()
            .map(|modes| modes.into_iter().map(NormalMode::from).collect())
    }
}
