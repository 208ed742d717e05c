//! Writing oscillation trajectories to disk.

use std::{
    fs::File,
    io::{BufReader, BufWriter, Write},
    path::Path,
};

use nalgebra::DVector;

use crate::{
    error::{BrowserError, Result},
    mode::Coordinates,
};

/// The file name offered when nothing else is chosen.
pub const DEFAULT_EXPORT_FILE: &str = "mode.json";

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExportFormat {
    /// an array of frames, each an array of numbers
    Json,
    /// multi-frame xyz, one block per frame
    Xyz,
}

impl ExportFormat {
    /// `.xyz` files get xyz, everything else json.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("xyz") => Self::Xyz,
            _ => Self::Json,
        }
    }
}

fn create(path: &Path) -> Result<BufWriter<File>> {
    Ok(BufWriter::new(
        File::options()
            .create(true)
            .write(true)
            .truncate(true)
            .open(path)?,
    ))
}

/// Writes `frames` in the format implied by the extension of `path`.
pub fn write_trajectory(path: impl AsRef<Path>, frames: &[Coordinates]) -> Result<()> {
    let path = path.as_ref();
    match ExportFormat::from_path(path) {
        ExportFormat::Json => write_json(path, frames),
        ExportFormat::Xyz => write_xyz(path, frames),
    }
}

pub fn write_json(path: &Path, frames: &[Coordinates]) -> Result<()> {
    let rows = frames
        .iter()
        .map(|frame| frame.as_slice())
        .collect::<Vec<_>>();

    let mut writer = create(path)?;
    serde_json::to_writer(&mut writer, &rows)?;
    writer.flush()?;
    Ok(())
}

/// Reads a trajectory written by [`write_json`].
pub fn load_trajectory(path: impl AsRef<Path>) -> Result<Vec<Coordinates>> {
    let rows: Vec<Vec<f64>> = serde_json::from_reader(BufReader::new(File::open(path)?))?;
    Ok(rows.into_iter().map(DVector::from_vec).collect())
}

pub fn write_xyz(path: &Path, frames: &[Coordinates]) -> Result<()> {
    if let Some(frame) = frames.iter().find(|frame| frame.len() % 3 != 0) {
        return Err(BrowserError::invalid(format!(
            "xyz needs 3 coordinates per atom, frame has {}",
            frame.len()
        )));
    }

    let mut writer = create(path)?;
    for (i, frame) in frames.iter().enumerate() {
        write_xyz_frame(&mut writer, frame, &format!("frame {i}"))?;
    }
    writer.flush()?;
    Ok(())
}

/// A single xyz block with a dummy element for every atom.
pub fn write_xyz_frame(writer: &mut impl Write, frame: &Coordinates, comment: &str) -> Result<()> {
    writeln!(writer, "{}", frame.len() / 3)?;
    writeln!(writer, "{comment}")?;
    for atom in frame.as_slice().chunks_exact(3) {
        writeln!(
            writer,
            "X  {:.8}  {:.8}  {:.8}",
            atom[0], atom[1], atom[2]
        )?;
    }
    Ok(())
}
