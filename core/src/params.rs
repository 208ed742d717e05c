use std::{fs::File, io::BufReader, path::Path};

use serde::{Deserialize, Serialize};

use crate::error::{BrowserError, Result};

/// Settings of a browsing session.
///
/// Stored as json in the same shape the parameter dialog edits:
/// `{"amplitude": 1.0, "nframes": 30, "remove_known_zeroev": true, "export": {"nframes": 100}}`.
/// Missing fields take their defaults.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewParameters {
    /// scale of the displacement along the selected mode
    pub amplitude: f64,
    /// number of frames in the live preview
    #[serde(rename = "nframes")]
    pub n_frames: usize,
    /// project out translations and rotations before using a mode
    pub remove_known_zeroev: bool,
    pub export: ExportParameters,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportParameters {
    /// number of frames in one exported oscillation
    #[serde(rename = "nframes")]
    pub n_frames: usize,
}

impl Default for ViewParameters {
    fn default() -> Self {
        Self {
            amplitude: 1.0,
            n_frames: 30,
            remove_known_zeroev: true,
            export: ExportParameters::default(),
        }
    }
}

impl Default for ExportParameters {
    fn default() -> Self {
        Self { n_frames: 100 }
    }
}

impl ViewParameters {
    /// Reads and validates parameters from a json file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let params: Self = serde_json::from_reader(BufReader::new(File::open(path)?))?;
        params.validate()?;
        Ok(params)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.amplitude.is_finite() {
            return Err(BrowserError::invalid(format!(
                "amplitude must be finite, got {}",
                self.amplitude
            )));
        }
        if self.n_frames == 0 {
            return Err(BrowserError::invalid("preview needs at least one frame"));
        }
        if self.export.n_frames == 0 {
            return Err(BrowserError::invalid("export needs at least one frame"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let params = ViewParameters::default();
        assert_eq!(params.amplitude, 1.0);
        assert_eq!(params.n_frames, 30);
        assert_eq!(params.export.n_frames, 100);
        assert!(params.remove_known_zeroev);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn partial_json_fills_defaults() {
        let params: ViewParameters =
            serde_json::from_str(r#"{"amplitude": 0.25, "export": {}}"#).unwrap();
        assert_eq!(params.amplitude, 0.25);
        assert_eq!(params.n_frames, 30);
        assert_eq!(params.export.n_frames, 100);
    }

    #[test]
    fn dialog_shape() {
        let json = serde_json::to_value(ViewParameters::default()).unwrap();
        assert_eq!(json["nframes"], 30);
        assert_eq!(json["export"]["nframes"], 100);
        assert_eq!(json["remove_known_zeroev"], true);
    }

    #[test]
    fn rejects_zero_frames() {
        let params = ViewParameters {
            export: ExportParameters { n_frames: 0 },
            ..Default::default()
        };
        assert!(matches!(
            params.validate(),
            Err(BrowserError::InvalidInput(_))
        ));

        let params = ViewParameters {
            amplitude: f64::NAN,
            ..Default::default()
        };
        assert!(params.validate().is_err());
    }
}
