use nmview_core::{ParameterDialog, ViewParameters};

/// Applies the parameter flags given on the command line.
#[derive(Clone, Debug, Default)]
pub struct FlagOverrides {
    pub amplitude: Option<f64>,
    pub n_frames: Option<usize>,
    pub export_n_frames: Option<usize>,
    pub keep_zero_eigenvectors: bool,
}

impl ParameterDialog for FlagOverrides {
    fn show(&mut self, params: &mut ViewParameters) {
        if let Some(amplitude) = self.amplitude {
            params.amplitude = amplitude;
        }
        if let Some(n_frames) = self.n_frames {
            params.n_frames = n_frames;
        }
        if let Some(n_frames) = self.export_n_frames {
            params.export.n_frames = n_frames;
        }
        if self.keep_zero_eigenvectors {
            params.remove_known_zeroev = false;
        }
        log::debug!("parameters: {params:?}");
    }
}
