pub mod browser;
pub mod catalog;
pub mod error;
pub mod export;
pub mod mode;
pub mod params;
pub mod path;
pub mod system;

pub use browser::NormalModeBrowser;
pub use catalog::ModeCatalog;
pub use error::{BackendError, BrowserError, Result};
pub use mode::{format_frequency, Coordinates, NormalMode};
pub use params::{ExportParameters, ViewParameters};
pub use path::DisplacementPath;
pub use system::{CoordinateView, NormalModeSystem, ParameterDialog};

pub mod testing {
    //! Small stand-ins for the backend and the view, used by tests and benches.
    use nalgebra::{Complex, DMatrix, DVector};

    use crate::{
        error::BackendError,
        mode::Coordinates,
        system::{CoordinateView, NormalModeSystem},
    };

    /// Independent springs, one per coordinate: `E = 1/2 sum k_i x_i^2`.
    /// The normal modes are the coordinate axes with `k_i` as frequencies.
    pub struct HarmonicSystem {
        stiffness: DVector<f64>,
        zero_directions: Vec<Coordinates>,
    }

    impl HarmonicSystem {
        pub fn new(stiffness: DVector<f64>) -> Self {
            Self {
                stiffness,
                zero_directions: Vec::new(),
            }
        }

        /// Marks `direction` as a known zero eigenvector.
        pub fn with_zero_direction(mut self, direction: Coordinates) -> Self {
            // gram-schmidt against the directions already known
            let mut direction = direction;
            for known in &self.zero_directions {
                let overlap = known.dot(&direction);
                direction -= known * overlap;
            }
            let norm = direction.norm();
            if norm > 1e-12 {
                self.zero_directions.push(direction / norm);
            }
            self
        }
    }

    impl NormalModeSystem for HarmonicSystem {
        fn normal_modes(
            &self,
            coords: &Coordinates,
        ) -> Result<(DVector<f64>, DMatrix<Complex<f64>>), BackendError> {
            if coords.len() != self.stiffness.len() {
                return Err(format!(
                    "system has {} coordinates, got {}",
                    self.stiffness.len(),
                    coords.len()
                )
                .into());
            }
            let n = coords.len();
            Ok((
                self.stiffness.clone(),
                DMatrix::from_fn(n, n, |i, j| Complex::new(if i == j { 1.0 } else { 0.0 }, 0.0)),
            ))
        }

        fn energy(&self, coords: &Coordinates) -> Result<f64, BackendError> {
            Ok(0.5 * coords.component_mul(coords).dot(&self.stiffness))
        }

        fn orthogonalize_to_zero_eigenvectors(
            &self,
            mut mode: Coordinates,
            _coords: &Coordinates,
        ) -> Result<Coordinates, BackendError> {
            for direction in &self.zero_directions {
                let overlap = direction.dot(&mode);
                mode -= direction * overlap;
            }
            Ok(mode)
        }
    }

    /// Remembers everything it was asked to show.
    #[derive(Debug, Default)]
    pub struct RecordingView {
        pub coords: Option<Coordinates>,
        pub frames: Vec<Coordinates>,
        pub labels: Option<Vec<String>>,
        pub paths_received: usize,
        pub animating: bool,
    }

    impl CoordinateView for RecordingView {
        fn set_coords(&mut self, coords: &Coordinates) {
            self.coords = Some(coords.clone());
        }

        fn set_coords_path(&mut self, frames: &[Coordinates], labels: Option<&[String]>) {
            self.frames = frames.to_vec();
            self.labels = labels.map(<[String]>::to_vec);
            self.paths_received += 1;
        }

        fn start_animation(&mut self) {
            self.animating = true;
        }

        fn stop_animation(&mut self) {
            self.animating = false;
        }
    }
}
