//! The collaborators a browsing session talks to: the physics backend, the 3d
//! view and the parameter dialog.

use nalgebra::{Complex, DMatrix, DVector};

use crate::{error::BackendError, mode::Coordinates, params::ViewParameters};

/// A physical system able to analyse the vibrations of its configurations.
pub trait NormalModeSystem {
    /// Frequencies and the matching eigenvectors, one per column.
    fn normal_modes(
        &self,
        coords: &Coordinates,
    ) -> Result<(DVector<f64>, DMatrix<Complex<f64>>), BackendError>;

    /// Potential energy of a configuration.
    fn energy(&self, coords: &Coordinates) -> Result<f64, BackendError>;

    /// Removes the components of `mode` along directions known to have zero
    /// eigenvalues at `coords` (rigid translations and rotations). The result
    /// has the same length as `mode`.
    fn orthogonalize_to_zero_eigenvectors(
        &self,
        mode: Coordinates,
        coords: &Coordinates,
    ) -> Result<Coordinates, BackendError>;
}

/// A view that shows a configuration or animates a path of them.
pub trait CoordinateView {
    fn set_coords(&mut self, coords: &Coordinates);

    /// `labels`, if given, has one entry per frame.
    fn set_coords_path(&mut self, frames: &[Coordinates], labels: Option<&[String]>);

    fn start_animation(&mut self);

    fn stop_animation(&mut self);
}

/// An editor for the session parameters. Edits happen in place.
pub trait ParameterDialog {
    fn show(&mut self, params: &mut ViewParameters);
}
