//! Coordinate paths along a normal mode.
//!
//! The live preview is a one-directional ramp from the base configuration
//! towards `base + amplitude * mode`. The exported path is a full sine cycle.

use std::f64::consts::PI;

use crate::{
    error::{BrowserError, Result},
    mode::Coordinates,
};

/// A sequence of configurations, optionally with one label per frame.
#[derive(Clone, Debug, PartialEq)]
pub struct DisplacementPath {
    pub frames: Vec<Coordinates>,
    pub labels: Option<Vec<String>>,
}

impl DisplacementPath {
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

fn check_inputs(base: &Coordinates, mode: &Coordinates, n_frames: usize) -> Result<()> {
    if base.len() != mode.len() {
        return Err(BrowserError::invalid(format!(
            "mode has {} coordinates, configuration has {}",
            mode.len(),
            base.len()
        )));
    }
    if n_frames == 0 {
        return Err(BrowserError::invalid("a path needs at least one frame"));
    }
    Ok(())
}

/// `frame[i] = base + amplitude * mode * i / n_frames` for `i in 0..n_frames`.
///
/// The last frame stops one step short of `base + amplitude * mode`.
pub fn preview_ramp(
    base: &Coordinates,
    mode: &Coordinates,
    amplitude: f64,
    n_frames: usize,
) -> Result<Vec<Coordinates>> {
    check_inputs(base, mode, n_frames)?;

    Ok((0..n_frames)
        .map(|i| base + mode * (amplitude * i as f64 / n_frames as f64))
        .collect())
}

/// `frame[i] = base + amplitude * sin(2 pi i / n_frames) * mode` for
/// `i in 0..n_frames`, one full oscillation.
pub fn export_oscillation(
    base: &Coordinates,
    mode: &Coordinates,
    amplitude: f64,
    n_frames: usize,
) -> Result<Vec<Coordinates>> {
    check_inputs(base, mode, n_frames)?;

    Ok((0..n_frames)
        .map(|i| {
            let t = (i as f64 / n_frames as f64 * 2.0 * PI).sin();
            base + mode * (amplitude * t)
        })
        .collect())
}

/// Preview ramp where every frame is labeled by `energy(frame)`. The first
/// energy failure aborts the whole path.
///
/// Labels read `energy=<value>` with the value in Rust's shortest round-trip
/// form, so an energy of zero is `energy=0` and a half is `energy=0.5`.
pub fn labeled_preview<E>(
    base: &Coordinates,
    mode: &Coordinates,
    amplitude: f64,
    n_frames: usize,
    mut energy: impl FnMut(&Coordinates) -> std::result::Result<f64, E>,
) -> Result<DisplacementPath>
where
    BrowserError: From<E>,
{
    let frames = preview_ramp(base, mode, amplitude, n_frames)?;
    let labels = frames
        .iter()
        .map(|frame| energy(frame).map(|energy| format!("energy={energy}")))
        .collect::<std::result::Result<Vec<_>, E>>()?;

    Ok(DisplacementPath {
        frames,
        labels: Some(labels),
    })
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use nalgebra::dvector;

    use super::*;

    #[test]
    fn ramp_starts_at_base() {
        let base = dvector![0.5, -1.0, 2.0];
        let mode = dvector![1.0, 2.0, 3.0];
        let frames = preview_ramp(&base, &mode, 1.7, 30).unwrap();

        assert_eq!(frames.len(), 30);
        assert_eq!(frames[0], base);
    }

    #[test]
    fn ramp_is_one_directional() {
        let base = dvector![0.0, 0.0];
        let mode = dvector![1.0, -1.0];
        let frames = preview_ramp(&base, &mode, 2.0, 4).unwrap();

        assert_abs_diff_eq!(frames[1], dvector![0.5, -0.5], epsilon = 1e-12);
        assert_abs_diff_eq!(frames[2], dvector![1.0, -1.0], epsilon = 1e-12);
        // stops short of base + amplitude * mode
        assert_abs_diff_eq!(frames[3], dvector![1.5, -1.5], epsilon = 1e-12);
    }

    #[test]
    fn oscillation_example() {
        let base = dvector![0.0, 0.0, 0.0, 0.0];
        let mode = dvector![1.0, 0.0, 0.0, 0.0];
        let frames = export_oscillation(&base, &mode, 2.0, 4).unwrap();

        assert_eq!(frames.len(), 4);
        assert_eq!(frames[0], base);
        assert_abs_diff_eq!(frames[1], dvector![2.0, 0.0, 0.0, 0.0], epsilon = 1e-12);
        assert_abs_diff_eq!(frames[2], dvector![0.0, 0.0, 0.0, 0.0], epsilon = 1e-12);
        assert_abs_diff_eq!(frames[3], dvector![-2.0, 0.0, 0.0, 0.0], epsilon = 1e-12);
    }

    #[test]
    fn oscillation_returns_to_base_halfway() {
        let base = dvector![1.0, 2.0, 3.0];
        let mode = dvector![0.3, -0.2, 0.9];
        let frames = export_oscillation(&base, &mode, 1.5, 100).unwrap();

        assert_eq!(frames[0], base);
        assert_abs_diff_eq!(frames[50], base, epsilon = 1e-12);
        assert_abs_diff_eq!(frames[25], &base + &mode * 1.5, epsilon = 1e-12);
    }

    #[test]
    fn rejects_bad_inputs() {
        let base = dvector![0.0, 0.0];
        assert!(matches!(
            preview_ramp(&base, &dvector![1.0], 1.0, 3),
            Err(BrowserError::InvalidInput(_))
        ));
        assert!(matches!(
            export_oscillation(&base, &dvector![1.0, 0.0], 1.0, 0),
            Err(BrowserError::InvalidInput(_))
        ));
    }

    #[test]
    fn labels_carry_energies() {
        let base = dvector![0.0];
        let mode = dvector![1.0];
        let path = labeled_preview(&base, &mode, 1.0, 2, |x| {
            Ok::<_, BrowserError>(x[0] * 10.0)
        })
        .unwrap();

        assert_eq!(
            path.labels,
            Some(vec!["energy=0".to_owned(), "energy=5".to_owned()])
        );
    }

    #[test]
    fn energy_failure_aborts() {
        let base = dvector![0.0];
        let mode = dvector![1.0];
        let mut calls = 0;
        let result = labeled_preview(&base, &mode, 1.0, 5, |_| {
            calls += 1;
            Err(BrowserError::invalid("boom"))
        });

        assert!(matches!(result, Err(BrowserError::InvalidInput(_))));
        assert_eq!(calls, 1);
    }
}
