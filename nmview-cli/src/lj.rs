//! A Lennard-Jones cluster, the demo system the browser is driven with.

use itertools::Itertools;
use nalgebra::{Complex, DMatrix, DVector, Matrix3, SymmetricEigen, Vector3};
use nmview_core::{BackendError, Coordinates, NormalModeSystem};

/// Below this norm a candidate zero eigenvector is considered linearly dependent
/// on the ones already found (e.g. the missing rotation of a linear molecule).
const DEPENDENCE_THRESHOLD: f64 = 1e-8;

/// Pair interaction `E(r) = -c6 / r^6 + c12 / r^12`, evaluated from `r^2`.
#[derive(Copy, Clone, Debug)]
pub struct LjInteraction {
    c6: f64,
    c12: f64,
}

impl LjInteraction {
    pub fn new(c6: f64, c12: f64) -> Self {
        Self { c6, c12 }
    }

    /// The usual `4 eps ((sigma/r)^12 - (sigma/r)^6)` parametrisation
    pub fn from_epsilon_sigma(epsilon: f64, sigma: f64) -> Self {
        let sigma6 = sigma.powi(6);
        Self::new(4.0 * epsilon * sigma6, 4.0 * epsilon * sigma6 * sigma6)
    }

    pub fn energy(&self, r2: f64) -> f64 {
        let ir6 = r2.powi(-3);
        -self.c6 * ir6 + self.c12 * ir6 * ir6
    }

    /// Returns `(E, -E'/r)`.
    pub fn energy_gradient(&self, r2: f64) -> (f64, f64) {
        let ir2 = r2.recip();
        let ir6 = ir2 * ir2 * ir2;
        let ir12 = ir6 * ir6;

        (
            -self.c6 * ir6 + self.c12 * ir12,
            (-6.0 * self.c6 * ir6 + 12.0 * self.c12 * ir12) * ir2,
        )
    }

    /// Returns `(E, -E'/r, E'')`.
    pub fn energy_gradient_hessian(&self, r2: f64) -> (f64, f64, f64) {
        let ir2 = r2.recip();
        let ir6 = ir2 * ir2 * ir2;
        let ir12 = ir6 * ir6;
        let (energy, gradient) = self.energy_gradient(r2);

        (
            energy,
            gradient,
            (-42.0 * self.c6 * ir6 + 156.0 * self.c12 * ir12) * ir2,
        )
    }
}

/// A cluster of identical atoms interacting pairwise. Unit masses, so the
/// metric is the identity and the frequencies are the Hessian eigenvalues.
pub struct LjCluster {
    interaction: LjInteraction,
}

impl LjCluster {
    pub fn new(epsilon: f64, sigma: f64) -> Self {
        Self {
            interaction: LjInteraction::from_epsilon_sigma(epsilon, sigma),
        }
    }

    fn atoms(coords: &Coordinates) -> Result<Vec<Vector3<f64>>, BackendError> {
        if coords.len() % 3 != 0 {
            return Err(format!("{} coordinates don't make whole atoms", coords.len()).into());
        }

        Ok(coords
            .as_slice()
            .chunks_exact(3)
            .map(Vector3::from_column_slice)
            .collect())
    }

    pub fn gradient(&self, coords: &Coordinates) -> Result<Coordinates, BackendError> {
        let atoms = Self::atoms(coords)?;
        let mut gradient = DVector::zeros(coords.len());

        for ((i, a), (j, b)) in atoms.iter().enumerate().tuple_combinations() {
            let separation = a - b;
            let (_, g) = self.interaction.energy_gradient(separation.norm_squared());
            let force = separation * g;

            let mut rows = gradient.fixed_rows_mut::<3>(3 * i);
            rows -= &force;
            let mut rows = gradient.fixed_rows_mut::<3>(3 * j);
            rows += &force;
        }

        Ok(gradient)
    }

    pub fn hessian(&self, coords: &Coordinates) -> Result<DMatrix<f64>, BackendError> {
        let atoms = Self::atoms(coords)?;
        let n = coords.len();
        let mut hessian = DMatrix::zeros(n, n);

        for ((i, a), (j, b)) in atoms.iter().enumerate().tuple_combinations() {
            let separation = a - b;
            let r2 = separation.norm_squared();
            let (_, g, h) = self.interaction.energy_gradient_hessian(r2);

            let block = separation * separation.transpose() * ((h + g) / r2)
                - Matrix3::identity() * g;

            for (row, col, sign) in [(i, i, 1.0), (j, j, 1.0), (i, j, -1.0), (j, i, -1.0)] {
                let mut view = hessian.fixed_view_mut::<3, 3>(3 * row, 3 * col);
                view += &block * sign;
            }
        }

        Ok(hessian)
    }

    /// Orthonormal rigid translations and rotations of the configuration.
    pub fn zero_eigenvectors(&self, coords: &Coordinates) -> Result<Vec<Coordinates>, BackendError> {
        let atoms = Self::atoms(coords)?;
        let n_atoms = atoms.len();
        if n_atoms == 0 {
            return Ok(Vec::new());
        }
        let center = atoms.iter().sum::<Vector3<f64>>() / n_atoms as f64;

        let translations = axes().map(|axis| {
            DVector::from_iterator(3 * n_atoms, atoms.iter().flat_map(|_| axis.iter().copied()))
        });
        let rotations = axes().map(|axis| {
            DVector::from_iterator(
                3 * n_atoms,
                atoms
                    .iter()
                    .flat_map(|atom| axis.cross(&(atom - center)).iter().copied().collect_vec()),
            )
        });

        let mut basis: Vec<Coordinates> = Vec::with_capacity(6);
        for mut candidate in translations.into_iter().chain(rotations) {
            for known in &basis {
                let overlap = known.dot(&candidate);
                candidate -= known * overlap;
            }
            let norm = candidate.norm();
            if norm > DEPENDENCE_THRESHOLD {
                basis.push(candidate / norm);
            }
        }

        log::debug!("{} zero eigenvectors for {n_atoms} atoms", basis.len());
        Ok(basis)
    }
}

fn axes() -> [Vector3<f64>; 3] {
    [Vector3::x(), Vector3::y(), Vector3::z()]
}

impl NormalModeSystem for LjCluster {
    fn normal_modes(
        &self,
        coords: &Coordinates,
    ) -> Result<(DVector<f64>, DMatrix<Complex<f64>>), BackendError> {
        let hessian = self.hessian(coords)?;
        let eigs = SymmetricEigen::new(hessian);

        Ok((
            eigs.eigenvalues,
            eigs.eigenvectors.map(|x| Complex::new(x, 0.0)),
        ))
    }

    fn energy(&self, coords: &Coordinates) -> Result<f64, BackendError> {
        let atoms = Self::atoms(coords)?;

        Ok(atoms
            .iter()
            .tuple_combinations()
            .map(|(a, b)| self.interaction.energy((a - b).norm_squared()))
            .sum())
    }

    fn orthogonalize_to_zero_eigenvectors(
        &self,
        mut mode: Coordinates,
        coords: &Coordinates,
    ) -> Result<Coordinates, BackendError> {
        if mode.len() != coords.len() {
            return Err(format!(
                "mode has {} coordinates, configuration has {}",
                mode.len(),
                coords.len()
            )
            .into());
        }

        for zero in self.zero_eigenvectors(coords)? {
            let overlap = zero.dot(&mode);
            mode -= zero * overlap;
        }
        Ok(mode)
    }
}
