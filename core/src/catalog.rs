use itertools::Itertools;
use nalgebra::{Complex, DMatrix, DVector};

use crate::{
    error::{BrowserError, Result},
    mode::{Coordinates, NormalMode},
};

/// The normal modes of one configuration, kept in ascending frequency order.
///
/// The catalog holds no selection state. Callers address entries by their
/// position in [`ModeCatalog::sorted_entries`].
#[derive(Clone, Debug, Default)]
pub struct ModeCatalog {
    dimension: usize,
    modes: Vec<NormalMode>,
}

impl ModeCatalog {
    /// An empty catalog for configurations of `dimension` coordinates.
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension,
            modes: Vec::new(),
        }
    }

    /// Replaces the catalog contents. Nothing is replaced if any input is
    /// rejected.
    pub fn load(&mut self, frequencies: &[f64], eigenvectors: Vec<Coordinates>) -> Result<()> {
        if frequencies.len() != eigenvectors.len() {
            return Err(BrowserError::invalid(format!(
                "{} frequencies but {} eigenvectors",
                frequencies.len(),
                eigenvectors.len()
            )));
        }

        let modes = frequencies
            .iter()
            .zip_eq(eigenvectors)
            .map(|(&frequency, eigenvector)| NormalMode::new(frequency, eigenvector))
            .collect();

        self.load_modes(modes)
    }

    /// Replaces the catalog with already paired modes.
    pub fn load_modes(&mut self, mut modes: Vec<NormalMode>) -> Result<()> {
        if let Some((index, mode)) = modes
            .iter()
            .find_position(|mode| mode.eigenvector.len() != self.dimension)
        {
            return Err(BrowserError::invalid(format!(
                "eigenvector {index} has length {}, configuration has {} coordinates",
                mode.eigenvector.len(),
                self.dimension
            )));
        }

        // stable, so equal frequencies keep their input order
        modes.sort_by(|a, b| a.frequency.total_cmp(&b.frequency));

        log::debug!(
            "loaded {} normal modes of dimension {}",
            modes.len(),
            self.dimension
        );
        self.modes = modes;
        Ok(())
    }

    /// Loads the output of an eigen-decomposition: one frequency per column of
    /// `eigenvectors`. Only the real part of each column is kept.
    pub fn load_decomposition(
        &mut self,
        frequencies: &DVector<f64>,
        eigenvectors: &DMatrix<Complex<f64>>,
    ) -> Result<()> {
        if eigenvectors.nrows() != self.dimension {
            return Err(BrowserError::invalid(format!(
                "eigenvector matrix has {} rows, configuration has {} coordinates",
                eigenvectors.nrows(),
                self.dimension
            )));
        }

        let columns = eigenvectors
            .column_iter()
            .map(|column| column.map(|entry| entry.re))
            .collect::<Vec<_>>();

        self.load(frequencies.as_slice(), columns)
    }

    /// The modes in ascending frequency order.
    pub fn sorted_entries(&self) -> impl Iterator<Item = &NormalMode> + '_ {
        self.modes.iter()
    }

    /// The list labels in presented order.
    pub fn labels(&self) -> Vec<String> {
        self.sorted_entries().map(NormalMode::label).collect()
    }

    pub fn get(&self, index: usize) -> Option<&NormalMode> {
        self.modes.get(index)
    }

    pub fn len(&self) -> usize {
        self.modes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modes.is_empty()
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }
}
