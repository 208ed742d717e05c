use std::path::Path;

use crate::{
    catalog::ModeCatalog,
    error::{BrowserError, Result},
    export,
    mode::{Coordinates, NormalMode},
    params::ViewParameters,
    path::{self, DisplacementPath},
    system::{CoordinateView, NormalModeSystem, ParameterDialog},
};

type DialogFactory = Box<dyn Fn() -> Box<dyn ParameterDialog>>;

/// A session browsing the normal modes of one configuration at a time.
///
/// Selecting a mode generates a preview path and hands it to the view. The
/// selected, possibly orthogonalized, eigenvector is kept for exports.
pub struct NormalModeBrowser<S, V> {
    system: S,
    view: V,
    params: ViewParameters,
    catalog: ModeCatalog,
    coords: Option<Coordinates>,
    current_mode: Option<Coordinates>,
    dialog_factory: DialogFactory,
    dialog: Option<Box<dyn ParameterDialog>>,
}

impl<S: NormalModeSystem, V: CoordinateView> NormalModeBrowser<S, V> {
    /// `dialog_factory` is only called the first time the parameters are
    /// opened. Fails if `params` don't validate.
    pub fn new(
        system: S,
        view: V,
        params: ViewParameters,
        dialog_factory: impl Fn() -> Box<dyn ParameterDialog> + 'static,
    ) -> Result<Self> {
        params.validate()?;

        Ok(Self {
            system,
            view,
            params,
            catalog: ModeCatalog::default(),
            coords: None,
            current_mode: None,
            dialog_factory: Box::new(dialog_factory),
            dialog: None,
        })
    }

    /// Switches to a new configuration. Without `modes` they are computed by
    /// the system. Any previous selection is dropped.
    pub fn set_coords(&mut self, coords: Coordinates, modes: Option<Vec<NormalMode>>) -> Result<()> {
        let mut catalog = ModeCatalog::new(coords.len());
        match modes {
            Some(modes) => catalog.load_modes(modes)?,
            None => {
                let (frequencies, eigenvectors) = self.system.normal_modes(&coords)?;
                catalog.load_decomposition(&frequencies, &eigenvectors)?;
            }
        }

        self.view.set_coords(&coords);
        self.catalog = catalog;
        self.coords = Some(coords);
        self.current_mode = None;
        Ok(())
    }

    /// Selects the mode at `index` of the presented list, or clears the
    /// selection with `None`. The preview path sent to the view is returned.
    ///
    /// A failed selection leaves the previous one in place.
    pub fn select(&mut self, index: Option<usize>) -> Result<Option<DisplacementPath>> {
        let Some(index) = index else {
            log::debug!("selection cleared");
            self.current_mode = None;
            return Ok(None);
        };

        let coords = self.coords()?;
        let mode = self.catalog.get(index).ok_or_else(|| {
            BrowserError::invalid(format!(
                "mode {index} selected but only {} modes are listed",
                self.catalog.len()
            ))
        })?;
        log::debug!("selected mode {index} with frequency {}", mode.label());

        let mut vector = mode.eigenvector.clone();
        if self.params.remove_known_zeroev {
            vector = self
                .system
                .orthogonalize_to_zero_eigenvectors(vector, coords)?;
            if vector.len() != coords.len() {
                return Err(BrowserError::invalid(format!(
                    "orthogonalized mode has {} coordinates, configuration has {}",
                    vector.len(),
                    coords.len()
                )));
            }
        }

        let preview = self.preview_for(&vector)?;
        self.view
            .set_coords_path(&preview.frames, preview.labels.as_deref());
        self.current_mode = Some(vector);

        Ok(Some(preview))
    }

    /// The preview ramp of the current selection, labeled with energies.
    pub fn preview(&self) -> Result<DisplacementPath> {
        let mode = self.current_mode()?;
        self.preview_for(mode)
    }

    fn preview_for(&self, mode: &Coordinates) -> Result<DisplacementPath> {
        let path = path::labeled_preview(
            self.coords()?,
            mode,
            self.params.amplitude,
            self.params.n_frames,
            |frame| self.system.energy(frame),
        )?;
        log::debug!("generated preview path of {} frames", path.len());
        Ok(path)
    }

    /// One full oscillation along the current selection.
    pub fn export_path(&self) -> Result<Vec<Coordinates>> {
        let mode = self.current_mode()?;
        path::export_oscillation(
            self.coords()?,
            mode,
            self.params.amplitude,
            self.params.export.n_frames,
        )
    }

    /// Writes [`Self::export_path`] to `path`. Nothing is written without a
    /// selection.
    pub fn export(&self, path: impl AsRef<Path>) -> Result<()> {
        let frames = self.export_path()?;
        export::write_trajectory(&path, &frames)?;
        log::info!(
            "exported {} frames to {}",
            frames.len(),
            path.as_ref().display()
        );
        Ok(())
    }

    /// Plays or stops the animation in the view.
    pub fn set_running(&mut self, running: bool) {
        if running {
            self.view.start_animation();
        } else {
            self.view.stop_animation();
        }
    }

    /// Shows the parameter dialog, building it on first use.
    pub fn open_parameters(&mut self) -> Result<()> {
        let Self {
            dialog,
            dialog_factory,
            params,
            ..
        } = self;

        let dialog = dialog.get_or_insert_with(|| dialog_factory());
        let mut edited = params.clone();
        dialog.show(&mut edited);

        if let Err(err) = edited.validate() {
            log::warn!("keeping previous parameters: {err}");
            return Err(err);
        }
        *params = edited;
        Ok(())
    }

    /// List labels in presented order.
    pub fn labels(&self) -> Vec<String> {
        self.catalog.labels()
    }

    pub fn catalog(&self) -> &ModeCatalog {
        &self.catalog
    }

    pub fn params(&self) -> &ViewParameters {
        &self.params
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn system(&self) -> &S {
        &self.system
    }

    pub fn selected_mode(&self) -> Option<&Coordinates> {
        self.current_mode.as_ref()
    }

    fn coords(&self) -> Result<&Coordinates> {
        self.coords
            .as_ref()
            .ok_or_else(|| BrowserError::invalid("no configuration loaded"))
    }

    fn current_mode(&self) -> Result<&Coordinates> {
        self.current_mode.as_ref().ok_or(BrowserError::NoModeSelected)
    }
}
