//! [`DefaultTrackSelector`]: the entry point applications hold on to.

use arc_swap::{ArcSwap, ArcSwapOption};
use parking_lot::RwLock;
use std::sync::Arc;

use tp_core::language::normalize_language_code;
use tp_core::{Result, TrackGroupArray};
use tp_mapping::{map_tracks, MappedTrackInfo, Renderer};

use crate::definition::TrackSelectorResult;
use crate::engine::select_tracks;
use crate::parameters::{Parameters, ParametersBuilder};

/// Notified when previously made selections are no longer valid, for
/// instance because the parameters changed.
pub trait InvalidationListener: Send + Sync {
    fn on_track_selections_invalidated(&self);
}

/// Maps tracks to renderers and selects among them using swappable
/// [`Parameters`].
///
/// Parameters may be replaced from any thread; each selection pass reads a
/// single snapshot.
pub struct DefaultTrackSelector {
    parameters: ArcSwap<Parameters>,
    system_languages: Vec<String>,
    listener: RwLock<Option<Arc<dyn InvalidationListener>>>,
    current_mapped_track_info: ArcSwapOption<MappedTrackInfo>,
}

impl DefaultTrackSelector {
    pub fn new(parameters: Parameters) -> Self {
        Self {
            parameters: ArcSwap::from_pointee(parameters),
            system_languages: Vec::new(),
            listener: RwLock::new(None),
            current_mapped_track_info: ArcSwapOption::empty(),
        }
    }

    /// Set the device's system languages, most preferred first.
    pub fn with_system_languages<I, S>(mut self, languages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.system_languages = languages
            .into_iter()
            .map(|l| normalize_language_code(l.as_ref()))
            .filter(|l| !l.is_empty())
            .collect();
        self
    }

    pub fn system_languages(&self) -> &[String] {
        &self.system_languages
    }

    /// Register the listener notified on invalidation, replacing any previous one.
    pub fn init(&self, listener: Arc<dyn InvalidationListener>) {
        *self.listener.write() = Some(listener);
    }

    /// The current parameters snapshot.
    pub fn parameters(&self) -> Arc<Parameters> {
        self.parameters.load_full()
    }

    /// Validate and install new parameters. The listener is notified if they
    /// differ from the current ones.
    pub fn set_parameters(&self, parameters: Parameters) -> Result<()> {
        parameters.validate()?;
        let parameters = Arc::new(parameters);
        let previous = self.parameters.swap(Arc::clone(&parameters));
        if *previous != *parameters {
            tracing::debug!("selection parameters changed");
            self.invalidate();
        }
        Ok(())
    }

    pub fn set_parameters_builder(&self, builder: ParametersBuilder) -> Result<()> {
        self.set_parameters(builder.build())
    }

    /// A builder seeded with the current parameters.
    pub fn build_upon_parameters(&self) -> ParametersBuilder {
        self.parameters.load().build_upon()
    }

    /// Map `groups` onto `renderers` and select tracks for each renderer.
    pub fn select_tracks(
        &self,
        renderers: &[Arc<dyn Renderer>],
        groups: &TrackGroupArray,
    ) -> Result<TrackSelectorResult> {
        let span = tracing::debug_span!("select_tracks", renderers = renderers.len(), groups = groups.len());
        let _enter = span.enter();

        let params = self.parameters.load_full();
        let info = Arc::new(map_tracks(renderers, groups)?);
        let result = select_tracks(info, &params, &self.system_languages);
        tracing::debug!(
            enabled = (0..result.length()).filter(|&r| result.is_renderer_enabled(r)).count(),
            "selection pass complete"
        );
        Ok(result)
    }

    /// Record that `result` is now in use.
    pub fn on_selection_activated(&self, result: &TrackSelectorResult) {
        self.current_mapped_track_info
            .store(Some(Arc::clone(result.mapped_track_info())));
    }

    /// Mapped track info of the most recently activated selection.
    pub fn current_mapped_track_info(&self) -> Option<Arc<MappedTrackInfo>> {
        self.current_mapped_track_info.load_full()
    }

    fn invalidate(&self) {
        if let Some(listener) = self.listener.read().as_ref() {
            listener.on_track_selections_invalidated();
        }
    }
}

impl Default for DefaultTrackSelector {
    fn default() -> Self {
        Self::new(Parameters::default())
    }
}
