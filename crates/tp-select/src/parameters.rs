//! Selection [`Parameters`], their [`ParametersBuilder`], and per-renderer
//! [`SelectionOverride`]s.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};

use tp_core::config::SelectorConfig;
use tp_core::{Error, Result, RoleFlags, SelectionFlags, SelectionReason, TrackGroupArray};

/// Width and height below HD, used by [`ParametersBuilder::set_max_video_size_sd`].
pub const SD_MAX_WIDTH: u32 = 1279;
pub const SD_MAX_HEIGHT: u32 = 719;

// ---------------------------------------------------------------------------
// SelectionOverride
// ---------------------------------------------------------------------------

/// A user-chosen selection that replaces the computed one for a renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionOverride {
    /// Index of the group within the renderer's mapped groups.
    pub group_index: usize,
    /// Selected track indices, sorted ascending.
    pub tracks: Vec<usize>,
    #[serde(default = "manual_reason")]
    pub reason: SelectionReason,
    #[serde(default)]
    pub data: Option<serde_json::Value>,
}

fn manual_reason() -> SelectionReason {
    SelectionReason::Manual
}

impl SelectionOverride {
    pub fn new(group_index: usize, tracks: impl Into<Vec<usize>>) -> Self {
        let mut tracks = tracks.into();
        tracks.sort_unstable();
        Self {
            group_index,
            tracks,
            reason: SelectionReason::Manual,
            data: None,
        }
    }

    pub fn with_reason(mut self, reason: SelectionReason) -> Self {
        self.reason = reason;
        self
    }

    pub fn with_data(mut self, data: serde_json::Value) -> Self {
        self.data = Some(data);
        self
    }

    pub fn contains_track(&self, track: usize) -> bool {
        self.tracks.binary_search(&track).is_ok()
    }

    pub(crate) fn validate(&self, renderer: usize, groups: &TrackGroupArray) -> Result<()> {
        let Some(group) = groups.get(self.group_index) else {
            return Err(Error::invalid_parameters(format!(
                "override for renderer {renderer}: group index {} out of range ({} groups)",
                self.group_index,
                groups.len()
            )));
        };
        if self.tracks.is_empty() {
            return Err(Error::invalid_parameters(format!(
                "override for renderer {renderer}: no tracks selected"
            )));
        }
        if let Some(&track) = self.tracks.iter().find(|&&t| t >= group.len()) {
            return Err(Error::invalid_parameters(format!(
                "override for renderer {renderer}: track {track} out of range ({} tracks)",
                group.len()
            )));
        }
        if let Some(pair) = self.tracks.windows(2).find(|w| w[0] == w[1]) {
            return Err(Error::invalid_parameters(format!(
                "override for renderer {renderer}: duplicate track {}",
                pair[0]
            )));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Parameters
// ---------------------------------------------------------------------------

type RendererOverrides = HashMap<TrackGroupArray, Option<SelectionOverride>>;

/// An immutable snapshot of track selection preferences and constraints.
///
/// Numeric maxima of `u32::MAX` mean "unconstrained"; a viewport dimension
/// of `u32::MAX` means the viewport is unset. Build instances with
/// [`ParametersBuilder`] or [`Parameters::build_upon`].
#[derive(Debug, Clone, PartialEq)]
pub struct Parameters {
    // Video
    pub(crate) max_video_width: u32,
    pub(crate) max_video_height: u32,
    pub(crate) max_video_frame_rate: u32,
    pub(crate) max_video_bitrate: u32,
    pub(crate) exceed_video_constraints_if_necessary: bool,
    pub(crate) allow_video_mixed_mime_type_adaptiveness: bool,
    pub(crate) allow_video_non_seamless_adaptiveness: bool,
    pub(crate) viewport_width: u32,
    pub(crate) viewport_height: u32,
    pub(crate) viewport_orientation_may_change: bool,
    // Audio
    pub(crate) preferred_audio_language: Option<String>,
    pub(crate) max_audio_channel_count: u32,
    pub(crate) max_audio_bitrate: u32,
    pub(crate) exceed_audio_constraints_if_necessary: bool,
    pub(crate) allow_audio_mixed_mime_type_adaptiveness: bool,
    pub(crate) allow_audio_mixed_sample_rate_adaptiveness: bool,
    pub(crate) allow_audio_mixed_channel_count_adaptiveness: bool,
    // Text
    pub(crate) preferred_text_language: Option<String>,
    pub(crate) preferred_text_role_flags: RoleFlags,
    pub(crate) select_undetermined_text_language: bool,
    pub(crate) disabled_text_track_selection_flags: SelectionFlags,
    // General
    pub(crate) force_lowest_bitrate: bool,
    pub(crate) force_highest_supported_bitrate: bool,
    pub(crate) exceed_renderer_capabilities_if_necessary: bool,
    pub(crate) allow_multiple_adaptive_selections: bool,
    pub(crate) tunneling_audio_session_id: Option<u32>,
    // Per renderer
    selection_overrides: BTreeMap<usize, RendererOverrides>,
    renderer_disabled_flags: BTreeSet<usize>,
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            max_video_width: u32::MAX,
            max_video_height: u32::MAX,
            max_video_frame_rate: u32::MAX,
            max_video_bitrate: u32::MAX,
            exceed_video_constraints_if_necessary: true,
            allow_video_mixed_mime_type_adaptiveness: false,
            allow_video_non_seamless_adaptiveness: true,
            viewport_width: u32::MAX,
            viewport_height: u32::MAX,
            viewport_orientation_may_change: true,
            preferred_audio_language: None,
            max_audio_channel_count: u32::MAX,
            max_audio_bitrate: u32::MAX,
            exceed_audio_constraints_if_necessary: true,
            allow_audio_mixed_mime_type_adaptiveness: false,
            allow_audio_mixed_sample_rate_adaptiveness: false,
            allow_audio_mixed_channel_count_adaptiveness: false,
            preferred_text_language: None,
            preferred_text_role_flags: RoleFlags::empty(),
            select_undetermined_text_language: false,
            disabled_text_track_selection_flags: SelectionFlags::empty(),
            force_lowest_bitrate: false,
            force_highest_supported_bitrate: false,
            exceed_renderer_capabilities_if_necessary: true,
            allow_multiple_adaptive_selections: false,
            tunneling_audio_session_id: None,
            selection_overrides: BTreeMap::new(),
            renderer_disabled_flags: BTreeSet::new(),
        }
    }
}

impl Parameters {
    /// A builder seeded with these parameters.
    pub fn build_upon(&self) -> ParametersBuilder {
        ParametersBuilder {
            params: self.clone(),
        }
    }

    // -- Read-only access --------------------------------------------------

    pub fn max_video_width(&self) -> u32 {
        self.max_video_width
    }

    pub fn max_video_height(&self) -> u32 {
        self.max_video_height
    }

    pub fn max_video_frame_rate(&self) -> u32 {
        self.max_video_frame_rate
    }

    pub fn max_video_bitrate(&self) -> u32 {
        self.max_video_bitrate
    }

    pub fn exceed_video_constraints_if_necessary(&self) -> bool {
        self.exceed_video_constraints_if_necessary
    }

    pub fn allow_video_mixed_mime_type_adaptiveness(&self) -> bool {
        self.allow_video_mixed_mime_type_adaptiveness
    }

    pub fn allow_video_non_seamless_adaptiveness(&self) -> bool {
        self.allow_video_non_seamless_adaptiveness
    }

    pub fn viewport_width(&self) -> u32 {
        self.viewport_width
    }

    pub fn viewport_height(&self) -> u32 {
        self.viewport_height
    }

    pub fn viewport_orientation_may_change(&self) -> bool {
        self.viewport_orientation_may_change
    }

    pub fn preferred_audio_language(&self) -> Option<&str> {
        self.preferred_audio_language.as_deref()
    }

    pub fn max_audio_channel_count(&self) -> u32 {
        self.max_audio_channel_count
    }

    pub fn max_audio_bitrate(&self) -> u32 {
        self.max_audio_bitrate
    }

    pub fn exceed_audio_constraints_if_necessary(&self) -> bool {
        self.exceed_audio_constraints_if_necessary
    }

    pub fn allow_audio_mixed_mime_type_adaptiveness(&self) -> bool {
        self.allow_audio_mixed_mime_type_adaptiveness
    }

    pub fn allow_audio_mixed_sample_rate_adaptiveness(&self) -> bool {
        self.allow_audio_mixed_sample_rate_adaptiveness
    }

    pub fn allow_audio_mixed_channel_count_adaptiveness(&self) -> bool {
        self.allow_audio_mixed_channel_count_adaptiveness
    }

    pub fn preferred_text_language(&self) -> Option<&str> {
        self.preferred_text_language.as_deref()
    }

    pub fn preferred_text_role_flags(&self) -> RoleFlags {
        self.preferred_text_role_flags
    }

    pub fn select_undetermined_text_language(&self) -> bool {
        self.select_undetermined_text_language
    }

    pub fn disabled_text_track_selection_flags(&self) -> SelectionFlags {
        self.disabled_text_track_selection_flags
    }

    pub fn force_lowest_bitrate(&self) -> bool {
        self.force_lowest_bitrate
    }

    pub fn force_highest_supported_bitrate(&self) -> bool {
        self.force_highest_supported_bitrate
    }

    pub fn exceed_renderer_capabilities_if_necessary(&self) -> bool {
        self.exceed_renderer_capabilities_if_necessary
    }

    pub fn allow_multiple_adaptive_selections(&self) -> bool {
        self.allow_multiple_adaptive_selections
    }

    pub fn tunneling_audio_session_id(&self) -> Option<u32> {
        self.tunneling_audio_session_id
    }

    pub fn renderer_disabled(&self, renderer: usize) -> bool {
        self.renderer_disabled_flags.contains(&renderer)
    }

    /// Indices of all disabled renderers, ascending.
    pub fn disabled_renderers(&self) -> impl Iterator<Item = usize> + '_ {
        self.renderer_disabled_flags.iter().copied()
    }

    /// Whether an override (possibly an empty one) exists for the renderer
    /// and these exact groups.
    pub fn has_selection_override(&self, renderer: usize, groups: &TrackGroupArray) -> bool {
        self.selection_overrides
            .get(&renderer)
            .is_some_and(|overrides| overrides.contains_key(groups))
    }

    /// The override for the renderer and groups. `Some(None)` is an override
    /// that clears the selection.
    pub fn selection_override(
        &self,
        renderer: usize,
        groups: &TrackGroupArray,
    ) -> Option<Option<&SelectionOverride>> {
        self.selection_overrides
            .get(&renderer)
            .and_then(|overrides| overrides.get(groups))
            .map(Option::as_ref)
    }

    /// Number of overrides registered across all renderers.
    pub fn selection_override_count(&self) -> usize {
        self.selection_overrides.values().map(HashMap::len).sum()
    }

    /// Whether the viewport is set.
    pub fn has_viewport(&self) -> bool {
        self.viewport_width != u32::MAX && self.viewport_height != u32::MAX
    }

    /// Check that the parameters are internally consistent.
    pub fn validate(&self) -> Result<()> {
        if self.viewport_width == 0 || self.viewport_height == 0 {
            return Err(Error::invalid_parameters(format!(
                "viewport {}x{} has a zero dimension",
                self.viewport_width, self.viewport_height
            )));
        }
        for (&renderer, overrides) in &self.selection_overrides {
            for (groups, selection_override) in overrides {
                if let Some(selection_override) = selection_override {
                    selection_override.validate(renderer, groups)?;
                }
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// ParametersBuilder
// ---------------------------------------------------------------------------

/// Builder for [`Parameters`].
///
/// ```
/// use tp_select::ParametersBuilder;
///
/// let params = ParametersBuilder::new()
///     .set_max_video_size_sd()
///     .preferred_audio_language("deu")
///     .build();
/// assert_eq!(params.max_video_width(), 1279);
/// assert_eq!(params.preferred_audio_language(), Some("de"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ParametersBuilder {
    params: Parameters,
}

impl ParametersBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// A builder seeded from a [`SelectorConfig`].
    pub fn from_config(config: &SelectorConfig) -> Self {
        let video = &config.video;
        let audio = &config.audio;
        let text = &config.text;
        let playback = &config.playback;

        let mut builder = Self::new()
            .max_video_width(video.max_width.unwrap_or(u32::MAX))
            .max_video_height(video.max_height.unwrap_or(u32::MAX))
            .max_video_frame_rate(video.max_frame_rate.unwrap_or(u32::MAX))
            .max_video_bitrate(video.max_bitrate.unwrap_or(u32::MAX))
            .exceed_video_constraints_if_necessary(video.exceed_constraints_if_necessary)
            .allow_video_mixed_mime_type_adaptiveness(video.allow_mixed_mime_type_adaptiveness)
            .allow_video_non_seamless_adaptiveness(video.allow_non_seamless_adaptiveness)
            .max_audio_channel_count(audio.max_channel_count.unwrap_or(u32::MAX))
            .max_audio_bitrate(audio.max_bitrate.unwrap_or(u32::MAX))
            .exceed_audio_constraints_if_necessary(audio.exceed_constraints_if_necessary)
            .allow_audio_mixed_mime_type_adaptiveness(audio.allow_mixed_mime_type_adaptiveness)
            .allow_audio_mixed_sample_rate_adaptiveness(audio.allow_mixed_sample_rate_adaptiveness)
            .allow_audio_mixed_channel_count_adaptiveness(
                audio.allow_mixed_channel_count_adaptiveness,
            )
            .preferred_text_role_flags(text.preferred_role_flags)
            .select_undetermined_text_language(text.select_undetermined_language)
            .disabled_text_track_selection_flags(text.disabled_selection_flags)
            .force_lowest_bitrate(playback.force_lowest_bitrate)
            .force_highest_supported_bitrate(playback.force_highest_supported_bitrate)
            .exceed_renderer_capabilities_if_necessary(
                playback.exceed_renderer_capabilities_if_necessary,
            )
            .allow_multiple_adaptive_selections(playback.allow_multiple_adaptive_selections)
            .tunneling_audio_session_id(playback.tunneling_audio_session_id);

        if let Some(viewport) = &video.viewport {
            builder = builder.set_viewport_size(
                viewport.width,
                viewport.height,
                viewport.orientation_may_change,
            );
        }
        if let Some(language) = &audio.preferred_language {
            builder = builder.preferred_audio_language(language);
        }
        if let Some(language) = &text.preferred_language {
            builder = builder.preferred_text_language(language);
        }
        for &renderer in &config.disabled_renderers {
            builder = builder.set_renderer_disabled(renderer, true);
        }
        builder
    }

    // -- Video --------------------------------------------------------------

    pub fn max_video_width(mut self, width: u32) -> Self {
        self.params.max_video_width = width;
        self
    }

    pub fn max_video_height(mut self, height: u32) -> Self {
        self.params.max_video_height = height;
        self
    }

    pub fn set_max_video_size(self, width: u32, height: u32) -> Self {
        self.max_video_width(width).max_video_height(height)
    }

    /// Restrict video to standard definition.
    pub fn set_max_video_size_sd(self) -> Self {
        self.set_max_video_size(SD_MAX_WIDTH, SD_MAX_HEIGHT)
    }

    pub fn clear_video_size_constraints(self) -> Self {
        self.set_max_video_size(u32::MAX, u32::MAX)
    }

    pub fn max_video_frame_rate(mut self, frame_rate: u32) -> Self {
        self.params.max_video_frame_rate = frame_rate;
        self
    }

    pub fn max_video_bitrate(mut self, bitrate: u32) -> Self {
        self.params.max_video_bitrate = bitrate;
        self
    }

    pub fn exceed_video_constraints_if_necessary(mut self, value: bool) -> Self {
        self.params.exceed_video_constraints_if_necessary = value;
        self
    }

    pub fn allow_video_mixed_mime_type_adaptiveness(mut self, value: bool) -> Self {
        self.params.allow_video_mixed_mime_type_adaptiveness = value;
        self
    }

    pub fn allow_video_non_seamless_adaptiveness(mut self, value: bool) -> Self {
        self.params.allow_video_non_seamless_adaptiveness = value;
        self
    }

    pub fn set_viewport_size(mut self, width: u32, height: u32, orientation_may_change: bool) -> Self {
        self.params.viewport_width = width;
        self.params.viewport_height = height;
        self.params.viewport_orientation_may_change = orientation_may_change;
        self
    }

    pub fn clear_viewport_size_constraints(self) -> Self {
        self.set_viewport_size(u32::MAX, u32::MAX, true)
    }

    // -- Audio --------------------------------------------------------------

    /// Preferred audio language. The tag is normalized.
    pub fn preferred_audio_language(mut self, language: impl AsRef<str>) -> Self {
        self.params.preferred_audio_language = normalize_preference(language.as_ref());
        self
    }

    pub fn clear_preferred_audio_language(mut self) -> Self {
        self.params.preferred_audio_language = None;
        self
    }

    pub fn max_audio_channel_count(mut self, channel_count: u32) -> Self {
        self.params.max_audio_channel_count = channel_count;
        self
    }

    pub fn max_audio_bitrate(mut self, bitrate: u32) -> Self {
        self.params.max_audio_bitrate = bitrate;
        self
    }

    pub fn exceed_audio_constraints_if_necessary(mut self, value: bool) -> Self {
        self.params.exceed_audio_constraints_if_necessary = value;
        self
    }

    pub fn allow_audio_mixed_mime_type_adaptiveness(mut self, value: bool) -> Self {
        self.params.allow_audio_mixed_mime_type_adaptiveness = value;
        self
    }

    pub fn allow_audio_mixed_sample_rate_adaptiveness(mut self, value: bool) -> Self {
        self.params.allow_audio_mixed_sample_rate_adaptiveness = value;
        self
    }

    pub fn allow_audio_mixed_channel_count_adaptiveness(mut self, value: bool) -> Self {
        self.params.allow_audio_mixed_channel_count_adaptiveness = value;
        self
    }

    // -- Text ---------------------------------------------------------------

    /// Preferred text language. The tag is normalized.
    pub fn preferred_text_language(mut self, language: impl AsRef<str>) -> Self {
        self.params.preferred_text_language = normalize_preference(language.as_ref());
        self
    }

    pub fn clear_preferred_text_language(mut self) -> Self {
        self.params.preferred_text_language = None;
        self
    }

    pub fn preferred_text_role_flags(mut self, flags: RoleFlags) -> Self {
        self.params.preferred_text_role_flags = flags;
        self
    }

    pub fn select_undetermined_text_language(mut self, value: bool) -> Self {
        self.params.select_undetermined_text_language = value;
        self
    }

    pub fn disabled_text_track_selection_flags(mut self, flags: SelectionFlags) -> Self {
        self.params.disabled_text_track_selection_flags = flags;
        self
    }

    // -- General ------------------------------------------------------------

    pub fn force_lowest_bitrate(mut self, value: bool) -> Self {
        self.params.force_lowest_bitrate = value;
        self
    }

    pub fn force_highest_supported_bitrate(mut self, value: bool) -> Self {
        self.params.force_highest_supported_bitrate = value;
        self
    }

    pub fn exceed_renderer_capabilities_if_necessary(mut self, value: bool) -> Self {
        self.params.exceed_renderer_capabilities_if_necessary = value;
        self
    }

    pub fn allow_multiple_adaptive_selections(mut self, value: bool) -> Self {
        self.params.allow_multiple_adaptive_selections = value;
        self
    }

    pub fn tunneling_audio_session_id(mut self, session_id: Option<u32>) -> Self {
        self.params.tunneling_audio_session_id = session_id;
        self
    }

    // -- Per renderer -------------------------------------------------------

    pub fn set_renderer_disabled(mut self, renderer: usize, disabled: bool) -> Self {
        if disabled {
            self.params.renderer_disabled_flags.insert(renderer);
        } else {
            self.params.renderer_disabled_flags.remove(&renderer);
        }
        self
    }

    /// Override the selection for a renderer while it has exactly `groups`
    /// mapped. `None` forces no selection.
    pub fn set_selection_override(
        mut self,
        renderer: usize,
        groups: TrackGroupArray,
        selection_override: Option<SelectionOverride>,
    ) -> Self {
        self.params
            .selection_overrides
            .entry(renderer)
            .or_default()
            .insert(groups, selection_override);
        self
    }

    pub fn clear_selection_override(mut self, renderer: usize, groups: &TrackGroupArray) -> Self {
        if let Some(overrides) = self.params.selection_overrides.get_mut(&renderer) {
            overrides.remove(groups);
            if overrides.is_empty() {
                self.params.selection_overrides.remove(&renderer);
            }
        }
        self
    }

    pub fn clear_selection_overrides_for_renderer(mut self, renderer: usize) -> Self {
        self.params.selection_overrides.remove(&renderer);
        self
    }

    pub fn clear_selection_overrides(mut self) -> Self {
        self.params.selection_overrides.clear();
        self
    }

    pub fn build(self) -> Parameters {
        self.params
    }
}

fn normalize_preference(language: &str) -> Option<String> {
    let normalized = tp_core::language::normalize_language_code(language);
    (!normalized.is_empty()).then_some(normalized)
}
