//! Selection outputs: [`Definition`], [`RendererConfiguration`] and
//! [`TrackSelectorResult`].

use serde::Serialize;
use std::sync::Arc;

use tp_core::{Format, SelectionReason, TrackGroup};
use tp_mapping::MappedTrackInfo;

/// The tracks chosen for one renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Definition {
    /// Index of the group within the renderer's mapped groups.
    pub group_index: usize,
    pub group: TrackGroup,
    /// Selected track indices within the group. More than one means an
    /// adaptive selection.
    pub tracks: Vec<usize>,
    pub reason: SelectionReason,
    pub data: Option<serde_json::Value>,
}

impl Definition {
    pub fn new(group_index: usize, group: TrackGroup, tracks: Vec<usize>) -> Self {
        Self {
            group_index,
            group,
            tracks,
            reason: SelectionReason::Unknown,
            data: None,
        }
    }

    /// A single-track selection.
    pub fn fixed(group_index: usize, group: TrackGroup, track: usize) -> Self {
        Self::new(group_index, group, vec![track])
    }

    pub fn is_adaptive(&self) -> bool {
        self.tracks.len() > 1
    }

    /// Formats of the selected tracks, in selection order.
    pub fn formats(&self) -> impl Iterator<Item = &Format> {
        self.tracks.iter().map(|&t| self.group.format(t))
    }

    /// Format of the first selected track.
    pub fn primary_format(&self) -> &Format {
        self.group.format(self.tracks[0])
    }
}

/// How an enabled renderer should be configured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct RendererConfiguration {
    /// Audio session to tunnel with, if tunneling is enabled.
    pub tunneling_audio_session_id: Option<u32>,
}

impl RendererConfiguration {
    pub const DEFAULT: RendererConfiguration = RendererConfiguration {
        tunneling_audio_session_id: None,
    };

    pub fn tunneling(session_id: u32) -> Self {
        Self {
            tunneling_audio_session_id: Some(session_id),
        }
    }

    pub fn is_tunneling(&self) -> bool {
        self.tunneling_audio_session_id.is_some()
    }
}

/// Outcome of a selection pass: per renderer, its configuration (`None` when
/// disabled) and its selection (`None` when nothing was selected).
#[derive(Debug, Clone)]
pub struct TrackSelectorResult {
    configurations: Vec<Option<RendererConfiguration>>,
    definitions: Vec<Option<Definition>>,
    mapped_track_info: Arc<MappedTrackInfo>,
}

impl TrackSelectorResult {
    pub fn new(
        configurations: Vec<Option<RendererConfiguration>>,
        definitions: Vec<Option<Definition>>,
        mapped_track_info: Arc<MappedTrackInfo>,
    ) -> Self {
        Self {
            configurations,
            definitions,
            mapped_track_info,
        }
    }

    /// Number of renderers.
    pub fn length(&self) -> usize {
        self.configurations.len()
    }

    pub fn is_renderer_enabled(&self, renderer: usize) -> bool {
        self.configurations[renderer].is_some()
    }

    pub fn configuration(&self, renderer: usize) -> Option<&RendererConfiguration> {
        self.configurations[renderer].as_ref()
    }

    pub fn definition(&self, renderer: usize) -> Option<&Definition> {
        self.definitions[renderer].as_ref()
    }

    pub fn configurations(&self) -> &[Option<RendererConfiguration>] {
        &self.configurations
    }

    pub fn definitions(&self) -> &[Option<Definition>] {
        &self.definitions
    }

    pub fn mapped_track_info(&self) -> &Arc<MappedTrackInfo> {
        &self.mapped_track_info
    }

    /// Whether `other` configures and selects identically for every renderer.
    pub fn is_equivalent(&self, other: &TrackSelectorResult) -> bool {
        self.length() == other.length()
            && (0..self.length()).all(|r| self.is_equivalent_at(other, r))
    }

    /// Whether `other` configures and selects identically for `renderer`.
    pub fn is_equivalent_at(&self, other: &TrackSelectorResult, renderer: usize) -> bool {
        match (self.configurations.get(renderer), other.configurations.get(renderer)) {
            (Some(a), Some(b)) => a == b && self.definitions[renderer] == other.definitions[renderer],
            _ => false,
        }
    }
}
