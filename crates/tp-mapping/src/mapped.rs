//! [`MappedTrackInfo`]: the result of mapping track groups to renderers.

use serde::Serialize;
use std::fmt;

use tp_core::{AdaptiveSupport, Capabilities, FormatSupport, TrackGroupArray, TrackType};

// ---------------------------------------------------------------------------
// RendererSupport
// ---------------------------------------------------------------------------

/// Summary of how well a renderer supports the tracks mapped to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RendererSupport {
    /// No tracks were mapped to the renderer.
    NoTracks,
    /// Tracks were mapped, but none of them can be played.
    UnsupportedTracks,
    /// The best mapped track exceeds the renderer's declared capabilities.
    ExceedsCapabilitiesTracks,
    /// At least one mapped track is handled.
    PlayableTracks,
}

impl fmt::Display for RendererSupport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoTracks => write!(f, "no_tracks"),
            Self::UnsupportedTracks => write!(f, "unsupported_tracks"),
            Self::ExceedsCapabilitiesTracks => write!(f, "exceeds_capabilities_tracks"),
            Self::PlayableTracks => write!(f, "playable_tracks"),
        }
    }
}

// ---------------------------------------------------------------------------
// MappedTrackInfo
// ---------------------------------------------------------------------------

/// Per-renderer view of the mapped track groups and their capabilities.
///
/// Produced fresh by [`map_tracks`](crate::map_tracks) for every selection
/// pass and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MappedTrackInfo {
    renderer_names: Vec<String>,
    renderer_track_types: Vec<TrackType>,
    renderer_track_groups: Vec<TrackGroupArray>,
    /// Indexed by renderer, then group, then track.
    renderer_capabilities: Vec<Vec<Vec<Capabilities>>>,
    renderer_mixed_mime_type_adaptive_support: Vec<AdaptiveSupport>,
    unmapped_track_groups: TrackGroupArray,
}

impl MappedTrackInfo {
    pub(crate) fn new(
        renderer_names: Vec<String>,
        renderer_track_types: Vec<TrackType>,
        renderer_track_groups: Vec<TrackGroupArray>,
        renderer_capabilities: Vec<Vec<Vec<Capabilities>>>,
        renderer_mixed_mime_type_adaptive_support: Vec<AdaptiveSupport>,
        unmapped_track_groups: TrackGroupArray,
    ) -> Self {
        Self {
            renderer_names,
            renderer_track_types,
            renderer_track_groups,
            renderer_capabilities,
            renderer_mixed_mime_type_adaptive_support,
            unmapped_track_groups,
        }
    }

    pub fn renderer_count(&self) -> usize {
        self.renderer_track_types.len()
    }

    pub fn renderer_name(&self, renderer: usize) -> &str {
        &self.renderer_names[renderer]
    }

    pub fn renderer_type(&self, renderer: usize) -> TrackType {
        self.renderer_track_types[renderer]
    }

    /// Track groups mapped to a renderer.
    pub fn track_groups(&self, renderer: usize) -> &TrackGroupArray {
        &self.renderer_track_groups[renderer]
    }

    /// Track groups no renderer supports at all.
    pub fn unmapped_track_groups(&self) -> &TrackGroupArray {
        &self.unmapped_track_groups
    }

    /// Capability matrix of a renderer, indexed by group then track.
    pub fn renderer_capabilities(&self, renderer: usize) -> &[Vec<Capabilities>] {
        &self.renderer_capabilities[renderer]
    }

    pub fn capabilities(&self, renderer: usize, group: usize, track: usize) -> Capabilities {
        self.renderer_capabilities[renderer][group][track]
    }

    pub fn track_support(&self, renderer: usize, group: usize, track: usize) -> FormatSupport {
        self.capabilities(renderer, group, track).format
    }

    pub fn mixed_mime_type_adaptive_support(&self, renderer: usize) -> AdaptiveSupport {
        self.renderer_mixed_mime_type_adaptive_support[renderer]
    }

    /// Best support level across all tracks mapped to a renderer.
    pub fn renderer_support(&self, renderer: usize) -> RendererSupport {
        let best = self.renderer_capabilities[renderer]
            .iter()
            .flatten()
            .map(|caps| caps.format)
            .max();
        match best {
            None => RendererSupport::NoTracks,
            Some(FormatSupport::Handled) => RendererSupport::PlayableTracks,
            Some(FormatSupport::ExceedsCapabilities) => RendererSupport::ExceedsCapabilitiesTracks,
            Some(_) => RendererSupport::UnsupportedTracks,
        }
    }

    /// Best [`renderer_support`](Self::renderer_support) among renderers of
    /// the given type.
    pub fn type_support(&self, track_type: TrackType) -> RendererSupport {
        (0..self.renderer_count())
            .filter(|&r| self.renderer_track_types[r] == track_type)
            .map(|r| self.renderer_support(r))
            .max()
            .unwrap_or(RendererSupport::NoTracks)
    }

    /// Adaptive support of a group, considering its handled tracks and,
    /// when `include_exceeding`, tracks that exceed capabilities.
    pub fn adaptive_support(
        &self,
        renderer: usize,
        group: usize,
        include_exceeding: bool,
    ) -> AdaptiveSupport {
        let tracks: Vec<usize> = self.renderer_capabilities[renderer][group]
            .iter()
            .enumerate()
            .filter(|(_, caps)| caps.is_supported(include_exceeding))
            .map(|(i, _)| i)
            .collect();
        self.adaptive_support_for_tracks(renderer, group, &tracks)
    }

    /// Adaptive support for switching between specific tracks of a group.
    ///
    /// The minimum over the tracks, capped by the renderer's mixed MIME type
    /// support when the tracks' sample MIME types differ. No tracks means no
    /// adaptation.
    pub fn adaptive_support_for_tracks(
        &self,
        renderer: usize,
        group: usize,
        tracks: &[usize],
    ) -> AdaptiveSupport {
        if tracks.is_empty() {
            return AdaptiveSupport::NotSupported;
        }
        let track_group = &self.renderer_track_groups[renderer][group];
        let first_mime = track_group.format(tracks[0]).sample_mime_type.as_deref();
        let mut support = AdaptiveSupport::Seamless;
        let mut mixed_mime_types = false;
        for &track in tracks {
            let mime_type = track_group.format(track).sample_mime_type.as_deref();
            mixed_mime_types |= mime_type != first_mime;
            support = support.min(self.renderer_capabilities[renderer][group][track].adaptive);
        }
        if mixed_mime_types {
            support = support.min(self.renderer_mixed_mime_type_adaptive_support[renderer]);
        }
        support
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tp_core::{mime, Format, TrackGroup};

    fn video(mime_type: &str, width: u32) -> Format {
        Format::builder()
            .sample_mime_type(mime_type)
            .size(width, width * 9 / 16)
            .build()
    }

    fn info(caps: Vec<Capabilities>, mixed: AdaptiveSupport) -> MappedTrackInfo {
        let group = TrackGroup::new(vec![
            video(mime::VIDEO_H264, 640),
            video(mime::VIDEO_H264, 1280),
            video(mime::VIDEO_H265, 1920),
        ])
        .unwrap();
        MappedTrackInfo::new(
            vec!["video".into(), "audio".into()],
            vec![TrackType::Video, TrackType::Audio],
            vec![TrackGroupArray::new(vec![group]), TrackGroupArray::empty()],
            vec![vec![caps], vec![]],
            vec![mixed, AdaptiveSupport::NotSupported],
            TrackGroupArray::empty(),
        )
    }

    fn caps(format: FormatSupport, adaptive: AdaptiveSupport) -> Capabilities {
        Capabilities::new(format).with_adaptive(adaptive)
    }

    #[test]
    fn renderer_support_summarizes_best_track() {
        let mapped = info(
            vec![
                caps(FormatSupport::UnsupportedSubtype, AdaptiveSupport::Seamless),
                caps(FormatSupport::ExceedsCapabilities, AdaptiveSupport::Seamless),
                caps(FormatSupport::UnsupportedDrm, AdaptiveSupport::Seamless),
            ],
            AdaptiveSupport::Seamless,
        );
        assert_eq!(mapped.renderer_support(0), RendererSupport::ExceedsCapabilitiesTracks);
        assert_eq!(mapped.renderer_support(1), RendererSupport::NoTracks);
        assert_eq!(mapped.type_support(TrackType::Video), RendererSupport::ExceedsCapabilitiesTracks);
        assert_eq!(mapped.type_support(TrackType::Text), RendererSupport::NoTracks);
    }

    #[test]
    fn adaptive_support_is_minimum_over_tracks() {
        let mapped = info(
            vec![
                caps(FormatSupport::Handled, AdaptiveSupport::Seamless),
                caps(FormatSupport::Handled, AdaptiveSupport::NotSeamless),
                caps(FormatSupport::ExceedsCapabilities, AdaptiveSupport::Seamless),
            ],
            AdaptiveSupport::Seamless,
        );
        assert_eq!(mapped.adaptive_support(0, 0, false), AdaptiveSupport::NotSeamless);
        assert_eq!(
            mapped.adaptive_support_for_tracks(0, 0, &[0]),
            AdaptiveSupport::Seamless
        );
        assert_eq!(
            mapped.adaptive_support_for_tracks(0, 0, &[]),
            AdaptiveSupport::NotSupported
        );
    }

    #[test]
    fn mixed_mime_types_cap_adaptive_support() {
        let all_seamless = vec![caps(FormatSupport::Handled, AdaptiveSupport::Seamless); 3];
        let mapped = info(all_seamless.clone(), AdaptiveSupport::NotSupported);
        assert_eq!(mapped.adaptive_support_for_tracks(0, 0, &[0, 1]), AdaptiveSupport::Seamless);
        assert_eq!(mapped.adaptive_support(0, 0, true), AdaptiveSupport::NotSupported);

        let mapped = info(all_seamless, AdaptiveSupport::NotSeamless);
        assert_eq!(mapped.adaptive_support(0, 0, true), AdaptiveSupport::NotSeamless);
    }

    #[test]
    fn renderer_support_display() {
        assert_eq!(RendererSupport::PlayableTracks.to_string(), "playable_tracks");
        assert!(RendererSupport::PlayableTracks > RendererSupport::UnsupportedTracks);
    }
}
