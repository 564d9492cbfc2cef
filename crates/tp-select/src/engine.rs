//! The selection pass: per-type selection, then overrides, enablement and
//! tunneling.

use std::sync::Arc;

use tp_core::TrackType;
use tp_mapping::MappedTrackInfo;

use crate::audio::select_audio_track;
use crate::definition::{Definition, RendererConfiguration, TrackSelectorResult};
use crate::other::select_other_track;
use crate::parameters::Parameters;
use crate::score::{AudioTrackScore, TextTrackScore};
use crate::text::select_text_track;
use crate::tunneling::configure_renderers_for_tunneling;
use crate::video::select_video_track;

/// Compute a selection for every renderer from the mapped tracks alone,
/// ignoring disables and overrides.
///
/// Only the first video renderer that yields a selection gets one. Audio and
/// text each go to the single renderer with the best scoring track.
pub fn select_all_tracks(
    info: &MappedTrackInfo,
    params: &Parameters,
    system_languages: &[String],
) -> Vec<Option<Definition>> {
    let renderer_count = info.renderer_count();
    let mut definitions: Vec<Option<Definition>> = vec![None; renderer_count];

    let mut seen_video_renderer_with_mapped_tracks = false;
    let mut selected_video_tracks = false;
    for renderer in 0..renderer_count {
        if info.renderer_type(renderer) != TrackType::Video {
            continue;
        }
        if !selected_video_tracks {
            definitions[renderer] = select_video_track(
                info.track_groups(renderer),
                info.renderer_capabilities(renderer),
                info.mixed_mime_type_adaptive_support(renderer),
                params,
                true,
            );
            selected_video_tracks = definitions[renderer].is_some();
        }
        seen_video_renderer_with_mapped_tracks |= !info.track_groups(renderer).is_empty();
    }

    let enable_adaptive_audio =
        params.allow_multiple_adaptive_selections || !seen_video_renderer_with_mapped_tracks;
    let mut best_audio: Option<(usize, AudioTrackScore)> = None;
    let mut selected_audio_language: Option<String> = None;
    for renderer in 0..renderer_count {
        if info.renderer_type(renderer) != TrackType::Audio {
            continue;
        }
        let Some((definition, score)) = select_audio_track(
            info.track_groups(renderer),
            info.renderer_capabilities(renderer),
            params,
            system_languages,
            enable_adaptive_audio,
        ) else {
            continue;
        };
        if best_audio.as_ref().map_or(true, |(_, best)| score > *best) {
            if let Some((previous, _)) = best_audio {
                definitions[previous] = None;
            }
            selected_audio_language = definition.primary_format().language.clone();
            definitions[renderer] = Some(definition);
            best_audio = Some((renderer, score));
        }
    }

    let mut best_text: Option<(usize, TextTrackScore)> = None;
    for renderer in 0..renderer_count {
        if info.renderer_type(renderer) != TrackType::Text {
            continue;
        }
        let Some((definition, score)) = select_text_track(
            info.track_groups(renderer),
            info.renderer_capabilities(renderer),
            params,
            selected_audio_language.as_deref(),
        ) else {
            continue;
        };
        if best_text.as_ref().map_or(true, |(_, best)| score > *best) {
            if let Some((previous, _)) = best_text {
                definitions[previous] = None;
            }
            definitions[renderer] = Some(definition);
            best_text = Some((renderer, score));
        }
    }

    for (renderer, definition) in definitions.iter_mut().enumerate() {
        match info.renderer_type(renderer) {
            TrackType::Video | TrackType::Audio | TrackType::Text => {}
            _ => {
                *definition = select_other_track(
                    info.track_groups(renderer),
                    info.renderer_capabilities(renderer),
                    params,
                );
            }
        }
    }

    for (renderer, definition) in definitions.iter().enumerate() {
        if let Some(definition) = definition {
            tracing::debug!(
                renderer,
                renderer_type = %info.renderer_type(renderer),
                group = definition.group_index,
                tracks = ?definition.tracks,
                "selected tracks"
            );
        }
    }

    definitions
}

/// Run a full selection pass over mapped tracks.
pub fn select_tracks(
    info: Arc<MappedTrackInfo>,
    params: &Parameters,
    system_languages: &[String],
) -> TrackSelectorResult {
    let renderer_count = info.renderer_count();
    let mut definitions = select_all_tracks(&info, params, system_languages);

    for (renderer, definition) in definitions.iter_mut().enumerate() {
        if params.renderer_disabled(renderer) {
            *definition = None;
            continue;
        }
        let groups = info.track_groups(renderer);
        match params.selection_override(renderer, groups) {
            None => {}
            Some(None) => {
                tracing::debug!(renderer, "selection override clears renderer");
                *definition = None;
            }
            Some(Some(selection_override)) => {
                // Parameters built without validation may carry a bad override.
                if let Err(e) = selection_override.validate(renderer, groups) {
                    tracing::warn!(renderer, error = %e, "ignoring invalid selection override");
                    continue;
                }
                tracing::debug!(
                    renderer,
                    group = selection_override.group_index,
                    tracks = ?selection_override.tracks,
                    "applying selection override"
                );
                *definition = Some(Definition {
                    group_index: selection_override.group_index,
                    group: groups[selection_override.group_index].clone(),
                    tracks: selection_override.tracks.clone(),
                    reason: selection_override.reason,
                    data: selection_override.data.clone(),
                });
            }
        }
    }

    let mut configurations: Vec<Option<RendererConfiguration>> = (0..renderer_count)
        .map(|renderer| {
            let enabled = !params.renderer_disabled(renderer)
                && (info.renderer_type(renderer) == TrackType::None
                    || definitions[renderer].is_some());
            enabled.then_some(RendererConfiguration::DEFAULT)
        })
        .collect();

    configure_renderers_for_tunneling(
        &info,
        &mut configurations,
        &definitions,
        params.tunneling_audio_session_id,
    );

    TrackSelectorResult::new(configurations, definitions, info)
}
