//! Tunneled playback: audio and video rendered through a shared session.

use tp_core::TrackType;
use tp_mapping::MappedTrackInfo;

use crate::definition::{Definition, RendererConfiguration};

/// Enable tunneling on exactly one audio and one video renderer, if a
/// session id is configured and both renderers support tunneling for every
/// selected track.
///
/// More than one qualifying renderer of either type disables tunneling.
/// Returns the `(audio, video)` renderer indices that were configured.
pub fn configure_renderers_for_tunneling(
    info: &MappedTrackInfo,
    configurations: &mut [Option<RendererConfiguration>],
    definitions: &[Option<Definition>],
    tunneling_audio_session_id: Option<u32>,
) -> Option<(usize, usize)> {
    let session_id = tunneling_audio_session_id?;

    let mut audio_renderer = None;
    let mut video_renderer = None;
    for (renderer, definition) in definitions.iter().enumerate() {
        let track_type = info.renderer_type(renderer);
        if track_type != TrackType::Audio && track_type != TrackType::Video {
            continue;
        }
        let Some(definition) = definition else {
            continue;
        };
        if !renderer_supports_tunneling(info, renderer, definition) {
            continue;
        }
        let slot = if track_type == TrackType::Audio {
            &mut audio_renderer
        } else {
            &mut video_renderer
        };
        if slot.is_some() {
            tracing::debug!(renderer, %track_type, "multiple tunneling renderers; tunneling disabled");
            return None;
        }
        *slot = Some(renderer);
    }

    let (audio, video) = (audio_renderer?, video_renderer?);
    let configuration = RendererConfiguration::tunneling(session_id);
    configurations[audio] = Some(configuration);
    configurations[video] = Some(configuration);
    tracing::debug!(audio, video, session_id, "tunneling enabled");
    Some((audio, video))
}

fn renderer_supports_tunneling(
    info: &MappedTrackInfo,
    renderer: usize,
    definition: &Definition,
) -> bool {
    definition
        .tracks
        .iter()
        .all(|&track| info.capabilities(renderer, definition.group_index, track).supports_tunneling())
}
