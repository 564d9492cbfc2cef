//! Audio track selection.

use tp_core::{Capabilities, Format, FormatSupport, TrackGroup, TrackGroupArray};

use crate::definition::Definition;
use crate::parameters::Parameters;
use crate::score::{is_within_limit, AudioTrackScore};

/// Select audio tracks for one renderer, returning the selection and the
/// score of its best track so renderers can be compared.
pub fn select_audio_track(
    groups: &TrackGroupArray,
    capabilities: &[Vec<Capabilities>],
    params: &Parameters,
    system_languages: &[String],
    enable_adaptive_track_selection: bool,
) -> Option<(Definition, AudioTrackScore)> {
    let mut best: Option<(usize, usize, AudioTrackScore)> = None;
    for (group_index, group) in groups.iter().enumerate() {
        for (track, format) in group.formats().iter().enumerate() {
            let caps = capabilities[group_index][track];
            if !caps.is_supported(params.exceed_renderer_capabilities_if_necessary) {
                continue;
            }
            let score = AudioTrackScore::new(format, params, caps, system_languages);
            if !score.within_constraints && !params.exceed_audio_constraints_if_necessary {
                continue;
            }
            if best.as_ref().map_or(true, |(_, _, b)| score > *b) {
                best = Some((group_index, track, score));
            }
        }
    }

    let (group_index, track, score) = best?;
    let group = &groups[group_index];

    if !params.force_highest_supported_bitrate
        && !params.force_lowest_bitrate
        && enable_adaptive_track_selection
    {
        let tracks = adaptive_audio_tracks(group, &capabilities[group_index], params);
        if tracks.len() > 1 {
            return Some((Definition::new(group_index, group.clone(), tracks), score));
        }
    }
    Some((Definition::fixed(group_index, group.clone(), track), score))
}

/// The largest set of tracks in `group` sharing one audio configuration.
fn adaptive_audio_tracks(
    group: &TrackGroup,
    capabilities: &[Capabilities],
    params: &Parameters,
) -> Vec<usize> {
    let mut best: Option<(&Format, usize)> = None;
    let mut seen: Vec<(Option<u32>, Option<u32>, Option<&str>)> = Vec::new();
    for reference in group.formats() {
        let key = (
            reference.channel_count,
            reference.sample_rate,
            reference.sample_mime_type.as_deref(),
        );
        if seen.contains(&key) {
            continue;
        }
        seen.push(key);
        let count = group
            .formats()
            .iter()
            .zip(capabilities)
            .filter(|(format, caps)| is_supported_adaptive_audio_track(format, **caps, reference, params))
            .count();
        if best.map_or(true, |(_, c)| count > c) {
            best = Some((reference, count));
        }
    }

    match best {
        Some((reference, count)) if count > 1 => group
            .formats()
            .iter()
            .zip(capabilities)
            .enumerate()
            .filter(|(_, (format, caps))| {
                is_supported_adaptive_audio_track(format, **caps, reference, params)
            })
            .map(|(i, _)| i)
            .collect(),
        _ => Vec::new(),
    }
}

fn is_supported_adaptive_audio_track(
    format: &Format,
    capabilities: Capabilities,
    reference: &Format,
    params: &Parameters,
) -> bool {
    capabilities.format == FormatSupport::Handled
        && is_within_limit(format.bitrate, params.max_audio_bitrate)
        && (params.allow_audio_mixed_channel_count_adaptiveness
            || matches_known(format.channel_count, reference.channel_count))
        && (params.allow_audio_mixed_mime_type_adaptiveness
            || matches_known(format.sample_mime_type.as_deref(), reference.sample_mime_type.as_deref()))
        && (params.allow_audio_mixed_sample_rate_adaptiveness
            || matches_known(format.sample_rate, reference.sample_rate))
}

fn matches_known<T: PartialEq>(value: Option<T>, reference: Option<T>) -> bool {
    value.is_some() && value == reference
}
