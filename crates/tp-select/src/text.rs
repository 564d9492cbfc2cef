//! Text track selection.

use tp_core::{Capabilities, TrackGroupArray};

use crate::definition::Definition;
use crate::parameters::Parameters;
use crate::score::TextTrackScore;

/// Select a single text track for one renderer.
///
/// Only tracks within constraints are eligible (a preferred language or
/// role match, the default flag, or a forced track in the audio language),
/// so an unmatched subtitle is never shown by default.
pub fn select_text_track(
    groups: &TrackGroupArray,
    capabilities: &[Vec<Capabilities>],
    params: &Parameters,
    selected_audio_language: Option<&str>,
) -> Option<(Definition, TextTrackScore)> {
    let mut best: Option<(usize, usize, TextTrackScore)> = None;
    for (group_index, group) in groups.iter().enumerate() {
        for (track, format) in group.formats().iter().enumerate() {
            let caps = capabilities[group_index][track];
            if !caps.is_supported(params.exceed_renderer_capabilities_if_necessary) {
                continue;
            }
            let score = TextTrackScore::new(format, params, caps, selected_audio_language);
            if !score.within_constraints {
                continue;
            }
            if best.as_ref().map_or(true, |(_, _, b)| score > *b) {
                best = Some((group_index, track, score));
            }
        }
    }

    best.map(|(group_index, track, score)| {
        (
            Definition::fixed(group_index, groups[group_index].clone(), track),
            score,
        )
    })
}
