//! Selection for renderers that are neither video, audio nor text.

use tp_core::{Capabilities, TrackGroupArray};

use crate::definition::Definition;
use crate::parameters::Parameters;
use crate::score::WITHIN_RENDERER_CAPABILITIES_BONUS;

/// Select the best single track: default tracks score higher, handled
/// tracks higher still. The first track wins ties.
pub fn select_other_track(
    groups: &TrackGroupArray,
    capabilities: &[Vec<Capabilities>],
    params: &Parameters,
) -> Option<Definition> {
    let mut selected: Option<(usize, usize)> = None;
    let mut selected_score = 0;
    for (group_index, group) in groups.iter().enumerate() {
        for (track, format) in group.formats().iter().enumerate() {
            let caps = capabilities[group_index][track];
            if !caps.is_supported(params.exceed_renderer_capabilities_if_necessary) {
                continue;
            }
            let mut score = if format.is_default() { 2 } else { 1 };
            if caps.is_supported(false) {
                score += WITHIN_RENDERER_CAPABILITIES_BONUS;
            }
            if score > selected_score {
                selected = Some((group_index, track));
                selected_score = score;
            }
        }
    }
    selected.map(|(group_index, track)| Definition::fixed(group_index, groups[group_index].clone(), track))
}
