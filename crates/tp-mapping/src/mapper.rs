//! Assigns each track group to the renderer that supports it best.

use std::sync::Arc;

use tp_core::{
    AdaptiveSupport, Capabilities, FormatSupport, Result, TrackGroup, TrackGroupArray, TrackType,
};

use crate::mapped::MappedTrackInfo;
use crate::renderer::Renderer;

/// Map `groups` onto `renderers`.
///
/// Each group goes to the renderer whose best per-track support is strictly
/// the highest, lowest index first. Metadata groups instead prefer a renderer
/// that has no groups yet when support levels tie. Groups that every renderer
/// reports as [`FormatSupport::UnsupportedType`] end up unmapped.
///
/// The first failing capability query aborts mapping and is returned.
pub fn map_tracks(
    renderers: &[Arc<dyn Renderer>],
    groups: &TrackGroupArray,
) -> Result<MappedTrackInfo> {
    let renderer_count = renderers.len();
    let mut assigned: Vec<Vec<(TrackGroup, Vec<Capabilities>)>> = vec![Vec::new(); renderer_count];
    let mut unmapped = Vec::new();

    let mixed_mime_support = renderers
        .iter()
        .map(|r| r.supports_mixed_mime_type_adaptation())
        .collect::<Result<Vec<AdaptiveSupport>>>()?;

    for (group_index, group) in groups.iter().enumerate() {
        let assigned_counts: Vec<usize> = assigned.iter().map(Vec::len).collect();
        let placement = find_renderer(renderers, group, &assigned_counts)?;
        match placement {
            Some((renderer, capabilities)) => {
                tracing::debug!(
                    group = group_index,
                    renderer,
                    renderer_name = renderers[renderer].name(),
                    tracks = group.len(),
                    "mapped track group"
                );
                assigned[renderer].push((group.clone(), capabilities));
            }
            None => {
                tracing::debug!(group = group_index, "track group is unmapped");
                unmapped.push(group.clone());
            }
        }
    }

    let mut renderer_track_groups = Vec::with_capacity(renderer_count);
    let mut renderer_capabilities = Vec::with_capacity(renderer_count);
    for entries in assigned {
        let (groups, capabilities): (Vec<_>, Vec<_>) = entries.into_iter().unzip();
        renderer_track_groups.push(TrackGroupArray::new(groups));
        renderer_capabilities.push(capabilities);
    }

    Ok(MappedTrackInfo::new(
        renderers.iter().map(|r| r.name().to_string()).collect(),
        renderers.iter().map(|r| r.track_type()).collect(),
        renderer_track_groups,
        renderer_capabilities,
        mixed_mime_support,
        TrackGroupArray::new(unmapped),
    ))
}

/// Pick the renderer for one group, returning its index and the per-track
/// capabilities it reported, or `None` if no renderer supports the type.
fn find_renderer(
    renderers: &[Arc<dyn Renderer>],
    group: &TrackGroup,
    assigned_counts: &[usize],
) -> Result<Option<(usize, Vec<Capabilities>)>> {
    let is_metadata = group.track_type() == TrackType::Metadata;
    let mut best: Option<(usize, Vec<Capabilities>)> = None;
    let mut best_support = FormatSupport::UnsupportedType;
    let mut best_is_unassociated = true;

    for (index, renderer) in renderers.iter().enumerate() {
        let capabilities = group
            .formats()
            .iter()
            .map(|format| renderer.supports_format(format))
            .collect::<Result<Vec<_>>>()?;
        let support = capabilities
            .iter()
            .map(|caps| caps.format)
            .max()
            .unwrap_or(FormatSupport::UnsupportedType);
        let is_unassociated = assigned_counts[index] == 0;

        let better = support > best_support
            || (support == best_support
                && best.is_some()
                && is_metadata
                && !best_is_unassociated
                && is_unassociated);
        if better {
            best = Some((index, capabilities));
            best_support = support;
            best_is_unassociated = is_unassociated;
        }
    }

    Ok(best)
}
