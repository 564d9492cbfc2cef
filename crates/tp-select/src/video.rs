//! Video track selection: adaptive when possible, otherwise a single track.

use std::cmp::Ordering;

use tp_core::{AdaptiveSupport, Capabilities, Format, FormatSupport, TrackGroup, TrackGroupArray};

use crate::definition::Definition;
use crate::parameters::Parameters;
use crate::score::{compare_format_values, is_within_limit, WITHIN_RENDERER_CAPABILITIES_BONUS};

/// A track counts as full-screen if it fills this fraction of the viewport.
const FRACTION_TO_CONSIDER_FULLSCREEN: f32 = 0.98;

/// Select video tracks for one renderer.
///
/// Adaptive selection is attempted first unless disabled or a force flag is
/// set; otherwise, or if no group can be played adaptively, the best single
/// track is chosen.
pub fn select_video_track(
    groups: &TrackGroupArray,
    capabilities: &[Vec<Capabilities>],
    mixed_mime_type_adaptation_support: AdaptiveSupport,
    params: &Parameters,
    enable_adaptive_track_selection: bool,
) -> Option<Definition> {
    let mut definition = None;
    if !params.force_highest_supported_bitrate
        && !params.force_lowest_bitrate
        && enable_adaptive_track_selection
    {
        definition = select_adaptive_video_track(
            groups,
            capabilities,
            mixed_mime_type_adaptation_support,
            params,
        );
    }
    definition.or_else(|| select_fixed_video_track(groups, capabilities, params))
}

fn select_adaptive_video_track(
    groups: &TrackGroupArray,
    capabilities: &[Vec<Capabilities>],
    mixed_mime_type_adaptation_support: AdaptiveSupport,
    params: &Parameters,
) -> Option<Definition> {
    let required_adaptive_support = if params.allow_video_non_seamless_adaptiveness {
        AdaptiveSupport::NotSeamless
    } else {
        AdaptiveSupport::Seamless
    };
    let allow_mixed_mime_types = params.allow_video_mixed_mime_type_adaptiveness
        && mixed_mime_type_adaptation_support >= required_adaptive_support;

    groups.iter().enumerate().find_map(|(group_index, group)| {
        let tracks = adaptive_video_track_indices(
            group,
            &capabilities[group_index],
            allow_mixed_mime_types,
            required_adaptive_support,
            params,
        );
        (!tracks.is_empty()).then(|| Definition::new(group_index, group.clone(), tracks))
    })
}

/// Tracks of `group` that can be switched between adaptively, or an empty
/// list if fewer than two qualify.
fn adaptive_video_track_indices(
    group: &TrackGroup,
    capabilities: &[Capabilities],
    allow_mixed_mime_types: bool,
    required_adaptive_support: AdaptiveSupport,
    params: &Parameters,
) -> Vec<usize> {
    if group.len() < 2 {
        return Vec::new();
    }
    let mut tracks = viewport_filtered_track_indices(
        group,
        params.viewport_width,
        params.viewport_height,
        params.viewport_orientation_may_change,
    );
    if tracks.len() < 2 {
        return Vec::new();
    }

    let qualifies = |track: usize, mime_type: Option<&str>| {
        is_supported_adaptive_video_track(
            group.format(track),
            mime_type,
            capabilities[track],
            required_adaptive_support,
            params,
        )
    };

    let mut selected_mime_type: Option<&str> = None;
    if !allow_mixed_mime_types {
        let mut seen: Vec<Option<&str>> = Vec::new();
        let mut selected_count = 0;
        for &track in &tracks {
            let mime_type = group.format(track).sample_mime_type.as_deref();
            if seen.contains(&mime_type) {
                continue;
            }
            seen.push(mime_type);
            let count = tracks.iter().filter(|&&t| qualifies(t, mime_type)).count();
            if count > selected_count {
                selected_mime_type = mime_type;
                selected_count = count;
            }
        }
    }

    tracks.retain(|&t| qualifies(t, selected_mime_type));
    if tracks.len() < 2 {
        return Vec::new();
    }
    tracks
}

fn is_supported_adaptive_video_track(
    format: &Format,
    mime_type: Option<&str>,
    capabilities: Capabilities,
    required_adaptive_support: AdaptiveSupport,
    params: &Parameters,
) -> bool {
    capabilities.format == FormatSupport::Handled
        && adaptive_support_satisfies(capabilities.adaptive, required_adaptive_support)
        && mime_type.map_or(true, |m| format.sample_mime_type.as_deref() == Some(m))
        && within_video_limits(format, params)
}

fn adaptive_support_satisfies(support: AdaptiveSupport, required: AdaptiveSupport) -> bool {
    support != AdaptiveSupport::NotSupported && support >= required
}

fn within_video_limits(format: &Format, params: &Parameters) -> bool {
    is_within_limit(format.width, params.max_video_width)
        && is_within_limit(format.height, params.max_video_height)
        && format
            .frame_rate
            .map_or(true, |fps| fps <= params.max_video_frame_rate as f32)
        && is_within_limit(format.bitrate, params.max_video_bitrate)
}

fn select_fixed_video_track(
    groups: &TrackGroupArray,
    capabilities: &[Vec<Capabilities>],
    params: &Parameters,
) -> Option<Definition> {
    let mut selected: Option<(usize, usize)> = None;
    let mut selected_score = 0;
    let mut selected_bitrate = None;
    let mut selected_pixel_count = None;

    for (group_index, group) in groups.iter().enumerate() {
        let viewport_tracks = viewport_filtered_track_indices(
            group,
            params.viewport_width,
            params.viewport_height,
            params.viewport_orientation_may_change,
        );
        for (track, format) in group.formats().iter().enumerate() {
            let caps = capabilities[group_index][track];
            if !caps.is_supported(params.exceed_renderer_capabilities_if_necessary) {
                continue;
            }
            let within_constraints =
                viewport_tracks.contains(&track) && within_video_limits(format, params);
            if !within_constraints && !params.exceed_video_constraints_if_necessary {
                continue;
            }
            let within_capabilities = caps.is_supported(false);
            let mut score = if within_constraints { 2 } else { 1 };
            if within_capabilities {
                score += WITHIN_RENDERER_CAPABILITIES_BONUS;
            }

            let mut select = score > selected_score;
            if score == selected_score {
                let bitrate_ordering = compare_format_values(format.bitrate, selected_bitrate);
                if params.force_lowest_bitrate && bitrate_ordering != Ordering::Equal {
                    select = bitrate_ordering == Ordering::Less;
                } else {
                    let pixel_count = format.pixel_count();
                    let ordering = if pixel_count != selected_pixel_count {
                        compare_format_values(pixel_count, selected_pixel_count)
                    } else {
                        bitrate_ordering
                    };
                    select = if within_capabilities && within_constraints {
                        ordering == Ordering::Greater
                    } else {
                        ordering == Ordering::Less
                    };
                }
            }

            if select {
                selected = Some((group_index, track));
                selected_score = score;
                selected_bitrate = format.bitrate;
                selected_pixel_count = format.pixel_count();
            }
        }
    }

    selected.map(|(group_index, track)| Definition::fixed(group_index, groups[group_index].clone(), track))
}

/// Indices of tracks no larger than needed to fill the viewport.
///
/// All tracks pass when the viewport is unset. Otherwise the smallest track
/// that fills at least 98% of the space the video can occupy in the viewport
/// sets a pixel budget, and larger tracks or tracks of unknown size are
/// dropped.
pub fn viewport_filtered_track_indices(
    group: &TrackGroup,
    viewport_width: u32,
    viewport_height: u32,
    orientation_may_change: bool,
) -> Vec<usize> {
    let mut tracks: Vec<usize> = (0..group.len()).collect();
    if viewport_width == u32::MAX || viewport_height == u32::MAX {
        return tracks;
    }

    let mut max_pixels_to_retain: Option<u64> = None;
    for format in group.formats() {
        let (Some(width), Some(height)) = (format.width, format.height) else {
            continue;
        };
        if width == 0 || height == 0 {
            continue;
        }
        let (max_width, max_height) = max_video_size_in_viewport(
            orientation_may_change,
            viewport_width,
            viewport_height,
            width,
            height,
        );
        let pixels = u64::from(width) * u64::from(height);
        let fills_viewport = width >= (max_width as f32 * FRACTION_TO_CONSIDER_FULLSCREEN) as u32
            && height >= (max_height as f32 * FRACTION_TO_CONSIDER_FULLSCREEN) as u32;
        if fills_viewport && max_pixels_to_retain.map_or(true, |max| pixels < max) {
            max_pixels_to_retain = Some(pixels);
        }
    }

    if let Some(max_pixels) = max_pixels_to_retain {
        tracks.retain(|&t| {
            group
                .format(t)
                .pixel_count()
                .is_some_and(|pixels| pixels <= max_pixels)
        });
    }
    tracks
}

/// Largest size a `video_width`×`video_height` video can be displayed at in
/// the viewport while keeping its aspect ratio.
fn max_video_size_in_viewport(
    orientation_may_change: bool,
    mut viewport_width: u32,
    mut viewport_height: u32,
    video_width: u32,
    video_height: u32,
) -> (u32, u32) {
    if orientation_may_change && ((video_width > video_height) != (viewport_width > viewport_height)) {
        std::mem::swap(&mut viewport_width, &mut viewport_height);
    }
    let (vw, vh) = (u64::from(video_width), u64::from(video_height));
    let (pw, ph) = (u64::from(viewport_width), u64::from(viewport_height));
    if vw * ph >= vh * pw {
        (viewport_width, clamp_u32((pw * vh).div_ceil(vw)))
    } else {
        (clamp_u32((ph * vw).div_ceil(vh)), viewport_height)
    }
}

fn clamp_u32(value: u64) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}
