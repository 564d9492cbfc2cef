//! Track selection integration tests.
//!
//! Drives [`DefaultTrackSelector`] end to end: mapping through static
//! renderers, then per-type selection, overrides, disables and tunneling.

mod common;

use common::*;
use serde_json::json;
use tp_core::{mime, Error, SelectionFlags, SelectionReason, TrackType};
use tp_select::{
    DefaultTrackSelector, ParametersBuilder, RendererConfiguration, SelectionOverride,
};

// ---------------------------------------------------------------------------
// Video
// ---------------------------------------------------------------------------

#[test]
fn video_ladder_is_selected_adaptively() {
    let selector = DefaultTrackSelector::default();
    let result = selector
        .select_tracks(&standard_renderers(), &groups(vec![video_ladder()]))
        .unwrap();

    let definition = result.definition(0).unwrap();
    assert!(definition.is_adaptive());
    assert_eq!(definition.tracks, vec![0, 1, 2]);
    assert_eq!(definition.reason, SelectionReason::Unknown);
    assert!(result.is_renderer_enabled(0));
    assert!(!result.is_renderer_enabled(1));
}

#[test]
fn single_track_group_is_never_adaptive() {
    let selector = DefaultTrackSelector::default();
    let result = selector
        .select_tracks(
            &standard_renderers(),
            &groups(vec![group(vec![video(1280, 720, 2_500_000)])]),
        )
        .unwrap();

    let definition = result.definition(0).unwrap();
    assert!(!definition.is_adaptive());
    assert_eq!(definition.tracks, vec![0]);
}

#[test]
fn sd_constraint_leaves_one_track() {
    let selector = DefaultTrackSelector::default();
    selector
        .set_parameters_builder(ParametersBuilder::new().set_max_video_size_sd())
        .unwrap();
    let result = selector
        .select_tracks(&standard_renderers(), &groups(vec![video_ladder()]))
        .unwrap();

    assert_eq!(result.definition(0).unwrap().tracks, vec![0]);
}

#[test]
fn viewport_rules_out_adaptation() {
    let selector = DefaultTrackSelector::default();
    selector
        .set_parameters_builder(ParametersBuilder::new().set_viewport_size(1920, 1080, true))
        .unwrap();
    let uhd = group(vec![video(1920, 1080, 5_000_000), video(3840, 2160, 16_000_000)]);
    let result = selector
        .select_tracks(&standard_renderers(), &groups(vec![uhd]))
        .unwrap();

    let definition = result.definition(0).unwrap();
    assert!(!definition.is_adaptive());
    assert_eq!(definition.tracks, vec![0]);
}

#[test]
fn force_lowest_bitrate_picks_cheaper_track() {
    let selector = DefaultTrackSelector::default();
    selector
        .set_parameters_builder(ParametersBuilder::new().force_lowest_bitrate(true))
        .unwrap();
    let twins = group(vec![video(1280, 720, 2_500_000), video(1280, 720, 1_200_000)]);
    let result = selector
        .select_tracks(&standard_renderers(), &groups(vec![twins]))
        .unwrap();

    assert_eq!(result.definition(0).unwrap().tracks, vec![1]);
}

#[test]
fn force_highest_supported_bitrate_picks_largest_track() {
    let selector = DefaultTrackSelector::default();
    selector
        .set_parameters_builder(ParametersBuilder::new().force_highest_supported_bitrate(true))
        .unwrap();
    let result = selector
        .select_tracks(&standard_renderers(), &groups(vec![video_ladder()]))
        .unwrap();

    assert_eq!(result.definition(0).unwrap().tracks, vec![2]);
}

// ---------------------------------------------------------------------------
// Audio
// ---------------------------------------------------------------------------

#[test]
fn audio_adapts_over_shared_configuration() {
    let selector = DefaultTrackSelector::default();
    let mixed = group(vec![
        audio(mime::AUDIO_AAC, 2, 48_000, 128_000),
        audio(mime::AUDIO_AAC, 6, 48_000, 384_000),
        audio(mime::AUDIO_AAC, 2, 48_000, 64_000),
        audio(mime::AUDIO_AC3, 2, 48_000, 192_000),
    ]);
    let result = selector
        .select_tracks(&standard_renderers(), &groups(vec![mixed]))
        .unwrap();

    assert_eq!(result.definition(1).unwrap().tracks, vec![0, 2]);
}

#[test]
fn audio_is_fixed_alongside_video() {
    let selector = DefaultTrackSelector::default();
    let audio_group = group(vec![
        audio(mime::AUDIO_AAC, 2, 48_000, 64_000),
        audio(mime::AUDIO_AAC, 2, 48_000, 128_000),
    ]);
    let result = selector
        .select_tracks(&standard_renderers(), &groups(vec![video_ladder(), audio_group]))
        .unwrap();

    assert!(result.definition(0).unwrap().is_adaptive());
    assert_eq!(result.definition(1).unwrap().tracks, vec![1]);
}

#[test]
fn preferred_audio_language_wins() {
    let selector = DefaultTrackSelector::default();
    selector
        .set_parameters_builder(ParametersBuilder::new().preferred_audio_language("deu"))
        .unwrap();
    let result = selector
        .select_tracks(
            &standard_renderers(),
            &groups(vec![group(vec![audio_in("en")]), group(vec![audio_in("de")])]),
        )
        .unwrap();

    assert_eq!(result.definition(1).unwrap().group_index, 1);
}

// ---------------------------------------------------------------------------
// Text
// ---------------------------------------------------------------------------

#[test]
fn forced_text_follows_audio_language() {
    let selector = DefaultTrackSelector::default().with_system_languages(["fr"]);
    let result = selector
        .select_tracks(
            &standard_renderers(),
            &groups(vec![
                group(vec![audio_in("fr")]),
                group(vec![text("en", SelectionFlags::FORCED)]),
                group(vec![text("fr", SelectionFlags::FORCED)]),
            ]),
        )
        .unwrap();

    let definition = result.definition(2).unwrap();
    assert_eq!(definition.group_index, 1);
    assert_eq!(definition.primary_format().language.as_deref(), Some("fr"));
}

#[test]
fn default_text_beats_forced_audio_match() {
    let selector = DefaultTrackSelector::default().with_system_languages(["fr"]);
    let result = selector
        .select_tracks(
            &standard_renderers(),
            &groups(vec![
                group(vec![audio_in("fr")]),
                group(vec![text("fr", SelectionFlags::FORCED)]),
                group(vec![text("en", SelectionFlags::DEFAULT)]),
            ]),
        )
        .unwrap();

    let definition = result.definition(2).unwrap();
    assert_eq!(definition.primary_format().language.as_deref(), Some("en"));
}

#[test]
fn text_without_reason_to_show_is_not_selected() {
    let selector = DefaultTrackSelector::default();
    let result = selector
        .select_tracks(
            &standard_renderers(),
            &groups(vec![group(vec![text("ja", SelectionFlags::empty())])]),
        )
        .unwrap();

    assert!(result.definition(2).is_none());
    assert!(!result.is_renderer_enabled(2));
}

// ---------------------------------------------------------------------------
// Disables and overrides
// ---------------------------------------------------------------------------

#[test]
fn disabled_renderer_has_no_selection_or_configuration() {
    let selector = DefaultTrackSelector::default();
    selector
        .set_parameters_builder(ParametersBuilder::new().set_renderer_disabled(0, true))
        .unwrap();
    let result = selector
        .select_tracks(&standard_renderers(), &groups(vec![video_ladder()]))
        .unwrap();

    assert!(result.definition(0).is_none());
    assert!(result.configuration(0).is_none());
    assert!(!result.is_renderer_enabled(0));
}

#[test]
fn override_replaces_computed_selection() {
    let selector = DefaultTrackSelector::default();
    let renderers = standard_renderers();
    let all = groups(vec![group(vec![audio_in("en")]), group(vec![audio_in("de")])]);

    let first = selector.select_tracks(&renderers, &all).unwrap();
    assert_eq!(first.definition(1).unwrap().group_index, 0);
    let audio_groups = first.mapped_track_info().track_groups(1).clone();

    let override_ = SelectionOverride::new(1, [0])
        .with_reason(SelectionReason::Manual)
        .with_data(json!({"source": "menu"}));
    selector
        .set_parameters_builder(selector.build_upon_parameters().set_selection_override(
            1,
            audio_groups.clone(),
            Some(override_),
        ))
        .unwrap();
    let second = selector.select_tracks(&renderers, &all).unwrap();
    let definition = second.definition(1).unwrap();
    assert_eq!(definition.group_index, 1);
    assert_eq!(definition.tracks, vec![0]);
    assert_eq!(definition.reason, SelectionReason::Manual);
    assert_eq!(definition.data, Some(json!({"source": "menu"})));

    selector
        .set_parameters_builder(
            selector
                .build_upon_parameters()
                .set_selection_override(1, audio_groups, None),
        )
        .unwrap();
    let third = selector.select_tracks(&renderers, &all).unwrap();
    assert!(third.definition(1).is_none());
    assert!(!third.is_renderer_enabled(1));
}

#[test]
fn override_for_other_groups_is_ignored() {
    let selector = DefaultTrackSelector::default();
    let renderers = standard_renderers();
    let stale = groups(vec![group(vec![audio_in("en")]), group(vec![audio_in("de")])]);
    selector
        .set_parameters_builder(ParametersBuilder::new().set_selection_override(
            1,
            stale,
            Some(SelectionOverride::new(1, [0])),
        ))
        .unwrap();

    // Same formats, different group identities.
    let fresh = groups(vec![group(vec![audio_in("en")]), group(vec![audio_in("de")])]);
    let result = selector.select_tracks(&renderers, &fresh).unwrap();
    assert_eq!(result.definition(1).unwrap().group_index, 0);
}

#[test]
fn invalid_override_is_rejected() {
    let selector = DefaultTrackSelector::default();
    let audio_groups = groups(vec![group(vec![audio_in("en")])]);
    let err = selector
        .set_parameters_builder(ParametersBuilder::new().set_selection_override(
            1,
            audio_groups,
            Some(SelectionOverride::new(3, [0])),
        ))
        .unwrap_err();
    assert!(matches!(err, Error::InvalidParameters(_)));
}

// ---------------------------------------------------------------------------
// Tunneling
// ---------------------------------------------------------------------------

fn tunneling_renderers() -> Vec<std::sync::Arc<dyn tp_mapping::Renderer>> {
    into_dyn(vec![
        tunneling_renderer("video", TrackType::Video, &[mime::VIDEO_H264]),
        tunneling_renderer("audio", TrackType::Audio, &[mime::AUDIO_AAC]),
    ])
}

#[test]
fn tunneling_pairs_audio_and_video() {
    let selector = DefaultTrackSelector::default();
    selector
        .set_parameters_builder(ParametersBuilder::new().tunneling_audio_session_id(Some(42)))
        .unwrap();
    let result = selector
        .select_tracks(
            &tunneling_renderers(),
            &groups(vec![video_ladder(), group(vec![audio_in("en")])]),
        )
        .unwrap();

    assert_eq!(result.configuration(0), Some(&RendererConfiguration::tunneling(42)));
    assert_eq!(result.configuration(1), Some(&RendererConfiguration::tunneling(42)));
}

#[test]
fn tunneling_needs_a_session_id() {
    let selector = DefaultTrackSelector::default();
    let result = selector
        .select_tracks(
            &tunneling_renderers(),
            &groups(vec![video_ladder(), group(vec![audio_in("en")])]),
        )
        .unwrap();

    assert_eq!(result.configuration(0), Some(&RendererConfiguration::DEFAULT));
    assert_eq!(result.configuration(1), Some(&RendererConfiguration::DEFAULT));
}

#[test]
fn tunneling_needs_support_from_both_renderers() {
    let selector = DefaultTrackSelector::default();
    selector
        .set_parameters_builder(ParametersBuilder::new().tunneling_audio_session_id(Some(42)))
        .unwrap();
    let renderers = into_dyn(vec![
        tunneling_renderer("video", TrackType::Video, &[mime::VIDEO_H264]),
        renderer("audio", TrackType::Audio, &[mime::AUDIO_AAC]),
    ]);
    let result = selector
        .select_tracks(&renderers, &groups(vec![video_ladder(), group(vec![audio_in("en")])]))
        .unwrap();

    assert!(!result.configuration(0).unwrap().is_tunneling());
    assert!(!result.configuration(1).unwrap().is_tunneling());
}

#[test]
fn two_tunneling_video_renderers_disable_tunneling() {
    let selector = DefaultTrackSelector::default();
    let renderers = into_dyn(vec![
        tunneling_renderer("avc", TrackType::Video, &[mime::VIDEO_H264]),
        tunneling_renderer("hevc", TrackType::Video, &[mime::VIDEO_H265]),
        tunneling_renderer("audio", TrackType::Audio, &[mime::AUDIO_AAC]),
    ]);
    let hevc = group(vec![tp_core::Format::builder()
        .sample_mime_type(mime::VIDEO_H265)
        .size(3840, 2160)
        .build()]);
    let all = groups(vec![video_ladder(), hevc, group(vec![audio_in("en")])]);

    let first = selector.select_tracks(&renderers, &all).unwrap();
    let hevc_groups = first.mapped_track_info().track_groups(1).clone();
    selector
        .set_parameters_builder(
            ParametersBuilder::new()
                .tunneling_audio_session_id(Some(42))
                .set_selection_override(1, hevc_groups, Some(SelectionOverride::new(0, [0]))),
        )
        .unwrap();

    let result = selector.select_tracks(&renderers, &all).unwrap();
    assert!(result.definition(0).is_some());
    assert!(result.definition(1).is_some());
    for renderer in 0..3 {
        assert_eq!(result.configuration(renderer), Some(&RendererConfiguration::DEFAULT));
    }
}

// ---------------------------------------------------------------------------
// Results
// ---------------------------------------------------------------------------

#[test]
fn repeated_selection_is_equivalent() {
    let selector = DefaultTrackSelector::default();
    let renderers = standard_renderers();
    let all = groups(vec![video_ladder(), group(vec![audio_in("en")])]);

    let first = selector.select_tracks(&renderers, &all).unwrap();
    let second = selector.select_tracks(&renderers, &all).unwrap();
    assert!(first.is_equivalent(&second));
    assert!(first.is_equivalent_at(&second, 2));
    assert!(!first.is_equivalent_at(&second, 3));
}
