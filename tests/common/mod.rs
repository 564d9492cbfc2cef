//! Shared builders for integration tests.
//!
//! Renderers are [`StaticRenderer`]s answering from MIME rules; formats are
//! built with [`Format::builder`] so each test states only the properties it
//! depends on.

#![allow(dead_code)]

use std::sync::Arc;

use tp_core::{mime, AdaptiveSupport, Format, SelectionFlags, TrackGroup, TrackGroupArray, TrackType};
use tp_mapping::{MimeRule, Renderer, StaticRenderer};

// ---------------------------------------------------------------------------
// Renderers
// ---------------------------------------------------------------------------

/// A renderer handling `mime_types` with seamless adaptation.
pub fn renderer(name: &str, track_type: TrackType, mime_types: &[&str]) -> StaticRenderer {
    mime_types.iter().fold(StaticRenderer::new(name, track_type), |r, m| {
        r.with_rule(MimeRule::handled(*m).with_adaptive(AdaptiveSupport::Seamless))
    })
}

/// Like [`renderer`], with tunneling support on every rule.
pub fn tunneling_renderer(name: &str, track_type: TrackType, mime_types: &[&str]) -> StaticRenderer {
    mime_types.iter().fold(StaticRenderer::new(name, track_type), |r, m| {
        r.with_rule(
            MimeRule::handled(*m)
                .with_adaptive(AdaptiveSupport::Seamless)
                .with_tunneling(),
        )
    })
}

pub fn into_dyn(renderers: Vec<StaticRenderer>) -> Vec<Arc<dyn Renderer>> {
    renderers
        .into_iter()
        .map(|r| Arc::new(r) as Arc<dyn Renderer>)
        .collect()
}

/// Video (H.264), audio (AAC) and text (WebVTT) renderers, in that order.
pub fn standard_renderers() -> Vec<Arc<dyn Renderer>> {
    into_dyn(vec![
        renderer("video", TrackType::Video, &[mime::VIDEO_H264]),
        renderer("audio", TrackType::Audio, &[mime::AUDIO_AAC, mime::AUDIO_AC3]),
        renderer("text", TrackType::Text, &[mime::TEXT_VTT]),
    ])
}

// ---------------------------------------------------------------------------
// Formats
// ---------------------------------------------------------------------------

pub fn video(width: u32, height: u32, bitrate: u32) -> Format {
    Format::builder()
        .sample_mime_type(mime::VIDEO_H264)
        .size(width, height)
        .bitrate(bitrate)
        .build()
}

pub fn audio(mime_type: &str, channels: u32, sample_rate: u32, bitrate: u32) -> Format {
    Format::builder()
        .sample_mime_type(mime_type)
        .channel_count(channels)
        .sample_rate(sample_rate)
        .bitrate(bitrate)
        .build()
}

pub fn audio_in(language: &str) -> Format {
    Format::builder()
        .sample_mime_type(mime::AUDIO_AAC)
        .channel_count(2)
        .sample_rate(48_000)
        .bitrate(128_000)
        .language(language)
        .build()
}

pub fn text(language: &str, flags: SelectionFlags) -> Format {
    Format::builder()
        .sample_mime_type(mime::TEXT_VTT)
        .language(language)
        .selection_flags(flags)
        .build()
}

pub fn group(formats: Vec<Format>) -> TrackGroup {
    TrackGroup::new(formats).expect("test groups are non-empty")
}

pub fn groups(groups: Vec<TrackGroup>) -> TrackGroupArray {
    TrackGroupArray::new(groups)
}

/// A 360p/720p/1080p H.264 ladder.
pub fn video_ladder() -> TrackGroup {
    group(vec![
        video(640, 360, 800_000),
        video(1280, 720, 2_500_000),
        video(1920, 1080, 5_000_000),
    ])
}
