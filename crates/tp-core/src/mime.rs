//! MIME type constants and classification into [`TrackType`]s.

use crate::media::TrackType;

pub const BASE_TYPE_VIDEO: &str = "video";
pub const BASE_TYPE_AUDIO: &str = "audio";
pub const BASE_TYPE_TEXT: &str = "text";
pub const BASE_TYPE_APPLICATION: &str = "application";

pub const VIDEO_H264: &str = "video/avc";
pub const VIDEO_H265: &str = "video/hevc";
pub const VIDEO_VP9: &str = "video/x-vnd.on2.vp9";
pub const VIDEO_AV1: &str = "video/av01";
pub const VIDEO_DOLBY_VISION: &str = "video/dolby-vision";

pub const AUDIO_AAC: &str = "audio/mp4a-latm";
pub const AUDIO_AC3: &str = "audio/ac3";
pub const AUDIO_E_AC3: &str = "audio/eac3";
pub const AUDIO_OPUS: &str = "audio/opus";
pub const AUDIO_FLAC: &str = "audio/flac";
pub const AUDIO_TRUEHD: &str = "audio/true-hd";

pub const TEXT_VTT: &str = "text/vtt";
pub const TEXT_SSA: &str = "text/x-ssa";

pub const APPLICATION_SUBRIP: &str = "application/x-subrip";
pub const APPLICATION_TTML: &str = "application/ttml+xml";
pub const APPLICATION_CEA608: &str = "application/cea-608";
pub const APPLICATION_CEA708: &str = "application/cea-708";
pub const APPLICATION_MP4CEA608: &str = "application/x-mp4-cea-608";
pub const APPLICATION_MP4VTT: &str = "application/x-mp4-vtt";
pub const APPLICATION_TX3G: &str = "application/x-quicktime-tx3g";
pub const APPLICATION_RAWCC: &str = "application/x-rawcc";
pub const APPLICATION_VOBSUB: &str = "application/vobsub";
pub const APPLICATION_PGS: &str = "application/pgs";
pub const APPLICATION_DVBSUBS: &str = "application/dvbsubs";

pub const APPLICATION_ID3: &str = "application/id3";
pub const APPLICATION_EMSG: &str = "application/x-emsg";
pub const APPLICATION_SCTE35: &str = "application/x-scte35";
pub const APPLICATION_CAMERA_MOTION: &str = "application/x-camera-motion";

/// Application MIME types that carry subtitles or captions.
const APPLICATION_TEXT_TYPES: &[&str] = &[
    APPLICATION_SUBRIP,
    APPLICATION_TTML,
    APPLICATION_CEA608,
    APPLICATION_CEA708,
    APPLICATION_MP4CEA608,
    APPLICATION_MP4VTT,
    APPLICATION_TX3G,
    APPLICATION_RAWCC,
    APPLICATION_VOBSUB,
    APPLICATION_PGS,
    APPLICATION_DVBSUBS,
];

/// Application MIME types that carry timed metadata.
const APPLICATION_METADATA_TYPES: &[&str] =
    &[APPLICATION_ID3, APPLICATION_EMSG, APPLICATION_SCTE35];

/// Return the top-level type of a MIME type (the part before `/`).
pub fn top_level_type(mime_type: &str) -> Option<&str> {
    mime_type.split_once('/').map(|(top, _)| top)
}

pub fn is_video(mime_type: &str) -> bool {
    top_level_type(mime_type) == Some(BASE_TYPE_VIDEO)
}

pub fn is_audio(mime_type: &str) -> bool {
    top_level_type(mime_type) == Some(BASE_TYPE_AUDIO)
}

/// Whether the MIME type carries subtitles or captions.
pub fn is_text(mime_type: &str) -> bool {
    top_level_type(mime_type) == Some(BASE_TYPE_TEXT) || APPLICATION_TEXT_TYPES.contains(&mime_type)
}

/// Classify a sample MIME type into the [`TrackType`] that would render it.
///
/// A missing MIME type is [`TrackType::Unknown`].
pub fn track_type(mime_type: Option<&str>) -> TrackType {
    let Some(mime_type) = mime_type else {
        return TrackType::Unknown;
    };
    if is_audio(mime_type) {
        TrackType::Audio
    } else if is_video(mime_type) {
        TrackType::Video
    } else if is_text(mime_type) {
        TrackType::Text
    } else if APPLICATION_METADATA_TYPES.contains(&mime_type) {
        TrackType::Metadata
    } else if mime_type == APPLICATION_CAMERA_MOTION {
        TrackType::CameraMotion
    } else {
        TrackType::Unknown
    }
}
