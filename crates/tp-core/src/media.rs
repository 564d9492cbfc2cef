//! Media-domain enums and flag sets: track types, selection flags, role
//! flags, and selection reasons.
//!
//! Enums serialize in lowercase and implement `Display` manually for a
//! consistent string representation. Flag sets use `bitflags` and serialize
//! as `"A | B"` strings.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// TrackType
// ---------------------------------------------------------------------------

/// The kind of content a renderer plays, or a track group carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackType {
    /// A renderer that consumes no tracks (e.g. a pass-through renderer).
    None,
    /// Content of an unknown or unclassified type.
    Unknown,
    Audio,
    Video,
    Text,
    Metadata,
    CameraMotion,
}

impl fmt::Display for TrackType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::Unknown => write!(f, "unknown"),
            Self::Audio => write!(f, "audio"),
            Self::Video => write!(f, "video"),
            Self::Text => write!(f, "text"),
            Self::Metadata => write!(f, "metadata"),
            Self::CameraMotion => write!(f, "camera_motion"),
        }
    }
}

// ---------------------------------------------------------------------------
// SelectionFlags
// ---------------------------------------------------------------------------

bitflags! {
    /// Track selection flags carried by a [`Format`](crate::Format).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct SelectionFlags: u32 {
        /// The track should be selected if the user hasn't expressed a preference.
        const DEFAULT = 1;
        /// The track must be displayed (e.g. foreign dialogue subtitles).
        const FORCED = 1 << 1;
        /// The player may choose this track without explicit user action.
        const AUTOSELECT = 1 << 2;
    }
}

// ---------------------------------------------------------------------------
// RoleFlags
// ---------------------------------------------------------------------------

bitflags! {
    /// Track role flags carried by a [`Format`](crate::Format).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct RoleFlags: u32 {
        const MAIN = 1;
        const ALTERNATE = 1 << 1;
        const SUPPLEMENTARY = 1 << 2;
        const COMMENTARY = 1 << 3;
        const DUB = 1 << 4;
        const EMERGENCY = 1 << 5;
        const CAPTION = 1 << 6;
        const SUBTITLE = 1 << 7;
        const SIGN = 1 << 8;
        const DESCRIBES_VIDEO = 1 << 9;
        const DESCRIBES_MUSIC_AND_SOUND = 1 << 10;
        const ENHANCED_DIALOG_INTELLIGIBILITY = 1 << 11;
        const TRANSCRIBES_DIALOG = 1 << 12;
        const EASY_TO_READ = 1 << 13;
        const TRICK_PLAY = 1 << 14;
    }
}

// ---------------------------------------------------------------------------
// SelectionReason
// ---------------------------------------------------------------------------

/// Why a set of tracks was selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionReason {
    /// Computed by the selector without a more specific reason.
    #[default]
    Unknown,
    Initial,
    /// Chosen explicitly by the user through an override.
    Manual,
    Adaptive,
    TrickPlay,
    /// Application-defined reason.
    Custom(u32),
}

impl fmt::Display for SelectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown => write!(f, "unknown"),
            Self::Initial => write!(f, "initial"),
            Self::Manual => write!(f, "manual"),
            Self::Adaptive => write!(f, "adaptive"),
            Self::TrickPlay => write!(f, "trick_play"),
            Self::Custom(code) => write!(f, "custom({code})"),
        }
    }
}
