//! Per-track capabilities reported by a renderer.
//!
//! Each level enum is ordered from least to most capable so callers can use
//! `max`/`min` and `>=` directly.

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// FormatSupport
// ---------------------------------------------------------------------------

/// How well a renderer supports a format.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum FormatSupport {
    /// The renderer does not handle this top-level type at all.
    #[default]
    UnsupportedType,
    /// Right type, but the subtype (codec) is not supported.
    UnsupportedSubtype,
    /// Supported codec, but the DRM scheme is not.
    UnsupportedDrm,
    /// Declared capabilities are exceeded; playback may still work.
    ExceedsCapabilities,
    Handled,
}

impl fmt::Display for FormatSupport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedType => write!(f, "unsupported_type"),
            Self::UnsupportedSubtype => write!(f, "unsupported_subtype"),
            Self::UnsupportedDrm => write!(f, "unsupported_drm"),
            Self::ExceedsCapabilities => write!(f, "exceeds_capabilities"),
            Self::Handled => write!(f, "handled"),
        }
    }
}

// ---------------------------------------------------------------------------
// AdaptiveSupport
// ---------------------------------------------------------------------------

/// Ability to switch between tracks of a group during playback.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum AdaptiveSupport {
    #[default]
    NotSupported,
    /// Switching is possible but may interrupt playback.
    NotSeamless,
    Seamless,
}

impl fmt::Display for AdaptiveSupport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotSupported => write!(f, "not_supported"),
            Self::NotSeamless => write!(f, "not_seamless"),
            Self::Seamless => write!(f, "seamless"),
        }
    }
}

// ---------------------------------------------------------------------------
// TunnelingSupport
// ---------------------------------------------------------------------------

/// Whether a format can be played in tunneled mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TunnelingSupport {
    #[default]
    NotSupported,
    Supported,
}

// ---------------------------------------------------------------------------
// Capabilities
// ---------------------------------------------------------------------------

/// Capabilities of one renderer for one format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Capabilities {
    pub format: FormatSupport,
    pub adaptive: AdaptiveSupport,
    pub tunneling: TunnelingSupport,
}

impl Capabilities {
    /// Capabilities of a renderer that cannot handle the format's type.
    pub const UNSUPPORTED_TYPE: Capabilities = Capabilities {
        format: FormatSupport::UnsupportedType,
        adaptive: AdaptiveSupport::NotSupported,
        tunneling: TunnelingSupport::NotSupported,
    };

    /// Capabilities with the given format support and nothing else.
    pub fn new(format: FormatSupport) -> Self {
        Self {
            format,
            ..Self::default()
        }
    }

    pub fn with_adaptive(mut self, adaptive: AdaptiveSupport) -> Self {
        self.adaptive = adaptive;
        self
    }

    pub fn with_tunneling(mut self, tunneling: TunnelingSupport) -> Self {
        self.tunneling = tunneling;
        self
    }

    /// Whether the format is handled, or exceeds capabilities when that is
    /// tolerated.
    pub fn is_supported(&self, allow_exceeds_capabilities: bool) -> bool {
        self.format == FormatSupport::Handled
            || (allow_exceeds_capabilities && self.format == FormatSupport::ExceedsCapabilities)
    }

    pub fn supports_tunneling(&self) -> bool {
        self.tunneling == TunnelingSupport::Supported
    }
}
