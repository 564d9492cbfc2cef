//! Selector configuration.
//!
//! [`SelectorConfig`] is deserialized from JSON and carries the track
//! selection preferences an application wants to start with, grouped by
//! track type. Every section defaults sensibly, so an empty `{}` file is
//! valid and equivalent to the default selection parameters.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::Result;
use crate::media::{RoleFlags, SelectionFlags};
use crate::Error;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Root selector configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    pub video: VideoConfig,
    pub audio: AudioConfig,
    pub text: TextConfig,
    pub playback: PlaybackConfig,
    /// The device's ranked list of system languages, most preferred first.
    pub system_languages: Vec<String>,
    /// Renderer indices that should never be enabled.
    pub disabled_renderers: Vec<usize>,
}

impl SelectorConfig {
    /// Deserialize a `SelectorConfig` from a JSON string.
    pub fn from_json(json_str: &str) -> Result<Self> {
        serde_json::from_str(json_str).map_err(|e| Error::Config(format!("config parse error: {e}")))
    }

    /// Load configuration from a file path, falling back to defaults if the
    /// path is `None`, the file does not exist, or it cannot be parsed.
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };

        match std::fs::read_to_string(path) {
            Ok(contents) => Self::from_json(&contents).unwrap_or_else(|e| {
                tracing::warn!("Failed to parse config file {}: {e}", path.display());
                Self::default()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!("No config file at {}; using defaults", path.display());
                Self::default()
            }
            Err(e) => {
                tracing::warn!("Failed to read config file {}: {e}", path.display());
                Self::default()
            }
        }
    }

    /// Load configuration from a file path, failing on any error.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Return a list of validation warnings (non-fatal issues).
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if self.playback.force_lowest_bitrate && self.playback.force_highest_supported_bitrate {
            warnings.push(
                "playback.force_lowest_bitrate and force_highest_supported_bitrate are both set; \
                 the lowest bitrate wins"
                    .into(),
            );
        }

        if let Some(viewport) = &self.video.viewport {
            if viewport.width == 0 || viewport.height == 0 {
                warnings.push(format!(
                    "video.viewport {}x{} has a zero dimension",
                    viewport.width, viewport.height
                ));
            }
        }

        if self.video.max_width == Some(0) || self.video.max_height == Some(0) {
            warnings.push("video max size of 0 excludes every video track".into());
        }

        if self.audio.max_channel_count == Some(0) {
            warnings.push("audio.max_channel_count of 0 excludes every audio track".into());
        }

        if self.playback.tunneling_audio_session_id == Some(0) {
            warnings.push("playback.tunneling_audio_session_id 0 is not a valid session".into());
        }

        for (field, lang) in [
            ("audio.preferred_language", &self.audio.preferred_language),
            ("text.preferred_language", &self.text.preferred_language),
        ] {
            if lang.as_deref().is_some_and(|l| l.trim().is_empty()) {
                warnings.push(format!("{field} is empty"));
            }
        }

        for (i, lang) in self.system_languages.iter().enumerate() {
            if lang.trim().is_empty() {
                warnings.push(format!("system_languages[{i}] is empty"));
            }
        }

        warnings
    }
}

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

/// Video constraints. Unset maxima are unconstrained.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VideoConfig {
    pub max_width: Option<u32>,
    pub max_height: Option<u32>,
    pub max_frame_rate: Option<u32>,
    pub max_bitrate: Option<u32>,
    #[serde(default = "default_true")]
    pub exceed_constraints_if_necessary: bool,
    pub allow_mixed_mime_type_adaptiveness: bool,
    #[serde(default = "default_true")]
    pub allow_non_seamless_adaptiveness: bool,
    pub viewport: Option<ViewportConfig>,
}

impl Default for VideoConfig {
    fn default() -> Self {
        Self {
            max_width: None,
            max_height: None,
            max_frame_rate: None,
            max_bitrate: None,
            exceed_constraints_if_necessary: true,
            allow_mixed_mime_type_adaptiveness: false,
            allow_non_seamless_adaptiveness: true,
            viewport: None,
        }
    }
}

/// Size of the surface video is displayed on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewportConfig {
    pub width: u32,
    pub height: u32,
    #[serde(default = "default_true")]
    pub orientation_may_change: bool,
}

/// Audio preferences and constraints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    pub preferred_language: Option<String>,
    pub max_channel_count: Option<u32>,
    pub max_bitrate: Option<u32>,
    #[serde(default = "default_true")]
    pub exceed_constraints_if_necessary: bool,
    pub allow_mixed_mime_type_adaptiveness: bool,
    pub allow_mixed_sample_rate_adaptiveness: bool,
    pub allow_mixed_channel_count_adaptiveness: bool,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            preferred_language: None,
            max_channel_count: None,
            max_bitrate: None,
            exceed_constraints_if_necessary: true,
            allow_mixed_mime_type_adaptiveness: false,
            allow_mixed_sample_rate_adaptiveness: false,
            allow_mixed_channel_count_adaptiveness: false,
        }
    }
}

/// Text preferences.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextConfig {
    pub preferred_language: Option<String>,
    pub preferred_role_flags: RoleFlags,
    pub select_undetermined_language: bool,
    pub disabled_selection_flags: SelectionFlags,
}

/// Cross-type playback behaviour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    pub force_lowest_bitrate: bool,
    pub force_highest_supported_bitrate: bool,
    #[serde(default = "default_true")]
    pub exceed_renderer_capabilities_if_necessary: bool,
    pub allow_multiple_adaptive_selections: bool,
    pub tunneling_audio_session_id: Option<u32>,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            force_lowest_bitrate: false,
            force_highest_supported_bitrate: false,
            exceed_renderer_capabilities_if_necessary: true,
            allow_multiple_adaptive_selections: false,
            tunneling_audio_session_id: None,
        }
    }
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_config_has_permissive_flags() {
        let cfg = SelectorConfig::default();
        assert!(cfg.video.exceed_constraints_if_necessary);
        assert!(cfg.video.allow_non_seamless_adaptiveness);
        assert!(!cfg.video.allow_mixed_mime_type_adaptiveness);
        assert!(cfg.audio.exceed_constraints_if_necessary);
        assert!(cfg.playback.exceed_renderer_capabilities_if_necessary);
        assert!(cfg.playback.tunneling_audio_session_id.is_none());
    }

    #[test]
    fn default_config_no_warnings() {
        let warnings = SelectorConfig::default().validate();
        assert!(warnings.is_empty(), "unexpected warnings: {:?}", warnings);
    }

    #[test]
    fn parse_empty_json_uses_defaults() {
        let cfg = SelectorConfig::from_json("{}").unwrap();
        assert_eq!(cfg, SelectorConfig::default());
    }

    #[test]
    fn parse_sections() {
        let json = r#"{
            "video": {"max_width": 1279, "max_height": 719,
                      "viewport": {"width": 1920, "height": 1080}},
            "audio": {"preferred_language": "deu", "max_channel_count": 2},
            "text": {"preferred_role_flags": "CAPTION | SUBTITLE"},
            "playback": {"tunneling_audio_session_id": 7},
            "system_languages": ["en-US", "fr"]
        }"#;
        let cfg = SelectorConfig::from_json(json).unwrap();
        assert_eq!(cfg.video.max_width, Some(1279));
        let viewport = cfg.video.viewport.unwrap();
        assert!(viewport.orientation_may_change);
        assert_eq!(cfg.audio.preferred_language.as_deref(), Some("deu"));
        assert!(cfg.audio.exceed_constraints_if_necessary);
        assert_eq!(
            cfg.text.preferred_role_flags,
            RoleFlags::CAPTION | RoleFlags::SUBTITLE
        );
        assert_eq!(cfg.playback.tunneling_audio_session_id, Some(7));
        assert_eq!(cfg.system_languages, vec!["en-US", "fr"]);
    }

    #[test]
    fn parse_error_is_config_error() {
        let err = SelectorConfig::from_json("{not json").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn conflicting_force_flags_warn() {
        let mut cfg = SelectorConfig::default();
        cfg.playback.force_lowest_bitrate = true;
        cfg.playback.force_highest_supported_bitrate = true;
        let warnings = cfg.validate();
        assert!(warnings.iter().any(|w| w.contains("force_lowest_bitrate")));
    }

    #[test]
    fn zero_viewport_warns() {
        let mut cfg = SelectorConfig::default();
        cfg.video.viewport = Some(ViewportConfig {
            width: 0,
            height: 1080,
            orientation_may_change: false,
        });
        assert!(cfg.validate().iter().any(|w| w.contains("viewport")));
    }

    #[test]
    fn load_or_default_with_none() {
        assert_eq!(SelectorConfig::load_or_default(None), SelectorConfig::default());
    }

    #[test]
    fn load_or_default_with_missing_file() {
        let cfg = SelectorConfig::load_or_default(Some(Path::new("/nonexistent/selector.json")));
        assert_eq!(cfg, SelectorConfig::default());
    }

    #[test]
    fn load_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"audio": {{"max_bitrate": 128000}}}}"#).unwrap();
        let cfg = SelectorConfig::load(file.path()).unwrap();
        assert_eq!(cfg.audio.max_bitrate, Some(128_000));
    }
}
