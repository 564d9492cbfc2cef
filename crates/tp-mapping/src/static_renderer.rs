//! A data-driven [`Renderer`] described by MIME type rules.
//!
//! Useful for scenario files and tests: the renderer's answers come from a
//! table instead of a real decoder.

use serde::{Deserialize, Serialize};

use tp_core::{
    AdaptiveSupport, Capabilities, Format, FormatSupport, Result, TrackType, TunnelingSupport,
};

use crate::renderer::Renderer;

/// Capabilities reported for one sample MIME type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MimeRule {
    pub mime_type: String,
    #[serde(default = "default_support")]
    pub support: FormatSupport,
    #[serde(default)]
    pub adaptive: AdaptiveSupport,
    #[serde(default)]
    pub tunneling: bool,
}

impl MimeRule {
    pub fn new(mime_type: impl Into<String>, support: FormatSupport) -> Self {
        Self {
            mime_type: mime_type.into(),
            support,
            adaptive: AdaptiveSupport::NotSupported,
            tunneling: false,
        }
    }

    /// A rule for a fully handled MIME type.
    pub fn handled(mime_type: impl Into<String>) -> Self {
        Self::new(mime_type, FormatSupport::Handled)
    }

    pub fn with_adaptive(mut self, adaptive: AdaptiveSupport) -> Self {
        self.adaptive = adaptive;
        self
    }

    pub fn with_tunneling(mut self) -> Self {
        self.tunneling = true;
        self
    }
}

fn default_support() -> FormatSupport {
    FormatSupport::Handled
}

/// A renderer of one track type that answers capability queries from a list
/// of [`MimeRule`]s.
///
/// Formats whose MIME type has no rule are reported as
/// [`FormatSupport::UnsupportedSubtype`] when they are of the renderer's
/// type, otherwise [`FormatSupport::UnsupportedType`]. Handled formats
/// larger than the optional size or channel limits are downgraded to
/// [`FormatSupport::ExceedsCapabilities`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaticRenderer {
    pub name: String,
    pub track_type: TrackType,
    #[serde(default)]
    pub rules: Vec<MimeRule>,
    #[serde(default)]
    pub mixed_mime_type_adaptation: AdaptiveSupport,
    #[serde(default)]
    pub max_width: Option<u32>,
    #[serde(default)]
    pub max_height: Option<u32>,
    #[serde(default)]
    pub max_channel_count: Option<u32>,
}

impl StaticRenderer {
    pub fn new(name: impl Into<String>, track_type: TrackType) -> Self {
        Self {
            name: name.into(),
            track_type,
            rules: Vec::new(),
            mixed_mime_type_adaptation: AdaptiveSupport::NotSupported,
            max_width: None,
            max_height: None,
            max_channel_count: None,
        }
    }

    pub fn with_rule(mut self, rule: MimeRule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn with_mixed_mime_type_adaptation(mut self, support: AdaptiveSupport) -> Self {
        self.mixed_mime_type_adaptation = support;
        self
    }

    pub fn with_max_size(mut self, width: u32, height: u32) -> Self {
        self.max_width = Some(width);
        self.max_height = Some(height);
        self
    }

    pub fn with_max_channel_count(mut self, channel_count: u32) -> Self {
        self.max_channel_count = Some(channel_count);
        self
    }

    fn exceeds_limits(&self, format: &Format) -> bool {
        exceeds(format.width, self.max_width)
            || exceeds(format.height, self.max_height)
            || exceeds(format.channel_count, self.max_channel_count)
    }
}

fn exceeds(value: Option<u32>, limit: Option<u32>) -> bool {
    matches!((value, limit), (Some(v), Some(max)) if v > max)
}

impl Renderer for StaticRenderer {
    fn name(&self) -> &str {
        &self.name
    }

    fn track_type(&self) -> TrackType {
        self.track_type
    }

    fn supports_format(&self, format: &Format) -> Result<Capabilities> {
        let mime_type = format.sample_mime_type.as_deref();
        let Some(rule) = self
            .rules
            .iter()
            .find(|rule| Some(rule.mime_type.as_str()) == mime_type)
        else {
            let support = if self.track_type != TrackType::None && format.track_type() == self.track_type {
                FormatSupport::UnsupportedSubtype
            } else {
                FormatSupport::UnsupportedType
            };
            return Ok(Capabilities::new(support));
        };

        let support = if rule.support == FormatSupport::Handled && self.exceeds_limits(format) {
            FormatSupport::ExceedsCapabilities
        } else {
            rule.support
        };
        let tunneling = if rule.tunneling {
            TunnelingSupport::Supported
        } else {
            TunnelingSupport::NotSupported
        };
        Ok(Capabilities::new(support)
            .with_adaptive(rule.adaptive)
            .with_tunneling(tunneling))
    }

    fn supports_mixed_mime_type_adaptation(&self) -> Result<AdaptiveSupport> {
        Ok(self.mixed_mime_type_adaptation)
    }
}
