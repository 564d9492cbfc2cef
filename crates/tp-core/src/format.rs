//! The [`Format`] of a single elementary track.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::language::normalize_language_code;
use crate::media::{RoleFlags, SelectionFlags, TrackType};
use crate::mime;

/// Properties of one elementary track. Unknown values are `None`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Format {
    /// Identifier assigned by the media source.
    pub id: Option<String>,
    /// Human-readable label.
    pub label: Option<String>,
    pub selection_flags: SelectionFlags,
    pub role_flags: RoleFlags,
    /// Average bitrate in bits per second.
    pub bitrate: Option<u32>,
    /// RFC 6381 codecs string.
    pub codecs: Option<String>,
    pub container_mime_type: Option<String>,
    pub sample_mime_type: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub frame_rate: Option<f32>,
    pub channel_count: Option<u32>,
    /// Sample rate in Hz.
    pub sample_rate: Option<u32>,
    /// Normalized language tag.
    pub language: Option<String>,
}

impl Format {
    /// Start building a format.
    pub fn builder() -> FormatBuilder {
        FormatBuilder::default()
    }

    /// Width times height, if both are known.
    pub fn pixel_count(&self) -> Option<u64> {
        match (self.width, self.height) {
            (Some(w), Some(h)) => Some(u64::from(w) * u64::from(h)),
            _ => None,
        }
    }

    /// The track type implied by the sample MIME type.
    pub fn track_type(&self) -> TrackType {
        mime::track_type(self.sample_mime_type.as_deref())
    }

    pub fn is_default(&self) -> bool {
        self.selection_flags.contains(SelectionFlags::DEFAULT)
    }

    pub fn is_forced(&self) -> bool {
        self.selection_flags.contains(SelectionFlags::FORCED)
    }

    /// Return a copy with the language tag normalized.
    pub fn normalized(mut self) -> Self {
        self.language = self.language.map(|l| normalize_language_code(&l));
        self
    }
}

impl PartialEq for Format {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.label == other.label
            && self.selection_flags == other.selection_flags
            && self.role_flags == other.role_flags
            && self.bitrate == other.bitrate
            && self.codecs == other.codecs
            && self.container_mime_type == other.container_mime_type
            && self.sample_mime_type == other.sample_mime_type
            && self.width == other.width
            && self.height == other.height
            && self.frame_rate.map(f32::to_bits) == other.frame_rate.map(f32::to_bits)
            && self.channel_count == other.channel_count
            && self.sample_rate == other.sample_rate
            && self.language == other.language
    }
}

// Frame rates compare bitwise, so equality is reflexive.
impl Eq for Format {}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.sample_mime_type.as_deref().unwrap_or("?"))?;
        if let Some(id) = &self.id {
            write!(f, " id={id}")?;
        }
        if let (Some(w), Some(h)) = (self.width, self.height) {
            write!(f, " {w}x{h}")?;
        }
        if let Some(fps) = self.frame_rate {
            write!(f, " {fps:.3}fps")?;
        }
        if let Some(ch) = self.channel_count {
            write!(f, " {ch}ch")?;
        }
        if let Some(rate) = self.sample_rate {
            write!(f, " {rate}Hz")?;
        }
        if let Some(bitrate) = self.bitrate {
            write!(f, " {bitrate}bps")?;
        }
        if let Some(lang) = &self.language {
            write!(f, " lang={lang}")?;
        }
        if !self.selection_flags.is_empty() {
            write!(f, " flags={:?}", self.selection_flags)?;
        }
        Ok(())
    }
}

/// Builder for [`Format`]. Language tags are normalized on [`build`](Self::build).
#[derive(Debug, Clone, Default)]
pub struct FormatBuilder {
    format: Format,
}

impl FormatBuilder {
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.format.id = Some(id.into());
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.format.label = Some(label.into());
        self
    }

    pub fn selection_flags(mut self, flags: SelectionFlags) -> Self {
        self.format.selection_flags = flags;
        self
    }

    pub fn role_flags(mut self, flags: RoleFlags) -> Self {
        self.format.role_flags = flags;
        self
    }

    pub fn bitrate(mut self, bitrate: u32) -> Self {
        self.format.bitrate = Some(bitrate);
        self
    }

    pub fn codecs(mut self, codecs: impl Into<String>) -> Self {
        self.format.codecs = Some(codecs.into());
        self
    }

    pub fn container_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.format.container_mime_type = Some(mime_type.into());
        self
    }

    pub fn sample_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.format.sample_mime_type = Some(mime_type.into());
        self
    }

    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.format.width = Some(width);
        self.format.height = Some(height);
        self
    }

    pub fn frame_rate(mut self, frame_rate: f32) -> Self {
        self.format.frame_rate = Some(frame_rate);
        self
    }

    pub fn channel_count(mut self, channel_count: u32) -> Self {
        self.format.channel_count = Some(channel_count);
        self
    }

    pub fn sample_rate(mut self, sample_rate: u32) -> Self {
        self.format.sample_rate = Some(sample_rate);
        self
    }

    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.format.language = Some(language.into());
        self
    }

    pub fn build(self) -> Format {
        self.format.normalized()
    }
}
