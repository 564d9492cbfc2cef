//! The [`Renderer`] trait: the capability queries the mapping stage needs.

use tp_core::{AdaptiveSupport, Capabilities, Format, Result, TrackType};

/// A renderer that can be asked about the formats it supports.
///
/// Implementations must be safe to share across threads (`Send + Sync`).
/// A query that fails aborts the whole selection pass, so implementations
/// should return [`tp_core::Error::CapabilityQuery`] rather than guessing.
pub trait Renderer: Send + Sync {
    /// Human-readable name identifying this renderer.
    fn name(&self) -> &str;

    /// The kind of content this renderer plays.
    fn track_type(&self) -> TrackType;

    /// Capabilities of this renderer for a single format.
    fn supports_format(&self, format: &Format) -> Result<Capabilities>;

    /// How well this renderer adapts between tracks whose sample MIME types
    /// differ.
    fn supports_mixed_mime_type_adaptation(&self) -> Result<AdaptiveSupport>;
}
