//! tp-core: shared media model, capability levels, errors, and configuration.
//!
//! This crate is the foundational dependency for the other tp-* crates. It
//! defines the immutable track model ([`Format`], [`TrackGroup`],
//! [`TrackGroupArray`]), the per-track [`Capabilities`] a renderer reports,
//! language helpers used by the scorers, and the JSON selector configuration.

pub mod capabilities;
pub mod config;
pub mod error;
pub mod format;
pub mod ids;
pub mod language;
pub mod media;
pub mod mime;
pub mod track_group;

// Re-export the most commonly used items at the crate root.
pub use capabilities::{AdaptiveSupport, Capabilities, FormatSupport, TunnelingSupport};
pub use error::{Error, Result};
pub use format::{Format, FormatBuilder};
pub use ids::TrackGroupId;
pub use media::*;
pub use track_group::{TrackGroup, TrackGroupArray};
