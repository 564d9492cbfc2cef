//! # tp-select
//!
//! Track selection over mapped track groups.
//!
//! Given a [`MappedTrackInfo`](tp_mapping::MappedTrackInfo) and
//! [`Parameters`], the engine picks tracks for each renderer:
//!
//! - [`video`] -- adaptive selection across a group when possible, filtered
//!   to the viewport, else the best single track.
//! - [`audio`] -- ranked by [`AudioTrackScore`], with adaptive expansion
//!   over tracks sharing a configuration.
//! - [`text`] -- ranked by [`TextTrackScore`]; only tracks with a reason to
//!   be shown are eligible.
//! - [`other`] -- metadata and other types, default tracks first.
//! - [`tunneling`] -- pairs one audio and one video renderer on a session.
//!
//! [`DefaultTrackSelector`] ties mapping and selection together behind
//! atomically swapped parameters.

pub mod audio;
pub mod definition;
pub mod engine;
pub mod other;
pub mod parameters;
pub mod score;
pub mod selector;
pub mod text;
pub mod tunneling;
pub mod video;

pub use definition::{Definition, RendererConfiguration, TrackSelectorResult};
pub use engine::{select_all_tracks, select_tracks};
pub use parameters::{Parameters, ParametersBuilder, SelectionOverride};
pub use score::{AudioTrackScore, TextTrackScore};
pub use selector::{DefaultTrackSelector, InvalidationListener};
