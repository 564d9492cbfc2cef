//! # tp-mapping
//!
//! Maps track groups onto the renderers that will play them.
//!
//! Every renderer is asked how well it supports every track of every group
//! through the [`Renderer`] trait. Each group is assigned to the renderer
//! reporting the best support, and the answers are kept in a
//! [`MappedTrackInfo`] that the selection stage reads from.
//!
//! ## Quick start
//!
//! ```
//! use std::sync::Arc;
//! use tp_core::{mime, Format, FormatSupport, TrackGroup, TrackGroupArray, TrackType};
//! use tp_mapping::{map_tracks, MimeRule, Renderer, RendererSupport, StaticRenderer};
//!
//! let video: Arc<dyn Renderer> = Arc::new(
//!     StaticRenderer::new("video", TrackType::Video).with_rule(MimeRule::handled(mime::VIDEO_H264)),
//! );
//! let group = TrackGroup::new(vec![Format::builder()
//!     .sample_mime_type(mime::VIDEO_H264)
//!     .size(1280, 720)
//!     .build()])
//! .unwrap();
//!
//! let info = map_tracks(&[video], &TrackGroupArray::new(vec![group])).unwrap();
//! assert_eq!(info.renderer_support(0), RendererSupport::PlayableTracks);
//! assert_eq!(info.track_support(0, 0, 0), FormatSupport::Handled);
//! ```

pub mod mapped;
pub mod mapper;
pub mod renderer;
pub mod static_renderer;

pub use mapped::{MappedTrackInfo, RendererSupport};
pub use mapper::map_tracks;
pub use renderer::Renderer;
pub use static_renderer::{MimeRule, StaticRenderer};
