//! Scenario files: a set of renderers and the track groups offered to them.
//!
//! ```json
//! {
//!   "renderers": [
//!     {"name": "video", "track_type": "video", "rules": [{"mime_type": "video/avc"}]}
//!   ],
//!   "groups": [
//!     [{"sample_mime_type": "video/avc", "width": 1280, "height": 720}]
//!   ]
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;

use tp_core::{Error, Format, Result, TrackGroup, TrackGroupArray};
use tp_mapping::{Renderer, StaticRenderer};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub renderers: Vec<StaticRenderer>,
    /// One entry per track group, each listing its formats.
    #[serde(default)]
    pub groups: Vec<Vec<Format>>,
}

impl Scenario {
    pub fn from_json(json_str: &str) -> Result<Self> {
        serde_json::from_str(json_str)
            .map_err(|e| Error::Config(format!("scenario parse error: {e}")))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Renderers as trait objects, in index order.
    pub fn renderers(&self) -> Vec<Arc<dyn Renderer>> {
        self.renderers
            .iter()
            .cloned()
            .map(|r| Arc::new(r) as Arc<dyn Renderer>)
            .collect()
    }

    /// Build the track groups. Language tags are normalized and each group
    /// gets a fresh identity.
    pub fn track_groups(&self) -> Result<TrackGroupArray> {
        let groups = self
            .groups
            .iter()
            .enumerate()
            .map(|(index, formats)| {
                let formats = formats.iter().cloned().map(Format::normalized).collect();
                TrackGroup::new(formats).map_err(|e| match e {
                    Error::InvalidTrackGroup(message) => {
                        Error::InvalidTrackGroup(format!("group {index}: {message}"))
                    }
                    other => other,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(TrackGroupArray::new(groups))
    }
}
