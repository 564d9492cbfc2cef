//! Typed identity for track groups.
//!
//! Overrides are keyed on track group arrays by identity, so every
//! [`TrackGroup`](crate::TrackGroup) carries a [`TrackGroupId`] assigned when
//! the media source builds it. Clones share the identity.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a track group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrackGroupId(Uuid);

impl TrackGroupId {
    /// Generate a new random track group ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for TrackGroupId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for TrackGroupId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl From<TrackGroupId> for Uuid {
    fn from(id: TrackGroupId) -> Self {
        id.0
    }
}

impl std::fmt::Display for TrackGroupId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
