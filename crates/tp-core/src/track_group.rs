//! [`TrackGroup`] and [`TrackGroupArray`].
//!
//! A group holds mutually exclusive formats of the same content (the same
//! video at several resolutions, for instance). Equality and hashing follow
//! the group identity, so arrays built from distinct groups never compare
//! equal even when their formats do.

use serde::Serialize;
use std::hash::{Hash, Hasher};
use std::ops::Index;

use crate::error::{Error, Result};
use crate::format::Format;
use crate::ids::TrackGroupId;
use crate::media::TrackType;

/// An immutable, non-empty, ordered set of mutually exclusive formats.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrackGroup {
    id: TrackGroupId,
    formats: Vec<Format>,
}

impl TrackGroup {
    /// Create a group with a fresh identity. Language tags are normalized.
    pub fn new(formats: Vec<Format>) -> Result<Self> {
        Self::with_id(TrackGroupId::new(), formats)
    }

    /// Create a group with an explicit identity.
    pub fn with_id(id: TrackGroupId, formats: Vec<Format>) -> Result<Self> {
        if formats.is_empty() {
            return Err(Error::InvalidTrackGroup(format!(
                "track group {id} has no formats"
            )));
        }
        Ok(Self {
            id,
            formats: formats.into_iter().map(Format::normalized).collect(),
        })
    }

    pub fn id(&self) -> TrackGroupId {
        self.id
    }

    /// Number of tracks in the group (always at least one).
    pub fn len(&self) -> usize {
        self.formats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.formats.is_empty()
    }

    pub fn format(&self, index: usize) -> &Format {
        &self.formats[index]
    }

    pub fn formats(&self) -> &[Format] {
        &self.formats
    }

    /// Position of `format` within the group.
    pub fn index_of(&self, format: &Format) -> Option<usize> {
        self.formats.iter().position(|f| f == format)
    }

    /// Content type of the group, taken from its first format.
    pub fn track_type(&self) -> TrackType {
        self.formats[0].track_type()
    }
}

impl Hash for TrackGroup {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
        self.formats.len().hash(state);
    }
}

impl Index<usize> for TrackGroup {
    type Output = Format;

    fn index(&self, index: usize) -> &Format {
        &self.formats[index]
    }
}

/// An ordered collection of [`TrackGroup`]s.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct TrackGroupArray {
    groups: Vec<TrackGroup>,
}

impl TrackGroupArray {
    pub fn new(groups: Vec<TrackGroup>) -> Self {
        Self { groups }
    }

    /// The empty array.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&TrackGroup> {
        self.groups.get(index)
    }

    /// Position of a group, matched by identity.
    pub fn index_of(&self, group: &TrackGroup) -> Option<usize> {
        self.groups.iter().position(|g| g.id == group.id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TrackGroup> {
        self.groups.iter()
    }
}

impl Index<usize> for TrackGroupArray {
    type Output = TrackGroup;

    fn index(&self, index: usize) -> &TrackGroup {
        &self.groups[index]
    }
}

impl<'a> IntoIterator for &'a TrackGroupArray {
    type Item = &'a TrackGroup;
    type IntoIter = std::slice::Iter<'a, TrackGroup>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.iter()
    }
}

impl FromIterator<TrackGroup> for TrackGroupArray {
    fn from_iter<I: IntoIterator<Item = TrackGroup>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
