//! Core type definitions for compile-time safety.
//!
//! This module provides newtype wrappers around string identifiers to prevent
//! accidental mixing of album and song identifiers, plus the song [`Category`]
//! used as the version key by the song index.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::catalog::Song;

/// Album identifier (the album's `file_id`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AlbumId(pub String);

impl AlbumId {
    /// Create a new `AlbumId` from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AlbumId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Song identifier (the song's `file_id`, naming its lyrics file).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SongId(pub String);

impl SongId {
    /// Create a new `SongId` from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SongId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Classification of one song appearance, used to group versions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "file_id", rename_all = "snake_case")]
pub enum Category {
    /// The track has no vocals.
    Instrumental,
    /// The track was written and performed by someone else entirely.
    NotByPrimaryArtist,
    /// A concrete recording/lyrics version. `None` when the track has no
    /// lyrics file of its own.
    Version(Option<SongId>),
}

impl Category {
    /// Classify a song. The instrumental flag wins over a foreign
    /// performer, which wins over the song's own identifier.
    pub fn of(song: &Song) -> Self {
        if song.instrumental {
            Self::Instrumental
        } else if song.written_and_performed_by.is_some() {
            Self::NotByPrimaryArtist
        } else {
            Self::Version(song.file_id.clone())
        }
    }

    /// Whether this category belongs to the skip set, whose version
    /// groups are never merged.
    pub const fn is_skipped(&self) -> bool {
        matches!(self, Self::Instrumental | Self::NotByPrimaryArtist)
    }

    /// Identifier of the lyrics file for this version, if any.
    pub const fn song_id(&self) -> Option<&SongId> {
        match self {
            Self::Version(id) => id.as_ref(),
            _ => None,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Instrumental => f.write_str("instrumental"),
            Self::NotByPrimaryArtist => f.write_str("not written or performed by the primary artist"),
            Self::Version(Some(id)) => write!(f, "{id}"),
            Self::Version(None) => f.write_str("(no lyrics file)"),
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;
    use crate::catalog::Credits;

    #[test]
    fn instrumental_takes_priority() {
        let mut song = Song::named("Wigwam");
        song.instrumental = true;
        song.file_id = Some(SongId::new("wigwam"));
        song.written_and_performed_by = Some(Credits {
            performed_by: Some("Someone Else".into()),
            written_by: None,
        });
        assert_eq!(Category::of(&song), Category::Instrumental);
    }

    #[test]
    fn foreign_performer_beats_identifier() {
        let mut song = Song::named("Ring Them Bells");
        song.file_id = Some(SongId::new("ring_them_bells"));
        song.written_and_performed_by = Some(Credits {
            performed_by: Some("The Band".into()),
            written_by: None,
        });
        assert_eq!(Category::of(&song), Category::NotByPrimaryArtist);
        assert!(Category::of(&song).is_skipped());
    }

    #[test]
    fn identifier_is_the_default_category() {
        let mut song = Song::named("Girl from the North Country");
        song.file_id = Some(SongId::new("girl_from_the_north_country"));
        let category = Category::of(&song);
        assert!(!category.is_skipped());
        assert_eq!(category.song_id().map(SongId::as_str), Some("girl_from_the_north_country"));
    }
}
