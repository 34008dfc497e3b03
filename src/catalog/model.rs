//! Typed album and song models.
//!
//! All optional attributes are resolved here, once, when a raw record is
//! converted. Downstream code never looks at raw JSON.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use serde_json::Value;

use super::date::parse_release_date;
use super::record::{RawAlbum, RawCredits, RawSong, RawSource};
use crate::error::{Error, Result};
use crate::types::{AlbumId, SongId};

/// An album (or other collection of songs) from the index.
#[derive(Debug, Clone, Serialize)]
pub struct Album {
    /// Album title.
    pub name: String,
    /// Stable identifier.
    pub file_id: AlbumId,
    /// Parsed release date.
    pub release_date: NaiveDate,
    /// Release date as written in the index, trailing text included.
    pub release_date_text: String,
    /// Running time, e.g. `"50:04"`.
    pub length: Option<String>,
    /// Disc layout, if the album spans several discs.
    pub discs: Option<Value>,
    /// Side layout, for vinyl-era releases.
    pub sides: Option<Value>,
    /// Cover image file name.
    pub image_file_name: Option<String>,
    /// Comma-separated producer names.
    pub producers: Option<String>,
    /// Record label.
    pub label: Option<String>,
    /// Collaborating artist credited on the cover.
    pub with: Option<String>,
    /// Live recording note.
    pub live: Option<String>,
    /// Songs in track order.
    pub songs: Vec<Song>,
}

impl Album {
    /// Release year.
    pub fn year(&self) -> i32 {
        self.release_date.year()
    }

    /// Build an album from its raw record, parsing the release date and
    /// ordering songs by their `index` attribute.
    pub(crate) fn from_raw(raw: RawAlbum) -> Result<Self> {
        let release_date = parse_release_date(&raw.name, &raw.release_date)?;

        let mut songs = raw
            .songs
            .into_iter()
            .map(|(name, attrs)| {
                let song: RawSong = serde_json::from_value(attrs).map_err(|e| {
                    Error::parse(format!("song {name:?} on album {:?}: {e}", raw.name), None)
                })?;
                Ok((song.index, Song::from_raw(name, song)))
            })
            .collect::<Result<Vec<_>>>()?;
        songs.sort_by_key(|(index, _)| *index);

        Ok(Self {
            name: raw.name,
            file_id: AlbumId::new(raw.file_id),
            release_date,
            release_date_text: raw.release_date,
            length: raw.length,
            discs: raw.discs,
            sides: raw.sides,
            image_file_name: raw.image_file_name,
            producers: raw.producers,
            label: raw.label,
            with: raw.with_,
            live: raw.live,
            songs: songs.into_iter().map(|(_, song)| song).collect(),
        })
    }
}

/// Songwriting/performance credits for a track by another artist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Credits {
    /// Performing artist.
    pub performed_by: Option<String>,
    /// Songwriter.
    pub written_by: Option<String>,
}

impl Credits {
    fn from_raw(raw: RawCredits) -> Option<Self> {
        if raw.performed_by.is_none() && raw.written_by.is_none() {
            return None;
        }
        Some(Self { performed_by: raw.performed_by, written_by: raw.written_by })
    }
}

/// Back-reference to the album a recording first appeared on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceRef {
    /// Origin album title.
    pub name: Option<String>,
    /// Origin album identifier.
    pub file_id: Option<AlbumId>,
}

impl SourceRef {
    fn from_raw(raw: RawSource) -> Option<Self> {
        if raw.name.is_none() && raw.file_id.is_none() {
            return None;
        }
        Some(Self { name: raw.name, file_id: raw.file_id.map(AlbumId::new) })
    }
}

/// One track on an album.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Song {
    /// Display name on this album.
    pub name: String,
    /// Name to merge under when the display name differs by album.
    pub actual_name: Option<String>,
    /// Lyrics file identifier; absent for tracks without lyrics of their own.
    pub file_id: Option<SongId>,
    /// The track has no vocals.
    pub instrumental: bool,
    /// Set when another artist wrote and performed the track.
    pub written_and_performed_by: Option<Credits>,
    /// Alternate lead vocalist.
    pub sung_by: Option<String>,
    /// Songwriter, when not the primary artist.
    pub written_by: Option<String>,
    /// Earlier album this exact recording first appeared on.
    pub source: Option<SourceRef>,
    /// Duet partner.
    pub duet: Option<String>,
    /// Live recording note.
    pub live: Option<String>,
}

impl Song {
    /// A song with only a display name and every attribute unset.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            actual_name: None,
            file_id: None,
            instrumental: false,
            written_and_performed_by: None,
            sung_by: None,
            written_by: None,
            source: None,
            duet: None,
            live: None,
        }
    }

    /// The identity key used to merge appearances across albums.
    pub fn canonical_name(&self) -> &str {
        self.actual_name.as_deref().unwrap_or(&self.name)
    }

    pub(crate) fn from_raw(name: String, raw: RawSong) -> Self {
        Self {
            name,
            actual_name: raw.actual_name,
            file_id: raw.file_id.map(SongId::new),
            instrumental: raw.instrumental,
            written_and_performed_by: raw.written_and_performed_by.and_then(Credits::from_raw),
            sung_by: raw.sung_by,
            written_by: raw.written_by,
            source: raw.source.and_then(SourceRef::from_raw),
            duet: raw.duet,
            live: raw.live,
        }
    }
}
