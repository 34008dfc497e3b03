//! Song identity resolution across albums.
//!
//! Folds every song appearance into a [`SongIndex`]: canonical song name
//! mapped to the distinct versions of that song and the albums each version
//! appeared on.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::catalog::Album;
use crate::titles::clean_title;
use crate::types::{AlbumId, Category};

/// Reference to an album a version appeared on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlbumRef {
    /// Album title.
    pub name: String,
    /// Album identifier.
    pub file_id: AlbumId,
    /// Album release date.
    pub release_date: NaiveDate,
}

impl AlbumRef {
    fn of(album: &Album) -> Self {
        Self {
            name: album.name.clone(),
            file_id: album.file_id.clone(),
            release_date: album.release_date,
        }
    }
}

/// One version of a song and the albums it appeared on, in first-seen order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VersionGroup {
    /// What kind of appearance this is.
    pub category: Category,
    /// Albums carrying this version.
    pub albums: Vec<AlbumRef>,
}

/// Canonical song name → versions of that song.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SongIndex {
    entries: BTreeMap<String, Vec<VersionGroup>>,
}

impl SongIndex {
    /// Versions recorded for a canonical song name.
    pub fn get(&self, name: &str) -> Option<&[VersionGroup]> {
        self.entries.get(name).map(Vec::as_slice)
    }

    /// Iterate entries ordered by canonical name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[VersionGroup])> {
        self.entries.iter().map(|(name, groups)| (name.as_str(), groups.as_slice()))
    }

    /// Number of distinct canonical songs.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the index has no songs.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Canonical names in song-index listing order: parentheses and a
    /// leading article are ignored when comparing.
    pub fn names_by_title(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        names.sort_by_cached_key(|name| clean_title(name));
        names
    }

    fn record(&mut self, name: &str, category: Category, album: &Album) {
        let Some(groups) = self.entries.get_mut(name) else {
            tracing::debug!("New song {name:?} ({category}) on {}", album.name);
            self.entries.insert(
                name.to_string(),
                vec![VersionGroup { category, albums: vec![AlbumRef::of(album)] }],
            );
            return;
        };

        // Skip-set categories always open a new group, even when an equal
        // one already exists.
        if !category.is_skipped() {
            if let Some(group) = groups.iter_mut().find(|g| g.category == category) {
                group.albums.push(AlbumRef::of(album));
                return;
            }
        }

        groups.push(VersionGroup { category, albums: vec![AlbumRef::of(album)] });
    }
}

/// Build the song index from albums already sorted by release date.
///
/// The order of `albums` decides which album is listed first in every
/// version group; songs are visited in each album's track order.
pub fn resolve(albums: &[Album]) -> SongIndex {
    let mut index = SongIndex::default();

    for album in albums {
        for song in &album.songs {
            index.record(song.canonical_name(), Category::of(song), album);
        }
    }

    tracing::info!("Resolved {} songs across {} albums", index.len(), albums.len());
    index
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;
    use crate::catalog::Song;
    use crate::types::SongId;

    fn album(name: &str, year: i32, songs: Vec<Song>) -> Album {
        Album {
            name: name.to_string(),
            file_id: AlbumId::new(name.to_lowercase().replace(' ', "_")),
            release_date: NaiveDate::from_ymd_opt(year, 1, 1).unwrap(),
            release_date_text: format!("January 1, {year}"),
            length: None,
            discs: None,
            sides: None,
            image_file_name: None,
            producers: None,
            label: None,
            with: None,
            live: None,
            songs,
        }
    }

    fn version(name: &str, file_id: &str) -> Song {
        let mut song = Song::named(name);
        song.file_id = Some(SongId::new(file_id));
        song
    }

    fn instrumental(name: &str) -> Song {
        let mut song = Song::named(name);
        song.instrumental = true;
        song
    }

    fn album_names(group: &VersionGroup) -> Vec<&str> {
        group.albums.iter().map(|a| a.name.as_str()).collect()
    }

    #[test]
    fn same_version_lists_earliest_album_first() {
        let albums = vec![
            album("Blonde on Blonde", 1966, vec![version("Visions of Johanna", "visions_of_johanna")]),
            album("Greatest Hits Vol II", 1971, vec![version("Visions of Johanna", "visions_of_johanna")]),
        ];
        let index = resolve(&albums);

        let groups = index.get("Visions of Johanna").unwrap();
        assert_eq!(groups.len(), 1);
        assert_eq!(album_names(&groups[0]), ["Blonde on Blonde", "Greatest Hits Vol II"]);
    }

    #[test]
    fn different_versions_get_separate_groups() {
        let mut albums = vec![
            album("Self Portrait", 1970, vec![version("Alberta #1", "alberta_1")]),
            album("Another Self Portrait", 2013, vec![version("Alberta #3", "alberta_3")]),
        ];
        albums[0].songs[0].actual_name = Some("Alberta".into());
        albums[1].songs[0].actual_name = Some("Alberta".into());

        let index = resolve(&albums);
        let groups = index.get("Alberta").unwrap();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].category, Category::Version(Some(SongId::new("alberta_1"))));
        assert_eq!(groups[1].category, Category::Version(Some(SongId::new("alberta_3"))));
        assert!(index.get("Alberta #1").is_none());
    }

    #[test]
    fn skip_set_categories_never_merge() {
        let albums = vec![
            album("Pat Garrett", 1973, vec![instrumental("Bunkhouse Theme")]),
            album("Bootleg Series", 1991, vec![instrumental("Bunkhouse Theme")]),
        ];
        let index = resolve(&albums);

        let groups = index.get("Bunkhouse Theme").unwrap();
        assert_eq!(groups.len(), 2);
        assert!(groups.iter().all(|g| g.category == Category::Instrumental));
        assert_eq!(album_names(&groups[0]), ["Pat Garrett"]);
        assert_eq!(album_names(&groups[1]), ["Bootleg Series"]);
    }

    #[test]
    fn skip_group_does_not_absorb_later_versions() {
        let mut foreign = Song::named("The Mighty Quinn");
        foreign.written_and_performed_by = Some(crate::catalog::Credits {
            performed_by: Some("Manfred Mann".into()),
            written_by: None,
        });
        let albums = vec![
            album("Tribute", 1968, vec![foreign]),
            album("Self Portrait", 1970, vec![version("The Mighty Quinn", "the_mighty_quinn")]),
            album("Biograph", 1985, vec![version("The Mighty Quinn", "the_mighty_quinn")]),
        ];
        let index = resolve(&albums);

        let groups = index.get("The Mighty Quinn").unwrap();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].category, Category::NotByPrimaryArtist);
        assert_eq!(album_names(&groups[1]), ["Self Portrait", "Biograph"]);
    }

    #[test]
    fn resolution_is_deterministic() {
        let albums = vec![
            album("Desire", 1976, vec![version("Hurricane", "hurricane"), instrumental("Interlude")]),
            album("Hard Rain", 1976, vec![version("Hurricane", "hurricane_live"), instrumental("Interlude")]),
        ];
        assert_eq!(resolve(&albums), resolve(&albums));
    }

    #[test]
    fn empty_input_gives_empty_index() {
        assert!(resolve(&[]).is_empty());
    }

    #[test]
    fn names_sort_ignoring_articles() {
        let albums = vec![album(
            "Mixed",
            1965,
            vec![
                version("The Times They Are A-Changin'", "times"),
                version("Ballad of a Thin Man", "ballad"),
                version("(Sooner or Later) One of Us Must Know", "sooner"),
            ],
        )];
        let index = resolve(&albums);
        assert_eq!(
            index.names_by_title(),
            [
                "Ballad of a Thin Man",
                "(Sooner or Later) One of Us Must Know",
                "The Times They Are A-Changin'",
            ]
        );
    }
}
