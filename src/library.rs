//! Lyrics file access and the batch alignment pass.
//!
//! Scans a directory of `<file_id>.txt` lyrics files. Reading happens here,
//! before alignment; the aligner itself never touches the filesystem.

use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

use serde::Serialize;
use walkdir::WalkDir;

use crate::annotations::{align, standardize_quotes, strip_annotations, AlignedLyrics};
use crate::catalog::Album;
use crate::constants::paths::LYRICS_EXTENSION;
use crate::error::{Error, Result};
use crate::types::{Category, SongId};

/// Options for [`LyricsLibrary::align_albums`].
#[derive(Debug, Clone, Copy, Default)]
pub struct BatchOptions {
    /// Skip songs whose lyrics file is missing instead of aborting.
    pub skip_missing: bool,
}

/// One song appearance with its plain lyrics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SongText {
    /// Display name on the album.
    pub name: String,
    /// Album the appearance is on.
    pub album: String,
    /// Lyrics file identifier.
    pub file_id: SongId,
    /// Lyrics with footnotes and inline marks removed.
    pub text: String,
}

/// Result of aligning every song on every album.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchOutcome {
    /// Aligned lyrics, once per lyrics file.
    pub lyrics: BTreeMap<SongId, AlignedLyrics>,
    /// Every appearance in album order, duplicates included.
    pub appearances: Vec<SongText>,
    /// Songs skipped because their lyrics file was missing.
    pub skipped: Vec<SongId>,
}

/// Directory of lyrics files.
#[derive(Debug, Clone)]
pub struct LyricsLibrary {
    dir: PathBuf,
}

impl LyricsLibrary {
    /// Create a library backed by the given directory.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Where the lyrics file for `id` lives.
    pub fn path_for(&self, id: &SongId) -> PathBuf {
        self.dir.join(format!("{id}.{LYRICS_EXTENSION}"))
    }

    /// Read the raw lyrics for a song.
    pub fn read(&self, id: &SongId) -> Result<String> {
        let path = self.path_for(id);
        if !path.is_file() {
            return Err(Error::MissingLyricsFile { song_id: id.to_string(), path });
        }
        fs_err::read_to_string(&path).map_err(|e| Error::io(e, path))
    }

    /// Read, standardize quotes, and align one song's lyrics. Errors carry
    /// the song identifier.
    pub fn align_song(&self, id: &SongId) -> Result<(AlignedLyrics, String)> {
        let text = standardize_quotes(&self.read(id).map_err(|e| e.in_song(id.as_str()))?);
        let aligned = align(&text).map_err(|e| e.in_song(id.as_str()))?;
        Ok((aligned, strip_annotations(&text)))
    }

    /// Align every song with its own lyrics file, in album order.
    ///
    /// Each lyrics file is aligned once; every appearance is still listed.
    /// Missing files abort the pass unless `options.skip_missing` is set.
    pub fn align_albums(&self, albums: &[Album], options: BatchOptions) -> Result<BatchOutcome> {
        let mut outcome = BatchOutcome::default();
        let mut plain: BTreeMap<SongId, String> = BTreeMap::new();

        for album in albums {
            for song in &album.songs {
                let category = Category::of(song);
                let Some(id) = category.song_id() else {
                    continue;
                };

                if !plain.contains_key(id) {
                    if outcome.skipped.contains(id) {
                        continue;
                    }
                    match self.align_song(id) {
                        Ok((aligned, text)) => {
                            tracing::debug!("Aligned {id} ({} footnotes)", aligned.footnotes.len());
                            outcome.lyrics.insert(id.clone(), aligned);
                            plain.insert(id.clone(), text);
                        }
                        Err(e) if options.skip_missing && e.is_missing_lyrics() => {
                            tracing::warn!("Skipping {} on {}: {e}", song.name, album.name);
                            outcome.skipped.push(id.clone());
                            continue;
                        }
                        Err(e) => return Err(e),
                    }
                }

                if let Some(text) = plain.get(id) {
                    outcome.appearances.push(SongText {
                        name: song.name.clone(),
                        album: album.name.clone(),
                        file_id: id.clone(),
                        text: text.clone(),
                    });
                }
            }
        }

        tracing::info!(
            "Aligned {} lyrics files ({} appearances, {} skipped)",
            outcome.lyrics.len(),
            outcome.appearances.len(),
            outcome.skipped.len()
        );
        Ok(outcome)
    }

    /// Lyrics files in the directory that no song refers to.
    pub fn orphans(&self, albums: &[Album]) -> Vec<PathBuf> {
        let referenced: BTreeSet<PathBuf> = albums
            .iter()
            .flat_map(|album| &album.songs)
            .filter_map(|song| song.file_id.as_ref())
            .map(|id| self.path_for(id))
            .collect();

        let mut orphans: Vec<PathBuf> = WalkDir::new(&self.dir)
            .max_depth(1)
            .into_iter()
            .filter_map(std::result::Result::ok)
            .filter(|e| e.file_type().is_file())
            .filter(|e| e.path().extension().is_some_and(|ext| ext == LYRICS_EXTENSION))
            .map(walkdir::DirEntry::into_path)
            .filter(|path| !referenced.contains(path))
            .collect();
        orphans.sort();
        orphans
    }
}
