//! Application error types.
//!
//! Provides unified error handling with actionable context for debugging.
//! Every variant is a content or configuration problem: the batch is a
//! deterministic transform, so nothing here is worth retrying.

use std::path::PathBuf;

use thiserror::Error;

/// Application result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Application error types with specific context for actionable debugging
#[derive(Debug, Error)]
pub enum Error {
    /// IO error with path context
    #[error("IO error at {path:?}: {source}")]
    Io {
        /// The underlying IO error.
        source: std::io::Error,
        /// File path where the error occurred, if known.
        path: Option<PathBuf>,
    },

    /// Configuration error with guidance
    #[error("Configuration error: {message}. {hint}")]
    Config {
        /// Description of the configuration problem.
        message: String,
        /// Actionable guidance for fixing the issue.
        hint: &'static str,
    },

    /// Index file could not be parsed as JSON records
    #[error("Parse error in {file:?}: {message}")]
    Parse {
        /// File that failed to parse, if known.
        file: Option<PathBuf>,
        /// Description of the parse failure.
        message: String,
    },

    /// A record's `type` is neither `"album"` nor `"song"`
    #[error("Malformed index record #{position}: type {record_type:?} is neither \"album\" nor \"song\"")]
    MalformedIndexRecord {
        /// Zero-based position of the record in the index file.
        position: usize,
        /// The `type` value found (empty when missing).
        record_type: String,
    },

    /// The index contained no album records
    #[error("No albums found in index file {path:?}")]
    EmptyIndexFile {
        /// Index file that was read, if known.
        path: Option<PathBuf>,
    },

    /// Album release date could not be parsed
    #[error("Invalid release date {value:?} for album {album:?}")]
    InvalidReleaseDate {
        /// Album whose date failed to parse.
        album: String,
        /// The raw release date string.
        value: String,
    },

    /// An inline marker was not found where the offset walk expected it
    #[error("Annotation(s) {expected:?} not found at expected position on line {line}: {text:?}")]
    AnnotationCountMismatch {
        /// 1-based line number in the lyrics text.
        line: usize,
        /// The raw line, markers included.
        text: String,
        /// Marker numbers the walk was looking for.
        expected: Vec<u32>,
    },

    /// A line carries more than one inline marker
    #[error("Line {line} has {count} annotations; only one per line is supported: {text:?}")]
    MultipleAnnotationsPerLineUnsupported {
        /// 1-based line number in the lyrics text.
        line: usize,
        /// The raw line, markers included.
        text: String,
        /// Number of inline markers found.
        count: usize,
    },

    /// Marker numbers in document order are not `1..=N` for `N` footnotes
    #[error("Annotation numbering mismatch: found markers {found:?} for {footnotes} footnote(s)")]
    AnnotationNumberingMismatch {
        /// Marker numbers in document order.
        found: Vec<u32>,
        /// Number of footnote definitions.
        footnotes: usize,
    },

    /// A referenced song has no lyrics file
    #[error("Missing lyrics file for song {song_id} at {path:?}")]
    MissingLyricsFile {
        /// Identifier of the song.
        song_id: String,
        /// Where the file was expected.
        path: PathBuf,
    },

    /// Error raised while processing a specific song's lyrics
    #[error("In song {song_id}: {source}")]
    Song {
        /// Identifier of the song being processed.
        song_id: String,
        /// The underlying failure.
        #[source]
        source: Box<Error>,
    },

    /// Generic message error (escape hatch)
    #[error("{0}")]
    Msg(String),
}

impl Error {
    /// Create an IO error with path context
    pub fn io(source: std::io::Error, path: impl Into<Option<PathBuf>>) -> Self {
        Self::Io { source, path: path.into() }
    }

    /// Create a config error with actionable hint
    pub fn config(message: impl Into<String>, hint: &'static str) -> Self {
        Self::Config { message: message.into(), hint }
    }

    /// Create a parse error with file context
    pub fn parse(message: impl Into<String>, file: impl Into<Option<PathBuf>>) -> Self {
        Self::Parse { file: file.into(), message: message.into() }
    }

    /// Attach a song identifier to an error raised while processing it
    pub fn in_song(self, song_id: impl Into<String>) -> Self {
        Self::Song { song_id: song_id.into(), source: Box::new(self) }
    }

    /// Whether this is (or wraps) a missing lyrics file, the one condition
    /// a batch may downgrade to a skip.
    pub fn is_missing_lyrics(&self) -> bool {
        match self {
            Self::MissingLyricsFile { .. } => true,
            Self::Song { source, .. } => source.is_missing_lyrics(),
            _ => false,
        }
    }
}
