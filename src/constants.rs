//! Application constants.
//!
//! Centralizes file names and format strings for better maintainability.

/// Project layout constants, relative to the project root.
pub mod paths {
    /// Albums/songs metadata index file.
    pub const INDEX_FILE: &str = "albums_and_songs_index.json";

    /// Directory holding one `<file_id>.txt` lyrics file per song.
    pub const LYRICS_DIR: &str = "songs/txt";

    /// Extension of lyrics files.
    pub const LYRICS_EXTENSION: &str = "txt";
}

/// Index file format constants.
pub mod index {
    /// Lines starting with this prefix are comments.
    pub const COMMENT_PREFIX: &str = "#";

    /// `type` value of album records.
    pub const ALBUM_TYPE: &str = "album";

    /// `type` value of single-song records.
    pub const SONG_TYPE: &str = "song";

    /// Release date format, e.g. `May 27, 1963`.
    pub const DATE_FORMAT: &str = "%B %d, %Y";
}

/// Lyrics annotation format constants.
pub mod annotations {
    /// Two-character prefix wrapping an annotation number, as in `**1**`.
    pub const MARK_DELIMITER: &str = "**";
}
