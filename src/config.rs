//! Application configuration.
//!
//! Handles loading configuration from environment variables and .env files.

use dotenv::dotenv;
use std::env;
use std::path::{Path, PathBuf};

use crate::constants::paths::{INDEX_FILE, LYRICS_DIR};
use crate::error::{Error, Result};

/// Configuration for the application.
#[derive(Debug, Clone)]
pub struct Config {
    /// The application name
    app_name: String,
    /// The application version
    app_version: String,
    /// Project root; relative defaults resolve against it
    pub root: PathBuf,
    /// Albums/songs metadata index file
    pub index_path: PathBuf,
    /// Directory of `<file_id>.txt` lyrics files
    pub lyrics_dir: PathBuf,
    /// Skip songs whose lyrics file is missing instead of aborting
    pub skip_missing_lyrics: bool,
}

impl Config {
    /// Get the application name.
    #[must_use]
    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    /// Get the application version.
    #[must_use]
    pub fn app_version(&self) -> &str {
        &self.app_version
    }

    /// Configuration rooted at `root` with the default project layout.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            index_path: root.join(INDEX_FILE),
            lyrics_dir: root.join(LYRICS_DIR),
            root,
            ..Self::default()
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_name: env!("CARGO_PKG_NAME").to_string(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            root: PathBuf::from("."),
            index_path: PathBuf::from(INDEX_FILE),
            lyrics_dir: PathBuf::from(LYRICS_DIR),
            skip_missing_lyrics: false,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn load() -> Result<Self> {
        // Try to load .env file if present
        dotenv().ok();

        let root = env::var("LYRICBOOK_ROOT").map_or_else(|_| PathBuf::from("."), |p| expand(&p));
        let mut config = Self::with_root(root);

        if let Ok(path) = env::var("LYRICBOOK_INDEX") {
            config.index_path = config.resolve(&expand(&path));
        }

        if let Ok(path) = env::var("LYRICBOOK_LYRICS_DIR") {
            config.lyrics_dir = config.resolve(&expand(&path));
        }

        if let Ok(flag) = env::var("LYRICBOOK_SKIP_MISSING") {
            config.skip_missing_lyrics = parse_flag(&flag).ok_or_else(|| {
                Error::config(
                    format!("LYRICBOOK_SKIP_MISSING has unrecognised value {flag:?}"),
                    "Use true/false, yes/no, or 1/0",
                )
            })?;
        }

        Ok(config)
    }

    /// Resolve a path against the project root unless it is absolute
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }
}

fn expand(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).to_string())
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    #[test]
    fn default_layout_hangs_off_root() {
        let config = Config::with_root("/srv/lyrics");
        assert_eq!(config.index_path, PathBuf::from("/srv/lyrics/albums_and_songs_index.json"));
        assert_eq!(config.lyrics_dir, PathBuf::from("/srv/lyrics/songs/txt"));
        assert!(!config.skip_missing_lyrics);
        assert_eq!(config.app_name(), "lyricbook");
        assert_eq!(config.app_version(), env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn relative_paths_resolve_against_root() {
        let config = Config::with_root("/srv/lyrics");
        assert_eq!(config.resolve(Path::new("other/index.json")), PathBuf::from("/srv/lyrics/other/index.json"));
        assert_eq!(config.resolve(Path::new("/abs/index.json")), PathBuf::from("/abs/index.json"));
    }

    #[test]
    fn flags_parse_common_spellings() {
        assert_eq!(parse_flag("Yes"), Some(true));
        assert_eq!(parse_flag("0"), Some(false));
        assert_eq!(parse_flag("maybe"), None);
    }
}
