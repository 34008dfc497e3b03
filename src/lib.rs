//! `lyricbook` - discography song index and annotated lyrics alignment.
//!
//! Loads album/song metadata, resolves each song's versions across albums,
//! and aligns footnote annotations in lyrics text for downstream renderers.

// Re-export public modules for use in integration tests and as a library
pub mod annotations;
pub mod catalog;
pub mod config;
pub mod constants;
pub mod error;
pub mod library;
pub mod resolver;
pub mod titles;
pub mod types;

pub use annotations::{align, AlignedLyrics};
pub use error::{Error, Result};
pub use resolver::{resolve, SongIndex};
