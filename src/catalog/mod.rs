//! Record loader for the albums/songs metadata index.
//!
//! Turns the comment-stripped index file into typed [`Album`]/[`Song`]
//! values, each album carrying its songs in track order, with albums
//! sorted by release date.

/// Release date parsing
pub mod date;
/// Index file reading
pub mod loader;
/// Typed album and song models
pub mod model;
/// Raw serde shapes of index records
mod record;

pub use loader::{load_index, parse_index};
pub use model::{Album, Credits, Song, SourceRef};
