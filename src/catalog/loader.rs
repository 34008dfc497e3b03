//! Index file reading.
//!
//! The index is JSON with `#` comment lines. Both a single array of records
//! and a stream of records (one per line) are accepted.

use std::path::Path;

use serde_json::Value;

use super::model::Album;
use super::record::{RawAlbum, RawRecord};
use crate::constants::index::{ALBUM_TYPE, COMMENT_PREFIX, SONG_TYPE};
use crate::error::{Error, Result};

/// Read the index file and return its albums sorted by release date.
pub fn load_index(path: &Path) -> Result<Vec<Album>> {
    let text = fs_err::read_to_string(path).map_err(|e| Error::io(e, path.to_path_buf()))?;
    let albums = parse_index(&text, Some(path))?;
    tracing::info!("Loaded {} albums from {}", albums.len(), path.display());
    Ok(albums)
}

/// Parse index text into albums sorted ascending by release date. Albums
/// released on the same date keep their order in the file.
pub fn parse_index(text: &str, path: Option<&Path>) -> Result<Vec<Album>> {
    let file = path.map(Path::to_path_buf);
    let stripped = strip_comments(text);

    let mut records = Vec::new();
    for value in serde_json::Deserializer::from_str(&stripped).into_iter::<Value>() {
        match value.map_err(|e| Error::parse(e.to_string(), file.clone()))? {
            Value::Array(items) => records.extend(items),
            other => records.push(other),
        }
    }

    let mut albums = Vec::new();
    for (position, value) in records.into_iter().enumerate() {
        let record: RawRecord = serde_json::from_value(value)
            .map_err(|e| Error::parse(format!("record #{position}: {e}"), file.clone()))?;

        match record.record_type.as_str() {
            ALBUM_TYPE => {
                let raw: RawAlbum = serde_json::from_value(record.metadata)
                    .map_err(|e| Error::parse(format!("album record #{position}: {e}"), file.clone()))?;
                albums.push(Album::from_raw(raw)?);
            }
            SONG_TYPE => {
                // Standalone single-song entries carry no album to attach to yet
                tracing::debug!("Skipping standalone song record #{position}");
            }
            other => {
                return Err(Error::MalformedIndexRecord {
                    position,
                    record_type: other.to_string(),
                });
            }
        }
    }

    if albums.is_empty() {
        return Err(Error::EmptyIndexFile { path: file });
    }

    albums.sort_by_key(|album| album.release_date);
    Ok(albums)
}

fn strip_comments(text: &str) -> String {
    text.lines()
        .filter(|line| !line.starts_with(COMMENT_PREFIX))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    const TWO_ALBUMS: &str = r#"# Albums are listed out of order on purpose
[
  {"type": "album", "metadata": {"name": "Highway 61 Revisited", "file_id": "highway_61_revisited",
    "release_date": "August 30, 1965", "songs": {"Like a Rolling Stone": {"index": 1, "file_id": "like_a_rolling_stone"}}}},
  {"type": "song", "metadata": {"name": "Mixed-Up Confusion"}},
  {"type": "album", "metadata": {"name": "Bob Dylan", "file_id": "bob_dylan",
    "release_date": "March 19, 1962", "songs": {"Talkin' New York": {"index": 1, "file_id": "talkin_new_york"}}}}
]
"#;

    #[test]
    fn sorts_albums_by_release_date() {
        let albums = parse_index(TWO_ALBUMS, None).unwrap();
        let names: Vec<_> = albums.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, ["Bob Dylan", "Highway 61 Revisited"]);
    }

    #[test]
    fn same_release_date_keeps_file_order() {
        let text = concat!(
            r#"{"type": "album", "metadata": {"name": "Self Portrait", "file_id": "self_portrait", "release_date": "June 8, 1970", "songs": {}}}"#,
            "\n",
            r#"{"type": "album", "metadata": {"name": "Nashville Skyline", "file_id": "nashville_skyline", "release_date": "April 9, 1969", "songs": {}}}"#,
            "\n",
            r#"{"type": "album", "metadata": {"name": "New Morning", "file_id": "new_morning", "release_date": "June 8, 1970", "songs": {}}}"#,
            "\n",
        );
        let albums = parse_index(text, None).unwrap();
        let names: Vec<_> = albums.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, ["Nashville Skyline", "Self Portrait", "New Morning"]);
    }

    #[test]
    fn accepts_json_lines() {
        let text = concat!(
            "# one record per line\n",
            r#"{"type": "album", "metadata": {"name": "Infidels", "file_id": "infidels", "release_date": "October 27, 1983", "songs": {}}}"#,
            "\n",
            r#"{"type": "album", "metadata": {"name": "Slow Train Coming", "file_id": "slow_train_coming", "release_date": "August 20, 1979", "songs": {}}}"#,
            "\n",
        );
        let albums = parse_index(text, None).unwrap();
        assert_eq!(albums.len(), 2);
        assert_eq!(albums[0].name, "Slow Train Coming");
    }

    #[test]
    fn rejects_unknown_record_type() {
        let text = r#"[{"type": "compilation", "metadata": {}}]"#;
        match parse_index(text, None) {
            Err(Error::MalformedIndexRecord { position, record_type }) => {
                assert_eq!(position, 0);
                assert_eq!(record_type, "compilation");
            }
            other => panic!("expected MalformedIndexRecord, got {other:?}"),
        }
    }

    #[test]
    fn empty_index_is_an_error() {
        assert!(matches!(
            parse_index("# nothing here\n[]\n", None),
            Err(Error::EmptyIndexFile { .. })
        ));
        assert!(matches!(
            parse_index(r#"[{"type": "song", "metadata": {}}]"#, None),
            Err(Error::EmptyIndexFile { .. })
        ));
    }

    #[test]
    fn invalid_json_is_a_parse_error() {
        assert!(matches!(parse_index("[{\"type\": ", None), Err(Error::Parse { .. })));
    }
}
