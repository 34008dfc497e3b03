//! Release date parsing.
//!
//! Dates look like `March 19, 1962`, optionally followed by descriptive
//! text (`August 8, 1964 (recorded June 9, 1964)`) which is discarded.

use chrono::NaiveDate;

use crate::constants::index::DATE_FORMAT;
use crate::error::{Error, Result};

/// Parse an album release date, using only its first three words.
pub fn parse_release_date(album: &str, value: &str) -> Result<NaiveDate> {
    let words: Vec<&str> = value.split_whitespace().take(3).collect();
    if words.len() < 3 {
        return Err(invalid(album, value));
    }

    NaiveDate::parse_from_str(&words.join(" "), DATE_FORMAT).map_err(|_| invalid(album, value))
}

fn invalid(album: &str, value: &str) -> Error {
    Error::InvalidReleaseDate { album: album.to_string(), value: value.to_string() }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    #[test]
    fn parses_plain_date() {
        let date = parse_release_date("Bob Dylan", "March 19, 1962").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(1962, 3, 19).unwrap());
    }

    #[test]
    fn discards_trailing_text() {
        let date = parse_release_date("Another Side", "August 8, 1964 (recorded June 9, 1964)").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(1964, 8, 8).unwrap());
    }

    #[test]
    fn rejects_short_or_garbled_dates() {
        assert!(matches!(
            parse_release_date("X", "1962"),
            Err(Error::InvalidReleaseDate { .. })
        ));
        assert!(parse_release_date("X", "Smarch 40, 1962").is_err());
    }
}
