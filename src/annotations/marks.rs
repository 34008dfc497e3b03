//! Inline annotation marks within a single lyric line.
//!
//! A mark is `**<digits>**` embedded in the line. Marks are zero-width once
//! stripped: the offset recorded for a mark is the character position in
//! the stripped line where its reference markup belongs.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::constants::annotations::MARK_DELIMITER;
use crate::error::{Error, Result};

/// Regex matching an inline annotation mark such as `**12**`.
#[allow(clippy::expect_used)]
pub(crate) static RE_MARK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\*\*([0-9]+)\*\*").expect("valid regex: RE_MARK")
});

/// A zero-width footnote reference inside a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AnnotationMark {
    /// Footnote number the mark refers to.
    pub number: u32,
    /// Character offset in the mark-stripped line.
    pub offset: usize,
}

/// One lyric line with its marks stripped out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Line {
    /// Rendering text, marks removed.
    pub text: String,
    /// Insertion points, ascending by offset.
    pub marks: Vec<AnnotationMark>,
}

impl Line {
    /// A line without marks.
    pub fn plain(text: impl Into<String>) -> Self {
        Self { text: text.into(), marks: Vec::new() }
    }
}

/// Strip the marks from `raw` and record where each one sat.
///
/// `line_no` is the 1-based line number used in error reports.
pub(crate) fn parse_line(raw: &str, line_no: usize) -> Result<Line> {
    let numbers: Vec<&str> = RE_MARK
        .captures_iter(raw)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .collect();

    if numbers.is_empty() {
        return Ok(Line::plain(raw));
    }

    // The offset walk only handles one mark per line correctly.
    if numbers.len() > 1 {
        return Err(Error::MultipleAnnotationsPerLineUnsupported {
            line: line_no,
            text: raw.to_string(),
            count: numbers.len(),
        });
    }

    // A number too large for u32 can never be a valid footnote reference.
    let parsed = numbers
        .iter()
        .map(|n| {
            n.parse::<u32>().map_err(|_| Error::AnnotationCountMismatch {
                line: line_no,
                text: raw.to_string(),
                expected: Vec::new(),
            })
        })
        .collect::<Result<Vec<u32>>>()?;

    let mismatch = || Error::AnnotationCountMismatch {
        line: line_no,
        text: raw.to_string(),
        expected: parsed.clone(),
    };

    let offsets = walk_offsets(raw, &numbers).ok_or_else(mismatch)?;
    if offsets != match_offsets(raw) {
        // A stray delimiter elsewhere in the line shifted the walk.
        return Err(mismatch());
    }

    Ok(Line {
        text: RE_MARK.replace_all(raw, "").into_owned(),
        marks: parsed
            .into_iter()
            .zip(offsets)
            .map(|(number, offset)| AnnotationMark { number, offset })
            .collect(),
    })
}

/// Walk the delimiter-split segments, treating expected mark numbers as
/// zero-width. Returns `None` unless every number was found in a mark slot.
fn walk_offsets(raw: &str, numbers: &[&str]) -> Option<Vec<usize>> {
    let mut offsets = Vec::with_capacity(numbers.len());
    let mut offset = 0;

    for (position, segment) in raw.split(MARK_DELIMITER).enumerate() {
        let in_mark_slot = position % 2 == 1;
        if in_mark_slot && numbers.get(offsets.len()) == Some(&segment) {
            offsets.push(offset);
            continue;
        }
        offset += segment.chars().count();
    }

    (offsets.len() == numbers.len()).then_some(offsets)
}

/// Offsets derived from the regex matches: characters before each match,
/// minus the characters of earlier marks.
fn match_offsets(raw: &str) -> Vec<usize> {
    let mut removed = 0;
    RE_MARK
        .find_iter(raw)
        .map(|m| {
            let offset = raw[..m.start()].chars().count() - removed;
            removed += m.as_str().chars().count();
            offset
        })
        .collect()
}
