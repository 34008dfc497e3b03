//! Footnote annotation alignment for lyrics text.
//!
//! Lyrics files mark footnotes inline with `**n**` and define them on lines
//! of their own, `**n** note text`. [`align`] separates the two, strips the
//! inline marks, records where each mark sat, and checks that marks and
//! definitions correspond one to one, in order.

/// Inline marks within a line
pub mod marks;
/// Markup re-insertion at mark offsets
pub mod splice;

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::error::{Error, Result};
pub use marks::{AnnotationMark, Line};
pub use splice::{insertion_points, segments, splice_marks, Segment};

/// Regex matching a footnote definition line: `**3** Note text`.
#[allow(clippy::expect_used)]
static RE_FOOTNOTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\*\*([0-9]+)\*\*[ \t]+(.*)$").expect("valid regex: RE_FOOTNOTE")
});

/// A footnote's text and its 1-based position in definition order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FootnoteDefinition {
    /// Position in definition order, starting at 1.
    pub ordinal: usize,
    /// Note text.
    pub text: String,
}

/// A run of consecutive non-blank lyric lines.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Paragraph {
    /// Lines in order.
    pub lines: Vec<Line>,
}

/// Position of a line: paragraph index, then line index within it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct LineIndex {
    /// Zero-based paragraph index.
    pub paragraph: usize,
    /// Zero-based line index within the paragraph.
    pub line: usize,
}

/// One song's lyrics split into paragraphs, with validated footnotes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AlignedLyrics {
    /// Lyric paragraphs, marks stripped.
    pub paragraphs: Vec<Paragraph>,
    /// Footnote definitions in order.
    pub footnotes: Vec<FootnoteDefinition>,
}

impl AlignedLyrics {
    /// Marks per line, for lines carrying at least one mark.
    pub fn marks_by_line(&self) -> BTreeMap<LineIndex, &[AnnotationMark]> {
        self.paragraphs
            .iter()
            .enumerate()
            .flat_map(|(p, paragraph)| {
                paragraph.lines.iter().enumerate().filter(|(_, line)| !line.marks.is_empty()).map(
                    move |(l, line)| (LineIndex { paragraph: p, line: l }, line.marks.as_slice()),
                )
            })
            .collect()
    }

    /// Total number of lyric lines.
    pub fn line_count(&self) -> usize {
        self.paragraphs.iter().map(|p| p.lines.len()).sum()
    }
}

/// Split raw lyrics into paragraphs and footnotes and locate every inline
/// mark.
///
/// Fails when a line carries more than one mark, when a mark cannot be
/// located, or when the marks in document order are not `1..=N` for `N`
/// footnote definitions.
pub fn align(raw: &str) -> Result<AlignedLyrics> {
    let mut paragraphs = Vec::new();
    let mut current = Paragraph::default();
    let mut footnotes: Vec<FootnoteDefinition> = Vec::new();
    let mut numbers = Vec::new();

    for (idx, raw_line) in raw.lines().enumerate() {
        let line = raw_line.trim_end();

        if line.is_empty() {
            if !current.lines.is_empty() {
                paragraphs.push(std::mem::take(&mut current));
            }
            continue;
        }

        if let Some(caps) = RE_FOOTNOTE.captures(line) {
            let ordinal = footnotes.len() + 1;
            let declared = &caps[1];
            if declared.parse::<usize>().ok() != Some(ordinal) {
                tracing::warn!(
                    "Footnote on line {} is numbered {declared} but is definition #{ordinal}",
                    idx + 1
                );
            }
            footnotes.push(FootnoteDefinition { ordinal, text: caps[2].to_string() });
            continue;
        }

        let parsed = marks::parse_line(line, idx + 1)?;
        numbers.extend(parsed.marks.iter().map(|m| m.number));
        current.lines.push(parsed);
    }

    if !current.lines.is_empty() {
        paragraphs.push(current);
    }

    check_numbering(&numbers, footnotes.len())?;
    Ok(AlignedLyrics { paragraphs, footnotes })
}

/// Marker numbers in document order must be exactly `1..=footnotes`.
fn check_numbering(numbers: &[u32], footnotes: usize) -> Result<()> {
    let in_sequence = numbers.len() == footnotes
        && numbers.iter().zip(1u32..).all(|(&n, expected)| n == expected);
    if in_sequence {
        Ok(())
    } else {
        Err(Error::AnnotationNumberingMismatch { found: numbers.to_vec(), footnotes })
    }
}

/// Replace stylized quotes with plain ones.
pub fn standardize_quotes(text: &str) -> String {
    text.replace(['\u{201C}', '\u{201D}'], "\"").replace(['\u{2018}', '\u{2019}'], "'")
}

/// Plain lyrics: footnote definition lines dropped and inline marks removed.
pub fn strip_annotations(text: &str) -> String {
    let kept: Vec<&str> = text.lines().filter(|line| !RE_FOOTNOTE.is_match(line.trim_end())).collect();
    marks::RE_MARK.replace_all(&kept.join("\n"), "").into_owned()
}
