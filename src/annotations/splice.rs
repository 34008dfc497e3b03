//! Re-inserting reference markup at mark offsets.
//!
//! Renderers either walk [`segments`] and emit each piece in one pass, or
//! call [`splice_marks`] with a closure producing the markup for a mark.
//! Both avoid mutating a string in place; [`insertion_points`] gives the
//! equivalent absolute positions for callers that do insert in place.

use super::marks::AnnotationMark;

/// A piece of a rendered line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    /// Literal line text.
    Text(&'a str),
    /// Position where a mark's reference markup goes.
    Mark(&'a AnnotationMark),
}

/// Split `text` into alternating literal and mark segments, left to right.
///
/// Marks are taken in offset order (stable for equal offsets); offsets past
/// the end of the text attach to the end.
pub fn segments<'a>(text: &'a str, marks: &'a [AnnotationMark]) -> Vec<Segment<'a>> {
    let mut ordered: Vec<&AnnotationMark> = marks.iter().collect();
    ordered.sort_by_key(|m| m.offset);

    let mut out = Vec::with_capacity(ordered.len() * 2 + 1);
    let mut last = 0;

    for mark in ordered {
        let boundary = boundary_at(text, mark.offset);
        if boundary > last {
            out.push(Segment::Text(&text[last..boundary]));
        }
        out.push(Segment::Mark(mark));
        last = boundary;
    }

    if last < text.len() {
        out.push(Segment::Text(&text[last..]));
    }
    out
}

/// Byte index of the char offset `offset`, clamped to the end of `text`.
fn boundary_at(text: &str, offset: usize) -> usize {
    text.char_indices().nth(offset).map_or(text.len(), |(i, _)| i)
}

/// Render `text` with `render(mark)` inserted at each mark.
pub fn splice_marks<F>(text: &str, marks: &[AnnotationMark], mut render: F) -> String
where
    F: FnMut(&AnnotationMark) -> String,
{
    let mut out = String::with_capacity(text.len());
    for segment in segments(text, marks) {
        match segment {
            Segment::Text(s) => out.push_str(s),
            Segment::Mark(mark) => out.push_str(&render(mark)),
        }
    }
    out
}

/// Absolute character positions for in-place insertion: each offset is
/// shifted right by the lengths of all markup inserted before it.
///
/// `offsets` must be ascending; `markup_lens[i]` is the character length of
/// the markup inserted at `offsets[i]`.
pub fn insertion_points(offsets: &[usize], markup_lens: &[usize]) -> Vec<usize> {
    let mut shift = 0;
    offsets
        .iter()
        .zip(markup_lens)
        .map(|(&offset, &len)| {
            let at = offset + shift;
            shift += len;
            at
        })
        .collect()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    fn mark(number: u32, offset: usize) -> AnnotationMark {
        AnnotationMark { number, offset }
    }

    #[test]
    fn splice_reproduces_surrounding_text() {
        let marks = [mark(1, 6)];
        let out = splice_marks("Hello  world", &marks, |m| format!("<sup>{}</sup>", m.number));
        assert_eq!(out, "Hello <sup>1</sup> world");
    }

    #[test]
    fn adjacent_insertions_shift() {
        assert_eq!(insertion_points(&[4, 4], &[9, 9]), [4, 13]);
        assert_eq!(insertion_points(&[2, 5, 8], &[3, 4, 1]), [2, 8, 15]);
    }

    #[test]
    fn splice_agrees_with_shifted_in_place_insertion() {
        let text = "abcdefgh";
        let marks = [mark(1, 4), mark(2, 4), mark(3, 6)];
        let render = |m: &AnnotationMark| format!("[{}]", m.number);

        let mut in_place: Vec<char> = text.chars().collect();
        let lens: Vec<usize> = marks.iter().map(|m| render(m).chars().count()).collect();
        let offsets: Vec<usize> = marks.iter().map(|m| m.offset).collect();
        for (m, at) in marks.iter().zip(insertion_points(&offsets, &lens)) {
            for (k, c) in render(m).chars().enumerate() {
                in_place.insert(at + k, c);
            }
        }

        let expected: String = in_place.into_iter().collect();
        assert_eq!(expected, "abcd[1][2]ef[3]gh");
        assert_eq!(splice_marks(text, &marks, render), expected);
    }

    #[test]
    fn segments_handle_multibyte_text_and_end_offsets() {
        let marks = [mark(1, 5), mark(2, 99)];
        let segs = segments("Señor, señor", &marks);
        assert_eq!(
            segs,
            [
                Segment::Text("Señor"),
                Segment::Mark(&marks[0]),
                Segment::Text(", señor"),
                Segment::Mark(&marks[1]),
            ]
        );
    }
}
