//! Title ordering and album list phrasing for index consumers.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{Error, Result};

/// Regex matching a leading article in a lowercased title.
#[allow(clippy::expect_used)]
static RE_ARTICLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(the|a) ").expect("valid regex: RE_ARTICLE")
});

/// Sort key for a title: surrounding parentheses stripped, lowercased, and a
/// leading "the " or "a " removed.
pub fn clean_title(title: &str) -> String {
    let lowered = title.trim_matches(|c| c == '(' || c == ')').to_lowercase();
    RE_ARTICLE.replace(&lowered, "").into_owned()
}

/// First character of the cleaned title, used to bucket an index by letter.
pub fn title_index_letter(title: &str) -> Option<char> {
    clean_title(title).chars().next()
}

/// Sort titles by their cleaned form, optionally keeping only those whose
/// cleaned form starts with `letter` (case-insensitive).
pub fn sort_titles<S: AsRef<str>>(titles: &[S], letter: Option<char>) -> Result<Vec<&str>> {
    if titles.is_empty() {
        return Err(Error::Msg("Cannot sort an empty list of titles".to_string()));
    }

    let mut sorted: Vec<&str> = titles
        .iter()
        .map(AsRef::as_ref)
        .filter(|title| {
            letter.is_none_or(|l| title_index_letter(title) == Some(l.to_ascii_lowercase()))
        })
        .collect();
    sorted.sort_by_cached_key(|title| clean_title(title));
    Ok(sorted)
}

/// Join names as prose: `A`, `A and B`, `A, B, and C`.
pub fn and_join<S: AsRef<str>>(names: &[S]) -> String {
    match names {
        [] => String::new(),
        [one] => one.as_ref().to_string(),
        [first, second] => format!("{} and {}", first.as_ref(), second.as_ref()),
        [init @ .., penultimate, last] => {
            let mut parts: Vec<&str> = init.iter().map(AsRef::as_ref).collect();
            let tail = format!("{}, and {}", penultimate.as_ref(), last.as_ref());
            parts.push(&tail);
            parts.join(", ")
        }
    }
}
