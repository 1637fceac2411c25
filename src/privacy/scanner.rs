//! Per-category scanners
//!
//! Each scanner looks at the whole text independently of the others. The
//! results may overlap across categories; [`super::resolver`] sorts that out.

use regex::Regex;

use super::catalog::{Catalog, Category, Gazetteer, PatternKind};
use super::span::{Detection, Span};

/// Find every span of `category` in `text`
pub fn scan(text: &str, category: Category, catalog: &Catalog) -> Vec<Span> {
    match catalog.pattern(category) {
        PatternKind::Regex(regex) => scan_regex(text, category, regex),
        PatternKind::Gazetteer(gazetteer) => scan_gazetteer(text, category, gazetteer),
    }
}

/// Run every scanner and tag each span with its placeholder
pub fn scan_all(text: &str, catalog: &Catalog) -> Vec<Detection> {
    let mut detections = Vec::new();
    if text.is_empty() {
        return detections;
    }

    for category in Category::ALL {
        let spans = scan(text, category, catalog);
        tracing::debug!(category = category.id(), count = spans.len(), "scanned");
        detections.extend(spans.into_iter().map(Detection::new));
    }

    detections
}

/// Non-overlapping regex matches, left to right
///
/// `find_iter` keeps its cursor in the iterator, so every call starts from
/// the beginning of the text.
fn scan_regex(text: &str, category: Category, regex: &Regex) -> Vec<Span> {
    regex
        .find_iter(text)
        .filter_map(|m| Span::new(category, text, m.start(), m.end()))
        .collect()
}

/// Literal occurrences of gazetteer entries, longest entries first
///
/// An occurrence overlapping a span accepted earlier in this scan is
/// rejected, so a longer entry shadows any shorter entry inside it.
fn scan_gazetteer(text: &str, category: Category, gazetteer: &Gazetteer) -> Vec<Span> {
    let mut accepted: Vec<Span> = Vec::new();

    for entry in gazetteer.entries() {
        let mut from = 0;
        while let Some(offset) = text[from..].find(entry) {
            let start = from + offset;
            let end = start + entry.len();

            if let Some(candidate) = Span::new(category, text, start, end) {
                if !accepted.iter().any(|s| s.overlaps(&candidate)) {
                    accepted.push(candidate);
                }
            }

            // step one character so overlapping repeats are still considered
            from = start + next_char_len(&text[start..]);
        }
    }

    accepted.sort_by_key(|s| s.start);
    accepted
}

fn next_char_len(s: &str) -> usize {
    s.chars().next().map_or(1, char::len_utf8)
}
