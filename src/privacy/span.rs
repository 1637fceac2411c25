//! Spans and detections produced by the scanners

use std::ops::Range;

use serde::Serialize;

use super::catalog::Category;

/// A range of the input identified as one category
///
/// `start` and `end` are byte offsets on UTF-8 character boundaries,
/// `start < end`, and `text` is the slice they cover.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Span {
    pub category: Category,
    pub start: usize,
    pub end: usize,
    pub text: String,
}

impl Span {
    /// Build a span over `source[start..end]`
    ///
    /// Returns `None` for empty or out-of-bounds ranges and for ranges
    /// that do not fall on character boundaries.
    pub fn new(category: Category, source: &str, start: usize, end: usize) -> Option<Self> {
        if start >= end {
            return None;
        }
        source.get(start..end).map(|text| Self {
            category,
            start,
            end,
            text: text.to_string(),
        })
    }

    /// Length in characters, the measure used to pick the longest match
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Whether the half-open ranges share at least one byte
    pub fn overlaps(&self, other: &Span) -> bool {
        ranges_overlap(self.range(), other.range())
    }
}

/// A span paired with the text that will replace it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Detection {
    #[serde(flatten)]
    pub span: Span,
    pub replacement: &'static str,
}

impl Detection {
    pub fn new(span: Span) -> Self {
        let replacement = span.category.placeholder();
        Self { span, replacement }
    }

    pub fn category(&self) -> Category {
        self.span.category
    }

    pub fn start(&self) -> usize {
        self.span.start
    }

    pub fn end(&self) -> usize {
        self.span.end
    }
}

pub(crate) fn ranges_overlap(a: Range<usize>, b: Range<usize>) -> bool {
    a.start < b.end && b.start < a.end
}
