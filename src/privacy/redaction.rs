//! Redaction applier and the masking facade
//!
//! Scanner output is resolved into non-overlapping detections and spliced
//! into the text back to front.

use serde::{Deserialize, Serialize};

use super::catalog::{Catalog, Category};
use super::resolver;
use super::scanner;
use super::span::Detection;
use crate::utils::{char_offset, truncate, PREVIEW_LEN};

/// Replace each detection with its placeholder
///
/// Detections are applied from the rightmost start to the leftmost, so an
/// edit never moves the offsets of a detection still waiting to be applied.
/// A detection that is out of bounds, splits a character, or overlaps one
/// already applied is skipped and the text under it is left as is.
pub fn apply(text: &str, detections: &[Detection]) -> String {
    let mut ordered: Vec<&Detection> = detections.iter().collect();
    ordered.sort_by_key(|d| (std::cmp::Reverse(d.start()), d.category().rank()));

    let mut masked = text.to_string();
    // start of the leftmost applied edit; bytes from here on are already rewritten
    let mut edited_from: Option<usize> = None;

    for detection in ordered {
        let range = detection.span.range();
        let valid = range.start < range.end
            && text.get(range.clone()) == Some(detection.span.text.as_str());
        let clashes = edited_from.is_some_and(|from| range.end > from);

        if !valid || clashes {
            tracing::debug!(
                category = detection.category().id(),
                start = range.start,
                end = range.end,
                "detection skipped"
            );
            continue;
        }

        edited_from = Some(range.start);
        masked.replace_range(range, detection.replacement);
    }

    masked
}

/// A masking event for the audit trail
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaskEvent {
    /// Category of the masked span
    pub category: Category,
    /// Byte range in the original text (start, end)
    pub byte_range: (usize, usize),
    /// Character range in the original text (start, end)
    pub char_range: (usize, usize),
    /// Placeholder written in its place
    pub replacement: String,
    /// ISO8601 timestamp
    pub timestamp: String,
    /// Preview of what was matched (first 10 chars, then ...)
    pub preview: String,
}

/// Result of masking with audit trail
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaskResult {
    /// Masked text
    pub text: String,
    /// One event per masked span, in text order
    pub events: Vec<MaskEvent>,
    /// Total number of masked spans
    pub mask_count: usize,
}

/// Personal-information masker for journal entries
///
/// Holds no mutable state; every call scans, resolves and replaces afresh
/// against the read-only catalog.
#[derive(Debug, Clone, Copy)]
pub struct Masker {
    catalog: &'static Catalog,
}

impl Masker {
    /// Create a masker over the builtin catalog
    pub fn new() -> Self {
        Self {
            catalog: Catalog::global(),
        }
    }

    /// Resolved detections in text order
    pub fn detect(&self, text: &str) -> Vec<Detection> {
        let mut detections = resolver::resolve(scanner::scan_all(text, self.catalog));
        detections.reverse();
        detections
    }

    /// Mask personal information in text
    pub fn mask(&self, text: &str) -> String {
        let detections = resolver::resolve(scanner::scan_all(text, self.catalog));
        if detections.is_empty() {
            return text.to_string();
        }
        apply(text, &detections)
    }

    /// Mask personal information with full audit trail
    pub fn mask_with_audit(&self, text: &str) -> MaskResult {
        self.mask_with_audit_preview(text, PREVIEW_LEN)
    }

    /// Like [`Masker::mask_with_audit`], with a custom preview length
    pub fn mask_with_audit_preview(&self, text: &str, preview_len: usize) -> MaskResult {
        let timestamp = chrono::Utc::now().to_rfc3339();
        let detections = self.detect(text);

        let events: Vec<MaskEvent> = detections
            .iter()
            .map(|d| MaskEvent {
                category: d.category(),
                byte_range: (d.start(), d.end()),
                char_range: (char_offset(text, d.start()), char_offset(text, d.end())),
                replacement: d.replacement.to_string(),
                timestamp: timestamp.clone(),
                preview: truncate(&d.span.text, preview_len),
            })
            .collect();

        let mask_count = events.len();
        let text = apply(text, &detections);

        MaskResult {
            text,
            events,
            mask_count,
        }
    }

    /// Get list of resolved matches with their categories, in text order
    pub fn find_personal_info(&self, text: &str) -> Vec<(Category, String)> {
        self.detect(text)
            .into_iter()
            .map(|d| (d.span.category, d.span.text))
            .collect()
    }
}

impl Default for Masker {
    fn default() -> Self {
        Self::new()
    }
}

/// Mask every email, phone number, URL, postal code, person name and
/// place name in `text` with its category placeholder
pub fn mask_personal_info(text: &str) -> String {
    Masker::new().mask(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::privacy::span::Span;

    fn detection(category: Category, text: &str, start: usize, end: usize) -> Detection {
        Detection::new(Span::new(category, text, start, end).unwrap())
    }

    #[test]
    fn test_person_and_place() {
        let output = mask_personal_info("佐藤太郎さんと東京都で会った");
        assert_eq!(output, "友人と近所で会った");
    }

    #[test]
    fn test_empty_text() {
        assert_eq!(mask_personal_info(""), "");
    }

    #[test]
    fn test_no_false_positives() {
        let input = "今日はとても良い天気だった。散歩して、本を読んだ。";
        assert_eq!(mask_personal_info(input), input);

        let input2 = "I walked 3 km and read 120 pages";
        assert_eq!(mask_personal_info(input2), input2);
    }

    #[test]
    fn test_email_only() {
        let input = "  連絡先: hanako.s@example.com 。";
        let output = mask_personal_info(input);
        assert_eq!(output, "  連絡先: [メールアドレス] 。");
    }

    #[test]
    fn test_offset_safety_mixed_lengths() {
        let input = "電話は090-1234-5678、メールはa@b.jpです";
        let output = mask_personal_info(input);
        assert_eq!(output, "電話は[電話番号]、メールは[メールアドレス]です");
    }

    #[test]
    fn test_url_and_postal_code() {
        let input = "〒100-0001 の地図 https://maps.example.com/x を見た";
        let output = mask_personal_info(input);
        assert_eq!(output, "[郵便番号] の地図 [URL] を見た");
    }

    #[test]
    fn test_longest_place_masked_once() {
        let output = mask_personal_info("大村市水主町を歩いた");
        assert_eq!(output, "近所を歩いた");
    }

    #[test]
    fn test_phone_beats_embedded_postal_code() {
        // the postal pattern also matches "090-1234"
        let output = mask_personal_info("番号090-1234-5678");
        assert_eq!(output, "番号[電話番号]");
    }

    #[test]
    fn test_apply_in_any_input_order() {
        let text = "abc def ghi";
        let detections = vec![
            detection(Category::Url, text, 0, 3),
            detection(Category::Email, text, 8, 11),
            detection(Category::Phone, text, 4, 7),
        ];
        assert_eq!(apply(text, &detections), "[URL] [電話番号] [メールアドレス]");
    }

    #[test]
    fn test_apply_same_start_single_winner() {
        let text = "0123456789";
        let detections = vec![
            detection(Category::PostalCode, text, 0, 7),
            detection(Category::Phone, text, 0, 10),
        ];
        // Phone is registered first, so it is applied and PostalCode skipped
        assert_eq!(apply(text, &detections), "[電話番号]");
    }

    #[test]
    fn test_apply_skips_overlap() {
        let text = "0123456789";
        let detections = vec![
            detection(Category::Phone, text, 0, 6),
            detection(Category::PostalCode, text, 4, 10),
        ];
        assert_eq!(apply(text, &detections), "0123[郵便番号]");
    }

    #[test]
    fn test_apply_skips_stale_detection() {
        let original = "佐藤太郎さん";
        let stale = detection(Category::PersonName, original, 0, 18);
        assert_eq!(apply("短い", &[stale.clone()]), "短い");
        assert_eq!(apply(original, &[stale]), "友人");
    }

    #[test]
    fn test_mask_with_audit() {
        let masker = Masker::new();
        let input = "田中一郎様から 03-1234-5678 に電話";
        let result = masker.mask_with_audit(input);

        assert_eq!(result.mask_count, 2);
        assert_eq!(result.text, "友人から [電話番号] に電話");
        assert_eq!(result.events[0].category, Category::PersonName);
        assert_eq!(result.events[0].char_range, (0, 5));
        assert_eq!(result.events[0].byte_range, (0, 15));
        assert_eq!(result.events[1].category, Category::Phone);
        assert_eq!(result.events[1].char_range, (8, 20));
        assert_eq!(result.events[1].preview, "03-1234-56...");
    }

    #[test]
    fn test_postal_mark_does_not_outweigh_phone() {
        let masker = Masker::new();
        assert_eq!(
            masker.find_personal_info("〒0312345678"),
            vec![(Category::Phone, "0312345678".to_string())]
        );
        assert_eq!(masker.mask("〒0312345678"), "〒[電話番号]");
    }

    #[test]
    fn test_find_personal_info_in_text_order() {
        let masker = Masker::new();
        let found = masker.find_personal_info("新宿で鈴木花子さんに会った");
        assert_eq!(
            found,
            vec![
                (Category::PlaceName, "新宿".to_string()),
                (Category::PersonName, "鈴木花子さん".to_string()),
            ]
        );
    }
}
