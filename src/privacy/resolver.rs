//! Merge scanner output into one non-overlapping detection set

use std::cmp::Reverse;

use super::span::Detection;

/// Resolve competing detections and order them for replacement
///
/// Longest span, counted in characters, wins. A 〒 mark or a kanji weighs
/// the same as an ASCII digit. Between equally long spans the earlier start wins,
/// and over the same range the earlier-registered category wins. Every
/// detection overlapping a winner is dropped. The result is sorted by
/// descending start, ready for back-to-front replacement.
pub fn resolve(mut detections: Vec<Detection>) -> Vec<Detection> {
    if detections.len() < 2 {
        return detections;
    }

    detections.sort_by_key(|d| (Reverse(d.span.char_len()), d.start(), d.category().rank()));

    let mut kept: Vec<Detection> = Vec::with_capacity(detections.len());
    for candidate in detections {
        match kept.iter().find(|k| k.span.overlaps(&candidate.span)) {
            Some(winner) => {
                tracing::debug!(
                    dropped = candidate.category().id(),
                    start = candidate.start(),
                    end = candidate.end(),
                    kept = winner.category().id(),
                    "overlapping detection dropped"
                );
            }
            None => kept.push(candidate),
        }
    }

    sort_for_replacement(&mut kept);
    kept
}

/// Descending start order; ties fall back to registration order
pub fn sort_for_replacement(detections: &mut [Detection]) {
    detections.sort_by_key(|d| (Reverse(d.start()), d.category().rank()));
}
