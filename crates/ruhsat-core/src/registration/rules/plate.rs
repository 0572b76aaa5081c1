//! Licence plate extraction and normalization.

use super::patterns::{PLATE_COMPACT, PLATE_LABELED, PLATE_SHAPE, PLATE_SPACED};
use super::{run_chain, Field, FieldCandidate, FieldExtractor};
use crate::document::TranscribedDocument;

/// Plate field extractor.
#[derive(Default)]
pub struct PlateExtractor;

impl PlateExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl FieldExtractor for PlateExtractor {
    type Value = String;

    fn candidates(&self, doc: &TranscribedDocument, first_only: bool) -> Vec<FieldCandidate<String>> {
        let patterns = [&*PLATE_LABELED, &*PLATE_SPACED, &*PLATE_COMPACT];

        run_chain(Field::Plate, &doc.normalized, &patterns, first_only, |_, caps| {
            normalize_plate(&format!("{}{}{}", &caps[1], &caps[2], &caps[3]))
        })
    }
}

/// Extract a plate from text.
pub fn extract_plate(text: &str) -> Option<String> {
    PlateExtractor::new()
        .extract(&TranscribedDocument::new(text))
        .map(|m| m.value)
}

/// Normalize a plate to `34ABC123` form.
///
/// Spaces and dashes are dropped and letters upper-cased; the result must be
/// 2 digits, 1-3 letters and 2-4 digits, 6-9 characters in total.
pub fn normalize_plate(plate: &str) -> Option<String> {
    let compact: String = plate
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .map(|c| c.to_ascii_uppercase())
        .collect();

    if !(6..=9).contains(&compact.len()) || !PLATE_SHAPE.is_match(&compact) {
        return None;
    }

    Some(compact)
}
