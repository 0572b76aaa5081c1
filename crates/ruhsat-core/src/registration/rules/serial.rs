//! Registration document serial (belge seri / no) extraction.
//!
//! The serial is a 2-letter series plus a 6-digit number. Only values near the
//! `BELGE` label or the common `HT` series are accepted; the document carries
//! other letter/number sequences that share the shape.

use serde::{Deserialize, Serialize};

use super::patterns::{SERIAL_HT, SERIAL_LABELED, SERIAL_LOOSE, SERIAL_SERIES_NO};
use super::{run_chain, Field, FieldCandidate, FieldExtractor};
use crate::document::TranscribedDocument;

/// Characters after the first `BELGE` searched by the proximity rule.
const PROXIMITY_WINDOW_CHARS: usize = 100;

/// Number labels that share the series shape.
const NUMBER_LABELS: &[&str] = &["NO", "NR"];

/// Series and number printed on the registration document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentSerial {
    pub series: String,
    pub number: String,
}

impl DocumentSerial {
    /// Build a serial if both parts have the right shape. A number label
    /// (`NO`, `NR`) is never a series.
    pub fn new(series: &str, number: &str) -> Option<Self> {
        let series_ok = series.len() == 2
            && series.bytes().all(|b| b.is_ascii_uppercase())
            && !NUMBER_LABELS.contains(&series);
        let number_ok = number.len() == 6 && number.bytes().all(|b| b.is_ascii_digit());

        (series_ok && number_ok).then(|| Self {
            series: series.to_string(),
            number: number.to_string(),
        })
    }
}

impl std::fmt::Display for DocumentSerial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.series, self.number)
    }
}

/// Document serial extractor.
#[derive(Default)]
pub struct SerialExtractor;

impl SerialExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Last resort: first 2-letter token and first 6-digit token in the
    /// window after `BELGE`.
    fn proximity_match(&self, text: &str, rank: usize) -> Option<FieldCandidate<DocumentSerial>> {
        let start = text.find("BELGE")? + "BELGE".len();
        let window: String = text[start..].chars().take(PROXIMITY_WINDOW_CHARS).collect();

        let tokens: Vec<&str> = window
            .split(|c: char| !c.is_alphanumeric())
            .filter(|t| !t.is_empty())
            .collect();

        let series = tokens
            .iter()
            .find(|t| DocumentSerial::new(t, "000000").is_some())?;
        let number = tokens
            .iter()
            .find(|t| t.len() == 6 && t.bytes().all(|b| b.is_ascii_digit()))?;

        let serial = DocumentSerial::new(series, number)?;
        let end = start + window.len();
        Some(
            FieldCandidate::new(Field::DocumentSerial, serial, rank, window.trim())
                .with_position(start, end),
        )
    }
}

impl FieldExtractor for SerialExtractor {
    type Value = DocumentSerial;

    fn candidates(&self, doc: &TranscribedDocument, first_only: bool) -> Vec<FieldCandidate<DocumentSerial>> {
        let text = doc.normalized.as_str();
        let patterns = [&*SERIAL_LABELED, &*SERIAL_SERIES_NO, &*SERIAL_LOOSE, &*SERIAL_HT];

        let mut results = run_chain(Field::DocumentSerial, text, &patterns, first_only, |_, caps| {
            DocumentSerial::new(&caps[1], &caps[2])
        });

        if results.is_empty() || !first_only {
            if let Some(found) = self.proximity_match(text, patterns.len()) {
                results.push(found);
            }
        }

        results
    }
}

/// Extract the document serial from text.
pub fn extract_serial(text: &str) -> Option<DocumentSerial> {
    SerialExtractor::new()
        .extract(&TranscribedDocument::new(text))
        .map(|m| m.value)
}
