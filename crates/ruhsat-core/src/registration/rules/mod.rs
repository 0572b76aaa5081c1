//! Rule-based field extractors for registration documents.
//!
//! Every field owns a hand-ordered list of patterns, most specific (a labeled
//! form field) first and bare shape matches last. Each match is offered to
//! the field validator and the first accepted candidate wins.

pub mod address;
pub mod identity;
pub mod model_year;
pub mod names;
pub mod patterns;
pub mod plate;
pub mod serial;
pub mod usage;
pub mod vehicle;

pub use address::{decompose_address, validate_address, AddressExtractor, AddressParts};
pub use identity::{extract_identity_number, validate_identity_number, IdentityNumberExtractor};
pub use model_year::{extract_model_year, ModelYearExtractor};
pub use names::{validate_name, NameExtractor, NamePart};
pub use plate::{extract_plate, normalize_plate, PlateExtractor};
pub use serial::{extract_serial, DocumentSerial, SerialExtractor};
pub use usage::{extract_usage_type, UsageTypeExtractor};
pub use vehicle::{VehicleLabel, VehicleLabelExtractor};

use regex::{Captures, Regex};

use crate::document::{fold_ascii, TranscribedDocument};

/// Fields the extractor knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    IdentityNumber,
    FirstName,
    LastName,
    Address,
    Plate,
    DocumentSerial,
    ModelYear,
    UsageType,
    BrandLabel,
    ModelLabel,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::IdentityNumber => "identity_number",
            Field::FirstName => "first_name",
            Field::LastName => "last_name",
            Field::Address => "address",
            Field::Plate => "plate",
            Field::DocumentSerial => "document_serial",
            Field::ModelYear => "model_year",
            Field::UsageType => "usage_type",
            Field::BrandLabel => "brand_label",
            Field::ModelLabel => "model_label",
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated value together with where it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldCandidate<T> {
    /// Field the value belongs to.
    pub field: Field,
    /// Accepted value.
    pub value: T,
    /// Index of the pattern that produced it (0 = most specific).
    pub rank: usize,
    /// Source text that was matched.
    pub source: String,
    /// Byte span in the searched text.
    pub position: Option<(usize, usize)>,
}

impl<T> FieldCandidate<T> {
    pub fn new(field: Field, value: T, rank: usize, source: impl Into<String>) -> Self {
        Self {
            field,
            value,
            rank,
            source: source.into(),
            position: None,
        }
    }

    pub fn with_position(mut self, start: usize, end: usize) -> Self {
        self.position = Some((start, end));
        self
    }
}

/// Trait for field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Value;

    /// Validated candidates in rank order. With `first_only` the search
    /// stops at the first accepted one.
    fn candidates(&self, doc: &TranscribedDocument, first_only: bool)
        -> Vec<FieldCandidate<Self::Value>>;

    /// Extract the field from a document.
    fn extract(&self, doc: &TranscribedDocument) -> Option<FieldCandidate<Self::Value>> {
        self.candidates(doc, true).into_iter().next()
    }

    /// Extract every validated candidate.
    fn extract_all(&self, doc: &TranscribedDocument) -> Vec<FieldCandidate<Self::Value>> {
        self.candidates(doc, false)
    }
}

/// Run a prioritized pattern chain over `text`.
///
/// `accept` receives the pattern rank and captures and returns the
/// validated value, or `None` to move on to the next match.
pub(crate) fn run_chain<T>(
    field: Field,
    text: &str,
    patterns: &[&Regex],
    first_only: bool,
    mut accept: impl FnMut(usize, &Captures<'_>) -> Option<T>,
) -> Vec<FieldCandidate<T>> {
    let mut results = Vec::new();

    for (rank, pattern) in patterns.iter().enumerate() {
        for caps in pattern.captures_iter(text) {
            let Some(whole) = caps.get(0) else {
                continue;
            };

            if let Some(value) = accept(rank, &caps) {
                results.push(
                    FieldCandidate::new(field, value, rank, whole.as_str())
                        .with_position(whole.start(), whole.end()),
                );
                if first_only {
                    return results;
                }
            }
        }
    }

    results
}

/// Printed form labels. A value never contains one of these words.
const LABEL_WORDS: &[&str] = &[
    "AD", "ADI", "SOYAD", "SOYADI", "ADRES", "ADRESI", "TICARI", "UNVANI", "UNVAN", "TIP", "TIPI",
    "MARKA", "MARKASI", "MODEL", "MODELI", "YILI", "PLAKA", "PLAKASI", "KIMLIK", "NO", "NUMARASI",
    "VERGI", "BELGE", "SERI", "KULLANIM", "AMACI", "SEKLI", "TURU", "RENGI", "CINSI", "MOTOR",
    "SASI", "SILINDIR", "HACMI", "TESCIL", "TARIHI", "TC", "T.C", "ILI", "ILCESI",
];

/// True when `word` is a printed form label.
pub fn is_label_word(word: &str) -> bool {
    let word = word.trim_matches(|c: char| !c.is_alphanumeric() && c != '.');
    let word = word.trim_end_matches('.');
    let folded = fold_ascii(word);
    LABEL_WORDS.contains(&folded.as_str())
}

/// Leading value words of a captured label value, cut at the next label.
pub(crate) fn value_words(raw: &str, max_words: usize) -> String {
    raw.split_whitespace()
        .take_while(|w| !w.ends_with(':') && !is_label_word(w))
        .take(max_words)
        .collect::<Vec<_>>()
        .join(" ")
}
