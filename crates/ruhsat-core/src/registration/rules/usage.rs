//! Vehicle usage type extraction.

use super::patterns::{TRADE_LABELS, USAGE_LABELED};
use super::{run_chain, Field, FieldCandidate, FieldExtractor};
use crate::document::TranscribedDocument;
use crate::models::registration::UsageType;

/// Usage type field extractor.
#[derive(Default)]
pub struct UsageTypeExtractor;

impl UsageTypeExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl FieldExtractor for UsageTypeExtractor {
    type Value = UsageType;

    fn candidates(&self, doc: &TranscribedDocument, first_only: bool) -> Vec<FieldCandidate<UsageType>> {
        let patterns = [&*USAGE_LABELED];

        let mut results = run_chain(Field::UsageType, &doc.normalized, &patterns, first_only, |_, caps| {
            UsageType::from_text(&caps[1])
        });

        if results.is_empty() || !first_only {
            // "TİCARİ ÜNVANI" / "TİCARİ ADI" are owner and model labels, not usage
            let scan = TRADE_LABELS.replace_all(&doc.normalized, " ");
            if let Some(usage) = UsageType::from_text(&scan) {
                results.push(FieldCandidate::new(Field::UsageType, usage, patterns.len(), scan));
            }
        }

        results
    }
}

/// Extract the usage type from text.
pub fn extract_usage_type(text: &str) -> Option<UsageType> {
    UsageTypeExtractor::new()
        .extract(&TranscribedDocument::new(text))
        .map(|m| m.value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labeled_usage() {
        assert_eq!(extract_usage_type("KULLANIM AMACI: HUSUSİ"), Some(UsageType::Private));
        assert_eq!(extract_usage_type("Kullanım Şekli: Ticari"), Some(UsageType::Commercial));
        assert_eq!(extract_usage_type("KULLANIM AMACI: TİCARİ TAKSİ"), Some(UsageType::Taxi));
    }

    #[test]
    fn test_ascii_spelling() {
        assert_eq!(extract_usage_type("KULLANIM AMACI: HUSUSI"), Some(UsageType::Private));
    }

    #[test]
    fn test_labeled_beats_full_text() {
        let found = UsageTypeExtractor::new()
            .extract(&TranscribedDocument::new("TAKSİ DURAĞI KULLANIM AMACI: HUSUSİ"))
            .unwrap();
        assert_eq!(found.value, UsageType::Private);
        assert_eq!(found.rank, 0);
    }

    #[test]
    fn test_extract_all_includes_full_text_scan() {
        let found = UsageTypeExtractor::new()
            .extract_all(&TranscribedDocument::new("TAKSİ DURAĞI KULLANIM AMACI: HUSUSİ"));
        let values: Vec<(UsageType, usize)> = found.iter().map(|c| (c.value, c.rank)).collect();
        assert_eq!(values, vec![(UsageType::Private, 0), (UsageType::Taxi, 1)]);
    }

    #[test]
    fn test_full_text_fallback() {
        let found = UsageTypeExtractor::new()
            .extract(&TranscribedDocument::new("06 ABC 123 HUSUSİ OTOMOBİL"))
            .unwrap();
        assert_eq!(found.value, UsageType::Private);
        assert_eq!(found.rank, 1);
    }

    #[test]
    fn test_trade_labels_are_not_usage() {
        assert_eq!(extract_usage_type("SOYADI/TİCARİ ÜNVANI: DEMİR\nTİCARİ ADI: CLIO"), None);
    }

    #[test]
    fn test_no_usage() {
        assert_eq!(extract_usage_type("PLAKA: 06 ABC 123"), None);
    }
}
