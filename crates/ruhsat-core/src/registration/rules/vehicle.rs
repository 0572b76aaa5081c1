//! Brand and model labels as printed on the document.
//!
//! These are free text; the resolver maps them to catalog ids.

use regex::Regex;

use super::patterns::{BRAND_LABELED, BRAND_SHORT, MODEL_LABELED, MODEL_TRADE_NAME, MODEL_TYPE};
use super::{run_chain, value_words, Field, FieldCandidate, FieldExtractor};
use crate::document::TranscribedDocument;

const MAX_LABEL_WORDS: usize = 3;

/// Which vehicle label to extract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VehicleLabel {
    Brand,
    Model,
}

/// Brand or model label extractor.
pub struct VehicleLabelExtractor {
    label: VehicleLabel,
}

impl VehicleLabelExtractor {
    pub fn brand() -> Self {
        Self {
            label: VehicleLabel::Brand,
        }
    }

    pub fn model() -> Self {
        Self {
            label: VehicleLabel::Model,
        }
    }

    fn patterns(&self) -> Vec<&'static Regex> {
        match self.label {
            VehicleLabel::Brand => vec![&*BRAND_LABELED, &*BRAND_SHORT],
            VehicleLabel::Model => vec![&*MODEL_TRADE_NAME, &*MODEL_TYPE, &*MODEL_LABELED],
        }
    }
}

impl FieldExtractor for VehicleLabelExtractor {
    type Value = String;

    fn candidates(&self, doc: &TranscribedDocument, first_only: bool) -> Vec<FieldCandidate<String>> {
        let field = match self.label {
            VehicleLabel::Brand => Field::BrandLabel,
            VehicleLabel::Model => Field::ModelLabel,
        };

        run_chain(field, &doc.normalized, &self.patterns(), first_only, |_, caps| {
            let value = value_words(&caps[1], MAX_LABEL_WORDS);
            let value = value.trim_matches(|c: char| c == '.' || c == '-');
            (2..=40).contains(&value.chars().count()).then(|| value.to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn brand(text: &str) -> Option<String> {
        VehicleLabelExtractor::brand()
            .extract(&TranscribedDocument::new(text))
            .map(|m| m.value)
    }

    fn model(text: &str) -> Option<String> {
        VehicleLabelExtractor::model()
            .extract(&TranscribedDocument::new(text))
            .map(|m| m.value)
    }

    #[test]
    fn test_brand_label() {
        assert_eq!(brand("(D.1) MARKASI: Renault TİPİ: CLIO"), Some("RENAULT".to_string()));
        assert_eq!(brand("MARKA: FORD"), Some("FORD".to_string()));
    }

    #[test]
    fn test_model_labels_in_order() {
        let text = "MARKASI: FIAT TİPİ: 263 TİCARİ ADI: DOBLO COMBI";
        assert_eq!(model(text), Some("DOBLO COMBI".to_string()));
        assert_eq!(model("TİPİ: L250-5V"), Some("L250-5V".to_string()));
        assert_eq!(model("MODELİ: CIVIC"), Some("CIVIC".to_string()));
    }

    #[test]
    fn test_value_cut_at_next_label() {
        assert_eq!(brand("MARKASI: MERCEDES-BENZ MODEL YILI 2016"), Some("MERCEDES-BENZ".to_string()));
    }

    #[test]
    fn test_empty_value_rejected() {
        assert_eq!(brand("MARKASI: TİPİ: CLIO"), None);
    }
}
