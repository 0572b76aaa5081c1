//! Vehicle model year extraction.

use chrono::Datelike;

use super::patterns::{MODEL_YEAR_LABELED, MODEL_YEAR_SHORT, YEAR_BARE};
use super::{run_chain, Field, FieldCandidate, FieldExtractor};
use crate::document::TranscribedDocument;
use crate::models::config::ExtractionConfig;

/// Model year field extractor.
pub struct ModelYearExtractor {
    min_year: i32,
    max_year: i32,
}

impl ModelYearExtractor {
    /// Accept years from 1990 up to next year.
    pub fn new() -> Self {
        Self::from_config(&ExtractionConfig::default())
    }

    /// Year bounds from configuration, relative to the local current year.
    pub fn from_config(config: &ExtractionConfig) -> Self {
        let current_year = chrono::Local::now().year();
        Self {
            min_year: config.min_model_year,
            max_year: current_year + config.future_year_allowance,
        }
    }

    /// Pin the accepted range.
    pub fn with_range(mut self, min_year: i32, max_year: i32) -> Self {
        self.min_year = min_year;
        self.max_year = max_year;
        self
    }

    pub fn range(&self) -> (i32, i32) {
        (self.min_year, self.max_year)
    }

    fn accept(&self, digits: &str) -> Option<i32> {
        let year: i32 = digits.parse().ok()?;
        (self.min_year..=self.max_year).contains(&year).then_some(year)
    }
}

impl Default for ModelYearExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for ModelYearExtractor {
    type Value = i32;

    fn candidates(&self, doc: &TranscribedDocument, first_only: bool) -> Vec<FieldCandidate<i32>> {
        let patterns = [&*MODEL_YEAR_LABELED, &*MODEL_YEAR_SHORT, &*YEAR_BARE];

        run_chain(Field::ModelYear, &doc.normalized, &patterns, first_only, |_, caps| {
            self.accept(&caps[1])
        })
    }
}

/// Extract the model year from text.
pub fn extract_model_year(text: &str) -> Option<i32> {
    ModelYearExtractor::new()
        .extract(&TranscribedDocument::new(text))
        .map(|m| m.value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> ModelYearExtractor {
        ModelYearExtractor::new().with_range(1990, 2025)
    }

    fn year(text: &str) -> Option<FieldCandidate<i32>> {
        extractor().extract(&TranscribedDocument::new(text))
    }

    #[test]
    fn test_labeled_year() {
        let found = year("MODEL YILI: 2018\nSİLİNDİR HACMİ 1461").unwrap();
        assert_eq!(found.value, 2018);
        assert_eq!(found.rank, 0);
    }

    #[test]
    fn test_labeled_beats_earlier_bare_year() {
        let found = year("TESCİL TARİHİ 12.03.2021 MODEL: 2015").unwrap();
        assert_eq!(found.value, 2015);
        assert_eq!(found.rank, 1);
    }

    #[test]
    fn test_bare_year_fallback() {
        let found = year("06 ABC 123 2012 RENAULT").unwrap();
        assert_eq!(found.value, 2012);
        assert_eq!(found.rank, 2);
    }

    #[test]
    fn test_out_of_range_years_rejected() {
        assert!(year("MODEL YILI: 1985").is_none());
        assert!(year("MODEL YILI: 2026").is_none());
        // Labeled year out of range falls through to a valid bare year
        assert_eq!(year("MODEL YILI: 1975 TESCİL 2001").unwrap().value, 2001);
    }

    #[test]
    fn test_default_range_tracks_current_year() {
        let (min, max) = ModelYearExtractor::new().range();
        assert_eq!(min, 1990);
        assert_eq!(max, chrono::Local::now().year() + 1);
        assert_eq!(extract_model_year(&format!("MODEL YILI {}", max)), Some(max));
        assert_eq!(extract_model_year(&format!("MODEL YILI {}", max + 1)), None);
    }
}
