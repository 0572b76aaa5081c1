//! Owner first name / last name extraction.

use regex::Regex;

use super::patterns::{
    FIRST_NAME_LABELED, FIRST_NAME_LOOSE, FIRST_NAME_SHORT, FULL_NAME_COMBINED, LAST_NAME_LABELED,
    LAST_NAME_SHORT,
};
use super::{is_label_word, run_chain, value_words, Field, FieldCandidate, FieldExtractor};
use crate::document::{collapse_whitespace, turkish_upper, TranscribedDocument};
use crate::models::config::NameDictionary;

/// Which half of the owner name to extract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamePart {
    First,
    Last,
}

/// Name field extractor.
pub struct NameExtractor<'a> {
    part: NamePart,
    dictionary: Option<&'a NameDictionary>,
}

impl<'a> NameExtractor<'a> {
    /// Extractor for the first (given) name.
    pub fn first() -> Self {
        Self {
            part: NamePart::First,
            dictionary: None,
        }
    }

    /// Extractor for the last name (surname or trade title).
    pub fn last() -> Self {
        Self {
            part: NamePart::Last,
            dictionary: None,
        }
    }

    /// Fall back to a list of common names when no labeled name is found.
    pub fn with_dictionary(mut self, dictionary: &'a NameDictionary) -> Self {
        self.dictionary = dictionary.enabled.then_some(dictionary);
        self
    }

    fn field(&self) -> Field {
        match self.part {
            NamePart::First => Field::FirstName,
            NamePart::Last => Field::LastName,
        }
    }

    fn patterns(&self) -> Vec<&'static Regex> {
        match self.part {
            NamePart::First => vec![
                &*FIRST_NAME_LABELED,
                &*FULL_NAME_COMBINED,
                &*FIRST_NAME_SHORT,
                &*FIRST_NAME_LOOSE,
            ],
            NamePart::Last => vec![&*FULL_NAME_COMBINED, &*LAST_NAME_LABELED, &*LAST_NAME_SHORT],
        }
    }

    fn dictionary_match(&self, doc: &TranscribedDocument, rank: usize) -> Option<FieldCandidate<String>> {
        let dictionary = self.dictionary?;
        let names = match self.part {
            NamePart::First => &dictionary.given_names,
            NamePart::Last => &dictionary.surnames,
        };

        doc.normalized
            .split(|c: char| !c.is_alphabetic())
            .filter(|token| !token.is_empty())
            .find(|token| names.iter().any(|n| turkish_upper(n.trim()) == *token))
            .map(|token| FieldCandidate::new(self.field(), token.to_string(), rank, token))
    }
}

impl FieldExtractor for NameExtractor<'_> {
    type Value = String;

    fn candidates(&self, doc: &TranscribedDocument, first_only: bool) -> Vec<FieldCandidate<String>> {
        let patterns = self.patterns();
        let part = self.part;

        let mut results = run_chain(
            self.field(),
            &doc.normalized,
            &patterns,
            first_only,
            |rank, caps| {
                let raw = match (part, rank) {
                    // Combined "ADI SOYADI: <given names> <surname>"
                    (NamePart::First, 1) | (NamePart::Last, 0) => {
                        let words = value_words(&caps[1], 4);
                        let words: Vec<&str> = words.split(' ').collect();
                        if words.len() < 2 {
                            return None;
                        }
                        let (given, surname) = words.split_at(words.len() - 1);
                        match part {
                            NamePart::First => given.join(" "),
                            NamePart::Last => surname.join(" "),
                        }
                    }
                    // Labeled and loose first-name rules flag the TİCARİ ADI label
                    (NamePart::First, 0) | (NamePart::First, 3) => {
                        if caps.get(1).is_some() {
                            return None;
                        }
                        value_words(&caps[2], 2)
                    }
                    (NamePart::First, _) => value_words(&caps[1], 2),
                    (NamePart::Last, _) => value_words(&caps[1], 1),
                };
                validate_name(&raw)
            },
        );

        if results.is_empty() || !first_only {
            if let Some(found) = self.dictionary_match(doc, patterns.len()) {
                results.push(found);
            }
        }

        results
    }
}

/// Clean and validate a name value.
///
/// Non-letters become spaces; the result must be 2-30 characters, must not
/// be a form label, and the raw value must contain at least one letter.
pub fn validate_name(raw: &str) -> Option<String> {
    if !raw.chars().any(char::is_alphabetic) {
        return None;
    }

    let letters: String = raw
        .chars()
        .map(|c| if c.is_alphabetic() { c } else { ' ' })
        .collect();
    let name = collapse_whitespace(&turkish_upper(&letters));

    let len = name.chars().count();
    if !(2..=30).contains(&len) {
        return None;
    }

    if name.split(' ').any(is_label_word) {
        return None;
    }

    Some(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn first(text: &str) -> Option<String> {
        NameExtractor::first()
            .extract(&TranscribedDocument::new(text))
            .map(|m| m.value)
    }

    fn last(text: &str) -> Option<String> {
        NameExtractor::last()
            .extract(&TranscribedDocument::new(text))
            .map(|m| m.value)
    }

    #[test]
    fn test_separate_labels() {
        let text = "SOYADI: YILMAZ\nADI: AHMET\nADRESİ: KIZILAY MAH.";
        assert_eq!(first(text), Some("AHMET".to_string()));
        assert_eq!(last(text), Some("YILMAZ".to_string()));
    }

    #[test]
    fn test_combined_label() {
        let text = "ADI SOYADI: Mehmet Ali Kaya\nADRESİ: ÇANKAYA";
        assert_eq!(first(text), Some("MEHMET ALİ".to_string()));
        assert_eq!(last(text), Some("KAYA".to_string()));
    }

    #[test]
    fn test_trade_name_is_not_a_first_name() {
        assert_eq!(first("TİCARİ ADI: CLIO"), None);
    }

    #[test]
    fn test_surname_with_trade_title_label() {
        let text = "SOYADI/TİCARİ ÜNVANI: DEMİR";
        assert_eq!(last(text), Some("DEMİR".to_string()));
    }

    #[test]
    fn test_dictionary_fallback() {
        let dictionary = NameDictionary::default();
        let doc = TranscribedDocument::new("SAHİBİ Ayşe Demir 06 ABC 123");

        let given = NameExtractor::first().with_dictionary(&dictionary).extract(&doc).unwrap();
        assert_eq!(given.value, "AYŞE");
        assert_eq!(given.rank, 4);

        let surname = NameExtractor::last().with_dictionary(&dictionary).extract(&doc).unwrap();
        assert_eq!(surname.value, "DEMİR");
    }

    #[test]
    fn test_extract_all_includes_dictionary_match() {
        let dictionary = NameDictionary::default();
        let doc = TranscribedDocument::new("SOYADI: YILMAZ\nADI: AHMET");

        let found = NameExtractor::first().with_dictionary(&dictionary).extract_all(&doc);
        let values: Vec<(&str, usize)> = found.iter().map(|c| (c.value.as_str(), c.rank)).collect();
        assert_eq!(values, vec![("AHMET", 0), ("AHMET", 4)]);

        let found = NameExtractor::first().extract_all(&doc);
        assert_eq!(found.len(), 1);
    }

    #[test]
    fn test_disabled_dictionary() {
        let dictionary = NameDictionary::disabled();
        let doc = TranscribedDocument::new("AYŞE DEMİR");
        assert!(NameExtractor::first().with_dictionary(&dictionary).extract(&doc).is_none());
    }

    #[test]
    fn test_validate_name() {
        assert_eq!(validate_name("ahmet"), Some("AHMET".to_string()));
        assert_eq!(validate_name("Ö.ZTÜRK"), Some("Ö ZTÜRK".to_string()));
        assert_eq!(validate_name("12345"), None);
        assert_eq!(validate_name("A"), None);
        assert_eq!(validate_name("SOYADI"), None);
        assert_eq!(validate_name(&"A".repeat(31)), None);
    }
}
