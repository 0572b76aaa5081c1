//! T.C. identity number extraction and validation.

use super::patterns::{DIGIT_RUN, IDENTITY_LABELED, IDENTITY_TAX_LABELED};
use super::{run_chain, Field, FieldCandidate, FieldExtractor};
use crate::document::TranscribedDocument;

/// Identity number field extractor.
pub struct IdentityNumberExtractor {
    validate: bool,
}

impl IdentityNumberExtractor {
    /// Create a new identity number extractor.
    pub fn new() -> Self {
        Self { validate: true }
    }

    /// Set whether to validate checksums. Length is always checked.
    pub fn with_validation(mut self, validate: bool) -> Self {
        self.validate = validate;
        self
    }

    fn accept(&self, digits: &str) -> bool {
        if self.validate {
            validate_identity_number(digits)
        } else {
            digits.len() == 11 && !digits.starts_with('0')
        }
    }
}

impl Default for IdentityNumberExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for IdentityNumberExtractor {
    type Value = String;

    fn candidates(&self, doc: &TranscribedDocument, first_only: bool) -> Vec<FieldCandidate<String>> {
        let patterns = [&*IDENTITY_LABELED, &*IDENTITY_TAX_LABELED, &*DIGIT_RUN];

        run_chain(
            Field::IdentityNumber,
            &doc.normalized,
            &patterns,
            first_only,
            |_, caps| {
                let digits = &caps[1];
                self.accept(digits).then(|| digits.to_string())
            },
        )
    }
}

/// Extract an identity number from text.
pub fn extract_identity_number(text: &str) -> Option<String> {
    IdentityNumberExtractor::new()
        .extract(&TranscribedDocument::new(text))
        .map(|m| m.value)
}

/// Validate a T.C. identity number.
///
/// 11 digits, first digit non-zero, two check digits:
/// - d10 = ((d1+d3+d5+d7+d9) * 7 - (d2+d4+d6+d8)) mod 10
/// - d11 = (d1 + ... + d10) mod 10
pub fn validate_identity_number(number: &str) -> bool {
    if number.len() != 11 || !number.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }

    let digits: Vec<i32> = number.bytes().map(|b| (b - b'0') as i32).collect();

    if digits[0] == 0 {
        return false;
    }

    let odd_sum: i32 = digits.iter().take(9).step_by(2).sum();
    let even_sum: i32 = digits.iter().skip(1).take(8).step_by(2).sum();

    let tenth = (odd_sum * 7 - even_sum).rem_euclid(10);
    if tenth != digits[9] {
        return false;
    }

    let eleventh = digits.iter().take(10).sum::<i32>() % 10;
    eleventh == digits[10]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_identity_number_valid() {
        assert!(validate_identity_number("10000000146"));
        assert!(validate_identity_number("12345678950"));
    }

    #[test]
    fn test_validate_identity_number_invalid() {
        assert!(!validate_identity_number("12345678951")); // Wrong 11th digit
        assert!(!validate_identity_number("12345678940")); // Wrong 10th digit
        assert!(!validate_identity_number("02345678950")); // Leading zero
        assert!(!validate_identity_number("1234567895")); // Too short
        assert!(!validate_identity_number("123456789500")); // Too long
        assert!(!validate_identity_number("1234567895a"));
    }

    #[test]
    fn test_negative_tenth_digit_adjusted() {
        // odd sum 1 * 7 = 7, even sum 9 + 9 = 18 -> -11 -> 9
        assert!(validate_identity_number("19090000098"));
    }

    #[test]
    fn test_single_digit_mutation_rejected() {
        for valid in ["10000000146", "12345678950", "19090000098"] {
            for pos in 0..11 {
                let original = valid.as_bytes()[pos];
                for digit in b'0'..=b'9' {
                    if digit == original {
                        continue;
                    }
                    let mut mutated = valid.as_bytes().to_vec();
                    mutated[pos] = digit;
                    let mutated = String::from_utf8(mutated).unwrap();
                    assert!(
                        !validate_identity_number(&mutated),
                        "{} accepted after mutating position {}",
                        mutated,
                        pos
                    );
                }
            }
        }
    }

    #[test]
    fn test_extract_labeled() {
        let text = "T.C. KİMLİK NO: 12345678950\nADI: AHMET";
        assert_eq!(extract_identity_number(text), Some("12345678950".to_string()));
    }

    #[test]
    fn test_labeled_beats_bare() {
        let text = "MOTOR NO 10000000146 ... T.C. Kimlik No: 12345678950";
        let found = IdentityNumberExtractor::new()
            .extract(&TranscribedDocument::new(text))
            .unwrap();
        assert_eq!(found.value, "12345678950");
        assert_eq!(found.rank, 0);
    }

    #[test]
    fn test_bare_fallback_requires_checksum() {
        let text = "ŞASİ 12345678901 SIRA 12345678950 BELGE 123456789500";
        let found = IdentityNumberExtractor::new()
            .extract(&TranscribedDocument::new(text))
            .unwrap();
        assert_eq!(found.value, "12345678950");
        assert_eq!(found.rank, 2);
    }

    #[test]
    fn test_no_identity_number() {
        assert_eq!(extract_identity_number("KİMLİK NO: 12345"), None);
        assert_eq!(extract_identity_number(""), None);
    }
}
