//! Common regex patterns for registration document extraction.
//!
//! Patterns without a `(?i)` flag run over the normalized (upper-case,
//! whitespace-collapsed) text. Address patterns run over the original text.

use lazy_static::lazy_static;
use regex::Regex;

/// Whole label words of the form. Words that also occur in street names
/// (`MODEL`, `MOTOR`) only count when followed by `:` or `.`.
const FORM_LABEL_WORDS: &str = r"(?:\b(?:PLAKA(?:SI)?|MARKA(?:SI)?|T[İIıi]P[İIıi]|MODEL(?:[İIıi]|\s+Y[İIıi]L[İIıi])|K[İIıi]ML[İIıi]K|VERG[İIıi]|SOYAD[İIıi]?|BELGE|KULLANIM|RENG[İIıi]|C[İIıi]NS[İIıi]|[ŞSşs]AS[İIıi]|S[İIıi]L[İIıi]ND[İIıi]R|TESC[İIıi]L|AD[İIıi])\b|\b(?:MODEL|MOTOR(?:\s*NO)?)\s*[:.]|\bT\.?\s?C\.|\bAD\s*:)";

lazy_static! {
    // Identity number (T.C. Kimlik No / Vergi No)
    pub static ref IDENTITY_LABELED: Regex = Regex::new(
        r"K[İI]ML[İI]K\s*(?:NO|NUMARASI)\.?(?:\s*/\s*VERG[İI]\s*NO\.?)?\s*[:.]?\s*(\d{11,})"
    ).unwrap();

    pub static ref IDENTITY_TAX_LABELED: Regex = Regex::new(
        r"VERG[İI]\s*(?:K[İI]ML[İI]K\s*)?(?:NO|NUMARASI)\.?\s*[:.]?\s*(\d{11,})"
    ).unwrap();

    pub static ref DIGIT_RUN: Regex = Regex::new(
        r"(\d{11,})"
    ).unwrap();

    // Owner name. The optional group catches the "TİCARİ ADI" label so it is
    // never read as a first name.
    pub static ref FIRST_NAME_LABELED: Regex = Regex::new(
        r"(?:^|[^A-ZÇĞİÖŞÜ])(T[İI]CAR[İI]\s*)?ADI\s*[:.]\s*([A-ZÇĞİÖŞÜ]+(?:\s+[A-ZÇĞİÖŞÜ]+)?)"
    ).unwrap();

    pub static ref FULL_NAME_COMBINED: Regex = Regex::new(
        r"(?:^|[^A-ZÇĞİÖŞÜ])ADI\s*(?:VE\s*)?SOYADI\s*[:.]?\s*([A-ZÇĞİÖŞÜ]+(?:\s+[A-ZÇĞİÖŞÜ]+){1,3})"
    ).unwrap();

    pub static ref FIRST_NAME_SHORT: Regex = Regex::new(
        r"(?:^|[^A-ZÇĞİÖŞÜ])AD\s*[:.]\s*([A-ZÇĞİÖŞÜ]+(?:\s+[A-ZÇĞİÖŞÜ]+)?)"
    ).unwrap();

    pub static ref FIRST_NAME_LOOSE: Regex = Regex::new(
        r"(?:^|[^A-ZÇĞİÖŞÜ])(T[İI]CAR[İI]\s*)?ADI\s+([A-ZÇĞİÖŞÜ]+)"
    ).unwrap();

    pub static ref LAST_NAME_LABELED: Regex = Regex::new(
        r"SOYADI(?:\s*/\s*T[İI]CAR[İI]\s*[ÜU]NVANI)?\s*[:.]?\s*([A-ZÇĞİÖŞÜ]+)"
    ).unwrap();

    pub static ref LAST_NAME_SHORT: Regex = Regex::new(
        r"SOYAD\s*[:.]\s*([A-ZÇĞİÖŞÜ]+)"
    ).unwrap();

    // Address (original text, one line at a time)
    pub static ref ADDRESS_LABELED: Regex = Regex::new(
        r"(?im)^[^\n]*?adres[iİı]?[ \t]*[:.]?[ \t]*([^\n]*)$"
    ).unwrap();

    pub static ref ADDRESS_LINE: Regex = Regex::new(
        r"(?im)^([^\n]*\b(?:MAH|MAHALLES[İI]|CAD|CADDES[İI]|SOK|SOKAK|SOKA[ĞG][İI]|BULVAR[İI]?|BLV|APT|K[ÖO]Y[ÜU]?)\b[^\n]*)$"
    ).unwrap();

    /// A printed form label anywhere in original-case text.
    pub static ref FORM_LABEL: Regex = Regex::new(
        &format!(r"(?i)(?:\([A-Z0-9.]+\)\s*)?{}", FORM_LABEL_WORDS)
    ).unwrap();

    /// A line that starts with a printed form label.
    pub static ref FORM_LABEL_LINE: Regex = Regex::new(
        &format!(r"(?i)^(?:\([A-Z0-9.]+\)\s*)?{}", FORM_LABEL_WORDS)
    ).unwrap();

    pub static ref DISTRICT_CITY: Regex = Regex::new(
        r"(\p{L}+)\s*/\s*(\p{L}+)"
    ).unwrap();

    pub static ref TRAILING_CITY: Regex = Regex::new(
        r"/\s*(\p{L}+)\s*\.?\s*$"
    ).unwrap();

    // Plate
    pub static ref PLATE_LABELED: Regex = Regex::new(
        r"PLAKA(?:SI)?\s*(?:NO)?\s*[:.]?\s*(\d{2})\s*([A-Z]{1,3})\s*(\d{2,4})\b"
    ).unwrap();

    pub static ref PLATE_SPACED: Regex = Regex::new(
        r"\b(\d{2})\s+([A-Z]{1,3})\s+(\d{2,4})\b"
    ).unwrap();

    pub static ref PLATE_COMPACT: Regex = Regex::new(
        r"\b(\d{2})([A-Z]{1,3})(\d{2,4})\b"
    ).unwrap();

    pub static ref PLATE_SHAPE: Regex = Regex::new(
        r"^\d{2}[A-Z]{1,3}\d{2,4}$"
    ).unwrap();

    // Document serial (belge seri / no)
    pub static ref SERIAL_LABELED: Regex = Regex::new(
        r"BELGE\s*SER[İI]\s*[:.]?\s*([A-Z]{2})\s*N\s*[O0Ö°º]?\s*[:.]?\s*(\d{6})\b"
    ).unwrap();

    pub static ref SERIAL_SERIES_NO: Regex = Regex::new(
        r"BELGE\s*SER[İI]\s*(?:VE\s*)?N\s*[O0Ö°º]\s*[:.]?\s*([A-Z]{2})\s*[-/]?\s*(\d{6})\b"
    ).unwrap();

    pub static ref SERIAL_LOOSE: Regex = Regex::new(
        r"BELGE[^0-9]{0,30}?\b([A-Z]{2})\s*[-/:.]?\s*(\d{6})\b"
    ).unwrap();

    pub static ref SERIAL_HT: Regex = Regex::new(
        r"\b(HT)\s*(?:N\s*[O0Ö°º]?\s*)?[:.\-/]?\s*(\d{6})\b"
    ).unwrap();

    // Model year
    pub static ref MODEL_YEAR_LABELED: Regex = Regex::new(
        r"MODEL\s*YILI\s*[:.]?\s*(\d{4})\b"
    ).unwrap();

    pub static ref MODEL_YEAR_SHORT: Regex = Regex::new(
        r"MODEL(?:\s*YIL)?\s*[:.]\s*(\d{4})\b"
    ).unwrap();

    pub static ref YEAR_BARE: Regex = Regex::new(
        r"\b(\d{4})\b"
    ).unwrap();

    // Usage
    pub static ref USAGE_LABELED: Regex = Regex::new(
        r"KULLANIM\s*(?:AMACI|[ŞS]EKL[İI]|T[ÜU]R[ÜU])?\s*[:.]?\s*([A-ZÇĞİÖŞÜ]+(?:\s+[A-ZÇĞİÖŞÜ]+)?)"
    ).unwrap();

    pub static ref TRADE_LABELS: Regex = Regex::new(
        r"T[İI]CAR[İI]\s*(?:[ÜU]NVANI|ADI)"
    ).unwrap();

    // Vehicle brand / model labels
    pub static ref BRAND_LABELED: Regex = Regex::new(
        r"MARKASI\s*[:.]?\s*([A-Z0-9ÇĞİÖŞÜ][A-Z0-9ÇĞİÖŞÜ\-. ]{0,40})"
    ).unwrap();

    pub static ref BRAND_SHORT: Regex = Regex::new(
        r"MARKA\s*[:.]\s*([A-Z0-9ÇĞİÖŞÜ][A-Z0-9ÇĞİÖŞÜ\-. ]{0,40})"
    ).unwrap();

    pub static ref MODEL_TRADE_NAME: Regex = Regex::new(
        r"T[İI]CAR[İI]\s*ADI\s*[:.]?\s*([A-Z0-9ÇĞİÖŞÜ][A-Z0-9ÇĞİÖŞÜ\-. ]{0,40})"
    ).unwrap();

    pub static ref MODEL_TYPE: Regex = Regex::new(
        r"(?:^|[^A-ZÇĞİÖŞÜ])T[İI]P[İI]\s*[:.]?\s*([A-Z0-9ÇĞİÖŞÜ][A-Z0-9ÇĞİÖŞÜ\-. ]{0,40})"
    ).unwrap();

    pub static ref MODEL_LABELED: Regex = Regex::new(
        r"MODEL[İI]\s*[:.]?\s*([A-Z0-9ÇĞİÖŞÜ][A-Z0-9ÇĞİÖŞÜ\-. ]{0,40})"
    ).unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_labeled() {
        let caps = IDENTITY_LABELED
            .captures("T.C. KİMLİK NO/VERGİ NO: 10000000146 ADI")
            .unwrap();
        assert_eq!(&caps[1], "10000000146");
    }

    #[test]
    fn test_first_name_trade_label_flagged() {
        let caps = FIRST_NAME_LABELED.captures("TİCARİ ADI: CLIO").unwrap();
        assert!(caps.get(1).is_some());

        let caps = FIRST_NAME_LABELED.captures("X ADI: AHMET").unwrap();
        assert!(caps.get(1).is_none());
        assert_eq!(&caps[2], "AHMET");
    }

    #[test]
    fn test_serial_labeled() {
        let caps = SERIAL_LABELED.captures("BELGE SERİ: HT Nº: 831316").unwrap();
        assert_eq!(&caps[1], "HT");
        assert_eq!(&caps[2], "831316");
    }

    #[test]
    fn test_address_labeled_original_case() {
        let caps = ADDRESS_LABELED
            .captures("Adresi: Kızılay Mah. Atatürk Blv. No:5")
            .unwrap();
        assert_eq!(&caps[1], "Kızılay Mah. Atatürk Blv. No:5");
    }

    #[test]
    fn test_form_label_line() {
        assert!(FORM_LABEL_LINE.is_match("PLAKA: 06 ABC 123"));
        assert!(FORM_LABEL_LINE.is_match("(D.1) MARKASI: FIAT"));
        assert!(!FORM_LABEL_LINE.is_match("KEÇİÖREN/ANKARA"));
        assert!(!FORM_LABEL_LINE.is_match("ADİL SOKAK NO 3"));
        assert!(FORM_LABEL_LINE.is_match("T.C. KİMLİK NO: 12345678950"));
        assert!(FORM_LABEL_LINE.is_match("Rengi: BEYAZ"));
    }

    #[test]
    fn test_street_words_are_not_form_labels() {
        for line in ["Rengin Sok. Daire 3", "Model Sok. No 4", "Motorcular Cad. 12", "Tipiz Apt.", "Cinsiyet Sok."] {
            assert!(!FORM_LABEL_LINE.is_match(line), "{}", line);
        }
    }

    #[test]
    fn test_form_label_inside_line() {
        let text = "Kızılay Mah. No 5 ÇANKAYA/ANKARA PLAKA: 06 BK 4521";
        let found = FORM_LABEL.find(text).unwrap();
        assert_eq!(text[..found.start()].trim(), "Kızılay Mah. No 5 ÇANKAYA/ANKARA");
    }
}
