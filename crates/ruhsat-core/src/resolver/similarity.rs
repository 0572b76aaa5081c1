//! Character-overlap similarity used by the fuzzy resolution phase.

/// Share of the longer string covered by characters of the shorter one.
///
/// Counts every character of the shorter string that occurs anywhere in the
/// longer string and divides by the length of the longer string. Order and
/// multiplicity in the longer string are ignored, so this is far more
/// permissive than an edit distance.
pub fn similarity(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    let (shorter, longer) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    if longer.is_empty() {
        return 0.0;
    }

    let shared = shorter.iter().filter(|c| longer.contains(c)).count();
    shared as f64 / longer.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_misspelled_name() {
        // R E N L T of RENOLT occur in RENAULT; O does not
        let score = similarity("RENOLT", "RENAULT");
        assert!((score - 5.0 / 7.0).abs() < 1e-9);
    }

    #[test]
    fn test_symmetric_in_argument_order() {
        assert_eq!(similarity("FORD", "FORT"), similarity("FORT", "FORD"));
        assert_eq!(similarity("FIAT", "RENOLT"), similarity("RENOLT", "FIAT"));
    }

    #[test]
    fn test_order_insensitive() {
        assert_eq!(similarity("TAIF", "FIAT"), 1.0);
    }

    #[test]
    fn test_disjoint_and_empty() {
        assert_eq!(similarity("XYZ", "FIAT"), 0.0);
        assert_eq!(similarity("", ""), 0.0);
        assert_eq!(similarity("", "FIAT"), 0.0);
    }

    #[test]
    fn test_long_document_dilutes_score() {
        let score = similarity("PLAKA 06 ABC 123 MARKASI RENAULT", "RENAULT");
        assert!(score < 0.5);
    }
}
