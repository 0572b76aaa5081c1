//! Transcribed document text in the two shapes the extraction rules need.

/// Text recovered from a photographed registration document.
///
/// Address rules read `original` because they depend on line breaks and
/// casing; identifier rules read `normalized`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscribedDocument {
    /// Text exactly as the transcription service returned it.
    pub original: String,
    /// Upper-cased (Turkish rules), whitespace-collapsed copy.
    pub normalized: String,
}

impl TranscribedDocument {
    /// Build both views from raw transcription output.
    pub fn new(text: impl Into<String>) -> Self {
        let original = text.into();
        let normalized = normalize_text(&original);
        Self { original, normalized }
    }

    /// Non-empty, trimmed lines of the original text.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.original.lines().map(str::trim).filter(|l| !l.is_empty())
    }

    pub fn is_blank(&self) -> bool {
        self.normalized.is_empty()
    }
}

/// Upper-case with Turkish dotted/dotless i handling.
///
/// `i` becomes `İ` and `ı` becomes `I`; everything else follows Unicode.
pub fn turkish_upper(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            'i' => out.push('İ'),
            'ı' => out.push('I'),
            _ => out.extend(c.to_uppercase()),
        }
    }
    out
}

/// Collapse every whitespace run into a single space and trim the ends.
pub fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Turkish upper-case plus whitespace collapsing.
pub fn normalize_text(s: &str) -> String {
    collapse_whitespace(&turkish_upper(s))
}

/// Strip Turkish diacritics so `TİCARİ` and `TICARI` compare equal.
pub fn fold_ascii(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            'İ' => 'I',
            'Ş' => 'S',
            'Ğ' => 'G',
            'Ç' => 'C',
            'Ö' => 'O',
            'Ü' => 'U',
            _ => c,
        })
        .collect()
}
