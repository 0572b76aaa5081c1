//! Owner address extraction and district/city decomposition.

use serde::{Deserialize, Serialize};

use super::patterns::{
    ADDRESS_LABELED, ADDRESS_LINE, DISTRICT_CITY, FORM_LABEL, FORM_LABEL_LINE, TRAILING_CITY,
};
use super::{run_chain, Field, FieldCandidate, FieldExtractor};
use crate::document::{collapse_whitespace, turkish_upper, TranscribedDocument};

/// How far past a labeled address line wrapped text is looked for.
const WRAP_WINDOW_CHARS: usize = 150;
/// How many following lines may continue a labeled address.
const WRAP_MAX_LINES: usize = 2;
/// Shorter continuation lines are treated as noise.
const WRAP_MIN_LINE_CHARS: usize = 5;

const MIN_ADDRESS_CHARS: usize = 15;
const MAX_ADDRESS_CHARS: usize = 200;

/// Address field extractor. Works on the original text, since addresses
/// keep their casing and line breaks.
#[derive(Default)]
pub struct AddressExtractor;

impl AddressExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl FieldExtractor for AddressExtractor {
    type Value = String;

    fn candidates(&self, doc: &TranscribedDocument, first_only: bool) -> Vec<FieldCandidate<String>> {
        let text = doc.original.as_str();
        let patterns = [&*ADDRESS_LABELED, &*ADDRESS_LINE];

        run_chain(Field::Address, text, &patterns, first_only, |rank, caps| {
            let value = caps[1].trim();
            if rank > 0 {
                return validate_address(value);
            }

            // Another field on the same line ends the address there
            let (value, cut) = until_label(value);
            if cut {
                return validate_address(value);
            }

            let end = caps.get(0).map_or(text.len(), |m| m.end());
            let mut address = value.to_string();
            for line in wrapped_lines(&text[end..]) {
                if !address.is_empty() {
                    address.push(' ');
                }
                address.push_str(&line);
            }
            validate_address(&address)
        })
    }
}

/// Continuation lines of a labeled address.
fn wrapped_lines(rest: &str) -> Vec<String> {
    let window: String = rest.chars().take(WRAP_WINDOW_CHARS).collect();

    let mut lines = Vec::new();
    // The first item is the remainder of the labeled line itself.
    for line in window
        .lines()
        .skip(1)
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .take(WRAP_MAX_LINES)
    {
        if FORM_LABEL_LINE.is_match(line) {
            break;
        }
        let (line, cut) = until_label(line);
        if line.chars().count() > WRAP_MIN_LINE_CHARS {
            lines.push(line.to_string());
        }
        if cut {
            break;
        }
    }
    lines
}

/// Text before the first form label, and whether a label was found.
fn until_label(text: &str) -> (&str, bool) {
    match FORM_LABEL.find(text) {
        Some(m) => (text[..m.start()].trim(), true),
        None => (text, false),
    }
}

/// Clean and validate an address.
///
/// Punctuation other than `/ . , - :` becomes whitespace; the collapsed
/// result must be 15-200 characters long.
pub fn validate_address(raw: &str) -> Option<String> {
    let cleaned: String = raw
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c.is_whitespace() || "/.,-:".contains(c) {
                c
            } else {
                ' '
            }
        })
        .collect();
    let address = collapse_whitespace(&cleaned);

    let len = address.chars().count();
    (MIN_ADDRESS_CHARS..=MAX_ADDRESS_CHARS)
        .contains(&len)
        .then_some(address)
}

/// District and city split off an address.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressParts {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub district: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
}

/// Split `<district>/<city>` off the tail of an address.
///
/// The last `district/city` pair wins. A lone trailing `/city` sets only the
/// city. Without a `/` nothing is set.
pub fn decompose_address(address: &str) -> AddressParts {
    if let Some(caps) = DISTRICT_CITY.captures_iter(address).last() {
        return AddressParts {
            district: Some(turkish_upper(caps[1].trim())),
            city: Some(turkish_upper(caps[2].trim())),
        };
    }

    if let Some(caps) = TRAILING_CITY.captures(address) {
        return AddressParts {
            district: None,
            city: Some(turkish_upper(caps[1].trim())),
        };
    }

    AddressParts::default()
}
