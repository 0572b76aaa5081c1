//! Resolution of free-text brand/model strings to catalog ids.
//!
//! Attempts, first hit wins:
//! 1. the printed label equals or contains (or is contained in) a name
//! 2. a token of the label (split on whitespace and hyphens) of 3+ chars is
//!    contained in a name
//! 3. the whole document text contains (or is contained in) a name
//! 4. the best character-overlap score between document and name, if above
//!    [`FUZZY_THRESHOLD`]

mod similarity;

pub use similarity::similarity;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::document::{fold_ascii, normalize_text};
use crate::models::catalog::Catalog;

/// Minimum fuzzy score; a match must be strictly above it.
pub const FUZZY_THRESHOLD: f64 = 0.5;

/// Shortest label token used by the token attempt.
const MIN_TOKEN_CHARS: usize = 3;

/// A catalog entity with a stable id and a display name.
pub trait CatalogEntry {
    fn id(&self) -> i64;
    fn name(&self) -> &str;
}

/// Which attempt produced a resolution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MatchPhase {
    /// Label equals or contains the name.
    Label,
    /// A label token is contained in the name.
    LabelToken,
    /// Document text contains the name.
    Document,
    /// Character-overlap score above the threshold.
    Fuzzy { score: f64 },
}

/// A resolved catalog entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resolution {
    pub id: i64,
    pub name: String,
    pub phase: MatchPhase,
}

impl Resolution {
    fn new(entry: &impl CatalogEntry, phase: MatchPhase) -> Self {
        Self {
            id: entry.id(),
            name: entry.name().to_string(),
            phase,
        }
    }
}

/// Text available for resolving one entity.
#[derive(Debug, Clone, Copy)]
pub struct ResolveQuery<'a> {
    /// Value printed next to the brand/model label, if one was found.
    pub label: Option<&'a str>,
    /// Whole document text.
    pub document: &'a str,
}

impl<'a> ResolveQuery<'a> {
    pub fn new(label: Option<&'a str>, document: &'a str) -> Self {
        Self { label, document }
    }
}

/// Upper-cased, whitespace-collapsed and diacritic-folded, so `Fiat`,
/// `FİAT` and `FIAT` compare equal.
fn comparable(s: &str) -> String {
    fold_ascii(&normalize_text(s))
}

/// Exact or two-way containment.
fn contains_either(text: &str, name: &str) -> bool {
    text == name || text.contains(name) || name.contains(text)
}

/// Resolve a query against a list of catalog entries.
pub fn resolve<E: CatalogEntry>(query: &ResolveQuery<'_>, entries: &[&E]) -> Option<Resolution> {
    let names: Vec<(&E, String)> = entries
        .iter()
        .map(|e| (*e, comparable(e.name())))
        .filter(|(_, name)| !name.is_empty())
        .collect();

    if names.is_empty() {
        return None;
    }

    let label = query.label.map(comparable).filter(|l| !l.is_empty());

    if let Some(label) = &label {
        if let Some((entry, _)) = names.iter().find(|(_, name)| contains_either(label, name)) {
            debug!("Label '{}' matched '{}'", label, entry.name());
            return Some(Resolution::new(*entry, MatchPhase::Label));
        }

        let tokens: Vec<&str> = label
            .split(|c: char| c.is_whitespace() || c == '-')
            .filter(|t| t.chars().count() >= MIN_TOKEN_CHARS)
            .collect();
        if let Some((entry, _)) = names
            .iter()
            .find(|(_, name)| tokens.iter().any(|t| name.contains(t)))
        {
            debug!("Label token of '{}' matched '{}'", label, entry.name());
            return Some(Resolution::new(*entry, MatchPhase::LabelToken));
        }
    }

    let document = comparable(query.document);
    if document.is_empty() {
        return None;
    }

    if let Some((entry, _)) = names.iter().find(|(_, name)| contains_either(&document, name)) {
        debug!("Document text matched '{}'", entry.name());
        return Some(Resolution::new(*entry, MatchPhase::Document));
    }

    let mut best: Option<(&E, f64)> = None;
    for (entry, name) in &names {
        let score = similarity(&document, name);
        if best.is_none_or(|(_, top)| score > top) {
            best = Some((*entry, score));
        }
    }

    match best {
        Some((entry, score)) if score > FUZZY_THRESHOLD => {
            debug!("Fuzzy match '{}' with score {:.3}", entry.name(), score);
            Some(Resolution::new(entry, MatchPhase::Fuzzy { score }))
        }
        _ => None,
    }
}

/// Resolve the brand against the whole brand list.
pub fn resolve_brand(catalog: &Catalog, query: &ResolveQuery<'_>) -> Option<Resolution> {
    let brands: Vec<_> = catalog.brands.iter().collect();
    resolve(query, &brands)
}

/// Resolve the model among the models of `brand_id`, or among all models
/// when no brand was resolved.
pub fn resolve_model(
    catalog: &Catalog,
    brand_id: Option<i64>,
    query: &ResolveQuery<'_>,
) -> Option<Resolution> {
    resolve(query, &catalog.models_for_brand(brand_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::catalog::{CatalogBrand, CatalogModel};
    use pretty_assertions::assert_eq;

    fn catalog() -> Catalog {
        let brand = |id, name: &str| CatalogBrand {
            id,
            name: name.to_string(),
        };
        let model = |id, brand_id, name: &str| CatalogModel {
            id,
            brand_id,
            name: name.to_string(),
        };

        Catalog::new(
            vec![brand(1, "RENAULT"), brand(2, "FIAT"), brand(3, "HYUNDAI"), brand(4, "")],
            vec![
                model(10, 1, "CLIO"),
                model(11, 1, "MEGANE"),
                model(20, 2, "DOBLO CARGO"),
                model(21, 2, "EGEA"),
                model(30, 3, "L250"),
                model(31, 3, "I20"),
            ],
        )
    }

    #[test]
    fn test_verbatim_label_resolves_in_label_phase() {
        let query = ResolveQuery::new(Some("Renault"), "MARKASI: RENAULT");
        let found = resolve_brand(&catalog(), &query).unwrap();
        assert_eq!(found.id, 1);
        assert_eq!(found.phase, MatchPhase::Label);
    }

    #[test]
    fn test_verbatim_document_resolves_without_fuzzy() {
        let query = ResolveQuery::new(None, "PLAKA 06 ABC 123 FIAT 2015");
        let found = resolve_brand(&catalog(), &query).unwrap();
        assert_eq!(found.id, 2);
        assert_eq!(found.phase, MatchPhase::Document);
    }

    #[test]
    fn test_label_token_refinement() {
        let query = ResolveQuery::new(Some("DOBLO-COMBİ MAXI"), "");
        let found = resolve_model(&catalog(), Some(2), &query).unwrap();
        assert_eq!(found.id, 20);
        assert_eq!(found.phase, MatchPhase::LabelToken);
    }

    #[test]
    fn test_composite_model_label() {
        let query = ResolveQuery::new(Some("L250-5V"), "");
        let found = resolve_model(&catalog(), Some(3), &query).unwrap();
        assert_eq!(found.id, 30);
    }

    #[test]
    fn test_fuzzy_fallback_above_threshold() {
        let query = ResolveQuery::new(None, "RENOLT");
        let found = resolve_brand(&catalog(), &query).unwrap();
        assert_eq!(found.id, 1);
        match found.phase {
            MatchPhase::Fuzzy { score } => assert!((score - 5.0 / 7.0).abs() < 1e-9),
            other => panic!("expected fuzzy match, got {:?}", other),
        }
    }

    #[test]
    fn test_fuzzy_fallback_below_threshold() {
        let query = ResolveQuery::new(None, "XQWZ");
        assert_eq!(resolve_brand(&catalog(), &query), None);
    }

    #[test]
    fn test_model_scoped_to_brand() {
        // EGEA exists only under FIAT
        let query = ResolveQuery::new(Some("EGEA"), "TİCARİ ADI: EGEA");
        assert_eq!(resolve_model(&catalog(), Some(1), &query), None);
        assert_eq!(resolve_model(&catalog(), Some(2), &query).map(|r| r.id), Some(21));
    }

    #[test]
    fn test_unresolved_brand_searches_all_models() {
        let query = ResolveQuery::new(Some("CLIO"), "");
        assert_eq!(resolve_model(&catalog(), None, &query).map(|r| r.id), Some(10));
    }

    #[test]
    fn test_empty_inputs() {
        let query = ResolveQuery::new(Some("   "), "   ");
        assert_eq!(resolve_brand(&catalog(), &query), None);
        assert_eq!(resolve_brand(&Catalog::default(), &ResolveQuery::new(Some("FIAT"), "FIAT")), None);
    }

    #[test]
    fn test_mixed_case_catalog_matches_upper_case_text() {
        let catalog = Catalog::new(
            vec![CatalogBrand { id: 2, name: "Fiat".to_string() }],
            vec![CatalogModel { id: 21, brand_id: 2, name: "Egea".to_string() }],
        );
        let query = ResolveQuery::new(Some("FIAT"), "MARKASI: FIAT TİPİ: EGEA");
        let found = resolve_brand(&catalog, &query).unwrap();
        assert_eq!(found.id, 2);
        assert_eq!(found.phase, MatchPhase::Label);

        let query = ResolveQuery::new(Some("EGEA"), "MARKASI: FIAT TİPİ: EGEA");
        assert_eq!(resolve_model(&catalog, Some(2), &query).map(|r| r.id), Some(21));
    }

    #[test]
    fn test_mixed_case_text_matches_upper_case_catalog() {
        // Turkish upper-casing turns the `i` of `Hyundai` into `İ`
        let query = ResolveQuery::new(Some("HYUNDAİ"), "(D.1) MARKASI: HYUNDAİ");
        assert_eq!(resolve_brand(&catalog(), &query).map(|r| r.id), Some(3));

        let query = ResolveQuery::new(Some("i20"), "TİPİ: İ20");
        assert_eq!(resolve_model(&catalog(), Some(3), &query).map(|r| r.id), Some(31));
    }

    #[test]
    fn test_phase_serialization() {
        let json = serde_json::to_value(MatchPhase::Fuzzy { score: 0.75 }).unwrap();
        assert_eq!(json, serde_json::json!({"kind": "fuzzy", "score": 0.75}));
    }
}
