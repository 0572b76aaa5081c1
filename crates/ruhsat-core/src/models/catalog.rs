//! Brand/model reference catalog supplied by the surrounding application.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, RuhsatError};
use crate::resolver::CatalogEntry;

/// A vehicle brand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogBrand {
    pub id: i64,
    pub name: String,
}

/// A vehicle model, owned by exactly one brand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogModel {
    pub id: i64,
    #[serde(rename = "brandId")]
    pub brand_id: i64,
    pub name: String,
}

/// Read-only snapshot of the catalog, handed over wholesale per extraction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Catalog {
    pub brands: Vec<CatalogBrand>,
    pub models: Vec<CatalogModel>,
}

impl Catalog {
    pub fn new(brands: Vec<CatalogBrand>, models: Vec<CatalogModel>) -> Self {
        Self { brands, models }
    }

    /// Load a catalog from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parse a catalog from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| RuhsatError::Catalog(e.to_string()))
    }

    /// Models owned by `brand_id`, or every model when no brand is known.
    pub fn models_for_brand(&self, brand_id: Option<i64>) -> Vec<&CatalogModel> {
        self.models
            .iter()
            .filter(|m| brand_id.is_none_or(|b| m.brand_id == b))
            .collect()
    }

    pub fn brand(&self, id: i64) -> Option<&CatalogBrand> {
        self.brands.iter().find(|b| b.id == id)
    }

    pub fn model(&self, id: i64) -> Option<&CatalogModel> {
        self.models.iter().find(|m| m.id == id)
    }
}

impl CatalogEntry for CatalogBrand {
    fn id(&self) -> i64 {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl CatalogEntry for CatalogModel {
    fn id(&self) -> i64 {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> Catalog {
        Catalog::from_json(
            r#"{
                "brands": [{"id": 1, "name": "RENAULT"}, {"id": 2, "name": "FIAT"}],
                "models": [
                    {"id": 10, "brandId": 1, "name": "CLIO"},
                    {"id": 11, "brandId": 1, "name": "MEGANE"},
                    {"id": 20, "brandId": 2, "name": "EGEA"}
                ]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_parse_catalog_json() {
        let catalog = sample();
        assert_eq!(catalog.brands.len(), 2);
        assert_eq!(
            catalog.model(20),
            Some(&CatalogModel {
                id: 20,
                brand_id: 2,
                name: "EGEA".to_string()
            })
        );
        assert_eq!(catalog.brand(1).map(|b| b.name.as_str()), Some("RENAULT"));
    }

    #[test]
    fn test_models_for_brand() {
        let catalog = sample();
        let ids: Vec<i64> = catalog.models_for_brand(Some(1)).iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![10, 11]);
        assert_eq!(catalog.models_for_brand(None).len(), 3);
        assert!(catalog.models_for_brand(Some(99)).is_empty());
    }

    #[test]
    fn test_invalid_catalog_json() {
        let err = Catalog::from_json("{\"brands\": 5}").unwrap_err();
        assert!(matches!(err, RuhsatError::Catalog(_)));
    }

    #[test]
    fn test_catalog_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        std::fs::write(&path, serde_json::to_string(&sample()).unwrap()).unwrap();

        assert_eq!(Catalog::from_file(&path).unwrap(), sample());
    }
}
