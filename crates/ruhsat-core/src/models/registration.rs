//! Registration record produced by the extractor.

use serde::{Deserialize, Serialize};

/// Customer and vehicle data read from a registration document.
///
/// Every field is independently optional; a missing field is left blank
/// for manual entry by the sale form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationInfo {
    /// T.C. identity number (or 11-digit tax id).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identity_number: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,

    /// Owner address as printed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub district: Option<String>,

    /// Plate without separators, e.g. `34ABC123`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plate: Option<String>,

    /// Document series (2 letters).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registration_series: Option<String>,

    /// Document number (6 digits).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registration_number: Option<String>,

    /// Catalog brand id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand_id: Option<i64>,

    /// Catalog model id, always owned by `brand_id` when both are set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_id: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_year: Option<i32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage_type: Option<UsageType>,
}

/// Vehicle usage category printed on the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UsageType {
    /// Hususi.
    Private,
    /// Ticari.
    Commercial,
    /// Taksi.
    Taxi,
}

impl UsageType {
    /// Map free text to a usage category by substring containment.
    ///
    /// Taxi is checked first since commercial taxis are often printed as
    /// "TİCARİ TAKSİ".
    pub fn from_text(s: &str) -> Option<Self> {
        let folded = crate::document::fold_ascii(&crate::document::turkish_upper(s));

        if folded.contains("TAKS") {
            Some(UsageType::Taxi)
        } else if folded.contains("HUSUS") {
            Some(UsageType::Private)
        } else if folded.contains("TICAR") {
            Some(UsageType::Commercial)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UsageType::Private => "PRIVATE",
            UsageType::Commercial => "COMMERCIAL",
            UsageType::Taxi => "TAXI",
        }
    }
}

impl std::fmt::Display for UsageType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl RegistrationInfo {
    /// True when nothing at all could be read.
    pub fn is_empty(&self) -> bool {
        self.missing_fields().len() == Self::FIELD_NAMES.len()
    }

    /// Output field names, in record order.
    pub const FIELD_NAMES: [&'static str; 13] = [
        "identity_number",
        "first_name",
        "last_name",
        "address",
        "city",
        "district",
        "plate",
        "registration_series",
        "registration_number",
        "brand_id",
        "model_id",
        "model_year",
        "usage_type",
    ];

    /// Names of the fields that are still blank.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let present = [
            self.identity_number.is_some(),
            self.first_name.is_some(),
            self.last_name.is_some(),
            self.address.is_some(),
            self.city.is_some(),
            self.district.is_some(),
            self.plate.is_some(),
            self.registration_series.is_some(),
            self.registration_number.is_some(),
            self.brand_id.is_some(),
            self.model_id.is_some(),
            self.model_year.is_some(),
            self.usage_type.is_some(),
        ];

        Self::FIELD_NAMES
            .iter()
            .zip(present)
            .filter(|(_, present)| !present)
            .map(|(name, _)| *name)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usage_type_from_text() {
        assert_eq!(UsageType::from_text("HUSUSİ"), Some(UsageType::Private));
        assert_eq!(UsageType::from_text("hususi"), Some(UsageType::Private));
        assert_eq!(UsageType::from_text("TİCARİ"), Some(UsageType::Commercial));
        assert_eq!(UsageType::from_text("TICARI"), Some(UsageType::Commercial));
        assert_eq!(UsageType::from_text("TİCARİ TAKSİ"), Some(UsageType::Taxi));
        assert_eq!(UsageType::from_text("RESMİ"), None);
    }

    #[test]
    fn test_usage_type_serde() {
        let json = serde_json::to_string(&UsageType::Commercial).unwrap();
        assert_eq!(json, "\"COMMERCIAL\"");
        let back: UsageType = serde_json::from_str("\"TAXI\"").unwrap();
        assert_eq!(back, UsageType::Taxi);
    }

    #[test]
    fn test_missing_fields() {
        let empty = RegistrationInfo::default();
        assert!(empty.is_empty());
        assert_eq!(empty.missing_fields().len(), 13);

        let info = RegistrationInfo {
            plate: Some("34ABC123".to_string()),
            model_year: Some(2019),
            ..Default::default()
        };
        assert!(!info.is_empty());
        assert!(!info.missing_fields().contains(&"plate"));
        assert!(info.missing_fields().contains(&"brand_id"));
    }

    #[test]
    fn test_absent_fields_not_serialized() {
        let info = RegistrationInfo {
            city: Some("ANKARA".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_string(&info).unwrap();
        assert_eq!(json, r#"{"city":"ANKARA"}"#);
    }
}
