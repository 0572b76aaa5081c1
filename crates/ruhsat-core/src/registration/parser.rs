//! Registration parser assembling every field extractor and the resolver.

use std::fmt::Debug;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::document::TranscribedDocument;
use crate::models::catalog::Catalog;
use crate::models::config::{ExtractionConfig, NameDictionary};
use crate::models::registration::RegistrationInfo;
use crate::resolver::{resolve_brand, resolve_model, Resolution, ResolveQuery};

use super::rules::{
    decompose_address, AddressExtractor, FieldCandidate, FieldExtractor, IdentityNumberExtractor,
    ModelYearExtractor, NameExtractor, PlateExtractor, SerialExtractor, UsageTypeExtractor,
    VehicleLabelExtractor,
};
use super::RegistrationExtractor;

/// Result of registration extraction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionResult {
    /// Extracted record.
    pub registration: RegistrationInfo,
    /// How the brand id was resolved.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<Resolution>,
    /// How the model id was resolved.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<Resolution>,
    /// Transcribed text the record was read from.
    pub raw_text: String,
    /// Fields that could not be extracted.
    pub missing_fields: Vec<String>,
    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

/// Rule-based registration parser.
///
/// Holds no per-document state; one parser can serve concurrent calls.
pub struct RegistrationParser {
    config: ExtractionConfig,
    /// Whether to validate identity number checksums.
    validate_identity: bool,
    /// Pinned model year range, otherwise derived from the current year.
    year_range: Option<(i32, i32)>,
}

impl RegistrationParser {
    /// Create a new parser with default settings.
    pub fn new() -> Self {
        Self::from_config(&ExtractionConfig::default())
    }

    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self {
            config: config.clone(),
            validate_identity: true,
            year_range: None,
        }
    }

    /// Set identity number checksum validation.
    pub fn with_identity_validation(mut self, validate: bool) -> Self {
        self.validate_identity = validate;
        self
    }

    /// Pin the accepted model year range.
    pub fn with_year_range(mut self, min_year: i32, max_year: i32) -> Self {
        self.year_range = Some((min_year, max_year));
        self
    }

    /// Replace the name dictionary used as a last-resort name source.
    pub fn with_name_dictionary(mut self, dictionary: NameDictionary) -> Self {
        self.config.name_dictionary = dictionary;
        self
    }

    fn model_year_extractor(&self) -> ModelYearExtractor {
        let extractor = ModelYearExtractor::from_config(&self.config);
        match self.year_range {
            Some((min, max)) => extractor.with_range(min, max),
            None => extractor,
        }
    }

    /// Parse a registration record from transcribed text.
    pub fn parse(&self, text: &str, catalog: &Catalog) -> ExtractionResult {
        let start = start_timer();
        let doc = TranscribedDocument::new(text);

        info!("Parsing registration from {} characters of text", text.len());

        let mut registration = RegistrationInfo {
            identity_number: accepted(
                "identity_number",
                IdentityNumberExtractor::new()
                    .with_validation(self.validate_identity)
                    .extract(&doc),
            ),
            first_name: accepted(
                "first_name",
                NameExtractor::first()
                    .with_dictionary(&self.config.name_dictionary)
                    .extract(&doc),
            ),
            last_name: accepted(
                "last_name",
                NameExtractor::last()
                    .with_dictionary(&self.config.name_dictionary)
                    .extract(&doc),
            ),
            address: accepted("address", AddressExtractor::new().extract(&doc)),
            plate: accepted("plate", PlateExtractor::new().extract(&doc)),
            model_year: accepted("model_year", self.model_year_extractor().extract(&doc)),
            usage_type: accepted("usage_type", UsageTypeExtractor::new().extract(&doc)),
            ..Default::default()
        };

        if let Some(address) = &registration.address {
            let parts = decompose_address(address);
            registration.district = parts.district;
            registration.city = parts.city;
        }

        if let Some(serial) = accepted("document_serial", SerialExtractor::new().extract(&doc)) {
            registration.registration_series = Some(serial.series);
            registration.registration_number = Some(serial.number);
        }

        // Model lookup is scoped by the brand, so brand goes first
        let brand_label = accepted("brand_label", VehicleLabelExtractor::brand().extract(&doc));
        let brand = resolve_brand(
            catalog,
            &ResolveQuery::new(brand_label.as_deref(), &doc.normalized),
        );
        let brand_id = brand.as_ref().map(|b| b.id);

        let model_label = accepted("model_label", VehicleLabelExtractor::model().extract(&doc));
        let model = resolve_model(
            catalog,
            brand_id,
            &ResolveQuery::new(model_label.as_deref(), &doc.normalized),
        );

        registration.brand_id = brand_id;
        registration.model_id = model.as_ref().map(|m| m.id);

        let missing_fields: Vec<String> = registration
            .missing_fields()
            .into_iter()
            .map(String::from)
            .collect();

        debug!(
            "Extracted registration with {} of {} fields, brand {:?}, model {:?}",
            RegistrationInfo::FIELD_NAMES.len() - missing_fields.len(),
            RegistrationInfo::FIELD_NAMES.len(),
            brand.as_ref().map(|b| &b.name),
            model.as_ref().map(|m| &m.name)
        );

        ExtractionResult {
            registration,
            brand,
            model,
            raw_text: text.to_string(),
            missing_fields,
            processing_time_ms: start.map_or(0, |s| s.elapsed().as_millis() as u64),
        }
    }
}

// No monotonic clock on wasm32-unknown-unknown
#[cfg(not(target_arch = "wasm32"))]
fn start_timer() -> Option<Instant> {
    Some(Instant::now())
}

#[cfg(target_arch = "wasm32")]
fn start_timer() -> Option<Instant> {
    None
}

/// Log the outcome of one field extractor and keep its value.
fn accepted<T: Debug>(field: &str, candidate: Option<FieldCandidate<T>>) -> Option<T> {
    match candidate {
        Some(c) => {
            debug!("{}: {:?} (rule {}, '{}')", field, c.value, c.rank, c.source);
            Some(c.value)
        }
        None => {
            debug!("{}: not found", field);
            None
        }
    }
}

impl Default for RegistrationParser {
    fn default() -> Self {
        Self::new()
    }
}

impl RegistrationExtractor for RegistrationParser {
    fn extract_from_text(&self, text: &str, catalog: &Catalog) -> RegistrationInfo {
        self.parse(text, catalog).registration
    }
}
