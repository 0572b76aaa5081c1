//! Registration document field extraction module.

mod parser;
pub mod rules;

pub use parser::{ExtractionResult, RegistrationParser};

use crate::models::catalog::Catalog;
use crate::models::registration::RegistrationInfo;

/// Trait for registration record extractors.
pub trait RegistrationExtractor {
    /// Extract a registration record from transcribed text.
    fn extract_from_text(&self, text: &str, catalog: &Catalog) -> RegistrationInfo;
}
