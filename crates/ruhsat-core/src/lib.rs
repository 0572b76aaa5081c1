//! Core library for reading Turkish vehicle registration documents (ruhsat).
//!
//! This crate provides:
//! - Rule-based field extraction from transcribed document text
//!   (identity number, owner name, address, plate, document serial, model year, usage)
//! - Brand/model resolution against a reference catalog
//! - The transcription boundary used to turn a photographed document into text

pub mod error;
pub mod models;
pub mod document;
pub mod registration;
pub mod resolver;
pub mod transcription;
#[cfg(feature = "native")]
pub mod ocr;

pub use error::{Result, RuhsatError, TranscriptionError};
pub use document::TranscribedDocument;
pub use models::catalog::{Catalog, CatalogBrand, CatalogModel};
pub use models::config::RuhsatConfig;
pub use models::registration::{RegistrationInfo, UsageType};
pub use registration::{ExtractionResult, RegistrationExtractor, RegistrationParser};
pub use resolver::{resolve, resolve_brand, resolve_model, similarity, MatchPhase, Resolution, ResolveQuery};
pub use transcription::{read_registration, Transcription, TranscriptionService, TranscriptionStatus};

#[cfg(feature = "native")]
pub use error::OcrError;
#[cfg(feature = "native")]
pub use ocr::LocalTranscriber;
