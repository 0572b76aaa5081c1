//! Error types for the ruhsat-core library.
//!
//! Only document-level failures are errors. A field that cannot be extracted,
//! or a brand/model that cannot be resolved, is reported as an absent value.

use thiserror::Error;

/// Main error type for the ruhsat library.
#[derive(Error, Debug)]
pub enum RuhsatError {
    /// The document could not be transcribed.
    #[error("transcription error: {0}")]
    Transcription(#[from] TranscriptionError),

    /// Local OCR engine error.
    #[cfg(feature = "native")]
    #[error("OCR error: {0}")]
    Ocr(#[from] OcrError),

    /// Catalog could not be loaded.
    #[error("catalog error: {0}")]
    Catalog(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors raised at the transcription boundary.
#[derive(Error, Debug)]
pub enum TranscriptionError {
    /// The service answered with a non-success status.
    #[error("transcription failed: {0}")]
    Status(String),

    /// The service could not be reached or timed out.
    #[error("transport error: {0}")]
    Transport(String),

    /// The service answered with something we cannot read.
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// No image data was supplied.
    #[error("empty image")]
    EmptyImage,
}

/// Errors from the local OCR engine adapter.
#[cfg(feature = "native")]
#[derive(Error, Debug)]
pub enum OcrError {
    /// Failed to load OCR models.
    #[error("failed to load model: {0}")]
    ModelLoad(String),

    /// Image could not be decoded.
    #[error("invalid image: {0}")]
    InvalidImage(String),

    /// Text recognition failed.
    #[error("text recognition failed: {0}")]
    Recognition(String),
}

/// Result type for the ruhsat library.
pub type Result<T> = std::result::Result<T, RuhsatError>;
