//! Boundary to the external text transcription service.
//!
//! The service turns a photographed document into plain text. Anything other
//! than a success status aborts the whole document; field-level gaps in the
//! returned text are handled by the extractors.

use tracing::{debug, warn};

use crate::error::{Result, TranscriptionError};
use crate::models::catalog::Catalog;
use crate::registration::{ExtractionResult, RegistrationParser};

/// Outcome reported by the transcription service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranscriptionStatus {
    Success,
    /// Any non-success status, with the reason given by the service.
    Failed(String),
}

/// Text returned by the transcription service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transcription {
    pub status: TranscriptionStatus,
    pub text: String,
}

impl Transcription {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            status: TranscriptionStatus::Success,
            text: text.into(),
        }
    }

    pub fn failed(reason: impl Into<String>) -> Self {
        Self {
            status: TranscriptionStatus::Failed(reason.into()),
            text: String::new(),
        }
    }

    /// Build from a wire status string; only `success` (any case) succeeds.
    pub fn from_status(status: &str, text: impl Into<String>) -> Self {
        let status = if status.trim().eq_ignore_ascii_case("success") {
            TranscriptionStatus::Success
        } else {
            TranscriptionStatus::Failed(status.trim().to_string())
        };
        Self {
            status,
            text: text.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == TranscriptionStatus::Success
    }
}

/// A service that transcribes an image into text.
#[allow(async_fn_in_trait)]
pub trait TranscriptionService {
    /// Transcribe raw image bytes.
    async fn transcribe(&self, image: &[u8]) -> std::result::Result<Transcription, TranscriptionError>;
}

/// Transcribe a photographed document and parse the registration record.
///
/// The transcription is awaited once; a transport error or a non-success
/// status fails the whole document and no partial record is produced.
pub async fn read_registration<S: TranscriptionService>(
    service: &S,
    parser: &RegistrationParser,
    image: &[u8],
    catalog: &Catalog,
) -> Result<ExtractionResult> {
    if image.is_empty() {
        return Err(TranscriptionError::EmptyImage.into());
    }

    debug!("Sending {} bytes for transcription", image.len());
    let transcription = service.transcribe(image).await?;

    match transcription.status {
        TranscriptionStatus::Success => Ok(parser.parse(&transcription.text, catalog)),
        TranscriptionStatus::Failed(reason) => {
            warn!("Transcription failed: {}", reason);
            Err(TranscriptionError::Status(reason).into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RuhsatError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FakeService {
        response: std::result::Result<Transcription, String>,
        calls: AtomicUsize,
    }

    impl FakeService {
        fn new(response: std::result::Result<Transcription, String>) -> Self {
            Self {
                response,
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl TranscriptionService for FakeService {
        async fn transcribe(&self, _image: &[u8]) -> std::result::Result<Transcription, TranscriptionError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.response
                .clone()
                .map_err(TranscriptionError::Transport)
        }
    }

    #[tokio::test]
    async fn test_successful_transcription_is_parsed() {
        let service = FakeService::new(Ok(Transcription::success("PLAKA: 06 BK 4521")));
        let result = read_registration(&service, &RegistrationParser::new(), b"img", &Catalog::default())
            .await
            .unwrap();

        assert_eq!(result.registration.plate.as_deref(), Some("06BK4521"));
        assert_eq!(service.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failed_status_aborts_document() {
        let service = FakeService::new(Ok(Transcription::failed("blurry")));
        let err = read_registration(&service, &RegistrationParser::new(), b"img", &Catalog::default())
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            RuhsatError::Transcription(TranscriptionError::Status(ref reason)) if reason == "blurry"
        ));
    }

    #[tokio::test]
    async fn test_transport_error_propagates() {
        let service = FakeService::new(Err("connection refused".to_string()));
        let err = read_registration(&service, &RegistrationParser::new(), b"img", &Catalog::default())
            .await
            .unwrap_err();

        assert!(matches!(err, RuhsatError::Transcription(TranscriptionError::Transport(_))));
    }

    #[tokio::test]
    async fn test_empty_image_never_reaches_service() {
        let service = FakeService::new(Ok(Transcription::success("")));
        let err = read_registration(&service, &RegistrationParser::new(), b"", &Catalog::default())
            .await
            .unwrap_err();

        assert!(matches!(err, RuhsatError::Transcription(TranscriptionError::EmptyImage)));
        assert_eq!(service.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_status_from_wire() {
        assert!(Transcription::from_status("SUCCESS", "x").is_success());
        assert_eq!(
            Transcription::from_status("error", "").status,
            TranscriptionStatus::Failed("error".to_string())
        );
    }
}
