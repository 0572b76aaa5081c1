//! Transcription adapters used by the extraction commands.

use std::time::Duration;

use serde::Deserialize;
use tracing::{debug, info};

use ruhsat_core::models::config::TranscriptionConfig;
use ruhsat_core::{LocalTranscriber, Transcription, TranscriptionError, TranscriptionService};

/// Client for a remote transcription service.
///
/// Posts the raw image bytes and expects `{"status": "success", "text": "..."}`.
pub struct HttpTranscriber {
    client: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
}

#[derive(Deserialize)]
struct ServiceResponse {
    status: String,
    #[serde(default)]
    text: String,
}

impl HttpTranscriber {
    pub fn new(endpoint: &str, api_key: Option<String>, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.to_string(),
            api_key,
        })
    }
}

impl TranscriptionService for HttpTranscriber {
    async fn transcribe(&self, image: &[u8]) -> Result<Transcription, TranscriptionError> {
        let mut request = self
            .client
            .post(&self.endpoint)
            .header(reqwest::header::CONTENT_TYPE, "application/octet-stream")
            .body(image.to_vec());

        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| TranscriptionError::Transport(e.to_string()))?;

        let body: ServiceResponse = response
            .json()
            .await
            .map_err(|e| TranscriptionError::InvalidResponse(e.to_string()))?;

        debug!("Transcription service answered '{}' with {} chars", body.status, body.text.len());

        Ok(Transcription::from_status(&body.status, body.text))
    }
}

/// The configured transcription backend.
pub enum Transcriber {
    Http(HttpTranscriber),
    Local(LocalTranscriber),
}

impl Transcriber {
    /// HTTP when an endpoint is configured, otherwise the local OCR models.
    pub fn from_config(config: &TranscriptionConfig) -> anyhow::Result<Self> {
        match &config.endpoint {
            Some(endpoint) => {
                info!("Using transcription service at {}", endpoint);
                Ok(Self::Http(HttpTranscriber::new(
                    endpoint,
                    config.api_key.clone(),
                    Duration::from_secs(config.timeout_secs),
                )?))
            }
            None => {
                let local = LocalTranscriber::from_config(config).map_err(|e| {
                    anyhow::anyhow!(
                        "{}.\n\nConfigure a transcription endpoint with \
                         'ruhsat config set transcription.endpoint <url>' \
                         or place the OCR models in {}.",
                        e,
                        config.model_dir.display()
                    )
                })?;
                Ok(Self::Local(local))
            }
        }
    }
}

impl TranscriptionService for Transcriber {
    async fn transcribe(&self, image: &[u8]) -> Result<Transcription, TranscriptionError> {
        match self {
            Transcriber::Http(http) => http.transcribe(image).await,
            Transcriber::Local(local) => Ok(run_blocking(|| local.transcribe_blocking(image))),
        }
    }
}

/// Run CPU-bound work without stalling the runtime's other tasks.
///
/// Documents in one batch stream still wait for each other; only the HTTP
/// backend overlaps requests.
fn run_blocking<T>(work: impl FnOnce() -> T) -> T {
    tokio::task::block_in_place(work)
}
