//! `pure-onnx-ocr` engine wrapper.

use std::path::Path;
use std::time::Instant;

use image::GenericImageView;
use tracing::{debug, info, warn};

use crate::error::{OcrError, TranscriptionError};
use crate::models::config::TranscriptionConfig;
use crate::transcription::{Transcription, TranscriptionService};

use super::{reading_order_text, TextBox};

/// Transcription service running the OCR models in-process.
pub struct LocalTranscriber {
    engine: pure_onnx_ocr::engine::OcrEngine,
    keep_unk: bool,
}

impl LocalTranscriber {
    /// Load the detection/recognition models from a directory.
    ///
    /// Expects `det.onnx`, `latin_rec.onnx` and `latin_dict.txt`.
    pub fn from_dir(model_dir: &Path) -> Result<Self, OcrError> {
        let det_path = model_dir.join("det.onnx");
        let rec_path = model_dir.join("latin_rec.onnx");
        let dict_path = model_dir.join("latin_dict.txt");

        for path in [&det_path, &rec_path, &dict_path] {
            if !path.exists() {
                return Err(OcrError::ModelLoad(format!("missing {}", path.display())));
            }
        }

        let engine = pure_onnx_ocr::engine::OcrEngineBuilder::new()
            .det_model_path(&det_path)
            .rec_model_path(&rec_path)
            .dictionary_path(&dict_path)
            .build()
            .map_err(|e| OcrError::ModelLoad(format!("pure-onnx-ocr: {}", e)))?;

        info!("Loaded pure-onnx-ocr engine from {}", model_dir.display());

        Ok(Self {
            engine,
            keep_unk: false,
        })
    }

    pub fn from_config(config: &TranscriptionConfig) -> Result<Self, OcrError> {
        Ok(Self::from_dir(&config.model_dir)?.with_keep_unk(config.keep_unk))
    }

    /// Keep the engine's `[UNK]` markers instead of blanking them.
    pub fn with_keep_unk(mut self, keep_unk: bool) -> Self {
        self.keep_unk = keep_unk;
        self
    }

    /// Recognize the text of an encoded image.
    pub fn recognize(&self, image: &[u8]) -> Result<String, OcrError> {
        let start = Instant::now();

        let image = image::load_from_memory(image).map_err(|e| OcrError::InvalidImage(e.to_string()))?;
        let (width, height) = image.dimensions();
        debug!("Processing image: {}x{}", width, height);

        let results = self
            .engine
            .run_from_image(&image)
            .map_err(|e| OcrError::Recognition(format!("pure-onnx-ocr: {}", e)))?;

        let boxes: Vec<TextBox> = results
            .iter()
            .map(|r| {
                let text = if self.keep_unk {
                    r.text.clone()
                } else {
                    r.text.replace("[UNK]", " ")
                };
                TextBox {
                    rect: polygon_rect(&r.bounding_box),
                    text,
                    confidence: r.confidence,
                }
            })
            .collect();

        info!(
            "OCR complete: {} text regions in {}ms",
            boxes.len(),
            start.elapsed().as_millis()
        );

        Ok(reading_order_text(boxes))
    }

    /// Synchronous transcription. Engine errors become a failed status.
    pub fn transcribe_blocking(&self, image: &[u8]) -> Transcription {
        match self.recognize(image) {
            Ok(text) => Transcription::success(text),
            Err(e) => {
                warn!("Local OCR failed: {}", e);
                Transcription::failed(e.to_string())
            }
        }
    }
}

impl TranscriptionService for LocalTranscriber {
    async fn transcribe(&self, image: &[u8]) -> Result<Transcription, TranscriptionError> {
        Ok(self.transcribe_blocking(image))
    }
}

/// Axis-aligned bounds of a detection polygon.
fn polygon_rect(polygon: &pure_onnx_ocr::Polygon<f64>) -> (f32, f32, f32, f32) {
    let mut rect = (f32::INFINITY, f32::INFINITY, f32::NEG_INFINITY, f32::NEG_INFINITY);
    for coord in polygon.exterior().coords() {
        rect.0 = rect.0.min(coord.x as f32);
        rect.1 = rect.1.min(coord.y as f32);
        rect.2 = rect.2.max(coord.x as f32);
        rect.3 = rect.3.max(coord.y as f32);
    }
    rect
}
