//! WASM bindings for Turkish vehicle registration reading.
//!
//! The browser front-end transcribes the photographed document (or lets the
//! user paste text) and calls into these bindings to pre-fill the sale form.

use serde::Deserialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

use ruhsat_core::registration::rules;
use ruhsat_core::{
    read_registration, Catalog, ExtractionResult, RegistrationParser, Transcription,
    TranscriptionError, TranscriptionService,
};

/// Initialize panic hook for better error messages in console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Version information.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn to_js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// `undefined`/`null` mean an empty catalog.
fn catalog_from_js(catalog: JsValue) -> Result<Catalog, JsValue> {
    if catalog.is_undefined() || catalog.is_null() {
        return Ok(Catalog::default());
    }
    serde_wasm_bindgen::from_value(catalog).map_err(to_js_error)
}

/// Extract a registration record from transcribed text.
///
/// `catalog` is `{ brands: [{id, name}], models: [{id, brandId, name}] }`
/// and may be omitted, in which case brand and model ids stay empty.
#[wasm_bindgen]
pub fn extract_registration_from_text(text: &str, catalog: JsValue) -> Result<JsValue, JsValue> {
    let catalog = catalog_from_js(catalog)?;
    let result = RegistrationParser::new().parse(text, &catalog);

    serde_wasm_bindgen::to_value(&result.registration).map_err(to_js_error)
}

/// Validate a T.C. identity number (11 digits, two check digits).
#[wasm_bindgen]
pub fn validate_identity_number(number: &str) -> bool {
    rules::validate_identity_number(number)
}

/// Normalize a plate to its compact upper-case form, e.g. `06 bk 4521` to `06BK4521`.
#[wasm_bindgen]
pub fn normalize_plate(plate: &str) -> Option<String> {
    rules::normalize_plate(plate)
}

/// Split `district/city` off the tail of an address.
#[wasm_bindgen]
pub fn decompose_address(address: &str) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(&rules::decompose_address(address)).map_err(to_js_error)
}

/// Registration reader class for browser use.
#[wasm_bindgen]
pub struct RegistrationReader {
    parser: RegistrationParser,
    catalog: Catalog,
}

#[wasm_bindgen]
impl RegistrationReader {
    /// Create a reader with an optional catalog object.
    #[wasm_bindgen(constructor)]
    pub fn new(catalog: JsValue) -> Result<RegistrationReader, JsValue> {
        Ok(Self {
            parser: RegistrationParser::new(),
            catalog: catalog_from_js(catalog)?,
        })
    }

    /// Create a reader from catalog JSON text.
    #[wasm_bindgen]
    pub fn from_catalog_json(json: &str) -> Result<RegistrationReader, JsValue> {
        Ok(Self {
            parser: RegistrationParser::new(),
            catalog: Catalog::from_json(json).map_err(to_js_error)?,
        })
    }

    /// Configure identity number checksum validation.
    #[wasm_bindgen]
    pub fn set_validate_identity(&mut self, validate: bool) {
        self.parser = std::mem::take(&mut self.parser).with_identity_validation(validate);
    }

    /// Restrict accepted model years.
    #[wasm_bindgen]
    pub fn set_year_range(&mut self, min_year: i32, max_year: i32) {
        self.parser = std::mem::take(&mut self.parser).with_year_range(min_year, max_year);
    }

    #[wasm_bindgen]
    pub fn brand_count(&self) -> usize {
        self.catalog.brands.len()
    }

    #[wasm_bindgen]
    pub fn model_count(&self) -> usize {
        self.catalog.models.len()
    }

    /// Extract the registration record from text.
    #[wasm_bindgen]
    pub fn extract(&self, text: &str) -> Result<JsValue, JsValue> {
        let result = self.parser.parse(text, &self.catalog);
        serde_wasm_bindgen::to_value(&result.registration).map_err(to_js_error)
    }

    /// Get extraction result with resolution details and missing fields.
    #[wasm_bindgen]
    pub fn extract_with_metadata(&self, text: &str) -> Result<JsValue, JsValue> {
        let result = self.parser.parse(text, &self.catalog);
        serde_wasm_bindgen::to_value(&result).map_err(to_js_error)
    }

    /// Same as `extract_with_metadata`, as a JSON string.
    #[wasm_bindgen]
    pub fn extract_json(&self, text: &str) -> Result<String, JsValue> {
        let result = self.parser.parse(text, &self.catalog);
        serde_json::to_string(&result).map_err(to_js_error)
    }
}

/// What the page's transcription callback resolves to.
#[derive(Deserialize)]
struct CallbackResponse {
    status: String,
    #[serde(default)]
    text: String,
}

/// Transcription backed by a JS callback `(bytes: Uint8Array) => Promise<{status, text}>`.
struct JsTranscriber {
    callback: js_sys::Function,
}

impl TranscriptionService for JsTranscriber {
    async fn transcribe(&self, image: &[u8]) -> Result<Transcription, TranscriptionError> {
        let bytes = js_sys::Uint8Array::from(image);
        let returned = self
            .callback
            .call1(&JsValue::NULL, &bytes)
            .map_err(|e| TranscriptionError::Transport(describe(&e)))?;

        let value = JsFuture::from(js_sys::Promise::resolve(&returned))
            .await
            .map_err(|e| TranscriptionError::Transport(describe(&e)))?;

        let response: CallbackResponse = serde_wasm_bindgen::from_value(value)
            .map_err(|e| TranscriptionError::InvalidResponse(e.to_string()))?;

        Ok(Transcription::from_status(&response.status, response.text))
    }
}

fn describe(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}

/// Transcribe an image through `transcribe` and extract the registration.
///
/// Resolves to the extraction result, or rejects when the transcription
/// fails; the caller should ask for a new photograph in that case.
#[wasm_bindgen]
pub async fn read_registration_image(
    image: Vec<u8>,
    transcribe: js_sys::Function,
    catalog: JsValue,
) -> Result<JsValue, JsValue> {
    let catalog = catalog_from_js(catalog)?;
    let service = JsTranscriber {
        callback: transcribe,
    };

    let result: ExtractionResult =
        read_registration(&service, &RegistrationParser::new(), &image, &catalog)
            .await
            .map_err(|e| {
                web_sys::console::warn_1(&JsValue::from_str(&e.to_string()));
                to_js_error(e)
            })?;

    serde_wasm_bindgen::to_value(&result).map_err(to_js_error)
}
