//! Configuration structures for the ruhsat pipeline.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{Result, RuhsatError};

/// Main configuration for the ruhsat pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RuhsatConfig {
    /// Field extraction configuration.
    pub extraction: ExtractionConfig,

    /// Transcription service configuration.
    pub transcription: TranscriptionConfig,

    /// Catalog location.
    pub catalog: CatalogConfig,
}

/// Field extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Oldest accepted model year.
    pub min_model_year: i32,

    /// How many years past the current one a model year may be.
    pub future_year_allowance: i32,

    /// Last-resort name heuristics.
    pub name_dictionary: NameDictionary,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            min_model_year: 1990,
            future_year_allowance: 1,
            name_dictionary: NameDictionary::default(),
        }
    }
}

/// Common given names and surnames used when no labeled name is found.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NameDictionary {
    /// Use the dictionary fallback at all.
    pub enabled: bool,

    /// Given names, upper-case.
    pub given_names: Vec<String>,

    /// Surnames, upper-case.
    pub surnames: Vec<String>,
}

const DEFAULT_GIVEN_NAMES: &[&str] = &[
    "MEHMET", "AHMET", "MUSTAFA", "ALİ", "HÜSEYİN", "HASAN", "İBRAHİM", "MURAT", "ÖMER",
    "FATMA", "AYŞE", "EMİNE", "HATİCE", "ZEYNEP", "ELİF", "MERVE",
];

const DEFAULT_SURNAMES: &[&str] = &[
    "YILMAZ", "KAYA", "DEMİR", "ŞAHİN", "ÇELİK", "YILDIZ", "YILDIRIM", "ÖZTÜRK", "AYDIN",
    "ÖZDEMİR", "ARSLAN", "DOĞAN", "KILIÇ", "ASLAN", "ÇETİN", "KARA",
];

impl Default for NameDictionary {
    fn default() -> Self {
        Self {
            enabled: true,
            given_names: DEFAULT_GIVEN_NAMES.iter().map(|s| s.to_string()).collect(),
            surnames: DEFAULT_SURNAMES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl NameDictionary {
    /// A dictionary that never matches.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            given_names: Vec::new(),
            surnames: Vec::new(),
        }
    }
}

/// Transcription service configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TranscriptionConfig {
    /// HTTP endpoint of the transcription service. When unset, the local
    /// OCR engine is used.
    pub endpoint: Option<String>,

    /// Bearer token sent to the service.
    pub api_key: Option<String>,

    /// Request timeout in seconds.
    pub timeout_secs: u64,

    /// Directory containing local OCR model files.
    pub model_dir: PathBuf,

    /// Keep `[UNK]` markers emitted by the local recognizer.
    pub keep_unk: bool,
}

impl Default for TranscriptionConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            api_key: None,
            timeout_secs: 30,
            model_dir: PathBuf::from("models"),
            keep_unk: false,
        }
    }
}

/// Catalog location.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Default catalog JSON file.
    pub path: Option<PathBuf>,
}

impl RuhsatConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| RuhsatError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<()> {
        let content =
            serde_json::to_string_pretty(self).map_err(|e| RuhsatError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
