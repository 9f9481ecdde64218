//! Configuration structures for the receipt pipeline.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{DekontError, Result};

/// Main configuration for the dekont pipeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DekontConfig {
    /// Field extraction configuration.
    pub extraction: ExtractionConfig,

    /// PDF processing configuration.
    pub pdf: PdfConfig,
}

/// Receipt extraction configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Number of characters of normalized text kept in `diagnostics.rawExcerpt`.
    pub excerpt_chars: usize,

    /// Drop IBAN captures that are not `TR` followed by digits.
    pub enforce_iban_shape: bool,

    /// Record non-fatal issues in `diagnostics.warnings`.
    pub record_warnings: bool,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            excerpt_chars: 500,
            enforce_iban_shape: true,
            record_warnings: true,
        }
    }
}

/// PDF processing configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfConfig {
    /// Maximum pages to read (0 = unlimited). Receipts are one or two pages.
    pub max_pages: usize,

    /// Minimum extracted text length to treat the PDF as text-based.
    pub min_text_length: usize,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self {
            max_pages: 10,
            min_text_length: 20,
        }
    }
}

impl DekontConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| DekontError::Config(e.to_string()))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content =
            serde_json::to_string_pretty(self).map_err(|e| DekontError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: DekontConfig =
            serde_json::from_str(r#"{"extraction": {"excerpt_chars": 80}}"#).unwrap();
        assert_eq!(config.extraction.excerpt_chars, 80);
        assert!(config.extraction.enforce_iban_shape);
        assert_eq!(config.pdf, PdfConfig::default());
    }

    #[test]
    fn test_invalid_json_is_config_error() {
        let dir = std::env::temp_dir().join(format!("dekont-config-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("broken.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = DekontConfig::from_file(&path).unwrap_err();
        assert!(matches!(err, DekontError::Config(_)));

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_save_and_load() {
        let dir = std::env::temp_dir().join(format!("dekont-config-save-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.json");

        let mut config = DekontConfig::default();
        config.pdf.max_pages = 2;
        config.save(&path).unwrap();

        assert_eq!(DekontConfig::from_file(&path).unwrap(), config);
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
