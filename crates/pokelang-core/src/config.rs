use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::{PokelangError, Result};

/// Serialized form of one language, as stored in `.toml` or `.json` files.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct LanguageDocument {
    pub name: String,
    /// Vocabulary, consumed in order by the leaf markers of `tree`.
    pub symbols: Vec<String>,
    /// Pre-order shape: `0` splits, `1` is a leaf. Read as signed integers so
    /// stray values reach validation instead of failing the parse.
    pub tree: Vec<i64>,
    #[serde(default)]
    pub drop_extra: bool,
    #[serde(default)]
    pub case_sensitive: bool,
}

impl LanguageDocument {
    pub fn from_toml_str(src: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(src)
    }

    pub fn from_json_str(src: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(src)
    }

    /// Parses a document, picking the format from the file extension.
    ///
    /// Returns `Ok(None)` for files that are not language documents.
    pub fn from_path(path: &Path) -> Result<Option<Self>> {
        let format = match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => DocumentFormat::Toml,
            Some("json") => DocumentFormat::Json,
            _ => return Ok(None),
        };
        let src = std::fs::read_to_string(path)?;
        let parsed = match format {
            DocumentFormat::Toml => Self::from_toml_str(&src).map_err(|e| e.to_string()),
            DocumentFormat::Json => Self::from_json_str(&src).map_err(|e| e.to_string()),
        };
        parsed.map(Some).map_err(|message| PokelangError::Parse {
            path: path.display().to_string(),
            message,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DocumentFormat {
    Toml,
    Json,
}

/// What a document translation does when one word cannot be translated.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum OnWordError {
    /// Abort the whole document with the word's error.
    #[default]
    Abort,
    /// Copy the word through unchanged and report it.
    KeepOriginal,
}

pub const DEFAULT_WORD_PATTERN: &str = "[a-zA-Z]+";

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct TranslatorConfig {
    /// Directory of language documents. Bundled languages are used when unset.
    pub languages_dir: Option<PathBuf>,
    pub word_pattern: String,
    pub on_word_error: OnWordError,
    pub from: String,
    pub to: String,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            languages_dir: None,
            word_pattern: DEFAULT_WORD_PATTERN.to_string(),
            on_word_error: OnWordError::Abort,
            from: "english".to_string(),
            to: "pika".to_string(),
        }
    }
}

impl TranslatorConfig {
    pub fn from_toml_str(src: &str) -> Result<Self> {
        toml::from_str(src).map_err(|e| PokelangError::Config(e.to_string()))
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let src = std::fs::read_to_string(path)?;
        Self::from_toml_str(&src)
    }
}
