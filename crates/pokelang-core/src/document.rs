use regex::Regex;

use crate::config::{OnWordError, DEFAULT_WORD_PATTERN};
use crate::error::Result;
use crate::transcoder::Transcoder;

/// A translated document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translation {
    pub text: String,
    /// Words copied through unchanged under `OnWordError::KeepOriginal`.
    pub skipped: Vec<String>,
}

/// Translates whole documents word by word.
///
/// Every match of the word pattern is replaced by its translation; all text
/// between matches is copied byte for byte.
#[derive(Debug, Clone)]
pub struct DocumentTranslator {
    transcoder: Transcoder,
    pattern: Regex,
    on_word_error: OnWordError,
}

impl DocumentTranslator {
    pub fn new(transcoder: Transcoder) -> Result<Self> {
        Self::with_pattern(transcoder, DEFAULT_WORD_PATTERN)
    }

    pub fn with_pattern(transcoder: Transcoder, pattern: &str) -> Result<Self> {
        Ok(Self {
            transcoder,
            pattern: Regex::new(pattern)?,
            on_word_error: OnWordError::Abort,
        })
    }

    pub fn on_word_error(mut self, policy: OnWordError) -> Self {
        self.on_word_error = policy;
        self
    }

    pub fn transcoder(&self) -> &Transcoder {
        &self.transcoder
    }

    pub fn translate(&self, text: &str) -> Result<Translation> {
        let mut out = String::with_capacity(text.len() * 2);
        let mut skipped = Vec::new();
        let mut index = 0;

        for m in self.pattern.find_iter(text) {
            out.push_str(&text[index..m.start()]);
            match self.transcoder.translate(m.as_str()) {
                Ok(word) => out.push_str(&word),
                Err(e) => match self.on_word_error {
                    OnWordError::Abort => return Err(e),
                    OnWordError::KeepOriginal => {
                        tracing::warn!("Keeping untranslatable word: {}", e);
                        out.push_str(m.as_str());
                        skipped.push(m.as_str().to_string());
                    }
                },
            }
            index = m.end();
        }
        out.push_str(&text[index..]);

        Ok(Translation { text: out, skipped })
    }
}
