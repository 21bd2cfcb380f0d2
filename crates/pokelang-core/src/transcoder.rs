use std::sync::Arc;

use crate::error::{PokelangError, Result};
use crate::language::LanguageDefinition;
use crate::registry::LanguageRegistry;

/// Translates words from one language into another.
///
/// A word is encoded with the source language's code and the resulting
/// bit-string is decoded with the destination's. Holds no per-call state,
/// so one instance can serve any number of threads.
#[derive(Debug, Clone)]
pub struct Transcoder {
    from: Arc<LanguageDefinition>,
    to: Arc<LanguageDefinition>,
}

impl Transcoder {
    pub fn new(from: Arc<LanguageDefinition>, to: Arc<LanguageDefinition>) -> Self {
        Self { from, to }
    }

    /// Resolves both languages by name.
    pub fn from_registry(registry: &LanguageRegistry, from: &str, to: &str) -> Result<Self> {
        Ok(Self::new(registry.lookup(from)?, registry.lookup(to)?))
    }

    pub fn source(&self) -> &LanguageDefinition {
        &self.from
    }

    pub fn destination(&self) -> &LanguageDefinition {
        &self.to
    }

    /// Intermediate bit-string for `word`.
    pub fn bits(&self, word: &str) -> Result<String> {
        self.from.encode(word).map_err(|e| self.wrap(word, e))
    }

    pub fn translate(&self, word: &str) -> Result<String> {
        let bits = self.bits(word)?;
        self.to.decode(&bits).map_err(|e| self.wrap(word, e))
    }

    fn wrap(&self, word: &str, source: PokelangError) -> PokelangError {
        PokelangError::Translate {
            word: word.to_string(),
            from: self.from.name().to_string(),
            to: self.to.name().to_string(),
            source: Box::new(source),
        }
    }
}

/// Translates a single word between two registered languages.
pub fn translate_word(
    registry: &LanguageRegistry,
    word: &str,
    from: &str,
    to: &str,
) -> Result<String> {
    Transcoder::from_registry(registry, from, to)?.translate(word)
}
