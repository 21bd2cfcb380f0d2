//! Languages compiled into the crate.

use crate::config::LanguageDocument;
use crate::error::{PokelangError, Result};
use crate::language::LanguageDefinition;
use crate::registry::LanguageRegistry;

pub const ENGLISH: &str = include_str!("../../../languages/english.toml");
pub const PIKA: &str = include_str!("../../../languages/pika.toml");

const BUNDLED: [(&str, &str); 2] = [("english.toml", ENGLISH), ("pika.toml", PIKA)];

/// Parsed bundled documents.
pub fn documents() -> Result<Vec<LanguageDocument>> {
    BUNDLED
        .iter()
        .map(|(file, src)| {
            LanguageDocument::from_toml_str(src).map_err(|e| PokelangError::Parse {
                path: (*file).to_string(),
                message: e.to_string(),
            })
        })
        .collect()
}

/// Registers every bundled language.
pub fn register_all(registry: &LanguageRegistry) -> Result<()> {
    for doc in documents()? {
        registry.register(LanguageDefinition::load(doc)?)?;
    }
    Ok(())
}

/// A fresh registry holding only the bundled languages.
pub fn registry() -> Result<LanguageRegistry> {
    let registry = LanguageRegistry::new();
    register_all(&registry)?;
    Ok(registry)
}
