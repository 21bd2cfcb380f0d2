use std::path::{Path, PathBuf};

use crate::config::LanguageDocument;
use crate::error::{PokelangError, Result};
use crate::language::LanguageDefinition;
use crate::registry::LanguageRegistry;

/// Outcome of loading a directory of language documents.
#[derive(Debug, Default)]
pub struct LoadReport {
    /// Names registered, in load order.
    pub registered: Vec<String>,
    /// Documents that failed to parse, validate or register.
    pub rejected: Vec<(PathBuf, PokelangError)>,
}

impl LoadReport {
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
    }
}

/// Loads every `.toml` and `.json` document in `dir` into `registry`.
///
/// Files are visited in file-name order. A bad document is logged and
/// recorded in the report; it never stops the rest of the load. Only a
/// failure to list `dir` itself is returned as an error.
pub fn load_dir(dir: &Path, registry: &LanguageRegistry) -> Result<LoadReport> {
    let mut paths = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() {
            paths.push(path);
        }
    }
    paths.sort();

    let mut report = LoadReport::default();
    for path in paths {
        match load_file(&path, registry) {
            Ok(Some(name)) => report.registered.push(name),
            Ok(None) => tracing::debug!("Skipping {}: not a language document", path.display()),
            Err(e) => {
                tracing::warn!("Rejected {}: {}", path.display(), e);
                report.rejected.push((path, e));
            }
        }
    }
    tracing::info!(
        "Loaded {} languages from {} ({} rejected)",
        report.registered.len(),
        dir.display(),
        report.rejected.len()
    );
    Ok(report)
}

/// Loads a single document. `Ok(None)` when the extension is not recognised.
pub fn load_file(path: &Path, registry: &LanguageRegistry) -> Result<Option<String>> {
    let Some(doc) = LanguageDocument::from_path(path)? else {
        return Ok(None);
    };
    let definition = LanguageDefinition::load(doc)?;
    let registered = registry.register(definition)?;
    Ok(Some(registered.name().to_string()))
}
