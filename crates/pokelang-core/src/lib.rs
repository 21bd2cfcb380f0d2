pub mod builtin;
pub mod config;
pub mod document;
pub mod error;
pub mod language;
pub mod loader;
pub mod registry;
pub mod transcoder;

pub use config::{LanguageDocument, OnWordError, TranslatorConfig};
pub use document::{DocumentTranslator, Translation};
pub use error::{DefinitionError, PokelangError, Result};
pub use language::LanguageDefinition;
pub use loader::LoadReport;
pub use registry::LanguageRegistry;
pub use transcoder::{translate_word, Transcoder};

/// Assembles a registry and a document translator from configuration.
///
/// ## Startup Only
/// Languages are loaded while the builder runs. Once `build` returns, the
/// registry is only read.
pub struct TranslatorBuilder {
    pub registry: LanguageRegistry,
    pub config: TranslatorConfig,
}

impl Default for TranslatorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TranslatorBuilder {
    pub fn new() -> Self {
        Self {
            registry: LanguageRegistry::new(),
            config: TranslatorConfig::default(),
        }
    }

    /// Overrides the default configuration.
    pub fn with_config(mut self, config: TranslatorConfig) -> Self {
        self.config = config;
        self
    }

    /// Registers one language document.
    pub fn language(self, doc: LanguageDocument) -> Result<Self> {
        self.registry.register(LanguageDefinition::load(doc)?)?;
        Ok(self)
    }

    /// Loads `config.languages_dir`, or the bundled languages when unset.
    ///
    /// Rejected documents are logged and returned in the report.
    pub fn load_languages(self) -> Result<(Self, LoadReport)> {
        let report = match &self.config.languages_dir {
            Some(dir) => loader::load_dir(dir, &self.registry)?,
            None => {
                builtin::register_all(&self.registry)?;
                LoadReport {
                    registered: builtin::documents()?.into_iter().map(|d| d.name).collect(),
                    rejected: Vec::new(),
                }
            }
        };
        Ok((self, report))
    }

    /// Resolves `config.from` / `config.to` and compiles the word pattern.
    pub fn build(self) -> Result<(LanguageRegistry, DocumentTranslator)> {
        let transcoder = Transcoder::from_registry(&self.registry, &self.config.from, &self.config.to)?;
        let translator = DocumentTranslator::with_pattern(transcoder, &self.config.word_pattern)?
            .on_word_error(self.config.on_word_error);
        Ok((self.registry, translator))
    }
}
