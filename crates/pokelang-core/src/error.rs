use pokelang_dsa::ShapeError;
use thiserror::Error;

/// A language document was rejected during validation.
///
/// Rejections are reported per document; loading continues with the others.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DefinitionError {
    #[error("language name is empty")]
    EmptyName,

    #[error("language '{language}': symbol {index} is empty")]
    EmptySymbol { language: String, index: usize },

    #[error("language '{language}': symbol '{symbol}' is listed more than once")]
    DuplicateSymbol { language: String, symbol: String },

    #[error("language '{language}': {source}")]
    Shape {
        language: String,
        #[source]
        source: ShapeError,
    },
}

#[derive(Debug, Error)]
pub enum PokelangError {
    #[error("unknown language '{0}'")]
    UnknownLanguage(String),

    #[error("language '{0}' is already registered")]
    DuplicateLanguage(String),

    #[error(transparent)]
    Definition(#[from] DefinitionError),

    #[error("cannot segment '{word}' into '{language}' symbols at offset {offset}")]
    Segmentation {
        word: String,
        language: String,
        offset: usize,
    },

    #[error("language '{language}': invalid bit '{character}' at index {index}")]
    DecodeBit {
        language: String,
        character: char,
        index: usize,
    },

    #[error("translating '{word}' from '{from}' to '{to}': {source}")]
    Translate {
        word: String,
        from: String,
        to: String,
        #[source]
        source: Box<PokelangError>,
    },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("invalid word pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("cannot parse {path}: {message}")]
    Parse { path: String, message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PokelangError>;
