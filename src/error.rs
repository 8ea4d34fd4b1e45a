use thiserror::Error;

use crate::datatype::{Key, Kind};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FlexError {
    #[error("Key not found: {key}")]
    NotFound { key: Key },
    #[error("Cannot translate attribute `{attribute}` into a {key_kind} key of {type_name}")]
    UnsupportedKeyConversion {
        attribute: String,
        key_kind: Kind,
        type_name: String,
    },
    #[error("Ambiguous construction: {first} cannot be combined with {second}")]
    AmbiguousConstruction {
        first: &'static str,
        second: &'static str,
    },
    #[error("Incompatible conversion of {what}: expected {expected}, found {found}")]
    IncompatibleConversion {
        what: String,
        expected: Kind,
        found: Kind,
    },
    #[error("{0} cannot be used as a key kind")]
    NotAKeyKind(Kind),
    #[error("Invalid symbol: {0:?}")]
    InvalidSymbol(String),
    #[error("Config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, FlexError>;

// Helper conversions
impl From<config::ConfigError> for FlexError {
    fn from(e: config::ConfigError) -> Self {
        Self::Config(e.to_string())
    }
}
