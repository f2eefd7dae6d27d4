//! Crate-level error types.

use std::fmt;

/// Errors produced by the exoviz crate.
#[derive(Debug)]
pub enum ExovizError {
    /// Catalog JSON could not be decoded.
    CatalogParse(serde_json::Error),
    /// Catalog could not be fetched from a remote source.
    CatalogFetch(String),
    /// Generic I/O failure.
    Io(std::io::Error),
    /// Failed to spawn a background thread.
    ThreadSpawn(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
}

impl fmt::Display for ExovizError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CatalogParse(e) => write!(f, "catalog parse error: {e}"),
            Self::CatalogFetch(msg) => {
                write!(f, "catalog fetch error: {msg}")
            }
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::ThreadSpawn(e) => {
                write!(f, "failed to spawn thread: {e}")
            }
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
        }
    }
}

impl std::error::Error for ExovizError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::CatalogParse(e) => Some(e),
            Self::Io(e) | Self::ThreadSpawn(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ExovizError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for ExovizError {
    fn from(e: serde_json::Error) -> Self {
        Self::CatalogParse(e)
    }
}
