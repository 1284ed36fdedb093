use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading a GDP table or loading its configuration.
///
/// Bad numeric cells are never reported here; the series builder drops them.
#[derive(Error, Debug)]
pub enum GdpError {
    #[error("cannot open {}: {source}", path.display())]
    FileNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("key field {field:?} not found in header of {}", path.display())]
    MissingKeyField { field: String, path: PathBuf },

    #[error("{name} must be a single ASCII character, got {ch:?}")]
    InvalidDialect { name: &'static str, ch: char },

    #[error("invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, GdpError>;
