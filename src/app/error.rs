use thiserror::Error;

use crate::config::ConfigError;
use crate::config::run::CredentialSource;

#[derive(Error, Debug)]
pub enum FeederError {
    #[error("Jenkins URL required")]
    MissingTarget,

    #[error("Invalid {origin} string")]
    InvalidCredentialFormat { origin: CredentialSource },

    /// Carries whatever the server (or transport) said, verbatim.
    #[error("{body}")]
    FetchFailure { status: Option<u16>, body: String },

    #[error("Invalid timestamp '{value}': {source}")]
    TimestampParse {
        value: String,
        source: chrono::ParseError,
    },

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, FeederError>;
