//! Error types

use thiserror::Error;

/// Failures from date parsing
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimeError {
    /// No 4-digit year could be found. Displays as the legacy sentinel so
    /// spreadsheets written by older versions keep their wording.
    #[error("Invalid Date")]
    InvalidDate,

    #[error("could not parse date {input:?}: expected MM/DD/YYYY")]
    BadFormat { input: String },
}

/// A play status cell that matches none of the known statuses
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown play status {0:?}")]
pub struct UnknownStatus(pub String);

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("error reading config: {0}")]
    Io(#[from] std::io::Error),

    #[error("error parsing config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("error writing config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Errors reported by a [`Storefront`](crate::steam::Storefront) implementation
#[derive(Debug, Error)]
pub enum StorefrontError {
    #[error("network error: {0}")]
    Network(String),

    #[error("storefront returned status {0}")]
    Status(u16),

    #[error("failed to parse storefront response: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("app {0} not found")]
    NotFound(u64),
}
