//! Error types for the seismic effect.

use thiserror::Error;

/// Errors surfaced by configuration loading and the tick driver.
#[derive(Error, Debug)]
pub enum SeismicError {
    /// A call argument was outside its domain. The call had no effect.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A configuration field failed validation.
    #[error("invalid configuration: {field} {reason}")]
    InvalidConfig {
        field: &'static str,
        reason: String,
    },

    /// The wave buffer has not been allocated (component disabled).
    #[error("wave buffer is not enabled")]
    NotEnabled,

    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, SeismicError>;
