// Error types for the simulation core

use thiserror::Error;

/// Result type for simulation operations
pub type ExoResult<T> = Result<T, ExoError>;

/// Errors surfaced to the session/controller layer
#[derive(Error, Debug)]
pub enum ExoError {
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("no input files supplied for analysis")]
    NoInputFiles,

    #[error("telescope source not selected")]
    MissingTelescopeSource,

    #[error("configuration error: {0}")]
    Config(String),

    #[error("logging error: {0}")]
    Logging(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ExoError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        ExoError::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }

    /// Name of the offending parameter, if this is a parameter violation
    pub fn parameter(&self) -> Option<&'static str> {
        match self {
            ExoError::InvalidParameter { name, .. } => Some(*name),
            _ => None,
        }
    }
}
