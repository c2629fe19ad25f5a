//! Error handling for IBAN registry conversion.
//!
//! Only structural problems are errors here. Individual cells never fail to
//! parse; they degrade to zero, an absent range or an empty list instead.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum IbanRegistryError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Registry file not found at path: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Missing required row '{label}' in registry file")]
    MissingColumn { label: String },

    #[error("JSON serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Failed to write output file: {path}")]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl IbanRegistryError {
    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a missing row error for the given source label
    pub fn missing_column(label: impl Into<String>) -> Self {
        Self::MissingColumn {
            label: label.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, IbanRegistryError>;
