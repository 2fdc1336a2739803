//! # CLI Error Types
//!
//! Failures of the shell around the pricing engine: files, formats and
//! catalog lookups. Pricing rule violations arrive wrapped as
//! [`CliError::Core`].

use std::path::PathBuf;

use rental_core::CoreError;
use thiserror::Error;

/// Result type alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    // =========================================================================
    // Input Errors
    // =========================================================================
    /// Reading an input or config file failed.
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Catalog or draft JSON is malformed.
    #[error("Invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Pricing config TOML is malformed.
    #[error("Invalid config file {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    // =========================================================================
    // Output Errors
    // =========================================================================
    #[error("Failed to render JSON: {0}")]
    RenderJson(#[from] serde_json::Error),

    #[error("Failed to render TOML: {0}")]
    RenderToml(#[from] toml::ser::Error),

    // =========================================================================
    // Lookup & Domain Errors
    // =========================================================================
    /// The draft references an id the catalog does not contain.
    #[error("Unknown catalog item: {0}")]
    UnknownItem(String),

    /// Catalog validation found errors.
    #[error("Catalog has {0} invalid item(s)")]
    InvalidCatalog(usize),

    /// Pricing rule violation.
    #[error(transparent)]
    Core(#[from] CoreError),
}
