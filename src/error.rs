//! Error types for HAL documents and CURIE handling

use thiserror::Error;

#[derive(Error, Debug)]
pub enum HalError {
    #[error("Invalid CURIE template '{template}' for prefix '{prefix}': must contain exactly one {{rel}} placeholder")]
    InvalidCuriTemplate { prefix: String, template: String },

    #[error("Missing required field '{field}' in {what}")]
    MissingField { what: String, field: String },

    #[error("Invalid link for rel '{rel}': {reason}")]
    InvalidLink { rel: String, reason: String },

    #[error("Invalid HAL document: {0}")]
    InvalidDocument(String),

    #[error("Failed to load document from {path}: {reason}")]
    LoadError { path: String, reason: String },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
