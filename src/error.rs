//! Error types for the restyle engine and the hero image generator.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for restyle operations.
#[derive(Error, Debug)]
pub enum RestyleError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),

    #[error("Glob pattern error: {0}")]
    Glob(#[from] globset::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid rule '{name}': {message}")]
    InvalidRule { name: String, message: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Base64 decode error: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("Image generation failed: {message}")]
    Generation { message: String },

    #[error("Missing credentials: {0} is not set")]
    MissingCredentials(String),
}

/// A specialized Result type for restyle operations.
pub type Result<T> = std::result::Result<T, RestyleError>;
