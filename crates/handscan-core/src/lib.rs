//! Handscan Core Library
//!
//! This crate provides the domain types, error taxonomy, configuration and
//! media-type rules shared by the upload client, the upload widget and the CLI.

pub mod config;
pub mod constants;
pub mod error;
pub mod media;
pub mod models;

// Re-export commonly used types
pub use config::UploadConfig;
pub use error::{ErrorMetadata, LogLevel, UploadError};
pub use models::{SelectedFile, ServerResult, UploadState};
