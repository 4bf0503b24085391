//! Upload client and widget model for the handscan backend.
//!
//! [`UploadClient`] performs the multipart POST with byte-level progress.
//! [`UploadForm`] wraps it in the single-flight widget state that hosts render,
//! and [`UploadView`] turns that state into what a host draws. The CLI crate is
//! one such host.

pub mod client;
pub mod form;
pub mod view;

pub use client::{decode_response, Progress, UploadClient};
pub use form::{NoOpUploadHost, UploadForm, UploadHost, UploadOutcome};
pub use view::{ProgressIndicator, UploadView};

// Re-export domain types for convenience.
pub use handscan_core::{
    ErrorMetadata, SelectedFile, ServerResult, UploadConfig, UploadError, UploadState,
};
