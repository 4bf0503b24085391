//! Error types module
//!
//! Every way an upload can fail is represented by [`UploadError`]. The widget
//! collapses all of them into one user-facing alert, so the only programmatic
//! distinction callers get is the message produced by
//! [`ErrorMetadata::user_message`].

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use serde_json::Value;

use crate::constants::ALERT_PREFIX;

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected rejections like a busy widget
    Debug,
    /// Warning level - for failures caused by the remote side
    Warn,
    /// Error level - for unexpected failures
    Error,
}

/// Metadata describing how an error should be presented to the user.
pub trait ErrorMetadata {
    /// Machine-readable error code (e.g., "TRANSPORT_ERROR")
    fn error_code(&self) -> &'static str;

    /// Whether selecting the file again may succeed
    fn is_recoverable(&self) -> bool;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;

    /// Message shown to the end user
    fn user_message(&self) -> String;
}

#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("{0}")]
    Transport(String),

    #[error("timeout of {}ms exceeded", .0.as_millis())]
    Timeout(Duration),

    #[error("Request failed with status code {status}")]
    Server { status: u16, body: Option<Value> },

    #[error("{0}")]
    Decode(String),

    #[error("An upload is already in progress")]
    Busy,

    #[error("Failed to read file {}: {}", .path.display(), .source)]
    File {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl From<serde_json::Error> for UploadError {
    fn from(err: serde_json::Error) -> Self {
        UploadError::Decode(err.to_string())
    }
}

/// Static metadata for each variant: (error_code, recoverable, log_level).
fn upload_error_static_metadata(err: &UploadError) -> (&'static str, bool, LogLevel) {
    match err {
        UploadError::Transport(_) => ("TRANSPORT_ERROR", true, LogLevel::Error),
        UploadError::Timeout(_) => ("TIMEOUT", true, LogLevel::Warn),
        UploadError::Server { .. } => ("SERVER_ERROR", true, LogLevel::Warn),
        UploadError::Decode(_) => ("DECODE_ERROR", false, LogLevel::Warn),
        UploadError::Busy => ("UPLOAD_IN_PROGRESS", true, LogLevel::Debug),
        UploadError::File { .. } => ("FILE_READ_ERROR", false, LogLevel::Error),
    }
}

impl UploadError {
    /// Get the error type name
    pub fn error_type(&self) -> &'static str {
        match self {
            UploadError::Transport(_) => "Transport",
            UploadError::Timeout(_) => "Timeout",
            UploadError::Server { .. } => "Server",
            UploadError::Decode(_) => "Decode",
            UploadError::Busy => "Busy",
            UploadError::File { .. } => "File",
        }
    }

    /// Text of the blocking notification shown when an upload fails.
    pub fn alert_text(&self) -> String {
        format!("{}{}", ALERT_PREFIX, self.user_message())
    }

    /// The `message` field of a server error body, if it carries a usable one.
    fn server_message(&self) -> Option<String> {
        let UploadError::Server {
            body: Some(body), ..
        } = self
        else {
            return None;
        };
        match body.get("message")? {
            Value::Null | Value::Bool(false) => None,
            Value::String(s) if s.is_empty() => None,
            Value::Number(n) if n.as_f64() == Some(0.0) => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }
}

impl ErrorMetadata for UploadError {
    fn error_code(&self) -> &'static str {
        upload_error_static_metadata(self).0
    }

    fn is_recoverable(&self) -> bool {
        upload_error_static_metadata(self).1
    }

    fn log_level(&self) -> LogLevel {
        upload_error_static_metadata(self).2
    }

    fn user_message(&self) -> String {
        if let Some(message) = self.server_message() {
            return message;
        }
        let display = self.to_string();
        if !display.is_empty() {
            return display;
        }
        format!("{:?}", self)
    }
}
