//! Configuration module
//!
//! Upload configuration is resolved once and handed to the widget at
//! construction; nothing below the binary reads process state on its own.

use std::time::Duration;

use crate::constants::{
    BACKEND_URL_ENV_VARS, DEFAULT_BACKEND_URL, DEFAULT_FILE_URL, UPLOAD_PATH, UPLOAD_TIMEOUT,
};

/// Settings for one upload widget instance.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UploadConfig {
    backend_url: String,
    file_url: String,
    timeout: Duration,
}

impl UploadConfig {
    /// Build a config for `backend_url`. Trailing slashes are stripped and an
    /// empty result falls back to [`DEFAULT_BACKEND_URL`].
    pub fn new(backend_url: impl AsRef<str>) -> Self {
        Self {
            backend_url: normalize_backend_url(backend_url.as_ref()),
            file_url: DEFAULT_FILE_URL.to_string(),
            timeout: UPLOAD_TIMEOUT,
        }
    }

    /// Create config from environment: HANDSCAN_BACKEND_URL (or BACKEND_URL).
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve the backend URL through `lookup`, trying each variable of
    /// [`BACKEND_URL_ENV_VARS`] in order.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let backend_url = BACKEND_URL_ENV_VARS
            .iter()
            .find_map(|key| lookup(*key))
            .unwrap_or_default();
        Self::new(backend_url)
    }

    /// Replace the static `fileUrl` value sent with every request.
    pub fn with_file_url(mut self, file_url: impl Into<String>) -> Self {
        self.file_url = file_url.into();
        self
    }

    /// Replace the request timeout. Uploads use [`UPLOAD_TIMEOUT`] unless told otherwise.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn backend_url(&self) -> &str {
        &self.backend_url
    }

    pub fn file_url(&self) -> &str {
        &self.file_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Full POST target, `{backend_url}/api/upload`.
    pub fn upload_url(&self) -> String {
        format!("{}{}", self.backend_url, UPLOAD_PATH)
    }
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BACKEND_URL)
    }
}

fn normalize_backend_url(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        DEFAULT_BACKEND_URL.to_string()
    } else {
        trimmed.to_string()
    }
}
