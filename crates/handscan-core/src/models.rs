//! Domain models for one upload interaction.

use std::path::Path;

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::error::UploadError;
use crate::media::guess_content_type;

/// Decoded backend response handed to the host on success.
pub type ServerResult = serde_json::Value;

/// A file chosen by the user, held in memory for the duration of one upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub content_type: String,
    pub content: Bytes,
}

impl SelectedFile {
    pub fn new(
        name: impl Into<String>,
        content_type: impl Into<String>,
        content: impl Into<Bytes>,
    ) -> Self {
        Self {
            name: name.into(),
            content_type: content_type.into(),
            content: content.into(),
        }
    }

    /// Read a file from disk. The display name is the final path component and
    /// the media type is guessed from the extension.
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self, UploadError> {
        let path = path.as_ref();
        let content = tokio::fs::read(path)
            .await
            .map_err(|source| UploadError::File {
                path: path.to_path_buf(),
                source,
            })?;

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        Ok(Self::new(name, guess_content_type(path), content))
    }

    pub fn size(&self) -> u64 {
        self.content.len() as u64
    }
}

/// Observable state of the upload widget.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadState {
    pub file_name: String,
    pub is_loading: bool,
    pub progress_percent: u8,
}
