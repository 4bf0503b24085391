//! HTTP client for the backend upload endpoint.
//!
//! The file part is streamed to the transport in fixed-size chunks so the
//! caller receives a progress notification each time the transport takes more
//! of the body. If a transport never pulls the body incrementally, the caller
//! simply sees no notifications until completion.

use std::sync::Arc;

use bytes::Bytes;
use futures::StreamExt;
use handscan_core::constants::{FILE_FIELD, FILE_URL_FIELD};
use handscan_core::{SelectedFile, ServerResult, UploadConfig, UploadError};
use reqwest::multipart::{Form, Part};
use reqwest::{Body, Client};
use serde_json::Value;
use tracing::{debug, info};

const CHUNK_SIZE: usize = 64 * 1024;

/// One transport progress notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    /// Bytes of the file handed to the transport so far.
    pub sent: u64,
    /// Total bytes expected, when known.
    pub total: Option<u64>,
}

impl Progress {
    /// `round(sent * 100 / total)`, capped at 100. An unknown or zero total
    /// reports 100 straight away.
    pub fn percent(&self) -> u8 {
        match self.total {
            Some(total) if total > 0 => {
                let sent = u128::from(self.sent.min(total));
                let total = u128::from(total);
                ((sent * 200 + total) / (total * 2)) as u8
            }
            _ => 100,
        }
    }
}

type ProgressCallback = Arc<dyn Fn(Progress) + Send + Sync>;

/// HTTP client bound to one backend upload endpoint.
#[derive(Clone, Debug)]
pub struct UploadClient {
    client: Client,
    config: UploadConfig,
}

impl UploadClient {
    pub fn new(config: UploadConfig) -> Result<Self, UploadError> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| {
                UploadError::Transport(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &UploadConfig {
        &self.config
    }

    /// POST `file` as multipart form data and decode the backend's answer.
    ///
    /// The form carries the file under `file` and the configured static value
    /// under `fileUrl`. `on_progress` runs on whichever task drives the request
    /// body.
    pub async fn upload<F>(
        &self,
        file: &SelectedFile,
        on_progress: F,
    ) -> Result<ServerResult, UploadError>
    where
        F: Fn(Progress) + Send + Sync + 'static,
    {
        let url = self.config.upload_url();
        info!(
            file_name = %file.name,
            content_type = %file.content_type,
            size = file.size(),
            url = %url,
            "Starting upload"
        );

        let body = progress_body(file.content.clone(), Arc::new(on_progress));
        let part = Part::stream_with_length(body, file.size())
            .file_name(file.name.clone())
            .mime_str(&file.content_type)
            .map_err(|e| {
                UploadError::Transport(format!(
                    "Invalid content type {}: {}",
                    file.content_type, e
                ))
            })?;

        let form = Form::new()
            .part(FILE_FIELD, part)
            .text(FILE_URL_FIELD, self.config.file_url().to_string());

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_else(|e| {
                debug!(error = %e, status = status.as_u16(), "Failed to read error body");
                String::new()
            });
            return Err(UploadError::Server {
                status: status.as_u16(),
                body: decode_error_body(&error_text),
            });
        }

        let text = response
            .text()
            .await
            .map_err(|e| self.map_transport_error(e))?;
        let result = decode_response(&text)?;

        info!(file_name = %file.name, status = status.as_u16(), "Upload completed");
        Ok(result)
    }

    fn map_transport_error(&self, err: reqwest::Error) -> UploadError {
        if err.is_timeout() {
            UploadError::Timeout(self.config.timeout())
        } else {
            UploadError::Transport(err.to_string())
        }
    }
}

fn progress_body(content: Bytes, on_progress: ProgressCallback) -> Body {
    let total = content.len() as u64;
    let chunks: Vec<Bytes> = (0..content.len())
        .step_by(CHUNK_SIZE)
        .map(|start| content.slice(start..(start + CHUNK_SIZE).min(content.len())))
        .collect();

    let mut sent = 0u64;
    let stream = futures::stream::iter(chunks).map(move |chunk| {
        sent += chunk.len() as u64;
        let progress = Progress {
            sent,
            total: Some(total),
        };
        debug!(sent, total, percent = progress.percent(), "Upload progress");
        on_progress(progress);
        Ok::<Bytes, std::io::Error>(chunk)
    });

    Body::wrap_stream(stream)
}

/// Decode a success body. The backend answers either with a JSON value or with
/// a JSON string whose contents are JSON; the latter is decoded a second time.
pub fn decode_response(text: &str) -> Result<ServerResult, UploadError> {
    match serde_json::from_str::<Value>(text)? {
        Value::String(inner) => Ok(serde_json::from_str(&inner)?),
        value => Ok(value),
    }
}

/// Best-effort decode of an error body; `None` when it is not JSON.
fn decode_error_body(text: &str) -> Option<Value> {
    let value = serde_json::from_str::<Value>(text).ok()?;
    Some(match value {
        Value::String(inner) => {
            serde_json::from_str::<Value>(&inner).unwrap_or(Value::String(inner))
        }
        value => value,
    })
}
