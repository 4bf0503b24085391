//! The upload widget: picks up a selected file, uploads it, and reports back
//! to its host.
//!
//! State lives in a [`watch`] channel owned by the widget. Hosts subscribe to
//! re-render; only the widget mutates it. At most one upload runs per widget:
//! the loading flag is claimed with a single check-and-set on the channel, and
//! released by a drop guard on every exit path.

use std::path::Path;
use std::sync::Arc;

use handscan_core::{
    ErrorMetadata, LogLevel, SelectedFile, ServerResult, UploadConfig, UploadError, UploadState,
};
use tokio::sync::watch;
use tracing::{debug, error, info, warn};

use crate::client::{Progress, UploadClient};
use crate::view::UploadView;

/// Capabilities the widget needs from its host environment.
///
/// Both callbacks run synchronously on the task driving the upload.
pub trait UploadHost: Send + Sync {
    /// Deliver the decoded backend response. Called at most once per upload,
    /// and only on success.
    fn set_result(&self, result: ServerResult);

    /// Show a blocking notification to the user.
    fn alert(&self, message: &str);
}

/// Host that discards results and alerts.
pub struct NoOpUploadHost;

impl UploadHost for NoOpUploadHost {
    fn set_result(&self, _result: ServerResult) {}

    fn alert(&self, _message: &str) {}
}

/// How an accepted upload ended. Failure causes are only visible through the
/// host's alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadOutcome {
    Succeeded,
    Failed,
}

pub struct UploadForm {
    client: UploadClient,
    host: Arc<dyn UploadHost>,
    state: Arc<watch::Sender<UploadState>>,
}

impl UploadForm {
    pub fn new(config: UploadConfig, host: Arc<dyn UploadHost>) -> Result<Self, UploadError> {
        Ok(Self {
            client: UploadClient::new(config)?,
            host,
            state: Arc::new(watch::Sender::new(UploadState::default())),
        })
    }

    pub fn backend_url(&self) -> &str {
        self.client.config().backend_url()
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> UploadState {
        self.state.borrow().clone()
    }

    /// Receiver that observes every state change.
    pub fn subscribe(&self) -> watch::Receiver<UploadState> {
        self.state.subscribe()
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().is_loading
    }

    /// Render model of the current state.
    pub fn view(&self) -> UploadView {
        UploadView::new(&self.state.borrow(), self.backend_url())
    }

    /// Read `path` from disk and upload it. A file that cannot be read is
    /// reported through the host like any other failure, and the state ends
    /// showing that file with progress at 0.
    pub async fn select_path(&self, path: impl AsRef<Path>) -> Result<UploadOutcome, UploadError> {
        let path = path.as_ref();
        if self.is_loading() {
            return Err(UploadError::Busy);
        }
        match SelectedFile::from_path(path).await {
            Ok(file) => self.select_and_upload(file).await,
            Err(err) => {
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string());
                if !self.claim(&name) {
                    return Err(UploadError::Busy);
                }
                let _loading = LoadingGuard { state: &self.state };
                self.report_failure(&err);
                Ok(UploadOutcome::Failed)
            }
        }
    }

    /// Upload a freshly selected file.
    ///
    /// Returns `Err(UploadError::Busy)` without side effects when another
    /// upload is still running. Every other failure is consumed here: the host
    /// gets an alert, progress drops to 0 and the outcome is `Failed`.
    pub async fn select_and_upload(&self, file: SelectedFile) -> Result<UploadOutcome, UploadError> {
        if !self.claim(&file.name) {
            return Err(UploadError::Busy);
        }
        let _loading = LoadingGuard { state: &self.state };

        let state = Arc::clone(&self.state);
        let on_progress = move |progress: Progress| advance_progress(&state, progress.percent());

        match self.client.upload(&file, on_progress).await {
            Ok(result) => {
                self.host.set_result(result);
                self.state.send_modify(|state| state.progress_percent = 100);
                info!(file_name = %file.name, "Result delivered");
                Ok(UploadOutcome::Succeeded)
            }
            Err(err) => {
                self.report_failure(&err);
                Ok(UploadOutcome::Failed)
            }
        }
    }

    /// Take the single-flight slot for `file_name`: record the name, mark the
    /// widget loading and reset progress. False when an upload is in flight.
    fn claim(&self, file_name: &str) -> bool {
        let claimed = self.state.send_if_modified(|state| {
            if state.is_loading {
                return false;
            }
            state.file_name = file_name.to_string();
            state.is_loading = true;
            state.progress_percent = 0;
            true
        });
        if !claimed {
            debug!(file_name, "Upload rejected, another upload is in flight");
        }
        claimed
    }

    /// Log `err`, alert the host and drop progress back to 0.
    fn report_failure(&self, err: &UploadError) {
        let (kind, code, recoverable) = (err.error_type(), err.error_code(), err.is_recoverable());
        match err.log_level() {
            LogLevel::Debug => debug!(error = %err, kind, code, recoverable, "Upload error"),
            LogLevel::Warn => warn!(error = %err, kind, code, recoverable, "Upload error"),
            LogLevel::Error => error!(error = %err, kind, code, recoverable, "Upload error"),
        }
        self.host.alert(&err.alert_text());
        self.state.send_modify(|state| state.progress_percent = 0);
    }
}

/// Raise progress to `percent` while an upload is running. Lower values are
/// ignored so the indicator never moves backwards.
fn advance_progress(state: &watch::Sender<UploadState>, percent: u8) {
    state.send_if_modified(|state| {
        if state.is_loading && percent > state.progress_percent {
            state.progress_percent = percent;
            true
        } else {
            false
        }
    });
}

/// Clears the loading flag when dropped, whether the upload returned,
/// a host callback panicked, or the future was dropped mid-flight.
struct LoadingGuard<'a> {
    state: &'a watch::Sender<UploadState>,
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.state.send_if_modified(|state| {
            let was_loading = state.is_loading;
            state.is_loading = false;
            was_loading
        });
    }
}
