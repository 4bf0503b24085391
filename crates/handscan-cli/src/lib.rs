use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};

use handscan_client::{ServerResult, UploadHost, UploadView};

const BAR_WIDTH: usize = 30;
const MAX_FILE_LABEL: usize = 40;

/// Truncate a string to max_len characters, appending "..." if truncated.
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// One status line for the terminal, e.g.
/// `report.pdf  Uploading... [######---] 60%`.
pub fn render_status_line(view: &UploadView) -> String {
    let file = truncate_string(&view.file_label, MAX_FILE_LABEL);
    match &view.progress {
        Some(progress) => format!("{}  {}", file, progress.render_bar(BAR_WIDTH)),
        None => format!("{}  {}", file, view.button_label),
    }
}

/// Terminal host: results go to stdout as JSON, alerts and progress to stderr.
#[derive(Default)]
pub struct TerminalHost {
    failed: AtomicBool,
}

impl TerminalHost {
    /// Whether an alert has been shown.
    pub fn failed(&self) -> bool {
        self.failed.load(Ordering::SeqCst)
    }
}

impl UploadHost for TerminalHost {
    fn set_result(&self, result: ServerResult) {
        match serde_json::to_string_pretty(&result) {
            Ok(out) => println!("{}", out),
            Err(e) => tracing::error!(error = %e, "Failed to serialize result"),
        }
    }

    fn alert(&self, message: &str) {
        self.failed.store(true, Ordering::SeqCst);
        let mut stderr = std::io::stderr().lock();
        let _ = writeln!(stderr, "\n{}", message);
    }
}

/// Initialize tracing for CLI binaries. Logs go to stderr so stdout stays
/// machine-readable.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();
}
