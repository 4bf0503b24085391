//! Render model of the upload widget.
//!
//! Hosts draw whatever toolkit they have from this; the terminal host in the
//! CLI uses [`ProgressIndicator::render_bar`].

use handscan_core::media::ACCEPT;
use handscan_core::UploadState;
use serde::Serialize;

const IDLE_LABEL: &str = "Select & Upload";
const BUSY_LABEL: &str = "Processing…";
const PROGRESS_CAPTION: &str = "Uploading...";
const NO_FILE_LABEL: &str = "No file selected";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploadView {
    /// Picker accept filter.
    pub accept: &'static str,
    pub button_label: &'static str,
    /// The trigger is disabled while an upload is running.
    pub button_disabled: bool,
    /// Present only while loading.
    pub progress: Option<ProgressIndicator>,
    pub file_label: String,
    /// Backend diagnostic line.
    pub backend_label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProgressIndicator {
    pub caption: &'static str,
    pub percent: u8,
}

impl UploadView {
    pub fn new(state: &UploadState, backend_url: &str) -> Self {
        let file_label = if state.file_name.is_empty() {
            NO_FILE_LABEL.to_string()
        } else {
            state.file_name.clone()
        };

        Self {
            accept: ACCEPT,
            button_label: if state.is_loading { BUSY_LABEL } else { IDLE_LABEL },
            button_disabled: state.is_loading,
            progress: state.is_loading.then(|| ProgressIndicator {
                caption: PROGRESS_CAPTION,
                percent: state.progress_percent.min(100),
            }),
            file_label,
            backend_label: format!("Backend: {}", backend_url),
        }
    }
}

impl ProgressIndicator {
    pub fn percent_text(&self) -> String {
        format!("{}%", self.percent)
    }

    /// Filled share of the bar, 0.0 to 1.0.
    pub fn fill(&self) -> f32 {
        f32::from(self.percent) / 100.0
    }

    /// Text bar of `width` cells, e.g. `[#####-----] 50%`.
    pub fn render_bar(&self, width: usize) -> String {
        let filled = width * usize::from(self.percent.min(100)) / 100;
        format!(
            "{} [{}{}] {}",
            self.caption,
            "#".repeat(filled),
            "-".repeat(width - filled),
            self.percent_text()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_view() {
        let view = UploadView::new(&UploadState::default(), "http://localhost:5000");
        assert_eq!(view.button_label, "Select & Upload");
        assert!(!view.button_disabled);
        assert!(view.progress.is_none());
        assert_eq!(view.file_label, "No file selected");
        assert_eq!(view.backend_label, "Backend: http://localhost:5000");
        assert_eq!(view.accept, "image/*,application/pdf");
    }

    #[test]
    fn loading_view_shows_progress() {
        let state = UploadState {
            file_name: "report.pdf".to_string(),
            is_loading: true,
            progress_percent: 45,
        };
        let view = UploadView::new(&state, "http://ocr.internal");
        assert_eq!(view.button_label, "Processing…");
        assert!(view.button_disabled);
        assert_eq!(view.file_label, "report.pdf");

        let progress = view.progress.unwrap();
        assert_eq!(progress.caption, "Uploading...");
        assert_eq!(progress.percent_text(), "45%");
        assert!((progress.fill() - 0.45).abs() < f32::EPSILON);
    }

    #[test]
    fn finished_view_keeps_file_name() {
        let state = UploadState {
            file_name: "report.pdf".to_string(),
            is_loading: false,
            progress_percent: 100,
        };
        let view = UploadView::new(&state, "http://localhost:5000");
        assert!(view.progress.is_none());
        assert_eq!(view.file_label, "report.pdf");
        assert!(!view.button_disabled);
    }

    #[test]
    fn render_bar_widths() {
        let bar = |percent| ProgressIndicator {
            caption: "Uploading...",
            percent,
        };
        assert_eq!(bar(0).render_bar(10), "Uploading... [----------] 0%");
        assert_eq!(bar(50).render_bar(10), "Uploading... [#####-----] 50%");
        assert_eq!(bar(100).render_bar(10), "Uploading... [##########] 100%");
    }

    #[test]
    fn render_bar_clamps_overfull_percent() {
        let bar = ProgressIndicator {
            caption: "Uploading...",
            percent: 150,
        };
        assert_eq!(bar.render_bar(10), "Uploading... [##########] 150%");
    }
}
