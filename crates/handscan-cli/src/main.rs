//! Handscan CLI — terminal host for the upload widget.
//!
//! Set HANDSCAN_BACKEND_URL (or BACKEND_URL) to target a backend other than
//! http://localhost:5000. A `.env` file in the working directory is honoured.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use handscan_cli::{init_tracing, render_status_line, TerminalHost};
use handscan_client::{UploadConfig, UploadForm, UploadOutcome, UploadView};
use handscan_core::media::{guess_content_type, is_accepted, ACCEPT};

#[derive(Parser)]
#[command(name = "handscan", about = "Upload handwriting scans to the OCR backend")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Upload an image or PDF and print the backend's result as JSON
    Upload {
        /// Path to the file to upload
        file: PathBuf,
        /// Backend base URL (overrides HANDSCAN_BACKEND_URL)
        #[arg(long)]
        backend_url: Option<String>,
        /// Upload files the picker would not offer (anything but images and PDFs)
        #[arg(long)]
        any_type: bool,
    },
    /// Show the backend the widget would upload to
    Backend {
        /// Backend base URL (overrides HANDSCAN_BACKEND_URL)
        #[arg(long)]
        backend_url: Option<String>,
    },
}

fn resolve_config(backend_url: Option<String>) -> UploadConfig {
    match backend_url {
        Some(url) => UploadConfig::new(url),
        None => UploadConfig::from_env(),
    }
}

async fn upload(config: UploadConfig, file: PathBuf, any_type: bool) -> anyhow::Result<()> {
    let content_type = guess_content_type(&file);
    if !any_type && !is_accepted(&content_type) {
        anyhow::bail!(
            "{} has type {}, expected one of {} (pass --any-type to upload anyway)",
            file.display(),
            content_type,
            ACCEPT
        );
    }

    let host = Arc::new(TerminalHost::default());
    let form = UploadForm::new(config, host.clone()).context("Failed to create upload widget")?;

    let mut rx = form.subscribe();
    let backend_url = form.backend_url().to_string();
    let renderer = tokio::spawn(async move {
        while rx.changed().await.is_ok() {
            let view = UploadView::new(&rx.borrow_and_update(), &backend_url);
            eprint!("\r{}", render_status_line(&view));
        }
    });

    let outcome = form.select_path(&file).await?;
    renderer.abort();
    eprintln!("\r{}", render_status_line(&form.view()));

    if outcome == UploadOutcome::Failed || host.failed() {
        anyhow::bail!("Upload of {} failed", file.display());
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Upload {
            file,
            backend_url,
            any_type,
        } => {
            upload(resolve_config(backend_url), file, any_type).await?;
        }
        Commands::Backend { backend_url } => {
            let config = resolve_config(backend_url);
            let view = UploadView::new(&Default::default(), config.backend_url());
            println!("{}", view.backend_label);
            println!("Upload endpoint: {}", config.upload_url());
        }
    }

    Ok(())
}
