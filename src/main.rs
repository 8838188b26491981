//! Main entry point for the docxport CLI application.
//!
//! Reads a transcript from a file, stdin or an HTTP URL (or a JSON export
//! request) and writes the resulting `.docx`.

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tracing_subscriber::EnvFilter;

use docxport::{
    Cli, ExportReply, ExportResponse, HttpTranscript, LocalTranscript, StdinTranscript,
    TranscriptSource, export, handle_request,
};

/// Application entry point.
///
/// Parses command-line arguments, builds the document from the selected
/// input, and writes it out.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli);

    let response = if let Some(ref request) = cli.request {
        export_request(request).await?
    } else if cli.is_http_url() {
        // Remote transcript, report network usage like a download would
        let source = HttpTranscript::new(cli.input.clone())?;
        let response = export_source(&source, &cli).await?;
        if !cli.is_quiet() {
            eprintln!("Total bytes transferred: {}", format_size(source.transferred_bytes()));
        }
        response
    } else if cli.is_stdin() {
        export_source(&StdinTranscript, &cli).await?
    } else {
        export_source(&LocalTranscript::new(&cli.input), &cli).await?
    };

    write_document(&response, &cli).await
}

/// Install the stderr log subscriber. `RUST_LOG` takes precedence over `-q`/`-v`.
fn init_logging(cli: &Cli) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_filter()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Read a transcript and export it.
///
/// The document name comes from `-n`, else from the source's own name.
async fn export_source<S: TranscriptSource>(source: &S, cli: &Cli) -> Result<ExportResponse> {
    let text = source.read_text().await?;
    let name = cli.name.clone().or_else(|| source.base_name());

    // Failure detail is already logged by the exporter
    export(Some(&text), name.as_deref()).map_err(|e| anyhow!(e.public_message()))
}

/// Handle a JSON export request stored in `path`.
///
/// On failure the JSON error body is printed to stdout, as an HTTP handler
/// would send it.
async fn export_request(path: &Path) -> Result<ExportResponse> {
    let body = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;

    match handle_request(&body) {
        ExportReply::Document(response) => Ok(response),
        ExportReply::Failure { status, body } => {
            println!("{}", serde_json::to_string(&body)?);
            bail!("Export request failed with status {status}")
        }
    }
}

/// Write the document to stdout (`-p`) or into the output directory.
///
/// An existing file is only replaced with `-o`.
async fn write_document(response: &ExportResponse, cli: &Cli) -> Result<()> {
    if cli.pipe {
        let mut stdout = tokio::io::stdout();
        stdout.write_all(&response.bytes).await?;
        stdout.flush().await?;
        return Ok(());
    }

    let dir = cli.output_dir.clone().unwrap_or_else(|| PathBuf::from("."));
    let output_path = dir.join(&response.attachment_name);

    if output_path.exists() && !cli.overwrite {
        bail!(
            "{} already exists (use -o to overwrite)",
            output_path.display()
        );
    }

    if !dir.as_os_str().is_empty() {
        tokio::fs::create_dir_all(&dir).await?;
    }

    if !cli.is_quiet() {
        println!(
            "  writing: {} ({})",
            output_path.display(),
            format_size(response.bytes.len() as u64)
        );
    }

    tokio::fs::write(&output_path, &response.bytes)
        .await
        .with_context(|| format!("Failed to write {}", output_path.display()))?;

    Ok(())
}

/// Format a byte size into a human-readable string.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(format_size(500), "500 bytes");
/// assert_eq!(format_size(1536), "1.50 KB");
/// ```
fn format_size(size: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    if size >= MB {
        format!("{:.2} MB", size as f64 / MB as f64)
    } else if size >= KB {
        format!("{:.2} KB", size as f64 / KB as f64)
    } else {
        format!("{} bytes", size)
    }
}
