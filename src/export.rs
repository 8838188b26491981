//! Transcript export: the boundary between callers and the document builder.
//!
//! [`export`] turns transcript text and a requested file name into a
//! finished `.docx` plus the metadata an HTTP response needs.
//! [`handle_request`] does the same for a raw JSON request body and maps
//! failures to a status code and an `{"error": ...}` body.

use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::docx::{self, PLACEHOLDER};
use crate::error::ExportError;

/// Base name used when the caller supplies none.
pub const DEFAULT_BASE_NAME: &str = "transcript";

/// Extension appended to the sanitized base name.
pub const EXTENSION: &str = "docx";

/// MIME type of a WordprocessingML document.
pub const CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// JSON request accepted by [`handle_request`]. Missing fields default.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ExportRequest {
    pub text: Option<String>,
    pub filename: Option<String>,
}

/// A finished document.
#[derive(Debug, Clone)]
pub struct ExportResponse {
    pub bytes: Vec<u8>,
    pub content_type: &'static str,
    /// `<sanitized base name>.docx`
    pub attachment_name: String,
}

impl ExportResponse {
    /// Value for the `Content-Disposition` header.
    pub fn content_disposition(&self) -> String {
        format!("attachment; filename=\"{}\"", self.attachment_name)
    }
}

/// JSON body returned on failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Outcome of [`handle_request`].
#[derive(Debug)]
pub enum ExportReply {
    Document(ExportResponse),
    Failure { status: u16, body: ErrorBody },
}

impl ExportReply {
    pub fn status(&self) -> u16 {
        match self {
            ExportReply::Document(_) => 200,
            ExportReply::Failure { status, .. } => *status,
        }
    }
}

impl From<ExportError> for ExportReply {
    fn from(err: ExportError) -> Self {
        ExportReply::Failure {
            status: err.status_code(),
            body: ErrorBody {
                error: err.public_message().to_string(),
            },
        }
    }
}

/// Replace every character outside `[A-Za-z0-9._-]` with `_`.
///
/// Idempotent: sanitizing a sanitized name returns it unchanged.
pub fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Sanitized base name for an optional requested name.
fn base_name(filename: Option<&str>) -> String {
    let sanitized = sanitize_filename(filename.unwrap_or_default());
    if sanitized.is_empty() {
        DEFAULT_BASE_NAME.to_string()
    } else {
        sanitized
    }
}

/// Build a `.docx` for `text` named after `filename`.
///
/// Absent or blank text exports as the placeholder paragraph. Failures are
/// logged here with full detail; callers should only surface
/// [`ExportError::public_message`].
pub fn export(text: Option<&str>, filename: Option<&str>) -> Result<ExportResponse, ExportError> {
    let base = base_name(filename);
    let content = match text.unwrap_or_default().trim() {
        "" => PLACEHOLDER,
        trimmed => trimmed,
    };

    let bytes = docx::build(content).map_err(|e| {
        error!(filename = %base, error = %e, "DOCX export failed");
        ExportError::from(e)
    })?;

    let attachment_name = format!("{base}.{EXTENSION}");
    info!(
        attachment = %attachment_name,
        bytes = bytes.len(),
        "exported transcript"
    );

    Ok(ExportResponse {
        bytes,
        content_type: CONTENT_TYPE,
        attachment_name,
    })
}

/// Handle a raw JSON export request.
///
/// A body that is not a valid [`ExportRequest`] is a client error (400);
/// assembly failures are internal (500). Either way the reply body carries
/// only a generic message.
pub fn handle_request(body: &[u8]) -> ExportReply {
    let request: ExportRequest = match serde_json::from_slice(body) {
        Ok(request) => request,
        Err(e) => {
            error!(error = %e, "rejected export request");
            return ExportError::from(e).into();
        }
    };

    match export(request.text.as_deref(), request.filename.as_deref()) {
        Ok(response) => ExportReply::Document(response),
        Err(e) => e.into(),
    }
}
