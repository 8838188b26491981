//! Error types for archive assembly and document export.

use thiserror::Error;

/// Errors raised while assembling a ZIP archive.
#[derive(Debug, Error)]
pub enum ArchiveError {
    /// Entry name does not fit the 16-bit name length field.
    #[error("entry name is {len} bytes, limit is 65535: {name}")]
    NameTooLong { name: String, len: usize },

    /// Entry payload does not fit the 32-bit size fields.
    #[error("entry {name} is {len} bytes, limit is 4 GiB without ZIP64")]
    EntryTooLarge { name: String, len: usize },

    /// More entries than the 16-bit entry count can describe.
    #[error("archive holds more than 65535 entries")]
    TooManyEntries,

    /// An offset or the central directory size overflowed 32 bits.
    #[error("archive exceeds 4 GiB without ZIP64")]
    ArchiveTooLarge,

    /// Document markup could not be written.
    #[error("XML error: {0}")]
    Xml(String),

    /// I/O error while encoding a record.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors surfaced at the export boundary.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The request body was not a valid export request.
    #[error("malformed export request: {0}")]
    MalformedRequest(#[from] serde_json::Error),

    /// The document package could not be assembled.
    #[error("document assembly failed: {0}")]
    Archive(#[from] ArchiveError),
}

impl ExportError {
    /// HTTP status code matching this failure.
    pub fn status_code(&self) -> u16 {
        match self {
            ExportError::MalformedRequest(_) => 400,
            ExportError::Archive(_) => 500,
        }
    }

    /// Message safe to show to the caller. Never carries internal detail.
    pub fn public_message(&self) -> &'static str {
        match self {
            ExportError::MalformedRequest(_) => "Invalid export request",
            ExportError::Archive(_) => "Failed to generate DOCX",
        }
    }
}

/// Result alias for archive assembly.
pub type Result<T> = std::result::Result<T, ArchiveError>;
