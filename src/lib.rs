//! # docxport
//!
//! Export plain-text transcripts as Word (`.docx`) documents.
//!
//! A `.docx` file is a ZIP archive of XML parts. This crate writes both
//! layers itself: a small in-memory ZIP writer with its own CRC-32, and a
//! builder that turns transcript text into the minimal WordprocessingML
//! package.
//!
//! ## Features
//!
//! - Byte-exact ZIP output (stored entries, single disk, no ZIP64)
//! - Table-driven CRC-32 compatible with ZIP and PNG
//! - Paragraph splitting and XML escaping of transcript text
//! - An export boundary producing file name, content type and bytes,
//!   plus a JSON request handler with `{"error": ...}` failure bodies
//! - A CLI reading transcripts from files, stdin or HTTP URLs
//!
//! ## Example
//!
//! ```
//! use docxport::export;
//!
//! let response = export(Some("Paragraph one.\n\nParagraph two."), Some("My Report"))?;
//! assert_eq!(response.attachment_name, "My_Report.docx");
//! assert_eq!(&response.bytes[0..4], b"PK\x03\x04");
//! # Ok::<(), docxport::ExportError>(())
//! ```

pub mod cli;
pub mod docx;
pub mod error;
pub mod export;
pub mod io;
pub mod zip;

pub use cli::Cli;
pub use error::{ArchiveError, ExportError};
pub use export::{
    CONTENT_TYPE, ErrorBody, ExportReply, ExportRequest, ExportResponse, export, handle_request,
    sanitize_filename,
};
pub use io::{HttpTranscript, LocalTranscript, StdinTranscript, TranscriptSource};
pub use zip::{Entry, ZipWriter, checksum, write_archive};
