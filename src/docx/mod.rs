//! Minimal WordprocessingML (`.docx`) packaging.
//!
//! A `.docx` file is a ZIP archive of XML parts. This module emits the
//! smallest package Word and LibreOffice accept:
//!
//! - `[Content_Types].xml` declaring the part types
//! - `_rels/.rels` pointing at the main document
//! - `word/document.xml` holding one paragraph per block of transcript text
//! - `word/_rels/document.xml.rels`, empty
//!
//! No styles, fonts or settings parts are written; consumers fall back to
//! their defaults.

mod package;
pub mod xml;

pub use package::*;
