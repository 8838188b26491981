//! ZIP archive writing.
//!
//! This module produces ZIP archives entirely in memory, storing every
//! entry uncompressed.
//!
//! ## Architecture
//!
//! - [`crc32`]: the table-driven CRC-32 used for entry checksums
//! - [`structures`]: the fixed-size records (local header, central directory header, EOCD)
//! - [`writer`]: the accumulator that lays records out and cross-references offsets
//!
//! ## ZIP Format Overview
//!
//! A ZIP file consists of:
//! 1. Local file headers and data for each file
//! 2. Central Directory with metadata for all files
//! 3. End of Central Directory (EOCD) record at the end
//!
//! Readers locate the EOCD from the end of the file, follow it to the
//! Central Directory, and from there to each Local File Header.
//!
//! ## Limitations
//!
//! - STORED only, no compression
//! - No ZIP64: at most 65535 entries and 4 GiB
//! - No encryption, no multi-disk archives, no comments

pub mod crc32;
mod structures;
mod writer;

pub use crc32::{Crc32, checksum};
pub use structures::*;
pub use writer::{ZipWriter, write_archive, write_archive_at};
