//! In-memory ZIP writer for stored (uncompressed) entries.
//!
//! ## Layout
//!
//! The archive is produced in three sections:
//! 1. A Local File Header, the name and the raw data for every entry
//! 2. The Central Directory, one header per entry in the same order
//! 3. The End of Central Directory record
//!
//! Local records and central records are accumulated side by side, and the
//! central directory is appended once every entry has been added. The
//! offset stored in each central record is captured *before* the entry's
//! local record is emitted.

use tracing::debug;

use crate::error::{ArchiveError, Result};

use super::crc32::checksum;
use super::structures::{
    CentralDirectoryHeader, DosDateTime, EndOfCentralDirectory, Entry, LocalFileHeader,
};

/// Accumulates entries into a complete ZIP archive.
///
/// ## Example
///
/// ```
/// use docxport::zip::{DosDateTime, ZipWriter};
///
/// let mut writer = ZipWriter::new(DosDateTime::now());
/// writer.add("hello.txt", b"Hello, world!")?;
/// let archive = writer.finish()?;
/// assert_eq!(&archive[0..4], b"PK\x03\x04");
/// # Ok::<(), docxport::ArchiveError>(())
/// ```
#[derive(Debug)]
pub struct ZipWriter {
    /// Timestamp applied to every entry
    modified: DosDateTime,
    /// Bytes of local records emitted so far; its length is the running offset
    local: Vec<u8>,
    /// Central directory records for the entries added so far
    central: Vec<u8>,
    entries: u16,
}

impl ZipWriter {
    pub fn new(modified: DosDateTime) -> Self {
        Self {
            modified,
            local: Vec::new(),
            central: Vec::new(),
            entries: 0,
        }
    }

    /// Offset at which the next local record will begin.
    pub fn offset(&self) -> u64 {
        self.local.len() as u64
    }

    /// Number of entries added so far.
    pub fn len(&self) -> usize {
        self.entries as usize
    }

    pub fn is_empty(&self) -> bool {
        self.entries == 0
    }

    /// Append one stored entry.
    ///
    /// Names are written as given; duplicates are not detected. Non-ASCII
    /// names are marked UTF-8 in both headers.
    ///
    /// # Errors
    ///
    /// Fails if the name or data exceed the 16/32-bit header fields, if the
    /// entry count would pass 65535, or if the archive would grow past 4 GiB.
    /// On error the writer is left unchanged.
    pub fn add(&mut self, name: &str, data: &[u8]) -> Result<()> {
        let name_bytes = name.as_bytes();
        let name_len = u16::try_from(name_bytes.len()).map_err(|_| ArchiveError::NameTooLong {
            name: name.to_string(),
            len: name_bytes.len(),
        })?;
        let size = u32::try_from(data.len()).map_err(|_| ArchiveError::EntryTooLarge {
            name: name.to_string(),
            len: data.len(),
        })?;
        let entries = self
            .entries
            .checked_add(1)
            .ok_or(ArchiveError::TooManyEntries)?;

        let lfh_offset = u32::try_from(self.offset()).map_err(|_| ArchiveError::ArchiveTooLarge)?;
        let record_len = LocalFileHeader::SIZE as u64 + name_bytes.len() as u64 + data.len() as u64;
        // The central directory must still start below 4 GiB
        if self.offset() + record_len > u32::MAX as u64 {
            return Err(ArchiveError::ArchiveTooLarge);
        }

        let crc32 = checksum(data);
        let local = LocalFileHeader::stored(crc32, size, name, name_len, self.modified);

        self.local.reserve(record_len as usize);
        local.write_to(&mut self.local)?;
        self.local.extend_from_slice(name_bytes);
        self.local.extend_from_slice(data);

        CentralDirectoryHeader::for_local(&local, lfh_offset).write_to(&mut self.central)?;
        self.central.extend_from_slice(name_bytes);
        self.entries = entries;

        debug!(
            entry = name,
            size,
            crc32 = %format!("{crc32:08x}"),
            offset = lfh_offset,
            "added entry"
        );

        Ok(())
    }

    /// Append an [`Entry`].
    pub fn add_entry(&mut self, entry: &Entry) -> Result<()> {
        self.add(&entry.name, &entry.data)
    }

    /// Emit the central directory and trailer, returning the archive bytes.
    pub fn finish(self) -> Result<Vec<u8>> {
        let cd_offset = u32::try_from(self.local.len()).map_err(|_| ArchiveError::ArchiveTooLarge)?;
        let cd_size = u32::try_from(self.central.len()).map_err(|_| ArchiveError::ArchiveTooLarge)?;

        let mut out = self.local;
        out.reserve(self.central.len() + EndOfCentralDirectory::SIZE);
        out.extend_from_slice(&self.central);
        EndOfCentralDirectory::single_disk(self.entries, cd_size, cd_offset).write_to(&mut out)?;

        debug!(
            entries = self.entries,
            cd_offset,
            cd_size,
            total = out.len(),
            "archive complete"
        );

        Ok(out)
    }
}

/// Write `entries` in order, stamping each with the current local time.
///
/// The clock is read once; every entry shares the same timestamp.
pub fn write_archive(entries: &[Entry]) -> Result<Vec<u8>> {
    write_archive_at(entries, DosDateTime::now())
}

/// Write `entries` in order with a fixed timestamp.
pub fn write_archive_at(entries: &[Entry], modified: DosDateTime) -> Result<Vec<u8>> {
    let mut writer = ZipWriter::new(modified);
    for entry in entries {
        writer.add_entry(entry)?;
    }
    writer.finish()
}
