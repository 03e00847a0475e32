//! Stored file block scanner.
//!
//! An SRR file is a RAR-like sequence of blocks. This scanner does not walk
//! the block chain; it looks for the stored file marker byte by byte and
//! decodes only the fields needed to cut out the name and the data:
//!
//! 1. Check the three byte signature at offset 0 (done by the caller)
//! 2. Scan forward for the stored file marker
//! 3. Read ADD_SIZE and NAME_SIZE from the fixed header
//! 4. Copy out name and data, then continue right after the data
//!
//! Every range is checked against the buffer before it is sliced, so a
//! truncated or lying header is reported as
//! [`SrrdbError::MalformedContainer`] instead of panicking.

use byteorder::{ByteOrder, LittleEndian};

use crate::error::{Result, SrrdbError};

use super::structures::*;

/// Returns true when `srr` starts with the SRR signature.
pub fn has_signature(srr: &[u8]) -> bool {
    srr.starts_with(&SRR_SIGNATURE)
}

/// Returns true when `srr` does not start with the SRR signature.
///
/// Buffers shorter than the signature always mismatch.
pub fn signature_mismatches(srr: &[u8]) -> bool {
    !has_signature(srr)
}

/// Decode up to four bytes as an unsigned little endian integer.
///
/// Bytes past the fourth do not fit the accumulator and are ignored.
/// An empty slice decodes to zero.
pub fn decode_le(bytes: &[u8]) -> u32 {
    let bytes = &bytes[..bytes.len().min(4)];
    if bytes.is_empty() {
        return 0;
    }
    LittleEndian::read_uint(bytes, bytes.len()) as u32
}

/// Extract every stored file using the strict marker check.
pub fn extract_stored_files(srr: &[u8]) -> Result<Vec<StoredFile>> {
    Scanner::default().scan(srr)
}

/// Stateless stored file scanner.
///
/// ## Example
///
/// ```
/// use srrdb::srr::{MarkerCheck, Scanner};
///
/// let mut srr = vec![0x6A, 0x6A, 0x6A, 0x00, 0x80, 0x00, 0x00];
/// srr.extend_from_slice(&2u32.to_le_bytes());
/// srr.extend_from_slice(&1u16.to_le_bytes());
/// srr.extend_from_slice(b"a");
/// srr.extend_from_slice(b"hi");
///
/// let files = Scanner::new(MarkerCheck::Strict).scan(&srr).unwrap();
/// assert_eq!(files[0].name, "a");
/// assert_eq!(files[0].data, b"hi");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Scanner {
    marker_check: MarkerCheck,
}

impl Scanner {
    pub fn new(marker_check: MarkerCheck) -> Self {
        Self { marker_check }
    }

    /// Scan `srr` left to right and return the stored files in offset order.
    ///
    /// A buffer without any marker yields an empty vector.
    ///
    /// # Errors
    ///
    /// Returns [`SrrdbError::MalformedContainer`] if a block's header, name or
    /// data would extend past the end of the buffer.
    pub fn scan(&self, srr: &[u8]) -> Result<Vec<StoredFile>> {
        let mut stored_files = Vec::new();
        let mut i = 0;

        while i < srr.len() {
            if !self.is_marker(srr, i) {
                i += 1;
                continue;
            }

            let header = StoredFileHeader::from_bytes(checked_range(
                srr,
                i,
                i,
                StoredFileHeader::SIZE,
            )?)?;

            let name_start = i + StoredFileHeader::SIZE;
            let name_bytes = checked_range(srr, i, name_start, header.name_size as usize)?;
            let data_start = name_start + name_bytes.len();
            let data = checked_range(srr, i, data_start, header.data_size as usize)?;

            tracing::trace!(
                offset = i,
                name_size = header.name_size,
                data_size = header.data_size,
                "stored file block"
            );

            stored_files.push(StoredFile {
                name: String::from_utf8_lossy(name_bytes).into_owned(),
                data: data.to_vec(),
                offset: i,
            });

            // Never re-scan bytes that belong to the extracted data
            i = data_start + data.len();
        }

        Ok(stored_files)
    }

    fn is_marker(&self, srr: &[u8], i: usize) -> bool {
        match self.marker_check {
            MarkerCheck::Strict => srr
                .get(i..i + STORED_FILE_MARKER.len())
                .is_some_and(|b| b == STORED_FILE_MARKER),
            MarkerCheck::Lenient => {
                srr.get(i) == Some(&STORED_FILE_MARKER[0])
                    && srr.get(i + 1) == Some(&STORED_FILE_MARKER[1])
            }
        }
    }
}

/// Slice `len` bytes at `start`, or report the block at `block` as malformed.
fn checked_range(srr: &[u8], block: usize, start: usize, len: usize) -> Result<&[u8]> {
    start
        .checked_add(len)
        .and_then(|end| srr.get(start..end))
        .ok_or(SrrdbError::MalformedContainer {
            offset: block,
            needed: start.saturating_add(len) - block,
            available: srr.len().saturating_sub(block),
        })
}
