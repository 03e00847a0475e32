use crate::error::{Result, SrrdbError};

use super::parser::decode_le;

/// Signature at offset 0 of every SRR file (SRR volume header block)
pub const SRR_SIGNATURE: [u8; 3] = [0x69, 0x69, 0x69];

/// Marker at the start of every stored file block (HEAD_CRC + HEAD_TYPE)
pub const STORED_FILE_MARKER: [u8; 3] = [0x6A, 0x6A, 0x6A];

/// How strictly a stored file block marker is matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MarkerCheck {
    /// All three marker bytes must be 0x6A.
    #[default]
    Strict,
    /// Only the first two bytes are compared, which is what older
    /// srrdb clients did. The third byte is ignored.
    Lenient,
}

/// SRR stored file block header - 13 bytes followed by NAME_SIZE bytes of name
///
/// ```text
/// HEAD_CRC   2 bytes  0x6A6A
/// HEAD_TYPE  1 byte   0x6A
/// HEAD_FLAGS 2 bytes  0x8000 is always set
/// HEAD_SIZE  2 bytes
/// ADD_SIZE   4 bytes  size of the stored file
/// NAME_SIZE  2 bytes
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoredFileHeader {
    pub flags: u16,
    pub head_size: u16,
    pub data_size: u32,
    pub name_size: u16,
}

impl StoredFileHeader {
    pub const SIZE: usize = 13;

    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        if data.len() < Self::SIZE {
            return Err(SrrdbError::MalformedContainer {
                offset: 0,
                needed: Self::SIZE,
                available: data.len(),
            });
        }

        Ok(Self {
            flags: decode_le(&data[3..5]) as u16,
            head_size: decode_le(&data[5..7]) as u16,
            data_size: decode_le(&data[7..11]),
            name_size: decode_le(&data[11..13]) as u16,
        })
    }
}

/// A file embedded in an SRR container
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFile {
    /// Path and name as stored, may use `/` or `\` as separator
    pub name: String,
    pub data: Vec<u8>,
    /// Offset of the block marker inside the container
    pub offset: usize,
}

impl StoredFile {
    pub fn size(&self) -> usize {
        self.data.len()
    }
}
