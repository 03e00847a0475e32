//! SRR container scanning and stored file extraction.
//!
//! An SRR file recreates the RAR volumes of a release without their payload.
//! Next to the RAR headers it carries small "stored files" such as the NFO,
//! the SFV and SRS sample files. This module only cares about those.
//!
//! ## Architecture
//!
//! - [`structures`]: constants and the stored file block header
//! - [`parser`]: signature check, little endian decoding and the block scanner
//! - [`extractor`]: extension filter and writing members to disk
//!
//! ## Limitations
//!
//! - Other block types are not parsed, the scanner only looks for the
//!   stored file marker
//! - No CRC validation
//! - No compressed or multi-volume stored files

mod extractor;
mod parser;
mod structures;

pub use extractor::{
    SRR_EXTENSION, SrrExtractor, matches_extension, output_path, save_member, wants_whole_container,
};
pub use parser::{Scanner, decode_le, extract_stored_files, has_signature, signature_mismatches};
pub use structures::*;
