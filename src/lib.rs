//! # srrdb
//!
//! A terminal client for [srrdb.com](https://www.srrdb.com), the scene release
//! database.
//!
//! The library searches the catalog, downloads SRR files, pulls stored files
//! (NFO, SFV, SRS samples, ...) out of them and uploads SRR and stored files.
//!
//! ## Features
//!
//! - Search releases with srrdb keywords
//! - Download SRR files and save them, or only stored files with a given extension
//! - Upload SRR files anonymously or logged in
//! - Upload stored files into a folder of a release
//!
//! ## Example
//!
//! ```no_run
//! use std::time::Duration;
//! use srrdb::{Catalog, SrrExtractor, SrrdbClient};
//! use srrdb::srr::MarkerCheck;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let url = url::Url::parse("https://www.srrdb.com")?;
//!     let client = SrrdbClient::new(url, Duration::from_secs(30), 3)?;
//!
//!     let srr = client.download("Some.Release-GRP").await?;
//!     let extractor = SrrExtractor::new(srr, MarkerCheck::Strict)?;
//!     for file in extractor.extract_matching("nfo")? {
//!         println!("{} ({} bytes)", file.name, file.data.len());
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod client;
pub mod commands;
pub mod config;
pub mod error;
pub mod srr;

pub use cli::Cli;
pub use client::{Catalog, Session, SrrdbClient};
pub use config::{Action, Config};
pub use error::{Result, SrrdbError};
pub use srr::{SrrExtractor, StoredFile, extract_stored_files};
