mod http;
mod session;
mod types;

pub use http::{SrrdbClient, parse_upload_result};
pub use session::{LOGIN_COOKIE, Session};
pub use types::{SearchResponse, SearchResult, UploadResponse, UploadedFile};

use async_trait::async_trait;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Default address of the service
pub const DEFAULT_BASE_URL: &str = "https://www.srrdb.com";

/// Trait for the remote release catalog
#[async_trait]
pub trait Catalog: Send + Sync {
    /// Search releases. Terms are separated by spaces, see
    /// <https://www.srrdb.com/help#keywords> for the available keywords.
    async fn search(&self, query: &str) -> Result<SearchResponse>;

    /// Download the SRR file of a release
    async fn download(&self, dirname: &str) -> Result<Vec<u8>>;

    /// Log in and return an authenticated session
    async fn login(&self, username: &str, password: &str) -> Result<Session>;

    /// Upload one or more SRR files in a single request
    async fn upload_srrs(&self, paths: &[PathBuf], session: &Session) -> Result<UploadResponse>;

    /// Upload a stored file into `folder` of the release `dirname`.
    /// Requires an authenticated session.
    async fn upload_stored_file(
        &self,
        path: &Path,
        dirname: &str,
        folder: &str,
        session: &Session,
    ) -> Result<String>;

    /// Session to use when no credentials are given
    fn anonymous_session(&self) -> Session;
}
