use async_trait::async_trait;
use fancy_regex::Regex;
use reqwest::header::SET_COOKIE;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, Response, StatusCode, redirect};
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

use super::session::{LOGIN_COOKIE, Session};
use super::types::{SearchResponse, UploadResponse};
use super::Catalog;
use crate::error::{Result, SrrdbError};

/// Body srrdb.com answers with, status 200, for unknown dirnames
const NOT_FOUND_BODY: &str = "The requested file does not exist.";

/// Result message of a stored file upload inside the returned HTML page
const UPLOAD_RESULT_PATTERN: &str = r#"<div class="alert alert-.*>\r?\s*([^<]*)"#;

/// HTTP client for srrdb.com
pub struct SrrdbClient {
    client: Client,
    base_url: Url,
    timeout: Duration,
    max_retry: u32,
}

impl SrrdbClient {
    /// Create a new client for the service at `base_url`
    pub fn new(base_url: Url, timeout: Duration, max_retry: u32) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url,
            timeout,
            max_retry,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build `{base}/{segments...}` with every segment escaped
    fn endpoint<'a>(&self, segments: impl IntoIterator<Item = &'a str>) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| url::ParseError::RelativeUrlWithCannotBeABaseBase)?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// A client sending the session's cookies
    fn session_client(&self, session: &Session) -> Result<Client> {
        Ok(Client::builder()
            .timeout(self.timeout)
            .cookie_provider(session.jar())
            .build()?)
    }

    /// Send an idempotent GET, retrying on connection errors and timeouts
    async fn get(&self, url: Url) -> Result<Response> {
        let mut retry_count = 0;

        loop {
            tracing::debug!(%url, "GET");
            match self.client.get(url.clone()).send().await {
                Ok(resp) => return check_status(resp),
                Err(e) if (e.is_timeout() || e.is_connect()) && retry_count < self.max_retry => {
                    retry_count += 1;
                    tracing::warn!(
                        "Connection error, retry {}/{}: {}",
                        retry_count,
                        self.max_retry,
                        e
                    );
                    tokio::time::sleep(Duration::from_millis(500 * retry_count as u64)).await;
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response> {
        check_status(request.send().await?)
    }
}

fn check_status(resp: Response) -> Result<Response> {
    if resp.status() != StatusCode::OK {
        return Err(SrrdbError::UnexpectedStatus(resp.status().as_u16()));
    }
    Ok(resp)
}

/// Read a file into a multipart part named after its base name
async fn file_part(path: &Path) -> Result<Part> {
    let data = tokio::fs::read(path).await?;
    let file_name = path
        .file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    Ok(Part::bytes(data).file_name(file_name))
}

/// Pull the alert message out of the HTML page returned by a stored file upload
pub fn parse_upload_result(html: &str) -> Result<String> {
    let re = Regex::new(UPLOAD_RESULT_PATTERN)?;
    re.captures(html)?
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim_end().to_string())
        .ok_or(SrrdbError::UnparsableResponse("upload result"))
}

/// Names of the cookies set by a response
fn set_cookies(resp: &Response) -> Vec<(String, String)> {
    resp.headers()
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .filter_map(|v| v.split(';').next())
        .filter_map(|pair| pair.split_once('='))
        .map(|(name, value)| (name.trim().to_string(), value.trim().to_string()))
        .collect()
}

#[async_trait]
impl Catalog for SrrdbClient {
    async fn search(&self, query: &str) -> Result<SearchResponse> {
        let url = self.endpoint(
            ["api", "search"]
                .into_iter()
                .chain(query.split(' ').filter(|term| !term.is_empty())),
        )?;
        let resp = self.get(url).await?;
        let body = resp.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    async fn download(&self, dirname: &str) -> Result<Vec<u8>> {
        let url = self.endpoint(["download", "srr", dirname])?;
        let resp = self.get(url).await?;
        let body = resp.bytes().await?;

        if body.as_ref() == NOT_FOUND_BODY.as_bytes() {
            return Err(SrrdbError::NotFound);
        }
        tracing::debug!(dirname, size = body.len(), "downloaded SRR file");
        Ok(body.to_vec())
    }

    async fn login(&self, username: &str, password: &str) -> Result<Session> {
        // The service answers with a redirect; its cookies are only visible
        // on the first response.
        let client = Client::builder()
            .timeout(self.timeout)
            .redirect(redirect::Policy::none())
            .build()?;
        let url = self.endpoint(["account", "login"])?;

        tracing::debug!(%url, username, "POST login");
        let resp = client
            .post(url)
            .form(&[("username", username), ("password", password)])
            .send()
            .await?;

        let cookies = set_cookies(&resp);
        if !cookies.iter().any(|(name, _)| name == LOGIN_COOKIE) {
            return Err(SrrdbError::Authentication("Wrong authentication?".into()));
        }

        Ok(Session::from_cookies(
            self.base_url.clone(),
            cookies.iter().map(|(n, v)| (n.as_str(), v.as_str())),
        ))
    }

    async fn upload_srrs(&self, paths: &[PathBuf], session: &Session) -> Result<UploadResponse> {
        let mut form = Form::new();
        for path in paths {
            form = form.part("files[]", file_part(path).await?);
        }

        let url = self.endpoint(["release", "upload"])?;
        tracing::debug!(%url, files = paths.len(), "POST upload");
        let request = self
            .session_client(session)?
            .post(url)
            .header("X-Requested-With", "XMLHttpRequest")
            .multipart(form);

        let body = self.send(request).await?.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    async fn upload_stored_file(
        &self,
        path: &Path,
        dirname: &str,
        folder: &str,
        session: &Session,
    ) -> Result<String> {
        if !session.is_authenticated() {
            return Err(SrrdbError::Authentication(
                "No login cookie found in provided session.".into(),
            ));
        }

        let form = Form::new()
            .part("file", file_part(path).await?)
            .text("folder", folder.to_string())
            .text("add", "");

        let url = self.endpoint(["release", "add", dirname])?;
        tracing::debug!(%url, path = %path.display(), "POST stored file");
        let request = self.session_client(session)?.post(url).multipart(form);

        let body = self.send(request).await?.text().await?;
        parse_upload_result(&body)
    }

    fn anonymous_session(&self) -> Session {
        Session::anonymous(self.base_url.clone())
    }
}
