use reqwest::cookie::{CookieStore, Jar};
use std::sync::Arc;
use url::Url;

/// Name of the cookie srrdb.com sets after a successful login
pub const LOGIN_COOKIE: &str = "uid";

/// Cookie based session with the service
///
/// Anonymous sessions carry an empty jar. A session is authenticated when
/// its jar holds the login cookie for the service URL.
#[derive(Clone)]
pub struct Session {
    jar: Arc<Jar>,
    url: Url,
}

impl Session {
    /// A session without any cookies
    pub fn anonymous(url: Url) -> Self {
        Self {
            jar: Arc::new(Jar::default()),
            url,
        }
    }

    /// A session holding `cookies` (name, value) for `url`
    pub fn from_cookies<'a>(url: Url, cookies: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let jar = Jar::default();
        for (name, value) in cookies {
            jar.add_cookie_str(&format!("{}={}; Path=/", name, value), &url);
        }
        Self {
            jar: Arc::new(jar),
            url,
        }
    }

    /// The cookie jar, to be handed to a reqwest client
    pub fn jar(&self) -> Arc<Jar> {
        self.jar.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.jar
            .cookies(&self.url)
            .and_then(|header| header.to_str().map(str::to_owned).ok())
            .is_some_and(|cookies| contains_login_cookie(&cookies))
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("url", &self.url.as_str())
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}

/// Check a `Cookie` header value (`a=1; uid=2`) for the login cookie
fn contains_login_cookie(header: &str) -> bool {
    header
        .split(';')
        .filter_map(|pair| pair.split_once('='))
        .any(|(name, _)| name.trim() == LOGIN_COOKIE)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url() -> Url {
        Url::parse("https://www.srrdb.com/").unwrap()
    }

    #[test]
    fn test_anonymous_session() {
        assert!(!Session::anonymous(url()).is_authenticated());
    }

    #[test]
    fn test_login_cookie() {
        let session = Session::from_cookies(url(), [("PHPSESSID", "abc"), ("uid", "42")]);
        assert!(session.is_authenticated());

        let session = Session::from_cookies(url(), [("PHPSESSID", "abc")]);
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_contains_login_cookie() {
        assert!(contains_login_cookie("a=1; uid=2"));
        assert!(contains_login_cookie("uid=2"));
        assert!(!contains_login_cookie("uidx=2; a=uid"));
        assert!(!contains_login_cookie(""));
    }
}
