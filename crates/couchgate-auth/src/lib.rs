//! CouchDB cookie-session authentication strategy.
//!
//! Logs in against the server's `_session` endpoint and captures the auth
//! cookie into an explicit [`Session`] value, which callers thread into
//! subsequent requests as headers or as a derived auth object. There is no
//! hidden per-strategy state; re-authentication just produces a new
//! `Session`.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;
use tracing::debug;

static AUTH_SESSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"AuthSession="([^"]+)""#).expect("valid regex"));

#[derive(Debug, Deserialize)]
struct SessionBody {
    #[serde(default)]
    ok: bool,
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// Session state produced by [`CouchAuth::authenticate`].
///
/// `cookie` holds the raw `Set-Cookie` value from a successful login, or
/// nothing when authentication failed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub cookie: Option<String>,
}

/// Auth information for transports that pass credentials in the request
/// body rather than headers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthObject {
    pub auth_session: Option<String>,
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        self.cookie.is_some()
    }

    /// Extract the `AuthSession` token from the stored cookie.
    pub fn auth_object(&self) -> AuthObject {
        let auth_session = self.cookie.as_deref().and_then(|cookie| {
            AUTH_SESSION
                .captures(cookie)
                .map(|captures| captures[1].to_string())
        });
        AuthObject { auth_session }
    }

    /// Headers needed for authenticated requests with this strategy.
    pub fn auth_headers(&self) -> BTreeMap<String, String> {
        match &self.cookie {
            Some(cookie) => BTreeMap::from([("Cookie".to_string(), cookie.clone())]),
            None => BTreeMap::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// CouchAuth
// ---------------------------------------------------------------------------

/// Cookie-session authentication against a CouchDB server.
pub struct CouchAuth {
    uri: String,
    key: String,
    secret: String,
    client: reqwest::Client,
}

impl CouchAuth {
    /// Create a strategy for the given server URL and credentials.
    pub fn new(uri: &str, key: &str, secret: &str) -> Self {
        Self {
            uri: uri.trim_end_matches('/').to_string(),
            key: key.to_string(),
            secret: secret.to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// Log in and return the resulting session.
    ///
    /// Any failure (transport error, non-200 status, body without
    /// `"ok": true`) yields an unauthenticated session rather than an error;
    /// the failure is logged at debug level.
    pub async fn authenticate(&self) -> Session {
        let body = format!("name={}&password={}", self.key, self.secret);
        let response = self
            .client
            .post(format!("{}/_session", self.uri))
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body(body)
            .send()
            .await;

        let response = match response {
            Ok(response) => response,
            Err(err) => {
                debug!("couchdb auth: server returned an error: {err}");
                return Session::default();
            }
        };

        if !response.status().is_success() {
            debug!(
                "couchdb auth: could not authenticate '{}' on {}",
                self.key, self.uri
            );
            return Session::default();
        }

        // Read the cookie before the body consumes the response.
        let cookie = response
            .headers()
            .get(reqwest::header::SET_COOKIE)
            .and_then(|value| value.to_str().ok())
            .map(String::from);

        let ok = response
            .json::<SessionBody>()
            .await
            .map(|body| body.ok)
            .unwrap_or(false);

        if !ok {
            debug!(
                "couchdb auth: could not authenticate '{}' on {}",
                self.key, self.uri
            );
            return Session::default();
        }

        Session { cookie }
    }
}
