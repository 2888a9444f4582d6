//! Bugspad API client.
//!
//! Low-level HTTP client that holds the connection parameters and the
//! optional bug scope. Entity operations live in the model modules and
//! the `Create`/`List` traits.

use std::env;
use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use crate::error::{BugspadError, Result};

const USER_AGENT: &str = concat!("bugspad/", env!("CARGO_PKG_VERSION"));

/// The exact body the server sends back on bad credentials.
pub(crate) const AUTH_FAILURE: &str = "Authentication failure.";

/// The body the server sends back on a successful mutation.
pub(crate) const SUCCESS: &str = "Success";

/// Credentials sent with every mutating request.
///
/// The Bugspad server authenticates per request: `user` and `password`
/// travel as fields of the JSON payload, not as HTTP headers.
#[derive(Clone, Serialize)]
pub(crate) struct Credentials {
    pub user: String,
    pub password: String,
}

/// Client for the Bugspad API.
///
/// A client is either *general* (no bug id: create bugs, manage the
/// product/component/release catalog, read listings) or *bug-scoped*
/// (carries a bug id: comment, update, CC management). A bug-scoped
/// client is obtained from [`BugspadClient::create_bug`] or
/// [`BugspadClient::with_bug_id`]; calling a bug-scoped operation on a
/// general client fails with [`BugspadError::MissingBugId`] before any
/// request is made.
///
/// This struct is cheaply cloneable; clones reference the same underlying
/// connection pool. It is read-only after construction, so sharing a
/// client across tasks is safe.
///
/// # Example
///
/// ```no_run
/// use bugspad::BugspadClient;
///
/// # async fn example() -> bugspad::Result<()> {
/// // Create from environment variables
/// let client = BugspadClient::from_env()?;
///
/// // Or configure manually
/// let client = BugspadClient::new("http://bugs.example.org:9998", "me@example.org", "secret")?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct BugspadClient {
    http: Client,
    base_url: Arc<Url>,
    credentials: Arc<Credentials>,
    bug_id: Option<u64>,
}

impl std::fmt::Debug for BugspadClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BugspadClient")
            .field("base_url", &self.base_url.as_str())
            .field("user", &self.credentials.user)
            .field("bug_id", &self.bug_id)
            .finish_non_exhaustive()
    }
}

impl BugspadClient {
    /// Create a client from environment variables.
    ///
    /// Reads `BUGSPAD_URL`, `BUGSPAD_USER` and `BUGSPAD_PASSWORD`. All
    /// three are required; there is no public default instance.
    ///
    /// # Errors
    ///
    /// Returns an error if any of the variables is not set.
    pub fn from_env() -> Result<Self> {
        let base_url = env::var("BUGSPAD_URL").map_err(|_| {
            BugspadError::ConfigMissing("BUGSPAD_URL environment variable not set".to_string())
        })?;
        let user = env::var("BUGSPAD_USER").map_err(|_| {
            BugspadError::ConfigMissing("BUGSPAD_USER environment variable not set".to_string())
        })?;
        let password = env::var("BUGSPAD_PASSWORD").map_err(|_| {
            BugspadError::ConfigMissing(
                "BUGSPAD_PASSWORD environment variable not set".to_string(),
            )
        })?;

        Self::new(&base_url, &user, &password)
    }

    /// Create a new general (not bug-scoped) client.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Base URL of the Bugspad server (e.g., `http://127.0.0.1:9998`)
    /// * `user` - Account email used for mutating calls
    /// * `password` - Account password
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid.
    pub fn new(base_url: &str, user: &str, password: &str) -> Result<Self> {
        // Ensure base URL ends with /
        let base_url_str = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };

        let base_url = Url::parse(&base_url_str)?;

        let http = Client::builder()
            .user_agent(USER_AGENT)
            .brotli(true)
            .gzip(true)
            .deflate(true)
            .timeout(Duration::from_secs(300))
            .build()
            .map_err(BugspadError::Http)?;

        Ok(Self {
            http,
            base_url: Arc::new(base_url),
            credentials: Arc::new(Credentials {
                user: user.to_string(),
                password: password.to_string(),
            }),
            bug_id: None,
        })
    }

    /// Return a clone of this client scoped to the given bug.
    #[must_use]
    pub fn with_bug_id(&self, bug_id: u64) -> Self {
        let mut client = self.clone();
        client.bug_id = Some(bug_id);
        client
    }

    /// The bug this client is scoped to, if any.
    pub fn bug_id(&self) -> Option<u64> {
        self.bug_id
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The account this client authenticates as.
    pub fn user(&self) -> &str {
        &self.credentials.user
    }

    pub(crate) fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// The bug id, or a usage error naming the operation that needed it.
    pub(crate) fn require_bug_id(&self, operation: &'static str) -> Result<u64> {
        self.bug_id
            .ok_or(BugspadError::MissingBugId { operation })
    }

    /// Make a GET request.
    #[tracing::instrument(skip(self))]
    pub async fn get(&self, path: &str) -> Result<Response> {
        let url = self.base_url.join(path)?;

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(BugspadError::Http)?;

        Self::check_response(response).await
    }

    /// Make a POST request with JSON body.
    #[tracing::instrument(skip(self, body))]
    pub async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Response> {
        let url = self.base_url.join(path)?;

        let response = self
            .http
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(BugspadError::Http)?;

        Self::check_response(response).await
    }

    /// POST and return the decoded text body.
    ///
    /// Several endpoints answer with a JSON-encoded string (`"Success"`,
    /// `"Authentication failure."`) or a bare id; this unwraps the string
    /// layer when present and maps the authentication marker to an error.
    pub(crate) async fn post_text<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<String> {
        let response = self.post(path, body).await?;
        let raw = response.text().await.map_err(BugspadError::Http)?;
        let text = decode_text(&raw);

        if text == AUTH_FAILURE {
            return Err(BugspadError::AuthenticationFailed);
        }

        Ok(text)
    }

    /// POST and deserialize a JSON response body.
    ///
    /// The authentication-failure marker is checked first, since the
    /// server reports it as a string body even on JSON endpoints.
    pub(crate) async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.post(path, body).await?;
        let raw = response.text().await.map_err(BugspadError::Http)?;

        if decode_text(&raw) == AUTH_FAILURE {
            return Err(BugspadError::AuthenticationFailed);
        }

        serde_json::from_str(&raw).map_err(BugspadError::Parse)
    }

    /// GET and deserialize a JSON response body.
    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self.get(path).await?;
        let raw = response.text().await.map_err(BugspadError::Http)?;
        serde_json::from_str(&raw).map_err(BugspadError::Parse)
    }

    /// Check response status and convert errors.
    async fn check_response(response: Response) -> Result<Response> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let message = Self::extract_error_message(response, status).await;
        Err(BugspadError::UnexpectedResponse { message })
    }

    /// Extract error message from a failed response.
    async fn extract_error_message(response: Response, status: reqwest::StatusCode) -> String {
        let body = match response.text().await {
            Ok(b) => b,
            Err(_) => return format!("HTTP {status}"),
        };

        if body.trim().is_empty() {
            return format!("HTTP {status}");
        }

        decode_text(&body)
    }
}

/// Unwrap the server's JSON-string framing from a text body.
///
/// The server answers plain-text endpoints with a JSON-encoded string
/// followed by a newline (e.g. `"Success"\n`); ids come back as bare
/// integer text. Non-string bodies pass through trimmed.
pub(crate) fn decode_text(body: &str) -> String {
    let trimmed = body.trim();
    serde_json::from_str::<String>(trimmed).unwrap_or_else(|_| trimmed.to_string())
}
