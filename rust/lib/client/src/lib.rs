//! HTTP collaborator for the BNPL admin API.
//!
//! Everything above this crate talks to the backend through the
//! [`HttpClient`] trait: `request(path, options, use_base_url)` returning
//! parsed JSON or an [`AdminError`]. [`ApiClient`] is the reqwest-backed
//! implementation; it owns the base URL, bearer token and tenant scoping
//! so callers never build headers themselves.
//!
//! ```ignore
//! let tokens = Arc::new(SessionToken::new());
//! let client = ApiClient::new(&config, tokens.clone())?;
//! let page = client.request("clients", &RequestOptions::get().query("q", "ali"), true).await?;
//! ```

use std::sync::{Arc, RwLock};

use bnpl_core::{AdminConfig, AdminError};
use serde_json::Value;

// ── Request options ─────────────────────────────────────────────────

/// HTTP method subset used by the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Method {
    #[default]
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    fn as_reqwest(self) -> reqwest::Method {
        match self {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Patch => reqwest::Method::PATCH,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

/// Method, query string and JSON body for one request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestOptions {
    pub method: Method,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl RequestOptions {
    pub fn get() -> Self {
        Self::default()
    }

    pub fn post(body: Value) -> Self {
        Self {
            method: Method::Post,
            body: Some(body),
            ..Default::default()
        }
    }

    pub fn put(body: Value) -> Self {
        Self {
            method: Method::Put,
            body: Some(body),
            ..Default::default()
        }
    }

    pub fn patch(body: Value) -> Self {
        Self {
            method: Method::Patch,
            body: Some(body),
            ..Default::default()
        }
    }

    pub fn delete() -> Self {
        Self {
            method: Method::Delete,
            ..Default::default()
        }
    }

    /// Append a query parameter.
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }
}

// ── HttpClient ──────────────────────────────────────────────────────

/// The request function every hook and handler goes through.
#[async_trait::async_trait]
pub trait HttpClient: Send + Sync + 'static {
    /// Perform a request and return the parsed JSON body.
    ///
    /// With `use_base_url` the path is joined onto the configured API
    /// base; without it the path is used as an absolute URL.
    async fn request(
        &self,
        path: &str,
        options: &RequestOptions,
        use_base_url: bool,
    ) -> Result<Value, AdminError>;
}

// ── TokenSource ─────────────────────────────────────────────────────

/// Supplies the bearer token for each request. `None` means anonymous.
pub trait TokenSource: Send + Sync + 'static {
    fn token(&self) -> Option<String>;
}

/// No authentication.
pub struct NoAuth;

impl TokenSource for NoAuth {
    fn token(&self) -> Option<String> {
        None
    }
}

/// Fixed token, e.g. from config or `BNPL_TOKEN`.
pub struct StaticToken(String);

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }
}

impl TokenSource for StaticToken {
    fn token(&self) -> Option<String> {
        Some(self.0.clone())
    }
}

/// Token replaced on login and cleared on logout.
#[derive(Default)]
pub struct SessionToken {
    current: RwLock<Option<String>>,
}

impl SessionToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: Option<String>) -> Self {
        Self {
            current: RwLock::new(token),
        }
    }

    pub fn set(&self, token: impl Into<String>) {
        *self.current.write().unwrap_or_else(|e| e.into_inner()) = Some(token.into());
    }

    pub fn clear(&self) {
        *self.current.write().unwrap_or_else(|e| e.into_inner()) = None;
    }
}

impl TokenSource for SessionToken {
    fn token(&self) -> Option<String> {
        self.current.read().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

// ── ApiClient ───────────────────────────────────────────────────────

/// Header carrying the tenant (branch network) the staff member works in.
pub const TENANT_HEADER: &str = "X-Tenant-Id";

/// reqwest-backed [`HttpClient`].
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    tenant: Option<String>,
    token_source: Arc<dyn TokenSource>,
}

impl ApiClient {
    pub fn new(config: &AdminConfig, token_source: Arc<dyn TokenSource>) -> Result<Self, AdminError> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| AdminError::Config(format!("http client: {}", e)))?;
        Ok(Self {
            http,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            tenant: config.tenant.clone(),
            token_source,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url_for(&self, path: &str, use_base_url: bool) -> String {
        resolve_url(&self.base_url, path, use_base_url)
    }
}

#[async_trait::async_trait]
impl HttpClient for ApiClient {
    async fn request(
        &self,
        path: &str,
        options: &RequestOptions,
        use_base_url: bool,
    ) -> Result<Value, AdminError> {
        let url = self.url_for(path, use_base_url);
        tracing::debug!(method = ?options.method, %url, "api request");

        let mut req = self.http.request(options.method.as_reqwest(), &url);
        if !options.query.is_empty() {
            req = req.query(&options.query);
        }
        if let Some(body) = &options.body {
            req = req.json(body);
        }
        if let Some(token) = self.token_source.token() {
            req = req.bearer_auth(token);
        }
        if let Some(tenant) = &self.tenant {
            req = req.header(TENANT_HEADER, tenant);
        }

        let resp = req
            .send()
            .await
            .map_err(|e| AdminError::Network(e.to_string()))?;
        let status = resp.status();
        let bytes = resp
            .bytes()
            .await
            .map_err(|e| AdminError::Network(e.to_string()))?;

        if !status.is_success() {
            let message = error_message(&bytes);
            tracing::debug!(status = status.as_u16(), %url, %message, "api error");
            return Err(AdminError::from_status(status.as_u16(), message));
        }
        parse_body(&bytes)
    }
}

/// Join `path` onto `base` unless the caller asked for the raw path.
fn resolve_url(base: &str, path: &str, use_base_url: bool) -> String {
    if use_base_url {
        format!("{}/{}", base, path.trim_start_matches('/'))
    } else {
        path.to_string()
    }
}

/// Empty bodies (204, bare DELETE) become `null`.
fn parse_body(bytes: &[u8]) -> Result<Value, AdminError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }
    serde_json::from_slice(bytes).map_err(|e| AdminError::Decode(format!("response body: {}", e)))
}

/// Prefer `{"message": "..."}` from the backend, else the raw text.
fn error_message(bytes: &[u8]) -> String {
    if let Ok(Value::Object(map)) = serde_json::from_slice::<Value>(bytes) {
        if let Some(Value::String(msg)) = map.get("message").or_else(|| map.get("detail")) {
            return msg.clone();
        }
    }
    String::from_utf8_lossy(bytes).trim().to_string()
}
