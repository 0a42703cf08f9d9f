//! Rendering server client.
//!
//! ### Endpoints
//!
//! - `POST {base}/render` with a JSON body, answering raw output bytes
//! - `GET {base}/health`, healthy iff `200 OK`
//!
//! Trailing slashes on the base address are stripped once at construction.
//! The client is immutable afterwards and cheap to clone; every request built
//! from it is independent.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::{Method, StatusCode};

use forge_core::config::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_MS, DEFAULT_USER_AGENT};
use forge_core::{ConfigError, ForgeConfig, RenderPayload, RenderSource};

use crate::error::{ConnectionError, Error};
use crate::render::RenderRequest;
use crate::response;
use crate::transport::{HttpExecutor, HttpRequest, ReqwestExecutor};

const RENDER_PATH: &str = "/render";
const HEALTH_PATH: &str = "/health";

/// Strip trailing `/` so endpoint paths never double the separator.
pub fn normalize_base_url(base_url: &str) -> &str {
    base_url.trim_end_matches('/')
}

/// Client for a rendering server.
#[derive(Debug, Clone)]
pub struct ForgeClient {
    base_url: Arc<str>,
    timeout: Option<Duration>,
    user_agent: HeaderValue,
    executor: Arc<dyn HttpExecutor>,
}

impl ForgeClient {
    /// Client for `base_url` with default settings.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ConfigError> {
        Self::builder(base_url).build()
    }

    pub fn builder(base_url: impl Into<String>) -> ForgeClientBuilder {
        ForgeClientBuilder::new(base_url)
    }

    /// Client from a validated configuration.
    pub fn from_config(config: &ForgeConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        Self::builder(config.base_url.trim()).timeout(config.timeout()).user_agent(config.user_agent.clone()).build()
    }

    /// Client from `FORGE_*` environment variables and `FORGE_CONFIG_FILE`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_config(&ForgeConfig::load()?)
    }

    /// Normalized base address.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Per-request timeout, if this client imposes one over the HTTP mechanism's own policy.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Start a render request from an HTML string.
    pub fn render_html(&self, html: impl Into<String>) -> RenderRequest {
        RenderRequest::new(self.clone(), RenderSource::Html(html.into()))
    }

    /// Start a render request from a URL the server fetches.
    pub fn render_url(&self, url: impl Into<String>) -> RenderRequest {
        RenderRequest::new(self.clone(), RenderSource::Url(url.into()))
    }

    /// Check whether the server reports itself healthy.
    ///
    /// A non-200 status is `Ok(false)`; only transport failures are errors.
    pub async fn health(&self) -> Result<bool, Error> {
        let request = self.request(Method::GET, HEALTH_PATH, HeaderMap::new(), None);
        let response = self.executor.execute(request).await?;

        tracing::debug!(status = %response.status, "forge health response");

        Ok(response.status == StatusCode::OK)
    }

    /// [`health`](Self::health), abandoned with a connection error when `cancel` completes first.
    pub async fn health_until<F>(&self, cancel: F) -> Result<bool, Error>
    where
        F: Future<Output = ()>,
    {
        until(self.health(), cancel).await
    }

    pub(crate) async fn render(&self, payload: &RenderPayload) -> Result<Bytes, Error> {
        let body = payload.to_json();

        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));

        tracing::debug!(
            url = %self.endpoint(RENDER_PATH),
            format = %payload.format,
            body_bytes = body.len(),
            "dispatching render request"
        );

        let request = self.request(Method::POST, RENDER_PATH, headers, Some(Bytes::from(body)));
        let response = self.executor.execute(request).await?;

        tracing::debug!(status = %response.status, body_bytes = response.body.len(), "forge render response");

        response::classify(response)
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn request(&self, method: Method, path: &str, mut headers: HeaderMap, body: Option<Bytes>) -> HttpRequest {
        headers.insert(header::USER_AGENT, self.user_agent.clone());

        HttpRequest { method, url: self.endpoint(path), headers, body, timeout: self.timeout }
    }
}

/// Race `work` against a cancellation future.
pub(crate) async fn until<T, W, F>(work: W, cancel: F) -> Result<T, Error>
where
    W: Future<Output = Result<T, Error>>,
    F: Future<Output = ()>,
{
    tokio::select! {
        result = work => result,
        () = cancel => Err(ConnectionError::Cancelled.into()),
    }
}

/// Race `work` against a deadline.
pub(crate) async fn within<T, W>(work: W, deadline: Duration) -> Result<T, Error>
where
    W: Future<Output = Result<T, Error>>,
{
    tokio::time::timeout(deadline, work)
        .await
        .map_err(|_| ConnectionError::DeadlineElapsed(deadline))?
}

/// Builder for [`ForgeClient`]. Settings are fixed once built.
#[derive(Debug)]
pub struct ForgeClientBuilder {
    base_url: String,
    timeout: Option<Duration>,
    user_agent: String,
    http: Option<reqwest::Client>,
    executor: Option<Arc<dyn HttpExecutor>>,
}

impl ForgeClientBuilder {
    fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            http: None,
            executor: None,
        }
    }

    /// HTTP timeout applied to every request.
    ///
    /// Unset, a built-in client defaults to 120s and a supplied client or
    /// executor keeps its own timeout policy.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Use a preconfigured `reqwest::Client` (proxies, pooling, TLS).
    pub fn http_client(mut self, http: reqwest::Client) -> Self {
        self.http = Some(http);
        self
    }

    /// Replace the whole HTTP execution mechanism. Takes precedence over
    /// [`http_client`](Self::http_client).
    pub fn executor(mut self, executor: impl HttpExecutor + 'static) -> Self {
        self.executor = Some(Arc::new(executor));
        self
    }

    pub fn build(self) -> Result<ForgeClient, ConfigError> {
        let user_agent = HeaderValue::from_str(&self.user_agent)
            .map_err(|e| ConfigError::Invalid { field: "user_agent".into(), reason: e.to_string() })?;

        let timeout = match (&self.executor, &self.http) {
            (None, None) => Some(self.timeout.unwrap_or(Duration::from_millis(DEFAULT_TIMEOUT_MS))),
            _ => self.timeout,
        };

        let executor: Arc<dyn HttpExecutor> = match (self.executor, self.http) {
            (Some(executor), _) => executor,
            (None, Some(http)) => Arc::new(ReqwestExecutor::new(http)),
            (None, None) => {
                let http = reqwest::Client::builder()
                    .use_rustls_tls()
                    .gzip(true)
                    .brotli(true)
                    .deflate(true)
                    .build()
                    .map_err(|e| ConfigError::HttpClient(e.to_string()))?;
                Arc::new(ReqwestExecutor::new(http))
            }
        };

        Ok(ForgeClient {
            base_url: normalize_base_url(&self.base_url).into(),
            timeout,
            user_agent,
            executor,
        })
    }
}

impl Default for ForgeClientBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::sync::Mutex;

    use crate::transport::HttpResponse;

    /// Executor that records requests and replays a canned outcome.
    #[derive(Debug)]
    pub(crate) struct ScriptedExecutor {
        pub(crate) requests: Arc<Mutex<Vec<HttpRequest>>>,
        outcome: Outcome,
    }

    #[derive(Debug)]
    enum Outcome {
        Respond(u16, &'static [u8]),
        Refuse,
        Hang,
    }

    impl ScriptedExecutor {
        pub(crate) fn respond(status: u16, body: &'static [u8]) -> Self {
            Self { requests: Arc::default(), outcome: Outcome::Respond(status, body) }
        }

        pub(crate) fn refuse() -> Self {
            Self { requests: Arc::default(), outcome: Outcome::Refuse }
        }

        pub(crate) fn hang() -> Self {
            Self { requests: Arc::default(), outcome: Outcome::Hang }
        }
    }

    #[async_trait::async_trait]
    impl HttpExecutor for ScriptedExecutor {
        async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ConnectionError> {
            self.requests.lock().unwrap().push(request);
            match self.outcome {
                Outcome::Respond(status, body) => {
                    Ok(HttpResponse { status: StatusCode::from_u16(status).unwrap(), body: Bytes::from_static(body) })
                }
                Outcome::Refuse => Err(ConnectionError::transport(std::io::Error::new(
                    std::io::ErrorKind::ConnectionRefused,
                    "connection refused",
                ))),
                Outcome::Hang => std::future::pending().await,
            }
        }
    }

    pub(crate) fn scripted_client(executor: ScriptedExecutor) -> (ForgeClient, Arc<Mutex<Vec<HttpRequest>>>) {
        let requests = executor.requests.clone();
        let client = ForgeClient::builder("http://localhost:3000/").executor(executor).build().unwrap();
        (client, requests)
    }

    #[test]
    fn test_normalize_base_url() {
        assert_eq!(normalize_base_url("http://host:3000/"), "http://host:3000");
        assert_eq!(normalize_base_url("http://host:3000"), "http://host:3000");
        assert_eq!(normalize_base_url("http://host:3000///"), "http://host:3000");
        assert_eq!(normalize_base_url("http://host:3000/forge/"), "http://host:3000/forge");
    }

    #[test]
    fn test_trailing_slash_endpoints_match() {
        let with_slash = ForgeClient::new("http://host:3000/").unwrap();
        let without_slash = ForgeClient::new("http://host:3000").unwrap();

        assert_eq!(with_slash.base_url(), "http://host:3000");
        assert_eq!(with_slash.endpoint(RENDER_PATH), without_slash.endpoint(RENDER_PATH));
        assert_eq!(with_slash.endpoint(HEALTH_PATH), "http://host:3000/health");
    }

    #[test]
    fn test_builder_defaults() {
        let client = ForgeClientBuilder::default().build().unwrap();
        assert_eq!(client.base_url(), "http://localhost:3000");
        assert_eq!(client.timeout(), Some(Duration::from_secs(120)));
        assert_eq!(client.user_agent, DEFAULT_USER_AGENT);
    }

    #[test]
    fn test_builder_rejects_invalid_user_agent() {
        let result = ForgeClient::builder("http://host:3000").user_agent("bad\nagent").build();
        assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "user_agent"));
    }

    #[test]
    fn test_from_config() {
        let config = ForgeConfig { base_url: "http://render:8080/".into(), timeout_ms: 2500, ..Default::default() };
        let client = ForgeClient::from_config(&config).unwrap();
        assert_eq!(client.base_url(), "http://render:8080");
        assert_eq!(client.timeout(), Some(Duration::from_millis(2500)));
    }

    #[test]
    fn test_from_config_validates() {
        let config = ForgeConfig { timeout_ms: 1, ..Default::default() };
        assert!(matches!(ForgeClient::from_config(&config), Err(ConfigError::Invalid { .. })));
    }

    #[tokio::test]
    async fn test_health_ok() {
        let (client, requests) = scripted_client(ScriptedExecutor::respond(200, b"ok"));
        assert!(client.health().await.unwrap());

        let requests = requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, Method::GET);
        assert_eq!(requests[0].url, "http://localhost:3000/health");
        assert!(requests[0].body.is_none());
        assert_eq!(requests[0].timeout, None);
    }

    #[test]
    fn test_supplied_http_client_keeps_its_timeout_policy() {
        let http = reqwest::Client::builder().no_proxy().build().unwrap();
        let client = ForgeClient::builder("http://host:3000").http_client(http.clone()).build().unwrap();
        assert_eq!(client.timeout(), None);

        let client =
            ForgeClient::builder("http://host:3000").http_client(http).timeout(Duration::from_secs(3)).build().unwrap();
        assert_eq!(client.timeout(), Some(Duration::from_secs(3)));
    }

    #[tokio::test]
    async fn test_explicit_timeout_reaches_executor() {
        let executor = ScriptedExecutor::respond(200, b"");
        let requests = executor.requests.clone();
        let client =
            ForgeClient::builder("http://host").executor(executor).timeout(Duration::from_secs(7)).build().unwrap();

        client.health().await.unwrap();

        assert_eq!(requests.lock().unwrap()[0].timeout, Some(Duration::from_secs(7)));
    }

    #[tokio::test]
    async fn test_health_non_ok_is_not_an_error() {
        let (client, _) = scripted_client(ScriptedExecutor::respond(503, br#"{"error":"warming up"}"#));
        assert!(!client.health().await.unwrap());
    }

    #[tokio::test]
    async fn test_health_transport_failure_is_connection_error() {
        let (client, _) = scripted_client(ScriptedExecutor::refuse());
        let err = client.health().await.unwrap_err();
        assert!(err.is_connection());
    }

    #[tokio::test]
    async fn test_health_until_cancelled() {
        let (client, _) = scripted_client(ScriptedExecutor::hang());
        let err = client.health_until(std::future::ready(())).await.unwrap_err();
        assert!(matches!(err, Error::Connection(ConnectionError::Cancelled)));
    }

    #[tokio::test]
    async fn test_user_agent_header() {
        let executor = ScriptedExecutor::respond(200, b"");
        let requests = executor.requests.clone();
        let client = ForgeClient::builder("http://host").user_agent("forge-test/1.0").executor(executor).build().unwrap();

        client.health().await.unwrap();

        let requests = requests.lock().unwrap();
        assert_eq!(requests[0].headers.get(header::USER_AGENT).unwrap(), "forge-test/1.0");
    }
}
