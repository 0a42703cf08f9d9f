//! HTTP execution seam.
//!
//! The client hands each request to an [`HttpExecutor`]. The default one
//! wraps a `reqwest::Client`; callers needing custom proxying, pooling or
//! instrumentation can supply their own.

use std::time::Duration;

use bytes::Bytes;
use reqwest::header::HeaderMap;
use reqwest::{Method, StatusCode};

use crate::error::ConnectionError;

/// One outgoing request.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: HeaderMap,
    pub body: Option<Bytes>,
    /// Per-request timeout from the client configuration.
    pub timeout: Option<Duration>,
}

/// A fully read response.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: StatusCode,
    pub body: Bytes,
}

/// Executes a single request-response exchange.
///
/// Implementations read the whole body before returning. Any failure before
/// that point is a [`ConnectionError`].
#[async_trait::async_trait]
pub trait HttpExecutor: Send + Sync + std::fmt::Debug {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ConnectionError>;
}

/// Default executor backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct ReqwestExecutor {
    http: reqwest::Client,
}

impl ReqwestExecutor {
    pub fn new(http: reqwest::Client) -> Self {
        Self { http }
    }
}

#[async_trait::async_trait]
impl HttpExecutor for ReqwestExecutor {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ConnectionError> {
        let mut builder = self.http.request(request.method, &request.url).headers(request.headers);

        if let Some(timeout) = request.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        Ok(HttpResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_refused_connection_is_http_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let http = reqwest::Client::builder().no_proxy().build().unwrap();
        let executor = ReqwestExecutor::new(http);
        let request = HttpRequest {
            method: Method::GET,
            url: format!("http://{addr}/health"),
            headers: HeaderMap::new(),
            body: None,
            timeout: Some(Duration::from_secs(5)),
        };

        let result = executor.execute(request).await;
        assert!(matches!(result, Err(ConnectionError::Http(ref e)) if e.is_connect()));
    }
}
