//! HTTP transport seam.

use std::time::Duration;

use async_trait::async_trait;
use mockall::automock;
use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::api::{TransportError, token::Token};

/// A single outgoing HTTP request.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    /// HTTP method.
    pub method: Method,

    /// Absolute URL including the base URL.
    pub url: String,

    /// Bearer token for the `Authorization` header.
    pub bearer: Option<Token>,

    /// Query parameters in order.
    pub query: Vec<(String, String)>,

    /// JSON request body.
    pub json: Option<Value>,
}

impl ApiRequest {
    /// Request without token, query or body.
    #[must_use]
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            bearer: None,
            query: Vec::new(),
            json: None,
        }
    }

    /// Attach a bearer token.
    #[must_use]
    pub fn bearer(mut self, token: Token) -> Self {
        self.bearer = Some(token);
        self
    }

    /// Replace the query parameters.
    #[must_use]
    pub fn query(mut self, query: Vec<(String, String)>) -> Self {
        self.query = query;
        self
    }

    /// Send `body` as JSON.
    #[must_use]
    pub fn json(mut self, body: Value) -> Self {
        self.json = Some(body);
        self
    }

    /// Value of a query parameter, if present.
    #[must_use]
    pub fn query_value(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// Status and body of a completed HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    /// HTTP status.
    pub status: StatusCode,
    /// Raw response body.
    pub body: String,
}

impl ApiResponse {
    /// Response with a text body.
    #[must_use]
    pub fn new(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Successful response with a JSON body.
    #[must_use]
    pub fn ok_json(body: &Value) -> Self {
        Self::new(StatusCode::OK, body.to_string())
    }

    /// Status is `2xx`.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Decode the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns an error when the body is not valid JSON for `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_str(&self.body)
    }
}

/// Sends [`ApiRequest`]s.
#[automock]
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Send `request` and read the full response.
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError>;
}

/// [`HttpTransport`] backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    http: Client,
}

impl ReqwestTransport {
    /// Create a transport; `timeout` bounds each request when set.
    ///
    /// # Errors
    ///
    /// Returns an error when the TLS backend cannot be initialised.
    pub fn new(timeout: Option<Duration>) -> Result<Self, TransportError> {
        let mut builder = Client::builder();

        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
        })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        let mut builder = self.http.request(request.method, &request.url);

        if let Some(token) = &request.bearer {
            builder = builder.bearer_auth(token.expose());
        }

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }

        if let Some(body) = &request.json {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let body = response.text().await?;

        Ok(ApiResponse { status, body })
    }
}
