//! Bearer-token authenticating client for the `OneCore` API.

use std::{fmt, sync::Arc};

use reqwest::{Method, StatusCode};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{debug, error, info, instrument, warn};
use zeroize::Zeroizing;

use crate::{
    api::{
        ApiError,
        token::{Token, TokenStore},
        transport::{ApiRequest, ApiResponse, HttpTransport},
    },
    settings::{ONECORE_BASE_URL, ONECORE_PASSWORD, ONECORE_USERNAME, Settings},
};

const AUTH_PATH: &str = "/auth/generateToken";

/// Query parameters and body for a single logical request.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    query: Vec<(String, String)>,
    json: Option<Value>,
}

impl RequestOptions {
    /// No query parameters and no body.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a query parameter.
    #[must_use]
    pub fn query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((name.into(), value.into()));
        self
    }

    /// Send `body` as JSON.
    #[must_use]
    pub fn json(mut self, body: Value) -> Self {
        self.json = Some(body);
        self
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    token: String,
}

/// Issues `OneCore` requests with a bearer token and refreshes it once after a
/// `401`.
#[derive(Clone)]
pub struct AuthenticatingClient {
    settings: Arc<dyn Settings>,
    transport: Arc<dyn HttpTransport>,
    tokens: TokenStore,
}

impl AuthenticatingClient {
    /// Build a client, exchanging credentials for a token when none is
    /// persisted yet.
    ///
    /// # Errors
    ///
    /// Returns an error when the initial credential exchange fails.
    pub async fn connect(
        settings: Arc<dyn Settings>,
        transport: Arc<dyn HttpTransport>,
    ) -> Result<Self, ApiError> {
        let client = Self {
            tokens: TokenStore::new(Arc::clone(&settings)),
            settings,
            transport,
        };

        if client.tokens.get().is_none() {
            debug!("no persisted OneCore token, authenticating");

            client.refresh_token().await?;
        }

        Ok(client)
    }

    /// Exchange the configured credentials for a new token and persist it.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::AuthFailure`] on any non-200 answer, or the
    /// transport error when the exchange could not be sent.
    #[instrument(skip_all)]
    pub async fn refresh_token(&self) -> Result<Token, ApiError> {
        let url = format!("{}{AUTH_PATH}", self.base_url()?);
        let username = self.required(ONECORE_USERNAME)?;
        let password = Zeroizing::new(self.required(ONECORE_PASSWORD)?);

        let request = ApiRequest::new(Method::POST, url).json(json!({
            "username": username,
            "password": password.as_str(),
        }));

        let response = self.transport.send(request).await?;

        if response.status != StatusCode::OK {
            warn!(status = %response.status, "OneCore credential exchange rejected");

            return Err(ApiError::AuthFailure {
                status: response.status.as_u16(),
                body: response.body,
            });
        }

        let parsed: TokenResponse = response.json()?;
        let token = Token::new(parsed.token);

        self.tokens.set(&token);

        info!("obtained new OneCore token");

        Ok(token)
    }

    /// Send a request to `path` below the configured base URL.
    ///
    /// A `401` triggers exactly one token refresh and one retry. Any other
    /// status is handed back to the caller unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Unauthorized`] when the retry is rejected too, or
    /// any error raised by the token refresh or the transport.
    #[instrument(skip(self, method, options), fields(%method))]
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        options: RequestOptions,
    ) -> Result<ApiResponse, ApiError> {
        let url = format!("{}{path}", self.base_url()?);

        let token = match self.tokens.get() {
            Some(token) => token,
            None => self.refresh_token().await?,
        };

        let response = self.send(method.clone(), &url, token, &options).await?;

        if response.status != StatusCode::UNAUTHORIZED {
            return Ok(response);
        }

        debug!("OneCore rejected token, refreshing");

        let token = self.refresh_token().await?;
        let response = self.send(method, &url, token, &options).await?;

        if response.status == StatusCode::UNAUTHORIZED {
            error!(body = %response.body, "unauthorized request after token refresh");

            return Err(ApiError::Unauthorized {
                body: response.body,
            });
        }

        Ok(response)
    }

    async fn send(
        &self,
        method: Method,
        url: &str,
        token: Token,
        options: &RequestOptions,
    ) -> Result<ApiResponse, ApiError> {
        let mut request = ApiRequest::new(method, url)
            .bearer(token)
            .query(options.query.clone());

        if let Some(body) = &options.json {
            request = request.json(body.clone());
        }

        Ok(self.transport.send(request).await?)
    }

    fn base_url(&self) -> Result<String, ApiError> {
        let base = self.required(ONECORE_BASE_URL)?;

        Ok(base.trim_end_matches('/').to_string())
    }

    fn required(&self, key: &'static str) -> Result<String, ApiError> {
        self.settings
            .get(key)
            .filter(|value| !value.is_empty())
            .ok_or(ApiError::MissingSetting(key))
    }
}

impl fmt::Debug for AuthenticatingClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthenticatingClient")
            .field("tokens", &self.tokens)
            .finish_non_exhaustive()
    }
}

/// Turn a non-success response into [`ApiError::Status`].
pub(crate) fn ensure_success(response: ApiResponse) -> Result<ApiResponse, ApiError> {
    if response.is_success() {
        Ok(response)
    } else {
        Err(ApiError::Status {
            status: response.status.as_u16(),
            body: response.body,
        })
    }
}
