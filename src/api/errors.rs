//! `OneCore` API errors.

use thiserror::Error;

/// Errors raised by an [`HttpTransport`](crate::api::HttpTransport).
#[derive(Debug, Error)]
pub enum TransportError {
    /// The request could not be sent or the response body could not be read.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The request could not be built from the given parts.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

/// Errors raised while talking to `OneCore`.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The search type has no lease lookup path.
    #[error("Ogiltig söktyp: {0}")]
    InvalidSearchType(String),

    /// A required setting is missing.
    #[error("setting `{0}` is not configured")]
    MissingSetting(&'static str),

    /// The credential exchange was rejected.
    #[error("authentication against OneCore failed with status {status}: {body}")]
    AuthFailure {
        /// HTTP status of the token endpoint.
        status: u16,

        /// Response body.
        body: String,
    },

    /// The request was still unauthorized after a token refresh.
    #[error("unauthorized request after token refresh: {body}")]
    Unauthorized {
        /// Response body of the retried request.
        body: String,
    },

    /// `OneCore` answered with a non-success status.
    #[error("OneCore request failed with status {status}: {body}")]
    Status {
        /// HTTP status.
        status: u16,

        /// Response body.
        body: String,
    },

    /// Either the search matched nothing or `OneCore` could not be reached.
    #[error("{message}")]
    NoResultsOrConnectivity {
        /// Message shown to the user.
        message: String,

        /// The failed lookup.
        #[source]
        source: Box<ApiError>,
    },

    /// The response body did not match the expected shape.
    #[error("unexpected response body")]
    Decode(#[from] serde_json::Error),

    /// The request never completed.
    #[error("transport error")]
    Transport(#[from] TransportError),
}

impl ApiError {
    /// HTTP status carried by this error, if any.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::AuthFailure { status, .. } | Self::Status { status, .. } => Some(*status),
            Self::Unauthorized { .. } => Some(401),
            Self::NoResultsOrConnectivity { source, .. } => source.status(),
            Self::InvalidSearchType(_)
            | Self::MissingSetting(_)
            | Self::Decode(_)
            | Self::Transport(_) => None,
        }
    }

    /// Whether this error came from the upstream HTTP exchange.
    pub(crate) fn is_http_failure(&self) -> bool {
        matches!(
            self,
            Self::Status { .. } | Self::Unauthorized { .. } | Self::Transport(_)
        )
    }
}
