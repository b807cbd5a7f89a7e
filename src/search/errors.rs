//! Search errors.

use thiserror::Error;

use crate::{
    api::ApiError,
    search::{HandlerKind, SearchType},
};

/// A search value or label that could not be accepted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Not one of the search type keys.
    #[error("unknown search type `{0}`")]
    UnknownSearchType(String),

    /// Not one of the space captions.
    #[error("unknown space caption `{0}`")]
    UnknownSpaceCaption(String),

    /// The value does not pass the format check for its search type.
    #[error("`{value}` is not a valid {search_type}")]
    InvalidValue {
        /// Search type whose format was checked.
        search_type: SearchType,

        /// The rejected value.
        value: String,
    },
}

/// Errors raised by a form search.
#[derive(Debug, Error)]
pub enum SearchError {
    /// A handler was asked to run a search type it does not implement.
    #[error("{handler} handler does not support search type {search_type}")]
    UnsupportedSearchType {
        /// Handler that received the search.
        handler: HandlerKind,

        /// Search type it was asked to run.
        search_type: SearchType,
    },

    /// The search completed but matched nothing.
    #[error("Kunde inte hitta något resultat för {0}")]
    NoResults(String),

    /// A `OneCore` lookup failed.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The query could not be built.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}
