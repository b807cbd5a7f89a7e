//! `OneCore` API access

pub mod client;
pub mod errors;
pub mod filters;
pub mod models;
pub mod onecore;
pub mod token;
pub mod transport;

pub use client::{AuthenticatingClient, RequestOptions};
pub use errors::{ApiError, TransportError};
pub use onecore::*;
pub use token::{Token, TokenStore};
pub use transport::*;
