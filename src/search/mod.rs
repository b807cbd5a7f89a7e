//! Searching `OneCore` and offering the results as form options.

pub mod errors;
pub mod handlers;
pub mod matrix;
pub mod options;
pub mod query;
pub mod service;
pub mod session;

pub use errors::{SearchError, ValidationError};
pub use handlers::SearchHandler;
pub use matrix::HandlerKind;
pub use options::*;
pub use query::{SearchQuery, SearchType, SpaceCaption};
pub use service::{SearchInput, SearchService};
pub use session::{FormWarning, SearchOutcome, SearchSession};
