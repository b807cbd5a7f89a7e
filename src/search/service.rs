//! Form search entry point.

use std::{fmt, sync::Arc};

use tracing::debug;

use crate::{
    api::PropertyApi,
    search::{
        FormWarning, HandlerKind, SearchError, SearchOutcome, SearchQuery, SearchSession,
        SearchType, SpaceCaption,
    },
};

/// Raw search inputs as typed into the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchInput {
    /// Selected search type.
    pub search_type: SearchType,
    /// Typed value, if any.
    pub value: Option<String>,
    /// Selected space caption, if any.
    pub caption: Option<SpaceCaption>,
}

impl SearchInput {
    /// Empty input for `search_type`.
    #[must_use]
    pub fn new(search_type: SearchType) -> Self {
        Self {
            search_type,
            value: None,
            caption: None,
        }
    }

    /// Set the typed value.
    #[must_use]
    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Set the space caption.
    #[must_use]
    pub fn caption(mut self, caption: SpaceCaption) -> Self {
        self.caption = Some(caption);
        self
    }
}

impl Default for SearchInput {
    fn default() -> Self {
        Self::new(SearchType::Pnr)
    }
}

/// Routes form searches to the matching handler.
#[derive(Clone)]
pub struct SearchService {
    api: Arc<dyn PropertyApi>,
}

impl SearchService {
    /// Route searches to handlers over `api`.
    #[must_use]
    pub fn new(api: Arc<dyn PropertyApi>) -> Self {
        Self { api }
    }

    /// Run the search described by `input` against `session`.
    ///
    /// Incomplete or malformed input leaves the session alone and returns
    /// [`SearchOutcome::Pending`]. Combinations outside the handler matrix
    /// return a warning without any lookup.
    ///
    /// # Errors
    ///
    /// Returns the handler's error when the search fails or finds nothing.
    pub async fn search(
        &self,
        input: &SearchInput,
        session: &mut SearchSession,
    ) -> Result<SearchOutcome, SearchError> {
        let (Some(value), Some(caption)) = (input.value.as_deref(), input.caption) else {
            return Ok(SearchOutcome::Pending);
        };

        let value = value.trim();

        if value.is_empty() {
            return Ok(SearchOutcome::Pending);
        }

        let Ok(query) = SearchQuery::new(input.search_type, value, caption) else {
            debug!(search_type = %input.search_type, "search value failed validation");
            return Ok(SearchOutcome::Pending);
        };

        let Some(kind) = HandlerKind::resolve(input.search_type, caption) else {
            return Ok(SearchOutcome::Warning(FormWarning::unsupported_combination(
                input.search_type,
                caption,
            )));
        };

        kind.bind(Arc::clone(&self.api))
            .handle_search(&query, session)
            .await
    }
}

impl fmt::Debug for SearchService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchService").finish_non_exhaustive()
    }
}
