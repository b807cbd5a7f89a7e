//! Search handlers.
//!
//! A handler turns one search into a fresh [`OptionSet`] and chooses the
//! initial selection. The session is only touched once the lookup has
//! produced options, so a failed search leaves the previous options in place.

use std::{fmt, sync::Arc};

use tracing::{info, instrument};

use crate::{
    api::PropertyApi,
    search::{
        FormWarning, HandlerKind, OptionSelection, OptionSet, SearchError, SearchOutcome,
        SearchQuery, SearchSession,
    },
};

mod building;
mod common;
mod facility;
mod parking_space;
mod property;
mod rental_property;

/// A [`HandlerKind`] bound to the API it searches.
#[derive(Clone)]
pub struct SearchHandler {
    kind: HandlerKind,
    api: Arc<dyn PropertyApi>,
}

impl SearchHandler {
    /// Bind `kind` to `api`.
    #[must_use]
    pub fn new(kind: HandlerKind, api: Arc<dyn PropertyApi>) -> Self {
        Self { kind, api }
    }

    /// Handler kind.
    #[must_use]
    pub fn kind(&self) -> HandlerKind {
        self.kind
    }

    /// API the handler searches.
    #[must_use]
    pub fn api(&self) -> &Arc<dyn PropertyApi> {
        &self.api
    }

    /// Run `query` and replace the options in `session` with the result.
    ///
    /// Parking space and facility searches that find nothing return a
    /// [`SearchOutcome::Warning`]; the other handlers fail with
    /// [`SearchError::NoResults`].
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::UnsupportedSearchType`] when this handler does
    /// not implement the query's search type, [`SearchError::NoResults`] as
    /// described above, or the API error of a failed lookup.
    #[instrument(
        skip(self, query, session),
        fields(handler = %self.kind, search_type = %query.search_type())
    )]
    pub async fn handle_search(
        &self,
        query: &SearchQuery,
        session: &mut SearchSession,
    ) -> Result<SearchOutcome, SearchError> {
        let search_type = query.search_type();

        if !self.kind.accepts(search_type) {
            return Err(SearchError::UnsupportedSearchType {
                handler: self.kind,
                search_type,
            });
        }

        let api = self.api.as_ref();

        let found = match self.kind {
            HandlerKind::Property => property::search(api, query).await?,
            HandlerKind::Building => building::search(api, query).await?,
            HandlerKind::RentalProperty => rental_property::search(api, query).await?,
            HandlerKind::ParkingSpace => parking_space::search(api, query).await?,
            HandlerKind::Facility => facility::search(api, query).await?,
        };

        let Some(options) = found else {
            info!("no data found");

            return match self.kind {
                HandlerKind::ParkingSpace | HandlerKind::Facility => Ok(SearchOutcome::Warning(
                    FormWarning::no_results(query.value()),
                )),
                HandlerKind::Property | HandlerKind::Building | HandlerKind::RentalProperty => {
                    Err(SearchError::NoResults(query.value().to_string()))
                }
            };
        };

        let selection = self.select(&options);

        session.replace(options, selection);

        Ok(SearchOutcome::Completed)
    }

    fn select(&self, options: &OptionSet) -> OptionSelection {
        match self.kind {
            HandlerKind::Property => property::select(options),
            HandlerKind::Building => building::select(options),
            HandlerKind::RentalProperty => rental_property::select(options),
            HandlerKind::ParkingSpace => parking_space::select(options),
            HandlerKind::Facility => facility::select(options),
        }
    }
}

impl fmt::Debug for SearchHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchHandler")
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}
