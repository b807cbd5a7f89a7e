//! Maintenance request being filled in.

use crate::{
    maintenance::{CreationOrigin, FormFieldService, FormFields, Priority, UserUuid},
    search::{SearchError, SearchInput, SearchOutcome, SearchService, SearchSession},
};

/// A request form before it is saved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MaintenanceRequestDraft {
    /// Short summary.
    pub title: String,
    /// Free text description.
    pub description: Option<String>,
    /// Requested turnaround.
    pub priority: Priority,
    /// Where the request came from.
    pub origin: CreationOrigin,
    /// Resource to assign on save.
    pub assignee: Option<UserUuid>,

    /// Search fields as typed.
    pub search: SearchInput,
    /// Options and selection of the latest search.
    pub session: SearchSession,
    /// Fields mirrored from the selection.
    pub fields: FormFields,

    /// Tenant phone number as edited on the form.
    pub phone_number: Option<String>,

    /// Tenant e-mail address as edited on the form.
    pub email_address: Option<String>,
}

impl MaintenanceRequestDraft {
    /// Empty draft titled `title`.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Search with the current inputs and mirror the new selection onto the
    /// form fields.
    ///
    /// # Errors
    ///
    /// Returns the search error; the session and fields are left unchanged.
    pub async fn search(&mut self, service: &SearchService) -> Result<SearchOutcome, SearchError> {
        let outcome = service.search(&self.search, &mut self.session).await?;

        if outcome == SearchOutcome::Completed {
            FormFieldService::new().refresh(self);
        }

        Ok(outcome)
    }
}
