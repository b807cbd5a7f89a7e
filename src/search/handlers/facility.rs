//! Commercial premises searches through a commercial lease.

use tracing::debug;

use crate::{
    api::PropertyApi,
    search::{
        FacilityOption, LeaseOption, LeasedObject, OptionSelection, OptionSet, SearchError,
        SearchQuery,
    },
};

use super::common::{first, form_data};

/// Leases without facility data are skipped; when none remain the search
/// counts as empty.
pub(super) async fn search(
    api: &dyn PropertyApi,
    query: &SearchQuery,
) -> Result<Option<OptionSet>, SearchError> {
    let Some(form_data) = form_data(api, query).await? else {
        return Ok(None);
    };

    let mut options = OptionSet::default();

    for item in &form_data {
        let Some(facility) = item.facility.as_ref() else {
            debug!(lease_id = ?item.lease.lease_id, "lease has no facility");
            continue;
        };

        let facility = FacilityOption::from_facility(facility);
        let parent = facility.id;

        options.facilities.push(facility);
        options.leases.push(LeaseOption::from_lease(
            &item.lease,
            LeasedObject::Facility(parent),
        ));
        options.add_tenants(&item.lease.tenants);
    }

    Ok((!options.facilities.is_empty()).then_some(options))
}

pub(super) fn select(options: &OptionSet) -> OptionSelection {
    OptionSelection {
        facility: first(&options.facilities),
        lease: first(&options.leases),
        tenant: first(&options.tenants),
        ..OptionSelection::default()
    }
}
