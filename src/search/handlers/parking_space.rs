//! Parking space searches through a parking lease.

use crate::{
    api::PropertyApi,
    search::{
        LeaseOption, LeasedObject, OptionSelection, OptionSet, ParkingSpaceOption, SearchError,
        SearchQuery,
    },
};

use super::common::{first, form_data};

pub(super) async fn search(
    api: &dyn PropertyApi,
    query: &SearchQuery,
) -> Result<Option<OptionSet>, SearchError> {
    let Some(form_data) = form_data(api, query).await? else {
        return Ok(None);
    };

    let mut options = OptionSet::default();

    for item in &form_data {
        let parking_space = ParkingSpaceOption::from_parking_space(item.parking_space.as_ref());
        let parent = parking_space.id;

        options.parking_spaces.push(parking_space);
        options.leases.push(LeaseOption::from_lease(
            &item.lease,
            LeasedObject::ParkingSpace(parent),
        ));
        options.add_tenants(&item.lease.tenants);
    }

    Ok(Some(options))
}

pub(super) fn select(options: &OptionSet) -> OptionSelection {
    OptionSelection {
        parking_space: first(&options.parking_spaces),
        lease: first(&options.leases),
        tenant: first(&options.tenants),
        ..OptionSelection::default()
    }
}
