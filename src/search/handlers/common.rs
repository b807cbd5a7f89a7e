use tracing::debug;

use crate::{
    api::{PropertyApi, models::FormData},
    search::{
        LeaseOption, LeasedObject, MaintenanceUnitOption, MaintenanceUnitParent, OptionId,
        OptionRecord, OptionSet, RentalPropertyOption, SearchError, SearchQuery,
    },
};

pub(super) fn first<T: OptionRecord>(rows: &[T]) -> Option<OptionId<T>> {
    rows.first().map(OptionRecord::id)
}

/// Composite lease data for a lease search, `None` when nothing matched.
pub(super) async fn form_data(
    api: &dyn PropertyApi,
    query: &SearchQuery,
) -> Result<Option<Vec<FormData>>, SearchError> {
    let form_data = api
        .fetch_form_data(query.search_type(), query.value(), query.caption())
        .await?;

    Ok((!form_data.is_empty()).then_some(form_data))
}

/// Add a rental property per residential entry with its lease, tenants and
/// maintenance units.
pub(super) fn add_residences(options: &mut OptionSet, form_data: &[FormData]) {
    for item in form_data {
        let Some(residence) = item.rental_property.as_ref() else {
            debug!(lease_id = ?item.lease.lease_id, "lease has no residence");
            continue;
        };

        let rental_property = RentalPropertyOption::from_residence(residence);
        let parent = rental_property.id;

        options.rental_properties.push(rental_property);
        options.leases.push(LeaseOption::from_lease(
            &item.lease,
            LeasedObject::RentalProperty(parent),
        ));
        options.add_tenants(&item.lease.tenants);
        options
            .maintenance_units
            .extend(item.maintenance_units.iter().map(|unit| {
                MaintenanceUnitOption::from_unit(unit, MaintenanceUnitParent::RentalProperty(parent))
            }));
    }
}
