//! Property searches by name or through a lease.

use crate::{
    api::{PropertyApi, models::PropertySearchResult},
    search::{
        BuildingOption, MaintenanceUnitOption, MaintenanceUnitParent, OptionRecord,
        OptionSelection, OptionSet, PropertyOption, SearchError, SearchQuery, SearchType,
    },
};

use super::common::{add_residences, first, form_data};

pub(super) async fn search(
    api: &dyn PropertyApi,
    query: &SearchQuery,
) -> Result<Option<OptionSet>, SearchError> {
    let mut options = OptionSet::default();

    if query.search_type() == SearchType::PropertyName {
        let properties = api.fetch_properties(query.value(), query.caption()).await?;

        if properties.is_empty() {
            return Ok(None);
        }

        add_properties(&mut options, &properties);
    } else {
        let Some(form_data) = form_data(api, query).await? else {
            return Ok(None);
        };

        add_residences(&mut options, &form_data);

        if options.rental_properties.is_empty() {
            return Ok(None);
        }
    }

    Ok(Some(options))
}

fn add_properties(options: &mut OptionSet, properties: &[PropertySearchResult]) {
    for result in properties {
        let property = PropertyOption::from_property(&result.property);
        let parent = property.id;

        options.properties.push(property);
        options.maintenance_units.extend(
            result
                .maintenance_units
                .iter()
                .map(|unit| MaintenanceUnitOption::from_unit(unit, MaintenanceUnitParent::Property(parent))),
        );
        options.buildings.extend(
            result
                .buildings
                .iter()
                .map(|building| BuildingOption::from_building(building, Some(parent))),
        );
    }
}

/// First property, with its first maintenance unit and building.
pub(super) fn select(options: &OptionSet) -> OptionSelection {
    let property = first(&options.properties);

    let (maintenance_unit, building) = property.map_or((None, None), |property| {
        (
            options
                .maintenance_units
                .iter()
                .find(|unit| unit.parent == MaintenanceUnitParent::Property(property))
                .map(OptionRecord::id),
            options
                .buildings
                .iter()
                .find(|building| building.property == Some(property))
                .map(OptionRecord::id),
        )
    });

    OptionSelection {
        property,
        maintenance_unit,
        building,
        lease: first(&options.leases),
        tenant: first(&options.tenants),
        ..OptionSelection::default()
    }
}
