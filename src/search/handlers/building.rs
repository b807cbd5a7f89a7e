//! Building searches by code or through a lease.

use crate::{
    api::{PropertyApi, models::BuildingSearchResult},
    search::{
        BuildingOption, MaintenanceUnitOption, MaintenanceUnitParent, OptionRecord,
        OptionSelection, OptionSet, SearchError, SearchQuery, SearchType, StaircaseOption,
    },
};

use super::common::{add_residences, first, form_data};

pub(super) async fn search(
    api: &dyn PropertyApi,
    query: &SearchQuery,
) -> Result<Option<OptionSet>, SearchError> {
    let mut options = OptionSet::default();

    if query.search_type() == SearchType::BuildingCode {
        let Some(result) = api.fetch_building(query.value(), query.caption()).await? else {
            return Ok(None);
        };

        add_building(&mut options, &result);
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

fn add_building(options: &mut OptionSet, result: &BuildingSearchResult) {
    let building = BuildingOption::from_building(&result.building, None);
    let parent = building.id;

    options.buildings.push(building);
    options.maintenance_units.extend(
        result
            .maintenance_units
            .iter()
            .map(|unit| MaintenanceUnitOption::from_unit(unit, MaintenanceUnitParent::Building(parent))),
    );
    options.staircases.extend(
        result
            .staircases
            .iter()
            .map(|staircase| StaircaseOption::from_staircase(staircase, Some(parent))),
    );
}

/// First building with its first maintenance unit and staircase, plus the
/// first rental property, lease and tenant of a lease search.
pub(super) fn select(options: &OptionSet) -> OptionSelection {
    let building = first(&options.buildings);

    let (maintenance_unit, staircase) = building.map_or((None, None), |building| {
        (
            options
                .maintenance_units
                .iter()
                .find(|unit| unit.parent == MaintenanceUnitParent::Building(building))
                .map(OptionRecord::id),
            options
                .staircases
                .iter()
                .find(|staircase| staircase.building == Some(building))
                .map(OptionRecord::id),
        )
    });

    OptionSelection {
        building,
        maintenance_unit,
        staircase,
        rental_property: first(&options.rental_properties),
        lease: first(&options.leases),
        tenant: first(&options.tenants),
        ..OptionSelection::default()
    }
}
