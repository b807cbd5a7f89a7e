//! Apartment and shared-space searches through a lease.

use crate::{
    api::PropertyApi,
    search::{OptionSelection, OptionSet, SearchError, SearchQuery},
};

use super::common::{add_residences, first, form_data};

pub(super) async fn search(
    api: &dyn PropertyApi,
    query: &SearchQuery,
) -> Result<Option<OptionSet>, SearchError> {
    let Some(form_data) = form_data(api, query).await? else {
        return Ok(None);
    };

    let mut options = OptionSet::default();

    add_residences(&mut options, &form_data);

    Ok((!options.rental_properties.is_empty()).then_some(options))
}

pub(super) fn select(options: &OptionSet) -> OptionSelection {
    OptionSelection {
        rental_property: first(&options.rental_properties),
        maintenance_unit: first(&options.maintenance_units),
        lease: first(&options.leases),
        tenant: first(&options.tenants),
        ..OptionSelection::default()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use testresult::TestResult;

    use crate::{
        api::{ApiError, MockPropertyApi, models::FormData},
        search::{
            HandlerKind, LeasedObject, MaintenanceUnitParent, SearchError, SearchQuery,
            SearchSession, SearchType, SpaceCaption,
        },
        test_helpers::residential_form_data,
    };

    #[tokio::test]
    async fn lease_search_links_lease_and_units_to_rental_property() -> TestResult {
        let form_data = vec![
            residential_form_data("306-001-01-0101", "P100001")?,
            residential_form_data("306-001-01-0102", "P100001")?,
        ];
        let mut api = MockPropertyApi::new();

        api.expect_fetch_form_data()
            .once()
            .withf(|search_type, value, caption| {
                *search_type == SearchType::RentalObjectId
                    && value == "306-001-01-0101"
                    && *caption == SpaceCaption::Tvattstuga
            })
            .return_once(move |_, _, _| Ok(form_data));

        let handler = HandlerKind::RentalProperty.bind(Arc::new(api));
        let query = SearchQuery::new(
            SearchType::RentalObjectId,
            "306-001-01-0101",
            SpaceCaption::Tvattstuga,
        )?;
        let mut session = SearchSession::new();

        handler.handle_search(&query, &mut session).await?;

        let options = &session.options;
        let rental_property = options
            .rental_property(session.selection.rental_property)
            .ok_or("no rental property selected")?;
        let lease = options
            .lease(session.selection.lease)
            .ok_or("no lease selected")?;
        let unit = options
            .maintenance_unit(session.selection.maintenance_unit)
            .ok_or("no maintenance unit selected")?;
        let tenant = options
            .tenant(session.selection.tenant)
            .ok_or("no tenant selected")?;

        assert_eq!(options.rental_properties.len(), 2);
        assert_eq!(options.leases.len(), 2);
        assert_eq!(options.tenants.len(), 1);
        assert_eq!(options.maintenance_units.len(), 2);
        assert_eq!(lease.leased_object, LeasedObject::RentalProperty(rental_property.id));
        assert_eq!(lease.name, "306-001-01-0101/01");
        assert_eq!(unit.parent, MaintenanceUnitParent::RentalProperty(rental_property.id));
        assert_eq!(tenant.name, "Anna Berg");
        assert_eq!(tenant.phone_number.as_deref(), Some("0702222222"));

        Ok(())
    }

    #[tokio::test]
    async fn leases_without_residence_find_nothing() -> TestResult {
        let form_data = vec![FormData {
            rental_property: None,
            ..residential_form_data("306-001-01-0101", "P100001")?
        }];
        let mut api = MockPropertyApi::new();

        api.expect_fetch_form_data()
            .once()
            .return_once(move |_, _, _| Ok(form_data));

        let handler = HandlerKind::RentalProperty.bind(Arc::new(api));
        let query = SearchQuery::new(SearchType::LeaseId, "306-001-01-0101/01", SpaceCaption::Lagenhet)?;
        let mut session = SearchSession::new();

        let result = handler.handle_search(&query, &mut session).await;

        assert!(
            matches!(result, Err(SearchError::NoResults(ref value)) if value == "306-001-01-0101/01"),
            "a lease without residence data is not a result"
        );
        assert_eq!(session, SearchSession::new());

        Ok(())
    }

    #[tokio::test]
    async fn api_failure_propagates() -> TestResult {
        let mut api = MockPropertyApi::new();

        api.expect_fetch_form_data()
            .once()
            .return_once(|_, _, _| Err(ApiError::InvalidSearchType("buildingCode".to_string())));

        let handler = HandlerKind::RentalProperty.bind(Arc::new(api));
        let query = SearchQuery::new(SearchType::LeaseId, "306-001-01-0101/01", SpaceCaption::Lagenhet)?;
        let mut session = SearchSession::new();

        let result = handler.handle_search(&query, &mut session).await;

        assert!(matches!(
            result,
            Err(SearchError::Api(ApiError::InvalidSearchType(_)))
        ));

        Ok(())
    }
}
