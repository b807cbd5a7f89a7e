//! `OneCore` property API.

use std::fmt;

use async_trait::async_trait;
use futures::{StreamExt, TryStreamExt, stream};
use mockall::automock;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, error, info, instrument, warn};
use urlencoding::encode;

use crate::{
    api::{
        ApiError,
        client::{AuthenticatingClient, RequestOptions, ensure_success},
        filters::{filter_leases_on_location_type, filter_maintenance_units},
        models::{
            Building, BuildingSearchResult, Envelope, Facility, FormData, Lease, LeaseKind,
            MaintenanceUnit, ParkingSpace, Property, PropertySearchResult, Residence, Staircase,
        },
    },
    search::{SearchType, SpaceCaption},
};

/// Upstream lookups run at most this many requests at once per fan-out.
pub const DEFAULT_FAN_OUT: usize = 4;

/// Lookups the search handlers depend on.
#[automock]
#[async_trait]
pub trait PropertyApi: Send + Sync {
    /// Properties matching `name`, each with its buildings, or with its
    /// maintenance units when `caption` names one.
    ///
    /// # Errors
    ///
    /// Returns an error when any upstream lookup fails.
    async fn fetch_properties(
        &self,
        name: &str,
        caption: SpaceCaption,
    ) -> Result<Vec<PropertySearchResult>, ApiError>;

    /// A single building by code, `None` when `OneCore` has no content for it.
    ///
    /// # Errors
    ///
    /// Returns an error when any upstream lookup fails.
    async fn fetch_building(
        &self,
        code: &str,
        caption: SpaceCaption,
    ) -> Result<Option<BuildingSearchResult>, ApiError>;

    /// One composite entry per matching lease of a known contract type.
    ///
    /// # Errors
    ///
    /// Returns an error when the lease lookup or any follow-up lookup fails.
    async fn fetch_form_data(
        &self,
        search_type: SearchType,
        value: &str,
        caption: SpaceCaption,
    ) -> Result<Vec<FormData>, ApiError>;
}

/// Lease endpoint for a search type.
///
/// # Errors
///
/// Returns [`ApiError::InvalidSearchType`] for search types that are not
/// answered through leases.
pub fn lease_path(search_type: SearchType) -> Result<&'static str, ApiError> {
    match search_type {
        SearchType::LeaseId => Ok("/leases"),
        SearchType::RentalObjectId => Ok("/leases/by-rental-property-id"),
        SearchType::ContactCode => Ok("/leases/by-contact-code"),
        SearchType::Pnr => Ok("/leases/for"),
        SearchType::BuildingCode | SearchType::PropertyName => {
            Err(ApiError::InvalidSearchType(search_type.to_string()))
        }
    }
}

fn no_results_message(search_type: SearchType, value: &str) -> String {
    format!(
        "Kunde inte hitta något resultat för {search_type}: {value}. Det verkar som att det \
         inte finns någon koppling till OneCore-servern."
    )
}

/// [`PropertyApi`] implementation on top of [`AuthenticatingClient`].
#[derive(Clone)]
pub struct OneCoreApi {
    client: AuthenticatingClient,
    fan_out: usize,
}

impl OneCoreApi {
    /// Wrap `client` with the default lookup concurrency.
    #[must_use]
    pub fn new(client: AuthenticatingClient) -> Self {
        Self {
            client,
            fan_out: DEFAULT_FAN_OUT,
        }
    }

    /// Limit concurrent follow-up lookups; values below one are raised to one.
    #[must_use]
    pub fn with_fan_out(mut self, fan_out: usize) -> Self {
        self.fan_out = fan_out.max(1);
        self
    }

    async fn get_content<T: DeserializeOwned>(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<Option<T>, ApiError> {
        let response = ensure_success(self.client.request(Method::GET, path, options).await?)?;
        let envelope: Envelope<T> = response.json()?;

        Ok(envelope.content)
    }

    async fn get_list<T: DeserializeOwned>(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<Vec<T>, ApiError> {
        Ok(self
            .get_content::<Vec<T>>(path, options)
            .await?
            .unwrap_or_default())
    }

    /// Leases for a lease search, filtered by `caption`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidSearchType`] for non-lease search types and
    /// [`ApiError::NoResultsOrConnectivity`] when the lookup fails upstream.
    #[instrument(skip(self))]
    pub async fn fetch_leases(
        &self,
        search_type: SearchType,
        value: &str,
        caption: &str,
    ) -> Result<Vec<Lease>, ApiError> {
        let path = format!("{}/{}", lease_path(search_type)?, encode(value));
        let options = RequestOptions::new()
            .query("includeContacts", "true")
            .query("includeUpcomingLeases", "true");

        let content = match self.get_content::<Value>(&path, options).await {
            Ok(content) => content,
            Err(error) if error.is_http_failure() => {
                if error.status() == Some(404) {
                    info!("OneCore found no leases");
                } else {
                    warn!(%error, "lease lookup against OneCore failed");
                }

                return Err(ApiError::NoResultsOrConnectivity {
                    message: no_results_message(search_type, value),
                    source: Box::new(error),
                });
            }
            Err(error) => return Err(error),
        };

        let entries = match content {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(entries)) => entries,
            Some(entry) => vec![entry],
        };

        filter_leases_on_location_type(entries, caption)
            .into_iter()
            .map(|entry| serde_json::from_value(entry).map_err(ApiError::from))
            .collect()
    }

    /// # Errors
    ///
    /// Returns an error when the lookup fails.
    pub async fn fetch_residence(&self, rental_id: &str) -> Result<Option<Residence>, ApiError> {
        let path = format!("/propertyBase/residence/rental-id/{}", encode(rental_id));

        self.get_content(&path, RequestOptions::new()).await
    }

    /// # Errors
    ///
    /// Returns an error when the lookup fails.
    pub async fn fetch_parking_space(
        &self,
        rental_id: &str,
    ) -> Result<Option<ParkingSpace>, ApiError> {
        let path = format!(
            "/propertyBase/parking-spaces/by-rental-id/{}",
            encode(rental_id)
        );

        self.get_content(&path, RequestOptions::new()).await
    }

    /// # Errors
    ///
    /// Returns an error when the lookup fails.
    pub async fn fetch_facility(&self, rental_id: &str) -> Result<Option<Facility>, ApiError> {
        let path = format!("/propertyBase/facilities/by-rental-id/{}", encode(rental_id));

        self.get_content(&path, RequestOptions::new()).await
    }

    /// Maintenance units of a property whose type equals `caption`.
    ///
    /// # Errors
    ///
    /// Returns an error when the lookup fails.
    pub async fn fetch_maintenance_units(
        &self,
        property_code: &str,
        caption: &str,
    ) -> Result<Vec<MaintenanceUnit>, ApiError> {
        let path = format!(
            "/propertyBase/maintenance-units/by-property-code/{}",
            encode(property_code)
        );
        let units = self.get_list(&path, RequestOptions::new()).await?;

        Ok(filter_maintenance_units(units, caption))
    }

    /// # Errors
    ///
    /// Returns an error when the lookup fails.
    pub async fn fetch_maintenance_units_for_building(
        &self,
        building_code: &str,
    ) -> Result<Vec<MaintenanceUnit>, ApiError> {
        let path = format!(
            "/propertyBase/maintenance-units/by-building-code/{}",
            encode(building_code)
        );

        self.get_list(&path, RequestOptions::new()).await
    }

    /// # Errors
    ///
    /// Returns an error when the lookup fails.
    pub async fn fetch_staircases_for_building(
        &self,
        building_code: &str,
    ) -> Result<Vec<Staircase>, ApiError> {
        let path = format!(
            "/propertyBase/staircases/by-building-code/{}",
            encode(building_code)
        );

        self.get_list(&path, RequestOptions::new()).await
    }

    /// # Errors
    ///
    /// Returns an error when the lookup fails.
    pub async fn fetch_buildings_for_property(
        &self,
        property_code: &str,
    ) -> Result<Vec<Building>, ApiError> {
        let path = format!(
            "/propertyBase/buildings/by-property-code/{}",
            encode(property_code)
        );

        self.get_list(&path, RequestOptions::new()).await
    }

    async fn property_children(
        &self,
        property: Property,
        caption: SpaceCaption,
    ) -> Result<PropertySearchResult, ApiError> {
        let mut result = PropertySearchResult {
            property,
            ..PropertySearchResult::default()
        };

        let Some(code) = result.property.code.clone() else {
            debug!("property without code, skipping child lookups");

            return Ok(result);
        };

        if caption.is_maintenance_unit() {
            result.maintenance_units = self
                .fetch_maintenance_units(&code, caption.as_str())
                .await?;
        } else {
            result.buildings = self.fetch_buildings_for_property(&code).await?;
        }

        Ok(result)
    }

    async fn form_data_for_lease(
        &self,
        lease: Lease,
        caption: SpaceCaption,
    ) -> Result<Option<FormData>, ApiError> {
        let Some(kind) = lease.kind() else {
            debug!(lease_type = ?lease.lease_type, "skipping lease of unknown type");

            return Ok(None);
        };

        let Some(rental_id) = lease.rental_property_id.clone() else {
            warn!(lease_id = ?lease.lease_id, "lease has no rental property id");

            return Ok(None);
        };

        let mut data = FormData {
            lease,
            ..FormData::default()
        };

        match kind {
            LeaseKind::Residential | LeaseKind::Cooperative => {
                let residence = self.fetch_residence(&rental_id).await?;

                if caption.is_maintenance_unit()
                    && let Some(code) = residence.as_ref().and_then(Residence::property_code)
                {
                    data.maintenance_units =
                        self.fetch_maintenance_units(code, caption.as_str()).await?;
                }

                data.rental_property = residence;
            }
            LeaseKind::ParkingSpace => {
                data.parking_space = self.fetch_parking_space(&rental_id).await?;
            }
            LeaseKind::Facility => {
                data.facility = self.fetch_facility(&rental_id).await?;
            }
        }

        Ok(Some(data))
    }

    async fn collect_form_data(
        &self,
        search_type: SearchType,
        value: &str,
        caption: SpaceCaption,
    ) -> Result<Vec<FormData>, ApiError> {
        let leases = self
            .fetch_leases(search_type, value, caption.as_str())
            .await?;

        let entries: Vec<Option<FormData>> = stream::iter(leases)
            .map(|lease| self.form_data_for_lease(lease, caption))
            .buffered(self.fan_out)
            .try_collect()
            .await?;

        Ok(entries.into_iter().flatten().collect())
    }
}

#[async_trait]
impl PropertyApi for OneCoreApi {
    #[instrument(skip(self))]
    async fn fetch_properties(
        &self,
        name: &str,
        caption: SpaceCaption,
    ) -> Result<Vec<PropertySearchResult>, ApiError> {
        let properties: Vec<Property> = self
            .get_list(
                "/propertyBase/properties/search",
                RequestOptions::new().query("q", name),
            )
            .await?;

        debug!(count = properties.len(), "properties found");

        stream::iter(properties)
            .map(|property| self.property_children(property, caption))
            .buffered(self.fan_out)
            .try_collect()
            .await
    }

    #[instrument(skip(self))]
    async fn fetch_building(
        &self,
        code: &str,
        caption: SpaceCaption,
    ) -> Result<Option<BuildingSearchResult>, ApiError> {
        let path = format!("/propertyBase/buildings/by-building-code/{}", encode(code));

        let Some(building) = self
            .get_content::<Building>(&path, RequestOptions::new())
            .await?
        else {
            return Ok(None);
        };

        let maintenance_units = if caption.is_maintenance_unit() {
            filter_maintenance_units(
                self.fetch_maintenance_units_for_building(code).await?,
                caption.as_str(),
            )
        } else {
            Vec::new()
        };

        let staircases = if caption == SpaceCaption::Uppgang {
            self.fetch_staircases_for_building(code).await?
        } else {
            Vec::new()
        };

        Ok(Some(BuildingSearchResult {
            building,
            maintenance_units,
            staircases,
        }))
    }

    #[instrument(skip(self))]
    async fn fetch_form_data(
        &self,
        search_type: SearchType,
        value: &str,
        caption: SpaceCaption,
    ) -> Result<Vec<FormData>, ApiError> {
        let result = self.collect_form_data(search_type, value, caption).await;

        if let Err(error) = &result {
            error!(%error, "failed to fetch form data from OneCore");
        }

        result
    }
}

impl fmt::Debug for OneCoreApi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OneCoreApi")
            .field("client", &self.client)
            .field("fan_out", &self.fan_out)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use reqwest::StatusCode;
    use serde_json::json;
    use testresult::TestResult;

    use crate::test_helpers::{Routes, onecore_api};

    use super::*;

    fn lease(lease_type: &str, rental_id: &str) -> Value {
        json!({
            "leaseId": format!("{rental_id}/01"),
            "type": lease_type,
            "rentalPropertyId": rental_id,
            "tenants": [],
        })
    }

    fn residence(property_code: &str) -> Value {
        json!({
            "code": "0101",
            "name": "Testgatan 1",
            "property": { "code": property_code, "name": "Fastigheten" },
        })
    }

    #[tokio::test]
    async fn search_value_is_percent_encoded() -> TestResult {
        let routes = Routes::new().content("/leases/a%2Fb%20c", json!([]));
        let requests = routes.requests();
        let api = onecore_api(routes).await?;

        let leases = api
            .fetch_leases(SearchType::LeaseId, "a/b c", "Lägenhet")
            .await?;

        let recorded = requests.recorded();
        let request = recorded.first().ok_or("no request recorded")?;

        assert!(leases.is_empty());
        assert_eq!(request.path, "/leases/a%2Fb%20c");
        assert_eq!(request.query_value("includeContacts"), Some("true"));
        assert_eq!(request.query_value("includeUpcomingLeases"), Some("true"));

        Ok(())
    }

    #[test]
    fn lease_paths_per_search_type() -> TestResult {
        assert_eq!(lease_path(SearchType::LeaseId)?, "/leases");
        assert_eq!(
            lease_path(SearchType::RentalObjectId)?,
            "/leases/by-rental-property-id"
        );
        assert_eq!(lease_path(SearchType::ContactCode)?, "/leases/by-contact-code");
        assert_eq!(lease_path(SearchType::Pnr)?, "/leases/for");

        Ok(())
    }

    #[tokio::test]
    async fn non_lease_search_type_is_rejected_without_request() -> TestResult {
        let routes = Routes::new();
        let requests = routes.requests();
        let api = onecore_api(routes).await?;

        let result = api
            .fetch_leases(SearchType::BuildingCode, "705-011", "Byggnad")
            .await;

        assert!(matches!(result, Err(ApiError::InvalidSearchType(ref t)) if t == "buildingCode"));
        assert!(requests.recorded().is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn upstream_failure_becomes_no_results_or_connectivity() -> TestResult {
        let routes = Routes::new().status("/leases/by-contact-code/P123456", StatusCode::BAD_GATEWAY);
        let api = onecore_api(routes).await?;

        let result = api
            .fetch_leases(SearchType::ContactCode, "P123456", "Lägenhet")
            .await;

        let Err(error) = result else {
            return Err("expected an error".into());
        };

        assert_eq!(
            error.to_string(),
            "Kunde inte hitta något resultat för contactCode: P123456. Det verkar som att det \
             inte finns någon koppling till OneCore-servern."
        );
        assert_eq!(error.status(), Some(502));

        Ok(())
    }

    #[tokio::test]
    async fn integer_tenant_flags_do_not_fail_the_lease_fetch() -> TestResult {
        let routes = Routes::new().content(
            "/leases/12345678",
            json!([{
                "leaseId": "12345678",
                "type": "Bostadskontrakt",
                "rentalPropertyId": "306-001-01-0101",
                "tenants": [{ "contactCode": "P100001", "isTenant": 1, "specialAttention": 0 }],
            }]),
        );
        let api = onecore_api(routes).await?;

        let leases = api
            .fetch_leases(SearchType::LeaseId, "12345678", "Lägenhet")
            .await?;

        let tenant = leases
            .first()
            .and_then(|lease| lease.tenants.first())
            .ok_or("no tenant")?;

        assert_eq!(tenant.is_tenant, Some(true));
        assert_eq!(tenant.special_attention, Some(false));

        Ok(())
    }

    #[tokio::test]
    async fn single_lease_object_is_wrapped_in_a_list() -> TestResult {
        let routes = Routes::new().content(
            "/leases/306-001-01",
            lease("Bostadskontrakt", "306-001-01-0101"),
        );
        let api = onecore_api(routes).await?;

        let leases = api
            .fetch_leases(SearchType::LeaseId, "306-001-01", "Lägenhet")
            .await?;

        assert_eq!(leases.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn residential_lease_with_maintenance_unit_caption() -> TestResult {
        let routes = Routes::new()
            .content("/leases/12345678", json!([lease("Bostadskontrakt", "R123")]))
            .content("/propertyBase/residence/rental-id/R123", residence("P1"))
            .content(
                "/propertyBase/maintenance-units/by-property-code/P1",
                json!([
                    { "id": "1", "code": "TV1", "caption": "Tvättstuga 1", "type": "Tvättstuga" },
                    { "id": "2", "code": "MB1", "caption": "Miljöbod 1", "type": "Miljöbod" },
                ]),
            );
        let api = onecore_api(routes).await?;

        let data = api
            .fetch_form_data(SearchType::LeaseId, "12345678", SpaceCaption::Tvattstuga)
            .await?;

        let entry = data.first().ok_or("no form data")?;

        assert_eq!(data.len(), 1);
        assert_eq!(
            entry.rental_property.as_ref().and_then(Residence::property_code),
            Some("P1")
        );
        assert_eq!(entry.maintenance_units.len(), 1);
        assert!(entry.parking_space.is_none());
        assert!(entry.facility.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn residential_lease_skips_maintenance_units_for_apartments() -> TestResult {
        let routes = Routes::new()
            .content("/leases/12345678", json!([lease("Kooperativ hyresrätt", "R123")]))
            .content("/propertyBase/residence/rental-id/R123", residence("P1"));
        let requests = routes.requests();
        let api = onecore_api(routes).await?;

        let data = api
            .fetch_form_data(SearchType::LeaseId, "12345678", SpaceCaption::Lagenhet)
            .await?;

        assert_eq!(data.len(), 1);
        assert!(data.iter().all(|entry| entry.maintenance_units.is_empty()));
        assert!(
            !requests
                .paths()
                .iter()
                .any(|path| path.contains("maintenance-units"))
        );

        Ok(())
    }

    #[tokio::test]
    async fn parking_lease_fetches_parking_space() -> TestResult {
        let routes = Routes::new()
            .content("/leases/12345678", json!([lease("P-Platskontrakt", "P123")]))
            .content(
                "/propertyBase/parking-spaces/by-rental-id/P123",
                json!({ "rentalId": "P123", "parkingSpace": { "name": "Plats 7" } }),
            );
        let api = onecore_api(routes).await?;

        let data = api
            .fetch_form_data(SearchType::LeaseId, "12345678", SpaceCaption::Bilplats)
            .await?;

        let entry = data.first().ok_or("no form data")?;

        assert_eq!(
            entry.parking_space.as_ref().and_then(|p| p.rental_id.as_deref()),
            Some("P123")
        );
        assert!(entry.rental_property.is_none());
        assert!(entry.maintenance_units.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn facility_lease_fetches_facility() -> TestResult {
        let routes = Routes::new()
            .content("/leases/12345678", json!([lease("Lokalkontrakt", "L123")]))
            .content(
                "/propertyBase/facilities/by-rental-id/L123",
                json!({ "code": "L123", "name": "Butik" }),
            );
        let api = onecore_api(routes).await?;

        let data = api
            .fetch_form_data(SearchType::LeaseId, "12345678", SpaceCaption::Lokal)
            .await?;

        let entry = data.first().ok_or("no form data")?;

        assert_eq!(
            entry.facility.as_ref().and_then(|f| f.name.as_deref()),
            Some("Butik")
        );

        Ok(())
    }

    #[tokio::test]
    async fn unknown_lease_type_gives_empty_result() -> TestResult {
        let routes = Routes::new().content("/leases/12345678", json!([lease("Okänt", "U1")]));
        let api = onecore_api(routes).await?;

        let data = api
            .fetch_form_data(SearchType::LeaseId, "12345678", SpaceCaption::Vind)
            .await?;

        assert!(data.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn form_data_keeps_lease_order() -> TestResult {
        let routes = Routes::new()
            .content(
                "/leases/12345678",
                json!([
                    lease("Bostadskontrakt", "R1"),
                    lease("Bostadskontrakt", "R2"),
                    lease("Bostadskontrakt", "R3"),
                ]),
            )
            .content("/propertyBase/residence/rental-id/R1", residence("P1"))
            .content("/propertyBase/residence/rental-id/R2", residence("P2"))
            .content("/propertyBase/residence/rental-id/R3", residence("P3"));
        let api = onecore_api(routes).await?.with_fan_out(2);

        let data = api
            .fetch_form_data(SearchType::LeaseId, "12345678", SpaceCaption::Lagenhet)
            .await?;

        let codes: Vec<_> = data
            .iter()
            .filter_map(|entry| entry.rental_property.as_ref()?.property_code())
            .collect();

        assert_eq!(codes, vec!["P1", "P2", "P3"]);

        Ok(())
    }

    #[tokio::test]
    async fn failed_follow_up_lookup_fails_the_whole_fetch() -> TestResult {
        let routes = Routes::new()
            .content("/leases/12345678", json!([lease("Bostadskontrakt", "R1")]))
            .status("/propertyBase/residence/rental-id/R1", StatusCode::INTERNAL_SERVER_ERROR);
        let api = onecore_api(routes).await?;

        let result = api
            .fetch_form_data(SearchType::LeaseId, "12345678", SpaceCaption::Lagenhet)
            .await;

        assert!(matches!(result, Err(ApiError::Status { status: 500, .. })));

        Ok(())
    }

    #[tokio::test]
    async fn properties_carry_buildings_for_building_captions() -> TestResult {
        let routes = Routes::new()
            .content(
                "/propertyBase/properties/search",
                json!([{ "code": "P1", "designation": "Oxen 1" }]),
            )
            .content(
                "/propertyBase/buildings/by-property-code/P1",
                json!([{ "code": "B1", "name": "Hus 1" }]),
            );
        let requests = routes.requests();
        let api = onecore_api(routes).await?;

        let results = api.fetch_properties("Oxen", SpaceCaption::Byggnad).await?;
        let result = results.first().ok_or("no property")?;

        assert_eq!(result.buildings.len(), 1);
        assert!(result.maintenance_units.is_empty());
        assert!(
            requests
                .recorded()
                .iter()
                .any(|request| request.query_value("q") == Some("Oxen"))
        );

        Ok(())
    }

    #[tokio::test]
    async fn properties_carry_maintenance_units_for_unit_captions() -> TestResult {
        let routes = Routes::new()
            .content(
                "/propertyBase/properties/search",
                json!([{ "code": "P1" }, { "code": "P2" }]),
            )
            .content(
                "/propertyBase/maintenance-units/by-property-code/P1",
                json!([{ "type": "Lekplats", "code": "LP1" }]),
            )
            .content("/propertyBase/maintenance-units/by-property-code/P2", json!([]));
        let requests = routes.requests();
        let api = onecore_api(routes).await?;

        let results = api.fetch_properties("Oxen", SpaceCaption::Lekplats).await?;

        assert_eq!(results.len(), 2);
        assert_eq!(
            results.first().map(|r| r.maintenance_units.len()),
            Some(1)
        );
        assert!(results.iter().all(|r| r.buildings.is_empty()));
        assert!(!requests.paths().iter().any(|path| path.contains("/buildings/")));

        Ok(())
    }

    #[tokio::test]
    async fn building_with_staircases_for_uppgang() -> TestResult {
        let routes = Routes::new()
            .content(
                "/propertyBase/buildings/by-building-code/705-011",
                json!({ "code": "705-011", "name": "Hus A" }),
            )
            .content(
                "/propertyBase/staircases/by-building-code/705-011",
                json!([{ "code": "A" }, { "code": "B" }]),
            );
        let api = onecore_api(routes).await?;

        let result = api
            .fetch_building("705-011", SpaceCaption::Uppgang)
            .await?
            .ok_or("building missing")?;

        assert_eq!(result.staircases.len(), 2);
        assert!(result.maintenance_units.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn building_children_only_for_matching_captions() -> TestResult {
        let routes = Routes::new().content(
            "/propertyBase/buildings/by-building-code/705-011",
            json!({ "code": "705-011" }),
        );
        let requests = routes.requests();
        let api = onecore_api(routes).await?;

        let result = api
            .fetch_building("705-011", SpaceCaption::Ovrigt)
            .await?
            .ok_or("building missing")?;

        assert!(result.staircases.is_empty());
        assert!(result.maintenance_units.is_empty());
        assert_eq!(requests.paths().len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn building_without_content_is_none() -> TestResult {
        let routes = Routes::new().content(
            "/propertyBase/buildings/by-building-code/999-999",
            Value::Null,
        );
        let api = onecore_api(routes).await?;

        assert!(
            api.fetch_building("999-999", SpaceCaption::Byggnad)
                .await?
                .is_none()
        );

        Ok(())
    }
}
