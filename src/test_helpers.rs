//! Test helpers.

use std::sync::{Arc, Mutex, PoisonError};

use reqwest::StatusCode;
use serde_json::{Value, json};

use crate::{
    api::{
        ApiError, ApiResponse, AuthenticatingClient, MockHttpTransport, OneCoreApi,
        models::FormData,
    },
    maintenance::{
        CreationOrigin, MaintenanceRequest, MaintenanceRequestUuid, Priority, RelatedRecords,
        RentalPropertyRecord, Stage, UserUuid,
    },
    search::SpaceCaption,
    settings::{
        InMemorySettings, ONECORE_API_TOKEN, ONECORE_BASE_URL, ONECORE_PASSWORD, ONECORE_USERNAME,
    },
};

pub(crate) const TEST_BASE_URL: &str = "https://onecore.test";

/// Settings with credentials and an already persisted token.
pub(crate) fn onecore_settings() -> Arc<InMemorySettings> {
    Arc::new(InMemorySettings::with_values([
        (ONECORE_BASE_URL, TEST_BASE_URL),
        (ONECORE_USERNAME, "odoo"),
        (ONECORE_PASSWORD, "secret"),
        (ONECORE_API_TOKEN, "persisted"),
    ]))
}

/// A request seen by a [`Routes`] transport, with the base URL stripped.
#[derive(Debug, Clone)]
pub(crate) struct RecordedRequest {
    pub path: String,
    pub query: Vec<(String, String)>,
    pub json: Option<Value>,
}

impl RecordedRequest {
    pub fn query_value(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

#[derive(Debug, Clone, Default)]
pub(crate) struct RecordedRequests(Arc<Mutex<Vec<RecordedRequest>>>);

impl RecordedRequests {
    pub fn recorded(&self) -> Vec<RecordedRequest> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn paths(&self) -> Vec<String> {
        self.recorded()
            .into_iter()
            .map(|request| request.path)
            .collect()
    }

    fn push(&self, request: RecordedRequest) {
        self.0
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request);
    }
}

/// Fake `OneCore` server answering fixed paths; anything else is a `404`.
#[derive(Debug, Default)]
pub(crate) struct Routes {
    responses: Vec<(String, ApiResponse)>,
    requests: RecordedRequests,
}

impl Routes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `path` with `{"content": content}`.
    pub fn content(mut self, path: &str, content: Value) -> Self {
        self.responses.push((
            path.to_string(),
            ApiResponse::ok_json(&json!({ "content": content })),
        ));
        self
    }

    pub fn status(mut self, path: &str, status: StatusCode) -> Self {
        self.responses
            .push((path.to_string(), ApiResponse::new(status, "upstream failure")));
        self
    }

    pub fn requests(&self) -> RecordedRequests {
        self.requests.clone()
    }

    pub fn into_transport(self) -> MockHttpTransport {
        let Self {
            responses,
            requests,
        } = self;
        let mut transport = MockHttpTransport::new();

        transport.expect_send().returning(move |request| {
            let path = request
                .url
                .strip_prefix(TEST_BASE_URL)
                .unwrap_or(&request.url)
                .to_string();

            requests.push(RecordedRequest {
                path: path.clone(),
                query: request.query.clone(),
                json: request.json.clone(),
            });

            Ok(responses
                .iter()
                .find(|(route, _)| *route == path)
                .map_or_else(
                    || ApiResponse::new(StatusCode::NOT_FOUND, "no route"),
                    |(_, response)| response.clone(),
                ))
        });

        transport
    }
}

/// [`OneCoreApi`] talking to `routes`.
pub(crate) async fn onecore_api(routes: Routes) -> Result<OneCoreApi, ApiError> {
    let client =
        AuthenticatingClient::connect(onecore_settings(), Arc::new(routes.into_transport()))
            .await?;

    Ok(OneCoreApi::new(client))
}

/// A residential lease for `rental_id` held by `contact_code`, with its
/// residence and one laundry room.
pub(crate) fn residential_form_data(
    rental_id: &str,
    contact_code: &str,
) -> Result<FormData, serde_json::Error> {
    Ok(FormData {
        lease: serde_json::from_value(json!({
            "leaseId": format!("{rental_id}/01"),
            "leaseNumber": "01",
            "type": "Bostadskontrakt",
            "rentalPropertyId": rental_id,
            "leaseStartDate": "2020-01-01",
            "contractDate": "2019-12-01",
            "tenants": [{
                "contactCode": contact_code,
                "contactKey": format!("_{contact_code}"),
                "firstName": "Anna",
                "lastName": "Berg",
                "emailAddress": "anna@example.com",
                "phoneNumbers": [
                    { "phoneNumber": "0701111111", "isMainNumber": 0 },
                    { "phoneNumber": "0702222222", "isMainNumber": 1 },
                ],
                "isTenant": true,
            }],
        }))?,
        rental_property: Some(serde_json::from_value(json!({
            "code": "0101",
            "name": "Testgatan 1",
            "type": { "name": "2 rum och kök" },
            "areaSize": 56,
            "entrance": "A",
            "accessibility": { "elevator": false },
            "rentalInformation": { "rentalId": rental_id },
            "property": { "code": "P1", "name": "Oxen" },
            "building": { "code": "B1", "name": "Hus 1" },
        }))?),
        maintenance_units: serde_json::from_value(json!([
            { "id": "MU1", "code": "TV01", "caption": "Tvättstuga", "type": "Tvättstuga" },
        ]))?,
        ..FormData::default()
    })
}

/// A parking lease for `rental_id`, with the parking space when `with_space`.
pub(crate) fn parking_form_data(
    rental_id: &str,
    with_space: bool,
) -> Result<FormData, serde_json::Error> {
    let parking_space = if with_space {
        Some(serde_json::from_value(json!({
            "rentalId": rental_id,
            "propertyCode": "P1",
            "propertyName": "Oxen",
            "parkingSpace": {
                "name": "Bilplats 12",
                "code": "BP12",
                "parkingSpaceType": { "code": "MC", "name": "Motorvärmare" },
                "parkingNumber": 12,
            },
            "address": { "streetAddress": "Testgatan 1", "postalCode": "72211", "city": "Västerås" },
        }))?)
    } else {
        None
    };

    Ok(FormData {
        lease: serde_json::from_value(json!({
            "leaseId": format!("{rental_id}/02"),
            "type": "P-Platskontrakt",
            "rentalPropertyId": rental_id,
            "tenants": [{ "contactCode": "P200002", "fullName": "Nils Ek" }],
        }))?,
        parking_space,
        ..FormData::default()
    })
}

/// A commercial lease for `rental_id`, with the facility when `with_facility`.
pub(crate) fn facility_form_data(
    rental_id: &str,
    with_facility: bool,
) -> Result<FormData, serde_json::Error> {
    let facility = if with_facility {
        Some(serde_json::from_value(json!({
            "code": "L01",
            "name": "Butik",
            "type": { "code": "BUT", "name": "Butikslokal" },
            "area": 120,
            "building": { "code": "B1", "name": "Hus 1" },
            "property": { "code": "P1", "name": "Oxen" },
            "rentalInformation": { "type": { "name": "Lokal" } },
        }))?)
    } else {
        None
    };

    Ok(FormData {
        lease: serde_json::from_value(json!({
            "leaseId": format!("{rental_id}/03"),
            "type": "Lokalkontrakt",
            "rentalPropertyId": rental_id,
            "tenants": [{ "contactCode": "F300003", "fullName": "Butiken AB" }],
        }))?,
        facility,
        ..FormData::default()
    })
}

/// An unassigned request in `stage` without related records.
pub(crate) fn maintenance_request(stage: Stage) -> MaintenanceRequest {
    MaintenanceRequest {
        uuid: MaintenanceRequestUuid::new(),
        title: "Stopp i avlopp".to_string(),
        description: Some("Vattnet rinner inte undan i köket".to_string()),
        space_caption: Some(SpaceCaption::Lagenhet),
        priority: Priority::default(),
        origin: CreationOrigin::default(),
        stage,
        owner: UserUuid::new(),
        assignee: None,
        close_date: None,
        archived: false,
        records: RelatedRecords::default(),
        created_at: jiff::Timestamp::UNIX_EPOCH,
    }
}

/// A request whose promoted rental property is `rental_id`.
pub(crate) fn rented_maintenance_request(stage: Stage, rental_id: &str) -> MaintenanceRequest {
    let mut request = maintenance_request(stage);

    request.records.rental_property = Some(RentalPropertyRecord {
        name: rental_id.to_string(),
        ..RentalPropertyRecord::default()
    });

    request
}
