//! Errand webhook notifications.
//!
//! Created, updated and deleted requests are mirrored to an external errand
//! app. Delivery is best effort: failures are logged and never reach the
//! caller, and requests without a rental property are not sent at all.

use std::{fmt, sync::Arc};

use async_trait::async_trait;
use mockall::automock;
use reqwest::Method;
use serde::Serialize;
use tracing::{error, info, instrument, warn};

use crate::{
    api::{ApiRequest, HttpTransport, Token},
    maintenance::MaintenanceRequest,
    settings::{Settings, WEBHOOK_BEARER_TOKEN},
};

/// Errand app workflow endpoint used when none is configured.
pub const DEFAULT_WEBHOOK_BASE_URL: &str = "https://apps.mimer.nu/version-test/api/1.1/wf";

/// Receives maintenance request lifecycle events.
#[automock]
#[async_trait]
pub trait ErrandNotifier: Send + Sync {
    /// A request was registered.
    async fn errand_created(&self, request: &MaintenanceRequest);

    /// A request changed, was archived or restored.
    async fn errand_updated(&self, request: &MaintenanceRequest);

    /// A request was removed.
    async fn errand_deleted(&self, request: &MaintenanceRequest);
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrandPayload<'a> {
    rental_object_id: &'a str,
    title: &'a str,
    odoo_id: String,
    description: String,
    state: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DeletedErrandPayload {
    odoo_id: String,
}

#[derive(Debug, Clone, Copy)]
enum ErrandEvent {
    Created,
    Updated,
    Deleted,
}

impl ErrandEvent {
    const fn path(self) -> &'static str {
        match self {
            Self::Created => "createerrand",
            Self::Updated => "updateErrand",
            Self::Deleted => "deleteerrand",
        }
    }
}

impl fmt::Display for ErrandEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Render an HTML description as plain text with blank lines and
/// surrounding whitespace removed. Unparseable input is sent unchanged.
fn plain_text(html: &str) -> String {
    match html2text::config::plain().string_from_read(html.as_bytes(), usize::MAX) {
        Ok(text) => text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join("\n"),
        Err(source) => {
            warn!(%source, "failed to convert description to plain text");
            html.to_string()
        }
    }
}

/// [`ErrandNotifier`] posting JSON to the errand app.
#[derive(Clone)]
pub struct WebhookErrandNotifier {
    settings: Arc<dyn Settings>,
    transport: Arc<dyn HttpTransport>,
    base_url: String,
}

impl WebhookErrandNotifier {
    /// The bearer token is read from `settings` on every call.
    #[must_use]
    pub fn new(
        settings: Arc<dyn Settings>,
        transport: Arc<dyn HttpTransport>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            settings,
            transport,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    #[instrument(skip_all, fields(uuid = %request.uuid, event = %event))]
    async fn notify(&self, event: ErrandEvent, request: &MaintenanceRequest) {
        let Some(rental_object_id) = request.rental_object_id() else {
            info!("webhook not sent, request has no rental property");
            return;
        };

        let Some(token) = self.settings.get(WEBHOOK_BEARER_TOKEN).map(Token::new) else {
            error!("Bearer token is not set in system parameters.");
            return;
        };

        let odoo_id = request.uuid.to_string();
        let body = match event {
            ErrandEvent::Created | ErrandEvent::Updated => serde_json::to_value(ErrandPayload {
                rental_object_id,
                title: &request.title,
                odoo_id,
                description: plain_text(request.description.as_deref().unwrap_or_default()),
                state: request.stage.name(),
            }),
            ErrandEvent::Deleted => serde_json::to_value(DeletedErrandPayload { odoo_id }),
        };

        let body = match body {
            Ok(body) => body,
            Err(source) => {
                error!(%source, "failed to encode webhook payload");
                return;
            }
        };

        let url = format!("{}/{}", self.base_url, event.path());
        let request = ApiRequest::new(Method::POST, url).bearer(token).json(body);

        match self.transport.send(request).await {
            Ok(response) if response.is_success() => {
                info!(status = %response.status, "webhook sent");
            }
            Ok(response) => {
                error!(status = %response.status, body = %response.body, "webhook call failed");
            }
            Err(source) => {
                error!(%source, "failed to send webhook");
            }
        }
    }
}

impl fmt::Debug for WebhookErrandNotifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WebhookErrandNotifier")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl ErrandNotifier for WebhookErrandNotifier {
    async fn errand_created(&self, request: &MaintenanceRequest) {
        self.notify(ErrandEvent::Created, request).await;
    }

    async fn errand_updated(&self, request: &MaintenanceRequest) {
        self.notify(ErrandEvent::Updated, request).await;
    }

    async fn errand_deleted(&self, request: &MaintenanceRequest) {
        self.notify(ErrandEvent::Deleted, request).await;
    }
}

#[cfg(test)]
mod tests {
    use reqwest::StatusCode;
    use serde_json::json;

    use super::*;
    use crate::{
        api::{ApiResponse, MockHttpTransport, TransportError},
        maintenance::Stage,
        settings::InMemorySettings,
        test_helpers::{maintenance_request, rented_maintenance_request},
    };

    const BASE_URL: &str = "https://errands.test/wf";

    fn settings_with_token() -> Arc<InMemorySettings> {
        Arc::new(InMemorySettings::with_values([(WEBHOOK_BEARER_TOKEN, "hook-secret")]))
    }

    #[tokio::test]
    async fn created_errand_posts_payload() {
        let request = rented_maintenance_request(Stage::ResourceAssigned, "306-001-01-0101");
        let expected = json!({
            "rentalObjectId": "306-001-01-0101",
            "title": "Stopp i avlopp",
            "odooId": request.uuid.to_string(),
            "description": "Vattnet rinner inte undan i köket",
            "state": "Resurs tilldelad",
        });
        let mut transport = MockHttpTransport::new();

        transport
            .expect_send()
            .once()
            .withf(move |sent| {
                sent.method == Method::POST
                    && sent.url == "https://errands.test/wf/createerrand"
                    && sent.bearer.as_ref().map(Token::expose) == Some("hook-secret")
                    && sent.json.as_ref() == Some(&expected)
            })
            .return_once(|_| Ok(ApiResponse::new(StatusCode::OK, "{}")));

        let notifier =
            WebhookErrandNotifier::new(settings_with_token(), Arc::new(transport), BASE_URL);

        notifier.errand_created(&request).await;
    }

    #[tokio::test]
    async fn updated_errand_uses_update_path() {
        let mut request = rented_maintenance_request(Stage::Started, "306-001-01-0101");
        request.description = None;

        let mut transport = MockHttpTransport::new();

        transport
            .expect_send()
            .once()
            .withf(|sent| {
                sent.url == "https://errands.test/wf/updateErrand"
                    && sent.json.as_ref().and_then(|body| body.get("description"))
                        == Some(&json!(""))
            })
            .return_once(|_| Ok(ApiResponse::new(StatusCode::OK, "{}")));

        let notifier = WebhookErrandNotifier::new(
            settings_with_token(),
            Arc::new(transport),
            "https://errands.test/wf/",
        );

        notifier.errand_updated(&request).await;
    }

    #[tokio::test]
    async fn html_description_is_sent_as_plain_text() {
        let mut request = rented_maintenance_request(Stage::Started, "306-001-01-0101");
        request.description =
            Some("<p>Vattnet rinner <b>inte</b> undan</p><p>i k&ouml;ket</p>".to_string());

        let mut transport = MockHttpTransport::new();

        transport
            .expect_send()
            .once()
            .withf(|sent| {
                sent.json.as_ref().and_then(|body| body.get("description"))
                    == Some(&json!("Vattnet rinner inte undan\ni köket"))
            })
            .return_once(|_| Ok(ApiResponse::new(StatusCode::OK, "{}")));

        let notifier =
            WebhookErrandNotifier::new(settings_with_token(), Arc::new(transport), BASE_URL);

        notifier.errand_updated(&request).await;
    }

    #[test]
    fn plain_description_is_unchanged() {
        assert_eq!(
            plain_text("Vattnet rinner inte undan i köket"),
            "Vattnet rinner inte undan i köket"
        );
        assert_eq!(plain_text(""), "");
    }

    #[tokio::test]
    async fn deleted_errand_sends_only_id() {
        let request = rented_maintenance_request(Stage::Closed, "306-001-01-0101");
        let expected = json!({ "odooId": request.uuid.to_string() });
        let mut transport = MockHttpTransport::new();

        transport
            .expect_send()
            .once()
            .withf(move |sent| {
                sent.url == "https://errands.test/wf/deleteerrand"
                    && sent.json.as_ref() == Some(&expected)
            })
            .return_once(|_| Ok(ApiResponse::new(StatusCode::BAD_REQUEST, "nope")));

        let notifier =
            WebhookErrandNotifier::new(settings_with_token(), Arc::new(transport), BASE_URL);

        notifier.errand_deleted(&request).await;
    }

    #[tokio::test]
    async fn request_without_rental_property_is_skipped() {
        let mut transport = MockHttpTransport::new();

        transport.expect_send().never();

        let notifier =
            WebhookErrandNotifier::new(settings_with_token(), Arc::new(transport), BASE_URL);

        notifier
            .errand_created(&maintenance_request(Stage::WaitingForHandling))
            .await;
    }

    #[tokio::test]
    async fn missing_token_sends_nothing() {
        let mut transport = MockHttpTransport::new();

        transport.expect_send().never();

        let notifier = WebhookErrandNotifier::new(
            Arc::new(InMemorySettings::new()),
            Arc::new(transport),
            BASE_URL,
        );

        notifier
            .errand_updated(&rented_maintenance_request(Stage::Started, "306-001-01-0101"))
            .await;
    }

    #[tokio::test]
    async fn token_is_read_per_call() {
        let settings = Arc::new(InMemorySettings::new());
        let mut transport = MockHttpTransport::new();

        transport
            .expect_send()
            .once()
            .withf(|sent| sent.bearer.as_ref().map(Token::expose) == Some("late-token"))
            .return_once(|_| Err(TransportError::InvalidRequest("connection reset".to_string())));

        let notifier = WebhookErrandNotifier::new(settings.clone(), Arc::new(transport), BASE_URL);
        let request = rented_maintenance_request(Stage::Started, "306-001-01-0101");

        notifier.errand_updated(&request).await;

        settings.set(WEBHOOK_BEARER_TOKEN, "late-token");

        notifier.errand_updated(&request).await;
    }
}
