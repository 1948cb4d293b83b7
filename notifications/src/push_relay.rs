use crate::config::PushSettings;
use crate::sender::{DeliveryReport, NotificationSender, Payload, PushNotification};
use async_trait::async_trait;
use serde::Serialize;
use shared_kernel::http_client::HttpClient;
use shared_kernel::udid::Udid;
use url::Url;

#[derive(Serialize)]
struct RelayRequest<'a> {
    device_token: &'a Udid,
    payload: &'a Payload,
}

/// Posts notifications to an HTTP push relay. A 2xx answer counts as
/// delivered; anything else is reported with the relay's response body.
pub struct PushRelaySender {
    gateway_url: Url,
}

impl PushRelaySender {
    pub fn new(settings: &PushSettings) -> Self {
        Self {
            gateway_url: settings.gateway_url.clone(),
        }
    }
}

#[async_trait]
impl NotificationSender for PushRelaySender {
    #[tracing::instrument(skip(self), level = "info")]
    async fn send(&self, notification: &PushNotification) -> DeliveryReport {
        let request = RelayRequest {
            device_token: &notification.device_token,
            payload: &notification.payload,
        };
        match HttpClient::post_json(self.gateway_url.clone(), &request).await {
            Ok(response) if response.is_success() => DeliveryReport::delivered(),
            Ok(response) => {
                tracing::warn!("Push relay rejected notification: {}", response.status);
                DeliveryReport::failed(format!("{}: {}", response.status, response.body))
            }
            Err(err) => {
                tracing::error!("Failed to reach push relay: {err:?}");
                DeliveryReport::failed(err.to_string())
            }
        }
    }
}
