use async_trait::async_trait;
use serde::Serialize;
use shared_kernel::udid::Udid;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Aps {
    pub alert: String,
    pub badge: u32,
    pub sound: String,
}

/// Body delivered to the device: the standard `aps` dictionary plus the
/// sender's udid as a custom field.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Payload {
    pub aps: Aps,
    pub udid: Udid,
}

#[derive(Debug, Clone)]
pub struct PushNotification {
    pub device_token: Udid,
    pub payload: Payload,
}

impl PushNotification {
    pub fn alert(device_token: Udid, message: String, badge: u32, sound: String) -> Self {
        Self {
            payload: Payload {
                aps: Aps {
                    alert: message,
                    badge,
                    sound,
                },
                udid: device_token.clone(),
            },
            device_token,
        }
    }

    pub fn payload_string(&self) -> String {
        serde_json::to_string(&self.payload).unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryReport {
    pub success: bool,
    pub error: Option<String>,
}

impl DeliveryReport {
    pub fn delivered() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
        }
    }
}

/// Fire-and-forget push delivery. Failures are reported, never retried by
/// the caller.
#[async_trait]
pub trait NotificationSender: Send + Sync {
    async fn send(&self, notification: &PushNotification) -> DeliveryReport;
}
