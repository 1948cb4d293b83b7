use serde::Deserialize;
use url::Url;

#[derive(Debug, Deserialize, Clone)]
pub struct PushSettings {
    /// Relay that forwards payloads to the platform push service.
    pub gateway_url: Url,
    #[serde(default = "default_sound")]
    pub sound: String,
    #[serde(default)]
    pub badge: u32,
}

fn default_sound() -> String {
    "bingbong.aiff".to_string()
}
