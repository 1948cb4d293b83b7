pub mod configuration;
pub mod http_client;
pub mod ids;
pub mod tracing;
pub mod udid;
