pub mod config;
pub mod push_relay;
pub mod sender;
