pub mod configuration;
mod locations;
pub mod migrations;
mod pairs;
pub mod repository;
