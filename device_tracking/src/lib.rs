pub mod data;
pub mod errors;
pub mod location_store;
pub mod pairing_graph;
mod repositories;
#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use repositories::Repository;
pub use shared_kernel::udid::Udid;
