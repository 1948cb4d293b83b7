use crate::location_store::LocationRepo;
use crate::pairing_graph::PairingRepo;

/// A backing store able to serve both the location and pairing sides.
pub trait Repository: LocationRepo + PairingRepo + Clone {}

impl<T> Repository for T where T: Clone + LocationRepo + PairingRepo {}
