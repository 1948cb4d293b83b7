use crate::Udid;

/// Storage identity of a location row. Never leaves the process.
#[derive(Copy, Clone, Debug, Default, Eq, Hash, PartialEq, Ord, PartialOrd)]
pub struct LocationId(i64);

impl From<i64> for LocationId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

/// Last known position of a device.
///
/// Latitude and longitude are stored exactly as reported, without range
/// checks.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LocationRecord {
    pub id: LocationId,
    pub username: Option<String>,
    pub udid: Udid,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LocationUpdate {
    pub udid: Udid,
    pub username: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Copy, Clone, Debug, Default, Eq, Hash, PartialEq, Ord, PartialOrd)]
pub struct EdgeId(i64);

impl EdgeId {
    pub fn inner(&self) -> i64 {
        self.0
    }
}

impl From<i64> for EdgeId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

/// One direction of a pairing. A pairing between A and B is stored as the
/// two edges A -> B and B -> A.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PairingEdge {
    pub id: EdgeId,
    pub udid_1: Udid,
    pub udid_2: Udid,
    /// Reserved for a pairing handshake. Written empty on creation.
    pub session_id: String,
}
