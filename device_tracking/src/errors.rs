use crate::Udid;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LocationStoreError {
    #[error("No location recorded for {0}")]
    NotFound(Udid),
    #[error("Location store unavailable")]
    StoreUnavailable(#[from] anyhow::Error),
}

#[derive(Error, Debug)]
pub enum PairingError {
    /// The forward edge was written but the reverse one was not. The pair is
    /// left asymmetric until the caller retries or removes it.
    #[error("Paired {from} with {to} but failed to write the reverse edge")]
    PartialPairing {
        from: Udid,
        to: Udid,
        #[source]
        source: anyhow::Error,
    },
    /// The forward edge was deleted but the reverse one was not. Removing the
    /// pair again is a no-op, so the caller has to clear `to -> from` itself.
    #[error("Unpaired {from} from {to} but failed to delete the reverse edge")]
    PartialUnpairing {
        from: Udid,
        to: Udid,
        #[source]
        source: anyhow::Error,
    },
    #[error("Pairing store unavailable")]
    StoreUnavailable(#[from] anyhow::Error),
    #[error(transparent)]
    Locations(#[from] LocationStoreError),
}
