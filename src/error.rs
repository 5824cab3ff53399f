use std::io;

/// Failures of the synchronization layer. None of these are fatal to the owner.
#[derive(thiserror::Error, Debug)]
pub enum SyncError {
    #[error("an owner is already joined to channel '{0}'")]
    OwnerTaken(String),
    #[error("failed to encode message")]
    Encode(#[from] serde_json::Error),
    #[error("a periodic task needs a non-zero period")]
    ZeroPeriod,
    #[error("the popout window was blocked")]
    PopoutBlocked,
    #[error("failed to spawn the {what} thread")]
    Spawn {
        what: &'static str,
        #[source]
        source: io::Error,
    },
}
