use thiserror::Error;

pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("source catalog unavailable")]
    SourceUnavailable(#[source] BoxError),

    #[error("destination service unavailable")]
    DestinationUnavailable(#[source] BoxError),

    #[error("failed to {action} for playlist {playlist}")]
    DestinationWrite {
        playlist: String,
        action: String,
        #[source]
        source: BoxError,
    },

    #[error("playlist not found: {0}")]
    PlaylistNotFound(String),

    #[error("none of the {attempted} searched tracks matched on the destination")]
    NoTracksResolved { attempted: usize },
}

impl SyncError {
    pub fn source_unavailable(error: anyhow::Error) -> Self {
        Self::SourceUnavailable(error.into())
    }

    pub fn destination_unavailable(error: anyhow::Error) -> Self {
        Self::DestinationUnavailable(error.into())
    }
}
