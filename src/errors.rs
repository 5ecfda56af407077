use thiserror::Error;

/// Opaque failure reported by a host collaborator (session service, commit, ...).
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Error)]
pub enum BootError {
    /// The authenticated boot payload could not be built. Fatal for the request.
    #[error("session boot failed: {0}")]
    SessionBootFailed(#[source] BoxError),

    #[error("commit failed: {0}")]
    Commit(#[source] BoxError),

    #[error("boot payload could not be serialized: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("cannot read {path}: {source}")]
    ConfigRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse {path}: {source}")]
    ConfigParse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, BootError>;
