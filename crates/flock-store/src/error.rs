use thiserror::Error;

/// Errors produced by the store layer.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The store has never been seeded; the caller recovers by writing the
    /// deterministic defaults.  Never surfaced to the user.
    #[error("store has not been initialized")]
    NotInitialized,

    /// A write would push the backend past its fixed capacity.  Surfaced to
    /// the initiating action; the in-memory state is not committed.
    #[error("write of {attempted} bytes would exceed the {capacity} byte storage capacity")]
    QuotaExceeded { attempted: u64, capacity: u64 },

    /// A stored record does not parse.  Recovered by falling back to seed
    /// defaults for the affected record.
    #[error("malformed record: {0}")]
    MalformedRecord(#[from] serde_json::Error),

    /// Failed to determine a platform data directory.
    #[error("could not determine application data directory")]
    NoDataDir,

    /// Generic I/O error from the file backend.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, StoreError>;
