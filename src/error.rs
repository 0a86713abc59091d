//! Error taxonomy of the price fan-out.
//!
//! Selection errors abort the run. Fetch errors are logged by the
//! fetcher and never leave it.
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FanoutError {
    /// Transport or decode failure inside the exchange client.
    #[error("exchange client error: {0}")]
    Client(#[from] reqwest::Error),

    /// The exchange answered with a non-success HTTP status.
    #[error("exchange returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    /// Response body could not be decoded into the expected shape.
    #[error("malformed exchange response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("response does not contain enough symbols: required {required}, received {received}")]
    InsufficientData { required: usize, received: usize },

    #[error("response does not contain prices for {0}")]
    EmptyResult(String),

    #[error("configuration error: {0}")]
    Config(String),

    /// A spawned task panicked or was cancelled.
    #[error("task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl FanoutError {
    /// True for every failure of the underlying exchange call
    /// (transport, decode or non-success status).
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            FanoutError::Client(_) | FanoutError::Status { .. } | FanoutError::Decode(_)
        )
    }
}

/// Crate-wide result alias defaulting to `FanoutError`.
pub type Result<T, E = FanoutError> = std::result::Result<T, E>;
