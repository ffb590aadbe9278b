//! Error types shared by the client subsystems.
//!
//! # Taxonomy
//! ```text
//! ClientError
//!     ├── Connection(ConnectionError)   address eliminated (except Discovery / PoolExhausted)
//!     │       ├── Unreachable           transport could not connect / was reset
//!     │       ├── NoResponse            transport reported status 0
//!     │       ├── PoolExhausted         no live address after refresh
//!     │       └── Discovery             discovery function failed during refresh
//!     ├── Timeout                       attempt exceeded its bound, address kept
//!     ├── Application                   service reported an `error` payload, address kept
//!     └── BulkRejected / InvalidRequest / Serialization / UnexpectedResponse
//! ```

use std::time::Duration;

use thiserror::Error;

use crate::pool::ServerAddress;

/// Boxed error used for causes coming from collaborators.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Failure of the address discovery function.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// Host name resolution failed.
    #[error("failed to resolve {host}: {source}")]
    Lookup {
        host: String,
        #[source]
        source: std::io::Error,
    },

    /// A caller-supplied discovery function failed.
    #[error("discovery failed: {0}")]
    Failed(String),
}

/// Connection-level failures. These are the outcomes callers may retry after
/// the pool has moved on to another address.
#[derive(Debug, Error)]
pub enum ConnectionError {
    /// The transport could not reach the address.
    #[error("server {address} is offline or not accepting requests: {source}")]
    Unreachable {
        address: ServerAddress,
        #[source]
        source: BoxError,
    },

    /// The transport returned without a real response (status 0).
    #[error("server {address} returned no response")]
    NoResponse { address: ServerAddress },

    /// No live address remained after refreshing the pool.
    #[error("no servers available")]
    PoolExhausted,

    /// The pool could not be refreshed; the request was not attempted.
    #[error(transparent)]
    Discovery(#[from] DiscoveryError),
}

/// Errors returned by client operations.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("connection failed: {0}")]
    Connection(#[from] ConnectionError),

    /// The attempt did not finish within the configured request timeout.
    #[error("request to {address} timed out after {limit:?}")]
    Timeout {
        address: ServerAddress,
        limit: Duration,
    },

    /// A well-formed response carrying a service-reported error.
    #[error("server responded with HTTP {status}: {error}")]
    Application {
        status: u16,
        error: serde_json::Value,
    },

    /// The bulk endpoint rejected the batch as a whole.
    #[error("bulk import got HTTP {status} response")]
    BulkRejected { status: u16 },

    /// The request could not be built (bad address, path or query).
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The response did not have the shape an operation depends on.
    #[error("unexpected response: {0}")]
    UnexpectedResponse(String),
}

impl ClientError {
    /// True for failures that moved the pool to another address or found
    /// none available. Reissuing the operation may reach a different server.
    pub fn is_connection_failure(&self) -> bool {
        matches!(self, ClientError::Connection(_))
    }

    /// True if the attempt exceeded its bound.
    pub fn is_timeout(&self) -> bool {
        matches!(self, ClientError::Timeout { .. })
    }

    /// Service-reported error payload, if any.
    pub fn application_error(&self) -> Option<&serde_json::Value> {
        match self {
            ClientError::Application { error, .. } => Some(error),
            _ => None,
        }
    }
}

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;
