//! Transport subsystem.
//!
//! # Data Flow
//! ```text
//! Executor (address resolved, target URL built)
//!     → Transport::send (HTTP exchange)
//!         → http.rs: per-address reqwest client, created lazily
//!     → Response { status, parsed body } | TransportError
//!
//! On elimination, or when a refresh drops an address:
//!     → Transport::invalidate (drop the address's cached client)
//! ```
//!
//! # Design Decisions
//! - The transport only moves bytes; classification lives in the executor
//! - One cached client per address, torn down when the address leaves the pool
//! - The transport sets no request timeout; the executor's guard bounds attempts

pub mod http;
pub mod request;
pub mod response;

use std::sync::Arc;

use futures_util::future::BoxFuture;
use thiserror::Error;
use url::Url;

use crate::error::BoxError;
use crate::pool::ServerAddress;

pub use http::HttpTransport;
pub use request::{Body, Request, Verb};
pub use response::Response;

/// Failures reported by a transport.
#[derive(Debug, Error)]
pub enum TransportError {
    /// No response was obtained: refused, reset, unresolvable host.
    #[error("connection failed: {0}")]
    Connect(#[source] BoxError),

    /// The transport gave up waiting on its own.
    #[error("transport timed out: {0}")]
    Timeout(#[source] BoxError),

    /// The request could not be built.
    #[error("could not build request: {0}")]
    Build(#[source] BoxError),
}

/// Performs the HTTP exchange for one attempt.
pub trait Transport: Send + Sync {
    fn send<'a>(
        &'a self,
        address: &'a ServerAddress,
        target: Url,
        request: &'a Request,
    ) -> BoxFuture<'a, Result<Response, TransportError>>;

    /// Tear down any cached connection state for `address`.
    fn invalidate(&self, _address: &ServerAddress) {}
}

impl<T: Transport + ?Sized> Transport for Arc<T> {
    fn send<'a>(
        &'a self,
        address: &'a ServerAddress,
        target: Url,
        request: &'a Request,
    ) -> BoxFuture<'a, Result<Response, TransportError>> {
        (**self).send(address, target, request)
    }

    fn invalidate(&self, address: &ServerAddress) {
        (**self).invalidate(address)
    }
}
