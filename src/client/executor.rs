//! Request execution against the pool's current server.
//!
//! # Responsibilities
//! - Refresh the pool when stale, before resolving an address
//! - Run exactly one transport attempt under the timeout guard
//! - Classify the outcome and eliminate unreachable servers
//!
//! # Outcome classification
//! ```text
//! transport connect failure  → eliminate, ConnectionError::Unreachable
//! status 0                   → eliminate, ConnectionError::NoResponse
//! guard elapsed / transport timeout → ClientError::Timeout (server kept)
//! body carries `error`       → ClientError::Application (server kept)
//! anything else              → Ok(response)
//! ```
//!
//! No attempt is ever retried here. Failover shows up on the caller's next
//! call, which sees the pool's updated state.

use std::sync::Arc;
use std::time::Instant;

use crate::error::{ClientError, ClientResult, ConnectionError};
use crate::observability::metrics::{self, Outcome};
use crate::pool::{Discovery, ServerAddress, ServerPool};
use crate::resilience::TimeoutGuard;
use crate::transport::{Request, Response, Transport, TransportError};

/// Executes requests with failover-by-elimination.
pub struct RequestExecutor {
    pool: ServerPool,
    discovery: Arc<dyn Discovery>,
    transport: Arc<dyn Transport>,
    guard: TimeoutGuard,
    metrics_enabled: bool,
}

impl RequestExecutor {
    pub fn new(
        pool: ServerPool,
        discovery: Arc<dyn Discovery>,
        transport: Arc<dyn Transport>,
        guard: TimeoutGuard,
    ) -> Self {
        Self {
            pool,
            discovery,
            transport,
            guard,
            metrics_enabled: true,
        }
    }

    pub fn with_metrics(mut self, enabled: bool) -> Self {
        self.metrics_enabled = enabled;
        self
    }

    pub fn pool(&self) -> &ServerPool {
        &self.pool
    }

    pub fn guard(&self) -> &TimeoutGuard {
        &self.guard
    }

    /// Perform one attempt of `request`.
    pub async fn execute(&self, request: &Request) -> ClientResult<Response> {
        let start = Instant::now();
        let result = self.attempt(request).await;

        if self.metrics_enabled {
            metrics::record_request(request.verb.as_str(), outcome_of(&result), start);
        }
        result
    }

    async fn attempt(&self, request: &Request) -> ClientResult<Response> {
        self.ensure_fresh().await?;

        let address = self
            .pool
            .current_address()
            .ok_or(ConnectionError::PoolExhausted)?;

        let target = match address.target(&request.path, &request.query) {
            Ok(target) => target,
            Err(e) => {
                self.drop_server(&address);
                return Err(ConnectionError::Unreachable {
                    address,
                    source: e.into(),
                }
                .into());
            }
        };

        tracing::debug!(server = %address, verb = %request.verb, path = %request.path, "Executing request");

        let sent = self
            .guard
            .run_bounded(self.transport.send(&address, target, request))
            .await;

        match sent {
            Err(elapsed) => {
                tracing::warn!(server = %address, verb = %request.verb, path = %request.path, limit = ?elapsed.limit, "Request timed out");
                Err(ClientError::Timeout {
                    address,
                    limit: elapsed.limit,
                })
            }
            Ok(Err(TransportError::Timeout(source))) => {
                tracing::warn!(server = %address, error = %source, "Transport timed out");
                Err(ClientError::Timeout {
                    address,
                    limit: self.guard.limit(),
                })
            }
            Ok(Err(TransportError::Connect(source))) => {
                self.drop_server(&address);
                Err(ConnectionError::Unreachable { address, source }.into())
            }
            Ok(Err(TransportError::Build(source))) => {
                Err(ClientError::InvalidRequest(source.to_string()))
            }
            Ok(Ok(response)) if response.status == 0 => {
                self.drop_server(&address);
                Err(ConnectionError::NoResponse { address }.into())
            }
            Ok(Ok(response)) => match response.error() {
                Some(error) => {
                    tracing::debug!(server = %address, status = response.status, error = %error, "Server reported an error");
                    Err(ClientError::Application {
                        status: response.status,
                        error: error.clone(),
                    })
                }
                None => Ok(response),
            },
        }
    }

    async fn ensure_fresh(&self) -> Result<(), ConnectionError> {
        if !self.pool.should_refresh() {
            return Ok(());
        }

        match self.pool.refresh(self.discovery.as_ref()).await {
            Ok(dropped) => {
                for address in &dropped {
                    self.transport.invalidate(address);
                }
                if self.metrics_enabled {
                    metrics::record_refresh(true, self.pool.live_addresses().len());
                }
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "Server discovery failed");
                if self.metrics_enabled {
                    metrics::record_refresh(false, 0);
                }
                Err(e.into())
            }
        }
    }

    fn drop_server(&self, address: &ServerAddress) {
        let removed = self.pool.eliminate(address);
        self.transport.invalidate(address);
        if removed && self.metrics_enabled {
            metrics::record_elimination(self.pool.live_addresses().len());
        }
    }
}

fn outcome_of(result: &ClientResult<Response>) -> Outcome {
    match result {
        Ok(_) => Outcome::Success,
        Err(ClientError::Connection(_)) => Outcome::ConnectionFailure,
        Err(ClientError::Timeout { .. }) => Outcome::Timeout,
        Err(ClientError::Application { .. }) => Outcome::ApplicationError,
        Err(_) => Outcome::InvalidRequest,
    }
}

impl std::fmt::Debug for RequestExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestExecutor")
            .field("pool", &self.pool)
            .field("timeout", &self.guard.limit())
            .finish()
    }
}
