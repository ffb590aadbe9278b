//! Timeout enforcement.
//!
//! # Responsibilities
//! - Bound the wall-clock duration of a single request attempt
//! - Turn an exceeded bound into a distinct, typed failure
//!
//! # Design Decisions
//! - Uses Tokio's timeout facilities
//! - One guard per client instance, composed at the call site
//! - The bound covers only the HTTP attempt, not the pool refresh before it

use std::future::Future;
use std::time::Duration;

use thiserror::Error;

/// The guarded action did not finish in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("attempt exceeded {limit:?}")]
pub struct Elapsed {
    pub limit: Duration,
}

/// Bounds each attempt to a fixed duration.
#[derive(Debug, Clone, Copy)]
pub struct TimeoutGuard {
    limit: Duration,
}

impl TimeoutGuard {
    pub fn new(limit: Duration) -> Self {
        Self { limit }
    }

    pub fn limit(&self) -> Duration {
        self.limit
    }

    /// Run `action`, abandoning it once the limit elapses.
    pub async fn run_bounded<F, T>(&self, action: F) -> Result<T, Elapsed>
    where
        F: Future<Output = T>,
    {
        tokio::time::timeout(self.limit, action)
            .await
            .map_err(|_| Elapsed { limit: self.limit })
    }
}
