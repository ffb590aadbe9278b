//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Pool and executor produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (counters, gauges, histograms)
//!
//! Consumers:
//!     → Log aggregation (stderr, JSON optional)
//!     → Whatever `metrics` recorder the application installs
//! ```
//!
//! # Design Decisions
//! - Structured logging (JSON) for machine parsing
//! - Request correlation via the `X-Opaque-Id` header
//! - Metrics are cheap; recording without a recorder is a no-op

pub mod logging;
pub mod metrics;
