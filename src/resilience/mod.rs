//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Request to server:
//!     → timeouts.rs (bound the attempt)
//!     → On connection failure: pool eliminates the address
//!     → Caller reissues the operation if it wants failover
//! ```
//!
//! # Design Decisions
//! - Timeouts are non-negotiable; every attempt has a deadline
//! - No implicit retries; failover only affects the next call
//! - Timeouts do not eliminate; a slow server is not an unreachable one

pub mod timeouts;

pub use timeouts::{Elapsed, TimeoutGuard};
