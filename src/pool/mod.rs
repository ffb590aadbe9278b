//! Server pool subsystem.
//!
//! # Data Flow
//! ```text
//! Request attempt
//!     → server_pool.rs (should_refresh?)
//!         → discovery.rs (fetch candidate list, outside the lock)
//!         → install list, or seeds if the list is empty
//!     → server_pool.rs (current_address)
//!     → On connection failure: eliminate address
//!         → next attempt picks the next survivor
//!         → empty pool forces rediscovery
//! ```
//!
//! # Design Decisions
//! - Refresh is pull-based; no background task owns the pool
//! - Selection is round-robin-by-elimination: always the first survivor
//! - Eliminated addresses return only through a refresh

pub mod address;
pub mod discovery;
pub mod server_pool;

pub use address::ServerAddress;
pub use discovery::{discovery_fn, Discovery, DnsDiscovery, FnDiscovery, StaticDiscovery};
pub use server_pool::ServerPool;
