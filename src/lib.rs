//! Resilient client for a clustered document-search service.
//!
//! # Architecture Overview
//!
//! ```text
//!   caller
//!     │  create_index / add / search / bulk / scroll / ...
//!     ▼
//!   ┌──────────────┐    ┌──────────────────┐    ┌──────────────┐
//!   │     api      │───▶│ client::executor │───▶│  transport   │───▶ server
//!   │  (endpoints) │    │ refresh/classify │    │ (reqwest)    │
//!   └──────────────┘    └────────┬─────────┘    └──────────────┘
//!                                │
//!                 ┌──────────────┼──────────────┐
//!                 ▼              ▼              ▼
//!           ┌──────────┐  ┌────────────┐  ┌──────────────┐
//!           │   pool   │  │ resilience │  │observability │
//!           │discovery │  │  timeouts  │  │ logs/metrics │
//!           └──────────┘  └────────────┘  └──────────────┘
//! ```
//!
//! A connection failure eliminates the server that was used; the caller's
//! next call goes to the next survivor, and an empty pool is rediscovered.

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod observability;
pub mod pool;
pub mod resilience;
pub mod transport;

pub use api::{AliasAction, BulkAction, ScrollOptions};
pub use client::{ClientBuilder, RequestExecutor, SearchClient};
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult, ConnectionError, DiscoveryError};
pub use pool::{discovery_fn, Discovery, ServerAddress, ServerPool};
pub use transport::{Request, Response, Verb};
