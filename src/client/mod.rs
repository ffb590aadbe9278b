//! Search client.
//!
//! # Data Flow
//! ```text
//! ClientConfig
//!     → ClientBuilder (pick discovery + transport)
//!     → SearchClient { Arc<RequestExecutor> }
//!
//! Endpoint operation (api/*)
//!     → build Request (verb, path, query, body)
//!     → executor.rs (refresh? → current address → guarded attempt → classify)
//!     → Response body handed back to the caller
//! ```
//!
//! # Design Decisions
//! - Cloning a client shares its pool; clones fail over together
//! - Endpoint operations only see `execute`, never pool internals

pub mod executor;

use std::sync::Arc;

use crate::config::ClientConfig;
use crate::error::ClientResult;
use crate::pool::{Discovery, DnsDiscovery, ServerPool, StaticDiscovery};
use crate::resilience::TimeoutGuard;
use crate::transport::{HttpTransport, Request, Response, Transport};

pub use executor::RequestExecutor;

/// Client for a clustered search service.
#[derive(Clone)]
pub struct SearchClient {
    executor: Arc<RequestExecutor>,
}

impl SearchClient {
    /// Build a client from configuration using the HTTP transport.
    pub fn new(config: ClientConfig) -> Self {
        ClientBuilder::new(config).build()
    }

    pub fn builder(config: ClientConfig) -> ClientBuilder {
        ClientBuilder::new(config)
    }

    /// Perform one attempt of an arbitrary request.
    pub async fn execute(&self, request: &Request) -> ClientResult<Response> {
        self.executor.execute(request).await
    }

    pub fn pool(&self) -> &ServerPool {
        self.executor.pool()
    }
}

impl std::fmt::Debug for SearchClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchClient")
            .field("executor", &self.executor)
            .finish()
    }
}

/// Builder allowing discovery and transport to be replaced.
pub struct ClientBuilder {
    config: ClientConfig,
    discovery: Option<Arc<dyn Discovery>>,
    transport: Option<Arc<dyn Transport>>,
}

impl ClientBuilder {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            config,
            discovery: None,
            transport: None,
        }
    }

    /// Use a custom discovery function instead of the configured one.
    pub fn discovery<D: Discovery + 'static>(mut self, discovery: D) -> Self {
        self.discovery = Some(Arc::new(discovery));
        self
    }

    pub fn transport<T: Transport + 'static>(mut self, transport: T) -> Self {
        self.transport = Some(Arc::new(transport));
        self
    }

    pub fn build(self) -> SearchClient {
        let config = self.config;
        let seeds = config.seed_addresses();

        let discovery: Arc<dyn Discovery> = match (self.discovery, &config.discovery.dns_host) {
            (Some(discovery), _) => discovery,
            (None, Some(host)) => Arc::new(DnsDiscovery::new(
                host.clone(),
                config.discovery.port,
                config.discovery.scheme.clone(),
            )),
            (None, None) => Arc::new(StaticDiscovery::new(seeds.clone())),
        };
        let transport: Arc<dyn Transport> = match self.transport {
            Some(transport) => transport,
            None => Arc::new(HttpTransport::new(config.timeouts.connect())),
        };

        tracing::debug!(
            seeds = seeds.len(),
            refresh_period_secs = config.refresh_period_secs,
            request_timeout_ms = config.timeouts.request_ms,
            "Search client configured"
        );

        let executor = RequestExecutor::new(
            ServerPool::new(seeds, config.refresh_period()),
            discovery,
            transport,
            TimeoutGuard::new(config.timeouts.request()),
        )
        .with_metrics(config.observability.metrics_enabled);

        SearchClient {
            executor: Arc::new(executor),
        }
    }
}
