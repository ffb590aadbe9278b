//! Address discovery.
//!
//! # Responsibilities
//! - Produce a fresh candidate address list on demand
//! - Keep network lookups outside the pool lock
//!
//! The pool falls back to its seed list when discovery yields nothing, so an
//! implementation may return an empty list to mean "no opinion".

use std::future::Future;
use std::sync::Arc;

use futures_util::future::BoxFuture;
use futures_util::FutureExt;

use crate::error::DiscoveryError;
use crate::pool::ServerAddress;

/// Source of candidate server addresses.
pub trait Discovery: Send + Sync {
    fn discover(&self) -> BoxFuture<'_, Result<Vec<ServerAddress>, DiscoveryError>>;
}

impl<D: Discovery + ?Sized> Discovery for Arc<D> {
    fn discover(&self) -> BoxFuture<'_, Result<Vec<ServerAddress>, DiscoveryError>> {
        (**self).discover()
    }
}

/// Returns a fixed address list. Used when no discovery is configured.
#[derive(Debug, Clone, Default)]
pub struct StaticDiscovery {
    addresses: Vec<ServerAddress>,
}

impl StaticDiscovery {
    pub fn new(addresses: Vec<ServerAddress>) -> Self {
        Self { addresses }
    }
}

impl Discovery for StaticDiscovery {
    fn discover(&self) -> BoxFuture<'_, Result<Vec<ServerAddress>, DiscoveryError>> {
        let addresses = self.addresses.clone();
        async move { Ok(addresses) }.boxed()
    }
}

/// Discovery backed by a closure. See [`discovery_fn`].
#[derive(Clone)]
pub struct FnDiscovery<F> {
    f: F,
}

/// Wrap an async closure as a [`Discovery`].
///
/// ```ignore
/// let discovery = discovery_fn(|| async {
///     Ok(vec![ServerAddress::from("http://10.0.0.7:9200")])
/// });
/// ```
pub fn discovery_fn<F, Fut>(f: F) -> FnDiscovery<F>
where
    F: Fn() -> Fut + Send + Sync,
    Fut: Future<Output = Result<Vec<ServerAddress>, DiscoveryError>> + Send + 'static,
{
    FnDiscovery { f }
}

impl<F, Fut> Discovery for FnDiscovery<F>
where
    F: Fn() -> Fut + Send + Sync,
    Fut: Future<Output = Result<Vec<ServerAddress>, DiscoveryError>> + Send + 'static,
{
    fn discover(&self) -> BoxFuture<'_, Result<Vec<ServerAddress>, DiscoveryError>> {
        (self.f)().boxed()
    }
}

impl<F> std::fmt::Debug for FnDiscovery<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnDiscovery").finish_non_exhaustive()
    }
}

/// Resolves a host name and yields one address per resolved IP.
#[derive(Debug, Clone)]
pub struct DnsDiscovery {
    host: String,
    port: u16,
    scheme: String,
}

impl DnsDiscovery {
    pub fn new(host: impl Into<String>, port: u16, scheme: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port,
            scheme: scheme.into(),
        }
    }
}

impl Discovery for DnsDiscovery {
    fn discover(&self) -> BoxFuture<'_, Result<Vec<ServerAddress>, DiscoveryError>> {
        async move {
            let resolved = tokio::net::lookup_host((self.host.as_str(), self.port))
                .await
                .map_err(|source| DiscoveryError::Lookup {
                    host: self.host.clone(),
                    source,
                })?;

            let mut addresses: Vec<ServerAddress> = Vec::new();
            for addr in resolved {
                let address = ServerAddress::new(format!("{}://{}", self.scheme, addr));
                if !addresses.contains(&address) {
                    addresses.push(address);
                }
            }
            tracing::debug!(host = %self.host, count = addresses.len(), "DNS discovery resolved");
            Ok(addresses)
        }
        .boxed()
    }
}
