//! Server pool management.
//!
//! # Responsibilities
//! - Hold the seed list and the live list of reachable addresses
//! - Select the current address (first survivor of the live list)
//! - Decide lazily, per attempt, whether the live list is stale
//! - Eliminate unreachable addresses until the next refresh
//!
//! # Locking
//! A single mutex covers `live`, `current` and `refreshed_at`. It is only held
//! while reading or updating that state; discovery and HTTP calls run outside it.

use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::time::Instant;

use crate::error::DiscoveryError;
use crate::pool::{Discovery, ServerAddress};

#[derive(Debug, Default)]
struct PoolState {
    live: Vec<ServerAddress>,
    /// Always a member of `live` when set.
    current: Option<ServerAddress>,
    refreshed_at: Option<Instant>,
}

/// The live set of backend addresses for one client instance.
#[derive(Debug)]
pub struct ServerPool {
    seeds: Vec<ServerAddress>,
    refresh_period: Duration,
    state: Mutex<PoolState>,
}

impl ServerPool {
    /// Create a pool. The live list starts empty, so the first attempt refreshes.
    pub fn new(seeds: Vec<ServerAddress>, refresh_period: Duration) -> Self {
        Self {
            seeds,
            refresh_period,
            state: Mutex::new(PoolState::default()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, PoolState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// True if the pool has never been refreshed, has no live addresses,
    /// or its last refresh is older than the refresh period.
    pub fn should_refresh(&self) -> bool {
        let state = self.lock();
        match state.refreshed_at {
            None => true,
            Some(_) if state.live.is_empty() => true,
            // A period too large to add to `at` never expires.
            Some(at) => at
                .checked_add(self.refresh_period)
                .is_some_and(|deadline| Instant::now() > deadline),
        }
    }

    /// Replace the live list with the result of `discovery`.
    ///
    /// An empty discovery result falls back to the seed list. A discovery
    /// failure leaves the pool untouched, including its refresh timestamp,
    /// so the next attempt retries discovery.
    ///
    /// Returns the addresses that were live before and are not any more.
    pub async fn refresh(&self, discovery: &dyn Discovery) -> Result<Vec<ServerAddress>, DiscoveryError> {
        let discovered = discovery.discover().await?;
        Ok(self.install(discovered))
    }

    fn install(&self, discovered: Vec<ServerAddress>) -> Vec<ServerAddress> {
        let fell_back = discovered.is_empty();
        let live = if fell_back { self.seeds.clone() } else { discovered };

        let mut state = self.lock();
        let dropped: Vec<ServerAddress> = state
            .live
            .iter()
            .filter(|a| !live.contains(a))
            .cloned()
            .collect();
        state.current = live.first().cloned();
        state.live = live;
        state.refreshed_at = Some(Instant::now());

        tracing::debug!(
            live = state.live.len(),
            dropped = dropped.len(),
            current = ?state.current.as_ref().map(ServerAddress::as_str),
            fell_back,
            "Server list refreshed"
        );
        dropped
    }

    /// The selected address, defaulting to the first live address.
    pub fn current_address(&self) -> Option<ServerAddress> {
        let mut state = self.lock();
        if state.current.is_none() {
            state.current = state.live.first().cloned();
        }
        state.current.clone()
    }

    /// Remove the current address from the live list and clear the selection.
    ///
    /// Returns the eliminated address, or `None` if the pool was empty.
    pub fn eliminate_current(&self) -> Option<ServerAddress> {
        let mut state = self.lock();
        let current = match state.current.take() {
            Some(current) => current,
            None => state.live.first().cloned()?,
        };
        state.live.retain(|a| a != &current);
        tracing::warn!(address = %current, remaining = state.live.len(), "Server eliminated");
        Some(current)
    }

    /// Remove a specific address, clearing the selection if it was current.
    ///
    /// Removing an address that is no longer live is a no-op and returns false.
    pub fn eliminate(&self, address: &ServerAddress) -> bool {
        let mut state = self.lock();
        if state.current.as_ref() == Some(address) {
            state.current = None;
        }
        let before = state.live.len();
        state.live.retain(|a| a != address);
        let removed = state.live.len() != before;
        if removed {
            tracing::warn!(address = %address, remaining = state.live.len(), "Server eliminated");
        }
        removed
    }

    /// Snapshot of the live list.
    pub fn live_addresses(&self) -> Vec<ServerAddress> {
        self.lock().live.clone()
    }

    pub fn seed_addresses(&self) -> &[ServerAddress] {
        &self.seeds
    }

    pub fn refresh_period(&self) -> Duration {
        self.refresh_period
    }

    pub fn last_refreshed_at(&self) -> Option<Instant> {
        self.lock().refreshed_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{discovery_fn, StaticDiscovery};
    use std::sync::Arc;

    fn addrs(list: &[&str]) -> Vec<ServerAddress> {
        list.iter().map(|s| ServerAddress::from(*s)).collect()
    }

    fn seeded(list: &[&str]) -> (ServerPool, StaticDiscovery) {
        let seeds = addrs(list);
        (
            ServerPool::new(seeds.clone(), Duration::from_secs(60)),
            StaticDiscovery::new(seeds),
        )
    }

    #[test]
    fn test_new_pool_needs_refresh() {
        let (pool, _) = seeded(&["A", "B"]);
        assert!(pool.should_refresh());
        assert!(pool.live_addresses().is_empty());
        assert_eq!(pool.current_address(), None);
    }

    #[tokio::test]
    async fn test_failover_to_next_survivor() {
        let (pool, discovery) = seeded(&["A", "B"]);
        pool.refresh(&discovery).await.unwrap();

        assert_eq!(pool.current_address(), Some("A".into()));
        assert_eq!(pool.eliminate_current(), Some("A".into()));
        assert_eq!(pool.current_address(), Some("B".into()));
        assert_eq!(pool.live_addresses(), addrs(&["B"]));
    }

    #[tokio::test(start_paused = true)]
    async fn test_staleness_window() {
        let (pool, discovery) = seeded(&["A"]);
        pool.refresh(&discovery).await.unwrap();
        assert!(!pool.should_refresh());

        tokio::time::advance(Duration::from_secs(59)).await;
        assert!(!pool.should_refresh());

        tokio::time::advance(Duration::from_secs(2)).await;
        assert!(pool.should_refresh());

        pool.refresh(&discovery).await.unwrap();
        assert!(!pool.should_refresh());
    }

    #[tokio::test]
    async fn test_huge_refresh_period_never_expires() {
        let seeds = addrs(&["A"]);
        let pool = ServerPool::new(seeds.clone(), Duration::from_secs(u64::MAX));
        pool.refresh(&StaticDiscovery::new(seeds)).await.unwrap();

        assert!(!pool.should_refresh());
        pool.eliminate_current();
        assert!(pool.should_refresh());
    }

    #[tokio::test]
    async fn test_refresh_reports_dropped_addresses() {
        let pool = ServerPool::new(addrs(&["A", "B"]), Duration::from_secs(60));
        let first = pool.refresh(&StaticDiscovery::new(addrs(&["A", "B"]))).await.unwrap();
        assert!(first.is_empty());

        let dropped = pool
            .refresh(&discovery_fn(|| async { Ok(addrs(&["B", "C"])) }))
            .await
            .unwrap();
        assert_eq!(dropped, addrs(&["A"]));
        assert_eq!(pool.live_addresses(), addrs(&["B", "C"]));
    }

    #[tokio::test]
    async fn test_refresh_uses_discovered_list() {
        let pool = ServerPool::new(addrs(&["A", "B"]), Duration::from_secs(60));
        let discovery = discovery_fn(|| async { Ok(addrs(&["C", "D"])) });
        pool.refresh(&discovery).await.unwrap();

        assert_eq!(pool.live_addresses(), addrs(&["C", "D"]));
        assert_eq!(pool.current_address(), Some("C".into()));
        assert_eq!(pool.seed_addresses(), addrs(&["A", "B"]).as_slice());
    }

    #[tokio::test]
    async fn test_empty_discovery_falls_back_to_seeds() {
        let pool = ServerPool::new(addrs(&["A", "B"]), Duration::from_secs(60));
        let discovery = discovery_fn(|| async { Ok(Vec::new()) });
        pool.refresh(&discovery).await.unwrap();

        assert_eq!(pool.live_addresses(), addrs(&["A", "B"]));
        assert_eq!(pool.current_address(), Some("A".into()));
    }

    #[tokio::test]
    async fn test_empty_discovery_without_seeds_leaves_pool_empty() {
        let pool = ServerPool::new(Vec::new(), Duration::from_secs(60));
        let discovery = discovery_fn(|| async { Ok(Vec::new()) });
        pool.refresh(&discovery).await.unwrap();

        assert!(pool.live_addresses().is_empty());
        assert_eq!(pool.current_address(), None);
        assert!(pool.should_refresh());
    }

    #[tokio::test]
    async fn test_failed_discovery_does_not_stamp() {
        let (pool, discovery) = seeded(&["A"]);
        let failing = discovery_fn(|| async { Err(DiscoveryError::Failed("down".into())) });

        assert!(pool.refresh(&failing).await.is_err());
        assert!(pool.last_refreshed_at().is_none());
        assert!(pool.should_refresh());

        pool.refresh(&discovery).await.unwrap();
        let stamped = pool.last_refreshed_at();
        assert!(stamped.is_some());

        assert!(pool.refresh(&failing).await.is_err());
        assert_eq!(pool.last_refreshed_at(), stamped);
        assert_eq!(pool.live_addresses(), addrs(&["A"]));
    }

    #[tokio::test]
    async fn test_refresh_resets_selection() {
        let (pool, discovery) = seeded(&["A", "B", "C"]);
        pool.refresh(&discovery).await.unwrap();
        pool.eliminate_current();
        assert_eq!(pool.current_address(), Some("B".into()));

        pool.refresh(&discovery).await.unwrap();
        assert_eq!(pool.current_address(), Some("A".into()));
        assert_eq!(pool.live_addresses().len(), 3);
    }

    #[tokio::test]
    async fn test_elimination_is_monotonic() {
        let (pool, discovery) = seeded(&["A", "B", "C"]);
        pool.refresh(&discovery).await.unwrap();

        let mut size = pool.live_addresses().len();
        while let Some(gone) = pool.eliminate_current() {
            let live = pool.live_addresses();
            assert!(live.len() < size);
            assert!(!live.contains(&gone));
            assert_ne!(pool.current_address(), Some(gone));
            size = live.len();
        }
        assert!(pool.live_addresses().is_empty());
        assert!(pool.should_refresh());
    }

    #[tokio::test]
    async fn test_eliminate_absent_address_is_noop() {
        let (pool, discovery) = seeded(&["A", "B"]);
        pool.refresh(&discovery).await.unwrap();

        assert!(pool.eliminate(&"A".into()));
        assert!(!pool.eliminate(&"A".into()));
        assert!(!pool.eliminate(&"Z".into()));
        assert_eq!(pool.live_addresses(), addrs(&["B"]));
    }

    #[tokio::test]
    async fn test_eliminate_other_address_keeps_selection() {
        let (pool, discovery) = seeded(&["A", "B", "C"]);
        pool.refresh(&discovery).await.unwrap();
        assert_eq!(pool.current_address(), Some("A".into()));

        pool.eliminate(&"B".into());
        assert_eq!(pool.current_address(), Some("A".into()));
        assert_eq!(pool.live_addresses(), addrs(&["A", "C"]));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_eliminations_and_refreshes() {
        let seeds = addrs(&["A", "B", "C", "D"]);
        let pool = Arc::new(ServerPool::new(seeds.clone(), Duration::from_secs(60)));
        let discovery = Arc::new(StaticDiscovery::new(seeds.clone()));
        pool.refresh(discovery.as_ref()).await.unwrap();

        let mut handles = Vec::new();
        for i in 0..32 {
            let pool = pool.clone();
            let discovery = discovery.clone();
            handles.push(tokio::spawn(async move {
                if i % 8 == 0 {
                    pool.refresh(discovery.as_ref()).await.unwrap();
                } else {
                    pool.eliminate(&ServerAddress::from("A"));
                    pool.eliminate_current();
                }
            }));
        }
        for h in handles {
            h.await.unwrap();
        }

        let live = pool.live_addresses();
        assert!(live.iter().all(|a| seeds.contains(a)));
        if let Some(current) = pool.current_address() {
            assert!(live.contains(&current));
        }
    }
}
