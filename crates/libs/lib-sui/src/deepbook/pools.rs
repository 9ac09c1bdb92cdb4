//! # Pool Registry
//!
//! Caches the indexer's pool list keyed by pool name (`BASE_QUOTE`).
//!
//! - Fresh for 5 minutes after a successful fetch.
//! - When a refresh fails the stale list is served, provided it is non-empty,
//!   and the indexer is not asked again for [`POOL_RETRY_BACKOFF`].
//! - With nothing cached, a failed refresh is a `NETWORK_ERROR`.

use lib_core::{AppError, Result};
use shared::Pool;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use super::DexVenue;

pub const POOL_CACHE_TTL: Duration = Duration::from_secs(5 * 60);

pub const POOL_RETRY_BACKOFF: Duration = Duration::from_secs(30);

struct PoolCache {
    by_name: HashMap<String, Pool>,
    fetched_at: Instant,
    /// Set after a failed refresh; the stale list is served until then.
    retry_after: Option<Instant>,
}

impl PoolCache {
    fn is_usable(&self, ttl: Duration) -> bool {
        if self.by_name.is_empty() {
            return false;
        }
        self.fetched_at.elapsed() < ttl
            || self.retry_after.is_some_and(|at| Instant::now() < at)
    }
}

/// A pool matched for a token pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolMatch {
    pub pool: Pool,
    /// Set when the pair matched as `quote/base`.
    pub is_reversed: bool,
}

pub struct PoolRegistry {
    venue: Arc<dyn DexVenue>,
    cache: RwLock<Option<PoolCache>>,
    ttl: Duration,
}

impl PoolRegistry {
    pub fn new(venue: Arc<dyn DexVenue>) -> Self {
        Self::with_ttl(venue, POOL_CACHE_TTL)
    }

    pub fn with_ttl(venue: Arc<dyn DexVenue>, ttl: Duration) -> Self {
        Self {
            venue,
            cache: RwLock::new(None),
            ttl,
        }
    }

    /// All known pools, refreshed from the indexer when the cache is stale.
    pub async fn pools(&self) -> Result<Vec<Pool>> {
        self.refresh_if_stale().await?;
        let cache = self.cache.read().await;
        let mut pools: Vec<Pool> = cache
            .as_ref()
            .map(|c| c.by_name.values().cloned().collect())
            .unwrap_or_default();
        pools.sort_by(|a, b| a.pool_name.cmp(&b.pool_name));
        Ok(pools)
    }

    /// Pool for `base/quote`, falling back to `quote/base`.
    pub async fn pool_by_pair(&self, base: &str, quote: &str) -> Result<PoolMatch> {
        self.refresh_if_stale().await?;
        let cache = self.cache.read().await;
        let by_name = cache.as_ref().map(|c| &c.by_name);

        let direct = format!("{}_{}", base, quote);
        if let Some(pool) = by_name.and_then(|pools| pools.get(&direct)) {
            return Ok(PoolMatch {
                pool: pool.clone(),
                is_reversed: false,
            });
        }

        let reverse = format!("{}_{}", quote, base);
        if let Some(pool) = by_name.and_then(|pools| pools.get(&reverse)) {
            debug!("[POOLS] Using reverse pool {} for {}/{}", reverse, base, quote);
            return Ok(PoolMatch {
                pool: pool.clone(),
                is_reversed: true,
            });
        }

        Err(AppError::PoolNotFound(format!(
            "Pool not found for pair {base}/{quote} or reverse {quote}/{base}"
        )))
    }

    pub async fn pool_by_id(&self, pool_id: &str) -> Result<Option<Pool>> {
        self.refresh_if_stale().await?;
        let cache = self.cache.read().await;
        Ok(cache
            .as_ref()
            .and_then(|c| c.by_name.values().find(|p| p.pool_id == pool_id).cloned()))
    }

    async fn refresh_if_stale(&self) -> Result<()> {
        {
            let cache = self.cache.read().await;
            if cache.as_ref().is_some_and(|c| c.is_usable(self.ttl)) {
                return Ok(());
            }
        }

        let mut cache = self.cache.write().await;
        // Another task may have refreshed while we waited for the lock
        if cache.as_ref().is_some_and(|c| c.is_usable(self.ttl)) {
            return Ok(());
        }

        match self.venue.fetch_pools().await {
            Ok(pools) => {
                let by_name: HashMap<String, Pool> = pools
                    .into_iter()
                    .map(|pool| (pool.pool_name.clone(), pool))
                    .collect();
                info!("[POOLS] Fetched {} pools from indexer", by_name.len());
                *cache = Some(PoolCache {
                    by_name,
                    fetched_at: Instant::now(),
                    retry_after: None,
                });
                Ok(())
            }
            Err(err) => match cache.as_mut() {
                Some(stale) if !stale.by_name.is_empty() => {
                    warn!("[POOLS] Refresh failed, serving stale cache: {}", err);
                    stale.retry_after = Some(Instant::now() + POOL_RETRY_BACKOFF);
                    Ok(())
                }
                _ => {
                    warn!("[POOLS] Refresh failed with empty cache: {}", err);
                    Err(AppError::Network(
                        "Failed to fetch pools from DeepBook indexer".to_string(),
                    ))
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deepbook::testing::{sample_pools, FakeVenue, DEEP_SUI_POOL};

    #[tokio::test]
    async fn test_pair_lookup_direct_and_reversed() {
        let registry = PoolRegistry::new(Arc::new(FakeVenue::new(sample_pools())));

        let direct = registry.pool_by_pair("DEEP", "SUI").await.unwrap();
        assert!(!direct.is_reversed);
        assert_eq!(direct.pool.pool_name, "DEEP_SUI");

        let reversed = registry.pool_by_pair("SUI", "DEEP").await.unwrap();
        assert!(reversed.is_reversed);
        assert_eq!(reversed.pool.pool_name, "DEEP_SUI");
    }

    #[tokio::test]
    async fn test_pool_not_found() {
        let registry = PoolRegistry::new(Arc::new(FakeVenue::new(sample_pools())));
        let err = registry.pool_by_pair("WAL", "DBTC").await.unwrap_err();
        assert_eq!(err.code(), "POOL_NOT_FOUND");
        assert_eq!(
            err.user_message(),
            "Pool not found for pair WAL/DBTC or reverse DBTC/WAL"
        );
    }

    #[tokio::test]
    async fn test_cache_is_reused_within_ttl() {
        let venue = Arc::new(FakeVenue::new(sample_pools()));
        let registry = PoolRegistry::new(venue.clone());

        registry.pools().await.unwrap();
        registry.pools().await.unwrap();
        registry.pool_by_id(DEEP_SUI_POOL).await.unwrap();

        assert_eq!(venue.pool_fetches(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_cache_served_when_refresh_fails() {
        let venue = Arc::new(FakeVenue::new(sample_pools()));
        let registry = PoolRegistry::new(venue.clone());
        assert_eq!(registry.pools().await.unwrap().len(), 2);

        venue.set_offline(true);
        tokio::time::advance(POOL_CACHE_TTL + Duration::from_secs(1)).await;

        assert_eq!(registry.pools().await.unwrap().len(), 2);
        assert_eq!(venue.pool_fetches(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_refresh_backs_off_before_retrying() {
        // Arrange
        let venue = Arc::new(FakeVenue::new(sample_pools()));
        let registry = PoolRegistry::new(venue.clone());
        registry.pools().await.unwrap();
        venue.set_offline(true);
        tokio::time::advance(POOL_CACHE_TTL + Duration::from_secs(1)).await;

        // Act
        for _ in 0..5 {
            registry.pool_by_pair("SUI", "DEEP").await.unwrap();
        }

        // Assert
        assert_eq!(venue.pool_fetches(), 2);

        tokio::time::advance(POOL_RETRY_BACKOFF).await;
        venue.set_offline(false);
        registry.pools().await.unwrap();
        registry.pools().await.unwrap();
        assert_eq!(venue.pool_fetches(), 3);
    }

    #[tokio::test]
    async fn test_empty_cache_and_failed_fetch_is_network_error() {
        let venue = Arc::new(FakeVenue::new(sample_pools()));
        venue.set_offline(true);
        let registry = PoolRegistry::new(venue);

        let err = registry.pools().await.unwrap_err();
        assert_eq!(err.code(), "NETWORK_ERROR");
        assert_eq!(err.user_message(), "Failed to fetch pools from DeepBook indexer");
    }
}
