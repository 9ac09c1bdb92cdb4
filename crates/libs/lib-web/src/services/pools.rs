//! # Pool Service
//!
//! DeepBook pool listing and pair lookup, served from the registry cache.

use lib_core::Result;
use lib_sui::DeepBook;
use shared::{PoolLookupResponse, PoolsResponse};
use std::sync::Arc;
use tracing::instrument;

#[derive(Clone)]
pub struct PoolService {
    deepbook: Arc<DeepBook>,
}

impl PoolService {
    pub fn new(deepbook: Arc<DeepBook>) -> Self {
        Self { deepbook }
    }

    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<PoolsResponse> {
        let pools = self.deepbook.pools().pools().await?;
        Ok(PoolsResponse { pools })
    }

    /// Pool trading `base`/`quote` in either orientation.
    #[instrument(skip(self))]
    pub async fn by_pair(&self, base: &str, quote: &str) -> Result<PoolLookupResponse> {
        let matched = self
            .deepbook
            .pools()
            .pool_by_pair(&base.trim().to_uppercase(), &quote.trim().to_uppercase())
            .await?;
        Ok(PoolLookupResponse {
            pool: matched.pool,
            is_reversed: matched.is_reversed,
        })
    }
}
