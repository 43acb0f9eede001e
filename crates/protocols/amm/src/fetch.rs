//! Reserve Fetching
//!
//! Resolves pool reserves for exactly the pairs a set of candidate routes
//! references. Resolution is all-or-nothing: one missing pool fails the round.

use std::collections::{HashMap, HashSet};
use std::future::Future;
use std::time::Duration;

use futures::future::try_join_all;
use num_bigint::BigInt;
use tracing::{debug, warn};

use route_core::{PoolPair, ReserveError};

use crate::state::{ReserveMap, ReserveSnapshot, Route};

/// Source of current pool reserves, usually a remote ledger client.
pub trait ReserveSource: Send + Sync {
    /// Fetch `(reserve_x, reserve_y)` for the pool behind `pair`.
    ///
    /// `Ok(None)` means no pool exists for that orientation.
    fn fetch_reserves(
        &self,
        pair: &PoolPair,
    ) -> impl Future<Output = Result<Option<(BigInt, BigInt)>, ReserveError>> + Send;
}

/// In-memory reserve source over a fixed snapshot set
#[derive(Debug, Clone, Default)]
pub struct StaticReserves {
    reserves: HashMap<PoolPair, (BigInt, BigInt)>,
}

impl StaticReserves {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the reserves for `pair`
    pub fn with_pool(mut self, pair: PoolPair, reserve_x: BigInt, reserve_y: BigInt) -> Self {
        self.reserves.insert(pair, (reserve_x, reserve_y));
        self
    }

    pub fn len(&self) -> usize {
        self.reserves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reserves.is_empty()
    }
}

impl From<ReserveMap> for StaticReserves {
    fn from(map: ReserveMap) -> Self {
        Self {
            reserves: map
                .into_iter()
                .map(|(pair, snapshot)| (pair, (snapshot.reserve_x, snapshot.reserve_y)))
                .collect(),
        }
    }
}

impl ReserveSource for StaticReserves {
    fn fetch_reserves(
        &self,
        pair: &PoolPair,
    ) -> impl Future<Output = Result<Option<(BigInt, BigInt)>, ReserveError>> + Send {
        let found = self.reserves.get(pair).cloned();
        async move { Ok(found) }
    }
}

/// Unique pairs across `routes`, in first-seen order
pub fn referenced_pairs(routes: &[Route]) -> Vec<PoolPair> {
    let mut seen = HashSet::new();
    routes
        .iter()
        .flat_map(|route| route.pairs.iter())
        .filter(|pair| seen.insert(*pair))
        .cloned()
        .collect()
}

/// Fetch reserves for every pair the routes reference, concurrently.
///
/// Each fetch is bounded by `timeout`. The first failure, missing pool, or
/// timeout aborts the whole resolution.
pub async fn resolve_reserves<S: ReserveSource>(
    source: &S,
    routes: &[Route],
    timeout: Duration,
) -> Result<ReserveMap, ReserveError> {
    let pairs = referenced_pairs(routes);
    debug!(pairs = pairs.len(), routes = routes.len(), "Resolving reserves");

    let fetches = pairs.iter().map(|pair| async move {
        let reserves = tokio::time::timeout(timeout, source.fetch_reserves(pair))
            .await
            .map_err(|_| ReserveError::Timeout {
                pair: pair.to_string(),
                secs: timeout.as_secs(),
            })??;

        let (reserve_x, reserve_y) = reserves.ok_or_else(|| ReserveError::Unresolvable {
            pair: pair.to_string(),
        })?;

        Ok::<_, ReserveError>(ReserveSnapshot::new(pair.clone(), reserve_x, reserve_y))
    });

    let snapshots = try_join_all(fetches).await.inspect_err(|e| {
        warn!(error = %e, code = e.error_code(), "Reserve resolution failed");
    })?;

    Ok(snapshots
        .into_iter()
        .map(|snapshot| (snapshot.pair.clone(), snapshot))
        .collect())
}
