//! Route Quoter
//!
//! Runs one quoting round: sample candidate routes, resolve their reserves,
//! then score and rank them. Callers keep the returned trades and pass them
//! back next round so the best known routes stay in the sample.

use std::time::Duration;

use num_bigint::BigInt;
use rand::Rng;
use tracing::{debug, info};

use route_core::{AssetId, PoolPair, Result, RouterConfig};

use crate::fetch::{resolve_reserves, ReserveSource};
use crate::router::{enumerate_routes, sample_candidates, score_exact_in, score_exact_out};
use crate::state::{Route, Trade};

/// Quotes swaps against a reserve source
pub struct RouteQuoter<S> {
    source: S,
    config: RouterConfig,
}

impl<S: ReserveSource> RouteQuoter<S> {
    pub fn new(source: S, config: RouterConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { source, config })
    }

    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Every route from `from` to `to` within the configured hop limit
    pub fn all_routes(&self, pairs: &[PoolPair], from: &AssetId, to: &AssetId) -> Vec<Route> {
        let routes = enumerate_routes(pairs, from, to, self.config.max_hops);
        info!(
            from = %from,
            to = %to,
            pairs = pairs.len(),
            routes = routes.len(),
            "Enumerated routes"
        );
        routes
    }

    /// Best trades selling exactly `amount_in` of `from`.
    ///
    /// `previous` is the last round's result for the same query, best first.
    pub async fn best_trades_exact_in<R: Rng + ?Sized>(
        &self,
        all_routes: &[Route],
        from: &AssetId,
        amount_in: &BigInt,
        previous: &[Trade],
        rng: &mut R,
    ) -> Result<Vec<Trade>> {
        let candidates = self.sample(all_routes, previous, rng);
        let reserves = resolve_reserves(&self.source, &candidates, self.timeout()).await?;
        let trades = score_exact_in(
            &candidates,
            &reserves,
            from,
            amount_in,
            self.config.fee_bps,
            self.config.max_trades,
        )?;

        debug!(
            amount_in = %amount_in,
            candidates = candidates.len(),
            trades = trades.len(),
            best_out = ?trades.first().and_then(Trade::amount_out),
            "Exact-in round complete"
        );
        Ok(trades)
    }

    /// Best trades buying exactly `amount_out` of `to`
    pub async fn best_trades_exact_out<R: Rng + ?Sized>(
        &self,
        all_routes: &[Route],
        from: &AssetId,
        to: &AssetId,
        amount_out: &BigInt,
        previous: &[Trade],
        rng: &mut R,
    ) -> Result<Vec<Trade>> {
        let candidates = self.sample(all_routes, previous, rng);
        let reserves = resolve_reserves(&self.source, &candidates, self.timeout()).await?;
        let trades = score_exact_out(
            &candidates,
            &reserves,
            from,
            to,
            amount_out,
            self.config.fee_bps,
            self.config.max_trades,
        )?;

        debug!(
            amount_out = %amount_out,
            candidates = candidates.len(),
            trades = trades.len(),
            best_in = ?trades.first().and_then(Trade::amount_in),
            "Exact-out round complete"
        );
        Ok(trades)
    }

    fn sample<R: Rng + ?Sized>(&self, all_routes: &[Route], previous: &[Trade], rng: &mut R) -> Vec<Route> {
        sample_candidates(
            all_routes,
            self.config.max_routes,
            previous.first(),
            previous.get(1),
            rng,
        )
    }

    fn timeout(&self) -> Duration {
        Duration::from_secs(self.config.reserve_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::StaticReserves;
    use crate::router::enumerate_routes;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const A: &str = "0xa::a::A";
    const B: &str = "0xb::b::B";
    const C: &str = "0xc::c::C";

    fn pair(x: &str, y: &str) -> PoolPair {
        PoolPair::new(x, y).unwrap()
    }

    fn quoter(config: RouterConfig) -> RouteQuoter<StaticReserves> {
        let source = StaticReserves::new()
            .with_pool(pair(A, B), BigInt::from(1000), BigInt::from(1000))
            .with_pool(pair(B, C), BigInt::from(1000), BigInt::from(1000))
            .with_pool(pair(A, C), BigInt::from(500), BigInt::from(1000));
        RouteQuoter::new(source, config).unwrap()
    }

    fn pairs() -> Vec<PoolPair> {
        vec![pair(A, B), pair(B, C), pair(A, C)]
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = RouterConfig {
            max_routes: 0,
            ..Default::default()
        };
        let err = RouteQuoter::new(StaticReserves::new(), config).err().unwrap();
        assert_eq!(err.error_code(), "config");
    }

    #[test]
    fn test_all_routes_uses_hop_limit() {
        let q = quoter(RouterConfig {
            max_hops: 1,
            ..Default::default()
        });
        let routes = q.all_routes(&pairs(), &A.into(), &C.into());
        assert_eq!(routes, vec![Route::new(vec![pair(A, C)])]);
        assert_eq!(q.config().max_hops, 1);
        assert_eq!(q.source().len(), 3);
    }

    #[tokio::test]
    async fn test_exact_in_round() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("amm=debug")
            .with_test_writer()
            .try_init();

        let q = quoter(RouterConfig::default());
        let from: AssetId = A.into();
        let routes = q.all_routes(&pairs(), &from, &C.into());
        let mut rng = StdRng::seed_from_u64(42);

        let trades = q
            .best_trades_exact_in(&routes, &from, &BigInt::from(100), &[], &mut rng)
            .await
            .unwrap();
        assert_eq!(trades.len(), 2);
        assert_eq!(trades[0].amount_out(), Some(&BigInt::from(166)));
        assert_eq!(trades[1].amount_out(), Some(&BigInt::from(82)));

        // Feeding the result back keeps the same ranking
        let again = q
            .best_trades_exact_in(&routes, &from, &BigInt::from(100), &trades, &mut rng)
            .await
            .unwrap();
        assert_eq!(again, trades);
    }

    #[tokio::test]
    async fn test_exact_out_round() {
        let q = quoter(RouterConfig::default());
        let from: AssetId = A.into();
        let to: AssetId = B.into();
        let routes = enumerate_routes(&pairs(), &from, &to, 2);
        let mut rng = StdRng::seed_from_u64(3);

        let trades = q
            .best_trades_exact_out(&routes, &from, &to, &BigInt::from(50), &[], &mut rng)
            .await
            .unwrap();
        // The deep A/C pool makes the detour through C cheaper than the direct pool
        assert_eq!(trades.len(), 2);
        assert_eq!(trades[0].amount_in(), Some(&BigInt::from(29)));
        assert_eq!(trades[0].hops(), 2);
        assert_eq!(trades[1].amount_in(), Some(&BigInt::from(53)));
        assert_eq!(trades[1].hops(), 1);
    }

    #[tokio::test]
    async fn test_round_fails_when_pool_missing() {
        let q = RouteQuoter::new(StaticReserves::new(), RouterConfig::default()).unwrap();
        let routes = vec![Route::new(vec![pair(A, B)])];
        let mut rng = StdRng::seed_from_u64(0);
        let err = q
            .best_trades_exact_in(&routes, &A.into(), &BigInt::from(10), &[], &mut rng)
            .await
            .unwrap_err();
        assert_eq!(err.error_code(), "reserve_unresolvable");
    }
}
