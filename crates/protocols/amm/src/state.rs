//! AMM State Types
//!
//! Data structures for reserve snapshots, routes, and scored trades.

use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use route_core::{AssetId, PoolPair};

/// Pool reserves observed for one pair at quote time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReserveSnapshot {
    pub pair: PoolPair,
    pub reserve_x: BigInt,
    pub reserve_y: BigInt,
}

impl ReserveSnapshot {
    pub fn new(pair: PoolPair, reserve_x: BigInt, reserve_y: BigInt) -> Self {
        Self {
            pair,
            reserve_x,
            reserve_y,
        }
    }

    pub fn asset_x(&self) -> &AssetId {
        self.pair.asset_x()
    }

    pub fn asset_y(&self) -> &AssetId {
        self.pair.asset_y()
    }

    /// Orient the pool for selling `asset_in`.
    ///
    /// Returns `(reserve_in, reserve_out, asset_out)`, or `None` when the
    /// pool does not hold `asset_in`.
    pub fn swap_from(&self, asset_in: &AssetId) -> Option<(&BigInt, &BigInt, &AssetId)> {
        if self.asset_x() == asset_in {
            Some((&self.reserve_x, &self.reserve_y, self.asset_y()))
        } else if self.asset_y() == asset_in {
            Some((&self.reserve_y, &self.reserve_x, self.asset_x()))
        } else {
            None
        }
    }

    /// Orient the pool for buying `asset_out`.
    ///
    /// Returns `(reserve_in, reserve_out, asset_in)`.
    pub fn swap_to(&self, asset_out: &AssetId) -> Option<(&BigInt, &BigInt, &AssetId)> {
        if self.asset_y() == asset_out {
            Some((&self.reserve_x, &self.reserve_y, self.asset_x()))
        } else if self.asset_x() == asset_out {
            Some((&self.reserve_y, &self.reserve_x, self.asset_y()))
        } else {
            None
        }
    }
}

/// Side of a pool whose deposit amount the caller fixes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PoolSide {
    X,
    Y,
}

/// Deposit preview for adding liquidity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddLiquidityQuote {
    /// Amount of the other asset that matches the fixed deposit
    pub paired_amount: BigInt,
    pub x_per_y: BigDecimal,
    pub y_per_x: BigDecimal,
    /// Fraction of the fixed side's reserve the deposit will hold
    pub share_of_pool: BigDecimal,
}

/// Redemption preview for burning LP tokens
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoveLiquidityQuote {
    pub amount_x: BigInt,
    pub amount_y: BigInt,
}

/// Reserve snapshots for one quoting round, keyed by oriented pair
pub type ReserveMap = HashMap<PoolPair, ReserveSnapshot>;

/// Ordered sequence of pairs forming a path between two assets
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Route {
    pub pairs: Vec<PoolPair>,
}

impl Route {
    pub fn new(pairs: Vec<PoolPair>) -> Self {
        Self { pairs }
    }

    /// Number of swaps along the route
    pub fn hops(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_direct(&self) -> bool {
        self.pairs.len() == 1
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, pair) in self.pairs.iter().enumerate() {
            if i > 0 {
                write!(f, " -> ")?;
            }
            write!(f, "({})", pair)?;
        }
        Ok(())
    }
}

/// A fully priced route.
///
/// `amount_list` has one more entry than `pair_list`: the amount entering the
/// first pool, then the amount leaving each pool. `asset_list` names the asset
/// held at each of those points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    pub pair_list: Vec<ReserveSnapshot>,
    pub amount_list: Vec<BigInt>,
    pub asset_list: Vec<AssetId>,
    /// Deviation from the no-impact output, as a fraction
    pub price_impact: BigDecimal,
}

impl Trade {
    /// Amount paid into the first pool
    pub fn amount_in(&self) -> Option<&BigInt> {
        self.amount_list.first()
    }

    /// Amount received from the last pool
    pub fn amount_out(&self) -> Option<&BigInt> {
        self.amount_list.last()
    }

    pub fn hops(&self) -> usize {
        self.pair_list.len()
    }

    /// The route this trade was priced on
    pub fn route(&self) -> Route {
        Route::new(self.pair_list.iter().map(|s| s.pair.clone()).collect())
    }
}
