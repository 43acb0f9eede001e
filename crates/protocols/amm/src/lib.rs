//! Constant-Product AMM Routing
//!
//! Finds multi-hop swap paths across liquidity pools, prices them with
//! constant-product math, and ranks the resulting trades.

pub mod calculator;
pub mod constants;
pub mod execution;
pub mod fetch;
pub mod quoter;
pub mod ranking;
pub mod router;
pub mod state;

// Re-exports
pub use calculator::{
    amount_in, amount_out, price_impact, quote_add_liquidity, quote_remove_liquidity,
};
pub use constants::{fees, limits, slippage};
pub use execution::{with_slippage, SlippageDirection, SwapBounds, SwapKind, TradeShape};
pub use fetch::{referenced_pairs, resolve_reserves, ReserveSource, StaticReserves};
pub use quoter::RouteQuoter;
pub use ranking::{compare_trades, RankedTrades};
pub use router::{asset_path, enumerate_routes, sample_candidates, score_exact_in, score_exact_out};
pub use state::{
    AddLiquidityQuote, PoolSide, RemoveLiquidityQuote, ReserveMap, ReserveSnapshot, Route, Trade,
};
