//! Error types for the router

use thiserror::Error;

/// Core errors that can occur while finding and scoring routes
#[derive(Debug, Error)]
pub enum Error {
    #[error("Route error: {0}")]
    Route(#[from] RouteError),

    #[error("Reserve error: {0}")]
    Reserve(#[from] ReserveError),

    #[error("Execution error: {0}")]
    Execution(#[from] ExecutionError),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Route construction and scoring errors
#[derive(Debug, Error)]
pub enum RouteError {
    #[error("Pair must join two different assets, got {asset} on both sides")]
    InvalidPair { asset: String },

    #[error("No reserve snapshot for pair ({pair})")]
    MissingReserve { pair: String },

    #[error("Route pair ({pair}) does not touch {asset}")]
    DisconnectedRoute { pair: String, asset: String },
}

/// Reserve resolution errors
#[derive(Debug, Error)]
pub enum ReserveError {
    #[error("Liquidity pool not found for pair ({pair})")]
    Unresolvable { pair: String },

    #[error("Timed out fetching reserves for pair ({pair}) after {secs}s")]
    Timeout { pair: String, secs: u64 },

    #[error("Reserve source failed: {message}")]
    Source { message: String },
}

/// Errors preparing a trade for submission
#[derive(Debug, Error)]
pub enum ExecutionError {
    #[error("Invalid coin pair length ({hops}), only 1 or 2 hops are executable")]
    InvalidTradeShape { hops: usize },

    #[error("Invalid slippage ({bps} bps), expected below 10000")]
    InvalidSlippage { bps: u32 },

    #[error("Pool ({pair}) has no liquidity to quote against")]
    EmptyPool { pair: String },

    #[error("Invalid amount ({amount}) value, larger than total lp supply ({supply})")]
    LiquidityExceedsSupply { amount: String, supply: String },
}

/// Result type alias for router operations
pub type Result<T> = std::result::Result<T, Error>;

impl RouteError {
    /// Get a stable error code
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidPair { .. } => "invalid_pair",
            Self::MissingReserve { .. } => "missing_reserve",
            Self::DisconnectedRoute { .. } => "disconnected_route",
        }
    }
}

impl ReserveError {
    /// Get a stable error code
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Unresolvable { .. } => "reserve_unresolvable",
            Self::Timeout { .. } => "reserve_timeout",
            Self::Source { .. } => "reserve_source",
        }
    }
}

impl ExecutionError {
    /// Get a stable error code
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidTradeShape { .. } => "invalid_trade_shape",
            Self::InvalidSlippage { .. } => "invalid_slippage",
            Self::EmptyPool { .. } => "empty_pool",
            Self::LiquidityExceedsSupply { .. } => "liquidity_exceeds_supply",
        }
    }
}

impl Error {
    /// Get a stable error code for any router error
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Route(e) => e.error_code(),
            Self::Reserve(e) => e.error_code(),
            Self::Execution(e) => e.error_code(),
            Self::Config(_) => "config",
        }
    }
}
