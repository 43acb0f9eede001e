//! AMM Constants
//!
//! Fee parameters and on-chain arithmetic limits.

/// Fee constants
pub mod fees {
    /// Fee scale (basis points denominator)
    pub const FEE_SCALE: u32 = route_core::FEE_SCALE;
}

/// Arithmetic limits of the target chain
pub mod limits {
    /// Largest amount a native u64 coin value can hold (2^64 - 1).
    /// Exact-out quotes needing more input than this would overflow on-chain.
    pub const MAX_NATIVE_AMOUNT: u64 = u64::MAX;
}

/// Slippage constants
pub mod slippage {
    /// Slippage scale (basis points denominator)
    pub const SLIPPAGE_SCALE: u32 = 10_000;
}
