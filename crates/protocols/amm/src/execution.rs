//! Execution Bounds
//!
//! Turns a scored trade into the amounts a swap submission commits to:
//! the executable shape and slippage-protected limits.

use num_bigint::BigInt;
use serde::{Deserialize, Serialize};

use route_core::{AssetId, ExecutionError};

use crate::calculator::{ceil_div, floor_div};
use crate::constants::slippage::SLIPPAGE_SCALE;
use crate::state::Trade;

/// Number of pools a submitted swap may cross
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TradeShape {
    /// One pool
    Direct,
    /// Two pools through one intermediate asset
    TwoHop,
}

impl TradeShape {
    pub fn of(trade: &Trade) -> Result<Self, ExecutionError> {
        match trade.hops() {
            1 => Ok(Self::Direct),
            2 => Ok(Self::TwoHop),
            hops => Err(ExecutionError::InvalidTradeShape { hops }),
        }
    }
}

/// Which way slippage moves an amount
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlippageDirection {
    /// Raise the amount, rounding up (maximum input)
    Plus,
    /// Lower the amount, rounding down (minimum output)
    Minus,
}

/// Apply a slippage tolerance in basis points to `value`.
///
/// `Plus` gives `ceil(value * (1 + s))`, `Minus` gives `floor(value * (1 - s))`.
pub fn with_slippage(
    value: &BigInt,
    slippage_bps: u32,
    direction: SlippageDirection,
) -> Result<BigInt, ExecutionError> {
    if slippage_bps >= SLIPPAGE_SCALE {
        return Err(ExecutionError::InvalidSlippage { bps: slippage_bps });
    }

    let scale = BigInt::from(SLIPPAGE_SCALE);
    let bps = BigInt::from(slippage_bps);
    Ok(match direction {
        SlippageDirection::Plus => ceil_div(&(value * (&scale + bps)), &scale),
        SlippageDirection::Minus => floor_div(&(value * (&scale - bps)), &scale),
    })
}

/// Which side of the swap is fixed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SwapKind {
    ExactIn,
    ExactOut,
}

/// Amounts a swap submission commits to.
///
/// For `ExactIn`, `amount_in` is paid exactly and `amount_out` is the minimum
/// accepted. For `ExactOut`, `amount_out` is received exactly and `amount_in`
/// is the maximum paid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapBounds {
    pub kind: SwapKind,
    pub shape: TradeShape,
    pub asset_list: Vec<AssetId>,
    pub amount_in: BigInt,
    pub amount_out: BigInt,
}

impl SwapBounds {
    /// Sell the trade's input exactly, accepting `slippage_bps` less output
    pub fn exact_in(trade: &Trade, slippage_bps: u32) -> Result<Self, ExecutionError> {
        let (shape, amount_in, quoted_out) = Self::endpoints(trade)?;
        let amount_out = with_slippage(quoted_out, slippage_bps, SlippageDirection::Minus)?;
        Ok(Self {
            kind: SwapKind::ExactIn,
            shape,
            asset_list: trade.asset_list.clone(),
            amount_in: amount_in.clone(),
            amount_out,
        })
    }

    /// Buy the trade's output exactly, paying up to `slippage_bps` more input
    pub fn exact_out(trade: &Trade, slippage_bps: u32) -> Result<Self, ExecutionError> {
        let (shape, quoted_in, amount_out) = Self::endpoints(trade)?;
        let amount_in = with_slippage(quoted_in, slippage_bps, SlippageDirection::Plus)?;
        Ok(Self {
            kind: SwapKind::ExactOut,
            shape,
            asset_list: trade.asset_list.clone(),
            amount_in,
            amount_out: amount_out.clone(),
        })
    }

    fn endpoints(trade: &Trade) -> Result<(TradeShape, &BigInt, &BigInt), ExecutionError> {
        let shape = TradeShape::of(trade)?;
        match (trade.amount_in(), trade.amount_out()) {
            (Some(amount_in), Some(amount_out)) if trade.amount_list.len() == trade.hops() + 1 => {
                Ok((shape, amount_in, amount_out))
            }
            _ => Err(ExecutionError::InvalidTradeShape { hops: trade.hops() }),
        }
    }
}
