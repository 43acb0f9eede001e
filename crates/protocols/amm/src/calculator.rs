//! AMM Calculator
//!
//! Swap math using constant product formula (x * y = k) with a basis-point fee.
//! All amounts are integers with floor division, matching on-chain arithmetic.

use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use num_traits::{Signed, Zero};

use route_core::{AssetId, ExecutionError};

use crate::constants::fees::FEE_SCALE;
use crate::state::{AddLiquidityQuote, PoolSide, RemoveLiquidityQuote, ReserveSnapshot};

/// Integer division rounding toward negative infinity.
///
/// `denominator` must be non-zero.
pub(crate) fn floor_div(numerator: &BigInt, denominator: &BigInt) -> BigInt {
    let quotient = numerator / denominator;
    let remainder = numerator % denominator;
    if !remainder.is_zero() && (remainder.is_negative() != denominator.is_negative()) {
        quotient - 1
    } else {
        quotient
    }
}

/// Integer division rounding toward positive infinity.
pub(crate) fn ceil_div(numerator: &BigInt, denominator: &BigInt) -> BigInt {
    -floor_div(&-numerator, denominator)
}

/// Calculate swap output for a given input
///
/// Formula: output = floor(in * (scale - fee) * reserve_out / (reserve_in * scale + in * (scale - fee)))
///
/// Returns `None` when the pool cannot price the hop (non-positive reserves
/// or a zero denominator).
pub fn amount_out(
    amount_in: &BigInt,
    reserve_in: &BigInt,
    reserve_out: &BigInt,
    fee_bps: u32,
) -> Option<BigInt> {
    if !reserve_in.is_positive() || !reserve_out.is_positive() {
        return None;
    }

    let scale = BigInt::from(FEE_SCALE);
    let fee_multiplier = &scale - BigInt::from(fee_bps);
    let amount_in_after_fees = amount_in * fee_multiplier;
    let denominator = reserve_in * &scale + &amount_in_after_fees;

    if denominator.is_zero() {
        return None;
    }

    Some(floor_div(&(amount_in_after_fees * reserve_out), &denominator))
}

/// Calculate required input for a desired output (reverse calculation)
///
/// Formula: input = floor(out * scale * reserve_in / ((reserve_out - out) * (scale - fee))) + 1
///
/// The `+ 1` is applied after flooring, so an exact division still rounds up
/// by one unit. This is not a ceiling and must not be replaced by one.
pub fn amount_in(
    amount_out: &BigInt,
    reserve_out: &BigInt,
    reserve_in: &BigInt,
    fee_bps: u32,
) -> Option<BigInt> {
    if !reserve_in.is_positive() || !reserve_out.is_positive() {
        return None;
    }

    let scale = BigInt::from(FEE_SCALE);
    let fee_multiplier = &scale - BigInt::from(fee_bps);
    let denominator = (reserve_out - amount_out) * fee_multiplier;

    if denominator.is_zero() {
        return None;
    }

    let numerator = amount_out * &scale * reserve_in;
    Some(floor_div(&numerator, &denominator) + 1)
}

/// Calculate price impact of a multi-hop trade as a fraction.
///
/// Compares the realized output (last entry of `amounts`) with the output the
/// same input would get at the pools' current marginal prices, fee included:
/// `in * (scale - fee) / scale * prod(reserve_out / reserve_in)`.
///
/// Result: `|realized - no_impact| / no_impact`, never negative.
pub fn price_impact(
    source: &AssetId,
    pairs: &[ReserveSnapshot],
    amounts: &[BigInt],
    fee_bps: u32,
) -> BigDecimal {
    let (Some(first), Some(last)) = (amounts.first(), amounts.last()) else {
        return BigDecimal::zero();
    };

    let scale = BigInt::from(FEE_SCALE);
    let mut no_impact_out = BigDecimal::new(first * (&scale - BigInt::from(fee_bps)), 0)
        / BigDecimal::new(scale, 0);

    let mut current = source;
    for snapshot in pairs {
        let (numerator, denominator) = if snapshot.asset_x() == current {
            current = snapshot.asset_y();
            (&snapshot.reserve_y, &snapshot.reserve_x)
        } else {
            current = snapshot.asset_x();
            (&snapshot.reserve_x, &snapshot.reserve_y)
        };
        if denominator.is_zero() {
            return BigDecimal::zero();
        }
        no_impact_out = no_impact_out * BigDecimal::new(numerator.clone(), 0)
            / BigDecimal::new(denominator.clone(), 0);
    }

    if no_impact_out.is_zero() {
        return BigDecimal::zero();
    }

    let realized = BigDecimal::new(last.clone(), 0);
    ((realized - &no_impact_out) / no_impact_out).abs()
}

/// Preview a liquidity deposit with `amount` fixed on the `fixed` side.
///
/// paired_amount = floor(amount * reserve_other / reserve_fixed)
/// share_of_pool = amount / (reserve_fixed + amount)
pub fn quote_add_liquidity(
    snapshot: &ReserveSnapshot,
    amount: &BigInt,
    fixed: PoolSide,
) -> Result<AddLiquidityQuote, ExecutionError> {
    if !snapshot.reserve_x.is_positive() || !snapshot.reserve_y.is_positive() {
        return Err(ExecutionError::EmptyPool {
            pair: snapshot.pair.to_string(),
        });
    }

    let (reserve_fixed, reserve_other) = match fixed {
        PoolSide::X => (&snapshot.reserve_x, &snapshot.reserve_y),
        PoolSide::Y => (&snapshot.reserve_y, &snapshot.reserve_x),
    };

    let paired_amount = floor_div(&(amount * reserve_other), reserve_fixed);

    let reserve_x = BigDecimal::new(snapshot.reserve_x.clone(), 0);
    let reserve_y = BigDecimal::new(snapshot.reserve_y.clone(), 0);
    let deposit = BigDecimal::new(amount.clone(), 0);
    let pooled = BigDecimal::new(reserve_fixed + amount, 0);
    let share_of_pool = if pooled.is_zero() {
        BigDecimal::zero()
    } else {
        deposit / pooled
    };

    Ok(AddLiquidityQuote {
        paired_amount,
        x_per_y: reserve_x.clone() / reserve_y.clone(),
        y_per_x: reserve_y / reserve_x,
        share_of_pool,
    })
}

/// Preview redeeming `lp_amount` out of a total LP supply of `lp_supply`.
///
/// amount_x = floor(lp_amount * reserve_x / lp_supply), likewise for Y.
pub fn quote_remove_liquidity(
    snapshot: &ReserveSnapshot,
    lp_amount: &BigInt,
    lp_supply: &BigInt,
) -> Result<RemoveLiquidityQuote, ExecutionError> {
    if lp_amount > lp_supply {
        return Err(ExecutionError::LiquidityExceedsSupply {
            amount: lp_amount.to_string(),
            supply: lp_supply.to_string(),
        });
    }
    if !lp_supply.is_positive() {
        return Err(ExecutionError::EmptyPool {
            pair: snapshot.pair.to_string(),
        });
    }

    Ok(RemoveLiquidityQuote {
        amount_x: floor_div(&(lp_amount * &snapshot.reserve_x), lp_supply),
        amount_y: floor_div(&(lp_amount * &snapshot.reserve_y), lp_supply),
    })
}
