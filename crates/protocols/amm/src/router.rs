//! Multi-Hop Router: Path Enumeration, Sampling & Trade Scoring
//!
//! Finds every simple path between two assets over the pair list, bounds how
//! many of them get priced per round, and prices the survivors hop by hop in
//! either direction (exact input or exact output).

use std::collections::HashSet;

use num_bigint::BigInt;
use num_traits::Signed;
use rand::Rng;
use tracing::debug;

use route_core::{AssetId, PoolPair, RouteError};

use crate::calculator::{amount_in, amount_out, price_impact};
use crate::constants::limits::MAX_NATIVE_AMOUNT;
use crate::ranking::RankedTrades;
use crate::state::{ReserveMap, ReserveSnapshot, Route, Trade};

// ---------------------------------------------------------------------------
// Step 1: Path Enumeration
// ---------------------------------------------------------------------------

struct Frame<'a> {
    asset: &'a AssetId,
    cursor: usize,
    hops_left: usize,
}

/// Find all simple paths from `source` to `target` of at most `max_hops` pairs.
///
/// Depth-first over the pair list. Each pair is used at most once per path and
/// the search stops extending a path as soon as it reaches `target`. Routes
/// come out in pair-list order at every depth.
pub fn enumerate_routes(
    pairs: &[PoolPair],
    source: &AssetId,
    target: &AssetId,
    max_hops: usize,
) -> Vec<Route> {
    let mut routes = Vec::new();
    if max_hops == 0 {
        return routes;
    }

    let mut used = vec![false; pairs.len()];
    let mut path: Vec<usize> = Vec::with_capacity(max_hops);
    let mut stack = vec![Frame {
        asset: source,
        cursor: 0,
        hops_left: max_hops,
    }];

    while let Some(frame) = stack.last_mut() {
        if frame.cursor >= pairs.len() {
            stack.pop();
            if let Some(index) = path.pop() {
                used[index] = false;
            }
            continue;
        }

        let index = frame.cursor;
        frame.cursor += 1;
        if used[index] {
            continue;
        }

        let Some(next) = pairs[index].other(frame.asset) else {
            continue;
        };

        if next == target {
            let mut found: Vec<PoolPair> = path.iter().map(|&i| pairs[i].clone()).collect();
            found.push(pairs[index].clone());
            routes.push(Route::new(found));
        } else if frame.hops_left > 1 && pairs.len() - path.len() > 1 {
            let hops_left = frame.hops_left - 1;
            used[index] = true;
            path.push(index);
            stack.push(Frame {
                asset: next,
                cursor: 0,
                hops_left,
            });
        }
    }

    routes
}

// ---------------------------------------------------------------------------
// Step 2: Candidate Sampling
// ---------------------------------------------------------------------------

/// Pick at most `max_routes` routes to price this round.
///
/// Direct routes and the routes behind the previous round's best and
/// second-best trades always come first, in route-list order; the rest of the
/// budget is drawn uniformly without replacement.
pub fn sample_candidates<R: Rng + ?Sized>(
    all_routes: &[Route],
    max_routes: usize,
    best: Option<&Trade>,
    second_best: Option<&Trade>,
    rng: &mut R,
) -> Vec<Route> {
    if all_routes.len() <= max_routes {
        return all_routes.to_vec();
    }

    let previous: Vec<Route> = [best, second_best]
        .into_iter()
        .flatten()
        .map(Trade::route)
        .collect();

    let mut indices: Vec<usize> = all_routes
        .iter()
        .enumerate()
        .filter(|(_, route)| route.is_direct() || previous.contains(route))
        .map(|(i, _)| i)
        .collect();

    indices.extend(rand::seq::index::sample(rng, all_routes.len(), max_routes).into_iter());

    let mut seen = HashSet::with_capacity(indices.len());
    indices
        .into_iter()
        .filter(|i| seen.insert(*i))
        .take(max_routes)
        .map(|i| all_routes[i].clone())
        .collect()
}

// ---------------------------------------------------------------------------
// Step 3: Exact-In Scoring
// ---------------------------------------------------------------------------

fn lookup<'m>(reserves: &'m ReserveMap, pair: &PoolPair) -> Result<&'m ReserveSnapshot, RouteError> {
    reserves.get(pair).ok_or_else(|| RouteError::MissingReserve {
        pair: pair.to_string(),
    })
}

fn disconnected(pair: &PoolPair, asset: &AssetId) -> RouteError {
    RouteError::DisconnectedRoute {
        pair: pair.to_string(),
        asset: asset.to_string(),
    }
}

/// Price every candidate selling exactly `input` of `source`.
///
/// Routes with an infeasible hop are skipped. A route referencing a pair
/// absent from `reserves`, or a pair not touching the carried asset, aborts
/// the whole call.
pub fn score_exact_in(
    candidates: &[Route],
    reserves: &ReserveMap,
    source: &AssetId,
    input: &BigInt,
    fee_bps: u32,
    max_trades: usize,
) -> Result<Vec<Trade>, RouteError> {
    let mut ranked = RankedTrades::new(max_trades);

    for route in candidates {
        if let Some(trade) = quote_exact_in(route, reserves, source, input, fee_bps)? {
            ranked.insert(trade);
        }
    }

    Ok(ranked.into_vec())
}

fn quote_exact_in(
    route: &Route,
    reserves: &ReserveMap,
    source: &AssetId,
    input: &BigInt,
    fee_bps: u32,
) -> Result<Option<Trade>, RouteError> {
    let mut current = source.clone();
    let mut pair_list = Vec::with_capacity(route.hops());
    let mut amount_list = Vec::with_capacity(route.hops() + 1);
    let mut asset_list = Vec::with_capacity(route.hops() + 1);
    amount_list.push(input.clone());
    asset_list.push(source.clone());

    for (hop, pair) in route.pairs.iter().enumerate() {
        let snapshot = lookup(reserves, pair)?;
        let (reserve_in, reserve_out, asset_out) = snapshot
            .swap_from(&current)
            .ok_or_else(|| disconnected(pair, &current))?;

        let carried = &amount_list[amount_list.len() - 1];
        let out = match amount_out(carried, reserve_in, reserve_out, fee_bps) {
            Some(out) if !out.is_negative() && out <= *reserve_out => out,
            other => {
                debug!(route = %route, hop, output = ?other, "exact-in route rejected");
                return Ok(None);
            }
        };

        current = asset_out.clone();
        pair_list.push(snapshot.clone());
        amount_list.push(out);
        asset_list.push(current.clone());
    }

    let impact = price_impact(source, &pair_list, &amount_list, fee_bps);
    Ok(Some(Trade {
        pair_list,
        amount_list,
        asset_list,
        price_impact: impact,
    }))
}

// ---------------------------------------------------------------------------
// Step 4: Exact-Out Scoring
// ---------------------------------------------------------------------------

/// Price every candidate buying exactly `output` of `target`.
///
/// Works backwards from the last pool. A hop whose required input is negative
/// or does not fit a native u64 amount rejects the route.
pub fn score_exact_out(
    candidates: &[Route],
    reserves: &ReserveMap,
    source: &AssetId,
    target: &AssetId,
    output: &BigInt,
    fee_bps: u32,
    max_trades: usize,
) -> Result<Vec<Trade>, RouteError> {
    let mut ranked = RankedTrades::new(max_trades);
    let ceiling = BigInt::from(MAX_NATIVE_AMOUNT);

    for route in candidates {
        if let Some(trade) =
            quote_exact_out(route, reserves, source, target, output, fee_bps, &ceiling)?
        {
            ranked.insert(trade);
        }
    }

    Ok(ranked.into_vec())
}

fn quote_exact_out(
    route: &Route,
    reserves: &ReserveMap,
    source: &AssetId,
    target: &AssetId,
    output: &BigInt,
    fee_bps: u32,
    ceiling: &BigInt,
) -> Result<Option<Trade>, RouteError> {
    let mut current = target.clone();
    let mut pair_list = Vec::with_capacity(route.hops());
    let mut amount_list = Vec::with_capacity(route.hops() + 1);
    amount_list.push(output.clone());

    for (hop, pair) in route.pairs.iter().enumerate().rev() {
        let snapshot = lookup(reserves, pair)?;
        let (reserve_in, reserve_out, asset_in) = snapshot
            .swap_to(&current)
            .ok_or_else(|| disconnected(pair, &current))?;

        let needed = &amount_list[amount_list.len() - 1];
        let required = match amount_in(needed, reserve_out, reserve_in, fee_bps) {
            Some(required) if !required.is_negative() && required <= *ceiling => required,
            other => {
                debug!(route = %route, hop, input = ?other, "exact-out route rejected");
                return Ok(None);
            }
        };

        current = asset_in.clone();
        pair_list.push(snapshot.clone());
        amount_list.push(required);
    }

    pair_list.reverse();
    amount_list.reverse();

    let asset_list = asset_path(source, &pair_list)?;
    let impact = price_impact(source, &pair_list, &amount_list, fee_bps);
    Ok(Some(Trade {
        pair_list,
        amount_list,
        asset_list,
        price_impact: impact,
    }))
}

/// Assets held along a priced path, starting with `source`
pub fn asset_path(source: &AssetId, pairs: &[ReserveSnapshot]) -> Result<Vec<AssetId>, RouteError> {
    let mut assets = Vec::with_capacity(pairs.len() + 1);
    assets.push(source.clone());
    let mut current = source;
    for snapshot in pairs {
        current = snapshot
            .pair
            .other(current)
            .ok_or_else(|| disconnected(&snapshot.pair, current))?;
        assets.push(current.clone());
    }
    Ok(assets)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
