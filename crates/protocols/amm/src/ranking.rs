//! Trade Ranking
//!
//! Bounded best-first list of trades used by both scoring directions.

use std::cmp::Ordering;

use crate::state::Trade;

/// Order trades best-first.
///
/// Less input wins; on equal input more output wins; on equal amounts the
/// shorter route wins.
pub fn compare_trades(a: &Trade, b: &Trade) -> Ordering {
    a.amount_in()
        .cmp(&b.amount_in())
        .then_with(|| b.amount_out().cmp(&a.amount_out()))
        .then_with(|| a.amount_list.len().cmp(&b.amount_list.len()))
}

/// Best-first trade list capped at `capacity` entries.
///
/// A new trade is placed ahead of the first existing trade that is not
/// strictly better than it, so a trade equal to an existing one goes in
/// front of it. Entries past the capacity are dropped.
#[derive(Debug, Clone)]
pub struct RankedTrades {
    capacity: usize,
    trades: Vec<Trade>,
}

impl RankedTrades {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            trades: Vec::with_capacity(capacity),
        }
    }

    /// Insert a trade, returning whether it made the list
    pub fn insert(&mut self, trade: Trade) -> bool {
        let position = self
            .trades
            .iter()
            .position(|existing| compare_trades(existing, &trade) != Ordering::Less)
            .unwrap_or(self.trades.len());

        if position >= self.capacity {
            return false;
        }

        self.trades.insert(position, trade);
        self.trades.truncate(self.capacity);
        true
    }

    pub fn best(&self) -> Option<&Trade> {
        self.trades.first()
    }

    pub fn len(&self) -> usize {
        self.trades.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trades.is_empty()
    }

    pub fn as_slice(&self) -> &[Trade] {
        &self.trades
    }

    pub fn into_vec(self) -> Vec<Trade> {
        self.trades
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bigdecimal::BigDecimal;
    use num_bigint::BigInt;

    fn trade(amounts: &[i64]) -> Trade {
        Trade {
            pair_list: Vec::new(),
            amount_list: amounts.iter().map(|a| BigInt::from(*a)).collect(),
            asset_list: Vec::new(),
            price_impact: BigDecimal::from(0),
        }
    }

    fn amounts(ranked: &RankedTrades) -> Vec<Vec<i64>> {
        ranked
            .as_slice()
            .iter()
            .map(|t| {
                t.amount_list
                    .iter()
                    .map(|a| i64::try_from(a).unwrap())
                    .collect()
            })
            .collect()
    }

    // -- Comparator --

    #[test]
    fn test_lower_input_ranks_first() {
        assert_eq!(compare_trades(&trade(&[90, 50]), &trade(&[100, 80])), Ordering::Less);
    }

    #[test]
    fn test_equal_input_higher_output_ranks_first() {
        assert_eq!(compare_trades(&trade(&[100, 80]), &trade(&[100, 70])), Ordering::Less);
        assert_eq!(compare_trades(&trade(&[100, 70]), &trade(&[100, 80])), Ordering::Greater);
    }

    #[test]
    fn test_equal_amounts_shorter_route_ranks_first() {
        assert_eq!(
            compare_trades(&trade(&[100, 80]), &trade(&[100, 90, 80])),
            Ordering::Less
        );
        assert_eq!(compare_trades(&trade(&[100, 80]), &trade(&[100, 80])), Ordering::Equal);
    }

    // -- Bounded insertion --

    #[test]
    fn test_insert_keeps_best_first() {
        let mut ranked = RankedTrades::new(5);
        ranked.insert(trade(&[100, 70]));
        ranked.insert(trade(&[100, 90]));
        ranked.insert(trade(&[100, 80]));
        assert_eq!(amounts(&ranked), vec![vec![100, 90], vec![100, 80], vec![100, 70]]);
        assert_eq!(ranked.best().unwrap().amount_out(), Some(&BigInt::from(90)));
    }

    #[test]
    fn test_insert_drops_worst_at_capacity() {
        let mut ranked = RankedTrades::new(2);
        assert!(ranked.insert(trade(&[100, 70])));
        assert!(ranked.insert(trade(&[100, 80])));
        assert!(!ranked.insert(trade(&[100, 60])));
        assert!(ranked.insert(trade(&[100, 90])));
        assert_eq!(amounts(&ranked), vec![vec![100, 90], vec![100, 80]]);
    }

    #[test]
    fn test_equal_trade_goes_ahead_of_existing() {
        let mut ranked = RankedTrades::new(3);
        let mut first = trade(&[100, 80]);
        first.price_impact = BigDecimal::from(1);
        ranked.insert(first);
        ranked.insert(trade(&[100, 80]));
        // The later of two equal trades sits first
        assert_eq!(ranked.as_slice()[0].price_impact, BigDecimal::from(0));
        assert_eq!(ranked.len(), 2);
    }

    #[test]
    fn test_zero_capacity_keeps_nothing() {
        let mut ranked = RankedTrades::new(0);
        assert!(!ranked.insert(trade(&[1, 1])));
        assert!(ranked.is_empty());
    }
}
