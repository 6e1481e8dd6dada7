//! Builders shared by the unit tests.

use crate::orderbook::types::{DepthEvent, DepthSnapshot, PriceLevel, PriceLevelDelta};

/// Snapshot from `(price, size)` pairs
#[allow(dead_code)]
pub fn snapshot(last_update_id: i64, bids: &[(i64, i64)], asks: &[(i64, i64)]) -> DepthSnapshot {
    DepthSnapshot {
        last_update_id,
        bids: bids.iter().map(|&(p, s)| PriceLevel::new(p, s)).collect(),
        asks: asks.iter().map(|&(p, s)| PriceLevel::new(p, s)).collect(),
    }
}

/// Event covering `first..=last` with the given deltas
#[allow(dead_code)]
pub fn event(
    first: i64,
    last: i64,
    bids: Vec<PriceLevelDelta>,
    asks: Vec<PriceLevelDelta>,
) -> DepthEvent {
    DepthEvent {
        symbol: "TEST".to_string(),
        first_update_id: first,
        final_update_id: last,
        bids,
        asks,
        timestamp: 0,
    }
}

/// Prices of a level slice, best first
#[allow(dead_code)]
pub fn prices(levels: &[PriceLevel]) -> Vec<i64> {
    levels.iter().map(|level| level.price).collect()
}
