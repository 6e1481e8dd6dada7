use super::types::Side;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Event data for order book price level changes.
/// It is assumed that the listener is aware of the
/// order book context so we are not adding symbol here.
/// This event is sent once for every delta a depth event applies,
/// including deltas replayed while loading a snapshot
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PriceLevelChangedEvent {
    /// the order book side of the price level
    pub side: Side,

    /// price level price
    pub price: i64,

    /// latest size at this price level, zero once the level is removed
    pub size: i64,
}

/// A thread-safe listener callback for price level change events.
///
/// This type alias represents a function that will be called whenever
/// a depth delta updates, inserts or removes a price level.
pub type PriceLevelChangedListener = Arc<dyn Fn(PriceLevelChangedEvent) + Send + Sync>;
