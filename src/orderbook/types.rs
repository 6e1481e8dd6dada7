//! Market data values consumed and produced by the order book.
//!
//! Prices and sizes are fixed-point integers (see [`crate::orderbook::fixed_point`]
//! for the scales). Nothing in here parses strings: an external codec hands
//! the book already-decoded values.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Side of the book a ladder or a level belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// Buy side, best (highest) price first
    Bid,
    /// Sell side, best (lowest) price first
    Ask,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Bid => write!(f, "bid"),
            Side::Ask => write!(f, "ask"),
        }
    }
}

/// One resting quantity at one price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceLevel {
    /// Price, scale 10^-8
    pub price: i64,
    /// Size, scale 10^-6
    pub size: i64,
}

impl PriceLevel {
    /// Create a level
    pub fn new(price: i64, size: i64) -> Self {
        Self { price, size }
    }
}

/// An incremental change to one price level carried by a [`DepthEvent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceLevelDelta {
    /// Price of the level being changed
    pub price: i64,
    /// New absolute size, ignored when `delete` is set
    pub size: i64,
    /// Remove the level instead of setting its size
    #[serde(default)]
    pub delete: bool,
}

impl PriceLevelDelta {
    /// A delta that sets the level at `price` to `size`
    pub fn update(price: i64, size: i64) -> Self {
        Self {
            price,
            size,
            delete: false,
        }
    }

    /// A delta that removes the level at `price`
    pub fn delete(price: i64) -> Self {
        Self {
            price,
            size: 0,
            delete: true,
        }
    }
}

/// A full point-in-time book state tagged with its sequence cursor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepthSnapshot {
    /// Sequence id through which this snapshot is correct
    #[serde(rename = "lastUpdateId")]
    pub last_update_id: i64,
    /// Absolute bid levels
    pub bids: Vec<PriceLevel>,
    /// Absolute ask levels
    pub asks: Vec<PriceLevel>,
}

/// An incremental diff of the book tagged with the sequence range it covers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepthEvent {
    /// Symbol the event was published for
    pub symbol: String,
    /// First update id covered by this event
    #[serde(rename = "firstUpdateId")]
    pub first_update_id: i64,
    /// Last update id covered by this event
    #[serde(rename = "finalUpdateId")]
    pub final_update_id: i64,
    /// Bid deltas
    pub bids: Vec<PriceLevelDelta>,
    /// Ask deltas
    pub asks: Vec<PriceLevelDelta>,
    /// Event time, milliseconds since epoch
    pub timestamp: u64,
}

/// Health view of a book used to drive resync decisions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookStatus {
    /// Symbol of the book
    pub symbol: String,
    /// Whether a snapshot has been processed since creation or the last clear
    pub loaded: bool,
    /// Current sequence cursor
    pub last_update_id: i64,
    /// Time of the last successful mutation, milliseconds since epoch
    pub updated_at: u64,
    /// Number of bid levels
    pub bid_levels: usize,
    /// Number of ask levels
    pub ask_levels: usize,
}

/// Outcome of replaying buffered events on top of a snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplaySummary {
    /// Buffered events that were applied
    pub applied: usize,
    /// Buffered events skipped because the snapshot already covers them
    pub skipped: usize,
}
