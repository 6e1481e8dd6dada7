//! OrderBook replica: price ladders, snapshot/event reconciliation and fill simulation.

pub mod book;
/// Order book configuration.
pub mod config;
/// Depth-weighted fill simulation queries.
pub mod conversion;
pub mod error;
/// Fixed-point scales and decimal shifts.
pub mod fixed_point;
/// Single-writer task owning one order book.
pub mod handle;
/// Ordered price levels for one side of the book.
pub mod ladder;
/// Sequence continuity checks for depth events.
pub mod sequence;
/// Snapshot, event and level value types.
pub mod types;

/// Price level change events for real-time order book updates.
pub mod book_change_event;
mod tests;

pub use book::OrderBook;
pub use book_change_event::{PriceLevelChangedEvent, PriceLevelChangedListener};
pub use config::{DEFAULT_PRUNE_THRESHOLD, OrderBookConfig};
pub use conversion::FillSimulator;
pub use error::OrderBookError;
pub use handle::OrderBookHandle;
pub use ladder::{LadderOrder, PriceLadder};
pub use types::{
    BookStatus, DepthEvent, DepthSnapshot, PriceLevel, PriceLevelDelta, ReplaySummary, Side,
};
