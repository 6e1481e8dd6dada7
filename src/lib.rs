//! # Local Order Book Replica
//!
//! A consistent, in-memory copy of an exchange's limit order book for one
//! trading symbol. The book is built from a point-in-time depth snapshot and
//! kept current by a continuous stream of incremental depth events, and it
//! answers the depth-weighted questions that market makers, execution
//! algorithms and backtests ask of it.
//!
//! ## Key Features
//!
//! - **Price Ladders**: Each side is a strictly ordered sequence of price
//!   levels (bids descending, asks ascending) with in-place size updates,
//!   ordered insertion, removal and truncation.
//!
//! - **Snapshot Reconciliation**: A snapshot plus the events buffered while it
//!   was being fetched are merged into a consistent baseline; buffered events
//!   already covered by the snapshot are skipped.
//!
//! - **Gap Detection**: Live events are accepted only when their update range
//!   continues the book's cursor. Stale events and gaps are rejected before any
//!   mutation, leaving the book untouched so the caller can resync.
//!
//! - **Bounded Memory**: After every event both sides are pruned to a
//!   configured number of levels nearest the best price.
//!
//! - **Fill Simulation**: Quote/base conversions walked against current depth,
//!   market (mid) price, best prices and depth requirements, computed with
//!   exact decimals.
//!
//! - **Single Writer**: The book is a plain owned value; [`OrderBookHandle`]
//!   moves it into a Tokio task that serializes ingestion and queries.
//!
//! ## Fixed-Point Values
//!
//! Prices carry 8 implied decimals and sizes carry 6, as delivered by the feed
//! codec. See [`orderbook::fixed_point`].
//!
//! ## Example
//!
//! ```rust
//! use depthbook::prelude::*;
//!
//! let mut book = OrderBook::new("BTCUSDT", 100).expect("valid config");
//!
//! let snapshot = DepthSnapshot {
//!     last_update_id: 1000,
//!     bids: vec![PriceLevel::new(2_000_000_000_000, 1_500_000)],
//!     asks: vec![PriceLevel::new(2_000_100_000_000, 2_000_000)],
//! };
//! book.process_snapshot(&snapshot, &[]);
//!
//! let event = DepthEvent {
//!     symbol: "BTCUSDT".to_string(),
//!     first_update_id: 1001,
//!     final_update_id: 1003,
//!     bids: vec![PriceLevelDelta::update(1_999_900_000_000, 4_000_000)],
//!     asks: vec![],
//!     timestamp: 0,
//! };
//! book.process_event(&event).expect("event continues the sequence");
//!
//! assert_eq!(book.last_update_id(), 1003);
//! assert_eq!(book.bids().len(), 2);
//!
//! let mid = book.simulator().market_price().expect("both sides present");
//! assert_eq!(mid, Decimal::new(2_000_050_000_000, 8));
//! ```

pub mod orderbook;

pub mod prelude;
mod utils;

pub use orderbook::book_change_event::{PriceLevelChangedEvent, PriceLevelChangedListener};
pub use orderbook::conversion::FillSimulator;
pub use orderbook::handle::OrderBookHandle;
pub use orderbook::ladder::{LadderOrder, PriceLadder};
pub use orderbook::types::{
    BookStatus, DepthEvent, DepthSnapshot, PriceLevel, PriceLevelDelta, ReplaySummary, Side,
};
pub use orderbook::{OrderBook, OrderBookConfig, OrderBookError};
pub use utils::current_time_millis;
