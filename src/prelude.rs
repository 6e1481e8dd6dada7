/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! Prelude module that re-exports commonly used types and traits.
//!
//! This module provides a convenient way to import the most commonly used
//! types and functions from the depthbook crate. Instead of importing each
//! type individually, you can use:
//!
//! ```rust
//! use depthbook::prelude::*;
//! ```

// Core order book types
pub use crate::orderbook::{OrderBook, OrderBookConfig, OrderBookError};

// Ladder types
pub use crate::orderbook::ladder::{LadderOrder, PriceLadder};

// Feed input and status types
pub use crate::orderbook::types::{
    BookStatus, DepthEvent, DepthSnapshot, PriceLevel, PriceLevelDelta, ReplaySummary, Side,
};

// Queries
pub use crate::orderbook::conversion::FillSimulator;

// Change notifications
pub use crate::orderbook::book_change_event::{PriceLevelChangedEvent, PriceLevelChangedListener};

// Task ownership
pub use crate::orderbook::handle::OrderBookHandle;

// Fixed-point helpers
pub use crate::orderbook::fixed_point::{
    PERCENTAGE_SCALE, PRICE_SCALE, SIZE_SCALE, price_to_decimal, size_to_decimal,
};

// Utility functions
pub use crate::utils::current_time_millis;

pub use rust_decimal::Decimal;
