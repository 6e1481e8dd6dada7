//! Order book error types

use super::types::Side;
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that can occur within the OrderBook, its ladders and its queries.
///
/// Every variant is a recoverable, reported result. Rejected events leave the
/// book untouched, so the only recovery a caller ever needs is to drop the
/// event or fetch a fresh snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum OrderBookError {
    /// Query or removal on a ladder with no levels
    #[error("{side} ladder is empty")]
    LadderEmpty {
        /// Side of the empty ladder
        side: Side,
    },

    /// Removal of a price that has no level in the ladder
    #[error("price {price} not found on {side} ladder")]
    PriceNotFound {
        /// Side of the ladder
        side: Side,
        /// The price that was requested
        price: i64,
    },

    /// Event or query issued before the first snapshot was processed
    #[error("order book for {symbol} is not loaded")]
    EngineNotLoaded {
        /// Symbol of the book
        symbol: String,
    },

    /// Event range lies entirely behind the current cursor
    #[error(
        "stale event for {symbol}: final update id {final_update_id} <= last update id {last_update_id}"
    )]
    StaleEvent {
        /// Symbol of the book
        symbol: String,
        /// Final update id carried by the event
        final_update_id: i64,
        /// Cursor of the book when the event arrived
        last_update_id: i64,
    },

    /// Event range starts strictly ahead of the cursor, some updates were lost
    #[error("sequence gap for {symbol}: expected update id {expected}, event starts at {first_update_id}")]
    SequenceGap {
        /// Symbol of the book
        symbol: String,
        /// The next update id the book needed (`last_update_id + 1`)
        expected: i64,
        /// First update id carried by the event
        first_update_id: i64,
    },

    /// Conversion query exceeds the liquidity resting on the walked side
    #[error("too shallow {side} depth to fill order: requested {requested}, unfilled {unfilled}")]
    ShallowDepth {
        /// Side that was walked
        side: Side,
        /// Amount the caller asked to convert
        requested: Decimal,
        /// Amount left over after every level was consumed
        unfilled: Decimal,
    },

    /// Walking the side produced an amount outside the decimal range
    #[error("arithmetic overflow while walking {side} depth")]
    ArithmeticOverflow {
        /// Side that was walked
        side: Side,
    },

    /// A side required by the query has no levels
    #[error("missing {side} side for order book query")]
    MissingSide {
        /// The side with no levels
        side: Side,
    },

    /// Conversion input that cannot describe an order
    #[error("invalid amount: {amount}")]
    InvalidAmount {
        /// The rejected amount
        amount: Decimal,
    },

    /// Configuration rejected by validation
    #[error("invalid configuration: {message}")]
    InvalidConfiguration {
        /// Description of the problem
        message: String,
    },

    /// Error while serializing book state
    #[error("serialization error: {message}")]
    SerializationError {
        /// Underlying error message
        message: String,
    },

    /// The task owning the book has stopped
    #[error("order book task for {symbol} is closed")]
    HandleClosed {
        /// Symbol of the book
        symbol: String,
    },
}

impl OrderBookError {
    /// Returns `true` when the error means the book can no longer be trusted
    /// and a fresh snapshot is required.
    pub fn requires_resync(&self) -> bool {
        matches!(self, OrderBookError::SequenceGap { .. })
    }
}

impl From<serde_json::Error> for OrderBookError {
    #[cold]
    fn from(err: serde_json::Error) -> Self {
        OrderBookError::SerializationError {
            message: err.to_string(),
        }
    }
}
