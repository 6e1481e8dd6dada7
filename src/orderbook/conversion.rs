//! Depth-weighted fill simulation over a loaded book.
//!
//! Every conversion walks one ladder from the best price outward, consuming
//! whole levels until the remaining amount fits inside a level, which is then
//! filled partially. Prices and sizes are shifted into [`Decimal`] using the
//! fixed-point scales, so results are exact decimal amounts.

use super::book::OrderBook;
use super::error::OrderBookError;
use super::fixed_point::{price_to_decimal, size_to_decimal};
use super::ladder::PriceLadder;
use super::types::Side;
use rust_decimal::Decimal;
use tracing::trace;

/// Which quantity of a level the remaining amount is measured in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Measure {
    /// Amount is in quote currency: compare against `size * price`,
    /// collect base size
    Notional,
    /// Amount is in base currency: compare against `size`, collect quote
    /// notional
    Size,
}

/// Stateless query layer over an [`OrderBook`]'s ladders.
///
/// Holds a shared borrow of the book, so the ladders cannot change while a
/// simulator is alive.
#[derive(Debug, Clone, Copy)]
pub struct FillSimulator<'a> {
    book: &'a OrderBook,
}

impl<'a> FillSimulator<'a> {
    /// Create a simulator over `book`
    pub fn new(book: &'a OrderBook) -> Self {
        Self { book }
    }

    fn ensure_loaded(&self) -> Result<(), OrderBookError> {
        if !self.book.is_loaded() {
            return Err(OrderBookError::EngineNotLoaded {
                symbol: self.book.symbol().to_string(),
            });
        }
        Ok(())
    }

    /// The ladder for `side`, provided the book is loaded and the side has
    /// at least one level.
    fn populated_ladder(&self, side: Side) -> Result<&'a PriceLadder, OrderBookError> {
        self.ensure_loaded()?;
        let ladder = self.book.ladder(side);
        if ladder.is_empty() {
            return Err(OrderBookError::MissingSide { side });
        }
        Ok(ladder)
    }

    fn walk(
        &self,
        side: Side,
        amount: Decimal,
        measure: Measure,
    ) -> Result<Decimal, OrderBookError> {
        if amount.is_zero() {
            return Ok(Decimal::ZERO);
        }
        if amount.is_sign_negative() {
            return Err(OrderBookError::InvalidAmount { amount });
        }

        let ladder = self.populated_ladder(side)?;
        let overflow = || OrderBookError::ArithmeticOverflow { side };
        let mut remaining = amount;
        let mut converted = Decimal::ZERO;

        for level in ladder {
            let price = price_to_decimal(level.price);
            let size = size_to_decimal(level.size);
            let notional = size.checked_mul(price).ok_or_else(overflow)?;

            let (capacity, proceeds) = match measure {
                Measure::Notional => (notional, size),
                Measure::Size => (size, notional),
            };

            if capacity < remaining {
                remaining = remaining.checked_sub(capacity).ok_or_else(overflow)?;
                converted = converted.checked_add(proceeds).ok_or_else(overflow)?;
                continue;
            }

            let last_fill = match measure {
                Measure::Notional => remaining.checked_div(price),
                Measure::Size => remaining.checked_mul(price),
            }
            .ok_or_else(overflow)?;
            let result = converted.checked_add(last_fill).ok_or_else(overflow)?;
            trace!(
                "{} {} conversion of {} through {}: {}",
                self.book.symbol(),
                side,
                amount,
                level.price,
                result
            );
            return Ok(result);
        }

        Err(OrderBookError::ShallowDepth {
            side,
            requested: amount,
            unfilled: remaining,
        })
    }

    /// Spend `amount` of quote currency against the asks, returning the base
    /// amount received.
    ///
    /// # Errors
    /// [`OrderBookError::ShallowDepth`] when the asks cannot absorb `amount`,
    /// [`OrderBookError::ArithmeticOverflow`] when an intermediate amount
    /// leaves the decimal range.
    pub fn ask_conversion(&self, amount: Decimal) -> Result<Decimal, OrderBookError> {
        self.walk(Side::Ask, amount, Measure::Notional)
    }

    /// Sell `amount` of base currency into the bids, returning the quote
    /// amount received.
    pub fn bid_conversion(&self, amount: Decimal) -> Result<Decimal, OrderBookError> {
        self.walk(Side::Bid, amount, Measure::Size)
    }

    /// Quote currency needed to buy `amount` of base from the asks.
    pub fn ask_reverse_conversion(&self, amount: Decimal) -> Result<Decimal, OrderBookError> {
        self.walk(Side::Ask, amount, Measure::Size)
    }

    /// Base currency to sell into the bids to raise `amount` of quote.
    pub fn bid_reverse_conversion(&self, amount: Decimal) -> Result<Decimal, OrderBookError> {
        self.walk(Side::Bid, amount, Measure::Notional)
    }

    /// Number of ask levels a buy of `amount` needs, given the best ask must
    /// not exceed `max_price`. Returns 0 when the best ask is above
    /// `max_price`.
    pub fn buy_depth_requirement(
        &self,
        max_price: Decimal,
        amount: Decimal,
    ) -> Result<usize, OrderBookError> {
        self.depth_requirement(Side::Ask, max_price, amount)
    }

    /// Number of bid levels a sell of `amount` needs, given the best bid must
    /// not be below `min_price`. Returns 0 when the best bid is under
    /// `min_price`.
    pub fn sell_depth_requirement(
        &self,
        min_price: Decimal,
        amount: Decimal,
    ) -> Result<usize, OrderBookError> {
        self.depth_requirement(Side::Bid, min_price, amount)
    }

    fn depth_requirement(
        &self,
        side: Side,
        limit: Decimal,
        amount: Decimal,
    ) -> Result<usize, OrderBookError> {
        let ladder = self.populated_ladder(side)?;
        let mut exchanged = Decimal::ZERO;
        let mut depth = 0;

        for level in ladder {
            let price = price_to_decimal(level.price);
            let size = size_to_decimal(level.size);

            if depth == 0 {
                let out_of_range = match side {
                    Side::Ask => price > limit,
                    Side::Bid => price < limit,
                };
                if out_of_range {
                    return Ok(0);
                }
            }

            // Cumulative size is measured against the level's own size, not
            // against `amount`.
            exchanged = exchanged
                .checked_add(size)
                .ok_or(OrderBookError::ArithmeticOverflow { side })?;
            if exchanged >= size {
                trace!(
                    "{} {} depth requirement for {} at limit {}: {}",
                    self.book.symbol(),
                    side,
                    amount,
                    limit,
                    depth + 1
                );
                return Ok(depth + 1);
            }

            depth += 1;
        }

        Ok(depth)
    }

    /// Midpoint of the best bid and best ask.
    ///
    /// # Errors
    /// [`OrderBookError::MissingSide`] naming the first empty side, asks
    /// checked first.
    pub fn market_price(&self) -> Result<Decimal, OrderBookError> {
        let ask = self.populated_ladder(Side::Ask)?.front()?;
        let bid = self.populated_ladder(Side::Bid)?.front()?;
        Ok((price_to_decimal(ask.price) + price_to_decimal(bid.price)) / Decimal::TWO)
    }

    /// Best ask price.
    ///
    /// # Errors
    /// [`OrderBookError::LadderEmpty`] when there are no asks.
    pub fn first_ask_price(&self) -> Result<Decimal, OrderBookError> {
        self.ensure_loaded()?;
        Ok(price_to_decimal(self.book.asks().front()?.price))
    }

    /// Best bid price.
    ///
    /// # Errors
    /// [`OrderBookError::LadderEmpty`] when there are no bids.
    pub fn first_bid_price(&self) -> Result<Decimal, OrderBookError> {
        self.ensure_loaded()?;
        Ok(price_to_decimal(self.book.bids().front()?.price))
    }
}
