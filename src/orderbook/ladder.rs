//! Price ladder: the ordered price levels of one side of the book.
//!
//! Levels live in a `Vec` kept sorted from the best price (index 0, the head)
//! to the worst price (the tail). Position lookups are a binary search; an
//! insertion shifts the tail by one slot. A price never changes for the
//! lifetime of a level, which is what makes in-place size updates safe.

use super::error::OrderBookError;
use super::types::{PriceLevel, Side};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use tracing::trace;

/// Direction in which a ladder orders its prices, head first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LadderOrder {
    /// Lowest price first (asks)
    Ascending,
    /// Highest price first (bids)
    Descending,
}

impl LadderOrder {
    /// Ordering of `price` relative to `other` in ladder position:
    /// `Less` means `price` sits closer to the head.
    #[inline]
    pub fn compare(self, price: i64, other: i64) -> Ordering {
        match self {
            LadderOrder::Ascending => price.cmp(&other),
            LadderOrder::Descending => other.cmp(&price),
        }
    }
}

impl From<Side> for LadderOrder {
    fn from(side: Side) -> Self {
        match side {
            Side::Bid => LadderOrder::Descending,
            Side::Ask => LadderOrder::Ascending,
        }
    }
}

/// Ordered sequence of price levels for one side of the book.
///
/// Invariants after every public call: prices are strictly monotonic in the
/// side's direction and no two levels share a price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PriceLadder {
    side: Side,
    order: LadderOrder,
    levels: Vec<PriceLevel>,
}

impl PriceLadder {
    /// Create an empty ladder ordered for `side`
    pub fn new(side: Side) -> Self {
        Self {
            side,
            order: LadderOrder::from(side),
            levels: Vec::new(),
        }
    }

    /// Create an empty ladder with room for `capacity` levels
    pub fn with_capacity(side: Side, capacity: usize) -> Self {
        Self {
            side,
            order: LadderOrder::from(side),
            levels: Vec::with_capacity(capacity),
        }
    }

    /// Side this ladder belongs to
    pub fn side(&self) -> Side {
        self.side
    }

    /// Ordering direction of this ladder
    pub fn order(&self) -> LadderOrder {
        self.order
    }

    #[inline]
    fn position(&self, price: i64) -> Result<usize, usize> {
        let order = self.order;
        self.levels
            .binary_search_by(|level| order.compare(level.price, price))
    }

    /// Set the size of the level at `price`, inserting a new level at its
    /// ordered position when none exists.
    ///
    /// An existing level keeps its position. Returns `true` when a new level
    /// was inserted.
    pub fn update_or_insert(&mut self, price: i64, size: i64) -> bool {
        let (index, inserted) = match self.position(price) {
            Ok(index) => {
                self.levels[index].size = size;
                (index, false)
            }
            Err(index) => {
                self.levels.insert(index, PriceLevel::new(price, size));
                (index, true)
            }
        };
        trace!(
            "{} ladder: {} level {} size {} (len {})",
            self.side,
            if inserted { "inserted" } else { "updated" },
            price,
            size,
            self.levels.len()
        );
        debug_assert!(self.is_ordered_around(index));
        inserted
    }

    /// Remove the level at `price`, returning it.
    ///
    /// # Errors
    /// [`OrderBookError::LadderEmpty`] when the ladder has no levels,
    /// [`OrderBookError::PriceNotFound`] when `price` has no level.
    pub fn remove(&mut self, price: i64) -> Result<PriceLevel, OrderBookError> {
        if self.levels.is_empty() {
            return Err(OrderBookError::LadderEmpty { side: self.side });
        }
        match self.position(price) {
            Ok(index) => {
                let removed = self.levels.remove(index);
                trace!(
                    "{} ladder: removed level {} (len {})",
                    self.side,
                    price,
                    self.levels.len()
                );
                Ok(removed)
            }
            Err(_) => Err(OrderBookError::PriceNotFound {
                side: self.side,
                price,
            }),
        }
    }

    /// Keep only the `depth` levels nearest the best price.
    ///
    /// Returns the number of discarded levels. A `depth` of zero is not a
    /// meaningful depth and leaves the ladder unchanged.
    pub fn prune(&mut self, depth: usize) -> usize {
        if depth == 0 || self.levels.len() <= depth {
            return 0;
        }
        let discarded = self.levels.len() - depth;
        self.levels.truncate(depth);
        trace!(
            "{} ladder: pruned {} levels beyond depth {}",
            self.side, discarded, depth
        );
        discarded
    }

    /// Best level (the head).
    ///
    /// # Errors
    /// [`OrderBookError::LadderEmpty`] when the ladder has no levels.
    pub fn front(&self) -> Result<&PriceLevel, OrderBookError> {
        self.levels
            .first()
            .ok_or(OrderBookError::LadderEmpty { side: self.side })
    }

    /// Worst level (the tail).
    ///
    /// # Errors
    /// [`OrderBookError::LadderEmpty`] when the ladder has no levels.
    pub fn last(&self) -> Result<&PriceLevel, OrderBookError> {
        self.levels
            .last()
            .ok_or(OrderBookError::LadderEmpty { side: self.side })
    }

    /// Remove and return the best level.
    pub fn pop_front(&mut self) -> Result<PriceLevel, OrderBookError> {
        if self.levels.is_empty() {
            return Err(OrderBookError::LadderEmpty { side: self.side });
        }
        Ok(self.levels.remove(0))
    }

    /// Remove and return the worst level.
    pub fn pop_back(&mut self) -> Result<PriceLevel, OrderBookError> {
        self.levels
            .pop()
            .ok_or(OrderBookError::LadderEmpty { side: self.side })
    }

    /// Level resting at `price`, if any
    pub fn get(&self, price: i64) -> Option<&PriceLevel> {
        self.position(price).ok().map(|index| &self.levels[index])
    }

    /// Number of levels
    #[inline]
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    /// Whether the ladder has no levels
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Levels from best to worst
    pub fn levels(&self) -> &[PriceLevel] {
        &self.levels
    }

    /// Iterate levels from best to worst
    pub fn iter(&self) -> std::slice::Iter<'_, PriceLevel> {
        self.levels.iter()
    }

    /// Sum of all level sizes
    pub fn total_size(&self) -> i128 {
        self.levels.iter().map(|level| i128::from(level.size)).sum()
    }

    /// Drop every level
    pub fn clear(&mut self) {
        self.levels.clear();
    }

    /// Whether the level at `index` sits strictly between its neighbours
    fn is_ordered_around(&self, index: usize) -> bool {
        let start = index.saturating_sub(1);
        let end = (index + 2).min(self.levels.len());
        self.levels[start..end]
            .windows(2)
            .all(|pair| self.order.compare(pair[0].price, pair[1].price) == Ordering::Less)
    }
}

impl<'a> IntoIterator for &'a PriceLadder {
    type Item = &'a PriceLevel;
    type IntoIter = std::slice::Iter<'a, PriceLevel>;

    fn into_iter(self) -> Self::IntoIter {
        self.levels.iter()
    }
}
