//! Core OrderBook implementation: a local replica of one symbol's depth,
//! loaded from a snapshot and advanced by sequenced depth events.

use super::book_change_event::{PriceLevelChangedEvent, PriceLevelChangedListener};
use super::config::OrderBookConfig;
use super::conversion::FillSimulator;
use super::error::OrderBookError;
use super::ladder::PriceLadder;
use super::sequence;
use super::types::{
    BookStatus, DepthEvent, DepthSnapshot, PriceLevel, PriceLevelDelta, ReplaySummary, Side,
};
use crate::utils::current_time_millis;
use std::fmt;
use tracing::{debug, info, trace, warn};

/// The OrderBook keeps a bid and an ask ladder for one symbol in step with an
/// exchange feed.
///
/// It starts unloaded. [`OrderBook::process_snapshot`] loads it, after which
/// [`OrderBook::process_event`] applies live events that continue the
/// sequence. [`OrderBook::clear`] drops all state and unloads it again.
///
/// The book has no internal locking: mutations take `&mut self` and queries
/// take `&self`, so a shared book must be serialized by its owner (see
/// [`crate::orderbook::handle::OrderBookHandle`]).
#[derive(Clone)]
pub struct OrderBook {
    /// The symbol or identifier for this order book
    pub(super) symbol: String,

    /// Sequence id through which the book is known to be correct
    pub(super) last_update_id: i64,

    /// Time of the last successful mutation, milliseconds since epoch
    pub(super) updated_at: u64,

    pub(super) config: OrderBookConfig,

    /// Bid side, highest price first
    pub(super) bids: PriceLadder,

    /// Ask side, lowest price first
    pub(super) asks: PriceLadder,

    /// Gates event application until a snapshot has been processed
    pub(super) loaded: bool,

    /// listens to price level changes. This provides a point to update a
    /// corresponding external order book e.g. in the UI
    pub price_level_changed_listener: Option<PriceLevelChangedListener>,
}

impl fmt::Debug for OrderBook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OrderBook")
            .field("symbol", &self.symbol)
            .field("last_update_id", &self.last_update_id)
            .field("updated_at", &self.updated_at)
            .field("config", &self.config)
            .field("bids", &self.bids.len())
            .field("asks", &self.asks.len())
            .field("loaded", &self.loaded)
            .finish()
    }
}

impl OrderBook {
    /// Create a new, unloaded order book retaining at most `prune_threshold`
    /// levels per side.
    ///
    /// # Errors
    /// [`OrderBookError::InvalidConfiguration`] when `prune_threshold` is zero.
    pub fn new(symbol: &str, prune_threshold: usize) -> Result<Self, OrderBookError> {
        Self::with_config(symbol, OrderBookConfig::new(prune_threshold))
    }

    /// Create a new, unloaded order book from a configuration.
    pub fn with_config(symbol: &str, config: OrderBookConfig) -> Result<Self, OrderBookError> {
        config.validate()?;
        Ok(Self {
            symbol: symbol.to_string(),
            last_update_id: 0,
            updated_at: current_time_millis(),
            config,
            bids: PriceLadder::new(Side::Bid),
            asks: PriceLadder::new(Side::Ask),
            loaded: false,
            price_level_changed_listener: None,
        })
    }

    /// Create a new order book with a price level change listener
    pub fn with_listener(
        symbol: &str,
        config: OrderBookConfig,
        listener: PriceLevelChangedListener,
    ) -> Result<Self, OrderBookError> {
        let mut book = Self::with_config(symbol, config)?;
        book.price_level_changed_listener = Some(listener);
        Ok(book)
    }

    /// Get the symbol of this order book
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Sequence id through which the book is known to be correct
    pub fn last_update_id(&self) -> i64 {
        self.last_update_id
    }

    /// Time of the last successful mutation, milliseconds since epoch
    pub fn updated_at(&self) -> u64 {
        self.updated_at
    }

    /// Maximum number of levels kept per side
    pub fn prune_threshold(&self) -> usize {
        self.config.prune_threshold
    }

    /// Configuration the book was built with
    pub fn config(&self) -> &OrderBookConfig {
        &self.config
    }

    /// Whether a snapshot has been processed since creation or the last clear
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Bid ladder, highest price first
    pub fn bids(&self) -> &PriceLadder {
        &self.bids
    }

    /// Ask ladder, lowest price first
    pub fn asks(&self) -> &PriceLadder {
        &self.asks
    }

    /// Ladder for `side`
    pub fn ladder(&self, side: Side) -> &PriceLadder {
        match side {
            Side::Bid => &self.bids,
            Side::Ask => &self.asks,
        }
    }

    /// Best bid level.
    ///
    /// # Errors
    /// [`OrderBookError::LadderEmpty`] when there are no bids.
    pub fn best_bid(&self) -> Result<&PriceLevel, OrderBookError> {
        self.bids.front()
    }

    /// Best ask level.
    ///
    /// # Errors
    /// [`OrderBookError::LadderEmpty`] when there are no asks.
    pub fn best_ask(&self) -> Result<&PriceLevel, OrderBookError> {
        self.asks.front()
    }

    /// Get the spread (best ask - best bid) in fixed-point price units
    pub fn spread(&self) -> Option<i64> {
        match (self.bids.front(), self.asks.front()) {
            (Ok(bid), Ok(ask)) => Some(ask.price.saturating_sub(bid.price)),
            _ => None,
        }
    }

    /// Health view of the book
    pub fn status(&self) -> BookStatus {
        BookStatus {
            symbol: self.symbol.clone(),
            loaded: self.loaded,
            last_update_id: self.last_update_id,
            updated_at: self.updated_at,
            bid_levels: self.bids.len(),
            ask_levels: self.asks.len(),
        }
    }

    /// Depth-weighted queries over the current ladders
    pub fn simulator(&self) -> FillSimulator<'_> {
        FillSimulator::new(self)
    }

    /// Load the book from `snapshot`, then replay `buffered` events that were
    /// collected from the live feed while the snapshot was being fetched.
    ///
    /// Snapshot levels are applied as absolute sizes on top of the current
    /// ladders; call [`OrderBook::clear`] first for a full resync. Buffered
    /// events already covered by the snapshot are skipped whole, the rest are
    /// applied in the order given and advance the cursor. The book is marked
    /// loaded even if `buffered` is empty.
    pub fn process_snapshot(
        &mut self,
        snapshot: &DepthSnapshot,
        buffered: &[DepthEvent],
    ) -> ReplaySummary {
        self.updated_at = current_time_millis();
        self.last_update_id = snapshot.last_update_id;

        for ask in &snapshot.asks {
            self.asks.update_or_insert(ask.price, ask.size);
        }
        for bid in &snapshot.bids {
            self.bids.update_or_insert(bid.price, bid.size);
        }

        let mut summary = ReplaySummary::default();
        for event in buffered {
            if sequence::is_stale(self.last_update_id, event) {
                trace!(
                    "Order book {}: skipping buffered event {}..={} behind snapshot cursor {}",
                    self.symbol, event.first_update_id, event.final_update_id, self.last_update_id
                );
                summary.skipped += 1;
                continue;
            }

            self.apply_deltas(Side::Ask, &event.asks);
            self.apply_deltas(Side::Bid, &event.bids);
            self.last_update_id = event.final_update_id;
            summary.applied += 1;
        }

        self.loaded = true;
        info!(
            "Order book {}: loaded snapshot at {} ({} bids, {} asks), replayed {}, skipped {}",
            self.symbol,
            self.last_update_id,
            self.bids.len(),
            self.asks.len(),
            summary.applied,
            summary.skipped
        );
        summary
    }

    /// Apply one live depth event.
    ///
    /// The event must continue the sequence: its range has to contain
    /// `last_update_id + 1`. Validation happens before any mutation, so on
    /// error the book is unchanged. On success the cursor advances to the
    /// event's final id, ask deltas then bid deltas are applied, and both
    /// ladders are pruned to the configured threshold.
    ///
    /// # Errors
    /// - [`OrderBookError::EngineNotLoaded`] before the first snapshot.
    /// - [`OrderBookError::StaleEvent`] for an event wholly behind the cursor.
    /// - [`OrderBookError::SequenceGap`] when updates were skipped; the book
    ///   needs a fresh snapshot.
    pub fn process_event(&mut self, event: &DepthEvent) -> Result<(), OrderBookError> {
        if !self.loaded {
            return Err(OrderBookError::EngineNotLoaded {
                symbol: self.symbol.clone(),
            });
        }

        if let Err(err) = sequence::validate_continuity(&self.symbol, self.last_update_id, event)
        {
            warn!("Order book {}: rejected event: {}", self.symbol, err);
            return Err(err);
        }

        self.updated_at = current_time_millis();
        self.last_update_id = event.final_update_id;

        self.apply_deltas(Side::Ask, &event.asks);
        self.apply_deltas(Side::Bid, &event.bids);

        let threshold = self.config.prune_threshold;
        let pruned = self.asks.prune(threshold) + self.bids.prune(threshold);

        trace!(
            "Order book {}: applied event {}..={} ({} ask deltas, {} bid deltas, {} levels pruned)",
            self.symbol,
            event.first_update_id,
            event.final_update_id,
            event.asks.len(),
            event.bids.len(),
            pruned
        );
        Ok(())
    }

    /// Drop both ladders, reset the cursor and mark the book unloaded so the
    /// next event is refused until a new snapshot arrives.
    pub fn clear(&mut self) {
        self.last_update_id = 0;
        self.bids = PriceLadder::new(Side::Bid);
        self.asks = PriceLadder::new(Side::Ask);
        self.updated_at = current_time_millis();
        self.loaded = false;
        info!("Order book {}: cleared", self.symbol);
    }

    /// Export the current ladders as a snapshot tagged with the cursor
    pub fn to_snapshot(&self) -> DepthSnapshot {
        DepthSnapshot {
            last_update_id: self.last_update_id,
            bids: self.bids.levels().to_vec(),
            asks: self.asks.levels().to_vec(),
        }
    }

    /// Serialize the current ladders as a JSON snapshot
    pub fn snapshot_to_json(&self) -> Result<String, OrderBookError> {
        Ok(serde_json::to_string(&self.to_snapshot())?)
    }

    fn apply_deltas(&mut self, side: Side, deltas: &[PriceLevelDelta]) {
        for delta in deltas {
            let ladder = match side {
                Side::Bid => &mut self.bids,
                Side::Ask => &mut self.asks,
            };

            let size = if delta.delete {
                if let Err(err) = ladder.remove(delta.price) {
                    // The exchange may delete a level this replica never held.
                    debug!("Order book {}: {}", self.symbol, err);
                    continue;
                }
                0
            } else {
                ladder.update_or_insert(delta.price, delta.size);
                delta.size
            };

            if let Some(listener) = &self.price_level_changed_listener {
                listener(PriceLevelChangedEvent {
                    side,
                    price: delta.price,
                    size,
                });
            }
        }
    }
}
