// demos/src/bin/level_listener.rs
//
// This demo attaches a price level change listener to a book and forwards
// every change over a channel, the way a downstream publisher would.
// It finishes by exporting the book as a JSON snapshot.
//
// Run this demo with:
//   cargo run --bin level_listener
//   (from the demos directory)

use depthbook::prelude::*;
use std::sync::{Arc, mpsc};
use tracing::{info, warn};

const PRICE_ONE: i64 = 100_000_000;
const SIZE_ONE: i64 = 1_000_000;

fn main() {
    tracing_subscriber::fmt::init();
    info!("Level Listener Demo");

    let (sender, receiver) = mpsc::channel::<PriceLevelChangedEvent>();
    let listener: PriceLevelChangedListener = Arc::new(move |event: PriceLevelChangedEvent| {
        // Receiver outlives the book in this demo
        let _ = sender.send(event);
    });

    let mut book = match OrderBook::with_listener("SOLUSDT", OrderBookConfig::new(10), listener) {
        Ok(book) => book,
        Err(err) => {
            warn!("could not create book: {}", err);
            return;
        }
    };

    book.process_snapshot(
        &DepthSnapshot {
            last_update_id: 100,
            bids: vec![PriceLevel::new(150 * PRICE_ONE, 10 * SIZE_ONE)],
            asks: vec![PriceLevel::new(151 * PRICE_ONE, 10 * SIZE_ONE)],
        },
        &[],
    );

    let event = DepthEvent {
        symbol: "SOLUSDT".to_string(),
        first_update_id: 101,
        final_update_id: 102,
        bids: vec![
            PriceLevelDelta::update(150 * PRICE_ONE, 4 * SIZE_ONE),
            PriceLevelDelta::update(149 * PRICE_ONE, 7 * SIZE_ONE),
        ],
        asks: vec![
            PriceLevelDelta::delete(151 * PRICE_ONE),
            PriceLevelDelta::delete(155 * PRICE_ONE),
            PriceLevelDelta::update(152 * PRICE_ONE, 3 * SIZE_ONE),
        ],
        timestamp: current_time_millis(),
    };
    if let Err(err) = book.process_event(&event) {
        warn!("event rejected: {}", err);
        return;
    }

    for change in receiver.try_iter() {
        match serde_json::to_string(&change) {
            Ok(json) => info!("Level changed: {}", json),
            Err(err) => warn!("could not encode change: {}", err),
        }
    }

    match book.snapshot_to_json() {
        Ok(json) => info!("Snapshot: {}", json),
        Err(err) => warn!("Export failed: {}", err),
    }
}
