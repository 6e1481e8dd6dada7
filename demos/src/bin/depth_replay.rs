// demos/src/bin/depth_replay.rs
//
// This demo walks through the lifecycle of a local book replica:
// - loading a snapshot together with events buffered during the fetch
// - applying a live stream with gap detection
// - clearing and resyncing after a gap
//
// Run this demo with:
//   cargo run --bin depth_replay
//   (from the demos directory)

use depthbook::prelude::*;
use tracing::{info, warn};

const PRICE_ONE: i64 = 100_000_000;
const SIZE_ONE: i64 = 1_000_000;

fn main() {
    tracing_subscriber::fmt::init();
    info!("Depth Replay Demo");

    let mut book = match OrderBook::new("BTCUSDT", 20) {
        Ok(book) => book,
        Err(err) => {
            warn!("could not create book: {}", err);
            return;
        }
    };

    let snapshot = DepthSnapshot {
        last_update_id: 500,
        bids: (0..10)
            .map(|i| PriceLevel::new((64_000 - i) * PRICE_ONE, (i + 1) * SIZE_ONE))
            .collect(),
        asks: (0..10)
            .map(|i| PriceLevel::new((64_001 + i) * PRICE_ONE, (i + 1) * SIZE_ONE))
            .collect(),
    };

    // The first one was already folded into the snapshot
    let buffered = vec![
        event(490, 500, vec![], vec![]),
        event(
            501,
            503,
            vec![PriceLevelDelta::update(64_000 * PRICE_ONE, 3 * SIZE_ONE)],
            vec![PriceLevelDelta::delete(64_001 * PRICE_ONE)],
        ),
    ];

    let summary = book.process_snapshot(&snapshot, &buffered);
    info!(
        "Snapshot loaded: applied {} buffered events, skipped {}",
        summary.applied, summary.skipped
    );
    display_top(&book);

    for (first, last) in [(504, 506), (507, 507), (510, 512)] {
        let live = event(
            first,
            last,
            vec![PriceLevelDelta::update(63_995 * PRICE_ONE, last * 1_000)],
            vec![],
        );
        match book.process_event(&live) {
            Ok(()) => info!("Applied event {}..={}", first, last),
            Err(err) if err.requires_resync() => {
                warn!("Gap detected: {}. Resyncing.", err);
                book.clear();
                let fresh = DepthSnapshot {
                    last_update_id: 520,
                    ..snapshot.clone()
                };
                book.process_snapshot(&fresh, &[]);
            }
            Err(err) => warn!("Dropped event: {}", err),
        }
    }

    display_top(&book);
    match book.snapshot_to_json() {
        Ok(json) => info!("Exported snapshot ({} bytes)", json.len()),
        Err(err) => warn!("Export failed: {}", err),
    }
}

fn event(
    first: i64,
    last: i64,
    bids: Vec<PriceLevelDelta>,
    asks: Vec<PriceLevelDelta>,
) -> DepthEvent {
    DepthEvent {
        symbol: "BTCUSDT".to_string(),
        first_update_id: first,
        final_update_id: last,
        bids,
        asks,
        timestamp: current_time_millis(),
    }
}

fn display_top(book: &OrderBook) {
    let status = book.status();
    info!(
        "{} loaded={} cursor={} bids={} asks={}",
        status.symbol, status.loaded, status.last_update_id, status.bid_levels, status.ask_levels
    );

    let top_asks: Vec<&PriceLevel> = book.asks().iter().take(3).collect();
    for level in top_asks.into_iter().rev() {
        info!(
            "  ASK {:>14} x {}",
            price_to_decimal(level.price),
            size_to_decimal(level.size)
        );
    }
    for level in book.bids().iter().take(3) {
        info!(
            "  BID {:>14} x {}",
            price_to_decimal(level.price),
            size_to_decimal(level.size)
        );
    }
}
