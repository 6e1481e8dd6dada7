// demos/src/bin/fill_simulation.rs
//
// This demo runs a book inside its own task and asks it depth-weighted
// questions while a feed task keeps it current.
//
// Queries demonstrated:
// - `ask_conversion()` / `bid_conversion()`: fill an amount against one side
// - `ask_reverse_conversion()` / `bid_reverse_conversion()`: the inverse walks
// - `market_price()`: midpoint of the best ask and best bid
// - `buy_depth_requirement()` / `sell_depth_requirement()`
//
// Run this demo with:
//   cargo run --bin fill_simulation
//   (from the demos directory)

use depthbook::prelude::*;
use tracing::{info, warn};

const PRICE_ONE: i64 = 100_000_000;
const SIZE_ONE: i64 = 1_000_000;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();
    info!("Fill Simulation Demo");

    let book = match OrderBook::new("ETHUSDT", 50) {
        Ok(book) => book,
        Err(err) => {
            warn!("could not create book: {}", err);
            return;
        }
    };
    let (handle, task) = OrderBookHandle::spawn(book);

    let snapshot = DepthSnapshot {
        last_update_id: 1,
        bids: (0..20)
            .map(|i| PriceLevel::new((3_000 - i) * PRICE_ONE, 2 * SIZE_ONE))
            .collect(),
        asks: (0..20)
            .map(|i| PriceLevel::new((3_001 + i) * PRICE_ONE, 2 * SIZE_ONE))
            .collect(),
    };
    if let Err(err) = handle.process_snapshot(snapshot, Vec::new()).await {
        warn!("snapshot failed: {}", err);
        return;
    }

    let feed = {
        let handle = handle.clone();
        tokio::spawn(async move {
            for id in 2..=20_i64 {
                let event = DepthEvent {
                    symbol: "ETHUSDT".to_string(),
                    first_update_id: id,
                    final_update_id: id,
                    bids: vec![PriceLevelDelta::update(3_000 * PRICE_ONE, id * SIZE_ONE)],
                    asks: vec![],
                    timestamp: current_time_millis(),
                };
                if let Err(err) = handle.process_event(event).await {
                    warn!("event {} rejected: {}", id, err);
                }
            }
        })
    };

    for quote in [
        Decimal::from(1_000),
        Decimal::from(25_000),
        Decimal::from(1_000_000),
    ] {
        match handle.ask_conversion(quote).await {
            Ok(base) => info!("Spending {} USDT buys {} ETH", quote, base.round_dp(6)),
            Err(err) => warn!("Spending {} USDT: {}", quote, err),
        }
    }

    match handle.bid_conversion(Decimal::from(5)).await {
        Ok(proceeds) => info!("Selling 5 ETH raises {} USDT", proceeds),
        Err(err) => warn!("Selling 5 ETH: {}", err),
    }

    match handle.market_price().await {
        Ok(mid) => info!("Market price: {}", mid),
        Err(err) => warn!("Market price: {}", err),
    }
    match handle.ask_reverse_conversion(Decimal::from(3)).await {
        Ok(cost) => info!("Cost of 3 ETH: {} USDT", cost),
        Err(err) => warn!("Cost of 3 ETH: {}", err),
    }
    match handle.bid_reverse_conversion(Decimal::from(9_000)).await {
        Ok(sold) => info!("ETH to sell for 9000 USDT: {}", sold.round_dp(6)),
        Err(err) => warn!("ETH to sell for 9000 USDT: {}", err),
    }

    let limits = (Decimal::from(3_010), Decimal::from(2_990));
    let amount = Decimal::from(4);
    match (
        handle.buy_depth_requirement(limits.0, amount).await,
        handle.sell_depth_requirement(limits.1, amount).await,
    ) {
        (Ok(buy), Ok(sell)) => info!("Depth requirement: buy {} levels, sell {} levels", buy, sell),
        (buy, sell) => warn!("Depth requirement: buy {:?}, sell {:?}", buy, sell),
    }

    if feed.await.is_err() {
        warn!("feed task panicked");
    }
    if let Ok(status) = handle.status().await {
        info!("Final cursor: {}", status.last_update_id);
    }

    drop(handle);
    if task.await.is_err() {
        warn!("book task panicked");
    }
}
