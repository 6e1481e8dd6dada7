//! Tests for the task-owned order book handle

#[cfg(test)]
mod tests_handle {
    use depthbook::prelude::*;

    const PRICE_ONE: i64 = 100_000_000;
    const SIZE_ONE: i64 = 1_000_000;

    fn snapshot(last_update_id: i64) -> DepthSnapshot {
        DepthSnapshot {
            last_update_id,
            bids: vec![PriceLevel::new(99 * PRICE_ONE, 2 * SIZE_ONE)],
            asks: vec![PriceLevel::new(101 * PRICE_ONE, 2 * SIZE_ONE)],
        }
    }

    fn depth_event(first: i64, last: i64) -> DepthEvent {
        DepthEvent {
            symbol: "SOLUSDT".to_string(),
            first_update_id: first,
            final_update_id: last,
            bids: vec![PriceLevelDelta::update(100 * PRICE_ONE, SIZE_ONE)],
            asks: vec![],
            timestamp: 0,
        }
    }

    fn spawn_book() -> (OrderBookHandle, tokio::task::JoinHandle<()>) {
        let book = OrderBook::new("SOLUSDT", 10).expect("valid book");
        OrderBookHandle::spawn(book)
    }

    #[tokio::test]
    async fn snapshot_event_and_queries_round_trip() {
        let (handle, _task) = spawn_book();
        assert_eq!(handle.symbol(), "SOLUSDT");

        let summary = handle
            .process_snapshot(snapshot(10), vec![depth_event(5, 10)])
            .await
            .expect("task alive");
        assert_eq!(summary.skipped, 1);

        handle
            .process_event(depth_event(11, 12))
            .await
            .expect("contiguous event");

        let status = handle.status().await.expect("task alive");
        assert!(status.loaded);
        assert_eq!(status.last_update_id, 12);
        assert_eq!(status.bid_levels, 2);

        assert_eq!(handle.first_bid_price().await, Ok(Decimal::from(100)));
        assert_eq!(handle.first_ask_price().await, Ok(Decimal::from(101)));
        assert_eq!(handle.market_price().await, Ok(Decimal::new(1005, 1)));
        assert_eq!(
            handle.ask_conversion(Decimal::from(101)).await,
            Ok(Decimal::ONE)
        );
        assert_eq!(
            handle.bid_conversion(Decimal::from(2)).await,
            Ok(Decimal::from(199))
        );
    }

    #[tokio::test]
    async fn reverse_conversions_and_depth_requirements() {
        let (handle, _task) = spawn_book();
        handle
            .process_snapshot(snapshot(10), vec![])
            .await
            .expect("task alive");

        assert_eq!(
            handle.ask_reverse_conversion(Decimal::ONE).await,
            Ok(Decimal::from(101))
        );
        assert_eq!(
            handle.bid_reverse_conversion(Decimal::from(99)).await,
            Ok(Decimal::ONE)
        );
        assert_eq!(
            handle.buy_depth_requirement(Decimal::from(102), Decimal::ONE).await,
            Ok(1)
        );
        assert_eq!(
            handle.buy_depth_requirement(Decimal::from(100), Decimal::ONE).await,
            Ok(0)
        );
        assert_eq!(
            handle.sell_depth_requirement(Decimal::from(98), Decimal::ONE).await,
            Ok(1)
        );
        assert_eq!(
            handle.sell_depth_requirement(Decimal::from(100), Decimal::ONE).await,
            Ok(0)
        );
        assert!(matches!(
            handle.ask_reverse_conversion(Decimal::from(5)).await,
            Err(OrderBookError::ShallowDepth { side: Side::Ask, .. })
        ));
    }

    #[tokio::test]
    async fn rejected_event_is_reported_to_caller() {
        let (handle, _task) = spawn_book();

        let result = handle.process_event(depth_event(1, 1)).await;
        assert!(matches!(result, Err(OrderBookError::EngineNotLoaded { .. })));

        handle
            .process_snapshot(snapshot(10), vec![])
            .await
            .expect("task alive");
        let result = handle.process_event(depth_event(20, 21)).await;
        assert!(matches!(result, Err(OrderBookError::SequenceGap { .. })));
    }

    #[tokio::test]
    async fn resync_replaces_state() {
        let (handle, _task) = spawn_book();
        handle
            .process_snapshot(snapshot(10), vec![])
            .await
            .expect("task alive");
        handle
            .process_event(depth_event(11, 11))
            .await
            .expect("contiguous event");

        let summary = handle
            .resync(snapshot(50), vec![depth_event(51, 52)])
            .await
            .expect("task alive");
        assert_eq!(summary.applied, 1);

        let exported = handle.to_snapshot().await.expect("task alive");
        assert_eq!(exported.last_update_id, 52);
        assert_eq!(exported.bids.len(), 2);
        assert_eq!(exported.asks.len(), 1);
    }

    #[tokio::test]
    async fn clear_unloads_book() {
        let (handle, _task) = spawn_book();
        handle
            .process_snapshot(snapshot(10), vec![])
            .await
            .expect("task alive");

        handle.clear().await.expect("task alive");

        let status = handle.status().await.expect("task alive");
        assert!(!status.loaded);
        assert_eq!(status.last_update_id, 0);
        assert_eq!(status.bid_levels, 0);
    }

    #[tokio::test]
    async fn concurrent_readers_see_whole_events() {
        let (handle, _task) = spawn_book();
        handle
            .process_snapshot(snapshot(0), vec![])
            .await
            .expect("task alive");

        let writer = {
            let handle = handle.clone();
            tokio::spawn(async move {
                for id in 1..=200_i64 {
                    let event = DepthEvent {
                        symbol: "SOLUSDT".to_string(),
                        first_update_id: id,
                        final_update_id: id,
                        bids: vec![PriceLevelDelta::update(50 * PRICE_ONE, id)],
                        asks: vec![PriceLevelDelta::update(150 * PRICE_ONE, id)],
                        timestamp: 0,
                    };
                    handle.process_event(event).await.expect("contiguous event");
                }
            })
        };

        for _ in 0..50 {
            let (bid, ask) = handle
                .read(|book| {
                    (
                        book.bids().get(50 * PRICE_ONE).map(|l| l.size),
                        book.asks().get(150 * PRICE_ONE).map(|l| l.size),
                    )
                })
                .await
                .expect("task alive");
            assert_eq!(bid, ask);
            tokio::task::yield_now().await;
        }

        writer.await.expect("writer finished");
        assert_eq!(handle.status().await.map(|s| s.last_update_id), Ok(200));
    }

    #[tokio::test]
    async fn task_stops_when_handles_dropped() {
        let (handle, task) = spawn_book();
        drop(handle);

        task.await.expect("task exits cleanly");
    }

    #[tokio::test]
    async fn stopped_task_reports_closed() {
        let (handle, task) = spawn_book();
        task.abort();
        let _ = task.await;

        let result = handle.status().await;
        assert_eq!(
            result,
            Err(OrderBookError::HandleClosed {
                symbol: "SOLUSDT".to_string()
            })
        );
    }
}
