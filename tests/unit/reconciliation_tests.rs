//! Snapshot reconciliation and live event sequencing through the public API

#[cfg(test)]
mod tests_reconciliation {
    use depthbook::prelude::*;

    fn depth_event(
        first: i64,
        last: i64,
        bids: Vec<PriceLevelDelta>,
        asks: Vec<PriceLevelDelta>,
    ) -> DepthEvent {
        DepthEvent {
            symbol: "ETHUSDT".to_string(),
            first_update_id: first,
            final_update_id: last,
            bids,
            asks,
            timestamp: current_time_millis(),
        }
    }

    fn base_snapshot() -> DepthSnapshot {
        DepthSnapshot {
            last_update_id: 1000,
            bids: vec![PriceLevel::new(300_000_000_000, 5_000_000)],
            asks: vec![PriceLevel::new(300_100_000_000, 4_000_000)],
        }
    }

    #[test]
    fn buffered_event_at_cursor_is_skipped_and_later_one_applied() {
        let mut book = OrderBook::new("ETHUSDT", 100).expect("valid book");

        let at_cursor = depth_event(
            995,
            1000,
            vec![PriceLevelDelta::update(299_000_000_000, 1_000_000)],
            vec![],
        );
        let ahead = depth_event(
            1001,
            1005,
            vec![],
            vec![PriceLevelDelta::update(300_200_000_000, 2_000_000)],
        );

        let summary = book.process_snapshot(&base_snapshot(), &[at_cursor, ahead]);

        assert_eq!(summary, ReplaySummary { applied: 1, skipped: 1 });
        assert_eq!(book.last_update_id(), 1005);
        assert!(book.bids().get(299_000_000_000).is_none());
        assert_eq!(book.asks().len(), 2);
    }

    #[test]
    fn live_stream_after_replay_continues_from_replayed_cursor() {
        let mut book = OrderBook::new("ETHUSDT", 100).expect("valid book");
        book.process_snapshot(&base_snapshot(), &[depth_event(1001, 1005, vec![], vec![])]);

        // Starts at the snapshot cursor but the replay already moved it to 1005
        let result = book.process_event(&depth_event(1001, 1004, vec![], vec![]));
        assert!(matches!(result, Err(OrderBookError::StaleEvent { .. })));

        book.process_event(&depth_event(1006, 1010, vec![], vec![]))
            .expect("continues the replayed cursor");
        assert_eq!(book.last_update_id(), 1010);
    }

    #[test]
    fn gap_then_resync_recovers() {
        let mut book = OrderBook::new("ETHUSDT", 100).expect("valid book");
        book.process_snapshot(&base_snapshot(), &[]);

        let err = book
            .process_event(&depth_event(1003, 1004, vec![], vec![]))
            .expect_err("gap must be rejected");
        assert!(err.requires_resync());
        assert_eq!(book.last_update_id(), 1000);

        book.clear();
        let fresh = DepthSnapshot {
            last_update_id: 1010,
            bids: vec![PriceLevel::new(299_500_000_000, 1_000_000)],
            asks: vec![PriceLevel::new(300_500_000_000, 1_000_000)],
        };
        book.process_snapshot(&fresh, &[depth_event(1003, 1004, vec![], vec![])]);

        assert!(book.is_loaded());
        assert_eq!(book.last_update_id(), 1010);
        assert_eq!(book.bids().len(), 1);
        assert_eq!(
            book.simulator().market_price(),
            Ok(Decimal::new(300_000_000_000, 8))
        );
    }

    #[test]
    fn long_stream_stays_within_prune_threshold() {
        let mut book = OrderBook::new("ETHUSDT", 5).expect("valid book");
        book.process_snapshot(&base_snapshot(), &[]);

        let mut cursor = 1000;
        for step in 1..=50_i64 {
            let event = depth_event(
                cursor + 1,
                cursor + 2,
                vec![PriceLevelDelta::update(300_000_000_000 - step * 1_000_000, step)],
                vec![PriceLevelDelta::update(300_100_000_000 + step * 1_000_000, step)],
            );
            book.process_event(&event).expect("contiguous stream");
            cursor += 2;

            assert!(book.bids().len() <= 5);
            assert!(book.asks().len() <= 5);
        }

        assert_eq!(book.last_update_id(), 1100);
        assert_eq!(book.best_bid().map(|l| l.price), Ok(300_000_000_000));
        assert_eq!(book.best_ask().map(|l| l.price), Ok(300_100_000_000));
    }

    #[test]
    fn exported_snapshot_reloads_identically() {
        let mut original = OrderBook::new("ETHUSDT", 100).expect("valid book");
        original.process_snapshot(&base_snapshot(), &[]);
        original
            .process_event(&depth_event(
                1001,
                1001,
                vec![PriceLevelDelta::update(299_900_000_000, 7_000_000)],
                vec![],
            ))
            .expect("contiguous");

        let json = original.snapshot_to_json().expect("serializable");
        let exported: DepthSnapshot = serde_json::from_str(&json).expect("valid json");

        let mut copy = OrderBook::new("ETHUSDT", 100).expect("valid book");
        copy.process_snapshot(&exported, &[]);

        assert_eq!(copy.to_snapshot(), original.to_snapshot());
        assert_eq!(copy.last_update_id(), 1001);
    }
}
