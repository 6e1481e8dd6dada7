//! Property tests for ladder ordering, removal and pruning

use depthbook::{PriceLadder, Side};
use proptest::prelude::*;
use std::collections::BTreeMap;

fn ops() -> impl Strategy<Value = Vec<(i64, i64)>> {
    prop::collection::vec((0i64..500, 1i64..1_000_000), 0..200)
}

fn build(side: Side, ops: &[(i64, i64)]) -> PriceLadder {
    let mut ladder = PriceLadder::new(side);
    for &(price, size) in ops {
        ladder.update_or_insert(price, size);
    }
    ladder
}

proptest! {
    #[test]
    fn ascending_ladder_is_strictly_increasing(ops in ops()) {
        let ladder = build(Side::Ask, &ops);
        prop_assert!(ladder.levels().windows(2).all(|w| w[0].price < w[1].price));
    }

    #[test]
    fn descending_ladder_is_strictly_decreasing(ops in ops()) {
        let ladder = build(Side::Bid, &ops);
        prop_assert!(ladder.levels().windows(2).all(|w| w[0].price > w[1].price));
    }

    #[test]
    fn ladder_matches_last_write_per_price(ops in ops()) {
        let ladder = build(Side::Ask, &ops);
        let expected: BTreeMap<i64, i64> = ops.iter().copied().collect();

        prop_assert_eq!(ladder.len(), expected.len());
        for (level, (price, size)) in ladder.levels().iter().zip(expected.iter()) {
            prop_assert_eq!(level.price, *price);
            prop_assert_eq!(level.size, *size);
        }
    }

    #[test]
    fn repeated_insert_keeps_length(ops in ops(), price in 0i64..500, size in 1i64..100) {
        let mut ladder = build(Side::Bid, &ops);
        ladder.update_or_insert(price, size);
        let len = ladder.len();

        ladder.update_or_insert(price, size + 1);

        prop_assert_eq!(ladder.len(), len);
        prop_assert_eq!(ladder.get(price).map(|l| l.size), Some(size + 1));
    }

    #[test]
    fn remove_changes_length_by_one_or_fails(ops in ops(), price in 0i64..500) {
        let mut ladder = build(Side::Ask, &ops);
        let before = ladder.len();
        let present = ladder.get(price).is_some();

        let result = ladder.remove(price);

        if present {
            prop_assert!(result.is_ok());
            prop_assert_eq!(ladder.len(), before - 1);
        } else {
            prop_assert!(result.is_err());
            prop_assert_eq!(ladder.len(), before);
        }
    }

    #[test]
    fn prune_keeps_prefix(ops in ops(), depth in 1usize..100) {
        let mut ladder = build(Side::Bid, &ops);
        let before = ladder.levels().to_vec();

        ladder.prune(depth);

        let kept = depth.min(before.len());
        prop_assert_eq!(ladder.len(), kept);
        prop_assert_eq!(ladder.levels(), &before[..kept]);
    }
}
