//! Randomized operation-trace property tests (§8's universal invariants)
//! plus the round-trip law, run over interleaved submit/cancel sequences
//! across a handful of prices and both sides. The FIFO law is covered at the
//! component level by `order_list`'s `pop_oldest_drains_fifo`.

use crate::avl_tree::AvlTree;
use crate::traversal::bfs_height;
use crate::{Book, Side};
use proptest::prelude::*;

#[derive(Debug, Clone, Copy)]
enum Op {
    Submit { side: Side, price: i64, shares: u64, id: u64 },
    Cancel { id: u64 },
}

fn op_strategy(max_id: u64) -> impl Strategy<Value = Op> {
    prop_oneof![
        (
            prop_oneof![Just(Side::Buy), Just(Side::Sell)],
            1i64..=10,
            1u64..=1000,
            0u64..max_id,
        )
            .prop_map(|(side, price, shares, id)| Op::Submit { side, price, shares, id }),
        (0u64..max_id).prop_map(|id| Op::Cancel { id }),
    ]
}

/// For every live level on both sides: `aggregate_volume = price *
/// aggregate_size` exactly, and the freshly computed BFS height of its
/// subtree agrees with the incrementally stored `AvlNode::height` (§4.3's
/// cross-check, run after every mutation in the trace).
fn assert_level_invariants(book: &Book) {
    for side in [Side::Buy, Side::Sell] {
        let tree = book.tree(side);
        for (idx, price) in tree.levels_best_first() {
            let info = book.level_at(side, price).expect("level just listed must exist");
            assert_eq!(info.volume, price as u128 * info.size as u128);

            let stored_height = tree.get_node(idx).height;
            let computed_height = bfs_height(tree, Some(idx));
            assert_eq!(
                stored_height, computed_height,
                "stored height diverges from BFS height at {side} level {price}"
            );
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn random_traces_preserve_invariants(ops in prop::collection::vec(op_strategy(12), 0..60)) {
        let mut book = Book::new();
        let mut live = std::collections::HashSet::new();

        for (t, op) in ops.into_iter().enumerate() {
            match op {
                Op::Submit { side, price, shares, id } => {
                    let result = book.submit(side, price, shares, id, t as u64);
                    match result {
                        Ok(()) => { live.insert(id); }
                        Err(_) => {
                            prop_assert!(live.contains(&id) || shares == 0 || price <= 0);
                        }
                    }
                }
                Op::Cancel { id } => {
                    let result = book.cancel(id, t as u64);
                    match result {
                        Ok(_) => { live.remove(&id); }
                        Err(_) => prop_assert!(!live.contains(&id)),
                    }
                }
            }
            assert_level_invariants(&book);
        }

        prop_assert_eq!(book.total_orders(), live.len());

        for id in live {
            book.cancel(id, 999).unwrap();
        }
        prop_assert_eq!(book.total_orders(), 0);
        prop_assert_eq!(book.total_levels(), 0);
        prop_assert_eq!(book.best_bid(), None);
        prop_assert_eq!(book.best_ask(), None);
    }

    #[test]
    fn submit_then_cancel_is_idempotent_on_state(
        side in prop_oneof![Just(Side::Buy), Just(Side::Sell)],
        price in 1i64..=1000,
        shares in 1u64..=1000,
    ) {
        let mut book = Book::new();
        let before = book.total_levels();

        book.submit(side, price, shares, 1, 0).unwrap();
        book.cancel(1, 1).unwrap();

        prop_assert_eq!(book.total_levels(), before);
        prop_assert_eq!(book.total_orders(), 0);
        prop_assert!(book.level_at(side, price).is_none());
    }
}

#[test]
fn round_trip_law_reduces_aggregates_by_exactly_order_shares() {
    let mut book = Book::new();
    book.submit(Side::Buy, 1000, 10, 1, 0).unwrap();
    book.submit(Side::Buy, 1000, 20, 2, 0).unwrap();

    let before = book.level_at(Side::Buy, 1000).unwrap();
    book.cancel(2, 1).unwrap();
    let after = book.level_at(Side::Buy, 1000).unwrap();

    assert_eq!(before.size - after.size, 20);
    assert_eq!(before.volume - after.volume, 1000 * 20);
}

#[test]
fn round_trip_law_sole_order_removes_the_level() {
    let mut book = Book::new();
    book.submit(Side::Sell, 50, 5, 1, 0).unwrap();
    book.cancel(1, 1).unwrap();
    assert!(book.level_at(Side::Sell, 50).is_none());
}
