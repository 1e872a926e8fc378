use crate::bbox::BBox;
use crate::integration_test::integration_tests::brute_force;
use crate::{HilbertRTree, IndexOptions};

use proptest::prelude::*;

fn box_strategy() -> impl Strategy<Value = BBox<i32>> {
    (-200..200_i32, -200..200_i32, 0..40_i32, 0..40_i32)
        .prop_map(|(x, y, w, h)| BBox::new(x, y, x + w, y + h))
}

fn float_box_strategy() -> impl Strategy<Value = BBox<f64>> {
    (-1e3..1e3_f64, -1e3..1e3_f64, 0.0..50.0_f64, 0.0..50.0_f64)
        .prop_map(|(x, y, w, h)| BBox::new(x, y, x + w, y + h))
}

fn build<T: crate::Coord>(boxes: &[BBox<T>], node_size: usize) -> HilbertRTree<T> {
    let mut tree = HilbertRTree::with_options(
        IndexOptions::default()
            .with_node_size(node_size)
            .with_capacity(boxes.len()),
    );
    for b in boxes {
        tree.add(b.min_x, b.min_y, b.max_x, b.max_y);
    }
    tree.finish();
    tree
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    #[test]
    fn prop_search_equals_brute_force(
        boxes in prop::collection::vec(box_strategy(), 0..400),
        queries in prop::collection::vec(box_strategy(), 1..20),
        node_size in 0..24_usize,
    ) {
        let tree = build(&boxes, node_size);
        let mut results = Vec::new();
        for q in &queries {
            tree.search_into(q.min_x, q.min_y, q.max_x, q.max_y, &mut results);
            let mut got = results.clone();
            got.sort_unstable();
            // no false negatives, no false positives, no duplicates
            prop_assert_eq!(got, brute_force(&boxes, q));
        }
    }

    #[test]
    fn prop_float_search_equals_brute_force(
        boxes in prop::collection::vec(float_box_strategy(), 1..300),
        query in float_box_strategy(),
        node_size in 2..20_usize,
    ) {
        let tree = build(&boxes, node_size);
        let mut got = tree.search_box(&query);
        got.sort_unstable();
        prop_assert_eq!(got, brute_force(&boxes, &query));
    }

    #[test]
    fn prop_result_set_independent_of_fan_out(
        boxes in prop::collection::vec(box_strategy(), 1..300),
        query in box_strategy(),
        a in 2..32_usize,
        b in 2..32_usize,
    ) {
        let mut left = build(&boxes, a).search_box(&query);
        let mut right = build(&boxes, b).search_box(&query);
        left.sort_unstable();
        right.sort_unstable();
        prop_assert_eq!(left, right);
    }

    #[test]
    fn prop_search_before_finish_is_empty(
        boxes in prop::collection::vec(box_strategy(), 0..100),
        query in box_strategy(),
    ) {
        let mut tree = HilbertRTree::new();
        for b in &boxes {
            tree.add(b.min_x, b.min_y, b.max_x, b.max_y);
        }
        prop_assert!(tree.search_box(&query).is_empty());
        prop_assert_eq!(tree.len(), boxes.len());
    }
}
