//! In-place dual-key sort: Hilbert ranks and their nodes move together.

/// Sorts `ranks` ascending and applies every swap to `items` as well.
///
/// Hoare partitioning with the middle element's rank as pivot. Not stable:
/// items with equal ranks may end up in any order. Partitions are kept on an
/// explicit stack, smaller one on top, so the stack stays logarithmic even on
/// adversarial input.
pub(crate) fn sort_by_rank<N>(ranks: &mut [u32], items: &mut [N]) {
    assert_eq!(
        ranks.len(),
        items.len(),
        "ranks and items must be co-indexed"
    );
    if ranks.len() < 2 {
        return;
    }

    let mut stack = Vec::with_capacity(64);
    stack.push((0_usize, ranks.len() - 1));

    while let Some((left, right)) = stack.pop() {
        if left >= right {
            continue;
        }
        let split = partition(ranks, items, left, right);

        // [left, split] and [split + 1, right]; larger one goes down first.
        if split - left > right - split {
            stack.push((left, split));
            stack.push((split + 1, right));
        } else {
            stack.push((split + 1, right));
            stack.push((left, split));
        }
    }
}

/// Hoare partition of `[left, right]` around the middle rank.
///
/// Returns `j` such that every rank in `[left, j]` is `<=` every rank in
/// `[j + 1, right]`, with `left <= j < right`.
#[inline]
fn partition<N>(ranks: &mut [u32], items: &mut [N], left: usize, right: usize) -> usize {
    let pivot = ranks[(left + right) >> 1];
    let mut i = left;
    let mut j = right;

    loop {
        while ranks[i] < pivot {
            i += 1;
        }
        while ranks[j] > pivot {
            j -= 1;
        }
        if i >= j {
            return j;
        }
        ranks.swap(i, j);
        items.swap(i, j);
        i += 1;
        j -= 1;
    }
}

#[cfg(test)]
mod tests {
    use super::sort_by_rank;
    use rand::{Rng, SeedableRng};

    fn check(mut ranks: Vec<u32>) {
        // Payload remembers its own rank and original slot.
        let mut items: Vec<(u32, usize)> = ranks.iter().copied().zip(0..).collect();
        let mut expected = ranks.clone();
        expected.sort_unstable();

        sort_by_rank(&mut ranks, &mut items);

        assert_eq!(ranks, expected, "ranks must come out ascending");
        for (pos, (&rank, &(item_rank, _))) in ranks.iter().zip(&items).enumerate() {
            assert_eq!(rank, item_rank, "item at {pos} drifted away from its rank");
        }
        let mut slots: Vec<usize> = items.iter().map(|&(_, slot)| slot).collect();
        slots.sort_unstable();
        assert!(
            slots.iter().copied().eq(0..slots.len()),
            "sort must permute, not duplicate or drop"
        );
    }

    #[test]
    fn trivial_inputs() {
        check(vec![]);
        check(vec![42]);
        check(vec![2, 1]);
        check(vec![1, 2]);
    }

    #[test]
    fn already_sorted_and_reversed() {
        check((0..1000).collect());
        check((0..1000).rev().collect());
    }

    #[test]
    fn duplicates() {
        check(vec![7; 500]);
        check((0..2000).map(|i| i % 3).collect());
    }

    #[test]
    fn random_ranks() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(95756739);
        for len in [3, 17, 256, 10_000] {
            check((0..len).map(|_| rng.random::<u32>()).collect());
            check((0..len).map(|_| rng.random_range(0..8)).collect());
        }
    }

    #[test]
    #[should_panic(expected = "ranks and items must be co-indexed")]
    fn length_mismatch_panics() {
        let mut ranks = vec![1, 2, 3];
        let mut items = vec!['a', 'b'];
        sort_by_rank(&mut ranks, &mut items);
    }
}
