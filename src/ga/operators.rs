//! Generic sequence operators.
//!
//! Crossover for chromosomes stored as plain sequences. Recombination is
//! **positional**: genes are exchanged by index, never by identity, so the
//! result may duplicate or drop items present in the parents.
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*

use rand::Rng;

/// One-point crossover producing a single child.
///
/// Draws a cut index uniformly in `[0, parent1.len())` and returns
/// `parent1[..cut]` followed by `parent2[cut..]`.
///
/// - If `parent1` is empty, the cut is 0 and the child is a copy of `parent2`.
/// - If `parent2` is shorter than the cut, its suffix is empty.
///
/// For equal-length parents the child has the same length as `parent1`.
///
/// # Complexity
/// O(n) time, O(n) space
pub fn one_point_crossover<T: Clone, R: Rng>(parent1: &[T], parent2: &[T], rng: &mut R) -> Vec<T> {
    let cut = if parent1.is_empty() {
        0
    } else {
        rng.random_range(0..parent1.len())
    };
    splice_at(parent1, parent2, cut)
}

/// Deterministic half of [`one_point_crossover`]: `parent1[..cut] ++ parent2[cut..]`.
///
/// `cut` is clamped to each parent's length.
pub fn splice_at<T: Clone>(parent1: &[T], parent2: &[T], cut: usize) -> Vec<T> {
    let head = &parent1[..cut.min(parent1.len())];
    let tail = parent2.get(cut..).unwrap_or(&[]);

    let mut child = Vec::with_capacity(head.len() + tail.len());
    child.extend_from_slice(head);
    child.extend_from_slice(tail);
    child
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_splice_at_basic() {
        let p1 = [1, 2, 3, 4, 5];
        let p2 = [10, 20, 30, 40, 50];
        assert_eq!(splice_at(&p1, &p2, 0), vec![10, 20, 30, 40, 50]);
        assert_eq!(splice_at(&p1, &p2, 2), vec![1, 2, 30, 40, 50]);
        assert_eq!(splice_at(&p1, &p2, 4), vec![1, 2, 3, 4, 50]);
    }

    #[test]
    fn test_splice_short_second_parent() {
        let p1 = [1, 2, 3, 4];
        let p2 = [10];
        assert_eq!(splice_at(&p1, &p2, 3), vec![1, 2, 3]);
    }

    #[test]
    fn test_empty_first_parent_copies_second() {
        let mut rng = StdRng::seed_from_u64(42);
        let p1: [u8; 0] = [];
        let p2 = [7, 8];
        assert_eq!(one_point_crossover(&p1, &p2, &mut rng), vec![7, 8]);
    }

    #[test]
    fn test_cut_never_reaches_end() {
        // cut < len(parent1), so the last gene always comes from parent2.
        let mut rng = StdRng::seed_from_u64(7);
        let p1 = [0, 0, 0];
        let p2 = [1, 1, 1];
        for _ in 0..200 {
            let child = one_point_crossover(&p1, &p2, &mut rng);
            assert_eq!(child[2], 1);
        }
    }

    proptest! {
        #[test]
        fn prop_child_length_matches_first_parent(
            len in 0usize..40,
            seed in any::<u64>(),
        ) {
            let p1: Vec<usize> = (0..len).collect();
            let p2: Vec<usize> = (100..100 + len).collect();
            let mut rng = StdRng::seed_from_u64(seed);
            let child = one_point_crossover(&p1, &p2, &mut rng);

            prop_assert_eq!(child.len(), p1.len());
            // Prefix from parent1, suffix from parent2, by position.
            for (i, gene) in child.iter().enumerate() {
                prop_assert!(*gene == p1[i] || *gene == p2[i]);
            }
        }
    }
}
