//! Selection strategies for the GA.
//!
//! Two kinds of selection act in every generation:
//!
//! - **Survivor selection** ([`truncate`]): rank the population by fitness
//!   and keep the better half.
//! - **Parent selection** ([`ParentSelection`]): pick mates for crossover
//!   from whoever survived.
//!
//! # References
//!
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms"

use std::cmp::Ordering;

use super::types::Individual;
use rand::Rng;

/// Sorts `population` by descending fitness and keeps the first
/// `floor(len / 2)` individuals.
///
/// The sort is stable, so individuals with equal fitness keep their
/// relative order. Incomparable fitness values (NaN) are treated as equal.
pub fn truncate<I: Individual>(population: &mut Vec<I>) {
    sort_descending(population);
    let keep = population.len() / 2;
    population.truncate(keep);
}

/// Stable sort by descending fitness (best first).
pub fn sort_descending<I: Individual>(population: &mut [I]) {
    population.sort_by(|a, b| {
        b.fitness()
            .partial_cmp(&a.fitness())
            .unwrap_or(Ordering::Equal)
    });
}

/// Strategy for choosing crossover parents.
///
/// All strategies draw **with replacement**: the same individual may be
/// picked as both parents.
///
/// # Examples
///
/// ```
/// use u_timetable::ga::ParentSelection;
///
/// // Uniform draw over the surviving population
/// let sel = ParentSelection::Uniform;
///
/// // Best of two uniform draws
/// let sel = ParentSelection::Tournament(2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ParentSelection {
    /// Every individual is equally likely. Survivor truncation supplies all
    /// of the selection pressure.
    #[default]
    Uniform,

    /// Tournament selection: draw `k` individuals uniformly, keep the best.
    ///
    /// # Complexity
    /// O(k) per selection
    Tournament(usize),
}

impl ParentSelection {
    /// Selects a parent index from the population.
    ///
    /// # Panics
    /// Panics if `population` is empty.
    pub fn select<I: Individual, R: Rng>(&self, population: &[I], rng: &mut R) -> usize {
        assert!(
            !population.is_empty(),
            "cannot select from empty population"
        );

        match self {
            ParentSelection::Uniform => rng.random_range(0..population.len()),
            ParentSelection::Tournament(k) => tournament(population, *k, rng),
        }
    }
}

/// Tournament selection: pick k random individuals, return best.
fn tournament<I: Individual, R: Rng>(population: &[I], k: usize, rng: &mut R) -> usize {
    let k = k.max(1);
    let n = population.len();

    let mut best_idx = rng.random_range(0..n);
    for _ in 1..k {
        let idx = rng.random_range(0..n);
        if population[idx].fitness() > population[best_idx].fitness() {
            best_idx = idx;
        }
    }
    best_idx
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[derive(Clone, Debug)]
    struct TestInd {
        tag: usize,
        fit: i64,
    }

    impl Individual for TestInd {
        type Fitness = i64;
        fn fitness(&self) -> i64 {
            self.fit
        }
        fn set_fitness(&mut self, f: i64) {
            self.fit = f;
        }
    }

    fn make_population(fitnesses: &[i64]) -> Vec<TestInd> {
        fitnesses
            .iter()
            .enumerate()
            .map(|(tag, &fit)| TestInd { tag, fit })
            .collect()
    }

    #[test]
    fn test_truncate_keeps_best_half() {
        let mut pop = make_population(&[3, 9, 1, 7, 5]);
        truncate(&mut pop);
        let fits: Vec<i64> = pop.iter().map(|i| i.fit).collect();
        assert_eq!(fits, vec![9, 7]);
    }

    #[test]
    fn test_truncate_is_stable_on_ties() {
        let mut pop = make_population(&[2, 2, 2, 2]);
        truncate(&mut pop);
        let tags: Vec<usize> = pop.iter().map(|i| i.tag).collect();
        assert_eq!(tags, vec![0, 1]);
    }

    #[test]
    fn test_truncate_single_empties() {
        let mut pop = make_population(&[4]);
        truncate(&mut pop);
        assert!(pop.is_empty());
    }

    #[test]
    fn test_uniform_covers_population() {
        let pop = make_population(&[10, 5, 1, 8]);
        let mut rng = StdRng::seed_from_u64(42);

        let mut counts = [0u32; 4];
        let n = 10000;
        for _ in 0..n {
            let idx = ParentSelection::Uniform.select(&pop, &mut rng);
            counts[idx] += 1;
        }
        for &c in &counts {
            assert!(c > 1500, "expected uniform, got counts: {counts:?}");
        }
    }

    #[test]
    fn test_tournament_favors_best() {
        let pop = make_population(&[10, 5, 1, 8]);
        let mut rng = StdRng::seed_from_u64(42);

        let mut counts = [0u32; 4];
        let n = 10000;
        for _ in 0..n {
            let idx = ParentSelection::Tournament(4).select(&pop, &mut rng);
            counts[idx] += 1;
        }
        // Index 0 (fitness=10) should dominate
        assert!(
            counts[0] > 6000,
            "expected best to be selected >60% of the time, got {}/{n}",
            counts[0]
        );
    }

    #[test]
    fn test_single_individual() {
        let pop = make_population(&[5]);
        let mut rng = StdRng::seed_from_u64(42);

        assert_eq!(ParentSelection::Uniform.select(&pop, &mut rng), 0);
        assert_eq!(ParentSelection::Tournament(3).select(&pop, &mut rng), 0);
    }

    #[test]
    #[should_panic(expected = "cannot select from empty population")]
    fn test_empty_population_panics() {
        let pop: Vec<TestInd> = vec![];
        let mut rng = StdRng::seed_from_u64(42);
        ParentSelection::Uniform.select(&pop, &mut rng);
    }

    proptest! {
        #[test]
        fn prop_truncate_halves_and_sorts(fits in proptest::collection::vec(-50i64..50, 0..64)) {
            let n = fits.len();
            let mut pop = make_population(&fits);
            truncate(&mut pop);

            prop_assert_eq!(pop.len(), n / 2);
            for pair in pop.windows(2) {
                prop_assert!(pair[0].fit >= pair[1].fit);
            }

            // Survivors are the top of the full ranking.
            let mut sorted = fits.clone();
            sorted.sort_unstable_by(|a, b| b.cmp(a));
            let kept: Vec<i64> = pop.iter().map(|i| i.fit).collect();
            prop_assert_eq!(kept, sorted[..n / 2].to_vec());
        }
    }
}
