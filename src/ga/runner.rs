//! GA evolutionary loop execution.
//!
//! [`GaRunner`] orchestrates the complete evolutionary process:
//! initialization → evaluation → truncation → offspring production → repeat,
//! then returns the best individual of the final population.

use std::cmp::Ordering;

use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::config::{GaConfig, OffspringMode};
use super::selection::{sort_descending, truncate};
use super::types::{Fitness, GaProblem, Individual};
use crate::error::{Error, Result};

/// Population summary recorded after initialization and after every
/// generation.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GenerationStats {
    /// Generation index (0 = initial population).
    pub generation: usize,
    /// Population length at the end of the generation.
    pub population_size: usize,
    /// Highest fitness in the population.
    pub best: f64,
    /// Lowest fitness in the population.
    pub worst: f64,
    /// Mean fitness over the population.
    pub mean: f64,
}

impl GenerationStats {
    fn of<I: Individual>(generation: usize, population: &[I]) -> Self {
        let mut best = f64::NEG_INFINITY;
        let mut worst = f64::INFINITY;
        let mut sum = 0.0;
        for ind in population {
            let f = ind.fitness().to_f64();
            best = best.max(f);
            worst = worst.min(f);
            sum += f;
        }
        let mean = if population.is_empty() {
            0.0
        } else {
            sum / population.len() as f64
        };
        Self {
            generation,
            population_size: population.len(),
            best,
            worst,
            mean,
        }
    }
}

/// Result of a GA run.
#[derive(Debug, Clone)]
pub struct GaResult<I: Individual> {
    /// The top individual of the final population.
    pub best: I,

    /// Fitness of `best`.
    pub best_fitness: I::Fitness,

    /// Number of generations executed.
    pub generations: usize,

    /// Lowest fitness observed in the initial population.
    pub initial_worst_fitness: I::Fitness,

    /// Population length when the run ended.
    pub final_population_size: usize,

    /// Statistics for generation 0 followed by every executed generation.
    pub history: Vec<GenerationStats>,
}

/// Executes the GA evolutionary loop.
///
/// # Usage
///
/// ```ignore
/// let problem = MyProblem::new();
/// let config = GaConfig::default().with_seed(42);
/// let result = GaRunner::run(&problem, &config)?;
/// println!("Best fitness: {:?}", result.best_fitness);
/// ```
pub struct GaRunner;

impl GaRunner {
    /// Runs the GA optimization.
    ///
    /// # Errors
    /// - Any error from [`GaConfig::validate`].
    /// - Any error from [`GaProblem::create_individual`] during initialization.
    /// - [`Error::DegeneratePopulation`] if truncation empties the population.
    pub fn run<P: GaProblem>(problem: &P, config: &GaConfig) -> Result<GaResult<P::Individual>> {
        config.validate()?;

        let seed = config.seed.unwrap_or_else(rand::random);
        let mut rng = StdRng::seed_from_u64(seed);

        info!(
            "starting GA: population={}, generations={}, crossover={}, mutation={}, mode={:?}, seed={}",
            config.population_size,
            config.max_generations,
            config.crossover_rate,
            config.mutation_rate,
            config.offspring_mode,
            seed
        );
        if config.offspring_mode == OffspringMode::Live {
            warn!(
                "live offspring bound: population may compound within a generation (expected pass length x{:.2})",
                1.0 / (1.0 - config.crossover_rate)
            );
            let growth = config.live_growth_per_generation();
            if growth > 1.0 {
                warn!(
                    "live offspring bound: population grows ~x{:.2} per generation, ~{:.1e} individuals after {} generations",
                    growth,
                    config.population_size as f64 * growth.powi(config.max_generations as i32),
                    config.max_generations
                );
            }
        }

        // 1. Initialize and evaluate
        let mut population = initialize_population(problem, config, &mut rng)?;
        evaluate_all(problem, &mut population, config.parallel);

        let initial_worst_fitness = worst_fitness(&population)?;
        let mut history = Vec::with_capacity(config.max_generations + 1);
        history.push(GenerationStats::of(0, &population));

        // 2. Evolutionary loop
        for gen in 1..=config.max_generations {
            truncate(&mut population);
            if population.is_empty() {
                return Err(Error::DegeneratePopulation { size: 0 });
            }

            match config.offspring_mode {
                OffspringMode::Snapshot => {
                    snapshot_offspring(problem, config, &mut population, &mut rng)
                }
                OffspringMode::Live => live_offspring(problem, config, &mut population, &mut rng),
            }

            let stats = GenerationStats::of(gen, &population);
            debug!(
                "generation {}: size={}, best={}, worst={}, mean={:.3}",
                gen, stats.population_size, stats.best, stats.worst, stats.mean
            );
            history.push(stats);

            if let Some(top) = best_of(&population) {
                problem.on_generation(gen, top.fitness());
            }
        }

        // 3. Final ranking
        sort_descending(&mut population);
        let best = population
            .first()
            .cloned()
            .ok_or(Error::DegeneratePopulation { size: 0 })?;

        info!(
            "GA finished: best fitness={:?}, final population={}",
            best.fitness(),
            population.len()
        );

        Ok(GaResult {
            best_fitness: best.fitness(),
            best,
            generations: config.max_generations,
            initial_worst_fitness,
            final_population_size: population.len(),
            history,
        })
    }
}

/// Two-phase offspring production.
///
/// The number of slots is fixed before any child exists: enough to refill
/// the population to `config.population_size`. Each slot yields a crossover
/// child with probability `crossover_rate`, otherwise a copy of the first
/// parent. Children are evaluated in one batch and merged at the end.
fn snapshot_offspring<P: GaProblem, R: Rng>(
    problem: &P,
    config: &GaConfig,
    population: &mut Vec<P::Individual>,
    rng: &mut R,
) {
    let slots = config.population_size.saturating_sub(population.len());
    let mut offspring = Vec::with_capacity(slots);

    for _ in 0..slots {
        let p1 = config.parent_selection.select(population.as_slice(), rng);
        let p2 = config.parent_selection.select(population.as_slice(), rng);

        let mut child = if rng.random_range(0.0..1.0) < config.crossover_rate {
            problem.crossover(&population[p1], &population[p2], rng)
        } else {
            population[p1].clone()
        };

        if rng.random_range(0.0..1.0) < config.mutation_rate {
            problem.mutate(&mut child, rng);
        }
        offspring.push(child);
    }

    evaluate_all(problem, &mut offspring, config.parallel);
    population.extend(offspring);
}

/// In-place offspring production with a live loop bound.
///
/// Every appended child extends the pass, so the population compounds
/// within the generation.
fn live_offspring<P: GaProblem, R: Rng>(
    problem: &P,
    config: &GaConfig,
    population: &mut Vec<P::Individual>,
    rng: &mut R,
) {
    let mut j = 0;
    while j < population.len() {
        if rng.random_range(0.0..1.0) < config.crossover_rate {
            let p1 = config.parent_selection.select(population.as_slice(), rng);
            let p2 = config.parent_selection.select(population.as_slice(), rng);
            let mut child = problem.crossover(&population[p1], &population[p2], rng);
            if rng.random_range(0.0..1.0) < config.mutation_rate {
                problem.mutate(&mut child, rng);
            }
            let f = problem.evaluate(&child);
            child.set_fitness(f);
            population.push(child);
        }
        j += 1;
    }
}

/// Builds `population_size` individuals.
///
/// Each individual gets its own RNG seeded from `rng`, drawn in order, so
/// the result does not depend on whether generation runs in parallel.
fn initialize_population<P: GaProblem>(
    problem: &P,
    config: &GaConfig,
    rng: &mut StdRng,
) -> Result<Vec<P::Individual>> {
    let seeds: Vec<u64> = (0..config.population_size).map(|_| rng.random()).collect();
    create_all(problem, &seeds, config.parallel)
}

#[cfg(feature = "parallel")]
fn create_all<P: GaProblem>(
    problem: &P,
    seeds: &[u64],
    parallel: bool,
) -> Result<Vec<P::Individual>> {
    use rayon::prelude::*;

    if parallel {
        seeds
            .par_iter()
            .map(|&s| problem.create_individual(&mut StdRng::seed_from_u64(s)))
            .collect()
    } else {
        seeds
            .iter()
            .map(|&s| problem.create_individual(&mut StdRng::seed_from_u64(s)))
            .collect()
    }
}

#[cfg(not(feature = "parallel"))]
fn create_all<P: GaProblem>(
    problem: &P,
    seeds: &[u64],
    _parallel: bool,
) -> Result<Vec<P::Individual>> {
    seeds
        .iter()
        .map(|&s| problem.create_individual(&mut StdRng::seed_from_u64(s)))
        .collect()
}

/// Evaluate every individual and cache the result.
#[cfg(feature = "parallel")]
fn evaluate_all<P: GaProblem>(problem: &P, individuals: &mut [P::Individual], parallel: bool) {
    use rayon::prelude::*;

    if parallel {
        individuals.par_iter_mut().for_each(|ind| {
            let f = problem.evaluate(ind);
            ind.set_fitness(f);
        });
    } else {
        for ind in individuals.iter_mut() {
            let f = problem.evaluate(ind);
            ind.set_fitness(f);
        }
    }
}

/// Evaluate every individual and cache the result.
#[cfg(not(feature = "parallel"))]
fn evaluate_all<P: GaProblem>(problem: &P, individuals: &mut [P::Individual], _parallel: bool) {
    for ind in individuals.iter_mut() {
        let f = problem.evaluate(ind);
        ind.set_fitness(f);
    }
}

fn best_of<I: Individual>(population: &[I]) -> Option<&I> {
    population.iter().max_by(|a, b| {
        a.fitness()
            .partial_cmp(&b.fitness())
            .unwrap_or(Ordering::Equal)
    })
}

fn worst_fitness<I: Individual>(population: &[I]) -> Result<I::Fitness> {
    population
        .iter()
        .min_by(|a, b| {
            a.fitness()
                .partial_cmp(&b.fitness())
                .unwrap_or(Ordering::Equal)
        })
        .map(|ind| ind.fitness())
        .ok_or(Error::DegeneratePopulation { size: 0 })
}

// ============================================================================
// Tests
// ============================================================================
