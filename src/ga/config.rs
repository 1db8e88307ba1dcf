//! GA configuration.
//!
//! [`GaConfig`] holds all parameters that control the evolutionary loop.

use super::selection::ParentSelection;
use crate::error::{Error, Result};

/// How offspring are produced after truncation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OffspringMode {
    /// Refill to `population_size`.
    ///
    /// The slot count `population_size - survivors` is fixed before the
    /// loop. Every slot appends one child: a crossover child with
    /// probability `crossover_rate`, otherwise a copy of the first parent.
    /// Children go to a separate buffer merged once, so every generation
    /// ends at exactly `population_size`.
    ///
    /// This departs from the classic driver, where `crossover_rate` decides
    /// whether a slot yields any child at all. Under that rule a two-phase
    /// pass shrinks the population by a quarter per generation at a rate of
    /// 0.5 until it dies out; use [`OffspringMode::Live`] for the classic
    /// rule.
    #[default]
    Snapshot,

    /// The loop bound is re-read every step while children are appended
    /// in place, so children become eligible slots in the same pass.
    ///
    /// A slot yields a child only with probability `crossover_rate`.
    /// Expected pass length is `n / (1 - crossover_rate)`; at a rate of
    /// `1.0` the pass never ends. Across generations the population is
    /// scaled by about [`GaConfig::live_growth_per_generation`].
    Live,
}

/// Configuration for the Genetic Algorithm.
///
/// # Defaults
///
/// ```
/// use u_timetable::ga::GaConfig;
///
/// let config = GaConfig::default();
/// assert_eq!(config.population_size, 20);
/// assert_eq!(config.max_generations, 100);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_timetable::ga::{GaConfig, OffspringMode};
///
/// let config = GaConfig::default()
///     .with_population_size(50)
///     .with_crossover_rate(0.7)
///     .with_mutation_rate(0.2)
///     .with_offspring_mode(OffspringMode::Snapshot)
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GaConfig {
    /// Number of individuals built for generation 0.
    pub population_size: usize,

    /// Number of selection + offspring passes.
    pub max_generations: usize,

    /// Probability of recombining the drawn parents (0.0–1.0).
    ///
    /// In [`OffspringMode::Live`] a slot without crossover produces no
    /// child. In [`OffspringMode::Snapshot`] it produces a copy of the first
    /// parent, so the rate shapes offspring but not their number.
    pub crossover_rate: f64,

    /// Probability that a fresh child is mutated (0.0–1.0).
    pub mutation_rate: f64,

    /// How parents are drawn for crossover.
    pub parent_selection: ParentSelection,

    /// How the offspring loop is bounded.
    pub offspring_mode: OffspringMode,

    /// Whether to generate and evaluate individuals in parallel.
    ///
    /// Has no effect unless the `parallel` feature is enabled.
    pub parallel: bool,

    /// Random seed for reproducibility.
    ///
    /// `None` draws a fresh seed from OS entropy.
    pub seed: Option<u64>,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 20,
            max_generations: 100,
            crossover_rate: 0.5,
            mutation_rate: 0.1,
            parent_selection: ParentSelection::default(),
            offspring_mode: OffspringMode::default(),
            parallel: false,
            seed: None,
        }
    }
}

impl GaConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the number of generations.
    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = n;
        self
    }

    /// Sets the crossover rate.
    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        self.crossover_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the mutation rate.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the parent selection strategy.
    pub fn with_parent_selection(mut self, sel: ParentSelection) -> Self {
        self.parent_selection = sel;
        self
    }

    /// Sets the offspring loop mode.
    pub fn with_offspring_mode(mut self, mode: OffspringMode) -> Self {
        self.offspring_mode = mode;
        self
    }

    /// Enables or disables parallel generation and evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Preset that mirrors the classic timetabling driver step for step:
    /// 100 generations, uniform parents drawn with replacement, and a live
    /// offspring bound that lets the population compound within a pass.
    pub fn faithful(population_size: usize, mutation_rate: f64, crossover_rate: f64) -> Self {
        Self::default()
            .with_population_size(population_size)
            .with_mutation_rate(mutation_rate)
            .with_crossover_rate(crossover_rate)
            .with_offspring_mode(OffspringMode::Live)
    }

    /// Expected population scale factor per generation in
    /// [`OffspringMode::Live`]: truncation halves, the live pass multiplies
    /// by `1 / (1 - crossover_rate)`.
    ///
    /// Above 1.0 (rates over 0.5) the population grows geometrically.
    /// Infinite at a rate of 1.0.
    pub fn live_growth_per_generation(&self) -> f64 {
        if self.crossover_rate >= 1.0 {
            f64::INFINITY
        } else {
            0.5 / (1.0 - self.crossover_rate)
        }
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.population_size < 2 {
            return Err(Error::DegeneratePopulation {
                size: self.population_size,
            });
        }
        if self.max_generations == 0 {
            return Err(Error::InvalidConfig(
                "max_generations must be at least 1".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.crossover_rate) {
            return Err(Error::InvalidConfig(
                "crossover_rate must lie in [0, 1]".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(Error::InvalidConfig(
                "mutation_rate must lie in [0, 1]".into(),
            ));
        }
        if self.offspring_mode == OffspringMode::Live && self.crossover_rate >= 1.0 {
            return Err(Error::UnboundedGrowth {
                crossover_rate: self.crossover_rate,
            });
        }
        if let ParentSelection::Tournament(0) = self.parent_selection {
            return Err(Error::InvalidConfig(
                "tournament size must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
