//! Core trait definitions for the GA engine.
//!
//! The two central traits — [`Individual`] and [`GaProblem`] — define the
//! contract between the generic evolutionary loop and a domain problem
//! such as class timetabling.

use rand::Rng;

use crate::error::Result;

/// Marker trait for fitness values.
///
/// Fitness must support comparison and be cheaply copyable.
/// **Higher fitness is considered better** (maximization).
///
/// Implemented for `i64`, the score type of timetable candidates.
pub trait Fitness: PartialOrd + Copy + Send + Sync + std::fmt::Debug + 'static {
    /// Returns a value representing the worst possible fitness.
    ///
    /// Used for freshly built individuals that have not been evaluated.
    fn worst() -> Self;

    /// Converts the fitness to `f64` for logging and statistics.
    fn to_f64(self) -> f64;
}

impl Fitness for i64 {
    fn worst() -> Self {
        i64::MIN
    }

    fn to_f64(self) -> f64 {
        self as f64
    }
}

/// A candidate solution in the GA population.
///
/// Individuals cache their own fitness. The runner calls
/// [`GaProblem::evaluate`] and stores the result via
/// [`set_fitness`](Individual::set_fitness) whenever an individual is
/// created or changed.
///
/// # Implementing
///
/// ```ignore
/// #[derive(Clone)]
/// struct Bits {
///     genes: Vec<bool>,
///     fitness: i64,
/// }
///
/// impl Individual for Bits {
///     type Fitness = i64;
///     fn fitness(&self) -> i64 { self.fitness }
///     fn set_fitness(&mut self, f: i64) { self.fitness = f; }
/// }
/// ```
pub trait Individual: Clone + Send + Sync {
    /// The fitness type. Must implement [`Fitness`].
    type Fitness: Fitness;

    /// Returns the cached fitness of this individual.
    fn fitness(&self) -> Self::Fitness;

    /// Replaces the cached fitness.
    fn set_fitness(&mut self, fitness: Self::Fitness);
}

/// Defines a GA optimization problem.
///
/// Implementors supply:
///
/// 1. **Initialization**: how to build a random individual (may fail)
/// 2. **Evaluation**: how to score it
/// 3. **Crossover**: how to combine two parents into one child
/// 4. **Mutation**: how to perturb an individual in place
///
/// All problem data is held by the implementor and passed explicitly; the
/// engine never reads ambient state.
///
/// # Thread Safety
///
/// `GaProblem` must be `Send + Sync` because the runner may generate and
/// evaluate individuals in parallel when the `parallel` feature is enabled.
pub trait GaProblem: Send + Sync {
    /// The individual (solution) type for this problem.
    type Individual: Individual;

    /// Creates a random individual.
    ///
    /// Returns an error when no valid individual can be built, e.g. when
    /// the input is infeasible.
    fn create_individual<R: Rng>(&self, rng: &mut R) -> Result<Self::Individual>;

    /// Evaluates an individual and returns its fitness.
    ///
    /// Higher fitness values are considered better.
    fn evaluate(&self, individual: &Self::Individual) -> <Self::Individual as Individual>::Fitness;

    /// Produces one child by recombining two parents.
    ///
    /// The child's cached fitness need not be up to date; the runner
    /// re-evaluates it.
    fn crossover<R: Rng>(
        &self,
        parent1: &Self::Individual,
        parent2: &Self::Individual,
        rng: &mut R,
    ) -> Self::Individual;

    /// Mutates an individual in place.
    fn mutate<R: Rng>(&self, individual: &mut Self::Individual, rng: &mut R);

    /// Called at the end of each generation with the current best fitness.
    ///
    /// The default implementation is a no-op.
    fn on_generation(
        &self,
        _generation: usize,
        _best_fitness: <Self::Individual as Individual>::Fitness,
    ) {
    }
}
