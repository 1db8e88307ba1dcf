//! Genetic Algorithm engine.
//!
//! A generic GA built on trait-based abstractions. A problem plugs in by
//! implementing [`GaProblem`], which specifies how to create, evaluate,
//! crossover, and mutate individuals.
//!
//! # Core Traits
//!
//! - [`Individual`]: A candidate solution carrying its cached fitness
//! - [`GaProblem`]: Problem definition — initialization, evaluation, operators
//!
//! # Key Types
//!
//! - [`GaConfig`]: Algorithm parameters (population size, rates, offspring mode)
//! - [`GaRunner`]: Executes the evolutionary loop
//! - [`GaResult`]: Final result with per-generation statistics
//!
//! # Generation Step
//!
//! 1. Truncation: sort by descending fitness, keep the better half
//! 2. Offspring: draw parents, recombine, maybe mutate, append
//!
//! # Submodules
//!
//! - [`operators`]: Positional one-point crossover over sequences
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*

mod config;
pub mod operators;
mod runner;
mod selection;
mod types;

pub use config::{GaConfig, OffspringMode};
pub use runner::{GaResult, GaRunner, GenerationStats};
pub use selection::{sort_descending, truncate, ParentSelection};
pub use types::{Fitness, GaProblem, Individual};
