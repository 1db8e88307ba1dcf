//! Class timetabling on top of the GA engine.
//!
//! A candidate places every course section in a room at a time slot.
//! Generation 0 is built by rejection sampling that respects two rules:
//!
//! - a room hosts at most one class per slot;
//! - a cohort (`level`, `program`) attends at most one class per slot.
//!
//! Later generations come from positional crossover and time mutation,
//! which do not re-check those rules.
//!
//! # Key Types
//!
//! - [`TimetableProblem`]: input data plus the [`GaProblem`](crate::ga::GaProblem) operators
//! - [`ScheduleCandidate`]: the individual
//! - [`FitnessModel`]: window count, optionally penalized by clashes

pub mod fitness;
pub mod generator;
mod models;
mod problem;

pub use fitness::{ConflictReport, FitnessModel};
pub use models::{
    ClassAssignment, CourseSection, DataProvider, Room, ScheduleCandidate, TimeWindow,
    TimetableInput,
};
pub use problem::{run_genetic_algorithm, ScheduledClass, TimetableProblem};
