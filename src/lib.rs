//! Class timetabling by genetic search.
//!
//! Given course sections, rooms, and a time window, the search evolves a
//! population of candidate timetables and returns the best one found:
//!
//! - **Generation**: each candidate is built by randomized rejection
//!   sampling so that no room and no cohort is double-booked.
//! - **Fitness**: the number of assignments inside the window, optionally
//!   penalized by clashes.
//! - **Selection**: the better half of the population survives.
//! - **Crossover / Mutation**: one-point positional recombination and
//!   single-assignment time redraws.
//!
//! # Architecture
//!
//! [`ga`] is a generic evolutionary engine driven by the
//! [`GaProblem`](ga::GaProblem) trait. [`timetable`] implements that trait
//! for class scheduling. Loading input data and formatting results are
//! left to callers.
//!
//! # Example
//!
//! ```
//! use u_timetable::timetable::{run_genetic_algorithm, CourseSection, Room, TimeWindow};
//!
//! let courses = vec![CourseSection::new("a", 1, "A"), CourseSection::new("b", 2, "B")];
//! let rooms = vec![Room::new("1"), Room::new("2")];
//! let window = TimeWindow::new(8, 10)?;
//!
//! let best = run_genetic_algorithm(20, 0.1, 0.5, &courses, &rooms, window)?;
//! assert_eq!(best.fitness, 2);
//! # Ok::<(), u_timetable::Error>(())
//! ```

pub mod error;
pub mod ga;
pub mod timetable;

pub use error::{Error, Result};
