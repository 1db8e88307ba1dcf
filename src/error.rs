//! Error types.
//!
//! Every failure aborts the run: there is no partial result and nothing is
//! recovered mid-search.

use thiserror::Error;

/// Errors raised while configuring or running a timetable search.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// The time window is empty or inverted (`end <= start`).
    #[error("invalid time window: end ({end}) must be greater than start ({start})")]
    InvalidConstraint {
        /// Window start.
        start: i64,
        /// Window end (exclusive for drawn times).
        end: i64,
    },

    /// The constructive generator could not place a course.
    ///
    /// `attempts` is 0 when a capacity check proved the placement
    /// impossible before any sampling happened.
    #[error("cannot place course #{course} after {attempts} attempts: room/time domain too small")]
    InfeasibleGeneration {
        /// Index of the course (input order) that could not be placed.
        course: usize,
        /// Number of random draws spent on that course.
        attempts: usize,
    },

    /// The population is too small for selection to be meaningful.
    #[error("degenerate population of size {size}: at least 2 candidates are required")]
    DegeneratePopulation {
        /// Offending population size.
        size: usize,
    },

    /// Live offspring production would never terminate.
    #[error("unbounded population growth: crossover_rate {crossover_rate} with live offspring bound never terminates")]
    UnboundedGrowth {
        /// The configured crossover rate.
        crossover_rate: f64,
    },

    /// Any other invalid parameter.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Crate result alias.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_values() {
        let e = Error::InvalidConstraint { start: 9, end: 8 };
        assert_eq!(
            e.to_string(),
            "invalid time window: end (8) must be greater than start (9)"
        );

        let e = Error::InfeasibleGeneration {
            course: 1,
            attempts: 500,
        };
        assert!(e.to_string().contains("course #1"));
        assert!(e.to_string().contains("500 attempts"));
    }
}
