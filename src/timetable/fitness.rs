//! Timetable scoring.
//!
//! The base score counts assignments whose time lies inside the window,
//! **inclusive of `end`**. It does not look at clashes: a freshly generated
//! candidate always scores its assignment count, and only recombination or
//! mutation can make scores differ. [`FitnessModel::ConflictPenalized`]
//! subtracts the clashes reported by [`conflicts`] for callers that want
//! selection to push toward valid timetables.

use std::collections::{HashMap, HashSet};

use super::models::{CourseSection, ScheduleCandidate, TimeWindow};

/// How a candidate is scored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FitnessModel {
    /// Number of assignments with `start <= time <= end`.
    #[default]
    WindowCount,
    /// `WindowCount` minus [`ConflictReport::penalty`].
    ConflictPenalized,
}

/// Clash counts for one candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConflictReport {
    /// Assignments reusing a `(room, time)` already taken.
    pub room_clashes: usize,
    /// Assignments reusing a `(level, program, time)` already taken.
    pub cohort_clashes: usize,
    /// Courses with no assignment.
    pub missing_courses: usize,
    /// Assignments beyond the first for the same course.
    pub duplicate_courses: usize,
    /// Assignments whose time is outside `[start, end)`.
    pub out_of_window: usize,
}

impl ConflictReport {
    /// Penalty used by [`FitnessModel::ConflictPenalized`].
    ///
    /// Window violations are already reflected in the base score and are
    /// not counted again.
    pub fn penalty(&self) -> usize {
        self.room_clashes + self.cohort_clashes + self.missing_courses + self.duplicate_courses
    }

    /// Whether the candidate satisfies every placement rule.
    pub fn is_clean(&self) -> bool {
        self.penalty() == 0 && self.out_of_window == 0
    }
}

/// Counts assignments with `window.start <= time <= window.end`.
pub fn window_count(candidate: &ScheduleCandidate, window: TimeWindow) -> i64 {
    candidate
        .assignments
        .iter()
        .filter(|a| window.scores(a.time))
        .count() as i64
}

/// Scores a candidate under `model`.
pub fn evaluate(
    model: FitnessModel,
    candidate: &ScheduleCandidate,
    courses: &[CourseSection],
    window: TimeWindow,
) -> i64 {
    let base = window_count(candidate, window);
    match model {
        FitnessModel::WindowCount => base,
        FitnessModel::ConflictPenalized => {
            base - conflicts(candidate, courses, window).penalty() as i64
        }
    }
}

/// Audits a candidate against the placement rules.
///
/// Assignments pointing at a course index outside `courses` count as
/// duplicates of nothing and are ignored for cohort checks.
pub fn conflicts(
    candidate: &ScheduleCandidate,
    courses: &[CourseSection],
    window: TimeWindow,
) -> ConflictReport {
    let mut report = ConflictReport::default();
    let mut rooms_taken = HashSet::new();
    let mut cohorts_taken = HashSet::new();
    let mut placements: HashMap<usize, usize> = HashMap::new();

    for a in &candidate.assignments {
        if !rooms_taken.insert((a.room, a.time)) {
            report.room_clashes += 1;
        }
        if let Some(course) = courses.get(a.course) {
            let (level, program) = course.cohort();
            if !cohorts_taken.insert((level, program, a.time)) {
                report.cohort_clashes += 1;
            }
        }
        if !window.contains(a.time) {
            report.out_of_window += 1;
        }
        *placements.entry(a.course).or_insert(0) += 1;
    }

    report.missing_courses = (0..courses.len())
        .filter(|idx| !placements.contains_key(idx))
        .count();
    report.duplicate_courses = placements.values().map(|&n| n - 1).sum();
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timetable::models::ClassAssignment;

    fn courses() -> Vec<CourseSection> {
        vec![
            CourseSection::new("a", 1, "A"),
            CourseSection::new("b", 1, "A"),
            CourseSection::new("c", 2, "B"),
        ]
    }

    fn cand(assignments: &[(usize, usize, i64)]) -> ScheduleCandidate {
        ScheduleCandidate::new(
            assignments
                .iter()
                .map(|&(c, r, t)| ClassAssignment::new(c, r, t))
                .collect(),
        )
    }

    #[test]
    fn test_window_count_includes_end() {
        let w = TimeWindow::new(8, 10).unwrap();
        let c = cand(&[(0, 0, 8), (1, 0, 10), (2, 0, 11), (0, 1, 7)]);
        assert_eq!(window_count(&c, w), 2);
    }

    #[test]
    fn test_window_count_ignores_clashes() {
        let w = TimeWindow::new(8, 10).unwrap();
        // Same room, same time, same cohort: still scores 2.
        let c = cand(&[(0, 0, 8), (1, 0, 8)]);
        assert_eq!(evaluate(FitnessModel::WindowCount, &c, &courses(), w), 2);
    }

    #[test]
    fn test_clean_candidate() {
        let w = TimeWindow::new(8, 10).unwrap();
        let c = cand(&[(0, 0, 8), (1, 0, 9), (2, 1, 8)]);
        let report = conflicts(&c, &courses(), w);
        assert!(report.is_clean(), "{report:?}");
        assert_eq!(evaluate(FitnessModel::ConflictPenalized, &c, &courses(), w), 3);
    }

    #[test]
    fn test_conflict_report_counts() {
        let w = TimeWindow::new(8, 10).unwrap();
        // Course 0 twice (room+cohort clash), course 1 missing, course 2 at `end`.
        let c = cand(&[(0, 0, 8), (0, 0, 8), (2, 1, 10)]);
        let report = conflicts(&c, &courses(), w);
        assert_eq!(
            report,
            ConflictReport {
                room_clashes: 1,
                cohort_clashes: 1,
                missing_courses: 1,
                duplicate_courses: 1,
                out_of_window: 1,
            }
        );
        assert_eq!(report.penalty(), 4);
        // Base 3 (time 10 still scores), minus 4.
        assert_eq!(evaluate(FitnessModel::ConflictPenalized, &c, &courses(), w), -1);
    }

    #[test]
    fn test_empty_candidate() {
        let w = TimeWindow::new(0, 1).unwrap();
        let c = cand(&[]);
        assert_eq!(window_count(&c, w), 0);
        assert_eq!(conflicts(&c, &courses(), w).missing_courses, 3);
    }
}
