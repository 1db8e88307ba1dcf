//! Domain records for class timetabling.
//!
//! Courses and rooms are held once by the problem; assignments refer to
//! them by index so candidates stay small and cheap to clone.

use std::collections::BTreeMap;

use rand::Rng;

use crate::error::{Error, Result};
use crate::ga::{Fitness, Individual};

/// A course section to be placed.
///
/// Two sections with the same `(level, program)` belong to the same cohort
/// and must not run at the same time.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CourseSection {
    /// Section identifier.
    #[cfg_attr(feature = "serde", serde(default))]
    pub id: String,
    /// Year or level of study.
    pub level: u32,
    /// Degree program.
    pub program: String,
    /// Descriptive fields carried through unchanged (title, teacher, ...).
    #[cfg_attr(feature = "serde", serde(default))]
    pub attributes: BTreeMap<String, String>,
}

impl CourseSection {
    /// Creates a section with no extra attributes.
    pub fn new(id: impl Into<String>, level: u32, program: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            level,
            program: program.into(),
            attributes: BTreeMap::new(),
        }
    }

    /// Adds a pass-through attribute.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// The cohort key used for time conflicts.
    pub fn cohort(&self) -> (u32, &str) {
        (self.level, self.program.as_str())
    }
}

/// A room. Only its identity matters to the search.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Room {
    /// Room identifier.
    pub id: String,
}

impl Room {
    /// Creates a room.
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

/// The scheduling window.
///
/// Times are drawn from the half-open range `[start, end)`. Fitness scoring
/// counts times in the closed range `[start, end]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimeWindow {
    /// First time slot.
    pub start: i64,
    /// One past the last drawable slot.
    pub end: i64,
}

impl TimeWindow {
    /// Creates a window, rejecting `end <= start`.
    pub fn new(start: i64, end: i64) -> Result<Self> {
        let window = Self { start, end };
        window.validate()?;
        Ok(window)
    }

    /// Checks `end > start`.
    pub fn validate(&self) -> Result<()> {
        if self.end <= self.start {
            return Err(Error::InvalidConstraint {
                start: self.start,
                end: self.end,
            });
        }
        Ok(())
    }

    /// Number of drawable slots.
    pub fn width(&self) -> u64 {
        if self.end <= self.start {
            0
        } else {
            self.end.abs_diff(self.start)
        }
    }

    /// Whether `time` is a drawable slot, `start <= time < end`.
    pub fn contains(&self, time: i64) -> bool {
        (self.start..self.end).contains(&time)
    }

    /// Whether `time` counts toward fitness, `start <= time <= end`.
    pub fn scores(&self, time: i64) -> bool {
        (self.start..=self.end).contains(&time)
    }

    /// Draws a slot uniformly from `[start, end)`.
    ///
    /// # Panics
    /// Panics if the window is empty; validate it first.
    pub fn draw<R: Rng>(&self, rng: &mut R) -> i64 {
        rng.random_range(self.start..self.end)
    }
}

/// One course placed in one room at one time.
///
/// `course` and `room` index the problem's course and room lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClassAssignment {
    /// Index into the course list.
    pub course: usize,
    /// Index into the room list.
    pub room: usize,
    /// Time slot.
    pub time: i64,
}

impl ClassAssignment {
    /// Creates an assignment.
    pub fn new(course: usize, room: usize, time: i64) -> Self {
        Self { course, room, time }
    }
}

/// A complete proposed timetable and its cached fitness.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScheduleCandidate {
    /// Assignments, one per course when freshly generated.
    pub assignments: Vec<ClassAssignment>,
    /// Cached fitness; higher is better.
    pub fitness: i64,
}

impl ScheduleCandidate {
    /// Wraps assignments with an unevaluated fitness.
    pub fn new(assignments: Vec<ClassAssignment>) -> Self {
        Self {
            assignments,
            fitness: i64::worst(),
        }
    }

    /// Number of assignments.
    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    /// Whether the candidate has no assignments.
    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }
}

impl Individual for ScheduleCandidate {
    type Fitness = i64;

    fn fitness(&self) -> i64 {
        self.fitness
    }

    fn set_fitness(&mut self, fitness: i64) {
        self.fitness = fitness;
    }
}

/// Read access to the timetabling input.
///
/// Loading from files, databases, or services happens outside this crate;
/// anything that can hand over courses, rooms, and a window can drive a run.
pub trait DataProvider {
    /// Courses in placement order.
    fn courses(&self) -> &[CourseSection];
    /// Available rooms.
    fn rooms(&self) -> &[Room];
    /// Scheduling window.
    fn window(&self) -> TimeWindow;
}

/// Owned input record, shaped as `{ courses, rooms, constraints }`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimetableInput {
    /// Courses in placement order.
    pub courses: Vec<CourseSection>,
    /// Available rooms.
    pub rooms: Vec<Room>,
    /// Scheduling window.
    pub constraints: TimeWindow,
}

impl DataProvider for TimetableInput {
    fn courses(&self) -> &[CourseSection] {
        &self.courses
    }

    fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    fn window(&self) -> TimeWindow {
        self.constraints
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_window_rejects_empty_and_inverted() {
        assert_eq!(
            TimeWindow::new(8, 8),
            Err(Error::InvalidConstraint { start: 8, end: 8 })
        );
        assert!(TimeWindow::new(10, 8).is_err());
        assert!(TimeWindow::new(8, 9).is_ok());
    }

    #[test]
    fn test_window_bounds_are_asymmetric() {
        let w = TimeWindow::new(8, 10).unwrap();
        assert_eq!(w.width(), 2);
        assert!(w.contains(8));
        assert!(w.contains(9));
        assert!(!w.contains(10));
        assert!(w.scores(10));
        assert!(!w.scores(7));
        assert!(!w.scores(11));
    }

    #[test]
    fn test_window_draw_in_range() {
        let w = TimeWindow::new(-3, 2).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..500 {
            assert!(w.contains(w.draw(&mut rng)));
        }
    }

    #[test]
    fn test_course_cohort_and_attributes() {
        let c = CourseSection::new("MATH101", 1, "A").with_attribute("title", "Calculus");
        assert_eq!(c.cohort(), (1, "A"));
        assert_eq!(c.attributes.get("title").map(String::as_str), Some("Calculus"));
    }

    #[test]
    fn test_candidate_individual() {
        let mut cand = ScheduleCandidate::new(vec![ClassAssignment::new(0, 0, 8)]);
        assert_eq!(cand.fitness(), i64::MIN);
        cand.set_fitness(1);
        assert_eq!(cand.fitness, 1);
        assert_eq!(cand.len(), 1);
        assert!(!cand.is_empty());
    }

    #[test]
    fn test_input_as_provider() {
        let input = TimetableInput {
            courses: vec![CourseSection::new("c", 1, "A")],
            rooms: vec![Room::new("r1"), Room::new("r2")],
            constraints: TimeWindow { start: 8, end: 10 },
        };
        assert_eq!(input.courses().len(), 1);
        assert_eq!(input.rooms().len(), 2);
        assert_eq!(input.window().end, 10);
    }
}
