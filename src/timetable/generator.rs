//! Randomized constructive generation of timetables.
//!
//! Courses are placed one at a time, in input order, by rejection sampling:
//! draw a random room and a random slot, and accept the draw unless the room
//! is already taken at that slot or the course's cohort already has a class
//! then. There is no backtracking, so an unlucky prefix can leave a later
//! course with no legal slot; the attempt cap turns that into an error.

use std::collections::{HashMap, HashSet};

use rand::Rng;

use super::models::{ClassAssignment, CourseSection, ScheduleCandidate, TimeWindow};
use crate::error::{Error, Result};

/// Default number of draws allowed per course.
pub const DEFAULT_MAX_ATTEMPTS: usize = 10_000;

/// Builds one conflict-free candidate.
///
/// The returned candidate has exactly one assignment per course, in course
/// order, every time lies in `[window.start, window.end)`, no `(room, time)`
/// pair repeats and no `(level, program, time)` triple repeats. Its fitness
/// is left unevaluated.
///
/// # Errors
/// [`Error::InfeasibleGeneration`] if [`check_capacity`] fails or a course
/// exhausts `max_attempts` draws.
pub fn generate<R: Rng>(
    courses: &[CourseSection],
    room_count: usize,
    window: TimeWindow,
    max_attempts: usize,
    rng: &mut R,
) -> Result<ScheduleCandidate> {
    check_capacity(courses, room_count, window)?;

    let mut assignments = Vec::with_capacity(courses.len());
    let mut rooms_taken: HashSet<(usize, i64)> = HashSet::new();
    let mut cohorts_taken: HashSet<(u32, &str, i64)> = HashSet::new();

    for (idx, course) in courses.iter().enumerate() {
        let (level, program) = course.cohort();
        let mut attempts = 0;
        loop {
            if attempts == max_attempts {
                return Err(Error::InfeasibleGeneration {
                    course: idx,
                    attempts,
                });
            }
            attempts += 1;

            let room = rng.random_range(0..room_count);
            let time = window.draw(rng);

            if rooms_taken.contains(&(room, time))
                || cohorts_taken.contains(&(level, program, time))
            {
                continue;
            }

            rooms_taken.insert((room, time));
            cohorts_taken.insert((level, program, time));
            assignments.push(ClassAssignment::new(idx, room, time));
            break;
        }
    }

    Ok(ScheduleCandidate::new(assignments))
}

/// Rejects inputs no placement order can satisfy.
///
/// - Some course exists but there are no rooms.
/// - More courses than `(room, time)` pairs.
/// - A cohort with more courses than time slots.
///
/// The reported course is the first one that cannot fit.
pub fn check_capacity(courses: &[CourseSection], room_count: usize, window: TimeWindow) -> Result<()> {
    if courses.is_empty() {
        return Ok(());
    }
    if room_count == 0 {
        return Err(Error::InfeasibleGeneration {
            course: 0,
            attempts: 0,
        });
    }

    let width = window.width() as u128;
    let slots = width * room_count as u128;
    if courses.len() as u128 > slots {
        return Err(Error::InfeasibleGeneration {
            course: slots as usize,
            attempts: 0,
        });
    }

    let mut cohort_sizes: HashMap<(u32, &str), u128> = HashMap::new();
    for (idx, course) in courses.iter().enumerate() {
        let size = cohort_sizes.entry(course.cohort()).or_insert(0);
        *size += 1;
        if *size > width {
            return Err(Error::InfeasibleGeneration {
                course: idx,
                attempts: 0,
            });
        }
    }
    Ok(())
}
