//! Timetabling GA problem definition.
//!
//! Implements [`GaProblem`] for class timetabling and exposes the one-call
//! entry point [`run_genetic_algorithm`].

use log::{debug, warn};
use rand::Rng;

use super::fitness::{self, ConflictReport, FitnessModel};
use super::generator::{self, DEFAULT_MAX_ATTEMPTS};
use super::models::{CourseSection, DataProvider, Room, ScheduleCandidate, TimeWindow};
use crate::error::Result;
use crate::ga::operators::one_point_crossover;
use crate::ga::{GaConfig, GaProblem, GaResult, GaRunner};

/// A placed class resolved against the problem's course and room lists.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScheduledClass<'a> {
    /// The course, or `None` if the assignment indexes past the course list.
    pub course: Option<&'a CourseSection>,
    /// The room, or `None` if the assignment indexes past the room list.
    pub room: Option<&'a Room>,
    /// Time slot.
    pub time: i64,
}

/// GA problem definition for class timetabling.
///
/// Holds the whole input explicitly; operators never read global state.
///
/// # Example
/// ```
/// use u_timetable::ga::{GaConfig, GaRunner};
/// use u_timetable::timetable::{CourseSection, Room, TimeWindow, TimetableProblem};
///
/// let problem = TimetableProblem::new(
///     vec![CourseSection::new("a", 1, "A"), CourseSection::new("b", 2, "B")],
///     vec![Room::new("r1"), Room::new("r2")],
///     TimeWindow::new(8, 10).unwrap(),
/// )
/// .unwrap();
///
/// let result = GaRunner::run(&problem, &GaConfig::default().with_seed(1)).unwrap();
/// assert_eq!(result.best.len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct TimetableProblem {
    courses: Vec<CourseSection>,
    rooms: Vec<Room>,
    window: TimeWindow,
    max_attempts: usize,
    fitness_model: FitnessModel,
}

impl TimetableProblem {
    /// Creates a problem, rejecting an empty or inverted window.
    pub fn new(courses: Vec<CourseSection>, rooms: Vec<Room>, window: TimeWindow) -> Result<Self> {
        window.validate()?;
        if courses.is_empty() {
            warn!("timetable problem has no courses; every candidate will be empty");
        }
        Ok(Self {
            courses,
            rooms,
            window,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            fitness_model: FitnessModel::default(),
        })
    }

    /// Creates a problem from any data provider.
    pub fn from_provider<D: DataProvider + ?Sized>(provider: &D) -> Result<Self> {
        Self::new(
            provider.courses().to_vec(),
            provider.rooms().to_vec(),
            provider.window(),
        )
    }

    /// Sets the number of draws allowed per course during generation.
    pub fn with_max_attempts(mut self, attempts: usize) -> Self {
        self.max_attempts = attempts.max(1);
        self
    }

    /// Sets the scoring model.
    pub fn with_fitness_model(mut self, model: FitnessModel) -> Self {
        self.fitness_model = model;
        self
    }

    /// Courses, in placement order.
    pub fn courses(&self) -> &[CourseSection] {
        &self.courses
    }

    /// Rooms.
    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    /// Scheduling window.
    pub fn window(&self) -> TimeWindow {
        self.window
    }

    /// Draw cap per course.
    pub fn max_attempts(&self) -> usize {
        self.max_attempts
    }

    /// Active scoring model.
    pub fn fitness_model(&self) -> FitnessModel {
        self.fitness_model
    }

    /// Builds one conflict-free candidate with its fitness filled in.
    pub fn generate<R: Rng>(&self, rng: &mut R) -> Result<ScheduleCandidate> {
        let mut candidate = generator::generate(
            &self.courses,
            self.rooms.len(),
            self.window,
            self.max_attempts,
            rng,
        )?;
        candidate.fitness = self.calculate_fitness(&candidate);
        Ok(candidate)
    }

    /// Scores a candidate under the active model.
    pub fn calculate_fitness(&self, candidate: &ScheduleCandidate) -> i64 {
        fitness::evaluate(self.fitness_model, candidate, &self.courses, self.window)
    }

    /// Reports every rule the candidate breaks.
    pub fn validate_candidate(&self, candidate: &ScheduleCandidate) -> ConflictReport {
        fitness::conflicts(candidate, &self.courses, self.window)
    }

    /// Resolves assignment indices into course and room references.
    pub fn resolve<'a>(&'a self, candidate: &ScheduleCandidate) -> Vec<ScheduledClass<'a>> {
        candidate
            .assignments
            .iter()
            .map(|a| ScheduledClass {
                course: self.courses.get(a.course),
                room: self.rooms.get(a.room),
                time: a.time,
            })
            .collect()
    }

    /// Runs the search with `config`.
    pub fn solve(&self, config: &GaConfig) -> Result<GaResult<ScheduleCandidate>> {
        GaRunner::run(self, config)
    }
}

impl GaProblem for TimetableProblem {
    type Individual = ScheduleCandidate;

    fn create_individual<R: Rng>(&self, rng: &mut R) -> Result<ScheduleCandidate> {
        self.generate(rng)
    }

    fn evaluate(&self, individual: &ScheduleCandidate) -> i64 {
        self.calculate_fitness(individual)
    }

    /// Positional one-point crossover on the assignment sequences.
    ///
    /// The cut is drawn from `[0, parent1.len())`; the child takes
    /// `parent1`'s assignments before it and `parent2`'s from it onward.
    /// Course identity is ignored, so the child may repeat or drop courses
    /// and may contain clashes.
    fn crossover<R: Rng>(
        &self,
        parent1: &ScheduleCandidate,
        parent2: &ScheduleCandidate,
        rng: &mut R,
    ) -> ScheduleCandidate {
        let mut child = ScheduleCandidate::new(one_point_crossover(
            &parent1.assignments,
            &parent2.assignments,
            rng,
        ));
        child.fitness = self.calculate_fitness(&child);
        child
    }

    /// Redraws the time of one random assignment from `[start, end)`.
    ///
    /// The room is kept and no clash check is made.
    fn mutate<R: Rng>(&self, individual: &mut ScheduleCandidate, rng: &mut R) {
        if individual.assignments.is_empty() {
            return;
        }
        let idx = rng.random_range(0..individual.assignments.len());
        individual.assignments[idx].time = self.window.draw(rng);
        individual.fitness = self.calculate_fitness(individual);
    }

    fn on_generation(&self, generation: usize, best_fitness: i64) {
        debug!(
            "timetable generation {}: best fitness {} of {} courses",
            generation,
            best_fitness,
            self.courses.len()
        );
    }
}

/// Runs a timetable search and returns the best candidate.
///
/// Each returned [`ClassAssignment`](super::ClassAssignment) holds indices:
/// `course` indexes the `courses` slice and `room` indexes the `rooms`
/// slice passed in here, so `(courses[a.course], rooms[a.room], a.time)` is
/// the placed triple. Use [`TimetableProblem::resolve`] to get references
/// directly.
///
/// Uses [`GaConfig::default`] for everything except the three rates, so
/// the run lasts 100 generations with [`OffspringMode::Snapshot`](crate::ga::OffspringMode::Snapshot)
/// refilling and a fresh random seed. Build a [`TimetableProblem`] and call
/// [`TimetableProblem::solve`] for full control.
pub fn run_genetic_algorithm(
    population_size: usize,
    mutation_rate: f64,
    crossover_rate: f64,
    courses: &[CourseSection],
    rooms: &[Room],
    constraints: TimeWindow,
) -> Result<ScheduleCandidate> {
    let problem = TimetableProblem::new(courses.to_vec(), rooms.to_vec(), constraints)?;
    let config = GaConfig::default()
        .with_population_size(population_size)
        .with_mutation_rate(mutation_rate)
        .with_crossover_rate(crossover_rate);
    Ok(problem.solve(&config)?.best)
}
