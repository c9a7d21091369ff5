use std::collections::{BTreeMap, BTreeSet};

use derive_more::{Deref, Display};

use crate::{
    CreateError, DayNumber, DeleteError, Exercise, ExerciseCatalog, ExerciseID, Gender,
    MembershipID, Name, PositionError, ReadError, ValidationError, id::entity_id,
};

#[allow(async_fn_in_trait)]
pub trait TrainingProgramService {
    async fn get_training_programs(&self) -> Result<Vec<TrainingProgram>, ReadError>;
    async fn get_training_program(
        &self,
        id: TrainingProgramID,
    ) -> Result<TrainingProgram, ReadError>;
    async fn create_training_program(
        &self,
        program: TrainingProgram,
    ) -> Result<TrainingProgram, CreateError>;
    async fn delete_training_program(
        &self,
        id: TrainingProgramID,
    ) -> Result<TrainingProgramID, DeleteError>;

    fn validate_period_weeks(
        &self,
        start_week: &str,
        end_week: &str,
    ) -> Result<(Week, Week), ValidationError> {
        let start =
            Week::try_from(start_week).map_err(|err| ValidationError::Other(err.into()))?;
        let end = Week::try_from(end_week).map_err(|err| ValidationError::Other(err.into()))?;
        if end < start {
            return Err(ValidationError::Other(
                PeriodError::EndBeforeStart { start, end }.into(),
            ));
        }
        Ok((start, end))
    }

    fn validate_program_duration(
        &self,
        duration: &str,
    ) -> Result<ProgramDuration, ValidationError> {
        match duration.trim().parse::<u32>() {
            Ok(weeks) => {
                ProgramDuration::new(weeks).map_err(|err| ValidationError::Other(err.into()))
            }
            Err(_) => Err(ValidationError::Other(
                "Duration must be a positive whole number".into(),
            )),
        }
    }
}

/// Each endpoint of the admin API stores one part of a program independently.
#[allow(async_fn_in_trait)]
pub trait TrainingProgramRepository {
    async fn read_training_programs(&self) -> Result<Vec<TrainingProgram>, ReadError>;
    async fn read_training_program(
        &self,
        id: TrainingProgramID,
    ) -> Result<TrainingProgram, ReadError>;
    async fn create_training_program(
        &self,
        program: TrainingProgram,
    ) -> Result<TrainingProgram, CreateError>;
    async fn delete_training_program(
        &self,
        id: TrainingProgramID,
    ) -> Result<TrainingProgramID, DeleteError>;

    async fn read_program_periods(
        &self,
        program_id: TrainingProgramID,
    ) -> Result<Vec<Period>, ReadError>;
    async fn create_program_period(
        &self,
        program_id: TrainingProgramID,
        period: Period,
    ) -> Result<Period, CreateError>;

    async fn read_program_workouts(
        &self,
        program_id: TrainingProgramID,
    ) -> Result<Vec<ProgramWorkout>, ReadError>;
    async fn create_program_workout(
        &self,
        program_id: TrainingProgramID,
        program_workout: ProgramWorkout,
    ) -> Result<ProgramWorkout, CreateError>;

    async fn create_workout(&self, workout: Workout) -> Result<Workout, CreateError>;
    async fn delete_workout(&self, id: WorkoutID) -> Result<WorkoutID, DeleteError>;

    async fn read_workout_exercises(
        &self,
        workout_id: WorkoutID,
    ) -> Result<Vec<WorkoutExercise>, ReadError>;
    async fn create_workout_exercise(
        &self,
        workout_id: WorkoutID,
        workout_exercise: WorkoutExercise,
    ) -> Result<WorkoutExercise, CreateError>;
}

entity_id!(TrainingProgramID);
entity_id!(PeriodID);
entity_id!(ProgramWorkoutID);
entity_id!(WorkoutID);
entity_id!(WorkoutExerciseID);

#[derive(Debug, Default, Display, Clone, Copy, PartialEq, Eq)]
pub enum Difficulty {
    #[default]
    #[display("easy")]
    Easy,
    #[display("medium")]
    Medium,
    #[display("hard")]
    Hard,
}

#[derive(Deref, Display, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Week(u32);

impl Week {
    pub fn new(value: u32) -> Result<Self, WeekError> {
        if value == 0 {
            return Err(WeekError::Zero);
        }
        Ok(Self(value))
    }
}

impl TryFrom<&str> for Week {
    type Error = WeekError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().parse::<u32>() {
            Ok(parsed_value) => Week::new(parsed_value),
            Err(_) => Err(WeekError::ParseError),
        }
    }
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum WeekError {
    #[error("Week must be 1 or greater")]
    Zero,
    #[error("Week must be a whole number")]
    ParseError,
}

/// Length of a program in weeks.
#[derive(Deref, Display, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgramDuration(u32);

impl ProgramDuration {
    pub fn new(weeks: u32) -> Result<Self, DurationError> {
        if weeks == 0 {
            return Err(DurationError::NotPositive);
        }
        Ok(Self(weeks))
    }
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum DurationError {
    #[error("Duration must be greater than 0")]
    NotPositive,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrainingProgram {
    pub id: TrainingProgramID,
    pub name: Name,
    pub description: String,
    pub difficulty: Difficulty,
    pub duration: ProgramDuration,
    pub gender: Gender,
    pub goal: String,
    pub membership_id: Option<MembershipID>,
    pub periods: Vec<Period>,
    pub workouts: Vec<ProgramWorkout>,
}

impl TrainingProgram {
    #[must_use]
    pub fn new(name: Name, duration: ProgramDuration) -> Self {
        Self {
            id: TrainingProgramID::nil(),
            name,
            description: String::new(),
            difficulty: Difficulty::default(),
            duration,
            gender: Gender::default(),
            goal: String::new(),
            membership_id: None,
            periods: vec![],
            workouts: vec![],
        }
    }

    pub fn add_period(
        &mut self,
        name: &str,
        start_week: Week,
        end_week: Week,
    ) -> Result<PeriodID, PeriodError> {
        let period = Period::new(PeriodID::random(), name, start_week, end_week)?;
        let id = period.id;
        self.periods.push(period);
        Ok(id)
    }

    /// Removes the period together with all workouts placed in it.
    pub fn remove_period(&mut self, id: PeriodID) -> Option<Period> {
        let index = self.periods.iter().position(|p| p.id == id)?;
        self.workouts.retain(|w| w.period_id != Some(id));
        Some(self.periods.remove(index))
    }

    /// Periods may overlap, the first matching period wins.
    #[must_use]
    pub fn period_for_week(&self, week: Week) -> Option<&Period> {
        self.periods.iter().find(|p| p.contains(week))
    }

    pub fn add_workout_to_program(
        &mut self,
        period_id: Option<PeriodID>,
        week_number: Week,
        day_number: DayNumber,
        workout: Workout,
    ) -> Result<ProgramWorkoutID, PositionError> {
        let order = self
            .workouts
            .iter()
            .filter(|w| w.is_in_slot(period_id, week_number, day_number))
            .map(|w| w.order)
            .max()
            .unwrap_or(0)
            .checked_add(1)
            .ok_or(PositionError::Overflow)?;
        let id = ProgramWorkoutID::random();
        self.workouts.push(ProgramWorkout {
            id,
            period_id,
            week_number,
            day_number,
            order,
            workout,
        });
        Ok(id)
    }

    pub fn remove_workout(&mut self, id: ProgramWorkoutID) -> Option<ProgramWorkout> {
        let index = self.workouts.iter().position(|w| w.id == id)?;
        Some(self.workouts.remove(index))
    }

    #[must_use]
    pub fn workouts_for(
        &self,
        period_id: Option<PeriodID>,
        week_number: Week,
        day_number: DayNumber,
    ) -> Vec<&ProgramWorkout> {
        let mut result = self
            .workouts
            .iter()
            .filter(|w| w.is_in_slot(period_id, week_number, day_number))
            .collect::<Vec<_>>();
        result.sort_by_key(|w| w.order);
        result
    }

    pub fn workout_mut(&mut self, id: ProgramWorkoutID) -> Option<&mut Workout> {
        self.workouts
            .iter_mut()
            .find(|w| w.id == id)
            .map(|w| &mut w.workout)
    }

    /// Exchanges the order of two workouts placed in the same slot.
    pub fn swap_workouts(&mut self, a: ProgramWorkoutID, b: ProgramWorkoutID) -> bool {
        let (Some(i), Some(j)) = (
            self.workouts.iter().position(|w| w.id == a),
            self.workouts.iter().position(|w| w.id == b),
        ) else {
            return false;
        };
        let other = &self.workouts[j];
        if !self.workouts[i].is_in_slot(other.period_id, other.week_number, other.day_number) {
            return false;
        }
        let order = self.workouts[i].order;
        self.workouts[i].order = self.workouts[j].order;
        self.workouts[j].order = order;
        true
    }

    #[must_use]
    pub fn weeks(&self) -> BTreeSet<Week> {
        self.workouts.iter().map(|w| w.week_number).collect()
    }

    #[must_use]
    pub fn num_sets(&self) -> u32 {
        self.workouts.iter().map(|w| w.workout.num_sets()).sum()
    }

    #[must_use]
    pub fn missing_exercises(&self, catalog: &ExerciseCatalog) -> BTreeSet<ExerciseID> {
        self.workouts
            .iter()
            .flat_map(|w| w.workout.missing_exercises(catalog))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Period {
    pub id: PeriodID,
    pub name: String,
    pub start_week: Week,
    pub end_week: Week,
}

impl Period {
    pub fn new(
        id: PeriodID,
        name: &str,
        start_week: Week,
        end_week: Week,
    ) -> Result<Self, PeriodError> {
        if end_week < start_week {
            return Err(PeriodError::EndBeforeStart {
                start: start_week,
                end: end_week,
            });
        }
        Ok(Self {
            id,
            name: name.trim().to_string(),
            start_week,
            end_week,
        })
    }

    #[must_use]
    pub fn contains(&self, week: Week) -> bool {
        self.start_week <= week && week <= self.end_week
    }
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum PeriodError {
    #[error("End week must not be before start week ({end} < {start})")]
    EndBeforeStart { start: Week, end: Week },
    #[error(transparent)]
    Week(#[from] WeekError),
}

/// Placement of a workout on a given day of a program week.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgramWorkout {
    pub id: ProgramWorkoutID,
    pub period_id: Option<PeriodID>,
    pub week_number: Week,
    pub day_number: DayNumber,
    pub order: u32,
    pub workout: Workout,
}

impl ProgramWorkout {
    fn is_in_slot(
        &self,
        period_id: Option<PeriodID>,
        week_number: Week,
        day_number: DayNumber,
    ) -> bool {
        self.period_id == period_id
            && self.week_number == week_number
            && self.day_number == day_number
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Workout {
    pub id: WorkoutID,
    pub name: Name,
    pub description: String,
    pub exercises: Vec<WorkoutExercise>,
}

impl Workout {
    #[must_use]
    pub fn new(name: Name) -> Self {
        Self {
            id: WorkoutID::nil(),
            name,
            description: String::new(),
            exercises: vec![],
        }
    }

    pub fn add_exercise(
        &mut self,
        exercise: &Exercise,
        prescription: Prescription,
    ) -> Result<&WorkoutExercise, PositionError> {
        let order = self
            .exercises
            .iter()
            .map(|e| e.order)
            .max()
            .unwrap_or(0)
            .checked_add(1)
            .ok_or(PositionError::Overflow)?;
        self.exercises.push(WorkoutExercise {
            id: WorkoutExerciseID::random(),
            exercise_id: exercise.id,
            order,
            prescription,
        });
        Ok(&self.exercises[self.exercises.len() - 1])
    }

    pub fn remove_exercise(&mut self, index: usize) -> Option<WorkoutExercise> {
        (index < self.exercises.len()).then(|| self.exercises.remove(index))
    }

    /// Moves an exercise to another position.
    ///
    /// The set of order values is kept, only their assignment to exercises changes.
    pub fn move_exercise(&mut self, from: usize, to: usize) -> Result<(), WorkoutExerciseError> {
        if from >= self.exercises.len() {
            return Err(WorkoutExerciseError::IndexOutOfRange(from));
        }
        if to >= self.exercises.len() {
            return Err(WorkoutExerciseError::IndexOutOfRange(to));
        }
        let mut orders = self.exercises.iter().map(|e| e.order).collect::<Vec<_>>();
        orders.sort_unstable();
        let exercise = self.exercises.remove(from);
        self.exercises.insert(to, exercise);
        for (exercise, order) in self.exercises.iter_mut().zip(orders) {
            exercise.order = order;
        }
        Ok(())
    }

    /// Exercises sharing a superset group, each group ordered by its superset order.
    #[must_use]
    pub fn superset_groups(&self) -> BTreeMap<&str, Vec<&WorkoutExercise>> {
        let mut result: BTreeMap<&str, Vec<&WorkoutExercise>> = BTreeMap::new();
        for exercise in &self.exercises {
            if let Some(group) = exercise.prescription.superset_group.as_deref() {
                result.entry(group).or_default().push(exercise);
            }
        }
        for exercises in result.values_mut() {
            exercises.sort_by_key(|e| (e.prescription.superset_order, e.order));
        }
        result
    }

    #[must_use]
    pub fn num_sets(&self) -> u32 {
        self.exercises.iter().map(|e| e.prescription.sets).sum()
    }

    #[must_use]
    pub fn missing_exercises(&self, catalog: &ExerciseCatalog) -> Vec<ExerciseID> {
        self.exercises
            .iter()
            .map(|e| e.exercise_id)
            .filter(|id| catalog.lookup(*id).is_none())
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutExercise {
    pub id: WorkoutExerciseID,
    pub exercise_id: ExerciseID,
    pub order: u32,
    pub prescription: Prescription,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Prescription {
    pub sets: u32,
    /// Free-form, e.g. `10` or `8-12`.
    pub reps: String,
    /// Rest between sets in seconds.
    pub rest_time: u32,
    pub tempo: Option<String>,
    pub superset_group: Option<String>,
    pub superset_order: Option<u32>,
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum WorkoutExerciseError {
    #[error("No exercise at position {0}")]
    IndexOutOfRange(usize),
}
