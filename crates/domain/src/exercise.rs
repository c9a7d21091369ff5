use std::collections::BTreeMap;

use crate::{Name, ReadError, id::entity_id};

#[allow(async_fn_in_trait)]
pub trait ExerciseService {
    async fn get_exercises(&self) -> Result<Vec<Exercise>, ReadError>;

    async fn get_exercise_catalog(&self) -> Result<ExerciseCatalog, ReadError> {
        Ok(ExerciseCatalog::new(self.get_exercises().await?))
    }
}

#[allow(async_fn_in_trait)]
pub trait ExerciseRepository {
    async fn read_exercises(&self) -> Result<Vec<Exercise>, ReadError>;
}

entity_id!(ExerciseID);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exercise {
    pub id: ExerciseID,
    pub name: Name,
    pub muscle_group: Option<String>,
    pub equipment: Option<String>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ExerciseCatalog {
    exercises: BTreeMap<ExerciseID, Exercise>,
}

impl ExerciseCatalog {
    #[must_use]
    pub fn new(exercises: Vec<Exercise>) -> Self {
        Self {
            exercises: exercises.into_iter().map(|e| (e.id, e)).collect(),
        }
    }

    #[must_use]
    pub fn lookup(&self, id: ExerciseID) -> Option<&Exercise> {
        self.exercises.get(&id)
    }

    #[must_use]
    pub fn by_muscle_group(&self) -> BTreeMap<&str, Vec<&Exercise>> {
        let mut result: BTreeMap<&str, Vec<&Exercise>> = BTreeMap::new();
        for exercise in self.exercises.values() {
            result
                .entry(exercise.muscle_group.as_deref().unwrap_or_default())
                .or_default()
                .push(exercise);
        }
        result
    }
}
