//! Wire format of the admin API.
//!
//! Entities are exchanged as camelCase JSON. Entities which have not been stored yet are sent
//! without `id`.

use lazyfit_domain as domain;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

fn stored_id(id: Uuid) -> Option<Uuid> {
    (!id.is_nil()).then_some(id)
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ModelError {
    #[error(transparent)]
    InvalidName(#[from] domain::NameError),
    #[error(transparent)]
    InvalidQuantity(#[from] domain::QuantityError),
    #[error(transparent)]
    InvalidPosition(#[from] domain::PositionError),
    #[error(transparent)]
    InvalidPeriod(#[from] domain::PeriodError),
    #[error(transparent)]
    InvalidWeek(#[from] domain::WeekError),
    #[error(transparent)]
    InvalidDuration(#[from] domain::DurationError),
    #[error(transparent)]
    InvalidServings(#[from] domain::ServingsError),
    #[error("duplicate day {0}")]
    DuplicateDay(u32),
    #[error("duplicate meal {1} on day {0}")]
    DuplicateMeal(u32, u32),
    #[error("program workout {0} without workout")]
    MissingWorkout(Uuid),
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Unisex,
}

impl From<domain::Gender> for Gender {
    fn from(value: domain::Gender) -> Self {
        match value {
            domain::Gender::Male => Gender::Male,
            domain::Gender::Female => Gender::Female,
            domain::Gender::Unisex => Gender::Unisex,
        }
    }
}

impl From<Gender> for domain::Gender {
    fn from(value: Gender) -> Self {
        match value {
            Gender::Male => domain::Gender::Male,
            Gender::Female => domain::Gender::Female,
            Gender::Unisex => domain::Gender::Unisex,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl From<domain::Difficulty> for Difficulty {
    fn from(value: domain::Difficulty) -> Self {
        match value {
            domain::Difficulty::Easy => Difficulty::Easy,
            domain::Difficulty::Medium => Difficulty::Medium,
            domain::Difficulty::Hard => Difficulty::Hard,
        }
    }
}

impl From<Difficulty> for domain::Difficulty {
    fn from(value: Difficulty) -> Self {
        match value {
            Difficulty::Easy => domain::Difficulty::Easy,
            Difficulty::Medium => domain::Difficulty::Medium,
            Difficulty::Hard => domain::Difficulty::Hard,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FoodProduct {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
    pub calories: f32,
    pub protein: f32,
    pub carbs: f32,
    pub fat: f32,
}

impl From<&domain::FoodProduct> for FoodProduct {
    fn from(value: &domain::FoodProduct) -> Self {
        Self {
            id: *value.id,
            name: value.name.to_string(),
            category: value.category.clone(),
            calories: value.per_100.calories,
            protein: value.per_100.protein,
            carbs: value.per_100.carbs,
            fat: value.per_100.fat,
        }
    }
}

impl TryFrom<FoodProduct> for domain::FoodProduct {
    type Error = ModelError;

    fn try_from(value: FoodProduct) -> Result<Self, Self::Error> {
        Ok(Self {
            id: value.id.into(),
            name: domain::Name::new(&value.name)?,
            category: value.category,
            per_100: domain::Macros {
                calories: value.calories,
                protein: value.protein,
                carbs: value.carbs,
                fat: value.fat,
            },
        })
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct FoodProductPage {
    pub products: Vec<FoodProduct>,
    #[serde(default)]
    pub categories: Vec<String>,
    pub pages: u32,
}

impl TryFrom<FoodProductPage> for domain::FoodProductPage {
    type Error = ModelError;

    fn try_from(value: FoodProductPage) -> Result<Self, Self::Error> {
        Ok(Self {
            products: value
                .products
                .into_iter()
                .map(domain::FoodProduct::try_from)
                .collect::<Result<Vec<_>, _>>()?,
            categories: value.categories,
            pages: value.pages,
        })
    }
}

/// A meal item or a recipe ingredient.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FoodItem {
    pub food_product_id: Uuid,
    pub quantity: f32,
    pub calories: f32,
    pub protein: f32,
    pub carbs: f32,
    pub fat: f32,
}

impl From<&domain::FoodItem> for FoodItem {
    fn from(value: &domain::FoodItem) -> Self {
        Self {
            food_product_id: *value.food_product_id,
            quantity: *value.quantity,
            calories: value.macros.calories,
            protein: value.macros.protein,
            carbs: value.macros.carbs,
            fat: value.macros.fat,
        }
    }
}

impl TryFrom<FoodItem> for domain::FoodItem {
    type Error = ModelError;

    fn try_from(value: FoodItem) -> Result<Self, Self::Error> {
        Ok(Self {
            food_product_id: value.food_product_id.into(),
            quantity: domain::Quantity::new(value.quantity)?,
            macros: domain::Macros {
                calories: value.calories,
                protein: value.protein,
                carbs: value.carbs,
                fat: value.fat,
            },
        })
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NutritionPlan {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub gender: Gender,
    #[serde(default)]
    pub membership_id: Option<Uuid>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub video_url: Option<String>,
    #[serde(default)]
    pub is_published: bool,
    #[serde(default)]
    pub days: Vec<Day>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Day {
    pub day_number: u32,
    #[serde(default)]
    pub meals: Vec<Meal>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Meal {
    pub meal_number: u32,
    pub name: String,
    #[serde(default)]
    pub items: Vec<FoodItem>,
}

impl From<&domain::NutritionPlan> for NutritionPlan {
    fn from(value: &domain::NutritionPlan) -> Self {
        Self {
            id: stored_id(*value.id),
            name: value.name.to_string(),
            description: value.description.clone(),
            gender: value.gender.into(),
            membership_id: value.membership_id.map(|id| *id),
            image_url: value.image_url.clone(),
            video_url: value.video_url.clone(),
            is_published: value.is_published,
            days: value
                .days
                .iter()
                .map(|day| Day {
                    day_number: *day.day_number,
                    meals: day
                        .meals
                        .iter()
                        .map(|meal| Meal {
                            meal_number: *meal.meal_number,
                            name: meal.name.clone(),
                            items: meal.items.iter().map(FoodItem::from).collect(),
                        })
                        .collect(),
                })
                .collect(),
        }
    }
}

impl TryFrom<NutritionPlan> for domain::NutritionPlan {
    type Error = ModelError;

    fn try_from(value: NutritionPlan) -> Result<Self, Self::Error> {
        let mut days = value
            .days
            .into_iter()
            .map(domain::Day::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        days.sort_by_key(|d| d.day_number);
        if let Some(pair) = days.windows(2).find(|w| w[0].day_number == w[1].day_number) {
            return Err(ModelError::DuplicateDay(*pair[0].day_number));
        }
        let last_day_number = days.last().map_or(0, |d| *d.day_number);
        Ok(Self {
            id: value.id.map(domain::NutritionPlanID::from).unwrap_or_default(),
            name: domain::Name::new(&value.name)?,
            description: value.description,
            gender: value.gender.into(),
            membership_id: value.membership_id.map(domain::MembershipID::from),
            image_url: value.image_url,
            video_url: value.video_url,
            is_published: value.is_published,
            days,
            last_day_number,
        })
    }
}

impl TryFrom<Day> for domain::Day {
    type Error = ModelError;

    fn try_from(value: Day) -> Result<Self, Self::Error> {
        let day_number = domain::DayNumber::new(value.day_number)?;
        let mut meals = value
            .meals
            .into_iter()
            .map(domain::Meal::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        meals.sort_by_key(|m| m.meal_number);
        if let Some(pair) = meals.windows(2).find(|w| w[0].meal_number == w[1].meal_number) {
            return Err(ModelError::DuplicateMeal(
                value.day_number,
                *pair[0].meal_number,
            ));
        }
        Ok(Self { day_number, meals })
    }
}

impl TryFrom<Meal> for domain::Meal {
    type Error = ModelError;

    fn try_from(value: Meal) -> Result<Self, Self::Error> {
        Ok(Self {
            meal_number: domain::MealNumber::new(value.meal_number)?,
            name: value.name,
            items: value
                .items
                .into_iter()
                .map(domain::FoodItem::try_from)
                .collect::<Result<Vec<_>, _>>()?,
        })
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub muscle_group: Option<String>,
    #[serde(default)]
    pub equipment: Option<String>,
}

impl TryFrom<Exercise> for domain::Exercise {
    type Error = ModelError;

    fn try_from(value: Exercise) -> Result<Self, Self::Error> {
        Ok(Self {
            id: value.id.into(),
            name: domain::Name::new(&value.name)?,
            muscle_group: value.muscle_group,
            equipment: value.equipment,
        })
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Membership {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub is_active: bool,
}

impl TryFrom<Membership> for domain::Membership {
    type Error = ModelError;

    fn try_from(value: Membership) -> Result<Self, Self::Error> {
        Ok(Self {
            id: value.id.into(),
            name: domain::Name::new(&value.name)?,
            is_active: value.is_active,
        })
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TrainingProgram {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub difficulty: Difficulty,
    pub duration: u32,
    pub gender: Gender,
    #[serde(default)]
    pub goal: String,
    #[serde(default)]
    pub membership_id: Option<Uuid>,
}

impl From<&domain::TrainingProgram> for TrainingProgram {
    fn from(value: &domain::TrainingProgram) -> Self {
        Self {
            id: stored_id(*value.id),
            name: value.name.to_string(),
            description: value.description.clone(),
            difficulty: value.difficulty.into(),
            duration: *value.duration,
            gender: value.gender.into(),
            goal: value.goal.clone(),
            membership_id: value.membership_id.map(|id| *id),
        }
    }
}

/// Periods and workouts are stored separately and therefore left empty.
impl TryFrom<TrainingProgram> for domain::TrainingProgram {
    type Error = ModelError;

    fn try_from(value: TrainingProgram) -> Result<Self, Self::Error> {
        Ok(Self {
            id: value
                .id
                .map(domain::TrainingProgramID::from)
                .unwrap_or_default(),
            name: domain::Name::new(&value.name)?,
            description: value.description,
            difficulty: value.difficulty.into(),
            duration: domain::ProgramDuration::new(value.duration)?,
            gender: value.gender.into(),
            goal: value.goal,
            membership_id: value.membership_id.map(domain::MembershipID::from),
            periods: vec![],
            workouts: vec![],
        })
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Period {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub name: String,
    pub start_week: u32,
    pub end_week: u32,
}

impl From<&domain::Period> for Period {
    fn from(value: &domain::Period) -> Self {
        Self {
            id: stored_id(*value.id),
            name: value.name.clone(),
            start_week: *value.start_week,
            end_week: *value.end_week,
        }
    }
}

impl TryFrom<Period> for domain::Period {
    type Error = ModelError;

    fn try_from(value: Period) -> Result<Self, Self::Error> {
        Ok(domain::Period::new(
            value.id.map(domain::PeriodID::from).unwrap_or_default(),
            &value.name,
            domain::Week::new(value.start_week)?,
            domain::Week::new(value.end_week)?,
        )?)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Workout {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

impl From<&domain::Workout> for Workout {
    fn from(value: &domain::Workout) -> Self {
        Self {
            id: stored_id(*value.id),
            name: value.name.to_string(),
            description: value.description.clone(),
        }
    }
}

/// Exercises are stored separately and therefore left empty.
impl TryFrom<Workout> for domain::Workout {
    type Error = ModelError;

    fn try_from(value: Workout) -> Result<Self, Self::Error> {
        Ok(Self {
            id: value.id.map(domain::WorkoutID::from).unwrap_or_default(),
            name: domain::Name::new(&value.name)?,
            description: value.description,
            exercises: vec![],
        })
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProgramWorkout {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    #[serde(default)]
    pub period_id: Option<Uuid>,
    pub week_number: u32,
    pub day_number: u32,
    pub order: u32,
    #[serde(default)]
    pub workout_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workout: Option<Workout>,
}

impl From<&domain::ProgramWorkout> for ProgramWorkout {
    fn from(value: &domain::ProgramWorkout) -> Self {
        Self {
            id: stored_id(*value.id),
            period_id: value.period_id.map(|id| *id),
            week_number: *value.week_number,
            day_number: *value.day_number,
            order: value.order,
            workout_id: stored_id(*value.workout.id),
            workout: None,
        }
    }
}

impl TryFrom<ProgramWorkout> for domain::ProgramWorkout {
    type Error = ModelError;

    fn try_from(value: ProgramWorkout) -> Result<Self, Self::Error> {
        let id = value.id.unwrap_or_default();
        let workout = value.workout.ok_or(ModelError::MissingWorkout(id))?;
        Ok(Self {
            id: id.into(),
            period_id: value.period_id.map(domain::PeriodID::from),
            week_number: domain::Week::new(value.week_number)?,
            day_number: domain::DayNumber::new(value.day_number)?,
            order: value.order,
            workout: domain::Workout::try_from(workout)?,
        })
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutExercise {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub exercise_id: Uuid,
    pub order: u32,
    pub sets: u32,
    pub reps: String,
    pub rest_time: u32,
    #[serde(default)]
    pub tempo: Option<String>,
    #[serde(default)]
    pub superset_group: Option<String>,
    #[serde(default)]
    pub superset_order: Option<u32>,
}

impl From<&domain::WorkoutExercise> for WorkoutExercise {
    fn from(value: &domain::WorkoutExercise) -> Self {
        Self {
            id: stored_id(*value.id),
            exercise_id: *value.exercise_id,
            order: value.order,
            sets: value.prescription.sets,
            reps: value.prescription.reps.clone(),
            rest_time: value.prescription.rest_time,
            tempo: value.prescription.tempo.clone(),
            superset_group: value.prescription.superset_group.clone(),
            superset_order: value.prescription.superset_order,
        }
    }
}

impl From<WorkoutExercise> for domain::WorkoutExercise {
    fn from(value: WorkoutExercise) -> Self {
        Self {
            id: value
                .id
                .map(domain::WorkoutExerciseID::from)
                .unwrap_or_default(),
            exercise_id: value.exercise_id.into(),
            order: value.order,
            prescription: domain::Prescription {
                sets: value.sets,
                reps: value.reps,
                rest_time: value.rest_time,
                tempo: value.tempo,
                superset_group: value.superset_group,
                superset_order: value.superset_order,
            },
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub servings: u32,
    #[serde(default)]
    pub membership_id: Option<Uuid>,
    #[serde(default)]
    pub ingredients: Vec<FoodItem>,
}

impl From<&domain::Recipe> for Recipe {
    fn from(value: &domain::Recipe) -> Self {
        Self {
            id: stored_id(*value.id),
            name: value.name.to_string(),
            description: value.description.clone(),
            servings: *value.servings,
            membership_id: value.membership_id.map(|id| *id),
            ingredients: value.ingredients.iter().map(FoodItem::from).collect(),
        }
    }
}

impl TryFrom<Recipe> for domain::Recipe {
    type Error = ModelError;

    fn try_from(value: Recipe) -> Result<Self, Self::Error> {
        Ok(Self {
            id: value.id.map(domain::RecipeID::from).unwrap_or_default(),
            name: domain::Name::new(&value.name)?,
            description: value.description,
            servings: domain::Servings::new(value.servings)?,
            membership_id: value.membership_id.map(domain::MembershipID::from),
            ingredients: value
                .ingredients
                .into_iter()
                .map(domain::FoodItem::try_from)
                .collect::<Result<Vec<_>, _>>()?,
        })
    }
}
