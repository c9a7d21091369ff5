//! REST
//!
//! The admin API is the only data source. Aggregates which the API stores as separate resources
//! (training programs with their periods, placements and workout exercises) are read and created
//! resource by resource; assembling them is the job of the domain service.

use lazyfit_domain as domain;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use strum::AsRefStr;
use uuid::Uuid;

use crate::{config::Config, model};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Patch,
    Delete,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub method: Method,
    /// Path relative to the API base URL.
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl Request {
    fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: vec![],
            body: None,
        }
    }

    fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    fn post(path: impl Into<String>, body: Value) -> Self {
        Self {
            body: Some(body),
            ..Self::new(Method::Post, path)
        }
    }

    fn patch(path: impl Into<String>, body: Value) -> Self {
        Self {
            body: Some(body),
            ..Self::new(Method::Patch, path)
        }
    }

    fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    fn query(mut self, key: &str, value: impl ToString) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub reason: String,
    pub body: String,
}

impl Response {
    fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[allow(async_fn_in_trait)]
pub trait SendRequest {
    async fn send(&self, request: Request) -> Result<Response, domain::StorageError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestSendRequest {
    client: reqwest::Client,
    base_url: String,
}

impl ReqwestSendRequest {
    pub fn new(config: &Config) -> Result<Self, domain::StorageError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(storage_error)?;
        Ok(Self {
            client,
            base_url: config.api_url.clone(),
        })
    }
}

impl SendRequest for ReqwestSendRequest {
    async fn send(&self, request: Request) -> Result<Response, domain::StorageError> {
        let url = format!("{}/{}", self.base_url, request.path);
        let mut builder = match request.method {
            Method::Get => self.client.get(&url),
            Method::Post => self.client.post(&url),
            Method::Patch => self.client.patch(&url),
            Method::Delete => self.client.delete(&url),
        };
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }
        let response = builder.send().await.map_err(storage_error)?;
        let status = response.status();
        let body = response.text().await.map_err(storage_error)?;
        Ok(Response {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or_default().to_string(),
            body,
        })
    }
}

fn storage_error(err: reqwest::Error) -> domain::StorageError {
    if err.is_timeout() {
        domain::StorageError::Timeout
    } else if err.is_connect() {
        domain::StorageError::NoConnection
    } else {
        domain::StorageError::Other(Box::new(err))
    }
}

#[derive(AsRefStr)]
enum Resource {
    #[strum(serialize = "api/admin/food-products")]
    FoodProducts,
    #[strum(serialize = "api/admin/exercises")]
    Exercises,
    #[strum(serialize = "api/admin/memberships")]
    Memberships,
    #[strum(serialize = "api/admin/nutrition-plans")]
    NutritionPlans,
    #[strum(serialize = "api/admin/recipes")]
    Recipes,
    #[strum(serialize = "api/admin/training-programs")]
    TrainingPrograms,
    #[strum(serialize = "api/admin/program-periods")]
    ProgramPeriods,
    #[strum(serialize = "api/admin/program-workouts")]
    ProgramWorkouts,
    #[strum(serialize = "api/admin/workouts")]
    Workouts,
    #[strum(serialize = "api/admin/workout-exercises")]
    WorkoutExercises,
}

impl Resource {
    fn path(&self) -> String {
        self.as_ref().to_string()
    }

    fn item(&self, id: impl std::fmt::Display) -> String {
        format!("{}/{id}", self.as_ref())
    }
}

#[derive(Clone)]
pub struct REST<S: SendRequest> {
    sender: S,
}

impl REST<ReqwestSendRequest> {
    pub fn new(config: &Config) -> Result<Self, domain::StorageError> {
        Ok(Self::with_sender(ReqwestSendRequest::new(config)?))
    }
}

impl<S: SendRequest> REST<S> {
    pub const fn with_sender(sender: S) -> Self {
        Self { sender }
    }

    async fn fetch<T: DeserializeOwned>(&self, request: Request) -> Result<T, FetchError> {
        let response = self.send(request).await?;
        serde_json::from_str::<T>(&response.body).map_err(|err| {
            FetchError::Storage(domain::StorageError::Deserialization(err.to_string()))
        })
    }

    async fn fetch_no_content(&self, request: Request) -> Result<(), FetchError> {
        self.send(request).await.map(|_| ())
    }

    async fn send(&self, request: Request) -> Result<Response, FetchError> {
        let response = self.sender.send(request).await?;
        match response.status {
            _ if response.is_success() => Ok(response),
            404 => Err(FetchError::NotFound),
            409 => Err(FetchError::Conflict),
            status => Err(FetchError::Storage(domain::StorageError::Status(
                status,
                response.reason,
            ))),
        }
    }
}

fn convert<T, U>(value: T) -> Result<U, FetchError>
where
    U: TryFrom<T, Error = model::ModelError>,
{
    U::try_from(value)
        .map_err(|err| FetchError::Storage(domain::StorageError::Deserialization(err.to_string())))
}

fn convert_all<T, U>(values: Vec<T>) -> Result<Vec<U>, FetchError>
where
    U: TryFrom<T, Error = model::ModelError>,
{
    values.into_iter().map(convert).collect()
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<Value, FetchError> {
    serde_json::to_value(value)
        .map_err(|err| FetchError::Storage(domain::StorageError::Other(Box::new(err))))
}

/// Serializes an entity which is about to be created, together with the reference to its parent.
fn to_json_with_parent<T: serde::Serialize>(
    value: &T,
    key: &str,
    parent: Uuid,
) -> Result<Value, FetchError> {
    let mut body = to_json(value)?;
    if let Value::Object(ref mut map) = body {
        map.remove("id");
        map.insert(key.to_string(), json!(parent));
    }
    Ok(body)
}

fn without_id(mut body: Value) -> Value {
    if let Value::Object(ref mut map) = body {
        map.remove("id");
    }
    body
}

enum FetchError {
    NotFound,
    Conflict,
    Storage(domain::StorageError),
}

impl From<domain::StorageError> for FetchError {
    fn from(value: domain::StorageError) -> Self {
        FetchError::Storage(value)
    }
}

fn conflict_status() -> domain::StorageError {
    domain::StorageError::Status(409, String::from("Conflict"))
}

impl From<FetchError> for domain::ReadError {
    fn from(value: FetchError) -> Self {
        match value {
            FetchError::NotFound => domain::ReadError::NotFound,
            FetchError::Conflict => domain::ReadError::Storage(conflict_status()),
            FetchError::Storage(err) => domain::ReadError::Storage(err),
        }
    }
}

impl From<FetchError> for domain::CreateError {
    fn from(value: FetchError) -> Self {
        match value {
            FetchError::NotFound => domain::CreateError::Other("not found".into()),
            FetchError::Conflict => domain::CreateError::Conflict,
            FetchError::Storage(err) => domain::CreateError::Storage(err),
        }
    }
}

impl From<FetchError> for domain::UpdateError {
    fn from(value: FetchError) -> Self {
        match value {
            FetchError::NotFound => domain::UpdateError::NotFound,
            FetchError::Conflict => domain::UpdateError::Conflict,
            FetchError::Storage(err) => domain::UpdateError::Storage(err),
        }
    }
}

impl From<FetchError> for domain::DeleteError {
    fn from(value: FetchError) -> Self {
        match value {
            FetchError::NotFound => domain::DeleteError::NotFound,
            FetchError::Conflict => domain::DeleteError::Storage(conflict_status()),
            FetchError::Storage(err) => domain::DeleteError::Storage(err),
        }
    }
}

impl<S: SendRequest> domain::FoodProductRepository for REST<S> {
    async fn read_food_products(
        &self,
        page: u32,
        search: Option<String>,
    ) -> Result<domain::FoodProductPage, domain::ReadError> {
        let mut request = Request::get(Resource::FoodProducts.path()).query("page", page);
        if let Some(search) = search.filter(|s| !s.trim().is_empty()) {
            request = request.query("search", search.trim());
        }
        let page: model::FoodProductPage = self.fetch(request).await?;
        Ok(convert(page)?)
    }
}

impl<S: SendRequest> domain::ExerciseRepository for REST<S> {
    async fn read_exercises(&self) -> Result<Vec<domain::Exercise>, domain::ReadError> {
        let exercises: Vec<model::Exercise> = self
            .fetch(Request::get(Resource::Exercises.path()))
            .await?;
        Ok(convert_all(exercises)?)
    }
}

impl<S: SendRequest> domain::MembershipRepository for REST<S> {
    async fn read_memberships(&self) -> Result<Vec<domain::Membership>, domain::ReadError> {
        let memberships: Vec<model::Membership> = self
            .fetch(Request::get(Resource::Memberships.path()))
            .await?;
        Ok(convert_all(memberships)?)
    }
}

impl<S: SendRequest> domain::NutritionPlanRepository for REST<S> {
    async fn read_nutrition_plans(
        &self,
    ) -> Result<Vec<domain::NutritionPlan>, domain::ReadError> {
        let plans: Vec<model::NutritionPlan> = self
            .fetch(Request::get(Resource::NutritionPlans.path()))
            .await?;
        Ok(convert_all(plans)?)
    }

    async fn read_nutrition_plan(
        &self,
        id: domain::NutritionPlanID,
    ) -> Result<domain::NutritionPlan, domain::ReadError> {
        let plan: model::NutritionPlan = self
            .fetch(Request::get(Resource::NutritionPlans.item(id)))
            .await?;
        Ok(convert(plan)?)
    }

    async fn create_nutrition_plan(
        &self,
        plan: domain::NutritionPlan,
    ) -> Result<domain::NutritionPlan, domain::CreateError> {
        let body = without_id(to_json(&model::NutritionPlan::from(&plan))?);
        let created: model::NutritionPlan = self
            .fetch(Request::post(Resource::NutritionPlans.path(), body))
            .await?;
        Ok(convert(created)?)
    }

    async fn replace_nutrition_plan(
        &self,
        plan: domain::NutritionPlan,
    ) -> Result<domain::NutritionPlan, domain::UpdateError> {
        let body = without_id(to_json(&model::NutritionPlan::from(&plan))?);
        let replaced: model::NutritionPlan = self
            .fetch(Request::patch(Resource::NutritionPlans.item(plan.id), body))
            .await?;
        Ok(convert(replaced)?)
    }

    async fn delete_nutrition_plan(
        &self,
        id: domain::NutritionPlanID,
    ) -> Result<domain::NutritionPlanID, domain::DeleteError> {
        self.fetch_no_content(Request::delete(Resource::NutritionPlans.item(id)))
            .await?;
        Ok(id)
    }
}

impl<S: SendRequest> domain::RecipeRepository for REST<S> {
    async fn read_recipes(&self) -> Result<Vec<domain::Recipe>, domain::ReadError> {
        let recipes: Vec<model::Recipe> =
            self.fetch(Request::get(Resource::Recipes.path())).await?;
        Ok(convert_all(recipes)?)
    }

    async fn create_recipe(
        &self,
        recipe: domain::Recipe,
    ) -> Result<domain::Recipe, domain::CreateError> {
        let body = without_id(to_json(&model::Recipe::from(&recipe))?);
        let created: model::Recipe = self
            .fetch(Request::post(Resource::Recipes.path(), body))
            .await?;
        Ok(convert(created)?)
    }

    async fn replace_recipe(
        &self,
        recipe: domain::Recipe,
    ) -> Result<domain::Recipe, domain::UpdateError> {
        let body = without_id(to_json(&model::Recipe::from(&recipe))?);
        let replaced: model::Recipe = self
            .fetch(Request::patch(Resource::Recipes.item(recipe.id), body))
            .await?;
        Ok(convert(replaced)?)
    }

    async fn delete_recipe(
        &self,
        id: domain::RecipeID,
    ) -> Result<domain::RecipeID, domain::DeleteError> {
        self.fetch_no_content(Request::delete(Resource::Recipes.item(id)))
            .await?;
        Ok(id)
    }
}

impl<S: SendRequest> domain::TrainingProgramRepository for REST<S> {
    async fn read_training_programs(
        &self,
    ) -> Result<Vec<domain::TrainingProgram>, domain::ReadError> {
        let programs: Vec<model::TrainingProgram> = self
            .fetch(Request::get(Resource::TrainingPrograms.path()))
            .await?;
        Ok(convert_all(programs)?)
    }

    async fn read_training_program(
        &self,
        id: domain::TrainingProgramID,
    ) -> Result<domain::TrainingProgram, domain::ReadError> {
        let program: model::TrainingProgram = self
            .fetch(Request::get(Resource::TrainingPrograms.item(id)))
            .await?;
        Ok(convert(program)?)
    }

    async fn create_training_program(
        &self,
        program: domain::TrainingProgram,
    ) -> Result<domain::TrainingProgram, domain::CreateError> {
        let body = without_id(to_json(&model::TrainingProgram::from(&program))?);
        let created: model::TrainingProgram = self
            .fetch(Request::post(Resource::TrainingPrograms.path(), body))
            .await?;
        Ok(convert(created)?)
    }

    async fn delete_training_program(
        &self,
        id: domain::TrainingProgramID,
    ) -> Result<domain::TrainingProgramID, domain::DeleteError> {
        self.fetch_no_content(Request::delete(Resource::TrainingPrograms.item(id)))
            .await?;
        Ok(id)
    }

    async fn read_program_periods(
        &self,
        program_id: domain::TrainingProgramID,
    ) -> Result<Vec<domain::Period>, domain::ReadError> {
        let periods: Vec<model::Period> = self
            .fetch(Request::get(Resource::ProgramPeriods.path()).query("programId", program_id))
            .await?;
        Ok(convert_all(periods)?)
    }

    async fn create_program_period(
        &self,
        program_id: domain::TrainingProgramID,
        period: domain::Period,
    ) -> Result<domain::Period, domain::CreateError> {
        let body = to_json_with_parent(&model::Period::from(&period), "programId", *program_id)?;
        let created: model::Period = self
            .fetch(Request::post(Resource::ProgramPeriods.path(), body))
            .await?;
        Ok(convert(created)?)
    }

    async fn read_program_workouts(
        &self,
        program_id: domain::TrainingProgramID,
    ) -> Result<Vec<domain::ProgramWorkout>, domain::ReadError> {
        let workouts: Vec<model::ProgramWorkout> = self
            .fetch(Request::get(Resource::ProgramWorkouts.path()).query("programId", program_id))
            .await?;
        Ok(convert_all(workouts)?)
    }

    async fn create_program_workout(
        &self,
        program_id: domain::TrainingProgramID,
        program_workout: domain::ProgramWorkout,
    ) -> Result<domain::ProgramWorkout, domain::CreateError> {
        let body = to_json_with_parent(
            &model::ProgramWorkout::from(&program_workout),
            "programId",
            *program_id,
        )?;
        let created: model::ProgramWorkout = self
            .fetch(Request::post(Resource::ProgramWorkouts.path(), body))
            .await?;
        let id = created.id.ok_or_else(|| {
            domain::StorageError::Deserialization(String::from("program workout without id"))
        })?;
        Ok(domain::ProgramWorkout {
            id: id.into(),
            ..program_workout
        })
    }

    async fn create_workout(
        &self,
        workout: domain::Workout,
    ) -> Result<domain::Workout, domain::CreateError> {
        let body = without_id(to_json(&model::Workout::from(&workout))?);
        let created: model::Workout = self
            .fetch(Request::post(Resource::Workouts.path(), body))
            .await?;
        Ok(convert(created)?)
    }

    async fn delete_workout(
        &self,
        id: domain::WorkoutID,
    ) -> Result<domain::WorkoutID, domain::DeleteError> {
        self.fetch_no_content(Request::delete(Resource::Workouts.item(id)))
            .await?;
        Ok(id)
    }

    async fn read_workout_exercises(
        &self,
        workout_id: domain::WorkoutID,
    ) -> Result<Vec<domain::WorkoutExercise>, domain::ReadError> {
        let exercises: Vec<model::WorkoutExercise> = self
            .fetch(Request::get(Resource::WorkoutExercises.path()).query("workoutId", workout_id))
            .await?;
        Ok(exercises
            .into_iter()
            .map(domain::WorkoutExercise::from)
            .collect())
    }

    async fn create_workout_exercise(
        &self,
        workout_id: domain::WorkoutID,
        workout_exercise: domain::WorkoutExercise,
    ) -> Result<domain::WorkoutExercise, domain::CreateError> {
        let body = to_json_with_parent(
            &model::WorkoutExercise::from(&workout_exercise),
            "workoutId",
            *workout_id,
        )?;
        let created: model::WorkoutExercise = self
            .fetch(Request::post(Resource::WorkoutExercises.path(), body))
            .await?;
        Ok(created.into())
    }
}
