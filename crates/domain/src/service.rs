use std::collections::BTreeMap;

use log::{debug, error};

use crate::{
    CreateError, DeleteError, Exercise, ExerciseRepository, ExerciseService, FoodCatalog,
    FoodProductPage, FoodProductRepository, FoodProductService, Membership, MembershipRepository,
    MembershipService, NutritionPlan, NutritionPlanID, NutritionPlanRepository,
    NutritionPlanService, Period, PeriodID, ProgramWorkout, ReadError, Recipe, RecipeID,
    RecipeRepository, RecipeService, TrainingProgram, TrainingProgramID, TrainingProgramRepository,
    TrainingProgramService, UpdateError, WorkoutID,
};

pub struct Service<R> {
    repository: R,
}

impl<R> Service<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

macro_rules! log_on_error {
    ($func: expr, $error: ident, $action: literal, $entity: literal) => {{
        let result = $func.await;
        match result {
            Ok(_) => {}
            Err(ref err) => match err {
                $error::Storage(crate::StorageError::NoConnection) => {
                    debug!("failed to {} {}: {err}", $action, $entity);
                }
                _ => {
                    error!("failed to {} {}: {err}", $action, $entity);
                }
            },
        }
        result
    }};
}

impl<R: FoodProductRepository> FoodProductService for Service<R> {
    async fn get_food_products(
        &self,
        page: u32,
        search: Option<String>,
    ) -> Result<FoodProductPage, ReadError> {
        log_on_error!(
            self.repository.read_food_products(page, search),
            ReadError,
            "get",
            "food products"
        )
    }

    async fn get_food_catalog(&self) -> Result<FoodCatalog, ReadError> {
        let first_page = self.get_food_products(1, None).await?;
        let mut catalog = FoodCatalog::new(first_page.products);
        for page in 2..=first_page.pages {
            catalog.extend(self.get_food_products(page, None).await?.products);
        }
        debug!("loaded {} food products", catalog.len());
        Ok(catalog)
    }
}

impl<R: ExerciseRepository> ExerciseService for Service<R> {
    async fn get_exercises(&self) -> Result<Vec<Exercise>, ReadError> {
        log_on_error!(
            self.repository.read_exercises(),
            ReadError,
            "get",
            "exercises"
        )
    }
}

impl<R: MembershipRepository> MembershipService for Service<R> {
    async fn get_memberships(&self) -> Result<Vec<Membership>, ReadError> {
        log_on_error!(
            self.repository.read_memberships(),
            ReadError,
            "get",
            "memberships"
        )
    }
}

impl<R: NutritionPlanRepository> NutritionPlanService for Service<R> {
    async fn get_nutrition_plans(&self) -> Result<Vec<NutritionPlan>, ReadError> {
        log_on_error!(
            self.repository.read_nutrition_plans(),
            ReadError,
            "get",
            "nutrition plans"
        )
    }

    async fn get_nutrition_plan(&self, id: NutritionPlanID) -> Result<NutritionPlan, ReadError> {
        log_on_error!(
            self.repository.read_nutrition_plan(id),
            ReadError,
            "get",
            "nutrition plan"
        )
    }

    async fn save_nutrition_plan(&self, plan: NutritionPlan) -> Result<NutritionPlan, CreateError> {
        if plan.id.is_nil() {
            log_on_error!(
                self.repository.create_nutrition_plan(plan),
                CreateError,
                "create",
                "nutrition plan"
            )
        } else {
            Ok(log_on_error!(
                self.repository.replace_nutrition_plan(plan),
                UpdateError,
                "replace",
                "nutrition plan"
            )?)
        }
    }

    async fn delete_nutrition_plan(
        &self,
        id: NutritionPlanID,
    ) -> Result<NutritionPlanID, DeleteError> {
        log_on_error!(
            self.repository.delete_nutrition_plan(id),
            DeleteError,
            "delete",
            "nutrition plan"
        )
    }
}

impl<R: TrainingProgramRepository> TrainingProgramService for Service<R> {
    async fn get_training_programs(&self) -> Result<Vec<TrainingProgram>, ReadError> {
        log_on_error!(
            self.repository.read_training_programs(),
            ReadError,
            "get",
            "training programs"
        )
    }

    async fn get_training_program(
        &self,
        id: TrainingProgramID,
    ) -> Result<TrainingProgram, ReadError> {
        log_on_error!(
            async {
                let mut program = self.repository.read_training_program(id).await?;
                program.periods = self.repository.read_program_periods(id).await?;
                let mut workouts = self.repository.read_program_workouts(id).await?;
                for program_workout in &mut workouts {
                    let mut exercises = self
                        .repository
                        .read_workout_exercises(program_workout.workout.id)
                        .await?;
                    exercises.sort_by_key(|e| e.order);
                    program_workout.workout.exercises = exercises;
                }
                program.workouts = workouts;
                Ok::<_, ReadError>(program)
            },
            ReadError,
            "get",
            "training program"
        )
    }

    async fn create_training_program(
        &self,
        program: TrainingProgram,
    ) -> Result<TrainingProgram, CreateError> {
        let created = log_on_error!(
            self.repository.create_training_program(program.clone()),
            CreateError,
            "create",
            "training program"
        )?;
        let mut created_workouts = vec![];
        match self
            .create_program_parts(created.id, &program, &mut created_workouts)
            .await
        {
            Ok((periods, workouts)) => Ok(TrainingProgram {
                periods,
                workouts,
                ..created
            }),
            Err(err) => {
                error!("failed to create parts of training program {}: {err}", created.id);
                self.roll_back_training_program(created.id, &created_workouts)
                    .await;
                Err(err)
            }
        }
    }

    async fn delete_training_program(
        &self,
        id: TrainingProgramID,
    ) -> Result<TrainingProgramID, DeleteError> {
        log_on_error!(
            self.repository.delete_training_program(id),
            DeleteError,
            "delete",
            "training program"
        )
    }
}

impl<R: TrainingProgramRepository> Service<R> {
    /// Stores periods, workouts and placements of a newly created program.
    ///
    /// Every stored workout is recorded in `created_workouts`, also when a later step fails.
    async fn create_program_parts(
        &self,
        program_id: TrainingProgramID,
        program: &TrainingProgram,
        created_workouts: &mut Vec<WorkoutID>,
    ) -> Result<(Vec<Period>, Vec<ProgramWorkout>), CreateError> {
        let mut period_ids: BTreeMap<PeriodID, PeriodID> = BTreeMap::new();
        let mut periods = vec![];
        for period in &program.periods {
            let stored = self
                .repository
                .create_program_period(program_id, period.clone())
                .await?;
            period_ids.insert(period.id, stored.id);
            periods.push(stored);
        }

        let mut workouts = vec![];
        for program_workout in &program.workouts {
            let mut workout = self
                .repository
                .create_workout(program_workout.workout.clone())
                .await?;
            created_workouts.push(workout.id);
            let mut exercises = vec![];
            for exercise in &program_workout.workout.exercises {
                exercises.push(
                    self.repository
                        .create_workout_exercise(workout.id, exercise.clone())
                        .await?,
                );
            }
            workout.exercises = exercises;
            let stored = self
                .repository
                .create_program_workout(
                    program_id,
                    ProgramWorkout {
                        period_id: program_workout
                            .period_id
                            .map(|id| period_ids.get(&id).copied().unwrap_or(id)),
                        workout: workout.clone(),
                        ..program_workout.clone()
                    },
                )
                .await?;
            workouts.push(ProgramWorkout { workout, ..stored });
        }

        Ok((periods, workouts))
    }

    async fn roll_back_training_program(
        &self,
        program_id: TrainingProgramID,
        created_workouts: &[WorkoutID],
    ) {
        for workout_id in created_workouts {
            if let Err(err) = self.repository.delete_workout(*workout_id).await {
                error!("failed to roll back workout {workout_id}: {err}");
            }
        }
        if let Err(err) = self.repository.delete_training_program(program_id).await {
            error!("failed to roll back training program {program_id}: {err}");
        }
    }
}

impl<R: RecipeRepository> RecipeService for Service<R> {
    async fn get_recipes(&self) -> Result<Vec<Recipe>, ReadError> {
        log_on_error!(self.repository.read_recipes(), ReadError, "get", "recipes")
    }

    async fn save_recipe(&self, recipe: Recipe) -> Result<Recipe, CreateError> {
        if recipe.id.is_nil() {
            log_on_error!(
                self.repository.create_recipe(recipe),
                CreateError,
                "create",
                "recipe"
            )
        } else {
            Ok(log_on_error!(
                self.repository.replace_recipe(recipe),
                UpdateError,
                "replace",
                "recipe"
            )?)
        }
    }

    async fn delete_recipe(&self, id: RecipeID) -> Result<RecipeID, DeleteError> {
        log_on_error!(
            self.repository.delete_recipe(id),
            DeleteError,
            "delete",
            "recipe"
        )
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use pretty_assertions::assert_eq;

    use crate::{
        DayNumber, FoodProduct, Macros, MembershipID, Name, Prescription, ProgramDuration,
        Servings, StorageError, ValidationError, Week, Workout, WorkoutExercise,
    };

    use super::*;

    #[derive(Default)]
    struct FakeRepository {
        pages: Vec<FoodProductPage>,
        plans: RefCell<Vec<NutritionPlan>>,
        programs: RefCell<Vec<TrainingProgram>>,
        periods: RefCell<Vec<(TrainingProgramID, Period)>>,
        program_workouts: RefCell<Vec<(TrainingProgramID, ProgramWorkout)>>,
        workouts: RefCell<Vec<WorkoutID>>,
        workout_exercises: RefCell<Vec<(WorkoutID, WorkoutExercise)>>,
        recipes: RefCell<Vec<Recipe>>,
        memberships: Vec<Membership>,
        fail_on_workout_exercise: bool,
        calls: RefCell<Vec<String>>,
    }

    impl FakeRepository {
        fn call(&self, name: &str) {
            self.calls.borrow_mut().push(name.to_string());
        }
    }

    impl FoodProductRepository for FakeRepository {
        async fn read_food_products(
            &self,
            page: u32,
            _: Option<String>,
        ) -> Result<FoodProductPage, ReadError> {
            self.call(&format!("read_food_products {page}"));
            self.pages
                .get(page as usize - 1)
                .cloned()
                .ok_or(ReadError::NotFound)
        }
    }

    impl NutritionPlanRepository for FakeRepository {
        async fn read_nutrition_plans(&self) -> Result<Vec<NutritionPlan>, ReadError> {
            Ok(self.plans.borrow().clone())
        }

        async fn read_nutrition_plan(
            &self,
            id: NutritionPlanID,
        ) -> Result<NutritionPlan, ReadError> {
            self.plans
                .borrow()
                .iter()
                .find(|p| p.id == id)
                .cloned()
                .ok_or(ReadError::NotFound)
        }

        async fn create_nutrition_plan(
            &self,
            plan: NutritionPlan,
        ) -> Result<NutritionPlan, CreateError> {
            self.call("create_nutrition_plan");
            let plan = NutritionPlan {
                id: NutritionPlanID::random(),
                ..plan
            };
            self.plans.borrow_mut().push(plan.clone());
            Ok(plan)
        }

        async fn replace_nutrition_plan(
            &self,
            plan: NutritionPlan,
        ) -> Result<NutritionPlan, UpdateError> {
            self.call("replace_nutrition_plan");
            let mut plans = self.plans.borrow_mut();
            let stored = plans
                .iter_mut()
                .find(|p| p.id == plan.id)
                .ok_or(UpdateError::NotFound)?;
            *stored = plan.clone();
            Ok(plan)
        }

        async fn delete_nutrition_plan(
            &self,
            id: NutritionPlanID,
        ) -> Result<NutritionPlanID, DeleteError> {
            self.plans.borrow_mut().retain(|p| p.id != id);
            Ok(id)
        }
    }

    impl RecipeRepository for FakeRepository {
        async fn read_recipes(&self) -> Result<Vec<Recipe>, ReadError> {
            Ok(self.recipes.borrow().clone())
        }

        async fn create_recipe(&self, recipe: Recipe) -> Result<Recipe, CreateError> {
            self.call("create_recipe");
            let recipe = Recipe {
                id: RecipeID::random(),
                ..recipe
            };
            self.recipes.borrow_mut().push(recipe.clone());
            Ok(recipe)
        }

        async fn replace_recipe(&self, recipe: Recipe) -> Result<Recipe, UpdateError> {
            self.call("replace_recipe");
            let mut recipes = self.recipes.borrow_mut();
            let stored = recipes
                .iter_mut()
                .find(|r| r.id == recipe.id)
                .ok_or(UpdateError::NotFound)?;
            *stored = recipe.clone();
            Ok(recipe)
        }

        async fn delete_recipe(&self, id: RecipeID) -> Result<RecipeID, DeleteError> {
            self.call("delete_recipe");
            let mut recipes = self.recipes.borrow_mut();
            if !recipes.iter().any(|r| r.id == id) {
                return Err(DeleteError::NotFound);
            }
            recipes.retain(|r| r.id != id);
            Ok(id)
        }
    }

    impl MembershipRepository for FakeRepository {
        async fn read_memberships(&self) -> Result<Vec<Membership>, ReadError> {
            self.call("read_memberships");
            Ok(self.memberships.clone())
        }
    }

    impl TrainingProgramRepository for FakeRepository {
        async fn read_training_programs(&self) -> Result<Vec<TrainingProgram>, ReadError> {
            Ok(self.programs.borrow().clone())
        }

        async fn read_training_program(
            &self,
            id: TrainingProgramID,
        ) -> Result<TrainingProgram, ReadError> {
            self.programs
                .borrow()
                .iter()
                .find(|p| p.id == id)
                .cloned()
                .ok_or(ReadError::NotFound)
        }

        async fn create_training_program(
            &self,
            program: TrainingProgram,
        ) -> Result<TrainingProgram, CreateError> {
            self.call("create_training_program");
            let program = TrainingProgram {
                id: TrainingProgramID::random(),
                periods: vec![],
                workouts: vec![],
                ..program
            };
            self.programs.borrow_mut().push(program.clone());
            Ok(program)
        }

        async fn delete_training_program(
            &self,
            id: TrainingProgramID,
        ) -> Result<TrainingProgramID, DeleteError> {
            self.call("delete_training_program");
            self.programs.borrow_mut().retain(|p| p.id != id);
            Ok(id)
        }

        async fn read_program_periods(
            &self,
            program_id: TrainingProgramID,
        ) -> Result<Vec<Period>, ReadError> {
            Ok(self
                .periods
                .borrow()
                .iter()
                .filter(|(id, _)| *id == program_id)
                .map(|(_, p)| p.clone())
                .collect())
        }

        async fn create_program_period(
            &self,
            program_id: TrainingProgramID,
            period: Period,
        ) -> Result<Period, CreateError> {
            self.call("create_program_period");
            let period = Period {
                id: PeriodID::random(),
                ..period
            };
            self.periods
                .borrow_mut()
                .push((program_id, period.clone()));
            Ok(period)
        }

        async fn read_program_workouts(
            &self,
            program_id: TrainingProgramID,
        ) -> Result<Vec<ProgramWorkout>, ReadError> {
            Ok(self
                .program_workouts
                .borrow()
                .iter()
                .filter(|(id, _)| *id == program_id)
                .map(|(_, w)| {
                    let mut w = w.clone();
                    w.workout.exercises = vec![];
                    w
                })
                .collect())
        }

        async fn create_program_workout(
            &self,
            program_id: TrainingProgramID,
            program_workout: ProgramWorkout,
        ) -> Result<ProgramWorkout, CreateError> {
            self.call("create_program_workout");
            let program_workout = ProgramWorkout {
                id: crate::ProgramWorkoutID::random(),
                ..program_workout
            };
            self.program_workouts
                .borrow_mut()
                .push((program_id, program_workout.clone()));
            Ok(program_workout)
        }

        async fn create_workout(&self, workout: Workout) -> Result<Workout, CreateError> {
            self.call("create_workout");
            let workout = Workout {
                id: WorkoutID::random(),
                exercises: vec![],
                ..workout
            };
            self.workouts.borrow_mut().push(workout.id);
            Ok(workout)
        }

        async fn delete_workout(&self, id: WorkoutID) -> Result<WorkoutID, DeleteError> {
            self.call("delete_workout");
            self.workouts.borrow_mut().retain(|w| *w != id);
            Ok(id)
        }

        async fn read_workout_exercises(
            &self,
            workout_id: WorkoutID,
        ) -> Result<Vec<WorkoutExercise>, ReadError> {
            Ok(self
                .workout_exercises
                .borrow()
                .iter()
                .filter(|(id, _)| *id == workout_id)
                .map(|(_, e)| e.clone())
                .collect())
        }

        async fn create_workout_exercise(
            &self,
            workout_id: WorkoutID,
            workout_exercise: WorkoutExercise,
        ) -> Result<WorkoutExercise, CreateError> {
            self.call("create_workout_exercise");
            if self.fail_on_workout_exercise {
                return Err(CreateError::Storage(StorageError::Status(
                    500,
                    String::from("Internal Server Error"),
                )));
            }
            self.workout_exercises
                .borrow_mut()
                .push((workout_id, workout_exercise.clone()));
            Ok(workout_exercise)
        }
    }

    fn product(id: u128) -> FoodProduct {
        FoodProduct {
            id: id.into(),
            name: Name::new(&format!("Product {id}")).unwrap(),
            category: None,
            per_100: Macros::ZERO,
        }
    }

    fn program() -> TrainingProgram {
        let mut program = TrainingProgram::new(
            Name::new("Program").unwrap(),
            ProgramDuration::new(4).unwrap(),
        );
        let period = program
            .add_period("Bazė", Week::new(1).unwrap(), Week::new(4).unwrap())
            .unwrap();
        let mut workout = Workout::new(Name::new("A").unwrap());
        let exercise = crate::Exercise {
            id: 1.into(),
            name: Name::new("Pritūpimai").unwrap(),
            muscle_group: None,
            equipment: None,
        };
        workout
            .add_exercise(&exercise, Prescription::default())
            .unwrap();
        workout
            .add_exercise(&exercise, Prescription::default())
            .unwrap();
        program
            .add_workout_to_program(
                Some(period),
                Week::new(1).unwrap(),
                DayNumber::new(1).unwrap(),
                workout,
            )
            .unwrap();
        program
    }

    #[tokio::test]
    async fn test_get_food_catalog() {
        let service = Service::new(FakeRepository {
            pages: vec![
                FoodProductPage {
                    products: vec![product(1), product(2)],
                    categories: vec![],
                    pages: 3,
                },
                FoodProductPage {
                    products: vec![product(3)],
                    categories: vec![],
                    pages: 3,
                },
                FoodProductPage {
                    products: vec![product(4)],
                    categories: vec![],
                    pages: 3,
                },
            ],
            ..FakeRepository::default()
        });
        let catalog = service.get_food_catalog().await.unwrap();
        assert_eq!(catalog.len(), 4);
        assert_eq!(catalog.lookup(4.into()), Some(&product(4)));
        assert_eq!(
            *service.repository.calls.borrow(),
            vec![
                "read_food_products 1",
                "read_food_products 2",
                "read_food_products 3"
            ]
        );
    }

    #[tokio::test]
    async fn test_save_nutrition_plan() {
        let service = Service::new(FakeRepository::default());
        let mut plan = NutritionPlan::new(Name::new("Plan").unwrap());
        plan.add_day().unwrap();

        let created = service.save_nutrition_plan(plan).await.unwrap();
        assert!(!created.id.is_nil());

        let mut modified = created.clone();
        modified.add_day().unwrap();
        let replaced = service.save_nutrition_plan(modified.clone()).await.unwrap();
        assert_eq!(replaced, modified);
        assert_eq!(
            service.get_nutrition_plan(created.id).await.unwrap().days.len(),
            2
        );
        assert_eq!(
            *service.repository.calls.borrow(),
            vec!["create_nutrition_plan", "replace_nutrition_plan"]
        );
    }

    #[tokio::test]
    async fn test_save_nutrition_plan_not_found() {
        let service = Service::new(FakeRepository::default());
        let plan = NutritionPlan {
            id: NutritionPlanID::random(),
            ..NutritionPlan::new(Name::new("Plan").unwrap())
        };
        assert!(matches!(
            service.save_nutrition_plan(plan).await,
            Err(CreateError::Other(err)) if err.to_string() == "not found"
        ));
    }

    #[tokio::test]
    async fn test_validate_nutrition_plan_name() {
        let service = Service::new(FakeRepository::default());
        let created = service
            .save_nutrition_plan(NutritionPlan::new(Name::new("Plan").unwrap()))
            .await
            .unwrap();
        assert!(matches!(
            service
                .validate_nutrition_plan_name("Plan", NutritionPlanID::nil())
                .await,
            Err(ValidationError::Conflict(field)) if field == "name"
        ));
        assert!(matches!(
            service.validate_nutrition_plan_name(" Plan ", created.id).await,
            Ok(name) if name.as_ref() == "Plan"
        ));
        assert!(matches!(
            service
                .validate_nutrition_plan_name("", NutritionPlanID::nil())
                .await,
            Err(ValidationError::Other(_))
        ));
        assert!(service.validate_quantity("150").is_ok());
        assert!(service.validate_quantity("-1").is_err());
    }

    #[tokio::test]
    async fn test_create_and_get_training_program() {
        let service = Service::new(FakeRepository::default());
        let program = program();
        let local_period_id = program.periods[0].id;

        let created = service.create_training_program(program).await.unwrap();
        assert!(!created.id.is_nil());
        assert_eq!(created.periods.len(), 1);
        assert_ne!(created.periods[0].id, local_period_id);
        assert_eq!(created.workouts.len(), 1);
        assert_eq!(created.workouts[0].period_id, Some(created.periods[0].id));
        assert_eq!(created.workouts[0].workout.exercises.len(), 2);

        let loaded = service.get_training_program(created.id).await.unwrap();
        assert_eq!(loaded, created);
    }

    #[tokio::test]
    async fn test_create_training_program_rolls_back_on_failure() {
        let service = Service::new(FakeRepository {
            fail_on_workout_exercise: true,
            ..FakeRepository::default()
        });

        let result = service.create_training_program(program()).await;

        assert!(matches!(
            result,
            Err(CreateError::Storage(StorageError::Status(500, _)))
        ));
        assert!(service.repository.programs.borrow().is_empty());
        assert!(service.repository.workouts.borrow().is_empty());
        assert_eq!(
            *service.repository.calls.borrow(),
            vec![
                "create_training_program",
                "create_program_period",
                "create_workout",
                "create_workout_exercise",
                "delete_workout",
                "delete_training_program",
            ]
        );
    }

    #[tokio::test]
    async fn test_get_training_program_not_found() {
        let service = Service::new(FakeRepository::default());
        assert!(matches!(
            service
                .get_training_program(TrainingProgramID::random())
                .await,
            Err(ReadError::NotFound)
        ));
    }

    fn recipe(name: &str) -> Recipe {
        Recipe::new(Name::new(name).unwrap(), Servings::new(2).unwrap())
    }

    #[tokio::test]
    async fn test_save_recipe() {
        let service = Service::new(FakeRepository::default());

        let created = service.save_recipe(recipe("Omletas")).await.unwrap();
        assert!(!created.id.is_nil());

        let modified = Recipe {
            description: String::from("Su sūriu"),
            servings: Servings::new(3).unwrap(),
            ..created.clone()
        };
        let replaced = service.save_recipe(modified.clone()).await.unwrap();
        assert_eq!(replaced, modified);
        assert_eq!(service.get_recipes().await.unwrap(), vec![modified]);
        assert_eq!(
            *service.repository.calls.borrow(),
            vec!["create_recipe", "replace_recipe"]
        );
    }

    #[tokio::test]
    async fn test_save_recipe_not_found() {
        let service = Service::new(FakeRepository::default());
        let recipe = Recipe {
            id: RecipeID::random(),
            ..recipe("Omletas")
        };
        assert!(matches!(
            service.save_recipe(recipe).await,
            Err(CreateError::Other(err)) if err.to_string() == "not found"
        ));
        assert!(service.repository.recipes.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_delete_recipe() {
        let service = Service::new(FakeRepository::default());
        let first = service.save_recipe(recipe("Omletas")).await.unwrap();
        let second = service.save_recipe(recipe("Košė")).await.unwrap();

        assert_eq!(service.delete_recipe(first.id).await.unwrap(), first.id);
        assert_eq!(service.get_recipes().await.unwrap(), vec![second]);
        assert!(matches!(
            service.delete_recipe(first.id).await,
            Err(DeleteError::NotFound)
        ));
    }

    #[test]
    fn test_validate_servings() {
        let service = Service::new(FakeRepository::default());
        assert_eq!(service.validate_servings(" 4 ").ok(), Servings::new(4).ok());
        assert!(matches!(
            service.validate_servings("0"),
            Err(ValidationError::Other(err)) if err.to_string() == "Servings must be 1 or greater"
        ));
        assert!(matches!(
            service.validate_servings("1.5"),
            Err(ValidationError::Other(err))
                if err.to_string() == "Servings must be a positive whole number"
        ));
        assert!(service.validate_servings("").is_err());
    }

    #[tokio::test]
    async fn test_get_memberships() {
        let membership = Membership {
            id: MembershipID::from(1),
            name: Name::new("Premium").unwrap(),
            is_active: true,
        };
        let service = Service::new(FakeRepository {
            memberships: vec![membership.clone()],
            ..FakeRepository::default()
        });
        assert_eq!(service.get_memberships().await.unwrap(), vec![membership]);
        assert_eq!(*service.repository.calls.borrow(), vec!["read_memberships"]);
    }
}
