use std::{
    fmt::Display,
    sync::{Arc, Mutex},
    time::Duration,
};

use anyhow::{Result, anyhow};
use clap::{Parser, Subcommand};
use lazyfit_domain::{
    ExerciseService, FoodProductService, Macros, NutritionPlanService, RecipeService, Service,
    TrainingProgram, TrainingProgramService,
};
use lazyfit_storage::{
    config::Config,
    log::MemoryLog,
    rest::{REST, ReqwestSendRequest},
};
use log::LevelFilter;
use uuid::Uuid;

#[derive(Parser, Debug)]
#[command(
    version,
    about = "LazyFit - admin tool for nutrition plans and training programs",
    long_about = None
)]
struct Args {
    /// Base URL of the admin API [default: $LAZYFIT_API_URL]
    #[arg(long)]
    api_url: Option<String>,

    /// Request timeout in seconds [default: $LAZYFIT_TIMEOUT_SECS or 30]
    #[arg(long)]
    timeout: Option<u64>,

    /// Log debug messages
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List all nutrition plans
    Plans,
    /// Show the days and meals of a nutrition plan
    Plan { id: Uuid },
    /// List all training programs
    Programs,
    /// Show the schedule of a training program
    Program { id: Uuid },
    /// List all recipes
    Recipes,
    /// List exercises by muscle group
    Exercises,
    /// Search the food product catalog
    Foods {
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long)]
        search: Option<String>,
    },
}

type AdminService = Service<REST<ReqwestSendRequest>>;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    init_log(args.verbose)?;

    let mut config = Config::from_env(args.api_url.as_deref())?;
    if let Some(timeout) = args.timeout {
        config = config.with_timeout(Duration::from_secs(timeout))?;
    }
    let service = Service::new(REST::new(&config).map_err(failed)?);

    match args.command {
        Commands::Plans => list_plans(&service).await,
        Commands::Plan { id } => show_plan(&service, id).await,
        Commands::Programs => list_programs(&service).await,
        Commands::Program { id } => show_program(&service, id).await,
        Commands::Recipes => list_recipes(&service).await,
        Commands::Exercises => list_exercises(&service).await,
        Commands::Foods { page, search } => list_foods(&service, page, search).await,
    }
}

fn init_log(verbose: bool) -> Result<()> {
    lazyfit_storage::log::init(
        Arc::new(Mutex::new(MemoryLog::default())),
        if verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        },
    )
    .map_err(failed)
}

/// Converts a domain error by its message, as its source is not thread-safe.
fn failed(err: impl Display) -> anyhow::Error {
    anyhow!("{err}")
}

fn macros(macros: &Macros) -> String {
    format!(
        "{:.0} kcal, P {:.1} g, C {:.1} g, F {:.1} g",
        macros.calories, macros.protein, macros.carbs, macros.fat
    )
}

async fn list_plans(service: &AdminService) -> Result<()> {
    let plans = service.get_nutrition_plans().await.map_err(failed)?;
    for plan in plans {
        println!(
            "{} {} ({}, {} days{})",
            plan.id,
            plan.name,
            plan.gender,
            plan.days.len(),
            if plan.is_published { ", published" } else { "" }
        );
    }
    Ok(())
}

async fn show_plan(service: &AdminService, id: Uuid) -> Result<()> {
    let plan = service
        .get_nutrition_plan(id.into())
        .await
        .map_err(failed)?;
    println!("{} ({})", plan.name, plan.gender);
    if !plan.description.is_empty() {
        println!("{}", plan.description);
    }
    println!("Average day: {}", macros(&plan.average_day_totals()));
    for day in &plan.days {
        println!();
        println!("Day {}: {}", day.day_number, macros(&day.totals()));
        for meal in &day.meals {
            println!("  {}. {}: {}", meal.meal_number, meal.name, macros(&meal.totals()));
            for item in &meal.items {
                println!(
                    "     {} g {} ({})",
                    item.quantity,
                    item.food_product_id,
                    macros(&item.macros)
                );
            }
        }
    }
    Ok(())
}

async fn list_programs(service: &AdminService) -> Result<()> {
    let programs = service.get_training_programs().await.map_err(failed)?;
    for program in programs {
        println!(
            "{} {} ({}, {} weeks, {})",
            program.id, program.name, program.difficulty, program.duration, program.gender
        );
    }
    Ok(())
}

async fn show_program(service: &AdminService, id: Uuid) -> Result<()> {
    let program = service
        .get_training_program(id.into())
        .await
        .map_err(failed)?;
    let catalog = service.get_exercise_catalog().await.map_err(failed)?;
    println!(
        "{} ({}, {} weeks, {} sets)",
        program.name,
        program.difficulty,
        program.duration,
        program.num_sets()
    );
    if !program.goal.is_empty() {
        println!("Goal: {}", program.goal);
    }
    print_schedule(&program);
    let missing = program.missing_exercises(&catalog);
    if !missing.is_empty() {
        println!();
        println!("Unknown exercises:");
        for id in missing {
            println!("  {id}");
        }
    }
    Ok(())
}

fn print_schedule(program: &TrainingProgram) {
    for week in program.weeks() {
        println!();
        match program.period_for_week(week) {
            Some(period) => println!("Week {week} ({})", period.name),
            None => println!("Week {week}"),
        }
        let mut workouts = program
            .workouts
            .iter()
            .filter(|w| w.week_number == week)
            .collect::<Vec<_>>();
        workouts.sort_by_key(|w| (w.day_number, w.order));
        for program_workout in workouts {
            let workout = &program_workout.workout;
            println!(
                "  Day {} #{} {} ({} sets)",
                program_workout.day_number,
                program_workout.order,
                workout.name,
                workout.num_sets()
            );
            for exercise in &workout.exercises {
                let prescription = &exercise.prescription;
                println!(
                    "    {}. {} {} x {}, rest {} s{}",
                    exercise.order,
                    exercise.exercise_id,
                    prescription.sets,
                    prescription.reps,
                    prescription.rest_time,
                    prescription
                        .superset_group
                        .as_ref()
                        .map(|group| format!(", superset {group}"))
                        .unwrap_or_default()
                );
            }
        }
    }
}

async fn list_recipes(service: &AdminService) -> Result<()> {
    let recipes = service.get_recipes().await.map_err(failed)?;
    for recipe in recipes {
        println!(
            "{} {} ({} servings, per serving {})",
            recipe.id,
            recipe.name,
            recipe.servings,
            macros(&recipe.per_serving())
        );
    }
    Ok(())
}

async fn list_exercises(service: &AdminService) -> Result<()> {
    let catalog = service.get_exercise_catalog().await.map_err(failed)?;
    for (muscle_group, exercises) in catalog.by_muscle_group() {
        println!("{muscle_group}");
        for exercise in exercises {
            println!("  {} {}", exercise.id, exercise.name);
        }
    }
    Ok(())
}

async fn list_foods(service: &AdminService, page: u32, search: Option<String>) -> Result<()> {
    let result = service
        .get_food_products(page, search)
        .await
        .map_err(failed)?;
    for product in &result.products {
        println!(
            "{} {}{} per 100 g: {}",
            product.id,
            product.name,
            product
                .category
                .as_ref()
                .map(|category| format!(" [{category}]"))
                .unwrap_or_default(),
            macros(&product.per_100)
        );
    }
    println!("Page {page} of {}", result.pages);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_log_twice() {
        assert!(init_log(false).is_ok());
        assert!(
            init_log(true)
                .unwrap_err()
                .to_string()
                .contains("logger")
        );
    }
}
