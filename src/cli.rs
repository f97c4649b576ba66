/// CLI argument parsing and command handling.
use std::path::PathBuf;

use anyhow::Result;
use chrono::{Datelike, Local};
use clap::{Parser, Subcommand};
use rusqlite::Connection;

use crate::catalog;
use crate::config::Config;
use crate::error::AppError;
use crate::ledger::Ledger;
use crate::lookup::{OpenFoodFacts, ProductSource};
use crate::plan::{self, WeeklyPlan};
use crate::profile::WorkoutStats;
use crate::types::Weekday;

#[derive(Parser)]
#[command(
    name = "staystrong",
    version,
    about = "Stay Strong - A terminal fitness tracker"
)]
pub struct Cli {
    /// Path of the SQLite database
    #[arg(long, global = true, env = "STAYSTRONG_DB")]
    pub db: Option<PathBuf>,

    /// Base URL of the product database
    #[arg(long, global = true, env = "STAYSTRONG_API_BASE")]
    pub api_base: Option<String>,

    /// Seconds to wait for a product lookup
    #[arg(long, global = true, env = "STAYSTRONG_LOOKUP_TIMEOUT", default_value_t = 15)]
    pub lookup_timeout: u64,

    /// Path of the log file
    #[arg(long, global = true, env = "STAYSTRONG_LOG")]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    Food {
        #[command(subcommand)]
        command: FoodCommand,
    },
    /// Show today's nutrition totals
    Totals,
    Plan {
        #[command(subcommand)]
        command: PlanCommand,
    },
    /// Show completed workout statistics
    Stats,
}

#[derive(Subcommand, Debug)]
pub enum FoodCommand {
    Add {
        name: String,
        calories: String,
        fat: String,
        sugar: String,
        protein: String,
    },
    List,
    /// Look up a barcode without logging anything
    Scan { barcode: String },
}

#[derive(Subcommand, Debug)]
pub enum PlanCommand {
    Show {
        #[arg(short = 'd', long = "day")]
        day: Option<String>,
    },
    Toggle { day: String, exercise: String },
}

/// Execute a CLI command. Validation problems are printed, not returned.
pub fn run(command: Command, conn: &Connection, config: &Config) -> Result<()> {
    let result = match command {
        Command::Food {
            command:
                FoodCommand::Add {
                    name,
                    calories,
                    fat,
                    sugar,
                    protein,
                },
        } => handle_food_add(&name, &calories, &fat, &sugar, &protein, conn),
        Command::Food {
            command: FoodCommand::List,
        } => handle_food_list(conn),
        Command::Food {
            command: FoodCommand::Scan { barcode },
        } => handle_food_scan(&barcode, config),
        Command::Totals => handle_totals(conn),
        Command::Plan {
            command: PlanCommand::Show { day },
        } => handle_plan_show(day, conn),
        Command::Plan {
            command: PlanCommand::Toggle { day, exercise },
        } => handle_plan_toggle(&day, &exercise, conn),
        Command::Stats => {
            handle_stats(conn);
            Ok(())
        }
    };
    match result {
        Err(err) if err.is_validation() => {
            println!("{err}");
            Ok(())
        }
        Err(AppError::ProductNotFound { code }) => {
            println!("Product '{code}' not found.");
            Ok(())
        }
        other => other.map_err(Into::into),
    }
}

fn handle_food_add(
    name: &str,
    calories: &str,
    fat: &str,
    sugar: &str,
    protein: &str,
    conn: &Connection,
) -> Result<(), AppError> {
    let mut ledger = Ledger::load(conn);
    ledger.reset_if_new_day(Local::now().date_naive(), conn)?;
    let entry = ledger.add_entry_from_input(name, calories, fat, sugar, protein, conn)?;
    println!("Added '{}'.", entry.name);
    print_totals(&ledger);
    Ok(())
}

fn handle_food_list(conn: &Connection) -> Result<(), AppError> {
    let ledger = Ledger::load(conn);
    if ledger.entries.is_empty() {
        println!("No food logged yet.");
        return Ok(());
    }
    for entry in &ledger.entries {
        println!(
            "{:<24} {:>8.1} kcal {:>6.1} g fat {:>6.1} g sugar {:>6.1} g protein",
            entry.name, entry.calories, entry.fat, entry.sugar, entry.protein
        );
    }
    Ok(())
}

fn handle_food_scan(barcode: &str, config: &Config) -> Result<(), AppError> {
    let source = OpenFoodFacts::new(&config.api_base, config.lookup_timeout)?;
    let product = source.lookup(barcode)?;
    let show = |value: Option<f64>| value.map(|v| format!("{v}")).unwrap_or_else(|| "-".to_string());
    println!("{} ({})", product.name, product.code);
    println!("  calories: {} kcal/100g", show(product.calories));
    println!("  fat:      {} g/100g", show(product.fat));
    println!("  sugar:    {} g/100g", show(product.sugar));
    println!("  protein:  {} g/100g", show(product.protein));
    Ok(())
}

fn handle_totals(conn: &Connection) -> Result<(), AppError> {
    let mut ledger = Ledger::load(conn);
    ledger.reset_if_new_day(Local::now().date_naive(), conn)?;
    print_totals(&ledger);
    Ok(())
}

fn handle_plan_show(day: Option<String>, conn: &Connection) -> Result<(), AppError> {
    let plan = WeeklyPlan::load(conn)?;
    let days = match day {
        Some(day) => vec![day.parse::<Weekday>()?],
        None => Weekday::ALL.to_vec(),
    };
    for day in days {
        let exercises = plan.exercises(day);
        if exercises.is_empty() {
            println!("{day}: rest");
        } else {
            println!("{day}: {}", exercises.join(", "));
        }
    }
    let today = Local::now().date_naive();
    let planned = plan::todays_exercises(today, conn);
    let weekday = Weekday::from(today.weekday());
    if planned.is_empty() {
        println!("Today ({weekday}): rest");
    } else {
        println!("Today ({weekday}): {}", planned.join(", "));
    }
    Ok(())
}

fn handle_plan_toggle(day: &str, exercise: &str, conn: &Connection) -> Result<(), AppError> {
    let day = day.parse::<Weekday>()?;
    let exercise = catalog::find_exercise(exercise)
        .ok_or_else(|| AppError::validation("exercise", format!("unknown exercise '{}'", exercise.trim())))?;
    let exercise = exercise.name;
    let mut plan = WeeklyPlan::load(conn)?;
    if plan.toggle_exercise(day, &exercise) {
        println!("Added '{exercise}' to {day}.");
    } else {
        println!("Removed '{exercise}' from {day}.");
    }
    plan.save(conn)
}

fn handle_stats(conn: &Connection) {
    let stats = WorkoutStats::load(conn);
    println!("Workouts completed: {}", stats.completed_workouts);
    println!("Hours trained:      {:.1}", stats.completed_hours);
    println!("Calories burned:    {:.0}", stats.burned_calories);
}

fn print_totals(ledger: &Ledger) {
    let totals = ledger.totals;
    println!(
        "Today: {:.1} kcal, {:.1} g fat, {:.1} g sugar, {:.1} g protein",
        totals.calories, totals.fat, totals.sugar, totals.protein
    );
}
