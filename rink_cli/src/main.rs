use chrono::{Datelike, NaiveDate};
use clap::{Args, Parser, Subcommand};
use rink_core::*;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "rink")]
#[command(about = "Hockey training and nutrition planner", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Date to act on (YYYY-MM-DD), defaults to today
    #[arg(long, global = true)]
    date: Option<NaiveDate>,

    /// More log output on stderr (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Show or edit the athlete profile
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },

    /// Show the weekly schedule
    Schedule {
        /// Rebuild the schedule from goal, position and level
        #[arg(long)]
        regenerate: bool,

        /// Assign a workout type to a day, e.g. --set mon=full_body
        #[arg(long = "set", value_name = "DAY=CODE")]
        assignments: Vec<String>,
    },

    /// Show the workout plan for a day (default)
    Plan {
        /// Day of week (mon..sun), defaults to the weekday of --date
        #[arg(long)]
        day: Option<String>,

        /// Replace the exercise at a slot for this plan, e.g. --swap 0=split_squat
        #[arg(long = "swap", value_name = "SLOT=EXERCISE")]
        swaps: Vec<String>,

        /// List exercises that may replace the one at this slot
        #[arg(long, value_name = "SLOT")]
        alternatives: Option<usize>,
    },

    /// List exercises, optionally for one category
    Exercises {
        #[arg(long)]
        category: Option<Category>,
    },

    /// Show target vs consumed macros for the date
    Macros,

    /// Select and track meals
    Meal {
        #[command(subcommand)]
        action: MealAction,
    },

    /// Log or undo the date's workout
    Workout {
        #[command(subcommand)]
        action: WorkoutAction,
    },

    /// Show stretch routines
    Stretches {
        /// Routine id, e.g. pre_skate
        #[arg(long)]
        routine: Option<String>,
    },

    /// Advance to the next tier once the XP bar is full
    Promote,

    /// Manage custom workout types
    Custom {
        #[command(subcommand)]
        action: CustomAction,
    },
}

#[derive(Subcommand)]
enum ProfileAction {
    Show,
    Set(ProfileSetArgs),
}

#[derive(Args)]
struct ProfileSetArgs {
    #[arg(long)]
    age: Option<u32>,
    /// Body weight in pounds
    #[arg(long)]
    weight: Option<f64>,
    #[arg(long)]
    height_feet: Option<u8>,
    #[arg(long)]
    height_inches: Option<u8>,
    #[arg(long)]
    goal: Option<Goal>,
    #[arg(long)]
    position: Option<Position>,
    #[arg(long)]
    level: Option<Level>,
    /// Workout length in minutes
    #[arg(long)]
    duration: Option<u32>,
}

#[derive(Subcommand)]
enum MealAction {
    /// List catalog meals
    List,
    /// Choose a meal for a slot
    Select {
        #[arg(long)]
        meal_type: MealType,
        #[arg(long)]
        meal_id: String,
    },
    /// Flip a slot between consumed and not consumed
    Toggle {
        #[arg(long)]
        meal_type: MealType,
    },
}

#[derive(Subcommand)]
enum WorkoutAction {
    Log,
    Delete,
    /// Workouts logged in the days up to --date
    History {
        #[arg(long, default_value_t = 7)]
        days: u32,
    },
}

#[derive(Subcommand)]
enum CustomAction {
    Add {
        #[arg(long)]
        code: String,
        #[arg(long)]
        name: String,
        #[arg(long = "category", required = true)]
        categories: Vec<Category>,
    },
    Remove {
        #[arg(long)]
        code: String,
    },
    List,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    rink_core::logging::init(cli.verbose);

    let config = Config::load()?;
    let data_dir = cli.data_dir.unwrap_or_else(|| config.data.data_dir.clone());
    let state_path = data_dir.join("state.json");
    tracing::debug!("Using state file {:?}", state_path);
    let date = cli
        .date
        .unwrap_or_else(|| chrono::Local::now().date_naive());

    match cli.command {
        Some(Commands::Profile { action }) => cmd_profile(&state_path, action, &config),
        Some(Commands::Schedule {
            regenerate,
            assignments,
        }) => cmd_schedule(&state_path, regenerate, assignments),
        Some(Commands::Plan {
            day,
            swaps,
            alternatives,
        }) => cmd_plan(&state_path, date, day, swaps, alternatives, &config),
        Some(Commands::Exercises { category }) => cmd_exercises(category),
        Some(Commands::Macros) => cmd_macros(&state_path, date),
        Some(Commands::Meal { action }) => cmd_meal(&state_path, date, action, &config),
        Some(Commands::Workout { action }) => cmd_workout(&state_path, date, action, &config),
        Some(Commands::Stretches { routine }) => cmd_stretches(routine),
        Some(Commands::Promote) => cmd_promote(&state_path),
        Some(Commands::Custom { action }) => cmd_custom(&state_path, action),
        None => cmd_plan(&state_path, date, None, Vec::new(), None, &config),
    }
}

fn catalog() -> Result<&'static Catalog> {
    let catalog = get_default_catalog();
    let errors = catalog.validate();
    if !errors.is_empty() {
        eprintln!("Catalog validation errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        return Err(Error::CatalogValidation("Invalid catalog".into()));
    }
    Ok(catalog)
}

fn cmd_profile(state_path: &Path, action: ProfileAction, config: &Config) -> Result<()> {
    match action {
        ProfileAction::Show => {
            let data = UserData::load(state_path)?;
            display_profile(&data.profile);
        }
        ProfileAction::Set(args) => {
            let (data, regenerated) = UserData::update(state_path, |data| {
                let current = &data.profile;
                let height = match (args.height_feet, args.height_inches) {
                    (None, None) => None,
                    (feet, inches) => Some(Height {
                        feet: feet.unwrap_or(current.height.feet),
                        inches: inches.unwrap_or(current.height.inches),
                    }),
                };
                // First setup seeds duration from config when not given
                let first_setup = current.weekly_schedule == WeeklySchedule::all_rest();
                let duration = args
                    .duration
                    .or_else(|| first_setup.then_some(config.defaults.workout_duration_minutes));
                let update = ProfileUpdate {
                    age: args.age,
                    weight_lbs: args.weight,
                    height,
                    goal: args.goal,
                    position: args.position,
                    level: args.level,
                    workout_duration_minutes: duration,
                    ..Default::default()
                };

                let regenerate = update.changes_training_inputs(current) || first_setup;
                let mut next = current.apply(&update)?;
                if regenerate {
                    next.regenerate_schedule();
                }
                data.profile = next;
                Ok(regenerate)
            })?;

            println!("✓ Profile updated");
            if regenerated {
                println!("  Weekly schedule regenerated");
            }
            display_profile(&data.profile);
        }
    }
    Ok(())
}

fn cmd_schedule(state_path: &Path, regenerate: bool, assignments: Vec<String>) -> Result<()> {
    let catalog = catalog()?;
    let data = if regenerate || !assignments.is_empty() {
        let (data, ()) = UserData::update(state_path, |data| {
            let profile = &data.profile;
            let mut schedule = if regenerate {
                generate_schedule(profile.goal, profile.position, profile.level)
            } else {
                profile.weekly_schedule.clone()
            };
            let resolver = WorkoutResolver::new(catalog, &data.custom_workouts);
            for raw in &assignments {
                let (day, code) = parse_assignment(raw)?;
                if !resolver.is_known_code(&code) {
                    return Err(Error::UnknownValue {
                        kind: "workout type",
                        value: code,
                    });
                }
                schedule.set(day, code);
            }
            let update = ProfileUpdate {
                weekly_schedule: Some(schedule),
                ..Default::default()
            };
            data.profile = data.profile.apply(&update)?;
            Ok(())
        })?;
        println!("✓ Schedule updated");
        data
    } else {
        UserData::load(state_path)?
    };

    let resolver = WorkoutResolver::new(catalog, &data.custom_workouts);
    println!();
    for (day, _) in data.profile.weekly_schedule.iter() {
        let code = data
            .profile
            .weekly_schedule
            .resolved(day, |c| resolver.is_known_code(c));
        let label = resolver
            .workout_type(code)
            .map(|info| info.label)
            .unwrap_or_else(|| code.to_string());
        println!("  {:<10} {}", day.as_str(), label);
    }
    println!();
    Ok(())
}

fn parse_assignment(raw: &str) -> Result<(Day, String)> {
    let (day, code) = raw.split_once('=').ok_or_else(|| Error::UnknownValue {
        kind: "assignment",
        value: raw.to_string(),
    })?;
    let day = Day::parse_loose(day).ok_or_else(|| Error::UnknownValue {
        kind: "day",
        value: day.to_string(),
    })?;
    Ok((day, normalize_workout_code(code)))
}

fn parse_swap(raw: &str) -> Result<(usize, String)> {
    let (slot, exercise) = raw.split_once('=').ok_or_else(|| Error::UnknownValue {
        kind: "swap",
        value: raw.to_string(),
    })?;
    let slot = slot.trim().parse::<usize>().map_err(|_| Error::UnknownValue {
        kind: "swap slot",
        value: slot.to_string(),
    })?;
    Ok((slot, exercise.trim().to_string()))
}

fn cmd_plan(
    state_path: &Path,
    date: NaiveDate,
    day: Option<String>,
    swaps: Vec<String>,
    alternatives: Option<usize>,
    config: &Config,
) -> Result<()> {
    let data = UserData::load(state_path)?;
    let catalog = catalog()?;
    let resolver = WorkoutResolver::new(catalog, &data.custom_workouts)
        .with_workout_xp(config.progression.workout_log_xp);
    let profile = &data.profile;

    let day = match day {
        Some(raw) => Day::parse_loose(&raw).ok_or_else(|| Error::UnknownValue {
            kind: "day",
            value: raw.clone(),
        })?,
        None => Day::from(date.weekday()),
    };

    let code = profile
        .weekly_schedule
        .resolved(day, |c| resolver.is_known_code(c));
    let ctx = PlanContext::new(code, profile.goal, profile.workout_duration_minutes);

    // Substitutions only live for this invocation
    let mut subs = Substitutions::new();
    for raw in &swaps {
        let (slot, exercise_id) = parse_swap(raw)?;
        resolver.substitute(&mut subs, &ctx, slot, &exercise_id)?;
    }

    let plan = resolver.resolve_plan(&ctx, &subs);
    let info = resolver.workout_type(code);
    display_plan(day, info.as_ref(), &plan, &resolver, &ctx);

    if let Some(slot) = alternatives {
        let options = resolver.alternatives(&ctx, slot)?;
        println!("  Alternatives for slot {}:", slot);
        for exercise in options {
            println!("    {:<20} {}", exercise.id, exercise.name);
        }
        println!();
    }
    Ok(())
}

fn cmd_exercises(category: Option<Category>) -> Result<()> {
    let catalog = catalog()?;
    let categories: Vec<Category> = match category {
        Some(c) => vec![c],
        None => Category::ALL.to_vec(),
    };
    for category in categories {
        println!("{}", category);
        for exercise in catalog.exercises_in(category) {
            println!("  {:<20} {}", exercise.id, exercise.name);
        }
    }
    Ok(())
}

fn cmd_macros(state_path: &Path, date: NaiveDate) -> Result<()> {
    let data = UserData::load(state_path)?;
    let profile = &data.profile;
    let logs = data.meal_logs.for_date(profile.user_id, date);
    let snapshot = macro_snapshot(profile.weight_lbs, profile.goal, logs.iter().copied());
    let remaining = snapshot.remaining();

    println!("\nMacros for {} ({}, {} lb)", date, profile.goal, profile.weight_lbs);
    println!("  {:<10} {:>8} {:>10} {:>10}", "", "target", "consumed", "remaining");
    println!(
        "  {:<10} {:>8} {:>10.0} {:>10.0}",
        "calories", snapshot.target.calories, snapshot.consumed.calories, remaining.calories
    );
    println!(
        "  {:<10} {:>7}g {:>9.0}g {:>9.0}g",
        "protein", snapshot.target.protein_g, snapshot.consumed.protein_g, remaining.protein_g
    );
    println!(
        "  {:<10} {:>7}g {:>9.0}g {:>9.0}g",
        "carbs", snapshot.target.carbs_g, snapshot.consumed.carbs_g, remaining.carbs_g
    );
    println!(
        "  {:<10} {:>7}g {:>9.0}g {:>9.0}g",
        "fats", snapshot.target.fats_g, snapshot.consumed.fats_g, remaining.fats_g
    );

    if !logs.is_empty() {
        println!();
        for log in logs {
            let mark = if log.consumed { "✓" } else { " " };
            println!("  [{}] {:<10} {}", mark, log.meal_type, log.nutrition.name);
        }
    }
    println!();
    Ok(())
}

fn cmd_meal(state_path: &Path, date: NaiveDate, action: MealAction, config: &Config) -> Result<()> {
    match action {
        MealAction::List => {
            let catalog = catalog()?;
            for meal_type in MealType::ALL {
                println!("{}", meal_type);
                for meal in catalog.meals.iter().filter(|m| m.meal_type == *meal_type) {
                    let n = &meal.nutrition;
                    println!(
                        "  {:<18} {} ({:.0} kcal, {:.0}P/{:.0}C/{:.0}F)",
                        meal.id, n.name, n.calories, n.protein_g, n.carbs_g, n.fats_g
                    );
                }
            }
        }
        MealAction::Select { meal_type, meal_id } => {
            let catalog = catalog()?;
            let meal = catalog
                .meal(&meal_id)
                .ok_or_else(|| Error::NotFound(format!("meal '{}'", meal_id)))?;
            if meal.meal_type != meal_type {
                return Err(Error::NotFound(format!(
                    "{} meal '{}' ({} is a {} meal)",
                    meal_type, meal_id, meal.nutrition.name, meal.meal_type
                )));
            }
            UserData::update(state_path, |data| {
                let user = data.profile.user_id;
                data.meal_logs
                    .select(user, date, meal_type, &meal.id, meal.nutrition.clone());
                Ok(())
            })?;
            println!("✓ {} for {}: {}", meal_type, date, meal.nutrition.name);
        }
        MealAction::Toggle { meal_type } => {
            let (data, consumed) = UserData::update(state_path, |data| {
                let user = data.profile.user_id;
                let consumed = data.meal_logs.toggle_consumed(user, date, meal_type)?;
                let event = if consumed {
                    XpEvent::MealConsumed
                } else {
                    XpEvent::MealUnconsumed
                };
                data.profile.progression.apply_event(event, &config.progression);
                Ok(consumed)
            })?;
            if consumed {
                println!(
                    "✓ {} marked consumed (+{} XP)",
                    meal_type, config.progression.meal_consumed_xp
                );
            } else {
                println!("✓ {} marked not consumed", meal_type);
            }
            display_xp(&data.profile);
        }
    }
    Ok(())
}

fn cmd_workout(
    state_path: &Path,
    date: NaiveDate,
    action: WorkoutAction,
    config: &Config,
) -> Result<()> {
    match action {
        WorkoutAction::Log => {
            let catalog = catalog()?;
            let (data, code) = UserData::update(state_path, |data| {
                let resolver = WorkoutResolver::new(catalog, &data.custom_workouts);
                let code = data
                    .profile
                    .weekly_schedule
                    .resolved(Day::from(date.weekday()), |c| resolver.is_known_code(c))
                    .to_string();
                let user = data.profile.user_id;
                data.workout_logs
                    .log(user, date, &code, config.progression.workout_log_xp)?;
                data.profile
                    .progression
                    .apply_event(XpEvent::WorkoutLogged, &config.progression);
                Ok(code)
            })?;
            println!(
                "✓ Logged {} workout for {} (+{} XP)",
                code, date, config.progression.workout_log_xp
            );
            display_xp(&data.profile);
        }
        WorkoutAction::Delete => {
            let (data, removed) = UserData::update(state_path, |data| {
                let user = data.profile.user_id;
                let removed = data.workout_logs.delete(user, date)?;
                data.profile.progression.apply_event(
                    XpEvent::WorkoutDeleted {
                        xp_awarded: removed.xp_awarded,
                    },
                    &config.progression,
                );
                Ok(removed)
            })?;
            println!(
                "✓ Deleted workout for {} (-{} XP)",
                removed.date, removed.xp_awarded
            );
            display_xp(&data.profile);
        }
        WorkoutAction::History { days } => {
            let data = UserData::load(state_path)?;
            let from = date - chrono::Duration::days(i64::from(days.saturating_sub(1)));
            let logs = data.workout_logs.between(data.profile.user_id, from, date);
            if logs.is_empty() {
                println!("No workouts logged from {} to {}.", from, date);
                return Ok(());
            }
            for log in &logs {
                println!("  {}  {:<18} +{} XP", log.date, log.workout_code, log.xp_awarded);
            }
            let total: u32 = logs.iter().map(|log| log.xp_awarded).sum();
            println!("  {} workouts, {} XP", logs.len(), total);
        }
    }
    Ok(())
}

fn cmd_stretches(routine: Option<String>) -> Result<()> {
    let catalog = catalog()?;
    let routines: Vec<&StretchRoutine> = match routine {
        Some(id) => vec![catalog
            .stretch_routine(&id)
            .ok_or_else(|| Error::NotFound(format!("stretch routine '{}'", id)))?],
        None => catalog.stretch_routines.iter().collect(),
    };
    for routine in routines {
        println!("{} ({})", routine.name, routine.id);
        for stretch in &routine.stretches {
            println!("  → {}", stretch);
        }
    }
    Ok(())
}

fn cmd_promote(state_path: &Path) -> Result<()> {
    let (_, promotion) = UserData::update(state_path, |data| data.profile.progression.promote())?;
    if promotion.advanced() {
        println!("✓ Promoted: {} → {}", promotion.from, promotion.to);
    } else {
        println!("✓ Already at {}, XP reset", promotion.to);
    }
    Ok(())
}

fn cmd_custom(state_path: &Path, action: CustomAction) -> Result<()> {
    match action {
        CustomAction::Add {
            code,
            name,
            categories,
        } => {
            let catalog = catalog()?;
            let (_, created) = UserData::update(state_path, |data| {
                add_custom_workout(&mut data.custom_workouts, catalog, &code, &name, categories)
                    .cloned()
            })?;
            println!("✓ Added custom workout '{}' ({})", created.code, created.name);
        }
        CustomAction::Remove { code } => {
            let (_, removed) = UserData::update(state_path, |data| {
                remove_custom_workout(&mut data.custom_workouts, &code)
            })?;
            println!("✓ Removed custom workout '{}'", removed.code);
        }
        CustomAction::List => {
            let data = UserData::load(state_path)?;
            if data.custom_workouts.is_empty() {
                println!("No custom workouts.");
            }
            for custom in &data.custom_workouts {
                let categories: Vec<&str> = custom.categories.iter().map(|c| c.as_str()).collect();
                println!("  {:<20} {} [{}]", custom.code, custom.name, categories.join(", "));
            }
        }
    }
    Ok(())
}

fn display_profile(profile: &Profile) {
    println!("\n╭─────────────────────────────────────────╮");
    println!("│  PROFILE");
    println!("╰─────────────────────────────────────────╯");
    println!("  Age:       {}", profile.age);
    println!("  Weight:    {} lb", profile.weight_lbs);
    println!("  Height:    {}", profile.height);
    println!("  Goal:      {}", profile.goal);
    println!("  Position:  {}", profile.position);
    println!("  Level:     {}", profile.level);
    println!("  Duration:  {} min", profile.workout_duration_minutes);
    display_xp(profile);
    println!();
}

fn display_xp(profile: &Profile) {
    println!("  Tier:      {} ({}/100 XP)", profile.tier(), profile.xp());
}

fn display_plan(
    day: Day,
    info: Option<&WorkoutTypeInfo>,
    plan: &[WorkoutPlanEntry],
    resolver: &WorkoutResolver<'_>,
    ctx: &PlanContext,
) {
    let label = info.map(|i| i.label.as_str()).unwrap_or("Rest Day");
    println!("\n╭─────────────────────────────────────────╮");
    println!("│  {}: {}", day.as_str().to_uppercase(), label);
    println!("╰─────────────────────────────────────────╯");
    println!();

    if plan.is_empty() {
        match resolver.recovery_routine(&ctx.code) {
            Some(routine) => {
                println!("  Recovery day: {}", routine.name);
                for stretch in &routine.stretches {
                    println!("  → {}", stretch);
                }
            }
            None => println!("  Rest day. Recover and refuel."),
        }
        println!();
        return;
    }

    if let Some(info) = info {
        println!("  Focus: {}", info.focus);
        println!("  ~{} min, +{} XP when logged", ctx.duration_minutes, info.xp_reward);
        println!();
    }

    for entry in plan {
        let swapped = if entry.substituted { " (swapped)" } else { "" };
        println!("  {}. {}{}", entry.slot, entry.exercise_name, swapped);
        println!(
            "     {} x {} · rest {}s · {}",
            entry.sets, entry.reps, entry.rest_seconds, entry.category
        );
    }
    println!();
}
