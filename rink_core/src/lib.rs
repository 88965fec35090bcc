#![forbid(unsafe_code)]

//! Core domain model and business logic for the Rink training engine.
//!
//! This crate provides:
//! - Domain types (athlete attributes, exercises, templates, logs)
//! - Catalog of exercises, workout templates, stretches and meals
//! - Weekly schedule generation
//! - Workout plan resolution with substitutions
//! - Macro targets and consumed totals
//! - XP/tier progression
//! - Local persistence (profile, logs, custom workouts)

pub mod types;
pub mod error;
pub mod catalog;
pub mod config;
pub mod logging;
pub mod schedule;
pub mod resolver;
pub mod nutrition;
pub mod progression;
pub mod profile;
pub mod logs;
pub mod custom;
pub mod state;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use catalog::{build_default_catalog, get_default_catalog};
pub use config::Config;
pub use schedule::generate_schedule;
pub use resolver::{plan_length, PlanContext, Substitutions, WorkoutResolver};
pub use nutrition::{
    consumed_macros, macro_snapshot, target_macros, MacroSnapshot, MacroTargets, MacroTotals,
};
pub use progression::{Promotion, XpEvent};
pub use profile::{Profile, ProfileUpdate};
pub use logs::{MealLogBook, WorkoutLogBook};
pub use custom::{add_custom_workout, normalize_workout_code, remove_custom_workout};
pub use state::UserData;
