//! Core domain types for the Rink training engine.
//!
//! This module defines the fundamental types used throughout the system:
//! - Athlete attributes (goal, position, level, tier)
//! - Exercises, categories and workout templates
//! - Weekly schedules and resolved workout plans
//! - Meal and workout logs

use crate::Error;
use chrono::{DateTime, NaiveDate, Utc, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Normalize user-supplied codes so `build-muscle`, `Build_Muscle` and
/// `build_muscle` all parse the same way.
fn normalize_code(raw: &str) -> String {
    raw.trim().to_lowercase().replace('-', "_")
}

/// Implements `as_str`, `Display` and `FromStr` for a unit enum with an `ALL` table.
macro_rules! code_enum {
    ($ty:ident, $kind:literal, { $($variant:ident => $code:literal),+ $(,)? }) => {
        impl $ty {
            pub const ALL: &'static [$ty] = &[$($ty::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($ty::$variant => $code),+
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.pad(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let key = normalize_code(s);
                $ty::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str() == key)
                    .ok_or_else(|| Error::UnknownValue {
                        kind: $kind,
                        value: s.to_string(),
                    })
            }
        }
    };
}

/// Deserialize from the code string, falling back to the default variant
/// for values no longer recognised. Adds `parse_or_default`.
macro_rules! lenient_enum {
    ($ty:ident, $kind:literal) => {
        impl $ty {
            /// Parse a code, falling back to the default for anything unrecognised.
            pub fn parse_or_default(raw: &str) -> Self {
                raw.parse().unwrap_or_else(|_| {
                    let fallback = $ty::default();
                    tracing::warn!("Unknown {} '{}', falling back to {}", $kind, raw, fallback);
                    fallback
                })
            }
        }

        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let raw = String::deserialize(deserializer)?;
                Ok($ty::parse_or_default(&raw))
            }
        }
    };
}

// ============================================================================
// Athlete Attributes
// ============================================================================

/// Training goal driving templates and calorie targets
#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum Goal {
    BuildMuscle,
    FatLoss,
    #[default]
    Maintain,
}

code_enum!(Goal, "goal", {
    BuildMuscle => "build_muscle",
    FatLoss => "fat_loss",
    Maintain => "maintain",
});

lenient_enum!(Goal, "goal");

/// Playing position
#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum Position {
    Defense,
    #[default]
    Wing,
    Center,
    Goalie,
}

code_enum!(Position, "position", {
    Defense => "defense",
    Wing => "wing",
    Center => "center",
    Goalie => "goalie",
});

lenient_enum!(Position, "position");

/// Competition level, lowest to highest
#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    House,
    #[default]
    A,
    Aa,
    Aaa,
    Junior,
}

code_enum!(Level, "level", {
    House => "house",
    A => "a",
    Aa => "aa",
    Aaa => "aaa",
    Junior => "junior",
});

lenient_enum!(Level, "level");

impl Level {
    /// AAA and junior swap a recovery day for high-intensity work
    pub fn is_elite(&self) -> bool {
        matches!(self, Level::Aaa | Level::Junior)
    }
}

/// Progression rank, ordered Bronze < Silver < Gold < Diamond < Elite
#[derive(
    Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    #[default]
    Bronze,
    Silver,
    Gold,
    Diamond,
    Elite,
}

code_enum!(Tier, "tier", {
    Bronze => "bronze",
    Silver => "silver",
    Gold => "gold",
    Diamond => "diamond",
    Elite => "elite",
});

/// Day of the week, Monday first
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Day {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

code_enum!(Day, "day", {
    Monday => "monday",
    Tuesday => "tuesday",
    Wednesday => "wednesday",
    Thursday => "thursday",
    Friday => "friday",
    Saturday => "saturday",
    Sunday => "sunday",
});

impl Day {
    /// Position in the week (Monday = 0)
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Parse full names and three-letter abbreviations (`mon`, `tue`, ...)
    pub fn parse_loose(raw: &str) -> Option<Self> {
        let key = normalize_code(raw);
        if key.len() < 3 {
            return None;
        }
        Day::ALL.iter().copied().find(|d| d.as_str().starts_with(&key))
    }
}

impl From<Weekday> for Day {
    fn from(weekday: Weekday) -> Self {
        match weekday {
            Weekday::Mon => Day::Monday,
            Weekday::Tue => Day::Tuesday,
            Weekday::Wed => Day::Wednesday,
            Weekday::Thu => Day::Thursday,
            Weekday::Fri => Day::Friday,
            Weekday::Sat => Day::Saturday,
            Weekday::Sun => Day::Sunday,
        }
    }
}

/// Athlete height in feet and inches
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Height {
    pub feet: u8,
    pub inches: u8,
}

impl Default for Height {
    fn default() -> Self {
        Self { feet: 5, inches: 8 }
    }
}

impl fmt::Display for Height {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}'{}\"", self.feet, self.inches)
    }
}

// ============================================================================
// Exercises and Templates
// ============================================================================

/// Exercise category; substitutions stay within a category
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    UpperPush,
    UpperPull,
    Legs,
    Core,
    Plyometric,
    Conditioning,
    Skills,
    Mobility,
}

code_enum!(Category, "category", {
    UpperPush => "upper_push",
    UpperPull => "upper_pull",
    Legs => "legs",
    Core => "core",
    Plyometric => "plyometric",
    Conditioning => "conditioning",
    Skills => "skills",
    Mobility => "mobility",
});

/// An exercise definition (e.g., "Back Squat")
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Exercise {
    pub id: String,
    pub name: String,
    pub category: Category,
}

/// Sets/reps/rest prescription for one category under one goal
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Dosage {
    pub sets: u8,
    pub reps: String,
    pub rest_seconds: u32,
}

/// One slot of a workout template
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TemplateSlot {
    pub exercise_id: String,
    pub category: Category,
    pub sets: u8,
    pub reps: String,
    pub rest_seconds: u32,
}

/// Display metadata for a workout-type code
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct WorkoutTypeInfo {
    pub code: String,
    pub label: String,
    pub focus: String,
    /// XP for logging this type; zero on rest days
    pub xp_reward: u32,
}

/// A user-defined workout type, built from an ordered category list
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct CustomWorkoutType {
    pub id: Uuid,
    pub code: String,
    pub name: String,
    pub categories: Vec<Category>,
}

/// A named list of stretches
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StretchRoutine {
    pub id: String,
    pub name: String,
    pub stretches: Vec<String>,
}

/// One resolved line of a workout plan
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct WorkoutPlanEntry {
    pub slot: usize,
    pub exercise_id: String,
    pub exercise_name: String,
    pub category: Category,
    pub sets: u8,
    pub reps: String,
    pub rest_seconds: u32,
    pub substituted: bool,
}

// ============================================================================
// Weekly Schedule
// ============================================================================

/// Day-of-week → workout-type code. Always holds all seven days.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    from = "BTreeMap<Day, String>",
    into = "BTreeMap<Day, String>"
)]
pub struct WeeklySchedule {
    pub(crate) days: [String; 7],
}

// ============================================================================
// Nutrition
// ============================================================================

/// Meal slot within a day
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

code_enum!(MealType, "meal type", {
    Breakfast => "breakfast",
    Lunch => "lunch",
    Dinner => "dinner",
    Snack => "snack",
});

/// Nutrition figures, captured by value when a meal is selected
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
pub struct NutritionFacts {
    pub name: String,
    pub calories: f64,
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fats_g: f64,
}

/// A selectable meal from the catalog
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Meal {
    pub id: String,
    pub meal_type: MealType,
    pub nutrition: NutritionFacts,
}

/// Selected meal for a (user, date, meal type)
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct MealLog {
    pub user_id: Uuid,
    pub date: NaiveDate,
    pub meal_type: MealType,
    pub meal_id: String,
    pub consumed: bool,
    pub nutrition: NutritionFacts,
}

/// A logged workout for a (user, date)
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct WorkoutLog {
    pub user_id: Uuid,
    pub date: NaiveDate,
    pub workout_code: String,
    pub xp_awarded: u32,
    pub logged_at: DateTime<Utc>,
}

// ============================================================================
// Progression
// ============================================================================

/// XP within the current tier plus the tier itself
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ProgressionState {
    pub xp: u32,
    pub tier: Tier,
}

// ============================================================================
// Catalog Type
// ============================================================================

/// Static reference data: exercises, templates, stretches and meals
#[derive(Clone, Debug)]
pub struct Catalog {
    pub exercises: Vec<Exercise>,
    pub workout_types: HashMap<String, WorkoutTypeInfo>,
    pub templates: HashMap<Goal, HashMap<String, Vec<TemplateSlot>>>,
    pub dosages: HashMap<Goal, HashMap<Category, Dosage>>,
    pub stretch_routines: Vec<StretchRoutine>,
    pub meals: Vec<Meal>,
}
