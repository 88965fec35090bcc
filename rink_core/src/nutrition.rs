//! Macro-nutrient targets and consumed totals.
//!
//! Targets are derived from body weight (lb) and goal:
//! - protein: 1.0 g/lb
//! - calories: 15 kcal/lb, ±500 for build-muscle / fat-loss
//! - fats: 0.4 g/lb
//! - carbs: whatever calories remain, never negative

use crate::{Goal, MealLog};
use serde::{Deserialize, Serialize};

const PROTEIN_G_PER_LB: f64 = 1.0;
const CALORIES_PER_LB: f64 = 15.0;
const FATS_G_PER_LB: f64 = 0.4;
const GOAL_CALORIE_ADJUSTMENT: f64 = 500.0;

const KCAL_PER_G_PROTEIN: i64 = 4;
const KCAL_PER_G_CARBS: i64 = 4;
const KCAL_PER_G_FAT: i64 = 9;

/// Whole-number daily targets
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct MacroTargets {
    pub protein_g: i64,
    pub carbs_g: i64,
    pub fats_g: i64,
    /// Can be negative for very light fat-loss profiles; not clamped.
    pub calories: i64,
}

/// Summed nutrition figures
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Default)]
pub struct MacroTotals {
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fats_g: f64,
    pub calories: f64,
}

/// Target vs consumed for one day
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct MacroSnapshot {
    pub target: MacroTargets,
    pub consumed: MacroTotals,
}

impl MacroSnapshot {
    /// Target minus consumed, per field (negative once a target is exceeded)
    pub fn remaining(&self) -> MacroTotals {
        MacroTotals {
            protein_g: self.target.protein_g as f64 - self.consumed.protein_g,
            carbs_g: self.target.carbs_g as f64 - self.consumed.carbs_g,
            fats_g: self.target.fats_g as f64 - self.consumed.fats_g,
            calories: self.target.calories as f64 - self.consumed.calories,
        }
    }
}

/// Compute daily macro targets
pub fn target_macros(weight_lbs: f64, goal: Goal) -> MacroTargets {
    let protein_g = (weight_lbs * PROTEIN_G_PER_LB).round() as i64;
    let base_calories = weight_lbs * CALORIES_PER_LB;
    let calories = match goal {
        Goal::BuildMuscle => base_calories + GOAL_CALORIE_ADJUSTMENT,
        Goal::FatLoss => base_calories - GOAL_CALORIE_ADJUSTMENT,
        Goal::Maintain => base_calories,
    }
    .round() as i64;
    let fats_g = (weight_lbs * FATS_G_PER_LB).round() as i64;

    let remaining = calories - protein_g * KCAL_PER_G_PROTEIN - fats_g * KCAL_PER_G_FAT;
    let carbs_g = ((remaining as f64) / KCAL_PER_G_CARBS as f64).round().max(0.0) as i64;

    MacroTargets {
        protein_g,
        carbs_g,
        fats_g,
        calories,
    }
}

/// Sum nutrition snapshots of consumed meals; unconsumed rows count as zero
pub fn consumed_macros<'a, I>(meal_logs: I) -> MacroTotals
where
    I: IntoIterator<Item = &'a MealLog>,
{
    meal_logs
        .into_iter()
        .filter(|log| log.consumed)
        .fold(MacroTotals::default(), |acc, log| MacroTotals {
            protein_g: acc.protein_g + log.nutrition.protein_g,
            carbs_g: acc.carbs_g + log.nutrition.carbs_g,
            fats_g: acc.fats_g + log.nutrition.fats_g,
            calories: acc.calories + log.nutrition.calories,
        })
}

/// Target and consumed figures together
pub fn macro_snapshot<'a, I>(weight_lbs: f64, goal: Goal, meal_logs: I) -> MacroSnapshot
where
    I: IntoIterator<Item = &'a MealLog>,
{
    MacroSnapshot {
        target: target_macros(weight_lbs, goal),
        consumed: consumed_macros(meal_logs),
    }
}
