//! Meal and workout logs.
//!
//! - Meal logs: at most one row per (user, date, meal type); selection upserts
//! - Workout logs: at most one row per (user, date)

use crate::{Error, MealLog, MealType, NutritionFacts, Result, WorkoutLog};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// All meal-log rows for one store
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct MealLogBook {
    rows: Vec<MealLog>,
}

impl MealLogBook {
    fn position(&self, user_id: Uuid, date: NaiveDate, meal_type: MealType) -> Option<usize> {
        self.rows
            .iter()
            .position(|r| r.user_id == user_id && r.date == date && r.meal_type == meal_type)
    }

    /// Select a meal for a slot, replacing any previous selection in place
    ///
    /// The nutrition figures are stored by value. Re-selection keeps the
    /// row's consumed flag.
    pub fn select(
        &mut self,
        user_id: Uuid,
        date: NaiveDate,
        meal_type: MealType,
        meal_id: &str,
        nutrition: NutritionFacts,
    ) -> &MealLog {
        let idx = match self.position(user_id, date, meal_type) {
            Some(idx) => {
                let row = &mut self.rows[idx];
                row.meal_id = meal_id.to_string();
                row.nutrition = nutrition;
                tracing::debug!("Replaced {} selection for {} with '{}'", meal_type, date, meal_id);
                idx
            }
            None => {
                self.rows.push(MealLog {
                    user_id,
                    date,
                    meal_type,
                    meal_id: meal_id.to_string(),
                    consumed: false,
                    nutrition,
                });
                tracing::debug!("Selected '{}' as {} for {}", meal_id, meal_type, date);
                self.rows.len() - 1
            }
        };
        &self.rows[idx]
    }

    /// Flip the consumed flag, returning its new value
    pub fn toggle_consumed(
        &mut self,
        user_id: Uuid,
        date: NaiveDate,
        meal_type: MealType,
    ) -> Result<bool> {
        let idx = self
            .position(user_id, date, meal_type)
            .ok_or_else(|| Error::NotFound(format!("no {} selected for {}", meal_type, date)))?;
        let row = &mut self.rows[idx];
        row.consumed = !row.consumed;
        Ok(row.consumed)
    }

    pub fn get(&self, user_id: Uuid, date: NaiveDate, meal_type: MealType) -> Option<&MealLog> {
        self.position(user_id, date, meal_type)
            .map(|idx| &self.rows[idx])
    }

    /// Rows for a day, ordered by meal type
    pub fn for_date(&self, user_id: Uuid, date: NaiveDate) -> Vec<&MealLog> {
        let mut rows: Vec<&MealLog> = self
            .rows
            .iter()
            .filter(|r| r.user_id == user_id && r.date == date)
            .collect();
        rows.sort_by_key(|r| r.meal_type);
        rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// All workout-log rows for one store
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct WorkoutLogBook {
    rows: Vec<WorkoutLog>,
}

impl WorkoutLogBook {
    /// Record a workout for a date; one per day
    pub fn log(
        &mut self,
        user_id: Uuid,
        date: NaiveDate,
        workout_code: &str,
        xp_awarded: u32,
    ) -> Result<&WorkoutLog> {
        if self.get(user_id, date).is_some() {
            return Err(Error::DuplicateWorkoutLog(date));
        }
        self.rows.push(WorkoutLog {
            user_id,
            date,
            workout_code: workout_code.to_string(),
            xp_awarded,
            logged_at: Utc::now(),
        });
        tracing::info!("Logged '{}' workout for {}", workout_code, date);
        Ok(&self.rows[self.rows.len() - 1])
    }

    /// Remove the workout for a date, returning it so its XP can be revoked
    pub fn delete(&mut self, user_id: Uuid, date: NaiveDate) -> Result<WorkoutLog> {
        let idx = self
            .rows
            .iter()
            .position(|r| r.user_id == user_id && r.date == date)
            .ok_or_else(|| Error::NotFound(format!("no workout logged for {}", date)))?;
        let removed = self.rows.remove(idx);
        tracing::info!("Deleted '{}' workout for {}", removed.workout_code, date);
        Ok(removed)
    }

    pub fn get(&self, user_id: Uuid, date: NaiveDate) -> Option<&WorkoutLog> {
        self.rows
            .iter()
            .find(|r| r.user_id == user_id && r.date == date)
    }

    /// Logs between two dates inclusive, oldest first
    pub fn between(&self, user_id: Uuid, from: NaiveDate, to: NaiveDate) -> Vec<&WorkoutLog> {
        let mut rows: Vec<&WorkoutLog> = self
            .rows
            .iter()
            .filter(|r| r.user_id == user_id && r.date >= from && r.date <= to)
            .collect();
        rows.sort_by_key(|r| r.date);
        rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
