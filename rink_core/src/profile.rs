//! Athlete profile and whole-field partial updates.

use crate::schedule::generate_schedule;
use crate::{
    Error, Goal, Height, Level, Position, ProgressionState, Result, Tier, WeeklySchedule,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One athlete's profile
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Profile {
    pub user_id: Uuid,
    pub age: u32,
    pub weight_lbs: f64,
    pub height: Height,
    pub goal: Goal,
    pub position: Position,
    pub level: Level,
    pub workout_duration_minutes: u32,
    #[serde(default)]
    pub weekly_schedule: WeeklySchedule,
    #[serde(flatten)]
    pub progression: ProgressionState,
}

impl Profile {
    /// Default profile for a new user
    pub fn new(user_id: Uuid) -> Self {
        Self {
            user_id,
            age: 16,
            weight_lbs: 150.0,
            height: Height::default(),
            goal: Goal::default(),
            position: Position::default(),
            level: Level::default(),
            workout_duration_minutes: 60,
            weekly_schedule: WeeklySchedule::default(),
            progression: ProgressionState::default(),
        }
    }

    pub fn xp(&self) -> u32 {
        self.progression.xp
    }

    pub fn tier(&self) -> Tier {
        self.progression.tier
    }

    /// Replace the schedule with one generated from goal/position/level
    pub fn regenerate_schedule(&mut self) {
        self.weekly_schedule = generate_schedule(self.goal, self.position, self.level);
    }

    /// Apply the named field changes and return the updated profile
    ///
    /// Validation runs on the result; `self` is never modified.
    pub fn apply(&self, update: &ProfileUpdate) -> Result<Profile> {
        let mut next = self.clone();

        if let Some(age) = update.age {
            next.age = age;
        }
        if let Some(weight) = update.weight_lbs {
            next.weight_lbs = weight;
        }
        if let Some(height) = update.height {
            next.height = height;
        }
        if let Some(goal) = update.goal {
            next.goal = goal;
        }
        if let Some(position) = update.position {
            next.position = position;
        }
        if let Some(level) = update.level {
            next.level = level;
        }
        if let Some(duration) = update.workout_duration_minutes {
            next.workout_duration_minutes = duration;
        }
        if let Some(schedule) = &update.weekly_schedule {
            next.weekly_schedule = schedule.clone();
        }
        if let Some(progression) = update.progression {
            next.progression = progression;
        }

        next.validate()?;
        Ok(next)
    }

    pub fn validate(&self) -> Result<()> {
        if self.age == 0 {
            return Err(Error::InvalidProfile("age must be positive".into()));
        }
        if !(self.weight_lbs.is_finite() && self.weight_lbs > 0.0) {
            return Err(Error::InvalidProfile(format!(
                "weight must be positive, got {}",
                self.weight_lbs
            )));
        }
        if self.height.inches >= 12 {
            return Err(Error::InvalidProfile(format!(
                "inches must be 0-11, got {}",
                self.height.inches
            )));
        }
        if self.workout_duration_minutes == 0 {
            return Err(Error::InvalidProfile(
                "workout duration must be positive".into(),
            ));
        }
        if self.progression.xp > crate::progression::XP_CEILING {
            return Err(Error::InvalidProfile(format!(
                "xp must be 0-100, got {}",
                self.progression.xp
            )));
        }
        Ok(())
    }
}

/// Field replacements; `None` leaves the field unchanged
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ProfileUpdate {
    pub age: Option<u32>,
    pub weight_lbs: Option<f64>,
    pub height: Option<Height>,
    pub goal: Option<Goal>,
    pub position: Option<Position>,
    pub level: Option<Level>,
    pub workout_duration_minutes: Option<u32>,
    pub weekly_schedule: Option<WeeklySchedule>,
    pub progression: Option<ProgressionState>,
}

impl ProfileUpdate {
    /// Whether goal, position or level differ from `profile`
    pub fn changes_training_inputs(&self, profile: &Profile) -> bool {
        self.goal.is_some_and(|g| g != profile.goal)
            || self.position.is_some_and(|p| p != profile.position)
            || self.level.is_some_and(|l| l != profile.level)
    }

    pub fn is_empty(&self) -> bool {
        self.age.is_none()
            && self.weight_lbs.is_none()
            && self.height.is_none()
            && self.goal.is_none()
            && self.position.is_none()
            && self.level.is_none()
            && self.workout_duration_minutes.is_none()
            && self.weekly_schedule.is_none()
            && self.progression.is_none()
    }
}
