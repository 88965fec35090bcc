//! Weekly schedule generation.
//!
//! A schedule is built in three layers, each a list of day overwrites applied
//! in order (last writer wins):
//! 1. Goal base template (a complete week)
//! 2. Position overrides
//! 3. Level overrides

use crate::catalog::{
    ACTIVE_RECOVERY, EXPLOSIVE_POWER, FULL_BODY, HIGH_INTENSITY, LEGS_STRENGTH, REST,
    SKILLS_CARDIO, UPPER_STRENGTH,
};
use crate::{Day, Goal, Level, Position, WeeklySchedule};
use std::collections::BTreeMap;

impl WeeklySchedule {
    /// A week of rest days
    pub fn all_rest() -> Self {
        Self {
            days: std::array::from_fn(|_| REST.to_string()),
        }
    }

    /// Stored code for a day (may name a since-deleted custom type)
    pub fn get(&self, day: Day) -> &str {
        &self.days[day.index()]
    }

    pub fn set(&mut self, day: Day, code: impl Into<String>) {
        self.days[day.index()] = code.into();
    }

    /// Code for a day, with unknown codes read back as `rest`
    pub fn resolved<F>(&self, day: Day, is_known: F) -> &str
    where
        F: Fn(&str) -> bool,
    {
        let code = self.get(day);
        if is_known(code) {
            code
        } else {
            tracing::debug!("Unknown workout code '{}' on {}, reading as rest", code, day);
            REST
        }
    }

    /// Iterate Monday → Sunday
    pub fn iter(&self) -> impl Iterator<Item = (Day, &str)> {
        Day::ALL
            .iter()
            .copied()
            .map(move |day| (day, self.get(day)))
    }

    /// Days whose code equals `code`, in week order
    pub fn days_with(&self, code: &str) -> Vec<Day> {
        self.iter()
            .filter(|(_, c)| *c == code)
            .map(|(day, _)| day)
            .collect()
    }

    fn overwrite(&mut self, overrides: &[(Day, &str)]) {
        for (day, code) in overrides {
            self.set(*day, *code);
        }
    }
}

impl Default for WeeklySchedule {
    fn default() -> Self {
        Self::all_rest()
    }
}

impl From<BTreeMap<Day, String>> for WeeklySchedule {
    fn from(mut map: BTreeMap<Day, String>) -> Self {
        let mut schedule = Self::all_rest();
        for day in Day::ALL {
            if let Some(code) = map.remove(day) {
                schedule.set(*day, code);
            }
        }
        schedule
    }
}

impl From<WeeklySchedule> for BTreeMap<Day, String> {
    fn from(schedule: WeeklySchedule) -> Self {
        Day::ALL.iter().copied().zip(schedule.days).collect()
    }
}

fn base_template(goal: Goal) -> [&'static str; 7] {
    match goal {
        Goal::BuildMuscle => [
            UPPER_STRENGTH,
            LEGS_STRENGTH,
            ACTIVE_RECOVERY,
            UPPER_STRENGTH,
            LEGS_STRENGTH,
            FULL_BODY,
            REST,
        ],
        Goal::FatLoss => [
            FULL_BODY,
            SKILLS_CARDIO,
            LEGS_STRENGTH,
            SKILLS_CARDIO,
            UPPER_STRENGTH,
            ACTIVE_RECOVERY,
            REST,
        ],
        Goal::Maintain => [
            FULL_BODY,
            ACTIVE_RECOVERY,
            UPPER_STRENGTH,
            LEGS_STRENGTH,
            EXPLOSIVE_POWER,
            ACTIVE_RECOVERY,
            REST,
        ],
    }
}

fn position_overrides(position: Position) -> &'static [(Day, &'static str)] {
    match position {
        Position::Goalie => &[
            (Day::Monday, EXPLOSIVE_POWER),
            (Day::Thursday, EXPLOSIVE_POWER),
            (Day::Saturday, SKILLS_CARDIO),
        ],
        Position::Defense => &[(Day::Monday, UPPER_STRENGTH), (Day::Thursday, LEGS_STRENGTH)],
        Position::Center => &[(Day::Wednesday, SKILLS_CARDIO), (Day::Friday, FULL_BODY)],
        Position::Wing => &[],
    }
}

/// Level overrides depend on the schedule built so far
fn level_overrides(level: Level, schedule: &WeeklySchedule) -> Vec<(Day, &'static str)> {
    if level.is_elite() {
        return schedule
            .days_with(ACTIVE_RECOVERY)
            .first()
            .map(|day| vec![(*day, HIGH_INTENSITY)])
            .unwrap_or_default();
    }
    match level {
        Level::House => vec![
            (Day::Friday, ACTIVE_RECOVERY),
            (Day::Saturday, REST),
            (Day::Sunday, REST),
        ],
        _ => Vec::new(),
    }
}

/// Generate a full week of workout-type codes
///
/// Pure: identical inputs always produce identical schedules.
pub fn generate_schedule(goal: Goal, position: Position, level: Level) -> WeeklySchedule {
    let mut schedule = WeeklySchedule::all_rest();

    let base: Vec<(Day, &str)> = Day::ALL
        .iter()
        .copied()
        .zip(base_template(goal))
        .collect();
    schedule.overwrite(&base);
    schedule.overwrite(position_overrides(position));

    let level_layer = level_overrides(level, &schedule);
    schedule.overwrite(&level_layer);

    tracing::debug!(
        "Generated schedule for {}/{}/{}: {:?}",
        goal,
        position,
        level,
        schedule.days
    );
    schedule
}
