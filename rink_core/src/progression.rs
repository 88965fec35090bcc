//! XP and tier progression.
//!
//! Progression rules:
//! 1. XP accumulates up to a soft ceiling of 100 and never goes below 0
//! 2. Promotion requires a full bar, advances one tier and resets XP
//! 3. Elite is terminal: promoting there only resets XP
//!
//! Reward events:
//! - Logging a workout awards XP; deleting that log revokes the same amount
//! - Marking a meal consumed awards XP; un-marking it revokes nothing

use crate::config::ProgressionConfig;
use crate::{Error, ProgressionState, Result, Tier};
use serde::{Deserialize, Serialize};

/// XP needed to promote, and the cap within a tier
pub const XP_CEILING: u32 = 100;

impl Tier {
    /// The following tier, or `None` at Elite
    pub fn next(&self) -> Option<Tier> {
        match self {
            Tier::Bronze => Some(Tier::Silver),
            Tier::Silver => Some(Tier::Gold),
            Tier::Gold => Some(Tier::Diamond),
            Tier::Diamond => Some(Tier::Elite),
            Tier::Elite => None,
        }
    }
}

/// Outcome of a successful `promote()`
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Promotion {
    pub from: Tier,
    pub to: Tier,
}

impl Promotion {
    /// False when already at the terminal tier
    pub fn advanced(&self) -> bool {
        self.from != self.to
    }
}

/// Events that move XP
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum XpEvent {
    WorkoutLogged,
    /// Carries the amount recorded on the deleted log
    WorkoutDeleted { xp_awarded: u32 },
    MealConsumed,
    MealUnconsumed,
}

impl ProgressionState {
    /// Add XP, capped at the ceiling
    pub fn award_xp(&mut self, amount: u32) {
        self.xp = self.xp.saturating_add(amount).min(XP_CEILING);
        tracing::debug!("Awarded {} XP, now {}", amount, self.xp);
    }

    /// Remove XP, floored at zero
    pub fn revoke_xp(&mut self, amount: u32) {
        self.xp = self.xp.saturating_sub(amount);
        tracing::debug!("Revoked {} XP, now {}", amount, self.xp);
    }

    pub fn can_promote(&self) -> bool {
        self.xp >= XP_CEILING
    }

    /// Advance one tier and reset XP
    ///
    /// Fails without touching state when the XP bar isn't full.
    pub fn promote(&mut self) -> Result<Promotion> {
        if !self.can_promote() {
            return Err(Error::PromotionNotReady { xp: self.xp });
        }

        let from = self.tier;
        let to = from.next().unwrap_or(from);
        self.tier = to;
        self.xp = 0;

        tracing::info!("Promoted from {} to {}", from, to);
        Ok(Promotion { from, to })
    }

    /// Apply a reward event, returning the signed XP change requested
    pub fn apply_event(&mut self, event: XpEvent, config: &ProgressionConfig) -> i64 {
        match event {
            XpEvent::WorkoutLogged => {
                self.award_xp(config.workout_log_xp);
                i64::from(config.workout_log_xp)
            }
            XpEvent::WorkoutDeleted { xp_awarded } => {
                self.revoke_xp(xp_awarded);
                -i64::from(xp_awarded)
            }
            XpEvent::MealConsumed => {
                self.award_xp(config.meal_consumed_xp);
                i64::from(config.meal_consumed_xp)
            }
            // Consumption is a one-way XP event
            XpEvent::MealUnconsumed => 0,
        }
    }
}
