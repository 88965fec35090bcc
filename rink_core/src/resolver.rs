//! Workout resolution: turn a day's workout-type code into an exercise plan.
//!
//! Resolution rules:
//! - `rest` and `active_recovery` (and unknown codes) resolve to an empty plan
//! - Built-in codes use the goal's template, falling back to `maintain`
//! - Custom codes get one slot per listed category
//! - Plans are truncated to `ceil(duration / 12)` slots, never below one
//! - Substitutions replace the exercise at a slot index

use crate::catalog::{ACTIVE_RECOVERY, RECOVERY_ROUTINE_ID, REST, WORKOUT_LOG_XP};
use crate::{
    Catalog, CustomWorkoutType, Error, Exercise, Goal, Result, StretchRoutine, TemplateSlot,
    WorkoutPlanEntry, WorkoutTypeInfo,
};
use std::collections::BTreeMap;

/// Nominal minutes per exercise, rest included
pub const MINUTES_PER_EXERCISE: u32 = 12;

/// Maximum number of plan entries for a session length
pub fn plan_length(duration_minutes: u32) -> usize {
    duration_minutes.div_ceil(MINUTES_PER_EXERCISE).max(1) as usize
}

/// Inputs that identify one resolved plan
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlanContext {
    pub code: String,
    pub goal: Goal,
    pub duration_minutes: u32,
}

impl PlanContext {
    pub fn new(code: impl Into<String>, goal: Goal, duration_minutes: u32) -> Self {
        Self {
            code: code.into(),
            goal,
            duration_minutes,
        }
    }
}

/// Caller-owned slot → exercise overrides, bound to one plan context
///
/// Rebinding to a different context forgets every override, and a map
/// bound elsewhere contributes nothing to a resolution.
#[derive(Clone, Debug, Default)]
pub struct Substitutions {
    context: Option<PlanContext>,
    by_slot: BTreeMap<usize, String>,
}

impl Substitutions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind to `ctx`, clearing overrides if the context changed.
    /// Returns true when overrides were discarded.
    pub fn rebind(&mut self, ctx: &PlanContext) -> bool {
        if self.context.as_ref() == Some(ctx) {
            return false;
        }
        let discarded = !self.by_slot.is_empty();
        if discarded {
            tracing::debug!(
                "Plan context changed to {:?}, dropping {} substitutions",
                ctx,
                self.by_slot.len()
            );
        }
        self.by_slot.clear();
        self.context = Some(ctx.clone());
        discarded
    }

    pub fn is_bound_to(&self, ctx: &PlanContext) -> bool {
        self.context.as_ref() == Some(ctx)
    }

    pub fn get(&self, slot: usize) -> Option<&str> {
        self.by_slot.get(&slot).map(String::as_str)
    }

    pub fn clear_slot(&mut self, slot: usize) -> Option<String> {
        self.by_slot.remove(&slot)
    }

    pub fn is_empty(&self) -> bool {
        self.by_slot.is_empty()
    }
}

/// Resolves workout-type codes against the catalog plus user-defined types
pub struct WorkoutResolver<'a> {
    catalog: &'a Catalog,
    custom: &'a [CustomWorkoutType],
    workout_xp: u32,
}

impl<'a> WorkoutResolver<'a> {
    pub fn new(catalog: &'a Catalog, custom: &'a [CustomWorkoutType]) -> Self {
        Self {
            catalog,
            custom,
            workout_xp: WORKOUT_LOG_XP,
        }
    }

    /// Report `xp` as the reward for training days, matching what logging awards
    pub fn with_workout_xp(mut self, xp: u32) -> Self {
        self.workout_xp = xp;
        self
    }

    fn custom_type(&self, code: &str) -> Option<&'a CustomWorkoutType> {
        self.custom.iter().find(|c| c.code == code)
    }

    /// Whether `code` names a built-in or custom workout type
    pub fn is_known_code(&self, code: &str) -> bool {
        self.catalog.is_builtin_code(code) || self.custom_type(code).is_some()
    }

    /// Display metadata for a code; custom types get their name as label
    pub fn workout_type(&self, code: &str) -> Option<WorkoutTypeInfo> {
        if let Some(info) = self.catalog.workout_types.get(code) {
            let mut info = info.clone();
            if code != REST {
                info.xp_reward = self.workout_xp;
            }
            return Some(info);
        }
        self.custom_type(code).map(|custom| WorkoutTypeInfo {
            code: custom.code.clone(),
            label: custom.name.clone(),
            focus: custom
                .categories
                .iter()
                .map(|c| c.as_str())
                .collect::<Vec<_>>()
                .join(", "),
            xp_reward: self.workout_xp,
        })
    }

    /// Stretch routine to show instead of a plan, if any
    pub fn recovery_routine(&self, code: &str) -> Option<&'a StretchRoutine> {
        if code == ACTIVE_RECOVERY {
            self.catalog.stretch_routine(RECOVERY_ROUTINE_ID)
        } else {
            None
        }
    }

    /// Untruncated template for a context
    fn template_for(&self, ctx: &PlanContext) -> Vec<TemplateSlot> {
        let code = ctx.code.as_str();
        if code == REST || code == ACTIVE_RECOVERY {
            return Vec::new();
        }

        if self.catalog.is_builtin_code(code) {
            return self.catalog.template(ctx.goal, code).to_vec();
        }

        let Some(custom) = self.custom_type(code) else {
            tracing::warn!("Unknown workout code '{}', treating as rest", code);
            return Vec::new();
        };

        custom
            .categories
            .iter()
            .filter_map(|category| {
                let exercise = self.catalog.exercises_in(*category).next()?;
                let dosage = self.catalog.dosage(ctx.goal, *category)?;
                Some(TemplateSlot {
                    exercise_id: exercise.id.clone(),
                    category: *category,
                    sets: dosage.sets,
                    reps: dosage.reps.clone(),
                    rest_seconds: dosage.rest_seconds,
                })
            })
            .collect()
    }

    /// Resolve an ordered, duration-bounded plan
    ///
    /// Substitutions apply only when `subs` is bound to `ctx`. Substitute
    /// ids are trusted here; `substitute` is where they get validated.
    pub fn resolve_plan(&self, ctx: &PlanContext, subs: &Substitutions) -> Vec<WorkoutPlanEntry> {
        let template = self.template_for(ctx);
        if template.is_empty() {
            return Vec::new();
        }

        let apply_subs = subs.is_bound_to(ctx);
        let limit = plan_length(ctx.duration_minutes);

        let plan: Vec<WorkoutPlanEntry> = template
            .into_iter()
            .take(limit)
            .enumerate()
            .map(|(slot, t)| {
                let chosen = apply_subs.then(|| subs.get(slot)).flatten();
                let exercise_id = chosen.unwrap_or(&t.exercise_id).to_string();
                let exercise_name = self
                    .catalog
                    .exercise(&exercise_id)
                    .map(|e| e.name.clone())
                    .unwrap_or_else(|| exercise_id.clone());
                WorkoutPlanEntry {
                    slot,
                    exercise_id,
                    exercise_name,
                    category: t.category,
                    sets: t.sets,
                    reps: t.reps,
                    rest_seconds: t.rest_seconds,
                    substituted: chosen.is_some(),
                }
            })
            .collect();

        tracing::debug!(
            "Resolved '{}' for {} ({} min) into {} exercises",
            ctx.code,
            ctx.goal,
            ctx.duration_minutes,
            plan.len()
        );
        plan
    }

    /// Record a substitution after checking it stays within the slot's category
    pub fn substitute(
        &self,
        subs: &mut Substitutions,
        ctx: &PlanContext,
        slot: usize,
        exercise_id: &str,
    ) -> Result<()> {
        subs.rebind(ctx);

        let base = self.resolve_plan(ctx, &Substitutions::new());
        let entry = base.get(slot).ok_or(Error::SlotOutOfRange {
            slot,
            len: base.len(),
        })?;

        if !self.catalog.category_contains(entry.category, exercise_id) {
            return Err(Error::InvalidSubstitution {
                slot,
                exercise_id: exercise_id.to_string(),
                category: entry.category,
            });
        }

        if exercise_id == entry.exercise_id {
            subs.clear_slot(slot);
        } else {
            subs.by_slot.insert(slot, exercise_id.to_string());
        }
        tracing::info!("Slot {} of '{}' now uses '{}'", slot, ctx.code, exercise_id);
        Ok(())
    }

    /// Other exercises that may replace the default at `slot`
    pub fn alternatives(&self, ctx: &PlanContext, slot: usize) -> Result<Vec<&'a Exercise>> {
        let base = self.resolve_plan(ctx, &Substitutions::new());
        let entry = base.get(slot).ok_or(Error::SlotOutOfRange {
            slot,
            len: base.len(),
        })?;
        Ok(self
            .catalog
            .exercises_in(entry.category)
            .filter(|e| e.id != entry.exercise_id)
            .collect())
    }
}
