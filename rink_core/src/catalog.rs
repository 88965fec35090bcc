//! Default catalog of exercises, workout templates, stretches and meals.
//!
//! Templates form a two-level table: goal → workout-type code → ordered
//! slots. Lookups that miss the active goal fall back to `maintain`.

use crate::types::*;
use once_cell::sync::Lazy;
use std::collections::HashMap;

pub const REST: &str = "rest";
pub const ACTIVE_RECOVERY: &str = "active_recovery";
pub const UPPER_STRENGTH: &str = "upper_strength";
pub const LEGS_STRENGTH: &str = "legs_strength";
pub const EXPLOSIVE_POWER: &str = "explosive_power";
pub const FULL_BODY: &str = "full_body";
pub const SKILLS_CARDIO: &str = "skills_cardio";
pub const HIGH_INTENSITY: &str = "high_intensity";

/// Default XP for logging a workout; configurable per install
pub const WORKOUT_LOG_XP: u32 = 15;

/// Stretch routine shown on active-recovery days
pub const RECOVERY_ROUTINE_ID: &str = "recovery_flow";

/// Cached default catalog - built once and reused across all operations
static DEFAULT_CATALOG: Lazy<Catalog> = Lazy::new(build_default_catalog_internal);

/// Get a reference to the cached default catalog
pub fn get_default_catalog() -> &'static Catalog {
    &DEFAULT_CATALOG
}

/// Builds the default catalog
///
/// **Note**: For production use, prefer `get_default_catalog()` which returns a
/// cached reference. This function is retained for testing and custom catalogs.
pub fn build_default_catalog() -> Catalog {
    build_default_catalog_internal()
}

const EXERCISES: &[(&str, &str, Category)] = &[
    ("bench_press", "Barbell Bench Press", Category::UpperPush),
    ("db_press", "Dumbbell Bench Press", Category::UpperPush),
    ("push_up", "Push-up", Category::UpperPush),
    ("landmine_press", "Landmine Press", Category::UpperPush),
    ("pull_up", "Pull-up", Category::UpperPull),
    ("bent_over_row", "Bent-over Row", Category::UpperPull),
    ("db_row", "Single-arm Dumbbell Row", Category::UpperPull),
    ("face_pull", "Face Pull", Category::UpperPull),
    ("back_squat", "Back Squat", Category::Legs),
    ("trap_bar_deadlift", "Trap Bar Deadlift", Category::Legs),
    ("split_squat", "Rear-foot Elevated Split Squat", Category::Legs),
    ("lateral_lunge", "Lateral Lunge", Category::Legs),
    ("plank", "Front Plank", Category::Core),
    ("pallof_press", "Pallof Press", Category::Core),
    ("dead_bug", "Dead Bug", Category::Core),
    ("hanging_knee_raise", "Hanging Knee Raise", Category::Core),
    ("box_jump", "Box Jump", Category::Plyometric),
    ("lateral_bound", "Lateral Bound", Category::Plyometric),
    ("broad_jump", "Broad Jump", Category::Plyometric),
    ("med_ball_throw", "Rotational Med Ball Throw", Category::Plyometric),
    ("bike_intervals", "Assault Bike Intervals", Category::Conditioning),
    ("sled_push", "Sled Push", Category::Conditioning),
    ("shuttle_run", "Shuttle Run", Category::Conditioning),
    ("jump_rope", "Jump Rope", Category::Conditioning),
    ("stickhandling", "Stickhandling Drills", Category::Skills),
    ("slide_board", "Slide Board Strides", Category::Skills),
    ("agility_ladder", "Agility Ladder", Category::Skills),
    ("reaction_drill", "Reaction Ball Drill", Category::Skills),
    ("hip_90_90", "90/90 Hip Switch", Category::Mobility),
    ("worlds_greatest", "World's Greatest Stretch", Category::Mobility),
    ("adductor_rockback", "Adductor Rock-back", Category::Mobility),
    ("thoracic_rotation", "Thoracic Rotation", Category::Mobility),
];

/// Fixed exercise sequence for each built-in training code
const SEQUENCES: &[(&str, &[(Category, &str)])] = &[
    (
        UPPER_STRENGTH,
        &[
            (Category::UpperPush, "bench_press"),
            (Category::UpperPull, "pull_up"),
            (Category::UpperPush, "db_press"),
            (Category::UpperPull, "bent_over_row"),
            (Category::Core, "pallof_press"),
            (Category::Core, "plank"),
        ],
    ),
    (
        LEGS_STRENGTH,
        &[
            (Category::Legs, "back_squat"),
            (Category::Legs, "trap_bar_deadlift"),
            (Category::Legs, "split_squat"),
            (Category::Legs, "lateral_lunge"),
            (Category::Core, "dead_bug"),
            (Category::Plyometric, "box_jump"),
        ],
    ),
    (
        EXPLOSIVE_POWER,
        &[
            (Category::Plyometric, "box_jump"),
            (Category::Plyometric, "lateral_bound"),
            (Category::Plyometric, "broad_jump"),
            (Category::Legs, "trap_bar_deadlift"),
            (Category::Plyometric, "med_ball_throw"),
            (Category::Core, "pallof_press"),
        ],
    ),
    (
        FULL_BODY,
        &[
            (Category::Legs, "back_squat"),
            (Category::UpperPush, "bench_press"),
            (Category::UpperPull, "bent_over_row"),
            (Category::Legs, "lateral_lunge"),
            (Category::Plyometric, "med_ball_throw"),
            (Category::Core, "plank"),
        ],
    ),
    (
        SKILLS_CARDIO,
        &[
            (Category::Skills, "stickhandling"),
            (Category::Skills, "agility_ladder"),
            (Category::Conditioning, "shuttle_run"),
            (Category::Skills, "slide_board"),
            (Category::Conditioning, "bike_intervals"),
            (Category::Skills, "reaction_drill"),
        ],
    ),
    (
        HIGH_INTENSITY,
        &[
            (Category::Conditioning, "bike_intervals"),
            (Category::Plyometric, "lateral_bound"),
            (Category::Conditioning, "sled_push"),
            (Category::Conditioning, "shuttle_run"),
            (Category::Plyometric, "box_jump"),
            (Category::Core, "hanging_knee_raise"),
        ],
    ),
];

/// Which built-in codes each goal carries its own template for.
/// `maintain` covers all of them and acts as the fallback.
fn goal_codes(goal: Goal) -> &'static [&'static str] {
    match goal {
        Goal::BuildMuscle => &[UPPER_STRENGTH, LEGS_STRENGTH, FULL_BODY],
        Goal::FatLoss => &[FULL_BODY, SKILLS_CARDIO, LEGS_STRENGTH, UPPER_STRENGTH],
        Goal::Maintain => &[
            UPPER_STRENGTH,
            LEGS_STRENGTH,
            EXPLOSIVE_POWER,
            FULL_BODY,
            SKILLS_CARDIO,
            HIGH_INTENSITY,
        ],
    }
}

fn dosage_table(goal: Goal) -> HashMap<Category, Dosage> {
    let rows: [(Category, u8, &str, u32); 8] = match goal {
        Goal::BuildMuscle => [
            (Category::UpperPush, 4, "8-10", 90),
            (Category::UpperPull, 4, "8-10", 90),
            (Category::Legs, 4, "6-8", 120),
            (Category::Core, 3, "12-15", 60),
            (Category::Plyometric, 3, "5", 90),
            (Category::Conditioning, 3, "30s", 60),
            (Category::Skills, 3, "45s", 45),
            (Category::Mobility, 2, "30s", 30),
        ],
        Goal::FatLoss => [
            (Category::UpperPush, 3, "12-15", 45),
            (Category::UpperPull, 3, "12-15", 45),
            (Category::Legs, 3, "12-15", 60),
            (Category::Core, 3, "15-20", 30),
            (Category::Plyometric, 3, "8", 45),
            (Category::Conditioning, 4, "40s", 30),
            (Category::Skills, 4, "60s", 30),
            (Category::Mobility, 2, "30s", 20),
        ],
        Goal::Maintain => [
            (Category::UpperPush, 3, "8-12", 60),
            (Category::UpperPull, 3, "8-12", 60),
            (Category::Legs, 3, "8-10", 90),
            (Category::Core, 3, "12", 45),
            (Category::Plyometric, 3, "6", 60),
            (Category::Conditioning, 3, "30s", 45),
            (Category::Skills, 3, "45s", 45),
            (Category::Mobility, 2, "30s", 30),
        ],
    };

    rows.into_iter()
        .map(|(category, sets, reps, rest_seconds)| {
            (
                category,
                Dosage {
                    sets,
                    reps: reps.into(),
                    rest_seconds,
                },
            )
        })
        .collect()
}

fn workout_type(code: &str, label: &str, focus: &str) -> (String, WorkoutTypeInfo) {
    (
        code.to_string(),
        WorkoutTypeInfo {
            code: code.into(),
            label: label.into(),
            focus: focus.into(),
            xp_reward: if code == REST { 0 } else { WORKOUT_LOG_XP },
        },
    )
}

fn meal(id: &str, meal_type: MealType, name: &str, macros: [f64; 4]) -> Meal {
    let [calories, protein_g, carbs_g, fats_g] = macros;
    Meal {
        id: id.into(),
        meal_type,
        nutrition: NutritionFacts {
            name: name.into(),
            calories,
            protein_g,
            carbs_g,
            fats_g,
        },
    }
}

/// Internal function that actually builds the catalog
fn build_default_catalog_internal() -> Catalog {
    let exercises: Vec<Exercise> = EXERCISES
        .iter()
        .map(|(id, name, category)| Exercise {
            id: (*id).into(),
            name: (*name).into(),
            category: *category,
        })
        .collect();

    let workout_types: HashMap<String, WorkoutTypeInfo> = [
        workout_type(
            UPPER_STRENGTH,
            "Upper Body Strength",
            "Pressing and pulling strength",
        ),
        workout_type(
            LEGS_STRENGTH,
            "Leg Strength",
            "Squat, hinge and single-leg strength",
        ),
        workout_type(
            EXPLOSIVE_POWER,
            "Explosive Power",
            "First-step speed and jumps",
        ),
        workout_type(FULL_BODY, "Full Body", "Balanced total-body session"),
        workout_type(
            SKILLS_CARDIO,
            "Skills & Cardio",
            "Puck skills and aerobic base",
        ),
        workout_type(
            HIGH_INTENSITY,
            "High Intensity",
            "Shift-length anaerobic intervals",
        ),
        workout_type(
            ACTIVE_RECOVERY,
            "Active Recovery",
            "Mobility and light movement",
        ),
        workout_type(REST, "Rest Day", "Full recovery"),
    ]
    .into_iter()
    .collect();

    let mut dosages = HashMap::new();
    let mut templates = HashMap::new();

    for goal in Goal::ALL.iter().copied() {
        let dosage = dosage_table(goal);
        let mut by_code = HashMap::new();

        for code in goal_codes(goal) {
            let Some((_, sequence)) = SEQUENCES.iter().find(|(c, _)| c == code) else {
                continue;
            };
            let slots = sequence
                .iter()
                .filter_map(|(category, exercise_id)| {
                    dosage.get(category).map(|d| TemplateSlot {
                        exercise_id: (*exercise_id).into(),
                        category: *category,
                        sets: d.sets,
                        reps: d.reps.clone(),
                        rest_seconds: d.rest_seconds,
                    })
                })
                .collect::<Vec<_>>();
            by_code.insert((*code).to_string(), slots);
        }

        templates.insert(goal, by_code);
        dosages.insert(goal, dosage);
    }

    let stretch_routines = vec![
        StretchRoutine {
            id: "pre_skate".into(),
            name: "Pre-skate Dynamic Warm-up".into(),
            stretches: vec![
                "Leg swings (front/back)".into(),
                "Lateral leg swings".into(),
                "Walking knee hugs".into(),
                "Arm circles".into(),
            ],
        },
        StretchRoutine {
            id: RECOVERY_ROUTINE_ID.into(),
            name: "Recovery Flow".into(),
            stretches: vec![
                "90/90 hip switch".into(),
                "Adductor rock-back".into(),
                "Couch stretch".into(),
                "Thoracic rotation".into(),
                "Child's pose".into(),
            ],
        },
        StretchRoutine {
            id: "post_game".into(),
            name: "Post-game Cool-down".into(),
            stretches: vec![
                "Hamstring stretch".into(),
                "Hip flexor lunge stretch".into(),
                "Groin butterfly".into(),
                "Lat stretch".into(),
            ],
        },
    ];

    let meals = vec![
        meal(
            "oatmeal_berries",
            MealType::Breakfast,
            "Oatmeal with Berries & Whey",
            [450.0, 35.0, 60.0, 8.0],
        ),
        meal(
            "egg_scramble",
            MealType::Breakfast,
            "Egg & Veggie Scramble with Toast",
            [520.0, 32.0, 40.0, 24.0],
        ),
        meal(
            "chicken_rice_bowl",
            MealType::Lunch,
            "Chicken Rice Bowl",
            [650.0, 50.0, 75.0, 14.0],
        ),
        meal(
            "turkey_wrap",
            MealType::Lunch,
            "Turkey & Avocado Wrap",
            [540.0, 38.0, 55.0, 16.0],
        ),
        meal(
            "salmon_quinoa",
            MealType::Dinner,
            "Salmon with Quinoa",
            [700.0, 45.0, 60.0, 28.0],
        ),
        meal(
            "beef_pasta",
            MealType::Dinner,
            "Lean Beef Pasta",
            [780.0, 48.0, 90.0, 22.0],
        ),
        meal(
            "greek_yogurt",
            MealType::Snack,
            "Greek Yogurt Parfait",
            [220.0, 20.0, 25.0, 4.0],
        ),
        meal(
            "pb_banana",
            MealType::Snack,
            "Peanut Butter Banana",
            [320.0, 9.0, 38.0, 16.0],
        ),
    ];

    Catalog {
        exercises,
        workout_types,
        templates,
        dosages,
        stretch_routines,
        meals,
    }
}

impl Catalog {
    /// Look up an exercise by id
    pub fn exercise(&self, id: &str) -> Option<&Exercise> {
        self.exercises.iter().find(|e| e.id == id)
    }

    /// All exercises in a category, in catalog order
    pub fn exercises_in(&self, category: Category) -> impl Iterator<Item = &Exercise> {
        self.exercises.iter().filter(move |e| e.category == category)
    }

    /// Whether `exercise_id` belongs to `category`
    pub fn category_contains(&self, category: Category, exercise_id: &str) -> bool {
        self.exercises_in(category).any(|e| e.id == exercise_id)
    }

    /// Whether `code` is a built-in workout type (including rest/recovery)
    pub fn is_builtin_code(&self, code: &str) -> bool {
        self.workout_types.contains_key(code)
    }

    /// Template slots for (goal, code), falling back to the maintain template.
    /// Returns an empty slice when neither has one.
    pub fn template(&self, goal: Goal, code: &str) -> &[TemplateSlot] {
        self.templates
            .get(&goal)
            .and_then(|by_code| by_code.get(code))
            .or_else(|| {
                self.templates
                    .get(&Goal::Maintain)
                    .and_then(|by_code| by_code.get(code))
            })
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Sets/reps/rest for a category under a goal, falling back to maintain
    pub fn dosage(&self, goal: Goal, category: Category) -> Option<&Dosage> {
        self.dosages
            .get(&goal)
            .and_then(|d| d.get(&category))
            .or_else(|| {
                self.dosages
                    .get(&Goal::Maintain)
                    .and_then(|d| d.get(&category))
            })
    }

    pub fn stretch_routine(&self, id: &str) -> Option<&StretchRoutine> {
        self.stretch_routines.iter().find(|r| r.id == id)
    }

    pub fn meal(&self, id: &str) -> Option<&Meal> {
        self.meals.iter().find(|m| m.id == id)
    }

    /// Validate the catalog for consistency and completeness
    ///
    /// Returns a list of validation errors, or empty Vec if valid.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        for (i, exercise) in self.exercises.iter().enumerate() {
            if exercise.id.is_empty() {
                errors.push("Exercise has empty ID".to_string());
            }
            if exercise.name.is_empty() {
                errors.push(format!("Exercise '{}' has empty name", exercise.id));
            }
            if self.exercises[..i]
                .iter()
                .any(|e| e.id == exercise.id && e.category == exercise.category)
            {
                errors.push(format!(
                    "Exercise '{}' is defined twice in {}",
                    exercise.id, exercise.category
                ));
            }
        }

        for category in Category::ALL {
            if self.exercises_in(*category).next().is_none() {
                errors.push(format!("Category {} has no exercises", category));
            }
        }

        if !self.templates.contains_key(&Goal::Maintain) {
            errors.push("Catalog has no maintain templates".to_string());
        }

        for (goal, by_code) in &self.templates {
            for (code, slots) in by_code {
                if !self.workout_types.contains_key(code) {
                    errors.push(format!(
                        "Template '{}' for {} has no workout type entry",
                        code, goal
                    ));
                }
                for slot in slots {
                    if !self.category_contains(slot.category, &slot.exercise_id) {
                        errors.push(format!(
                            "Template '{}' for {} references '{}' outside {}",
                            code, goal, slot.exercise_id, slot.category
                        ));
                    }
                    if slot.sets == 0 {
                        errors.push(format!(
                            "Template '{}' for {} has a zero-set slot",
                            code, goal
                        ));
                    }
                }
            }
        }

        for code in self.workout_types.keys() {
            if code == REST || code == ACTIVE_RECOVERY {
                continue;
            }
            if self.template(Goal::Maintain, code).is_empty() {
                errors.push(format!("Workout type '{}' has no maintain template", code));
            }
        }

        if self.stretch_routine(RECOVERY_ROUTINE_ID).is_none() {
            errors.push("Catalog has no recovery stretch routine".to_string());
        }

        for meal in &self.meals {
            let n = &meal.nutrition;
            if n.calories < 0.0 || n.protein_g < 0.0 || n.carbs_g < 0.0 || n.fats_g < 0.0 {
                errors.push(format!("Meal '{}' has negative nutrition figures", meal.id));
            }
        }

        errors
    }
}
