//! Error types for the rink_core library.

use crate::Category;
use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for rink_core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Catalog validation error
    #[error("Catalog validation error: {0}")]
    CatalogValidation(String),

    /// A code that doesn't name any known variant
    #[error("Unknown {kind}: '{value}'")]
    UnknownValue { kind: &'static str, value: String },

    /// `promote()` called before the tier's XP bar is full
    #[error("Cannot promote yet: {xp}/100 XP")]
    PromotionNotReady { xp: u32 },

    /// Substitute exercise isn't part of the slot's category
    #[error("Exercise '{exercise_id}' is not a {category} exercise (slot {slot})")]
    InvalidSubstitution {
        slot: usize,
        exercise_id: String,
        category: Category,
    },

    /// Slot index past the end of the resolved plan
    #[error("Slot {slot} is out of range for a plan of {len} exercises")]
    SlotOutOfRange { slot: usize, len: usize },

    /// Profile field failed validation
    #[error("Invalid profile: {0}")]
    InvalidProfile(String),

    /// Custom workout type failed validation
    #[error("Invalid workout type: {0}")]
    InvalidWorkoutType(String),

    /// A workout is already logged for this date
    #[error("A workout is already logged for {0}")]
    DuplicateWorkoutLog(chrono::NaiveDate),

    /// Workout-type code already taken
    #[error("Workout type '{0}' already exists")]
    DuplicateWorkoutType(String),

    /// Requested record doesn't exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// State management error
    #[error("State error: {0}")]
    State(String),
}
