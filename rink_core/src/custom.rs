//! User-defined workout types.

use crate::{Catalog, Category, CustomWorkoutType, Error, Result};
use uuid::Uuid;

/// Normalize a user-entered workout code to snake_case
///
/// `Pond Hockey`, `pond-hockey` and `POND_HOCKEY` all become `pond_hockey`.
pub fn normalize_workout_code(raw: &str) -> String {
    raw.trim().to_lowercase().replace(['-', ' '], "_")
}

/// Create a custom workout type and add it to `custom`
///
/// Codes are normalized to snake_case and must not collide with a built-in
/// or existing custom code.
pub fn add_custom_workout<'a>(
    custom: &'a mut Vec<CustomWorkoutType>,
    catalog: &Catalog,
    code: &str,
    name: &str,
    categories: Vec<Category>,
) -> Result<&'a CustomWorkoutType> {
    let code = normalize_workout_code(code);
    if code.is_empty() {
        return Err(Error::InvalidWorkoutType("workout code must not be empty".into()));
    }
    if name.trim().is_empty() {
        return Err(Error::InvalidWorkoutType("workout name must not be empty".into()));
    }
    if categories.is_empty() {
        return Err(Error::InvalidWorkoutType(format!(
            "workout '{}' needs at least one category",
            code
        )));
    }
    if catalog.is_builtin_code(&code) || custom.iter().any(|c| c.code == code) {
        return Err(Error::DuplicateWorkoutType(code));
    }

    custom.push(CustomWorkoutType {
        id: Uuid::new_v4(),
        code,
        name: name.trim().to_string(),
        categories,
    });
    let created = &custom[custom.len() - 1];
    tracing::info!("Added custom workout '{}' ({})", created.code, created.id);
    Ok(created)
}

/// Remove a custom workout type by code
///
/// Schedules that still name the code read it back as rest.
pub fn remove_custom_workout(
    custom: &mut Vec<CustomWorkoutType>,
    code: &str,
) -> Result<CustomWorkoutType> {
    let code = normalize_workout_code(code);
    let idx = custom
        .iter()
        .position(|c| c.code == code)
        .ok_or_else(|| Error::NotFound(format!("custom workout '{}'", code)))?;
    let removed = custom.remove(idx);
    tracing::info!("Removed custom workout '{}'", removed.code);
    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build_default_catalog;
    use crate::catalog::FULL_BODY;

    #[test]
    fn test_normalize_workout_code() {
        assert_eq!(normalize_workout_code(" Pond Hockey "), "pond_hockey");
        assert_eq!(normalize_workout_code("active-recovery"), "active_recovery");
        assert_eq!(normalize_workout_code("FULL_BODY"), "full_body");
    }

    #[test]
    fn test_add_normalizes_code() {
        let catalog = build_default_catalog();
        let mut custom = Vec::new();
        let created = add_custom_workout(
            &mut custom,
            &catalog,
            "Pond-Hockey Prep",
            "Pond Hockey Prep",
            vec![Category::Skills],
        )
        .unwrap();
        assert_eq!(created.code, "pond_hockey_prep");
        assert_eq!(custom.len(), 1);
    }

    #[test]
    fn test_add_rejects_builtin_and_duplicate_codes() {
        let catalog = build_default_catalog();
        let mut custom = Vec::new();

        let core = || vec![Category::Core];
        let err = add_custom_workout(&mut custom, &catalog, FULL_BODY, "Mine", core()).unwrap_err();
        assert!(matches!(err, Error::DuplicateWorkoutType(_)));

        add_custom_workout(&mut custom, &catalog, "core_day", "Core", core()).unwrap();
        let err =
            add_custom_workout(&mut custom, &catalog, "core-day", "Core 2", core()).unwrap_err();
        assert!(matches!(err, Error::DuplicateWorkoutType(code) if code == "core_day"));
    }

    #[test]
    fn test_add_requires_categories() {
        let catalog = build_default_catalog();
        let mut custom = Vec::new();
        let err = add_custom_workout(&mut custom, &catalog, "empty", "Empty", vec![]).unwrap_err();
        assert!(matches!(err, Error::InvalidWorkoutType(_)));
    }

    #[test]
    fn test_remove() {
        let catalog = build_default_catalog();
        let mut custom = Vec::new();
        add_custom_workout(&mut custom, &catalog, "core_day", "Core", vec![Category::Core])
            .unwrap();

        // Removal accepts the same spellings as creation
        assert_eq!(remove_custom_workout(&mut custom, "Core-Day").unwrap().name, "Core");
        assert!(matches!(
            remove_custom_workout(&mut custom, "core_day"),
            Err(Error::NotFound(_))
        ));
    }
}
