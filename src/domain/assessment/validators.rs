//! Pure predicates over individual answers.
//!
//! None of these functions touch state; the guard and the record both build
//! on them.

/// Youngest accepted age, in years.
pub const MIN_AGE: i32 = 12;
/// Oldest accepted age, in years.
pub const MAX_AGE: i32 = 100;
/// First selectable pregnancy week.
pub const MIN_WEEK: i32 = 1;
/// Last selectable pregnancy week.
pub const MAX_WEEK: i32 = 42;

/// True iff `age` lies in `[12, 100]`.
pub fn is_valid_age(age: i32) -> bool {
    (MIN_AGE..=MAX_AGE).contains(&age)
}

/// True iff `week` lies in `[1, 42]`.
pub fn is_valid_week(week: i32) -> bool {
    (MIN_WEEK..=MAX_WEEK).contains(&week)
}

/// Trims a free-text condition, returning `None` when nothing is left.
pub fn normalize_condition(raw: &str) -> Option<String> {
    normalize_entry(raw)
}

/// Trims a free-text medication name, returning `None` when nothing is left.
pub fn normalize_medication(raw: &str) -> Option<String> {
    normalize_entry(raw)
}

fn normalize_entry(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
