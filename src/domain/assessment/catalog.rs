//! Quick-pick list offered on the conditions step.

/// Conditions offered as one-tap choices. Free-text entries are also accepted.
pub const COMMON_CONDITIONS: [&str; 6] = [
    "Diabetes",
    "Hypertension",
    "Thyroid disorders",
    "Asthma",
    "Heart disease",
    "Autoimmune conditions",
];

/// Resolves a 1-based catalogue number to its condition name.
pub fn common_condition(number: usize) -> Option<&'static str> {
    number
        .checked_sub(1)
        .and_then(|idx| COMMON_CONDITIONS.get(idx))
        .copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_are_one_based() {
        assert_eq!(common_condition(1), Some("Diabetes"));
        assert_eq!(common_condition(6), Some("Autoimmune conditions"));
        assert_eq!(common_condition(0), None);
        assert_eq!(common_condition(7), None);
    }
}
