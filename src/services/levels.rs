use chrono::NaiveDate;
use std::collections::{BTreeMap, HashMap};

/// CSS class ids for each contribution level, lowest to highest intensity.
/// The gradient defs behind them live in the card templates.
pub const LEVEL_CLASSES: [&str; 6] = [
    "no_contribution",
    "contribution_1_10",
    "contribution_11_20",
    "contribution_21_30",
    "contribution_31_49",
    "contribution_50",
];

/// Fill used when a level has no entry in the class table
pub const FALLBACK_FILL: &str = "#363a4f";

/// Map a raw daily count to its heatmap intensity level
pub fn level_for_count(count: i32) -> u8 {
    match count {
        c if c <= 0 => 0,
        1..=10 => 1,
        11..=20 => 2,
        21..=30 => 3,
        31..=49 => 4,
        _ => 5,
    }
}

/// Class id for a level, falling back for out-of-range values
pub fn class_for_level(level: u8) -> &'static str {
    LEVEL_CLASSES
        .get(level as usize)
        .copied()
        .unwrap_or(FALLBACK_FILL)
}

/// Map daily counts to display levels, ordered chronologically for the
/// grid renderer
pub fn map_to_levels(contributions: &HashMap<NaiveDate, i32>) -> BTreeMap<NaiveDate, u8> {
    contributions
        .iter()
        .map(|(date, count)| (*date, level_for_count(*count)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_zero_count_is_level_zero() {
        assert_eq!(level_for_count(0), 0);
    }

    #[test]
    fn test_level_breakpoints() {
        assert_eq!(level_for_count(1), 1);
        assert_eq!(level_for_count(10), 1);
        assert_eq!(level_for_count(11), 2);
        assert_eq!(level_for_count(20), 2);
        assert_eq!(level_for_count(21), 3);
        assert_eq!(level_for_count(30), 3);
        assert_eq!(level_for_count(31), 4);
        assert_eq!(level_for_count(49), 4);
        assert_eq!(level_for_count(50), 5);
        assert_eq!(level_for_count(500), 5);
    }

    #[test]
    fn test_levels_are_monotonic() {
        for count in 0..200 {
            assert!(level_for_count(count) <= level_for_count(count + 1));
        }
    }

    #[test]
    fn test_map_to_levels_orders_chronologically() {
        let mut history = HashMap::new();
        history.insert(date("2024-01-03"), 12);
        history.insert(date("2024-01-01"), 3);
        history.insert(date("2024-01-02"), 0);

        let levels = map_to_levels(&history);
        let entries: Vec<_> = levels.iter().map(|(d, l)| (*d, *l)).collect();
        assert_eq!(
            entries,
            vec![
                (date("2024-01-01"), 1),
                (date("2024-01-02"), 0),
                (date("2024-01-03"), 2),
            ]
        );
    }

    #[test]
    fn test_class_for_level() {
        assert_eq!(class_for_level(0), "no_contribution");
        assert_eq!(class_for_level(5), "contribution_50");
        assert_eq!(class_for_level(9), FALLBACK_FILL);
    }
}
