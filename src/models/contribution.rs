use chrono::NaiveDate;
use std::collections::HashMap;

/// A single day's contribution count as reported by the platform
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ContributionDay {
    pub date: NaiveDate,
    pub count: i32,
}

/// Aggregated contribution history for a user.
///
/// `history` spans the account's full lifetime and feeds the streak
/// calculation; `recent` is the trailing 52 weeks used for the heatmap grid.
#[derive(Clone, Debug)]
pub struct ContributionData {
    pub history: HashMap<NaiveDate, i32>,
    pub recent: HashMap<NaiveDate, i32>,
    pub total_contributions: i32,
}

/// Current and longest streaks, with the calendar range of the longest
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StreakResult {
    pub current_streak: i32,
    pub longest_streak: i32,
    pub longest_streak_start: Option<NaiveDate>,
    pub longest_streak_end: Option<NaiveDate>,
}
