use chrono::{Duration, NaiveDate};
use std::collections::HashMap;

use crate::models::contribution::StreakResult;

/// Calculate current and longest contribution streaks.
///
/// An active day (count > 0) extends a streak only when it falls exactly one
/// calendar day after the previous active day; otherwise a new run starts at
/// 1. A day recorded with count 0 breaks the run. The current streak only
/// counts if the most recent active day is `today` or the day before;
/// `today` is passed in so the whole run shares one reference value.
pub fn calculate_streaks(
    contributions: &HashMap<NaiveDate, i32>,
    today: NaiveDate,
) -> StreakResult {
    if contributions.is_empty() {
        return StreakResult::default();
    }

    let mut dates: Vec<NaiveDate> = contributions.keys().copied().collect();
    dates.sort();

    let mut run = 0;
    let mut run_start: Option<NaiveDate> = None;
    let mut last_active: Option<NaiveDate> = None;

    let mut longest_streak = 0;
    let mut longest_streak_start = None;
    let mut longest_streak_end = None;

    for date in dates {
        if contributions[&date] > 0 {
            let adjacent = last_active == Some(date - Duration::days(1));
            if run == 0 || !adjacent {
                run = 1;
                run_start = Some(date);
            } else {
                run += 1;
            }
            last_active = Some(date);

            if run > longest_streak {
                longest_streak = run;
                longest_streak_start = run_start;
                longest_streak_end = Some(date);
            }
        } else {
            run = 0;
            run_start = None;
        }
    }

    // The trailing run is only current if it reaches today or yesterday.
    // Walk back from the last active day so a zero-count entry for today
    // does not hide a streak that ended yesterday.
    let mut current_streak = 0;
    if let Some(last) = last_active {
        if last == today || last == today - Duration::days(1) {
            current_streak = 1;
            let mut check_date = last - Duration::days(1);
            while contributions
                .get(&check_date)
                .map_or(false, |count| *count > 0)
            {
                current_streak += 1;
                check_date = check_date - Duration::days(1);
            }
        }
    }

    StreakResult {
        current_streak,
        longest_streak,
        longest_streak_start,
        longest_streak_end,
    }
}
