use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::fs;
use std::path::{Path, PathBuf};

use crate::models::contribution::StreakResult;

/// Literal marker in card templates replaced by the rendered grid
pub const GRID_MARKER: &str = "<!-- Contribution Grid -->";

/// Placeholder tokens substituted with formatted statistics
pub const TOTAL_PLACEHOLDER: &str = "total-contributions-ph";
pub const CURRENT_STREAK_PLACEHOLDER: &str = "current-streak-ph";
pub const LONGEST_STREAK_PLACEHOLDER: &str = "longest-streak-ph";

/// Card template/output pairs processed on every run. Originals are never
/// modified; updated copies are written as `-latest` siblings.
const CARD_FILE_PAIRS: [(&str, &str); 2] = [
    ("profile-card.svg", "profile-card-latest.svg"),
    ("profile-card-no-bg.svg", "profile-card-no-bg-latest.svg"),
];

/// Substitute the grid markup and formatted statistics into a card template
pub fn fill_template(
    template: &str,
    grid_svg: &str,
    total_contributions: i32,
    streaks: &StreakResult,
) -> String {
    let longest_streak_text = format!(
        "{} ➝ {} : {}🏆",
        format_streak_date(streaks.longest_streak_start),
        format_streak_date(streaks.longest_streak_end),
        streaks.longest_streak,
    );

    template
        .replace(GRID_MARKER, grid_svg)
        .replace(
            TOTAL_PLACEHOLDER,
            &format!("{}🌟", format_thousands(total_contributions)),
        )
        .replace(
            CURRENT_STREAK_PLACEHOLDER,
            &format!("{}🔥", streaks.current_streak),
        )
        .replace(LONGEST_STREAK_PLACEHOLDER, &longest_streak_text)
}

/// Format a streak bound as YYYY/MM/DD, or N/A when the streak never happened
fn format_streak_date(date: Option<NaiveDate>) -> String {
    match date {
        Some(d) => d.format("%Y/%m/%d").to_string(),
        None => "N/A".to_string(),
    }
}

/// Insert thousands separators: 1234567 -> "1,234,567"
fn format_thousands(value: i32) -> String {
    let digits = value.to_string();
    let mut formatted = String::new();

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            formatted.push(',');
        }
        formatted.push(c);
    }

    formatted
}

/// Read each card template, substitute the grid and stats, and write the
/// `-latest` sibling. A failing pair is logged and skipped so the rest of
/// the batch still runs. Returns the number of pairs written.
pub fn update_card_files(
    assets_dir: &Path,
    grid_svg: &str,
    total_contributions: i32,
    streaks: &StreakResult,
) -> usize {
    let mut updated = 0;

    for (file_name, updated_file_name) in CARD_FILE_PAIRS {
        log::info!("Processing card template: {}", file_name);

        match update_card_file(
            assets_dir,
            file_name,
            updated_file_name,
            grid_svg,
            total_contributions,
            streaks,
        ) {
            Ok(path) => {
                log::info!("Updated card saved: {}", path.display());
                updated += 1;
            }
            Err(e) => log::error!("Error processing card {}: {:#}", file_name, e),
        }
    }

    updated
}

fn update_card_file(
    assets_dir: &Path,
    file_name: &str,
    updated_file_name: &str,
    grid_svg: &str,
    total_contributions: i32,
    streaks: &StreakResult,
) -> Result<PathBuf> {
    let template_path = assets_dir.join(file_name);
    let original = fs::read_to_string(&template_path)
        .with_context(|| format!("Failed to read template {}", template_path.display()))?;

    let updated = fill_template(&original, grid_svg, total_contributions, streaks);

    let output_path = assets_dir.join(updated_file_name);
    fs::write(&output_path, updated)
        .with_context(|| format!("Failed to write {}", output_path.display()))?;

    Ok(output_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn sample_streaks() -> StreakResult {
        StreakResult {
            current_streak: 12,
            longest_streak: 48,
            longest_streak_start: Some(date("2023-11-02")),
            longest_streak_end: Some(date("2023-12-19")),
        }
    }

    #[test]
    fn test_format_thousands() {
        assert_eq!(format_thousands(0), "0");
        assert_eq!(format_thousands(999), "999");
        assert_eq!(format_thousands(1000), "1,000");
        assert_eq!(format_thousands(12345), "12,345");
        assert_eq!(format_thousands(1234567), "1,234,567");
    }

    #[test]
    fn test_format_streak_date() {
        assert_eq!(format_streak_date(Some(date("2023-11-02"))), "2023/11/02");
        assert_eq!(format_streak_date(None), "N/A");
    }

    #[test]
    fn test_fill_template_round_trip() {
        let template = format!(
            "<svg>{}<text>{}</text><text>{}</text><text>{}</text></svg>",
            GRID_MARKER, TOTAL_PLACEHOLDER, CURRENT_STREAK_PLACEHOLDER, LONGEST_STREAK_PLACEHOLDER
        );

        let filled = fill_template(&template, "<g>grid</g>", 12345, &sample_streaks());

        assert!(!filled.contains(GRID_MARKER));
        assert!(!filled.contains(TOTAL_PLACEHOLDER));
        assert!(!filled.contains(CURRENT_STREAK_PLACEHOLDER));
        assert!(!filled.contains(LONGEST_STREAK_PLACEHOLDER));

        assert!(filled.contains("<g>grid</g>"));
        assert!(filled.contains("12,345🌟"));
        assert!(filled.contains("12🔥"));
        assert!(filled.contains("2023/11/02 ➝ 2023/12/19 : 48🏆"));
    }

    #[test]
    fn test_fill_template_without_streak_dates() {
        let template = LONGEST_STREAK_PLACEHOLDER.to_string();
        let filled = fill_template(&template, "", 0, &StreakResult::default());
        assert_eq!(filled, "N/A ➝ N/A : 0🏆");
    }

    #[test]
    fn test_one_missing_template_does_not_abort_batch() {
        let assets_dir =
            std::env::temp_dir().join(format!("streakcard-template-test-{}", std::process::id()));
        fs::create_dir_all(&assets_dir).unwrap();

        // Only the first pair's template exists
        let template_path = assets_dir.join("profile-card.svg");
        fs::write(
            &template_path,
            format!("<svg>{} {}</svg>", GRID_MARKER, TOTAL_PLACEHOLDER),
        )
        .unwrap();

        let updated = update_card_files(&assets_dir, "<g/>", 7, &sample_streaks());
        assert_eq!(updated, 1);

        let output = fs::read_to_string(assets_dir.join("profile-card-latest.svg")).unwrap();
        assert!(output.contains("<g/>"));
        assert!(output.contains("7🌟"));

        // The template itself is left untouched
        let original = fs::read_to_string(&template_path).unwrap();
        assert!(original.contains(GRID_MARKER));

        fs::remove_dir_all(&assets_dir).ok();
    }
}
