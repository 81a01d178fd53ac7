mod models;
mod services;
mod utils;

use anyhow::{anyhow, Result};
use chrono::Utc;

use services::github::{self, GitHubClient};
use services::{grid, levels, streaks, template};
use utils::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file FIRST before anything else
    dotenv::dotenv().ok();

    // Initialize logger with default level if RUST_LOG not set
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    println!("=================================================");
    println!("🔥 streakcard profile card generator");
    println!("=================================================");

    let config = Config::from_env()?;

    println!("📝 Configuration loaded:");
    println!("   - User: {}", config.username);
    println!("   - History start: {}", config.history_start);
    println!("   - Assets dir: {}", config.assets_dir.display());
    println!("   - Grid width: {}px", config.grid_width);
    println!(
        "   - Log level: {}",
        std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string())
    );

    // One reference point for the whole run, so the recency check and the
    // trailing-window filter cannot disagree across a midnight boundary
    let now = Utc::now();
    let today = now.date_naive();

    let client = GitHubClient::new(&config.token);
    let data =
        github::fetch_contributions(&client, &config.username, config.history_start, now).await;

    let streak_stats = streaks::calculate_streaks(&data.history, today);
    log::info!(
        "Current streak: {}, longest streak: {}",
        streak_stats.current_streak,
        streak_stats.longest_streak
    );

    let levels = levels::map_to_levels(&data.recent);
    let grid_svg = grid::render_grid(&levels, config.grid_width);

    let updated = template::update_card_files(
        &config.assets_dir,
        &grid_svg,
        data.total_contributions,
        &streak_stats,
    );

    if updated == 0 {
        return Err(anyhow!("No card templates could be updated"));
    }

    log::info!("✅ Updated {} card file(s)", updated);
    Ok(())
}
