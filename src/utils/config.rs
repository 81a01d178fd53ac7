use anyhow::{anyhow, Context, Result};
use chrono::NaiveDate;
use std::env;
use std::path::PathBuf;

use crate::utils::validators::validate_username;

/// Earliest date the contribution walk starts from when none is configured
pub const DEFAULT_HISTORY_START: &str = "2018-07-25";

#[derive(Clone, Debug)]
pub struct Config {
    pub username: String,
    pub token: String,
    pub history_start: NaiveDate,
    pub assets_dir: PathBuf,
    pub grid_width: u32,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();

        // The token is required: fail before any network call is attempted
        let token = env::var("GITHUB_TOKEN")
            .map_err(|_| anyhow!("GITHUB_TOKEN environment variable is required but not set"))?;

        let username =
            env::var("GITHUB_USERNAME").unwrap_or_else(|_| "default_username".to_string());
        validate_username(&username)
            .with_context(|| format!("Invalid GITHUB_USERNAME '{}'", username))?;

        let history_start =
            env::var("HISTORY_START").unwrap_or_else(|_| DEFAULT_HISTORY_START.to_string());
        let history_start = NaiveDate::parse_from_str(&history_start, "%Y-%m-%d")
            .with_context(|| format!("HISTORY_START must be YYYY-MM-DD, got '{}'", history_start))?;

        let grid_width = env::var("GRID_WIDTH").unwrap_or_else(|_| "794".to_string());
        let grid_width: u32 = grid_width
            .parse()
            .with_context(|| format!("GRID_WIDTH must be a number, got '{}'", grid_width))?;
        if grid_width == 0 {
            return Err(anyhow!("GRID_WIDTH must be positive"));
        }

        Ok(Config {
            username,
            token,
            history_start,
            assets_dir: PathBuf::from(
                env::var("ASSETS_DIR").unwrap_or_else(|_| "assets".to_string()),
            ),
            grid_width,
        })
    }
}
