use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use serde::Deserialize;
use serde_json::json;
use std::collections::HashMap;

use crate::models::contribution::{ContributionData, ContributionDay};
use crate::utils::http_client::create_http_client;

const GITHUB_GRAPHQL_URL: &str = "https://api.github.com/graphql";

// GitHub caps a contributionsCollection query at one year of history
const WINDOW_DAYS: i64 = 365;

const CONTRIBUTIONS_QUERY: &str = r#"
    query($username: String!, $from: DateTime!, $to: DateTime!) {
        user(login: $username) {
            contributionsCollection(from: $from, to: $to) {
                contributionCalendar {
                    weeks {
                        contributionDays {
                            date
                            contributionCount
                        }
                    }
                }
            }
        }
    }
"#;

/// A provider of per-day contribution counts over a date range
#[async_trait]
pub trait ContributionSource: Send + Sync {
    async fn fetch_calendar(
        &self,
        username: &str,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<ContributionDay>>;
}

pub struct GitHubClient {
    token: String,
}

impl GitHubClient {
    pub fn new(token: &str) -> Self {
        Self {
            token: token.to_string(),
        }
    }
}

#[async_trait]
impl ContributionSource for GitHubClient {
    async fn fetch_calendar(
        &self,
        username: &str,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<ContributionDay>> {
        let client = create_http_client();

        let variables = json!({
            "username": username,
            "from": from.to_rfc3339(),
            "to": to.to_rfc3339(),
        });

        let response = client
            .post(GITHUB_GRAPHQL_URL)
            .header("Authorization", format!("Bearer {}", self.token))
            .json(&json!({
                "query": CONTRIBUTIONS_QUERY,
                "variables": variables,
            }))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await?;
            return Err(anyhow!(
                "GitHub API request failed with status {}: {}",
                status,
                error_text
            ));
        }

        let response_data: CalendarResponse = response.json().await?;

        if let Some(errors) = response_data.errors {
            return Err(anyhow!("GitHub GraphQL errors: {:?}", errors));
        }

        let user = response_data
            .data
            .and_then(|d| d.user)
            .ok_or_else(|| anyhow!("No user data in GitHub response"))?;

        Ok(flatten_calendar(
            user.contributions_collection.contribution_calendar,
        ))
    }
}

/// Flatten the calendar's week/day nodes into per-day records, skipping
/// days with a missing or unparsable date
fn flatten_calendar(calendar: ContributionCalendar) -> Vec<ContributionDay> {
    let mut days = Vec::new();

    for week in calendar.weeks {
        for day in week.contribution_days {
            let date_str = match day.date {
                Some(d) => d,
                None => {
                    log::warn!("Skipping contribution day with no date");
                    continue;
                }
            };

            match NaiveDate::parse_from_str(&date_str, "%Y-%m-%d") {
                Ok(date) => days.push(ContributionDay {
                    date,
                    count: day.contribution_count,
                }),
                Err(e) => log::warn!("Skipping contribution day '{}': {}", date_str, e),
            }
        }
    }

    days
}

/// Walk the user's full history in year-sized windows and assemble daily
/// counts. A window that fails is logged and contributes nothing; the walk
/// continues with the next window.
pub async fn fetch_contributions(
    source: &dyn ContributionSource,
    username: &str,
    history_start: NaiveDate,
    now: DateTime<Utc>,
) -> ContributionData {
    log::info!("Fetching contributions for user '{}'", username);

    let mut history: HashMap<NaiveDate, i32> = HashMap::new();
    let mut window_start = history_start.and_time(NaiveTime::MIN).and_utc();

    while window_start < now {
        let window_end = (window_start + Duration::days(WINDOW_DAYS)).min(now);

        log::debug!(
            "Fetching window {} to {}",
            window_start.to_rfc3339(),
            window_end.to_rfc3339()
        );

        match source
            .fetch_calendar(username, window_start, window_end)
            .await
        {
            Ok(days) => {
                for day in days {
                    history.insert(day.date, day.count);
                }
            }
            Err(e) => {
                log::error!(
                    "Failed to fetch window {} to {}: {:#}",
                    window_start.to_rfc3339(),
                    window_end.to_rfc3339(),
                    e
                );
            }
        }

        window_start = window_end;
    }

    // The trailing 52 weeks feed the heatmap; the full history feeds streaks
    let recent_start = now.date_naive() - Duration::weeks(52);
    let recent: HashMap<NaiveDate, i32> = history
        .iter()
        .filter(|(date, _)| **date >= recent_start)
        .map(|(date, count)| (*date, *count))
        .collect();

    let total_contributions: i32 = history.values().sum();

    log::info!(
        "📊 Collected {} contributions across {} days",
        total_contributions,
        history.len()
    );

    ContributionData {
        history,
        recent,
        total_contributions,
    }
}

// GitHub API response types

#[derive(Debug, Deserialize)]
struct CalendarResponse {
    data: Option<CalendarData>,
    errors: Option<Vec<GraphQLError>>,
}

#[derive(Debug, Deserialize)]
struct GraphQLError {
    #[allow(dead_code)]
    message: String,
}

#[derive(Debug, Deserialize)]
struct CalendarData {
    user: Option<CalendarUser>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CalendarUser {
    contributions_collection: ContributionsCollection,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ContributionsCollection {
    contribution_calendar: ContributionCalendar,
}

#[derive(Debug, Deserialize)]
struct ContributionCalendar {
    weeks: Vec<CalendarWeek>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CalendarWeek {
    contribution_days: Vec<CalendarDay>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CalendarDay {
    date: Option<String>,
    #[serde(default)]
    contribution_count: i32,
}
