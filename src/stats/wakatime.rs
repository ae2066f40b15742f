//! WakaTime coding statistics fetching
//!
//! Two REST endpoints feed the card: the last-7-days breakdown (languages,
//! editors, operating systems, projects) and the all-time summary. Both key
//! authentication off the `api_key` query parameter.

use std::cmp::Ordering;
use std::time::Duration;

use reqwest::blocking::Client;
use serde::Deserialize;

use crate::error::{Gl1tchError, Result};

/// Last-7-days detailed statistics endpoint
pub const WAKATIME_WEEKLY_URL: &str =
    "https://wakatime.com/api/v1/users/current/stats/last_7_days";

/// All-time summary endpoint
pub const WAKATIME_ALL_TIME_URL: &str =
    "https://wakatime.com/api/v1/users/current/all_time_since_today";

/// Entries kept per usage breakdown
const MAX_SLICES: usize = 5;

/// HTTP timeout for a single API call
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Coding activity summary over one range
#[derive(Debug, Clone, Default)]
pub struct CodingSummary {
    pub total_seconds: f64,
    /// Human readable total, e.g. "12 hrs 30 mins"
    pub text: Option<String>,
    pub daily_average_seconds: f64,
    pub range_text: Option<String>,
}

/// One entry of a usage breakdown (language, editor, OS or project)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UsageSlice {
    pub name: String,
    pub total_seconds: f64,
    pub percent: f64,
    pub text: Option<String>,
}

/// The single most active day of the week
#[derive(Debug, Clone, Default)]
pub struct BestDay {
    pub date: Option<String>,
    pub text: Option<String>,
    pub total_seconds: f64,
}

/// WakaTime statistics rendered onto the card
#[derive(Debug, Clone, Default)]
pub struct WakaTimeStats {
    pub weekly: CodingSummary,
    pub all_time: CodingSummary,
    pub languages: Vec<UsageSlice>,
    pub editors: Vec<UsageSlice>,
    pub operating_systems: Vec<UsageSlice>,
    pub projects: Vec<UsageSlice>,
    pub best_day: Option<BestDay>,
}

/// Client for the WakaTime statistics API
pub struct WakaTimeClient {
    http: Client,
    api_key: String,
}

impl WakaTimeClient {
    pub fn new(api_key: &str) -> Result<Self> {
        let http = Client::builder()
            .user_agent(concat!("gl1tch-card/", env!("CARGO_PKG_VERSION")))
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| Gl1tchError::ConfigInvalid {
                message: format!("failed to build HTTP client: {e}"),
            })?;

        Ok(Self {
            http,
            api_key: api_key.to_string(),
        })
    }

    /// Fetch the weekly breakdown and the all-time summary
    pub fn fetch_stats(&self) -> Result<WakaTimeStats> {
        let weekly: WakaData = self.get_stats(WAKATIME_WEEKLY_URL)?;
        let all_time: WakaData = self.get_stats(WAKATIME_ALL_TIME_URL)?;

        Ok(assemble_stats(weekly, all_time))
    }

    fn get_stats(&self, url: &str) -> Result<WakaData> {
        let response = self
            .http
            .get(url)
            .query(&[("api_key", self.api_key.as_str())])
            .send()?;

        let status = response.status().as_u16();
        let text = response.text()?;

        if !(200..300).contains(&status) {
            let message = serde_json::from_str::<WakaErrorBody>(&text)
                .ok()
                .and_then(|body| body.error)
                .unwrap_or_else(|| "Unknown error".to_string());
            return Err(Gl1tchError::WakaTimeApiFailed { status, message });
        }

        let envelope: WakaEnvelope =
            serde_json::from_str(&text).map_err(|e| Gl1tchError::MalformedResponse {
                what: "WakaTime".to_string(),
                reason: e.to_string(),
            })?;

        Ok(envelope.data)
    }
}

/// Merge the two endpoint payloads into the domain model
fn assemble_stats(weekly: WakaData, all_time: WakaData) -> WakaTimeStats {
    WakaTimeStats {
        weekly: summary_of(&weekly),
        all_time: summary_of(&all_time),
        languages: rank_slices(weekly.languages),
        editors: rank_slices(weekly.editors),
        operating_systems: rank_slices(weekly.operating_systems),
        projects: rank_slices(weekly.projects),
        best_day: weekly.best_day.map(|day| BestDay {
            date: day.date,
            text: day.text,
            total_seconds: day.total_seconds.unwrap_or(0.0),
        }),
    }
}

fn summary_of(data: &WakaData) -> CodingSummary {
    CodingSummary {
        total_seconds: data.total_seconds.unwrap_or(0.0),
        text: data.text.clone(),
        daily_average_seconds: data.daily_average.unwrap_or(0.0),
        range_text: data.human_readable_range.clone(),
    }
}

/// Order slices by share descending, then name, and keep the top entries.
///
/// The API already returns ranked entries but the ordering is re-imposed
/// here so equal percentages cannot flip between runs.
fn rank_slices(entries: Vec<UsageEntry>) -> Vec<UsageSlice> {
    let mut slices: Vec<UsageSlice> = entries
        .into_iter()
        .map(|entry| UsageSlice {
            name: entry.name,
            total_seconds: entry.total_seconds.unwrap_or(0.0),
            percent: entry.percent.unwrap_or(0.0),
            text: entry.text,
        })
        .collect();

    slices.sort_by(|a, b| {
        b.percent
            .partial_cmp(&a.percent)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.name.cmp(&b.name))
    });
    slices.truncate(MAX_SLICES);
    slices
}

// Wire types for the WakaTime payloads. Both endpoints share one shape with
// different subsets populated, mirrored here as a single struct of options.

#[derive(Debug, Deserialize)]
struct WakaEnvelope {
    data: WakaData,
}

#[derive(Debug, Deserialize)]
struct WakaErrorBody {
    error: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct WakaData {
    total_seconds: Option<f64>,
    text: Option<String>,
    daily_average: Option<f64>,
    human_readable_range: Option<String>,
    #[serde(default)]
    languages: Vec<UsageEntry>,
    #[serde(default)]
    editors: Vec<UsageEntry>,
    #[serde(default)]
    operating_systems: Vec<UsageEntry>,
    #[serde(default)]
    projects: Vec<UsageEntry>,
    best_day: Option<BestDayNode>,
}

#[derive(Debug, Deserialize)]
struct UsageEntry {
    name: String,
    total_seconds: Option<f64>,
    percent: Option<f64>,
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct BestDayNode {
    date: Option<String>,
    text: Option<String>,
    total_seconds: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, seconds: f64, percent: f64) -> UsageEntry {
        UsageEntry {
            name: name.to_string(),
            total_seconds: Some(seconds),
            percent: Some(percent),
            text: Some(format!("{} hrs", seconds / 3600.0)),
        }
    }

    #[test]
    fn test_rank_slices_orders_by_percent() {
        let slices = rank_slices(vec![
            entry("Python", 3600.0, 20.0),
            entry("Rust", 10800.0, 60.0),
            entry("TOML", 3600.0, 20.0),
        ]);

        assert_eq!(slices[0].name, "Rust");
        // Equal shares order by name
        assert_eq!(slices[1].name, "Python");
        assert_eq!(slices[2].name, "TOML");
    }

    #[test]
    fn test_rank_slices_truncates() {
        let entries = (0..8)
            .map(|i| entry(&format!("lang-{i}"), 100.0, f64::from(i)))
            .collect();
        let slices = rank_slices(entries);
        assert_eq!(slices.len(), 5);
        assert_eq!(slices[0].name, "lang-7");
    }

    #[test]
    fn test_weekly_payload_parses() {
        let payload = r#"{
            "data": {
                "total_seconds": 45000.5,
                "text": "12 hrs 30 mins",
                "daily_average": 6428.6,
                "human_readable_range": "last 7 days",
                "languages": [
                    { "name": "Rust", "total_seconds": 30000.0, "percent": 66.6, "text": "8 hrs 20 mins" }
                ],
                "editors": [
                    { "name": "Neovim", "total_seconds": 45000.5, "percent": 100.0, "text": "12 hrs 30 mins" }
                ],
                "operating_systems": [],
                "projects": [],
                "best_day": { "date": "2024-06-01", "text": "4 hrs", "total_seconds": 14400.0 }
            }
        }"#;

        let envelope: WakaEnvelope = serde_json::from_str(payload).unwrap();
        let stats = assemble_stats(envelope.data, WakaData::default());

        assert_eq!(stats.weekly.text.as_deref(), Some("12 hrs 30 mins"));
        assert_eq!(stats.languages[0].name, "Rust");
        assert_eq!(stats.editors[0].name, "Neovim");
        assert_eq!(stats.best_day.unwrap().date.as_deref(), Some("2024-06-01"));
    }

    #[test]
    fn test_all_time_payload_parses() {
        // The all-time endpoint omits the breakdown arrays entirely
        let payload = r#"{
            "data": {
                "total_seconds": 5400000.0,
                "text": "1,500 hrs",
                "daily_average": 7200.0
            }
        }"#;

        let envelope: WakaEnvelope = serde_json::from_str(payload).unwrap();
        let stats = assemble_stats(WakaData::default(), envelope.data);

        assert_eq!(stats.all_time.total_seconds, 5_400_000.0);
        assert!(stats.languages.is_empty());
    }

    #[test]
    fn test_missing_fields_default() {
        let envelope: WakaEnvelope = serde_json::from_str(r#"{ "data": {} }"#).unwrap();
        let stats = assemble_stats(envelope.data, WakaData::default());

        assert_eq!(stats.weekly.total_seconds, 0.0);
        assert!(stats.weekly.text.is_none());
        assert!(stats.best_day.is_none());
    }
}
