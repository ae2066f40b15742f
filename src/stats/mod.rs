//! Statistics fetching for the card
//!
//! This module contains the two upstream statistics sources:
//! - GitHub GraphQL API (profile, repositories, aggregate counts)
//! - WakaTime REST API (coding activity breakdowns)

pub mod github;
pub mod models;
pub mod wakatime;

// Re-export commonly used types
pub use github::GitHubClient;
pub use models::{GitHubRepository, GitHubStats, GitHubUser, RepositoryStats};
pub use wakatime::{WakaTimeClient, WakaTimeStats};
