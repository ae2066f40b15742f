//! GitHub statistics data models
//!
//! Domain models built from the GraphQL payloads: the user profile, per
//! repository data, and the aggregate statistics rendered onto the card.

use chrono::{DateTime, Datelike, Utc};

/// GitHub user profile data
#[derive(Debug, Clone, Default)]
pub struct GitHubUser {
    pub username: String,
    pub name: Option<String>,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub company: Option<String>,
    pub blog: Option<String>,
    pub public_repos: u32,
    pub public_gists: u32,
    pub followers: u32,
    pub following: u32,
    pub created_at: Option<String>,
    pub avatar_url: Option<String>,
}

/// A single repository owned by the user
#[derive(Debug, Clone, Default)]
pub struct GitHubRepository {
    pub name: String,
    pub is_private: bool,
    pub stargazer_count: u64,
    pub fork_count: u64,
    pub issues_count: u64,
    pub pull_requests_count: u64,
    pub commits_count: u64,
    pub primary_language: Option<String>,
}

/// Aggregate repository statistics, split by visibility
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepositoryStats {
    pub total_stars: u64,
    pub total_forks: u64,
    pub total_issues: u64,
    pub total_pulls: u64,
    pub total_commits: u64,

    pub public_repos: u64,
    pub public_stars: u64,
    pub public_forks: u64,
    pub public_issues: u64,
    pub public_pulls: u64,
    pub public_commits: u64,

    pub private_repos: u64,
    pub private_stars: u64,
    pub private_forks: u64,
    pub private_issues: u64,
    pub private_pulls: u64,
    pub private_commits: u64,
}

impl RepositoryStats {
    /// Aggregate per-repository counts into totals and public/private splits
    pub fn from_repositories(repos: &[GitHubRepository]) -> Self {
        let mut stats = Self::default();

        for repo in repos {
            stats.total_stars += repo.stargazer_count;
            stats.total_forks += repo.fork_count;
            stats.total_issues += repo.issues_count;
            stats.total_pulls += repo.pull_requests_count;
            stats.total_commits += repo.commits_count;

            if repo.is_private {
                stats.private_repos += 1;
                stats.private_stars += repo.stargazer_count;
                stats.private_forks += repo.fork_count;
                stats.private_issues += repo.issues_count;
                stats.private_pulls += repo.pull_requests_count;
                stats.private_commits += repo.commits_count;
            } else {
                stats.public_repos += 1;
                stats.public_stars += repo.stargazer_count;
                stats.public_forks += repo.fork_count;
                stats.public_issues += repo.issues_count;
                stats.public_pulls += repo.pull_requests_count;
                stats.public_commits += repo.commits_count;
            }
        }

        stats
    }
}

/// Complete GitHub statistics for one user
#[derive(Debug, Clone)]
pub struct GitHubStats {
    pub user: GitHubUser,
    pub stats: RepositoryStats,
    /// Top primary languages by repository count
    pub github_languages: Vec<String>,
    pub account_age_years: i32,
    pub repositories: Vec<GitHubRepository>,
}

/// Rank primary languages by repository count, descending.
///
/// Ties break by language name so the ranking (and therefore the rendered
/// card) is deterministic across runs.
pub fn top_languages(repos: &[GitHubRepository], top_n: usize) -> Vec<String> {
    let mut counts: std::collections::BTreeMap<&str, u32> = std::collections::BTreeMap::new();
    for repo in repos {
        if let Some(lang) = repo.primary_language.as_deref() {
            *counts.entry(lang).or_insert(0) += 1;
        }
    }

    let mut ranked: Vec<(&str, u32)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    ranked
        .into_iter()
        .take(top_n)
        .map(|(lang, _)| lang.to_string())
        .collect()
}

/// Account age in whole years from the profile's created-at timestamp.
///
/// Unparseable or absent timestamps count as age 0 rather than failing the
/// run; the card simply shows a new account.
pub fn account_age_years(created_at: Option<&str>) -> i32 {
    let Some(created_at) = created_at else {
        return 0;
    };
    match DateTime::parse_from_rfc3339(created_at) {
        Ok(created) => (Utc::now().year() - created.year()).max(0),
        Err(_) => 0,
    }
}
