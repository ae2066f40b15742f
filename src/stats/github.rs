//! GitHub statistics fetching over the GraphQL API
//!
//! This module handles:
//! - Resolving the authenticated login (`viewer` query)
//! - Fetching the user profile
//! - Fetching all owned repositories with cursor pagination
//! - Transforming wire payloads into the domain models
//!
//! One POST per page; pagination is bounded by `max_repos` so pathological
//! accounts cannot stall a run.

use std::time::Duration;

use reqwest::blocking::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::error::{Gl1tchError, Result};
use crate::progress::ProgressDisplay;
use crate::stats::models::{
    GitHubRepository, GitHubStats, GitHubUser, RepositoryStats, account_age_years, top_languages,
};

/// GitHub GraphQL API endpoint
pub const GITHUB_GRAPHQL_ENDPOINT: &str = "https://api.github.com/graphql";

/// Repositories fetched per GraphQL page
const PAGE_SIZE: u32 = 100;

/// Upper bound on repositories fetched across all pages
const DEFAULT_MAX_REPOS: usize = 1000;

/// Languages shown on the card
const TOP_LANGUAGES: usize = 5;

/// HTTP timeout for a single API call
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

const VIEWER_QUERY: &str = r"
query {
  viewer { login }
}";

const USER_PROFILE_QUERY: &str = r"
query($username: String!) {
  user(login: $username) {
    login
    name
    bio
    location
    company
    websiteUrl
    createdAt
    avatarUrl
    followers { totalCount }
    following { totalCount }
    gists { totalCount }
    repositories(ownerAffiliations: OWNER) { totalCount }
  }
}";

const REPOSITORIES_QUERY: &str = r"
query($username: String!, $first: Int!, $after: String) {
  user(login: $username) {
    repositories(first: $first, after: $after, ownerAffiliations: OWNER, orderBy: {field: UPDATED_AT, direction: DESC}) {
      pageInfo {
        hasNextPage
        endCursor
      }
      nodes {
        name
        isPrivate
        stargazerCount
        forkCount
        issues { totalCount }
        pullRequests { totalCount }
        defaultBranchRef {
          target {
            ... on Commit {
              history { totalCount }
            }
          }
        }
        primaryLanguage { name }
      }
    }
  }
}";

/// Client for the GitHub GraphQL API
pub struct GitHubClient {
    http: Client,
    token: String,
    max_repos: usize,
}

impl GitHubClient {
    /// Create a client with the default repository bound
    pub fn new(token: &str) -> Result<Self> {
        Self::with_max_repos(token, DEFAULT_MAX_REPOS)
    }

    /// Create a client with an explicit repository bound
    pub fn with_max_repos(token: &str, max_repos: usize) -> Result<Self> {
        if max_repos == 0 {
            return Err(Gl1tchError::ConfigInvalid {
                message: "max_repos must be positive".to_string(),
            });
        }

        let http = Client::builder()
            .user_agent(concat!("gl1tch-card/", env!("CARGO_PKG_VERSION")))
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| Gl1tchError::ConfigInvalid {
                message: format!("failed to build HTTP client: {e}"),
            })?;

        Ok(Self {
            http,
            token: token.to_string(),
            max_repos,
        })
    }

    /// Resolve the login of the user the token belongs to
    pub fn viewer_login(&self) -> Result<String> {
        let data: ViewerData = self.post_graphql(VIEWER_QUERY, serde_json::json!({}))?;
        Ok(data.viewer.login)
    }

    /// Fetch comprehensive GitHub statistics for a user
    ///
    /// Orchestrates the profile fetch, the paginated repository fetch, and
    /// the aggregate calculations. Read-only with respect to everything but
    /// the GitHub API.
    pub fn fetch_stats(&self, username: &str, progress: &ProgressDisplay) -> Result<GitHubStats> {
        let user = self.fetch_user_profile(username)?;
        let repositories = self.fetch_all_repositories(username, progress)?;

        let stats = RepositoryStats::from_repositories(&repositories);
        let github_languages = top_languages(&repositories, TOP_LANGUAGES);
        let account_age_years = account_age_years(user.created_at.as_deref());

        Ok(GitHubStats {
            user,
            stats,
            github_languages,
            account_age_years,
            repositories,
        })
    }

    fn fetch_user_profile(&self, username: &str) -> Result<GitHubUser> {
        let variables = serde_json::json!({ "username": username });
        let data: UserProfileData = self.post_graphql(USER_PROFILE_QUERY, variables)?;

        let node = data.user.ok_or_else(|| Gl1tchError::GitHubUserNotFound {
            username: username.to_string(),
        })?;

        Ok(node.into_user())
    }

    /// Fetch all owned repositories using cursor pagination
    fn fetch_all_repositories(
        &self,
        username: &str,
        progress: &ProgressDisplay,
    ) -> Result<Vec<GitHubRepository>> {
        let mut all_repos: Vec<GitHubRepository> = Vec::new();
        let mut cursor: Option<String> = None;

        loop {
            let variables = serde_json::json!({
                "username": username,
                "first": PAGE_SIZE,
                "after": cursor,
            });
            let data: RepositoriesData = self.post_graphql(REPOSITORIES_QUERY, variables)?;

            let user = data.user.ok_or_else(|| Gl1tchError::GitHubUserNotFound {
                username: username.to_string(),
            })?;
            let connection = user.repositories;

            all_repos.extend(connection.nodes.into_iter().map(RepositoryNode::into_repository));
            progress.repositories_fetched(all_repos.len());

            if !connection.page_info.has_next_page || all_repos.len() >= self.max_repos {
                break;
            }
            cursor = connection.page_info.end_cursor;
        }

        all_repos.truncate(self.max_repos);
        Ok(all_repos)
    }

    /// POST a GraphQL query and unwrap the response envelope
    fn post_graphql<T: DeserializeOwned>(
        &self,
        query: &str,
        variables: serde_json::Value,
    ) -> Result<T> {
        let payload = serde_json::json!({ "query": query, "variables": variables });

        let response = self
            .http
            .post(GITHUB_GRAPHQL_ENDPOINT)
            .header("Accept", "application/vnd.github.v3+json")
            .header("Authorization", format!("token {}", self.token))
            .json(&payload)
            .send()?;

        let status = response.status().as_u16();
        let text = response.text()?;

        if !(200..300).contains(&status) {
            let message = serde_json::from_str::<ApiErrorBody>(&text)
                .ok()
                .and_then(|body| body.message)
                .unwrap_or_else(|| "Unknown error".to_string());
            return Err(classify_api_error(status, message));
        }

        let envelope: GraphqlResponse<T> =
            serde_json::from_str(&text).map_err(|e| Gl1tchError::MalformedResponse {
                what: "GitHub GraphQL".to_string(),
                reason: e.to_string(),
            })?;

        if let Some(errors) = envelope.errors.filter(|errs| !errs.is_empty()) {
            let message = errors
                .iter()
                .map(|e| e.message.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            return Err(Gl1tchError::GraphqlFailed { message });
        }

        envelope.data.ok_or_else(|| Gl1tchError::MalformedResponse {
            what: "GitHub GraphQL".to_string(),
            reason: "response has neither data nor errors".to_string(),
        })
    }
}

/// Map a non-success API status to the error taxonomy
fn classify_api_error(status: u16, message: String) -> Gl1tchError {
    match status {
        403 | 429 => Gl1tchError::GitHubRateLimited { message },
        _ => Gl1tchError::GitHubApiFailed { status, message },
    }
}

// Wire types for the GraphQL payloads.

#[derive(Debug, Deserialize)]
struct GraphqlResponse<T> {
    data: Option<T>,
    errors: Option<Vec<GraphqlErrorNode>>,
}

#[derive(Debug, Deserialize)]
struct GraphqlErrorNode {
    message: String,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ViewerData {
    viewer: ViewerNode,
}

#[derive(Debug, Deserialize)]
struct ViewerNode {
    login: String,
}

#[derive(Debug, Deserialize)]
struct UserProfileData {
    user: Option<UserProfileNode>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserProfileNode {
    login: String,
    name: Option<String>,
    bio: Option<String>,
    location: Option<String>,
    company: Option<String>,
    website_url: Option<String>,
    created_at: Option<String>,
    avatar_url: Option<String>,
    followers: CountNode,
    following: CountNode,
    gists: CountNode,
    repositories: CountNode,
}

impl UserProfileNode {
    fn into_user(self) -> GitHubUser {
        GitHubUser {
            username: self.login,
            name: self.name,
            bio: self.bio,
            location: self.location,
            company: self.company,
            blog: self.website_url,
            public_repos: self.repositories.total_count as u32,
            public_gists: self.gists.total_count as u32,
            followers: self.followers.total_count as u32,
            following: self.following.total_count as u32,
            created_at: self.created_at,
            avatar_url: self.avatar_url,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RepositoriesData {
    user: Option<RepositoriesUserNode>,
}

#[derive(Debug, Deserialize)]
struct RepositoriesUserNode {
    repositories: RepositoryConnection,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RepositoryConnection {
    page_info: PageInfo,
    nodes: Vec<RepositoryNode>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PageInfo {
    has_next_page: bool,
    end_cursor: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RepositoryNode {
    name: String,
    #[serde(default)]
    is_private: bool,
    #[serde(default)]
    stargazer_count: u64,
    #[serde(default)]
    fork_count: u64,
    issues: Option<CountNode>,
    pull_requests: Option<CountNode>,
    default_branch_ref: Option<BranchRefNode>,
    primary_language: Option<LanguageNode>,
}

impl RepositoryNode {
    fn into_repository(self) -> GitHubRepository {
        let commits_count = self
            .default_branch_ref
            .and_then(|branch| branch.target)
            .map(|target| target.history.total_count)
            .unwrap_or(0);

        GitHubRepository {
            name: self.name,
            is_private: self.is_private,
            stargazer_count: self.stargazer_count,
            fork_count: self.fork_count,
            issues_count: self.issues.map(|c| c.total_count).unwrap_or(0),
            pull_requests_count: self.pull_requests.map(|c| c.total_count).unwrap_or(0),
            commits_count,
            primary_language: self.primary_language.map(|l| l.name),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BranchRefNode {
    // null for empty repositories
    target: Option<CommitTargetNode>,
}

#[derive(Debug, Deserialize)]
struct CommitTargetNode {
    history: CountNode,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CountNode {
    total_count: u64,
}

#[derive(Debug, Deserialize)]
struct LanguageNode {
    name: String,
}
