//! Artifact generation
//!
//! Runs the whole fetch phase (GitHub, WakaTime, theme), renders the card,
//! and seals the result into an [`Artifact`]. Generation never touches the
//! publish target; its only side effects are API reads.

use chrono::Utc;

use crate::artifact::Artifact;
use crate::card::{self, CardInput};
use crate::config::Config;
use crate::error::Result;
use crate::progress::ProgressDisplay;
use crate::stats::{GitHubClient, WakaTimeClient};
use crate::theme::ThemeClient;

/// The sealed artifact plus the context needed to publish it
pub struct GeneratedCard {
    pub artifact: Artifact,
    /// Login resolved from the token, owner of the publish target
    pub login: String,
    pub theme_name: String,
}

/// Fetch stats, render the card, and seal it into an artifact
///
/// Fails without producing anything when any upstream fetch fails; a partial
/// card is never handed to the publisher.
pub fn generate(config: &Config, progress: &ProgressDisplay) -> Result<GeneratedCard> {
    let github = GitHubClient::new(&config.github_token)?;
    let wakatime = WakaTimeClient::new(&config.wakatime_api_key)?;
    let themes = ThemeClient::new()?;

    progress.phase("resolving GitHub login");
    let login = github.viewer_login()?;

    progress.phase("fetching GitHub statistics");
    let github_stats = github.fetch_stats(&login, progress)?;

    progress.phase("fetching WakaTime statistics");
    let wakatime_stats = wakatime.fetch_stats()?;

    progress.phase(&format!("fetching theme '{}'", config.theme_name));
    let theme = themes.fetch(&config.theme_name)?;

    progress.phase("rendering card");
    let bytes = card::render(&CardInput {
        github: &github_stats,
        wakatime: &wakatime_stats,
        theme: &theme,
        fields: &config.fields,
        sections: &config.sections,
    });

    Ok(GeneratedCard {
        artifact: Artifact::new(bytes, Utc::now()),
        login,
        theme_name: config.theme_name.clone(),
    })
}
