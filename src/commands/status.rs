//! Status command implementation
//!
//! Reads the last published state from the profile repository without
//! writing anything.

use console::Style;

use crate::cli::StatusArgs;
use crate::config::Config;
use crate::error::Result;
use crate::progress::ProgressDisplay;
use crate::publish::Publisher;
use crate::stats::GitHubClient;

/// Show the last published card state for the authenticated user
pub fn run(_args: StatusArgs) -> Result<()> {
    let config = Config::from_env()?;

    let progress = ProgressDisplay::new();
    let result = execute(&config, &progress);
    if result.is_err() {
        progress.abandon();
    }
    result
}

fn execute(config: &Config, progress: &ProgressDisplay) -> Result<()> {
    progress.phase("resolving GitHub login");
    let github = GitHubClient::new(&config.github_token)?;
    let login = github.viewer_login()?;

    let publisher = Publisher::for_profile(&login, &config.github_token, config.identity.clone());
    let state = publisher.remote_state(progress)?;
    progress.finish();

    let label = Style::new().bold();
    println!("{} {}", label.apply_to("Target:"), publisher.target());
    match state {
        Some(state) => {
            println!("{} {}", label.apply_to("Fingerprint:"), state.fingerprint);
            println!(
                "{} {}",
                label.apply_to("Published:"),
                state.published_at.to_rfc3339()
            );
        }
        None => {
            println!("The card has never been published");
        }
    }

    Ok(())
}
