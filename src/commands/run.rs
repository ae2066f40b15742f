//! Run command implementation
//!
//! The full pipeline: generate the artifact, then publish it. Both terminal
//! outcomes (Published and NoOp) exit zero; every error propagates to main
//! and exits non-zero.

use console::Style;

use crate::cli::RunArgs;
use crate::config::Config;
use crate::error::Result;
use crate::generator;
use crate::progress::ProgressDisplay;
use crate::publish::{PublishOutcome, Publisher};

/// Run the generate-and-publish pipeline
pub fn run(args: RunArgs, verbose: bool) -> Result<()> {
    let mut config = Config::from_env()?;
    if let Some(theme) = args.theme {
        config.theme_name = theme;
    }

    let progress = ProgressDisplay::new();
    let result = execute(&config, args.dry_run, verbose, &progress);
    if result.is_err() {
        progress.abandon();
    }
    result
}

fn execute(
    config: &Config,
    dry_run: bool,
    verbose: bool,
    progress: &ProgressDisplay,
) -> Result<()> {
    let card = generator::generate(config, progress)?;

    if verbose {
        println!(
            "  {} {}",
            Style::new().bold().apply_to("Fingerprint:"),
            card.artifact.fingerprint()
        );
        println!(
            "  {} {} bytes, theme '{}'",
            Style::new().bold().apply_to("Card:"),
            card.artifact.bytes().len(),
            card.theme_name
        );
    }

    let publisher = Publisher::for_profile(
        &card.login,
        &config.github_token,
        config.identity.clone(),
    );

    if dry_run {
        let remote = publisher.remote_state(progress)?;
        progress.finish();

        let fingerprint = card.artifact.fingerprint();
        match remote {
            Some(state) if state.fingerprint == *fingerprint => {
                println!(
                    "{} {} is up to date ({}), a run would be a no-op",
                    Style::new().bold().green().apply_to("✓"),
                    publisher.target(),
                    fingerprint.short()
                );
            }
            Some(state) => {
                println!(
                    "{} a run would publish {} to {}, replacing {}",
                    Style::new().bold().yellow().apply_to("→"),
                    fingerprint.short(),
                    publisher.target(),
                    state.fingerprint.short()
                );
            }
            None => {
                println!(
                    "{} a run would publish {} to {} (never published before)",
                    Style::new().bold().yellow().apply_to("→"),
                    fingerprint.short(),
                    publisher.target()
                );
            }
        }
        return Ok(());
    }

    let outcome = publisher.publish(&card.artifact, progress)?;
    progress.finish();

    match outcome {
        PublishOutcome::NoOp { fingerprint } => {
            println!(
                "{} {} is up to date ({})",
                Style::new().bold().green().apply_to("✓"),
                publisher.target(),
                fingerprint.short()
            );
        }
        PublishOutcome::Published {
            fingerprint,
            commit,
            branch,
        } => {
            let short_commit = &commit[..commit.len().min(8)];
            println!(
                "{} published {} to {} ({} on {})",
                Style::new().bold().green().apply_to("✓"),
                fingerprint.short(),
                publisher.target(),
                short_commit,
                branch
            );
        }
    }

    Ok(())
}
