//! Preview command implementation
//!
//! Generates the card and writes it to a local file. Nothing is cloned,
//! committed or pushed; the publish target is never touched.

use std::fs;
use std::path::Path;

use console::Style;

use crate::cli::PreviewArgs;
use crate::config::Config;
use crate::error::{Gl1tchError, Result};
use crate::generator;
use crate::progress::ProgressDisplay;

/// Generate the card and write it locally
pub fn run(args: PreviewArgs, verbose: bool) -> Result<()> {
    let mut config = Config::from_env()?;
    if let Some(theme) = args.theme {
        config.theme_name = theme;
    }

    let progress = ProgressDisplay::new();
    let result = execute(&config, &args.output, verbose, &progress);
    if result.is_err() {
        progress.abandon();
    }
    result
}

fn execute(
    config: &Config,
    output: &Path,
    verbose: bool,
    progress: &ProgressDisplay,
) -> Result<()> {
    let card = generator::generate(config, progress)?;
    progress.finish();

    fs::write(output, card.artifact.bytes()).map_err(|e| Gl1tchError::WriteFailed {
        path: output.display().to_string(),
        reason: e.to_string(),
    })?;

    println!(
        "{} wrote {} ({} bytes, {})",
        Style::new().bold().green().apply_to("✓"),
        output.display(),
        card.artifact.bytes().len(),
        card.artifact.fingerprint().short()
    );
    if verbose {
        println!(
            "  {} {}",
            Style::new().bold().apply_to("Fingerprint:"),
            card.artifact.fingerprint()
        );
        println!(
            "  {} {}",
            Style::new().bold().apply_to("Generated:"),
            card.artifact.generated_at().to_rfc3339()
        );
    }

    Ok(())
}
