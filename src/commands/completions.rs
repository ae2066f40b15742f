//! Shell completions command

use clap::CommandFactory;
use clap_complete::Shell;

use crate::cli::CompletionsArgs;
use crate::error::{Gl1tchError, Result};

const SUPPORTED_SHELLS: &str = "bash, elvish, fish, powershell, zsh";

/// Write a completion script for the requested shell to stdout
pub fn run(args: CompletionsArgs) -> Result<()> {
    let Some(shell) = parse_shell(&args.shell) else {
        return Err(Gl1tchError::ConfigInvalid {
            message: format!(
                "Unknown shell: {}. Supported shells: {SUPPORTED_SHELLS}",
                args.shell
            ),
        });
    };

    let mut cmd = <crate::cli::Cli as CommandFactory>::command();
    clap_complete::generate(shell, &mut cmd, "gl1tch-card", &mut std::io::stdout().lock());

    Ok(())
}

/// Map a shell name to its generator, case-insensitively
fn parse_shell(name: &str) -> Option<Shell> {
    match name.to_lowercase().as_str() {
        "bash" => Some(Shell::Bash),
        "elvish" => Some(Shell::Elvish),
        "fish" => Some(Shell::Fish),
        "powershell" | "pwsh" => Some(Shell::PowerShell),
        "zsh" => Some(Shell::Zsh),
        _ => None,
    }
}
