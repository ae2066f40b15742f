//! gl1tch-card - terminal-styled GitHub profile card
//!
//! A command line tool that renders GitHub and WakaTime statistics as a
//! terminal-styled SVG card and publishes it to the user's profile
//! repository in a single commit-and-push run.

use clap::Parser;

mod artifact;
mod card;
mod cli;
mod commands;
mod config;
mod error;
mod fingerprint;
mod generator;
mod git;
mod progress;
mod publish;
mod stats;
mod theme;

use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run(args) => commands::run::run(args, cli.verbose),
        Commands::Preview(args) => commands::preview::run(args, cli.verbose),
        Commands::Status(args) => commands::status::run(args),
        Commands::Version => commands::version::run(),
        Commands::Completions(args) => commands::completions::run(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
