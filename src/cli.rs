//! CLI definitions using clap derive API

use clap::builder::{Styles, styling::AnsiColor};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// gl1tch-card - terminal-styled GitHub profile card
///
/// Generates a statistics card and publishes it to the profile repository.
#[derive(Parser, Debug)]
#[command(
    name = "gl1tch-card",
    author,
    version,
    color = clap::ColorChoice::Always,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Terminal-styled GitHub profile card generator and publisher",
    long_about = "gl1tch-card renders GitHub and WakaTime statistics as a terminal-styled \
                  SVG card themed with a Gogh palette, and publishes it to the {login}/{login} \
                  profile repository. The publish commit is authored by a fixed bot identity \
                  and only happens when the card's fingerprint changed since the last publish.",
    after_help = "\x1b[1m\x1b[32mEnvironment:\x1b[0m\n    \
                  INPUT_GH_TOKEN              GitHub token (required)\n    \
                  INPUT_WAKATIME_API_KEY      WakaTime API key (required)\n    \
                  INPUT_THEME_NAME            Gogh theme name (default: Aco)\n    \
                  INPUT_FIELD_BIO/EMAIL/WEBSITE  profile field overrides\n    \
                  INPUT_SHOW_EDITORS/COMMIT/LANGUAGE/LINES_OF_CODE  section toggles\n    \
                  INPUT_COMMITTER_NAME/EMAIL  bot identity override\n\n\
                  \x1b[1m\x1b[32mExamples:\x1b[0m\n    \
                  gl1tch-card run\n    \
                  gl1tch-card preview --output card.svg\n    \
                  gl1tch-card preview --theme Dracula\n    \
                  gl1tch-card status"
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate the card and publish it to the profile repository
    Run(RunArgs),

    /// Generate the card and write it to a local file, publishing nothing
    Preview(PreviewArgs),

    /// Show the publish state of the profile repository
    Status(StatusArgs),

    /// Show version information
    #[command(hide = true)]
    Version,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the run command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Generate and publish:\n    gl1tch-card run\n\n\
                  Publish with a different palette:\n    gl1tch-card run --theme Dracula\n\n\
                  See whether a publish would happen:\n    gl1tch-card run --dry-run")]
pub struct RunArgs {
    /// Gogh theme name (overrides INPUT_THEME_NAME)
    #[arg(long)]
    pub theme: Option<String>,

    /// Compare against the remote state without writing, committing or pushing
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the preview command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Write the card next to the current directory:\n    gl1tch-card preview\n\n\
                  Pick the output path:\n    gl1tch-card preview --output /tmp/card.svg\n\n\
                  Try a palette:\n    gl1tch-card preview --theme Dracula")]
pub struct PreviewArgs {
    /// Output path for the rendered card
    #[arg(long, short = 'o', default_value = "gl1tch-card.svg")]
    pub output: PathBuf,

    /// Gogh theme name (overrides INPUT_THEME_NAME)
    #[arg(long)]
    pub theme: Option<String>,
}

/// Arguments for the status command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Show the last published fingerprint:\n    gl1tch-card status")]
pub struct StatusArgs {}

/// Arguments for completions command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Generate bash completions:\n    gl1tch-card completions --shell bash > ~/.bash_completion.d/gl1tch-card\n\n\
                  Generate zsh completions:\n    gl1tch-card completions --shell zsh > ~/.zfunc/_gl1tch-card\n\n\
                  Generate fish completions:\n    gl1tch-card completions --shell fish > ~/.config/fish/completions/gl1tch-card.fish")]
pub struct CompletionsArgs {
    /// Shell type (bash, elvish, fish, powershell, zsh)
    #[arg(long)]
    pub shell: String,
}
