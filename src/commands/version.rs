//! Version command implementation

use crate::config::BotIdentity;
use crate::error::Result;
use crate::publish::CARD_FILE;

/// Print the version, build details, and publish defaults
pub fn run() -> Result<()> {
    println!("gl1tch-card {}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Build info:");
    println!("  Rust version: {}", env!("CARGO_PKG_RUST_VERSION"));
    println!("  Profile: {}", build_profile());
    println!();
    println!("Publish defaults:");
    println!("  Card path: {CARD_FILE}");
    println!(
        "  Committer: {} <{}>",
        BotIdentity::DEFAULT_NAME,
        BotIdentity::DEFAULT_EMAIL
    );

    Ok(())
}

fn build_profile() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "release"
    }
}
