//! Terminal color themes from the Gogh collection
//!
//! Themes are fetched as raw YAML from the Gogh repository on GitHub and
//! drive every color on the rendered card. The same theme name always
//! yields the same palette, which keeps the card bytes reproducible.

use std::time::Duration;

use reqwest::blocking::Client;
use serde::Deserialize;

use crate::error::{Gl1tchError, Result};

/// Base URL for raw theme files in the Gogh repository
pub const GOGH_THEME_URL_BASE: &str =
    "https://raw.githubusercontent.com/Gogh-Co/Gogh/master/themes";

/// HTTP timeout for a single theme fetch
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// A Gogh terminal theme
///
/// Field names match the keys of the upstream YAML files.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Theme {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub variant: Option<String>,

    pub background: String,
    pub foreground: String,
    pub cursor: String,

    pub color_01: String,
    pub color_02: String,
    pub color_03: String,
    pub color_04: String,
    pub color_05: String,
    pub color_06: String,
    pub color_07: String,
    pub color_08: String,
    pub color_09: String,
    pub color_10: String,
    pub color_11: String,
    pub color_12: String,
    pub color_13: String,
    pub color_14: String,
    pub color_15: String,
    pub color_16: String,
}

/// Client for fetching themes from the Gogh repository
pub struct ThemeClient {
    http: Client,
}

impl ThemeClient {
    pub fn new() -> Result<Self> {
        let http = Client::builder()
            .user_agent(concat!("gl1tch-card/", env!("CARGO_PKG_VERSION")))
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| Gl1tchError::ConfigInvalid {
                message: format!("failed to build HTTP client: {e}"),
            })?;

        Ok(Self { http })
    }

    /// Fetch and parse a theme by name
    pub fn fetch(&self, theme_name: &str) -> Result<Theme> {
        let url = format!("{GOGH_THEME_URL_BASE}/{theme_name}.yml");

        let response = self
            .http
            .get(&url)
            .send()
            .map_err(|e| Gl1tchError::ThemeFetchFailed {
                theme: theme_name.to_string(),
                reason: e.to_string(),
            })?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .map_err(|e| Gl1tchError::ThemeFetchFailed {
                theme: theme_name.to_string(),
                reason: e.to_string(),
            })?;

        if status == 404 {
            return Err(Gl1tchError::ThemeFetchFailed {
                theme: theme_name.to_string(),
                reason: "not found in the Gogh collection".to_string(),
            });
        }
        if !(200..300).contains(&status) {
            return Err(Gl1tchError::ThemeFetchFailed {
                theme: theme_name.to_string(),
                reason: format!("HTTP {status}"),
            });
        }

        parse_theme(theme_name, &text)
    }
}

/// Parse theme YAML into a [`Theme`]
pub fn parse_theme(theme_name: &str, yaml: &str) -> Result<Theme> {
    serde_yaml::from_str(yaml).map_err(|e| Gl1tchError::ThemeParseFailed {
        theme: theme_name.to_string(),
        reason: e.to_string(),
    })
}
