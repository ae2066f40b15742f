//! Run configuration from the environment
//!
//! The hosting environment (a CI trigger, typically a GitHub Action) supplies
//! everything through `INPUT_*` environment variables, read once at startup.
//! Required: `INPUT_GH_TOKEN`, `INPUT_WAKATIME_API_KEY`. Everything else has
//! a default.

use crate::error::{Gl1tchError, Result};

/// String values treated as "true" when parsing boolean toggles
const TRUTHY: [&str; 5] = ["true", "1", "t", "y", "yes"];

/// Default Gogh theme for the card
const DEFAULT_THEME: &str = "Aco";

/// Fixed author/committer identity used for every automated commit.
///
/// Explicit configuration handed to the publisher at construction, never
/// process-global git state, so tests can substitute their own identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BotIdentity {
    pub name: String,
    pub email: String,
}

impl BotIdentity {
    pub const DEFAULT_NAME: &'static str = "gl1tch-bot";
    pub const DEFAULT_EMAIL: &'static str =
        "41898282+github-actions[bot]@users.noreply.github.com";
}

impl Default for BotIdentity {
    fn default() -> Self {
        Self {
            name: Self::DEFAULT_NAME.to_string(),
            email: Self::DEFAULT_EMAIL.to_string(),
        }
    }
}

/// Optional profile field overrides shown on the card
#[derive(Debug, Clone, Default)]
pub struct FieldOverrides {
    pub bio: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
}

/// Display toggles controlling which sections the card shows
#[derive(Debug, Clone)]
pub struct SectionToggles {
    pub show_editors: bool,
    pub show_commit: bool,
    pub show_language: bool,
    pub show_lines_of_code: bool,
}

impl Default for SectionToggles {
    fn default() -> Self {
        Self {
            show_editors: true,
            show_commit: true,
            show_language: true,
            show_lines_of_code: false,
        }
    }
}

/// Full run configuration, resolved once at startup
#[derive(Debug, Clone)]
pub struct Config {
    /// GitHub token for API access and the publish remote
    pub github_token: String,
    /// WakaTime API key for coding stats
    pub wakatime_api_key: String,
    /// Gogh theme name for the card palette
    pub theme_name: String,
    pub fields: FieldOverrides,
    pub sections: SectionToggles,
    pub identity: BotIdentity,
}

impl Config {
    /// Load configuration from process environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through a variable lookup function
    ///
    /// Tests pass a map-backed lookup instead of mutating process state.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &str| {
            lookup(name)
                .filter(|v| !v.is_empty())
                .ok_or_else(|| Gl1tchError::MissingEnv {
                    name: name.to_string(),
                })
        };

        let toggle = |name: &str, default: bool| match lookup(name) {
            Some(value) => parse_truthy(&value),
            None => default,
        };

        let defaults = SectionToggles::default();

        Ok(Self {
            github_token: required("INPUT_GH_TOKEN")?,
            wakatime_api_key: required("INPUT_WAKATIME_API_KEY")?,
            theme_name: lookup("INPUT_THEME_NAME").unwrap_or_else(|| DEFAULT_THEME.to_string()),
            fields: FieldOverrides {
                bio: lookup("INPUT_FIELD_BIO"),
                email: lookup("INPUT_FIELD_EMAIL"),
                website: lookup("INPUT_FIELD_WEBSITE"),
            },
            sections: SectionToggles {
                show_editors: toggle("INPUT_SHOW_EDITORS", defaults.show_editors),
                show_commit: toggle("INPUT_SHOW_COMMIT", defaults.show_commit),
                show_language: toggle("INPUT_SHOW_LANGUAGE", defaults.show_language),
                show_lines_of_code: toggle(
                    "INPUT_SHOW_LINES_OF_CODE",
                    defaults.show_lines_of_code,
                ),
            },
            identity: BotIdentity {
                name: lookup("INPUT_COMMITTER_NAME")
                    .unwrap_or_else(|| BotIdentity::DEFAULT_NAME.to_string()),
                email: lookup("INPUT_COMMITTER_EMAIL")
                    .unwrap_or_else(|| BotIdentity::DEFAULT_EMAIL.to_string()),
            },
        })
    }
}

/// Parse a boolean toggle the way the action inputs define truthiness
fn parse_truthy(value: &str) -> bool {
    TRUTHY.contains(&value.to_lowercase().as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from<'a>(pairs: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn test_minimal_config() {
        let config = Config::from_lookup(lookup_from(&[
            ("INPUT_GH_TOKEN", "ghp_test"),
            ("INPUT_WAKATIME_API_KEY", "waka_test"),
        ]))
        .unwrap();

        assert_eq!(config.github_token, "ghp_test");
        assert_eq!(config.theme_name, "Aco");
        assert_eq!(config.identity, BotIdentity::default());
        assert!(config.sections.show_editors);
        assert!(config.sections.show_commit);
        assert!(config.sections.show_language);
        assert!(!config.sections.show_lines_of_code);
        assert!(config.fields.bio.is_none());
    }

    #[test]
    fn test_missing_github_token() {
        let result = Config::from_lookup(lookup_from(&[("INPUT_WAKATIME_API_KEY", "waka")]));
        assert!(matches!(
            result.unwrap_err(),
            Gl1tchError::MissingEnv { name } if name == "INPUT_GH_TOKEN"
        ));
    }

    #[test]
    fn test_missing_wakatime_key() {
        let result = Config::from_lookup(lookup_from(&[("INPUT_GH_TOKEN", "ghp")]));
        assert!(matches!(
            result.unwrap_err(),
            Gl1tchError::MissingEnv { name } if name == "INPUT_WAKATIME_API_KEY"
        ));
    }

    #[test]
    fn test_empty_required_value_is_missing() {
        let result = Config::from_lookup(lookup_from(&[
            ("INPUT_GH_TOKEN", ""),
            ("INPUT_WAKATIME_API_KEY", "waka"),
        ]));
        assert!(matches!(result.unwrap_err(), Gl1tchError::MissingEnv { .. }));
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("INPUT_GH_TOKEN", "ghp"),
            ("INPUT_WAKATIME_API_KEY", "waka"),
            ("INPUT_THEME_NAME", "Dracula"),
            ("INPUT_FIELD_BIO", "rustacean"),
            ("INPUT_SHOW_COMMIT", "no"),
            ("INPUT_SHOW_LINES_OF_CODE", "YES"),
            ("INPUT_COMMITTER_NAME", "card-bot"),
            ("INPUT_COMMITTER_EMAIL", "bot@example.com"),
        ]))
        .unwrap();

        assert_eq!(config.theme_name, "Dracula");
        assert_eq!(config.fields.bio.as_deref(), Some("rustacean"));
        assert!(!config.sections.show_commit);
        assert!(config.sections.show_lines_of_code);
        assert_eq!(config.identity.name, "card-bot");
        assert_eq!(config.identity.email, "bot@example.com");
    }

    #[test]
    fn test_parse_truthy() {
        for value in ["true", "True", "1", "t", "y", "YES"] {
            assert!(parse_truthy(value), "{value} should be truthy");
        }
        for value in ["false", "0", "no", "", "on"] {
            assert!(!parse_truthy(value), "{value} should not be truthy");
        }
    }
}
