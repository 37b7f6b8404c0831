//! Runtime configuration resolved from the command line

use std::path::PathBuf;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub const DEFAULT_STATS_URL: &str = "https://api.opendota.com/api/heroStats";
pub const DEFAULT_CONSTANTS_URL: &str =
    "https://raw.githubusercontent.com/odota/dotaconstants/master/build";

/// Environment variable holding the tracing filter directive.
pub const LOG_FILTER_ENV: &str = "HERODEX_LOG";

/// When the reference datasets are fetched.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum ReferencePolicy {
    /// Fetch once at startup and reuse for every hero.
    #[default]
    LoadOnce,
    /// Fetch again on every hero selection.
    PerRequest,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Endpoints {
    pub stats_url: String,
    pub constants_url: String,
}

impl Endpoints {
    pub fn new(stats_url: impl Into<String>, constants_url: impl Into<String>) -> Self {
        Self {
            stats_url: stats_url.into(),
            constants_url: constants_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn hero_abilities_url(&self) -> String {
        format!("{}/hero_abilities.json", self.constants_url)
    }

    pub fn abilities_url(&self) -> String {
        format!("{}/abilities.json", self.constants_url)
    }

    pub fn items_url(&self) -> String {
        format!("{}/items.json", self.constants_url)
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Self::new(DEFAULT_STATS_URL, DEFAULT_CONSTANTS_URL)
    }
}

#[derive(Clone, Debug, Default)]
pub struct Config {
    pub endpoints: Endpoints,
    pub reference_policy: ReferencePolicy,
    /// Local JSON file mapping hero keys to popular item keys.
    pub popular_items: Option<PathBuf>,
    pub log_file: Option<PathBuf>,
}
