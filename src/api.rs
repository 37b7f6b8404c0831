//! OpenDota stats API and dotaconstants reference data client

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::{Config, Endpoints};
use crate::error::FetchError;
use crate::state::{AbilityInfo, Hero, ItemInfo, ReferenceData};

#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    endpoints: Endpoints,
    popular_items: Option<PathBuf>,
}

impl ApiClient {
    pub fn new(endpoints: Endpoints, popular_items: Option<PathBuf>) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoints,
            popular_items,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.endpoints.clone(), config.popular_items.clone())
    }

    /// Fetch every hero, keeping the API's order.
    pub async fn fetch_heroes(&self) -> Result<Vec<Hero>, FetchError> {
        let heroes: Vec<Hero> = self.fetch_json(&self.endpoints.stats_url).await?;
        tracing::info!(count = heroes.len(), "loaded heroes");
        Ok(heroes)
    }

    /// Load all reference datasets concurrently; the first failure wins.
    pub async fn fetch_reference(&self) -> Result<ReferenceData, FetchError> {
        let hero_abilities_url = self.endpoints.hero_abilities_url();
        let abilities_url = self.endpoints.abilities_url();
        let items_url = self.endpoints.items_url();

        let (hero_abilities, abilities, items, popular_items) = tokio::try_join!(
            self.fetch_json::<HashMap<String, Value>>(&hero_abilities_url),
            self.fetch_json::<HashMap<String, Value>>(&abilities_url),
            self.fetch_json::<HashMap<String, Value>>(&items_url),
            load_popular_items(self.popular_items.as_deref()),
        )?;

        let reference = ReferenceData {
            hero_abilities: parse_hero_abilities(hero_abilities),
            abilities: parse_abilities(abilities),
            items: parse_items(items),
            popular_items,
        };
        tracing::info!(
            hero_abilities = reference.hero_abilities.len(),
            abilities = reference.abilities.len(),
            items = reference.items.len(),
            popular_items = reference.popular_items.len(),
            "loaded reference data"
        );
        Ok(reference)
    }

    async fn fetch_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, FetchError> {
        let bytes = self.fetch_bytes(url).await?;
        serde_json::from_slice(&bytes).map_err(|source| FetchError::Parse {
            url: url.to_string(),
            source,
        })
    }

    async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let request_error = |source: reqwest::Error| FetchError::Request {
            url: url.to_string(),
            source,
        };
        let response = self.http.get(url).send().await.map_err(request_error)?;
        let status = response.status();
        if !status.is_success() {
            tracing::warn!(%url, %status, "request failed");
            return Err(FetchError::Status {
                url: url.to_string(),
                status,
            });
        }
        let bytes = response.bytes().await.map_err(request_error)?;
        Ok(bytes.to_vec())
    }
}

/// Read the hero -> popular items mapping; no file means no data.
pub async fn load_popular_items(
    path: Option<&Path>,
) -> Result<HashMap<String, Vec<String>>, FetchError> {
    let Some(path) = path else {
        return Ok(HashMap::new());
    };
    let display = path.display().to_string();
    let bytes = tokio::fs::read(path).await.map_err(|source| FetchError::Io {
        path: display.clone(),
        source,
    })?;
    serde_json::from_slice(&bytes).map_err(|source| FetchError::Parse {
        url: display,
        source,
    })
}

/// `{hero: {"abilities": [..]}}` -> `{hero: [..]}`.
///
/// Entries without an ability array are dropped; non-string members become
/// empty keys so the display filter removes them.
pub fn parse_hero_abilities(raw: HashMap<String, Value>) -> HashMap<String, Vec<String>> {
    raw.into_iter()
        .filter_map(|(hero, entry)| {
            let list = entry.get("abilities")?.as_array()?;
            let keys = list
                .iter()
                .map(|key| key.as_str().unwrap_or_default().to_string())
                .collect();
            Some((hero, keys))
        })
        .collect()
}

pub fn parse_abilities(raw: HashMap<String, Value>) -> HashMap<String, AbilityInfo> {
    raw.into_iter()
        .map(|(key, entry)| {
            let info = AbilityInfo {
                display_name: string_field(&entry, "dname"),
                description: string_field(&entry, "desc"),
            };
            (key, info)
        })
        .collect()
}

pub fn parse_items(raw: HashMap<String, Value>) -> HashMap<String, ItemInfo> {
    raw.into_iter()
        .map(|(key, entry)| {
            let cost = entry
                .get("cost")
                .and_then(Value::as_u64)
                .and_then(|cost| u32::try_from(cost).ok());
            let info = ItemInfo {
                display_name: string_field(&entry, "dname"),
                cost,
            };
            (key, info)
        })
        .collect()
}

fn string_field(value: &Value, field: &str) -> Option<String> {
    value
        .get(field)
        .and_then(Value::as_str)
        .map(|s| s.to_string())
}
