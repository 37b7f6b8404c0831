//! Application state - single source of truth

use std::collections::HashMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tui_dispatch::DataResource;
use tui_dispatch_debug::debug::{ron_string, DebugSection, DebugState};

use crate::catalog;
use crate::config::ReferencePolicy;

/// Spinner frame interval while anything is loading.
pub const LOADING_ANIM_TICK_MS: u64 = 120;

/// A playable hero as returned by the stats API.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Hero {
    #[serde(default)]
    pub id: u32,
    /// Internal key, e.g. `npc_dota_hero_axe`.
    pub name: String,
    pub localized_name: String,
    #[serde(default)]
    pub roles: Vec<String>,
    #[serde(default)]
    pub primary_attr: Option<String>,
    #[serde(default)]
    pub attack_type: Option<String>,
}

impl Hero {
    pub fn roles_label(&self) -> String {
        if self.roles.is_empty() {
            "Roles: N/A".to_string()
        } else {
            format!("Roles: {}", self.roles.join(", "))
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct AbilityInfo {
    pub display_name: Option<String>,
    pub description: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ItemInfo {
    pub display_name: Option<String>,
    pub cost: Option<u32>,
}

/// Static reference datasets used to resolve a hero's detail view.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ReferenceData {
    /// Hero key (full or short form) -> ordered ability keys.
    pub hero_abilities: HashMap<String, Vec<String>>,
    pub abilities: HashMap<String, AbilityInfo>,
    pub items: HashMap<String, ItemInfo>,
    /// Hero key -> ordered popular item keys.
    pub popular_items: HashMap<String, Vec<String>>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ResolvedAbility {
    pub key: String,
    pub info: AbilityInfo,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ResolvedItem {
    pub key: String,
    pub info: ItemInfo,
}

/// Everything the detail modal shows for one hero.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct HeroDetail {
    pub hero: Hero,
    pub abilities: Vec<ResolvedAbility>,
    pub items: Vec<ResolvedItem>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SearchState {
    pub active: bool,
    pub query: String,
}

/// Detail modal lifecycle: Empty (idle) → Loading → Loaded/Failed
#[derive(Clone, Debug, Serialize, Deserialize, JsonSchema)]
pub struct DetailPanel {
    pub open: bool,
    pub hero: Option<Hero>,
    /// Bumped on every selection and close; results tagged with an older
    /// id are dropped.
    pub request_id: u64,
    pub view: DataResource<HeroDetail>,
    pub scroll: u16,
}

impl Default for DetailPanel {
    fn default() -> Self {
        Self {
            open: false,
            hero: None,
            request_id: 0,
            view: DataResource::Empty,
            scroll: 0,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppState {
    pub terminal_size: (u16, u16),
    pub reference_policy: ReferencePolicy,

    /// Full hero list in API order; never filtered in place.
    pub heroes: DataResource<Vec<Hero>>,
    /// Indices into the full list that match the current query.
    pub filtered_indices: Vec<usize>,
    /// Position within `filtered_indices`.
    pub selected_index: usize,
    pub search: SearchState,

    pub reference: DataResource<ReferenceData>,
    pub detail: DetailPanel,

    pub tick: u64,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(ReferencePolicy::default())
    }
}

impl AppState {
    pub fn new(reference_policy: ReferencePolicy) -> Self {
        Self {
            terminal_size: (80, 24),
            reference_policy,
            heroes: DataResource::Empty,
            filtered_indices: Vec::new(),
            selected_index: 0,
            search: SearchState::default(),
            reference: DataResource::Empty,
            detail: DetailPanel::default(),
            tick: 0,
        }
    }

    pub fn all_heroes(&self) -> &[Hero] {
        self.heroes.data().map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn visible_heroes(&self) -> Vec<&Hero> {
        let all = self.all_heroes();
        self.filtered_indices
            .iter()
            .filter_map(|idx| all.get(*idx))
            .collect()
    }

    pub fn selected_hero(&self) -> Option<&Hero> {
        self.filtered_indices
            .get(self.selected_index)
            .and_then(|idx| self.all_heroes().get(*idx))
    }

    pub fn set_selected_index(&mut self, index: usize) -> bool {
        if self.filtered_indices.is_empty() {
            self.selected_index = 0;
            return false;
        }
        let bounded = index.min(self.filtered_indices.len() - 1);
        if bounded != self.selected_index {
            self.selected_index = bounded;
            return true;
        }
        false
    }

    /// Recompute the visible subset from the full list.
    pub fn rebuild_filtered(&mut self) {
        self.filtered_indices = catalog::filter_indices(self.all_heroes(), &self.search.query);
        if self.selected_index >= self.filtered_indices.len() {
            self.selected_index = 0;
        }
    }

    pub fn is_loading(&self) -> bool {
        self.heroes.is_loading() || self.reference.is_loading() || self.detail.view.is_loading()
    }
}

impl DebugState for AppState {
    fn debug_sections(&self) -> Vec<DebugSection> {
        vec![
            DebugSection::new("Catalog")
                .entry("total", ron_string(&self.all_heroes().len()))
                .entry("filtered", ron_string(&self.filtered_indices.len()))
                .entry("selected", ron_string(&self.selected_index))
                .entry("search", ron_string(&self.search.query))
                .entry("search_active", ron_string(&self.search.active))
                .entry("error", ron_string(&self.heroes.error())),
            DebugSection::new("Reference")
                .entry("policy", ron_string(&self.reference_policy))
                .entry("loading", ron_string(&self.reference.is_loading()))
                .entry("loaded", ron_string(&self.reference.is_loaded()))
                .entry("error", ron_string(&self.reference.error())),
            DebugSection::new("Detail")
                .entry("open", ron_string(&self.detail.open))
                .entry(
                    "hero",
                    ron_string(&self.detail.hero.as_ref().map(|hero| hero.name.clone())),
                )
                .entry("request_id", ron_string(&self.detail.request_id))
                .entry("loading", ron_string(&self.detail.view.is_loading()))
                .entry("error", ron_string(&self.detail.view.error())),
        ]
    }
}
