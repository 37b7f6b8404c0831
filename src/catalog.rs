//! Hero catalog: key handling and name filtering

use crate::state::Hero;

pub const HERO_KEY_PREFIX: &str = "npc_dota_hero_";

/// Strip the `npc_dota_hero_` prefix if present.
pub fn short_hero_key(name: &str) -> &str {
    name.strip_prefix(HERO_KEY_PREFIX).unwrap_or(name)
}

/// Case-insensitive substring match on the localized name.
///
/// The query is trimmed; an empty query matches everything.
pub fn matches_query(hero: &Hero, query: &str) -> bool {
    let query = query.trim().to_lowercase();
    query.is_empty() || hero.localized_name.to_lowercase().contains(&query)
}

/// Indices of the heroes that match `query`, in list order.
pub fn filter_indices(heroes: &[Hero], query: &str) -> Vec<usize> {
    heroes
        .iter()
        .enumerate()
        .filter(|(_, hero)| matches_query(hero, query))
        .map(|(idx, _)| idx)
        .collect()
}

pub fn filter<'a>(heroes: &'a [Hero], query: &str) -> Vec<&'a Hero> {
    filter_indices(heroes, query)
        .into_iter()
        .map(|idx| &heroes[idx])
        .collect()
}
