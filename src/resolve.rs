//! Hero detail resolution against the reference datasets
//!
//! Pure functions: the caller decides where `ReferenceData` comes from.

use crate::catalog::short_hero_key;
use crate::state::{Hero, HeroDetail, ReferenceData, ResolvedAbility, ResolvedItem};

const TALENT_MARKER: &str = "special_bonus";
const HIDDEN_ABILITY: &str = "generic_hidden";

/// Look up a per-hero sequence under the full key, then the short key.
fn lookup_by_hero<'a>(
    map: &'a std::collections::HashMap<String, Vec<String>>,
    hero_name: &str,
) -> &'a [String] {
    map.get(hero_name)
        .or_else(|| map.get(short_hero_key(hero_name)))
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

pub fn hero_ability_keys<'a>(reference: &'a ReferenceData, hero: &Hero) -> &'a [String] {
    lookup_by_hero(&reference.hero_abilities, &hero.name)
}

pub fn hero_item_keys<'a>(reference: &'a ReferenceData, hero: &Hero) -> &'a [String] {
    lookup_by_hero(&reference.popular_items, &hero.name)
}

pub fn is_displayable_ability(key: &str) -> bool {
    !key.is_empty() && !key.contains(TALENT_MARKER) && key != HIDDEN_ABILITY
}

/// Drop talents, hidden placeholders and empty keys; order is kept.
pub fn filter_display_abilities<S: AsRef<str>>(keys: &[S]) -> Vec<String> {
    keys.iter()
        .map(|key| AsRef::<str>::as_ref(key))
        .filter(|key| is_displayable_ability(key))
        .map(str::to_string)
        .collect()
}

pub fn resolve(hero: &Hero, reference: &ReferenceData) -> HeroDetail {
    let abilities = filter_display_abilities(hero_ability_keys(reference, hero))
        .into_iter()
        .map(|key| {
            let info = reference.abilities.get(&key).cloned().unwrap_or_default();
            ResolvedAbility { key, info }
        })
        .collect();

    let items = hero_item_keys(reference, hero)
        .iter()
        .map(|key| ResolvedItem {
            key: key.clone(),
            info: reference.items.get(key).cloned().unwrap_or_default(),
        })
        .collect();

    HeroDetail {
        hero: hero.clone(),
        abilities,
        items,
    }
}

/// `axe_berserkers_call` -> `Axe Berserkers Call`
pub fn format_ability_name(key: &str) -> String {
    let spaced = key.replace('_', " ");
    let mut out = String::with_capacity(spaced.len());
    let mut at_word_start = true;
    for ch in spaced.chars() {
        if at_word_start && ch.is_alphanumeric() {
            out.extend(ch.to_uppercase());
        } else {
            out.push(ch);
        }
        at_word_start = !ch.is_alphanumeric();
    }
    out
}

impl ResolvedAbility {
    pub fn display_name(&self) -> String {
        match self.info.display_name.as_deref() {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => format_ability_name(&self.key),
        }
    }

    pub fn description(&self) -> &str {
        self.info.description.as_deref().unwrap_or("")
    }
}

impl ResolvedItem {
    pub fn display_name(&self) -> &str {
        match self.info.display_name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => &self.key,
        }
    }
}
