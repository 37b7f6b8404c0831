//! Steam CDN image locations

use crate::catalog::short_hero_key;

const CDN_BASE: &str = "https://cdn.cloudflare.steamstatic.com/apps/dota2/images";

pub fn hero_image_url(hero_name: &str) -> String {
    format!("{CDN_BASE}/heroes/{}_full.png", short_hero_key(hero_name))
}

pub fn ability_icon_url(ability_key: &str) -> String {
    format!("{CDN_BASE}/abilities/{ability_key}_md.png")
}

pub fn item_icon_url(item_key: &str) -> String {
    format!("{CDN_BASE}/items/{item_key}_lg.png")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls_use_short_hero_key_and_size_suffixes() {
        assert!(hero_image_url("npc_dota_hero_axe").ends_with("/heroes/axe_full.png"));
        assert!(ability_icon_url("axe_culling_blade").ends_with("/abilities/axe_culling_blade_md.png"));
        assert!(item_icon_url("blink").ends_with("/items/blink_lg.png"));
    }
}
