//! Effects - side effects declared by the reducer

use crate::state::Hero;

#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    /// Fetch the hero list
    LoadHeroes,
    /// Fetch every reference dataset once and keep the result in state
    LoadReference,
    /// Fetch the reference datasets for this request only and resolve the hero
    ResolveHero { request_id: u64, hero: Hero },
}
