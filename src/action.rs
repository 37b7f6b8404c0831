//! Actions: user intents and async results

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::state::{Hero, HeroDetail, ReferenceData};

#[derive(tui_dispatch::Action, Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[action(infer_categories)]
pub enum Action {
    /// Startup: load heroes (and reference data when loading once)
    Init,

    // ===== Heroes category =====
    /// Intent: (re)load the hero list
    HeroesFetch,
    /// Result: hero list loaded, in API order
    HeroesDidLoad(Vec<Hero>),
    /// Result: hero list failed
    HeroesDidError(String),

    // ===== Reference category =====
    ReferenceDidLoad(ReferenceData),
    ReferenceDidError(String),

    // ===== Selection category =====
    /// Move the grid cursor by a signed number of cards
    SelectionMove(i16),
    SelectionJumpTop,
    SelectionJumpBottom,
    /// Select a card by its position in the visible grid
    SelectionSet(usize),

    // ===== Search category =====
    SearchStart,
    SearchCancel,
    SearchSubmit,
    SearchInput(char),
    SearchBackspace,

    // ===== Detail category =====
    /// Open the modal for the selected card
    DetailOpen,
    DetailClose,
    DetailScroll(i16),
    /// Result: per-request resolution finished
    DetailDidLoad { request_id: u64, detail: HeroDetail },
    DetailDidError { request_id: u64, error: String },

    // ===== UI category =====
    UiResize(u16, u16),

    // ===== Uncategorized (global) =====
    Tick,
    Quit,
}
