//! Reducer - pure function: (state, action) -> DispatchResult

use tui_dispatch::{DataResource, DispatchResult};

use crate::action::Action;
use crate::config::ReferencePolicy;
use crate::effect::Effect;
use crate::resolve;
use crate::state::{AppState, Hero};

pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
    match action {
        Action::Init => {
            state.heroes = DataResource::Loading;
            let mut effects = vec![Effect::LoadHeroes];
            if state.reference_policy == ReferencePolicy::LoadOnce {
                state.reference = DataResource::Loading;
                effects.push(Effect::LoadReference);
            }
            DispatchResult::changed_with_many(effects)
        }

        // ===== Heroes =====
        Action::HeroesFetch => {
            if state.heroes.is_loading() {
                return DispatchResult::unchanged();
            }
            state.heroes = DataResource::Loading;
            DispatchResult::changed_with(Effect::LoadHeroes)
        }

        Action::HeroesDidLoad(heroes) => {
            state.heroes = DataResource::Loaded(heroes);
            state.selected_index = 0;
            state.rebuild_filtered();
            DispatchResult::changed()
        }

        Action::HeroesDidError(error) => {
            state.heroes = DataResource::Failed(error);
            state.filtered_indices.clear();
            state.selected_index = 0;
            DispatchResult::changed()
        }

        // ===== Reference data =====
        Action::ReferenceDidLoad(reference) => {
            state.reference = DataResource::Loaded(reference);
            resolve_pending(state);
            DispatchResult::changed()
        }

        Action::ReferenceDidError(error) => {
            if state.detail.open && state.detail.view.is_loading() {
                state.detail.view = DataResource::Failed(error.clone());
            }
            state.reference = DataResource::Failed(error);
            DispatchResult::changed()
        }

        // ===== Grid selection =====
        Action::SelectionMove(delta) => {
            if state.filtered_indices.is_empty() {
                return DispatchResult::unchanged();
            }
            let last = state.filtered_indices.len() as i64 - 1;
            let next = (state.selected_index as i64 + delta as i64).clamp(0, last);
            changed_if(state.set_selected_index(next as usize))
        }

        Action::SelectionJumpTop => changed_if(state.set_selected_index(0)),

        Action::SelectionJumpBottom => {
            let last = state.filtered_indices.len().saturating_sub(1);
            changed_if(state.set_selected_index(last))
        }

        Action::SelectionSet(index) => changed_if(state.set_selected_index(index)),

        // ===== Search =====
        Action::SearchStart => {
            if state.search.active {
                return DispatchResult::unchanged();
            }
            state.search.active = true;
            DispatchResult::changed()
        }

        Action::SearchCancel => {
            state.search.active = false;
            state.search.query.clear();
            state.rebuild_filtered();
            DispatchResult::changed()
        }

        Action::SearchSubmit => {
            state.search.active = false;
            DispatchResult::changed()
        }

        Action::SearchInput(ch) => {
            state.search.query.push(ch);
            state.selected_index = 0;
            state.rebuild_filtered();
            DispatchResult::changed()
        }

        Action::SearchBackspace => {
            if state.search.query.pop().is_none() {
                return DispatchResult::unchanged();
            }
            state.selected_index = 0;
            state.rebuild_filtered();
            DispatchResult::changed()
        }

        // ===== Detail modal =====
        Action::DetailOpen => {
            let Some(hero) = state.selected_hero().cloned() else {
                return DispatchResult::unchanged();
            };
            open_detail(state, hero)
        }

        Action::DetailClose => {
            if !state.detail.open {
                return DispatchResult::unchanged();
            }
            state.detail.open = false;
            state.detail.hero = None;
            state.detail.view = DataResource::Empty;
            state.detail.scroll = 0;
            // anything still in flight belongs to the closed modal
            state.detail.request_id = state.detail.request_id.wrapping_add(1);
            DispatchResult::changed()
        }

        Action::DetailScroll(delta) => {
            if !state.detail.open {
                return DispatchResult::unchanged();
            }
            let next = if delta < 0 {
                state.detail.scroll.saturating_sub(delta.unsigned_abs())
            } else {
                state.detail.scroll.saturating_add(delta as u16)
            };
            if next == state.detail.scroll {
                return DispatchResult::unchanged();
            }
            state.detail.scroll = next;
            DispatchResult::changed()
        }

        Action::DetailDidLoad { request_id, detail } => {
            if !is_current_request(state, request_id) {
                return DispatchResult::unchanged();
            }
            state.detail.view = DataResource::Loaded(detail);
            DispatchResult::changed()
        }

        Action::DetailDidError { request_id, error } => {
            if !is_current_request(state, request_id) {
                return DispatchResult::unchanged();
            }
            state.detail.view = DataResource::Failed(error);
            DispatchResult::changed()
        }

        // ===== UI =====
        Action::UiResize(width, height) => {
            if state.terminal_size != (width, height) {
                state.terminal_size = (width, height);
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::Tick => {
            if state.is_loading() {
                state.tick = state.tick.wrapping_add(1);
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::Quit => DispatchResult::unchanged(),
    }
}

fn changed_if(changed: bool) -> DispatchResult<Effect> {
    if changed {
        DispatchResult::changed()
    } else {
        DispatchResult::unchanged()
    }
}

fn open_detail(state: &mut AppState, hero: Hero) -> DispatchResult<Effect> {
    state.detail.open = true;
    state.detail.request_id = state.detail.request_id.wrapping_add(1);
    state.detail.hero = Some(hero.clone());
    state.detail.scroll = 0;

    match state.reference_policy {
        ReferencePolicy::PerRequest => {
            state.detail.view = DataResource::Loading;
            DispatchResult::changed_with(Effect::ResolveHero {
                request_id: state.detail.request_id,
                hero,
            })
        }
        ReferencePolicy::LoadOnce => {
            if state.reference.is_empty() {
                state.reference = DataResource::Loading;
                state.detail.view = DataResource::Loading;
                return DispatchResult::changed_with(Effect::LoadReference);
            }
            state.detail.view = match &state.reference {
                DataResource::Loaded(reference) => {
                    DataResource::Loaded(resolve::resolve(&hero, reference))
                }
                DataResource::Failed(error) => DataResource::Failed(error.clone()),
                // resolved by resolve_pending once the datasets arrive
                _ => DataResource::Loading,
            };
            DispatchResult::changed()
        }
    }
}

fn resolve_pending(state: &mut AppState) {
    if !state.detail.open || !state.detail.view.is_loading() {
        return;
    }
    if state.reference_policy != ReferencePolicy::LoadOnce {
        return;
    }
    let (Some(hero), DataResource::Loaded(reference)) = (&state.detail.hero, &state.reference)
    else {
        return;
    };
    state.detail.view = DataResource::Loaded(resolve::resolve(hero, reference));
}

fn is_current_request(state: &AppState, request_id: u64) -> bool {
    let current = state.detail.open && request_id == state.detail.request_id;
    if !current {
        tracing::debug!(
            request_id,
            current = state.detail.request_id,
            "discarding stale detail result"
        );
    }
    current
}
