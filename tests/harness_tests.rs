//! Store, component and render flows using EffectStoreTestHarness

use std::collections::HashMap;

use herodex::{
    action::Action,
    components::{Component, HeroGrid, HeroGridProps, HeroModal, HeroModalProps},
    config::ReferencePolicy,
    effect::Effect,
    reducer::reducer,
    resolve,
    state::{AbilityInfo, AppState, Hero, ReferenceData},
};
use tui_dispatch::testing::*;
use tui_dispatch::NumericComponentId;

fn hero(name: &str, localized: &str, roles: &[&str]) -> Hero {
    Hero {
        name: format!("npc_dota_hero_{name}"),
        localized_name: localized.into(),
        roles: roles.iter().map(|r| r.to_string()).collect(),
        ..Default::default()
    }
}

fn roster() -> Vec<Hero> {
    vec![
        hero("axe", "Axe", &["Initiator", "Durable"]),
        hero("lina", "Lina", &["Support", "Nuker"]),
        hero("tiny", "Tiny", &[]),
    ]
}

fn reference() -> ReferenceData {
    ReferenceData {
        hero_abilities: HashMap::from([
            (
                "npc_dota_hero_axe".to_string(),
                vec![
                    "axe_berserkers_call".to_string(),
                    "special_bonus_strength_8".to_string(),
                    "axe_culling_blade".to_string(),
                ],
            ),
            (
                "lina".to_string(),
                vec!["lina_dragon_slave".to_string(), "generic_hidden".to_string()],
            ),
        ]),
        abilities: HashMap::from([(
            "axe_culling_blade".to_string(),
            AbilityInfo {
                display_name: Some("Culling Blade".into()),
                description: Some("Executes low-health enemies.".into()),
            },
        )]),
        ..Default::default()
    }
}

/// Harness with the roster loaded and startup effects drained.
macro_rules! started {
    ($policy:expr) => {{
        let mut harness = EffectStoreTestHarness::new(AppState::new($policy), reducer);
        harness.dispatch_collect(Action::Init);
        harness.drain_effects();
        harness.complete_action(Action::HeroesDidLoad(roster()));
        harness.process_emitted();
        harness
    }};
}

fn request_id_of(effect: &Effect) -> u64 {
    match effect {
        Effect::ResolveHero { request_id, .. } => *request_id,
        other => panic!("unexpected effect {other:?}"),
    }
}

// ============================================================================
// Startup
// ============================================================================

#[test]
fn test_startup_flow() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);

    harness.dispatch_collect(Action::Init);
    harness.assert_state(|s| s.heroes.is_loading());
    let effects = harness.drain_effects();
    effects.effects_count(2);
    effects.effects_first_matches(|e| matches!(e, Effect::LoadHeroes));

    harness.complete_action(Action::HeroesDidLoad(roster()));
    harness.complete_action(Action::ReferenceDidLoad(reference()));
    let (changed, total) = harness.process_emitted();
    assert_eq!(total, 2);
    assert_eq!(changed, 2);

    harness.assert_state(|s| s.visible_heroes().len() == 3);
    harness.assert_state(|s| s.reference.is_loaded());
}

#[test]
fn test_hero_list_failure_renders_error() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);
    let mut grid = HeroGrid::new();

    harness.dispatch_collect(Action::Init);
    harness.complete_action(Action::HeroesDidError(
        "https://api.opendota.com/api/heroStats returned HTTP 500 Internal Server Error".into(),
    ));
    harness.process_emitted();

    harness.assert_state(|s| s.heroes.is_failed());
    harness.assert_state(|s| s.visible_heroes().is_empty());

    let output = harness.render_plain(120, 10, |frame, area, state| {
        grid.render(
            frame,
            area,
            HeroGridProps {
                state,
                is_focused: true,
            },
        );
    });
    assert!(output.contains("Error loading heroes:"));
    assert!(output.contains("HTTP 500"));
}

#[test]
fn test_retry_after_failure() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);
    let mut grid = HeroGrid::new();

    harness.dispatch_collect(Action::Init);
    harness.drain_effects();
    harness.complete_action(Action::HeroesDidError("timeout".into()));
    harness.process_emitted();

    let actions = harness.send_keys::<NumericComponentId, _, _>("r", |state, event| {
        grid.handle_event(
            &event.kind,
            HeroGridProps {
                state,
                is_focused: true,
            },
        )
        .into_iter()
        .collect::<Vec<_>>()
    });
    actions.assert_first(Action::HeroesFetch);

    harness.dispatch_collect(Action::HeroesFetch);
    harness.assert_state(|s| s.heroes.is_loading());
    let effects = harness.drain_effects();
    effects.effects_all_match(|e| matches!(e, Effect::LoadHeroes));
}

// ============================================================================
// Detail modal, load-once policy
// ============================================================================

#[test]
fn test_detail_resolves_from_loaded_reference() {
    let mut harness = started!(ReferencePolicy::LoadOnce);
    harness.complete_action(Action::ReferenceDidLoad(reference()));
    harness.process_emitted();

    harness.dispatch_collect(Action::DetailOpen);
    harness.drain_effects().effects_empty();

    harness.assert_state(|s| s.detail.open);
    harness.assert_state(|s| {
        let detail = s.detail.view.data().unwrap();
        let names: Vec<_> = detail.abilities.iter().map(|a| a.display_name()).collect();
        names == vec!["Axe Berserkers Call".to_string(), "Culling Blade".to_string()]
    });
    harness.assert_state(|s| s.detail.view.data().unwrap().items.is_empty());
}

#[test]
fn test_detail_waits_for_pending_reference() {
    let mut harness = started!(ReferencePolicy::LoadOnce);

    // Lina is second; move right once
    harness.dispatch_collect(Action::SelectionMove(1));
    harness.dispatch_collect(Action::DetailOpen);
    harness.assert_state(|s| s.detail.view.is_loading());
    harness.drain_effects().effects_empty();

    harness.complete_action(Action::ReferenceDidLoad(reference()));
    harness.process_emitted();

    harness.assert_state(|s| {
        let detail = s.detail.view.data().unwrap();
        detail.hero.localized_name == "Lina"
            && detail.abilities.len() == 1
            && detail.abilities[0].key == "lina_dragon_slave"
    });
}

#[test]
fn test_reference_failure_shows_in_modal() {
    let mut harness = started!(ReferencePolicy::LoadOnce);
    let mut modal = HeroModal::new();

    harness.dispatch_collect(Action::DetailOpen);
    harness.complete_action(Action::ReferenceDidError("items.json returned HTTP 404".into()));
    harness.process_emitted();

    harness.assert_state(|s| s.detail.view.is_failed());

    let output = harness.render_plain(100, 30, |frame, area, state| {
        modal.render(
            frame,
            area,
            HeroModalProps {
                detail: &state.detail,
                tick: state.tick,
                is_focused: true,
            },
        );
    });
    assert!(output.contains("Error loading hero details"));
    assert!(output.contains("Roles: Initiator, Durable"));
}

// ============================================================================
// Detail modal, per-request policy
// ============================================================================

#[test]
fn test_stale_detail_never_overwrites_newer_selection() {
    let mut harness = started!(ReferencePolicy::PerRequest);

    // Open Axe, close, open Lina: two requests in flight
    harness.dispatch_collect(Action::DetailOpen);
    let first = harness.drain_effects();
    first.effects_count(1);
    let axe_request = request_id_of(&first[0]);

    harness.dispatch_collect(Action::DetailClose);
    harness.dispatch_collect(Action::SelectionMove(1));
    harness.dispatch_collect(Action::DetailOpen);
    let second = harness.drain_effects();
    let lina_request = match &second[0] {
        Effect::ResolveHero { request_id, hero } => {
            assert_eq!(hero.localized_name, "Lina");
            *request_id
        }
        other => panic!("unexpected effect {other:?}"),
    };
    assert_ne!(axe_request, lina_request);

    // Lina settles first, then Axe's late result arrives
    let lina = roster()[1].clone();
    let axe = roster()[0].clone();
    harness.complete_action(Action::DetailDidLoad {
        request_id: lina_request,
        detail: resolve::resolve(&lina, &reference()),
    });
    harness.complete_action(Action::DetailDidLoad {
        request_id: axe_request,
        detail: resolve::resolve(&axe, &reference()),
    });
    let (changed, total) = harness.process_emitted();
    assert_eq!(total, 2);
    assert_eq!(changed, 1);

    harness.assert_state(|s| s.detail.view.data().unwrap().hero.localized_name == "Lina");
}

#[test]
fn test_result_after_close_is_dropped() {
    let mut harness = started!(ReferencePolicy::PerRequest);

    harness.dispatch_collect(Action::DetailOpen);
    let request_id = request_id_of(&harness.drain_effects()[0]);
    harness.dispatch_collect(Action::DetailClose);

    harness.complete_action(Action::DetailDidError {
        request_id,
        error: "connection reset".into(),
    });
    let (changed, _) = harness.process_emitted();
    assert_eq!(changed, 0);
    harness.assert_state(|s| !s.detail.open && s.detail.view.is_empty());
}

#[test]
fn test_tiny_without_roles_renders_na() {
    let mut harness = started!(ReferencePolicy::LoadOnce);
    let mut modal = HeroModal::new();
    harness.complete_action(Action::ReferenceDidLoad(reference()));
    harness.process_emitted();

    harness.dispatch_collect(Action::SelectionJumpBottom);
    harness.dispatch_collect(Action::DetailOpen);

    let output = harness.render_plain(100, 30, |frame, area, state| {
        modal.render(
            frame,
            area,
            HeroModalProps {
                detail: &state.detail,
                tick: state.tick,
                is_focused: true,
            },
        );
    });
    assert!(output.contains("Roles: N/A"));
    assert!(output.contains("No abilities data available"));
    assert!(output.contains("No popular items data available"));
}
