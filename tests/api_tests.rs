//! ApiClient against a local mock server

use std::path::PathBuf;

use herodex::api::ApiClient;
use herodex::config::Endpoints;
use herodex::error::FetchError;
use pretty_assertions::assert_eq;
use reqwest::StatusCode;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer, popular_items: Option<PathBuf>) -> ApiClient {
    let endpoints = Endpoints::new(
        format!("{}/api/heroStats", server.uri()),
        format!("{}/build/", server.uri()),
    );
    ApiClient::new(endpoints, popular_items)
}

async fn mount_json(server: &MockServer, route: &str, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

async fn mount_constants(server: &MockServer) {
    mount_json(
        server,
        "/build/hero_abilities.json",
        json!({
            "npc_dota_hero_axe": {
                "abilities": ["axe_berserkers_call", "axe_culling_blade", "generic_hidden"],
                "talents": []
            }
        }),
    )
    .await;
    mount_json(
        server,
        "/build/abilities.json",
        json!({
            "axe_culling_blade": {"dname": "Culling Blade", "desc": "Execute."}
        }),
    )
    .await;
    mount_json(
        server,
        "/build/items.json",
        json!({
            "blink": {"dname": "Blink Dagger", "cost": 2250}
        }),
    )
    .await;
}

#[tokio::test]
async fn test_heroes_keep_response_order() {
    let server = MockServer::start().await;
    mount_json(
        &server,
        "/api/heroStats",
        json!([
            {"id": 2, "name": "npc_dota_hero_axe", "localized_name": "Axe",
             "roles": ["Initiator", "Durable"], "primary_attr": "str", "attack_type": "Melee",
             "pro_win": 12},
            {"id": 1, "name": "npc_dota_hero_antimage", "localized_name": "Anti-Mage"},
            {"id": 25, "name": "npc_dota_hero_lina", "localized_name": "Lina", "roles": []}
        ]),
    )
    .await;

    let heroes = client_for(&server, None).fetch_heroes().await.unwrap();

    let names: Vec<_> = heroes.iter().map(|h| h.localized_name.as_str()).collect();
    assert_eq!(names, vec!["Axe", "Anti-Mage", "Lina"]);
    assert_eq!(heroes[0].roles, vec!["Initiator", "Durable"]);
    assert_eq!(heroes[0].primary_attr.as_deref(), Some("str"));
    assert!(heroes[1].roles.is_empty());
    assert_eq!(heroes[1].roles_label(), "Roles: N/A");
}

#[tokio::test]
async fn test_server_error_is_status_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/heroStats"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = client_for(&server, None).fetch_heroes().await.unwrap_err();

    assert_eq!(err.status(), Some(StatusCode::INTERNAL_SERVER_ERROR));
    assert!(err.to_string().contains("HTTP 500"));
}

#[tokio::test]
async fn test_invalid_body_is_parse_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/heroStats"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let err = client_for(&server, None).fetch_heroes().await.unwrap_err();

    assert!(err.is_parse());
}

#[tokio::test]
async fn test_reference_loads_all_datasets() {
    let server = MockServer::start().await;
    mount_constants(&server).await;

    let reference = client_for(&server, None).fetch_reference().await.unwrap();

    assert_eq!(
        reference.hero_abilities["npc_dota_hero_axe"],
        vec!["axe_berserkers_call", "axe_culling_blade", "generic_hidden"]
    );
    assert_eq!(
        reference.abilities["axe_culling_blade"].display_name.as_deref(),
        Some("Culling Blade")
    );
    assert_eq!(reference.items["blink"].cost, Some(2250));
    assert!(reference.popular_items.is_empty());
}

#[tokio::test]
async fn test_reference_fails_when_any_dataset_fails() {
    let server = MockServer::start().await;
    mount_json(&server, "/build/hero_abilities.json", json!({})).await;
    mount_json(&server, "/build/abilities.json", json!({})).await;
    Mock::given(method("GET"))
        .and(path("/build/items.json"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = client_for(&server, None)
        .fetch_reference()
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
    assert!(err.to_string().contains("items.json"));
}

#[tokio::test]
async fn test_popular_items_file_feeds_reference() {
    let server = MockServer::start().await;
    mount_constants(&server).await;

    let file = std::env::temp_dir().join(format!("herodex-popular-{}.json", std::process::id()));
    std::fs::write(&file, r#"{"axe": ["blink", "blade_mail"]}"#).unwrap();

    let result = client_for(&server, Some(file.clone())).fetch_reference().await;
    std::fs::remove_file(&file).ok();
    let reference = result.unwrap();

    assert_eq!(reference.popular_items["axe"], vec!["blink", "blade_mail"]);
}

#[tokio::test]
async fn test_malformed_popular_items_file_fails_reference() {
    let server = MockServer::start().await;
    mount_constants(&server).await;

    let file =
        std::env::temp_dir().join(format!("herodex-popular-bad-{}.json", std::process::id()));
    std::fs::write(&file, "not json").unwrap();

    let result = client_for(&server, Some(file.clone())).fetch_reference().await;
    std::fs::remove_file(&file).ok();

    assert!(matches!(result, Err(FetchError::Parse { .. })));
}
