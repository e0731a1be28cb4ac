//! Integration tests for the normalized afisha feed.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, get, seed_document};
use serde_json::json;

fn seeded_repertoire() -> serde_json::Value {
    json!({ "events": [
        {
            "id": "marat",
            "title": "",
            "date": "2025-11-03",
            "time": "19:30",
            "link": "https://tickets.example/marat"
        },
        {
            "id": "ostrov",
            "title": "Остров",
            "date": "2025-10-01",
            "venue": "Санкт-Петербург · Лофт «Остров»"
        },
        {
            "id": "okna",
            "title": "Окна. Город. Любовь...",
            "date": "2025-12-20",
            "heroOrder": 1
        },
        {
            "id": "secret",
            "title": "Закрытый показ",
            "showInHero": false
        }
    ] })
}

// ---------------------------------------------------------------------------
// Normalization + supplemental merge
// ---------------------------------------------------------------------------

#[tokio::test]
async fn feed_merges_supplemental_catalog() {
    let test_app = build_test_app().await;
    seed_document(&test_app, &seeded_repertoire());

    let response = get(&test_app.app, "/api/afisha").await;
    assert_eq!(response.status(), StatusCode::OK);

    let feed = body_json(response).await;
    let events = feed["events"].as_array().unwrap();
    assert_eq!(events.len(), 4);

    let marat = events
        .iter()
        .find(|e| e["id"] == "marat")
        .expect("marat in feed");
    // Catalog supplies the title, venue, description, creators, gallery.
    assert_eq!(marat["title"], "Мой бедный Марат");
    assert_eq!(marat["venue"], "Москва · Сцена AmmA Production");
    assert_eq!(marat["creators"].as_array().unwrap().len(), 4);
    assert_eq!(marat["gallery"].as_array().unwrap().len(), 3);
    assert_eq!(marat["ticketUrl"], "https://tickets.example/marat");
    assert_eq!(
        marat["cardMeta"],
        "03 ноября · 19:30 · Москва · Сцена AmmA Production"
    );
    assert_eq!(
        marat["modalMeta"],
        "03 ноября 2025 · Начало в 19:30 · Москва · Сцена AmmA Production"
    );
}

#[tokio::test]
async fn feed_on_missing_document_is_empty() {
    let test_app = build_test_app().await;

    let feed = body_json(get(&test_app.app, "/api/afisha").await).await;
    assert_eq!(feed["events"], json!([]));
    assert_eq!(feed["hero"], json!([]));
}

// ---------------------------------------------------------------------------
// Hero selection
// ---------------------------------------------------------------------------

#[tokio::test]
async fn hero_honours_manual_order_and_visibility() {
    let test_app = build_test_app().await;
    seed_document(&test_app, &seeded_repertoire());

    let feed = body_json(get(&test_app.app, "/api/afisha").await).await;
    let hero = feed["hero"].as_array().unwrap();

    // "secret" is hidden; "okna" has the manual slot; the rest follow by date.
    assert_eq!(hero.len(), 3);
    assert_eq!(hero[0]["id"], "okna");
    assert_eq!(hero[1]["id"], "ostrov");
    assert_eq!(hero[2]["id"], "marat");
    assert_eq!(hero[2]["dateLabel"], "03 ноября 2025 · 19:30");
    assert_eq!(hero[2]["ticketUrl"], "https://tickets.example/marat");
}

// ---------------------------------------------------------------------------
// Search / sort / limit
// ---------------------------------------------------------------------------

#[tokio::test]
async fn search_filters_but_hero_stays() {
    let test_app = build_test_app().await;
    seed_document(&test_app, &seeded_repertoire());

    // "остров", percent-encoded for the request line.
    let feed = body_json(
        get(
            &test_app.app,
            "/api/afisha?search=%D0%BE%D1%81%D1%82%D1%80%D0%BE%D0%B2",
        )
        .await,
    )
    .await;

    let events = feed["events"].as_array().unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0]["id"], "ostrov");
    // Hero selection is independent of the search term.
    assert_eq!(feed["hero"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn sort_and_limit_shape_the_list() {
    let test_app = build_test_app().await;
    seed_document(&test_app, &seeded_repertoire());

    let feed = body_json(get(&test_app.app, "/api/afisha?sort=date_desc&limit=2").await).await;

    let ids: Vec<&str> = feed["events"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["id"].as_str().unwrap())
        .collect();
    // Undated "secret" sorts last in descending order and is cut by the limit.
    assert_eq!(ids, vec!["okna", "marat"]);
}

#[tokio::test]
async fn default_sort_is_date_ascending() {
    let test_app = build_test_app().await;
    seed_document(&test_app, &seeded_repertoire());

    let feed = body_json(get(&test_app.app, "/api/afisha").await).await;

    let ids: Vec<&str> = feed["events"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["id"].as_str().unwrap())
        .collect();
    // Undated events sort as the epoch, so "secret" leads ascending order.
    assert_eq!(ids, vec!["secret", "ostrov", "marat", "okna"]);
}

// ---------------------------------------------------------------------------
// Record fields win over the catalog
// ---------------------------------------------------------------------------

#[tokio::test]
async fn record_image_wins_over_catalog() {
    let test_app = build_test_app().await;
    seed_document(
        &test_app,
        &json!({ "events": [{ "id": "okna", "image": "/uploads/okna-new.jpg" }] }),
    );

    let feed = body_json(get(&test_app.app, "/api/afisha").await).await;
    assert_eq!(feed["events"][0]["image"], "/uploads/okna-new.jpg");
}
