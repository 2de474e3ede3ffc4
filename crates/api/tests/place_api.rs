//! HTTP-level integration tests for `/projects/{project_id}/places`.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use common::{body_json, create_project, get, patch_json, post_json, put_json, StubCatalog};
use serde_json::json;
use sqlx::PgPool;

async fn add_place(pool: &PgPool, project_id: i64, external_id: i64) -> serde_json::Value {
    let response = post_json(
        common::build_test_app(pool.clone()),
        &format!("/projects/{project_id}/places"),
        json!({"external_id": external_id}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}

async fn fetch_project(pool: &PgPool, project_id: i64) -> serde_json::Value {
    let response = get(common::build_test_app(pool.clone()), &format!("/projects/{project_id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await
}

// ---------------------------------------------------------------------------
// Add
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_add_place_returns_201_with_title(pool: PgPool) {
    let project_id = create_project(&pool, json!({"name": "Chicago"})).await;

    let response = post_json(
        common::build_test_app(pool.clone()),
        &format!("/projects/{project_id}/places"),
        json!({"external_id": 111628, "notes": "Late night diner"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["project_id"].as_i64().unwrap(), project_id);
    assert_eq!(json["external_id"], 111628);
    assert_eq!(json["title"], "Nighthawks");
    assert_eq!(json["notes"], "Late night diner");
    assert_eq!(json["visited"], false);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_add_place_to_missing_project_returns_404(pool: PgPool) {
    let catalog = Arc::new(StubCatalog::with_known_artworks());
    let response = post_json(
        common::build_test_app_with_catalog(pool, Arc::clone(&catalog)),
        "/projects/999999/places",
        json!({"external_id": 27992}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(catalog.lookups(), 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_eleventh_place_is_rejected(pool: PgPool) {
    let ids: Vec<i64> = common::KNOWN_ARTWORKS.iter().map(|(id, _)| *id).collect();
    let places: Vec<_> = ids[..10].iter().map(|id| json!({"external_id": id})).collect();
    let project_id = create_project(&pool, json!({"name": "Full", "places": places})).await;

    let catalog = Arc::new(StubCatalog::with_known_artworks());
    let response = post_json(
        common::build_test_app_with_catalog(pool.clone(), Arc::clone(&catalog)),
        &format!("/projects/{project_id}/places"),
        json!({"external_id": ids[10]}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "CAPACITY_EXCEEDED");
    assert_eq!(catalog.lookups(), 0);

    let project = fetch_project(&pool, project_id).await;
    assert_eq!(project["places"].as_array().unwrap().len(), 10);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_duplicate_place_is_rejected(pool: PgPool) {
    let project_id = create_project(
        &pool,
        json!({"name": "Once", "places": [{"external_id": 6565}]}),
    )
    .await;

    let response = post_json(
        common::build_test_app(pool.clone()),
        &format!("/projects/{project_id}/places"),
        json!({"external_id": 6565}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "DUPLICATE_ENTRY");
    let project = fetch_project(&pool, project_id).await;
    assert_eq!(project["places"].as_array().unwrap().len(), 1);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_same_artwork_allowed_in_different_projects(pool: PgPool) {
    let first = create_project(&pool, json!({"name": "A"})).await;
    let second = create_project(&pool, json!({"name": "B"})).await;
    add_place(&pool, first, 16568).await;
    add_place(&pool, second, 16568).await;
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_unknown_artwork_returns_422(pool: PgPool) {
    let project_id = create_project(&pool, json!({"name": "Nowhere"})).await;

    let response = post_json(
        common::build_test_app(pool.clone()),
        &format!("/projects/{project_id}/places"),
        json!({"external_id": 424242}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body_json(response).await["code"], "EXTERNAL_NOT_FOUND");
    let project = fetch_project(&pool, project_id).await;
    assert_eq!(project["places"], json!([]));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_add_place_rejects_non_positive_external_id(pool: PgPool) {
    let project_id = create_project(&pool, json!({"name": "Zero"})).await;
    let response = post_json(
        common::build_test_app(pool),
        &format!("/projects/{project_id}/places"),
        json!({"external_id": 0}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["details"][0]["field"], "external_id");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_concurrent_adds_cannot_exceed_capacity(pool: PgPool) {
    let ids: Vec<i64> = common::KNOWN_ARTWORKS.iter().map(|(id, _)| *id).collect();
    let places: Vec<_> = ids[..9].iter().map(|id| json!({"external_id": id})).collect();
    let project_id = create_project(&pool, json!({"name": "Nearly full", "places": places})).await;
    let uri = format!("/projects/{project_id}/places");

    let (first, second) = tokio::join!(
        post_json(
            common::build_test_app(pool.clone()),
            &uri,
            json!({"external_id": ids[9]}),
        ),
        post_json(
            common::build_test_app(pool.clone()),
            &uri,
            json!({"external_id": ids[10]}),
        ),
    );

    let mut statuses = vec![first.status(), second.status()];
    statuses.sort_by_key(|s| s.as_u16());
    assert_eq!(statuses, vec![StatusCode::CREATED, StatusCode::BAD_REQUEST]);

    let rejected = if first.status() == StatusCode::BAD_REQUEST { first } else { second };
    assert_eq!(body_json(rejected).await["code"], "CAPACITY_EXCEEDED");

    let project = fetch_project(&pool, project_id).await;
    assert_eq!(project["places"].as_array().unwrap().len(), 10);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_add_place_with_malformed_body_is_a_validation_error(pool: PgPool) {
    let project_id = create_project(&pool, json!({"name": "Typed"})).await;
    let response = post_json(
        common::build_test_app(pool),
        &format!("/projects/{project_id}/places"),
        json!({"external_id": "abc"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

// ---------------------------------------------------------------------------
// Read
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_list_places_newest_first(pool: PgPool) {
    let project_id = create_project(&pool, json!({"name": "Order"})).await;
    let first = add_place(&pool, project_id, 27992).await["id"].as_i64().unwrap();
    let second = add_place(&pool, project_id, 28560).await["id"].as_i64().unwrap();

    let response = get(
        common::build_test_app(pool),
        &format!("/projects/{project_id}/places"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let ids: Vec<i64> = body_json(response)
        .await
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![second, first]);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_list_places_of_missing_project_returns_404(pool: PgPool) {
    let response = get(common::build_test_app(pool), "/projects/999999/places").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_place_is_scoped_to_its_project(pool: PgPool) {
    let owner = create_project(&pool, json!({"name": "Owner"})).await;
    let other = create_project(&pool, json!({"name": "Other"})).await;
    let place_id = add_place(&pool, owner, 20684).await["id"].as_i64().unwrap();

    let response = get(
        common::build_test_app(pool.clone()),
        &format!("/projects/{owner}/places/{place_id}"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["external_id"], 20684);

    let response = get(
        common::build_test_app(pool.clone()),
        &format!("/projects/{other}/places/{place_id}"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = patch_json(
        common::build_test_app(pool),
        &format!("/projects/{other}/places/{place_id}"),
        json!({"visited": true}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Update and completion
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_visiting_every_place_completes_project(pool: PgPool) {
    let project_id = create_project(&pool, json!({"name": "Tour"})).await;
    let a = add_place(&pool, project_id, 64818).await["id"].as_i64().unwrap();
    let b = add_place(&pool, project_id, 87479).await["id"].as_i64().unwrap();

    let response = patch_json(
        common::build_test_app(pool.clone()),
        &format!("/projects/{project_id}/places/{a}"),
        json!({"visited": true}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["visited"], true);
    assert_eq!(fetch_project(&pool, project_id).await["is_completed"], false);

    let response = put_json(
        common::build_test_app(pool.clone()),
        &format!("/projects/{project_id}/places/{b}"),
        json!({"visited": true}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(fetch_project(&pool, project_id).await["is_completed"], true);

    // Un-visiting a place reopens the project.
    let response = patch_json(
        common::build_test_app(pool.clone()),
        &format!("/projects/{project_id}/places/{a}"),
        json!({"visited": false}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(fetch_project(&pool, project_id).await["is_completed"], false);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_adding_place_to_completed_project_reopens_it(pool: PgPool) {
    let project_id = create_project(&pool, json!({"name": "Done"})).await;
    let place_id = add_place(&pool, project_id, 14598).await["id"].as_i64().unwrap();
    patch_json(
        common::build_test_app(pool.clone()),
        &format!("/projects/{project_id}/places/{place_id}"),
        json!({"visited": true}),
    )
    .await;
    assert_eq!(fetch_project(&pool, project_id).await["is_completed"], true);

    add_place(&pool, project_id, 80607).await;
    assert_eq!(fetch_project(&pool, project_id).await["is_completed"], false);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_notes_update_keeps_visited_and_completion(pool: PgPool) {
    let project_id = create_project(&pool, json!({"name": "Notes"})).await;
    let place_id = add_place(&pool, project_id, 16571).await["id"].as_i64().unwrap();
    let uri = format!("/projects/{project_id}/places/{place_id}");

    patch_json(common::build_test_app(pool.clone()), &uri, json!({"visited": true})).await;

    let response = patch_json(
        common::build_test_app(pool.clone()),
        &uri,
        json!({"notes": "Bring a sketchbook"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["notes"], "Bring a sketchbook");
    assert_eq!(json["visited"], true);
    assert_eq!(fetch_project(&pool, project_id).await["is_completed"], true);

    let response = patch_json(common::build_test_app(pool), &uri, json!({"notes": null})).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_json(response).await["notes"].is_null());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_update_missing_place_returns_404(pool: PgPool) {
    let project_id = create_project(&pool, json!({"name": "Empty"})).await;
    let response = patch_json(
        common::build_test_app(pool),
        &format!("/projects/{project_id}/places/999999"),
        json!({"visited": true}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
