//! Integration tests for club and court endpoints.

mod common;

use axum::http::{Method, StatusCode};
use common::{
    cleanup_all_test_data, create_authenticated_user, create_test_app, get_request,
    json_request_with_auth, parse_response_body, promote_to_admin, run_migrations, seed_club,
    seed_court, test_config, try_create_test_pool, TestUser,
};
use serde_json::json;
use tower::ServiceExt;

#[tokio::test]
async fn test_list_clubs_empty() {
    let Some(pool) = try_create_test_pool().await else {
        eprintln!("skipping: TEST_DATABASE_URL not set");
        return;
    };
    run_migrations(&pool).await;
    cleanup_all_test_data(&pool).await;

    let app = create_test_app(test_config(), pool.clone());

    let response = app.oneshot(get_request("/api/v1/clubs")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = parse_response_body(response).await;
    assert_eq!(body["count"].as_u64().unwrap(), 0);

    cleanup_all_test_data(&pool).await;
}

#[tokio::test]
async fn test_admin_creates_club_and_court() {
    let Some(pool) = try_create_test_pool().await else {
        eprintln!("skipping: TEST_DATABASE_URL not set");
        return;
    };
    run_migrations(&pool).await;
    cleanup_all_test_data(&pool).await;

    let config = test_config();
    let app = create_test_app(config.clone(), pool.clone());

    let admin = TestUser::new();
    let auth = create_authenticated_user(&app, &admin).await;
    promote_to_admin(&pool, auth.user_id).await;

    // Create a club
    let app = create_test_app(config.clone(), pool.clone());
    let request = json_request_with_auth(
        Method::POST,
        "/api/v1/admin/clubs",
        json!({
            "name": "Padel Indoor Centro",
            "address": "Calle Mayor 10",
            "city": "Madrid",
            "phone": "+34 912 345 678",
            "admin_user_id": auth.user_id
        }),
        &auth.access_token,
    );
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let club = parse_response_body(response).await;
    let club_id = club["id"].as_str().unwrap().to_string();
    assert_eq!(club["slug"].as_str().unwrap(), "padel-indoor-centro");

    // Add a court
    let app = create_test_app(config.clone(), pool.clone());
    let request = json_request_with_auth(
        Method::POST,
        &format!("/api/v1/admin/clubs/{}/courts", club_id),
        json!({"number": 1, "surface": "crystal", "indoor": true}),
        &auth.access_token,
    );
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    // Duplicate court number conflicts
    let app = create_test_app(config.clone(), pool.clone());
    let request = json_request_with_auth(
        Method::POST,
        &format!("/api/v1/admin/clubs/{}/courts", club_id),
        json!({"number": 1}),
        &auth.access_token,
    );
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    // Club detail shows the court
    let app = create_test_app(config, pool.clone());
    let response = app
        .oneshot(get_request(&format!("/api/v1/clubs/{}", club_id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let detail = parse_response_body(response).await;
    assert_eq!(detail["courts"].as_array().unwrap().len(), 1);

    cleanup_all_test_data(&pool).await;
}

#[tokio::test]
async fn test_admin_routes_reject_players() {
    let Some(pool) = try_create_test_pool().await else {
        eprintln!("skipping: TEST_DATABASE_URL not set");
        return;
    };
    run_migrations(&pool).await;
    cleanup_all_test_data(&pool).await;

    let config = test_config();
    let app = create_test_app(config.clone(), pool.clone());

    let player = TestUser::new();
    let auth = create_authenticated_user(&app, &player).await;

    let app = create_test_app(config, pool.clone());
    let request = json_request_with_auth(
        Method::POST,
        "/api/v1/admin/clubs",
        json!({
            "name": "Nope",
            "address": "Calle 1",
            "city": "Madrid",
            "admin_user_id": auth.user_id
        }),
        &auth.access_token,
    );
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    cleanup_all_test_data(&pool).await;
}

#[tokio::test]
async fn test_list_clubs_filters_by_city() {
    let Some(pool) = try_create_test_pool().await else {
        eprintln!("skipping: TEST_DATABASE_URL not set");
        return;
    };
    run_migrations(&pool).await;
    cleanup_all_test_data(&pool).await;

    let config = test_config();
    let app = create_test_app(config.clone(), pool.clone());

    let admin = TestUser::new();
    let auth = create_authenticated_user(&app, &admin).await;
    let club_id = seed_club(&pool, auth.user_id).await;
    seed_court(&pool, club_id, 1).await;

    // Seeded club is in Madrid
    let app = create_test_app(config.clone(), pool.clone());
    let response = app
        .oneshot(get_request("/api/v1/clubs?city=madrid"))
        .await
        .unwrap();
    let body = parse_response_body(response).await;
    assert_eq!(body["count"].as_u64().unwrap(), 1);
    assert_eq!(body["data"][0]["court_count"].as_i64().unwrap(), 1);

    let app = create_test_app(config, pool.clone());
    let response = app
        .oneshot(get_request("/api/v1/clubs?city=barcelona"))
        .await
        .unwrap();
    let body = parse_response_body(response).await;
    assert_eq!(body["count"].as_u64().unwrap(), 0);

    cleanup_all_test_data(&pool).await;
}

#[tokio::test]
async fn test_get_club_not_found() {
    let Some(pool) = try_create_test_pool().await else {
        eprintln!("skipping: TEST_DATABASE_URL not set");
        return;
    };
    run_migrations(&pool).await;
    cleanup_all_test_data(&pool).await;

    let app = create_test_app(test_config(), pool.clone());

    let response = app
        .oneshot(get_request(&format!(
            "/api/v1/clubs/{}",
            uuid::Uuid::new_v4()
        )))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
