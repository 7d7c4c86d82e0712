//! Integration tests for booking endpoints: capacity, duplicates,
//! credits, and cancellation refunds.

mod common;

use axum::http::{Method, StatusCode};
use common::{
    cleanup_all_test_data, create_authenticated_user, create_test_app, get_credits,
    get_request_with_auth, grant_credits, json_request_with_auth, parse_response_body,
    promote_to_admin, run_migrations, seed_club, seed_slot, test_config, try_create_test_pool,
    TestUser,
};
use serde_json::json;
use tower::ServiceExt;

#[tokio::test]
async fn test_book_with_credits_confirms_and_charges() {
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
    grant_credits(&pool, auth.user_id, 100).await;

    let club_id = seed_club(&pool, auth.user_id).await;
    let slot_id = seed_slot(&pool, club_id, None, 4, 15, 24).await;

    let app = create_test_app(config, pool.clone());
    let request = json_request_with_auth(
        Method::POST,
        "/api/v1/classes/book",
        json!({"time_slot_id": slot_id, "group_size": 2}),
        &auth.access_token,
    );
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = parse_response_body(response).await;
    assert_eq!(body["status"].as_str().unwrap(), "confirmed");
    assert_eq!(body["credits_charged"].as_i64().unwrap(), 30);
    assert_eq!(body["remaining_places"].as_i64().unwrap(), 2);

    // price 15 * group 2 = 30 charged
    assert_eq!(get_credits(&pool, auth.user_id).await, 70);

    cleanup_all_test_data(&pool).await;
}

#[tokio::test]
async fn test_book_without_credits_is_pending() {
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
    let club_id = seed_club(&pool, auth.user_id).await;
    let slot_id = seed_slot(&pool, club_id, None, 4, 15, 24).await;

    let app = create_test_app(config, pool.clone());
    let request = json_request_with_auth(
        Method::POST,
        "/api/v1/classes/book",
        json!({"time_slot_id": slot_id, "group_size": 1, "pay_with_credits": false}),
        &auth.access_token,
    );
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = parse_response_body(response).await;
    assert_eq!(body["status"].as_str().unwrap(), "pending");
    assert_eq!(body["credits_charged"].as_i64().unwrap(), 0);
    assert_eq!(get_credits(&pool, auth.user_id).await, 0);

    cleanup_all_test_data(&pool).await;
}

#[tokio::test]
async fn test_book_insufficient_credits() {
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
    grant_credits(&pool, auth.user_id, 10).await;

    let club_id = seed_club(&pool, auth.user_id).await;
    let slot_id = seed_slot(&pool, club_id, None, 4, 15, 24).await;

    let app = create_test_app(config, pool.clone());
    let request = json_request_with_auth(
        Method::POST,
        "/api/v1/classes/book",
        json!({"time_slot_id": slot_id, "group_size": 1}),
        &auth.access_token,
    );
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Nothing was charged
    assert_eq!(get_credits(&pool, auth.user_id).await, 10);

    cleanup_all_test_data(&pool).await;
}

#[tokio::test]
async fn test_book_duplicate_group_size_conflicts() {
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
    grant_credits(&pool, auth.user_id, 100).await;

    let club_id = seed_club(&pool, auth.user_id).await;
    let slot_id = seed_slot(&pool, club_id, None, 8, 5, 24).await;

    let book = |group: i32| {
        json_request_with_auth(
            Method::POST,
            "/api/v1/classes/book",
            json!({"time_slot_id": slot_id, "group_size": group}),
            &auth.access_token,
        )
    };

    let app2 = create_test_app(config.clone(), pool.clone());
    let response = app2.oneshot(book(2)).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    // Same (user, slot, group_size) is rejected
    let app2 = create_test_app(config.clone(), pool.clone());
    let response = app2.oneshot(book(2)).await.unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    // A different group size on the same slot is allowed
    let app2 = create_test_app(config, pool.clone());
    let response = app2.oneshot(book(3)).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    cleanup_all_test_data(&pool).await;
}

#[tokio::test]
async fn test_book_capacity_exhausted() {
    let Some(pool) = try_create_test_pool().await else {
        eprintln!("skipping: TEST_DATABASE_URL not set");
        return;
    };
    run_migrations(&pool).await;
    cleanup_all_test_data(&pool).await;

    let config = test_config();
    let app = create_test_app(config.clone(), pool.clone());

    let first = TestUser::new();
    let first_auth = create_authenticated_user(&app, &first).await;
    grant_credits(&pool, first_auth.user_id, 100).await;

    let club_id = seed_club(&pool, first_auth.user_id).await;
    let slot_id = seed_slot(&pool, club_id, None, 4, 5, 24).await;

    let app = create_test_app(config.clone(), pool.clone());
    let request = json_request_with_auth(
        Method::POST,
        "/api/v1/classes/book",
        json!({"time_slot_id": slot_id, "group_size": 3}),
        &first_auth.access_token,
    );
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    // Another player wants 2 places but only 1 is left
    let app = create_test_app(config.clone(), pool.clone());
    let second = TestUser::new();
    let second_auth = create_authenticated_user(&app, &second).await;
    grant_credits(&pool, second_auth.user_id, 100).await;

    let app = create_test_app(config, pool.clone());
    let request = json_request_with_auth(
        Method::POST,
        "/api/v1/classes/book",
        json!({"time_slot_id": slot_id, "group_size": 2}),
        &second_auth.access_token,
    );
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    cleanup_all_test_data(&pool).await;
}

#[tokio::test]
async fn test_book_group_too_large() {
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
    let club_id = seed_club(&pool, auth.user_id).await;
    let slot_id = seed_slot(&pool, club_id, None, 8, 5, 24).await;

    // max_group_size is 4 in the test config
    let app = create_test_app(config, pool.clone());
    let request = json_request_with_auth(
        Method::POST,
        "/api/v1/classes/book",
        json!({"time_slot_id": slot_id, "group_size": 5}),
        &auth.access_token,
    );
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    cleanup_all_test_data(&pool).await;
}

#[tokio::test]
async fn test_cancel_before_cutoff_refunds() {
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
    grant_credits(&pool, auth.user_id, 100).await;

    let club_id = seed_club(&pool, auth.user_id).await;
    // Starts in 48h, comfortably past the 12h cutoff
    let slot_id = seed_slot(&pool, club_id, None, 4, 20, 48).await;

    let app = create_test_app(config.clone(), pool.clone());
    let request = json_request_with_auth(
        Method::POST,
        "/api/v1/classes/book",
        json!({"time_slot_id": slot_id, "group_size": 1}),
        &auth.access_token,
    );
    let response = app.oneshot(request).await.unwrap();
    let booking = parse_response_body(response).await;
    let booking_id = booking["id"].as_str().unwrap();
    assert_eq!(get_credits(&pool, auth.user_id).await, 80);

    let app = create_test_app(config, pool.clone());
    let request = json_request_with_auth(
        Method::POST,
        "/api/v1/classes/cancel",
        json!({"booking_id": booking_id}),
        &auth.access_token,
    );
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = parse_response_body(response).await;
    assert_eq!(body["credits_refunded"].as_i64().unwrap(), 20);
    assert_eq!(get_credits(&pool, auth.user_id).await, 100);

    cleanup_all_test_data(&pool).await;
}

#[tokio::test]
async fn test_cancel_inside_cutoff_forfeits() {
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
    grant_credits(&pool, auth.user_id, 100).await;

    let club_id = seed_club(&pool, auth.user_id).await;
    // Starts in 2h, inside the 12h cutoff
    let slot_id = seed_slot(&pool, club_id, None, 4, 20, 2).await;

    let app = create_test_app(config.clone(), pool.clone());
    let request = json_request_with_auth(
        Method::POST,
        "/api/v1/classes/book",
        json!({"time_slot_id": slot_id, "group_size": 1}),
        &auth.access_token,
    );
    let response = app.oneshot(request).await.unwrap();
    let booking = parse_response_body(response).await;
    let booking_id = booking["id"].as_str().unwrap();

    let app = create_test_app(config, pool.clone());
    let request = json_request_with_auth(
        Method::POST,
        "/api/v1/classes/cancel",
        json!({"booking_id": booking_id}),
        &auth.access_token,
    );
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = parse_response_body(response).await;
    assert_eq!(body["credits_refunded"].as_i64().unwrap(), 0);
    assert_eq!(get_credits(&pool, auth.user_id).await, 80);

    cleanup_all_test_data(&pool).await;
}

#[tokio::test]
async fn test_cancel_someone_elses_booking_forbidden() {
    let Some(pool) = try_create_test_pool().await else {
        eprintln!("skipping: TEST_DATABASE_URL not set");
        return;
    };
    run_migrations(&pool).await;
    cleanup_all_test_data(&pool).await;

    let config = test_config();
    let app = create_test_app(config.clone(), pool.clone());

    let owner = TestUser::new();
    let owner_auth = create_authenticated_user(&app, &owner).await;
    grant_credits(&pool, owner_auth.user_id, 100).await;

    let club_id = seed_club(&pool, owner_auth.user_id).await;
    let slot_id = seed_slot(&pool, club_id, None, 4, 10, 24).await;

    let app = create_test_app(config.clone(), pool.clone());
    let request = json_request_with_auth(
        Method::POST,
        "/api/v1/classes/book",
        json!({"time_slot_id": slot_id, "group_size": 1}),
        &owner_auth.access_token,
    );
    let response = app.oneshot(request).await.unwrap();
    let booking = parse_response_body(response).await;
    let booking_id = booking["id"].as_str().unwrap();

    let app = create_test_app(config.clone(), pool.clone());
    let other = TestUser::new();
    let other_auth = create_authenticated_user(&app, &other).await;

    let app = create_test_app(config, pool.clone());
    let request = json_request_with_auth(
        Method::POST,
        "/api/v1/classes/cancel",
        json!({"booking_id": booking_id}),
        &other_auth.access_token,
    );
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    cleanup_all_test_data(&pool).await;
}

#[tokio::test]
async fn test_pending_booking_confirmed_by_admin() {
    let Some(pool) = try_create_test_pool().await else {
        eprintln!("skipping: TEST_DATABASE_URL not set");
        return;
    };
    run_migrations(&pool).await;
    cleanup_all_test_data(&pool).await;

    let config = test_config();
    let app = create_test_app(config.clone(), pool.clone());

    let player = TestUser::new();
    let player_auth = create_authenticated_user(&app, &player).await;
    let club_id = seed_club(&pool, player_auth.user_id).await;
    let slot_id = seed_slot(&pool, club_id, None, 4, 15, 24).await;

    let app = create_test_app(config.clone(), pool.clone());
    let request = json_request_with_auth(
        Method::POST,
        "/api/v1/classes/book",
        json!({"time_slot_id": slot_id, "group_size": 1, "pay_with_credits": false}),
        &player_auth.access_token,
    );
    let response = app.oneshot(request).await.unwrap();
    let booking = parse_response_body(response).await;
    let booking_id = booking["id"].as_str().unwrap();

    let app = create_test_app(config.clone(), pool.clone());
    let admin = TestUser::new();
    let admin_auth = create_authenticated_user(&app, &admin).await;
    promote_to_admin(&pool, admin_auth.user_id).await;

    let app = create_test_app(config.clone(), pool.clone());
    let request = json_request_with_auth(
        Method::POST,
        &format!("/api/v1/admin/bookings/{}/confirm", booking_id),
        json!({}),
        &admin_auth.access_token,
    );
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = parse_response_body(response).await;
    assert_eq!(body["status"].as_str().unwrap(), "confirmed");

    // Confirming twice is a conflict
    let app = create_test_app(config, pool.clone());
    let request = json_request_with_auth(
        Method::POST,
        &format!("/api/v1/admin/bookings/{}/confirm", booking_id),
        json!({}),
        &admin_auth.access_token,
    );
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    cleanup_all_test_data(&pool).await;
}

#[tokio::test]
async fn test_list_bookings_scopes() {
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
    grant_credits(&pool, auth.user_id, 100).await;

    let club_id = seed_club(&pool, auth.user_id).await;
    let slot_id = seed_slot(&pool, club_id, None, 4, 10, 24).await;

    let app = create_test_app(config.clone(), pool.clone());
    let request = json_request_with_auth(
        Method::POST,
        "/api/v1/classes/book",
        json!({"time_slot_id": slot_id, "group_size": 1}),
        &auth.access_token,
    );
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let app = create_test_app(config.clone(), pool.clone());
    let request = get_request_with_auth("/api/v1/bookings", &auth.access_token);
    let response = app.oneshot(request).await.unwrap();
    let body = parse_response_body(response).await;
    assert_eq!(body["count"].as_u64().unwrap(), 1);
    assert_eq!(body["data"][0]["status"].as_str().unwrap(), "confirmed");

    // Nothing in the past yet
    let app = create_test_app(config, pool.clone());
    let request = get_request_with_auth("/api/v1/bookings?scope=past", &auth.access_token);
    let response = app.oneshot(request).await.unwrap();
    let body = parse_response_body(response).await;
    assert_eq!(body["count"].as_u64().unwrap(), 0);

    cleanup_all_test_data(&pool).await;
}
