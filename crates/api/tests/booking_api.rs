//! HTTP-level integration tests for the public booking wizard.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, post_json, put_json, put_json_auth, TestApp};
use serde_json::json;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn start_session(test: &TestApp, body: serde_json::Value) -> String {
    let response = post_json(test.app(), "/api/v1/public/booking/sessions", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["step"], 1);
    json["data"]["id"].as_str().unwrap().to_string()
}

async fn answer(test: &TestApp, id: &str, answers: serde_json::Value) {
    let response = put_json(
        test.app(),
        &format!("/api/v1/public/booking/sessions/{id}"),
        answers,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
}

async fn advance(test: &TestApp, id: &str) -> axum::http::Response<axum::body::Body> {
    post_json(
        test.app(),
        &format!("/api/v1/public/booking/sessions/{id}/advance"),
        json!({}),
    )
    .await
}

fn complete_answers() -> serde_json::Value {
    json!({
        "email": "a@b.com",
        "name": "Ana",
        "phone": "11999998888",
        "service_id": "1",
        "professional_id": "2",
        "date": "2026-11-03",
        "time": "10:00",
    })
}

/// Advance until the session reports `target` or a step refuses.
async fn advance_to(test: &TestApp, id: &str, target: u64) -> u64 {
    let mut step = 1;
    while step < target {
        let response = advance(test, id).await;
        if response.status() != StatusCode::OK {
            break;
        }
        step = body_json(response).await["data"]["step"].as_u64().unwrap();
    }
    step
}

// ---------------------------------------------------------------------------
// Wizard
// ---------------------------------------------------------------------------

#[tokio::test]
async fn complete_answers_reach_confirmation_and_confirm() {
    let test = common::build_test_app();
    let id = start_session(&test, json!({})).await;
    answer(&test, &id, complete_answers()).await;

    assert_eq!(advance_to(&test, &id, 6).await, 6);

    let summary = get(test.app(), &format!("/api/v1/public/booking/sessions/{id}/summary")).await;
    assert_eq!(summary.status(), StatusCode::OK);
    let summary = body_json(summary).await;
    assert_eq!(summary["data"]["service_name"], "Corte de Cabelo");
    assert_eq!(summary["data"]["professional_name"], "Pedro Costa");
    assert_eq!(summary["data"]["date"], "03/11/2026");
    assert_eq!(summary["data"]["time"], "10:00");

    // Confirmation is left through confirm, not advance.
    let stuck = advance(&test, &id).await;
    assert_eq!(stuck.status(), StatusCode::BAD_REQUEST);

    let mut events = test.state.event_bus.subscribe();
    let confirmed = post_json(
        test.app(),
        &format!("/api/v1/public/booking/sessions/{id}/confirm"),
        json!({}),
    )
    .await;
    assert_eq!(confirmed.status(), StatusCode::OK);
    let json = body_json(confirmed).await;
    assert_eq!(json["data"]["session"]["step"], 7);
    assert_eq!(json["data"]["summary"]["customer_name"], "Ana");
    assert_eq!(json["notice"]["level"], "success");

    let event = events.recv().await.unwrap();
    assert_eq!(event.event_type, "booking.confirmed");
    assert!(event.owner_id.is_none());
}

#[tokio::test]
async fn any_missing_answer_blocks_advancement() {
    let fields = [
        ("email", 1),
        ("name", 2),
        ("phone", 2),
        ("service_id", 3),
        ("professional_id", 4),
        ("date", 5),
        ("time", 5),
    ];

    for (field, blocked_at) in fields {
        let test = common::build_test_app();
        let id = start_session(&test, json!({})).await;

        let mut answers = complete_answers();
        answers.as_object_mut().unwrap().remove(field);
        answer(&test, &id, answers).await;

        assert_eq!(
            advance_to(&test, &id, 6).await,
            blocked_at,
            "without {field} the wizard should stop at step {blocked_at}"
        );
    }
}

#[tokio::test]
async fn invalid_answers_are_rejected_at_their_step() {
    let test = common::build_test_app();
    let id = start_session(&test, json!({})).await;

    answer(&test, &id, json!({ "email": "not-an-email" })).await;
    let response = advance(&test, &id).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");

    let mut answers = complete_answers();
    answers["time"] = json!("12:00");
    answer(&test, &id, answers).await;
    assert_eq!(advance_to(&test, &id, 6).await, 5);

    let mut answers = complete_answers();
    answers["service_id"] = json!("99");
    answers["time"] = json!("10:00");
    answer(&test, &id, answers).await;
    // Step back from 5 to the service step, which now names an unknown id.
    for _ in 0..2 {
        post_json(
            test.app(),
            &format!("/api/v1/public/booking/sessions/{id}/back"),
            json!({}),
        )
        .await;
    }
    let response = advance(&test, &id).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn going_back_keeps_answers_and_stops_at_step_one() {
    let test = common::build_test_app();
    let id = start_session(&test, json!({})).await;
    answer(&test, &id, complete_answers()).await;
    advance_to(&test, &id, 3).await;

    let back_uri = format!("/api/v1/public/booking/sessions/{id}/back");
    let response = post_json(test.app(), &back_uri, json!({})).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["step"], 2);
    assert_eq!(json["data"]["draft"]["email"], "a@b.com");
    assert_eq!(json["data"]["draft"]["service_id"], "1");

    post_json(test.app(), &back_uri, json!({})).await;
    let first = post_json(test.app(), &back_uri, json!({})).await;
    assert_eq!(first.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn finished_booking_is_read_only() {
    let test = common::build_test_app();
    let id = start_session(&test, json!({})).await;
    answer(&test, &id, complete_answers()).await;
    advance_to(&test, &id, 6).await;
    post_json(
        test.app(),
        &format!("/api/v1/public/booking/sessions/{id}/confirm"),
        json!({}),
    )
    .await;

    let edit = put_json(
        test.app(),
        &format!("/api/v1/public/booking/sessions/{id}"),
        json!({ "name": "Outra" }),
    )
    .await;
    assert_eq!(edit.status(), StatusCode::CONFLICT);

    let back = post_json(
        test.app(),
        &format!("/api/v1/public/booking/sessions/{id}/back"),
        json!({}),
    )
    .await;
    assert_eq!(back.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn session_limit_is_429() {
    let mut config = common::test_config();
    config.max_booking_sessions = 2;
    let test = common::build_test_app_with(config);

    start_session(&test, json!({})).await;
    start_session(&test, json!({})).await;

    let response = post_json(test.app(), "/api/v1/public/booking/sessions", json!({})).await;
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(body_json(response).await["code"], "TOO_MANY_REQUESTS");
    assert_eq!(test.state.booking_sessions.len().await, 2);
}

#[tokio::test]
async fn unknown_session_is_404() {
    let test = common::build_test_app();
    let response = get(
        test.app(),
        "/api/v1/public/booking/sessions/00000000-0000-4000-8000-000000000000",
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Catalog and booking links
// ---------------------------------------------------------------------------

#[tokio::test]
async fn catalog_and_preview_are_public() {
    let test = common::build_test_app();

    let catalog = body_json(get(test.app(), "/api/v1/public/booking/catalog").await).await;
    assert_eq!(catalog["data"]["services"].as_array().unwrap().len(), 6);
    assert_eq!(catalog["data"]["professionals"].as_array().unwrap().len(), 4);
    assert_eq!(catalog["data"]["time_slots"].as_array().unwrap().len(), 12);

    let preview = body_json(get(test.app(), "/api/v1/public/booking/preview").await).await;
    assert!(preview["data"]["welcome_message"].is_string());
    assert_eq!(preview["data"]["catalog"]["services"][0]["id"], "1");
}

#[tokio::test]
async fn active_booking_link_opens_sessions_for_its_owner() {
    let test = common::build_test_app();
    let token = common::signup_and_token(&test, "Ana Souza").await;

    let response = put_json_auth(
        test.app(),
        "/api/v1/booking-link",
        json!({ "slug": "Studio Ana", "welcome_message": "Olá! Escolha seu horário." }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let page = get(test.app(), "/api/v1/public/booking/studio-ana").await;
    assert_eq!(page.status(), StatusCode::OK);
    let page = body_json(page).await;
    assert_eq!(page["data"]["welcome_message"], "Olá! Escolha seu horário.");

    let id = start_session(&test, json!({ "slug": "studio-ana" })).await;
    answer(&test, &id, complete_answers()).await;
    advance_to(&test, &id, 6).await;

    let mut events = test.state.event_bus.subscribe();
    post_json(
        test.app(),
        &format!("/api/v1/public/booking/sessions/{id}/confirm"),
        json!({}),
    )
    .await;
    let event = events.recv().await.unwrap();
    assert!(event.owner_id.is_some());
}

#[tokio::test]
async fn inactive_or_unknown_links_are_404() {
    let test = common::build_test_app();
    let token = common::signup_and_token(&test, "Ana Souza").await;

    put_json_auth(
        test.app(),
        "/api/v1/booking-link",
        json!({ "slug": "studio-ana", "is_active": false }),
        &token,
    )
    .await;

    let inactive = get(test.app(), "/api/v1/public/booking/studio-ana").await;
    assert_eq!(inactive.status(), StatusCode::NOT_FOUND);

    let unknown = get(test.app(), "/api/v1/public/booking/nobody-here").await;
    assert_eq!(unknown.status(), StatusCode::NOT_FOUND);

    let session = post_json(
        test.app(),
        "/api/v1/public/booking/sessions",
        json!({ "slug": "studio-ana" }),
    )
    .await;
    assert_eq!(session.status(), StatusCode::NOT_FOUND);
}
