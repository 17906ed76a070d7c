#![cfg(feature = "http_api")]

use axum::{
    body::{self, Body},
    http::{Request, StatusCode},
    response::Response,
};
use class_planner::{
    ClassSession, DayOfWeek, FixedCredentials, MemoryStorage, ScheduleState, ScheduleStore,
    http_api,
};
use serde_json::{Value, json};
use tower::util::ServiceExt;

fn new_router() -> axum::Router {
    let store = ScheduleStore::with_state(
        ScheduleState::seeded_for(DayOfWeek::Segunda),
        MemoryStorage::new(),
        FixedCredentials::default(),
    );
    http_api::router(http_api::AppState::new(store))
}

fn json_request(method: &str, uri: &str, payload: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(&payload).unwrap()))
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn body_json(response: Response) -> Value {
    let bytes = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn login(app: &axum::Router) {
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/login",
            json!({ "username": "admin", "password": "admin" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["user"], json!({ "username": "admin", "isAdmin": true }));
}

#[tokio::test]
async fn class_lifecycle_via_http_api() {
    let app = new_router();
    login(&app).await;

    // Create
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/classes",
            json!({
                "classGroup": "2B",
                "teacher": "Edgar",
                "subject": "Back-End",
                "timeSlot": "07:30 - 08:20",
                "day": "sexta"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let created: ClassSession = serde_json::from_value(body_json(response).await).unwrap();
    assert_eq!(created.color.as_deref(), Some("#E3F8F8"));
    let uri = format!("/classes/{}", created.id);

    // Patch
    let response = app
        .clone()
        .oneshot(json_request("PATCH", &uri, json!({ "room": "Lab 2" })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let updated: ClassSession = serde_json::from_value(body_json(response).await).unwrap();
    assert_eq!(updated.room, "Lab 2");
    assert_eq!(updated.teacher, "Edgar");

    // Delete
    let response = app
        .clone()
        .oneshot(empty_request("DELETE", &uri))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app.oneshot(empty_request("GET", &uri)).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["error"], json!("not_found"));
}

#[tokio::test]
async fn writes_without_login_are_forbidden() {
    let app = new_router();

    let response = app
        .clone()
        .oneshot(empty_request("DELETE", "/classes/m1"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = body_json(response).await;
    assert_eq!(body["error"], json!("forbidden"));

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/time_slots",
            json!({ "start": "06:00", "end": "06:50" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = app
        .oneshot(empty_request("GET", "/classes/m1"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn wrong_password_is_unauthorized() {
    let app = new_router();
    let response = app
        .oneshot(json_request(
            "POST",
            "/login",
            json!({ "username": "admin", "password": "hunter2" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["success"], json!(false));
}

#[tokio::test]
async fn day_view_filters_by_group_in_start_order() {
    let app = new_router();
    let response = app
        .oneshot(empty_request("GET", "/days/segunda/classes?group=1D"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let classes: Vec<ClassSession> = serde_json::from_value(body_json(response).await).unwrap();
    let slots: Vec<&str> = classes.iter().map(|c| c.time_slot.as_str()).collect();
    assert_eq!(
        slots,
        ["07:30 - 08:20", "08:20 - 09:10", "10:15 - 11:05", "11:05 - 11:55"]
    );
}

#[tokio::test]
async fn current_day_can_change_without_login() {
    let app = new_router();
    let response = app
        .clone()
        .oneshot(json_request("PUT", "/current_day", json!({ "day": "quinta" })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.oneshot(empty_request("GET", "/schedule")).await.unwrap();
    let body = body_json(response).await;
    assert_eq!(body["currentDay"], json!("quinta"));
}

#[tokio::test]
async fn time_slot_edits_via_http_api() {
    let app = new_router();
    login(&app).await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/time_slots",
            json!({ "start": "06:40", "end": "07:30" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["index"], json!(0));
    assert_eq!(body["slot"], json!({ "start": "06:40", "end": "07:30" }));

    let response = app
        .clone()
        .oneshot(json_request(
            "PATCH",
            "/time_slots/99",
            json!({ "start": "08:00" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .clone()
        .oneshot(json_request(
            "PATCH",
            "/time_slots/1",
            json!({ "end": "8:5" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], json!("invalid_request"));

    let response = app
        .clone()
        .oneshot(empty_request("DELETE", "/time_slots/0"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app.oneshot(empty_request("GET", "/time_slots")).await.unwrap();
    let body = body_json(response).await;
    assert_eq!(body.as_array().map(Vec::len), Some(12));
    assert_eq!(
        body[2],
        json!({ "start": "09:10", "end": "09:25", "isBreak": true, "breakName": "Lanche" })
    );
}

#[tokio::test]
async fn logout_revokes_write_access() {
    let app = new_router();
    login(&app).await;

    let response = app
        .clone()
        .oneshot(empty_request("POST", "/logout"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .oneshot(json_request("PUT", "/colors/1A", json!({ "color": "#000000" })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
