use std::{net::SocketAddr, sync::Arc};

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, patch, post, put},
};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::{
    AdminSession, ClassGroup, ClassSession, ClassSessionPatch, DayOfWeek, NewClassSession,
    ScheduleState, ScheduleStore, StoreError, TimeSlot, TimeSlotDraft, TimeSlotPatch,
};

#[derive(Clone)]
pub struct AppState {
    store: Arc<RwLock<ScheduleStore>>,
}

impl AppState {
    pub fn new(store: ScheduleStore) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
        }
    }

    pub fn with_shared(store: Arc<RwLock<ScheduleStore>>) -> Self {
        Self { store }
    }

    fn store(&self) -> Arc<RwLock<ScheduleStore>> {
        self.store.clone()
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    message: String,
}

#[derive(Debug)]
enum ApiError {
    Forbidden(String),
    NotFound(String),
    Invalid(String),
    Internal(String),
}

impl From<StoreError> for ApiError {
    fn from(value: StoreError) -> Self {
        let message = value.to_string();
        match value {
            StoreError::Unauthorized => ApiError::Forbidden(message),
            StoreError::ClassNotFound(_) | StoreError::TimeSlotOutOfRange { .. } => {
                ApiError::NotFound(message)
            }
            StoreError::InvalidTime(_) | StoreError::InvalidState(_) => {
                ApiError::Invalid(message)
            }
            StoreError::Persistence(_) => ApiError::Internal(message),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error, message) = match self {
            ApiError::Forbidden(message) => (StatusCode::FORBIDDEN, "forbidden", message),
            ApiError::NotFound(message) => (StatusCode::NOT_FOUND, "not_found", message),
            ApiError::Invalid(message) => (StatusCode::BAD_REQUEST, "invalid_request", message),
            ApiError::Internal(message) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", message)
            }
        };
        (status, Json(ErrorBody { error, message })).into_response()
    }
}

#[derive(Debug, Deserialize)]
struct LoginPayload {
    username: String,
    password: String,
}

#[derive(Debug, Serialize)]
struct LoginResponse {
    success: bool,
    user: Option<AdminSession>,
}

#[derive(Debug, Deserialize)]
struct DayPayload {
    day: DayOfWeek,
}

#[derive(Debug, Deserialize)]
struct ColorPayload {
    color: String,
}

#[derive(Debug, Deserialize)]
struct GroupFilter {
    group: Option<ClassGroup>,
}

#[derive(Debug, Serialize)]
struct IndexedSlot {
    index: usize,
    slot: TimeSlot,
}

/// The admin session belongs to the shared store, so one successful
/// `POST /login` unlocks writes for every client until `POST /logout`.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/schedule", get(get_schedule))
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/classes", get(list_classes).post(create_class))
        .route(
            "/classes/:id",
            get(get_class).patch(update_class).delete(delete_class),
        )
        .route("/current_day", put(set_current_day))
        .route("/days/:day/classes", get(classes_for_day))
        .route("/colors/:group", put(update_color))
        .route("/time_slots", get(list_time_slots).post(create_time_slot))
        .route(
            "/time_slots/:index",
            patch(update_time_slot).delete(delete_time_slot),
        )
        .with_state(state)
}

pub async fn serve(addr: SocketAddr, store: ScheduleStore) -> std::io::Result<()> {
    let state = AppState::new(store);
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "http api listening");
    axum::serve(listener, app).await
}

async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

async fn get_schedule(State(state): State<AppState>) -> Json<ScheduleState> {
    let store = state.store();
    let snapshot = store.read().state().clone();
    Json(snapshot)
}

async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginPayload>,
) -> Result<Response, ApiError> {
    let store = state.store();
    let mut guard = store.write();
    if guard.login(&payload.username, &payload.password)? {
        let body = LoginResponse {
            success: true,
            user: guard.user().cloned(),
        };
        Ok(Json(body).into_response())
    } else {
        let body = LoginResponse {
            success: false,
            user: None,
        };
        Ok((StatusCode::UNAUTHORIZED, Json(body)).into_response())
    }
}

async fn logout(State(state): State<AppState>) -> Result<StatusCode, ApiError> {
    let store = state.store();
    store.write().logout()?;
    Ok(StatusCode::NO_CONTENT)
}

async fn list_classes(State(state): State<AppState>) -> Json<Vec<ClassSession>> {
    let store = state.store();
    let classes = store.read().state().classes.clone();
    Json(classes)
}

async fn get_class(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ClassSession>, ApiError> {
    let store = state.store();
    let guard = store.read();
    guard
        .state()
        .find_class(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| ApiError::from(StoreError::ClassNotFound(id)))
}

async fn create_class(
    State(state): State<AppState>,
    Json(new_class): Json<NewClassSession>,
) -> Result<(StatusCode, Json<ClassSession>), ApiError> {
    let store = state.store();
    let created = store.write().add_class(new_class)?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn update_class(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<ClassSessionPatch>,
) -> Result<Json<ClassSession>, ApiError> {
    let store = state.store();
    let updated = store.write().update_class(&id, &patch)?;
    Ok(Json(updated))
}

async fn delete_class(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let store = state.store();
    store.write().remove_class(&id)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn set_current_day(
    State(state): State<AppState>,
    Json(payload): Json<DayPayload>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let store = state.store();
    store.write().set_current_day(payload.day)?;
    Ok(Json(json!({ "currentDay": payload.day })))
}

async fn classes_for_day(
    State(state): State<AppState>,
    Path(day): Path<DayOfWeek>,
    Query(filter): Query<GroupFilter>,
) -> Json<Vec<ClassSession>> {
    let store = state.store();
    let guard = store.read();
    let schedule = guard.state();
    let classes = match filter.group {
        Some(group) => schedule.classes_for(day, group),
        None => schedule.classes_for_day(day),
    };
    Json(classes.into_iter().cloned().collect())
}

async fn update_color(
    State(state): State<AppState>,
    Path(group): Path<ClassGroup>,
    Json(payload): Json<ColorPayload>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let store = state.store();
    store.write().update_class_color(group, payload.color.clone())?;
    Ok(Json(json!({ "group": group, "color": payload.color })))
}

async fn list_time_slots(State(state): State<AppState>) -> Json<Vec<TimeSlot>> {
    let store = state.store();
    let slots = store.read().state().time_slots.clone();
    Json(slots)
}

async fn create_time_slot(
    State(state): State<AppState>,
    Json(draft): Json<TimeSlotDraft>,
) -> Result<(StatusCode, Json<IndexedSlot>), ApiError> {
    let store = state.store();
    let mut guard = store.write();
    let index = guard.add_time_slot(draft)?;
    let slot = guard.state().time_slots[index].clone();
    Ok((StatusCode::CREATED, Json(IndexedSlot { index, slot })))
}

async fn update_time_slot(
    State(state): State<AppState>,
    Path(index): Path<usize>,
    Json(patch): Json<TimeSlotPatch>,
) -> Result<Json<IndexedSlot>, ApiError> {
    let store = state.store();
    let slot = store.write().update_time_slot(index, &patch)?;
    Ok(Json(IndexedSlot { index, slot }))
}

async fn delete_time_slot(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> Result<StatusCode, ApiError> {
    let store = state.store();
    store.write().remove_time_slot(index)?;
    Ok(StatusCode::NO_CONTENT)
}
