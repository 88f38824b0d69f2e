use std::convert::Infallible;

use axum::{
    extract::{Path, Query, State},
    response::sse::{Event, KeepAlive, Sse},
    routing::{get, post},
    Extension, Json, Router,
};
use futures::Stream;
use uuid::Uuid;

use crate::controllers::checklist_controller::ChecklistController;
use crate::dto::checklist_dto::{
    ChecklistListQuery, HeavyChecklistRequest, LightChecklistRequest, SubmissionResponse,
};
use crate::dto::common::ApiResponse;
use crate::events::collections;
use crate::models::checklist::Checklist;
use crate::models::user::AppUser;
use crate::routes::snapshot_stream;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_checklist_router() -> Router<AppState> {
    Router::new()
        .route("/heavy", post(submit_heavy))
        .route("/light", post(submit_light))
        .route("/", get(list_checklists))
        .route("/subscribe", get(subscribe_checklists))
        .route("/:id", get(get_checklist))
}

async fn submit_heavy(
    State(state): State<AppState>,
    Extension(user): Extension<AppUser>,
    Json(request): Json<HeavyChecklistRequest>,
) -> Result<Json<ApiResponse<SubmissionResponse>>, AppError> {
    let response = ChecklistController::new(&state)
        .submit_heavy(&user, request)
        .await?;
    Ok(Json(ApiResponse::success_with_message(
        response,
        "Checklist registrado com sucesso".to_string(),
    )))
}

async fn submit_light(
    State(state): State<AppState>,
    Extension(user): Extension<AppUser>,
    Json(request): Json<LightChecklistRequest>,
) -> Result<Json<ApiResponse<SubmissionResponse>>, AppError> {
    let response = ChecklistController::new(&state)
        .submit_light(&user, request)
        .await?;
    Ok(Json(ApiResponse::success_with_message(
        response,
        "Checklist registrado com sucesso".to_string(),
    )))
}

async fn list_checklists(
    State(state): State<AppState>,
    Extension(user): Extension<AppUser>,
    Query(query): Query<ChecklistListQuery>,
) -> Result<Json<Vec<Checklist>>, AppError> {
    let checklists = ChecklistController::new(&state).list(&user, query).await?;
    Ok(Json(checklists))
}

async fn get_checklist(
    State(state): State<AppState>,
    Extension(user): Extension<AppUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<Checklist>, AppError> {
    let checklist = ChecklistController::new(&state).get_by_id(&user, id).await?;
    Ok(Json(checklist))
}

/// Live-query dos checklists visíveis ao chamador (motorista vê só os seus)
async fn subscribe_checklists(
    State(state): State<AppState>,
    Extension(user): Extension<AppUser>,
    Query(query): Query<ChecklistListQuery>,
) -> Result<Sse<impl Stream<Item = Result<Event, Infallible>>>, AppError> {
    let controller = ChecklistController::new(&state);
    let initial = controller
        .list(
            &user,
            ChecklistListQuery {
                vehicle_class: query.vehicle_class.clone(),
                vehicle_id: query.vehicle_id,
            },
        )
        .await?;
    let receiver = state.events.subscribe();

    let stream = snapshot_stream(initial, receiver, collections::CHECKLISTS, move || {
        let state = state.clone();
        let user = user.clone();
        let query = ChecklistListQuery {
            vehicle_class: query.vehicle_class.clone(),
            vehicle_id: query.vehicle_id,
        };
        async move { ChecklistController::new(&state).list(&user, query).await }
    });

    Ok(Sse::new(stream).keep_alive(KeepAlive::default()))
}
