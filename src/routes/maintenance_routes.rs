use std::convert::Infallible;

use axum::{
    extract::{Path, State},
    middleware,
    response::sse::{Event, KeepAlive, Sse},
    routing::{get, put},
    Json, Router,
};
use futures::Stream;
use uuid::Uuid;

use crate::controllers::maintenance_controller::MaintenanceController;
use crate::dto::common::ApiResponse;
use crate::dto::maintenance_dto::UpdateRequestStatusRequest;
use crate::events::collections;
use crate::middleware::auth::admin_only_middleware;
use crate::models::maintenance_request::MaintenanceRequest;
use crate::routes::snapshot_stream;
use crate::state::AppState;
use crate::utils::errors::AppError;

/// Rotas de manutenção: todas exigem papel de administrador
pub fn create_maintenance_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_requests))
        .route("/subscribe", get(subscribe_requests))
        .route("/:id/status", put(update_request_status))
        .route_layer(middleware::from_fn(admin_only_middleware))
}

async fn list_requests(
    State(state): State<AppState>,
) -> Result<Json<Vec<MaintenanceRequest>>, AppError> {
    let requests = MaintenanceController::new(&state).list().await?;
    Ok(Json(requests))
}

async fn update_request_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateRequestStatusRequest>,
) -> Result<Json<ApiResponse<MaintenanceRequest>>, AppError> {
    let updated = MaintenanceController::new(&state)
        .update_status(id, request)
        .await?;
    Ok(Json(ApiResponse::success_with_message(
        updated,
        "Solicitação atualizada com sucesso".to_string(),
    )))
}

/// Live-query da fila de solicitações
async fn subscribe_requests(
    State(state): State<AppState>,
) -> Result<Sse<impl Stream<Item = Result<Event, Infallible>>>, AppError> {
    let initial = MaintenanceController::new(&state).list().await?;
    let receiver = state.events.subscribe();

    let stream = snapshot_stream(
        initial,
        receiver,
        collections::MAINTENANCE_REQUESTS,
        move || {
            let state = state.clone();
            async move { MaintenanceController::new(&state).list().await }
        },
    );

    Ok(Sse::new(stream).keep_alive(KeepAlive::default()))
}
