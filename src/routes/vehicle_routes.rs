use std::convert::Infallible;

use axum::{
    extract::{Path, State},
    response::sse::{Event, KeepAlive, Sse},
    routing::{get, post, put},
    Extension, Json, Router,
};
use futures::Stream;
use uuid::Uuid;

use crate::controllers::vehicle_controller::VehicleController;
use crate::dto::common::ApiResponse;
use crate::dto::vehicle_dto::{CreateVehicleRequest, UpdateVehicleRequest};
use crate::events::collections;
use crate::models::user::AppUser;
use crate::models::vehicle::Vehicle;
use crate::routes::snapshot_stream;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_vehicle_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_vehicle))
        .route("/", get(list_vehicles))
        .route("/subscribe", get(subscribe_vehicles))
        .route("/:id", get(get_vehicle))
        .route("/:id", put(update_vehicle))
        .route("/:id/subscribe", get(subscribe_vehicle))
}

async fn create_vehicle(
    State(state): State<AppState>,
    Extension(user): Extension<AppUser>,
    Json(request): Json<CreateVehicleRequest>,
) -> Result<Json<ApiResponse<Vehicle>>, AppError> {
    let vehicle = VehicleController::new(&state).create(&user, request).await?;
    Ok(Json(ApiResponse::success_with_message(
        vehicle,
        "Veículo cadastrado com sucesso".to_string(),
    )))
}

async fn list_vehicles(
    State(state): State<AppState>,
) -> Result<Json<Vec<Vehicle>>, AppError> {
    let vehicles = VehicleController::new(&state).list().await?;
    Ok(Json(vehicles))
}

async fn get_vehicle(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vehicle>, AppError> {
    let vehicle = VehicleController::new(&state).get_by_id(id).await?;
    Ok(Json(vehicle))
}

async fn update_vehicle(
    State(state): State<AppState>,
    Extension(user): Extension<AppUser>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateVehicleRequest>,
) -> Result<Json<ApiResponse<Vehicle>>, AppError> {
    let vehicle = VehicleController::new(&state)
        .update(&user, id, request)
        .await?;
    Ok(Json(ApiResponse::success_with_message(
        vehicle,
        "Veículo atualizado com sucesso".to_string(),
    )))
}

/// Live-query da frota inteira
async fn subscribe_vehicles(
    State(state): State<AppState>,
) -> Result<Sse<impl Stream<Item = Result<Event, Infallible>>>, AppError> {
    let initial = VehicleController::new(&state).list().await?;
    let receiver = state.events.subscribe();

    let stream = snapshot_stream(initial, receiver, collections::VEHICLES, move || {
        let state = state.clone();
        async move { VehicleController::new(&state).list().await }
    });

    Ok(Sse::new(stream).keep_alive(KeepAlive::default()))
}

/// Live-query de um único veículo
async fn subscribe_vehicle(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Sse<impl Stream<Item = Result<Event, Infallible>>>, AppError> {
    let initial = VehicleController::new(&state).get_by_id(id).await?;
    let receiver = state.events.subscribe();

    let stream = snapshot_stream(initial, receiver, collections::VEHICLES, move || {
        let state = state.clone();
        async move { VehicleController::new(&state).get_by_id(id).await }
    });

    Ok(Sse::new(stream).keep_alive(KeepAlive::default()))
}
