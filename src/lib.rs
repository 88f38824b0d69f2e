//! ROTA CERTA - backend de gestão de frota
//!
//! Cadastro de veículos, checklists de saída/retorno das frotas pesada e
//! leve, solicitações de manutenção derivadas e relatórios.

pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod events;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;

use axum::{middleware as axum_middleware, response::Json, routing::get, Router};
use serde_json::json;
use tower_http::trace::TraceLayer;

use crate::middleware::auth::auth_middleware;
use crate::middleware::cors::{cors_middleware, cors_middleware_with_origins};
use crate::state::AppState;

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok", "service": "rota-certa-backend" }))
}

/// Montar o router completo da aplicação
pub fn app(state: AppState) -> Router {
    // Sem origens configuradas, CORS permissivo (desenvolvimento)
    let cors = if state.config.cors_origins.is_empty() {
        cors_middleware()
    } else {
        cors_middleware_with_origins(&state.config.cors_origins)
    };

    let protected = Router::new()
        .nest("/api/auth", routes::auth_routes::create_profile_router())
        .nest("/api/vehicle", routes::vehicle_routes::create_vehicle_router())
        .nest(
            "/api/checklist",
            routes::checklist_routes::create_checklist_router(),
        )
        .nest(
            "/api/maintenance",
            routes::maintenance_routes::create_maintenance_router(),
        )
        .nest("/api/report", routes::report_routes::create_report_router())
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .route("/health", get(health))
        .nest("/api/auth", routes::auth_routes::create_auth_router())
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
