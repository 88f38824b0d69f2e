use axum::{
    extract::{Path, Query, State},
    http::header,
    response::{IntoResponse, Response},
    routing::get,
    Extension, Json, Router,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::controllers::report_controller::ReportController;
use crate::dto::report_dto::{DashboardSummary, VehicleIssueGroup};
use crate::models::user::AppUser;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_report_router() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(dashboard))
        .route("/unified", get(unified_report))
        .route("/checklist/:id/pdf", get(export_checklist_pdf))
        .route("/checklist/:id/text", get(export_checklist_text))
}

async fn dashboard(
    State(state): State<AppState>,
) -> Result<Json<DashboardSummary>, AppError> {
    let summary = ReportController::new(&state).dashboard().await?;
    Ok(Json(summary))
}

#[derive(Debug, Default, Deserialize)]
struct UnifiedReportQuery {
    vehicle_class: Option<String>,
}

async fn unified_report(
    State(state): State<AppState>,
    Extension(user): Extension<AppUser>,
    Query(query): Query<UnifiedReportQuery>,
) -> Result<Json<Vec<VehicleIssueGroup>>, AppError> {
    let groups = ReportController::new(&state)
        .unified(&user, query.vehicle_class.as_deref())
        .await?;
    Ok(Json(groups))
}

async fn export_checklist_pdf(
    State(state): State<AppState>,
    Extension(user): Extension<AppUser>,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    let export = ReportController::new(&state).export_pdf(&user, id).await?;

    let headers = [
        (header::CONTENT_TYPE, export.content_type.to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", export.file_name),
        ),
    ];

    Ok((headers, export.bytes).into_response())
}

async fn export_checklist_text(
    State(state): State<AppState>,
    Extension(user): Extension<AppUser>,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    let text = ReportController::new(&state).export_text(&user, id).await?;

    let headers = [(header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string())];
    Ok((headers, text).into_response())
}
