//! Controller de solicitações de manutenção (somente admin)

use std::sync::Arc;

use uuid::Uuid;
use validator::Validate;

use crate::dto::maintenance_dto::UpdateRequestStatusRequest;
use crate::events::{collections, EventBus};
use crate::models::maintenance_request::{MaintenanceRequest, MaintenanceRequestStatus};
use crate::repositories::maintenance_request_repository::MaintenanceRequestRepository;
use crate::state::AppState;
use crate::utils::errors::{not_found_error, AppError, AppResult};

pub struct MaintenanceController {
    repo: MaintenanceRequestRepository,
    events: Arc<EventBus>,
}

impl MaintenanceController {
    pub fn new(state: &AppState) -> Self {
        Self {
            repo: MaintenanceRequestRepository::new(state.pool.clone()),
            events: state.events.clone(),
        }
    }

    pub async fn list(&self) -> AppResult<Vec<MaintenanceRequest>> {
        self.repo.list_all().await
    }

    pub async fn update_status(
        &self,
        id: Uuid,
        request: UpdateRequestStatusRequest,
    ) -> AppResult<MaintenanceRequest> {
        request.validate()?;

        let status = MaintenanceRequestStatus::parse(&request.status).ok_or_else(|| {
            AppError::BadRequest(format!(
                "Status de solicitação '{}' inválido",
                request.status
            ))
        })?;

        let updated = self
            .repo
            .update_status(id, status)
            .await?
            .ok_or_else(|| not_found_error("Solicitação", &id.to_string()))?;

        tracing::info!(request_id = %updated.id, status = status.as_str(), "Solicitação atualizada");
        self.events.publish_all(&[collections::MAINTENANCE_REQUESTS]);

        Ok(updated)
    }
}
