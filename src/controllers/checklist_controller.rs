//! Controller de checklists
//!
//! Submissão delega ao fluxo transacional do service. Nas leituras o
//! motorista só enxerga os próprios checklists; admin enxerga a frota.

use uuid::Uuid;
use validator::Validate;

use crate::dto::checklist_dto::{
    ChecklistListQuery, HeavyChecklistRequest, LightChecklistRequest, SubmissionResponse,
};
use crate::models::checklist::{Checklist, VehicleClass};
use crate::models::user::AppUser;
use crate::repositories::checklist_repository::ChecklistRepository;
use crate::services::checklist_service::{self, ChecklistDraft};
use crate::state::AppState;
use crate::utils::errors::{not_found_error, AppError, AppResult};

pub struct ChecklistController {
    state: AppState,
}

impl ChecklistController {
    pub fn new(state: &AppState) -> Self {
        Self {
            state: state.clone(),
        }
    }

    pub async fn submit_heavy(
        &self,
        user: &AppUser,
        request: HeavyChecklistRequest,
    ) -> AppResult<SubmissionResponse> {
        request.validate()?;
        self.submit(user, request.into_draft()).await
    }

    pub async fn submit_light(
        &self,
        user: &AppUser,
        request: LightChecklistRequest,
    ) -> AppResult<SubmissionResponse> {
        request.validate()?;
        self.submit(user, request.into_draft()).await
    }

    async fn submit(&self, user: &AppUser, draft: ChecklistDraft) -> AppResult<SubmissionResponse> {
        let outcome =
            checklist_service::submit(&self.state.pool, &self.state.events, user, draft).await?;

        Ok(SubmissionResponse {
            checklist: outcome.checklist,
            maintenance_requests_created: outcome.requests_created,
            vehicle_status: outcome.vehicle.status,
        })
    }

    pub async fn list(
        &self,
        user: &AppUser,
        query: ChecklistListQuery,
    ) -> AppResult<Vec<Checklist>> {
        if let Some(class) = query.vehicle_class.as_deref() {
            if VehicleClass::parse(class).is_none() {
                return Err(AppError::BadRequest(format!(
                    "Classe de veículo '{}' inválida",
                    class
                )));
            }
        }

        let viewer = if user.is_admin() { None } else { Some(user.id) };

        ChecklistRepository::new(self.state.pool.clone())
            .list(viewer, query.vehicle_class.as_deref(), query.vehicle_id)
            .await
    }

    pub async fn get_by_id(&self, user: &AppUser, id: Uuid) -> AppResult<Checklist> {
        let checklist = ChecklistRepository::new(self.state.pool.clone())
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Checklist", &id.to_string()))?;

        if !user.is_admin() && checklist.user_id != user.id {
            return Err(AppError::Forbidden(
                "Você não tem acesso a este checklist".to_string(),
            ));
        }

        Ok(checklist)
    }
}
