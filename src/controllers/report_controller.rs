//! Controller de relatórios
//!
//! O dashboard é aberto a qualquer usuário autenticado; o relatório
//! unificado e as exportações de checklist são de admin.

use uuid::Uuid;

use crate::dto::report_dto::{DashboardSummary, VehicleIssueGroup};
use crate::models::checklist::VehicleClass;
use crate::models::user::AppUser;
use crate::repositories::checklist_repository::ChecklistRepository;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::services::report_service;
use crate::state::AppState;
use crate::utils::errors::{not_found_error, AppError, AppResult};

/// Arquivo exportado pronto para download
pub struct ChecklistExport {
    pub file_name: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

pub struct ReportController {
    state: AppState,
}

impl ReportController {
    pub fn new(state: &AppState) -> Self {
        Self {
            state: state.clone(),
        }
    }

    pub async fn dashboard(&self) -> AppResult<DashboardSummary> {
        report_service::dashboard(&self.state.pool).await
    }

    pub async fn unified(
        &self,
        user: &AppUser,
        vehicle_class: Option<&str>,
    ) -> AppResult<Vec<VehicleIssueGroup>> {
        self.require_admin(user)?;

        if let Some(class) = vehicle_class {
            if VehicleClass::parse(class).is_none() {
                return Err(AppError::BadRequest(format!(
                    "Classe de veículo '{}' inválida",
                    class
                )));
            }
        }

        report_service::unified_report(&self.state.pool, vehicle_class).await
    }

    pub async fn export_pdf(&self, user: &AppUser, checklist_id: Uuid) -> AppResult<ChecklistExport> {
        self.require_admin(user)?;
        let (checklist, vehicle, class) = self.load(checklist_id).await?;

        let bytes = report_service::render_pdf(&checklist, &vehicle)?;
        Ok(ChecklistExport {
            file_name: report_service::export_file_name(class, &vehicle.plate, checklist.id),
            content_type: "application/pdf",
            bytes,
        })
    }

    pub async fn export_text(&self, user: &AppUser, checklist_id: Uuid) -> AppResult<String> {
        self.require_admin(user)?;
        let (checklist, vehicle, _) = self.load(checklist_id).await?;

        report_service::render_text(&checklist, &vehicle)
    }

    fn require_admin(&self, user: &AppUser) -> AppResult<()> {
        if !user.is_admin() {
            return Err(AppError::Forbidden(
                "Acesso restrito a administradores".to_string(),
            ));
        }
        Ok(())
    }

    async fn load(
        &self,
        checklist_id: Uuid,
    ) -> AppResult<(crate::models::checklist::Checklist, crate::models::vehicle::Vehicle, VehicleClass)>
    {
        let checklist = ChecklistRepository::new(self.state.pool.clone())
            .find_by_id(checklist_id)
            .await?
            .ok_or_else(|| not_found_error("Checklist", &checklist_id.to_string()))?;

        let vehicle = VehicleRepository::new(self.state.pool.clone())
            .find_by_id(checklist.vehicle_id)
            .await?
            .ok_or_else(|| not_found_error("Veículo", &checklist.vehicle_id.to_string()))?;

        let class = VehicleClass::parse(&checklist.vehicle_class).ok_or_else(|| {
            AppError::Internal(format!(
                "Classe de veículo desconhecida: '{}'",
                checklist.vehicle_class
            ))
        })?;

        Ok((checklist, vehicle, class))
    }
}
