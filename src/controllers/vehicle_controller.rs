//! Controller de veículos
//!
//! Leitura liberada para qualquer usuário autenticado; criação e edição
//! são de admin.

use std::sync::Arc;

use uuid::Uuid;
use validator::Validate;

use crate::dto::vehicle_dto::{CreateVehicleRequest, UpdateVehicleRequest};
use crate::events::{collections, EventBus};
use crate::models::user::AppUser;
use crate::models::vehicle::{Vehicle, VehicleStatus};
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::state::AppState;
use crate::utils::errors::{conflict_error, not_found_error, AppError, AppResult};

pub struct VehicleController {
    repo: VehicleRepository,
    events: Arc<EventBus>,
}

impl VehicleController {
    pub fn new(state: &AppState) -> Self {
        Self {
            repo: VehicleRepository::new(state.pool.clone()),
            events: state.events.clone(),
        }
    }

    pub async fn create(&self, user: &AppUser, request: CreateVehicleRequest) -> AppResult<Vehicle> {
        if !user.is_admin() {
            return Err(AppError::Forbidden(
                "Somente administradores podem cadastrar veículos".to_string(),
            ));
        }
        request.validate()?;

        let plate = request.plate.trim().to_uppercase();
        if self.repo.plate_exists(&plate).await? {
            return Err(conflict_error("Veículo", "placa", &plate));
        }

        let vehicle = self
            .repo
            .create(
                &plate,
                request.model.trim(),
                request.make.trim(),
                request.image_url.as_deref(),
            )
            .await?;

        tracing::info!(vehicle_id = %vehicle.id, plate = %vehicle.plate, "Veículo cadastrado");
        self.events.publish_all(&[collections::VEHICLES]);

        Ok(vehicle)
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<Vehicle> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Veículo", &id.to_string()))
    }

    pub async fn list(&self) -> AppResult<Vec<Vehicle>> {
        self.repo.list_all().await
    }

    pub async fn update(
        &self,
        user: &AppUser,
        id: Uuid,
        request: UpdateVehicleRequest,
    ) -> AppResult<Vehicle> {
        if !user.is_admin() {
            return Err(AppError::Forbidden(
                "Somente administradores podem editar veículos".to_string(),
            ));
        }
        request.validate()?;

        // Status, quando enviado, deve ser um dos literais do produto
        if let Some(status) = request.status.as_deref() {
            if VehicleStatus::parse(status).is_none() {
                return Err(AppError::BadRequest(format!(
                    "Status de veículo '{}' inválido",
                    status
                )));
            }
        }

        let plate = request.plate.map(|p| p.trim().to_uppercase());

        let vehicle = self
            .repo
            .update(
                id,
                plate.as_deref(),
                request.model.as_deref(),
                request.make.as_deref(),
                request.status.as_deref(),
                request.fuel_level,
                request.odometer,
                request.image_url.as_deref(),
            )
            .await?
            .ok_or_else(|| not_found_error("Veículo", &id.to_string()))?;

        self.events.publish_all(&[collections::VEHICLES]);

        Ok(vehicle)
    }
}
