//! Repositório de solicitações de manutenção

use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::models::maintenance_request::{MaintenanceRequest, MaintenanceRequestStatus};
use crate::utils::errors::AppResult;

/// Linha nova de solicitação, criada junto com o checklist
#[derive(Debug, Clone)]
pub struct NewMaintenanceRequest {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub checklist_id: Uuid,
    pub item_id: String,
    pub item_name: String,
    pub reported_status: String,
    pub driver_name: String,
    pub vehicle_plate: String,
    pub vehicle_model: String,
}

pub struct MaintenanceRequestRepository {
    pool: PgPool,
}

impl MaintenanceRequestRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn insert(
        tx: &mut Transaction<'_, Postgres>,
        new: &NewMaintenanceRequest,
    ) -> AppResult<MaintenanceRequest> {
        let request = sqlx::query_as::<_, MaintenanceRequest>(
            r#"
            INSERT INTO maintenance_requests (
                id, vehicle_id, checklist_id, item_id, item_name,
                reported_status, request_status, driver_name, vehicle_plate, vehicle_model
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(new.id)
        .bind(new.vehicle_id)
        .bind(new.checklist_id)
        .bind(&new.item_id)
        .bind(&new.item_name)
        .bind(&new.reported_status)
        .bind(MaintenanceRequestStatus::Pending.as_str())
        .bind(&new.driver_name)
        .bind(&new.vehicle_plate)
        .bind(&new.vehicle_model)
        .fetch_one(&mut **tx)
        .await?;

        Ok(request)
    }

    pub async fn list_all(&self) -> AppResult<Vec<MaintenanceRequest>> {
        let requests = sqlx::query_as::<_, MaintenanceRequest>(
            "SELECT * FROM maintenance_requests ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(requests)
    }

    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<MaintenanceRequest>> {
        let request = sqlx::query_as::<_, MaintenanceRequest>(
            "SELECT * FROM maintenance_requests WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(request)
    }

    pub async fn update_status(
        &self,
        id: Uuid,
        status: MaintenanceRequestStatus,
    ) -> AppResult<Option<MaintenanceRequest>> {
        let request = sqlx::query_as::<_, MaintenanceRequest>(
            r#"
            UPDATE maintenance_requests
            SET request_status = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(status.as_str())
        .fetch_optional(&self.pool)
        .await?;

        Ok(request)
    }
}
