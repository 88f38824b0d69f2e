//! Repositório de veículos

use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::models::vehicle::{Vehicle, VehicleStatus};
use crate::utils::errors::AppResult;

pub struct VehicleRepository {
    pool: PgPool,
}

impl VehicleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Criar veículo com os defaults do produto:
    /// Operacional, tanque cheio, odômetro zerado
    pub async fn create(
        &self,
        plate: &str,
        model: &str,
        make: &str,
        image_url: Option<&str>,
    ) -> AppResult<Vehicle> {
        let vehicle = sqlx::query_as::<_, Vehicle>(
            r#"
            INSERT INTO vehicles (id, plate, model, make, status, fuel_level, odometer, image_url)
            VALUES ($1, $2, $3, $4, $5, 100, 0, $6)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(plate)
        .bind(model)
        .bind(make)
        .bind(VehicleStatus::Operational.as_str())
        .bind(image_url)
        .fetch_one(&self.pool)
        .await?;

        Ok(vehicle)
    }

    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Vehicle>> {
        let vehicle = sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(vehicle)
    }

    pub async fn plate_exists(&self, plate: &str) -> AppResult<bool> {
        let result: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM vehicles WHERE plate = $1)")
                .bind(plate)
                .fetch_one(&self.pool)
                .await?;

        Ok(result.0)
    }

    pub async fn list_all(&self) -> AppResult<Vec<Vehicle>> {
        let vehicles =
            sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles ORDER BY plate ASC")
                .fetch_all(&self.pool)
                .await?;

        Ok(vehicles)
    }

    /// Atualização parcial (edição de admin). Campos None preservam o valor atual.
    #[allow(clippy::too_many_arguments)]
    pub async fn update(
        &self,
        id: Uuid,
        plate: Option<&str>,
        model: Option<&str>,
        make: Option<&str>,
        status: Option<&str>,
        fuel_level: Option<i32>,
        odometer: Option<i64>,
        image_url: Option<&str>,
    ) -> AppResult<Option<Vehicle>> {
        let vehicle = sqlx::query_as::<_, Vehicle>(
            r#"
            UPDATE vehicles
            SET plate = COALESCE($2, plate),
                model = COALESCE($3, model),
                make = COALESCE($4, make),
                status = COALESCE($5, status),
                fuel_level = COALESCE($6, fuel_level),
                odometer = COALESCE($7, odometer),
                image_url = COALESCE($8, image_url)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(plate)
        .bind(model)
        .bind(make)
        .bind(status)
        .bind(fuel_level)
        .bind(odometer)
        .bind(image_url)
        .fetch_optional(&self.pool)
        .await?;

        Ok(vehicle)
    }

    /// Atualização derivada de checklist, dentro da transação de submissão.
    /// Combustível só muda quando informado (frota pesada).
    pub async fn apply_checklist_update(
        tx: &mut Transaction<'_, Postgres>,
        id: Uuid,
        status: VehicleStatus,
        odometer: i64,
        fuel_level: Option<i32>,
        last_check: DateTime<Utc>,
    ) -> AppResult<Vehicle> {
        let vehicle = sqlx::query_as::<_, Vehicle>(
            r#"
            UPDATE vehicles
            SET status = $2,
                odometer = $3,
                fuel_level = COALESCE($4, fuel_level),
                last_check = $5
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(status.as_str())
        .bind(odometer)
        .bind(fuel_level)
        .bind(last_check)
        .fetch_one(&mut **tx)
        .await?;

        Ok(vehicle)
    }
}
