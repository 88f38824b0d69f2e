//! Repositório de checklists
//!
//! Checklists são criados apenas dentro da transação de submissão e
//! nunca alterados depois.

use std::collections::BTreeMap;

use sqlx::types::Json;
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::models::checklist::{Checklist, ChecklistPhotos};
use crate::utils::errors::AppResult;

/// Linha nova de checklist, pronta para INSERT
#[derive(Debug, Clone)]
pub struct NewChecklist {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub user_id: Uuid,
    pub driver_name: String,
    pub vehicle_class: String,
    pub checklist_type: String,
    pub odometer: i64,
    pub fuel_level: Option<i32>,
    pub items: BTreeMap<String, String>,
    pub notes: Option<String>,
    pub photos: ChecklistPhotos,
}

pub struct ChecklistRepository {
    pool: PgPool,
}

impl ChecklistRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn insert(
        tx: &mut Transaction<'_, Postgres>,
        new: &NewChecklist,
    ) -> AppResult<Checklist> {
        let checklist = sqlx::query_as::<_, Checklist>(
            r#"
            INSERT INTO checklists (
                id, vehicle_id, user_id, driver_name, vehicle_class, checklist_type,
                odometer, fuel_level, items, notes,
                dashboard_photo_url, front_photo_url, back_photo_url,
                left_side_photo_url, right_side_photo_url,
                fuel_level_photo_url, km_photo_url, engine_photo_url, trunk_photo_url
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10,
                    $11, $12, $13, $14, $15, $16, $17, $18, $19)
            RETURNING *
            "#,
        )
        .bind(new.id)
        .bind(new.vehicle_id)
        .bind(new.user_id)
        .bind(&new.driver_name)
        .bind(&new.vehicle_class)
        .bind(&new.checklist_type)
        .bind(new.odometer)
        .bind(new.fuel_level)
        .bind(Json(&new.items))
        .bind(&new.notes)
        .bind(&new.photos.dashboard_photo_url)
        .bind(&new.photos.front_photo_url)
        .bind(&new.photos.back_photo_url)
        .bind(&new.photos.left_side_photo_url)
        .bind(&new.photos.right_side_photo_url)
        .bind(&new.photos.fuel_level_photo_url)
        .bind(&new.photos.km_photo_url)
        .bind(&new.photos.engine_photo_url)
        .bind(&new.photos.trunk_photo_url)
        .fetch_one(&mut **tx)
        .await?;

        Ok(checklist)
    }

    /// Listagem, do mais recente para o mais antigo.
    ///
    /// `viewer` restringe aos checklists do próprio usuário (motorista);
    /// admin passa None e enxerga a frota inteira.
    pub async fn list(
        &self,
        viewer: Option<Uuid>,
        vehicle_class: Option<&str>,
        vehicle_id: Option<Uuid>,
    ) -> AppResult<Vec<Checklist>> {
        let checklists = sqlx::query_as::<_, Checklist>(
            r#"
            SELECT * FROM checklists
            WHERE ($1::uuid IS NULL OR user_id = $1)
              AND ($2::text IS NULL OR vehicle_class = $2)
              AND ($3::uuid IS NULL OR vehicle_id = $3)
            ORDER BY date DESC
            "#,
        )
        .bind(viewer)
        .bind(vehicle_class)
        .bind(vehicle_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(checklists)
    }

    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Checklist>> {
        let checklist = sqlx::query_as::<_, Checklist>("SELECT * FROM checklists WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(checklist)
    }
}
