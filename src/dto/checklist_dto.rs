use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::checklist::{Checklist, ChecklistPhotos, VehicleClass};
use crate::services::checklist_service::ChecklistDraft;

// Request de submissão de checklist pesado.
// Combustível é informado manualmente e propagado ao veículo.
#[derive(Debug, Deserialize, Validate)]
pub struct HeavyChecklistRequest {
    pub vehicle_id: Uuid,

    #[validate(length(min = 3, message = "O nome do motorista é obrigatório."))]
    pub driver_name: String,

    #[validate(length(min = 1, message = "O tipo de checklist é obrigatório."))]
    pub checklist_type: String,

    #[validate(range(min = 1, message = "A quilometragem é obrigatória."))]
    pub odometer: i64,

    #[validate(range(min = 0, max = 100, message = "Nível de combustível deve estar entre 0 e 100."))]
    pub fuel_level: i32,

    pub items: BTreeMap<String, String>,
    pub notes: Option<String>,

    pub dashboard_photo_url: Option<String>,
    pub front_photo_url: Option<String>,
    pub back_photo_url: Option<String>,
    pub left_side_photo_url: Option<String>,
    pub right_side_photo_url: Option<String>,
}

impl HeavyChecklistRequest {
    pub fn into_draft(self) -> ChecklistDraft {
        ChecklistDraft {
            vehicle_id: self.vehicle_id,
            vehicle_class: VehicleClass::Heavy,
            driver_name: self.driver_name,
            checklist_type: self.checklist_type,
            odometer: self.odometer,
            fuel_level: Some(self.fuel_level),
            items: self.items,
            notes: self.notes,
            photos: ChecklistPhotos {
                dashboard_photo_url: self.dashboard_photo_url,
                front_photo_url: self.front_photo_url,
                back_photo_url: self.back_photo_url,
                left_side_photo_url: self.left_side_photo_url,
                right_side_photo_url: self.right_side_photo_url,
                ..ChecklistPhotos::default()
            },
        }
    }
}

// Request de submissão de checklist leve.
// O combustível é registrado por foto, não por número.
#[derive(Debug, Deserialize, Validate)]
pub struct LightChecklistRequest {
    pub vehicle_id: Uuid,

    #[validate(length(min = 3, message = "O nome do motorista é obrigatório."))]
    pub driver_name: String,

    #[validate(length(min = 1, message = "O tipo de checklist é obrigatório."))]
    pub checklist_type: String,

    #[validate(range(min = 1, message = "A quilometragem é obrigatória."))]
    pub odometer: i64,

    pub items: BTreeMap<String, String>,
    pub notes: Option<String>,

    pub front_photo_url: Option<String>,
    pub back_photo_url: Option<String>,
    pub left_side_photo_url: Option<String>,
    pub right_side_photo_url: Option<String>,
    pub fuel_level_photo_url: Option<String>,
    pub km_photo_url: Option<String>,
    pub engine_photo_url: Option<String>,
    pub trunk_photo_url: Option<String>,
}

impl LightChecklistRequest {
    pub fn into_draft(self) -> ChecklistDraft {
        ChecklistDraft {
            vehicle_id: self.vehicle_id,
            vehicle_class: VehicleClass::Light,
            driver_name: self.driver_name,
            checklist_type: self.checklist_type,
            odometer: self.odometer,
            fuel_level: None,
            items: self.items,
            notes: self.notes,
            photos: ChecklistPhotos {
                front_photo_url: self.front_photo_url,
                back_photo_url: self.back_photo_url,
                left_side_photo_url: self.left_side_photo_url,
                right_side_photo_url: self.right_side_photo_url,
                fuel_level_photo_url: self.fuel_level_photo_url,
                km_photo_url: self.km_photo_url,
                engine_photo_url: self.engine_photo_url,
                trunk_photo_url: self.trunk_photo_url,
                ..ChecklistPhotos::default()
            },
        }
    }
}

// Filtros de listagem de checklists
#[derive(Debug, Default, Deserialize)]
pub struct ChecklistListQuery {
    pub vehicle_class: Option<String>,
    pub vehicle_id: Option<Uuid>,
}

// Response de submissão: o checklist criado e quantos itens viraram
// solicitação de manutenção
#[derive(Debug, Serialize)]
pub struct SubmissionResponse {
    pub checklist: Checklist,
    pub maintenance_requests_created: usize,
    pub vehicle_status: String,
}
