//! Fluxo de submissão de checklist
//!
//! A submissão é dividida em duas fases: [`plan_submission`] é pura e
//! decide tudo (validações, status derivado do veículo, solicitações de
//! manutenção a criar); `submit` apenas executa o plano dentro de uma
//! única transação. Ou tudo entra, ou nada entra.

use std::collections::BTreeMap;

use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::events::{collections, EventBus};
use crate::models::catalog::{self, is_issue_status};
use crate::models::checklist::{Checklist, ChecklistPhotos, ChecklistType, VehicleClass};
use crate::models::user::AppUser;
use crate::models::vehicle::{Vehicle, VehicleStatus};
use crate::repositories::checklist_repository::{ChecklistRepository, NewChecklist};
use crate::repositories::maintenance_request_repository::{
    MaintenanceRequestRepository, NewMaintenanceRequest,
};
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::utils::errors::{AppError, AppResult};

/// Submissão ainda não validada, já normalizada pela classe da frota
#[derive(Debug, Clone)]
pub struct ChecklistDraft {
    pub vehicle_id: Uuid,
    pub vehicle_class: VehicleClass,
    pub driver_name: String,
    pub checklist_type: String,
    pub odometer: i64,
    pub fuel_level: Option<i32>,
    pub items: BTreeMap<String, String>,
    pub notes: Option<String>,
    pub photos: ChecklistPhotos,
}

/// Plano de escrita produzido por [`plan_submission`]
#[derive(Debug)]
pub struct SubmissionPlan {
    pub new_checklist: NewChecklist,
    pub vehicle_status: VehicleStatus,
    pub new_requests: Vec<NewMaintenanceRequest>,
    pub has_issues: bool,
}

/// Resultado da submissão persistida
#[derive(Debug)]
pub struct SubmissionOutcome {
    pub checklist: Checklist,
    pub vehicle: Vehicle,
    pub requests_created: usize,
}

/// Validar o draft e decidir todas as escritas derivadas.
///
/// Um item problemático qualquer coloca o veículo em "Com Problemas" e
/// gera exatamente uma solicitação de manutenção por item reprovado.
/// Sem problemas, o veículo volta a "Operacional".
pub fn plan_submission(
    draft: ChecklistDraft,
    vehicle: &Vehicle,
    user: &AppUser,
) -> AppResult<SubmissionPlan> {
    if draft.driver_name.trim().len() < 3 {
        return Err(AppError::BadRequest(
            "O nome do motorista é obrigatório.".to_string(),
        ));
    }

    let checklist_type = ChecklistType::parse(&draft.checklist_type).ok_or_else(|| {
        AppError::BadRequest(format!(
            "Tipo de checklist '{}' inválido (esperado 'Saída' ou 'Retorno')",
            draft.checklist_type
        ))
    })?;

    if draft.odometer < 1 {
        return Err(AppError::BadRequest(
            "A quilometragem é obrigatória.".to_string(),
        ));
    }

    if let Some(fuel) = draft.fuel_level {
        if !(0..=100).contains(&fuel) {
            return Err(AppError::BadRequest(
                "Nível de combustível deve estar entre 0 e 100.".to_string(),
            ));
        }
    }

    catalog::validate_items(draft.vehicle_class, &draft.items)?;

    let missing = draft.photos.missing_for(draft.vehicle_class);
    if !missing.is_empty() {
        return Err(AppError::BadRequest(format!(
            "Fotos obrigatórias ausentes: {}",
            missing.join(", ")
        )));
    }

    let checklist_id = Uuid::new_v4();

    // Uma solicitação por item reprovado, com os dados do veículo e do
    // motorista congelados no momento da submissão
    let new_requests: Vec<NewMaintenanceRequest> = draft
        .items
        .iter()
        .filter(|(_, status)| is_issue_status(status))
        .map(|(item_id, status)| NewMaintenanceRequest {
            id: Uuid::new_v4(),
            vehicle_id: vehicle.id,
            checklist_id,
            item_id: item_id.clone(),
            item_name: catalog::item_label(item_id).to_string(),
            reported_status: status.clone(),
            driver_name: draft.driver_name.clone(),
            vehicle_plate: vehicle.plate.clone(),
            vehicle_model: vehicle.model.clone(),
        })
        .collect();

    let has_issues = !new_requests.is_empty();
    let vehicle_status = if has_issues {
        VehicleStatus::HasProblems
    } else {
        VehicleStatus::Operational
    };

    let new_checklist = NewChecklist {
        id: checklist_id,
        vehicle_id: vehicle.id,
        user_id: user.id,
        driver_name: draft.driver_name,
        vehicle_class: draft.vehicle_class.as_str().to_string(),
        checklist_type: checklist_type.as_str().to_string(),
        odometer: draft.odometer,
        fuel_level: draft.fuel_level,
        items: draft.items,
        notes: draft.notes,
        photos: draft.photos,
    };

    Ok(SubmissionPlan {
        new_checklist,
        vehicle_status,
        new_requests,
        has_issues,
    })
}

/// Executar a submissão: planejar, abrir transação, escrever checklist +
/// veículo + solicitações, commitar, e só então notificar os assinantes.
pub async fn submit(
    pool: &PgPool,
    events: &EventBus,
    user: &AppUser,
    draft: ChecklistDraft,
) -> AppResult<SubmissionOutcome> {
    let vehicle_repo = VehicleRepository::new(pool.clone());
    let vehicle = vehicle_repo
        .find_by_id(draft.vehicle_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Veículo não encontrado".to_string()))?;

    let plan = plan_submission(draft, &vehicle, user)?;

    let mut tx = pool.begin().await?;

    let checklist = ChecklistRepository::insert(&mut tx, &plan.new_checklist).await?;

    let vehicle = VehicleRepository::apply_checklist_update(
        &mut tx,
        vehicle.id,
        plan.vehicle_status,
        plan.new_checklist.odometer,
        plan.new_checklist.fuel_level,
        Utc::now(),
    )
    .await?;

    for request in &plan.new_requests {
        MaintenanceRequestRepository::insert(&mut tx, request).await?;
    }

    tx.commit().await?;

    tracing::info!(
        checklist_id = %checklist.id,
        vehicle_plate = %vehicle.plate,
        requests = plan.new_requests.len(),
        "Checklist registrado"
    );

    if plan.new_requests.is_empty() {
        events.publish_all(&[collections::CHECKLISTS, collections::VEHICLES]);
    } else {
        events.publish_all(&[
            collections::CHECKLISTS,
            collections::VEHICLES,
            collections::MAINTENANCE_REQUESTS,
        ]);
    }

    Ok(SubmissionOutcome {
        checklist,
        vehicle,
        requests_created: plan.new_requests.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::catalog::{catalog_for, CatalogItem, StatusDomain};
    use crate::models::user::UserRole;
    use chrono::Utc;

    fn vehicle(class_plate: &str) -> Vehicle {
        Vehicle {
            id: Uuid::new_v4(),
            plate: class_plate.to_string(),
            model: "Atego 1719".to_string(),
            make: "Mercedes-Benz".to_string(),
            status: "Operacional".to_string(),
            fuel_level: 80,
            odometer: 120_000,
            image_url: None,
            last_check: None,
            created_at: Utc::now(),
        }
    }

    fn driver() -> AppUser {
        AppUser {
            id: Uuid::new_v4(),
            name: "João Pereira".to_string(),
            email: "joao@rotacerta.com".to_string(),
            role: UserRole::Driver,
            photo_url: None,
        }
    }

    fn full_items(class: VehicleClass) -> BTreeMap<String, String> {
        let mut items = BTreeMap::new();
        for section in catalog_for(class) {
            for item in section.items {
                items.insert(item.id.to_string(), good_value(item).to_string());
            }
        }
        items
    }

    fn good_value(item: &CatalogItem) -> &'static str {
        match item.domain {
            StatusDomain::ThreeValue => "ok",
            StatusDomain::SevenValue => "Excelente",
        }
    }

    fn heavy_photos() -> ChecklistPhotos {
        ChecklistPhotos {
            dashboard_photo_url: Some("https://fotos/painel.jpg".to_string()),
            front_photo_url: Some("https://fotos/frente.jpg".to_string()),
            back_photo_url: Some("https://fotos/tras.jpg".to_string()),
            left_side_photo_url: Some("https://fotos/esquerda.jpg".to_string()),
            right_side_photo_url: Some("https://fotos/direita.jpg".to_string()),
            ..ChecklistPhotos::default()
        }
    }

    fn light_photos() -> ChecklistPhotos {
        ChecklistPhotos {
            front_photo_url: Some("https://fotos/frente.jpg".to_string()),
            back_photo_url: Some("https://fotos/tras.jpg".to_string()),
            left_side_photo_url: Some("https://fotos/esquerda.jpg".to_string()),
            right_side_photo_url: Some("https://fotos/direita.jpg".to_string()),
            fuel_level_photo_url: Some("https://fotos/combustivel.jpg".to_string()),
            km_photo_url: Some("https://fotos/km.jpg".to_string()),
            engine_photo_url: Some("https://fotos/motor.jpg".to_string()),
            trunk_photo_url: Some("https://fotos/porta-malas.jpg".to_string()),
            ..ChecklistPhotos::default()
        }
    }

    fn heavy_draft(v: &Vehicle) -> ChecklistDraft {
        ChecklistDraft {
            vehicle_id: v.id,
            vehicle_class: VehicleClass::Heavy,
            driver_name: "João Pereira".to_string(),
            checklist_type: "Saída".to_string(),
            odometer: 120_050,
            fuel_level: Some(75),
            items: full_items(VehicleClass::Heavy),
            notes: None,
            photos: heavy_photos(),
        }
    }

    fn light_draft(v: &Vehicle) -> ChecklistDraft {
        ChecklistDraft {
            vehicle_id: v.id,
            vehicle_class: VehicleClass::Light,
            driver_name: "Maria Souza".to_string(),
            checklist_type: "Retorno".to_string(),
            odometer: 45_300,
            fuel_level: None,
            items: full_items(VehicleClass::Light),
            notes: Some("Tudo em ordem".to_string()),
            photos: light_photos(),
        }
    }

    #[test]
    fn checklist_pesado_sem_problemas_deixa_veiculo_operacional() {
        let v = vehicle("ABC-1234");
        let plan = plan_submission(heavy_draft(&v), &v, &driver()).unwrap();

        assert!(!plan.has_issues);
        assert!(plan.new_requests.is_empty());
        assert_eq!(plan.vehicle_status, VehicleStatus::Operational);
        assert_eq!(plan.new_checklist.fuel_level, Some(75));
        assert_eq!(plan.new_checklist.checklist_type, "Saída");
    }

    #[test]
    fn item_reprovado_gera_solicitacao_e_marca_veiculo() {
        let v = vehicle("ABC-1234");
        let mut draft = heavy_draft(&v);
        draft
            .items
            .insert("farol_esquerdo".to_string(), "issue".to_string());

        let plan = plan_submission(draft, &v, &driver()).unwrap();

        assert!(plan.has_issues);
        assert_eq!(plan.vehicle_status, VehicleStatus::HasProblems);
        assert_eq!(plan.new_requests.len(), 1);

        let request = &plan.new_requests[0];
        assert_eq!(request.item_id, "farol_esquerdo");
        assert_eq!(request.item_name, "Farol Esquerdo");
        assert_eq!(request.reported_status, "issue");
        assert_eq!(request.vehicle_plate, v.plate);
        assert_eq!(request.vehicle_model, v.model);
        assert_eq!(request.checklist_id, plan.new_checklist.id);
    }

    #[test]
    fn uma_solicitacao_por_item_reprovado() {
        let v = vehicle("DEF-5678");
        let mut draft = light_draft(&v);
        draft
            .items
            .insert("pneu_estepe".to_string(), "issue".to_string());
        draft
            .items
            .insert("lataria".to_string(), "Avariado".to_string());
        draft
            .items
            .insert("correias".to_string(), "Desgastado".to_string());

        let plan = plan_submission(draft.clone(), &v, &driver()).unwrap();

        let flagged = draft
            .items
            .values()
            .filter(|s| is_issue_status(s))
            .count();
        assert_eq!(plan.new_requests.len(), flagged);
        assert_eq!(plan.new_requests.len(), 3);
    }

    #[test]
    fn checklist_leve_nao_propaga_combustivel() {
        let v = vehicle("DEF-5678");
        let plan = plan_submission(light_draft(&v), &v, &driver()).unwrap();

        assert!(plan.new_checklist.fuel_level.is_none());
        assert_eq!(plan.vehicle_status, VehicleStatus::Operational);
    }

    #[test]
    fn status_pendente_do_dominio_de_sete_valores_nao_e_problema() {
        let v = vehicle("DEF-5678");
        let mut draft = light_draft(&v);
        draft
            .items
            .insert("nivel_oleo".to_string(), "Pendente".to_string());
        draft
            .items
            .insert("bancos".to_string(), "Manchado".to_string());

        let plan = plan_submission(draft, &v, &driver()).unwrap();
        assert!(!plan.has_issues);
        assert_eq!(plan.vehicle_status, VehicleStatus::Operational);
    }

    #[test]
    fn rejeita_tipo_de_checklist_invalido() {
        let v = vehicle("ABC-1234");
        let mut draft = heavy_draft(&v);
        draft.checklist_type = "saida".to_string();

        assert!(plan_submission(draft, &v, &driver()).is_err());
    }

    #[test]
    fn rejeita_quilometragem_zerada() {
        let v = vehicle("ABC-1234");
        let mut draft = heavy_draft(&v);
        draft.odometer = 0;

        assert!(plan_submission(draft, &v, &driver()).is_err());
    }

    #[test]
    fn rejeita_foto_obrigatoria_ausente() {
        let v = vehicle("ABC-1234");
        let mut draft = heavy_draft(&v);
        draft.photos.dashboard_photo_url = None;

        assert!(plan_submission(draft, &v, &driver()).is_err());

        // A frota leve não exige painel, mas exige porta-malas
        let v = vehicle("DEF-5678");
        let mut draft = light_draft(&v);
        draft.photos.trunk_photo_url = None;

        assert!(plan_submission(draft, &v, &driver()).is_err());
    }

    #[test]
    fn rejeita_checklist_incompleto() {
        let v = vehicle("ABC-1234");
        let mut draft = heavy_draft(&v);
        draft.items.remove("extintor");

        assert!(plan_submission(draft, &v, &driver()).is_err());
    }
}
