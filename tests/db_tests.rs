//! Testes de integração contra Postgres de verdade.
//!
//! Rodam apenas quando DATABASE_URL está definida no ambiente; sem ela,
//! cada teste retorna cedo sem falhar.

use std::collections::BTreeMap;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use uuid::Uuid;

use rota_certa_backend::database::connection::run_migrations;
use rota_certa_backend::events::EventBus;
use rota_certa_backend::models::catalog::{catalog_for, StatusDomain};
use rota_certa_backend::models::checklist::{ChecklistPhotos, VehicleClass};
use rota_certa_backend::models::user::{AppUser, UserRole};
use rota_certa_backend::models::vehicle::VehicleStatus;
use rota_certa_backend::repositories::checklist_repository::ChecklistRepository;
use rota_certa_backend::repositories::maintenance_request_repository::{
    MaintenanceRequestRepository, NewMaintenanceRequest,
};
use rota_certa_backend::repositories::user_repository::UserRepository;
use rota_certa_backend::repositories::vehicle_repository::VehicleRepository;
use rota_certa_backend::services::checklist_service::{self, ChecklistDraft};

async fn test_pool() -> Option<PgPool> {
    let url = std::env::var("DATABASE_URL").ok()?;
    let pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&url)
        .await
        .expect("conectar ao banco de testes");
    run_migrations(&pool).await.expect("migrations");
    Some(pool)
}

fn driver() -> AppUser {
    AppUser {
        id: Uuid::new_v4(),
        name: "João Pereira".to_string(),
        email: format!("joao+{}@rotacerta.com", Uuid::new_v4()),
        role: UserRole::Driver,
        photo_url: None,
    }
}

fn full_items(class: VehicleClass) -> BTreeMap<String, String> {
    let mut items = BTreeMap::new();
    for section in catalog_for(class) {
        for item in section.items {
            let value = match item.domain {
                StatusDomain::ThreeValue => "ok",
                StatusDomain::SevenValue => "Excelente",
            };
            items.insert(item.id.to_string(), value.to_string());
        }
    }
    items
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

fn heavy_draft(vehicle_id: Uuid, odometer: i64) -> ChecklistDraft {
    ChecklistDraft {
        vehicle_id,
        vehicle_class: VehicleClass::Heavy,
        driver_name: "João Pereira".to_string(),
        checklist_type: "Saída".to_string(),
        odometer,
        fuel_level: Some(70),
        items: full_items(VehicleClass::Heavy),
        notes: None,
        photos: heavy_photos(),
    }
}

#[tokio::test]
async fn cadastro_de_veiculo_preserva_defaults() {
    let Some(pool) = test_pool().await else { return };
    let repo = VehicleRepository::new(pool.clone());

    let created = repo
        .create("ABC1234", "Fiorino", "Fiat", None)
        .await
        .unwrap();

    let found = repo.find_by_id(created.id).await.unwrap().unwrap();
    assert_eq!(found.plate, "ABC1234");
    assert_eq!(found.make, "Fiat");
    assert_eq!(found.model, "Fiorino");
    assert_eq!(found.status, "Operacional");
    assert_eq!(found.fuel_level, 100);
    assert_eq!(found.odometer, 0);
    assert!(found.last_check.is_none());
}

#[tokio::test]
async fn submissao_com_problema_escreve_as_tres_colecoes() {
    let Some(pool) = test_pool().await else { return };
    let events = EventBus::default();
    let user = driver();

    let vehicle = VehicleRepository::new(pool.clone())
        .create("GHT5B21", "Atego 1719", "Mercedes-Benz", None)
        .await
        .unwrap();

    let mut draft = heavy_draft(vehicle.id, 500);
    draft
        .items
        .insert("farol_esquerdo".to_string(), "issue".to_string());

    let outcome = checklist_service::submit(&pool, &events, &user, draft)
        .await
        .unwrap();

    assert_eq!(outcome.requests_created, 1);
    assert_eq!(outcome.vehicle.status, "Com Problemas");
    assert_eq!(outcome.vehicle.odometer, 500);
    assert!(outcome.vehicle.last_check.is_some());

    let stored = ChecklistRepository::new(pool.clone())
        .find_by_id(outcome.checklist.id)
        .await
        .unwrap();
    assert!(stored.is_some());

    let requests = MaintenanceRequestRepository::new(pool.clone())
        .list_all()
        .await
        .unwrap();
    let ours: Vec<_> = requests
        .iter()
        .filter(|r| r.checklist_id == outcome.checklist.id)
        .collect();
    assert_eq!(ours.len(), 1);
    assert_eq!(ours[0].item_id, "farol_esquerdo");
    assert_eq!(ours[0].request_status, "Pendente");
}

#[tokio::test]
async fn escrita_rejeitada_no_lote_nao_deixa_estado_parcial() {
    let Some(pool) = test_pool().await else { return };
    let user = driver();

    let vehicle = VehicleRepository::new(pool.clone())
        .create("JKL9012", "Sprinter 416", "Mercedes-Benz", None)
        .await
        .unwrap();

    let draft = heavy_draft(vehicle.id, 700);
    let plan = checklist_service::plan_submission(draft, &vehicle, &user).unwrap();
    let checklist_id = plan.new_checklist.id;

    // Reproduzir o lote da submissão, com a última escrita violando a FK
    // de checklist_id (simula uma escrita rejeitada no meio do lote)
    let mut tx = pool.begin().await.unwrap();
    ChecklistRepository::insert(&mut tx, &plan.new_checklist)
        .await
        .unwrap();
    VehicleRepository::apply_checklist_update(
        &mut tx,
        vehicle.id,
        plan.vehicle_status,
        700,
        plan.new_checklist.fuel_level,
        chrono::Utc::now(),
    )
    .await
    .unwrap();

    let poisoned = NewMaintenanceRequest {
        id: Uuid::new_v4(),
        vehicle_id: vehicle.id,
        checklist_id: Uuid::new_v4(), // não existe
        item_id: "farol_esquerdo".to_string(),
        item_name: "Farol Esquerdo".to_string(),
        reported_status: "issue".to_string(),
        driver_name: user.name.clone(),
        vehicle_plate: vehicle.plate.clone(),
        vehicle_model: vehicle.model.clone(),
    };
    let result = MaintenanceRequestRepository::insert(&mut tx, &poisoned).await;
    assert!(result.is_err());

    tx.rollback().await.unwrap();

    // Nada do lote ficou visível: nem checklist, nem update do veículo,
    // nem solicitação
    let stored = ChecklistRepository::new(pool.clone())
        .find_by_id(checklist_id)
        .await
        .unwrap();
    assert!(stored.is_none());

    let after = VehicleRepository::new(pool.clone())
        .find_by_id(vehicle.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(after.status, VehicleStatus::Operational.as_str());
    assert_eq!(after.odometer, 0);
    assert!(after.last_check.is_none());

    let requests = MaintenanceRequestRepository::new(pool.clone())
        .list_all()
        .await
        .unwrap();
    assert!(requests.iter().all(|r| r.vehicle_id != vehicle.id));
}

#[tokio::test]
async fn edicao_de_perfil_atualiza_nome_e_foto() {
    let Some(pool) = test_pool().await else { return };
    let repo = UserRepository::new(pool.clone());

    let email = format!("maria+{}@rotacerta.com", Uuid::new_v4());
    let user = repo
        .create("Maria Silva", &email, "hash-de-teste", "driver")
        .await
        .unwrap();

    let updated = repo
        .update_profile(
            user.id,
            Some("Maria Souza"),
            Some("https://fotos/maria.jpg"),
        )
        .await
        .unwrap()
        .unwrap();

    assert_eq!(updated.name, "Maria Souza");
    assert_eq!(updated.photo_url.as_deref(), Some("https://fotos/maria.jpg"));
    assert_eq!(updated.email, email);
    assert_eq!(updated.user_type, "driver");

    // None preserva o valor atual
    let unchanged = repo
        .update_profile(user.id, None, None)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(unchanged.name, "Maria Souza");
    assert_eq!(unchanged.photo_url.as_deref(), Some("https://fotos/maria.jpg"));
}
