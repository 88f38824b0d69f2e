use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

// Alerta recente exibido no dashboard
#[derive(Debug, Serialize)]
pub struct DashboardAlert {
    pub checklist_id: Uuid,
    pub vehicle_plate: String,
    pub vehicle_model: String,
    pub driver_name: String,
    pub date: DateTime<Utc>,
    pub problem_items: Vec<String>,
}

// Contadores agregados da frota
#[derive(Debug, Serialize)]
pub struct DashboardSummary {
    pub total_vehicles: i64,
    pub vehicles_with_problems: i64,
    pub vehicles_in_maintenance: i64,
    pub low_fuel_vehicles: i64,
    pub recent_alerts: Vec<DashboardAlert>,
}

// Item reprovado dentro de um checklist
#[derive(Debug, Clone, Serialize)]
pub struct FlaggedItem {
    pub item_id: String,
    pub item_name: String,
    pub status: String,
}

// Um checklist com problemas, dentro do agrupamento por veículo
#[derive(Debug, Serialize)]
pub struct ChecklistIssues {
    pub checklist_id: Uuid,
    pub checklist_type: String,
    pub driver_name: String,
    pub date: DateTime<Utc>,
    pub flagged_items: Vec<FlaggedItem>,
}

// Agrupamento do relatório unificado: veículo -> checklists com problemas
#[derive(Debug, Serialize)]
pub struct VehicleIssueGroup {
    pub vehicle_id: Uuid,
    pub plate: String,
    pub model: String,
    pub status: String,
    pub checklists: Vec<ChecklistIssues>,
}
