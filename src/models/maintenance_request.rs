//! Modelo de MaintenanceRequest
//!
//! Uma solicitação de manutenção nasce como efeito colateral da submissão
//! de um checklist com item problemático. Os campos de veículo e motorista
//! são desnormalizados e congelados na criação — nunca re-join com o estado
//! atual. O status próprio da solicitação transita livremente entre os
//! quatro estados por ação direta de admin (não há grafo de transições).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Estado do workflow de uma solicitação
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MaintenanceRequestStatus {
    #[serde(rename = "Pendente")]
    Pending,
    #[serde(rename = "Comprado")]
    Purchased,
    #[serde(rename = "Instalado")]
    Installed,
    #[serde(rename = "Cancelado")]
    Cancelled,
}

impl MaintenanceRequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MaintenanceRequestStatus::Pending => "Pendente",
            MaintenanceRequestStatus::Purchased => "Comprado",
            MaintenanceRequestStatus::Installed => "Instalado",
            MaintenanceRequestStatus::Cancelled => "Cancelado",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Pendente" => Some(MaintenanceRequestStatus::Pending),
            "Comprado" => Some(MaintenanceRequestStatus::Purchased),
            "Instalado" => Some(MaintenanceRequestStatus::Installed),
            "Cancelado" => Some(MaintenanceRequestStatus::Cancelled),
            _ => None,
        }
    }
}

/// MaintenanceRequest - mapeia exatamente a tabela maintenance_requests
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MaintenanceRequest {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub checklist_id: Uuid,
    pub item_id: String,
    pub item_name: String,
    pub reported_status: String,
    pub request_status: String,
    pub driver_name: String,
    pub vehicle_plate: String,
    pub vehicle_model: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
