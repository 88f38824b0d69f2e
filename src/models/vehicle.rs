//! Modelo de Vehicle
//!
//! Struct de veículo mapeando a tabela `vehicles`. O status persiste como
//! TEXT com os literais pt-BR do produto.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Estado do veículo
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VehicleStatus {
    #[serde(rename = "Operacional")]
    Operational,
    #[serde(rename = "Manutenção")]
    Maintenance,
    #[serde(rename = "Com Problemas")]
    HasProblems,
}

impl VehicleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleStatus::Operational => "Operacional",
            VehicleStatus::Maintenance => "Manutenção",
            VehicleStatus::HasProblems => "Com Problemas",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Operacional" => Some(VehicleStatus::Operational),
            "Manutenção" => Some(VehicleStatus::Maintenance),
            "Com Problemas" => Some(VehicleStatus::HasProblems),
            _ => None,
        }
    }
}

/// Vehicle - mapeia exatamente a tabela vehicles
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Vehicle {
    pub id: Uuid,
    pub plate: String,
    pub model: String,
    pub make: String,
    pub status: String,
    pub fuel_level: i32,
    pub odometer: i64,
    pub image_url: Option<String>,
    pub last_check: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_roundtrip_com_literais_do_produto() {
        assert_eq!(VehicleStatus::Operational.as_str(), "Operacional");
        assert_eq!(VehicleStatus::HasProblems.as_str(), "Com Problemas");
        assert_eq!(
            VehicleStatus::parse("Manutenção"),
            Some(VehicleStatus::Maintenance)
        );
        assert_eq!(VehicleStatus::parse("active"), None);
    }
}
