//! Modelo de Checklist
//!
//! Um checklist é o registro de uma vistoria (saída ou retorno) de um
//! veículo. Criado uma única vez, de forma atômica, na submissão; imutável
//! depois disso — não existem operações de edição ou exclusão.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

/// Classe da frota — decide catálogo de itens e fotos obrigatórias
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VehicleClass {
    #[serde(rename = "pesada")]
    Heavy,
    #[serde(rename = "leve")]
    Light,
}

impl VehicleClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleClass::Heavy => "pesada",
            VehicleClass::Light => "leve",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pesada" => Some(VehicleClass::Heavy),
            "leve" => Some(VehicleClass::Light),
            _ => None,
        }
    }
}

/// Tipo de checklist: saída ou retorno
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChecklistType {
    #[serde(rename = "Saída")]
    Departure,
    #[serde(rename = "Retorno")]
    Return,
}

impl ChecklistType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChecklistType::Departure => "Saída",
            ChecklistType::Return => "Retorno",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Saída" => Some(ChecklistType::Departure),
            "Retorno" => Some(ChecklistType::Return),
            _ => None,
        }
    }
}

/// Fotos anexadas a um checklist.
///
/// O subconjunto obrigatório depende da classe: a frota pesada exige
/// painel + quatro ângulos; a frota leve exige os quatro ângulos mais
/// combustível, odômetro, motor e porta-malas (sem painel).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChecklistPhotos {
    pub dashboard_photo_url: Option<String>,
    pub front_photo_url: Option<String>,
    pub back_photo_url: Option<String>,
    pub left_side_photo_url: Option<String>,
    pub right_side_photo_url: Option<String>,
    pub fuel_level_photo_url: Option<String>,
    pub km_photo_url: Option<String>,
    pub engine_photo_url: Option<String>,
    pub trunk_photo_url: Option<String>,
}

impl ChecklistPhotos {
    /// Campos obrigatórios para a classe
    pub fn required_fields(class: VehicleClass) -> &'static [&'static str] {
        match class {
            VehicleClass::Heavy => &[
                "dashboard_photo_url",
                "front_photo_url",
                "back_photo_url",
                "left_side_photo_url",
                "right_side_photo_url",
            ],
            VehicleClass::Light => &[
                "front_photo_url",
                "back_photo_url",
                "left_side_photo_url",
                "right_side_photo_url",
                "fuel_level_photo_url",
                "km_photo_url",
                "engine_photo_url",
                "trunk_photo_url",
            ],
        }
    }

    fn field(&self, name: &str) -> &Option<String> {
        match name {
            "dashboard_photo_url" => &self.dashboard_photo_url,
            "front_photo_url" => &self.front_photo_url,
            "back_photo_url" => &self.back_photo_url,
            "left_side_photo_url" => &self.left_side_photo_url,
            "right_side_photo_url" => &self.right_side_photo_url,
            "fuel_level_photo_url" => &self.fuel_level_photo_url,
            "km_photo_url" => &self.km_photo_url,
            "engine_photo_url" => &self.engine_photo_url,
            "trunk_photo_url" => &self.trunk_photo_url,
            _ => &None,
        }
    }

    /// Nomes dos campos obrigatórios ausentes ou vazios
    pub fn missing_for(&self, class: VehicleClass) -> Vec<&'static str> {
        Self::required_fields(class)
            .iter()
            .filter(|name| {
                self.field(name)
                    .as_deref()
                    .map(|url| url.trim().is_empty())
                    .unwrap_or(true)
            })
            .copied()
            .collect()
    }
}

/// Checklist - mapeia exatamente a tabela checklists
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Checklist {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub user_id: Uuid,
    pub driver_name: String,
    pub vehicle_class: String,
    pub checklist_type: String,
    pub date: DateTime<Utc>,
    pub odometer: i64,
    pub fuel_level: Option<i32>,
    pub items: Json<BTreeMap<String, String>>,
    pub notes: Option<String>,
    pub dashboard_photo_url: Option<String>,
    pub front_photo_url: Option<String>,
    pub back_photo_url: Option<String>,
    pub left_side_photo_url: Option<String>,
    pub right_side_photo_url: Option<String>,
    pub fuel_level_photo_url: Option<String>,
    pub km_photo_url: Option<String>,
    pub engine_photo_url: Option<String>,
    pub trunk_photo_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fotos_obrigatorias_por_classe() {
        assert_eq!(ChecklistPhotos::required_fields(VehicleClass::Heavy).len(), 5);
        assert_eq!(ChecklistPhotos::required_fields(VehicleClass::Light).len(), 8);
    }

    #[test]
    fn missing_for_acusa_fotos_faltantes() {
        let photos = ChecklistPhotos {
            dashboard_photo_url: Some("https://fotos/painel.jpg".to_string()),
            front_photo_url: Some("https://fotos/frente.jpg".to_string()),
            back_photo_url: Some("  ".to_string()), // vazio conta como ausente
            ..ChecklistPhotos::default()
        };

        let missing = photos.missing_for(VehicleClass::Heavy);
        assert_eq!(
            missing,
            vec!["back_photo_url", "left_side_photo_url", "right_side_photo_url"]
        );
    }

    #[test]
    fn classe_e_tipo_usam_literais_do_produto() {
        assert_eq!(VehicleClass::Heavy.as_str(), "pesada");
        assert_eq!(VehicleClass::parse("leve"), Some(VehicleClass::Light));
        assert_eq!(ChecklistType::Departure.as_str(), "Saída");
        assert_eq!(ChecklistType::parse("Retorno"), Some(ChecklistType::Return));
        assert_eq!(ChecklistType::parse("saida"), None);
    }
}
