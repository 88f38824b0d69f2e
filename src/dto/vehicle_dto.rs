use serde::Deserialize;
use validator::Validate;

use crate::utils::validation::validate_plate;

// Request de criação de veículo (somente admin)
#[derive(Debug, Deserialize, Validate)]
pub struct CreateVehicleRequest {
    #[validate(custom(function = "validate_plate", message = "Placa inválida."))]
    pub plate: String,

    #[validate(length(min = 1, max = 100, message = "O modelo é obrigatório."))]
    pub model: String,

    #[validate(length(min = 1, max = 100, message = "A marca é obrigatória."))]
    pub make: String,

    pub image_url: Option<String>,
}

// Request de edição de veículo (somente admin).
// Campos ausentes permanecem como estão.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateVehicleRequest {
    #[validate(custom(function = "validate_plate", message = "Placa inválida."))]
    pub plate: Option<String>,

    #[validate(length(min = 1, max = 100))]
    pub model: Option<String>,

    #[validate(length(min = 1, max = 100))]
    pub make: Option<String>,

    pub status: Option<String>,

    #[validate(range(min = 0, max = 100, message = "Nível de combustível deve estar entre 0 e 100."))]
    pub fuel_level: Option<i32>,

    #[validate(range(min = 0, message = "Quilometragem não pode ser negativa."))]
    pub odometer: Option<i64>,

    pub image_url: Option<String>,
}
