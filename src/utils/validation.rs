//! Utilitários de validação
//!
//! Funções helper de validação compartilhadas pelos DTOs e pelo
//! fluxo de submissão de checklist.

use lazy_static::lazy_static;
use regex::Regex;
use validator::ValidationError;

lazy_static! {
    // Placa: 7 a 8 caracteres alfanuméricos, hífen opcional (ABC1234, ABC-1234)
    static ref PLATE_RE: Regex = Regex::new(r"^[A-Za-z0-9]{3}-?[A-Za-z0-9]{4}$").unwrap();
}

/// Validar formato de placa de veículo
pub fn validate_plate(value: &str) -> Result<(), ValidationError> {
    if !PLATE_RE.is_match(value) {
        let mut error = ValidationError::new("plate");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar que um string não esteja vazio
pub fn validate_not_empty(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("not_empty");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar que um valor esteja num intervalo
pub fn validate_range<T: PartialOrd + std::fmt::Display + serde::Serialize>(
    value: T,
    min: T,
    max: T,
) -> Result<(), ValidationError> {
    if value < min || value > max {
        let mut error = ValidationError::new("range");
        error.add_param("min".into(), &min);
        error.add_param("max".into(), &max);
        error.add_param("actual".into(), &value);
        return Err(error);
    }
    Ok(())
}
