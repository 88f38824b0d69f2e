//! Regras de negócio

pub mod checklist_service;
pub mod report_service;
