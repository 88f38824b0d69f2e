//! DTOs de request/response da API

pub mod auth_dto;
pub mod checklist_dto;
pub mod common;
pub mod maintenance_dto;
pub mod report_dto;
pub mod vehicle_dto;
