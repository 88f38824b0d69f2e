//! Camada de acesso a dados

pub mod checklist_repository;
pub mod maintenance_request_repository;
pub mod user_repository;
pub mod vehicle_repository;
