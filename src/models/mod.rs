//! Modelos de domínio

pub mod catalog;
pub mod checklist;
pub mod maintenance_request;
pub mod user;
pub mod vehicle;
