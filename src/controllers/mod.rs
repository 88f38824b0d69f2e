//! Controllers HTTP

pub mod auth_controller;
pub mod checklist_controller;
pub mod maintenance_controller;
pub mod report_controller;
pub mod vehicle_controller;
