//! Middlewares da aplicação

pub mod auth;
pub mod cors;
