use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::user::{AppUser, SessionState};

// Request de cadastro
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 3, max = 100, message = "O nome é obrigatório."))]
    pub name: String,

    #[validate(email(message = "Por favor, insira um email válido."))]
    pub email: String,

    #[validate(length(min = 6, max = 100, message = "A senha deve ter pelo menos 6 caracteres."))]
    pub password: String,
}

// Request de login
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,

    #[validate(length(min = 1, message = "A senha é obrigatória."))]
    pub password: String,
}

// Request de edição do próprio perfil.
// Campos ausentes permanecem como estão.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 3, max = 100, message = "O nome é obrigatório."))]
    pub name: Option<String>,

    #[validate(length(min = 1, max = 2048, message = "URL de foto inválida."))]
    pub photo_url: Option<String>,
}

// Response de usuário (sem hash de senha)
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: String,
    pub photo_url: Option<String>,
}

impl From<AppUser> for UserResponse {
    fn from(user: AppUser) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role.as_str().to_string(),
            photo_url: user.photo_url,
        }
    }
}

// Response de login
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserResponse,
}

// Response do endpoint de sessão (/me)
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum SessionResponse {
    Anonymous,
    Resolving,
    Authenticated { user: UserResponse },
}

impl From<SessionState> for SessionResponse {
    fn from(state: SessionState) -> Self {
        match state {
            SessionState::Anonymous => SessionResponse::Anonymous,
            SessionState::Resolving { .. } => SessionResponse::Resolving,
            SessionState::Resolved(user) => SessionResponse::Authenticated {
                user: user.into(),
            },
        }
    }
}
