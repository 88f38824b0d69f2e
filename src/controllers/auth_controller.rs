//! Controller de autenticação
//!
//! Cadastro, login e resolução de sessão. O papel de admin é concedido
//! no cadastro apenas ao email de bootstrap configurado; todos os outros
//! usuários nascem como motorista.

use std::sync::Arc;

use validator::Validate;

use crate::config::environment::EnvironmentConfig;
use crate::dto::auth_dto::{
    LoginRequest, LoginResponse, RegisterRequest, UpdateProfileRequest, UserResponse,
};
use crate::events::{collections, EventBus};
use crate::models::user::{AppUser, UserRole};
use crate::repositories::user_repository::UserRepository;
use crate::state::AppState;
use crate::utils::errors::{conflict_error, not_found_error, AppError, AppResult};
use crate::utils::jwt::generate_token;

pub struct AuthController {
    repo: UserRepository,
    config: EnvironmentConfig,
    events: Arc<EventBus>,
}

impl AuthController {
    pub fn new(state: &AppState) -> Self {
        Self {
            repo: UserRepository::new(state.pool.clone()),
            config: state.config.clone(),
            events: state.events.clone(),
        }
    }

    pub async fn register(&self, request: RegisterRequest) -> AppResult<LoginResponse> {
        request.validate()?;

        let email = request.email.trim().to_lowercase();

        if self.repo.email_exists(&email).await? {
            return Err(conflict_error("Usuário", "email", &email));
        }

        let role = if email == self.config.bootstrap_admin_email.to_lowercase() {
            UserRole::Admin
        } else {
            UserRole::Driver
        };

        let password_hash = bcrypt::hash(&request.password, bcrypt::DEFAULT_COST)
            .map_err(|e| AppError::Hash(format!("Erro ao gerar hash: {}", e)))?;

        let user = self
            .repo
            .create(request.name.trim(), &email, &password_hash, role.as_str())
            .await?;

        tracing::info!(user_id = %user.id, role = role.as_str(), "Usuário cadastrado");

        let token = generate_token(user.id, &user.name, &user.email, role.as_str(), &self.config)?;

        Ok(LoginResponse {
            token,
            user: UserResponse::from(AppUser {
                id: user.id,
                name: user.name,
                email: user.email,
                role,
                photo_url: user.photo_url,
            }),
        })
    }

    pub async fn login(&self, request: LoginRequest) -> AppResult<LoginResponse> {
        request.validate()?;

        let email = request.email.trim().to_lowercase();

        let user = self
            .repo
            .find_by_email(&email)
            .await?
            .ok_or_else(|| AppError::Unauthorized("Email ou senha incorretos".to_string()))?;

        let valid = bcrypt::verify(&request.password, &user.password_hash)
            .map_err(|e| AppError::Hash(format!("Erro ao verificar senha: {}", e)))?;
        if !valid {
            return Err(AppError::Unauthorized("Email ou senha incorretos".to_string()));
        }

        let role = UserRole::parse_or_driver(&user.user_type);
        let token = generate_token(user.id, &user.name, &user.email, role.as_str(), &self.config)?;

        Ok(LoginResponse {
            token,
            user: UserResponse::from(AppUser {
                id: user.id,
                name: user.name,
                email: user.email,
                role,
                photo_url: user.photo_url,
            }),
        })
    }

    /// Editar o próprio perfil (nome e foto; email, senha e papel não)
    pub async fn update_profile(
        &self,
        user: &AppUser,
        request: UpdateProfileRequest,
    ) -> AppResult<UserResponse> {
        request.validate()?;

        let updated = self
            .repo
            .update_profile(
                user.id,
                request.name.as_deref().map(str::trim),
                request.photo_url.as_deref(),
            )
            .await?
            .ok_or_else(|| not_found_error("Usuário", &user.id.to_string()))?;

        tracing::info!(user_id = %updated.id, "Perfil atualizado");
        self.events.publish_all(&[collections::USERS]);

        Ok(UserResponse::from(AppUser {
            id: updated.id,
            name: updated.name,
            email: updated.email,
            role: UserRole::parse_or_driver(&updated.user_type),
            photo_url: updated.photo_url,
        }))
    }
}
