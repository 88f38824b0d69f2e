use axum::{
    extract::State,
    http::header,
    http::HeaderMap,
    routing::{get, post, put},
    Extension, Json, Router,
};

use crate::controllers::auth_controller::AuthController;
use crate::dto::auth_dto::{
    LoginRequest, LoginResponse, RegisterRequest, SessionResponse, UpdateProfileRequest,
    UserResponse,
};
use crate::dto::common::ApiResponse;
use crate::middleware::auth::resolve_session;
use crate::models::user::AppUser;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_auth_router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/me", get(me))
}

/// Rotas de perfil: exigem sessão resolvida (montadas atrás do middleware
/// de autenticação, separadas das rotas públicas acima)
pub fn create_profile_router() -> Router<AppState> {
    Router::new().route("/profile", put(update_profile))
}

async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>, AppError> {
    let response = AuthController::new(&state).register(request).await?;
    Ok(Json(ApiResponse::success_with_message(
        response,
        "Usuário cadastrado com sucesso".to_string(),
    )))
}

async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>, AppError> {
    let response = AuthController::new(&state).login(request).await?;
    Ok(Json(ApiResponse::success(response)))
}

/// Estado da sessão do chamador. Nunca retorna 401: sessão ausente ou
/// inválida é um estado legítimo (`anonymous`).
async fn me(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<SessionResponse>, AppError> {
    let auth_header = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());

    let session = resolve_session(&state, auth_header).await?;
    Ok(Json(SessionResponse::from(session)))
}

async fn update_profile(
    State(state): State<AppState>,
    Extension(user): Extension<AppUser>,
    Json(request): Json<UpdateProfileRequest>,
) -> Result<Json<ApiResponse<UserResponse>>, AppError> {
    let updated = AuthController::new(&state)
        .update_profile(&user, request)
        .await?;
    Ok(Json(ApiResponse::success_with_message(
        updated,
        "Perfil atualizado com sucesso".to_string(),
    )))
}
