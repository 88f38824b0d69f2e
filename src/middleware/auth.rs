//! Middleware de autenticação JWT
//!
//! Resolve a sessão em três estados: sem token é `Anonymous`; token válido
//! inicia `Resolving` até o perfil ser buscado; só `Resolved` carrega um
//! usuário com papel conhecido. Para autorização, `Anonymous` e `Resolving`
//! são equivalentes: nada é concedido.

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
    Extension,
};
use uuid::Uuid;

use crate::models::user::{AppUser, SessionState, User, UserRole};
use crate::repositories::user_repository::UserRepository;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::jwt::{extract_token_from_header, verify_token, JwtClaims};

/// Resolver a sessão a partir do header Authorization.
///
/// Token ausente ou inválido resolve para `Anonymous` (não é erro aqui;
/// cada rota decide o que exigir). Se o perfil ainda não existe no banco
/// (corrida de cadastro), o usuário é montado a partir das claims com o
/// papel rebaixado para `driver`.
pub async fn resolve_session(
    state: &AppState,
    auth_header: Option<&str>,
) -> Result<SessionState, AppError> {
    let Some(header_value) = auth_header else {
        return Ok(SessionState::Anonymous);
    };

    let Ok(token) = extract_token_from_header(header_value) else {
        return Ok(SessionState::Anonymous);
    };

    let claims: JwtClaims = match verify_token(token, &state.config) {
        Ok(claims) => claims,
        Err(_) => return Ok(SessionState::Anonymous),
    };

    let uid = Uuid::parse_str(&claims.sub)
        .map_err(|_| AppError::Unauthorized("Token com subject inválido".to_string()))?;

    // Sessão conhecida; buscar o perfil. Falha de conectividade aqui
    // mantém a sessão em Resolving em vez de derrubá-la para Anonymous.
    let profile = match UserRepository::new(state.pool.clone()).find_by_id(uid).await {
        Ok(profile) => profile,
        Err(AppError::Database(e))
            if matches!(e, sqlx::Error::Io(_) | sqlx::Error::PoolTimedOut) =>
        {
            return Ok(SessionState::Resolving { uid });
        }
        Err(e) => return Err(e),
    };

    Ok(SessionState::Resolved(app_user_from_profile(&claims, uid, profile)))
}

/// Montar o [`AppUser`] a partir das claims e do documento de perfil.
///
/// Perfil ausente (corrida de cadastro) resolve com os dados das claims
/// e papel `driver` — nunca admin sem linha em `users`.
pub fn app_user_from_profile(claims: &JwtClaims, uid: Uuid, profile: Option<User>) -> AppUser {
    match profile {
        Some(profile) => AppUser {
            id: profile.id,
            name: profile.name,
            email: profile.email,
            role: UserRole::parse_or_driver(&profile.user_type),
            photo_url: profile.photo_url,
        },
        None => AppUser {
            id: uid,
            name: claims.name.clone(),
            email: claims.email.clone(),
            role: UserRole::Driver,
            photo_url: None,
        },
    }
}

/// Middleware que exige sessão resolvida e injeta o [`AppUser`]
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.to_string());

    let session = resolve_session(&state, auth_header.as_deref()).await?;

    let user = match session {
        SessionState::Resolved(user) => user,
        SessionState::Anonymous | SessionState::Resolving { .. } => {
            return Err(AppError::Unauthorized(
                "Autenticação necessária".to_string(),
            ));
        }
    };

    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

/// Middleware que exige papel de administrador (aplicado após `auth_middleware`)
pub async fn admin_only_middleware(
    Extension(user): Extension<AppUser>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    if !user.is_admin() {
        return Err(AppError::Forbidden(
            "Acesso restrito a administradores".to_string(),
        ));
    }
    Ok(next.run(request).await)
}
