//! Modelo de User e resolução de sessão
//!
//! O papel (`admin`/`driver`) é o único sinal de autorização do sistema.
//! A sessão resolve em três estados explícitos; enquanto o papel não é
//! conhecido (`Anonymous`/`Resolving`) nenhum acesso é concedido, e um
//! perfil ausente resolve para `driver` — sempre o menor privilégio.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Papel do usuário
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserRole {
    #[serde(rename = "admin")]
    Admin,
    #[serde(rename = "driver")]
    Driver,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "admin",
            UserRole::Driver => "driver",
        }
    }

    /// Qualquer valor desconhecido vira `driver` (fail-safe)
    pub fn parse_or_driver(value: &str) -> Self {
        match value {
            "admin" => UserRole::Admin,
            _ => UserRole::Driver,
        }
    }
}

/// User - mapeia exatamente a tabela users
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub user_type: String,
    pub photo_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Usuário de aplicação derivado da sessão + documento de perfil
#[derive(Debug, Clone, Serialize)]
pub struct AppUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub photo_url: Option<String>,
}

impl AppUser {
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}

/// Estado da resolução de sessão.
///
/// `Resolving` (token válido, perfil ainda não buscado) deve ser tratado
/// como `Anonymous` para fins de autorização.
#[derive(Debug, Clone)]
pub enum SessionState {
    Anonymous,
    Resolving { uid: Uuid },
    Resolved(AppUser),
}

impl SessionState {
    pub fn user(&self) -> Option<&AppUser> {
        match self {
            SessionState::Resolved(user) => Some(user),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn papel_desconhecido_vira_driver() {
        assert_eq!(UserRole::parse_or_driver("admin"), UserRole::Admin);
        assert_eq!(UserRole::parse_or_driver("driver"), UserRole::Driver);
        assert_eq!(UserRole::parse_or_driver("gerente"), UserRole::Driver);
        assert_eq!(UserRole::parse_or_driver(""), UserRole::Driver);
    }

    #[test]
    fn somente_sessao_resolvida_expoe_usuario() {
        assert!(SessionState::Anonymous.user().is_none());
        assert!(SessionState::Resolving { uid: Uuid::new_v4() }.user().is_none());

        let state = SessionState::Resolved(AppUser {
            id: Uuid::new_v4(),
            name: "Admin".to_string(),
            email: "admin@rotacerta.com".to_string(),
            role: UserRole::Admin,
            photo_url: None,
        });
        assert!(state.user().unwrap().is_admin());
    }
}
