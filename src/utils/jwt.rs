//! Utilitários de JWT
//!
//! Geração e verificação dos tokens de sessão. As claims carregam nome,
//! email e papel do usuário para que a sessão possa ser resolvida mesmo
//! quando o documento de perfil ainda não existe (corrida de cadastro).

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{config::environment::EnvironmentConfig, utils::errors::AppError};

/// Claims do token de sessão
#[derive(Debug, Serialize, Deserialize)]
pub struct JwtClaims {
    pub sub: String, // user_id
    pub name: String,
    pub email: String,
    pub role: String,
    pub exp: usize,
    pub iat: usize,
}

/// Gerar token de sessão para um usuário
pub fn generate_token(
    user_id: Uuid,
    name: &str,
    email: &str,
    role: &str,
    config: &EnvironmentConfig,
) -> Result<String, AppError> {
    let now = chrono::Utc::now();
    let expires_at = now + chrono::Duration::seconds(config.jwt_expiration as i64);

    let claims = JwtClaims {
        sub: user_id.to_string(),
        name: name.to_string(),
        email: email.to_string(),
        role: role.to_string(),
        exp: expires_at.timestamp() as usize,
        iat: now.timestamp() as usize,
    };

    let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_ref());

    encode(&Header::default(), &claims, &encoding_key)
        .map_err(|e| AppError::Jwt(format!("Erro gerando token: {}", e)))
}

/// Verificar e decodificar um token de sessão
pub fn verify_token(token: &str, config: &EnvironmentConfig) -> Result<JwtClaims, AppError> {
    let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_ref());

    let token_data = decode::<JwtClaims>(token, &decoding_key, &Validation::default())
        .map_err(|e| AppError::Jwt(format!("Token inválido: {}", e)))?;

    Ok(token_data.claims)
}

/// Extrair o token do header Authorization
pub fn extract_token_from_header(auth_header: &str) -> Result<&str, AppError> {
    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::Jwt("Header Authorization deve começar com 'Bearer '".to_string()))?;

    if token.is_empty() {
        return Err(AppError::Jwt("Token não pode estar vazio".to_string()));
    }

    Ok(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> EnvironmentConfig {
        EnvironmentConfig {
            jwt_secret: "segredo-de-teste".to_string(),
            jwt_expiration: 3600,
            ..EnvironmentConfig::for_tests()
        }
    }

    #[test]
    fn roundtrip_preserva_claims() {
        let config = test_config();
        let id = Uuid::new_v4();
        let token =
            generate_token(id, "Maria Silva", "maria@rotacerta.com", "driver", &config).unwrap();

        let claims = verify_token(&token, &config).unwrap();
        assert_eq!(claims.sub, id.to_string());
        assert_eq!(claims.name, "Maria Silva");
        assert_eq!(claims.role, "driver");
    }

    #[test]
    fn token_com_segredo_errado_falha() {
        let config = test_config();
        let token =
            generate_token(Uuid::new_v4(), "X", "x@y.com", "admin", &config).unwrap();

        let other = EnvironmentConfig {
            jwt_secret: "outro-segredo".to_string(),
            ..test_config()
        };
        assert!(verify_token(&token, &other).is_err());
    }

    #[test]
    fn extrai_token_do_header() {
        assert_eq!(extract_token_from_header("Bearer abc.def.ghi").unwrap(), "abc.def.ghi");
        assert!(extract_token_from_header("Basic abc").is_err());
        assert!(extract_token_from_header("Bearer ").is_err());
    }
}
