//! `SeaORM` implementation of the `AuthService` trait.

use async_trait::async_trait;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::{AuthConfig, SecurityConfig};
use crate::db::Store;
use crate::domain::UserId;
use crate::services::auth_service::{AuthError, AuthService, AuthSession, UserProfile};

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    iat: i64,
    exp: i64,
}

/// Signs and verifies HS256 bearer tokens.
#[derive(Clone)]
pub struct TokenSigner {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: chrono::Duration,
}

impl TokenSigner {
    #[must_use]
    pub fn new(config: &AuthConfig) -> Self {
        let secret = config.jwt_secret.as_bytes();
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            ttl: chrono::Duration::hours(config.token_ttl_hours),
        }
    }

    pub fn issue(&self, user_id: &UserId) -> Result<String, AuthError> {
        let now = chrono::Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };

        jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| AuthError::Internal(format!("Failed to sign token: {e}")))
    }

    pub fn verify(&self, token: &str) -> Result<UserId, AuthError> {
        let data = jsonwebtoken::decode::<Claims>(
            token,
            &self.decoding,
            &Validation::new(Algorithm::HS256),
        )
        .map_err(|e| {
            debug!(error = %e, "Rejected bearer token");
            AuthError::InvalidToken
        })?;

        UserId::parse(&data.claims.sub).map_err(|_| AuthError::InvalidToken)
    }
}

pub struct SeaOrmAuthService {
    store: Store,
    signer: TokenSigner,
    security: SecurityConfig,
}

impl SeaOrmAuthService {
    #[must_use]
    pub fn new(store: Store, auth: &AuthConfig, security: SecurityConfig) -> Self {
        Self {
            store,
            signer: TokenSigner::new(auth),
            security,
        }
    }
}

/// Trims and lower-cases an email, rejecting values without an `@`.
pub fn normalize_email(email: &str) -> Result<String, AuthError> {
    let email = email.trim().to_lowercase();
    if email.is_empty() {
        return Err(AuthError::Validation("Email is required".to_string()));
    }
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(email),
        _ => Err(AuthError::Validation("Email address is invalid".to_string())),
    }
}

fn is_unique_violation(err: &anyhow::Error) -> bool {
    err.chain()
        .filter_map(|e| e.downcast_ref::<sea_orm::DbErr>())
        .any(|e| matches!(e.sql_err(), Some(sea_orm::SqlErr::UniqueConstraintViolation(_))))
}

#[async_trait]
impl AuthService for SeaOrmAuthService {
    async fn register(
        &self,
        email: &str,
        password: &str,
        name: &str,
    ) -> Result<AuthSession, AuthError> {
        let email = normalize_email(email)?;
        let name = name.trim();
        if name.is_empty() {
            return Err(AuthError::Validation("Name is required".to_string()));
        }
        if password.chars().count() < self.security.min_password_length {
            return Err(AuthError::Validation(format!(
                "Password must be at least {} characters",
                self.security.min_password_length
            )));
        }

        if self.store.email_exists(&email).await? {
            return Err(AuthError::EmailTaken);
        }

        // A concurrent registration can still win between the check and the insert.
        let user = match self
            .store
            .create_user(&email, name, password, &self.security)
            .await
        {
            Ok(user) => user,
            Err(e) if is_unique_violation(&e) => return Err(AuthError::EmailTaken),
            Err(e) => return Err(e.into()),
        };

        info!(user_id = %user.id, "Registered new user");

        Ok(AuthSession {
            token: self.signer.issue(&user.id)?,
            user,
        })
    }

    async fn login(&self, email: &str, password: &str) -> Result<AuthSession, AuthError> {
        let Ok(email) = normalize_email(email) else {
            return Err(AuthError::InvalidCredentials);
        };

        let user = self
            .store
            .verify_user_password(&email, password)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        Ok(AuthSession {
            token: self.signer.issue(&user.id)?,
            user,
        })
    }

    async fn me(&self, user_id: &UserId) -> Result<UserProfile, AuthError> {
        let user = self
            .store
            .get_user_by_id(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        let project_count = self.store.count_user_projects(user_id).await?;

        Ok(UserProfile {
            user,
            project_count,
        })
    }

    fn verify_token(&self, token: &str) -> Result<UserId, AuthError> {
        self.signer.verify(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn auth_config(secret: &str) -> AuthConfig {
        AuthConfig {
            jwt_secret: secret.to_string(),
            ..AuthConfig::default()
        }
    }

    #[test]
    fn email_is_normalized() {
        assert_eq!(normalize_email("  A@X.com ").unwrap(), "a@x.com");
        assert!(matches!(
            normalize_email("no-at-sign"),
            Err(AuthError::Validation(_))
        ));
        assert!(matches!(normalize_email("@x.com"), Err(AuthError::Validation(_))));
        assert!(matches!(normalize_email("   "), Err(AuthError::Validation(_))));
    }

    #[test]
    fn token_round_trips_user_id() {
        let signer = TokenSigner::new(&auth_config("secret-one"));
        let id = UserId::generate();
        let token = signer.issue(&id).unwrap();
        assert_eq!(signer.verify(&token).unwrap(), id);
    }

    #[test]
    fn token_from_other_secret_is_rejected() {
        let a = TokenSigner::new(&auth_config("secret-one"));
        let b = TokenSigner::new(&auth_config("secret-two"));
        let token = a.issue(&UserId::generate()).unwrap();
        assert!(matches!(b.verify(&token), Err(AuthError::InvalidToken)));
        assert!(matches!(a.verify("garbage"), Err(AuthError::InvalidToken)));
    }

    #[test]
    fn expired_token_is_rejected() {
        let signer = TokenSigner::new(&AuthConfig {
            jwt_secret: "secret".to_string(),
            token_ttl_hours: -1,
        });
        let token = signer.issue(&UserId::generate()).unwrap();
        assert!(matches!(signer.verify(&token), Err(AuthError::InvalidToken)));
    }
}
