use std::sync::Arc;

use chrono::{Duration, Utc};
use jsonwebtoken::{encode, DecodingKey, EncodingKey, Header as JwtHeader, Validation};
use models::user::{self, NewUser};
use tracing::{debug, info, instrument};

use super::domain::{AuthSession, Claims, LoginInput, RegisterInput};
use super::errors::AuthError;
use super::password;
use super::repository::AuthRepository;

/// Auth service configuration, passed in explicitly at construction.
#[derive(Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub token_ttl_hours: i64,
    pub min_password_len: usize,
}

/// Auth business service independent of web framework
pub struct AuthService<R: AuthRepository + ?Sized> {
    repo: Arc<R>,
    cfg: AuthConfig,
}

impl<R: AuthRepository + ?Sized> AuthService<R> {
    pub fn new(repo: Arc<R>, cfg: AuthConfig) -> Self {
        Self { repo, cfg }
    }

    /// Register a new user, hashing the password before the record is built.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use models::user::{self, AccountType};
    /// use service::auth::domain::RegisterInput;
    /// use service::auth::service::{AuthConfig, AuthService};
    /// use service::store::memory::MemoryStore;
    ///
    /// let repo = Arc::new(MemoryStore::<user::Model>::default());
    /// let svc = AuthService::new(repo, AuthConfig {
    ///     jwt_secret: "secret".into(),
    ///     token_ttl_hours: 12,
    ///     min_password_len: 8,
    /// });
    /// let input = RegisterInput {
    ///     email: "user@example.com".into(),
    ///     password: "Secret123".into(),
    ///     account_type: AccountType::Individual,
    ///     first_name: "Test".into(),
    ///     last_name: "User".into(),
    ///     business_id: None,
    /// };
    /// let user = tokio_test::block_on(svc.register(input)).unwrap();
    /// assert_eq!(user.email, "user@example.com");
    /// ```
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn register(&self, input: RegisterInput) -> Result<user::Model, AuthError> {
        if input.password.len() < self.cfg.min_password_len {
            return Err(AuthError::Validation(format!(
                "password too short (>={})",
                self.cfg.min_password_len
            )));
        }
        if let Some(existing) = self.repo.find_user_by_email(&input.email).await? {
            debug!("user exists: {}", existing.email);
            return Err(AuthError::Conflict);
        }

        let hash = password::hash_password(&input.password)?;
        let user = user::Model::new(
            NewUser {
                email: input.email,
                account_type: input.account_type,
                first_name: input.first_name,
                last_name: input.last_name,
                business_id: input.business_id,
            },
            hash,
        )
        .map_err(|e| AuthError::Validation(e.to_string()))?;

        let created = self.repo.insert_user(user).await?;
        info!(user_id = %created.id, email = %created.email, "user_registered");
        Ok(created)
    }

    /// Authenticate a user and issue a signed session token.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use models::user::{self, AccountType};
    /// use service::auth::domain::{LoginInput, RegisterInput};
    /// use service::auth::service::{AuthConfig, AuthService};
    /// use service::store::memory::MemoryStore;
    ///
    /// let repo = Arc::new(MemoryStore::<user::Model>::default());
    /// let svc = AuthService::new(repo.clone(), AuthConfig {
    ///     jwt_secret: "secret".into(),
    ///     token_ttl_hours: 12,
    ///     min_password_len: 8,
    /// });
    /// let _ = tokio_test::block_on(svc.register(RegisterInput {
    ///     email: "u@e.com".into(),
    ///     password: "Passw0rd".into(),
    ///     account_type: AccountType::Individual,
    ///     first_name: "N".into(),
    ///     last_name: "N".into(),
    ///     business_id: None,
    /// }));
    /// let session = tokio_test::block_on(svc.login(LoginInput {
    ///     email: "u@e.com".into(),
    ///     password: "Passw0rd".into(),
    /// }))
    /// .unwrap();
    /// assert_eq!(session.user.email, "u@e.com");
    /// assert!(!session.token.is_empty());
    /// ```
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn login(&self, input: LoginInput) -> Result<AuthSession, AuthError> {
        let user = self
            .repo
            .find_user_by_email(&input.email)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        password::verify_password(&input.password, &user.password_hash)?;

        let token = self.issue_token(&user)?;
        info!(user_id = %user.id, "user_logged_in");
        Ok(AuthSession { user, token })
    }

    fn issue_token(&self, user: &user::Model) -> Result<String, AuthError> {
        let exp = (Utc::now() + Duration::hours(self.cfg.token_ttl_hours)).timestamp() as usize;
        let claims = Claims {
            sub: user.email.clone(),
            uid: user.id.to_string(),
            acct: user.account_type,
            exp,
        };
        encode(
            &JwtHeader::default(),
            &claims,
            &EncodingKey::from_secret(self.cfg.jwt_secret.as_bytes()),
        )
        .map_err(|e| AuthError::Token(e.to_string()))
    }
}

/// Decode and validate a session token against the configured secret.
pub fn decode_token(jwt_secret: &str, token: &str) -> Result<Claims, AuthError> {
    let key = DecodingKey::from_secret(jwt_secret.as_bytes());
    let mut validation = Validation::default();
    validation.validate_exp = true;
    jsonwebtoken::decode::<Claims>(token, &key, &validation)
        .map(|data| data.claims)
        .map_err(|e| AuthError::Token(e.to_string()))
}

#[cfg(test)]
mod tests {
    use models::user::AccountType;

    use super::*;
    use crate::store::memory::MemoryStore;

    fn test_service() -> AuthService<MemoryStore<user::Model>> {
        AuthService::new(
            Arc::new(MemoryStore::<user::Model>::default()),
            AuthConfig {
                jwt_secret: "test-secret".into(),
                token_ttl_hours: 12,
                min_password_len: 8,
            },
        )
    }

    fn register_input(email: &str, password: &str) -> RegisterInput {
        RegisterInput {
            email: email.into(),
            password: password.into(),
            account_type: AccountType::Individual,
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            business_id: None,
        }
    }

    #[tokio::test]
    async fn register_then_login_issues_token() {
        let svc = test_service();
        let user = svc.register(register_input("a@b.com", "secret-pass")).await.unwrap();
        assert!(user.password_hash.starts_with("$argon2"));

        let session = svc
            .login(LoginInput { email: "a@b.com".into(), password: "secret-pass".into() })
            .await
            .unwrap();
        assert_eq!(session.user.id, user.id);

        let claims = decode_token("test-secret", &session.token).unwrap();
        assert_eq!(claims.sub, "a@b.com");
        assert_eq!(claims.uid, user.id.to_string());
    }

    #[tokio::test]
    async fn login_with_wrong_password_fails() {
        let svc = test_service();
        svc.register(register_input("a@b.com", "secret-pass")).await.unwrap();

        let err = svc
            .login(LoginInput { email: "a@b.com".into(), password: "wrong".into() })
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::WrongPassword));
        assert!(err.is_credential_failure());
    }

    #[tokio::test]
    async fn login_with_unknown_email_fails() {
        let svc = test_service();
        svc.register(register_input("a@b.com", "secret-pass")).await.unwrap();

        let err = svc
            .login(LoginInput { email: "x@y.com".into(), password: "secret-pass".into() })
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::UserNotFound));
        assert!(err.is_credential_failure());
    }

    #[tokio::test]
    async fn register_rejects_short_password() {
        let svc = test_service();
        let err = svc.register(register_input("a@b.com", "short")).await.unwrap_err();
        assert!(matches!(err, AuthError::Validation(_)));
    }

    #[tokio::test]
    async fn register_rejects_duplicate_email() {
        let svc = test_service();
        svc.register(register_input("a@b.com", "secret-pass")).await.unwrap();
        let err = svc.register(register_input("a@b.com", "other-pass")).await.unwrap_err();
        assert!(matches!(err, AuthError::Conflict));
    }

    #[tokio::test]
    async fn token_from_other_secret_is_rejected() {
        let svc = test_service();
        svc.register(register_input("a@b.com", "secret-pass")).await.unwrap();
        let session = svc
            .login(LoginInput { email: "a@b.com".into(), password: "secret-pass".into() })
            .await
            .unwrap();

        let err = decode_token("another-secret", &session.token).unwrap_err();
        assert!(matches!(err, AuthError::Token(_)));
    }
}
