use thiserror::Error;

/// Business errors for auth workflows
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("user already exists")]
    Conflict,
    #[error("user not found")]
    UserNotFound,
    #[error("wrong password")]
    WrongPassword,
    #[error("hashing error: {0}")]
    Hash(String),
    #[error("token error: {0}")]
    Token(String),
    #[error("repository error: {0}")]
    Repository(String),
}

impl AuthError {
    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            AuthError::Validation(_) => 1001,
            AuthError::Conflict => 1002,
            AuthError::UserNotFound => 1003,
            AuthError::WrongPassword => 1004,
            AuthError::Hash(_) => 1101,
            AuthError::Token(_) => 1102,
            AuthError::Repository(_) => 1200,
        }
    }

    /// Whether the client-visible message must not reveal which credential
    /// failed. UserNotFound and WrongPassword stay distinct internally but
    /// map to one indistinguishable response at the HTTP boundary.
    pub fn is_credential_failure(&self) -> bool {
        matches!(self, AuthError::UserNotFound | AuthError::WrongPassword)
    }
}
