use models::user::{self, AccountType};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Registration input
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterInput {
    pub email: String,
    pub password: String,
    pub account_type: AccountType,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub business_id: Option<Uuid>,
}

/// Login input: transient credentials, never persisted.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

/// Login result: the authenticated user plus a signed bearer token.
#[derive(Debug, Clone, Serialize)]
pub struct AuthSession {
    pub user: user::Model,
    pub token: String,
}

/// JWT claims carried by the session token.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Subject email.
    pub sub: String,
    /// User id.
    pub uid: String,
    /// Account type.
    pub acct: AccountType,
    /// Expiry as unix seconds.
    pub exp: usize,
}
