use axum::extract::rejection::JsonRejection;
use axum::extract::{Request, State};
use axum::http::{header, Method, StatusCode};
use axum::middleware::Next;
use axum::response::Response;
use axum::Json;
use tracing::warn;

use models::user;
use service::auth::domain::{AuthSession, LoginInput, RegisterInput};
use service::auth::service::{decode_token, AuthService};

use crate::errors::ApiError;
use crate::routes::ServerState;

#[utoipa::path(
    post,
    path = "/users",
    tag = "auth",
    request_body = crate::openapi::RegisterRequest,
    responses(
        (status = 201, description = "User created"),
        (status = 400, description = "Invalid payload"),
        (status = 409, description = "Email already registered")
    )
)]
pub async fn register(
    State(state): State<ServerState>,
    payload: Result<Json<RegisterInput>, JsonRejection>,
) -> Result<(StatusCode, Json<user::Model>), ApiError> {
    let Json(input) = payload?;
    let svc = AuthService::new(state.auth_repo.clone(), state.auth.clone());
    let created = svc.register(input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    post,
    path = "/login",
    tag = "auth",
    request_body = crate::openapi::LoginRequest,
    responses(
        (status = 200, description = "Logged in, body carries the session token"),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    State(state): State<ServerState>,
    payload: Result<Json<LoginInput>, JsonRejection>,
) -> Result<Json<AuthSession>, ApiError> {
    let Json(input) = payload?;
    let svc = AuthService::new(state.auth_repo.clone(), state.auth.clone());
    let session = svc.login(input).await?;
    Ok(Json(session))
}

/// Global middleware requiring `Authorization: Bearer <token>` on every
/// route except the health check, login, registration, the API docs and
/// CORS preflight.
pub async fn require_bearer_token(
    State(state): State<ServerState>,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let path = req.uri().path();
    let method = req.method().clone();

    if path == "/health"
        || path == "/login"
        || (path == "/users" && method == Method::POST)
        || path.starts_with("/docs")
        || path.starts_with("/api-docs")
        || method == Method::OPTIONS
    {
        return Ok(next.run(req).await);
    }

    let authz = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());

    let token = match authz {
        Some(h) => match h.strip_prefix("Bearer ") {
            Some(t) if !t.is_empty() => t,
            _ => {
                warn!(path = %path, "invalid Authorization format (expect Bearer)");
                return Err(ApiError::new(StatusCode::UNAUTHORIZED, "invalid token"));
            }
        },
        None => {
            warn!(path = %path, "missing Authorization header");
            return Err(ApiError::new(StatusCode::UNAUTHORIZED, "missing token"));
        }
    };

    match decode_token(&state.auth.jwt_secret, token) {
        Ok(_claims) => Ok(next.run(req).await),
        Err(e) => {
            warn!(path = %path, err = %e, "token validation failed");
            Err(ApiError::new(StatusCode::UNAUTHORIZED, "invalid token"))
        }
    }
}
