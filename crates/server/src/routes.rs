use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use common::types::Health;
use models::{appointment, invoice, service as service_record, user};
use service::auth::repository::AuthRepository;
use service::auth::service::AuthConfig;
use service::store::RecordStore;

use crate::openapi::ApiDoc;

pub mod appointments;
pub mod auth;
pub mod invoices;
pub mod services;
pub mod users;

/// Shared handler state. Every store field usually points at the same
/// backend, but keeping them separate lets tests swap a single entity
/// for an in-memory store.
#[derive(Clone)]
pub struct ServerState {
    pub users: Arc<dyn RecordStore<user::Model>>,
    pub services: Arc<dyn RecordStore<service_record::Model>>,
    pub appointments: Arc<dyn RecordStore<appointment::Model>>,
    pub invoices: Arc<dyn RecordStore<invoice::Model>>,
    pub auth_repo: Arc<dyn AuthRepository>,
    pub auth: AuthConfig,
}

#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses((status = 200, description = "Service is up"))
)]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Build the full application router. All routes except the health
/// check, login, registration and the API docs require a bearer token.
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    let api = Router::new()
        .route("/health", get(health))
        .route("/login", post(auth::login))
        .route("/users", post(auth::register).get(users::list_users))
        .route(
            "/users/:id",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        )
        .route("/users/:id/appointments", get(users::user_appointments))
        .route(
            "/users/:id/service-appointments",
            get(users::user_service_appointments),
        )
        .route(
            "/services",
            post(services::create_service).get(services::list_services),
        )
        .route(
            "/services/:id",
            get(services::get_service)
                .put(services::update_service)
                .delete(services::delete_service),
        )
        .route(
            "/appointments",
            post(appointments::create_appointment).get(appointments::list_appointments),
        )
        .route(
            "/appointments/:id",
            get(appointments::get_appointment)
                .put(appointments::update_appointment)
                .delete(appointments::delete_appointment),
        )
        .route(
            "/invoices",
            post(invoices::create_invoice).get(invoices::list_invoices),
        )
        .route(
            "/invoices/:id",
            get(invoices::get_invoice)
                .put(invoices::update_invoice)
                .delete(invoices::delete_invoice),
        );

    api.merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_bearer_token,
        ))
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
