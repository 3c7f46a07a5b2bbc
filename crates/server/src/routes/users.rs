use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::Json;
use uuid::Uuid;

use models::{appointment, user};
use service::booking::{self, ServiceAppointment};
use service::lifecycle;

use crate::errors::ApiError;
use crate::routes::ServerState;

#[utoipa::path(
    get,
    path = "/users",
    tag = "users",
    responses((status = 200, description = "All users that are not deleted"))
)]
pub async fn list_users(State(state): State<ServerState>) -> Result<Json<Vec<user::Model>>, ApiError> {
    let users = lifecycle::list(&*state.users).await?;
    Ok(Json(users))
}

#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "users",
    params(("id" = Uuid, Path, description = "User id")),
    responses((status = 200, description = "User"), (status = 404, description = "Not found"))
)]
pub async fn get_user(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<user::Model>, ApiError> {
    let found = lifecycle::get(&*state.users, id).await?;
    Ok(Json(found))
}

#[utoipa::path(
    put,
    path = "/users/{id}",
    tag = "users",
    request_body = crate::openapi::UserPatchRequest,
    params(("id" = Uuid, Path, description = "User id")),
    responses(
        (status = 200, description = "Updated user"),
        (status = 400, description = "Invalid payload"),
        (status = 404, description = "Not found")
    )
)]
pub async fn update_user(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    payload: Result<Json<user::UserPatch>, JsonRejection>,
) -> Result<Json<user::Model>, ApiError> {
    let Json(patch) = payload?;
    let updated = lifecycle::patch(&*state.users, id, patch).await?;
    Ok(Json(updated))
}

#[utoipa::path(
    delete,
    path = "/users/{id}",
    tag = "users",
    params(("id" = Uuid, Path, description = "User id")),
    responses((status = 200, description = "Tombstoned user"), (status = 404, description = "Not found"))
)]
pub async fn delete_user(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<user::Model>, ApiError> {
    let deleted = lifecycle::delete(&*state.users, id).await?;
    Ok(Json(deleted))
}

#[utoipa::path(
    get,
    path = "/users/{id}/appointments",
    tag = "users",
    params(("id" = Uuid, Path, description = "User id")),
    responses((status = 200, description = "Appointments booked by the user"))
)]
pub async fn user_appointments(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<appointment::Model>>, ApiError> {
    let found = booking::appointments_for_user(&*state.appointments, id).await?;
    Ok(Json(found))
}

#[utoipa::path(
    get,
    path = "/users/{id}/service-appointments",
    tag = "users",
    params(("id" = Uuid, Path, description = "User id")),
    responses((status = 200, description = "Appointments joined with their service"))
)]
pub async fn user_service_appointments(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<ServiceAppointment>>, ApiError> {
    let found =
        booking::service_appointments_for_user(&*state.appointments, &*state.services, id).await?;
    Ok(Json(found))
}
