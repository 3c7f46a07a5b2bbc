use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use uuid::Uuid;

use models::appointment;
use service::lifecycle;

use crate::errors::ApiError;
use crate::routes::ServerState;

#[utoipa::path(
    post,
    path = "/appointments",
    tag = "appointments",
    request_body = crate::openapi::NewAppointmentRequest,
    responses((status = 201, description = "Appointment created"), (status = 400, description = "Invalid payload"))
)]
pub async fn create_appointment(
    State(state): State<ServerState>,
    payload: Result<Json<appointment::NewAppointment>, JsonRejection>,
) -> Result<(StatusCode, Json<appointment::Model>), ApiError> {
    let Json(input) = payload?;
    let record = appointment::Model::new(input);
    let created = lifecycle::create(&*state.appointments, record).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    get,
    path = "/appointments",
    tag = "appointments",
    responses((status = 200, description = "All appointments that are not deleted"))
)]
pub async fn list_appointments(
    State(state): State<ServerState>,
) -> Result<Json<Vec<appointment::Model>>, ApiError> {
    let appointments = lifecycle::list(&*state.appointments).await?;
    Ok(Json(appointments))
}

#[utoipa::path(
    get,
    path = "/appointments/{id}",
    tag = "appointments",
    params(("id" = Uuid, Path, description = "Appointment id")),
    responses((status = 200, description = "Appointment"), (status = 404, description = "Not found"))
)]
pub async fn get_appointment(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<appointment::Model>, ApiError> {
    let found = lifecycle::get(&*state.appointments, id).await?;
    Ok(Json(found))
}

#[utoipa::path(
    put,
    path = "/appointments/{id}",
    tag = "appointments",
    request_body = crate::openapi::AppointmentPatchRequest,
    params(("id" = Uuid, Path, description = "Appointment id")),
    responses(
        (status = 200, description = "Updated appointment"),
        (status = 400, description = "Invalid payload"),
        (status = 404, description = "Not found")
    )
)]
pub async fn update_appointment(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    payload: Result<Json<appointment::AppointmentPatch>, JsonRejection>,
) -> Result<Json<appointment::Model>, ApiError> {
    let Json(patch) = payload?;
    let updated = lifecycle::patch(&*state.appointments, id, patch).await?;
    Ok(Json(updated))
}

#[utoipa::path(
    delete,
    path = "/appointments/{id}",
    tag = "appointments",
    params(("id" = Uuid, Path, description = "Appointment id")),
    responses((status = 200, description = "Tombstoned appointment"), (status = 404, description = "Not found"))
)]
pub async fn delete_appointment(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<appointment::Model>, ApiError> {
    let deleted = lifecycle::delete(&*state.appointments, id).await?;
    Ok(Json(deleted))
}
