use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use uuid::Uuid;

use models::service as service_record;
use service::lifecycle;

use crate::errors::ApiError;
use crate::routes::ServerState;

#[utoipa::path(
    post,
    path = "/services",
    tag = "services",
    request_body = crate::openapi::NewServiceRequest,
    responses((status = 201, description = "Service created"), (status = 400, description = "Invalid payload"))
)]
pub async fn create_service(
    State(state): State<ServerState>,
    payload: Result<Json<service_record::NewService>, JsonRejection>,
) -> Result<(StatusCode, Json<service_record::Model>), ApiError> {
    let Json(input) = payload?;
    let record = service_record::Model::new(input)
        .map_err(|e| ApiError::bad_request(e.to_string()))?;
    let created = lifecycle::create(&*state.services, record).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    get,
    path = "/services",
    tag = "services",
    responses((status = 200, description = "All services that are not deleted"))
)]
pub async fn list_services(
    State(state): State<ServerState>,
) -> Result<Json<Vec<service_record::Model>>, ApiError> {
    let services = lifecycle::list(&*state.services).await?;
    Ok(Json(services))
}

#[utoipa::path(
    get,
    path = "/services/{id}",
    tag = "services",
    params(("id" = Uuid, Path, description = "Service id")),
    responses((status = 200, description = "Service"), (status = 404, description = "Not found"))
)]
pub async fn get_service(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<service_record::Model>, ApiError> {
    let found = lifecycle::get(&*state.services, id).await?;
    Ok(Json(found))
}

#[utoipa::path(
    put,
    path = "/services/{id}",
    tag = "services",
    request_body = crate::openapi::ServicePatchRequest,
    params(("id" = Uuid, Path, description = "Service id")),
    responses(
        (status = 200, description = "Updated service"),
        (status = 400, description = "Invalid payload"),
        (status = 404, description = "Not found")
    )
)]
pub async fn update_service(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    payload: Result<Json<service_record::ServicePatch>, JsonRejection>,
) -> Result<Json<service_record::Model>, ApiError> {
    let Json(patch) = payload?;
    let updated = lifecycle::patch(&*state.services, id, patch).await?;
    Ok(Json(updated))
}

#[utoipa::path(
    delete,
    path = "/services/{id}",
    tag = "services",
    params(("id" = Uuid, Path, description = "Service id")),
    responses((status = 200, description = "Tombstoned service"), (status = 404, description = "Not found"))
)]
pub async fn delete_service(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<service_record::Model>, ApiError> {
    let deleted = lifecycle::delete(&*state.services, id).await?;
    Ok(Json(deleted))
}
