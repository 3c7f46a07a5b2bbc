use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use uuid::Uuid;

use models::invoice;
use service::lifecycle;

use crate::errors::ApiError;
use crate::routes::ServerState;

#[utoipa::path(
    post,
    path = "/invoices",
    tag = "invoices",
    request_body = crate::openapi::NewInvoiceRequest,
    responses((status = 201, description = "Invoice created"), (status = 400, description = "Invalid payload"))
)]
pub async fn create_invoice(
    State(state): State<ServerState>,
    payload: Result<Json<invoice::NewInvoice>, JsonRejection>,
) -> Result<(StatusCode, Json<invoice::Model>), ApiError> {
    let Json(input) = payload?;
    let record = invoice::Model::new(input).map_err(|e| ApiError::bad_request(e.to_string()))?;
    let created = lifecycle::create(&*state.invoices, record).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    get,
    path = "/invoices",
    tag = "invoices",
    responses((status = 200, description = "All invoices that are not deleted"))
)]
pub async fn list_invoices(
    State(state): State<ServerState>,
) -> Result<Json<Vec<invoice::Model>>, ApiError> {
    let invoices = lifecycle::list(&*state.invoices).await?;
    Ok(Json(invoices))
}

#[utoipa::path(
    get,
    path = "/invoices/{id}",
    tag = "invoices",
    params(("id" = Uuid, Path, description = "Invoice id")),
    responses((status = 200, description = "Invoice"), (status = 404, description = "Not found"))
)]
pub async fn get_invoice(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<invoice::Model>, ApiError> {
    let found = lifecycle::get(&*state.invoices, id).await?;
    Ok(Json(found))
}

#[utoipa::path(
    put,
    path = "/invoices/{id}",
    tag = "invoices",
    request_body = crate::openapi::InvoicePatchRequest,
    params(("id" = Uuid, Path, description = "Invoice id")),
    responses(
        (status = 200, description = "Updated invoice, status recomputed from the balance"),
        (status = 400, description = "Invalid payload"),
        (status = 404, description = "Not found")
    )
)]
pub async fn update_invoice(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    payload: Result<Json<invoice::InvoicePatch>, JsonRejection>,
) -> Result<Json<invoice::Model>, ApiError> {
    let Json(patch) = payload?;
    let updated = lifecycle::patch(&*state.invoices, id, patch).await?;
    Ok(Json(updated))
}

#[utoipa::path(
    delete,
    path = "/invoices/{id}",
    tag = "invoices",
    params(("id" = Uuid, Path, description = "Invoice id")),
    responses((status = 200, description = "Tombstoned invoice"), (status = 404, description = "Not found"))
)]
pub async fn delete_invoice(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<invoice::Model>, ApiError> {
    let deleted = lifecycle::delete(&*state.invoices, id).await?;
    Ok(Json(deleted))
}
