use utoipa::OpenApi;
use utoipa::ToSchema;
use uuid::Uuid;

// Request bodies are mirrored here as plain schema structs so the docs
// do not leak internal fields such as password hashes.

#[derive(ToSchema)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(ToSchema)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub account_type: String,
    pub first_name: String,
    pub last_name: String,
    pub business_id: Option<Uuid>,
}

#[derive(ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(ToSchema)]
pub struct UserPatchRequest {
    pub email: Option<String>,
    pub account_type: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub business_id: Option<Uuid>,
}

#[derive(ToSchema)]
pub struct NewServiceRequest {
    pub business_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub start_date_time: String,
    pub length: i32,
    pub capacity: i32,
    pub cancel_fee: i64,
    pub price: i64,
}

#[derive(ToSchema)]
pub struct ServicePatchRequest {
    pub business_id: Option<Uuid>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub start_date_time: Option<String>,
    pub length: Option<i32>,
    pub capacity: Option<i32>,
    pub cancel_fee: Option<i64>,
    pub price: Option<i64>,
}

#[derive(ToSchema)]
pub struct NewAppointmentRequest {
    pub service_id: Uuid,
    pub user_id: Uuid,
}

#[derive(ToSchema)]
pub struct AppointmentPatchRequest {
    pub active: Option<bool>,
    pub cancel_date_time: Option<String>,
}

#[derive(ToSchema)]
pub struct NewInvoiceRequest {
    pub appointment_id: Uuid,
    pub original_balance: i64,
    pub remaining_balance: i64,
}

#[derive(ToSchema)]
pub struct InvoicePatchRequest {
    pub original_balance: Option<i64>,
    pub remaining_balance: Option<i64>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::auth::register,
        crate::routes::auth::login,
        crate::routes::users::list_users,
        crate::routes::users::get_user,
        crate::routes::users::update_user,
        crate::routes::users::delete_user,
        crate::routes::users::user_appointments,
        crate::routes::users::user_service_appointments,
        crate::routes::services::create_service,
        crate::routes::services::list_services,
        crate::routes::services::get_service,
        crate::routes::services::update_service,
        crate::routes::services::delete_service,
        crate::routes::appointments::create_appointment,
        crate::routes::appointments::list_appointments,
        crate::routes::appointments::get_appointment,
        crate::routes::appointments::update_appointment,
        crate::routes::appointments::delete_appointment,
        crate::routes::invoices::create_invoice,
        crate::routes::invoices::list_invoices,
        crate::routes::invoices::get_invoice,
        crate::routes::invoices::update_invoice,
        crate::routes::invoices::delete_invoice,
    ),
    components(
        schemas(
            HealthResponse,
            RegisterRequest,
            LoginRequest,
            UserPatchRequest,
            NewServiceRequest,
            ServicePatchRequest,
            NewAppointmentRequest,
            AppointmentPatchRequest,
            NewInvoiceRequest,
            InvoicePatchRequest,
        )
    ),
    tags(
        (name = "health"),
        (name = "auth"),
        (name = "users"),
        (name = "services"),
        (name = "appointments"),
        (name = "invoices")
    )
)]
pub struct ApiDoc;
