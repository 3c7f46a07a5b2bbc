use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::Service;
use uuid::Uuid;

use models::{appointment, invoice, service as service_record, user};
use service::auth::service::AuthConfig;
use service::store::memory::MemoryStore;

use server::routes::{self, ServerState};

fn cors() -> tower_http::cors::CorsLayer {
    tower_http::cors::CorsLayer::very_permissive()
}

fn build_app() -> Router {
    let users = Arc::new(MemoryStore::<user::Model>::default());
    let state = ServerState {
        users: users.clone(),
        services: Arc::new(MemoryStore::<service_record::Model>::default()),
        appointments: Arc::new(MemoryStore::<appointment::Model>::default()),
        invoices: Arc::new(MemoryStore::<invoice::Model>::default()),
        auth_repo: users,
        auth: AuthConfig {
            jwt_secret: "test-secret".into(),
            token_ttl_hours: 12,
            min_password_len: 8,
        },
    };
    routes::build_router(state, cors())
}

async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> anyhow::Result<(StatusCode, Value)> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(t) = token {
        builder = builder.header("authorization", format!("Bearer {t}"));
    }
    let req = match body {
        Some(value) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&value)?))?,
        None => builder.body(Body::empty())?,
    };
    let resp = app.clone().call(req).await?;
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await?;
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)?
    };
    Ok((status, json))
}

async fn register_and_login(app: &Router, email: &str) -> anyhow::Result<(Uuid, String)> {
    let (status, body) = send(
        app,
        "POST",
        "/users",
        None,
        Some(json!({
            "email": email,
            "password": "S3curePass!",
            "account_type": "individual",
            "first_name": "Test",
            "last_name": "User"
        })),
    )
    .await?;
    assert_eq!(status, StatusCode::CREATED);
    let id: Uuid = body["id"].as_str().unwrap().parse()?;

    let (status, body) = send(
        app,
        "POST",
        "/login",
        None,
        Some(json!({"email": email, "password": "S3curePass!"})),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    let token = body["token"].as_str().unwrap().to_string();
    Ok((id, token))
}

#[tokio::test]
async fn register_never_exposes_password_hash() -> anyhow::Result<()> {
    let app = build_app();
    let (status, body) = send(
        &app,
        "POST",
        "/users",
        None,
        Some(json!({
            "email": "alice@example.com",
            "password": "S3curePass!",
            "account_type": "individual",
            "first_name": "Alice",
            "last_name": "Smith"
        })),
    )
    .await?;
    assert_eq!(status, StatusCode::CREATED);
    assert!(body.get("password_hash").is_none());
    assert_eq!(body["email"], "alice@example.com");
    Ok(())
}

#[tokio::test]
async fn login_failures_are_indistinguishable() -> anyhow::Result<()> {
    let app = build_app();
    let (_id, _token) = register_and_login(&app, "bob@example.com").await?;

    let (wrong_pw_status, wrong_pw_body) = send(
        &app,
        "POST",
        "/login",
        None,
        Some(json!({"email": "bob@example.com", "password": "not-the-password"})),
    )
    .await?;
    let (no_user_status, no_user_body) = send(
        &app,
        "POST",
        "/login",
        None,
        Some(json!({"email": "nobody@example.com", "password": "whatever-pass"})),
    )
    .await?;

    assert_eq!(wrong_pw_status, StatusCode::UNAUTHORIZED);
    assert_eq!(no_user_status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_pw_body, no_user_body);
    Ok(())
}

#[tokio::test]
async fn duplicate_email_rejected() -> anyhow::Result<()> {
    let app = build_app();
    let payload = json!({
        "email": "carol@example.com",
        "password": "S3curePass!",
        "account_type": "business",
        "first_name": "Carol",
        "last_name": "Jones"
    });
    let (status, _) = send(&app, "POST", "/users", None, Some(payload.clone())).await?;
    assert_eq!(status, StatusCode::CREATED);
    let (status, _) = send(&app, "POST", "/users", None, Some(payload)).await?;
    assert_eq!(status, StatusCode::CONFLICT);
    Ok(())
}

#[tokio::test]
async fn protected_routes_require_token() -> anyhow::Result<()> {
    let app = build_app();
    let (status, _) = send(&app, "GET", "/users", None, None).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&app, "GET", "/users", Some("garbage-token"), None).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (_id, token) = register_and_login(&app, "dave@example.com").await?;
    let (status, body) = send(&app, "GET", "/users", Some(&token), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
    Ok(())
}

#[tokio::test]
async fn user_patch_merges_subset_only() -> anyhow::Result<()> {
    let app = build_app();
    let (id, token) = register_and_login(&app, "erin@example.com").await?;

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/users/{id}"),
        Some(&token),
        Some(json!({"first_name": "Erin-Updated"})),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["first_name"], "Erin-Updated");
    assert_eq!(body["last_name"], "User");
    assert_eq!(body["email"], "erin@example.com");

    // Unknown keys are rejected rather than silently dropped.
    let (status, _) = send(
        &app,
        "PUT",
        &format!("/users/{id}"),
        Some(&token),
        Some(json!({"first_name": "X", "nonsense": 1})),
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Hash is not reachable through the patch surface.
    let (status, _) = send(
        &app,
        "PUT",
        &format!("/users/{id}"),
        Some(&token),
        Some(json!({"password_hash": "sneaky"})),
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn delete_tombstones_and_hides_from_list() -> anyhow::Result<()> {
    let app = build_app();
    let (id, token) = register_and_login(&app, "frank@example.com").await?;

    let (status, body) = send(&app, "DELETE", &format!("/users/{id}"), Some(&token), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert!(body["deleted_at"].is_string());

    // Direct get still resolves the tombstoned record.
    let (status, body) = send(&app, "GET", &format!("/users/{id}"), Some(&token), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert!(body["deleted_at"].is_string());

    let (status, body) = send(&app, "GET", "/users", Some(&token), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert!(body.as_array().unwrap().is_empty());
    Ok(())
}

#[tokio::test]
async fn appointment_cancellation_keeps_fields_paired() -> anyhow::Result<()> {
    let app = build_app();
    let (user_id, token) = register_and_login(&app, "grace@example.com").await?;

    let (status, svc_body) = send(
        &app,
        "POST",
        "/services",
        Some(&token),
        Some(json!({
            "business_id": Uuid::new_v4(),
            "name": "Haircut",
            "start_date_time": "2026-09-01T10:00:00Z",
            "length": 30,
            "capacity": 4,
            "price": 2500
        })),
    )
    .await?;
    assert_eq!(status, StatusCode::CREATED);
    let service_id = svc_body["id"].as_str().unwrap();

    let (status, appt_body) = send(
        &app,
        "POST",
        "/appointments",
        Some(&token),
        Some(json!({"service_id": service_id, "user_id": user_id})),
    )
    .await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(appt_body["active"], true);
    assert!(appt_body["cancel_date_time"].is_null());
    let appt_id = appt_body["id"].as_str().unwrap().to_string();

    // Deactivating stamps a cancellation time.
    let (status, body) = send(
        &app,
        "PUT",
        &format!("/appointments/{appt_id}"),
        Some(&token),
        Some(json!({"active": false})),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["active"], false);
    assert!(body["cancel_date_time"].is_string());

    // Reactivating clears it again.
    let (status, body) = send(
        &app,
        "PUT",
        &format!("/appointments/{appt_id}"),
        Some(&token),
        Some(json!({"active": true})),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["active"], true);
    assert!(body["cancel_date_time"].is_null());

    // The join endpoint sees the booking with its service.
    let (status, body) = send(
        &app,
        "GET",
        &format!("/users/{user_id}/service-appointments"),
        Some(&token),
        None,
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    let joined = body.as_array().unwrap();
    assert_eq!(joined.len(), 1);
    assert_eq!(joined[0]["service"]["name"], "Haircut");
    assert_eq!(joined[0]["appointment"]["id"], appt_id);
    Ok(())
}

#[tokio::test]
async fn invoice_status_tracks_remaining_balance() -> anyhow::Result<()> {
    let app = build_app();
    let (_user_id, token) = register_and_login(&app, "heidi@example.com").await?;

    let (status, body) = send(
        &app,
        "POST",
        "/invoices",
        Some(&token),
        Some(json!({
            "appointment_id": Uuid::new_v4(),
            "original_balance": 5000,
            "remaining_balance": 5000
        })),
    )
    .await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status"], "Unpaid");
    let id = body["id"].as_str().unwrap().to_string();

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/invoices/{id}"),
        Some(&token),
        Some(json!({"remaining_balance": 0})),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "Paid");

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/invoices/{id}"),
        Some(&token),
        Some(json!({"remaining_balance": -100})),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "Overpaid");

    // Status is derived, a client-sent value is rejected.
    let (status, _) = send(
        &app,
        "PUT",
        &format!("/invoices/{id}"),
        Some(&token),
        Some(json!({"status": "Paid"})),
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn get_unknown_id_is_not_found() -> anyhow::Result<()> {
    let app = build_app();
    let (_id, token) = register_and_login(&app, "ivan@example.com").await?;
    let (status, _) = send(
        &app,
        "GET",
        &format!("/services/{}", Uuid::new_v4()),
        Some(&token),
        None,
    )
    .await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn malformed_json_is_bad_request() -> anyhow::Result<()> {
    let app = build_app();
    let req = Request::builder()
        .method("POST")
        .uri("/login")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))?;
    let resp = app.clone().call(req).await?;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    Ok(())
}
