//! End-to-end flow against a real Postgres instance.
//!
//! Skipped when SKIP_DB_TESTS is set or no database is reachable, so the
//! suite stays green on machines without Postgres.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use migration::MigratorTrait;
use serde_json::json;
use tower::Service;
use uuid::Uuid;

use service::auth::service::AuthConfig;
use service::store::seaorm::SeaOrmStore;

use server::routes::{self, ServerState};

fn cors() -> tower_http::cors::CorsLayer {
    tower_http::cors::CorsLayer::very_permissive()
}

async fn build_app() -> anyhow::Result<Option<Router>> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return Ok(None);
    }
    let db = match models::db::connect().await {
        Ok(db) => db,
        Err(e) => {
            eprintln!("skipping db test, no database: {e}");
            return Ok(None);
        }
    };
    migration::Migrator::up(&db, None).await?;

    let store = Arc::new(SeaOrmStore::new(db));
    let state = ServerState {
        users: store.clone(),
        services: store.clone(),
        appointments: store.clone(),
        invoices: store.clone(),
        auth_repo: store,
        auth: AuthConfig {
            jwt_secret: "test-secret".into(),
            token_ttl_hours: 12,
            min_password_len: 8,
        },
    };
    Ok(Some(routes::build_router(state, cors())))
}

#[tokio::test]
async fn register_login_and_patch_roundtrip() -> anyhow::Result<()> {
    let Some(app) = build_app().await? else {
        return Ok(());
    };

    let email = format!("user_{}@example.com", Uuid::new_v4());

    // Register
    let req = Request::builder()
        .method("POST")
        .uri("/users")
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(&json!({
            "email": email,
            "password": "S3curePass!",
            "account_type": "individual",
            "first_name": "Db",
            "last_name": "Tester"
        }))?))?;
    let resp = app.clone().call(req).await?;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await?;
    let created: serde_json::Value = serde_json::from_slice(&bytes)?;
    let id = created["id"].as_str().unwrap().to_string();

    // Login
    let req = Request::builder()
        .method("POST")
        .uri("/login")
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(
            &json!({"email": email, "password": "S3curePass!"}),
        )?))?;
    let resp = app.clone().call(req).await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await?;
    let session: serde_json::Value = serde_json::from_slice(&bytes)?;
    let token = session["token"].as_str().unwrap().to_string();

    // Patch a single field through the real store.
    let req = Request::builder()
        .method("PUT")
        .uri(format!("/users/{id}"))
        .header("authorization", format!("Bearer {token}"))
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(
            &json!({"first_name": "Patched"}),
        )?))?;
    let resp = app.clone().call(req).await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await?;
    let updated: serde_json::Value = serde_json::from_slice(&bytes)?;
    assert_eq!(updated["first_name"], "Patched");
    assert_eq!(updated["last_name"], "Tester");

    // Soft delete leaves the row retrievable with its tombstone.
    let req = Request::builder()
        .method("DELETE")
        .uri(format!("/users/{id}"))
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())?;
    let resp = app.clone().call(req).await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await?;
    let deleted: serde_json::Value = serde_json::from_slice(&bytes)?;
    assert!(deleted["deleted_at"].is_string());
    Ok(())
}
