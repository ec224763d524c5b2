//! Route wiring: the Salesforce endpoint plus common service routes.

use crate::handlers::{
    create_account, delete_account, list_accounts, method_not_allowed, update_account,
};
use crate::state::AppState;
use axum::{routing::get, Json, Router};
use serde::Serialize;

/// Single Salesforce route: dispatch by HTTP method, 405 for anything else.
pub fn salesforce_routes(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/salesforce",
            get(list_accounts)
                .post(create_account)
                .patch(update_account)
                .delete(delete_account)
                .fallback(method_not_allowed),
        )
        .with_state(state)
}

#[derive(Serialize)]
struct HealthBody {
    status: &'static str,
}

async fn health() -> Json<HealthBody> {
    Json(HealthBody { status: "ok" })
}

async fn version() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Common routes (no state): GET /health, GET /version.
pub fn common_routes() -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/version", get(version))
}
