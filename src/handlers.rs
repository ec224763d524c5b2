//! Account handlers: one route, dispatch by HTTP method.
//!
//! Required fields are checked before any remote call; credentials come from
//! config and a fresh login happens on every request.

use crate::client::{SalesforceClient, Session};
use crate::config::Config;
use crate::error::AppError;
use crate::model::{AccountPatch, NewAccount, QueryResponse};
use crate::response;
use crate::state::AppState;
use axum::extract::State;
use axum::http::{header, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::Value;

const ACCOUNTS_QUERY: &str = "SELECT Id, Name, Phone, Industry FROM Account";

/// Methods listed in the `Allow` header of a 405 response.
pub const ALLOWED_METHODS: &str = "POST, GET, PATCH, DELETE";

/// Credentials check, client setup, and login. Called only after the
/// request body has passed validation.
async fn connect(config: &Config) -> Result<(SalesforceClient, Session), AppError> {
    let (username, password) = config.credentials()?;
    let client = SalesforceClient::new(&config.login_url)?;
    let session = client.login(username, password).await?;
    tracing::info!("successfully logged into Salesforce");
    Ok((client, session))
}

/// Bodies are parsed leniently: anything that is not a JSON object simply
/// has no fields, and validation reports the missing ones.
fn parse_body(body: &str) -> Value {
    serde_json::from_str(body).unwrap_or(Value::Null)
}

/// Present, non-empty string field. Empty strings count as missing.
fn string_field(body: &Value, key: &str) -> Option<String> {
    body.get(key)
        .and_then(Value::as_str)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

pub async fn create_account(
    State(state): State<AppState>,
    body: String,
) -> Result<impl IntoResponse, AppError> {
    let body = parse_body(&body);
    let (Some(name), Some(phone), Some(industry)) = (
        string_field(&body, "name"),
        string_field(&body, "phone"),
        string_field(&body, "industry"),
    ) else {
        return Err(AppError::Validation(
            "Missing required fields: name, phone, or industry".into(),
        ));
    };

    let (client, session) = connect(&state.config).await?;
    let created = client
        .create(&session, "Account", NewAccount { name, phone, industry })
        .await?;
    Ok(response::created(created))
}

pub async fn list_accounts(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let (client, session) = connect(&state.config).await?;
    let accounts: QueryResponse<Value> = client.query(&session, ACCOUNTS_QUERY).await?;
    tracing::info!(count = accounts.records.len(), "retrieved accounts");
    Ok(response::retrieved(accounts))
}

pub async fn update_account(
    State(state): State<AppState>,
    body: String,
) -> Result<impl IntoResponse, AppError> {
    let body = parse_body(&body);
    let Some(id) = string_field(&body, "id") else {
        return Err(AppError::Validation("Missing required field: id".into()));
    };
    let patch = AccountPatch {
        id,
        name: string_field(&body, "name"),
        phone: string_field(&body, "phone"),
        industry: string_field(&body, "industry"),
    };

    let (client, session) = connect(&state.config).await?;
    // Update failures get their own response message; login errors above
    // stay on the generic path.
    let result = client
        .update(&session, "Account", patch)
        .await
        .map_err(|err| AppError::UpdateFailed {
            error: err.to_string(),
        })?;
    tracing::info!(?result, "update result");
    if result.iter().any(|record| !record.success) {
        let detail = serde_json::to_string(&result)?;
        return Err(AppError::UpdateFailed {
            error: format!("Update failed for some records: {detail}"),
        });
    }
    Ok(response::updated(result))
}

pub async fn delete_account(
    State(state): State<AppState>,
    body: String,
) -> Result<impl IntoResponse, AppError> {
    let body = parse_body(&body);
    let Some(id) = string_field(&body, "id") else {
        return Err(AppError::Validation("Missing required field: id".into()));
    };

    let (client, session) = connect(&state.config).await?;
    let result = client.delete(&session, "Account", id).await?;
    Ok(response::deleted(result))
}

/// Fallback for unsupported methods. No login or remote call happens here.
pub async fn method_not_allowed(method: Method) -> Response {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        [(header::ALLOW, ALLOWED_METHODS)],
        Json(serde_json::json!({ "message": format!("Method {method} Not Allowed") })),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_body_tolerates_non_json() {
        assert_eq!(parse_body("not json"), Value::Null);
        assert_eq!(parse_body(""), Value::Null);
        assert_eq!(parse_body(r#"{"id":"x"}"#)["id"], "x");
    }

    #[test]
    fn string_field_rejects_empty_and_non_string_values() {
        let body = parse_body(r#"{"name":"","phone":42,"industry":"Tech"}"#);
        assert!(string_field(&body, "name").is_none());
        assert!(string_field(&body, "phone").is_none());
        assert_eq!(string_field(&body, "industry").as_deref(), Some("Tech"));
        assert!(string_field(&body, "absent").is_none());
    }
}
