//! Response envelopes for the Salesforce endpoint.

use crate::model::{QueryResponse, SaveResult};
use axum::{http::StatusCode, Json};
use serde::Serialize;
use serde_json::Value;

#[derive(Serialize)]
pub struct CreatedBody {
    pub message: &'static str,
    #[serde(rename = "createdAccount")]
    pub created_account: Vec<SaveResult>,
}

#[derive(Serialize)]
pub struct AccountsBody {
    pub message: &'static str,
    pub accounts: QueryResponse<Value>,
}

#[derive(Serialize)]
pub struct ResultBody {
    pub message: &'static str,
    pub result: Vec<SaveResult>,
}

pub fn created(results: Vec<SaveResult>) -> (StatusCode, Json<CreatedBody>) {
    (
        StatusCode::OK,
        Json(CreatedBody {
            message: "Account created successfully",
            created_account: results,
        }),
    )
}

pub fn retrieved(accounts: QueryResponse<Value>) -> (StatusCode, Json<AccountsBody>) {
    (
        StatusCode::OK,
        Json(AccountsBody {
            message: "Accounts retrieved successfully",
            accounts,
        }),
    )
}

pub fn updated(results: Vec<SaveResult>) -> (StatusCode, Json<ResultBody>) {
    (
        StatusCode::OK,
        Json(ResultBody {
            message: "Account updated successfully",
            result: results,
        }),
    )
}

pub fn deleted(results: Vec<SaveResult>) -> (StatusCode, Json<ResultBody>) {
    (
        StatusCode::OK,
        Json(ResultBody {
            message: "Account deleted successfully",
            result: results,
        }),
    )
}
