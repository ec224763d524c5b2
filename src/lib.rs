//! Salesforce gateway: single-endpoint HTTP service for Account CRUD.

pub mod client;
pub mod config;
pub mod error;
pub mod handlers;
pub mod model;
pub mod response;
pub mod routes;
pub mod state;

pub use client::{SalesforceClient, Session, API_VERSION};
pub use config::Config;
pub use error::AppError;
pub use model::{AccountPatch, NewAccount, OneOrMany, QueryResponse, SaveResult};
pub use routes::{common_routes, salesforce_routes};
pub use state::AppState;
