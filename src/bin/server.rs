//! Gateway server: loads env config and mounts the Salesforce route.

use axum::Router;
use salesforce_gateway::{common_routes, salesforce_routes, AppState, Config};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("salesforce_gateway=info".parse()?),
        )
        .init();

    let state = AppState::new(Config::from_env());
    let app = Router::new()
        .merge(common_routes())
        .merge(salesforce_routes(state));

    let listener = TcpListener::bind("0.0.0.0:3000").await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
