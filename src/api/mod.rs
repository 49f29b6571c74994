//! HTTP surface: the items page and the JSON document API.

mod handlers;
mod pages;
pub mod routes;
mod state;
mod v1;

#[cfg(test)]
mod pages_test;

use std::net::{IpAddr, Ipv4Addr};

use miette::Diagnostic;
use thiserror::Error;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::db::Database;
pub use state::AppState;

/// API server errors.
#[derive(Error, Diagnostic, Debug)]
pub enum ApiError {
    #[error("Failed to bind {addr}: {source}")]
    #[diagnostic(code(itemdesk::api::bind))]
    Bind {
        addr: String,
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    #[diagnostic(code(itemdesk::api::serve))]
    Serve(#[source] std::io::Error),
}

/// API server configuration
pub struct Config {
    /// Host address to bind to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 3000,
        }
    }
}

/// Initialize tracing subscriber with env filter
fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "itemdesk=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Run the server on an already migrated database.
pub async fn run<D: Database>(config: Config, db: D) -> Result<(), ApiError> {
    init_tracing();

    let app = routes::create_router(AppState::new(db)).layer(TraceLayer::new_for_http());

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|source| ApiError::Bind {
            addr: addr.clone(),
            source,
        })?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app).await.map_err(ApiError::Serve)?;
    Ok(())
}
