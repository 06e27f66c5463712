//! HTTP gateway server.

use crate::ask::ask_handler;
use crate::error::GatewayError;
use crate::Result;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use chatgate_core::Config;
use chatgate_providers::{ChatProvider, GroqProvider, ProviderError};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Factory building a provider from the caller-uploaded API key.
///
/// Injectable so the `/ask` handler can be exercised against a stub
/// provider without network access.
pub type ProviderFactory =
    Arc<dyn Fn(&str) -> std::result::Result<Arc<dyn ChatProvider>, ProviderError> + Send + Sync>;

/// Gateway server state shared across requests.
///
/// Immutable after construction; request handlers never mutate it, so
/// concurrent requests need no synchronization.
pub struct GatewayState {
    /// Service configuration.
    pub config: Config,

    /// Provider factory.
    pub provider_factory: ProviderFactory,

    /// Server start time.
    pub started_at: DateTime<Utc>,
}

/// The HTTP gateway server.
pub struct Gateway {
    /// Server state.
    state: Arc<GatewayState>,
}

impl Gateway {
    /// Create a new gateway backed by the Groq provider.
    pub fn new(config: Config) -> Self {
        Self::with_provider_factory(
            config,
            Arc::new(|api_key: &str| {
                GroqProvider::new(api_key).map(|p| Arc::new(p) as Arc<dyn ChatProvider>)
            }),
        )
    }

    /// Create a new gateway with a custom provider factory.
    pub fn with_provider_factory(config: Config, provider_factory: ProviderFactory) -> Self {
        let state = Arc::new(GatewayState {
            config,
            provider_factory,
            started_at: Utc::now(),
        });

        Self { state }
    }

    /// Run the gateway server.
    pub async fn run(&self) -> Result<()> {
        let addr = format!(
            "{}:{}",
            self.state.config.server.host, self.state.config.server.port
        );

        let app = self.create_router();

        info!("Starting gateway server on {}", addr);

        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(GatewayError::Io)?;

        axum::serve(listener, app)
            .await
            .map_err(|e| GatewayError::Internal(e.to_string()))?;

        Ok(())
    }

    /// Create the Axum router.
    pub fn create_router(&self) -> Router {
        let state = self.state.clone();

        let mut router = Router::new()
            .route("/health", get(health_handler))
            .route("/ask", post(ask_handler))
            .with_state(state);

        if self.state.config.server.cors {
            router = router.layer(CorsLayer::permissive());
        }

        router.layer(TraceLayer::new_for_http())
    }
}

/// Health check endpoint.
async fn health_handler(State(state): State<Arc<GatewayState>>) -> impl IntoResponse {
    let uptime = (Utc::now() - state.started_at).num_seconds();
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "uptime_seconds": uptime,
    }))
}
