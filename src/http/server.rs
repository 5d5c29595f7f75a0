//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum router for the bot-facing API
//! - Wire up middleware (bearer auth, timeout, request ID, tracing)
//! - Mount the admin API when enabled
//! - Serve until the shutdown broadcast fires

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::admin;
use crate::config::{FaucetConfig, Secrets};
use crate::dispense::Dispenser;
use crate::http::handlers;
use crate::http::middleware::require_bot_token;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub dispenser: Dispenser,
    /// Amount per claim as configured, e.g. "0.1".
    pub amount: Arc<str>,
    pub bot_token: Arc<str>,
    pub admin_key: Option<Arc<str>>,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(dispenser: Dispenser, amount: &str, secrets: &Secrets) -> Self {
        Self {
            dispenser,
            amount: Arc::from(amount),
            bot_token: Arc::from(secrets.bot_token.as_str()),
            admin_key: secrets.admin_key.as_deref().map(Arc::from),
            started_at: Instant::now(),
        }
    }
}

/// HTTP server for the faucet API.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    pub fn new(config: &FaucetConfig, state: AppState) -> Self {
        let router = Self::build_router(config, state);
        Self { router }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &FaucetConfig, state: AppState) -> Router {
        let api = Router::new()
            .route("/claims", post(handlers::create_claim))
            .route("/networks", get(handlers::list_networks))
            .layer(middleware::from_fn_with_state(state.clone(), require_bot_token));

        let mut router = Router::new()
            .route("/health", get(handlers::health))
            .nest("/api/v1", api);

        if config.admin.enabled {
            if state.admin_key.is_some() {
                router = router.merge(admin::setup_admin_router(state.clone()));
            } else {
                tracing::warn!("Admin API enabled but no admin key set; not mounting /admin");
            }
        }

        router.with_state(state).layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
                .layer(PropagateRequestIdLayer::x_request_id()),
        )
    }

    /// The fully layered router, for embedding or in-process tests.
    pub fn into_router(self) -> Router {
        self.router
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
