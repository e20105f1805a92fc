//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (request id, tracing, body limit, access log)
//! - Serve static assets for unmatched paths
//! - Bind server to listener with graceful shutdown

use axum::{middleware, routing::get, Router};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{limit::RequestBodyLimitLayer, services::ServeDir, trace::TraceLayer};

use crate::config::PhonebookConfig;
use crate::http::access_log::{access_log_middleware, AccessLogConfig};
use crate::http::handlers;
use crate::http::request::{propagate_request_id_layer, set_request_id_layer};
use crate::lifecycle::shutdown;
use crate::store::PersonStore;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn PersonStore>,
}

/// HTTP server for the phonebook API.
pub struct HttpServer {
    router: Router,
    config: PhonebookConfig,
}

impl HttpServer {
    /// Create a new HTTP server over `store`.
    pub fn new(config: PhonebookConfig, store: Arc<dyn PersonStore>) -> Self {
        let state = AppState { store };
        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &PhonebookConfig, state: AppState) -> Router {
        let api = Router::new()
            .route(
                "/api/persons",
                get(handlers::list_persons).post(handlers::create_person),
            )
            .route(
                "/api/persons/{id}",
                get(handlers::get_person)
                    .put(handlers::update_person)
                    .delete(handlers::delete_person),
            )
            .route("/info", get(handlers::info))
            .with_state(state);

        let app = if config.static_files.enabled {
            api.fallback_service(ServeDir::new(&config.static_files.dir))
        } else {
            api
        };

        let access_log = AccessLogConfig {
            max_body_size: config.security.max_body_size,
        };

        // The access log wraps the body limit so rejected requests are logged too.
        app.layer(RequestBodyLimitLayer::new(config.security.max_body_size))
            .layer(middleware::from_fn_with_state(access_log, access_log_middleware))
            .layer(TraceLayer::new_for_http())
            .layer(propagate_request_id_layer())
            .layer(set_request_id_layer())
    }

    /// The fully layered router, for embedding or in-process testing.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until `shutdown` fires, then drain in-flight requests.
    pub async fn run(self, listener: TcpListener, shutdown: broadcast::Receiver<()>) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            static_dir = %self.config.static_files.dir,
            static_enabled = self.config.static_files.enabled,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown::wait(shutdown))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &PhonebookConfig {
        &self.config
    }
}
