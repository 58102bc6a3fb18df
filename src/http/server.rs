//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the stylesheet handler
//! - Wire up middleware (tracing, timeout, request ID)
//! - Bind server to listener
//! - Run the synchronous pipeline on the blocking pool
//! - Pass declined requests on to static file serving
//! - Apply configuration updates without restarting

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::{broadcast, mpsc};
use tower::ServiceExt;
use tower_http::{services::ServeDir, timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::{ConfigStore, ServerConfig, SiteConfig};
use crate::http::request::{propagate_request_id_layer, request_id, set_request_id_layer};
use crate::http::response::SassResponse;
use crate::observability::metrics;
use crate::sass::dispatcher::UNKNOWN_INTERNAL_ERROR;
use crate::sass::{GrassCompiler, HandlerResult, OsFilesystem, RequestDescriptor, SassHandler};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub handler: SassHandler,
}

/// HTTP server hosting the stylesheet handler.
pub struct HttpServer {
    router: Router,
    config: ServerConfig,
    store: Arc<ConfigStore>,
}

impl HttpServer {
    /// Create a server compiling with grass against the real filesystem.
    pub fn new(config: ServerConfig) -> Self {
        let store = Arc::new(ConfigStore::new(config.clone()));
        let handler = SassHandler::new(Arc::new(GrassCompiler::new()), Arc::new(OsFilesystem), store);
        Self::with_handler(config, handler)
    }

    /// Create a server around an already-built handler.
    pub fn with_handler(config: ServerConfig, handler: SassHandler) -> Self {
        let store = handler.config().clone();
        let router = Self::build_router(&config, AppState { handler });
        Self {
            router,
            config,
            store,
        }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &ServerConfig, state: AppState) -> Router {
        Router::new()
            .route("/{*path}", any(sass_handler))
            .route("/", any(sass_handler))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(propagate_request_id_layer())
            .layer(TraceLayer::new_for_http())
            .layer(set_request_id_layer())
    }

    /// Run the server until `shutdown` fires.
    ///
    /// Configurations received on `config_updates` replace the active one;
    /// listener and timeout settings only take effect on restart.
    pub async fn run(
        self,
        listener: TcpListener,
        mut config_updates: mpsc::UnboundedReceiver<ServerConfig>,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            document_root = %self.config.server.document_root,
            "HTTP server starting"
        );

        let store = self.store.clone();
        tokio::spawn(async move {
            while let Some(config) = config_updates.recv().await {
                store.replace(config);
            }
        });

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config the server was built with.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }
}

/// Offer every request to the stylesheet handler first.
async fn sass_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start = Instant::now();
    let request_id = request_id(&request);
    let snapshot = state.handler.config().snapshot();
    let descriptor = RequestDescriptor::new(
        request.method().clone(),
        request.uri().path(),
        &snapshot.config.server,
    );

    tracing::debug!(
        request_id = %request_id,
        method = %descriptor.method,
        path = %descriptor.uri_path,
        "Handling request"
    );

    let handler = state.handler.clone();
    let pipeline_snapshot = snapshot.clone();
    let result =
        tokio::task::spawn_blocking(move || handler.handle(&pipeline_snapshot, &descriptor)).await;

    match result {
        Ok(HandlerResult::Respond(response)) => {
            metrics::record_request("stylesheet", response.status.as_u16(), start);
            response.into_response()
        }
        Ok(HandlerResult::Declined(_)) => {
            let response = serve_declined(&snapshot.config.server, request).await;
            metrics::record_request("passthrough", response.status().as_u16(), start);
            response
        }
        Err(e) => {
            tracing::error!(request_id = %request_id, error = %e, "Stylesheet handler task failed");
            metrics::record_request("stylesheet", 500, start);
            SassResponse::internal_error(UNKNOWN_INTERNAL_ERROR).into_response()
        }
    }
}

/// The handler chain's next step after a decline.
async fn serve_declined(site: &SiteConfig, request: Request<Body>) -> Response {
    if !site.serve_static {
        return (StatusCode::NOT_FOUND, "Not Found").into_response();
    }

    match ServeDir::new(&site.document_root).oneshot(request).await {
        Ok(response) => response.map(Body::new).into_response(),
        Err(never) => match never {},
    }
}
