//! HTTP API over [`MockupService`].
//!
//! | Method | Path        | Body                                        |
//! |--------|-------------|---------------------------------------------|
//! | GET    | `/`         |                                             |
//! | GET    | `/models`   |                                             |
//! | POST   | `/detect`   | multipart `file`                            |
//! | POST   | `/generate` | multipart `file`, `color`, `model`, `orientation` |

pub mod routes;

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;

use crate::config::ServerConfig;
use crate::error::{MockupError, Result};
use crate::service::MockupService;

/// Shared handler state.
#[derive(Clone)]
pub struct HttpState {
    pub service: Arc<MockupService>,
}

impl HttpState {
    pub fn new(service: MockupService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }
}

fn cors_layer(origins: &[String]) -> Result<CorsLayer> {
    let allow_origin = if origins.iter().any(|o| o == "*") {
        AllowOrigin::any()
    } else {
        let values = origins
            .iter()
            .map(|o| {
                HeaderValue::from_str(o)
                    .map_err(|_| MockupError::ConfigInvalid(format!("invalid CORS origin '{o}'")))
            })
            .collect::<Result<Vec<_>>>()?;
        AllowOrigin::list(values)
    };

    Ok(CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any))
}

/// Build the API router.
pub fn router(state: HttpState, config: &ServerConfig) -> Result<Router> {
    Ok(Router::new()
        .route("/", get(routes::health))
        .route("/models", get(routes::list_models))
        .route("/detect", post(routes::detect))
        .route("/generate", post(routes::generate))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer(&config.cors_origins)?)
                .layer(DefaultBodyLimit::max(config.max_upload_bytes)),
        )
        .with_state(state))
}

/// Bind the configured address.
pub async fn bind(config: &ServerConfig) -> Result<TcpListener> {
    let addr = config.bind_address();
    TcpListener::bind(&addr)
        .await
        .map_err(|e| MockupError::WebServerFailed {
            addr,
            reason: e.to_string(),
        })
}

/// Serve `app` on `listener` until Ctrl+C.
pub async fn run(listener: TcpListener, app: Router) -> Result<()> {
    let addr = listener
        .local_addr()
        .map_or_else(|_| "unknown".to_string(), |a| a.to_string());
    info!(%addr, "Serving mockup API");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| MockupError::WebServerFailed {
            addr,
            reason: e.to_string(),
        })
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutting down");
    }
}
