use std::{
    net::{IpAddr, SocketAddr},
    sync::Arc,
};

use anyhow::Context;
use axum::{
    Json, Router,
    extract::State,
    http::{self, HeaderName, HeaderValue, Method},
    response::{Html, IntoResponse, Redirect},
    routing::{get, post},
};
use directory::{
    EmployeeTable, Loader, load_into,
    render::{self, NEXT_ACTION, PREVIOUS_ACTION},
};
use serde::Serialize;
use tokio::{sync::RwLock, task::JoinHandle};
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use tracing::{debug, info, instrument};

use crate::config::AppConfig;

/// Shared view state. There is exactly one table view per process.
#[derive(Clone)]
pub struct AppState {
    pub view: Arc<RwLock<EmployeeTable>>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(config: Arc<AppConfig>) -> Self {
        Self {
            view: Arc::new(RwLock::new(EmployeeTable::new())),
            config,
        }
    }
}

/// Issue the one read of the employee collection in the background. The view
/// renders its loading state until the task settles it.
pub fn spawn_initial_load(state: &AppState, loader: Loader) -> JoinHandle<()> {
    let view = state.view.clone();
    tokio::spawn(async move { load_into(&loader, &view).await })
}

#[derive(Clone, Debug)]
pub struct ServeConfig {
    addr: SocketAddr,
}

impl ServeConfig {
    pub fn new(host: IpAddr, port: u16) -> Self {
        Self {
            addr: SocketAddr::from((host, port)),
        }
    }
}

pub async fn serve(config: ServeConfig, state: AppState) -> anyhow::Result<()> {
    let router = build_router(state);
    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("failed to bind {}", config.addr))?;

    info!(%config.addr, "roster server listening");
    axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;
    Ok(())
}

fn cors_layer(origins: &[HeaderValue]) -> CorsLayer {
    let allow_origin = if origins.is_empty() {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(origins.iter().cloned())
    };
    CorsLayer::new()
        .allow_headers([http::header::CONTENT_TYPE])
        .allow_methods([Method::POST, Method::GET])
        .allow_origin(allow_origin)
}

pub fn build_router(state: AppState) -> Router {
    let header_name = HeaderName::from_static("x-request-id");
    Router::new()
        .route("/", get(table_handler))
        .route(NEXT_ACTION, post(next_handler))
        .route(PREVIOUS_ACTION, post(previous_handler))
        .route("/health", get(health_handler))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(header_name.clone(), MakeRequestUuid))
                .layer(PropagateRequestIdLayer::new(header_name))
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer(&state.config.cors_allowed_origins)),
        )
        .with_state(state)
}

#[instrument(name = "http.table", skip_all)]
async fn table_handler(State(state): State<AppState>) -> Html<String> {
    let view = state.view.read().await;
    Html(render::render_page(&view))
}

#[instrument(name = "http.next", skip_all)]
async fn next_handler(State(state): State<AppState>) -> Redirect {
    let mut view = state.view.write().await;
    view.next_page();
    debug!(page = view.page(), "navigated forward");
    Redirect::to("/")
}

#[instrument(name = "http.previous", skip_all)]
async fn previous_handler(State(state): State<AppState>) -> Redirect {
    let mut view = state.view.write().await;
    view.previous_page();
    debug!(page = view.page(), "navigated back");
    Redirect::to("/")
}

async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    let view = state.view.read().await;
    Json(HealthResponse {
        ok: true,
        loading: view.is_loading(),
        records: view.records().len(),
        version: env!("CARGO_PKG_VERSION"),
    })
}

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    loading: bool,
    records: usize,
    version: &'static str,
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install CTRL+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};

        signal(SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    ctrl_c.await;

    #[cfg(unix)]
    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    };
}
