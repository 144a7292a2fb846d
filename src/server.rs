//! HTTP surface: one GET route per listing endpoint

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::{header, Method};
use axum::response::Json;
use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::error::{AppError, FetchError};
use crate::fetch::Fetcher;
use crate::pipeline::Extractor;
use crate::query::{search_url, Endpoint, SearchParams};
use crate::record::Record;

/// Read-only state shared by all requests
#[derive(Clone)]
pub struct AppState {
    pub fetcher: Arc<dyn Fetcher>,
    pub extractor: Arc<Extractor>,
    /// Host the outbound search URLs are built against
    pub host: Arc<str>,
}

impl AppState {
    pub fn new(fetcher: Arc<dyn Fetcher>, extractor: Extractor, host: &str) -> Self {
        Self {
            fetcher,
            extractor: Arc::new(extractor),
            host: Arc::from(host),
        }
    }
}

pub fn router(state: AppState) -> Router {
    let routes = Endpoint::ALL.into_iter().fold(Router::<AppState>::new(), |routes, endpoint| {
        routes.route(
            endpoint.path(),
            get(move |state: State<AppState>, params: Query<SearchParams>| {
                search(state, endpoint, params)
            }),
        )
    });

    routes.with_state(state).layer(cors()).layer(TraceLayer::new_for_http())
}

fn cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::HEAD, Method::OPTIONS, Method::POST, Method::PUT])
        .allow_headers([header::CONTENT_TYPE])
}

async fn search(
    State(state): State<AppState>,
    endpoint: Endpoint,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<Record>>, AppError> {
    let url = search_url(&state.host, endpoint, &params).map_err(FetchError::from)?;
    // Dropped with the handler future if the client goes away, which
    // aborts the in-flight fetch.
    let markup = state.fetcher.fetch(&url, params.language()).await?;
    let records = state.extractor.extract(&markup, &params.query_spec())?;
    Ok(Json(records))
}

pub async fn run(addr: SocketAddr, state: AppState) -> std::io::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("shutting down"),
        Err(e) => error!("failed to listen for shutdown signal: {e}"),
    }
}
