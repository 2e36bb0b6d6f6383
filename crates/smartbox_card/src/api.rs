use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::Mutex;

use axum::Json;
use axum::Router;
use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::http::header;
use axum::response::Html;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::routing::post;
use serde::Serialize;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::card::RemoteCard;
use crate::command::RemoteCommand;
use crate::registry::CustomCard;
use crate::remote::KeyActionLog;
use crate::resources::CARD_MODULE;
use crate::resources::CARD_RESOURCE_URL;
use crate::resources::ResourceStore;

/// Response for the /v1/ping endpoint
#[derive(Serialize)]
struct PingResponse {
    status: String,
}

/// Response for the /v1/info endpoint
#[derive(Serialize)]
struct InfoResponse {
    version: String,
    hostname: String,
}

/// Shared state of the preview host
pub struct AppState {
    version: &'static str,
    card: Mutex<RemoteCard>,
    key_actions: Arc<KeyActionLog>,
    custom_cards: Vec<CustomCard>,
    resources: ResourceStore,
}

impl AppState {
    pub fn new(
        card: RemoteCard,
        key_actions: Arc<KeyActionLog>,
        custom_cards: Vec<CustomCard>,
        resources: ResourceStore,
    ) -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION"),
            card: Mutex::new(card),
            key_actions,
            custom_cards,
            resources,
        }
    }
}

/// Handler for GET /v1/ping
#[tracing::instrument]
async fn ping() -> impl IntoResponse {
    tracing::debug!("Handling /v1/ping request");
    (
        StatusCode::OK,
        Json(PingResponse {
            status: "ok".to_string(),
        }),
    )
}

/// Handler for GET /v1/info
#[tracing::instrument(skip(state))]
async fn info(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    tracing::debug!("Handling /v1/info request");

    let hostname = hostname::get()
        .ok()
        .and_then(|h| h.into_string().ok())
        .unwrap_or_else(|| "unknown".to_string());

    (
        StatusCode::OK,
        Json(InfoResponse {
            version: state.version.to_string(),
            hostname,
        }),
    )
}

/// Handler for GET /card
#[tracing::instrument(skip(state))]
async fn card(State(state): State<Arc<AppState>>) -> Result<Html<String>, StatusCode> {
    let card = state
        .card
        .lock()
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    Ok(Html(card.to_html()))
}

/// Handler for POST /card/press/:command
#[tracing::instrument(skip(state))]
async fn press(State(state): State<Arc<AppState>>, Path(command): Path<String>) -> StatusCode {
    let Ok(command) = command.parse::<RemoteCommand>() else {
        tracing::debug!("Unknown command token");
        return StatusCode::NOT_FOUND;
    };

    let Ok(card) = state.card.lock() else {
        return StatusCode::INTERNAL_SERVER_ERROR;
    };

    if card.press(command) {
        StatusCode::NO_CONTENT
    } else {
        StatusCode::NOT_FOUND
    }
}

/// Handler for GET /v1/key-actions
#[tracing::instrument(skip(state))]
async fn key_actions(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.key_actions.actions())
}

/// Handler for GET /v1/navigate-actions
#[tracing::instrument(skip(state))]
async fn navigate_actions(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.key_actions.navigations())
}

/// Handler for GET /v1/resources
#[tracing::instrument(skip(state))]
async fn resources(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(&state.resources).into_response()
}

/// Handler for GET /static/neo_smartbox-card.js
#[tracing::instrument]
async fn card_module() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/javascript")], CARD_MODULE)
}

/// Handler for GET /v1/cards
#[tracing::instrument(skip(state))]
async fn cards(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.custom_cards.clone())
}

/// Create the API router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/v1/ping", get(ping))
        .route("/v1/info", get(info))
        .route("/v1/key-actions", get(key_actions))
        .route("/v1/navigate-actions", get(navigate_actions))
        .route("/v1/cards", get(cards))
        .route("/v1/resources", get(resources))
        .route(CARD_RESOURCE_URL, get(card_module))
        .route("/card", get(card))
        .route("/card/press/:command", post(press))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the preview HTTP server
///
/// Binds to `listen:port` and serves until `shutdown_rx` fires.
pub async fn serve(
    listen: String,
    port: u16,
    state: Arc<AppState>,
    shutdown_rx: tokio::sync::oneshot::Receiver<()>,
) -> Result<(), Box<dyn std::error::Error>> {
    let app = create_router(state);

    let addr: SocketAddr = format!("{}:{}", listen, port).parse()?;
    tracing::info!("Starting preview server on {}", addr);

    let listener = TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            shutdown_rx.await.ok();
            tracing::info!("Preview server shutting down gracefully");
        })
        .await?;

    Ok(())
}
