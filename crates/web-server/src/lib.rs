// In crates/web-server/src/lib.rs

use axum::{
    Router,
    body::Bytes,
    extract::{DefaultBodyLimit, State},
    http::StatusCode,
    response::{Html, Json},
    routing::{get, post, put},
};
use app_config::{ServerSettings, ViewerSettings};
use projections::{HtmlCanvas, PageMode, ReportView, render_page};
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use types::{LoadResponse, TimeZoneRequest, ViewSnapshot};

pub mod error;
pub mod types;

// Re-export our custom error type for convenience.
pub use error::{Error, Result};

/// Backtest exports routinely exceed axum's 2 MB default.
const MAX_REPORT_BYTES: usize = 64 * 1024 * 1024;

/// The shared application state that is available to all API handlers.
///
/// One report view per process. Every handler locks it, runs to completion and
/// releases it, so requests never interleave inside a render.
#[derive(Clone)]
pub struct AppState {
    pub view: Arc<Mutex<ReportView>>,
    pub canvas: HtmlCanvas,
    pub settings: Arc<ViewerSettings>,
}

impl AppState {
    pub fn new(settings: ViewerSettings) -> Result<Self> {
        let canvas = HtmlCanvas::new();
        let view = ReportView::from_settings(&settings, Box::new(canvas.clone()))?;
        Ok(Self {
            view: Arc::new(Mutex::new(view)),
            canvas,
            settings: Arc::new(settings),
        })
    }

    fn lock_view(&self) -> MutexGuard<'_, ReportView> {
        self.view.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Creates the main application router with all routes and middleware.
pub fn create_router(app_state: AppState) -> Router {
    let cors = tower_http::cors::CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods(tower_http::cors::Any)
        .allow_headers(tower_http::cors::Any);

    let api_router = Router::new()
        .route("/report", post(load_report_handler))
        .route("/render", post(render_handler))
        .route("/time-zone", put(change_time_zone_handler))
        .route("/time-zones", get(time_zones_handler))
        .route("/charts/equity/reset-zoom", post(reset_zoom_handler))
        .route("/view", get(view_handler))
        .layer(DefaultBodyLimit::max(MAX_REPORT_BYTES));

    Router::new()
        .route("/", get(page_handler))
        .route("/health", get(health_check_handler))
        .nest("/api", api_router)
        .layer(
            ServiceBuilder::new()
                .layer(tower_http::trace::TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(app_state)
}

async fn health_check_handler() -> &'static str {
    "OK"
}

/// `GET /`: the page as it currently stands.
async fn page_handler(State(state): State<AppState>) -> Result<Html<String>> {
    let view = state.lock_view();
    let page = render_page(&view, &state.canvas, &state.settings, PageMode::Served)?;
    Ok(Html(page))
}

/// `POST /api/report`: the raw bytes of an exported report.
async fn load_report_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<LoadResponse>> {
    let summary = state.lock_view().load(&body)?;
    tracing::info!(
        bytes = body.len(),
        trades = summary.trades,
        orders = summary.orders,
        "Report loaded."
    );
    Ok(Json(summary.into()))
}

async fn render_handler(State(state): State<AppState>) -> Result<Json<ViewSnapshot>> {
    let mut view = state.lock_view();
    view.render()?;
    Ok(Json(ViewSnapshot::of(&view)))
}

/// `PUT /api/time-zone`: switches zone and re-renders whatever is loaded.
async fn change_time_zone_handler(
    State(state): State<AppState>,
    Json(request): Json<TimeZoneRequest>,
) -> Result<Json<ViewSnapshot>> {
    let time_zone = app_config::parse_time_zone(&request.time_zone)?;
    let mut view = state.lock_view();
    view.change_time_zone(time_zone)?;
    Ok(Json(ViewSnapshot::of(&view)))
}

async fn time_zones_handler() -> Json<Vec<&'static str>> {
    Json(chrono_tz::TZ_VARIANTS.iter().map(|zone| zone.name()).collect())
}

async fn reset_zoom_handler(State(state): State<AppState>) -> Result<StatusCode> {
    state.lock_view().reset_zoom()?;
    Ok(StatusCode::NO_CONTENT)
}

async fn view_handler(State(state): State<AppState>) -> Json<ViewSnapshot> {
    Json(ViewSnapshot::of(&state.lock_view()))
}

/// The main entry point for running the web server.
///
/// Binds the listener and serves the viewer until the process is terminated.
pub async fn run(server: ServerSettings, viewer: ViewerSettings) -> Result<()> {
    let app_state = AppState::new(viewer)?;
    let app = create_router(app_state);

    let address = format!("{}:{}", server.host, server.port);
    let listener = TcpListener::bind(&address)
        .await
        .map_err(Error::ServerBindError)?;
    tracing::info!("Report viewer listening on http://{}", address);

    axum::serve(listener, app.into_make_service())
        .await
        .map_err(Error::Serve)?;

    Ok(())
}
