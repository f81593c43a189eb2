use crate::infra::{deserialize_optional_tab, deserialize_selection, AppState, DashboardState};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use chrono::{DateTime, Utc};
use market_scope::dashboard::domain::{Competitor, TimeRange, ALL_COMPETITORS_LABEL};
use market_scope::dashboard::{
    CompetitorSelection, DashboardQuery, DashboardTab, DashboardView, StrategyDocument, TabView,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;

#[derive(Debug, Default, Deserialize)]
pub(crate) struct DashboardViewRequest {
    #[serde(default, deserialize_with = "deserialize_selection")]
    pub(crate) competitor: CompetitorSelection,
    #[serde(default)]
    pub(crate) time_range: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_tab")]
    pub(crate) tab: Option<DashboardTab>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub(crate) enum DashboardPayload {
    Full(Box<DashboardView>),
    Tab(TabView),
}

#[derive(Debug, Serialize)]
pub(crate) struct DashboardViewResponse {
    pub(crate) generated_at: DateTime<Utc>,
    pub(crate) selection: CompetitorSelection,
    pub(crate) time_range: String,
    pub(crate) view: DashboardPayload,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct StrategyRequest {
    #[serde(default, deserialize_with = "deserialize_selection")]
    pub(crate) competitor: CompetitorSelection,
}

#[derive(Debug, Serialize)]
pub(crate) struct StrategyResponse {
    pub(crate) generated_at: DateTime<Utc>,
    pub(crate) selection: CompetitorSelection,
    pub(crate) strategy: StrategyDocument,
}

#[derive(Debug, Serialize)]
pub(crate) struct CompetitorListResponse {
    pub(crate) all_label: &'static str,
    pub(crate) competitors: Vec<Competitor>,
}

#[derive(Debug, Serialize)]
pub(crate) struct TimeRangeListResponse {
    pub(crate) default: &'static str,
    pub(crate) time_ranges: Vec<TimeRange>,
}

pub(crate) fn with_dashboard_routes(state: DashboardState) -> Router {
    Router::new()
        .route("/api/v1/competitors", get(competitors_endpoint))
        .route("/api/v1/time-ranges", get(time_ranges_endpoint))
        .route("/api/v1/dashboard/view", post(dashboard_view_endpoint))
        .route("/api/v1/dashboard/strategy", post(strategy_endpoint))
        .layer(Extension(state))
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn competitors_endpoint(
    Extension(state): Extension<DashboardState>,
) -> Json<CompetitorListResponse> {
    Json(CompetitorListResponse {
        all_label: ALL_COMPETITORS_LABEL,
        competitors: state.fixtures.competitors.clone(),
    })
}

pub(crate) async fn time_ranges_endpoint(
    Extension(state): Extension<DashboardState>,
) -> Json<TimeRangeListResponse> {
    Json(TimeRangeListResponse {
        default: state.default_time_range.id(),
        time_ranges: state.fixtures.time_ranges.clone(),
    })
}

pub(crate) async fn dashboard_view_endpoint(
    Extension(state): Extension<DashboardState>,
    Json(payload): Json<DashboardViewRequest>,
) -> Json<DashboardViewResponse> {
    let DashboardViewRequest {
        competitor,
        time_range,
        tab,
    } = payload;

    let query = DashboardQuery::new(competitor, state.time_range_or_default(time_range));
    debug!(
        selection = %query.selection,
        time_range = %query.time_range,
        tab = ?tab,
        "dashboard view requested"
    );

    let view = match tab {
        Some(tab) => DashboardPayload::Tab(state.fixtures.tab(tab, &query)),
        None => DashboardPayload::Full(Box::new(state.fixtures.dashboard(&query))),
    };

    Json(DashboardViewResponse {
        generated_at: Utc::now(),
        selection: query.selection,
        time_range: query.time_range,
        view,
    })
}

pub(crate) async fn strategy_endpoint(
    Extension(state): Extension<DashboardState>,
    Json(payload): Json<StrategyRequest>,
) -> Json<StrategyResponse> {
    let strategy = state.fixtures.strategy(&payload.competitor);

    Json(StrategyResponse {
        generated_at: Utc::now(),
        selection: payload.competitor,
        strategy,
    })
}
