use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use arctic_core::telemetry::{Metric, MetricKind, Snapshot, Trend};

use crate::api::{ApiQuery, ApiResult};
use crate::app_state::AppState;
use crate::catalog::{SatelliteStatus, SATELLITES};
use crate::storage::{now_rfc3339, HistoryPoint};

#[derive(Debug, Serialize)]
pub struct MetricView {
    pub value: f64,
    pub min: f64,
    pub max: f64,
    pub change_24h: f64,
    pub trend: Trend,
}

impl From<Metric> for MetricView {
    fn from(m: Metric) -> Self {
        Self {
            value: m.value,
            min: m.min,
            max: m.max,
            change_24h: m.change_24h,
            trend: m.trend,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DashboardData {
    pub temperature: MetricView,
    pub ice_coverage: MetricView,
    pub pollution: MetricView,
    pub wildlife: MetricView,
    pub wind_speed: MetricView,
    pub sea_level: MetricView,
}

impl From<&Snapshot> for DashboardData {
    fn from(s: &Snapshot) -> Self {
        Self {
            temperature: s.get(MetricKind::Temperature).into(),
            ice_coverage: s.get(MetricKind::IceCoverage).into(),
            pollution: s.get(MetricKind::Pollution).into(),
            wildlife: s.get(MetricKind::Wildlife).into(),
            wind_speed: s.get(MetricKind::WindSpeed).into(),
            sea_level: s.get(MetricKind::SeaLevel).into(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub timestamp: String,
    pub data: DashboardData,
    pub satellites: SatelliteStatus,
}

/// `GET /api/dashboard`
pub async fn get_dashboard(State(app): State<AppState>) -> Json<DashboardResponse> {
    let snap = app.snapshot();
    Json(DashboardResponse {
        timestamp: now_rfc3339(),
        data: DashboardData::from(snap.as_ref()),
        satellites: SATELLITES,
    })
}

#[derive(Debug, Serialize)]
pub struct MetricResponse {
    pub timestamp: String,
    pub metric: MetricKind,
    pub value: f64,
    pub min_value: f64,
    pub max_value: f64,
    pub change_24h: f64,
    pub trend: Trend,
}

/// `GET /api/dashboard/metric/:type`
pub async fn get_metric(
    State(app): State<AppState>,
    Path(metric_type): Path<String>,
) -> ApiResult<Json<MetricResponse>> {
    let kind: MetricKind = metric_type.parse()?;
    let m = app.snapshot().get(kind);
    Ok(Json(MetricResponse {
        timestamp: now_rfc3339(),
        metric: kind,
        value: m.value,
        min_value: m.min,
        max_value: m.max,
        change_24h: m.change_24h,
        trend: m.trend,
    }))
}

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    #[serde(rename = "type")]
    pub metric_type: Option<String>,
    pub limit: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub metric: String,
    pub data: Vec<HistoryPoint>,
}

/// `GET /api/dashboard/history?type=&limit=`
///
/// Reads the persisted log, so it may trail the live snapshot by a tick.
pub async fn get_history(
    State(app): State<AppState>,
    ApiQuery(q): ApiQuery<HistoryQuery>,
) -> ApiResult<Json<HistoryResponse>> {
    let metric = q
        .metric_type
        .unwrap_or_else(|| MetricKind::Temperature.as_str().to_string());
    let limit = q.limit.unwrap_or(app.cfg().telemetry.default_history_limit);

    let name = metric.clone();
    let data = app.with_db(move |db| db.history(&name, limit)).await?;
    Ok(Json(HistoryResponse { metric, data }))
}
