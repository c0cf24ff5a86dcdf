/// HTTP request handlers
use crate::catalog;
use crate::domain::{City, Coordinates, Health, RamadanInfo, TextDirection};
use crate::errors::ApiError;
use crate::qibla;
use crate::state::{Dashboard, DashboardSnapshot};
use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub dashboard: Arc<Dashboard>,
}

/// Successful response wrapper
#[derive(Serialize)]
pub struct SuccessResponse<T: Serialize> {
    pub ok: bool,
    #[serde(flatten)]
    pub data: T,
}

impl<T: Serialize> SuccessResponse<T> {
    pub fn new(data: T) -> Self {
        Self { ok: true, data }
    }
}

/// Health check handler
pub async fn health() -> Json<Health> {
    Json(Health {
        status: "ok",
        now: Utc::now(),
    })
}

/// Full dashboard snapshot
pub async fn get_state(State(state): State<AppState>) -> Json<SuccessResponse<DashboardSnapshot>> {
    Json(SuccessResponse::new(state.dashboard.snapshot().await))
}

#[derive(Serialize)]
pub struct CityList {
    pub cities: Vec<City>,
}

/// List the selectable city catalog
pub async fn list_cities() -> Json<SuccessResponse<CityList>> {
    Json(SuccessResponse::new(CityList {
        cities: catalog::cities(),
    }))
}

#[derive(Serialize)]
pub struct DuaList {
    pub duas: Vec<crate::domain::Dua>,
}

/// List the built-in duas
pub async fn list_duas() -> Json<SuccessResponse<DuaList>> {
    Json(SuccessResponse::new(DuaList {
        duas: catalog::duas(),
    }))
}

/// Select an arbitrary city (catalog membership is not required)
pub async fn select_city(
    State(state): State<AppState>,
    Json(city): Json<City>,
) -> Json<SuccessResponse<DashboardSnapshot>> {
    state.dashboard.select_city(city).await;
    Json(SuccessResponse::new(state.dashboard.snapshot().await))
}

/// Select a catalog city by id
pub async fn select_city_by_id(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<SuccessResponse<DashboardSnapshot>>, ApiError> {
    let city = catalog::city_by_id(&id)
        .ok_or_else(|| ApiError::NotFound(format!("no city with id {id}")))?;
    state.dashboard.select_city(city).await;
    Ok(Json(SuccessResponse::new(state.dashboard.snapshot().await)))
}

/// Switch to the user's location, geolocating the host when no coordinates
/// are supplied
pub async fn use_my_location(
    State(state): State<AppState>,
    body: Option<Json<Coordinates>>,
) -> Result<Json<SuccessResponse<DashboardSnapshot>>, ApiError> {
    state
        .dashboard
        .use_my_location(body.map(|Json(coords)| coords))
        .await?;
    Ok(Json(SuccessResponse::new(state.dashboard.snapshot().await)))
}

#[derive(Deserialize)]
pub struct LanguageRequest {
    pub language: String,
}

#[derive(Serialize)]
pub struct LanguageResponse {
    pub language: String,
    pub direction: TextDirection,
}

/// Set the active UI language
pub async fn set_language(
    State(state): State<AppState>,
    Json(req): Json<LanguageRequest>,
) -> Json<SuccessResponse<LanguageResponse>> {
    let direction = state.dashboard.set_language(req.language.clone()).await;
    Json(SuccessResponse::new(LanguageResponse {
        language: req.language,
        direction,
    }))
}

/// Ramadan status for the current selection's year
pub async fn get_ramadan(State(state): State<AppState>) -> Json<SuccessResponse<RamadanStatus>> {
    let snapshot = state.dashboard.snapshot().await;
    Json(SuccessResponse::new(RamadanStatus {
        ramadan: snapshot.ramadan,
    }))
}

#[derive(Serialize)]
pub struct RamadanStatus {
    pub ramadan: RamadanInfo,
}

#[derive(Serialize)]
pub struct TaraweehEstimate {
    pub time: String,
}

/// Estimated taraweeh start from the stored Isha time
pub async fn get_taraweeh(
    State(state): State<AppState>,
) -> Result<Json<SuccessResponse<TaraweehEstimate>>, ApiError> {
    let time = state.dashboard.taraweeh_estimate().await?;
    Ok(Json(SuccessResponse::new(TaraweehEstimate { time })))
}

#[derive(Deserialize)]
pub struct QiblaQuery {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Serialize)]
pub struct QiblaBearing {
    pub bearing: f64,
}

/// Qibla bearing for an arbitrary coordinate pair
pub async fn get_qibla(Query(q): Query<QiblaQuery>) -> Json<SuccessResponse<QiblaBearing>> {
    Json(SuccessResponse::new(QiblaBearing {
        bearing: qibla::bearing(q.latitude, q.longitude),
    }))
}
