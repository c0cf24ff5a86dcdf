/// Application routes configuration
use crate::handlers::{
    get_qibla, get_ramadan, get_state, get_taraweeh, health, list_cities, list_duas, select_city,
    select_city_by_id, set_language, use_my_location, AppState,
};
use axum::{
    routing::{get, post},
    Router,
};

/// Build the application router with all routes
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health))
        // Aggregate state
        .route("/state", get(get_state))
        // Reference data
        .route("/cities", get(list_cities))
        .route("/duas", get(list_duas))
        // Selection and settings
        .route("/city", post(select_city))
        .route("/city/:id", post(select_city_by_id))
        .route("/location", post(use_my_location))
        .route("/language", post(set_language))
        // Derived views
        .route("/ramadan", get(get_ramadan))
        .route("/taraweeh", get(get_taraweeh))
        .route("/qibla", get(get_qibla))
        .with_state(state)
}
