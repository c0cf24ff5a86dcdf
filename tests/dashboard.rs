//! Dashboard aggregate tests: fetch-cycle loading and error semantics,
//! superseded-cycle discard, location switching and language handling.

use prayer_dashboard::catalog;
use prayer_dashboard::clients::{
    AladhanClient, IpGeolocationClient, MuslimSalatClient, NominatimClient, OpenWeatherClient,
};
use prayer_dashboard::domain::TextDirection;
use prayer_dashboard::repo::{init_db, PrayerCacheRepo};
use prayer_dashboard::services::{LocationService, PrayerTimesService, WeatherService};
use prayer_dashboard::state::Dashboard;
use sqlx::sqlite::SqlitePoolOptions;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{method, path, path_regex, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const GENERIC_ERROR: &str = "Failed to fetch data. Please try again later.";

async fn dashboard(server: &MockServer) -> Arc<Dashboard> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory pool");
    init_db(&pool).await.expect("schema");
    let repo = PrayerCacheRepo::new(pool);

    let prayer_times = PrayerTimesService::new(
        repo.clone(),
        AladhanClient::new(server.uri()).expect("client"),
        MuslimSalatClient::new(server.uri()).expect("client"),
    );
    let weather = WeatherService::new(
        OpenWeatherClient::new(server.uri(), "test-key".to_string()).expect("client"),
        "https://openweathermap.org".to_string(),
    );
    let location = LocationService::new(
        IpGeolocationClient::new(server.uri()).expect("client"),
        NominatimClient::new(server.uri()).expect("client"),
    );

    Arc::new(Dashboard::new(
        catalog::default_city(),
        prayer_times,
        weather,
        location,
        repo,
    ))
}

/// Mount a timings response for one latitude, optionally delayed.
async fn mount_prayer(server: &MockServer, latitude: &str, fajr: &str, delay_ms: u64) {
    Mock::given(method("GET"))
        .and(path_regex(r"^/v1/timings/.*"))
        .and(query_param("latitude", latitude))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({
                    "data": {"timings": {
                        "Fajr": fajr, "Dhuhr": "12:03", "Asr": "15:21",
                        "Maghrib": "17:52", "Isha": "19:45"
                    }}
                }))
                .set_delay(Duration::from_millis(delay_ms)),
        )
        .mount(server)
        .await;
}

async fn mount_weather(server: &MockServer, lat: &str, temp: f64, delay_ms: u64) {
    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .and(query_param("lat", lat))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({
                    "main": {"temp": temp, "humidity": 40},
                    "weather": [{"description": "clear sky", "icon": "01d"}]
                }))
                .set_delay(Duration::from_millis(delay_ms)),
        )
        .mount(server)
        .await;
}

#[tokio::test]
async fn cycle_holds_loading_until_both_fetches_settle() {
    let server = MockServer::start().await;
    mount_prayer(&server, "30.0444", "05:12", 300).await;
    mount_weather(&server, "30.0444", 25.0, 0).await;

    let dash = dashboard(&server).await;
    let handle = {
        let dash = dash.clone();
        tokio::spawn(async move { dash.select_city(catalog::default_city()).await })
    };

    tokio::time::sleep(Duration::from_millis(100)).await;
    let mid = dash.snapshot().await;
    assert!(mid.loading, "loading must hold while the slow fetch runs");
    assert!(mid.error.is_none());

    handle.await.expect("cycle");
    let done = dash.snapshot().await;
    assert!(!done.loading);
    assert_eq!(done.prayer_times.len(), 5);
    assert!(done.weather.is_some());
    assert!((done.qibla_direction - 136.14).abs() < 0.5);
}

#[tokio::test]
async fn cycle_failure_collapses_to_one_generic_message() {
    let server = MockServer::start().await;
    mount_prayer(&server, "30.0444", "05:12", 0).await;
    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let dash = dashboard(&server).await;
    dash.select_city(catalog::default_city()).await;

    let snap = dash.snapshot().await;
    assert!(!snap.loading);
    assert_eq!(snap.error.as_deref(), Some(GENERIC_ERROR));
    // The successful half of the cycle still lands.
    assert_eq!(snap.prayer_times.len(), 5);
    assert!(snap.weather.is_none());
}

#[tokio::test]
async fn new_selection_clears_a_previous_error() {
    let server = MockServer::start().await;
    mount_prayer(&server, "30.0444", "05:12", 0).await;
    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .and(query_param("lat", "30.0444"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    mount_prayer(&server, "25.6872", "04:58", 300).await;
    mount_weather(&server, "25.6872", 31.0, 300).await;

    let dash = dashboard(&server).await;
    dash.select_city(catalog::default_city()).await;
    assert_eq!(dash.snapshot().await.error.as_deref(), Some(GENERIC_ERROR));

    let luxor = catalog::city_by_id("7").unwrap();
    let handle = {
        let dash = dash.clone();
        tokio::spawn(async move { dash.select_city(luxor).await })
    };

    tokio::time::sleep(Duration::from_millis(100)).await;
    let mid = dash.snapshot().await;
    assert!(mid.loading);
    assert!(mid.error.is_none(), "starting a cycle clears the old error");

    handle.await.expect("cycle");
    assert!(dash.snapshot().await.error.is_none());
}

#[tokio::test]
async fn superseded_cycle_discards_its_results() {
    let server = MockServer::start().await;
    // Cairo answers slowly, Luxor immediately.
    mount_prayer(&server, "30.0444", "05:12", 500).await;
    mount_weather(&server, "30.0444", 25.0, 500).await;
    mount_prayer(&server, "25.6872", "04:58", 0).await;
    mount_weather(&server, "25.6872", 31.0, 0).await;

    let dash = dashboard(&server).await;
    let slow = {
        let dash = dash.clone();
        tokio::spawn(async move { dash.select_city(catalog::default_city()).await })
    };
    tokio::time::sleep(Duration::from_millis(50)).await;

    dash.select_city(catalog::city_by_id("7").unwrap()).await;
    slow.await.expect("stale cycle");

    let snap = dash.snapshot().await;
    assert_eq!(snap.selected_city.name, "Luxor");
    assert_eq!(snap.prayer_times[0].time, "04:58", "stale write must be discarded");
    assert_eq!(snap.weather.unwrap().temperature, 31);
    assert!(!snap.loading);
}

#[tokio::test]
async fn use_my_location_selects_the_resolved_city() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/json/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "success", "lat": 30.0131, "lon": 31.2089
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/reverse"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "address": {"city": "Giza", "country": "Egypt", "country_code": "eg"}
        })))
        .mount(&server)
        .await;
    mount_prayer(&server, "30.0131", "05:14", 0).await;
    mount_weather(&server, "30.0131", 24.0, 0).await;

    let dash = dashboard(&server).await;
    let city = dash.use_my_location(None).await.expect("location");
    assert_eq!(city.id, "user-location");
    assert_eq!(city.name, "Giza");

    let snap = dash.snapshot().await;
    assert_eq!(snap.selected_city.id, "user-location");
    assert!(snap.user_location.is_some());
    assert!(!snap.acquiring_location);
    assert!(snap.error.is_none());
}

#[tokio::test]
async fn location_failure_keeps_the_current_selection() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/json/"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let dash = dashboard(&server).await;
    let err = dash.use_my_location(None).await;
    assert!(err.is_err());

    let snap = dash.snapshot().await;
    assert_eq!(snap.selected_city.name, "Cairo");
    assert_eq!(
        snap.error.as_deref(),
        Some("Could not access your location. Please select a city manually.")
    );
    assert!(!snap.acquiring_location);
    assert!(snap.user_location.is_none());
}

#[tokio::test]
async fn language_switch_drives_text_direction() {
    let server = MockServer::start().await;
    let dash = dashboard(&server).await;

    assert_eq!(dash.set_language("ar".to_string()).await, TextDirection::Rtl);
    let snap = dash.snapshot().await;
    assert_eq!(snap.language, "ar");
    assert_eq!(snap.direction, TextDirection::Rtl);

    assert_eq!(dash.set_language("fr".to_string()).await, TextDirection::Ltr);
    assert_eq!(dash.snapshot().await.direction, TextDirection::Ltr);
}

#[tokio::test]
async fn taraweeh_estimate_follows_the_stored_isha() {
    let server = MockServer::start().await;
    mount_prayer(&server, "30.0444", "05:12", 0).await;
    mount_weather(&server, "30.0444", 25.0, 0).await;

    let dash = dashboard(&server).await;
    assert_eq!(dash.taraweeh_estimate().await.unwrap(), "20:30");

    dash.select_city(catalog::default_city()).await;
    // Stored Isha is 19:45, so taraweeh lands at 21:15.
    assert_eq!(dash.taraweeh_estimate().await.unwrap(), "21:15");
}
