/// Main application entry point with clean architecture
use prayer_dashboard::catalog;
use prayer_dashboard::clients::{
    AladhanClient, IpGeolocationClient, MuslimSalatClient, NominatimClient, OpenWeatherClient,
};
use prayer_dashboard::config::AppConfig;
use prayer_dashboard::handlers::AppState;
use prayer_dashboard::repo::{init_db, PrayerCacheRepo};
use prayer_dashboard::routes::build_router;
use prayer_dashboard::services::{LocationService, PrayerTimesService, WeatherService};
use prayer_dashboard::state::Dashboard;
use sqlx::sqlite::SqlitePoolOptions;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);

    // Load configuration
    let config = AppConfig::from_env()?;
    info!("Configuration loaded successfully");

    // Initialize local storage
    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(&config.database_url)
        .await?;
    init_db(&pool).await?;
    info!("Local storage initialized");

    // Initialize repositories
    let repo = PrayerCacheRepo::new(pool);

    // Initialize clients
    let aladhan = AladhanClient::new(config.aladhan_url.clone())?;
    let muslimsalat = MuslimSalatClient::new(config.muslimsalat_url.clone())?;
    let openweather = OpenWeatherClient::new(
        config.openweather_url.clone(),
        config.openweather_api_key.clone(),
    )?;
    let nominatim = NominatimClient::new(config.nominatim_url.clone())?;
    let geolocate = IpGeolocationClient::new(config.geolocate_url.clone())?;

    // Initialize services and the aggregate
    let prayer_times = PrayerTimesService::new(repo.clone(), aladhan, muslimsalat);
    let weather = WeatherService::new(openweather, config.openweather_icon_url.clone());
    let location = LocationService::new(geolocate, nominatim);

    let dashboard = Arc::new(Dashboard::new(
        catalog::default_city(),
        prayer_times,
        weather,
        location,
        repo,
    ));

    // Background task: periodic refresh of the current selection. The first
    // iteration runs the initial fetch cycle for the default city.
    {
        let dashboard = dashboard.clone();
        let interval = config.refresh_seconds;
        tokio::spawn(async move {
            info!("Starting refresh task (interval: {}s)", interval);
            loop {
                dashboard.refresh().await;
                tokio::time::sleep(Duration::from_secs(interval)).await;
            }
        });
    }

    // Build router
    let app = build_router(AppState { dashboard });

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!("prayer-dashboard listening on {}", config.bind_addr);

    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}
