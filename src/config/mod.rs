/// Application configuration module
use std::env;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub bind_addr: String,
    pub database_url: String,
    pub aladhan_url: String,
    pub muslimsalat_url: String,
    pub openweather_url: String,
    pub openweather_api_key: String,
    pub openweather_icon_url: String,
    pub nominatim_url: String,
    pub geolocate_url: String,
    pub refresh_seconds: u64,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());

        // Local durable storage; a file next to the binary by default.
        let database_url = env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://prayer-dashboard.db?mode=rwc".to_string());

        let aladhan_url = env::var("ALADHAN_URL")
            .unwrap_or_else(|_| "https://api.aladhan.com".to_string());

        let muslimsalat_url = env::var("MUSLIMSALAT_URL")
            .unwrap_or_else(|_| "https://muslimsalat.com".to_string());

        let openweather_url = env::var("OPENWEATHER_URL")
            .unwrap_or_else(|_| "https://api.openweathermap.org".to_string());

        let openweather_api_key = env::var("OPENWEATHER_API_KEY")
            .unwrap_or_else(|_| "bd5e378503939ddaee76f12ad7a97608".to_string());

        let openweather_icon_url = env::var("OPENWEATHER_ICON_URL")
            .unwrap_or_else(|_| "https://openweathermap.org".to_string());

        let nominatim_url = env::var("NOMINATIM_URL")
            .unwrap_or_else(|_| "https://nominatim.openstreetmap.org".to_string());

        let geolocate_url =
            env::var("GEOLOCATE_URL").unwrap_or_else(|_| "http://ip-api.com".to_string());

        let refresh_seconds = env_u64("REFRESH_EVERY_SECONDS", 21600); // 6h

        Ok(Self {
            bind_addr,
            database_url,
            aladhan_url,
            muslimsalat_url,
            openweather_url,
            openweather_api_key,
            openweather_icon_url,
            nominatim_url,
            geolocate_url,
            refresh_seconds,
        })
    }
}

fn env_u64(key: &str, default: u64) -> u64 {
    env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}
