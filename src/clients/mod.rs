/// External API clients module
use crate::errors::{ApiError, ApiResult};
use chrono::{Datelike, NaiveDate};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

/// HTTP client wrapper with common configuration
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    pub fn new() -> ApiResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent("prayer-dashboard/1.0")
            .build()?;
        Ok(Self { client })
    }

    pub fn get_client(&self) -> &Client {
        &self.client
    }
}

/// Primary prayer-times client (AlAdhan)
pub struct AladhanClient {
    http_client: HttpClient,
    base_url: String,
}

impl AladhanClient {
    pub fn new(base_url: String) -> ApiResult<Self> {
        Ok(Self {
            http_client: HttpClient::new()?,
            base_url,
        })
    }

    /// Fetch the timings object for a coordinate pair on a Gregorian date.
    /// Method 5 is the Egyptian General Authority of Survey convention.
    pub async fn fetch_timings(
        &self,
        latitude: f64,
        longitude: f64,
        date: NaiveDate,
    ) -> ApiResult<Value> {
        let url = format!(
            "{}/v1/timings/{}-{}-{}",
            self.base_url,
            date.day(),
            date.month(),
            date.year()
        );

        let resp = self
            .http_client
            .get_client()
            .get(&url)
            .query(&[
                ("latitude", latitude.to_string()),
                ("longitude", longitude.to_string()),
                ("method", "5".to_string()),
            ])
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(ApiError::Internal(format!(
                "aladhan request failed with status {}",
                resp.status()
            )));
        }

        let json: Value = resp.json().await?;
        json.get("data")
            .and_then(|d| d.get("timings"))
            .cloned()
            .ok_or_else(|| ApiError::Internal("aladhan response missing data.timings".into()))
    }
}

/// Fallback prayer-times client (MuslimSalat), keyed by lowercase city name
pub struct MuslimSalatClient {
    http_client: HttpClient,
    base_url: String,
}

impl MuslimSalatClient {
    pub fn new(base_url: String) -> ApiResult<Self> {
        Ok(Self {
            http_client: HttpClient::new()?,
            base_url,
        })
    }

    /// Fetch the first result record for a city.
    pub async fn fetch_timings(&self, city_name: &str) -> ApiResult<Value> {
        let url = format!("{}/{}.json", self.base_url, city_name.to_lowercase());

        let resp = self.http_client.get_client().get(&url).send().await?;
        if !resp.status().is_success() {
            return Err(ApiError::Internal(format!(
                "muslimsalat request failed with status {}",
                resp.status()
            )));
        }

        let json: Value = resp.json().await?;
        json.get("items")
            .and_then(|items| items.get(0))
            .cloned()
            .ok_or_else(|| ApiError::Internal("muslimsalat response missing items[0]".into()))
    }
}

/// Weather client (OpenWeatherMap)
pub struct OpenWeatherClient {
    http_client: HttpClient,
    base_url: String,
    api_key: String,
}

impl OpenWeatherClient {
    pub fn new(base_url: String, api_key: String) -> ApiResult<Self> {
        Ok(Self {
            http_client: HttpClient::new()?,
            base_url,
            api_key,
        })
    }

    /// Fetch current conditions for a coordinate pair, metric units.
    pub async fn fetch_weather(&self, latitude: f64, longitude: f64) -> ApiResult<Value> {
        let url = format!("{}/data/2.5/weather", self.base_url);

        let resp = self
            .http_client
            .get_client()
            .get(&url)
            .query(&[
                ("lat", latitude.to_string()),
                ("lon", longitude.to_string()),
                ("appid", self.api_key.clone()),
                ("units", "metric".to_string()),
            ])
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(ApiError::Internal(format!(
                "openweathermap request failed with status {}",
                resp.status()
            )));
        }

        let json = resp.json().await?;
        Ok(json)
    }
}

/// Reverse-geocoding client (Nominatim)
pub struct NominatimClient {
    http_client: HttpClient,
    base_url: String,
}

impl NominatimClient {
    pub fn new(base_url: String) -> ApiResult<Self> {
        Ok(Self {
            http_client: HttpClient::new()?,
            base_url,
        })
    }

    /// Reverse-geocode a coordinate pair at roughly city-level resolution.
    pub async fn reverse(&self, latitude: f64, longitude: f64) -> ApiResult<Value> {
        let url = format!("{}/reverse", self.base_url);

        let resp = self
            .http_client
            .get_client()
            .get(&url)
            .query(&[
                ("format", "json".to_string()),
                ("lat", latitude.to_string()),
                ("lon", longitude.to_string()),
                ("zoom", "10".to_string()),
            ])
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(ApiError::Internal(format!(
                "nominatim request failed with status {}",
                resp.status()
            )));
        }

        let json = resp.json().await?;
        Ok(json)
    }
}

/// Coordinate-acquisition client for a headless host (IP geolocation).
/// Stands in for the browser geolocation prompt: short deadline, no cached
/// position accepted.
pub struct IpGeolocationClient {
    http_client: HttpClient,
    base_url: String,
}

impl IpGeolocationClient {
    pub fn new(base_url: String) -> ApiResult<Self> {
        Ok(Self {
            http_client: HttpClient::new()?,
            base_url,
        })
    }

    /// Request a fresh coordinate fix for the host.
    pub async fn locate(&self) -> ApiResult<Value> {
        let url = format!("{}/json/", self.base_url);

        let resp = self
            .http_client
            .get_client()
            .get(&url)
            .header("Cache-Control", "no-cache")
            .timeout(Duration::from_secs(10))
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(ApiError::Internal(format!(
                "geolocation request failed with status {}",
                resp.status()
            )));
        }

        let json = resp.json().await?;
        Ok(json)
    }
}
