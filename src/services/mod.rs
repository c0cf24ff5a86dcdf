/// Business logic services layer
use crate::clients::{
    AladhanClient, IpGeolocationClient, MuslimSalatClient, NominatimClient, OpenWeatherClient,
};
use crate::domain::{City, Coordinates, PrayerTime, Weather, USER_LOCATION_ID};
use crate::errors::{ApiError, ApiResult};
use crate::repo::PrayerCacheRepo;
use crate::utils::{normalize_time, num_pick, pick_ci};
use chrono::NaiveDate;
use tracing::warn;

/// Prayer-times fetching with a provider fallback chain.
pub struct PrayerTimesService {
    repo: PrayerCacheRepo,
    primary: AladhanClient,
    fallback: MuslimSalatClient,
}

impl PrayerTimesService {
    pub fn new(repo: PrayerCacheRepo, primary: AladhanClient, fallback: MuslimSalatClient) -> Self {
        Self {
            repo,
            primary,
            fallback,
        }
    }

    /// Fetch the five daily prayer times for a city on a given date.
    ///
    /// Tries the coordinate-based primary provider, then the name-keyed
    /// fallback. Any success is persisted to the local slot; when both
    /// providers fail no partial list is returned.
    pub async fn fetch(&self, city: &City, date: NaiveDate) -> ApiResult<Vec<PrayerTime>> {
        let times = match self.fetch_primary(city, date).await {
            Ok(times) => times,
            Err(e) => {
                warn!(city = %city.name, error = %e, "primary prayer-times provider failed");
                self.fetch_fallback(city).await.map_err(|e| {
                    warn!(city = %city.name, error = %e, "fallback prayer-times provider failed");
                    ApiError::PrayerTimesUnavailable
                })?
            }
        };

        self.repo.write_prayer_times(&times).await?;
        Ok(times)
    }

    async fn fetch_primary(&self, city: &City, date: NaiveDate) -> ApiResult<Vec<PrayerTime>> {
        let timings = self
            .primary
            .fetch_timings(city.latitude, city.longitude, date)
            .await?;
        Self::extract_times(&timings)
    }

    async fn fetch_fallback(&self, city: &City) -> ApiResult<Vec<PrayerTime>> {
        let record = self.fallback.fetch_timings(&city.name).await?;
        Self::extract_times(&record)
    }

    /// Shape a provider record into the fixed five-entry list. The field
    /// match is case-insensitive since the fallback keys in lowercase.
    fn extract_times(record: &serde_json::Value) -> ApiResult<Vec<PrayerTime>> {
        crate::domain::PrayerName::ALL
            .iter()
            .map(|&name| {
                pick_ci(record, name.as_str())
                    .map(|raw| PrayerTime {
                        name,
                        time: normalize_time(&raw),
                    })
                    .ok_or_else(|| {
                        ApiError::Internal(format!("provider record missing {}", name.as_str()))
                    })
            })
            .collect()
    }
}

/// Weather fetching; single provider, no fallback.
pub struct WeatherService {
    client: OpenWeatherClient,
    icon_base_url: String,
}

impl WeatherService {
    pub fn new(client: OpenWeatherClient, icon_base_url: String) -> Self {
        Self {
            client,
            icon_base_url,
        }
    }

    /// Fetch current conditions for a city.
    pub async fn fetch(&self, city: &City) -> ApiResult<Weather> {
        let data = self
            .client
            .fetch_weather(city.latitude, city.longitude)
            .await
            .map_err(|e| ApiError::WeatherUnavailable(e.to_string()))?;

        Self::shape(&data, &self.icon_base_url)
            .ok_or_else(|| ApiError::WeatherUnavailable("malformed provider response".into()))
    }

    fn shape(data: &serde_json::Value, icon_base_url: &str) -> Option<Weather> {
        let main = data.get("main")?;
        let first = data.get("weather")?.get(0)?;

        Some(Weather {
            temperature: main.get("temp")?.as_f64()?.round() as i32,
            condition: first.get("description")?.as_str()?.to_string(),
            humidity: main.get("humidity")?.as_f64()? as i32,
            icon: format!(
                "{}/img/wn/{}@2x.png",
                icon_base_url,
                first.get("icon")?.as_str()?
            ),
        })
    }
}

/// Geolocation plus reverse-geocoding.
pub struct LocationService {
    geolocate: IpGeolocationClient,
    nominatim: NominatimClient,
}

impl LocationService {
    pub fn new(geolocate: IpGeolocationClient, nominatim: NominatimClient) -> Self {
        Self {
            geolocate,
            nominatim,
        }
    }

    /// Acquire the host's coordinates and name them. Coordinate acquisition
    /// can fail; naming cannot — a failed reverse geocode degrades to a
    /// generic "My Location" city.
    pub async fn acquire(&self) -> ApiResult<(Coordinates, City)> {
        let fix = self
            .geolocate
            .locate()
            .await
            .map_err(|e| ApiError::LocationUnavailable(e.to_string()))?;

        let latitude = num_pick(&fix, &["lat", "latitude"]);
        let longitude = num_pick(&fix, &["lon", "lng", "longitude"]);
        let coords = match (latitude, longitude) {
            (Some(latitude), Some(longitude)) => Coordinates {
                latitude,
                longitude,
            },
            _ => {
                return Err(ApiError::LocationUnavailable(
                    "geolocation response carried no coordinates".into(),
                ))
            }
        };

        let city = self.resolve(coords).await;
        Ok((coords, city))
    }

    /// Build a user-location City for known coordinates.
    pub async fn resolve(&self, coords: Coordinates) -> City {
        match self.nominatim.reverse(coords.latitude, coords.longitude).await {
            Ok(data) => Self::named_city(coords, &data),
            Err(e) => {
                warn!(error = %e, "reverse geocoding failed, using generic location name");
                Self::generic_city(coords)
            }
        }
    }

    fn named_city(coords: Coordinates, data: &serde_json::Value) -> City {
        let address = data.get("address").cloned().unwrap_or_default();

        let name = ["city", "town", "village"]
            .iter()
            .find_map(|k| address.get(*k).and_then(|v| v.as_str()))
            .unwrap_or("My Location")
            .to_string();

        let country = address
            .get("country")
            .and_then(|v| v.as_str())
            .unwrap_or("Unknown")
            .to_string();

        let country_code = address
            .get("country_code")
            .and_then(|v| v.as_str())
            .map(|s| s.to_uppercase())
            .unwrap_or_default();

        City {
            id: USER_LOCATION_ID.to_string(),
            name,
            latitude: coords.latitude,
            longitude: coords.longitude,
            country,
            country_code,
        }
    }

    fn generic_city(coords: Coordinates) -> City {
        City {
            id: USER_LOCATION_ID.to_string(),
            name: "My Location".to_string(),
            latitude: coords.latitude,
            longitude: coords.longitude,
            country: "Current Location".to_string(),
            country_code: String::new(),
        }
    }
}
