/// The dashboard aggregate: one process-lifetime state container with
/// explicit mutation entry points, observed by the HTTP handlers.
use crate::domain::{
    City, Coordinates, PrayerName, PrayerTime, RamadanInfo, TextDirection, Weather,
};
use crate::errors::ApiResult;
use crate::repo::PrayerCacheRepo;
use crate::services::{LocationService, PrayerTimesService, WeatherService};
use crate::{qibla, ramadan, utils};
use chrono::Local;
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;
use tracing::{info, warn};

/// Message recorded on the aggregate when a fetch cycle fails. The two
/// fetchers' distinct error kinds stay in the logs; consumers see one
/// generic string.
const FETCH_CYCLE_ERROR: &str = "Failed to fetch data. Please try again later.";

/// Point-in-time view of the aggregate, as serialized to consumers.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSnapshot {
    pub selected_city: City,
    pub prayer_times: Vec<PrayerTime>,
    pub weather: Option<Weather>,
    pub qibla_direction: f64,
    pub loading: bool,
    pub error: Option<String>,
    pub language: String,
    pub direction: TextDirection,
    pub user_location: Option<Coordinates>,
    pub acquiring_location: bool,
    pub ramadan: RamadanInfo,
}

struct Inner {
    selected_city: City,
    prayer_times: Vec<PrayerTime>,
    weather: Option<Weather>,
    qibla_direction: f64,
    loading: bool,
    error: Option<String>,
    language: String,
    user_location: Option<Coordinates>,
    acquiring_location: bool,
    ramadan: RamadanInfo,
}

pub struct Dashboard {
    inner: RwLock<Inner>,
    // Fetch-cycle generation; a cycle that has been superseded discards
    // its results instead of writing them.
    generation: AtomicU64,
    prayer_times: PrayerTimesService,
    weather: WeatherService,
    location: LocationService,
    repo: PrayerCacheRepo,
}

impl Dashboard {
    pub fn new(
        default_city: City,
        prayer_times: PrayerTimesService,
        weather: WeatherService,
        location: LocationService,
        repo: PrayerCacheRepo,
    ) -> Self {
        let ramadan = ramadan::info(Local::now().date_naive());
        Self {
            inner: RwLock::new(Inner {
                qibla_direction: qibla::bearing(default_city.latitude, default_city.longitude),
                selected_city: default_city,
                prayer_times: Vec::new(),
                weather: None,
                loading: true,
                error: None,
                language: "en".to_string(),
                user_location: None,
                acquiring_location: false,
                ramadan,
            }),
            generation: AtomicU64::new(0),
            prayer_times,
            weather,
            location,
            repo,
        }
    }

    pub async fn snapshot(&self) -> DashboardSnapshot {
        let s = self.inner.read().await;
        DashboardSnapshot {
            selected_city: s.selected_city.clone(),
            prayer_times: s.prayer_times.clone(),
            weather: s.weather.clone(),
            qibla_direction: s.qibla_direction,
            loading: s.loading,
            error: s.error.clone(),
            language: s.language.clone(),
            direction: TextDirection::for_language(&s.language),
            user_location: s.user_location,
            acquiring_location: s.acquiring_location,
            ramadan: s.ramadan.clone(),
        }
    }

    /// Replace the selection and run one fetch cycle. Arbitrary cities are
    /// accepted; membership in the catalog is not checked.
    ///
    /// The cycle sets `loading`, clears any prior error, computes the new
    /// Qibla bearing synchronously, then fetches prayer times and weather
    /// concurrently. `loading` clears only once both have settled. A cycle
    /// superseded by a later selection discards its results.
    pub async fn select_city(&self, city: City) {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        {
            let mut s = self.inner.write().await;
            s.qibla_direction = qibla::bearing(city.latitude, city.longitude);
            s.selected_city = city.clone();
            s.loading = true;
            s.error = None;
        }
        info!(city = %city.name, "starting fetch cycle");

        let today = Local::now().date_naive();
        let (prayer_result, weather_result) = tokio::join!(
            self.prayer_times.fetch(&city, today),
            self.weather.fetch(&city)
        );

        let mut s = self.inner.write().await;
        if self.generation.load(Ordering::SeqCst) != generation {
            info!(city = %city.name, "fetch cycle superseded, discarding results");
            return;
        }
        s.loading = false;

        match prayer_result {
            Ok(times) => s.prayer_times = times,
            Err(e) => {
                warn!(city = %city.name, error = %e, "prayer-times fetch failed");
                s.error = Some(FETCH_CYCLE_ERROR.to_string());
            }
        }
        match weather_result {
            Ok(weather) => s.weather = Some(weather),
            Err(e) => {
                warn!(city = %city.name, error = %e, "weather fetch failed");
                s.error = Some(FETCH_CYCLE_ERROR.to_string());
            }
        }
    }

    /// Re-run the fetch cycle for the current selection.
    pub async fn refresh(&self) {
        let city = self.inner.read().await.selected_city.clone();
        self.select_city(city).await;
    }

    /// Switch to the user's location. With explicit coordinates the
    /// geolocation step is skipped; otherwise the host is geolocated. On
    /// failure the error is recorded and the selection stays unchanged. The
    /// acquiring flag is always cleared.
    pub async fn use_my_location(&self, coords: Option<Coordinates>) -> ApiResult<City> {
        self.inner.write().await.acquiring_location = true;

        let result = match coords {
            Some(coords) => Ok((coords, self.location.resolve(coords).await)),
            None => self.location.acquire().await,
        };

        match result {
            Ok((coords, city)) => {
                {
                    let mut s = self.inner.write().await;
                    s.user_location = Some(coords);
                    s.acquiring_location = false;
                }
                self.select_city(city.clone()).await;
                Ok(city)
            }
            Err(e) => {
                let mut s = self.inner.write().await;
                s.acquiring_location = false;
                s.error = Some(e.user_message().to_string());
                Err(e)
            }
        }
    }

    /// Update the active language. Independent of the fetch cycle; any
    /// code is accepted, and the derived direction is `rtl` iff Arabic.
    pub async fn set_language(&self, code: String) -> TextDirection {
        let direction = TextDirection::for_language(&code);
        self.inner.write().await.language = code;
        direction
    }

    /// Estimated taraweeh start: 1h30m after the locally stored Isha time,
    /// defaulting to 20:30 when nothing usable is stored.
    pub async fn taraweeh_estimate(&self) -> ApiResult<String> {
        let stored = self.repo.read_prayer_times().await?;
        let isha = stored.as_deref().and_then(|times| {
            times
                .iter()
                .find(|t| t.name == PrayerName::Isha)
                .map(|t| t.time.clone())
        });
        Ok(utils::taraweeh_time(isha.as_deref()))
    }
}
