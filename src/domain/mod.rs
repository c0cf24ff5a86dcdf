/// Domain models for the application
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Sentinel id for a city derived from geolocation rather than the catalog.
pub const USER_LOCATION_ID: &str = "user-location";

/// A selectable city. Immutable once constructed; replaced wholesale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct City {
    pub id: String,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub country: String,
    pub country_code: String,
}

/// A raw coordinate pair, as reported by geolocation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// The five daily prayers, in canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PrayerName {
    Fajr,
    Dhuhr,
    Asr,
    Maghrib,
    Isha,
}

impl PrayerName {
    pub const ALL: [PrayerName; 5] = [
        PrayerName::Fajr,
        PrayerName::Dhuhr,
        PrayerName::Asr,
        PrayerName::Maghrib,
        PrayerName::Isha,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PrayerName::Fajr => "Fajr",
            PrayerName::Dhuhr => "Dhuhr",
            PrayerName::Asr => "Asr",
            PrayerName::Maghrib => "Maghrib",
            PrayerName::Isha => "Isha",
        }
    }
}

/// One prayer with its wall-clock time as an "HH:MM" string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrayerTime {
    pub name: PrayerName,
    pub time: String,
}

/// Current weather for the selected city.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Weather {
    pub temperature: i32,
    pub condition: String,
    pub humidity: i32,
    pub icon: String,
}

/// Ramadan status for the active year. `days_left` and `current_day` are
/// mutually exclusive; neither is present once the range has passed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RamadanInfo {
    pub year: i32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days_left: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_day: Option<i64>,
    pub is_ramadan: bool,
}

/// A supplication from the built-in collection.
#[derive(Debug, Clone, Serialize)]
pub struct Dua {
    pub id: u32,
    pub title: &'static str,
    pub arabic_text: &'static str,
    pub translation: &'static str,
    pub transliteration: &'static str,
}

/// UI text direction derived from the active language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextDirection {
    Ltr,
    Rtl,
}

impl TextDirection {
    /// Arabic reads right-to-left; every other supported language is LTR.
    pub fn for_language(code: &str) -> Self {
        if code == "ar" {
            TextDirection::Rtl
        } else {
            TextDirection::Ltr
        }
    }
}

/// Health check response
#[derive(Serialize)]
pub struct Health {
    pub status: &'static str,
    pub now: DateTime<Utc>,
}
