/// Utility functions
use chrono::{Duration, NaiveTime};
use serde_json::Value;

/// Extract number from JSON value
pub fn num(v: &Value) -> Option<f64> {
    if let Some(x) = v.as_f64() {
        return Some(x);
    }
    if let Some(s) = v.as_str() {
        return s.parse::<f64>().ok();
    }
    None
}

/// Pick a number from JSON by trying multiple keys
pub fn num_pick(v: &Value, keys: &[&str]) -> Option<f64> {
    keys.iter().find_map(|k| v.get(*k).and_then(num))
}

/// Pick a non-empty string field from a JSON object, matching the key
/// case-insensitively. The fallback prayer provider keys its fields in
/// lowercase; the primary capitalizes them.
pub fn pick_ci(v: &Value, key: &str) -> Option<String> {
    let obj = v.as_object()?;
    obj.iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(key))
        .and_then(|(_, x)| x.as_str())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
}

/// Reduce a provider timing string to plain "HH:MM". The primary provider
/// may append a parenthesized timezone marker ("05:12 (EET)"); the fallback
/// may use 12-hour times ("5:12 am") which pass through untouched.
pub fn normalize_time(raw: &str) -> String {
    let trimmed = raw.trim();
    match trimmed.split_once('(') {
        Some((head, _)) => head.trim().to_string(),
        None => trimmed.to_string(),
    }
}

/// Parse an "HH:MM" (or "H:MM") string.
pub fn parse_hhmm(s: &str) -> Option<NaiveTime> {
    let (h, m) = s.split_once(':')?;
    let hours: u32 = h.trim().parse().ok()?;
    let minutes: u32 = m.trim().parse().ok()?;
    NaiveTime::from_hms_opt(hours, minutes, 0)
}

/// Taraweeh conventionally starts an hour and a half after Isha. Falls back
/// to 20:30 when no Isha time is available.
pub fn taraweeh_time(isha: Option<&str>) -> String {
    let start = isha
        .and_then(parse_hhmm)
        .map(|t| t + Duration::minutes(90))
        .unwrap_or_else(|| NaiveTime::from_hms_opt(20, 30, 0).expect("constant time"));
    start.format("%H:%M").to_string()
}
