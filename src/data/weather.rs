use std::{
    num::NonZeroUsize,
    sync::{Arc, Mutex, PoisonError},
    time::{Duration, Instant},
};

use chrono::{DateTime, Days, Local, NaiveDate, Utc};
use lru::LruCache;
use rand::Rng;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use thiserror::Error;

use crate::domain::weather::{
    ConditionSummary, ForecastDay, WeatherReport, display_city_name, icon_url, weather_tips,
};

pub const WEATHER_URL: &str = "https://weather-proxy.freecodecamp.rocks/api/current";
pub const DEFAULT_CITY: &str = "new york";
pub const CACHE_TTL: Duration = Duration::from_secs(15 * 60);

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const CACHE_CAPACITY: NonZeroUsize = match NonZeroUsize::new(32) {
    Some(capacity) => capacity,
    None => NonZeroUsize::MIN,
};
const DEFAULT_SUNRISE: i64 = 1_678_867_200;
const DEFAULT_SUNSET: i64 = 1_678_910_400;
const REVERSE_LOOKUP_DEGREES: f64 = 2.0;

/// Known cities, lowercase, with latitude and longitude.
pub const CITIES: [(&str, f64, f64); 10] = [
    ("new york", 40.7128, -74.0060),
    ("los angeles", 34.0522, -118.2437),
    ("chicago", 41.8781, -87.6298),
    ("london", 51.5074, -0.1278),
    ("paris", 48.8566, 2.3522),
    ("tokyo", 35.6762, 139.6503),
    ("sydney", -33.8688, 151.2093),
    ("mumbai", 19.0760, 72.8777),
    ("beijing", 39.9042, 116.4074),
    ("dubai", 25.2048, 55.2708),
];

#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("city \"{0}\" not found in our database")]
    UnknownCity(String),

    #[error("weather request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("weather service returned HTTP {0}")]
    Status(StatusCode),

    #[error("failed to decode weather payload: {0}")]
    Decode(#[source] reqwest::Error),
}

#[derive(Debug, Clone)]
struct CachedReport {
    report: WeatherReport,
    stored_at: Instant,
}

#[derive(Clone)]
pub struct WeatherClient {
    client: Client,
    base_url: String,
    ttl: Duration,
    cache: Arc<Mutex<LruCache<String, CachedReport>>>,
}

impl std::fmt::Debug for WeatherClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeatherClient")
            .field("base_url", &self.base_url)
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

impl Default for WeatherClient {
    fn default() -> Self {
        Self::new()
    }
}

impl WeatherClient {
    pub fn new() -> Self {
        Self::with_base_url(WEATHER_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|err| {
                log::warn!("falling back to default http client: {err}");
                Client::new()
            });
        Self {
            client,
            base_url: base_url.into(),
            ttl: CACHE_TTL,
            cache: Arc::new(Mutex::new(LruCache::new(CACHE_CAPACITY))),
        }
    }

    #[must_use]
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Current conditions for `city`. Never fails: anything that goes wrong
    /// upstream yields the mock report instead. Both kinds are cached.
    pub async fn current(&self, city: &str) -> WeatherReport {
        let city = city.trim();
        let key = city.to_lowercase();
        if let Some(report) = self.cached(&key) {
            log::debug!("returning cached weather for {key}");
            return report;
        }

        let report = match self.fetch_live(city).await {
            Ok(report) => report,
            Err(err) => {
                log::warn!("weather for {city} unavailable, using mock data: {err}");
                mock_report(city)
            }
        };
        self.store(key, report.clone());
        report
    }

    /// One uncached request against the weather service.
    pub async fn fetch_live(&self, city: &str) -> Result<WeatherReport, WeatherError> {
        let (lat, lon) =
            coords_for(city).ok_or_else(|| WeatherError::UnknownCity(city.to_string()))?;

        let response = self
            .client
            .get(&self.base_url)
            .query(&[("lat", lat.to_string()), ("lon", lon.to_string())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(WeatherError::Status(status));
        }

        let payload: CurrentPayload = response.json().await.map_err(WeatherError::Decode)?;
        Ok(payload.into_report(city))
    }

    /// Five mock forecast days starting tomorrow.
    pub fn forecast<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<ForecastDay> {
        mock_forecast(Local::now().date_naive(), rng)
    }

    fn cached(&self, key: &str) -> Option<WeatherReport> {
        let mut cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
        let fresh = cache
            .get(key)
            .filter(|entry| entry.stored_at.elapsed() < self.ttl)
            .map(|entry| entry.report.clone());
        if fresh.is_none() {
            cache.pop(key);
        }
        fresh
    }

    fn store(&self, key: String, report: WeatherReport) {
        let mut cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
        cache.put(
            key,
            CachedReport {
                report,
                stored_at: Instant::now(),
            },
        );
    }
}

#[must_use]
pub fn coords_for(city: &str) -> Option<(f64, f64)> {
    let key = city.trim().to_lowercase();
    CITIES
        .iter()
        .find(|(name, _, _)| *name == key)
        .map(|(_, lat, lon)| (*lat, *lon))
}

/// Nearest known city within two degrees on both axes, else the default city.
#[must_use]
pub fn city_from_coords(lat: f64, lon: f64) -> &'static str {
    CITIES
        .iter()
        .find(|(_, city_lat, city_lon)| {
            (city_lat - lat).abs() < REVERSE_LOOKUP_DEGREES
                && (city_lon - lon).abs() < REVERSE_LOOKUP_DEGREES
        })
        .map_or(DEFAULT_CITY, |(name, _, _)| name)
}

#[must_use]
pub fn mock_report(city: &str) -> WeatherReport {
    WeatherReport {
        name: display_city_name(city),
        temp_c: Some(22.0),
        feels_like_c: Some(24.0),
        temp_min_c: Some(18.0),
        temp_max_c: Some(25.0),
        humidity: Some(65.0),
        pressure_hpa: Some(1013.0),
        wind_speed_ms: Some(3.5),
        wind_gust_ms: Some(4.2),
        visibility_m: Some(10_000.0),
        condition: ConditionSummary {
            main: "Clear".to_string(),
            description: "clear sky".to_string(),
            icon: "01d".to_string(),
        },
        sunrise: utc_or_now(DEFAULT_SUNRISE),
        sunset: utc_or_now(DEFAULT_SUNSET),
        observed_at: Local::now(),
        tips: weather_tips("Clear", 22.0),
        is_mock: true,
    }
}

pub fn mock_forecast<R: Rng + ?Sized>(today: NaiveDate, rng: &mut R) -> Vec<ForecastDay> {
    const CONDITIONS: [&str; 3] = ["Clear", "Clouds", "Rain"];
    (1..=5_u64)
        .filter_map(|offset| today.checked_add_days(Days::new(offset)))
        .map(|date| ForecastDay {
            weekday: date.format("%a").to_string(),
            temp_c: f32::from(20_i8 + rng.random_range(0_i8..10) - 3),
            condition: CONDITIONS[rng.random_range(0..CONDITIONS.len())].to_string(),
            icon: icon_url("01d"),
        })
        .collect()
}

fn utc_or_now(secs: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(secs, 0).unwrap_or_else(Utc::now)
}

#[derive(Debug, Deserialize)]
struct CurrentPayload {
    #[serde(default)]
    main: MainBlock,
    #[serde(default)]
    weather: Vec<ConditionBlock>,
    #[serde(default)]
    wind: WindBlock,
    visibility: Option<f32>,
    #[serde(default)]
    sys: SysBlock,
}

#[derive(Debug, Default, Deserialize)]
struct MainBlock {
    temp: Option<f32>,
    feels_like: Option<f32>,
    humidity: Option<f32>,
    pressure: Option<f32>,
}

#[derive(Debug, Deserialize)]
struct ConditionBlock {
    main: Option<String>,
    description: Option<String>,
    icon: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct WindBlock {
    speed: Option<f32>,
}

#[derive(Debug, Default, Deserialize)]
struct SysBlock {
    sunrise: Option<i64>,
    sunset: Option<i64>,
}

impl CurrentPayload {
    fn into_report(self, city: &str) -> WeatherReport {
        let temp = self.main.temp.unwrap_or(20.0);
        let wind = self.wind.speed.unwrap_or(3.0);
        let first = self.weather.into_iter().next();
        let (main, description, icon) = match first {
            Some(block) => (block.main, block.description, block.icon),
            None => (None, None, None),
        };
        let main = main.unwrap_or_else(|| "Clear".to_string());

        WeatherReport {
            name: display_city_name(city),
            temp_c: Some(temp),
            feels_like_c: Some(self.main.feels_like.unwrap_or(20.0)),
            temp_min_c: Some(temp - 2.0),
            temp_max_c: Some(temp + 3.0),
            humidity: Some(self.main.humidity.unwrap_or(50.0)),
            pressure_hpa: Some(self.main.pressure.unwrap_or(1013.0)),
            wind_speed_ms: Some(wind),
            wind_gust_ms: Some(wind + 2.0),
            visibility_m: Some(self.visibility.unwrap_or(10_000.0)),
            sunrise: utc_or_now(self.sys.sunrise.unwrap_or(DEFAULT_SUNRISE)),
            sunset: utc_or_now(self.sys.sunset.unwrap_or(DEFAULT_SUNSET)),
            observed_at: Local::now(),
            tips: weather_tips(&main, temp),
            condition: ConditionSummary {
                description: description.unwrap_or_else(|| main.to_lowercase()),
                icon: icon.unwrap_or_else(|| "01d".to_string()),
                main,
            },
            is_mock: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    #[test]
    fn reverse_lookup_matches_within_two_degrees() {
        assert_eq!(city_from_coords(51.0, 0.5), "london");
        assert_eq!(city_from_coords(-33.0, 150.5), "sydney");
        assert_eq!(city_from_coords(0.0, 0.0), DEFAULT_CITY);
    }

    #[test]
    fn coordinates_lookup_ignores_case_and_padding() {
        assert_eq!(coords_for("  Tokyo "), Some((35.6762, 139.6503)));
        assert_eq!(coords_for("Atlantis"), None);
    }

    #[test]
    fn mock_report_is_clear_and_flagged() {
        let report = mock_report("paris");
        assert_eq!(report.name, "Paris");
        assert_eq!(report.condition_main(), "Clear");
        assert_eq!(report.temp_c, Some(22.0));
        assert!(report.is_mock);
        assert_eq!(report.tips.len(), 3);
    }

    #[test]
    fn mock_forecast_covers_the_next_five_days() {
        let today = NaiveDate::from_ymd_opt(2026, 3, 14).expect("valid date");
        let mut rng = StdRng::seed_from_u64(9);
        let days = mock_forecast(today, &mut rng);
        let labels: Vec<_> = days.iter().map(|d| d.weekday.as_str()).collect();
        assert_eq!(labels, ["Sun", "Mon", "Tue", "Wed", "Thu"]);
        for day in &days {
            assert!((17.0..=26.0).contains(&day.temp_c));
            assert!(["Clear", "Clouds", "Rain"].contains(&day.condition.as_str()));
            assert!(day.icon.ends_with("01d@2x.png"));
        }
    }

    #[test]
    fn sparse_payload_is_enriched_with_defaults() {
        let payload: CurrentPayload =
            serde_json::from_str(r#"{"main":{"temp":30.0},"weather":[{"main":"Rain"}]}"#)
                .expect("payload");
        let report = payload.into_report("chicago");
        assert_eq!(report.name, "Chicago");
        assert_eq!(report.temp_min_c, Some(28.0));
        assert_eq!(report.temp_max_c, Some(33.0));
        assert_eq!(report.feels_like_c, Some(20.0));
        assert_eq!(report.humidity, Some(50.0));
        assert_eq!(report.wind_gust_ms, Some(5.0));
        assert_eq!(report.visibility_m, Some(10_000.0));
        assert_eq!(report.condition.description, "rain");
        assert!(!report.is_mock);
    }

    #[test]
    fn empty_payload_reads_as_clear() {
        let payload: CurrentPayload = serde_json::from_str("{}").expect("payload");
        let report = payload.into_report("dubai");
        assert_eq!(report.condition_main(), "Clear");
        assert_eq!(report.temp_c, Some(20.0));
        assert_eq!(report.sunrise.timestamp(), DEFAULT_SUNRISE);
    }
}
