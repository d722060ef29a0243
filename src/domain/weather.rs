mod conditions;
mod conversions;


use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

pub use conditions::{ConditionInfo, condition_info, icon_url, weather_tips};
pub use conversions::{
    convert_speed, convert_temp, convert_visibility, format_clock, format_long_date,
    format_optional, round_temp,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Units {
    #[default]
    Metric,
    Imperial,
}

impl Units {
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Metric => Self::Imperial,
            Self::Imperial => Self::Metric,
        }
    }

    #[must_use]
    pub fn temp_suffix(self) -> &'static str {
        match self {
            Self::Metric => "°C",
            Self::Imperial => "°F",
        }
    }

    #[must_use]
    pub fn speed_suffix(self) -> &'static str {
        match self {
            Self::Metric => "m/s",
            Self::Imperial => "mph",
        }
    }

    #[must_use]
    pub fn distance_suffix(self) -> &'static str {
        match self {
            Self::Metric => "km",
            Self::Imperial => "mi",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConditionSummary {
    pub main: String,
    pub description: String,
    pub icon: String,
}

/// Current conditions for one city. Measurements are metric; convert at display time.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherReport {
    pub name: String,
    pub temp_c: Option<f32>,
    pub feels_like_c: Option<f32>,
    pub temp_min_c: Option<f32>,
    pub temp_max_c: Option<f32>,
    pub humidity: Option<f32>,
    pub pressure_hpa: Option<f32>,
    pub wind_speed_ms: Option<f32>,
    pub wind_gust_ms: Option<f32>,
    pub visibility_m: Option<f32>,
    pub condition: ConditionSummary,
    pub sunrise: DateTime<Utc>,
    pub sunset: DateTime<Utc>,
    pub observed_at: DateTime<Local>,
    pub tips: Vec<String>,
    pub is_mock: bool,
}

impl WeatherReport {
    #[must_use]
    pub fn condition_main(&self) -> &str {
        &self.condition.main
    }

    #[must_use]
    pub fn temp(&self, units: Units) -> Option<i32> {
        self.temp_c.map(|t| round_temp(convert_temp(t, units)))
    }

    #[must_use]
    pub fn feels_like(&self, units: Units) -> Option<i32> {
        self.feels_like_c.map(|t| round_temp(convert_temp(t, units)))
    }

    #[must_use]
    pub fn range(&self, units: Units) -> (Option<i32>, Option<i32>) {
        let convert = |t: f32| round_temp(convert_temp(t, units));
        (self.temp_min_c.map(convert), self.temp_max_c.map(convert))
    }

    #[must_use]
    pub fn wind(&self, units: Units) -> Option<f32> {
        self.wind_speed_ms.map(|s| convert_speed(s, units))
    }

    #[must_use]
    pub fn gust(&self, units: Units) -> Option<f32> {
        self.wind_gust_ms.map(|s| convert_speed(s, units))
    }

    #[must_use]
    pub fn visibility(&self, units: Units) -> Option<f32> {
        self.visibility_m.map(|v| convert_visibility(v, units))
    }

    #[must_use]
    pub fn first_tip(&self) -> Option<&str> {
        self.tips.first().map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForecastDay {
    pub weekday: String,
    pub temp_c: f32,
    pub condition: String,
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeatherSnapshot {
    pub report: WeatherReport,
    pub forecast: Vec<ForecastDay>,
}

/// Uppercases the first character and keeps the rest as typed.
#[must_use]
pub fn display_city_name(city: &str) -> String {
    let mut chars = city.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
