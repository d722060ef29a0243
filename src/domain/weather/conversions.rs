#![allow(clippy::cast_possible_truncation)]

use chrono::{DateTime, TimeZone};

use super::Units;

const MS_TO_MPH: f32 = 2.237;
const METRES_PER_MILE: f32 = 1609.34;

#[must_use]
pub fn convert_temp(celsius: f32, units: Units) -> f32 {
    match units {
        Units::Metric => celsius,
        Units::Imperial => celsius * 9.0 / 5.0 + 32.0,
    }
}

#[must_use]
pub fn convert_speed(ms: f32, units: Units) -> f32 {
    match units {
        Units::Metric => ms,
        Units::Imperial => ms * MS_TO_MPH,
    }
}

/// Metres to kilometres or miles.
#[must_use]
pub fn convert_visibility(metres: f32, units: Units) -> f32 {
    match units {
        Units::Metric => metres / 1000.0,
        Units::Imperial => metres / METRES_PER_MILE,
    }
}

#[must_use]
pub fn round_temp(value: f32) -> i32 {
    value.round() as i32
}

#[must_use]
pub fn format_clock<Tz: TimeZone>(time: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    time.format("%I:%M %p").to_string()
}

#[must_use]
pub fn format_long_date<Tz: TimeZone>(time: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    time.format("%A, %B %-d, %Y").to_string()
}

#[must_use]
pub fn format_optional<T: std::fmt::Display>(value: Option<T>) -> String {
    value.map_or_else(|| "--".to_string(), |v| v.to_string())
}
