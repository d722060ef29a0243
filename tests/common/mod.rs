#![allow(dead_code)]

use chrono::{DateTime, Local, TimeZone, Utc};
use serde_json::{Value, json};
use weather_backdrop::{
    app::{
        settings::Preferences,
        state::{AppMode, AppState},
    },
    cli::{Cli, ThemeArg},
    domain::weather::{ConditionSummary, ForecastDay, WeatherReport, WeatherSnapshot},
};

pub fn london_cli() -> Cli {
    Cli {
        city: Some("London".to_string()),
        units: None,
        theme: ThemeArg::Auto,
        fps: 30,
        no_animation: true,
        no_flash: true,
        lat: None,
        lon: None,
        weather_url: Some("http://127.0.0.1:9/api/current".to_string()),
        refresh_interval: 600,
        seed: Some(7),
        log_file: None,
        one_shot: false,
    }
}

/// Body shaped like the weather proxy's current-conditions response.
pub fn london_payload() -> Value {
    json!({
        "name": "London",
        "main": {
            "temp": 12.4,
            "feels_like": 10.6,
            "humidity": 81,
            "pressure": 1009
        },
        "weather": [
            { "main": "Rain", "description": "light rain", "icon": "10d" }
        ],
        "wind": { "speed": 4.1 },
        "visibility": 9000,
        "sys": { "sunrise": 1_678_867_200, "sunset": 1_678_910_400 }
    })
}

fn utc(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(secs, 0).single().expect("fixture timestamp")
}

pub fn fixture_snapshot(condition: &str) -> WeatherSnapshot {
    WeatherSnapshot {
        report: WeatherReport {
            name: "London".to_string(),
            temp_c: Some(12.4),
            feels_like_c: Some(10.6),
            temp_min_c: Some(10.4),
            temp_max_c: Some(15.4),
            humidity: Some(81.0),
            pressure_hpa: Some(1009.0),
            wind_speed_ms: Some(4.1),
            wind_gust_ms: Some(6.1),
            visibility_m: Some(9000.0),
            condition: ConditionSummary {
                main: condition.to_string(),
                description: "light rain".to_string(),
                icon: "10d".to_string(),
            },
            sunrise: utc(1_678_867_200),
            sunset: utc(1_678_910_400),
            observed_at: Local
                .with_ymd_and_hms(2026, 3, 14, 9, 5, 0)
                .single()
                .expect("fixture time"),
            tips: vec!["Stay dry with an umbrella!".to_string()],
            is_mock: false,
        },
        forecast: ["Sun", "Mon", "Tue", "Wed", "Thu"]
            .iter()
            .zip([18.0, 21.0, 19.0, 24.0, 17.0])
            .map(|(day, temp)| ForecastDay {
                weekday: (*day).to_string(),
                temp_c: temp,
                condition: "Clouds".to_string(),
                icon: "https://openweathermap.org/img/wn/01d@2x.png".to_string(),
            })
            .collect(),
    }
}

pub fn ready_state(cli: &Cli, condition: &str) -> AppState {
    let mut state = AppState::with_preferences(cli, Preferences::default(), None);
    state.weather = Some(fixture_snapshot(condition));
    state.mode = AppMode::Ready;
    state.last_success = Some(
        Local
            .with_ymd_and_hms(2026, 3, 14, 9, 5, 0)
            .single()
            .expect("fixture time"),
    );
    state
}
