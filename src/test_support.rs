use chrono::{DateTime, Local, TimeZone, Utc};

use crate::{
    backdrop::{LinearGradient, Point, Rgba, Surface, Viewport},
    cli::{Cli, ThemeArg},
    domain::weather::{ConditionSummary, ForecastDay, WeatherReport, WeatherSnapshot},
};

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum DrawOp {
    Clear,
    Gradient(LinearGradient),
    Blur(f32),
    Line {
        from: Point,
        to: Point,
        width: f32,
        color: Rgba,
    },
    Circle {
        center: Point,
        radius: f32,
        color: Rgba,
        glow: f32,
    },
    Overlay(Rgba),
}

/// Surface that records every call instead of painting.
#[derive(Debug, Clone)]
pub(crate) struct RecordingSurface {
    viewport: Viewport,
    pub ops: Vec<DrawOp>,
}

impl RecordingSurface {
    pub(crate) fn new(width: u32, height: u32) -> Self {
        Self {
            viewport: Viewport::new(width, height),
            ops: Vec::new(),
        }
    }

    pub(crate) fn overlays(&self) -> Vec<Rgba> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Overlay(color) => Some(*color),
                _ => None,
            })
            .collect()
    }

    /// Blur active at the time of each circle draw.
    pub(crate) fn circle_blurs(&self) -> Vec<f32> {
        let mut blur = 0.0;
        let mut out = Vec::new();
        for op in &self.ops {
            match op {
                DrawOp::Blur(radius) => blur = *radius,
                DrawOp::Circle { .. } => out.push(blur),
                _ => {}
            }
        }
        out
    }

    pub(crate) fn count(&self, pred: impl Fn(&DrawOp) -> bool) -> usize {
        self.ops.iter().filter(|op| pred(op)).count()
    }
}

impl Surface for RecordingSurface {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    fn clear(&mut self) {
        self.ops.clear();
        self.ops.push(DrawOp::Clear);
    }

    fn fill_gradient(&mut self, gradient: &LinearGradient) {
        self.ops.push(DrawOp::Gradient(*gradient));
    }

    fn set_blur(&mut self, radius: f32) {
        self.ops.push(DrawOp::Blur(radius));
    }

    fn stroke_line(&mut self, from: Point, to: Point, width: f32, color: Rgba) {
        self.ops.push(DrawOp::Line {
            from,
            to,
            width,
            color,
        });
    }

    fn fill_circle(&mut self, center: Point, radius: f32, color: Rgba, glow: f32) {
        self.ops.push(DrawOp::Circle {
            center,
            radius,
            color,
            glow,
        });
    }

    fn fill_overlay(&mut self, color: Rgba) {
        self.ops.push(DrawOp::Overlay(color));
    }
}

pub(crate) fn test_cli() -> Cli {
    Cli {
        city: Some("London".to_string()),
        units: None,
        theme: ThemeArg::Auto,
        fps: 30,
        no_animation: true,
        no_flash: true,
        lat: None,
        lon: None,
        weather_url: None,
        refresh_interval: 600,
        seed: Some(1),
        log_file: None,
        one_shot: false,
    }
}

fn fixed_utc(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(secs, 0).single().expect("valid fixture timestamp")
}

pub(crate) fn sample_report(condition: &str) -> WeatherReport {
    WeatherReport {
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
        sunrise: fixed_utc(1_678_867_200),
        sunset: fixed_utc(1_678_910_400),
        observed_at: Local
            .with_ymd_and_hms(2026, 3, 14, 9, 5, 0)
            .single()
            .expect("valid fixture time"),
        tips: vec![
            "Stay dry with an umbrella!".to_string(),
            "Perfect day to stay in and read.".to_string(),
        ],
        is_mock: false,
    }
}

pub(crate) fn sample_snapshot(condition: &str) -> WeatherSnapshot {
    WeatherSnapshot {
        report: sample_report(condition),
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
