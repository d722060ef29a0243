#![allow(clippy::missing_errors_doc)]

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::{
    backdrop::BackdropOptions,
    data::weather::{DEFAULT_CITY, city_from_coords},
    domain::weather::Units,
};

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum UnitsArg {
    Metric,
    Imperial,
}

impl From<UnitsArg> for Units {
    fn from(value: UnitsArg) -> Self {
        match value {
            UnitsArg::Metric => Units::Metric,
            UnitsArg::Imperial => Units::Imperial,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum ThemeArg {
    Auto,
    Light,
    Dark,
}

#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Parser, Clone)]
#[command(
    name = "weather-backdrop",
    version,
    about = "Terminal weather dashboard with an animated weather backdrop"
)]
pub struct Cli {
    /// City name (default: new york)
    pub city: Option<String>,

    /// Display units (default: metric, or the saved choice)
    #[arg(long, value_enum)]
    pub units: Option<UnitsArg>,

    /// Panel theme
    #[arg(long, value_enum, default_value_t = ThemeArg::Auto)]
    pub theme: ThemeArg,

    /// Backdrop FPS (15..60)
    #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(u8).range(15..=60))]
    pub fps: u8,

    /// Disable the animated backdrop
    #[arg(long)]
    pub no_animation: bool,

    /// Disable lightning flashes
    #[arg(long)]
    pub no_flash: bool,

    /// Latitude, resolved to the nearest known city (requires --lon)
    #[arg(long, allow_hyphen_values = true)]
    pub lat: Option<f64>,

    /// Longitude, resolved to the nearest known city (requires --lat)
    #[arg(long, allow_hyphen_values = true)]
    pub lon: Option<f64>,

    /// Weather service endpoint override
    #[arg(long)]
    pub weather_url: Option<String>,

    /// Refresh interval in seconds
    #[arg(long, default_value_t = 600)]
    pub refresh_interval: u64,

    /// Seed for a reproducible backdrop
    #[arg(long)]
    pub seed: Option<u64>,

    /// Write logs to this file
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Print a weather summary to stdout and exit (non-interactive)
    #[arg(long)]
    pub one_shot: bool,
}

impl Cli {
    /// City to show first: explicit coordinates win, then the positional city.
    #[must_use]
    pub fn default_city(&self) -> String {
        if let (Some(lat), Some(lon)) = (self.lat, self.lon) {
            return city_from_coords(lat, lon).to_string();
        }
        self.city
            .clone()
            .unwrap_or_else(|| DEFAULT_CITY.to_string())
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        match (self.lat, self.lon) {
            (Some(_), None) | (None, Some(_)) => {
                anyhow::bail!("--lat and --lon must be provided together")
            }
            (Some(lat), Some(lon))
                if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) =>
            {
                anyhow::bail!("coordinates out of range: {lat}, {lon}")
            }
            _ => Ok(()),
        }
    }

    #[must_use]
    pub fn backdrop_options(&self) -> BackdropOptions {
        BackdropOptions {
            fps: self.fps,
            lightning: !self.no_flash,
            seed: self.seed,
            ..BackdropOptions::default()
        }
    }
}
