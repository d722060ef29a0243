use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::{
    cli::{Cli, ThemeArg},
    domain::weather::{ThemeMode, Units},
};


pub const HISTORY_LIMIT: usize = 5;
const CONFIG_DIR_ENV: &str = "WEATHER_BACKDROP_CONFIG_DIR";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Preferences {
    pub units: Units,
    pub theme: ThemeMode,
    pub history: Vec<String>,
}

impl Preferences {
    pub fn from_cli_defaults(cli: &Cli) -> Self {
        Self {
            units: cli.units.map(Units::from).unwrap_or_default(),
            theme: match cli.theme {
                ThemeArg::Dark => ThemeMode::Dark,
                ThemeArg::Auto | ThemeArg::Light => ThemeMode::Light,
            },
            history: Vec::new(),
        }
    }

    /// Puts `city` at the front, dropping any earlier entry that differs only in case.
    pub fn remember(&mut self, city: &str) {
        let city = city.trim();
        if city.is_empty() {
            return;
        }
        let lowered = city.to_lowercase();
        self.history.retain(|entry| entry.to_lowercase() != lowered);
        self.history.insert(0, city.to_string());
        self.history.truncate(HISTORY_LIMIT);
    }

    fn apply_cli_overrides(&mut self, cli: &Cli) {
        if let Some(units) = cli.units {
            self.units = units.into();
        }
        match cli.theme {
            ThemeArg::Auto => {}
            ThemeArg::Light => self.theme = ThemeMode::Light,
            ThemeArg::Dark => self.theme = ThemeMode::Dark,
        }
    }
}

pub fn load_preferences(cli: &Cli, enable_disk: bool) -> (Preferences, Option<PathBuf>) {
    if !enable_disk {
        return (Preferences::from_cli_defaults(cli), None);
    }
    let Some(path) = settings_path() else {
        return (Preferences::from_cli_defaults(cli), None);
    };
    (load_preferences_from(&path, cli), Some(path))
}

/// Saved preferences under the CLI's explicit flags. Missing or unreadable files
/// give the CLI defaults.
pub fn load_preferences_from(path: &Path, cli: &Cli) -> Preferences {
    let saved = fs::read_to_string(path)
        .ok()
        .and_then(|content| match serde_json::from_str::<Preferences>(&content) {
            Ok(saved) => Some(saved),
            Err(err) => {
                log::warn!("ignoring unreadable settings at {}: {err}", path.display());
                None
            }
        });

    let Some(mut preferences) = saved else {
        return Preferences::from_cli_defaults(cli);
    };
    preferences.history.truncate(HISTORY_LIMIT);
    preferences.apply_cli_overrides(cli);
    preferences
}

pub fn save_preferences(path: &Path, preferences: &Preferences) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("creating settings directory failed")?;
    }
    let payload =
        serde_json::to_string_pretty(preferences).context("serializing settings payload failed")?;
    fs::write(path, payload).context("writing settings file failed")
}

fn settings_path() -> Option<PathBuf> {
    if let Some(base) = std::env::var_os(CONFIG_DIR_ENV) {
        return Some(PathBuf::from(base).join("settings.json"));
    }

    let home = std::env::var_os("HOME")?;
    Some(
        PathBuf::from(home)
            .join(".config")
            .join("weather-backdrop")
            .join("settings.json"),
    )
}
