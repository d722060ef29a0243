use std::{path::PathBuf, time::Duration};

use anyhow::Result;
use chrono::{DateTime, Local};
use crossterm::event::{Event, KeyCode, KeyEventKind};
use rand::{Rng, SeedableRng, rngs::StdRng};
use tokio::sync::mpsc;

use crate::{
    app::{
        events::{AppEvent, start_clock_task, start_refresh_task},
        settings::{Preferences, load_preferences, save_preferences},
    },
    backdrop::{BackdropHandle, raster::PixelSurface},
    cli::Cli,
    data::weather::{CITIES, WeatherClient},
    domain::weather::WeatherSnapshot,
    ui::{backdrop::viewport_for_area, theme::Palette},
};

#[cfg(test)]
mod tests;

pub const NO_CITY_MESSAGE: &str = "Please select a city first.";
const FETCH_DEADLINE: Duration = Duration::from_secs(15);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    Loading,
    Ready,
    Error,
    Quit,
}

#[derive(Debug)]
pub struct AppState {
    pub mode: AppMode,
    pub running: bool,
    pub loading_message: String,
    pub last_error: Option<String>,
    pub city: String,
    pub weather: Option<WeatherSnapshot>,
    pub preferences: Preferences,
    pub fetch_in_flight: bool,
    pub last_success: Option<DateTime<Local>>,
    pub frame_tick: u64,
    pub backdrop: BackdropHandle<PixelSurface>,
    settings_path: Option<PathBuf>,
    client: WeatherClient,
    rng: StdRng,
}

impl AppState {
    pub fn new(cli: &Cli) -> Self {
        let (preferences, settings_path) = load_preferences(cli, true);
        Self::with_preferences(cli, preferences, settings_path)
    }

    pub fn with_preferences(
        cli: &Cli,
        preferences: Preferences,
        settings_path: Option<PathBuf>,
    ) -> Self {
        let client = cli
            .weather_url
            .as_deref()
            .map_or_else(WeatherClient::new, WeatherClient::with_base_url);
        let rng = cli.seed.map_or_else(
            || StdRng::from_rng(&mut rand::rng()),
            StdRng::seed_from_u64,
        );

        Self {
            mode: AppMode::Loading,
            running: true,
            loading_message: "Initializing...".to_string(),
            last_error: None,
            city: initial_city(cli, &preferences),
            weather: None,
            preferences,
            fetch_in_flight: false,
            last_success: None,
            frame_tick: 0,
            backdrop: BackdropHandle::inert(),
            settings_path,
            client,
            rng,
        }
    }

    /// Starts the animated backdrop over a `cols` x `rows` terminal. Stays inert
    /// with `--no-animation`.
    pub fn start_backdrop(
        &mut self,
        cols: u16,
        rows: u16,
        cli: &Cli,
        tx: &mpsc::Sender<AppEvent>,
    ) {
        if cli.no_animation {
            log::info!("animation disabled, backdrop inert");
            return;
        }

        let mut surface = PixelSurface::new(viewport_for_area(cols, rows));
        surface.set_base(Palette::for_mode(self.preferences.theme).backdrop_base);
        let initial = self
            .weather
            .as_ref()
            .map(|snapshot| snapshot.report.condition.main.clone());
        let frame_tx = tx.clone();
        self.backdrop = BackdropHandle::start(
            Some(surface),
            initial.as_deref(),
            &cli.backdrop_options(),
            move || {
                let _ = frame_tx.try_send(AppEvent::TickFrame);
            },
        );
    }

    pub async fn handle_event(
        &mut self,
        event: AppEvent,
        tx: &mpsc::Sender<AppEvent>,
        cli: &Cli,
    ) -> Result<()> {
        match event {
            AppEvent::Bootstrap => {
                cli.validate()?;
                if !self.backdrop.is_running() {
                    start_clock_task(tx.clone());
                }
                start_refresh_task(tx.clone(), cli.refresh_interval);
                self.start_fetch(tx).await?;
            }
            AppEvent::TickFrame => {
                self.frame_tick = self.frame_tick.saturating_add(1);
            }
            AppEvent::TickRefresh => {
                if matches!(self.mode, AppMode::Ready | AppMode::Error) {
                    self.start_fetch(tx).await?;
                }
            }
            AppEvent::Input(event) => self.handle_input(event, tx).await?,
            AppEvent::FetchStarted => {
                self.fetch_in_flight = true;
                self.loading_message = format!("Fetching weather for {}...", self.city);
                if self.weather.is_none() {
                    self.mode = AppMode::Loading;
                }
            }
            AppEvent::FetchSucceeded(snapshot) => self.apply_snapshot(*snapshot),
            AppEvent::FetchFailed { city, message } => {
                if !self.is_current_city(&city) {
                    log::debug!("ignoring failed fetch for {city}");
                    return Ok(());
                }
                self.fetch_in_flight = false;
                self.last_error = Some(message);
                self.mode = AppMode::Error;
            }
            AppEvent::Quit => {
                self.backdrop.stop();
                self.mode = AppMode::Quit;
            }
        }

        Ok(())
    }

    async fn handle_input(&mut self, event: Event, tx: &mpsc::Sender<AppEvent>) -> Result<()> {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                KeyCode::Esc | KeyCode::Char('q') => {
                    tx.send(AppEvent::Quit).await?;
                }
                KeyCode::Char('r') => self.start_fetch(tx).await?,
                KeyCode::Char('u') => {
                    self.preferences.units = self.preferences.units.toggled();
                    self.persist_preferences();
                }
                KeyCode::Char('t') => {
                    self.preferences.theme = self.preferences.theme.toggled();
                    let base = Palette::for_mode(self.preferences.theme).backdrop_base;
                    self.backdrop
                        .with_backdrop_mut(|backdrop| backdrop.surface_mut().set_base(base));
                    self.persist_preferences();
                }
                KeyCode::Tab => self.select_city(self.cycled_city(true), tx).await?,
                KeyCode::BackTab => self.select_city(self.cycled_city(false), tx).await?,
                KeyCode::Char(digit @ '1'..='5') => {
                    let idx = (digit as usize) - ('1' as usize);
                    if let Some(city) = self.preferences.history.get(idx).cloned() {
                        self.select_city(city, tx).await?;
                    }
                }
                _ => {}
            },
            Event::Resize(cols, rows) => {
                self.backdrop.resize(viewport_for_area(cols, rows));
            }
            _ => {}
        }

        Ok(())
    }

    async fn select_city(&mut self, city: String, tx: &mpsc::Sender<AppEvent>) -> Result<()> {
        self.city = city;
        self.fetch_in_flight = false;
        self.start_fetch(tx).await
    }

    /// Neighbour of the current city in the known-city list, wrapping at both ends.
    pub(crate) fn cycled_city(&self, forward: bool) -> String {
        let current = self.city.trim().to_lowercase();
        let len = CITIES.len();
        let next = CITIES
            .iter()
            .position(|(name, _, _)| *name == current)
            .map_or(0, |idx| {
                if forward {
                    (idx + 1) % len
                } else {
                    (idx + len - 1) % len
                }
            });
        CITIES[next].0.to_string()
    }

    async fn start_fetch(&mut self, tx: &mpsc::Sender<AppEvent>) -> Result<()> {
        let city = self.city.trim().to_string();
        if city.is_empty() {
            self.last_error = Some(NO_CITY_MESSAGE.to_string());
            self.mode = AppMode::Error;
            return Ok(());
        }
        if self.fetch_in_flight {
            return Ok(());
        }

        tx.send(AppEvent::FetchStarted).await?;

        let client = self.client.clone();
        let mut forecast_rng = StdRng::seed_from_u64(self.rng.random());
        let tx2 = tx.clone();
        tokio::spawn(async move {
            let fetch = async {
                let report = client.current(&city).await;
                let forecast = client.forecast(&mut forecast_rng);
                WeatherSnapshot { report, forecast }
            };
            let outcome = tokio::time::timeout(FETCH_DEADLINE, fetch).await;
            let event = match outcome {
                Ok(snapshot) => AppEvent::FetchSucceeded(Box::new(snapshot)),
                Err(_) => {
                    log::warn!("weather fetch for {city} timed out");
                    let message =
                        format!("Failed to fetch weather data for {city}. Please try again.");
                    AppEvent::FetchFailed { city, message }
                }
            };
            let _ = tx2.send(event).await;
        });

        Ok(())
    }

    fn apply_snapshot(&mut self, snapshot: WeatherSnapshot) {
        if !self.is_current_city(&snapshot.report.name) {
            log::debug!("dropping stale weather for {}", snapshot.report.name);
            return;
        }
        self.fetch_in_flight = false;
        self.mode = AppMode::Ready;
        self.last_error = None;
        self.last_success = Some(Local::now());
        self.backdrop.set_condition(snapshot.report.condition_main());
        self.preferences.remember(&snapshot.report.name);
        self.persist_preferences();
        self.weather = Some(snapshot);
    }

    fn is_current_city(&self, city: &str) -> bool {
        city.trim().to_lowercase() == self.city.trim().to_lowercase()
    }

    fn persist_preferences(&self) {
        if let Some(path) = &self.settings_path
            && let Err(err) = save_preferences(path, &self.preferences)
        {
            log::warn!("saving settings failed: {err:#}");
        }
    }
}

/// Explicit CLI city or coordinates first, then the most recent search, then the default.
pub(crate) fn initial_city(cli: &Cli, preferences: &Preferences) -> String {
    if cli.city.is_none()
        && cli.lat.is_none()
        && let Some(recent) = preferences.history.first()
    {
        return recent.clone();
    }
    cli.default_city()
}
