use std::{
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use tokio::sync::mpsc;

use super::{AppMode, AppState, NO_CITY_MESSAGE, initial_city};
use crate::{
    app::{events::AppEvent, settings::Preferences},
    backdrop::{BackdropHandle, BackdropOptions, Surface, Viewport, raster::PixelSurface},
    cli::Cli,
    domain::weather::{ThemeMode, Units},
    test_support::{sample_snapshot, test_cli},
    ui::backdrop::viewport_for_area,
};

fn offline_cli() -> Cli {
    let mut cli = test_cli();
    cli.weather_url = Some("http://127.0.0.1:9/api/current".to_string());
    cli
}

fn state() -> AppState {
    AppState::with_preferences(&offline_cli(), Preferences::default(), None)
}

fn live_state() -> AppState {
    let mut state = state();
    state.backdrop = BackdropHandle::attach(
        Some(PixelSurface::new(Viewport::new(320, 160))),
        None,
        &BackdropOptions {
            seed: Some(4),
            ..BackdropOptions::default()
        },
    );
    state
}

fn running_backdrop(on_frame: impl Fn() + Send + 'static) -> BackdropHandle<PixelSurface> {
    BackdropHandle::start(
        Some(PixelSurface::new(Viewport::new(320, 160))),
        Some("Rain"),
        &BackdropOptions {
            seed: Some(4),
            ..BackdropOptions::default()
        },
        on_frame,
    )
}

fn failed(city: &str, message: &str) -> AppEvent {
    AppEvent::FetchFailed {
        city: city.to_string(),
        message: message.to_string(),
    }
}

fn key(code: KeyCode) -> AppEvent {
    AppEvent::Input(Event::Key(KeyEvent::new(code, KeyModifiers::NONE)))
}

#[tokio::test]
async fn blank_city_reports_an_error_without_fetching() {
    let (tx, mut rx) = mpsc::channel(8);
    let mut state = state();
    state.city = "   ".to_string();

    state
        .handle_event(AppEvent::TickRefresh, &tx, &offline_cli())
        .await
        .expect("tick");
    state.mode = AppMode::Ready;
    state
        .handle_event(key(KeyCode::Char('r')), &tx, &offline_cli())
        .await
        .expect("refresh key");

    assert_eq!(state.mode, AppMode::Error);
    assert_eq!(state.last_error.as_deref(), Some(NO_CITY_MESSAGE));
    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn successful_fetch_drives_the_backdrop_and_history() {
    let (tx, _rx) = mpsc::channel(8);
    let mut state = live_state();
    state.city = "london".to_string();

    state
        .handle_event(
            AppEvent::FetchSucceeded(Box::new(sample_snapshot("Thunderstorm"))),
            &tx,
            &offline_cli(),
        )
        .await
        .expect("apply snapshot");

    assert_eq!(state.mode, AppMode::Ready);
    assert!(state.last_error.is_none());
    assert_eq!(state.preferences.history, ["London"]);
    let condition = state
        .backdrop
        .with_backdrop(|b| b.condition().to_string())
        .expect("live backdrop");
    assert_eq!(condition, "Thunderstorm");
}

#[tokio::test]
async fn weather_for_a_previous_city_is_dropped() {
    let (tx, _rx) = mpsc::channel(8);
    let mut state = state();
    state.city = "tokyo".to_string();
    state.fetch_in_flight = true;

    state
        .handle_event(
            AppEvent::FetchSucceeded(Box::new(sample_snapshot("Rain"))),
            &tx,
            &offline_cli(),
        )
        .await
        .expect("apply snapshot");

    assert!(state.weather.is_none());
    assert!(state.fetch_in_flight);
    assert!(state.preferences.history.is_empty());
}

#[tokio::test]
async fn fetch_failure_surfaces_the_message() {
    let (tx, _rx) = mpsc::channel(8);
    let mut state = state();
    state.fetch_in_flight = true;
    state
        .handle_event(failed("london", "boom"), &tx, &offline_cli())
        .await
        .expect("failure");
    assert_eq!(state.mode, AppMode::Error);
    assert_eq!(state.last_error.as_deref(), Some("boom"));
    assert!(!state.fetch_in_flight);
}

#[tokio::test]
async fn failure_for_a_city_already_left_is_ignored() {
    let (tx, _rx) = mpsc::channel(8);
    let mut state = state();
    state.city = "paris".to_string();
    state.fetch_in_flight = true;
    state.mode = AppMode::Loading;
    state
        .handle_event(failed("London", "timed out"), &tx, &offline_cli())
        .await
        .expect("stale failure");

    assert_eq!(state.mode, AppMode::Loading);
    assert_eq!(state.last_error, None);
    assert!(state.fetch_in_flight);
}

#[tokio::test(start_paused = true)]
async fn quit_key_requests_shutdown_and_quit_stops_backdrop() {
    let (tx, mut rx) = mpsc::channel(8);
    let mut state = state();
    state.backdrop = running_backdrop(|| {});
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert!(state.backdrop.is_running());

    state
        .handle_event(key(KeyCode::Char('q')), &tx, &offline_cli())
        .await
        .expect("quit key");
    let event = rx.try_recv().expect("quit queued");
    assert!(matches!(event, AppEvent::Quit));

    state
        .handle_event(event, &tx, &offline_cli())
        .await
        .expect("quit");
    assert_eq!(state.mode, AppMode::Quit);
    assert!(!state.backdrop.is_running());

    tokio::task::yield_now().await;
    let frozen = state.backdrop.with_backdrop(|backdrop| backdrop.frames_drawn());
    tokio::time::sleep(Duration::from_millis(300)).await;
    assert_eq!(
        state.backdrop.with_backdrop(|backdrop| backdrop.frames_drawn()),
        frozen
    );
}

#[tokio::test(start_paused = true)]
async fn replacing_the_backdrop_cancels_the_old_frame_loop() {
    let mut state = state();
    let frames = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&frames);
    state.backdrop = running_backdrop(move || {
        counter.fetch_add(1, Ordering::SeqCst);
    });
    tokio::time::sleep(Duration::from_millis(200)).await;
    assert!(frames.load(Ordering::SeqCst) > 0);

    state.backdrop = BackdropHandle::inert();
    tokio::task::yield_now().await;
    let seen = frames.load(Ordering::SeqCst);
    tokio::time::sleep(Duration::from_millis(300)).await;
    assert_eq!(frames.load(Ordering::SeqCst), seen);
}

#[tokio::test]
async fn unit_and_theme_keys_toggle_preferences() {
    let (tx, _rx) = mpsc::channel(8);
    let mut state = live_state();
    state
        .handle_event(key(KeyCode::Char('u')), &tx, &offline_cli())
        .await
        .expect("units");
    state
        .handle_event(key(KeyCode::Char('t')), &tx, &offline_cli())
        .await
        .expect("theme");
    assert_eq!(state.preferences.units, Units::Imperial);
    assert_eq!(state.preferences.theme, ThemeMode::Dark);
}

#[tokio::test]
async fn history_digit_selects_and_fetches_that_city() {
    let (tx, mut rx) = mpsc::channel(8);
    let mut state = state();
    state.preferences.history = vec!["Tokyo".to_string(), "Paris".to_string()];

    state
        .handle_event(key(KeyCode::Char('2')), &tx, &offline_cli())
        .await
        .expect("digit");
    assert_eq!(state.city, "Paris");
    assert!(matches!(rx.recv().await, Some(AppEvent::FetchStarted)));

    state
        .handle_event(key(KeyCode::Char('5')), &tx, &offline_cli())
        .await
        .expect("missing slot");
    assert_eq!(state.city, "Paris");
}

#[test]
fn tab_cycles_known_cities_in_both_directions() {
    let mut state = state();
    state.city = "London".to_string();
    assert_eq!(state.cycled_city(true), "paris");
    state.city = "new york".to_string();
    assert_eq!(state.cycled_city(false), "dubai");
    state.city = "Atlantis".to_string();
    assert_eq!(state.cycled_city(true), "new york");
}

#[tokio::test]
async fn resize_reaches_the_backdrop() {
    let (tx, _rx) = mpsc::channel(8);
    let mut state = live_state();
    state
        .handle_event(AppEvent::Input(Event::Resize(40, 10)), &tx, &offline_cli())
        .await
        .expect("resize");
    let viewport = state
        .backdrop
        .with_backdrop(|b| b.surface().viewport())
        .expect("live backdrop");
    assert_eq!(viewport, viewport_for_area(40, 10));
}

#[test]
fn initial_city_prefers_cli_then_history() {
    let mut prefs = Preferences::default();
    prefs.remember("Mumbai");

    let cli = test_cli();
    assert_eq!(initial_city(&cli, &prefs), "London");

    let mut bare = test_cli();
    bare.city = None;
    assert_eq!(initial_city(&bare, &prefs), "Mumbai");
    assert_eq!(initial_city(&bare, &Preferences::default()), "new york");
}
