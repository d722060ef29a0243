use std::time::Duration;

use crossterm::event::{Event, EventStream};
use futures::StreamExt;
use rand::Rng;
use tokio::{
    sync::mpsc::Sender,
    time::{interval, sleep},
};

use crate::domain::weather::WeatherSnapshot;

const CLOCK_PERIOD: Duration = Duration::from_secs(1);

#[derive(Debug)]
pub enum AppEvent {
    Bootstrap,
    TickFrame,
    TickRefresh,
    Input(Event),
    FetchStarted,
    FetchSucceeded(Box<WeatherSnapshot>),
    FetchFailed { city: String, message: String },
    Quit,
}

pub fn spawn_input_task() -> impl futures::Stream<Item = Event> {
    EventStream::new().filter_map(|event| async move { event.ok() })
}

/// Redraw ticks for the clock when no backdrop loop is driving frames.
pub fn start_clock_task(tx: Sender<AppEvent>) {
    tokio::spawn(async move {
        let mut ticker = interval(CLOCK_PERIOD);
        loop {
            ticker.tick().await;
            if tx.send(AppEvent::TickFrame).await.is_err() {
                break;
            }
        }
    });
}

pub fn start_refresh_task(tx: Sender<AppEvent>, refresh_secs: u64) {
    tokio::spawn(async move {
        let base = refresh_secs.max(10);
        loop {
            let wait = jittered(base, &mut rand::rng());
            sleep(wait).await;
            if tx.send(AppEvent::TickRefresh).await.is_err() {
                break;
            }
        }
    });
}

/// `base_secs` with up to ten percent jitter either way, never below one second.
#[allow(clippy::cast_precision_loss)]
pub fn jittered<R: Rng + ?Sized>(base_secs: u64, rng: &mut R) -> Duration {
    let jitter = rng.random_range(-0.1f32..0.1f32);
    Duration::from_secs_f32(((base_secs as f32) * (1.0 + jitter)).max(1.0))
}
