pub mod app;
pub mod backdrop;
pub mod cli;
pub mod data;
pub mod domain;
pub mod logging;
pub mod ui;

#[cfg(test)]
mod test_support;

use std::io::{self, Stdout, Write};

use anyhow::{Context, Result};
use app::{
    events::{AppEvent, spawn_input_task},
    settings::load_preferences,
    state::{AppMode, AppState},
};
use cli::Cli;
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use data::weather::WeatherClient;
use domain::weather::WeatherSnapshot;
use futures::StreamExt;
use rand::{SeedableRng, rngs::StdRng};
use ratatui::{Terminal, backend::CrosstermBackend};
use tokio::sync::mpsc;

pub async fn run(cli: Cli) -> Result<()> {
    logging::init(logging::LogSink::choose(
        cli.log_file.as_deref(),
        cli.one_shot,
    ))?;

    if cli.one_shot {
        return run_one_shot(&cli).await;
    }

    let mut terminal = setup_terminal()?;
    let result = run_inner(&mut terminal, cli).await;
    restore_terminal(&mut terminal)?;
    result
}

async fn run_inner(terminal: &mut Terminal<CrosstermBackend<Stdout>>, cli: Cli) -> Result<()> {
    let (tx, mut rx) = mpsc::channel::<AppEvent>(256);
    let input_stream = spawn_input_task();
    tokio::pin!(input_stream);
    let mut app = AppState::new(&cli);

    let size = terminal.size().context("reading terminal size failed")?;
    app.start_backdrop(size.width, size.height, &cli, &tx);
    log::info!(
        "dashboard started for {} ({}x{})",
        app.city,
        size.width,
        size.height
    );

    tx.send(AppEvent::Bootstrap).await?;

    while app.running {
        tokio::select! {
            maybe_input = input_stream.next() => {
                if let Some(input) = maybe_input {
                    app.handle_event(AppEvent::Input(input), &tx, &cli).await?;
                }
            }
            maybe_event = rx.recv() => {
                if let Some(event) = maybe_event {
                    app.handle_event(event, &tx, &cli).await?;
                }
            }
        }

        terminal.draw(|frame| ui::render(frame, &app))?;

        if app.mode == AppMode::Quit {
            app.running = false;
        }
    }

    app.backdrop.stop();
    Ok(())
}

async fn run_one_shot(cli: &Cli) -> Result<()> {
    cli.validate()?;
    let (preferences, _) = load_preferences(cli, true);
    let client = cli
        .weather_url
        .as_deref()
        .map_or_else(WeatherClient::new, WeatherClient::with_base_url);
    let mut rng = cli.seed.map_or_else(
        || StdRng::from_rng(&mut rand::rng()),
        StdRng::seed_from_u64,
    );

    let city = cli.default_city();
    let snapshot = WeatherSnapshot {
        report: client.current(&city).await,
        forecast: client.forecast(&mut rng),
    };

    let mut stdout = io::stdout().lock();
    for line in ui::summary_lines(&snapshot, preferences.units) {
        writeln!(stdout, "{line}").context("writing summary failed")?;
    }
    Ok(())
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    install_panic_hook();
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    Ok(Terminal::new(backend)?)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Restores the terminal before reporting a panic. Panics inside a backdrop
/// frame are caught by the frame loop and leave the terminal alone.
fn install_panic_hook() {
    let existing = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        if backdrop::frame_loop::in_guarded_frame() {
            return;
        }
        let _ = disable_raw_mode();
        let mut stdout = io::stdout();
        let _ = execute!(stdout, LeaveAlternateScreen);
        existing(panic);
    }));
}
