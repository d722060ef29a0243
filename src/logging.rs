//! Logging setup.
//!
//! The interactive dashboard owns the terminal, so logs only go somewhere when
//! a `--log-file` is given. One-shot runs log to stderr. The default filter is
//! `info`; `RUST_LOG` overrides it.

use std::{fs::OpenOptions, path::Path};

use anyhow::{Context, Result};
use env_logger::{Builder, Env, Target};

/// Where log records should go for this run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogSink<'a> {
    File(&'a Path),
    Stderr,
    Off,
}

impl<'a> LogSink<'a> {
    #[must_use]
    pub fn choose(log_file: Option<&'a Path>, one_shot: bool) -> Self {
        match (log_file, one_shot) {
            (Some(path), _) => Self::File(path),
            (None, true) => Self::Stderr,
            (None, false) => Self::Off,
        }
    }
}

pub fn init(sink: LogSink<'_>) -> Result<()> {
    let mut builder = Builder::from_env(Env::default().default_filter_or("info"));
    match sink {
        LogSink::Off => return Ok(()),
        LogSink::Stderr => {
            builder.target(Target::Stderr);
        }
        LogSink::File(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("opening log file {} failed", path.display()))?;
            builder.target(Target::Pipe(Box::new(file)));
        }
    }
    builder.try_init().context("installing logger failed")
}
