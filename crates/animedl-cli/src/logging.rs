//! Logging setup
//!
//! Console output goes to stderr so it never interleaves with prompts on
//! stdout. Everything at DEBUG and above is also written to
//! `logs/latest.log`.

use std::fs;
use std::io;
use std::path::Path;

use tracing_appender::non_blocking::{self, WorkerGuard};
use tracing_appender::rolling;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

pub const LOG_FILE: &str = "latest.log";

#[derive(Debug, thiserror::Error)]
pub enum LogError {
    #[error("subscriber init failed: {0}")]
    SubscriberInit(#[from] tracing_subscriber::util::TryInitError),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Keeps the file writer alive; logs are flushed when dropped.
pub struct LogSystem {
    _guard: WorkerGuard,
}

impl LogSystem {
    pub fn init(debug: bool, logs_dir: &Path) -> Result<Self, LogError> {
        fs::create_dir_all(logs_dir)?;

        let file_appender = rolling::never(logs_dir, LOG_FILE);
        let (file_writer, guard) = non_blocking::NonBlockingBuilder::default()
            .lossy(false)
            .finish(file_appender);

        let console_level = if debug {
            LevelFilter::DEBUG
        } else {
            LevelFilter::WARN
        };

        let console_layer = fmt::layer()
            .with_target(false)
            .with_writer(io::stderr)
            .with_filter(console_level);

        let file_layer = fmt::layer()
            .with_ansi(false)
            .with_writer(file_writer)
            .with_filter(LevelFilter::DEBUG);

        tracing_subscriber::registry()
            .with(console_layer)
            .with(file_layer)
            .try_init()?;

        Ok(Self { _guard: guard })
    }
}
