//! Logging system initialization
//!
//! Sets up the tracing subscriber from the loaded configuration: env
//! filter, text or JSON output, console or file writer.

use std::io::Write;

use crate::config::StaticConfig;

/// Initialize logging based on configuration.
///
/// Call once during startup, after the configuration has been loaded. The
/// returned `WorkerGuard` must be kept alive for the duration of the
/// program so buffered log writes get flushed.
pub fn init_logging(config: &StaticConfig) -> tracing_appender::non_blocking::WorkerGuard {
    let to_file = config
        .logging
        .file
        .as_ref()
        .is_some_and(|f| !f.is_empty());

    let writer: Box<dyn Write + Send + Sync> = if to_file {
        let path = config.logging.file.as_deref().unwrap_or_default();
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .expect("Failed to open log file");
        Box::new(file)
    } else {
        Box::new(std::io::stdout())
    };

    let (non_blocking_writer, guard) = tracing_appender::non_blocking(writer);
    let filter = tracing_subscriber::EnvFilter::new(config.logging.level.clone());

    let subscriber_builder = tracing_subscriber::fmt()
        .with_writer(non_blocking_writer)
        .with_env_filter(filter)
        .with_level(true)
        .with_ansi(!to_file);

    if config.logging.format == "json" {
        subscriber_builder.json().init();
    } else {
        subscriber_builder.init();
    }

    guard
}
