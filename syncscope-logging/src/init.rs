use anyhow::{Context, Result};
use syncscope_config::domains::logging::{LogFormat, LoggingConfig};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Keeps the file writer alive. Dropping it flushes and stops the worker.
#[must_use = "dropping the guard stops file logging"]
#[derive(Default)]
pub struct LoggingGuard {
    file: Option<WorkerGuard>,
}

impl LoggingGuard {
    pub fn has_file_sink(&self) -> bool {
        self.file.is_some()
    }
}

/// Build the level filter.
///
/// A parseable `RUST_LOG` wins over the configured level; `info` is the last resort.
pub fn build_env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Initialize logging from configuration
pub fn init_logging_from_config(config: &LoggingConfig) -> Result<LoggingGuard> {
    let (layers, guard) = build_layers(config)?;

    // Use try_init to avoid panic if global subscriber already set
    if tracing_subscriber::registry()
        .with(layers)
        .with(build_env_filter(config.level.as_str()))
        .try_init()
        .is_err()
    {
        tracing::debug!("Global tracing subscriber already initialized, skipping");
    }

    Ok(guard)
}

fn build_layers(config: &LoggingConfig) -> Result<(Vec<BoxedLayer>, LoggingGuard)> {
    let mut layers = vec![console_layer(config.format, config.include_location)];
    let mut guard = LoggingGuard::default();

    if let Some(file) = &config.file {
        std::fs::create_dir_all(&file.directory)
            .with_context(|| format!("Failed to create log directory {}", file.directory.display()))?;

        let appender = tracing_appender::rolling::daily(&file.directory, &file.prefix);
        let (writer, worker) = tracing_appender::non_blocking(appender);

        layers.push(
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(writer)
                .with_ansi(false)
                .boxed(),
        );
        guard.file = Some(worker);
    }

    Ok((layers, guard))
}

fn console_layer(format: LogFormat, include_location: bool) -> BoxedLayer {
    let layer = tracing_subscriber::fmt::layer()
        .with_file(include_location)
        .with_line_number(include_location);

    match format {
        LogFormat::Json => layer.json().boxed(),
        LogFormat::Compact => layer.compact().boxed(),
        LogFormat::Pretty => layer.pretty().boxed(),
        LogFormat::Text => layer.boxed(),
    }
}
