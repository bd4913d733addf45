use tracing::Level;
use tracing_subscriber::{
    fmt::{self, format::Writer, time::FormatTime},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer, Registry,
};
use chrono::Utc;
use std::fs::OpenOptions;

// Custom timestamp format
struct CustomTime;

impl FormatTime for CustomTime {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        write!(w, "{}", Utc::now().format("%Y-%m-%d %H:%M:%S%.3f"))
    }
}

#[derive(Debug, Clone)]
pub struct LogConfig {
    pub level: Level,
    pub enable_console: bool,
    pub enable_file: bool,
    pub file_path: String,
    pub enable_json: bool,
    pub enable_ansi: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            enable_console: true,
            enable_file: false,
            file_path: "prop-imitation.log".to_string(),
            enable_json: false,
            enable_ansi: true,
        }
    }
}

pub struct Logger;

impl Logger {
    /// Installs the global subscriber. Fails if one is already set.
    pub fn init(config: LogConfig) -> Result<(), Box<dyn std::error::Error>> {
        let env_filter = EnvFilter::from_default_env()
            .add_directive(format!("prop_imitation={}", config.level).parse()?);

        let registry = Registry::default().with(env_filter);

        let mut layers = Vec::new();

        if config.enable_console {
            let console_layer = fmt::layer()
                .with_target(true)
                .with_thread_ids(true)
                .with_timer(CustomTime)
                .with_ansi(config.enable_ansi)
                .with_level(true);

            layers.push(console_layer.boxed());
        }

        if config.enable_file {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&config.file_path)?;

            let file_layer = if config.enable_json {
                fmt::layer()
                    .with_writer(file)
                    .json()
                    .with_current_span(false)
                    .with_span_list(false)
                    .boxed()
            } else {
                fmt::layer()
                    .with_writer(file)
                    .with_timer(CustomTime)
                    .with_target(true)
                    .with_level(true)
                    .with_ansi(false)
                    .boxed()
            };

            layers.push(file_layer);
        }

        registry.with(layers).try_init()?;

        Ok(())
    }

    pub fn init_with_defaults() -> Result<(), Box<dyn std::error::Error>> {
        Self::init(LogConfig::default())
    }
}

pub fn parse_level(value: &str) -> Level {
    match value.to_lowercase().as_str() {
        "error" => Level::ERROR,
        "warn" => Level::WARN,
        "debug" => Level::DEBUG,
        "trace" => Level::TRACE,
        _ => Level::INFO,
    }
}

// Convenience macros for structured logging
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {
        tracing::error!(target: "prop_imitation", $($arg)*)
    };
}

#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {
        tracing::warn!(target: "prop_imitation", $($arg)*)
    };
}

#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        tracing::info!(target: "prop_imitation", $($arg)*)
    };
}

#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {
        tracing::debug!(target: "prop_imitation", $($arg)*)
    };
}

#[macro_export]
macro_rules! log_trace {
    ($($arg:tt)*) => {
        tracing::trace!(target: "prop_imitation", $($arg)*)
    };
}
