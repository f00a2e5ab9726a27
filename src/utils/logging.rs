use std::io::IsTerminal;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

use crate::utils::config::{Config, LogFormat};
use crate::utils::error::{EditorError, Result};

/// Initialize the tracing subscriber; RUST_LOG wins over the configured level.
/// Logs go to stderr so `sync --json` output stays parseable.
pub fn init(config: &Config) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let registry = Registry::default().with(env_filter);
    let result = match config.log_format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_target(true).with_current_span(true).with_writer(std::io::stderr))
            .try_init(),
        LogFormat::Pretty => registry
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_ansi(std::io::stderr().is_terminal())
                    .with_writer(std::io::stderr),
            )
            .try_init(),
    };

    result.map_err(|e| EditorError::Config(format!("Failed to initialize logging: {}", e)))
}

/// Log configuration at startup
pub fn log_config(config: &Config) {
    let paths = config.paths();
    tracing::info!(
        bind = %config.bind,
        layout = ?config.layout,
        editor_root = %paths.editor_root.display(),
        projects_dir = %paths.projects_dir.display(),
        index_file = %paths.index_file.display(),
        images_dir = %paths.images_dir.display(),
        "Configuration loaded"
    );
}

/// The server has no authentication, so anything but loopback is worth a warning.
/// Must run after `init`, otherwise the event has no subscriber.
pub fn warn_if_exposed(config: &Config) {
    if !config.bind.ip().is_loopback() {
        tracing::warn!(bind = %config.bind, "Binding to a non-loopback address; this server has no authentication");
    }
}
