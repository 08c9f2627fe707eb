use std::sync::Once;

/// Default filter when neither `LoggingConfig::env_filter` nor `RUST_LOG` is set.
///
/// wgpu internals are chatty at info level.
pub const DEFAULT_FILTER: &str = "info,wgpu_core=warn,wgpu_hal=warn,naga=warn";

/// Logger configuration.
///
/// `env_filter` follows the `env_logger` filter syntax (e.g. "info", "warn",
/// "spin_engine=debug,wgpu_core=warn").
///
/// `write_style` controls ANSI coloring behavior.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,
    pub write_style: env_logger::WriteStyle,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            write_style: env_logger::WriteStyle::Auto,
        }
    }
}

static INIT: Once = Once::new();

/// Initializes the global logger once.
///
/// Subsequent calls are ignored. Call early in `main`.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let filter = resolve_filter(config.env_filter, std::env::var("RUST_LOG").ok());

        let mut builder = env_logger::Builder::new();
        builder.parse_filters(&filter);
        builder.write_style(config.write_style);

        // Another logger may already be installed (e.g. by a test harness).
        if builder.try_init().is_err() {
            return;
        }

        log::debug!("logging initialized ({filter})");
    });
}

/// Explicit config wins over `RUST_LOG`, which wins over the default.
fn resolve_filter(explicit: Option<String>, env: Option<String>) -> String {
    explicit
        .or(env)
        .filter(|f| !f.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_FILTER.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_filter_wins() {
        let f = resolve_filter(Some("debug".into()), Some("warn".into()));
        assert_eq!(f, "debug");
    }

    #[test]
    fn env_filter_used_without_explicit() {
        let f = resolve_filter(None, Some("warn".into()));
        assert_eq!(f, "warn");
    }

    #[test]
    fn blank_filter_falls_back_to_default() {
        assert_eq!(resolve_filter(None, None), DEFAULT_FILTER);
        assert_eq!(resolve_filter(Some("  ".into()), None), DEFAULT_FILTER);
    }

    #[test]
    fn init_is_idempotent() {
        init_logging(LoggingConfig::default());
        init_logging(LoggingConfig::default());
    }
}
