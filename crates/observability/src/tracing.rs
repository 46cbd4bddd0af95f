//! Tracing/logging initialization.

use tracing_subscriber::EnvFilter;

/// How the process-wide subscriber is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TracingConfig {
    /// Filter used when `RUST_LOG` is unset or invalid.
    pub default_filter: String,
    /// JSON lines when true, human-readable output otherwise.
    pub json: bool,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            default_filter: "info".to_string(),
            json: true,
        }
    }
}

impl TracingConfig {
    fn filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(&self.default_filter))
            .unwrap_or_else(|_| EnvFilter::new("info"))
    }
}

/// Initialize tracing/logging for the process.
///
/// Safe to call multiple times (subsequent calls are no-ops).
pub fn init(config: &TracingConfig) {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(config.filter())
        .with_timer(tracing_subscriber::fmt::time::SystemTime);

    // JSON logs + timestamps by default, configurable via RUST_LOG.
    let _ = if config.json {
        builder.json().with_target(false).try_init()
    } else {
        builder.with_target(false).try_init()
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_init_is_harmless() {
        let config = TracingConfig {
            default_filter: "debug".to_string(),
            json: false,
        };
        init(&config);
        init(&TracingConfig::default());
    }

    #[test]
    fn invalid_default_filter_falls_back() {
        let config = TracingConfig {
            default_filter: "not a [valid filter".to_string(),
            json: true,
        };
        // Must not panic.
        let _ = config.filter();
    }
}
