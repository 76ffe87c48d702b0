use std::sync::Once;

/// Default filter used when neither the config nor `RUST_LOG` provides one.
///
/// wgpu is chatty at `info`; keep its internals at `warn`.
const DEFAULT_FILTER: &str = "info,wgpu_core=warn,wgpu_hal=warn,naga=warn";

/// Logger configuration.
///
/// `env_filter` follows the `env_logger` filter syntax (e.g. "debug",
/// "crossfade_engine=trace,wgpu=warn").
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

/// Installs the global logger.
///
/// Filter precedence: `config.env_filter`, then `RUST_LOG`, then
/// [`DEFAULT_FILTER`]. Only the first call has an effect.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let filter = resolve_filter(config.env_filter, std::env::var("RUST_LOG").ok());

        let mut builder = env_logger::Builder::new();
        builder.parse_filters(&filter);
        builder.write_style(config.write_style);

        // `try_init` so a test harness that already installed a logger is not fatal.
        if builder.try_init().is_err() {
            log::debug!("logger already installed; keeping existing backend");
            return;
        }

        log::debug!("logging initialized (filter: {filter})");
    });
}

fn resolve_filter(configured: Option<String>, env: Option<String>) -> String {
    let usable = |f: &String| !f.trim().is_empty();
    configured
        .filter(usable)
        .or(env.filter(usable))
        .unwrap_or_else(|| DEFAULT_FILTER.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_precedence() {
        let cfg = Some("debug".to_string());
        let env = Some("trace".to_string());

        assert_eq!(resolve_filter(cfg.clone(), env.clone()), "debug");
        assert_eq!(resolve_filter(None, env), "trace");
        assert_eq!(resolve_filter(None, None), DEFAULT_FILTER);
        assert_eq!(resolve_filter(Some("  ".into()), None), DEFAULT_FILTER);
    }

    #[test]
    fn blank_config_falls_through_to_env() {
        let env = Some("crossfade_engine=trace".to_string());
        assert_eq!(resolve_filter(Some("  ".into()), env), "crossfade_engine=trace");
        assert_eq!(resolve_filter(Some(String::new()), Some(" ".into())), DEFAULT_FILTER);
    }
}
