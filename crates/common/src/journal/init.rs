//! Logging initialization

use crate::config::LoggingConfig;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the global tracing subscriber
///
/// `RUST_LOG` takes precedence over `config.level`. Output goes to stderr so
/// stdout stays reserved for the run summary.
pub fn init_logging(config: &LoggingConfig) -> Result<(), Box<dyn std::error::Error>> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let layer = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    match config.format.as_str() {
        "pretty" => tracing_subscriber::registry()
            .with(env_filter)
            .with(layer.pretty())
            .try_init()?,
        _ => tracing_subscriber::registry()
            .with(env_filter)
            .with(layer.compact())
            .try_init()?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_reports_error() {
        let config = LoggingConfig::default();
        // Whichever call wins the global slot, the next one must fail cleanly
        let _ = init_logging(&config);
        assert!(init_logging(&config).is_err());
    }
}
