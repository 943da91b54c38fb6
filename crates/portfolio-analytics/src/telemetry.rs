use crate::config::TelemetryConfig;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::EnvFilter;

const CRATE_TARGETS: [&str; 2] = ["portfolio_analytics", "portfolio_analytics_api"];
const BARE_LEVELS: [&str; 6] = ["trace", "debug", "info", "warn", "error", "off"];

#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    #[error("invalid log level/filter '{value}': unable to build EnvFilter")]
    EnvFilter {
        value: String,
        #[source]
        source: ParseError,
    },
    #[error("telemetry error: {0}")]
    Subscriber(Box<dyn std::error::Error + Send + Sync>),
}

/// Expands a bare level such as `debug` into a directive that applies it to
/// this workspace's crates while keeping dependencies at `warn`. Full
/// directives pass through untouched.
pub fn filter_directive(log_level: &str) -> String {
    let level = log_level.trim().to_ascii_lowercase();
    if !BARE_LEVELS.contains(&level.as_str()) {
        return log_level.trim().to_string();
    }

    let mut directive = String::from("warn");
    for target in CRATE_TARGETS {
        directive.push_str(&format!(",{target}={level}"));
    }
    directive
}

pub fn init(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => {
            let directive = filter_directive(&config.log_level);
            EnvFilter::try_new(&directive).map_err(|source| TelemetryError::EnvFilter {
                value: config.log_level.clone(),
                source,
            })?
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .with_ansi(false)
        .try_init()
        .map_err(TelemetryError::Subscriber)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_level_is_scoped_to_workspace_crates() {
        assert_eq!(
            filter_directive(" DEBUG "),
            "warn,portfolio_analytics=debug,portfolio_analytics_api=debug"
        );
    }

    #[test]
    fn explicit_directives_pass_through() {
        assert_eq!(filter_directive("info,axum=debug"), "info,axum=debug");
    }

    #[test]
    fn expanded_directive_is_a_valid_filter() {
        assert!(EnvFilter::try_new(filter_directive("trace")).is_ok());
    }
}
