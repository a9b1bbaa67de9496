//! Telemetry initialization (tracing/tracing-subscriber).
//!
//! - LOG_LEVEL: EnvFilter directives, e.g. "debug" or
//!   "info,puzzle=debug,mostle_backend=debug,tower_http=info".
//! - LOG_FORMAT: "pretty" (default), "compact" or "json".
//!
//! Request spans come from the tower-http TraceLayer in `routes`.

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info,puzzle=debug,mostle_backend=debug,tower_http=info,axum=info";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Compact,
    Json,
}

impl LogFormat {
    /// Unknown or missing values fall back to `Pretty`.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(|s| s.trim().to_ascii_lowercase()).as_deref() {
            Some("json") => LogFormat::Json,
            Some("compact") => LogFormat::Compact,
            _ => LogFormat::Pretty,
        }
    }

    pub fn from_env() -> Self {
        Self::parse(std::env::var("LOG_FORMAT").ok().as_deref())
    }
}

fn filter_from_env() -> EnvFilter {
    EnvFilter::try_from_env("LOG_LEVEL").unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the global subscriber. A subscriber that is already set is left in place.
pub fn init_tracing() {
    let format = LogFormat::from_env();
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter_from_env())
        .with_target(true)
        .with_file(true)
        .with_line_number(true);

    let installed = match format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Pretty => builder.try_init(),
    };
    match installed {
        Ok(()) => tracing::debug!(target: "mostle_backend", ?format, "Tracing initialized"),
        Err(e) => tracing::warn!(target: "mostle_backend", error = %e, "Tracing subscriber already set"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_format_selection() {
        assert_eq!(LogFormat::parse(Some("json")), LogFormat::Json);
        assert_eq!(LogFormat::parse(Some(" Compact ")), LogFormat::Compact);
        assert_eq!(LogFormat::parse(Some("pretty")), LogFormat::Pretty);
        assert_eq!(LogFormat::parse(Some("xml")), LogFormat::Pretty);
        assert_eq!(LogFormat::parse(None), LogFormat::Pretty);
    }

    #[test]
    fn second_init_does_not_panic() {
        init_tracing();
        init_tracing();
    }
}
