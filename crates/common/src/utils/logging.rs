use std::io;
use tracing_subscriber::{fmt, EnvFilter};

/// Environment variable selecting the log output format (`json` or `compact`).
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

/// Initialize tracing subscriber with sensible defaults and stdout writer.
/// - Respects `RUST_LOG` if set
/// - Falls back to `info,tower_http=info,axum=info`
/// - Writes to stdout to improve visibility in environments that hide stderr
pub fn init_logging_default() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=info,axum=info"));
    let _ = fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .with_writer(io::stdout)
        .try_init();
}

/// Initialize tracing subscriber with JSON structured output.
/// - Respects `RUST_LOG` if set, defaults to `info` with SQL statements at `warn`
/// - Writes to stdout for consistent container logging behavior
pub fn init_logging_json() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,sqlx=warn,sea_orm=warn"));
    let _ = fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .json()
        .with_writer(io::stdout)
        .try_init();
}

/// Pick the subscriber format from `LOG_FORMAT`; anything but `json` is compact.
pub fn init_logging_from_env() {
    if is_json_format(std::env::var(LOG_FORMAT_ENV).ok().as_deref()) {
        init_logging_json();
    } else {
        init_logging_default();
    }
}

fn is_json_format(value: Option<&str>) -> bool {
    matches!(value, Some(v) if v.trim().eq_ignore_ascii_case("json"))
}

#[cfg(test)]
mod tests {
    use super::is_json_format;

    #[test]
    fn json_format_is_case_insensitive() {
        assert!(is_json_format(Some("json")));
        assert!(is_json_format(Some(" JSON ")));
    }

    #[test]
    fn anything_else_is_compact() {
        assert!(!is_json_format(None));
        assert!(!is_json_format(Some("")));
        assert!(!is_json_format(Some("pretty")));
    }

    #[test]
    fn repeated_init_does_not_panic() {
        super::init_logging_default();
        super::init_logging_json();
    }
}
