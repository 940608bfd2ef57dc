//! Tracing subscriber setup.

use answerer_infrastructure::LogFormat;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Dependencies that are chatty at info level.
const QUIET_TARGETS: [&str; 4] = ["rdkafka", "mongodb", "hyper", "reqwest"];

/// Filter directive for the configured level and `-v` count.
///
/// Verbosity flags win over the configured level.
fn directive(level: &str, verbose: u8) -> String {
    let base = match verbose {
        0 => level.trim(),
        1 => "debug",
        _ => "trace", // -vv or more
    };
    let mut directive = if base.is_empty() { "info" } else { base }.to_string();
    for target in QUIET_TARGETS {
        directive.push_str(&format!(",{}=warn", target));
    }
    directive
}

fn env_filter(level: &str, verbose: u8) -> EnvFilter {
    if verbose == 0 {
        if let Ok(filter) = EnvFilter::try_from_default_env() {
            return filter;
        }
    }
    EnvFilter::try_new(directive(level, verbose))
        .unwrap_or_else(|_| EnvFilter::new(directive("info", verbose)))
}

/// Install the global subscriber writing to stdout.
///
/// The returned guard flushes buffered lines on drop and must be held
/// until the process exits.
pub fn init(level: &str, format: LogFormat, verbose: u8) -> anyhow::Result<WorkerGuard> {
    let (writer, guard) = tracing_appender::non_blocking(std::io::stdout());
    let filter = env_filter(level, verbose);

    let installed = match format {
        LogFormat::Pretty => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(writer)
            .with_target(false)
            .try_init(),
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(writer)
            .try_init(),
    };
    installed.map_err(|e| anyhow::anyhow!("failed to install tracing subscriber: {}", e))?;

    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configured_level_is_used_without_flags() {
        let d = directive("warn", 0);
        assert!(d.starts_with("warn,"));
        assert!(d.contains("rdkafka=warn"));
        assert!(d.contains("reqwest=warn"));
    }

    #[test]
    fn test_flags_override_configured_level() {
        assert!(directive("warn", 1).starts_with("debug,"));
        assert!(directive("warn", 3).starts_with("trace,"));
    }

    #[test]
    fn test_blank_level_falls_back_to_info() {
        assert!(directive("  ", 0).starts_with("info,"));
    }
}
