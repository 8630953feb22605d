//! Log backend setup
//!
//! The runtime logs through the `log` facade; this installs `env_logger`
//! on stderr so log lines never mix with program output.

use env_logger::{Builder, Env};

const DEFAULT_FILTER: &str = "warn";

/// Filter used when tracing is requested
const TRACE_FILTER: &str = "stepwise_runtime=trace";

/// Pick the log filter, highest precedence first:
/// `--trace`, `--log`/`STEPWISE_LOG`, `RUST_LOG`, the config's `log.filter`.
pub fn filter(
    trace: bool,
    cli_filter: Option<&str>,
    config_filter: Option<&str>,
) -> Option<String> {
    if trace {
        return Some(TRACE_FILTER.to_string());
    }
    cli_filter.map(str::to_string).or_else(|| {
        if std::env::var_os("RUST_LOG").is_some() {
            None
        } else {
            config_filter.map(str::to_string)
        }
    })
}

/// Install the logger. Call once.
pub fn init(trace: bool, cli_filter: Option<&str>, config_filter: Option<&str>) {
    let mut builder = Builder::from_env(Env::default().default_filter_or(DEFAULT_FILTER));
    if let Some(filter) = filter(trace, cli_filter, config_filter) {
        builder.parse_filters(&filter);
    }
    builder.format_timestamp(None).init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trace_wins() {
        assert_eq!(
            filter(true, Some("info"), Some("debug")).as_deref(),
            Some(TRACE_FILTER)
        );
    }

    #[test]
    fn test_cli_filter_over_config() {
        assert_eq!(filter(false, Some("info"), Some("debug")).as_deref(), Some("info"));
    }
}
