use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

const LOG_PREVIEW_CHARS: usize = 50;

/// Install the process-wide tracing subscriber. Safe to call more than once;
/// later calls are no-ops.
///
/// The filter honors `RUST_LOG` and defaults to `rankprobe=info`.
pub fn init_logging() {
    let _ = tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "rankprobe=info".into()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .try_init();
}

/// Shorten a logged value so large inputs do not flood the log.
///
/// Values of up to 50 characters pass through unchanged; longer values keep
/// the first 50 characters followed by a count of what was cut.
pub fn truncate_for_log(data: &str) -> String {
    let total = data.chars().count();
    if total <= LOG_PREVIEW_CHARS {
        return data.to_string();
    }
    let head: String = data.chars().take(LOG_PREVIEW_CHARS).collect();
    format!("{} >>> {} characters", head, total - LOG_PREVIEW_CHARS)
}

#[cfg(test)]
#[path = "logging_test.rs"]
mod logging_test;
