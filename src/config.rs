//! Runtime tuning for the comparison pipeline.
//!
//! Queue capacity and buffer sizes only trade memory for fewer context
//! switches and syscalls. None of them affects which rows are produced or
//! their order.

use tracing_subscriber::EnvFilter;

/// Default capacity of each inter-thread queue, in items.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 100;

/// Default input buffer size per line source (64 KB).
pub const DEFAULT_INPUT_BUFFER: usize = 64 * 1024;

/// Default output buffer size (256 KB).
pub const DEFAULT_OUTPUT_BUFFER: usize = 256 * 1024;

/// Initial capacity reserved for each line read.
pub const DEFAULT_LINE_BUFFER: usize = 256;

/// Log level used when `RUST_LOG` is unset or unparsable.
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Clamp a requested queue capacity to at least one slot.
#[inline]
pub const fn channel_capacity(requested: usize) -> usize {
    if requested == 0 {
        1
    } else {
        requested
    }
}

/// Install the stderr `tracing` subscriber.
///
/// Safe to call more than once; later calls are ignored.
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .or_else(|_| EnvFilter::try_new(DEFAULT_LOG_LEVEL))
                .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_capacity_clamps_zero() {
        assert_eq!(channel_capacity(0), 1);
        assert_eq!(channel_capacity(1), 1);
        assert_eq!(channel_capacity(DEFAULT_CHANNEL_CAPACITY), 100);
    }

    #[test]
    fn test_init_logging_is_idempotent() {
        init_logging();
        init_logging();
    }
}
