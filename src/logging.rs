//! provides logging helpers

use tracing_subscriber::filter::{self, LevelFilter};
use tracing_subscriber::fmt::layer;
use tracing_subscriber::{prelude::*, registry};

/// initiate the global tracing subscriber, writing to stderr
///
/// `RUST_LOG` takes precedence over the level picked by `verbosity`.
pub fn init(verbosity: u8) {
    let env_filter = filter::EnvFilter::builder()
        .with_default_directive(level(verbosity).into())
        .from_env_lossy();

    let fmt_layer = layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(env_filter);

    registry().with(fmt_layer).init();
}

fn level(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level() {
        assert_eq!(LevelFilter::WARN, level(0));
        assert_eq!(LevelFilter::DEBUG, level(2));
        assert_eq!(LevelFilter::TRACE, level(9));
    }
}
