//! Tracing setup for the CLI.
//!
//! Events go to stderr through a non-blocking writer so rendered output on
//! stdout stays clean. `RUST_LOG` takes precedence over `-v` / `--quiet`.

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::Layer;
use tracing_subscriber::Registry;

use crate::args::GlobalArgs;

/// Initialize the stderr tracing subscriber.
///
/// Returns a `WorkerGuard` that must be kept alive until the command
/// finishes, or buffered events are lost.
pub fn init_tracing(global: &GlobalArgs) -> WorkerGuard {
    let (non_blocking, guard) = tracing_appender::non_blocking(std::io::stderr());

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(global.default_log_level()));
    let stderr_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true)
        .with_filter(env_filter);

    Registry::default().with(stderr_layer).init();

    guard
}
