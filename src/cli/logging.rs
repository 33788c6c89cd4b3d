//! Tracing subscriber setup

use std::io::{self, IsTerminal};

use tracing::subscriber::DefaultGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter};

/// Install a compact stderr subscriber for the current thread.
///
/// `RUST_LOG` overrides `level`. Logging stops when the returned guard is
/// dropped, so the caller decides how long the context lives.
pub fn init_logging(level: &str) -> DefaultGuard {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let subscriber = tracing_subscriber::registry().with(env_filter).with(
        fmt::layer()
            .compact()
            .with_target(false)
            .with_ansi(io::stderr().is_terminal())
            .with_writer(io::stderr),
    );

    tracing::subscriber::set_default(subscriber)
}
