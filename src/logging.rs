use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initializes console logging on stderr, leaving stdout to the report.
///
/// `RUST_LOG` takes precedence; otherwise the crate logs at `info`, or at
/// `debug` when `verbose` is set.
pub fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("football_report={}", default_level)));

    let console_layer = fmt::layer().with_target(false).with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .init();
}
