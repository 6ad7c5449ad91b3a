//! Logging setup.

use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber.
///
/// `RUST_LOG` takes precedence; otherwise the engine logs at `info`, or
/// `debug` with `--verbose`.
pub fn init(verbose: bool) {
    let default_directive = if verbose {
        "treasure_scene=debug"
    } else {
        "treasure_scene=info"
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
