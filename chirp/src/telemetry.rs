use tracing_subscriber::EnvFilter;

/// Install a `fmt` subscriber filtered by `RUST_LOG` (default `info`).
///
/// Returns `false` when a global subscriber was already installed, which
/// makes it safe to call from every test.
pub fn init_tracing() -> bool {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .is_ok()
}
