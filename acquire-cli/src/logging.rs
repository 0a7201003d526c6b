use tracing_subscriber::EnvFilter;

/// Installs the global subscriber.
///
/// Events go to stderr so stdout stays reserved for results. `RUST_LOG`
/// overrides the default level, which is `debug` when `verbose` is set and
/// `info` otherwise.
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // A second init (e.g. in tests) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .try_init();
}
