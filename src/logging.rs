use tracing_subscriber::EnvFilter;

/// Installs the global subscriber. `BIZFORGE_LOG` wins over `RUST_LOG`;
/// without either, `verbose` picks between `debug` and `info`.
pub fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "info,bizforge=debug"
    } else {
        "info"
    };

    let filter = std::env::var("BIZFORGE_LOG")
        .ok()
        .and_then(|value| EnvFilter::try_new(value).ok())
        .or_else(|| EnvFilter::try_from_default_env().ok())
        .unwrap_or_else(|| EnvFilter::new(default_filter));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(verbose)
        .with_writer(std::io::stderr)
        .compact()
        .try_init();
}
