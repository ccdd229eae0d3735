use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "MATCHDAY_LOG";
const DEFAULT_FILTER: &str = "info";

/// Install the fmt subscriber for binaries. The filter comes from
/// `MATCHDAY_LOG`, then `RUST_LOG`, then defaults to `info`. Logs go to stderr
/// so stdout stays clean for report output.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
