//! Tracing setup for the `ofc` binary.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;

/// Environment variable holding the filter directives (e.g. `ofc_engine=debug`).
pub const LOG_ENV: &str = "OFC_LOG";

const DEFAULT_FILTER: &str = "warn";

/// Filter from `OFC_LOG`, or `warn` when unset or unparsable.
pub fn filter_from_env() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Installs a stderr subscriber; stdout stays reserved for command output.
///
/// Calling this more than once is harmless: later calls keep the first
/// subscriber.
pub fn init_logging() {
    let subscriber = fmt()
        .with_env_filter(filter_from_env())
        .with_target(true)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
