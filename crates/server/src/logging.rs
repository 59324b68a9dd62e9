#![forbid(unsafe_code)]

use crate::config::LogFormat;
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "DASH_LOG";
const DEFAULT_DIRECTIVES: &str = "info";

/// Installs the global subscriber. Filter directives come from `DASH_LOG`
/// (for example `dash_server=debug`), falling back to `info`.
pub fn init(format: LogFormat) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES));
    let fmt = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    let result = match format {
        LogFormat::Json => fmt.json().try_init(),
        LogFormat::Text => fmt.try_init(),
    };
    if let Err(err) = result {
        eprintln!("dash_server: logging already initialized: {err}");
    }
}
