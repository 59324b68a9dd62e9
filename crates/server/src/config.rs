#![forbid(unsafe_code)]

use clap::{Parser, ValueEnum};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Metrics dashboard server over a local SQLite store.
#[derive(Clone, Debug, Parser)]
#[command(name = "dash_server", version = crate::build_fingerprint_static())]
pub struct ServerConfig {
    /// Directory holding dashboard.db (created on first start).
    #[arg(long, env = "DASH_STORAGE_DIR", default_value = ".dashboard")]
    pub storage_dir: PathBuf,

    /// Address the HTTP listener binds to.
    #[arg(long, env = "DASH_BIND", default_value = "127.0.0.1:8080")]
    pub bind: SocketAddr,

    /// Per-request deadline; expired requests are cancelled.
    #[arg(
        long,
        env = "DASH_REQUEST_TIMEOUT_MS",
        default_value_t = 5_000,
        value_parser = clap::value_parser!(u64).range(100..=60_000)
    )]
    pub request_timeout_ms: u64,

    /// Seed an empty store with reproducible demo data.
    #[arg(long, env = "DASH_SEED")]
    pub seed: Option<u64>,

    #[arg(long, env = "DASH_LOG_FORMAT", value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

impl ServerConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_without_flags() {
        let config = ServerConfig::try_parse_from(["dash_server"]).unwrap();
        assert_eq!(config.storage_dir, PathBuf::from(".dashboard"));
        assert_eq!(config.bind, "127.0.0.1:8080".parse::<SocketAddr>().unwrap());
        assert_eq!(config.request_timeout(), Duration::from_secs(5));
        assert_eq!(config.seed, None);
        assert_eq!(config.log_format, LogFormat::Text);
    }

    #[test]
    fn flags_override_defaults() {
        let config = ServerConfig::try_parse_from([
            "dash_server",
            "--storage-dir",
            "/tmp/dash",
            "--bind",
            "0.0.0.0:9000",
            "--request-timeout-ms",
            "250",
            "--seed",
            "42",
            "--log-format",
            "json",
        ])
        .unwrap();
        assert_eq!(config.storage_dir, PathBuf::from("/tmp/dash"));
        assert_eq!(config.bind.port(), 9000);
        assert_eq!(config.request_timeout_ms, 250);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn timeout_out_of_range_is_rejected() {
        assert!(
            ServerConfig::try_parse_from(["dash_server", "--request-timeout-ms", "5"]).is_err()
        );
    }
}
