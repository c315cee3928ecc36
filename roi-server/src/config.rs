use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};

/// Storage engines the server can keep scenarios in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StorageBackend {
    Sqlite,
}

/// Invoice automation ROI simulator HTTP server.
#[derive(Debug, Clone, Parser)]
#[command(name = "roi-server", version, about)]
pub struct ServerConfig {
    /// Address to bind.
    #[arg(long, env = "ROI_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on.
    #[arg(long, env = "ROI_PORT", default_value_t = 5000)]
    pub port: u16,

    /// Storage backend for saved scenarios.
    #[arg(
        long = "db-backend",
        env = "ROI_DB_BACKEND",
        value_enum,
        ignore_case = true,
        default_value_t = StorageBackend::Sqlite
    )]
    pub db_backend: StorageBackend,

    /// Backend connection string: a file path, `:memory:`, or a `sqlite:` URL.
    #[arg(long, env = "ROI_DATABASE", default_value = "roi_simulator.db")]
    pub database: String,

    /// Directory for transient report files. Defaults to the system temp dir.
    #[arg(long = "report-dir", env = "ROI_REPORT_DIR")]
    pub report_dir: Option<PathBuf>,

    /// Also append log output to this file.
    #[arg(long = "log-file", env = "ROI_LOG_FILE")]
    pub log_file: Option<PathBuf>,
}

impl ServerConfig {
    pub fn bind_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("invalid bind address {}:{}", self.host, self.port))
    }
}
