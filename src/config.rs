use anyhow::{Context, Result};
use clap::Parser;
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Memory,
    File,
}

impl std::str::FromStr for StorageBackend {
    type Err = anyhow::Error;

    fn from_str(raw: &str) -> Result<Self> {
        match raw.to_ascii_lowercase().as_str() {
            "memory" | "mem" | "in-memory" => Ok(Self::Memory),
            "file" | "json" => Ok(Self::File),
            _ => Err(anyhow::anyhow!("storage backend must be one of: memory, file")),
        }
    }
}

/// Log filter used when neither `RUST_LOG` nor `LOG_FILTER` is set.
pub const DEFAULT_LOG_FILTER: &str = "playlist_service=debug,tower_http=info";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub storage: StorageBackend,
    pub data_dir: PathBuf,
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            storage: StorageBackend::Memory,
            data_dir: PathBuf::from("./data"),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        let defaults = Self::default();

        let host = env::var("APP_HOST").unwrap_or(defaults.host);

        let port = match env::var("APP_PORT") {
            Ok(raw) => raw.parse::<u16>().context("APP_PORT must be a valid u16")?,
            Err(_) => defaults.port,
        };

        let storage = match env::var("STORAGE_BACKEND") {
            Ok(raw) => raw
                .parse::<StorageBackend>()
                .context("invalid STORAGE_BACKEND")?,
            Err(_) => defaults.storage,
        };

        let data_dir = env::var("DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.data_dir);

        let log_filter = env::var("LOG_FILTER")
            .ok()
            .filter(|raw| !raw.trim().is_empty())
            .unwrap_or(defaults.log_filter);

        Ok(Self {
            host,
            port,
            storage,
            data_dir,
            log_filter,
        })
    }

    /// Command-line flags take precedence over the environment.
    pub fn with_cli(mut self, cli: Cli) -> Self {
        if let Some(host) = cli.host {
            self.host = host;
        }
        if let Some(port) = cli.port {
            self.port = port;
        }
        if let Some(storage) = cli.storage {
            self.storage = storage;
        }
        if let Some(data_dir) = cli.data_dir {
            self.data_dir = data_dir;
        }
        if let Some(log_filter) = cli.log_filter {
            self.log_filter = log_filter;
        }
        self
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Default, Parser)]
#[command(name = "playlist_service")]
#[command(about = "Playlist and track catalogue HTTP service")]
pub struct Cli {
    #[arg(long)]
    pub host: Option<String>,
    #[arg(long)]
    pub port: Option<u16>,
    /// `memory` or `file`
    #[arg(long)]
    pub storage: Option<StorageBackend>,
    /// Directory holding the JSON snapshots of the file backend
    #[arg(long)]
    pub data_dir: Option<PathBuf>,
    /// tracing filter directive, e.g. `playlist_service=info`
    #[arg(long)]
    pub log_filter: Option<String>,
}
