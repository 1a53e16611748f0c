use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};

/// Runtime settings, read from the environment (and `.env`, if present).
#[derive(Debug, Clone)]
pub struct Config {
    pub db_path: PathBuf,
    pub session_secret: String,
    pub host: String,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let port = get("RESIDENCY_PORT").unwrap_or_else(|| "3000".into());
        Ok(Self {
            db_path: PathBuf::from(get("RESIDENCY_DB_PATH").unwrap_or_else(|| "residency.db".into())),
            session_secret: get("RESIDENCY_SESSION_SECRET")
                .unwrap_or_else(|| "dev-secret-change-me".into()),
            host: get("RESIDENCY_HOST").unwrap_or_else(|| "0.0.0.0".into()),
            port: port
                .parse()
                .with_context(|| format!("RESIDENCY_PORT is not a port number: {}", port))?,
        })
    }

    pub fn addr(&self) -> Result<SocketAddr> {
        let addr = format!("{}:{}", self.host, self.port);
        addr.parse()
            .with_context(|| format!("Invalid listen address {}", addr))
    }
}
