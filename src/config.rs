//! Environment-backed settings for both processes.
//!
//! Only endpoints and paths are configurable. The deadlines are fixed
//! constants living next to the code they bound.
use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

use crate::error::{QuoteError, Result};

pub const DEFAULT_SERVER_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_PROVIDER_URL: &str = "https://economia.awesomeapi.com.br/json/last/USD-BRL";
pub const DEFAULT_DATABASE_URL: &str = "sqlite://test.db";
pub const DEFAULT_SERVER_URL: &str = "http://localhost:8080/cotacao";
pub const DEFAULT_OUTPUT_PATH: &str = "cotacao.txt";

#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub provider_url: String,
    pub database_url: String,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let bind_addr = value_or(&lookup, "QUOTE_SERVER_ADDR", DEFAULT_SERVER_ADDR);
        let bind_addr = bind_addr
            .parse::<SocketAddr>()
            .map_err(|e| QuoteError::Config(format!("QUOTE_SERVER_ADDR {bind_addr:?}: {e}")))?;

        Ok(Self {
            bind_addr,
            provider_url: value_or(&lookup, "QUOTE_PROVIDER_URL", DEFAULT_PROVIDER_URL),
            database_url: value_or(&lookup, "QUOTE_DATABASE_URL", DEFAULT_DATABASE_URL),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub server_url: String,
    pub output_path: PathBuf,
}

impl ClientConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            server_url: value_or(&lookup, "QUOTE_SERVER_URL", DEFAULT_SERVER_URL),
            output_path: value_or(&lookup, "QUOTE_OUTPUT_PATH", DEFAULT_OUTPUT_PATH).into(),
        }
    }
}

// Empty values count as unset.
fn value_or(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: &str) -> String {
    lookup(key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}
