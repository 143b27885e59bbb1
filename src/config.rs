//! Configuration module for environment variables and application settings

use std::env;
use anyhow::{Context, Result};

/// Application configuration, loaded once at startup and passed down to the
/// components that need it.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server configuration
    pub server: ServerConfig,

    /// Database configuration
    pub database: DatabaseConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub uri: String,
    pub dbname: String,
}

impl Config {
    /// Load configuration from environment variables, falling back to the
    /// defaults a local development setup expects.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            server: ServerConfig {
                host: env::var("PINGS_SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: env::var("PINGS_SERVER_PORT")
                    .unwrap_or_else(|_| "4567".to_string())
                    .parse()
                    .context("PINGS_SERVER_PORT must be a port number")?,
            },
            database: DatabaseConfig {
                uri: normalize_mongo_uri(
                    &env::var("PINGS_SERVER_MONGO_URI")
                        .unwrap_or_else(|_| "127.0.0.1:27017".to_string()),
                )?,
                dbname: env::var("PINGS_SERVER_DB").unwrap_or_else(|_| "pings".to_string()),
            },
        })
    }
}

/// Accept both full `mongodb://` URIs and bare `host:port` addresses, which
/// is what the historical configuration used.
fn normalize_mongo_uri(addr: &str) -> Result<String> {
    let uri = if addr.contains("://") {
        addr.to_string()
    } else {
        format!("mongodb://{addr}")
    };

    let parsed = url::Url::parse(&uri)
        .with_context(|| format!("failed to parse MongoDB URI {uri:?}"))?;
    if parsed.scheme() != "mongodb" && parsed.scheme() != "mongodb+srv" {
        anyhow::bail!("invalid MongoDB URI scheme, expected mongodb or mongodb+srv");
    }

    Ok(uri)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_address_gets_mongodb_scheme() {
        assert_eq!(
            normalize_mongo_uri("127.0.0.1:27017").unwrap(),
            "mongodb://127.0.0.1:27017"
        );
    }

    #[test]
    fn full_uris_pass_through_unchanged() {
        assert_eq!(
            normalize_mongo_uri("mongodb://mongo.internal:27017").unwrap(),
            "mongodb://mongo.internal:27017"
        );
    }

    #[test]
    fn non_mongo_schemes_are_rejected() {
        assert!(normalize_mongo_uri("postgres://localhost:5432").is_err());
    }
}
