use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};
use dotenvy::dotenv;
use strum_macros::{Display, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum BackendKind {
    /// The REST API at `API_BASE_URL`.
    Http,
    /// In-process collections, for working offline.
    Memory,
}

#[derive(Clone, Debug)]
pub struct Config {
    pub server_addr: String,
    pub api_base_url: Option<String>,
    pub api_timeout: Duration,
    pub backend: BackendKind,

    /// Where the signed-in session is kept between runs.
    pub session_file: PathBuf,
    pub log_dir: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let api_timeout_secs: u64 = var("API_TIMEOUT_SECS", "15")
            .parse()
            .context("API_TIMEOUT_SECS must be a whole number of seconds")?;

        let backend = BackendKind::from_str(&var("PORTAL_BACKEND", "http"))
            .context("PORTAL_BACKEND must be `http` or `memory`")?;

        Ok(Self {
            server_addr: var("PORTAL_ADDR", "127.0.0.1:5173"),
            api_base_url: lookup("API_BASE_URL").filter(|url| !url.trim().is_empty()),
            api_timeout: Duration::from_secs(api_timeout_secs),
            backend,
            session_file: PathBuf::from(var("SESSION_FILE", "session.json")),
            log_dir: var("LOG_DIR", "logs"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(pairs: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults() {
        let cfg = config(&[]).unwrap();
        assert_eq!(cfg.server_addr, "127.0.0.1:5173");
        assert_eq!(cfg.api_timeout, Duration::from_secs(15));
        assert_eq!(cfg.backend, BackendKind::Http);
        assert_eq!(cfg.session_file, PathBuf::from("session.json"));
        assert!(cfg.api_base_url.is_none());
    }

    #[test]
    fn reads_overrides() {
        let cfg = config(&[
            ("API_BASE_URL", "http://localhost:7071/api"),
            ("PORTAL_BACKEND", "memory"),
            ("API_TIMEOUT_SECS", "3"),
        ])
        .unwrap();
        assert_eq!(cfg.api_base_url.as_deref(), Some("http://localhost:7071/api"));
        assert_eq!(cfg.backend, BackendKind::Memory);
        assert_eq!(cfg.api_timeout, Duration::from_secs(3));
    }

    #[test]
    fn rejects_bad_values() {
        assert!(config(&[("API_TIMEOUT_SECS", "soon")]).is_err());
        assert!(config(&[("PORTAL_BACKEND", "graphql")]).is_err());
    }
}
