//! Process configuration read from the environment (after `.env` is loaded).

use crate::error::ConfigError;
use std::net::SocketAddr;
use std::path::PathBuf;

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:5000";
pub const DEFAULT_BODY_LIMIT_BYTES: usize = 1024 * 1024;

#[derive(Clone, Debug)]
pub struct Settings {
    pub supabase_url: String,
    pub supabase_key: String,
    pub bind_addr: SocketAddr,
    /// Front-end bundle served for every path outside the API.
    pub static_dir: Option<PathBuf>,
    pub body_limit_bytes: usize,
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from any key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let supabase_url = get("SUPABASE_URL").ok_or(ConfigError::Missing("SUPABASE_URL"))?;
        if !supabase_url.starts_with("http://") && !supabase_url.starts_with("https://") {
            return Err(ConfigError::Invalid {
                key: "SUPABASE_URL",
                reason: format!("expected an http(s) URL, got '{}'", supabase_url),
            });
        }
        let supabase_key = get("SUPABASE_KEY").ok_or(ConfigError::Missing("SUPABASE_KEY"))?;

        let bind_addr = get("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse()
            .map_err(|e: std::net::AddrParseError| ConfigError::Invalid {
                key: "BIND_ADDR",
                reason: e.to_string(),
            })?;

        let body_limit_bytes = match get("BODY_LIMIT_BYTES") {
            Some(v) => v.parse().map_err(|e: std::num::ParseIntError| ConfigError::Invalid {
                key: "BODY_LIMIT_BYTES",
                reason: e.to_string(),
            })?,
            None => DEFAULT_BODY_LIMIT_BYTES,
        };

        Ok(Settings {
            supabase_url,
            supabase_key,
            bind_addr,
            static_dir: get("STATIC_DIR").map(PathBuf::from),
            body_limit_bytes,
        })
    }
}
