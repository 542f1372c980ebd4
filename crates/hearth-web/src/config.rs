use std::net::SocketAddr;
use std::path::PathBuf;

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: SocketAddr,
    #[serde(default)]
    pub rate_limit: RateLimitConfig,
    #[serde(default)]
    pub contact: ContactConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitConfig {
    #[serde(default = "default_requests_per_window")]
    pub requests_per_window: u32,
    #[serde(default = "default_window_seconds")]
    pub window_seconds: u64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactConfig {
    /// Webhook that captured leads are posted to. When unset, submissions
    /// are captured in logs only.
    #[serde(default)]
    pub lead_webhook_url: Option<String>,
}

fn default_bind_addr() -> SocketAddr {
    "0.0.0.0:8080".parse().unwrap()
}

fn default_requests_per_window() -> u32 {
    5
}

fn default_window_seconds() -> u64 {
    60
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            requests_per_window: default_requests_per_window(),
            window_seconds: default_window_seconds(),
        }
    }
}

impl ServerConfig {
    pub fn load() -> anyhow::Result<Self> {
        let config_path = std::env::var("HEARTH_WEB_CONFIG").map(PathBuf::from).ok();

        let mut config = if let Some(path) = config_path {
            let contents = std::fs::read_to_string(&path)?;
            toml::from_str(&contents)?
        } else {
            ServerConfig {
                bind_addr: default_bind_addr(),
                rate_limit: RateLimitConfig::default(),
                contact: ContactConfig::default(),
            }
        };

        if let Ok(addr) = std::env::var("HEARTH_BIND_ADDR") {
            config.bind_addr = addr.parse()?;
        }
        if let Ok(url) = std::env::var("HEARTH_LEAD_WEBHOOK_URL") {
            config.contact.lead_webhook_url = Some(url);
        }

        Ok(config)
    }
}
