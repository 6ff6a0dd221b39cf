use anyhow::{Context, Result};
use citation_system::openai_service::DEFAULT_BASE_URL;
use citation_system::prompt::DEFAULT_MODEL;
use std::collections::HashSet;
use std::env;
use std::net::SocketAddr;

pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8000";

/// Process configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Keys accepted in the `x-api-key` header.
    pub api_keys: HashSet<String>,
    pub openai_api_key: Option<String>,
    pub openai_model: String,
    pub openai_base_url: String,
    pub bind_address: SocketAddr,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_keys = lookup("API_KEY")
            .map(|raw| parse_key_set(&raw))
            .unwrap_or_default();

        let openai_api_key = lookup("OPENAI_API_KEY")
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty());

        let openai_model = non_empty(lookup("OPENAI_MODEL"))
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let openai_base_url = non_empty(lookup("OPENAI_BASE_URL"))
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let bind_address = non_empty(lookup("BIND_ADDRESS"))
            .unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string());
        let bind_address = bind_address
            .parse::<SocketAddr>()
            .with_context(|| format!("BIND_ADDRESS is not a valid socket address: {}", bind_address))?;

        Ok(Self {
            api_keys,
            openai_api_key,
            openai_model,
            openai_base_url,
            bind_address,
        })
    }

    /// Exact match against one of the configured keys.
    pub fn is_authorized(&self, key: &str) -> bool {
        self.api_keys.contains(key)
    }
}

fn parse_key_set(raw: &str) -> HashSet<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|key| !key.is_empty())
        .map(str::to_string)
        .collect()
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
