//! TOML configuration for the pricing policy.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::core::{PolicyError, PricingPolicy};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub pricing: PricingPolicy,
}

#[derive(Debug)]
pub enum ConfigError {
    Missing,
    Io(std::io::Error),
    Invalid(String),
    Policy(PolicyError),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Missing => write!(f, "config file not found"),
            ConfigError::Io(e) => write!(f, "could not read config: {e}"),
            ConfigError::Invalid(msg) => write!(f, "invalid configuration: {msg}"),
            ConfigError::Policy(e) => write!(f, "invalid pricing: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Policy(e) => Some(e),
            _ => None,
        }
    }
}

impl From<PolicyError> for ConfigError {
    fn from(e: PolicyError) -> Self {
        ConfigError::Policy(e)
    }
}

impl Config {
    pub fn from_toml(input: &str) -> Result<Self, ConfigError> {
        let cfg: Config = toml::from_str(input).map_err(|e| ConfigError::Invalid(e.to_string()))?;
        cfg.pricing.validate()?;
        Ok(cfg)
    }
}

pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let data = fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => ConfigError::Missing,
        _ => ConfigError::Io(e),
    })?;
    let cfg = Config::from_toml(&data)?;
    info!(
        path = %path.display(),
        tax_rate = cfg.pricing.tax_rate,
        threshold = cfg.pricing.free_shipping_threshold,
        "Loaded configuration"
    );
    Ok(cfg)
}
