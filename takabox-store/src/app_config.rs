use serde::Deserialize;
use std::env;
use takabox_catalog::DeliverySettings;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub steadfast: SteadfastConfig,
    pub delivery: DeliverySettings,
    pub submission: SubmissionConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
}

/// Steadfast merchant API credentials. Leave the keys empty to run without a
/// courier; the delivery settings flag controls hand-off per order.
#[derive(Debug, Deserialize, Clone)]
pub struct SteadfastConfig {
    pub base_url: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub secret_key: String,
    #[serde(default = "default_courier_timeout")]
    pub timeout_seconds: u64,
}

fn default_courier_timeout() -> u64 {
    10
}

impl SteadfastConfig {
    pub fn has_credentials(&self) -> bool {
        !self.api_key.is_empty() && !self.secret_key.is_empty()
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct SubmissionConfig {
    /// How long an accepted draft id blocks re-submission.
    #[serde(default = "default_guard_ttl")]
    pub guard_ttl_seconds: u64,
}

fn default_guard_ttl() -> u64 {
    30
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            // Start off by merging in the "default" configuration file
            .add_source(config::File::with_name("config/default"))
            // Add in the current environment file
            // Default to 'development' env
            // Note that this file is _optional_
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Add in a local configuration file
            // This file shouldn't be checked in to git
            .add_source(config::File::with_name("config/local").required(false))
            // Add in settings from the environment (with a prefix of TAKABOX)
            // Eg.. `TAKABOX_SERVER__PORT=9000` would set the server port
            .add_source(config::Environment::with_prefix("TAKABOX").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
