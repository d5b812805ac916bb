pub mod toml_config;

use crate::utils::error::{Result, TermsError};
use crate::utils::validation::{validate_non_empty_string, validate_positive_number, validate_url, Validate};
use clap::Parser;
use std::time::Duration;

#[derive(Debug, Clone, Parser)]
#[command(name = "terms-resolver")]
#[command(about = "Resolves terms-of-service acceptance versions for organizations")]
pub struct ServerConfig {
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    #[arg(long, default_value = "8080")]
    pub port: u16,

    /// Shared secret checked against the X-API-KEY header.
    /// Falls back to the TERMS_API_KEY environment variable.
    #[arg(long, env = "TERMS_API_KEY")]
    pub api_key: String,

    #[arg(long, default_value = "https://www.altinn.no")]
    pub altinn_url: String,

    #[arg(long, default_value = "https://data.brreg.no")]
    pub org_directory_url: String,

    #[arg(long, default_value = "http://terms-store")]
    pub terms_store_url: String,

    /// Per-request timeout for upstream calls, in seconds.
    #[arg(long, default_value = "5")]
    pub timeout_seconds: u64,

    /// Retry budget for transient acceptance-store failures.
    #[arg(long, default_value = "1")]
    pub retry_attempts: u32,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit JSON logs instead of the compact format")]
    pub json_logs: bool,
}

impl ServerConfig {
    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Validate for ServerConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("api_key", &self.api_key)?;
        validate_url("altinn_url", &self.altinn_url)?;
        validate_url("org_directory_url", &self.org_directory_url)?;
        validate_url("terms_store_url", &self.terms_store_url)?;
        validate_positive_number("timeout_seconds", self.timeout_seconds, 1)?;
        if self.port == 0 {
            return Err(TermsError::InvalidConfigValue {
                field: "port".to_string(),
                value: "0".to_string(),
                reason: "Port must be non-zero".to_string(),
            });
        }
        Ok(())
    }
}
