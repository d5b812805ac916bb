use crate::utils::error::{Result, TermsError};
use crate::utils::validation::{
    validate_non_empty_string, validate_positive_number, validate_url, Validate,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

const DEFAULT_TIMEOUT_SECONDS: u64 = 5;
const DEFAULT_RETRY_ATTEMPTS: u32 = 1;

/// File-based configuration for deployments where flags are impractical.
/// Secrets can be injected as `${VAR}` placeholders resolved from the
/// environment at load time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub server: ServerSection,
    pub upstream: UpstreamSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSection {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub api_key: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamSection {
    pub altinn: UpstreamEndpoint,
    pub org_directory: UpstreamEndpoint,
    pub terms_store: UpstreamEndpoint,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamEndpoint {
    pub endpoint: String,
    pub timeout_seconds: Option<u64>,
    pub retry_attempts: Option<u32>,
}

impl UpstreamEndpoint {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS))
    }

    pub fn retry_attempts(&self) -> u32 {
        self.retry_attempts.unwrap_or(DEFAULT_RETRY_ATTEMPTS)
    }
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(TermsError::Io)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed = Self::substitute_env_vars(content);
        Ok(toml::from_str(&processed)?)
    }

    /// Replace `${VAR_NAME}` placeholders with values from the environment.
    /// Unset variables are left as-is so validation reports them.
    fn substitute_env_vars(content: &str) -> String {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").expect("invalid env var pattern");

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .to_string()
    }

    pub fn host(&self) -> &str {
        self.server.host.as_deref().unwrap_or("0.0.0.0")
    }

    pub fn port(&self) -> u16 {
        self.server.port.unwrap_or(8080)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("server.api_key", &self.server.api_key)?;
        if self.server.api_key.starts_with("${") {
            return Err(TermsError::MissingConfig {
                field: "server.api_key".to_string(),
            });
        }

        for (field, upstream) in [
            ("upstream.altinn", &self.upstream.altinn),
            ("upstream.org_directory", &self.upstream.org_directory),
            ("upstream.terms_store", &self.upstream.terms_store),
        ] {
            validate_url(&format!("{}.endpoint", field), &upstream.endpoint)?;
            if let Some(timeout) = upstream.timeout_seconds {
                validate_positive_number(&format!("{}.timeout_seconds", field), timeout, 1)?;
            }
        }

        Ok(())
    }
}
