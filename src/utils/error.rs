use thiserror::Error;

#[derive(Error, Debug)]
pub enum TermsError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{service} responded with status {status}")]
    Upstream { service: &'static str, status: u16 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfig { field: String },
}

impl TermsError {
    /// Transient failures are worth a retry at the client and map to 502
    /// at the gateway; everything else is a plain 500.
    pub fn is_transient(&self) -> bool {
        match self {
            TermsError::Http(e) => e.is_timeout() || e.is_connect(),
            TermsError::Upstream { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, TermsError>;
