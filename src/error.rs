use thiserror::Error;

pub type Result<T> = std::result::Result<T, FreqError>;

#[derive(Error, Debug)]
pub enum FreqError {
    #[error("Configuration missing: {0}")]
    ConfigurationMissing(String),
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("GitHub API error ({status}): {message}")]
    Api { status: u16, message: String },
    #[error("GitHub is still computing statistics for {0}, rerun in a few seconds")]
    StatsPending(String),
    #[error("Malformed payload: {0}")]
    MalformedPayload(String),
    #[error("No churn recorded: the combined overlay cannot be scaled")]
    DegenerateSeries,
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Settings file error: {0}")]
    Settings(#[from] dotenvy::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl FreqError {
    pub fn malformed(msg: impl Into<String>) -> Self {
        FreqError::MalformedPayload(msg.into())
    }

    pub fn is_configuration(&self) -> bool {
        matches!(self, FreqError::ConfigurationMissing(_) | FreqError::Settings(_))
    }

    /// Fetch failures: transport errors, non-success statuses and pending statistics.
    pub fn is_network(&self) -> bool {
        matches!(
            self,
            FreqError::Http(_) | FreqError::Api { .. } | FreqError::StatsPending(_)
        )
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self, FreqError::MalformedPayload(_))
    }

    /// The only recoverable kind: callers drop the overlay and keep the raw views.
    pub fn is_degenerate(&self) -> bool {
        matches!(self, FreqError::DegenerateSeries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_are_distinguishable() {
        assert!(FreqError::ConfigurationMissing("TOKEN".into()).is_configuration());
        assert!(FreqError::Api { status: 404, message: "Not Found".into() }.is_network());
        assert!(FreqError::StatsPending("a/b".into()).is_network());
        assert!(FreqError::malformed("weeks").is_malformed());
        assert!(FreqError::DegenerateSeries.is_degenerate());
        assert!(!FreqError::DegenerateSeries.is_network());
        assert!(!FreqError::malformed("x").is_degenerate());
    }

    #[test]
    fn api_error_message_includes_status() {
        let err = FreqError::Api { status: 401, message: "Bad credentials".into() };
        assert_eq!(err.to_string(), "GitHub API error (401): Bad credentials");
    }
}
