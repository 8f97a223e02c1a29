//! Domain error types.

/// Top-level error type for sigtrader.
#[derive(Debug, thiserror::Error)]
pub enum SigtraderError {
    #[error("insufficient data for {symbol}: have {bars} bars, need {minimum}")]
    InsufficientData {
        symbol: String,
        bars: usize,
        minimum: usize,
    },

    #[error("{provider} unavailable for {symbol}: {reason}")]
    ProviderUnavailable {
        provider: String,
        symbol: String,
        reason: String,
    },

    #[error("malformed {provider} response for {symbol}: {reason}")]
    MalformedResponse {
        provider: String,
        symbol: String,
        reason: String,
    },

    #[error("not found: {what}")]
    NotFound { what: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

impl SigtraderError {
    pub fn unavailable(provider: &str, symbol: &str, reason: impl Into<String>) -> Self {
        SigtraderError::ProviderUnavailable {
            provider: provider.to_string(),
            symbol: symbol.to_string(),
            reason: reason.into(),
        }
    }

    pub fn malformed(provider: &str, symbol: &str, reason: impl Into<String>) -> Self {
        SigtraderError::MalformedResponse {
            provider: provider.to_string(),
            symbol: symbol.to_string(),
            reason: reason.into(),
        }
    }

    pub fn config_invalid(section: &str, key: &str, reason: impl Into<String>) -> Self {
        SigtraderError::ConfigInvalid {
            section: section.to_string(),
            key: key.to_string(),
            reason: reason.into(),
        }
    }

    /// Provider failures and malformed responses are isolated per symbol.
    pub fn is_provider_failure(&self) -> bool {
        matches!(
            self,
            SigtraderError::ProviderUnavailable { .. } | SigtraderError::MalformedResponse { .. }
        )
    }
}

impl From<&SigtraderError> for std::process::ExitCode {
    fn from(err: &SigtraderError) -> Self {
        let code: u8 = match err {
            SigtraderError::Io(_) => 1,
            SigtraderError::ConfigParse { .. } | SigtraderError::ConfigInvalid { .. } => 2,
            SigtraderError::ProviderUnavailable { .. }
            | SigtraderError::MalformedResponse { .. } => 3,
            SigtraderError::NotFound { .. } | SigtraderError::InsufficientData { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}
