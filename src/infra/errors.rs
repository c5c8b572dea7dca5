// src/infra/errors.rs — Error types for projectchat

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChatError {
    // Provider errors (retriable)
    #[error("Provider '{provider}' error: {message}")]
    Provider {
        provider: String,
        message: String,
        retriable: bool,
    },

    #[error("Rate limited by '{provider}', retry after {retry_after_ms}ms")]
    RateLimited {
        provider: String,
        retry_after_ms: u64,
    },

    // Request / data errors
    #[error("Invalid request: {0}")]
    Validation(String),

    #[error("Extraction failed after {attempts} attempt(s): {}", issues.join("; "))]
    ExtractionFailed { attempts: u32, issues: Vec<String> },

    // User errors
    #[error("No provider configured. Set GROQ_API_KEY or the key named in [provider].api_key_env.")]
    NoProvider,

    // Infra
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ChatError {
    pub fn is_retriable(&self) -> bool {
        matches!(
            self,
            ChatError::Provider {
                retriable: true,
                ..
            } | ChatError::RateLimited { .. }
        )
    }
}
