// src/provider/resolver.rs — Build the configured provider from config + environment

use std::sync::Arc;

use super::openai_compat::OpenAICompatProvider;
use super::retry::RetryProvider;
use super::ModelProvider;
use crate::infra::config::ProviderConfig;
use crate::infra::errors::ChatError;

/// The resolved provider plus the model id to send with each request.
pub struct ResolvedProvider {
    pub provider: Arc<dyn ModelProvider>,
    pub model: String,
}

/// Resolve the provider described in `[provider]`, wrapped with retry.
///
/// The API key is read from the environment variable named in the config
/// (GROQ_API_KEY by default). GROQ_MODEL_NAME overrides the configured model,
/// mirroring the original deployment's environment contract.
pub fn resolve(config: &ProviderConfig) -> Result<ResolvedProvider, ChatError> {
    let api_key = std::env::var(&config.api_key_env)
        .ok()
        .filter(|k| !k.trim().is_empty())
        .ok_or(ChatError::NoProvider)?;

    let model = std::env::var("GROQ_MODEL_NAME")
        .ok()
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| config.model.clone());

    if config.base_url.trim().is_empty() {
        return Err(ChatError::Config("[provider].base_url is empty".into()));
    }

    let inner = OpenAICompatProvider::new(
        config.name.clone(),
        config.name.clone(),
        api_key,
        config.base_url.trim_end_matches('/').to_string(),
    );

    Ok(ResolvedProvider {
        provider: Arc::new(RetryProvider::new(Arc::new(inner))),
        model,
    })
}
