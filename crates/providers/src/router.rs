//! Provider router — selects the correct LLM provider based on config.
//!
//! The agent and the tools may talk to different backends (the defaults
//! are OpenAI for the agent and Groq for the tools), so the router holds
//! every provider either role refers to.

use std::collections::HashMap;
use std::sync::Arc;

use pagewright_config::AppConfig;
use pagewright_core::provider::Provider;

use crate::openai_compat::OpenAiCompatProvider;

/// Routes LLM requests to the correct provider.
pub struct ProviderRouter {
    providers: HashMap<String, Arc<dyn Provider>>,
}

impl ProviderRouter {
    pub fn new() -> Self {
        Self {
            providers: HashMap::new(),
        }
    }

    /// Register a provider.
    pub fn register(&mut self, name: impl Into<String>, provider: Arc<dyn Provider>) {
        self.providers.insert(name.into(), provider);
    }

    /// Get a specific provider by name.
    pub fn get(&self, name: &str) -> Option<Arc<dyn Provider>> {
        self.providers.get(name).cloned()
    }

    /// List all registered provider names.
    pub fn list(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.providers.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }
}

impl Default for ProviderRouter {
    fn default() -> Self {
        Self::new()
    }
}

/// Build providers from configuration.
///
/// Registers the agent provider and the tools provider. A `[providers.<name>]`
/// table overrides the endpoint and key for that name.
pub fn build_from_config(config: &AppConfig) -> ProviderRouter {
    let mut router = ProviderRouter::new();

    let roles = [
        (&config.agent.provider, &config.agent.api_key),
        (&config.tools.provider, &config.tools.api_key),
    ];

    for (name, role_key) in roles {
        if router.get(name).is_some() {
            continue;
        }

        let overrides = config.providers.get(name.as_str());
        let api_key = overrides
            .and_then(|p| p.api_key.clone())
            .or_else(|| role_key.clone())
            .unwrap_or_default();
        let base_url = overrides
            .and_then(|p| p.api_url.clone())
            .unwrap_or_else(|| default_base_url(name));

        tracing::debug!(provider = %name, url = %base_url, "Registering provider");
        router.register(
            name.clone(),
            Arc::new(OpenAiCompatProvider::new(name, &base_url, &api_key)),
        );
    }

    router
}

/// Get the default base URL for well-known providers.
fn default_base_url(provider_name: &str) -> String {
    match provider_name {
        "openai" => "https://api.openai.com/v1".into(),
        "groq" => "https://api.groq.com/openai/v1".into(),
        "openrouter" => "https://openrouter.ai/api/v1".into(),
        "ollama" => "http://localhost:11434/v1".into(),
        "deepseek" => "https://api.deepseek.com/v1".into(),
        "together" => "https://api.together.xyz/v1".into(),
        "vllm" => "http://localhost:8000/v1".into(),
        "llamacpp" | "llama.cpp" => "http://localhost:8080/v1".into(),
        _ => format!("https://{provider_name}.api.example.com/v1"),
    }
}
