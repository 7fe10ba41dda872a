//! `pagewright build` — Build one page from a request.

use std::sync::Arc;

use pagewright_agent::{PageAgent, PageAssembler, RunStatus, build_page};
use pagewright_config::AppConfig;
use pagewright_core::event::{DomainEvent, EventBus};
use pagewright_providers::ModelGateway;
use pagewright_providers::router::{ProviderRouter, build_from_config};
use pagewright_store::PageStore;
use pagewright_tools::{FinalReviewer, default_registry};
use tracing::debug;

/// Providers that run locally and take no key.
const KEYLESS_PROVIDERS: &[&str] = &["ollama", "vllm", "llamacpp", "llama.cpp"];

pub async fn run(query: &str, name: &str) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;
    check_keys(&config)?;

    let router = build_from_config(&config);
    let event_bus = Arc::new(EventBus::default());
    let (agent, assembler) = components(&config, &router, event_bus.clone())?;

    let mut events = event_bus.subscribe();
    let progress = tokio::spawn(async move {
        while let Ok(event) = events.recv().await {
            if let DomainEvent::ToolExecuted {
                tool_name,
                success,
                duration_ms,
                ..
            } = event.as_ref()
            {
                let mark = if *success { "✅" } else { "❌" };
                println!("  {mark} {tool_name} ({duration_ms} ms)");
            }
        }
    });

    let store = PageStore::open(&config.pages.dir)?;
    println!("🛠  Building \"{}\"...", name.trim());
    let result = build_page(store, &agent, &assembler, query, name).await;
    progress.abort();

    let (_, report) = result?;
    match report.status {
        RunStatus::Completed => {
            println!(
                "\n🎉 Page '{}' created at {} ({} elements)",
                report.page_name,
                report.path.display(),
                report.element_count
            );
        }
        RunStatus::Incomplete => {
            println!(
                "\n⚠️  The model did not finish within {} turns.",
                report.iterations
            );
            println!(
                "   Saved what was generated to {} ({} elements).",
                report.path.display(),
                report.element_count
            );
        }
    }

    Ok(())
}

/// Wire the build loop and assembler from configuration.
pub fn components(
    config: &AppConfig,
    router: &ProviderRouter,
    event_bus: Arc<EventBus>,
) -> Result<(PageAgent, PageAssembler), Box<dyn std::error::Error>> {
    let agent_provider = router
        .get(&config.agent.provider)
        .ok_or_else(|| format!("Provider '{}' is not configured", config.agent.provider))?;
    let tools_provider = router
        .get(&config.tools.provider)
        .ok_or_else(|| format!("Provider '{}' is not configured", config.tools.provider))?;

    let agent_gateway = Arc::new(
        ModelGateway::new(
            agent_provider,
            &config.agent.model,
            config.agent.temperature,
        )
        .with_max_tokens(config.agent.max_tokens),
    );
    let tools_gateway = Arc::new(
        ModelGateway::new(
            tools_provider,
            &config.tools.model,
            config.tools.temperature,
        )
        .with_max_tokens(config.tools.max_tokens),
    );

    debug!(
        agent = %format!("{}/{}", agent_gateway.provider_name(), agent_gateway.model()),
        tools = %format!("{}/{}", tools_gateway.provider_name(), tools_gateway.model()),
        "Model gateways ready"
    );

    let tools = Arc::new(default_registry(
        tools_gateway.clone(),
        config.tools.essay_words,
    ));
    let agent = PageAgent::new(agent_gateway, tools, event_bus)
        .with_max_iterations(config.agent.max_iterations);
    let assembler = PageAssembler::new(FinalReviewer::new(tools_gateway))
        .with_normalize_empty(config.pages.normalize_empty_code);

    Ok((agent, assembler))
}

fn check_keys(config: &AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let roles = [
        ("agent", &config.agent.provider, &config.agent.api_key, "PAGEWRIGHT_API_KEY or OPENAI_API_KEY"),
        ("tools", &config.tools.provider, &config.tools.api_key, "GROQ_API_KEY"),
    ];

    for (role, provider, key, env) in roles {
        let has_override = config
            .providers
            .get(provider.as_str())
            .is_some_and(|p| p.api_key.is_some());
        if key.is_some() || has_override || KEYLESS_PROVIDERS.contains(&provider.as_str()) {
            continue;
        }

        eprintln!();
        eprintln!("  ERROR: No API key configured for the {role} model ({provider})!");
        eprintln!();
        eprintln!("  Set {env}, or add it to your config file:");
        eprintln!("    {}", AppConfig::config_dir().join("config.toml").display());
        eprintln!();
        return Err(format!("No API key found for {role}. See above for setup instructions.").into());
    }

    Ok(())
}
