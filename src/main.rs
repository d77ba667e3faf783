//! Wiring & DI. Entry point: bootstrap adapters, inject into the advisor, serve HTTP.
//! No business logic here.

use dotenv::dotenv;
use finchat::adapters::ai::{MockCompletionAdapter, OpenRouterAdapter};
use finchat::adapters::http::{ApiServer, AppState};
use finchat::adapters::nlu::{HfModelProvider, LexiconModelProvider, NluPipeline};
use finchat::ports::{CompletionPort, ModelProvider, TextAnalyzer};
use finchat::shared::config::{AppConfig, LlmBackend, NluBackend};
use finchat::usecases::AdvisorService;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let env_loaded = dotenv();
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    match &env_loaded {
        Ok(path) => info!(path = %path.display(), "loaded .env"),
        Err(_) => info!(cwd = %cwd.display(), "no .env found (check CWD)"),
    }

    let cfg = AppConfig::load().map_err(|e| anyhow::anyhow!("invalid configuration: {}", e))?;

    // --- Completion provider ---
    let completion: Arc<dyn CompletionPort> = match cfg.llm_backend() {
        LlmBackend::Mock => {
            warn!("FINCHAT_LLM_BACKEND=mock: answers are canned, no provider is called");
            Arc::new(MockCompletionAdapter::new())
        }
        LlmBackend::OpenRouter => {
            if cfg.api_key().is_none() {
                error!(
                    "no completion API key (FINCHAT_API_KEY / OPENROUTER_API_KEY); \
                     LLM endpoints will fail until one is set"
                );
            }
            info!(
                model = %cfg.model_or_default(),
                url = %cfg.api_url_or_default(),
                timeout_secs = cfg.timeout().as_secs(),
                "completion provider configured"
            );
            Arc::new(
                OpenRouterAdapter::new(
                    cfg.api_url_or_default(),
                    cfg.api_key(),
                    cfg.model_or_default(),
                    cfg.timeout(),
                )
                .map_err(|e| anyhow::anyhow!("{}", e))?,
            )
        }
    };

    // --- NLU ---
    let provider: Arc<dyn ModelProvider> = match cfg.nlu_backend() {
        NluBackend::HuggingFace => {
            info!(
                sentiment_model = %cfg.sentiment_model_or_default(),
                ner_model = %cfg.ner_model_or_default(),
                "NLU via Hugging Face Inference API"
            );
            Arc::new(
                HfModelProvider::new(
                    cfg.hf_api_url_or_default(),
                    cfg.hf_api_token(),
                    cfg.sentiment_model_or_default(),
                    cfg.ner_model_or_default(),
                    cfg.timeout(),
                )
                .map_err(|e| anyhow::anyhow!("{}", e))?,
            )
        }
        NluBackend::Lexicon => {
            info!("NLU via offline lexicon (set HF_API_TOKEN for hosted models)");
            Arc::new(LexiconModelProvider::new())
        }
    };
    let pipeline = Arc::new(NluPipeline::new(provider));
    if cfg.nlu_preload() {
        // A failed warm-up is not fatal: the first request retries the load.
        if let Err(e) = pipeline.warm_up().await {
            warn!(error = %e, "NLU preload failed");
        }
    }
    let analyzer: Arc<dyn TextAnalyzer> = pipeline;

    // --- Advisor + HTTP ---
    let advisor = Arc::new(AdvisorService::new(completion, analyzer));
    let server = ApiServer::new(
        cfg.host_or_default(),
        cfg.port_or_default(),
        AppState::new(advisor),
    );

    server.start().await
}
