//! Application configuration. Provider credentials, model names, bind address.

use serde::Deserialize;
use std::time::Duration;

/// Default completion endpoint (OpenRouter, OpenAI-compatible).
pub const DEFAULT_API_URL: &str = "https://openrouter.ai/api/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8000;

pub const DEFAULT_HF_API_URL: &str = "https://api-inference.huggingface.co/models";
pub const DEFAULT_SENTIMENT_MODEL: &str = "distilbert-base-uncased-finetuned-sst-2-english";
pub const DEFAULT_NER_MODEL: &str = "dslim/bert-base-NER";

pub const DEFAULT_DASHBOARD_API_URL: &str = "http://127.0.0.1:8000";

/// Which completion adapter to wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LlmBackend {
    OpenRouter,
    /// Canned replies, no network. Must be selected explicitly.
    Mock,
}

/// Which NLU model provider to wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NluBackend {
    HuggingFace,
    Lexicon,
}

#[derive(Debug, Deserialize, Default)]
pub struct AppConfig {
    // ─────────────────────────────────────────────────────────────────────────
    // Completion provider
    // ─────────────────────────────────────────────────────────────────────────
    /// Bearer credential. Read from FINCHAT_API_KEY or OPENROUTER_API_KEY.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Completions endpoint. Read from FINCHAT_API_URL.
    #[serde(default)]
    pub api_url: Option<String>,

    /// Model identifier. Read from FINCHAT_MODEL or OPENROUTER_MODEL.
    #[serde(default)]
    pub model: Option<String>,

    /// Upstream request timeout in seconds (default 30).
    /// Read from FINCHAT_TIMEOUT_SECS or OPENROUTER_TIMEOUT.
    #[serde(default)]
    pub timeout_secs: Option<u64>,

    /// "openrouter" (default) or "mock". Read from FINCHAT_LLM_BACKEND.
    #[serde(default)]
    pub llm_backend: Option<String>,

    // ─────────────────────────────────────────────────────────────────────────
    // HTTP server
    // ─────────────────────────────────────────────────────────────────────────
    #[serde(default)]
    pub host: Option<String>,

    #[serde(default)]
    pub port: Option<u16>,

    // ─────────────────────────────────────────────────────────────────────────
    // NLU
    // ─────────────────────────────────────────────────────────────────────────
    /// "huggingface" or "lexicon". Defaults to huggingface when a token is set.
    #[serde(default)]
    pub nlu_backend: Option<String>,

    /// Hugging Face Inference API token. Read from FINCHAT_HF_API_TOKEN or HF_API_TOKEN.
    #[serde(default)]
    pub hf_api_token: Option<String>,

    #[serde(default)]
    pub hf_api_url: Option<String>,

    #[serde(default)]
    pub sentiment_model: Option<String>,

    #[serde(default)]
    pub ner_model: Option<String>,

    /// Load both NLU models at startup instead of on first request.
    #[serde(default)]
    pub nlu_preload: Option<bool>,

    // ─────────────────────────────────────────────────────────────────────────
    // Dashboard
    // ─────────────────────────────────────────────────────────────────────────
    /// Base URL of the advisor API the dashboard calls. Read from FINCHAT_DASHBOARD_API_URL.
    #[serde(default)]
    pub dashboard_api_url: Option<String>,
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenv::dotenv().ok();
        let mut c = config::Config::builder();
        c = c.add_source(config::Environment::with_prefix("FINCHAT").try_parsing(true));
        if let Ok(path) = std::env::var("FINCHAT_CONFIG") {
            c = c.add_source(config::File::with_name(&path));
        }
        let mut cfg: Self = c.build()?.try_deserialize()?;
        // OPENROUTER_* names are read directly, without the FINCHAT_ prefix
        if let Ok(key) = std::env::var("OPENROUTER_API_KEY") {
            cfg.api_key = Some(key);
        }
        if let Ok(model) = std::env::var("OPENROUTER_MODEL") {
            cfg.model = Some(model);
        }
        if let Ok(s) = std::env::var("OPENROUTER_TIMEOUT") {
            if let Ok(secs) = s.parse::<u64>() {
                cfg.timeout_secs = Some(secs);
            }
        }
        if cfg.hf_api_token.is_none() {
            cfg.hf_api_token = std::env::var("HF_API_TOKEN").ok();
        }
        Ok(cfg)
    }

    /// Returns the provider credential if set and non-empty.
    pub fn api_key(&self) -> Option<String> {
        self.api_key.clone().filter(|k| !k.trim().is_empty())
    }

    pub fn api_url_or_default(&self) -> String {
        self.api_url
            .clone()
            .unwrap_or_else(|| DEFAULT_API_URL.to_string())
    }

    pub fn model_or_default(&self) -> String {
        self.model
            .clone()
            .unwrap_or_else(|| DEFAULT_MODEL.to_string())
    }

    /// Upstream timeout. Defaults to 30s; zero is treated as unset.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(
            self.timeout_secs
                .filter(|s| *s > 0)
                .unwrap_or(DEFAULT_TIMEOUT_SECS),
        )
    }

    pub fn llm_backend(&self) -> LlmBackend {
        match self.llm_backend.as_deref().map(str::to_lowercase).as_deref() {
            Some("mock") => LlmBackend::Mock,
            _ => LlmBackend::OpenRouter,
        }
    }

    pub fn host_or_default(&self) -> String {
        self.host.clone().unwrap_or_else(|| DEFAULT_HOST.to_string())
    }

    pub fn port_or_default(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }

    pub fn hf_api_token(&self) -> Option<String> {
        self.hf_api_token.clone().filter(|t| !t.trim().is_empty())
    }

    pub fn hf_api_url_or_default(&self) -> String {
        self.hf_api_url
            .clone()
            .unwrap_or_else(|| DEFAULT_HF_API_URL.to_string())
    }

    pub fn sentiment_model_or_default(&self) -> String {
        self.sentiment_model
            .clone()
            .unwrap_or_else(|| DEFAULT_SENTIMENT_MODEL.to_string())
    }

    pub fn ner_model_or_default(&self) -> String {
        self.ner_model
            .clone()
            .unwrap_or_else(|| DEFAULT_NER_MODEL.to_string())
    }

    /// Explicit choice wins; otherwise Hugging Face when a token is available.
    pub fn nlu_backend(&self) -> NluBackend {
        match self.nlu_backend.as_deref().map(str::to_lowercase).as_deref() {
            Some("huggingface") | Some("hf") => NluBackend::HuggingFace,
            Some("lexicon") => NluBackend::Lexicon,
            _ if self.hf_api_token().is_some() => NluBackend::HuggingFace,
            _ => NluBackend::Lexicon,
        }
    }

    pub fn nlu_preload(&self) -> bool {
        self.nlu_preload.unwrap_or(false)
    }

    pub fn dashboard_api_url_or_default(&self) -> String {
        self.dashboard_api_url
            .clone()
            .unwrap_or_else(|| DEFAULT_DASHBOARD_API_URL.to_string())
    }
}
