//! Completion adapter module. Implements CompletionPort for LLM integration.
//!
//! Provides OpenRouter (OpenAI-compatible) adapter and mock adapter for testing.

pub mod mock_adapter;
pub mod openrouter_adapter;

pub use mock_adapter::MockCompletionAdapter;
pub use openrouter_adapter::OpenRouterAdapter;
