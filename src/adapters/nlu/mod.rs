//! NLU adapter module. Implements TextAnalyzer over pluggable model providers.
//!
//! Provides the lazy pipeline, a Hugging Face Inference API provider and an
//! offline lexicon provider.

pub mod huggingface;
pub mod lexicon;
pub mod pipeline;

pub use huggingface::HfModelProvider;
pub use lexicon::LexiconModelProvider;
pub use pipeline::NluPipeline;
