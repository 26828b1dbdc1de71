//! Summarization backends and sentence segmentation

pub mod engine;
pub mod huggingface;
pub mod openai;
pub mod splitter;

// Re-export main types for convenience
pub use engine::{EngineHandle, SummarizationEngine, init_engine};
pub use splitter::{SentenceSplitter, UnicodeSentenceSplitter, trim_to_sentences};
