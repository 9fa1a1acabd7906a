//! Provider adapters

mod anthropic;
mod base;
mod gemini;
mod huggingface;
mod openai;
mod replicate;

pub use anthropic::AnthropicClient;
pub use base::HttpClientBase;
pub use gemini::GeminiClient;
pub use huggingface::HuggingFaceClient;
pub use openai::OpenAIClient;
pub use replicate::ReplicateClient;
