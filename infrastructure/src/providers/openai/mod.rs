//! OpenAI Chat Completions provider
//!
//! Single-turn generation over `POST {base_url}/v1/chat/completions`.

mod adapter;
mod types;

pub use adapter::OpenAiProviderAdapter;
