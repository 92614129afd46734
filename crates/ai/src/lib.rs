//! Text-generation providers and the reporting assistant built on them.
//!
//! [`AiService`] is the only entry point the HTTP layer uses. Generation
//! features (interview questions, outreach emails, editorial review) never
//! fail: when no provider is configured, or the provider errors, or its
//! output cannot be parsed, a deterministic fallback is returned with
//! `ai_generated = false`. Web search is the exception and reports
//! [`AiError`] to the caller.

pub mod config;
pub mod error;
pub mod extract;
pub mod fallback;
pub mod gemini;
pub mod perplexity;
pub mod prompts;
pub mod provider;
pub mod service;
pub mod types;

pub use config::AiConfig;
pub use error::AiError;
pub use provider::{Completion, TextGenerator};
pub use service::AiService;
