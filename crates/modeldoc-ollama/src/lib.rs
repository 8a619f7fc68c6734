//! Ollama text generation
//!
//! This crate handles:
//! - Building the documentation prompt for a dbt model
//! - Calling the Ollama /api/generate endpoint (blocking, single attempt)

pub mod client;
pub mod prompt;

pub use client::{GenerateError, OllamaClient};
pub use prompt::build_prompt;
