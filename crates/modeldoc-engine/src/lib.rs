//! Modeldoc engine - documentation generation pipeline
//!
//! This crate implements the per-file pipeline:
//! - Read the SQL model and extract its dependencies
//! - Attempt LLM generation via Ollama
//! - Fall back to the deterministic template on failure
//! - Write the Markdown artifact next to the source file

pub mod pipeline;
pub mod template;

pub use pipeline::{DocOutcome, DocPipeline, DocSource, PipelineError};
pub use template::render_template;
