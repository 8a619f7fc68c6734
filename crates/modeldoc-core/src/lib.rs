//! Modeldoc Core
//!
//! Core domain model shared by the other crates:
//! - Configuration (modeldoc.toml)
//! - Dependency extraction from dbt SQL models

pub mod config;
pub mod deps;

pub use config::{Config, ConfigError, OllamaConfig};
pub use deps::{Dependency, DependencyExtractor};
