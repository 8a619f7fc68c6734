//! Per-file documentation pipeline

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use modeldoc_core::{Config, DependencyExtractor};
use modeldoc_ollama::{build_prompt, GenerateError, OllamaClient};

use crate::template::render_template;

/// Which path produced the documentation artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocSource {
    /// Text returned by the Ollama endpoint
    Ollama,

    /// Deterministic template fallback
    Template,
}

/// Result of processing one model file
#[derive(Debug, Clone)]
pub struct DocOutcome {
    /// Model name (file base name, extension stripped)
    pub model_name: String,

    /// Where the Markdown artifact was written
    pub output_path: PathBuf,

    /// Which generation path succeeded
    pub source: DocSource,

    /// Dependencies extracted from the SQL
    pub dependencies: Vec<String>,
}

/// Error from the pipeline's own I/O steps.
///
/// Generation failure is not represented here: it is absorbed by the template
/// fallback, so only unreadable sources and unwritable destinations surface.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Documentation pipeline for dbt SQL models.
///
/// Two states per file: attempt generation, then fall back or finish. There is
/// exactly one fallback branch; a generation failure is never retried.
pub struct DocPipeline {
    extractor: DependencyExtractor,
    client: OllamaClient,
}

impl DocPipeline {
    /// Build a pipeline from explicit configuration.
    pub fn new(config: &Config) -> Result<Self, GenerateError> {
        Ok(Self {
            extractor: DependencyExtractor::new(),
            client: OllamaClient::new(&config.ollama)?,
        })
    }

    /// Generate documentation for one model file.
    ///
    /// Reads the SQL, extracts dependencies, attempts Ollama generation and
    /// falls back to the template on any generation failure. The artifact is
    /// written to the sibling `.md` path, creating parent directories as
    /// needed. Only I/O failures are returned; they abort this file, not the
    /// run.
    pub fn process_file(&self, path: &Path) -> Result<DocOutcome, PipelineError> {
        let sql = std::fs::read_to_string(path).map_err(|source| PipelineError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let model_name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("unknown")
            .to_string();

        let dependencies = self.extractor.extract(&sql);
        debug!(
            model = %model_name,
            dependencies = dependencies.len(),
            "extracted dependencies"
        );

        let prompt = build_prompt(&model_name, &sql, &dependencies);

        let (documentation, source) = match self.client.generate(&prompt) {
            Ok(text) => (text, DocSource::Ollama),
            Err(err) => {
                warn!(model = %model_name, "generation failed, using template fallback: {err}");
                (
                    render_template(&model_name, &sql, &dependencies),
                    DocSource::Template,
                )
            }
        };

        let output_path = path.with_extension("md");
        if let Some(parent) = output_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|source| PipelineError::Write {
                    path: output_path.clone(),
                    source,
                })?;
            }
        }

        std::fs::write(&output_path, &documentation).map_err(|source| PipelineError::Write {
            path: output_path.clone(),
            source,
        })?;

        debug!(path = %output_path.display(), source = ?source, "documentation written");

        Ok(DocOutcome {
            model_name,
            output_path,
            source,
            dependencies: dependencies.iter().map(|d| d.to_string()).collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use modeldoc_core::config::OllamaConfig;

    fn offline_config() -> Config {
        // Port 1 refuses connections, so every generation attempt fails fast.
        Config {
            ollama: OllamaConfig {
                host: "http://127.0.0.1:1".to_string(),
                timeout_secs: 2,
                ..OllamaConfig::default()
            },
        }
    }

    #[test]
    fn unreadable_file_is_read_error() {
        let pipeline = DocPipeline::new(&offline_config()).unwrap();
        let err = pipeline
            .process_file(Path::new("/nonexistent/model.sql"))
            .unwrap_err();
        assert!(matches!(err, PipelineError::Read { .. }));
    }

    #[test]
    fn fallback_writes_template_artifact() {
        let dir = tempfile::TempDir::new().unwrap();
        let sql_path = dir.path().join("stg_orders.sql");
        std::fs::write(&sql_path, "select * from {{ref('raw_orders')}}").unwrap();

        let pipeline = DocPipeline::new(&offline_config()).unwrap();
        let outcome = pipeline.process_file(&sql_path).unwrap();

        assert_eq!(outcome.model_name, "stg_orders");
        assert_eq!(outcome.source, DocSource::Template);
        assert_eq!(outcome.output_path, dir.path().join("stg_orders.md"));
        assert_eq!(outcome.dependencies, vec!["raw_orders"]);

        let doc = std::fs::read_to_string(&outcome.output_path).unwrap();
        assert!(doc.contains("# stg_orders"));
        assert!(doc.contains("- `raw_orders`"));
    }
}
