//! Dependency extraction from dbt SQL models
//!
//! Finds {{ ref('model') }} and {{ source('source', 'table') }} markers with
//! two regex patterns. Purely textual: no validation that the extracted names
//! correspond to real models or sources.

use regex::Regex;

/// A reference to a dbt model or source
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Dependency {
    /// ref('model_name')
    Ref { model_name: String },

    /// source('source_name', 'table_name')
    Source {
        source_name: String,
        table_name: String,
    },
}

impl std::fmt::Display for Dependency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ref { model_name } => write!(f, "{}", model_name),
            Self::Source {
                source_name,
                table_name,
            } => write!(f, "{}.{}", source_name, table_name),
        }
    }
}

/// Extracts dbt dependencies from raw SQL text
pub struct DependencyExtractor {
    ref_pattern: Regex,
    source_pattern: Regex,
}

impl DependencyExtractor {
    /// Create an extractor with the ref() and source() patterns compiled
    pub fn new() -> Self {
        // Both patterns accept single or double quotes, matching dbt usage.
        let ref_pattern = Regex::new(r#"ref\(['"]([^'"]+)['"]\)"#)
            .expect("ref pattern is valid");
        let source_pattern = Regex::new(r#"source\(['"]([^'"]+)['"]\s*,\s*['"]([^'"]+)['"]\)"#)
            .expect("source pattern is valid");

        Self {
            ref_pattern,
            source_pattern,
        }
    }

    /// Extract all dependencies from SQL, deduplicated in first-seen order
    ///
    /// SQL with no reference markers yields an empty vector.
    pub fn extract(&self, sql: &str) -> Vec<Dependency> {
        let mut deps = Vec::new();

        for captures in self.ref_pattern.captures_iter(sql) {
            deps.push(Dependency::Ref {
                model_name: captures[1].to_string(),
            });
        }

        for captures in self.source_pattern.captures_iter(sql) {
            deps.push(Dependency::Source {
                source_name: captures[1].to_string(),
                table_name: captures[2].to_string(),
            });
        }

        let mut seen = std::collections::HashSet::new();
        deps.retain(|dep| seen.insert(dep.clone()));
        deps
    }

    /// Extract dependency names as display strings ("model" or "source.table")
    pub fn extract_names(&self, sql: &str) -> Vec<String> {
        self.extract(sql).iter().map(|d| d.to_string()).collect()
    }
}

impl Default for DependencyExtractor {
    fn default() -> Self {
        Self::new()
    }
}
