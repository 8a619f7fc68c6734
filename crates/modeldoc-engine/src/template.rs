//! Deterministic template fallback
//!
//! Used whenever the Ollama call fails. Same inputs always produce
//! byte-identical output.

use modeldoc_core::Dependency;

/// Render the fallback Markdown document for a model.
pub fn render_template(model_name: &str, sql: &str, dependencies: &[Dependency]) -> String {
    let deps_list = if dependencies.is_empty() {
        "*No dependencies*".to_string()
    } else {
        dependencies
            .iter()
            .map(|dep| format!("- `{}`", dep))
            .collect::<Vec<_>>()
            .join("\n")
    };

    format!(
        r#"# {model_name}

*Auto-generated documentation*

## Overview

This dbt model transforms data for downstream analytics and reporting use.

## Data Sources

### Dependencies

{deps_list}

## SQL Code
```sql
{sql}
```

## Transformation Logic

This model performs the following transformations:
1. Reads from source tables/models
2. Applies business logic and data transformations
3. Outputs a cleaned, structured dataset

## Usage

To use this model in other dbt models:
```sql
select * from {{{{ ref('{model_name}') }}}}
```

## Notes

- Review the SQL code above for detailed transformation logic
- Ensure upstream dependencies are refreshed before running this model
- Test data quality after any changes to this model

---

*Generated by modeldoc (template fallback, Ollama unavailable)*
"#
    )
}
