//! Prompt construction for model documentation

use modeldoc_core::Dependency;

/// Build the instruction prompt for a dbt model.
///
/// Embeds the model name, the full SQL verbatim, and a comma-joined dependency
/// list, then asks for seven named documentation sections in Markdown. The SQL
/// is never truncated; oversized models surface as a generation failure and
/// fall back to the template.
pub fn build_prompt(model_name: &str, sql: &str, dependencies: &[Dependency]) -> String {
    let deps_text = if dependencies.is_empty() {
        "None".to_string()
    } else {
        dependencies
            .iter()
            .map(|d| d.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    };

    format!(
        r#"You are a technical documentation expert. Generate comprehensive documentation for this dbt SQL model.

Model Name: {model_name}

SQL Code:
```sql
{sql}
```

Dependencies: {deps_text}

Generate documentation with these sections:

1. **Overview** (2-3 sentences explaining what this model does)
2. **Business Purpose** (Why this model exists, what business need it serves)
3. **Data Sources** (What tables/models it reads from)
4. **Transformation Logic** (Step-by-step explanation of the SQL transformations)
5. **Output Schema** (Description of output columns)
6. **Usage Examples** (How to use this model in downstream queries)
7. **Data Quality Notes** (Any important caveats or quality considerations)

Format the documentation in clean Markdown. Be specific and technical but also accessible to new team members.
"#
    )
}
