use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::{Path, PathBuf};

use modeldoc_core::{Config, DependencyExtractor};
use modeldoc_engine::{DocPipeline, DocSource};

/// modeldoc - Markdown documentation generator for dbt SQL models
#[derive(Parser)]
#[command(name = "modeldoc")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to config file (default: modeldoc.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate documentation for changed SQL models
    Generate {
        /// Model files to document (default: the CHANGED_FILES environment variable)
        files: Vec<PathBuf>,

        /// Document every *.sql file under this directory instead
        #[arg(long)]
        models_dir: Option<PathBuf>,
    },

    /// Print the dependencies extracted from one model file
    Deps {
        /// SQL model file to inspect
        file: PathBuf,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // Load config if specified
    let mut config = if let Some(config_path) = &cli.config {
        Config::from_file(config_path)?
    } else if Path::new("modeldoc.toml").exists() {
        Config::from_file(Path::new("modeldoc.toml"))?
    } else {
        if cli.verbose {
            eprintln!("{}", "No config file found, using defaults".yellow());
        }
        Config::default()
    };

    // OLLAMA_HOST wins over the config file, matching the dbt CI setup.
    if let Ok(host) = std::env::var("OLLAMA_HOST") {
        config = config.with_host(host);
    }

    if cli.verbose {
        eprintln!("{} {}", "Using endpoint:".cyan(), config.ollama.host);
        eprintln!("{} {}", "Using model:".cyan(), config.ollama.model);
    }

    match cli.command {
        Commands::Generate { files, models_dir } => {
            generate_command(&config, &files, models_dir.as_deref(), cli.verbose)
        }
        Commands::Deps { file } => deps_command(&file),
    }
}

/// Generate command - document each listed model, best effort.
///
/// Failures in one file never halt the rest, and no failure propagates to the
/// process exit code.
fn generate_command(
    config: &Config,
    files: &[PathBuf],
    models_dir: Option<&Path>,
    verbose: bool,
) -> Result<()> {
    let changed_files = std::env::var("CHANGED_FILES").ok();
    let files = collect_model_files(files, models_dir, changed_files.as_deref());

    if files.is_empty() {
        println!("No SQL files changed");
        return Ok(());
    }

    let pipeline = DocPipeline::new(config)?;

    let mut generated = 0;
    let mut fell_back = 0;
    let mut skipped = 0;

    for file in &files {
        println!("\n{}", "=".repeat(70).bright_blue());
        println!("{} {}", "Processing:".bold(), file.display());
        println!("{}", "=".repeat(70).bright_blue());

        match pipeline.process_file(file) {
            Ok(outcome) => {
                if verbose && !outcome.dependencies.is_empty() {
                    println!(
                        "  {} {}",
                        "Dependencies:".cyan(),
                        outcome.dependencies.join(", ")
                    );
                }

                match outcome.source {
                    DocSource::Ollama => {
                        println!(
                            "{} {} -> {}",
                            "✓ Generated:".green().bold(),
                            outcome.model_name,
                            outcome.output_path.display()
                        );
                        generated += 1;
                    }
                    DocSource::Template => {
                        println!(
                            "{} {} -> {}",
                            "⚠ Template fallback:".yellow().bold(),
                            outcome.model_name,
                            outcome.output_path.display()
                        );
                        fell_back += 1;
                    }
                }
            }
            Err(err) => {
                println!("{} {}", "✗ Skipped:".red().bold(), err);
                skipped += 1;
            }
        }
    }

    println!("\n{}", "=".repeat(70).bright_blue());
    println!(
        "{} {} generated, {} template fallback, {} skipped",
        "Done:".bold(),
        generated,
        fell_back,
        skipped
    );
    println!("{}", "=".repeat(70).bright_blue());

    Ok(())
}

/// Deps command - show extracted dependencies for one model
fn deps_command(file: &Path) -> Result<()> {
    let sql = std::fs::read_to_string(file)?;
    let extractor = DependencyExtractor::new();
    let deps = extractor.extract_names(&sql);

    if deps.is_empty() {
        println!("{}", "No dependencies found".yellow());
    } else {
        println!("{}", "Dependencies:".bold());
        for dep in deps {
            println!("  - {}", dep.green());
        }
    }

    Ok(())
}

/// Resolve the list of model files to document.
///
/// Precedence: --models-dir scan, then positional arguments, then the
/// whitespace-separated `changed_files` value (read from CHANGED_FILES by the
/// caller, so this stays testable without environment mutation). Non-SQL
/// paths are dropped in every case.
fn collect_model_files(
    files: &[PathBuf],
    models_dir: Option<&Path>,
    changed_files: Option<&str>,
) -> Vec<PathBuf> {
    if let Some(dir) = models_dir {
        return walkdir::WalkDir::new(dir)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .map(|entry| entry.into_path())
            .filter(|path| is_sql_file(path))
            .collect();
    }

    let listed: Vec<PathBuf> = if files.is_empty() {
        changed_files
            .unwrap_or_default()
            .split_whitespace()
            .map(PathBuf::from)
            .collect()
    } else {
        files.to_vec()
    };

    listed.into_iter().filter(|p| is_sql_file(p)).collect()
}

fn is_sql_file(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some("sql")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn sql_extension_filter() {
        assert!(is_sql_file(Path::new("models/stg_orders.sql")));
        assert!(!is_sql_file(Path::new("models/schema.yml")));
        assert!(!is_sql_file(Path::new("README.md")));
        assert!(!is_sql_file(Path::new("no_extension")));
    }

    #[test]
    fn non_sql_paths_are_dropped() {
        let files = vec![
            PathBuf::from("a.sql"),
            PathBuf::from("b.yml"),
            PathBuf::from("c.sql"),
        ];
        let collected = collect_model_files(&files, None, None);
        assert_eq!(collected, vec![PathBuf::from("a.sql"), PathBuf::from("c.sql")]);
    }

    #[test]
    fn empty_input_yields_no_files() {
        assert!(collect_model_files(&[], None, None).is_empty());
        assert!(collect_model_files(&[], None, Some("")).is_empty());
        assert!(collect_model_files(&[], None, Some("   \n  ")).is_empty());
    }

    #[test]
    fn changed_files_splits_on_whitespace_and_filters() {
        let collected = collect_model_files(
            &[],
            None,
            Some("models/stg_orders.sql  models/schema.yml\nmodels/fct_orders.sql"),
        );
        assert_eq!(
            collected,
            vec![
                PathBuf::from("models/stg_orders.sql"),
                PathBuf::from("models/fct_orders.sql"),
            ]
        );
    }

    #[test]
    fn positional_files_win_over_changed_files() {
        let files = vec![PathBuf::from("explicit.sql")];
        let collected = collect_model_files(&files, None, Some("from_env.sql"));
        assert_eq!(collected, vec![PathBuf::from("explicit.sql")]);
    }

    #[test]
    fn models_dir_scan_finds_nested_sql() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("staging")).unwrap();
        std::fs::write(dir.path().join("staging/stg_orders.sql"), "select 1").unwrap();
        std::fs::write(dir.path().join("schema.yml"), "version: 2").unwrap();

        let collected = collect_model_files(&[], Some(dir.path()), None);
        assert_eq!(collected, vec![dir.path().join("staging/stg_orders.sql")]);
    }
}
