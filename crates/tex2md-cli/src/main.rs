//! tex2md: CLI tool to convert LaTeX documents to Markdown

mod config;

use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::path::{Path, PathBuf};

use config::Config;
use tex2md_batch::{BatchOptions, convert_directory};

#[derive(Parser, Debug)]
#[command(name = "tex2md")]
#[command(about = "Convert LaTeX documents to Markdown")]
#[command(version)]
#[command(after_help = "Examples:
  tex2md paper.tex                  # Convert single file to paper.md
  tex2md paper.tex -o out.md        # Convert to specific output file
  tex2md papers/ -o docs/           # Convert directory
  tex2md papers/ -o docs/ -j4       # Use 4 parallel jobs")]
struct Cli {
    /// Input .tex file or directory
    #[arg(required_unless_present = "schema")]
    input: Option<PathBuf>,

    /// Output file or directory
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Number of parallel jobs (defaults to number of CPUs)
    #[arg(short, long)]
    jobs: Option<usize>,

    /// Process directories recursively
    #[arg(short, long)]
    recursive: bool,

    /// File extension for output files
    #[arg(long)]
    extension: Option<String>,

    /// Print the batch summary as JSON
    #[arg(long)]
    json: bool,

    /// Print the JSON schema for the configuration file and exit
    #[arg(long)]
    schema: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Quiet mode - only show errors
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.schema {
        println!("{}", Config::json_schema_string()?);
        return Ok(());
    }

    let Some(input) = cli.input.clone() else {
        anyhow::bail!("Input path is required");
    };

    if input.is_file() {
        let config = load_config(input.parent().unwrap_or(Path::new(".")))?;
        convert_single(&input, &cli, &config)?;
    } else if input.is_dir() {
        let config = load_config(&input)?;
        convert_batch(&input, &cli, &config)?;
    } else {
        anyhow::bail!("Input path does not exist: {}", input.display());
    }

    Ok(())
}

/// Load `_tex2md.toml` from the given directory, falling back to defaults
fn load_config(dir: &Path) -> Result<Config> {
    Ok(Config::load_from_dir(dir)?.unwrap_or_default())
}

/// Output extension, with CLI flag taking precedence over the config file
fn output_extension(cli: &Cli, config: &Config) -> String {
    cli.extension
        .clone()
        .or_else(|| config.output.extension.clone())
        .unwrap_or_else(|| "md".to_string())
}

/// Convert a single .tex file
fn convert_single(input: &Path, cli: &Cli, config: &Config) -> Result<()> {
    let output_path = match &cli.output {
        Some(p) => p.clone(),
        None => input.with_extension(output_extension(cli, config)),
    };

    if cli.verbose {
        eprintln!(
            "Converting: {} -> {}",
            input.display(),
            output_path.display()
        );
    }

    let content = fs::read_to_string(input)
        .with_context(|| format!("Failed to read: {}", input.display()))?;

    let markdown = tex2md_core::convert(&content);

    if let Some(parent) = output_path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    fs::write(&output_path, markdown)
        .with_context(|| format!("Failed to write: {}", output_path.display()))?;

    if !cli.quiet {
        println!("{}", output_path.display());
    }

    Ok(())
}

/// Convert a directory of .tex files
fn convert_batch(input: &Path, cli: &Cli, config: &Config) -> Result<()> {
    // Configure thread pool if jobs specified
    if let Some(n) = cli.jobs.or(config.batch.jobs) {
        rayon::ThreadPoolBuilder::new()
            .num_threads(n)
            .build_global()
            .ok(); // Ignore error if already initialized
    }

    let options = BatchOptions {
        output_dir: cli.output.clone(),
        output_extension: output_extension(cli, config),
        recursive: cli.recursive || config.batch.recursive.unwrap_or(false),
    };

    let summary = convert_directory(input, &options)
        .with_context(|| format!("Failed to convert directory: {}", input.display()))?;

    if summary.total() == 0 {
        if !cli.quiet {
            eprintln!("No .tex files found in {}", input.display());
        }
        return Ok(());
    }

    if cli.verbose {
        eprintln!("Found {} .tex files", summary.total());
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else if !cli.quiet {
        for path in &summary.converted {
            println!("{}", path.display());
        }
    }

    for failure in &summary.failures {
        eprintln!("Error converting {}: {}", failure.file.display(), failure.message);
    }

    if !cli.quiet {
        eprintln!(
            "Converted {} files, {} failed",
            summary.converted.len(),
            summary.failures.len()
        );
    }

    if !summary.failures.is_empty() {
        anyhow::bail!("{} files failed to convert", summary.failures.len());
    }

    Ok(())
}
