//! # sheetmorph-cli
//!
//! Command-line surface for sheetmorph: preview a spreadsheet, send it
//! with a natural-language prompt to the transformation service, and
//! show the transformed result alongside the generated code.

use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;
use colored::Colorize;
use indexmap::IndexSet;
use sheetmorph_client::TransformClient;
use sheetmorph_sheet::{PreviewModel, RenderedTable};
use sheetmorph_workflow::{Workflow, WorkflowError};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// sheetmorph - natural-language spreadsheet transformations
#[derive(Parser)]
#[command(name = "sheetmorph")]
#[command(author, version, about = "Transform spreadsheets with natural-language prompts", long_about = None)]
struct Cli {
    /// Spreadsheet to transform (.xlsx, .xls, .xlsm)
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Transformation prompt, e.g. "filter rows where profit > 500"
    #[arg(short, long)]
    prompt: String,

    /// Sheet/tab to transform (defaults to the first sheet)
    #[arg(short, long = "tab-name", value_name = "NAME")]
    tab_name: Option<String>,

    /// Base URL of the transformation service
    /// (falls back to SHEETMORPH_BASE_URL)
    #[arg(long, value_name = "URL")]
    base_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 30, value_name = "SECS")]
    timeout: u64,

    /// Write the transformed file to this path
    #[arg(short, long, value_name = "PATH")]
    save: Option<PathBuf>,

    /// Output format (table, json)
    #[arg(short, long, default_value = "table")]
    format: OutputFormat,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

/// Output format for results.
#[derive(Clone, Copy, Default, clap::ValueEnum)]
enum OutputFormat {
    /// Pretty table output (default)
    #[default]
    Table,
    /// JSON output
    Json,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .init();
    }

    let base_url = cli
        .base_url
        .clone()
        .or_else(|| std::env::var("SHEETMORPH_BASE_URL").ok())
        .unwrap_or_else(|| "http://localhost:8000".to_string());
    let client =
        TransformClient::with_timeout(&base_url, cli.timeout).map_err(|e| anyhow!("{e}"))?;
    tracing::debug!(%base_url, timeout = cli.timeout, "transformation service configured");

    let table_mode = matches!(cli.format, OutputFormat::Table);
    let file_name = cli
        .file
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .with_context(|| format!("not a file: {}", cli.file.display()))?;
    let bytes = std::fs::read(&cli.file)
        .with_context(|| format!("Failed to read file: {}", cli.file.display()))?;

    let mut workflow = Workflow::new();
    match workflow.select_file(file_name, bytes) {
        Ok(()) => {}
        // the file stays selected; the service may still be able to
        // transform what we could not preview
        Err(WorkflowError::DecodePreview { .. }) => {
            if let Some(message) = workflow.error_message() {
                eprintln!("{} {message}", "Warning:".yellow().bold());
            }
        }
        Err(err) => bail!("{err}"),
    }

    if table_mode {
        if let Some(preview) = workflow.input_preview() {
            print_file_details(preview);
            print_table(&preview.render(&IndexSet::new()));
            println!();
        }
    }

    workflow.set_prompt(&cli.prompt);
    if let Some(tab_name) = &cli.tab_name {
        workflow.set_tab_name(tab_name);
    }

    if table_mode {
        println!("{} {}", "Transforming with prompt:".cyan().bold(), cli.prompt);
    }
    workflow.submit(&client).await.map_err(|e| anyhow!("{e}"))?;

    let result = workflow
        .result()
        .cloned()
        .context("transformation finished without a result")?;

    if workflow.load_result_preview(&client).await.is_err() {
        if let Some(message) = workflow.error_message() {
            eprintln!("{} {message}", "Warning:".yellow().bold());
        } else {
            eprintln!(
                "{} the transformed file could not be previewed",
                "Warning:".yellow().bold()
            );
        }
    }

    match cli.format {
        OutputFormat::Table => {
            println!();
            println!("{}", "Transformation successful".green().bold());
            println!(
                "  {} | Size: {} | Dimensions: {} Rows x {} Cols",
                result.output_file_name(),
                format_file_size(result.size),
                result.changes.rows.transformed,
                result.changes.columns.transformed,
            );
            println!("  Download: {}", result.output_url);
            println!();

            if let Some(preview) = workflow.result_preview() {
                let added: IndexSet<String> =
                    result.changes.columns.added.iter().cloned().collect();
                println!("{}", "Transformed preview".bold());
                print_table(&preview.render(&added));
                println!();
            }

            println!("{}", "Generated code".bold());
            println!("{}", result.transformation_code);
        }
        OutputFormat::Json => {
            let document = serde_json::json!({
                "result": result,
                "input_preview": workflow.input_preview(),
                "result_preview": workflow.result_preview(),
            });
            println!("{}", serde_json::to_string_pretty(&document)?);
        }
    }

    if let Some(path) = &cli.save {
        let artifact = client
            .download(&result.output_url)
            .await
            .map_err(|e| anyhow!("{e}"))?;
        std::fs::write(path, artifact)
            .with_context(|| format!("Failed to write file: {}", path.display()))?;
        if table_mode {
            println!();
            println!("{} {}", "Saved to".green().bold(), path.display());
        }
    }

    Ok(())
}

/// Print the input file's name, size and full dimensions.
fn print_file_details(preview: &PreviewModel) {
    println!(
        "{} {}",
        "File Preview:".cyan().bold(),
        preview.source_name().unwrap_or("(unnamed)")
    );
    if let Some(size) = preview.source_size() {
        println!("  Sheet: {}", preview.sheet_name());
        println!("  Size: {}", format_file_size(size));
    }
    println!(
        "  Dimensions: {} Rows x {} Cols",
        preview.total_rows(),
        preview.total_cols()
    );
}

/// Print a bounded preview table, highlighting added columns.
fn print_table(table: &RenderedTable) {
    if table.columns.is_empty() && table.rows.is_empty() {
        println!("  {}", "(empty sheet)".dimmed());
        return;
    }

    let mut widths: Vec<usize> = table.columns.iter().map(|c| c.title.len()).collect();
    for row in &table.rows {
        for (i, cell) in row.iter().enumerate() {
            if i < widths.len() {
                widths[i] = widths[i].max(cell.len());
            }
        }
    }

    let mut header = String::from("  ");
    for (i, column) in table.columns.iter().enumerate() {
        let padded = format!("{:<width$}  ", column.title, width = widths[i]);
        if column.is_new {
            header.push_str(&padded.green().bold().to_string());
        } else {
            header.push_str(&padded.bold().to_string());
        }
    }
    if table.truncated_cols {
        header.push_str(&"...".bold().to_string());
    }
    println!("{}", header.trim_end());

    for row in &table.rows {
        let mut line = String::from("  ");
        for (i, cell) in row.iter().enumerate() {
            let width = widths.get(i).copied().unwrap_or(cell.len());
            let padded = format!("{cell:<width$}  ");
            if table.columns.get(i).is_some_and(|c| c.is_new) {
                line.push_str(&padded.green().to_string());
            } else {
                line.push_str(&padded);
            }
        }
        println!("{}", line.trim_end());
    }

    if let Some(note) = &table.more_rows {
        println!("  {}", note.dimmed());
    }
}

/// Human-readable file size, e.g. `2.5 KB`.
fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let exponent = ((bytes as f64).ln() / 1024f64.ln()).floor() as usize;
    let exponent = exponent.min(UNITS.len() - 1);
    let value = bytes as f64 / 1024f64.powi(exponent as i32);
    let rounded = (value * 100.0).round() / 100.0;

    format!("{} {}", rounded, UNITS[exponent])
}
