//! Trellis CLI — tabular exports in, graph record streams out.
//!
//! Usage:
//!   trellis merge [--data-dir DIR] [--plan FILE] [--out FILE]
//!   trellis export --config FILE [--out-dir DIR]

use clap::{Parser, Subcommand};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use trellis::writer::{write_edges, write_nodes};
use trellis::{AdapterConfig, DatasetProfile, JsonLinesWriter, MergePlan, Merger, TableAdapter};

#[derive(Parser)]
#[command(
    name = "trellis",
    version,
    about = "Tabular-to-graph encoder for bulk graph loading"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Merge per-entity CSV tables into one combined node+edge table
    Merge {
        /// Directory holding the entity CSVs (ignored when --plan is given)
        #[arg(long, default_value = ".")]
        data_dir: PathBuf,
        /// Merge plan YAML; defaults to the built-in case-study plan
        #[arg(long)]
        plan: Option<PathBuf>,
        /// Override the plan's output path
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Stream configured sources into nodes.jsonl and edges.jsonl
    Export {
        /// Export configuration YAML
        #[arg(long)]
        config: PathBuf,
        /// Directory receiving the JSONL files
        #[arg(long, default_value = "out")]
        out_dir: PathBuf,
    },
}

/// One source table in an export configuration.
#[derive(Debug, Deserialize)]
struct ExportSource {
    /// Built-in dataset profile name.
    dataset: String,
    /// Primary CSV path.
    input: PathBuf,
    /// Companion CSV, for profiles that define one.
    #[serde(default)]
    secondary: Option<PathBuf>,
    /// Allow-lists; absent fields admit everything the profile knows.
    #[serde(flatten)]
    filters: AdapterConfig,
}

#[derive(Debug, Deserialize)]
struct ExportConfig {
    sources: Vec<ExportSource>,
}

fn load_export_config(path: &Path) -> Result<ExportConfig, String> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read '{}': {}", path.display(), e))?;
    serde_yaml::from_str(&text).map_err(|e| format!("cannot parse '{}': {}", path.display(), e))
}

fn cmd_merge(data_dir: PathBuf, plan: Option<PathBuf>, out: Option<PathBuf>) -> i32 {
    let mut plan = match plan {
        Some(path) => match MergePlan::from_yaml_file(&path) {
            Ok(plan) => plan,
            Err(e) => {
                eprintln!("Error: cannot load plan '{}': {}", path.display(), e);
                return 1;
            }
        },
        None => MergePlan::case_study_default(&data_dir),
    };
    if let Some(out) = out {
        plan.output = out;
    }
    let output = plan.output.clone();
    match Merger::new(plan).run() {
        Ok(report) => {
            println!("{:<32}  {:>7}", "TABLE", "ROWS");
            println!("{}", "-".repeat(41));
            for (name, rows) in &report.tables {
                println!("{:<32}  {:>7}", name, rows);
            }
            println!();
            println!(
                "Wrote {} ({} node rows, {} edge rows)",
                output.display(),
                report.node_rows,
                report.edge_rows
            );
            for (edge_type, count) in &report.edges_by_type {
                println!("  {:<42}  {:>5}", edge_type, count);
            }
            0
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

fn export_source(
    source: &ExportSource,
    writer: &mut JsonLinesWriter,
) -> Result<(usize, usize), String> {
    let profile = DatasetProfile::by_name(&source.dataset).ok_or_else(|| {
        format!(
            "unknown dataset '{}' (expected one of: {})",
            source.dataset,
            DatasetProfile::builtin_names().join(", ")
        )
    })?;
    let mut adapter = TableAdapter::from_csv(&source.input, profile, source.filters.clone())
        .map_err(|e| e.to_string())?;
    if let Some(secondary) = &source.secondary {
        adapter = adapter
            .with_secondary_csv(secondary)
            .map_err(|e| e.to_string())?;
    }
    let nodes = write_nodes(writer, adapter.produce_nodes()).map_err(|e| e.to_string())?;
    let edges = write_edges(writer, adapter.produce_edges()).map_err(|e| e.to_string())?;
    Ok((nodes, edges))
}

fn cmd_export(config_path: PathBuf, out_dir: PathBuf) -> i32 {
    let config = match load_export_config(&config_path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };
    if config.sources.is_empty() {
        eprintln!("Error: export config lists no sources");
        return 1;
    }
    let mut writer = match JsonLinesWriter::create(&out_dir) {
        Ok(writer) => writer,
        Err(e) => {
            eprintln!("Error: cannot open '{}': {}", out_dir.display(), e);
            return 1;
        }
    };
    println!("{:<24}  {:>7}  {:>7}", "SOURCE", "NODES", "EDGES");
    println!("{}", "-".repeat(42));
    for source in &config.sources {
        match export_source(source, &mut writer) {
            Ok((nodes, edges)) => {
                println!("{:<24}  {:>7}  {:>7}", source.dataset, nodes, edges);
            }
            Err(e) => {
                eprintln!("Error: {}: {}", source.input.display(), e);
                return 1;
            }
        }
    }
    match writer.finish() {
        Ok((nodes, edges)) => {
            println!();
            println!(
                "Wrote {} nodes and {} edges to {}",
                nodes,
                edges,
                out_dir.display()
            );
            0
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let code = match cli.command {
        Commands::Merge {
            data_dir,
            plan,
            out,
        } => cmd_merge(data_dir, plan, out),
        Commands::Export { config, out_dir } => cmd_export(config, out_dir),
    };
    std::process::exit(code);
}
