//! Nested table CLI
//!
//! Command-line tool for viewing, exporting and editing the nested tables of
//! a single record stored as JSON.

mod document;
mod error;
mod script;

use clap::{Parser, Subcommand, ValueEnum};
use document::{Collect, RecordDocument, Session, TableView};
use error::{CliError, Result};
use nested_core::{CellValue, NestedTableKind};
use script::{Apply, EditScript, TableOp};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "nested-cli")]
#[command(about = "Nested record table viewer and editor", long_about = None)]
#[command(version)]
struct Cli {
    /// Log adapter commits and cascades
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Nested table selector
#[derive(Debug, Clone, Copy, ValueEnum)]
enum TableArg {
    Points,
    Edges,
    Reactions,
    Sounds,
    Script,
}

impl From<TableArg> for NestedTableKind {
    fn from(arg: TableArg) -> Self {
        match arg {
            TableArg::Points => NestedTableKind::PathgridPoints,
            TableArg::Edges => NestedTableKind::PathgridEdges,
            TableArg::Reactions => NestedTableKind::FactionReactions,
            TableArg::Sounds => NestedTableKind::RegionSounds,
            TableArg::Script => NestedTableKind::InfoResultScript,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Show a nested table of a record
    Show {
        /// Path to the record file (JSON)
        #[arg(short, long)]
        record: PathBuf,

        /// Nested table to show
        #[arg(short, long, value_enum)]
        table: TableArg,

        /// Maximum number of rows to display
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Export a nested table to a file
    Export {
        /// Path to the record file (JSON)
        #[arg(short, long)]
        record: PathBuf,

        /// Nested table to export
        #[arg(short, long, value_enum)]
        table: TableArg,

        /// Output format (csv or json)
        #[arg(long, default_value = "csv")]
        format: String,

        /// Output file path
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Apply an edit script and write the modified record
    Apply {
        /// Path to the record file (JSON)
        #[arg(short, long)]
        record: PathBuf,

        /// Path to the edit script (JSON)
        #[arg(short, long)]
        script: PathBuf,

        /// Output path for the modified record
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Create an edit script template
    CreateScript {
        /// Nested table the script targets
        #[arg(short, long, value_enum)]
        table: TableArg,

        /// Output path for the script
        #[arg(short, long)]
        output: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli.command) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Show {
            record,
            table,
            limit,
        } => cmd_show(&record, table.into(), limit),
        Commands::Export {
            record,
            table,
            format,
            output,
        } => cmd_export(&record, table.into(), &format, &output),
        Commands::Apply {
            record,
            script,
            output,
        } => cmd_apply(&record, &script, &output),
        Commands::CreateScript { table, output } => cmd_create_script(table.into(), &output),
    }
}

fn load_view(record_path: &Path, table: NestedTableKind) -> Result<TableView> {
    let mut session = Session::open(RecordDocument::load(record_path)?);
    session.visit(table, Collect)
}

fn cmd_show(record_path: &Path, table: NestedTableKind, limit: Option<usize>) -> Result<()> {
    let view = load_view(record_path, table)?;

    println!("{} ({} rows)", view.table, view.rows.len());
    println!();
    println!("{}", view.headers.join("\t"));
    println!("{}", "-".repeat(view.headers.len() * 12));

    let row_limit = limit.unwrap_or(view.rows.len());
    for row in view.rows.iter().take(row_limit) {
        let values: Vec<String> = row.iter().map(CellValue::to_text).collect();
        println!("{}", values.join("\t"));
    }

    if view.rows.len() > row_limit {
        println!("... ({} more rows)", view.rows.len() - row_limit);
    }

    Ok(())
}

fn cmd_export(record_path: &Path, table: NestedTableKind, format: &str, output: &Path) -> Result<()> {
    let view = load_view(record_path, table)?;

    match format.to_lowercase().as_str() {
        "csv" => {
            let mut writer = csv::Writer::from_path(output)?;
            writer.write_record(&view.headers)?;
            for row in &view.rows {
                writer.write_record(row.iter().map(CellValue::to_text))?;
            }
            writer.flush()?;
        }
        "json" => {
            let json = serde_json::to_string_pretty(&view)?;
            std::fs::write(output, json)?;
        }
        other => return Err(CliError::UnknownFormat(other.to_string())),
    }

    println!("Exported {} rows to {}", view.rows.len(), output.display());

    Ok(())
}

fn cmd_apply(record_path: &Path, script_path: &Path, output: &Path) -> Result<()> {
    let script = EditScript::load(script_path)?;
    println!(
        "Loaded script for {} with {} operations",
        script.table,
        script.ops.len()
    );

    let mut session = Session::open(RecordDocument::load(record_path)?);
    let report = session.visit(script.table, Apply(&script.ops))?;

    session.document().save(output)?;

    println!("Applied {} operations (revision {})", report.applied, report.revision);
    if !report.refresh.is_empty() {
        let tables: Vec<&str> = report.refresh.iter().map(NestedTableKind::name).collect();
        println!("Tables changed by the last commit: {}", tables.join(", "));
    }
    println!("Wrote {}", output.display());

    Ok(())
}

fn cmd_create_script(table: NestedTableKind, output: &Path) -> Result<()> {
    let mut script = EditScript::new(table);
    if table == NestedTableKind::InfoResultScript {
        script.ops.push(TableOp::SetData {
            row: 0,
            column: 0,
            value: CellValue::from(""),
        });
    } else {
        script.ops.push(TableOp::AddRow { position: 0 });
        script.ops.push(TableOp::SetData {
            row: 0,
            column: 1,
            value: CellValue::Integer(0),
        });
    }

    script.save(output)?;
    println!("Created script: {}", output.display());
    println!("Table: {}", table);
    println!();
    println!("Edit the file to add your changes, then run:");
    println!(
        "  nested-cli apply --record <record.json> --script {} --output <out.json>",
        output.display()
    );

    Ok(())
}
