//! csvnote: browse CSV files and keep per-row review annotations.
//!
//! A CSV file is loaded in the background into an immutable [`data::Dataset`].
//! A [`table::TabularModel`] holds that dataset together with per-row
//! annotations (a note plus a severity), and the annotations are saved and
//! restored as a small structured document that tolerates rows which no
//! longer exist.
//!
//! # Modules
//!
//! - [`data`]: Dataset types and the CSV line scanner
//! - [`load`]: Cancellable background loading with progress
//! - [`table`]: The tabular model, annotations and sort/filter projections
//! - [`annotations`]: Annotation document codec and file formats
//! - [`error`]: Error types for csvnote operations

pub mod annotations;
pub mod data;
pub mod error;
pub mod load;
pub mod table;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::debug;

use annotations::AnnotationFormat;
use data::RowIndex;
use load::{LoadSession, LoadedDataset};
use table::{Annotation, AnnotationStore, Projection, ProjectionSpec, SortOrder, TabularModel};

pub use error::CsvnoteError;

/// The csvnote CLI application.
#[derive(Parser)]
#[command(name = "csvnote")]
#[command(version, author, about)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Summarize a CSV file's shape.
    Inspect(InspectArgs),

    /// Print rows, optionally filtered, sorted and annotated.
    Show(ShowArgs),

    /// Set or clear the annotation on one row.
    Annotate(AnnotateArgs),

    /// Export annotated rows as a CSV review sheet.
    Export(ExportArgs),
}

/// Arguments for the inspect subcommand.
#[derive(clap::Args)]
struct InspectArgs {
    /// CSV file to inspect.
    input: PathBuf,

    /// Output format for the summary ('text' or 'json').
    #[arg(long, default_value = "text")]
    output: String,

    /// Print load progress to stderr.
    #[arg(long)]
    progress: bool,
}

/// Arguments for the show subcommand.
#[derive(clap::Args)]
struct ShowArgs {
    /// CSV file to show.
    input: PathBuf,

    /// Annotation file to overlay.
    #[arg(long, env = "CSVNOTE_ANNOTATIONS")]
    annotations: Option<PathBuf>,

    /// Annotation file format ('json' or 'yaml'); inferred from the extension by default.
    #[arg(long)]
    format: Option<String>,

    /// Only show rows containing this text in any column (case-insensitive).
    #[arg(long)]
    filter: Option<String>,

    /// Sort by this column (header name or 0-based index).
    #[arg(long)]
    sort: Option<String>,

    /// Sort descending instead of ascending.
    #[arg(long, requires = "sort")]
    desc: bool,

    /// Show at most this many rows.
    #[arg(long)]
    limit: Option<usize>,

    /// Print load progress to stderr.
    #[arg(long)]
    progress: bool,
}

/// Arguments for the annotate subcommand.
#[derive(clap::Args)]
struct AnnotateArgs {
    /// CSV file the annotations belong to.
    input: PathBuf,

    /// Annotation file to update (created if missing).
    #[arg(long, env = "CSVNOTE_ANNOTATIONS")]
    annotations: PathBuf,

    /// Annotation file format ('json' or 'yaml'); inferred from the extension by default.
    #[arg(long)]
    format: Option<String>,

    /// 0-based data row to annotate.
    #[arg(long)]
    row: usize,

    /// Note text.
    #[arg(long, default_value = "")]
    note: String,

    /// Severity label (conventionally Info, Warn or Critical).
    #[arg(long, default_value = table::DEFAULT_SEVERITY)]
    severity: String,

    /// Remove the row's annotation instead of setting it.
    #[arg(long, conflicts_with_all = ["note", "severity"])]
    clear: bool,
}

/// Arguments for the export subcommand.
#[derive(clap::Args)]
struct ExportArgs {
    /// CSV file the annotations belong to.
    input: PathBuf,

    /// Annotation file to export.
    #[arg(long, env = "CSVNOTE_ANNOTATIONS")]
    annotations: PathBuf,

    /// Annotation file format ('json' or 'yaml'); inferred from the extension by default.
    #[arg(long)]
    format: Option<String>,

    /// Where to write the review CSV.
    #[arg(long)]
    output: PathBuf,
}

/// Run the csvnote CLI.
///
/// This is the main entry point for the CLI, called from `main.rs`.
pub async fn run() -> Result<(), CsvnoteError> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Inspect(args)) => run_inspect(args).await,
        Some(Commands::Show(args)) => run_show(args).await,
        Some(Commands::Annotate(args)) => run_annotate(args).await,
        Some(Commands::Export(args)) => run_export(args).await,
        None => {
            println!("csvnote {}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("Browse CSV files and keep per-row review annotations.");
            println!();
            println!("Run 'csvnote --help' for usage information.");
            Ok(())
        }
    }
}

/// Machine-readable summary printed by `inspect --output json`.
#[derive(Serialize)]
struct InspectSummary<'a> {
    path: &'a Path,
    headers: &'a [String],
    columns: usize,
    rows: usize,
    ragged_rows: usize,
    cancelled: bool,
}

/// Execute the inspect subcommand.
async fn run_inspect(args: InspectArgs) -> Result<(), CsvnoteError> {
    let loaded = load_dataset(&args.input, args.progress).await?;
    let dataset = &loaded.dataset;

    let summary = InspectSummary {
        path: &args.input,
        headers: &dataset.headers,
        columns: dataset.column_count(),
        rows: dataset.row_count(),
        ragged_rows: dataset.ragged_row_count(),
        cancelled: loaded.cancelled,
    };

    match args.output.as_str() {
        "json" => {
            let json = serde_json::to_string_pretty(&summary).map_err(|source| {
                CsvnoteError::SummaryJsonWrite {
                    path: args.input.clone(),
                    source,
                }
            })?;
            println!("{}", json);
        }
        "text" => {
            println!("File: {}", args.input.display());
            println!("Columns: {} ({})", summary.columns, summary.headers.join(", "));
            println!("Rows: {}", summary.rows);
            println!("Ragged rows: {}", summary.ragged_rows);
            if summary.cancelled {
                println!("Load was cancelled; counts are partial.");
            }
        }
        other => {
            return Err(CsvnoteError::UnsupportedFormat(format!(
                "'{}' (supported: text, json)",
                other
            )));
        }
    }

    Ok(())
}

/// Execute the show subcommand.
async fn run_show(args: ShowArgs) -> Result<(), CsvnoteError> {
    let loaded = load_dataset(&args.input, args.progress).await?;
    let mut model = TabularModel::with_dataset(loaded.dataset);

    if let Some(path) = &args.annotations {
        let format = annotation_format(args.format.as_deref(), path)?;
        let store = annotations::read_annotations(path, format, model.row_count())?;
        let restored = model.replace_annotations(store);
        println!("{} annotation(s) restored", restored);
    }

    let mut spec = ProjectionSpec {
        filter: args.filter.clone(),
        sort: None,
    };
    if let Some(column) = &args.sort {
        let order = if args.desc {
            SortOrder::Descending
        } else {
            SortOrder::Ascending
        };
        spec = spec.with_sort(resolve_column(&model, column)?, order);
    }
    let projection = Projection::build(&model, &spec);

    let header: Vec<String> = (0..model.column_count())
        .map(|col| model.header(col).into_owned())
        .collect();
    println!("row\t{}", header.join("\t"));

    let limit = args.limit.unwrap_or(usize::MAX);
    for row in projection.rows().iter().take(limit) {
        let cells: Vec<&str> = (0..model.column_count())
            .map(|col| model.cell_value(*row, col).unwrap_or(""))
            .collect();
        match model.row_display(*row).hover_text {
            Some(hover) => println!("{}\t{}\t{}", row, cells.join("\t"), hover),
            None => println!("{}\t{}", row, cells.join("\t")),
        }
    }

    println!(
        "{} of {} row(s) shown",
        projection.len().min(limit),
        model.row_count()
    );
    if loaded.cancelled {
        println!("Load was cancelled; rows are partial.");
    }
    Ok(())
}

/// Execute the annotate subcommand.
async fn run_annotate(args: AnnotateArgs) -> Result<(), CsvnoteError> {
    let loaded = load_dataset(&args.input, false).await?;
    let mut model = TabularModel::with_dataset(loaded.dataset);
    let format = annotation_format(args.format.as_deref(), &args.annotations)?;

    let store = if args.annotations.exists() {
        annotations::read_annotations(&args.annotations, format, model.row_count())?
    } else {
        debug!(path = %args.annotations.display(), "annotation file missing; starting empty");
        AnnotationStore::new()
    };
    model.replace_annotations(store);

    let row = RowIndex::new(args.row);
    if !row.is_within(model.row_count()) {
        return Err(CsvnoteError::RowOutOfRange {
            row: args.row,
            row_count: model.row_count(),
        });
    }

    if args.clear {
        match model.clear_annotation(row) {
            Some(_) => println!("Cleared annotation on row {}", row),
            None => println!("Row {} had no annotation", row),
        }
    } else {
        model.set_annotation(row, Annotation::new(args.note, args.severity));
        println!("Annotated row {}", row);
    }

    annotations::write_annotations(&args.annotations, format, model.annotations())?;
    println!(
        "{} annotation(s) saved to {}",
        model.annotations().len(),
        args.annotations.display()
    );
    Ok(())
}

/// Execute the export subcommand.
async fn run_export(args: ExportArgs) -> Result<(), CsvnoteError> {
    let loaded = load_dataset(&args.input, false).await?;
    let mut model = TabularModel::with_dataset(loaded.dataset);

    let format = annotation_format(args.format.as_deref(), &args.annotations)?;
    let store = annotations::read_annotations(&args.annotations, format, model.row_count())?;
    let count = model.replace_annotations(store);

    annotations::io_csv_report::write_review_csv(&args.output, &model)?;
    println!("Exported {} annotation(s) to {}", count, args.output.display());
    Ok(())
}

/// Loads `path` in the background; Ctrl-C cancels and keeps what was read.
async fn load_dataset(path: &Path, show_progress: bool) -> Result<LoadedDataset, CsvnoteError> {
    let mut session = LoadSession::new();
    let load = session.start(path);

    let cancel = load.cancel_token();
    let interrupt = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            cancel.cancel();
        }
    });

    let result = load
        .finish_with_progress(|percent| {
            if show_progress {
                eprintln!("progress: {}%", percent);
            }
        })
        .await;
    interrupt.abort();

    // Only one load is ever started on this session.
    result.unwrap_or_else(|| Err(CsvnoteError::LoadTask("load was superseded".into())))
}

fn annotation_format(name: Option<&str>, path: &Path) -> Result<AnnotationFormat, CsvnoteError> {
    match name {
        Some(name) => AnnotationFormat::from_name(name),
        None => Ok(AnnotationFormat::from_path(path)),
    }
}

/// Finds a column by header name, falling back to a 0-based index.
fn resolve_column(model: &TabularModel, column: &str) -> Result<usize, CsvnoteError> {
    if let Some(index) = model.dataset().headers.iter().position(|h| h == column) {
        return Ok(index);
    }
    column
        .parse::<usize>()
        .ok()
        .filter(|index| *index < model.column_count())
        .ok_or_else(|| CsvnoteError::UnknownColumn(column.to_string()))
}
