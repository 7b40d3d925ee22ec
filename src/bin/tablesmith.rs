//! tablesmith CLI - Structure authored grids into accessible HTML tables

#[cfg(feature = "cli")]
use clap::{Args, Parser, Subcommand, ValueEnum};
#[cfg(feature = "cli")]
use std::fs;
#[cfg(feature = "cli")]
use std::io::{self, Read};
#[cfg(feature = "cli")]
use std::path::Path;
#[cfg(feature = "cli")]
use tablesmith::{
    build_table, load_document, parse_document, render_html, AssembledTable, ConfigOverrides,
    DocumentFormat, RenderOptions, TableDocument, TableError, TableResult,
};
#[cfg(feature = "cli")]
use tracing_subscriber::EnvFilter;

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "tablesmith")]
#[command(version)]
#[command(about = "Structure authored grids into accessible HTML tables", long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    table: TableArgs,

    #[command(flatten)]
    output: OutputArgs,

    /// Log structuring decisions to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// Render a table (default action)
    Render {
        #[command(flatten)]
        table: TableArgs,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Print the resolved span matrix, markers and sections
    Inspect {
        #[command(flatten)]
        table: TableArgs,
    },

    /// Show version and feature info
    Info,
}

/// Where the table comes from and how it is configured
#[cfg(feature = "cli")]
#[derive(Args, Clone)]
struct TableArgs {
    /// Input file path (reads from stdin if not provided)
    input: Option<String>,

    /// Input format (detected from the file extension when omitted; JSON for stdin)
    #[arg(long, value_enum)]
    input_format: Option<InputFormat>,

    /// TOML file with table configuration
    #[arg(long)]
    config: Option<String>,

    /// Number of header rows (0-2)
    #[arg(long)]
    header_rows: Option<usize>,

    /// Number of header columns (0-2)
    #[arg(long)]
    header_columns: Option<usize>,

    /// Caption text (shown)
    #[arg(long)]
    caption: Option<String>,

    /// Freeze header columns while scrolling horizontally
    #[arg(long)]
    freeze_header_columns: bool,
}

#[cfg(feature = "cli")]
impl TableArgs {
    /// Settings given as flags; unset flags leave the configuration alone
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            header_rows: self.header_rows,
            header_columns: self.header_columns,
            caption: self.caption.clone(),
            show_caption: self.caption.as_ref().map(|_| true),
            freeze_header_columns: self.freeze_header_columns.then_some(true),
            scroll_label: None,
        }
    }
}

#[cfg(feature = "cli")]
#[derive(Args, Clone)]
struct OutputArgs {
    /// Output file path (writes to stdout if not provided)
    #[arg(short, long)]
    output: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Html)]
    format: OutputFormat,

    /// Pretty print the output
    #[arg(short, long)]
    pretty: bool,
}

#[cfg(feature = "cli")]
#[derive(Clone, Copy, ValueEnum)]
enum InputFormat {
    Json,
    Yaml,
    Toml,
    Csv,
}

#[cfg(feature = "cli")]
impl From<InputFormat> for DocumentFormat {
    fn from(format: InputFormat) -> Self {
        match format {
            InputFormat::Json => DocumentFormat::Json,
            InputFormat::Yaml => DocumentFormat::Yaml,
            InputFormat::Toml => DocumentFormat::Toml,
            InputFormat::Csv => DocumentFormat::Csv,
        }
    }
}

#[cfg(feature = "cli")]
#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// HTML table markup
    Html,
    /// The assembled table as JSON
    Json,
}

#[cfg(feature = "cli")]
fn main() -> io::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Render { table, output }) => render(&table, &output),
        Some(Commands::Inspect { table }) => inspect(&table),
        Some(Commands::Info) => {
            print_info();
            Ok(())
        }
        None => render(&cli.table, &cli.output),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
    Ok(())
}

#[cfg(feature = "cli")]
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

/// Load the document, then layer the config file and flags on top
#[cfg(feature = "cli")]
fn load(args: &TableArgs) -> TableResult<TableDocument> {
    let mut document = match (&args.input, args.input_format) {
        (Some(path), None) => load_document(path)?,
        (Some(path), Some(format)) => parse_document(&fs::read_to_string(path)?, format.into())?,
        (None, format) => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            let format = format.map_or(DocumentFormat::Json, DocumentFormat::from);
            parse_document(&buffer, format)?
        }
    };

    if let Some(ref path) = args.config {
        ConfigOverrides::from_toml_str(&fs::read_to_string(path)?)?.apply(&mut document.config);
        tracing::debug!(path = %path, "applied table configuration");
    }

    args.overrides().apply(&mut document.config);

    Ok(document)
}

#[cfg(feature = "cli")]
fn render(args: &TableArgs, out: &OutputArgs) -> TableResult<()> {
    let document = load(args)?;
    let table = build_table(&document.to_grid()?);

    let result = match out.format {
        OutputFormat::Html => {
            let options = if out.pretty {
                RenderOptions::pretty()
            } else {
                RenderOptions::compact()
            };
            render_html(&table, &document.config.properties(), &options)
        }
        OutputFormat::Json => {
            let json = if out.pretty {
                serde_json::to_string_pretty(&table)
            } else {
                serde_json::to_string(&table)
            };
            json.map_err(|e| TableError::Io {
                message: e.to_string(),
            })?
        }
    };

    match out.output {
        Some(ref path) => {
            fs::write(Path::new(path), format!("{}\n", result.trim_end()))?;
            eprintln!("✓ Output written to: {}", path);
        }
        None => {
            println!("{}", result.trim_end());
        }
    }

    Ok(())
}

#[cfg(feature = "cli")]
fn inspect(args: &TableArgs) -> TableResult<()> {
    let document = load(args)?;
    let grid = document.to_grid()?;
    let table = build_table(&grid);

    println!(
        "Grid: {} rows x {} columns, {} header row(s), {} header column(s)",
        grid.num_rows(),
        grid.num_cols(),
        grid.header().rows(),
        grid.header().columns()
    );
    print!("{}", describe_sections(&table));
    println!();

    for (row, cells) in table.spans.rows().enumerate() {
        for (col, cell) in cells.iter().enumerate() {
            let mut line = format!("({}, {}) {}x{}", row, col, cell.colspan, cell.rowspan);
            if let Some(scope) = cell.scope {
                line.push_str(&format!(" scope={}", scope));
            }
            if !cell.markers.is_empty() {
                line.push_str(&format!(" [{}]", cell.markers.to_class_string()));
            }
            println!("{}", line);
        }
    }

    Ok(())
}

#[cfg(feature = "cli")]
fn describe_sections(table: &AssembledTable) -> String {
    let mut result = String::new();
    if !table.header.is_empty() {
        result.push_str(&format!("thead: rows {:?}\n", table.header.row_indices()));
    }
    for (idx, body) in table.bodies.iter().enumerate() {
        result.push_str(&format!("tbody {}: rows {:?}\n", idx, body.row_indices()));
    }
    result
}

#[cfg(feature = "cli")]
fn print_info() {
    println!("tablesmith - Structure authored grids into accessible HTML tables");
    println!("Version: {}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Features:");
    println!("  ✓ Header row/column span merging (up to 2 x 2 headers)");
    println!("  ✓ Structural style markers and header scopes");
    println!("  ✓ Body sections grouped by first-column rowspans");
    println!("  ✓ HTML rendering with row metadata pass-through");
    println!();
    println!("Input formats: json, yaml, toml, csv");
    println!("Output formats: html, json");
    println!();
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("CLI feature not enabled. Build with --features cli");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  cargo install tablesmith --features cli");
    eprintln!("  tablesmith [OPTIONS] [INPUT]");
}
