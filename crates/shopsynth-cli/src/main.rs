mod config;
mod logging;

use std::path::PathBuf;
use std::time::Instant;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use logging::{LogFormat, init_logging};
use serde::Serialize;
use shopsynth_core::{
    DatasetSchema, SCHEMA_VERSION, TableName, build_dependency_graph_report, validate_schema,
};
use shopsynth_generate::{GenerateOptions, GenerationEngine, GenerationError};
use thiserror::Error;

#[derive(Debug, Error)]
enum CliError {
    #[error("generation error: {0}")]
    Generation(#[from] GenerationError),
    #[error("schema error: {0}")]
    Schema(#[from] shopsynth_core::Error),
    #[error("failed to read config {}: {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config file: {0}")]
    ConfigParse(#[from] toml::de::Error),
    #[error("json serialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("logging error: {0}")]
    Logging(String),
}

#[derive(Parser, Debug)]
#[command(
    name = "shopsynth",
    version,
    about = "Synthetic e-commerce dataset generator"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate all ten tables and export them as CSV.
    Generate(GenerateArgs),
    /// Print the dataset schema and generation order as JSON.
    Schema,
}

#[derive(Args, Debug, Default)]
struct GenerateArgs {
    /// TOML file with generation options.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Output directory for the CSV files [default: data].
    #[arg(long, value_name = "DIR")]
    out: Option<PathBuf>,
    /// Seed for reproducible output.
    #[arg(long)]
    seed: Option<u64>,
    /// Date treated as today (YYYY-MM-DD).
    #[arg(long, value_name = "DATE")]
    reference_date: Option<NaiveDate>,
    /// Number of customers [default: 100].
    #[arg(long)]
    customers: Option<usize>,
    /// Number of customer addresses [default: 100].
    #[arg(long)]
    addresses: Option<usize>,
    /// Number of products [default: 20].
    #[arg(long)]
    products: Option<usize>,
    /// Number of delivery partners [default: 5].
    #[arg(long)]
    delivery_partners: Option<usize>,
    /// Number of orders [default: 500].
    #[arg(long)]
    orders: Option<usize>,
    /// Number of order items [default: 1000].
    #[arg(long)]
    order_items: Option<usize>,
    /// Number of payments [default: 500].
    #[arg(long)]
    payments: Option<usize>,
    /// Number of deliveries [default: 500].
    #[arg(long)]
    deliveries: Option<usize>,
    /// Number of returns [default: 100].
    #[arg(long)]
    returns: Option<usize>,
    /// Lowest product price [default: 100].
    #[arg(long)]
    price_min: Option<f64>,
    /// Highest product price [default: 100].
    #[arg(long)]
    price_max: Option<f64>,
    /// Also write the generation report as JSON.
    #[arg(long, value_name = "FILE")]
    report: Option<PathBuf>,
    /// Log format on stderr.
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,
}

fn main() -> Result<(), CliError> {
    let cli = Cli::parse();

    match cli.command {
        Command::Generate(args) => run_generate(args),
        Command::Schema => print_schema(),
    }
}

fn run_generate(args: GenerateArgs) -> Result<(), CliError> {
    init_logging(args.log_format)?;
    let options = resolve_options(&args)?;

    tracing::info!(event = "run_started", out_dir = %options.out_dir.display());
    let timer = Instant::now();

    let result = GenerationEngine::new(options).run()?;

    for table in &result.report.tables {
        println!(
            "{:<20} {:>6} rows  {:>9} bytes",
            table.table, table.rows_generated, table.bytes_written
        );
    }
    println!(
        "wrote {} tables to {} (seed {})",
        result.report.tables.len(),
        result.out_dir.display(),
        result.report.seed
    );

    tracing::info!(
        event = "run_finished",
        status = "success",
        duration_ms = timer.elapsed().as_millis() as u64
    );
    Ok(())
}

/// Built-in defaults, overlaid by the config file, overlaid by flags.
fn resolve_options(args: &GenerateArgs) -> Result<GenerateOptions, CliError> {
    let mut options = match &args.config {
        Some(path) => config::load_config(path)?,
        None => GenerateOptions::default(),
    };

    if let Some(out) = &args.out {
        options.out_dir = out.clone();
    }
    if args.seed.is_some() {
        options.seed = args.seed;
    }
    if args.reference_date.is_some() {
        options.reference_date = args.reference_date;
    }
    if args.report.is_some() {
        options.report_path = args.report.clone();
    }

    let counts = &mut options.counts;
    let overrides = [
        (&mut counts.customers, args.customers),
        (&mut counts.customer_addresses, args.addresses),
        (&mut counts.products, args.products),
        (&mut counts.delivery_partners, args.delivery_partners),
        (&mut counts.orders, args.orders),
        (&mut counts.order_items, args.order_items),
        (&mut counts.payments, args.payments),
        (&mut counts.deliveries, args.deliveries),
        (&mut counts.returns, args.returns),
    ];
    for (slot, value) in overrides {
        if let Some(value) = value {
            *slot = value;
        }
    }

    if let Some(min) = args.price_min {
        options.price_range.min = min;
    }
    if let Some(max) = args.price_max {
        options.price_range.max = max;
    }

    options.counts.validate()?;
    options.price_range.validate()?;
    Ok(options)
}

#[derive(Serialize)]
struct SchemaOutput<'a> {
    schema_version: &'a str,
    generation_order: Vec<TableName>,
    schema: &'a DatasetSchema,
}

fn print_schema() -> Result<(), CliError> {
    let schema = DatasetSchema::ecommerce();
    validate_schema(&schema)?;
    let generation_order = build_dependency_graph_report(&schema)
        .topo_order
        .unwrap_or_default();

    let output = SchemaOutput {
        schema_version: SCHEMA_VERSION,
        generation_order,
        schema: &schema,
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
