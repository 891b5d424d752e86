mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tabschema_core::WarningOrder;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "tabschema")]
#[command(version, about = "Validate tabular data against a schema", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a CSV/TSV file against a schema definition
    Validate {
        /// Path to the schema definition (YAML or TOML)
        schema: String,

        /// Path to the data file (CSV or TSV)
        data: String,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Warning order: by row, or by column
        #[arg(short, long, value_enum, default_value_t = OrderArg::Row)]
        order: OrderArg,

        /// Validate only the first N rows
        #[arg(short, long)]
        sample_size: Option<usize>,

        /// Field delimiter (defaults to tab for .tsv files, comma otherwise)
        #[arg(short, long)]
        delimiter: Option<char>,

        /// Keep every cell as text instead of inferring numeric columns
        #[arg(long)]
        no_infer: bool,
    },

    /// Check a schema definition without validating data
    Check {
        /// Path to the schema definition (YAML or TOML)
        schema: String,
    },
}

/// Report output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OrderArg {
    Row,
    Column,
}

impl From<OrderArg> for WarningOrder {
    fn from(order: OrderArg) -> Self {
        match order {
            OrderArg::Row => WarningOrder::RowMajor,
            OrderArg::Column => WarningOrder::ColumnMajor,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let log_level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .with(tracing_subscriber::filter::LevelFilter::from_level(
            log_level,
        ))
        .init();

    // Execute command
    match cli.command {
        Commands::Validate {
            schema,
            data,
            format,
            order,
            sample_size,
            delimiter,
            no_infer,
        } => commands::validate::execute(commands::validate::ValidateArgs {
            schema_path: &schema,
            data_path: &data,
            format,
            order: order.into(),
            sample_size,
            delimiter,
            infer_types: !no_infer,
        }),

        Commands::Check { schema } => commands::check::execute(&schema),
    }
}
