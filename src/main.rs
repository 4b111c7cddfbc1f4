use clap::{Parser, Subcommand, ValueEnum};
use color_eyre::Result;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use ifc_tabulator::explore::explore;
use ifc_tabulator::export::{export_ifc_file, ExportFormat, ExportOptions, DEFAULT_OUTPUT};
use ifc_tabulator::parser::open_ifc_file;
use ifc_tabulator::tabulate::SheetOrder;

#[derive(Parser, Debug)]
#[command(name = "ifc-tabulator")]
#[command(about = "IFC Tabulator - export building elements and their properties to spreadsheets")]
#[command(version)]
struct Args {
    /// Log progress to stderr (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the object subtypes found in an IFC file
    Explore {
        /// Path to IFC file
        file: PathBuf,

        /// Print the listing as JSON
        #[arg(long)]
        json: bool,
    },

    /// Write one sheet per building-element subtype
    Export {
        /// Path to IFC file
        file: PathBuf,

        /// Output file (directory for csv)
        #[arg(short, long, value_name = "PATH", default_value = DEFAULT_OUTPUT)]
        output: PathBuf,

        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Xlsx)]
        format: Format,

        /// Keep sheets in the order their subtype first appears in the file
        #[arg(long)]
        unordered: bool,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Format {
    Xlsx,
    Csv,
    Json,
}

impl From<Format> for ExportFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Xlsx => ExportFormat::Xlsx,
            Format::Csv => ExportFormat::Csv,
            Format::Json => ExportFormat::Json,
        }
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    init_tracing(args.verbose);

    match args.command {
        Command::Explore { file, json } => {
            let model = open_ifc_file(&file)?;
            let exploration = explore(&model);
            if json {
                println!("{}", serde_json::to_string_pretty(&exploration)?);
            } else {
                print!("{exploration}");
            }
        }
        Command::Export {
            file,
            output,
            format,
            unordered,
        } => {
            let options = ExportOptions {
                output,
                format: format.into(),
                sheet_order: if unordered {
                    SheetOrder::FirstSeen
                } else {
                    SheetOrder::Sorted
                },
            };
            let summary = export_ifc_file(&file, &options)?;
            let label = match options.format {
                ExportFormat::Xlsx => "Excel",
                ExportFormat::Csv => "CSV",
                ExportFormat::Json => "JSON",
            };
            println!(
                "{label} file exported successfully in {:.2}",
                summary.elapsed.as_secs_f64()
            );
        }
    }

    Ok(())
}
