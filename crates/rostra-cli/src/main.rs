mod commands;
mod output;

use clap::{Parser, Subcommand};
use commands::convert::{Backends, OcrOptions, SheetFormat};
use rostra_core::extraction::recognition::DEFAULT_OCR_DPI;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "rostra",
    version,
    about = "Turn award, roster and board-listing PDFs into spreadsheet rows"
)]
struct Cli {
    /// Log pipeline decisions to stderr (same as RUST_LOG=debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a PDF (or plain-text file) into spreadsheet sheets
    Convert {
        /// Path to PDF or .txt file
        input_file: PathBuf,

        /// Output directory (csv) or file (json). Default: next to the input
        #[arg(short = 'O', long = "out", value_name = "PATH")]
        out: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = SheetFormat::Csv)]
        format: SheetFormat,

        /// Skip structural table detection and always classify lines
        #[arg(long)]
        no_tables: bool,

        /// Fall back to tesseract OCR when the text layer is empty
        #[arg(long)]
        ocr: bool,

        /// Tesseract language code(s) for --ocr, e.g. "eng+swe"
        #[arg(long, value_name = "LANG", default_value = "eng")]
        ocr_lang: String,

        /// Rendering resolution for --ocr
        #[arg(long, value_name = "DPI", default_value_t = DEFAULT_OCR_DPI)]
        ocr_dpi: u32,

        /// Custom JSON heuristics file
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,
    },
    /// Show how each line of a document is classified
    Classify {
        /// Path to PDF or .txt file
        input_file: PathBuf,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,

        /// Custom JSON heuristics file
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,
    },
    /// Inspect and validate heuristics configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective default configuration as JSON
    Show,
    /// Print the configuration fields with descriptions
    Schema,
    /// Validate a custom heuristics file
    Validate {
        /// Path to JSON heuristics file
        file: PathBuf,
    },
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Convert {
            input_file,
            out,
            format,
            no_tables,
            ocr,
            ocr_lang,
            ocr_dpi,
            config,
        } => commands::convert::run(
            input_file,
            out,
            format,
            Backends {
                tables: !no_tables,
                ocr: ocr.then(|| OcrOptions {
                    language: ocr_lang,
                    dpi: ocr_dpi,
                }),
            },
            config,
        ),
        Commands::Classify {
            input_file,
            output,
            config,
        } => commands::classify::run(input_file, &output, config),
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::show(),
            ConfigAction::Schema => commands::config::schema(),
            ConfigAction::Validate { file } => commands::config::validate(&file),
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
