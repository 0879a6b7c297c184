use std::io::{IsTerminal, Write};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use embedc_core::{ConfigFile, DatasheetPayload, Peripheral, TextExtractor};

mod output;

use output::ColorMode;

/// Embedded C code generator - MISRA-annotated peripheral templates from a query and a datasheet
#[derive(Parser, Debug)]
#[command(name = "embedc", version, about, long_about = None)]
struct Cli {
    /// Verbose diagnostics on stderr (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate C code for a natural-language request
    Generate {
        /// What to generate, e.g. "blink an LED" or "init UART"
        query: String,

        /// Hardware datasheet (PDF) to extract alongside the query
        #[arg(short, long)]
        datasheet: Option<PathBuf>,

        /// Path to write the generated code to
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,

        /// Comma-separated PDF backend order (e.g. "mupdf,lopdf")
        #[arg(long, value_delimiter = ',')]
        backends: Vec<String>,

        /// Use this template instead of matching keywords in the query
        /// (led-blink, uart, spi, gpio, i2c, timer, adc, pwm, placeholder)
        #[arg(short, long)]
        template: Option<Peripheral>,
    },

    /// Print the text extracted from a datasheet
    Extract {
        /// Path to the PDF
        file_path: PathBuf,

        /// Path to write the extracted text to
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Comma-separated PDF backend order (e.g. "mupdf,lopdf")
        #[arg(long, value_delimiter = ',')]
        backends: Vec<String>,
    },

    /// List the MISRA rules attached to every generated file
    Rules {
        /// Disable colored output
        #[arg(long)]
        no_color: bool,
    },

    /// List the PDF backends compiled into this build, in effective order
    Backends {
        /// Comma-separated PDF backend order (e.g. "mupdf,lopdf")
        #[arg(long, value_delimiter = ',')]
        backends: Vec<String>,
    },
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = embedc_core::config_file::load_config();

    match cli.command {
        Command::Generate {
            query,
            datasheet,
            output,
            no_color,
            backends,
            template,
        } => generate(
            &config,
            query,
            datasheet,
            output,
            no_color,
            backends,
            template,
        ),
        Command::Extract {
            file_path,
            output,
            backends,
        } => extract(&config, &file_path, output, backends),
        Command::Rules { no_color } => {
            let color = ColorMode(use_color(&config, no_color, None, stdout_is_tty()));
            output::print_rules(&mut std::io::stdout(), color)?;
            Ok(())
        }
        Command::Backends { backends } => {
            let extractor = build_extractor(&config, &backends);
            let color = ColorMode(use_color(&config, false, None, stdout_is_tty()));
            output::print_backends(&mut std::io::stdout(), &extractor.backend_names(), color)?;
            Ok(())
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// CLI flag > config file > terminal default. Never colored when writing to a
/// file or when the target stream is not a terminal.
fn use_color(
    config: &ConfigFile,
    no_color: bool,
    output: Option<&Path>,
    is_terminal: bool,
) -> bool {
    !no_color && output.is_none() && is_terminal && config.color().unwrap_or(true)
}

fn stdout_is_tty() -> bool {
    std::io::stdout().is_terminal()
}

fn build_extractor(config: &ConfigFile, backends: &[String]) -> TextExtractor {
    let order = embedc_ingest::resolve_backend_order(backends, config);
    embedc_ingest::extractor_with_order(order.as_deref())
}

fn open_writer(output: Option<&Path>) -> anyhow::Result<Box<dyn Write>> {
    Ok(match output {
        Some(path) => Box::new(std::fs::File::create(path)?),
        None => Box::new(std::io::stdout()),
    })
}

fn generate(
    config: &ConfigFile,
    query: String,
    datasheet: Option<PathBuf>,
    output: Option<PathBuf>,
    no_color: bool,
    backends: Vec<String>,
    template: Option<Peripheral>,
) -> anyhow::Result<()> {
    if query.trim().is_empty() {
        anyhow::bail!("Enter a query (and optionally a datasheet).");
    }

    let datasheet_text = match datasheet {
        Some(ref path) => {
            if !path.exists() {
                anyhow::bail!("Datasheet not found: {}", path.display());
            }
            build_extractor(config, &backends).extract(DatasheetPayload::Path(path))
        }
        None => String::new(),
    };

    let response = match template {
        Some(peripheral) => embedc_core::respond_as(peripheral, &query, &datasheet_text),
        None => embedc_core::respond(&query, &datasheet_text),
    };
    tracing::info!(peripheral = %response.peripheral, datasheet_chars = datasheet_text.len(), "generated code");

    let color = ColorMode(use_color(
        config,
        no_color,
        output.as_deref(),
        stdout_is_tty(),
    ));
    let mut writer = open_writer(output.as_deref())?;
    output::print_response(&mut writer, &response, color)?;
    writer.flush()?;
    Ok(())
}

fn extract(
    config: &ConfigFile,
    file_path: &Path,
    output: Option<PathBuf>,
    backends: Vec<String>,
) -> anyhow::Result<()> {
    if !file_path.exists() {
        anyhow::bail!("File not found: {}", file_path.display());
    }

    let file_name = file_path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| file_path.display().to_string());

    let extraction =
        build_extractor(config, &backends).extract_detailed(DatasheetPayload::Path(file_path));

    let mut writer = open_writer(output.as_deref())?;
    writeln!(writer, "{}", extraction.text)?;
    writer.flush()?;

    let color = ColorMode(use_color(
        config,
        false,
        None,
        std::io::stderr().is_terminal(),
    ));
    output::print_extraction_summary(&mut std::io::stderr(), &file_name, &extraction, color)?;
    Ok(())
}
