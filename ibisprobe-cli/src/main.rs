//! ibisprobe CLI - IBIS pin parasitics from the command line.

use clap::{Parser, ValueEnum};
use ibisprobe::{
    render_json, render_text, IbisProbeCore, IbisProbeError, InspectionReport, OutputStyle,
    PinQuery, RenderOptions,
};
use std::io::IsTerminal;
use std::path::PathBuf;
use std::process;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const FILE_PROMPT: &str = "Enter the path to the IBIS file:";
const PINS_PROMPT: &str = "Enter the list of pins (comma-separated, e.g., M13,M19,M16,A20,AB44):";

#[derive(Parser)]
#[command(name = "ibisprobe")]
#[command(about = "Read component and pin parasitics from an IBIS model", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to the .ibs file (prompted for when omitted)
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Pins to look up, e.g. "(M13,M19,A20)"
    #[arg(value_name = "PINS")]
    pins: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "human")]
    format: OutputFormat,

    /// When to color human output
    #[arg(long, value_enum, default_value = "auto")]
    color: ColorChoice,

    /// Enable verbose logging (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output for scripts
    Json,
}

#[derive(Clone, Copy, ValueEnum)]
enum ColorChoice {
    /// Color when stdout is a terminal
    Auto,
    Always,
    Never,
}

fn main() {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let exit_code = match handle_inspect(cli.file, cli.pins, cli.format, cli.color) {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    };

    process::exit(exit_code);
}

fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .init();
}

fn handle_inspect(
    file: Option<PathBuf>,
    pins: Option<String>,
    format: OutputFormat,
    color: ColorChoice,
) -> Result<(), IbisProbeError> {
    let (file, pins) = match (file, pins) {
        (Some(file), Some(pins)) => (file, pins),
        (Some(file), None) => (file, prompt(PINS_PROMPT)?),
        (None, _) => {
            let file = PathBuf::from(prompt(FILE_PROMPT)?.trim());
            (file, prompt(PINS_PROMPT)?)
        }
    };

    let query = PinQuery::parse(&pins);
    tracing::debug!("Requested pins: {:?}", query.pins);

    let report = IbisProbeCore::inspect(&file, &query)?;
    output_report(&report, format, color);
    Ok(())
}

fn prompt(message: &str) -> Result<String, IbisProbeError> {
    inquire::Text::new(message)
        .prompt()
        .map_err(|e| IbisProbeError::Prompt(format!("Failed to read input: {}", e)))
}

fn output_report(report: &InspectionReport, format: OutputFormat, color: ColorChoice) {
    match format {
        OutputFormat::Human => {
            let options = RenderOptions {
                style: resolve_style(color),
            };
            print!("{}", render_text(report, &options));
        }
        OutputFormat::Json => println!("{:#}", render_json(report)),
    }
}

/// Pick the text style once, at the output boundary.
fn resolve_style(color: ColorChoice) -> OutputStyle {
    let ansi = match color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => std::io::stdout().is_terminal(),
    };
    colored::control::set_override(ansi);

    if ansi {
        OutputStyle::Ansi
    } else {
        OutputStyle::Plain
    }
}
