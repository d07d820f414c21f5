//! `mtable` - render CSV, JSON or a flat list as an HTML table.
//!
//! ```text
//! mtable parts.csv --caption "Parts" > parts.html
//! mtable rows.json --template skin.yaml
//! mtable names.txt --format list --columns 4
//! ```

mod app;

use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use app::InputFormat;

/// Environment variable holding the log filter.
const LOG_ENV: &str = "MARKUP_TABLE_LOG";

/// Render tabular data as an HTML table
#[derive(Debug, Parser)]
#[command(name = "mtable", version, about)]
pub struct Cli {
    /// Input file; reads stdin when omitted or "-"
    pub input: Option<PathBuf>,

    /// Input format; guessed from the file extension when omitted
    #[arg(short, long, value_enum)]
    pub format: Option<InputFormat>,

    /// Chunk a flat list into rows of this many cells
    #[arg(long, value_name = "N")]
    pub columns: Option<usize>,

    /// Table caption
    #[arg(long)]
    pub caption: Option<String>,

    /// Fragment overrides (.yaml, .yml or .json)
    #[arg(long, value_name = "FILE")]
    pub template: Option<PathBuf>,

    /// Table settings (.yaml, .yml or .json)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Marker for empty cells
    #[arg(long, value_name = "TEXT")]
    pub empty: Option<String>,

    /// Render data rows only, without a heading
    #[arg(long)]
    pub no_heading: bool,

    /// Write markup here instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

fn setup_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn read_input(cli: &Cli) -> Result<String> {
    match cli.input.as_deref() {
        Some(path) if path.as_os_str() != "-" => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        _ => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(cli: &Cli, html: &str) -> Result<()> {
    match &cli.output {
        Some(path) => std::fs::write(path, format!("{}\n", html))
            .with_context(|| format!("failed to write {}", path.display())),
        None => {
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{}", html).context("failed to write stdout")
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let input = read_input(cli)?;
    let html = app::render(cli, &input)?;
    write_output(cli, &html)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    setup_logging();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("mtable: {:#}", err);
            ExitCode::FAILURE
        }
    }
}
