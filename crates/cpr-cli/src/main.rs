mod config;
mod logging;
mod ranges;

use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand};
use config::{CodeFormat, GenerateConfig, RangeList, load_config};
use cpr_core::{Cpr, Error as CoreError, Gender};
use cpr_generate::{CprGenerator, GenerationError};
use logging::{LogFormat, init_logging};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
enum CliError {
    #[error("generation error: {0}")]
    Generation(#[from] GenerationError),
    #[error("invalid code: {0}")]
    Core(#[from] CoreError),
    #[error("invalid range: {0}")]
    InvalidRange(String),
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("invalid config file: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("logging error: {0}")]
    Logging(String),
}

#[derive(Parser, Debug)]
#[command(
    name = "improbable-cpr",
    version,
    about = "Generate CPR numbers that fail the mod-11 check"
)]
struct Cli {
    #[command(flatten)]
    log: LogArgs,
    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug)]
struct LogArgs {
    /// Log filter directive; `RUST_LOG` takes precedence.
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Pretty)]
    log_format: LogFormat,
    /// Write logs to this file instead of stderr.
    #[arg(long, global = true, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print random codes that fail the checksum.
    Generate(GenerateArgs),
    /// Decode codes and report their checksum status.
    Inspect(InspectArgs),
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// Birth years, e.g. `1990`, `1990-1999` or `1950,1970-1972`.
    #[arg(long, value_name = "RANGES")]
    year: Option<String>,
    /// Birth months (1-12) as a range list.
    #[arg(long, value_name = "RANGES")]
    month: Option<String>,
    /// Days of month (1-31) as a range list.
    #[arg(long, value_name = "RANGES")]
    day: Option<String>,
    #[arg(long, value_name = "GENDER", num_args = 1..)]
    gender: Vec<Gender>,
    /// Earliest birth date (YYYY-MM-DD).
    #[arg(long, value_name = "DATE")]
    min_date: Option<NaiveDate>,
    /// Latest birth date (YYYY-MM-DD).
    #[arg(long, value_name = "DATE")]
    max_date: Option<NaiveDate>,
    /// Only people who are this old today. Replaces `--min-date` and `--max-date`.
    #[arg(long)]
    age: Option<u16>,
    /// Stop after this many codes.
    #[arg(short = 'n', long)]
    count: Option<u64>,
    #[arg(long, value_enum)]
    format: Option<CodeFormat>,
    /// Seed for a reproducible order.
    #[arg(long)]
    seed: Option<u64>,
    /// TOML file with the same keys; flags take precedence.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

impl GenerateArgs {
    fn into_config(self) -> GenerateConfig {
        GenerateConfig {
            year: self.year.map(RangeList::Text),
            month: self.month.map(RangeList::Text),
            day: self.day.map(RangeList::Text),
            gender: (!self.gender.is_empty()).then_some(self.gender),
            min_date: self.min_date,
            max_date: self.max_date,
            age: self.age,
            count: self.count,
            format: self.format,
            seed: self.seed,
        }
    }
}

#[derive(Args, Debug)]
struct InspectArgs {
    #[arg(value_name = "CODE", required = true)]
    codes: Vec<String>,
    /// One JSON object per line.
    #[arg(long, default_value_t = false)]
    json: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    init_logging(
        &cli.log.log_level,
        cli.log.log_format,
        cli.log.log_file.as_deref(),
    )?;

    match cli.command {
        Command::Generate(args) => run_generate(args),
        Command::Inspect(args) => run_inspect(args),
    }
}

fn run_generate(args: GenerateArgs) -> Result<(), CliError> {
    let file = match &args.config {
        Some(path) => {
            debug!(path = %path.display(), "loading config file");
            load_config(path)?
        }
        None => GenerateConfig::default(),
    };
    let request = args
        .into_config()
        .or(file)
        .resolve(Local::now().date_naive())?;

    let mut generator = CprGenerator::new(request.options)?;
    let limit = request
        .count
        .map_or(usize::MAX, |count| usize::try_from(count).unwrap_or(usize::MAX));

    let stdout = io::stdout();
    let out = BufWriter::new(stdout.lock());
    match write_codes(out, &mut generator, limit, request.format) {
        Err(CliError::Io(err)) if err.kind() == io::ErrorKind::BrokenPipe => {
            debug!("stdout closed early");
        }
        result => result?,
    }

    let stats = generator.stats();
    info!(
        seed = stats.seed,
        emitted = stats.emitted,
        excluded_by_checksum = stats.excluded_by_checksum,
        "generation finished"
    );
    Ok(())
}

/// Writes at most `limit` codes, one per line.
fn write_codes<W: Write>(
    mut out: W,
    generator: &mut CprGenerator,
    limit: usize,
    format: CodeFormat,
) -> Result<(), CliError> {
    for cpr in generator.take(limit) {
        writeln!(out, "{}", format.render(&cpr?))?;
    }
    out.flush()?;
    Ok(())
}

fn run_inspect(args: InspectArgs) -> Result<(), CliError> {
    let stdout = io::stdout();
    inspect_codes(BufWriter::new(stdout.lock()), &args.codes, args.json)
}

fn inspect_codes<W: Write>(mut out: W, codes: &[String], json: bool) -> Result<(), CliError> {
    for code in codes {
        let cpr: Cpr = code.parse()?;
        if json {
            serde_json::to_writer(&mut out, &cpr)?;
            writeln!(out)?;
            continue;
        }

        let checksum = if cpr.has_valid_checksum() {
            "valid"
        } else {
            "invalid"
        };
        writeln!(
            out,
            "{cpr}  born {}  {}  checksum {checksum}",
            cpr.date(),
            cpr.gender(),
        )?;
    }
    out.flush()?;
    Ok(())
}
