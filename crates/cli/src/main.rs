// nettow CLI - parent Sample staging for net tow subsample data
//
// Step 1 reconciles a subsample file into a parent Sample CSV; step 2 loads
// that CSV into the database named by --database.

mod exit_codes;
mod load;
mod make_csv;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::LevelFilter;

use exit_codes::{io_exit_code, recon_exit_code, EXIT_CONFIG, EXIT_SUCCESS, EXIT_USAGE};

#[derive(Parser, Debug)]
#[command(name = "nettow")]
#[command(about = "Load parent Samples for Tow Net data")]
#[command(long_version = long_version())]
#[command(version)]
#[command(after_help = "\
Examples:
  Step 1 - Create .csv file of parent Sample information:
    nettow --database stoqs_simz_aug2013_t --subsampleFile 2013_SIMZ_TowNets_STOQS.csv \\
           --csvFile 2013_SIMZ_TowNet_ParentSamples.csv

  Step 2 - Load parent Sample information:
    nettow --database stoqs_simz_aug2013_t --loadFile 2013_SIMZ_TowNet_ParentSamples.csv

Database aliases resolve through settings.toml ($NETTOW_CONFIG or the user
config directory).")]
struct Cli {
    /// Database alias
    #[arg(short = 'd', long)]
    database: String,

    /// File name containing analysis data from net tows in subsample format
    #[arg(short = 's', long = "subsampleFile", value_name = "FILE")]
    subsample_file: Option<PathBuf>,

    /// Output comma separated value file containing parent Sample data
    #[arg(short = 'c', long = "csvFile", value_name = "FILE")]
    csv_file: Option<PathBuf>,

    /// Load parent Sample data into database
    #[arg(short = 'l', long = "loadFile", value_name = "FILE")]
    load_file: Option<PathBuf>,

    /// Turn on verbose output. Higher number = more output.
    #[arg(
        short = 'v',
        long,
        num_args = 0..=1,
        default_missing_value = "1",
        value_parser = clap::value_parser!(u8).range(1..=3)
    )]
    verbose: Option<u8>,
}

/// What a run does, decided from the supplied file options.
#[derive(Debug, PartialEq)]
enum Mode {
    MakeCsv {
        subsample_file: PathBuf,
        csv_file: PathBuf,
    },
    Load {
        load_file: PathBuf,
    },
}

impl Cli {
    /// Exactly one of {--subsampleFile + --csvFile, --loadFile}.
    fn mode(&self) -> Result<Mode, CliError> {
        match (&self.subsample_file, &self.csv_file, &self.load_file) {
            (Some(subsample_file), Some(csv_file), None) => Ok(Mode::MakeCsv {
                subsample_file: subsample_file.clone(),
                csv_file: csv_file.clone(),
            }),
            (None, None, Some(load_file)) => Ok(Mode::Load {
                load_file: load_file.clone(),
            }),
            (_, _, Some(_)) => Err(CliError::usage(
                "--loadFile cannot be combined with --subsampleFile or --csvFile",
            )),
            (Some(_), None, None) => Err(CliError::usage(
                "Must include --csvFile argument with --subsampleFile option",
            )),
            (None, Some(_), None) => Err(CliError::usage(
                "Must include --subsampleFile argument with --csvFile option",
            )),
            (None, None, None) => Err(CliError::usage(
                "Must provide either --subsampleFile or --loadFile option",
            )),
        }
    }
}

fn long_version() -> &'static str {
    concat!(
        env!("CARGO_PKG_VERSION"),
        " (", env!("NETTOW_GIT_HASH"), ")",
        "\nengine:  nettow-recon ", env!("CARGO_PKG_VERSION"),
    )
}

/// Map `--verbose` to a log level; `RUST_LOG` still overrides.
fn log_level(verbose: Option<u8>) -> LevelFilter {
    match verbose {
        None => LevelFilter::Warn,
        Some(1) => LevelFilter::Info,
        Some(2) => LevelFilter::Debug,
        Some(_) => LevelFilter::Trace,
    }
}

fn init_logging(verbose: Option<u8>) {
    env_logger::Builder::new()
        .filter_level(log_level(verbose))
        .parse_default_env()
        .format_timestamp(None)
        .format_target(false)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = cli.mode().and_then(|mode| match mode {
        Mode::MakeCsv {
            subsample_file,
            csv_file,
        } => make_csv::cmd_make_csv(&cli.database, &subsample_file, &csv_file),
        Mode::Load { load_file } => load::cmd_load_samples(&cli.database, &load_file),
    });

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn usage(msg: impl Into<String>) -> Self {
        Self {
            code: EXIT_USAGE,
            message: msg.into(),
            hint: Some("run 'nettow --help' for examples".to_string()),
        }
    }

    pub fn io(err: nettow_io::IoError) -> Self {
        Self { code: io_exit_code(&err), message: err.to_string(), hint: None }
    }

    pub fn recon(err: nettow_recon::ReconError) -> Self {
        Self { code: recon_exit_code(&err), message: err.to_string(), hint: None }
    }

    pub fn config(err: nettow_config::ConfigError) -> Self {
        Self { code: EXIT_CONFIG, message: err.to_string(), hint: None }
    }

    /// Add a hint to an existing error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}
