//! patrec - train and evaluate bitmap classifiers from the command line
//!
//! Loads glyph files named `<dataset>-<label>.<ext>`, trains every configured
//! classifier on the training dataset and prints one confusion report per
//! (classifier, evaluation dataset) pair.
//!
//! ```text
//! patrec data/A-*.txt data/B-*.txt
//! patrec --config experiment.json --json data/*.txt
//! ```

mod error;
mod logging;
mod output;

use clap::Parser;
use error::{CliError, Result};
use logging::{init_logging, LogConfig, LogFormat};
use patrec::bitmap::SampleStore;
use patrec::config::ExperimentConfig;
use patrec::experiment::Experiment;
use std::path::PathBuf;
use std::process::ExitCode;

/// Bitmap digit classification experiments
#[derive(Parser, Debug)]
#[command(name = "patrec")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Glyph files named `<dataset>-<label>.<ext>`
    #[arg(required = true, value_name = "FILE")]
    files: Vec<PathBuf>,

    /// JSON experiment configuration (defaults are used when omitted)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Override the training dataset
    #[arg(long, value_name = "ID")]
    train: Option<String>,

    /// Output reports as JSON lines
    #[arg(long)]
    json: bool,

    /// Verbose logging on stderr (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Log format on stderr
    #[arg(long, value_enum, default_value_t = LogFormat::Pretty)]
    log_format: LogFormat,
}

fn run(cli: &Cli) -> Result<()> {
    init_logging(&LogConfig::from_verbosity(cli.verbose, cli.quiet, cli.log_format))?;

    let mut config = match &cli.config {
        Some(path) => ExperimentConfig::load(path)?,
        None => ExperimentConfig::default(),
    };
    if let Some(train) = &cli.train {
        config = config.with_train_dataset(train.as_str());
    }

    let store = SampleStore::load(&cli.files)?;
    if store.is_empty() {
        return Err(CliError::NoSamples(cli.files.len()));
    }
    tracing::info!(
        files = cli.files.len(),
        datasets = ?store.dataset_ids().collect::<Vec<_>>(),
        "loaded samples"
    );

    let reports = Experiment::new(config).run(&store)?;
    output::write_reports(&mut std::io::stdout().lock(), &reports, cli.json)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
