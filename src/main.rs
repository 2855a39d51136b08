//! `learn`: run KNN, Naive Bayes or K-Means on CSV input.
//!
//! # Modes
//!
//! - `learn --train T.csv --test S.csv -k 3`: KNN, prints per-label counts
//! - `learn --train T.csv --test S.csv -c 1`: Naive Bayes with Laplace smoothing
//! - `learn --train nodes.txt -d e2 0,0 10,10`: K-Means from the given centroids
//!
//! Exit status is 0 on success and 1 on any error.

use clap::Parser;
use learnkit::runner::execute;
use learnkit::RunConfig;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::{fmt, EnvFilter};

/// Classic learning algorithms from first principles
#[derive(Parser)]
#[command(name = "learn")]
#[command(version)]
#[command(about = "KNN, Naive Bayes and K-Means over CSV data")]
struct Cli {
    /// Training data (CSV, label last), or node file for K-Means
    #[arg(long)]
    train: PathBuf,

    /// Test data (CSV, label last)
    #[arg(long)]
    test: Option<PathBuf>,

    /// Number of nearest neighbours (selects KNN)
    #[arg(short = 'k')]
    k: Option<usize>,

    /// Laplace correction (selects Naive Bayes)
    #[arg(short = 'c')]
    c: Option<f64>,

    /// Distance function `manh` or `e2` (selects K-Means)
    #[arg(short = 'd', long = "distance")]
    distance: Option<String>,

    /// Hold out this fraction of the shuffled training data instead of --test
    #[arg(long)]
    test_size: Option<f64>,

    /// Seed for the --test-size shuffle
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Give up if K-Means has not converged after this many iterations
    #[arg(long)]
    max_iter: Option<usize>,

    /// Show predictions and derivations
    #[arg(short, long)]
    verbose: bool,

    /// Initial K-Means centroids, e.g. `0,0 10,10`
    centroids: Vec<String>,
}

impl From<Cli> for RunConfig {
    fn from(cli: Cli) -> Self {
        RunConfig {
            train: cli.train,
            test: cli.test,
            k: cli.k,
            c: cli.c,
            distance: cli.distance,
            centroids: cli.centroids,
            test_size: cli.test_size,
            seed: cli.seed,
            max_iter: cli.max_iter,
            verbose: cli.verbose,
        }
    }
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() { ExitCode::FAILURE } else { ExitCode::SUCCESS };
        }
    };

    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true)
        .with_writer(std::io::stderr)
        .init();

    let config = RunConfig::from(cli);
    match execute(&config) {
        Ok(lines) => {
            for line in lines {
                println!("{}", line);
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "run failed");
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
