//! Command-line entrypoint: `parallel-pi <num_threads> <num_points>`.

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser, ValueEnum};
use parallel_pi::{ParallelSampler, Reduction, SamplerConfig, SeedSource};
use std::process::ExitCode;
use tracing::debug;

/// Estimate π by parallel Monte-Carlo sampling of the unit square
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Number of worker threads
    #[arg(allow_negative_numbers = true)]
    num_threads: i64,

    /// Total number of random points
    #[arg(allow_negative_numbers = true)]
    num_points: i64,

    /// Base seed; worker i is seeded with SEED + i instead of the clock
    #[arg(long)]
    seed: Option<u64>,

    /// How worker hit counts are combined
    #[arg(long, value_enum, default_value_t = ReductionArg::Join)]
    reduction: ReductionArg,

    /// Print a summary after the estimate
    #[arg(long)]
    report: bool,

    /// Log filter directive, e.g. "info" or "parallel_pi=debug"
    #[arg(long, value_name = "LEVEL", default_value = "warn")]
    log_level: String,

    #[arg(long, value_enum, default_value_t = LogFormat::Pretty)]
    log_format: LogFormat,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ReductionArg {
    Join,
    Atomic,
}

impl From<ReductionArg> for Reduction {
    fn from(arg: ReductionArg) -> Self {
        match arg {
            ReductionArg::Join => Reduction::Join,
            ReductionArg::Atomic => Reduction::Atomic,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogFormat {
    Pretty,
    Json,
}

/// Configures structured logging on stderr; stdout carries only results.
fn configure_logger(args: &Args) -> Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_new(&args.log_level)
        .with_context(|| format!("invalid log level {:?}", args.log_level))?;

    match args.log_format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init(),
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().pretty().with_writer(std::io::stderr))
            .init(),
    }
    Ok(())
}

fn run(args: &Args) -> Result<()> {
    let seeds = match args.seed {
        Some(base) => SeedSource::Base(base),
        None => SeedSource::Clock,
    };
    let config = SamplerConfig::new(args.num_threads, args.num_points)
        .and_then(|cfg| cfg.with_seeds(seeds))
        .context("invalid arguments")?
        .with_reduction(args.reduction.into());

    let estimate = ParallelSampler::new(config)
        .run()
        .context("sampling failed")?;

    println!("{}", estimate.pi);

    if args.report {
        println!("Monte Carlo Pi Estimation");
        println!("Threads: {}", estimate.threads);
        println!("Total samples: {}", estimate.samples);
        println!("Points inside circle: {}", estimate.hits);
        println!("Pi estimate: {:.6}", estimate.pi);
        println!("Error: {:.6}", estimate.error());
        println!("Elapsed: {:?}", estimate.elapsed);
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) => match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => err.exit(),
            _ => {
                eprintln!("{err}");
                return ExitCode::from(1);
            }
        },
    };

    if let Err(e) = configure_logger(&args) {
        eprintln!("error: {e:#}");
        return ExitCode::from(1);
    }

    if let Err(e) = run(&args) {
        debug!(component = "main", event = "run_failed", error = ?e, "estimation failed");
        eprintln!("error: {e:#}");
        eprintln!("{}", Args::command().render_usage());
        return ExitCode::from(1);
    }

    ExitCode::SUCCESS
}
