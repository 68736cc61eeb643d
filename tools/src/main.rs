use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use sszgen_tools::{select_suites, write_suite, SuiteReport};
use tracing::info;
use tracing_subscriber::EnvFilter;
use vectors::{GenLimits, Generator, SuiteId};

#[derive(Parser)]
#[command(
    name = "sszgen",
    version,
    about = "Generate SSZ conformance test vectors"
)]
struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List every suite id with its title and release.
    List,
    /// Generate suites and write them as JSON documents.
    Generate {
        /// Directory that receives one `<id>.json` per suite.
        #[arg(long, default_value = "vectors-out")]
        out_dir: PathBuf,
        /// Seed applied to every suite.
        #[arg(long, default_value_t = 0)]
        seed: u64,
        /// Glob over suite ids, e.g. `uint*`.
        #[arg(long)]
        suite: Option<String>,
        /// Use small generation limits.
        #[arg(long)]
        testing_limits: bool,
        /// Print the reports as JSON instead of one line per suite.
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr; stdout carries the listing or the reports.
    let filter = match cli.verbose {
        0 => EnvFilter::new("info"),
        1 => EnvFilter::new("info,vectors=debug"),
        _ => EnvFilter::new("debug,vectors=trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::List => {
            for id in SuiteId::ALL {
                println!("{:<20} {:<32} {}", id.name(), id.title(), id.release());
            }
            Ok(())
        }
        Command::Generate {
            out_dir,
            seed,
            suite,
            testing_limits,
            json,
        } => {
            let limits = if testing_limits {
                GenLimits::for_testing()
            } else {
                GenLimits::default()
            };
            let reports = run_generate(&out_dir, seed, suite.as_deref(), limits)?;
            if json {
                let output = serde_json::to_string_pretty(&reports).context("serialize reports")?;
                println!("{output}");
            } else {
                for report in &reports {
                    print_report(report);
                }
            }
            Ok(())
        }
    }
}

fn run_generate(
    out_dir: &Path,
    seed: u64,
    pattern: Option<&str>,
    limits: GenLimits,
) -> Result<Vec<SuiteReport>> {
    let ids = select_suites(pattern)?;
    let mut generator = Generator::new(limits).context("invalid generation limits")?;

    let mut reports = Vec::with_capacity(ids.len());
    for id in ids {
        let suite = generator
            .generate(id, seed)
            .with_context(|| format!("generate suite {id}"))?;
        let report = write_suite(out_dir, id, &suite)?;
        info!(
            suite = report.id,
            cases = report.cases,
            path = %report.path.display(),
            "wrote suite"
        );
        reports.push(report);
    }
    Ok(reports)
}

fn print_report(report: &SuiteReport) {
    println!(
        "{}: {} cases ({} invalid), {} distinct schemas, digest {}",
        report.id, report.cases, report.invalid, report.distinct_schemas, report.digest
    );
}
