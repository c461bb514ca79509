use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, LevelFilter};

use pagereplay::common::config::DEFAULT_INPUT_PATH;
use pagereplay::{PolicyKind, Simulation, SimulationConfig};

#[derive(Parser)]
#[command(
    author,
    version,
    about = "pagereplay - compare page-replacement policies on reference strings"
)]
struct Cli {
    /// Input file: global settings line followed by one line per process
    #[arg(default_value = DEFAULT_INPUT_PATH)]
    input: PathBuf,

    /// Policy to run (LIFO, MRU, OPT-Lookahead-X, LFU, LRU-X, WS); repeatable, default all
    #[arg(short, long = "policy", value_parser = parse_policy)]
    policies: Vec<PolicyKind>,

    /// Override the lookahead/window value from the input file
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    param: Option<u32>,

    /// Replay processes on separate threads
    #[arg(long)]
    parallel: bool,

    /// Print accumulated replay statistics after the reports
    #[arg(long)]
    stats: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn parse_policy(name: &str) -> std::result::Result<PolicyKind, String> {
    name.parse().map_err(|e: pagereplay::Error| e.to_string())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    // RUST_LOG, when set, overrides the -v level.
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = SimulationConfig::from_path(&cli.input)
        .with_context(|| format!("failed to load {}", cli.input.display()))?;
    info!(
        "loaded {} process(es) from {}",
        config.processes.len(),
        cli.input.display()
    );

    let sim = Simulation::new(config);
    let kinds = if cli.policies.is_empty() {
        PolicyKind::ALL.to_vec()
    } else {
        cli.policies.clone()
    };

    for kind in kinds {
        let param = match cli.param {
            Some(param) if kind.takes_parameter() => param as usize,
            _ => sim.default_parameter(kind),
        };
        let report = if cli.parallel {
            sim.run_parallel(kind, param)
        } else {
            sim.run(kind, param)
        }
        .with_context(|| format!("{} run failed", kind))?;
        print!("{}", report);
    }

    if cli.stats {
        println!("{}", sim.stats().snapshot());
    }
    Ok(())
}
