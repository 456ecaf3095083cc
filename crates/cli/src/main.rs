//! Cache simulator CLI.
//!
//! This binary drives the cache model from the command line. It performs:
//! 1. **Single run:** Replay a trace (file or stdin) against one configuration and print
//!    the statistics report, or emit it as JSON.
//! 2. **Sweep:** Replay a trace against a whole parameter space and write one CSV row per
//!    configuration with its average access time and total storage.

use std::fs;
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use vcsim_core::config::{CacheConfig, ReplacePolicy, StoragePolicy};
use vcsim_core::sim::sweep::{self, SweepPoint, SweepSpace};
use vcsim_core::sim::trace::{self, TraceReader};
use vcsim_core::{CacheStats, Simulator};

#[derive(Parser, Debug)]
#[command(
    name = "vcsim",
    author,
    version,
    about = "Trace-driven set-associative cache simulator with a victim cache",
    long_about = "Replay a memory trace ('r|w <hex address>' per line) against a set-associative cache backed by a victim cache.\n\nExamples:\n  vcsim run -i traces/gcc.trace -c 15 -b 5 -s 3 -v 2 -t B -r L\n  cat traces/gcc.trace | vcsim run --json\n  vcsim sweep -i traces/gcc.trace -o results.csv"
)]
struct Cli {
    /// Only log warnings and errors (RUST_LOG overrides).
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Replay a trace against one cache configuration.
    Run(RunArgs),

    /// Replay a trace against every configuration of a parameter space.
    Sweep(SweepArgs),
}

#[derive(Args, Debug)]
struct RunArgs {
    /// Trace file; reads stdin when omitted.
    #[arg(short = 'i', long)]
    trace: Option<PathBuf>,

    /// JSON configuration file; command-line parameters override its fields.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Total data storage is 2^C bytes.
    #[arg(short = 'c', long = "total-bits")]
    c: Option<u32>,

    /// Block size is 2^B bytes.
    #[arg(short = 'b', long = "block-bits")]
    b: Option<u32>,

    /// Each set holds 2^S blocks.
    #[arg(short = 's', long = "set-bits")]
    s: Option<u32>,

    /// The victim cache holds 2^V blocks.
    #[arg(short = 'v', long = "victim-bits")]
    v: Option<u32>,

    /// Storage policy: B (blocking) or S (sub-blocking).
    #[arg(short = 't', long = "storage")]
    storage: Option<StoragePolicy>,

    /// Replacement policy: L (LRU) or N (NMRU-FIFO).
    #[arg(short = 'r', long = "replace")]
    replace: Option<ReplacePolicy>,

    /// Print the statistics as JSON.
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug)]
struct SweepArgs {
    /// Trace file.
    #[arg(short = 'i', long)]
    trace: PathBuf,

    /// CSV output file; writes to stdout when omitted.
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Smallest total size exponent.
    #[arg(long, default_value_t = 15)]
    c_min: u32,

    /// Largest total size exponent.
    #[arg(long, default_value_t = 15)]
    c_max: u32,

    /// Smallest block size exponent.
    #[arg(long, default_value_t = 6)]
    b_min: u32,

    /// Largest block size exponent.
    #[arg(long, default_value_t = 13)]
    b_max: u32,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.quiet);

    match cli.command {
        Commands::Run(args) => cmd_run(&args),
        Commands::Sweep(args) => cmd_sweep(&args),
    }
}

/// Installs the stderr log subscriber; `RUST_LOG` takes precedence over `quiet`.
fn init_tracing(quiet: bool) {
    let fallback = if quiet { "warn" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

/// Builds the configuration from the optional JSON file and the command-line overrides.
fn resolve_config(args: &RunArgs) -> Result<CacheConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("could not read config '{}'", path.display()))?;
            CacheConfig::from_json(&text)
                .with_context(|| format!("invalid config '{}'", path.display()))?
        }
        None => CacheConfig::default(),
    };
    if let Some(c) = args.c {
        config.c = c;
    }
    if let Some(b) = args.b {
        config.b = b;
    }
    if let Some(s) = args.s {
        config.s = s;
    }
    if let Some(v) = args.v {
        config.v = v;
    }
    if let Some(storage) = args.storage {
        config.storage_policy = storage;
    }
    if let Some(replace) = args.replace {
        config.replace_policy = replace;
    }
    Ok(config)
}

/// Replays the trace through one simulator and reports its statistics.
fn cmd_run(args: &RunArgs) -> Result<()> {
    let config = resolve_config(args)?;
    let mut sim = Simulator::setup(&config).context("invalid cache configuration")?;
    info!(geometry = %sim.geometry(), "replaying trace");

    match &args.trace {
        Some(path) => {
            let file = fs::File::open(path)
                .with_context(|| format!("could not open trace '{}'", path.display()))?;
            replay(&mut sim, BufReader::new(file), path)?;
        }
        None => replay(&mut sim, io::stdin().lock(), Path::new("<stdin>"))?,
    }

    let stats = sim.complete();
    report(&stats, args.json)
}

fn replay<R: BufRead>(sim: &mut Simulator, reader: R, source: &Path) -> Result<()> {
    for event in TraceReader::new(reader) {
        let event = event.with_context(|| format!("bad trace '{}'", source.display()))?;
        let _ = sim.access(event.op, event.address);
    }
    Ok(())
}

fn report(stats: &CacheStats, json: bool) -> Result<()> {
    let mut out = io::stdout().lock();
    if json {
        serde_json::to_writer_pretty(&mut out, stats).context("could not serialize statistics")?;
        writeln!(out)?;
    } else {
        writeln!(out, "{stats}")?;
    }
    out.flush()?;
    Ok(())
}

/// Runs the parameter sweep and writes one CSV row per configuration.
fn cmd_sweep(args: &SweepArgs) -> Result<()> {
    let events = trace::load_trace(&args.trace)
        .with_context(|| format!("could not load trace '{}'", args.trace.display()))?;
    let space = SweepSpace {
        c: args.c_min..=args.c_max,
        b: args.b_min..=args.b_max,
        ..SweepSpace::default()
    };
    info!(
        events = events.len(),
        points = space.configs().len(),
        "running sweep"
    );

    let points = sweep::run_sweep(&space, &events).context("sweep hit an invalid configuration")?;

    match &args.output {
        Some(path) => {
            let file = fs::File::create(path)
                .with_context(|| format!("could not create '{}'", path.display()))?;
            write_csv(file, &points)?;
        }
        None => write_csv(io::stdout().lock(), &points)?,
    }

    if let Some(best) = sweep::best_by_aat(&points) {
        info!(
            c = best.c,
            b = best.b,
            s = best.s,
            v = best.v,
            t = %best.t,
            r = %best.r,
            aat = best.aat,
            total_size_bytes = best.total_size_bytes,
            "lowest average access time"
        );
    }
    Ok(())
}

/// Writes one CSV row per sweep point, with a header row.
fn write_csv<W: Write>(sink: W, points: &[SweepPoint]) -> Result<()> {
    let mut writer = csv::Writer::from_writer(sink);
    for point in points {
        writer.serialize(point)?;
    }
    writer.flush()?;
    Ok(())
}
