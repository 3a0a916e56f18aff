//! Count pancake flips over every permutation of order N.
//!
//! Usage: cargo run --release --bin fannkuch -- [N] [--trace] [--coverage]
//!                                           [--iterations K] [--timings] [-v]
//!
//! Example:
//!   cargo run --release --bin fannkuch -- 10 --iterations 5 --timings

use std::io::{self, BufWriter, Write};

use anyhow::{Context, Result};
use clap::Parser;
use pfannkuchen::Order;
use pfannkuchen::runner::run_iterations;
use pfannkuchen::trace::{Coverage, LineTrace};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "fannkuch")]
#[command(about = "Maximum prefix-reversal flips over all permutations of order N")]
struct Args {
    /// Permutation order.
    #[arg(default_value_t = Order::DEFAULT)]
    n: Order,

    /// Print one line of source-like text per executed block before the result.
    #[arg(long)]
    trace: bool,

    /// Print how often each block executed after the result.
    #[arg(long)]
    coverage: bool,

    /// Number of in-process iterations to run.
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    iterations: u32,

    /// Print per-iteration wall-clock times (seconds) as a JSON array.
    #[arg(long)]
    timings: bool,

    /// Raise log verbosity (-v info, -vv debug, -vvv trace). Overridden by RUST_LOG.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    run(&args, &mut out)?;
    out.flush().context("flushing stdout")?;
    Ok(())
}

fn run<W: Write>(args: &Args, out: &mut W) -> Result<()> {
    let n = args.n.get();
    if args.trace || args.coverage {
        if args.iterations > 1 || args.timings {
            warn!("--iterations and --timings are ignored while tracing");
        }
        return traced(n, args, out);
    }

    let report = run_iterations(n, args.iterations as usize);
    info!(n, iterations = report.timings.len(), "finished");
    writeln!(out, "{}", report.result).context("writing result")?;
    if args.timings {
        writeln!(out, "{}", report.timings_json()?).context("writing timings")?;
    }
    Ok(())
}

fn traced<W: Write>(n: usize, args: &Args, out: &mut W) -> Result<()> {
    let line_trace = if args.trace {
        Some(LineTrace::new(&mut *out))
    } else {
        None
    };
    let coverage = args.coverage.then(Coverage::new);
    let mut sink = (line_trace, coverage);

    let result = pfannkuchen::fannkuch_traced(n, &mut sink);

    let (line_trace, coverage) = sink;
    if let Some(line_trace) = line_trace {
        info!(lines = line_trace.lines(), "trace written");
        line_trace.finish().context("writing trace")?;
    }
    writeln!(out, "{result}").context("writing result")?;
    if let Some(coverage) = coverage {
        for (event, hits) in coverage.iter() {
            let name = format!("{event:?}");
            writeln!(out, "{hits:>12}  {name:<16} {}", event.source_line())
                .context("writing coverage")?;
        }
    }
    Ok(())
}
