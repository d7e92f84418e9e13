//! stripefx - apply 3x3 image filters to a stream of JSON jobs
//!
//! Reads `{"inPath", "outPath", "effects"}` records from stdin (or a file)
//! and writes each filtered image as a 16-bit RGBA PNG.

use anyhow::{bail, Context, Result};
use clap::Parser;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod ingest;
mod job;
mod orchestrator;

use orchestrator::Mode;

#[derive(Parser)]
#[command(name = "stripefx")]
#[command(author, version, about = "Apply grayscale, sharpen, blur and edge-detect filters to a stream of image jobs")]
#[command(long_about = "
Reads concatenated JSON job records and applies each job's effects in order.

Record format:
  {\"inPath\": \"in.png\", \"outPath\": \"out/in.png\", \"effects\": [\"G\", \"B\"]}

Effect codes:
  G  grayscale      S  sharpen
  E  edge detect    B  blur

Examples:
  stripefx < jobs.json                  # One job at a time
  stripefx -p 4 < jobs.json             # All jobs at once, 5 stripes per image
  stripefx -p 12 --readers 4 -i jobs.json -j 8
  RUST_LOG=stripefx_ops=debug stripefx -p 2 < jobs.json
")]
struct Cli {
    /// Run all jobs concurrently and split each image into N+1 column stripes
    #[arg(short = 'p', long, value_name = "N", value_parser = clap::value_parser!(u32).range(1..))]
    parallel: Option<u32>,

    /// Job stream readers in parallel mode (default: ceil(N / 5))
    #[arg(long, value_name = "N", requires = "parallel", value_parser = clap::value_parser!(u32).range(1..))]
    readers: Option<u32>,

    /// Number of threads (0 = auto)
    #[arg(short = 'j', long, default_value = "0")]
    threads: usize,

    /// Read jobs from FILE instead of stdin
    #[arg(short, long, value_name = "FILE")]
    input: Option<PathBuf>,

    /// Verbose output (-v info, -vv debug, -vvv trace); RUST_LOG takes precedence
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn mode(&self) -> Mode {
        match (self.parallel, self.readers) {
            (None, _) => Mode::Sequential,
            (Some(workers), None) => Mode::parallel(workers as usize),
            (Some(workers), Some(readers)) => Mode::Parallel {
                workers: workers as usize,
                readers: readers as usize,
            },
        }
    }
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
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Configure thread pool
    if cli.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(cli.threads)
            .build_global()
            .context("Failed to configure thread pool")?;
    }

    let mode = cli.mode();
    let summary = match &cli.input {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open job stream {}", path.display()))?;
            orchestrator::run(BufReader::new(file), mode)
        }
        None => orchestrator::run(BufReader::new(std::io::stdin()), mode),
    };

    println!("{}", summary);

    if !summary.is_success() {
        bail!("{} of {} jobs failed", summary.failed(), summary.total());
    }
    Ok(())
}
