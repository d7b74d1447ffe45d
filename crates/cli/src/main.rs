use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod driver;

use driver::{Driver, OutputMode};

/// Play chess from the terminal with coordinate moves such as "e2 e4".
#[derive(Parser, Debug)]
#[command(name = "chess-rules", version)]
struct Args {
    /// Print each outcome as one JSON line instead of drawing the board
    #[arg(long)]
    json: bool,

    /// Read commands from a file instead of standard input
    #[arg(long, value_name = "PATH")]
    script: Option<PathBuf>,

    /// Start a fresh game after a resignation instead of exiting
    #[arg(long = "continue")]
    keep_playing: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let mode = if args.json {
        OutputMode::Json
    } else {
        OutputMode::Board {
            prompt: args.script.is_none(),
        }
    };
    let mut driver = Driver::new(mode, args.keep_playing);
    let stdout = io::stdout();

    match &args.script {
        Some(path) => {
            let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
            driver.run(BufReader::new(file), stdout.lock())
        }
        None => driver.run(io::stdin().lock(), stdout.lock()),
    }
}
