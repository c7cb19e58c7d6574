//! lzss-encode - compress a file with LZSS.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

/// Compress a file into the LZSS flag-group format.
#[derive(Parser, Debug)]
#[command(name = "lzss-encode")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// File to compress
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output path (defaults to INPUT with `.lzss` appended)
    #[arg(short, long, value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Show verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let level = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let output = args.output.unwrap_or_else(|| {
        let mut name = args.input.clone().into_os_string();
        name.push(".lzss");
        PathBuf::from(name)
    });

    let stats = lzss::encode(&args.input, &output)
        .with_context(|| format!("failed to encode {}", args.input.display()))?;

    if args.verbose {
        let ratio = if stats.bytes_in == 0 {
            0.0
        } else {
            stats.bytes_out as f64 / stats.bytes_in as f64 * 100.0
        };
        eprintln!(
            "{} bytes -> {} bytes ({:.1}%)",
            stats.bytes_in, stats.bytes_out, ratio
        );
    }
    println!("{} has been encoded to {}.", args.input.display(), output.display());
    Ok(())
}
