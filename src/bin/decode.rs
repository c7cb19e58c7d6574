//! lzss-decode - expand a file written by lzss-encode.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;

/// Expand an LZSS-compressed file.
#[derive(Parser, Debug)]
#[command(name = "lzss-decode")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// File to expand
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output path (defaults to INPUT without `.lzss`, or with `.out` appended)
    #[arg(short, long, value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Show verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn default_output(input: &Path) -> PathBuf {
    match input.extension() {
        Some(ext) if ext == "lzss" => input.with_extension(""),
        _ => {
            let mut name = input.as_os_str().to_owned();
            name.push(".out");
            PathBuf::from(name)
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let level = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let output = args.output.unwrap_or_else(|| default_output(&args.input));

    let stats = lzss::decode(&args.input, &output)
        .with_context(|| format!("failed to decode {}", args.input.display()))?;

    if args.verbose {
        eprintln!("{} bytes written", stats.bytes_out);
    }
    println!("{} has been decoded to {}.", args.input.display(), output.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_output() {
        assert_eq!(default_output(Path::new("a/b.txt.lzss")), PathBuf::from("a/b.txt"));
        assert_eq!(default_output(Path::new("b.bin")), PathBuf::from("b.bin.out"));
    }
}
