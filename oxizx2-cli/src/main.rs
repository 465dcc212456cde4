//! dzx2 - ZX2 data decompressor
//!
//! Decompresses a single `.zx2` file produced by the ZX2 compressor.

mod utils;

use clap::{ArgAction, Parser};
use oxizx2::{Zx2Config, decompress_stream};
use std::path::PathBuf;
use tracing::{Level, debug};
use utils::{CliError, create_output, infer_output_path, open_input};

#[derive(Parser)]
#[command(name = "dzx2")]
#[command(author, version, about = "ZX2 data decompressor")]
#[command(long_about = "
Decompresses a file produced by the ZX2 compressor.
The output name defaults to the input name without its .zx2 suffix.
The format options must match those used for compression.

Examples:
  dzx2 screen.scr.zx2
  dzx2 -f data.zx2 data.bin
  dzx2 -z -x -y tiny.zx2 tiny.bin
")]
struct Cli {
    /// Force overwrite of output file
    #[arg(short = 'f', long)]
    force: bool,

    /// Ignore default offset (start with offset 0 instead of 1)
    #[arg(short = 'z', long)]
    zero_offset: bool,

    /// Skip length increment for copies from a new offset
    #[arg(short = 'x', long)]
    skip_increment: bool,

    /// Limit block length to 255
    #[arg(short = 'y', long)]
    limit_length: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Compressed input file
    input: PathBuf,

    /// Output file (defaults to input without .zx2)
    output: Option<PathBuf>,
}

impl Cli {
    fn config(&self) -> Zx2Config {
        let mut config = Zx2Config::STANDARD;
        if self.zero_offset {
            config = config.with_zero_default_offset();
        }
        if self.skip_increment {
            config = config.with_skipped_increment();
        }
        if self.limit_length {
            config = config.with_limited_length();
        }
        config
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    println!("DZX2 v{}: ZX2 data decompressor", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run(&cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: &Cli) -> Result<(), CliError> {
    let output_path = match &cli.output {
        Some(path) => path.clone(),
        None => infer_output_path(&cli.input)?,
    };

    let input = open_input(&cli.input)?;
    let output = create_output(&output_path, cli.force)?;
    debug!(
        input = %cli.input.display(),
        output = %output_path.display(),
        "decompressing"
    );

    let stats = decompress_stream(input, output, cli.config())
        .map_err(|source| CliError::decode(&cli.input, &output_path, source))?;

    println!(
        "File decompressed from {} to {} bytes!",
        stats.input_bytes, stats.output_bytes
    );
    Ok(())
}
