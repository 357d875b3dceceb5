use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, level_filters::LevelFilter};
use tracing_subscriber::EnvFilter;

use wamdis::{bytecode, listing, load_and_scan};
use wamdis::{DisasmError, LengthMode, OpcodeTable, RawBuffer, ScanConfig};

/// Disassembles (or assembles) programs in the 4-byte add/sub/ldr/str encoding.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
  /// Input file: raw instruction bytes, or assembly text with `--assemble`
  input: PathBuf,

  /// Print a table of offsets, raw bytes, and instructions
  #[arg(long)]
  listing: bool,

  /// Derive the scan length with the original tool's `size & 0xFC` mask
  #[arg(long)]
  legacy_mask: bool,

  /// Assemble INPUT and write the encoded bytes to OUTPUT
  #[arg(long, value_name = "OUTPUT")]
  assemble: Option<PathBuf>,

  /// More log output on stderr (repeatable). `RUST_LOG` takes precedence.
  #[arg(short, long, action = clap::ArgAction::Count)]
  verbose: u8,
}

fn initialize_logging(verbose: u8) {
  let level = match verbose {
    0 => LevelFilter::WARN,
    1 => LevelFilter::INFO,
    2 => LevelFilter::DEBUG,
    _ => LevelFilter::TRACE,
  };
  let filter = EnvFilter::builder()
    .with_default_directive(level.into())
    .from_env_lossy();

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .with_target(false)
    .without_time()
    .init();
}

fn disassemble(args: &Args, table: &OpcodeTable) -> Result<(), DisasmError> {
  let config = ScanConfig {
    length_mode: if args.legacy_mask { LengthMode::LegacyMask } else { LengthMode::Aligned },
    ..ScanConfig::default()
  };

  if args.listing {
    let buffer = RawBuffer::load(&args.input, &config)?;
    listing::listing(table, &buffer).printstd();
  } else {
    for line in load_and_scan(table, &args.input, &config)? {
      println!("{}", line);
    }
  }
  Ok(())
}

fn assemble(input: &Path, output: &Path, table: &OpcodeTable) -> Result<(), DisasmError> {
  let text = fs::read_to_string(input).map_err(|source| {
    DisasmError::SourceUnavailable { name: input.display().to_string(), source }
  })?;
  let bytes = bytecode::assemble(table, &text)?;
  fs::write(output, &bytes).map_err(|source| {
    DisasmError::OutputUnavailable { name: output.display().to_string(), source }
  })?;
  Ok(())
}

fn main() -> ExitCode {
  let args = Args::parse();
  initialize_logging(args.verbose);

  let table = OpcodeTable::build();
  let result = match &args.assemble {
    Some(output) => assemble(&args.input, output, &table),
    None => disassemble(&args, &table),
  };

  match result {
    Ok(()) => ExitCode::SUCCESS,
    Err(err) => {
      error!("{}", err);
      ExitCode::FAILURE
    }
  }
}
