/*!
  Acquires instruction bytes from a source and drives the decoder over them one word at a time.

  A scan never holds more than `ScanConfig::capacity` bytes. Of those, only the first
  `logical_length` bytes are decoded, and that length is always a multiple of the word size.
*/

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use tracing::{debug, info};
#[cfg(feature = "trace_decode")]
use tracing::trace;

use crate::bytecode::{decode_one, Decoded, InstructionWord, WORD_SIZE};
use crate::errors::DisasmError;
use crate::opcode_table::OpcodeTable;

/// Default buffer capacity in bytes.
pub const CAPACITY: usize = 512;
/// The mask the original tool applied to the file size.
const LEGACY_MASK: u64 = 0x0FC;

/// How the number of bytes to decode is derived from the source size.
#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub enum LengthMode {
  /// `min(size, capacity)`, rounded down to a whole word.
  Aligned,
  /// `size & 0xFC`. Caps a scan at 252 bytes and drops every size bit above bit 7, so a 1024 byte
  /// source scans as empty. Kept for byte-exact comparison with the original tool's output.
  LegacyMask,
}

impl Default for LengthMode {
  fn default() -> Self {
    LengthMode::Aligned
  }
}

#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub struct ScanConfig {
  pub capacity    : usize,
  pub length_mode : LengthMode,
}

impl Default for ScanConfig {
  fn default() -> Self {
    ScanConfig {
      capacity: CAPACITY,
      length_mode: LengthMode::default(),
    }
  }
}

/// The number of leading bytes of a `total_size` byte source that are decoded.
pub fn logical_length(total_size: u64, config: &ScanConfig) -> usize {
  let held = total_size.min(config.capacity as u64) as usize;
  let aligned = held & !(WORD_SIZE - 1);
  match config.length_mode {
    LengthMode::Aligned => aligned,
    // Clamped so it can never run past what a small buffer actually holds.
    LengthMode::LegacyMask => ((total_size & LEGACY_MASK) as usize).min(aligned),
  }
}

/// Bytes read from a source, owned by a single scan.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct RawBuffer {
  bytes          : Vec<u8>,
  logical_length : usize,
}

impl RawBuffer {

  /// Copies up to `config.capacity` bytes of an in-memory source.
  pub fn from_bytes(source: &[u8], config: &ScanConfig) -> RawBuffer {
    let held = source.len().min(config.capacity);
    RawBuffer {
      bytes: source[..held].to_vec(),
      logical_length: logical_length(source.len() as u64, config),
    }
  }

  /**
    Reads `min(total_size, config.capacity)` bytes from `reader`. Getting fewer bytes than that is
    a failure, reported as `SourceUnavailable` under `name`.
  */
  pub fn read_from<R: Read>(name: &str, mut reader: R, total_size: u64, config: &ScanConfig)
    -> Result<RawBuffer, DisasmError>
  {
    let expected = total_size.min(config.capacity as u64) as usize;
    let mut bytes = vec![0u8; expected];
    reader
      .read_exact(&mut bytes)
      .map_err(|source| DisasmError::SourceUnavailable { name: name.to_string(), source })?;

    Ok(RawBuffer {
      bytes,
      logical_length: logical_length(total_size, config),
    })
  }

  pub fn load(path: &Path, config: &ScanConfig) -> Result<RawBuffer, DisasmError> {
    let name = path.display().to_string();
    let unavailable = |source: io::Error| {
      DisasmError::SourceUnavailable { name: name.clone(), source }
    };

    let file = File::open(path).map_err(unavailable)?;
    let total_size = file.metadata().map_err(unavailable)?.len();
    let buffer = RawBuffer::read_from(&name, file, total_size, config)?;

    info!(
      source = %name,
      total_size,
      logical_length = buffer.logical_length,
      "loaded"
    );
    Ok(buffer)
  }

  pub fn logical_length(&self) -> usize {
    self.logical_length
  }

  /// The bytes held, including any past the logical length.
  pub fn bytes(&self) -> &[u8] {
    &self.bytes
  }

  /// Each instruction word within the logical length, paired with its byte offset.
  pub fn words(&self) -> impl Iterator<Item = (usize, InstructionWord)> + '_ {
    self.bytes[..self.logical_length]
      .chunks_exact(WORD_SIZE)
      .filter_map(InstructionWord::from_slice)
      .enumerate()
      .map(|(idx, word)| (idx * WORD_SIZE, word))
  }
}

/// Decodes every word of `buffer` in order. Unknown opcodes do not stop the scan.
pub fn scan(table: &OpcodeTable, buffer: &RawBuffer) -> Vec<Decoded> {
  let mut unknown = 0usize;

  let lines: Vec<Decoded> =
    buffer.words().map(|(offset, word)| {
      let decoded = decode_one(table, word);

      #[cfg(feature = "trace_decode")]
      trace!(offset, word = %word, instruction = %decoded.text(), "decoded");

      if let Decoded::Unknown(opcode) = decoded {
        unknown += 1;
        debug!(offset, opcode, "undefined instruction");
      }
      decoded
    }).collect();

  debug!(words = lines.len(), unknown, "scan complete");
  lines
}

/// Loads `path` and decodes it. Nothing is decoded if the source can't be read.
pub fn load_and_scan(table: &OpcodeTable, path: &Path, config: &ScanConfig)
  -> Result<Vec<Decoded>, DisasmError>
{
  let buffer = RawBuffer::load(path, config)?;
  Ok(scan(table, &buffer))
}
