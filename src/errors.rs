//! Error types. Only source acquisition is fatal to a scan; decode-time anomalies such as unknown
//! opcodes are reported inline in the output instead of being raised here.

use std::io;

use thiserror::Error;

use crate::bytecode::Format;

#[derive(Debug, Error)]
pub enum DisasmError {
  /// The source could not be opened, sized, or read in full.
  #[error("can't open {name}: {source}")]
  SourceUnavailable {
    name: String,
    #[source]
    source: io::Error
  },

  #[error("can't write {name}: {source}")]
  OutputUnavailable {
    name: String,
    #[source]
    source: io::Error
  },

  #[error(transparent)]
  Assembly(#[from] AssemblyError),
}

/// Raised while parsing assembly text. Lines are numbered from 1.
#[derive(Debug, Error, Clone, Eq, PartialEq)]
pub enum AssemblyError {
  #[error("Error on line {line}: {name} is not an operation.")]
  NotAnOperation {
    line: usize,
    name: String
  },

  #[error("Error on line {line}: {mnemonic} takes {format} operands.")]
  WrongOperands {
    line: usize,
    mnemonic: &'static str,
    format: Format
  },
}

#[derive(Debug, Error, Clone, Eq, PartialEq)]
pub enum TableError {
  #[error("an opcode table holds at most 256 entries, but {0} were given")]
  TooManyEntries(usize),

  #[error("mnemonic `{0}` is defined more than once")]
  DuplicateMnemonic(&'static str),
}
