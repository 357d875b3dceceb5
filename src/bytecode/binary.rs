/*!
  This module is responsible for the encoding and decoding of binary instructions. Decoding is
  driven by an `OpcodeTable`: the opcode selects a descriptor, and the descriptor's format selects
  the operand decoder.
*/

use std::fmt::{Display, Formatter};

use super::{InstructionWord, Operands};
use crate::opcode_table::OpcodeTable;

/// A successfully decoded instruction word, tagged with its mnemonic.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
pub struct DecodedLine {
  pub opcode   : u8,
  pub mnemonic : &'static str,
  pub operands : Operands,
}

/// The result of decoding one word. Unknown opcodes are a value, not an error: the scan carries
/// on and the caller reports them inline.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
pub enum Decoded {
  Line(DecodedLine),
  Unknown(u8),
}

impl Decoded {
  pub fn is_unknown(&self) -> bool {
    matches!(self, Decoded::Unknown(_))
  }

  /// A single-line rendering for the listing, without tabs.
  pub fn text(&self) -> String {
    match self {
      Decoded::Line(line) => format!("{} {}", line.mnemonic, line.operands),
      Decoded::Unknown(_) => "undefined instruction".to_string(),
    }
  }
}

impl Display for DecodedLine {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(f, "\t{}\t{}", self.mnemonic, self.operands)
  }
}

impl Display for Decoded {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self {
      Decoded::Line(line) => write!(f, "{}", line),
      Decoded::Unknown(_) => write!(f, "\tundefined instruction"),
    }
  }
}

/// Decodes a single word. Bytes 1-3 are only read once the opcode has been found in `table`.
pub fn decode_one(table: &OpcodeTable, word: InstructionWord) -> Decoded {
  let opcode = word.opcode();
  match table.lookup(opcode) {
    Some(descriptor) => {
      Decoded::Line(DecodedLine {
        opcode,
        mnemonic: descriptor.mnemonic,
        operands: descriptor.format.decode(&word),
      })
    }
    None => Decoded::Unknown(opcode)
  }
}

/**
  Encodes an instruction into a word. It is the caller's responsibility to pass operands whose
  format matches the opcode's descriptor.
*/
pub fn encode_instruction(opcode: u8, operands: &Operands) -> InstructionWord {
  let [a, b, c] = operands.encode();
  InstructionWord([opcode, a, b, c])
}
