use std::fmt::{Display, Formatter};

use strum_macros::{Display as StrumDisplay, EnumIter, EnumString, IntoStaticStr};
use num_enum::{IntoPrimitive, TryFromPrimitive};

use super::Format;

/// Size of an instruction word in bytes.
pub const WORD_SIZE: usize = 4;

/**
  The built-in operations. The discriminant of each variant is its opcode and its `strum`
  serialization is its mnemonic. Consequently, the order the operations are listed below is
  significant: `OpcodeTable::build()` assigns opcodes by position.
*/
#[derive(
StrumDisplay, IntoStaticStr, EnumString, EnumIter, TryFromPrimitive, IntoPrimitive,
Clone,        Copy,          Eq, PartialEq,  Debug,    Hash
)]
#[strum(serialize_all = "lowercase")]
#[repr(u8)]
pub enum Operation {
  Add,   // add  rd, rs1, rs2
  Sub,   // sub  rd, rs1, rs2
  Ldr,   // ldr  rd, address
  Str,   // str  rd, address
}

impl Operation {
  pub fn code(&self) -> u8 {
    Into::<u8>::into(*self)
  }

  pub fn mnemonic(&self) -> &'static str {
    self.into()
  }

  pub fn format(&self) -> Format {
    match self {
      Operation::Add | Operation::Sub => Format::RegisterTriple,
      Operation::Ldr | Operation::Str => Format::RegisterAddress,
    }
  }
}

/// A 4-byte window over the input: `[opcode, operand_a, operand_b, operand_c]`.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug, Default)]
pub struct InstructionWord(pub [u8; WORD_SIZE]);

impl InstructionWord {
  pub fn opcode(&self) -> u8 {
    self.0[0]
  }

  /// Bytes 1-3, the only bytes the format decoders look at.
  pub fn operand_bytes(&self) -> [u8; 3] {
    [self.0[1], self.0[2], self.0[3]]
  }

  pub fn bytes(&self) -> &[u8; WORD_SIZE] {
    &self.0
  }

  /// Builds a word from a slice of exactly `WORD_SIZE` bytes.
  pub fn from_slice(slice: &[u8]) -> Option<InstructionWord> {
    let mut word = [0u8; WORD_SIZE];
    if slice.len() != WORD_SIZE {
      return None;
    }
    word.copy_from_slice(slice);
    Some(InstructionWord(word))
  }
}

impl From<[u8; WORD_SIZE]> for InstructionWord {
  fn from(bytes: [u8; WORD_SIZE]) -> Self {
    InstructionWord(bytes)
  }
}

impl Display for InstructionWord {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(f, "{:02x} {:02x} {:02x} {:02x}", self.0[0], self.0[1], self.0[2], self.0[3])
  }
}


#[cfg(test)]
mod tests {
  use super::*;
  use std::convert::TryFrom;
  use std::str::FromStr;
  use strum::IntoEnumIterator;

  #[test]
  fn opcodes_follow_declaration_order(){
    let codes: Vec<u8> = Operation::iter().map(|op| op.code()).collect();
    assert_eq!(codes, vec![0, 1, 2, 3]);
  }

  #[test]
  fn mnemonics_are_lowercase(){
    assert_eq!(Operation::Add.mnemonic(), "add");
    assert_eq!(Operation::Sub.to_string(), "sub");
    assert_eq!(Operation::from_str("ldr"), Ok(Operation::Ldr));
    assert_eq!(Operation::Str.mnemonic(), "str");
  }

  #[test]
  fn opcode_to_operation(){
    assert_eq!(Operation::try_from(2u8).ok(), Some(Operation::Ldr));
    assert!(Operation::try_from(4u8).is_err());
  }

  #[test]
  fn word_accessors(){
    let word = InstructionWord::from([0x02, 0x01, 0x34, 0x12]);
    assert_eq!(word.opcode(), 2);
    assert_eq!(word.operand_bytes(), [0x01, 0x34, 0x12]);
    assert_eq!(word.to_string(), "02 01 34 12");
    assert_eq!(InstructionWord::from_slice(&[1, 2, 3]), None);
    assert_eq!(InstructionWord::from_slice(&[1, 2, 3, 4]), Some(InstructionWord([1, 2, 3, 4])));
  }
}
