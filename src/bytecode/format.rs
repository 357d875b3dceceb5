/*!
  Operand encoding formats. A format describes the shape of bytes 1-3 of an instruction word; the
  opcode byte is never consulted here; which format applies is the opcode table's business.

  ```text
    RegisterTriple:  [OpCode:8][RegDst:8][RegSrc1:8][RegSrc2:8]
    RegisterAddress: [OpCode:8][RegDst:8][AddrLow:8][AddrHigh:8]
  ```

  Every byte value is a valid register index or address component. No range checking is done.
*/

use std::fmt::{Display, Formatter};

use strum_macros::{Display as StrumDisplay, IntoStaticStr};
use num_enum::{IntoPrimitive, TryFromPrimitive};

use super::InstructionWord;

#[derive(
StrumDisplay, IntoStaticStr, TryFromPrimitive, IntoPrimitive,
Clone,        Copy,          Eq, PartialEq,    Debug,         Hash
)]
#[strum(serialize_all = "kebab-case")]
#[repr(u8)]
pub enum Format {
  RegisterTriple  = 0,
  RegisterAddress = 1,
}

impl Format {
  /// Runs the decoder for this format over the word's operand bytes.
  pub fn decode(self, word: &InstructionWord) -> Operands {
    match self {
      Format::RegisterTriple  => decode_register_triple(word),
      Format::RegisterAddress => decode_register_address(word),
    }
  }
}

/// The unencoded operands of an instruction, one variant per format.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
pub enum Operands {
  Triple {
    dst  : u8,
    src1 : u8,
    src2 : u8
  },
  Address {
    dst     : u8,
    address : u16
  },
}

impl Operands {
  pub fn format(&self) -> Format {
    match self {
      Operands::Triple { .. }  => Format::RegisterTriple,
      Operands::Address { .. } => Format::RegisterAddress,
    }
  }

  /// Bytes 1-3 of the encoded word. Addresses are little endian.
  pub fn encode(&self) -> [u8; 3] {
    match *self {
      Operands::Triple { dst, src1, src2 } => [dst, src1, src2],
      Operands::Address { dst, address } => {
        let [low, high] = address.to_le_bytes();
        [dst, low, high]
      }
    }
  }
}

impl Display for Operands {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self {
      Operands::Triple { dst, src1, src2 } => {
        write!(f, "r{}, r{}, r{}", dst, src1, src2)
      }
      Operands::Address { dst, address } => {
        write!(f, "r{}, 0x{:x}", dst, address)
      }
    }
  }
}

/// For add, sub.
fn decode_register_triple(word: &InstructionWord) -> Operands {
  let [dst, src1, src2] = word.operand_bytes();
  Operands::Triple { dst, src1, src2 }
}

/// For ldr, str. The address is little endian.
fn decode_register_address(word: &InstructionWord) -> Operands {
  let [dst, low, high] = word.operand_bytes();
  Operands::Address {
    dst,
    address: ((high as u16) << 8) | low as u16
  }
}
