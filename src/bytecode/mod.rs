/*!

  Instructions are fixed width: every instruction is one 32 bit word, stored as four bytes and
  decoded bytewise. There is no header, and words are aligned on 4 byte boundaries from offset 0.
  The sizes of instruction components are as follows:

    Opcode:    8 bits
    Register:  8 bits
    Address:  16 bits, little endian

  The opcode alone does not say how to read the remaining three bytes. An `OpcodeTable` maps each
  opcode to a mnemonic and a `Format`, and the format decides the shape of the operands. Adding an
  instruction therefore means adding a table entry, never another branch in the decoder.

*/

mod binary;
mod format;
mod instruction;
mod assembly;

pub use binary::{decode_one, encode_instruction, Decoded, DecodedLine};
pub use format::{Format, Operands};
pub use instruction::{InstructionWord, Operation, WORD_SIZE};
pub use assembly::{parse_assembly, assemble};
