/*!
  A table-driven disassembler for a fixed-width, 4-byte instruction encoding, and the matching
  assembler. See `bytecode` for the encoding itself.

  ```text
    loader::RawBuffer ──► bytecode::decode_one ──► OpcodeTable::lookup ──► Format::decode
  ```
*/

#[macro_use] extern crate prettytable;
#[macro_use] extern crate lazy_static;

pub mod bytecode;
pub mod errors;
pub mod listing;
pub mod loader;
pub mod opcode_table;

pub use errors::{AssemblyError, DisasmError, TableError};
pub use loader::{load_and_scan, scan, LengthMode, RawBuffer, ScanConfig, CAPACITY};
pub use opcode_table::{Descriptor, OpcodeTable};
