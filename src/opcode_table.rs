use bimap::BiMap;
use strum::IntoEnumIterator;

use crate::bytecode::{Format, Operation};
use crate::errors::TableError;

/// What the disassembler knows about an opcode.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
pub struct Descriptor {
  pub mnemonic : &'static str,
  pub format   : Format,
}

/**
  An opcode table maps an opcode byte to a `Descriptor`. Opcodes are assigned by position in the
  list the table is built from, so they are always dense from zero. The mnemonic half is a BiMap
  so the assembler can go the other way.

  A table is never mutated after it is built and can be shared freely between scans.
*/
#[derive(Clone, Debug)]
pub struct OpcodeTable {
  mnemonics : BiMap<u8, &'static str>,
  formats   : Vec<Format>,
}

impl OpcodeTable {

  /// The built-in table: `add`, `sub`, `ldr`, `str`, in that order.
  pub fn build() -> OpcodeTable {
    OpcodeTable {
      mnemonics: Operation::iter().map(|op| (op.code(), op.mnemonic())).collect(),
      formats: Operation::iter().map(|op| op.format()).collect(),
    }
  }

  /// Builds a table from `(mnemonic, format)` pairs. Position 0 gets opcode 0, and so on.
  pub fn from_entries(entries: &[(&'static str, Format)]) -> Result<OpcodeTable, TableError> {
    if entries.len() > 256 {
      return Err(TableError::TooManyEntries(entries.len()));
    }

    let mut mnemonics = BiMap::new();
    for (opcode, (mnemonic, _)) in entries.iter().enumerate() {
      mnemonics
        .insert_no_overwrite(opcode as u8, *mnemonic)
        .map_err(|(_, mnemonic)| TableError::DuplicateMnemonic(mnemonic))?;
    }

    Ok(OpcodeTable {
      mnemonics,
      formats: entries.iter().map(|(_, format)| *format).collect(),
    })
  }

  pub fn lookup(&self, opcode: u8) -> Option<Descriptor> {
    let mnemonic = *self.mnemonics.get_by_left(&opcode)?;
    let format = *self.formats.get(opcode as usize)?;
    Some(Descriptor { mnemonic, format })
  }

  pub fn opcode_of(&self, mnemonic: &str) -> Option<u8> {
    self.mnemonics.get_by_right(mnemonic).copied()
  }

  pub fn len(&self) -> usize {
    self.formats.len()
  }

  pub fn is_empty(&self) -> bool {
    self.formats.is_empty()
  }

  /// Entries in opcode order.
  pub fn iter(&self) -> impl Iterator<Item = (u8, Descriptor)> + '_ {
    (0..self.len()).filter_map(move |i| {
      let opcode = i as u8;
      self.lookup(opcode).map(|descriptor| (opcode, descriptor))
    })
  }
}


#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn standard_entries(){
    let table = OpcodeTable::build();
    let expected = [
      (0u8, "add", Format::RegisterTriple),
      (1u8, "sub", Format::RegisterTriple),
      (2u8, "ldr", Format::RegisterAddress),
      (3u8, "str", Format::RegisterAddress),
    ];
    for (opcode, mnemonic, format) in expected.iter() {
      assert_eq!(table.lookup(*opcode), Some(Descriptor { mnemonic: *mnemonic, format: *format }));
    }
    assert_eq!(table.len(), 4);
  }

  #[test]
  fn unmapped_opcodes_are_not_found(){
    let table = OpcodeTable::build();
    for opcode in 4..=255u8 {
      assert_eq!(table.lookup(opcode), None);
    }
  }

  #[test]
  fn reverse_lookup(){
    let table = OpcodeTable::build();
    assert_eq!(table.opcode_of("ldr"), Some(2));
    assert_eq!(table.opcode_of("mul"), None);
  }

  #[test]
  fn custom_table_assigns_by_position(){
    let table = OpcodeTable::from_entries(&[
      ("nop", Format::RegisterTriple),
      ("jmp", Format::RegisterAddress),
    ]).unwrap();
    assert_eq!(table.lookup(1), Some(Descriptor { mnemonic: "jmp", format: Format::RegisterAddress }));
    assert_eq!(table.lookup(2), None);
    let opcodes: Vec<u8> = table.iter().map(|(opcode, _)| opcode).collect();
    assert_eq!(opcodes, vec![0, 1]);
  }

  #[test]
  fn duplicate_mnemonics_are_rejected(){
    let result = OpcodeTable::from_entries(&[
      ("add", Format::RegisterTriple),
      ("add", Format::RegisterAddress),
    ]);
    assert_eq!(result.err(), Some(TableError::DuplicateMnemonic("add")));
  }

  #[test]
  fn too_many_entries(){
    let entries = vec![("x", Format::RegisterTriple); 257];
    assert_eq!(OpcodeTable::from_entries(&entries).err(), Some(TableError::TooManyEntries(257)));
  }

  #[test]
  fn empty_table(){
    let table = OpcodeTable::from_entries(&[]).unwrap();
    assert!(table.is_empty());
    assert_eq!(table.lookup(0), None);
  }
}
