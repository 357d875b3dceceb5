//! A tabular rendering of a scan: offset, raw bytes, and disassembly for every word.

use prettytable::{format as TableFormat, Table};

use crate::bytecode::decode_one;
use crate::loader::RawBuffer;
use crate::opcode_table::OpcodeTable;

lazy_static! {
  static ref TABLE_DISPLAY_FORMAT: TableFormat::TableFormat =
    TableFormat::FormatBuilder::new()
    .column_separator('│')
    .borders(' ')
    .separator(
      TableFormat::LinePosition::Title,
      TableFormat::LineSeparator::new('─', '┼', ' ', ' ')
    )
    .separator(
      TableFormat::LinePosition::Bottom,
      TableFormat::LineSeparator::new('─', '┴', ' ', ' ')
    )
    .padding(1, 1)
    .build();
}

pub fn listing(table: &OpcodeTable, buffer: &RawBuffer) -> Table {
  let mut listing = Table::new();

  listing.set_format(*TABLE_DISPLAY_FORMAT);
  listing.set_titles(row![ubr->"Offset", ubl->"Bytes", ubl->"Instruction"]);

  for (offset, word) in buffer.words() {
    let decoded = decode_one(table, word);
    listing.add_row(row![r->format!("0x{:04x}", offset), word, decoded.text()]);
  }
  listing
}
