/*!
  The human readable textual form of bytecode is called assembly. The syntax accepted here is the
  syntax the disassembler prints, so a disassembly can be fed straight back in:

  ```text
      add   r1, r2, r3
      ldr   r1, 0x1234      # comments run to the end of the line
  ```

  Mnemonics are resolved through an `OpcodeTable`, and the operand grammar is picked by the
  descriptor's format, the same way decoding works.
*/

use nom::{
  bytes::complete::tag_no_case,
  character::complete::{
    alpha1,
    alphanumeric0,
    char as one_char,
    digit1,
    hex_digit1,
    space0,
    space1
  },
  combinator::{all_consuming, map, map_res, recognize},
  sequence::{delimited, pair, preceded, separated_pair, tuple},
  IResult
};
use tracing::debug;

use super::{encode_instruction, Format, InstructionWord, Operands};
use crate::errors::AssemblyError;
use crate::opcode_table::OpcodeTable;

fn mnemonic(input: &str) -> IResult<&str, &str> {
  preceded(space0, recognize(pair(alpha1, alphanumeric0)))(input)
}

fn register(input: &str) -> IResult<&str, u8> {
  map_res(preceded(one_char('r'), digit1), |digits: &str| digits.parse::<u8>())(input)
}

fn address(input: &str) -> IResult<&str, u16> {
  map_res(
    preceded(tag_no_case("0x"), hex_digit1),
    |digits: &str| u16::from_str_radix(digits, 16)
  )(input)
}

fn comma(input: &str) -> IResult<&str, char> {
  delimited(space0, one_char(','), space0)(input)
}

fn register_triple(input: &str) -> IResult<&str, Operands> {
  map(
    tuple((register, preceded(comma, register), preceded(comma, register))),
    |(dst, src1, src2)| Operands::Triple { dst, src1, src2 }
  )(input)
}

fn register_address(input: &str) -> IResult<&str, Operands> {
  map(
    separated_pair(register, comma, address),
    |(dst, address)| Operands::Address { dst, address }
  )(input)
}

/// The operands must be separated from the mnemonic and must use up the rest of the line.
fn operands(format: Format, input: &str) -> IResult<&str, Operands> {
  match format {
    Format::RegisterTriple  => all_consuming(delimited(space1, register_triple, space0))(input),
    Format::RegisterAddress => all_consuming(delimited(space1, register_address, space0))(input),
  }
}

fn strip_comment(line: &str) -> &str {
  match line.find(|c: char| c == '#' || c == ';') {
    Some(start) => &line[..start],
    None => line
  }
}

/// Parses assembly text into instruction words, stopping at the first bad line.
pub fn parse_assembly(table: &OpcodeTable, text: &str) -> Result<Vec<InstructionWord>, AssemblyError> {
  let mut words = Vec::new();

  for (idx, raw_line) in text.lines().enumerate() {
    let line_number = idx + 1;
    let line = strip_comment(raw_line);
    if line.trim().is_empty() {
      continue;
    }

    let not_an_operation = || AssemblyError::NotAnOperation {
      line: line_number,
      name: line.split_whitespace().next().unwrap_or_default().to_string()
    };

    let (rest, name) = mnemonic(line).map_err(|_| not_an_operation())?;
    let opcode = table.opcode_of(name).ok_or_else(not_an_operation)?;
    let descriptor = table.lookup(opcode).ok_or_else(not_an_operation)?;

    let (_, parsed) = operands(descriptor.format, rest).map_err(|_| {
      AssemblyError::WrongOperands {
        line: line_number,
        mnemonic: descriptor.mnemonic,
        format: descriptor.format
      }
    })?;

    words.push(encode_instruction(opcode, &parsed));
  }

  debug!(instructions = words.len(), "assembled");
  Ok(words)
}

/// Like `parse_assembly`, but flattens the words into the byte stream the loader reads.
pub fn assemble(table: &OpcodeTable, text: &str) -> Result<Vec<u8>, AssemblyError> {
  let words = parse_assembly(table, text)?;
  Ok(words.iter().flat_map(|word| word.bytes().iter().copied()).collect())
}


#[cfg(test)]
mod tests {
  use super::*;
  use crate::bytecode::decode_one;

  #[test]
  fn parse_operands(){
    assert_eq!(register("r12"), Ok(("", 12)));
    assert!(register("r256").is_err());
    assert_eq!(address("0x1234,"), Ok((",", 0x1234)));
    assert_eq!(address("0XfF"), Ok(("", 0xff)));
    assert!(address("0x10000").is_err());
  }

  #[test]
  fn assemble_program(){
    let table = OpcodeTable::build();
    let text = "
  # load, add, store
      ldr   r1, 0x1234
  \tadd\tr1, r2, r3   ; trailing comment
    str r1 ,0xff

";
    let bytes = assemble(&table, text).unwrap();
    assert_eq!(
      bytes,
      vec![
        0x02, 0x01, 0x34, 0x12,
        0x00, 0x01, 0x02, 0x03,
        0x03, 0x01, 0xff, 0x00,
      ]
    );
  }

  #[test]
  fn disassembly_reassembles(){
    let table = OpcodeTable::build();
    let listing = "\tadd\tr1, r2, r3\n\tldr\tr1, 0x1234\n\tsub\tr0, r255, r7\n";
    let words = parse_assembly(&table, listing).unwrap();
    let lines: Vec<String> =
      words.into_iter().map(|word| decode_one(&table, word).to_string()).collect();
    assert_eq!(lines, vec!["\tadd\tr1, r2, r3", "\tldr\tr1, 0x1234", "\tsub\tr0, r255, r7"]);
  }

  #[test]
  fn unknown_mnemonic(){
    let table = OpcodeTable::build();
    let result = parse_assembly(&table, "add r1, r2, r3\nmul r1, r2, r3");
    assert_eq!(
      result,
      Err(AssemblyError::NotAnOperation { line: 2, name: "mul".to_string() })
    );
    let result = parse_assembly(&table, "\tundefined instruction");
    assert_eq!(
      result,
      Err(AssemblyError::NotAnOperation { line: 1, name: "undefined".to_string() })
    );
  }

  #[test]
  fn operands_must_match_format(){
    let table = OpcodeTable::build();
    let result = parse_assembly(&table, "ldr r1, r2, r3");
    assert_eq!(
      result,
      Err(AssemblyError::WrongOperands {
        line: 1,
        mnemonic: "ldr",
        format: Format::RegisterAddress
      })
    );
    assert!(parse_assembly(&table, "add").is_err());
    assert!(parse_assembly(&table, "add r1, r2, r3 r4").is_err());
  }

  #[test]
  fn empty_text(){
    let table = OpcodeTable::build();
    assert_eq!(assemble(&table, "\n  # nothing here\n"), Ok(vec![]));
  }
}
