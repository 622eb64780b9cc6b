//! A human readable listing of an encoded program, one row per instruction.

use std::fmt::{Display, Formatter};

use prettytable::{format as TableFormat, Table};

use crate::target::Instr;
use crate::vc4::{encode_program, EncodedInstr};

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

/// A program together with its encoding.
pub struct Listing<'a> {
  instrs  : &'a [Instr],
  encoded : Vec<EncodedInstr>,
}

impl<'a> Listing<'a> {
  /// Encodes `instrs`; aborts like `encode_program` if any of them can not be encoded.
  pub fn new(instrs: &'a [Instr]) -> Listing<'a> {
    Listing{ instrs, encoded: encode_program(instrs) }
  }

  pub fn encoded(&self) -> &[EncodedInstr] {
    &self.encoded
  }

  pub fn to_table(&self) -> Table {
    let mut table = Table::new();

    table.set_format(*TABLE_DISPLAY_FORMAT);
    table.set_titles(row![ubr->"#", ubl->"Class", ubl->"High", ubl->"Low", ubl->"Instruction"]);

    for (i, (instr, word)) in self.instrs.iter().zip(self.encoded.iter()).enumerate() {
      table.add_row(
        row![
          r->i,
          word.class(),
          format!("{:08x}", word.high()),
          format!("{:08x}", word.low()),
          instr
        ]
      );
    }
    table
  }
}

impl<'a> Display for Listing<'a> {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.to_table())
  }
}


#[cfg(test)]
mod tests {
  use super::*;
  use crate::target::{AluOp, Imm, Reg};

  #[test]
  fn rows(){
    let program = [
      Instr::li(Reg::acc(0), Imm::Int32(42)),
      Instr::alu(Reg::acc(1), AluOp::Add, Reg::a(5).into(), Reg::a(5).into()),
      Instr::End,
    ];
    let listing = Listing::new(&program);
    assert_eq!(listing.encoded().len(), 3);

    let table = listing.to_table();
    assert_eq!(table.len(), 3);

    let text = format!("{}", listing);
    assert!(text.contains("0000002a"));
    assert!(text.contains("li ACC0 <- 42"));
    assert!(text.contains("add ACC1 <- A5, A5"));
    assert!(text.contains("300009e7"));
    assert!(text.contains("end"));
  }

  #[test]
  fn empty(){
    let listing = Listing::new(&[]);
    assert!(listing.encoded().is_empty());
    assert_eq!(listing.to_table().len(), 0);
  }

}
