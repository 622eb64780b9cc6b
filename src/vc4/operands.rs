/*!
  Source operands of ALU instructions.

  An ALU instruction reads at most one register through regfile A (`raddr_a`) and at most one
  through regfile B (`raddr_b`) per cycle. Both pipes see the same two reads; the mux codes
  select, for each of the two ALU inputs, either one of these reads or an accumulator.

  A small immediate takes the place of the regfile B read, so an instruction can carry only one
  immediate value, and the other operand must then come through regfile A.
*/

use crate::lowering_error;
use crate::target::{Imm, Reg, RegFile, RegOrImm, RegTag};
use crate::vc4::regfile::{src_slot, MUX_SMALL_IMM, NOP_ADDR, NO_REGFILE_INDEX};

/// The read fields of an ALU instruction.
#[derive(Clone, Copy, Eq, PartialEq, Debug, Hash)]
pub struct Operands {
  pub raddr_a : u32,
  pub raddr_b : u32,
  /// Mux code of the first ALU input
  pub mux_a   : u32,
  /// Mux code of the second ALU input
  pub mux_b   : u32,
}

/// Assigns regfile reads to the two source operands.
pub fn encode_operands(src_a: &RegOrImm, src_b: &RegOrImm) -> Operands {
  match (src_a, src_b) {
    (RegOrImm::Reg(a), RegOrImm::Reg(b)) => encode_registers(*a, *b),
    (RegOrImm::Imm(a), RegOrImm::Imm(b)) => encode_immediates(a, b),

    // The immediate always goes to `raddr_b`, regardless of its position.
    (RegOrImm::Reg(a), RegOrImm::Imm(b)) => {
      let read = src_slot(*a, RegFile::A);
      Operands{
        raddr_a : read.index,
        raddr_b : b.encode_small(),
        mux_a   : read.mux,
        mux_b   : MUX_SMALL_IMM,
      }
    }
    (RegOrImm::Imm(a), RegOrImm::Reg(b)) => {
      let read = src_slot(*b, RegFile::A);
      Operands{
        raddr_a : read.index,
        raddr_b : a.encode_small(),
        mux_a   : MUX_SMALL_IMM,
        mux_b   : read.mux,
      }
    }
  }
}

fn encode_registers(a: Reg, b: Reg) -> Operands {
  let a_file = a.regfile();
  let b_file = b.regfile();

  // The same register twice: one read serves both inputs.
  if a.tag != RegTag::None && a == b {
    return match a_file {
      Some(RegFile::A) => {
        let read = src_slot(a, RegFile::A);
        Operands{ raddr_a: read.index, raddr_b: NOP_ADDR, mux_a: read.mux, mux_b: read.mux }
      }
      _ => {
        let read = src_slot(a, RegFile::B);
        Operands{ raddr_a: NOP_ADDR, raddr_b: read.index, mux_a: read.mux, mux_b: read.mux }
      }
    };
  }

  if let (Some(a_pin), Some(b_pin)) = (a_file, b_file) {
    if a_pin == b_pin {
      lowering_error!(
        "operands {} and {} are different registers in the same regfile {}",
        a,
        b,
        a_pin
      );
    }
  }

  if a_file == Some(RegFile::A) || b_file == Some(RegFile::B) {
    let read_a = src_slot(a, RegFile::A);
    let read_b = src_slot(b, RegFile::B);
    Operands{ raddr_a: read_a.index, raddr_b: read_b.index, mux_a: read_a.mux, mux_b: read_b.mux }
  } else {
    let read_b = src_slot(b, RegFile::A);
    let read_a = src_slot(a, RegFile::B);
    Operands{ raddr_a: read_b.index, raddr_b: read_a.index, mux_a: read_a.mux, mux_b: read_b.mux }
  }
}

/// Both inputs share the one small immediate, so the two values must be bit-identical.
fn encode_immediates(a: &Imm, b: &Imm) -> Operands {
  if a.encode() != b.encode() {
    lowering_error!("operands {} and {} can not both be immediates with different values", a, b);
  }
  let value = a.encode_small();
  Operands{ raddr_a: NO_REGFILE_INDEX, raddr_b: value, mux_a: MUX_SMALL_IMM, mux_b: MUX_SMALL_IMM }
}


#[cfg(test)]
mod tests {
  use super::*;
  use crate::target::SpecialReg;

  fn reg(r: Reg) -> RegOrImm {
    RegOrImm::Reg(r)
  }

  fn imm(i: i32) -> RegOrImm {
    RegOrImm::Imm(Imm::Int32(i))
  }

  fn operands(raddr_a: u32, raddr_b: u32, mux_a: u32, mux_b: u32) -> Operands {
    Operands{ raddr_a, raddr_b, mux_a, mux_b }
  }

  // region Same register

  #[test]
  fn same_regfile_a(){
    assert_eq!(encode_operands(&reg(Reg::a(3)), &reg(Reg::a(3))), operands(3, 39, 6, 6));
  }

  #[test]
  fn same_regfile_b(){
    assert_eq!(encode_operands(&reg(Reg::b(3)), &reg(Reg::b(3))), operands(39, 3, 7, 7));
  }

  #[test]
  fn same_accumulator(){
    assert_eq!(encode_operands(&reg(Reg::acc(2)), &reg(Reg::acc(2))), operands(39, 0, 2, 2));
  }

  #[test]
  fn same_uniform(){
    let uniform = reg(Reg::special(SpecialReg::Uniform));
    assert_eq!(encode_operands(&uniform, &uniform), operands(39, 32, 7, 7));
  }

  #[test]
  fn same_pinned_special(){
    let elem_num = reg(Reg::special(SpecialReg::ElemNum));
    assert_eq!(encode_operands(&elem_num, &elem_num), operands(38, 39, 6, 6));
  }

  #[test]
  fn none_twice_is_not_the_same_register(){
    // Two "don't read" operands each get their own nop read.
    let none = reg(Reg::none());
    assert_eq!(encode_operands(&none, &none), operands(39, 39, 7, 6));
  }

  // endregion

  // region Different registers

  #[test]
  fn a_then_b(){
    assert_eq!(encode_operands(&reg(Reg::a(1)), &reg(Reg::b(2))), operands(1, 2, 6, 7));
  }

  #[test]
  fn b_then_a(){
    // The reads swap regfiles, the mux codes stay with their inputs.
    assert_eq!(encode_operands(&reg(Reg::b(2)), &reg(Reg::a(1))), operands(1, 2, 7, 6));
  }

  #[test]
  fn pinned_and_accumulator(){
    assert_eq!(encode_operands(&reg(Reg::a(4)), &reg(Reg::acc(1))), operands(4, 0, 6, 1));
    assert_eq!(encode_operands(&reg(Reg::acc(1)), &reg(Reg::b(4))), operands(0, 4, 1, 7));
    assert_eq!(encode_operands(&reg(Reg::b(4)), &reg(Reg::acc(1))), operands(0, 4, 7, 1));
    assert_eq!(encode_operands(&reg(Reg::acc(1)), &reg(Reg::a(4))), operands(4, 0, 1, 6));
  }

  #[test]
  fn two_accumulators(){
    assert_eq!(encode_operands(&reg(Reg::acc(0)), &reg(Reg::acc(3))), operands(0, 0, 0, 3));
  }

  #[test]
  fn none_with_pinned(){
    assert_eq!(encode_operands(&reg(Reg::none()), &reg(Reg::a(9))), operands(9, 39, 7, 6));
    assert_eq!(encode_operands(&reg(Reg::a(9)), &reg(Reg::none())), operands(9, 39, 6, 7));
  }

  #[test]
  fn never_the_same_regfile(){
    let registers = [
      Reg::a(1), Reg::b(1), Reg::acc(0), Reg::acc(4), Reg::none(),
      Reg::special(SpecialReg::Uniform), Reg::special(SpecialReg::QpuNum),
    ];
    for a in registers.iter() {
      for b in registers.iter() {
        if a == b || (a.regfile().is_some() && a.regfile() == b.regfile()) {
          continue;
        }
        let result = encode_operands(&reg(*a), &reg(*b));
        // Both regfile reads are used by at most one input each.
        let through_a = [result.mux_a, result.mux_b].iter().filter(|&&m| m == 6).count();
        let through_b = [result.mux_a, result.mux_b].iter().filter(|&&m| m == 7).count();
        assert!(through_a <= 1 && through_b <= 1, "{} {}", a, b);
      }
    }
  }

  #[test]
  #[should_panic(expected = "lowering error: operands A1 and A2 are different registers")]
  fn both_in_regfile_a(){
    encode_operands(&reg(Reg::a(1)), &reg(Reg::a(2)));
  }

  #[test]
  #[should_panic(expected = "lowering error")]
  fn both_in_regfile_b(){
    encode_operands(&reg(Reg::b(1)), &reg(Reg::special(SpecialReg::QpuNum)));
  }

  // endregion

  // region Immediates

  #[test]
  fn equal_immediates(){
    assert_eq!(encode_operands(&imm(5), &imm(5)), operands(0, 5, 7, 7));
  }

  #[test]
  fn equal_float_immediates(){
    let one = RegOrImm::Imm(Imm::Float32(1.0));
    assert_eq!(encode_operands(&one, &one), operands(0, 32, 7, 7));
  }

  #[test]
  #[should_panic(expected = "can not both be immediates with different values")]
  fn different_immediates(){
    encode_operands(&imm(5), &imm(6));
  }

  #[test]
  #[should_panic(expected = "lowering error: operands 100 and 200 can not both be immediates")]
  fn different_large_immediates(){
    encode_operands(&imm(100), &imm(200));
  }

  #[test]
  #[should_panic(expected = "precondition violation: immediate 100 has no small immediate encoding")]
  fn equal_large_immediates(){
    encode_operands(&imm(100), &imm(100));
  }

  #[test]
  fn float_zero_immediate(){
    let zero = RegOrImm::Imm(Imm::Float32(0.0));
    assert_eq!(encode_operands(&reg(Reg::a(1)), &zero), operands(1, 0, 6, 7));
  }

  #[test]
  fn immediate_second(){
    assert_eq!(encode_operands(&reg(Reg::a(3)), &imm(2)), operands(3, 2, 6, 7));
  }

  #[test]
  fn immediate_first(){
    assert_eq!(encode_operands(&imm(2), &reg(Reg::a(3))), operands(3, 2, 7, 6));
  }

  #[test]
  fn immediate_with_accumulator(){
    assert_eq!(encode_operands(&reg(Reg::acc(1)), &imm(-1)), operands(0, 31, 1, 7));
    assert_eq!(encode_operands(&imm(-1), &reg(Reg::acc(1))), operands(0, 31, 7, 1));
  }

  #[test]
  #[should_panic(expected = "B3 can only be read through regfile B, not A")]
  fn immediate_with_regfile_b(){
    encode_operands(&reg(Reg::b(3)), &imm(2));
  }

  #[test]
  #[should_panic(expected = "has no small immediate encoding")]
  fn large_immediate(){
    encode_operands(&reg(Reg::a(3)), &imm(1000));
  }

  // endregion

}
