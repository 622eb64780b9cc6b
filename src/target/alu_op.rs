/*!
  ALU operations.

  The QPU has two ALUs, the add pipe and the multiply pipe, each with its own opcode table. An
  `AluOp` belongs to exactly one of them. `Rotate` is a pseudo-op: it is executed as a vector
  rotation by the multiply pipe.
*/

use strum_macros::{Display as StrumDisplay, EnumIter, EnumString, IntoStaticStr};

#[derive(
  StrumDisplay, IntoStaticStr, EnumString, EnumIter,
  Clone,        Copy,          Eq,         PartialEq, Debug, Hash
)]
#[strum(serialize_all = "snake_case")]
pub enum AluOp {
  // Add pipe //
  Nop,
  FAdd,
  FSub,
  FMin,
  FMax,
  FMinAbs,
  FMaxAbs,
  FtoI,
  ItoF,
  Add,
  Sub,
  Shr,
  Asr,
  Ror,
  Shl,
  Min,
  Max,
  BAnd,
  BOr,
  BXor,
  BNot,
  Clz,
  V8Adds,
  V8Subs,

  // Multiply pipe //
  MFMul,
  MMul24,
  MV8Mul,
  MV8Min,
  MV8Max,
  MV8Adds,
  MV8Subs,
  MRotate,
}

impl AluOp {
  pub fn is_mul(&self) -> bool {
    match self {
      AluOp::MFMul
      | AluOp::MMul24
      | AluOp::MV8Mul
      | AluOp::MV8Min
      | AluOp::MV8Max
      | AluOp::MV8Adds
      | AluOp::MV8Subs
      | AluOp::MRotate => true,
      _ => false
    }
  }

  pub fn is_rot(&self) -> bool {
    *self == AluOp::MRotate
  }

  /// The 5-bit `op_add` field.
  pub fn encode_add_op(&self) -> u32 {
    match self {
      AluOp::Nop     => 0,
      AluOp::FAdd    => 1,
      AluOp::FSub    => 2,
      AluOp::FMin    => 3,
      AluOp::FMax    => 4,
      AluOp::FMinAbs => 5,
      AluOp::FMaxAbs => 6,
      AluOp::FtoI    => 7,
      AluOp::ItoF    => 8,
      AluOp::Add     => 12,
      AluOp::Sub     => 13,
      AluOp::Shr     => 14,
      AluOp::Asr     => 15,
      AluOp::Ror     => 16,
      AluOp::Shl     => 17,
      AluOp::Min     => 18,
      AluOp::Max     => 19,
      AluOp::BAnd    => 20,
      AluOp::BOr     => 21,
      AluOp::BXor    => 22,
      AluOp::BNot    => 23,
      AluOp::Clz     => 24,
      AluOp::V8Adds  => 30,
      AluOp::V8Subs  => 31,
      mul => crate::fatal::fatal(
        crate::fatal::Fatal::Precondition,
        &format!("{} is not an add pipe operation", mul)
      ),
    }
  }

  /// The 3-bit `op_mul` field. The rotation is a `v8min` of `r0` with itself.
  pub fn encode_mul_op(&self) -> u32 {
    match self {
      AluOp::MFMul   => 1,
      AluOp::MMul24  => 2,
      AluOp::MV8Mul  => 3,
      AluOp::MV8Min  => 4,
      AluOp::MV8Max  => 5,
      AluOp::MV8Adds => 6,
      AluOp::MV8Subs => 7,
      AluOp::MRotate => AluOp::MV8Min.encode_mul_op(),
      add => crate::fatal::fatal(
        crate::fatal::Fatal::Precondition,
        &format!("{} is not a multiply pipe operation", add)
      ),
    }
  }
}


#[cfg(test)]
mod tests {
  use super::*;
  use strum::IntoEnumIterator;

  #[test]
  fn every_op_has_one_pipe(){
    for op in AluOp::iter() {
      if op.is_mul() {
        assert!(op.encode_mul_op() < 8);
      } else {
        assert!(op.encode_add_op() < 32);
      }
    }
  }

  #[test]
  fn opcodes(){
    assert_eq!(AluOp::Add.encode_add_op(), 12);
    assert_eq!(AluOp::FAdd.encode_add_op(), 1);
    assert_eq!(AluOp::MFMul.encode_mul_op(), 1);
    assert_eq!(AluOp::MRotate.encode_mul_op(), 4);
    assert!(AluOp::MRotate.is_rot());
    assert!(!AluOp::MV8Min.is_rot());
  }

  #[test]
  fn names(){
    assert_eq!(AluOp::FAdd.to_string(), "f_add");
    assert_eq!(AluOp::MRotate.to_string(), "m_rotate");
  }

  #[test]
  #[should_panic(expected = "is not a multiply pipe operation")]
  fn add_op_on_mul_pipe(){
    AluOp::Add.encode_mul_op();
  }

}
