/*!
  Target-level instructions, the input of the encoder.

  By the time an instruction reaches the encoder, the front end has lowered the source program to
  this form and the register allocator has assigned a register to every variable. Labels,
  label-relative branches and the kernel initialisation markers are resolved by earlier passes;
  they are listed here because they occur in the same instruction stream, but the encoder refuses
  them.
*/

use std::fmt::{Display, Formatter};

use strum_macros::{Display as StrumDisplay, IntoStaticStr};

use crate::target::{AluOp, AssignCond, BranchCond, Imm, Reg, RegOrImm, SetCond};

pub type Label = u32;
pub type SemaId = u32;

/// Destination of a branch.
#[derive(Clone, Copy, Eq, PartialEq, Debug, Hash)]
pub struct BranchTarget {
  /// Relative to the instruction following the branch (and its delay slots)
  pub relative     : bool,
  /// Branch to an address held in a register plus the offset; not supported
  pub use_reg_offset: bool,
  pub reg_offset   : i32,
  /// In instructions, not bytes
  pub imm_offset   : i32,
}

impl BranchTarget {
  pub fn relative(imm_offset: i32) -> BranchTarget {
    BranchTarget{ relative: true, use_reg_offset: false, reg_offset: 0, imm_offset }
  }

  pub fn absolute(imm_offset: i32) -> BranchTarget {
    BranchTarget{ relative: false, use_reg_offset: false, reg_offset: 0, imm_offset }
  }
}

/// The kind of an instruction.
#[derive(StrumDisplay, IntoStaticStr, Clone, Copy, Eq, PartialEq, Debug, Hash)]
pub enum InstrTag {
  NoOp,
  Li,
  Alu,
  Br,
  End,
  Recv,
  SInc,
  SDec,
  Lab,
  BrLab,
  InitBegin,
  InitEnd,
}

#[derive(Clone, Copy, PartialEq, Debug)]
pub enum Instr {
  NoOp,

  /// Load immediate
  Li {
    dest        : Reg,
    imm         : Imm,
    assign_cond : AssignCond,
    set_cond    : SetCond,
  },

  Alu {
    dest        : Reg,
    op          : AluOp,
    src_a       : RegOrImm,
    src_b       : RegOrImm,
    assign_cond : AssignCond,
    set_cond    : SetCond,
  },

  Br {
    cond   : BranchCond,
    target : BranchTarget,
  },

  /// Halt the QPU
  End,

  /// Receive the result of a TMU load; `dest` must be `ACC4`
  Recv {
    dest : Reg,
  },

  /// Semaphore increment
  SInc(SemaId),
  /// Semaphore decrement
  SDec(SemaId),

  // Resolved before encoding //
  Lab(Label),
  BrLab {
    cond  : BranchCond,
    label : Label,
  },
  InitBegin,
  InitEnd,
}

impl Instr {
  pub fn tag(&self) -> InstrTag {
    match self {
      Instr::NoOp         => InstrTag::NoOp,
      Instr::Li { .. }    => InstrTag::Li,
      Instr::Alu { .. }   => InstrTag::Alu,
      Instr::Br { .. }    => InstrTag::Br,
      Instr::End          => InstrTag::End,
      Instr::Recv { .. }  => InstrTag::Recv,
      Instr::SInc(_)      => InstrTag::SInc,
      Instr::SDec(_)      => InstrTag::SDec,
      Instr::Lab(_)       => InstrTag::Lab,
      Instr::BrLab { .. } => InstrTag::BrLab,
      Instr::InitBegin    => InstrTag::InitBegin,
      Instr::InitEnd      => InstrTag::InitEnd,
    }
  }

  /// Load immediate, always assigned, flags untouched.
  pub fn li(dest: Reg, imm: Imm) -> Instr {
    Instr::Li{ dest, imm, assign_cond: AssignCond::Always, set_cond: SetCond::NoCond }
  }

  /// ALU operation, always assigned, flags untouched.
  pub fn alu(dest: Reg, op: AluOp, src_a: RegOrImm, src_b: RegOrImm) -> Instr {
    Instr::Alu{
      dest,
      op,
      src_a,
      src_b,
      assign_cond: AssignCond::Always,
      set_cond: SetCond::NoCond
    }
  }

  /// Relative branch by `offset` instructions.
  pub fn branch(cond: BranchCond, offset: i32) -> Instr {
    Instr::Br{ cond, target: BranchTarget::relative(offset) }
  }

  /// Whether either source operand of an ALU instruction is an immediate.
  pub fn has_imm(&self) -> bool {
    match self {
      Instr::Alu{ src_a, src_b, .. } => src_a.is_imm() || src_b.is_imm(),
      _ => false
    }
  }
}

impl Display for Instr {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self {

      Instr::Li{ dest, imm, assign_cond, set_cond } => {
        write!(f, "li{} {} <- {}", suffix(*assign_cond, *set_cond), dest, imm)
      }

      Instr::Alu{ dest, op, src_a, src_b, assign_cond, set_cond } => {
        write!(
          f,
          "{}{} {} <- {}, {}",
          op, suffix(*assign_cond, *set_cond), dest, src_a, src_b
        )
      }

      Instr::Br{ cond, target } => {
        if target.use_reg_offset {
          write!(f, "br({}) reg[{}] + {}", cond, target.reg_offset, target.imm_offset)
        } else if target.relative {
          write!(f, "br({}) pc + {}", cond, target.imm_offset)
        } else {
          write!(f, "br({}) {}", cond, target.imm_offset)
        }
      }

      Instr::Recv{ dest } => write!(f, "recv({})", dest),
      Instr::SInc(id)     => write!(f, "sinc {}", id),
      Instr::SDec(id)     => write!(f, "sdec {}", id),
      Instr::Lab(label)   => write!(f, "L{}:", label),
      Instr::BrLab{ cond, label } => write!(f, "br({}) L{}", cond, label),

      other => write!(f, "{}", other.tag()),
    }
  }
}

/// Condition and flag annotations, left out when they are the defaults.
fn suffix(assign_cond: AssignCond, set_cond: SetCond) -> String {
  let mut result = String::new();
  if assign_cond != AssignCond::Always {
    result.push_str(&format!(".{}", assign_cond));
  }
  if set_cond.flags_set() {
    result.push_str(".sf");
  }
  result
}


#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn has_imm(){
    let reg_reg = Instr::alu(Reg::a(0), AluOp::Add, Reg::a(1).into(), Reg::b(1).into());
    let reg_imm = Instr::alu(Reg::a(0), AluOp::Add, Reg::a(1).into(), Imm::Int32(1).into());
    let imm_reg = Instr::alu(Reg::a(0), AluOp::Add, Imm::Int32(1).into(), Reg::a(1).into());
    assert!(!reg_reg.has_imm());
    assert!(reg_imm.has_imm());
    assert!(imm_reg.has_imm());
    assert!(!Instr::li(Reg::a(0), Imm::Int32(1)).has_imm());
  }

  #[test]
  fn display(){
    let add = Instr::alu(Reg::acc(1), AluOp::Add, Reg::a(5).into(), Imm::Int32(3).into());
    assert_eq!(format!("{}", add), "add ACC1 <- A5, 3");

    let li = Instr::Li{
      dest        : Reg::b(2),
      imm         : Imm::Int32(42),
      assign_cond : AssignCond::Never,
      set_cond    : SetCond::Z
    };
    assert_eq!(format!("{}", li), "li.never.sf B2 <- 42");

    assert_eq!(format!("{}", Instr::branch(BranchCond::Always, -3)), "br(always) pc + -3");
    assert_eq!(format!("{}", Instr::End), "End");
    assert_eq!(format!("{}", Instr::SDec(2)), "sdec 2");
  }

}
