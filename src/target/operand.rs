use std::fmt::{Display, Formatter};

use crate::target::{Imm, Reg};

/// A source operand of an ALU instruction.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum RegOrImm {
  Reg(Reg),
  Imm(Imm),
}

impl RegOrImm {
  pub fn is_reg(&self) -> bool {
    match self {
      RegOrImm::Reg(_) => true,
      _ => false
    }
  }

  pub fn is_imm(&self) -> bool {
    !self.is_reg()
  }

  pub fn reg(&self) -> Option<Reg> {
    match self {
      RegOrImm::Reg(reg) => Some(*reg),
      _ => None
    }
  }

  pub fn imm(&self) -> Option<Imm> {
    match self {
      RegOrImm::Imm(imm) => Some(*imm),
      _ => None
    }
  }
}

impl From<Reg> for RegOrImm {
  fn from(reg: Reg) -> RegOrImm {
    RegOrImm::Reg(reg)
  }
}

impl From<Imm> for RegOrImm {
  fn from(imm: Imm) -> RegOrImm {
    RegOrImm::Imm(imm)
  }
}

impl Display for RegOrImm {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self {
      RegOrImm::Reg(reg) => write!(f, "{}", reg),
      RegOrImm::Imm(imm) => write!(f, "{}", imm),
    }
  }
}
