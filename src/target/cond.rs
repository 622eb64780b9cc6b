/*!
  Condition codes.

  An ALU result is written under an assignment condition, which tests the flags of the vector
  element being written. A branch is taken under a branch condition, which tests the flags of
  all elements (or of any element). Both encode to fields of the high instruction word.
*/

use std::fmt::{Display, Formatter};

use strum_macros::{Display as StrumDisplay, IntoStaticStr};

/// A per-element flag test.
#[derive(StrumDisplay, IntoStaticStr, Clone, Copy, Eq, PartialEq, Debug, Hash)]
pub enum Flag {
  /// Zero set
  ZS,
  /// Zero clear
  ZC,
  /// Negative set
  NS,
  /// Negative clear
  NC,
}

#[derive(Clone, Copy, Eq, PartialEq, Debug, Hash)]
pub enum AssignCond {
  Never,
  Always,
  Flag(Flag),
}

impl AssignCond {
  /// The 3-bit `cond_add`/`cond_mul` field.
  pub fn encode(&self) -> u32 {
    match self {
      AssignCond::Never          => 0,
      AssignCond::Always         => 1,
      AssignCond::Flag(Flag::ZS) => 2,
      AssignCond::Flag(Flag::ZC) => 3,
      AssignCond::Flag(Flag::NS) => 4,
      AssignCond::Flag(Flag::NC) => 5,
    }
  }
}

impl Default for AssignCond {
  fn default() -> AssignCond {
    AssignCond::Always
  }
}

impl Display for AssignCond {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self {
      AssignCond::Never      => write!(f, "never"),
      AssignCond::Always     => write!(f, "always"),
      AssignCond::Flag(flag) => write!(f, "{}", flag),
    }
  }
}

/// Whether an instruction updates the flags.
#[derive(Clone, Copy, Eq, PartialEq, Debug, Hash)]
pub enum SetCond {
  NoCond,
  Z,
  N,
  C,
}

impl SetCond {
  pub fn flags_set(&self) -> bool {
    *self != SetCond::NoCond
  }
}

impl Default for SetCond {
  fn default() -> SetCond {
    SetCond::NoCond
  }
}

#[derive(Clone, Copy, Eq, PartialEq, Debug, Hash)]
pub enum BranchCond {
  Never,
  Always,
  /// Taken when the flag test holds for all vector elements
  All(Flag),
  /// Taken when the flag test holds for at least one vector element
  Any(Flag),
}

impl BranchCond {
  /// The 4-bit branch condition field.
  pub fn encode(&self) -> u32 {
    match self {
      BranchCond::All(Flag::ZS) => 0,
      BranchCond::All(Flag::ZC) => 1,
      BranchCond::Any(Flag::ZS) => 2,
      BranchCond::Any(Flag::ZC) => 3,
      BranchCond::All(Flag::NS) => 4,
      BranchCond::All(Flag::NC) => 5,
      BranchCond::Any(Flag::NS) => 6,
      BranchCond::Any(Flag::NC) => 7,
      BranchCond::Always        => 15,
      BranchCond::Never => crate::fatal::fatal(
        crate::fatal::Fatal::Semantic,
        "a branch that is never taken has no encoding"
      ),
    }
  }
}

impl Display for BranchCond {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self {
      BranchCond::Never      => write!(f, "never"),
      BranchCond::Always     => write!(f, "always"),
      BranchCond::All(flag)  => write!(f, "all({})", flag),
      BranchCond::Any(flag)  => write!(f, "any({})", flag),
    }
  }
}


#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn assign_encoding(){
    assert_eq!(AssignCond::Never.encode(), 0);
    assert_eq!(AssignCond::Always.encode(), 1);
    assert_eq!(AssignCond::Flag(Flag::NC).encode(), 5);
  }

  #[test]
  fn branch_encoding(){
    assert_eq!(BranchCond::Always.encode(), 15);
    assert_eq!(BranchCond::All(Flag::ZS).encode(), 0);
    assert_eq!(BranchCond::Any(Flag::ZC).encode(), 3);
    assert_eq!(BranchCond::Any(Flag::NC).encode(), 7);
  }

  #[test]
  #[should_panic(expected = "lowering error")]
  fn never_branch(){
    BranchCond::Never.encode();
  }

  #[test]
  fn flags_set(){
    assert!(!SetCond::NoCond.flags_set());
    assert!(SetCond::Z.flags_set());
  }

}
