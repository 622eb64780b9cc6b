//! Abstract register references, as produced by the register allocator.

use std::convert::TryFrom;
use std::fmt::{Display, Formatter};

use strum_macros::{Display as StrumDisplay, EnumIter, EnumString, IntoStaticStr};
use num_enum::{TryFromPrimitive, IntoPrimitive};

pub type RegId = i32;

/// Number of addressable slots in each of regfile A and B.
pub const REGFILE_SIZE: RegId = 32;
/// Number of accumulators, `r0` through `r5`.
pub const ACC_COUNT: RegId = 6;

/// One of the two general purpose register files of the QPU.
#[derive(StrumDisplay, IntoStaticStr, Clone, Copy, Eq, PartialEq, Debug, Hash)]
pub enum RegFile {
  A,
  B,
}

#[derive(StrumDisplay, IntoStaticStr, Clone, Copy, Eq, PartialEq, Debug, Hash)]
pub enum RegTag {
  /// Slot in regfile A
  #[strum(serialize = "A")]
  RegA,
  /// Slot in regfile B
  #[strum(serialize = "B")]
  RegB,
  /// Accumulator
  #[strum(serialize = "ACC")]
  Acc,
  /// Special purpose register, `id` is a `SpecialReg`
  #[strum(serialize = "S")]
  Special,
  /// No register, i.e. "don't read" or "don't write"
  #[strum(serialize = "NONE")]
  None,
}

/**
  Special purpose registers. The numeric value is the id the front end stores in a `Reg`
  with tag `RegTag::Special`; the order is therefore significant.

  Most of these are either read-only or write-only, and some are only reachable through
  one of the two regfiles. Which is which lives in `vc4::regfile`.
*/
#[derive(
  StrumDisplay, IntoStaticStr, EnumString, EnumIter, TryFromPrimitive, IntoPrimitive,
  Clone,        Copy,          Eq,         PartialEq, Debug,            Hash
)]
#[repr(u8)]
pub enum SpecialReg {
  // Read-only
  Uniform,
  ElemNum,
  QpuNum,
  // Write-only
  RdSetup,
  WrSetup,
  DmaStAddr,
  // Read-only
  DmaStWait,
  // Write-only
  DmaLdAddr,
  // Read-only
  DmaLdWait,
  VpmRead,
  // Write-only
  VpmWrite,
  HostInt,
  Tmu0S,
  SfuRecip,
  SfuRecipSqrt,
  SfuExp,
  SfuLog,
}

impl SpecialReg {
  pub fn id(&self) -> RegId {
    Into::<u8>::into(*self) as RegId
  }
}

/**
  A register reference. The meaning of `id` depends on `tag`:

    RegA, RegB:  slot index, 0..32
    Acc:         accumulator index, 0..6
    Special:     the discriminant of a `SpecialReg`
    None:        ignored

  A `Reg` is not validated on construction; the encoder checks every id against the use it is
  put to, since the same reference can be legal as a destination and illegal as a source.
*/
#[derive(Clone, Copy, Eq, PartialEq, Debug, Hash)]
pub struct Reg {
  pub tag : RegTag,
  pub id  : RegId,
}

impl Reg {
  pub fn new(tag: RegTag, id: RegId) -> Reg {
    Reg{ tag, id }
  }

  pub fn a(id: RegId) -> Reg {
    Reg::new(RegTag::RegA, id)
  }

  pub fn b(id: RegId) -> Reg {
    Reg::new(RegTag::RegB, id)
  }

  pub fn acc(id: RegId) -> Reg {
    Reg::new(RegTag::Acc, id)
  }

  pub fn special(special: SpecialReg) -> Reg {
    Reg::new(RegTag::Special, special.id())
  }

  pub fn none() -> Reg {
    Reg::new(RegTag::None, 0)
  }

  /// The `SpecialReg` this register refers to, if it is a special register with a known id.
  pub fn as_special(&self) -> Option<SpecialReg> {
    if self.tag != RegTag::Special || self.id < 0 {
      return None;
    }
    u8::try_from(self.id).ok().and_then(|id| SpecialReg::try_from(id).ok())
  }

  /**
    The regfile this register is pinned to, if any. Regfile slots are pinned by their tag;
    special registers that can only be reached through one regfile are pinned to it.
    Accumulators, `NONE` and the special registers that live in both regfiles are unpinned.
  */
  pub fn regfile(&self) -> Option<RegFile> {
    match self.tag {
      RegTag::RegA => Some(RegFile::A),
      RegTag::RegB => Some(RegFile::B),
      RegTag::Special => {
        match self.as_special()? {
          SpecialReg::ElemNum
          | SpecialReg::RdSetup
          | SpecialReg::DmaLdAddr
          | SpecialReg::DmaLdWait => Some(RegFile::A),

          SpecialReg::QpuNum
          | SpecialReg::WrSetup
          | SpecialReg::DmaStAddr
          | SpecialReg::DmaStWait => Some(RegFile::B),

          _ => None
        }
      }
      RegTag::Acc | RegTag::None => None,
    }
  }
}

impl Display for Reg {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self.tag {
      RegTag::None => write!(f, "_"),
      RegTag::Special => {
        match self.as_special() {
          Some(special) => write!(f, "{}", special),
          None          => write!(f, "S[{}]", self.id)
        }
      }
      tag => write!(f, "{}{}", tag, self.id)
    }
  }
}
