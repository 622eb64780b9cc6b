/*!
  Immediate values.

  An immediate has two encodings. The full 32 bit encoding is the literal of a load-immediate
  instruction. The small immediate encoding is the 6 bit value that an ALU instruction carries in
  its `raddr_b` field in place of a regfile read; only a handful of values have one:

  ```text
      0..=15     integers 0 to 15, with the float +0.0 sharing 0
      16..=31    integers -16 to -1
      32..=39    floats 1.0, 2.0, 4.0, ..., 128.0
      40..=47    floats 1/256, 1/128, ..., 1/2
  ```

*/

use std::fmt::{Display, Formatter};

use crate::precondition;

/// Largest lane mask, one bit for each of the 16 vector elements.
pub const MAX_MASK: i32 = 0xffff;

#[derive(Clone, Copy, PartialEq, Debug)]
pub enum Imm {
  /// 32-bit word
  Int32(i32),
  /// 32-bit float
  Float32(f32),
  /// 1 bit per vector element
  Mask(i32),
}

impl Imm {
  pub fn mask(mask: i32) -> Imm {
    require_mask(mask);
    Imm::Mask(mask)
  }

  pub fn int_val(&self) -> i32 {
    match self {
      Imm::Int32(i) => *i,
      _ => crate::fatal::fatal(
        crate::fatal::Fatal::Precondition,
        &format!("immediate {} is not an integer", self)
      )
    }
  }

  /// Exactly zero. A lane mask is never considered zero.
  pub fn is_zero(&self) -> bool {
    match self {
      Imm::Int32(i)   => *i == 0,
      Imm::Float32(x) => *x == 0.0,
      Imm::Mask(_)    => false,
    }
  }

  /**
    The 32 bit literal. Floats encode as their raw bits. A lane mask moves lane `i` to bit
    `16 + i`, the most significant half of the per-element load-immediate literal.
  */
  pub fn encode(&self) -> u32 {
    match self {
      Imm::Int32(i)   => *i as u32,
      Imm::Float32(x) => x.to_bits(),
      Imm::Mask(mask) => {
        require_mask(*mask);
        let mut bits = 0u32;
        for lane in 0..16 {
          if (mask >> lane) & 1 == 1 {
            bits |= 1 << (16 + lane);
          }
        }
        bits
      }
    }
  }

  /// The small immediate encoding, if this value has one.
  pub fn try_encode_small(&self) -> Option<u32> {
    match self {
      Imm::Int32(i) if *i >= 0 && *i <= 15 => Some(*i as u32),
      Imm::Int32(i) if *i >= -16 && *i < 0 => Some((32 + *i) as u32),
      Imm::Float32(x) => {
        let bits = x.to_bits();
        // +0.0 has the same bits as the integer 0.
        if bits == 0 {
          return Some(0);
        }
        // Powers of two 2^-8 ..= 2^7 with no mantissa bits and positive sign.
        if bits & 0x807f_ffff != 0 {
          return None;
        }
        let exponent = ((bits >> 23) as i32) - 127;
        match exponent {
          0..=7   => Some(32 + exponent as u32),
          -8..=-1 => Some((48 + exponent) as u32),
          _       => None
        }
      }
      _ => None
    }
  }

  /// The small immediate encoding. Values without one can not be used as an ALU operand.
  pub fn encode_small(&self) -> u32 {
    match self.try_encode_small() {
      Some(value) => value,
      None => crate::fatal::fatal(
        crate::fatal::Fatal::Precondition,
        &format!("immediate {} has no small immediate encoding", self)
      )
    }
  }
}

fn require_mask(mask: i32) {
  precondition!(mask >= 0 && mask <= MAX_MASK, "lane mask {:#x} has more than 16 bits", mask);
}

impl From<i32> for Imm {
  fn from(i: i32) -> Imm {
    Imm::Int32(i)
  }
}

impl From<f32> for Imm {
  fn from(x: f32) -> Imm {
    Imm::Float32(x)
  }
}

impl Display for Imm {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self {
      Imm::Int32(i)   => write!(f, "{}", i),
      Imm::Float32(x) => write!(f, "{:?}f", x),
      Imm::Mask(mask) => write!(f, "mask({:#06x})", mask),
    }
  }
}


#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn full_encoding(){
    assert_eq!(Imm::Int32(42).encode(), 42);
    assert_eq!(Imm::Int32(-1).encode(), 0xffff_ffff);
    assert_eq!(Imm::Float32(1.0).encode(), 0x3f80_0000);
    assert_eq!(Imm::Float32(-2.5).encode(), (-2.5f32).to_bits());
    assert_eq!(Imm::mask(0).encode(), 0);
    assert_eq!(Imm::mask(0b101).encode(), 0x0005_0000);
    assert_eq!(Imm::mask(0xffff).encode(), 0xffff_0000);
  }

  #[test]
  #[should_panic(expected = "precondition violation")]
  fn oversized_mask(){
    Imm::mask(0x1_0000);
  }

  #[test]
  #[should_panic(expected = "lane mask 0x10001 has more than 16 bits")]
  fn oversized_mask_variant(){
    Imm::Mask(0x1_0001).encode();
  }

  #[test]
  #[should_panic(expected = "lane mask 0xffffffff has more than 16 bits")]
  fn negative_mask_variant(){
    Imm::Mask(-1).encode();
  }

  #[test]
  fn zero(){
    assert!(Imm::Int32(0).is_zero());
    assert!(!Imm::Int32(1).is_zero());
    assert!(Imm::Float32(0.0).is_zero());
    assert!(Imm::Float32(-0.0).is_zero());
    assert!(!Imm::Float32(0.5).is_zero());
    assert!(!Imm::mask(0).is_zero());
  }

  #[test]
  fn small_integers(){
    assert_eq!(Imm::Int32(0).try_encode_small(), Some(0));
    assert_eq!(Imm::Int32(15).try_encode_small(), Some(15));
    assert_eq!(Imm::Int32(-1).try_encode_small(), Some(31));
    assert_eq!(Imm::Int32(-16).try_encode_small(), Some(16));
    assert_eq!(Imm::Int32(16).try_encode_small(), None);
    assert_eq!(Imm::Int32(-17).try_encode_small(), None);
  }

  #[test]
  fn small_floats(){
    assert_eq!(Imm::Float32(1.0).try_encode_small(), Some(32));
    assert_eq!(Imm::Float32(128.0).try_encode_small(), Some(39));
    assert_eq!(Imm::Float32(1.0 / 256.0).try_encode_small(), Some(40));
    assert_eq!(Imm::Float32(0.5).try_encode_small(), Some(47));
    assert_eq!(Imm::Float32(3.0).try_encode_small(), None);
    assert_eq!(Imm::Float32(-1.0).try_encode_small(), None);
    assert_eq!(Imm::Float32(256.0).try_encode_small(), None);
    assert_eq!(Imm::Float32(0.0).try_encode_small(), Some(0));
    assert_eq!(Imm::Float32(-0.0).try_encode_small(), None);
    assert_eq!(Imm::mask(1).try_encode_small(), None);
  }

  #[test]
  #[should_panic(expected = "has no small immediate encoding")]
  fn no_small_encoding(){
    Imm::Int32(100).encode_small();
  }

  #[test]
  fn display(){
    assert_eq!(format!("{}", Imm::Int32(-3)), "-3");
    assert_eq!(format!("{}", Imm::Float32(1.5)), "1.5f");
    assert_eq!(format!("{}", Imm::mask(0xff)), "mask(0x00ff)");
  }

}
