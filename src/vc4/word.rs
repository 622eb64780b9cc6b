/*!
  Packing of QPU instruction words.

  A QPU instruction is 64 bits, handled as a high and a low 32 bit word. The high word always
  starts with the same fields:

  ```text
      [sig:4][flag-select:4] ... [waddr_add:6][waddr_mul:6]
  ```

  and, except for `thrend` and `ldtmu0`, carries condition codes between them. The low word is
  entirely determined by the instruction class:

  ```text
      high, branch     [sig:4][0:4][cond_br:4][rel:1]........[waddr_add:6][waddr_mul:6]
      high, other      [sig:4][flag-select:4][.:3][cond_add:3][cond_mul:3][sf:1][ws:1][waddr_add:6][waddr_mul:6]

      low, ALU         [op_mul:3][op_add:5][raddr_a:6][raddr_b:6][add_a:3][add_b:3][mul_a:3][mul_b:3]
      low, rotate      [op_mul:3][.:5][raddr_a:6][raddr_b:6][0:12]
      low, thrend/ldtmu0  [.:8][raddr_a:6][raddr_b:6][0:12]
      low, li/branch   [immediate:32]
      low, semaphore   [0:27][direction:1][id:4]
  ```

  An `EncodedInstr` is built field by field by the encoder, starting from a full NOP, and is
  immutable once built. Fields that are not meaningful for the instruction class keep their NOP
  values.
*/

use std::fmt::{Display, Formatter};

use strum_macros::{Display as StrumDisplay, IntoStaticStr};
use num_enum::IntoPrimitive;

use crate::vc4::operands::Operands;
use crate::vc4::regfile::NOP_ADDR;

// If you change these you must also change `EncodedInstr::high` and `EncodedInstr::low`.
pub type Word = u32;
pub type DoubleWord = u64;
// Convenience for decomposing a DoubleWord into a high word and a low word:
#[derive(Clone, Copy, Eq, PartialEq, Debug, Hash)]
pub struct TwoWords {
  pub low: Word,
  pub high: Word
}

/// Flag-select value marking a load-immediate-format instruction as a semaphore operation.
const SEMAPHORE_FLAG: u32 = 8;
/// Direction bit of a semaphore instruction; set for a decrement.
const SEMAPHORE_DOWN: u32 = 1 << 4;

/// The encoding classes of QPU instructions.
#[derive(StrumDisplay, IntoStaticStr, Clone, Copy, Eq, PartialEq, Debug, Hash)]
pub enum InstrClass {
  #[strum(serialize = "nop")]
  Nop,
  #[strum(serialize = "li")]
  Li,
  #[strum(serialize = "rot")]
  Rot,
  #[strum(serialize = "alu")]
  Alu,
  #[strum(serialize = "br")]
  Br,
  #[strum(serialize = "end")]
  End,
  #[strum(serialize = "ldtmu")]
  Ldtmu,
  #[strum(serialize = "sinc")]
  SInc,
  #[strum(serialize = "sdec")]
  SDec,
}

/// Values of the 4-bit signal field.
#[derive(StrumDisplay, IntoPrimitive, Clone, Copy, Eq, PartialEq, Debug, Hash)]
#[repr(u32)]
pub enum Signal {
  NoSignal    = 1,
  ProgramEnd  = 3,
  LoadTmu0    = 10,
  SmallImm    = 13,
  LoadImm     = 14,
  Branch      = 15,
}

impl Signal {
  pub fn code(&self) -> u32 {
    Into::<u32>::into(*self)
  }
}

/// A fully encoded QPU instruction.
#[derive(Clone, Copy, Eq, PartialEq, Debug, Hash)]
pub struct EncodedInstr {
  class     : InstrClass,
  sig       : u32,
  sem_flag  : u32,
  cond_add  : u32,
  cond_mul  : u32,
  waddr_add : u32,
  waddr_mul : u32,
  raddr_a   : u32,
  raddr_b   : u32,
  mux_a     : u32,
  mux_b     : u32,
  add_op    : u32,
  mul_op    : u32,
  sf        : bool,
  ws        : bool,
  rel       : bool,
  li_imm    : u32,
  sema_id   : u32,
}

impl Default for EncodedInstr {
  /// The full NOP: a load immediate of zero that writes nowhere and reads nothing.
  fn default() -> EncodedInstr {
    EncodedInstr{
      class     : InstrClass::Nop,
      sig       : Signal::LoadImm.code(),
      sem_flag  : 0,
      cond_add  : 0,
      cond_mul  : 0,
      waddr_add : NOP_ADDR,
      waddr_mul : NOP_ADDR,
      raddr_a   : NOP_ADDR,
      raddr_b   : NOP_ADDR,
      mux_a     : 0,
      mux_b     : 0,
      add_op    : 0,
      mul_op    : 0,
      sf        : false,
      ws        : false,
      rel       : false,
      li_imm    : 0,
      sema_id   : 0,
    }
  }
}

impl EncodedInstr {

  // region Field accessors

  pub fn class(&self) -> InstrClass { self.class }
  pub fn sig(&self) -> u32 { self.sig }
  pub fn cond_add(&self) -> u32 { self.cond_add }
  pub fn cond_mul(&self) -> u32 { self.cond_mul }
  pub fn waddr_add(&self) -> u32 { self.waddr_add }
  pub fn waddr_mul(&self) -> u32 { self.waddr_mul }
  pub fn raddr_a(&self) -> u32 { self.raddr_a }
  pub fn raddr_b(&self) -> u32 { self.raddr_b }
  pub fn mux_a(&self) -> u32 { self.mux_a }
  pub fn mux_b(&self) -> u32 { self.mux_b }
  pub fn add_op(&self) -> u32 { self.add_op }
  pub fn mul_op(&self) -> u32 { self.mul_op }
  pub fn set_flags(&self) -> bool { self.sf }
  pub fn write_swap(&self) -> bool { self.ws }
  pub fn relative(&self) -> bool { self.rel }
  pub fn li_imm(&self) -> u32 { self.li_imm }
  pub fn sema_id(&self) -> u32 { self.sema_id }

  // endregion

  pub fn high(&self) -> Word {
    let mut high = (self.sig << 28) | (self.sem_flag << 24) | (self.waddr_add << 6) | self.waddr_mul;

    match self.class {
      InstrClass::Br => {
        high |= (self.cond_add << 20)
             |  ((self.rel as u32) << 19);
      }

      InstrClass::End | InstrClass::Ldtmu => {}

      _ => {
        high |= (self.cond_add << 17)
             |  (self.cond_mul << 14)
             |  ((self.sf as u32) << 13)
             |  ((self.ws as u32) << 12);
      }
    }

    high
  }

  pub fn low(&self) -> Word {
    match self.class {
      InstrClass::Nop => 0,

      InstrClass::Rot => (self.mul_op << 29) | (self.raddr_a << 18) | (self.raddr_b << 12),

      // Both pipes see the same inputs, so each mux code is written for both.
      InstrClass::Alu => {
        (self.mul_op << 29) | (self.add_op << 24)
          | (self.raddr_a << 18) | (self.raddr_b << 12)
          | (self.mux_a << 9) | (self.mux_b << 6)
          | (self.mux_a << 3) | self.mux_b
      }

      InstrClass::End | InstrClass::Ldtmu => (self.raddr_a << 18) | (self.raddr_b << 12),

      InstrClass::Li | InstrClass::Br => self.li_imm,

      InstrClass::SInc => self.sema_id,
      InstrClass::SDec => SEMAPHORE_DOWN | self.sema_id,
    }
  }

  pub fn two_words(&self) -> TwoWords {
    TwoWords{ low: self.low(), high: self.high() }
  }

  pub fn to_double_word(&self) -> DoubleWord {
    ((self.high() as DoubleWord) << 32) | (self.low() as DoubleWord)
  }
}

impl Display for EncodedInstr {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(f, "{:08x} {:08x}", self.high(), self.low())
  }
}


/**
  Accumulates the fields of one instruction. Only the encoder uses this; it hands out the
  finished `EncodedInstr` and nothing else.
*/
pub(crate) struct InstrBuilder {
  instr: EncodedInstr
}

impl InstrBuilder {

  pub fn new() -> InstrBuilder {
    InstrBuilder{ instr: EncodedInstr::default() }
  }

  /**
    Sets the instruction class together with the fields that the class fixes. An ALU
    instruction with a small immediate operand is signalled differently from one that reads
    registers only, hence `imm`.
  */
  pub fn tag(&mut self, class: InstrClass, imm: bool) {
    let instr = &mut self.instr;
    instr.class = class;

    match class {
      InstrClass::Nop | InstrClass::Li => {}

      InstrClass::Rot => {
        instr.sig = Signal::SmallImm.code();
      }

      InstrClass::Alu => {
        instr.sig = if imm { Signal::SmallImm.code() } else { Signal::NoSignal.code() };
      }

      InstrClass::Br => {
        instr.sig = Signal::Branch.code();
      }

      InstrClass::End => {
        instr.sig = Signal::ProgramEnd.code();
        instr.raddr_b = NOP_ADDR;
      }

      InstrClass::Ldtmu => {
        instr.sig = Signal::LoadTmu0.code();
        instr.raddr_b = NOP_ADDR;
      }

      InstrClass::SInc | InstrClass::SDec => {
        instr.sig = Signal::LoadImm.code();
        instr.sem_flag = SEMAPHORE_FLAG;
      }
    }
  }

  pub fn cond_add(&mut self, cond: u32) { self.instr.cond_add = cond; }
  pub fn cond_mul(&mut self, cond: u32) { self.instr.cond_mul = cond; }
  pub fn waddr_add(&mut self, waddr: u32) { self.instr.waddr_add = waddr; }
  pub fn waddr_mul(&mut self, waddr: u32) { self.instr.waddr_mul = waddr; }
  pub fn raddr_b(&mut self, raddr: u32) { self.instr.raddr_b = raddr; }
  pub fn add_op(&mut self, op: u32) { self.instr.add_op = op; }
  pub fn mul_op(&mut self, op: u32) { self.instr.mul_op = op; }
  pub fn sf(&mut self, set_flags: bool) { self.instr.sf = set_flags; }
  pub fn ws(&mut self, write_swap: bool) { self.instr.ws = write_swap; }
  pub fn rel(&mut self, relative: bool) { self.instr.rel = relative; }
  pub fn li_imm(&mut self, imm: u32) { self.instr.li_imm = imm; }
  pub fn sema_id(&mut self, id: u32) { self.instr.sema_id = id; }

  pub fn operands(&mut self, operands: Operands) {
    self.instr.raddr_a = operands.raddr_a;
    self.instr.raddr_b = operands.raddr_b;
    self.instr.mux_a   = operands.mux_a;
    self.instr.mux_b   = operands.mux_b;
  }

  pub fn finish(self) -> EncodedInstr {
    self.instr
  }
}
