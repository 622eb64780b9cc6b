/*!
  Placement of registers in the regfiles.

  A register is written through a write address (`waddr_add`, `waddr_mul`) and read through a
  read address (`raddr_a`, `raddr_b`) together with an input mux code. Each of the four
  combinations read-A, read-B, write-A and write-B has its own address map, and special purpose
  registers are often only reachable through some of them. See "Table 14: QPU Register Address
  Map" and "Table 3: ALU Input Mux Encoding" of the VideoCore IV reference.

  Mux codes:

  ```text
      0..=4   accumulator r0 to r4
      5       accumulator r5
      6       regfile A
      7       regfile B
  ```

*/

use crate::fatal::{fatal, Fatal};
use crate::precondition;
use crate::target::{Reg, RegFile, RegTag, SpecialReg, ACC_COUNT, REGFILE_SIZE};

/// Regfile address that neither reads nor writes anything.
pub const NOP_ADDR: u32 = 39;
/// Write address of accumulator `r0`; `r1` through `r5` follow.
pub const ACC_WADDR_BASE: u32 = 32;
/// Read address used for registers that are not read through a regfile (accumulators).
pub const NO_REGFILE_INDEX: u32 = 0;

pub const MUX_REGFILE_A: u32 = 6;
pub const MUX_REGFILE_B: u32 = 7;
/// A small immediate is read through the regfile B input.
pub const MUX_SMALL_IMM: u32 = MUX_REGFILE_B;

/// Where a destination register is written.
#[derive(Clone, Copy, Eq, PartialEq, Debug, Hash)]
pub struct DestSlot {
  pub file  : RegFile,
  pub index : u32,
}

/// Where a source register is read from.
#[derive(Clone, Copy, Eq, PartialEq, Debug, Hash)]
pub struct SrcSlot {
  pub index : u32,
  pub mux   : u32,
}

/// The mux code of a regfile read.
pub fn regfile_mux(file: RegFile) -> u32 {
  match file {
    RegFile::A => MUX_REGFILE_A,
    RegFile::B => MUX_REGFILE_B,
  }
}

fn require_special(reg: Reg) -> SpecialReg {
  match reg.as_special() {
    Some(special) => special,
    None => fatal(Fatal::Precondition, &format!("unknown special register id {}", reg.id))
  }
}

fn require_regfile_index(reg: Reg) -> u32 {
  precondition!(
    reg.id >= 0 && reg.id < REGFILE_SIZE,
    "regfile index {} of {} out of range",
    reg.id,
    reg
  );
  reg.id as u32
}

/**
  Determines the regfile and write address of a destination register.

  Where either regfile will do, regfile A is used, unless the register itself is pinned to
  regfile B.

  The write address of `ACC4` is `TMP_NOSWAP` in the reference, since `r4` itself is read-only.
  `ACC5` is only writable through regfile B.
*/
pub fn dest_slot(reg: Reg) -> DestSlot {
  let either = match reg.tag {
    RegTag::RegB => RegFile::B,
    _ => RegFile::A
  };

  let (file, index) =
    match reg.tag {
      RegTag::RegA => (RegFile::A, require_regfile_index(reg)),
      RegTag::RegB => (RegFile::B, require_regfile_index(reg)),

      RegTag::Acc => {
        precondition!(
          reg.id >= 0 && reg.id < ACC_COUNT,
          "accumulator index {} out of range",
          reg.id
        );
        let file = if reg.id == 5 { RegFile::B } else { either };
        (file, ACC_WADDR_BASE + reg.id as u32)
      }

      RegTag::Special => {
        match require_special(reg) {
          SpecialReg::RdSetup      => (RegFile::A, 49),
          SpecialReg::WrSetup      => (RegFile::B, 49),
          SpecialReg::DmaLdAddr    => (RegFile::A, 50),
          SpecialReg::DmaStAddr    => (RegFile::B, 50),
          SpecialReg::VpmWrite     => (either, 48),
          SpecialReg::HostInt      => (either, 38),
          SpecialReg::Tmu0S        => (either, 56),
          SpecialReg::SfuRecip     => (either, 52),
          SpecialReg::SfuRecipSqrt => (either, 53),
          SpecialReg::SfuExp       => (either, 54),
          SpecialReg::SfuLog       => (either, 55),

          read_only @ SpecialReg::Uniform
          | read_only @ SpecialReg::ElemNum
          | read_only @ SpecialReg::QpuNum
          | read_only @ SpecialReg::DmaStWait
          | read_only @ SpecialReg::DmaLdWait
          | read_only @ SpecialReg::VpmRead => {
            fatal(
              Fatal::Precondition,
              &format!("special register {} can not be written", read_only)
            )
          }
        }
      }

      RegTag::None => (either, NOP_ADDR),
    };

  DestSlot{ file, index }
}

/**
  Determines the read address and mux code of a source register, read through `file`.

  The caller decides which regfile a register is read from, since the shape of the instruction
  fixes which operand goes through which regfile. Registers pinned to the other regfile are an
  error. Accumulators bypass the regfiles entirely and have no read address.
*/
pub fn src_slot(reg: Reg, file: RegFile) -> SrcSlot {
  let either = regfile_mux(file);

  let require_file = |required: RegFile| {
    precondition!(
      file == required,
      "{} can only be read through regfile {}, not {}",
      reg,
      required,
      file
    );
  };

  match reg.tag {
    RegTag::RegA => {
      let index = require_regfile_index(reg);
      require_file(RegFile::A);
      SrcSlot{ index, mux: MUX_REGFILE_A }
    }

    RegTag::RegB => {
      let index = require_regfile_index(reg);
      require_file(RegFile::B);
      SrcSlot{ index, mux: MUX_REGFILE_B }
    }

    RegTag::Acc => {
      // ToDo: r5 is refused here; check the reference guide for whether it can be read.
      precondition!(
        reg.id >= 0 && reg.id <= 4,
        "accumulator index {} can not be read",
        reg.id
      );
      SrcSlot{ index: NO_REGFILE_INDEX, mux: reg.id as u32 }
    }

    RegTag::None => SrcSlot{ index: NOP_ADDR, mux: either },

    RegTag::Special => {
      match require_special(reg) {
        SpecialReg::Uniform => SrcSlot{ index: 32, mux: either },
        SpecialReg::VpmRead => SrcSlot{ index: 48, mux: either },

        SpecialReg::ElemNum => {
          require_file(RegFile::A);
          SrcSlot{ index: 38, mux: MUX_REGFILE_A }
        }
        SpecialReg::QpuNum => {
          require_file(RegFile::B);
          SrcSlot{ index: 38, mux: MUX_REGFILE_B }
        }
        SpecialReg::DmaLdWait => {
          require_file(RegFile::A);
          SrcSlot{ index: 50, mux: MUX_REGFILE_A }
        }
        SpecialReg::DmaStWait => {
          require_file(RegFile::B);
          SrcSlot{ index: 50, mux: MUX_REGFILE_B }
        }

        write_only => {
          fatal(
            Fatal::Precondition,
            &format!("special register {} can not be read", write_only)
          )
        }
      }
    }
  }
}
