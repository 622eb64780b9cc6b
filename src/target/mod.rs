/*!
  The target language: the architecture-neutral instruction stream that the front end produces and
  the encoder consumes. Nothing in here knows about bit layouts except the condition code and
  opcode tables, which the encoder treats as lookups.
*/

mod alu_op;
mod cond;
mod imm;
mod instr;
mod operand;
mod reg;

pub use alu_op::AluOp;
pub use cond::{AssignCond, BranchCond, Flag, SetCond};
pub use imm::{Imm, MAX_MASK};
pub use instr::{BranchTarget, Instr, InstrTag, Label, SemaId};
pub use operand::RegOrImm;
pub use reg::{Reg, RegFile, RegId, RegTag, SpecialReg, ACC_COUNT, REGFILE_SIZE};
