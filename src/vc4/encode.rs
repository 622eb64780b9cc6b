/*!
  Lowering of a single target instruction to a QPU instruction word.

  Each instruction is encoded on its own: nothing here depends on the instructions before or
  after it. Any instruction that can not be encoded aborts; there is no partial result.
*/

use crate::fatal::{fatal, Fatal};
use crate::target::{
  AluOp, AssignCond, BranchCond, BranchTarget, Imm, Instr, Reg, RegFile, RegOrImm, SemaId,
  SetCond,
};
use crate::vc4::operands::encode_operands;
use crate::vc4::regfile::dest_slot;
use crate::vc4::word::{EncodedInstr, InstrBuilder, InstrClass};
use crate::{lowering_error, precondition};

/// Read address of the rotation by `r5`; rotations by a constant add the constant to it.
pub const ROTATE_RADDR_BASE: u32 = 48;
/// Branch offsets are given in instructions but encoded in bytes.
pub const INSTR_SIZE: i32 = 8;
/// Number of hardware semaphores, addressed by a 4-bit id.
pub const SEMAPHORE_COUNT: SemaId = 16;

/// Encodes one instruction.
pub fn encode(instr: &Instr) -> EncodedInstr {
  let mut builder = InstrBuilder::new();

  match instr {
    // The default is a full NOP.
    Instr::NoOp => {}

    Instr::Li{ dest, imm, assign_cond, set_cond } => {
      encode_li(&mut builder, *dest, imm, *assign_cond, *set_cond);
    }

    Instr::Br{ cond, target } => {
      encode_branch(&mut builder, *cond, target);
    }

    Instr::Alu{ dest, op, src_a, src_b, assign_cond, set_cond } => {
      let class = if op.is_rot() { InstrClass::Rot } else { InstrClass::Alu };
      builder.tag(class, instr.has_imm());
      encode_alu(&mut builder, *dest, *op, src_a, src_b, *assign_cond, *set_cond);
    }

    Instr::End => {
      builder.tag(InstrClass::End, false);
    }

    Instr::Recv{ dest } => {
      precondition!(
        *dest == Reg::acc(4),
        "recv can only write ACC4, not {}",
        dest
      );
      builder.tag(InstrClass::Ldtmu, false);
    }

    Instr::SInc(id) => {
      encode_semaphore(&mut builder, InstrClass::SInc, *id);
    }

    Instr::SDec(id) => {
      encode_semaphore(&mut builder, InstrClass::SDec, *id);
    }

    Instr::Lab(_) | Instr::BrLab{ .. } | Instr::InitBegin | Instr::InitEnd => {
      fatal(
        Fatal::Precondition,
        &format!("no lowering for target instruction '{}'", instr)
      );
    }
  }

  builder.finish()
}

fn encode_li(
  builder     : &mut InstrBuilder,
  dest        : Reg,
  imm         : &Imm,
  assign_cond : AssignCond,
  set_cond    : SetCond
) {
  let slot = dest_slot(dest);

  builder.tag(InstrClass::Li, false);
  builder.cond_add(assign_cond.encode());
  builder.waddr_add(slot.index);
  builder.ws(slot.file != RegFile::A);
  builder.li_imm(imm.encode());
  builder.sf(set_cond.flags_set());
}

fn encode_branch(builder: &mut InstrBuilder, cond: BranchCond, target: &BranchTarget) {
  if target.use_reg_offset {
    lowering_error!("branch target with register offset not supported");
  }

  let offset = match target.imm_offset.checked_mul(INSTR_SIZE) {
    Some(offset) => offset,
    None => fatal(
      Fatal::Precondition,
      &format!("branch offset {} out of range", target.imm_offset)
    )
  };

  builder.tag(InstrClass::Br, false);
  builder.cond_add(cond.encode());
  builder.rel(target.relative);
  builder.li_imm(offset as u32);
}

/// Fills in an ALU or rotate instruction that has already been tagged.
fn encode_alu(
  builder     : &mut InstrBuilder,
  dest        : Reg,
  op          : AluOp,
  src_a       : &RegOrImm,
  src_b       : &RegOrImm,
  assign_cond : AssignCond,
  set_cond    : SetCond
) {
  let slot = dest_slot(dest);

  // The mul pipe writes regfile B unless swapped, the add pipe regfile A.
  if op.is_mul() {
    builder.cond_mul(assign_cond.encode());
    builder.waddr_mul(slot.index);
    builder.ws(slot.file != RegFile::B);
  } else {
    builder.cond_add(assign_cond.encode());
    builder.waddr_add(slot.index);
    builder.ws(slot.file != RegFile::A);
  }

  builder.sf(set_cond.flags_set());

  if op.is_mul() {
    builder.mul_op(op.encode_mul_op());
  } else {
    builder.add_op(op.encode_add_op());
  }

  if op.is_rot() {
    builder.raddr_b(rotate_raddr_b(src_a, src_b));
  } else {
    builder.operands(encode_operands(src_a, src_b));
  }
}

/**
  A rotation always rotates `r0`. The amount is either `r5` or a constant in 1..=15, and is
  selected through the regfile B read address.
*/
fn rotate_raddr_b(src_a: &RegOrImm, src_b: &RegOrImm) -> u32 {
  precondition!(
    *src_a == RegOrImm::Reg(Reg::acc(0)),
    "rotate can only rotate ACC0, not {}",
    src_a
  );

  match src_b {
    RegOrImm::Reg(reg) => {
      precondition!(*reg == Reg::acc(5), "rotate amount must be ACC5 or 1..=15, not {}", reg);
      ROTATE_RADDR_BASE
    }
    RegOrImm::Imm(imm) => {
      let amount = imm.int_val();
      precondition!(
        amount >= 1 && amount <= 15,
        "rotate amount must be ACC5 or 1..=15, not {}",
        amount
      );
      ROTATE_RADDR_BASE + amount as u32
    }
  }
}

fn encode_semaphore(builder: &mut InstrBuilder, class: InstrClass, id: SemaId) {
  precondition!(id < SEMAPHORE_COUNT, "semaphore id {} out of range", id);
  builder.tag(class, false);
  builder.sema_id(id);
}
