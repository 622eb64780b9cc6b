/*!
  Machine-code generation for the VideoCore IV QPU.

  The input is the target language of `target`: register moves, ALU operations, branches, TMU
  loads and semaphore operations, with registers already allocated. The output is, for every
  instruction, the 64 bit word the QPU executes. The encoder performs no scheduling or
  optimization; it translates one instruction at a time and keeps the program order.

  Anything that can not be encoded exactly is a bug in an earlier stage and aborts with a
  diagnostic (see `fatal`).

  ```
  use qpu_encode::target::{AluOp, Imm, Instr, Reg};
  use qpu_encode::vc4::{code_words, encode_program};

  let program = [
    Instr::li(Reg::acc(0), Imm::Int32(42)),
    Instr::alu(Reg::a(1), AluOp::Add, Reg::acc(0).into(), Imm::Int32(1).into()),
    Instr::End,
  ];
  let code = code_words(&encode_program(&program));
  assert_eq!(code.len(), 6);
  assert_eq!(&code[..2], &[42, 0xe002_0827]);
  ```
*/

#[macro_use] extern crate prettytable;
#[macro_use] extern crate lazy_static;

pub mod fatal;
pub mod listing;
pub mod target;
pub mod vc4;

pub use listing::Listing;
pub use vc4::{encode, encode_program, EncodedInstr};
