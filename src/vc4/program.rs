/*!
  Encoding of whole instruction sequences.

  Instructions are encoded independently, so with the `parallel` feature the work is spread over
  the rayon thread pool. The result is always in program order: branch offsets are relative to
  an instruction's position, so the position of every word matters.
*/

use log::debug;
#[cfg(feature = "trace_encoding")]
use log::trace;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::target::Instr;
use crate::vc4::encode::encode;
use crate::vc4::word::{EncodedInstr, Word};

/// Encodes every instruction of `instrs`, in order.
pub fn encode_program(instrs: &[Instr]) -> Vec<EncodedInstr> {
  debug!("Encoding {} instructions.", instrs.len());

  #[cfg(feature = "parallel")]
  let encoded: Vec<EncodedInstr> = instrs.par_iter().map(encode).collect();
  #[cfg(not(feature = "parallel"))]
  let encoded: Vec<EncodedInstr> = instrs.iter().map(encode).collect();

  #[cfg(feature = "trace_encoding")]
  for (i, (instr, word)) in instrs.iter().zip(encoded.iter()).enumerate() {
    trace!("{:4}: {} | {}", i, word, instr);
  }

  encoded
}

/**
  The code stream as it is copied to GPU memory: for each instruction the low word, then the
  high word.
*/
pub fn code_words(encoded: &[EncodedInstr]) -> Vec<Word> {
  let mut code = Vec::with_capacity(encoded.len() * 2);
  for instr in encoded {
    code.push(instr.low());
    code.push(instr.high());
  }
  code
}
