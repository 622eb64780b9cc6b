/*!
  Encoding of target instructions for the VideoCore IV QPU.

  The encoder works one instruction at a time, in four steps that build on each other:

    regfile    where a register is written (regfile and write address) and where it is read
               from (read address and input mux code)
    operands   how the two source operands of an ALU instruction share the regfile reads
    word       the fields of an instruction and their packing into a high and a low word
    encode     which of the above each kind of target instruction needs, and in what order

  References are to the "VideoCore IV 3D Architecture Reference Guide".
*/

pub mod encode;
pub mod operands;
pub mod program;
pub mod regfile;
pub mod word;

pub use encode::encode;
pub use program::{code_words, encode_program};
pub use word::{DoubleWord, EncodedInstr, InstrClass, Signal, TwoWords, Word};
