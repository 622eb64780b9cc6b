/*!
  Fatal conditions of the encoder.

  Nothing that goes wrong while lowering an instruction is recoverable: a register in the wrong
  regfile or two conflicting immediates means that the instruction word we would emit is wrong,
  and a wrong word silently misprograms the QPU. So both classes of failure abort with a
  diagnostic instead of returning a `Result`.

    Precondition: an index out of range, a register requested from a regfile it does not live
                  in, an unmapped special register, a case that cannot be reached.
    Semantic:     the input is well formed but can not be expressed as a single instruction,
                  e.g. two different immediates, or a branch through a register offset.
*/

use log::error;
use strum_macros::{Display as StrumDisplay, IntoStaticStr};

#[derive(StrumDisplay, IntoStaticStr, Clone, Copy, Eq, PartialEq, Debug, Hash)]
pub enum Fatal {
  #[strum(serialize = "precondition violation")]
  Precondition,
  #[strum(serialize = "lowering error")]
  Semantic,
}

/// Logs the message and aborts. The panic message is prefixed with the class of the failure.
#[cold]
pub fn fatal(kind: Fatal, message: &str) -> ! {
  error!("{}: {}", kind, message);
  panic!("{}: {}", kind, message);
}

/// Aborts with `Fatal::Precondition` unless the condition holds.
#[macro_export]
macro_rules! precondition {
  ($cond:expr, $($arg:tt)+) => {
    if !$cond {
      $crate::fatal::fatal($crate::fatal::Fatal::Precondition, &format!($($arg)+))
    }
  };
}

/// Aborts with `Fatal::Semantic`.
#[macro_export]
macro_rules! lowering_error {
  ($($arg:tt)+) => {
    $crate::fatal::fatal($crate::fatal::Fatal::Semantic, &format!($($arg)+))
  };
}
