//! Arity dispatch
//!
//! Maps an argument sequence of length n onto the entry point declared for
//! exactly n arguments. Selection depends on n alone, never on the argument
//! values or their types. Sequences longer than [`MAX_ARITY`] are rejected
//! before any native call.

use crate::bridge::{NativeBridge, MAX_ARITY};
use crate::error::PrintError;
use crate::value::Value;
use log::trace;
use std::fmt;

const ENTRY_NAMES: [&str; MAX_ARITY + 1] = [
    "printf_0", "printf_1", "printf_2", "printf_3", "printf_4", "printf_5",
];

/// One entry point of the fixed-arity table.
///
/// Only constructed for arities `0..=MAX_ARITY`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryPoint {
    arity: usize,
}

impl EntryPoint {
    /// The whole routing table, in arity order
    pub fn all() -> impl Iterator<Item = EntryPoint> {
        (0..=MAX_ARITY).map(|arity| EntryPoint { arity })
    }

    pub fn arity(self) -> usize {
        self.arity
    }

    pub fn name(self) -> &'static str {
        ENTRY_NAMES[self.arity]
    }
}

impl fmt::Display for EntryPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Select the entry point for `n` arguments
pub fn select(n: usize) -> Result<EntryPoint, PrintError> {
    if n <= MAX_ARITY {
        Ok(EntryPoint { arity: n })
    } else {
        Err(PrintError::UnsupportedArity { n, max: MAX_ARITY })
    }
}

/// Invoke the entry point matching `args.len()`, unpacking the arguments
/// positionally in their original order.
pub fn dispatch<B: NativeBridge + ?Sized>(
    bridge: &B,
    format: &str,
    args: &[Value],
) -> Result<EntryPoint, PrintError> {
    let entry = select(args.len())?;
    trace!("{} argument(s) -> {}", args.len(), entry);

    match args {
        [] => bridge.printf_0(format),
        [a] => bridge.printf_1(format, a),
        [a, b] => bridge.printf_2(format, a, b),
        [a, b, c] => bridge.printf_3(format, a, b, c),
        [a, b, c, d] => bridge.printf_4(format, a, b, c, d),
        [a, b, c, d, e] => bridge.printf_5(format, a, b, c, d, e),
        _ => Err(PrintError::UnsupportedArity {
            n: args.len(),
            max: MAX_ARITY,
        }),
    }?;

    Ok(entry)
}
