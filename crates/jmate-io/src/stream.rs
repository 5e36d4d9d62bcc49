//! Variadic printf façade
//!
//! [`PrintStream`] is the caller-facing surface: a format descriptor plus an
//! argument sequence of any length, routed through [`dispatch`] onto the
//! bridge's fixed-arity entry points.

use crate::bridge::NativeBridge;
use crate::dispatch::dispatch;
use crate::error::PrintError;
use crate::native::LibcBridge;
use crate::value::Value;
use std::io;

/// Call `printf` on a stream with any number of boxable arguments.
///
/// ```no_run
/// use jmate_io::{printf, PrintStream};
///
/// // Every format below matches its argument kinds
/// let out = unsafe { PrintStream::stdout()? };
/// printf!(out, "result: 0x%08x\n", 0x92)?;
/// printf!(out, "%s has %d items\n", "cart", 3)?;
/// # Ok::<(), jmate_io::PrintError>(())
/// ```
#[macro_export]
macro_rules! printf {
    ($stream:expr, $format:expr $(, $arg:expr)* $(,)?) => {
        $stream.printf($format, &[$($crate::Value::from($arg)),*])
    };
}

/// A print stream over a native bridge
#[derive(Debug)]
pub struct PrintStream<B> {
    bridge: B,
}

impl<B: NativeBridge> PrintStream<B> {
    pub fn new(bridge: B) -> Self {
        Self { bridge }
    }

    pub fn bridge(&self) -> &B {
        &self.bridge
    }

    pub fn into_inner(self) -> B {
        self.bridge
    }

    /// Forward `format` and `args`, unchanged and in order, to the entry
    /// point for `args.len()` arguments.
    pub fn printf(&self, format: &str, args: &[Value]) -> Result<&Self, PrintError> {
        dispatch(&self.bridge, format, args)?;
        Ok(self)
    }

    /// `text`, then a newline, as two separate calls
    pub fn println(&self, text: &str) -> Result<&Self, PrintError> {
        self.printf(text, &[])?.printf("\n", &[])
    }
}

impl PrintStream<LibcBridge<io::Stdout>> {
    /// Stream over the process's `snprintf`, writing to stdout
    ///
    /// # Safety
    ///
    /// Same format contract as [`LibcBridge::from_config`].
    pub unsafe fn stdout() -> Result<Self, PrintError> {
        Ok(Self::new(LibcBridge::stdout()?))
    }
}

impl PrintStream<LibcBridge<io::Stderr>> {
    /// # Safety
    ///
    /// Same format contract as [`LibcBridge::from_config`].
    pub unsafe fn stderr() -> Result<Self, PrintError> {
        Ok(Self::new(LibcBridge::stderr()?))
    }
}
