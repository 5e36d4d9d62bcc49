//! Native bridge backed by the C formatting routine
//!
//! Each entry point marshals its boxed arguments into word slots, renders
//! through the resolved `snprintf`-compatible routine and writes the bytes
//! to the sink. Nothing reaches the sink unless every argument marshalled
//! and the routine succeeded.

use crate::bridge::NativeBridge;
use crate::error::PrintError;
use crate::ffi::{MarshalContext, NativeRoutine, SymbolLoader, WordArgs};
use crate::value::Value;
use jmate_config::NativeConfig;
use log::{debug, trace};
use std::io::{self, Write};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Bridge that renders with a native routine and writes to `W`
///
/// The format is handed to the routine untouched, so every constructor is
/// `unsafe`: the caller vouches for all formats the bridge will ever see.
///
/// ```compile_fail
/// let bridge = jmate_io::LibcBridge::process(Vec::<u8>::new());
/// ```
#[derive(Debug)]
pub struct LibcBridge<W> {
    routine: NativeRoutine,
    sink: Mutex<W>,
    // Owns the library the routine was resolved from
    _loader: SymbolLoader,
}

impl<W: Write> LibcBridge<W> {
    /// Resolve the routine named by `config`.
    ///
    /// # Safety
    ///
    /// The configured symbol must have the `snprintf` signature. Every
    /// format later passed to this bridge must have directives that match
    /// the boxed argument kinds: `%s` only against strings or null, integer
    /// directives against integer words, and no `%n`. The bridge does not
    /// inspect the format.
    pub unsafe fn from_config(config: &NativeConfig, sink: W) -> Result<Self, PrintError> {
        let mut loader = SymbolLoader::new();
        let routine = loader.resolve(config.library(), config.symbol())?;
        debug!(
            "native bridge ready: {} from {}",
            config.symbol(),
            config.library().unwrap_or("process image")
        );
        Ok(Self {
            routine,
            sink: Mutex::new(sink),
            _loader: loader,
        })
    }

    /// Bridge over the platform's default `snprintf`
    ///
    /// # Safety
    ///
    /// Same format contract as [`LibcBridge::from_config`].
    pub unsafe fn process(sink: W) -> Result<Self, PrintError> {
        Self::from_config(&NativeConfig::default(), sink)
    }

    /// Lock the sink
    pub fn sink(&self) -> MutexGuard<'_, W> {
        self.sink.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn into_sink(self) -> W {
        self.sink.into_inner().unwrap_or_else(PoisonError::into_inner)
    }

    fn invoke<const N: usize>(&self, format: &str, args: [&Value; N]) -> Result<(), PrintError>
    where
        [isize; N]: WordArgs,
    {
        let mut ctx = MarshalContext::new();
        let format_ptr = ctx.marshal_format(format)?;

        let mut words = [0isize; N];
        for (index, (slot, value)) in words.iter_mut().zip(args).enumerate() {
            *slot = ctx.marshal_word(index, value)?;
        }

        // Every pointer word is owned by `ctx`, alive for both passes
        let rendered = unsafe { self.routine.render(format_ptr, words)? };
        trace!(
            "printf_{} rendered {} bytes ({} C strings)",
            N,
            rendered.len(),
            ctx.allocated()
        );

        self.write(&rendered)
    }

    fn write(&self, bytes: &[u8]) -> Result<(), PrintError> {
        let mut sink = self.sink();
        sink.write_all(bytes)?;
        sink.flush()?;
        Ok(())
    }
}

impl LibcBridge<io::Stdout> {
    /// # Safety
    ///
    /// Same format contract as [`LibcBridge::from_config`].
    pub unsafe fn stdout() -> Result<Self, PrintError> {
        Self::process(io::stdout())
    }
}

impl LibcBridge<io::Stderr> {
    /// # Safety
    ///
    /// Same format contract as [`LibcBridge::from_config`].
    pub unsafe fn stderr() -> Result<Self, PrintError> {
        Self::process(io::stderr())
    }
}

impl<W: Write + Send> NativeBridge for LibcBridge<W> {
    fn printf_0(&self, format: &str) -> Result<(), PrintError> {
        self.invoke(format, [])
    }

    fn printf_1(&self, format: &str, a: &Value) -> Result<(), PrintError> {
        self.invoke(format, [a])
    }

    fn printf_2(&self, format: &str, a: &Value, b: &Value) -> Result<(), PrintError> {
        self.invoke(format, [a, b])
    }

    fn printf_3(&self, format: &str, a: &Value, b: &Value, c: &Value) -> Result<(), PrintError> {
        self.invoke(format, [a, b, c])
    }

    fn printf_4(
        &self,
        format: &str,
        a: &Value,
        b: &Value,
        c: &Value,
        d: &Value,
    ) -> Result<(), PrintError> {
        self.invoke(format, [a, b, c, d])
    }

    fn printf_5(
        &self,
        format: &str,
        a: &Value,
        b: &Value,
        c: &Value,
        d: &Value,
        e: &Value,
    ) -> Result<(), PrintError> {
        self.invoke(format, [a, b, c, d, e])
    }
}
