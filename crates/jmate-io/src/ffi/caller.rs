//! Native routine calls using direct function pointers
//!
//! Every bridge entry point has a fixed number of word arguments, known at
//! compile time, so the routine is called through a plain function pointer
//! with the arguments spelled out per arity. No dynamic call construction.

use std::os::raw::{c_char, c_int};
use std::ptr;
use thiserror::Error;

/// Signature of the C `snprintf` routine.
pub type SnprintfFn = unsafe extern "C" fn(*mut c_char, usize, *const c_char, ...) -> c_int;

/// Native call errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CallError {
    /// The routine reported failure with a negative return value
    #[error("native routine returned {code}")]
    RenderFailed { code: i32 },
    /// The routine rendered a different length on the second pass
    #[error("native routine measured {measured} bytes but rendered {written}")]
    LengthChanged { measured: usize, written: usize },
}

/// A fixed number of word arguments, passed positionally to the routine
pub trait WordArgs: Copy {
    /// Call `func(buf, cap, format, words...)`.
    ///
    /// # Safety
    ///
    /// `func` must be a valid snprintf-compatible routine, `buf` must be
    /// writable for `cap` bytes (or null with `cap == 0`) and `format` must
    /// point to a NUL-terminated string whose directives match the words.
    unsafe fn apply(
        self,
        func: SnprintfFn,
        buf: *mut c_char,
        cap: usize,
        format: *const c_char,
    ) -> c_int;
}

macro_rules! impl_word_args {
    ($($n:literal => [$($w:ident),*];)*) => {
        $(
            impl WordArgs for [isize; $n] {
                unsafe fn apply(
                    self,
                    func: SnprintfFn,
                    buf: *mut c_char,
                    cap: usize,
                    format: *const c_char,
                ) -> c_int {
                    let [$($w),*] = self;
                    func(buf, cap, format $(, $w)*)
                }
            }
        )*
    };
}

impl_word_args! {
    0 => [];
    1 => [a];
    2 => [a, b];
    3 => [a, b, c];
    4 => [a, b, c, d];
    5 => [a, b, c, d, e];
}

/// The resolved native formatting routine
#[derive(Clone, Copy)]
pub struct NativeRoutine {
    func: SnprintfFn,
}

impl NativeRoutine {
    pub fn new(func: SnprintfFn) -> Self {
        Self { func }
    }

    /// Render `format` with `words`, measuring first and then filling a
    /// buffer of exactly the measured size.
    ///
    /// # Safety
    ///
    /// `format` must be a NUL-terminated string that outlives the call and
    /// every pointer word must stay valid for both passes.
    pub unsafe fn render<A: WordArgs>(
        &self,
        format: *const c_char,
        words: A,
    ) -> Result<Vec<u8>, CallError> {
        let measured = words.apply(self.func, ptr::null_mut(), 0, format);
        if measured < 0 {
            return Err(CallError::RenderFailed { code: measured });
        }
        let len = measured as usize;

        let mut buf = vec![0u8; len + 1];
        let written = words.apply(self.func, buf.as_mut_ptr().cast(), buf.len(), format);
        if written < 0 {
            return Err(CallError::RenderFailed { code: written });
        }
        if written as usize != len {
            return Err(CallError::LengthChanged {
                measured: len,
                written: written as usize,
            });
        }

        buf.truncate(len);
        Ok(buf)
    }
}

impl std::fmt::Debug for NativeRoutine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NativeRoutine")
            .field("func", &(self.func as *const ()))
            .finish()
    }
}
