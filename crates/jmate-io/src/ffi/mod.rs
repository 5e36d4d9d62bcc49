//! Foreign Function Interface (FFI) infrastructure
//!
//! Carries boxed values across the native boundary:
//! - Type marshalling (boxed value → C representation → word slot)
//! - Native routine resolution (process image or shared library)
//! - Fixed-arity calls through direct function pointers
//!
//! # Safety
//!
//! FFI operations involve `unsafe` code and careful memory management.
//! All unsafe code is isolated in this module and in `LibcBridge`.

pub mod caller;
pub mod loader;
pub mod marshal;
pub mod types;

pub use caller::{CallError, NativeRoutine, SnprintfFn, WordArgs};
pub use loader::{LoadError, SymbolLoader};
pub use marshal::{MarshalContext, MarshalError};
pub use types::{CType, ExternType};
