//! jmate I/O - printf bridge
//!
//! This library provides a variadic `printf` over a native formatting routine
//! that only exposes fixed-arity entry points:
//! - Boxed argument values
//! - Arity dispatch onto `printf_0` .. `printf_5`
//! - A libc-backed bridge that renders through `snprintf`
//! - The `PrintStream` façade and `printf!` macro

/// jmate I/O version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod bridge;
pub mod dispatch;
pub mod error;
pub mod ffi;
pub mod native;
pub mod stream;
pub mod value;

// Re-export commonly used types
pub use bridge::{NativeBridge, TraceBridge, MAX_ARITY};
pub use dispatch::{dispatch, select, EntryPoint};
pub use error::{NativeError, PrintError};
pub use native::LibcBridge;
pub use stream::PrintStream;
pub use value::{ObjectRef, Value};
