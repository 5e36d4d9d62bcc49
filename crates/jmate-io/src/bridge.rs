//! Native bridge entry points
//!
//! The native side only offers fixed-arity declarations: one entry point per
//! argument count from 0 to [`MAX_ARITY`], each taking the format descriptor
//! followed by exactly that many boxed arguments. [`NativeBridge`] is that
//! family; [`crate::dispatch`] routes a variadic call onto it.

use crate::dispatch::{select, EntryPoint};
use crate::error::PrintError;
use crate::value::Value;
use log::debug;
use std::sync::Arc;

/// Largest argument count any entry point accepts.
pub const MAX_ARITY: usize = 5;

/// The fixed-arity entry point family.
///
/// Implementations must forward every argument in the slot it was given;
/// an entry point never sees more or fewer arguments than its arity.
pub trait NativeBridge: Send + Sync {
    fn printf_0(&self, format: &str) -> Result<(), PrintError>;

    fn printf_1(&self, format: &str, a: &Value) -> Result<(), PrintError>;

    fn printf_2(&self, format: &str, a: &Value, b: &Value) -> Result<(), PrintError>;

    fn printf_3(&self, format: &str, a: &Value, b: &Value, c: &Value) -> Result<(), PrintError>;

    fn printf_4(
        &self,
        format: &str,
        a: &Value,
        b: &Value,
        c: &Value,
        d: &Value,
    ) -> Result<(), PrintError>;

    fn printf_5(
        &self,
        format: &str,
        a: &Value,
        b: &Value,
        c: &Value,
        d: &Value,
        e: &Value,
    ) -> Result<(), PrintError>;
}

macro_rules! forward_bridge {
    ($($ptr:ty),* $(,)?) => {
        $(
            impl<B: NativeBridge + ?Sized> NativeBridge for $ptr {
                fn printf_0(&self, format: &str) -> Result<(), PrintError> {
                    (**self).printf_0(format)
                }

                fn printf_1(&self, format: &str, a: &Value) -> Result<(), PrintError> {
                    (**self).printf_1(format, a)
                }

                fn printf_2(&self, format: &str, a: &Value, b: &Value) -> Result<(), PrintError> {
                    (**self).printf_2(format, a, b)
                }

                fn printf_3(
                    &self,
                    format: &str,
                    a: &Value,
                    b: &Value,
                    c: &Value,
                ) -> Result<(), PrintError> {
                    (**self).printf_3(format, a, b, c)
                }

                fn printf_4(
                    &self,
                    format: &str,
                    a: &Value,
                    b: &Value,
                    c: &Value,
                    d: &Value,
                ) -> Result<(), PrintError> {
                    (**self).printf_4(format, a, b, c, d)
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
                    (**self).printf_5(format, a, b, c, d, e)
                }
            }
        )*
    };
}

forward_bridge!(&B, Box<B>, Arc<B>);

/// Bridge wrapper that logs each entry point invocation before delegating.
#[derive(Debug, Clone)]
pub struct TraceBridge<B> {
    inner: B,
}

impl<B: NativeBridge> TraceBridge<B> {
    pub fn new(inner: B) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &B {
        &self.inner
    }

    pub fn into_inner(self) -> B {
        self.inner
    }

    fn trace(&self, format: &str, args: &[&Value]) {
        if !log::log_enabled!(log::Level::Debug) {
            return;
        }
        let types: Vec<&str> = args.iter().map(|v| v.type_name()).collect();
        let name = select(args.len()).map_or("printf_?", EntryPoint::name);
        debug!("{}({:?}; {})", name, format, types.join(", "));
    }
}

impl<B: NativeBridge> NativeBridge for TraceBridge<B> {
    fn printf_0(&self, format: &str) -> Result<(), PrintError> {
        self.trace(format, &[]);
        self.inner.printf_0(format)
    }

    fn printf_1(&self, format: &str, a: &Value) -> Result<(), PrintError> {
        self.trace(format, &[a]);
        self.inner.printf_1(format, a)
    }

    fn printf_2(&self, format: &str, a: &Value, b: &Value) -> Result<(), PrintError> {
        self.trace(format, &[a, b]);
        self.inner.printf_2(format, a, b)
    }

    fn printf_3(&self, format: &str, a: &Value, b: &Value, c: &Value) -> Result<(), PrintError> {
        self.trace(format, &[a, b, c]);
        self.inner.printf_3(format, a, b, c)
    }

    fn printf_4(
        &self,
        format: &str,
        a: &Value,
        b: &Value,
        c: &Value,
        d: &Value,
    ) -> Result<(), PrintError> {
        self.trace(format, &[a, b, c, d]);
        self.inner.printf_4(format, a, b, c, d)
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
        self.trace(format, &[a, b, c, d, e]);
        self.inner.printf_5(format, a, b, c, d, e)
    }
}
