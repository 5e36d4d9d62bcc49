//! Type marshalling - boxed values to C representations
//!
//! - `MarshalContext::marshal()`: convert a boxed value to its C representation
//! - `MarshalContext::marshal_word()`: convert and lower into a word slot
//! - `MarshalContext::marshal_format()`: convert the format descriptor
//!
//! # Memory Safety
//!
//! - All allocated C strings are owned by the `MarshalContext`
//! - Pointers handed out stay valid until the context is dropped
//! - One context per native call

use crate::ffi::types::{CType, ExternType};
use crate::value::Value;
use std::ffi::{c_void, CString};
use std::os::raw::c_char;
use thiserror::Error;

/// Marshal error types
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MarshalError {
    /// Boxed argument cannot occupy the native slot at `index`
    #[error(
        "argument {index} of type {type_name} ({}) cannot be passed in a word slot",
        .c_type.display_name()
    )]
    SlotMismatch {
        index: usize,
        type_name: &'static str,
        c_type: ExternType,
    },
    /// String contains an interior NUL byte
    #[error("invalid string: {0}")]
    InvalidString(String),
}

/// Marshal context for one native call
///
/// Keeps the C strings it hands out alive until dropped.
///
/// # Example
///
/// ```
/// # use jmate_io::ffi::{MarshalContext, CType};
/// # use jmate_io::Value;
/// let mut ctx = MarshalContext::new();
/// assert_eq!(ctx.marshal(&Value::Int(0x92)).unwrap(), CType::Int(0x92));
/// assert_eq!(ctx.marshal_word(0, &Value::Bool(true)).unwrap(), 1);
/// assert!(ctx.marshal_word(1, &Value::Double(0.5)).is_err());
/// ```
#[derive(Debug, Default)]
pub struct MarshalContext {
    allocated_strings: Vec<CString>,
}

impl MarshalContext {
    pub fn new() -> Self {
        Self {
            allocated_strings: Vec::new(),
        }
    }

    /// Marshal a boxed value to its C representation
    pub fn marshal(&mut self, value: &Value) -> Result<CType, MarshalError> {
        Ok(match value {
            Value::Null => CType::Ptr(std::ptr::null()),
            Value::Bool(b) => CType::Int(i32::from(*b)),
            Value::Char(c) => CType::Int(*c as i32),
            Value::Int(i) => CType::Int(*i),
            Value::Long(l) => CType::Long(*l),
            Value::Double(d) => CType::Double(*d),
            Value::String(s) => CType::CharPtr(self.alloc_string(s)?),
            Value::Object(r) => CType::Ptr(r.addr() as *const c_void),
        })
    }

    /// Marshal a boxed value and lower it into the word slot at `index`
    pub fn marshal_word(&mut self, index: usize, value: &Value) -> Result<isize, MarshalError> {
        let c_value = self.marshal(value)?;
        let c_type = c_value.extern_type();
        let mismatch = || MarshalError::SlotMismatch {
            index,
            type_name: value.type_name(),
            c_type,
        };

        if !c_type.fits_word() {
            return Err(mismatch());
        }
        c_value.to_word().ok_or_else(mismatch)
    }

    /// Marshal the format descriptor, unchanged, to a C string
    pub fn marshal_format(&mut self, format: &str) -> Result<*const c_char, MarshalError> {
        self.alloc_string(format)
    }

    fn alloc_string(&mut self, s: &str) -> Result<*const c_char, MarshalError> {
        let c_string = CString::new(s).map_err(|e| {
            MarshalError::InvalidString(format!(
                "string contains a NUL byte at position {}",
                e.nul_position()
            ))
        })?;

        // The heap buffer does not move when the CString is pushed
        let ptr = c_string.as_ptr();
        self.allocated_strings.push(c_string);

        Ok(ptr)
    }

    /// Number of C strings currently owned
    pub fn allocated(&self) -> usize {
        self.allocated_strings.len()
    }
}
