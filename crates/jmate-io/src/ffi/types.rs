//! FFI type system - C-compatible types for the native boundary
//!
//! Defines:
//! - `ExternType`: the C type a boxed value marshals to
//! - `CType`: runtime representation of a marshalled value
//!
//! Type mapping:
//! - Value::Int / Bool / Char → CType::Int(i32)
//! - Value::Long → CType::Long(i64)
//! - Value::Double → CType::Double(f64)
//! - Value::String → CType::CharPtr(*const c_char)
//! - Value::Object / Null → CType::Ptr(*const c_void)
//!
//! Entry point slots are machine words. Everything except `CDouble` fits one.

use std::ffi::c_void;
use std::os::raw::c_char;

/// C type a boxed value is marshalled to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExternType {
    /// C int (promoted integer argument)
    CInt,
    /// C long long
    CLong,
    /// C double
    CDouble,
    /// C char* (null-terminated string pointer)
    CCharPtr,
    /// C void* (opaque handle or null)
    CPtr,
}

impl ExternType {
    /// Whether a value of this type can occupy a word slot
    pub fn fits_word(&self) -> bool {
        !matches!(self, ExternType::CDouble)
    }

    /// Get a display name for this extern type
    pub fn display_name(&self) -> &'static str {
        match self {
            ExternType::CInt => "c_int",
            ExternType::CLong => "c_long",
            ExternType::CDouble => "c_double",
            ExternType::CCharPtr => "c_char_ptr",
            ExternType::CPtr => "c_void_ptr",
        }
    }
}

/// C representation of a marshalled value
#[derive(Debug, Clone, Copy)]
pub enum CType {
    Int(i32),
    Long(i64),
    Double(f64),
    /// Pointer into a string owned by the `MarshalContext` that produced it.
    CharPtr(*const c_char),
    Ptr(*const c_void),
}

impl CType {
    pub fn extern_type(&self) -> ExternType {
        match self {
            CType::Int(_) => ExternType::CInt,
            CType::Long(_) => ExternType::CLong,
            CType::Double(_) => ExternType::CDouble,
            CType::CharPtr(_) => ExternType::CCharPtr,
            CType::Ptr(_) => ExternType::CPtr,
        }
    }

    /// Lower to a word slot.
    ///
    /// Returns `None` for doubles and for longs wider than the target word.
    pub fn to_word(&self) -> Option<isize> {
        match *self {
            CType::Int(i) => Some(i as isize),
            CType::Long(l) => isize::try_from(l).ok(),
            CType::Double(_) => None,
            CType::CharPtr(p) => Some(p as isize),
            CType::Ptr(p) => Some(p as isize),
        }
    }
}

// Manual PartialEq because doubles compare by bit pattern here
impl PartialEq for CType {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (CType::Int(a), CType::Int(b)) => a == b,
            (CType::Long(a), CType::Long(b)) => a == b,
            (CType::Double(a), CType::Double(b)) => a.to_bits() == b.to_bits(),
            (CType::CharPtr(a), CType::CharPtr(b)) => a == b,
            (CType::Ptr(a), CType::Ptr(b)) => a == b,
            _ => false,
        }
    }
}
