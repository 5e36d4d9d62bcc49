//! Boxed argument values
//!
//! Every argument handed to a bridge entry point is a `Value`.
//! - Null, Bool, Char, Int, Long, Double: immediate values
//! - String: heap-allocated, reference-counted (`Arc<str>`), immutable
//! - Object: opaque handle to a caller-owned object, forwarded by address

use std::fmt;
use std::sync::Arc;

/// Opaque reference to a caller-owned object.
///
/// The bridge never dereferences it; the handle travels to the native
/// routine as a pointer-sized word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectRef(usize);

impl ObjectRef {
    pub const fn from_raw(addr: usize) -> Self {
        ObjectRef(addr)
    }

    pub const fn addr(self) -> usize {
        self.0
    }
}

impl fmt::Display for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{:#x}", self.0)
    }
}

/// A boxed argument
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Char(char),
    Int(i32),
    Long(i64),
    Double(f64),
    String(Arc<str>),
    Object(ObjectRef),
}

impl Value {
    /// Box a string
    pub fn string(s: impl AsRef<str>) -> Self {
        Value::String(Arc::from(s.as_ref()))
    }

    /// Name of the boxed type, as shown in diagnostics
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Char(_) => "char",
            Value::Int(_) => "int",
            Value::Long(_) => "long",
            Value::Double(_) => "double",
            Value::String(_) => "string",
            Value::Object(_) => "object",
        }
    }

    /// Whether two values are the same box: strings must share their
    /// allocation, everything else compares by value.
    pub fn same_identity(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::String(a), Value::String(b)) => Arc::ptr_eq(a, b),
            (Value::Double(a), Value::Double(b)) => a.to_bits() == b.to_bits(),
            _ => self == other,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Char(c) => write!(f, "'{}'", c),
            Value::Int(i) => write!(f, "{}", i),
            Value::Long(l) => write!(f, "{}L", l),
            Value::Double(d) => write!(f, "{}", d),
            Value::String(s) => write!(f, "{:?}", s),
            Value::Object(r) => write!(f, "{}", r),
        }
    }
}

macro_rules! impl_from_value {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Value::$variant(v.into())
                }
            }
        )*
    };
}

impl_from_value! {
    bool => Bool,
    char => Char,
    i8 => Int,
    i16 => Int,
    i32 => Int,
    u8 => Int,
    u16 => Int,
    u32 => Long,
    i64 => Long,
    f32 => Double,
    f64 => Double,
    ObjectRef => Object,
    Arc<str> => String,
    String => String,
}

// Reinterpreted as a signed word; `%zu`/`%lu` read the original bits back
macro_rules! impl_from_word {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Value::Long(v as i64)
                }
            }
        )*
    };
}

impl_from_word!(usize, isize, u64);

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}

impl From<&String> for Value {
    fn from(s: &String) -> Self {
        Value::string(s)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}
