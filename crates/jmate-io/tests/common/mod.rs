//! Shared test utilities for jmate-io integration tests

#![allow(dead_code)]

use jmate_io::{NativeBridge, PrintError, Value};
use std::sync::Mutex;

// Re-export testing utilities
pub use pretty_assertions::{assert_eq, assert_ne};

/// One observed entry point invocation
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub arity: usize,
    pub format: String,
    pub args: Vec<Value>,
}

impl Call {
    pub fn new(arity: usize, format: &str, args: &[Value]) -> Self {
        Self {
            arity,
            format: format.to_string(),
            args: args.to_vec(),
        }
    }
}

/// Bridge that records every invocation instead of calling native code
#[derive(Debug, Default)]
pub struct RecordingBridge {
    calls: Mutex<Vec<Call>>,
}

impl RecordingBridge {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, format: &str, args: &[&Value]) -> Result<(), PrintError> {
        let args: Vec<Value> = args.iter().map(|v| (*v).clone()).collect();
        self.calls
            .lock()
            .unwrap()
            .push(Call::new(args.len(), format, &args));
        Ok(())
    }
}

impl NativeBridge for RecordingBridge {
    fn printf_0(&self, format: &str) -> Result<(), PrintError> {
        self.record(format, &[])
    }

    fn printf_1(&self, format: &str, a: &Value) -> Result<(), PrintError> {
        self.record(format, &[a])
    }

    fn printf_2(&self, format: &str, a: &Value, b: &Value) -> Result<(), PrintError> {
        self.record(format, &[a, b])
    }

    fn printf_3(&self, format: &str, a: &Value, b: &Value, c: &Value) -> Result<(), PrintError> {
        self.record(format, &[a, b, c])
    }

    fn printf_4(
        &self,
        format: &str,
        a: &Value,
        b: &Value,
        c: &Value,
        d: &Value,
    ) -> Result<(), PrintError> {
        self.record(format, &[a, b, c, d])
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
        self.record(format, &[a, b, c, d, e])
    }
}

/// Sample argument sequence of length `n` mixing every word-sized kind
pub fn sample_args(n: usize) -> Vec<Value> {
    let pool = [
        Value::Int(0x92),
        Value::string("text"),
        Value::Char('x'),
        Value::Long(1 << 40),
        Value::Bool(true),
        Value::Null,
    ];
    pool.iter().cycle().take(n).cloned().collect()
}
