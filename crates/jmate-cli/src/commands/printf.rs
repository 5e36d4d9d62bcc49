//! Printf and println commands

use super::Options;
use crate::literal::{parse_literal, unescape};
use anyhow::{Context, Result};
use jmate_io::Value;
use log::debug;

/// Box `args` from their literal form and print them with `format`
pub fn run(options: &Options, format: &str, args: &[String]) -> Result<()> {
    let format = unescape(format);
    let values: Vec<Value> = args.iter().map(|arg| parse_literal(arg)).collect();
    debug!(
        "printf {:?} with [{}]",
        format,
        values
            .iter()
            .map(Value::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    );

    let stream = options.open()?;
    stream
        .printf(&format, &values)
        .with_context(|| format!("printf {:?} failed", format))?;
    Ok(())
}

pub fn run_println(options: &Options, text: &str) -> Result<()> {
    let text = unescape(text);
    let stream = options.open()?;
    stream
        .println(&text)
        .with_context(|| format!("println {:?} failed", text))?;
    Ok(())
}
