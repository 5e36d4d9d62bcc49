//! Command-line literals to boxed values

use jmate_io::{ObjectRef, Value};

/// Parse one command-line argument into a boxed value.
///
/// `null`, `true`/`false`, `'c'`, integers (decimal or `0x` hex, `L` suffix
/// for long), decimals, `@0x..` object handles. Anything else is a string,
/// with one pair of surrounding double quotes removed.
pub fn parse_literal(raw: &str) -> Value {
    match raw {
        "null" => return Value::Null,
        "true" => return Value::Bool(true),
        "false" => return Value::Bool(false),
        _ => {}
    }

    if let Some(c) = parse_char(raw) {
        return Value::Char(c);
    }

    if let Some(addr) = raw.strip_prefix('@').and_then(parse_hex) {
        return Value::Object(ObjectRef::from_raw(addr as usize));
    }

    if let Some(long) = raw
        .strip_suffix(['L', 'l'])
        .and_then(parse_integer)
    {
        return Value::Long(long);
    }

    if let Some(int) = parse_integer(raw) {
        return match i32::try_from(int) {
            Ok(i) => Value::Int(i),
            Err(_) => Value::Long(int),
        };
    }

    if looks_numeric(raw) {
        if let Ok(d) = raw.parse::<f64>() {
            return Value::Double(d);
        }
    }

    let text = raw
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(raw);
    Value::string(unescape(text))
}

fn parse_char(raw: &str) -> Option<char> {
    let inner = raw.strip_prefix('\'')?.strip_suffix('\'')?;
    let unescaped = unescape(inner);
    let mut chars = unescaped.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

fn parse_hex(digits: &str) -> Option<u64> {
    let digits = digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))?;
    u64::from_str_radix(digits, 16).ok()
}

fn parse_integer(raw: &str) -> Option<i64> {
    let (negative, body) = match raw.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, raw),
    };
    if body.is_empty() || body.starts_with(['+', '-']) {
        return None;
    }

    let magnitude = match parse_hex(body) {
        Some(hex) => i64::try_from(hex).ok()?,
        None if body.bytes().all(|b| b.is_ascii_digit()) => body.parse::<i64>().ok()?,
        None => return None,
    };

    Some(if negative { -magnitude } else { magnitude })
}

fn looks_numeric(raw: &str) -> bool {
    let body = raw.strip_prefix('-').unwrap_or(raw);
    body.starts_with(|c: char| c.is_ascii_digit() || c == '.')
        && body.bytes().any(|b| b.is_ascii_digit())
}

/// Expand backslash escapes: `\n`, `\t`, `\r`, `\\`, `\0`, `\"`, `\'`.
///
/// Unknown escapes and a trailing backslash are kept as written.
pub fn unescape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('0') => out.push('\0'),
            Some('\\') => out.push('\\'),
            Some('"') => out.push('"'),
            Some('\'') => out.push('\''),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }

    out
}
