//! Literal rendering for constant values and parameter defaults
//!
//! Output follows the runtime's own `var_export` conventions (`NULL`,
//! single-quoted strings, `1.0E+25` for exponent floats) except for arrays,
//! which use the short `[...]` syntax so a default stays on one line.

use crate::model::{ArrayKey, Value};

/// Render a value as a literal that re-parses to an equal value
pub fn render_literal(value: &Value) -> String {
    let mut out = String::new();
    write_literal(&mut out, value);
    out
}

fn write_literal(out: &mut String, value: &Value) {
    match value {
        Value::Null => out.push_str("NULL"),
        Value::Bool(true) => out.push_str("true"),
        Value::Bool(false) => out.push_str("false"),
        Value::Int(n) => out.push_str(&render_int(*n)),
        Value::Float(n) => out.push_str(&render_float(*n)),
        Value::String(s) => out.push_str(&quote_string(s)),
        Value::Array(entries) => {
            let list = value.is_list();
            out.push('[');
            for (i, (key, item)) in entries.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                if !list {
                    write_key(out, key);
                    out.push_str(" => ");
                }
                write_literal(out, item);
            }
            out.push(']');
        }
    }
}

fn write_key(out: &mut String, key: &ArrayKey) {
    match key {
        ArrayKey::Int(n) => out.push_str(&render_int(*n)),
        ArrayKey::String(s) => out.push_str(&quote_string(s)),
    }
}

/// `i64::MIN` has no literal form: its magnitude overflows to float before
/// the minus applies.
fn render_int(n: i64) -> String {
    if n == i64::MIN {
        format!("{}-1", i64::MIN + 1)
    } else {
        n.to_string()
    }
}

/// Render a float so it keeps its type and full precision on re-parse
fn render_float(n: f64) -> String {
    if n.is_nan() {
        return "NAN".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "INF" } else { "-INF" }.to_string();
    }

    // Debug formatting is shortest round-trip and always keeps a fraction
    let repr = format!("{n:?}");
    match repr.split_once('e') {
        None => repr,
        Some((mantissa, exponent)) => {
            let mantissa = if mantissa.contains('.') {
                mantissa.to_string()
            } else {
                format!("{mantissa}.0")
            };
            if exponent.starts_with('-') {
                format!("{mantissa}E{exponent}")
            } else {
                format!("{mantissa}E+{exponent}")
            }
        }
    }
}

/// Single-quote a string. NUL bytes cannot appear in a single-quoted
/// literal, so they are spliced in with a double-quoted `"\0"`.
pub fn quote_string(s: &str) -> String {
    s.split('\0')
        .map(|part| {
            let escaped = part.replace('\\', "\\\\").replace('\'', "\\'");
            format!("'{escaped}'")
        })
        .collect::<Vec<_>>()
        .join(" . \"\\0\" . ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalars() {
        assert_eq!(render_literal(&Value::Int(42)), "42");
        assert_eq!(render_literal(&Value::Int(-1)), "-1");
        assert_eq!(render_literal(&Value::Bool(true)), "true");
        assert_eq!(render_literal(&Value::Bool(false)), "false");
        assert_eq!(render_literal(&Value::Null), "NULL");
        assert_eq!(render_literal(&Value::from("text")), "'text'");
    }

    #[test]
    fn test_int_min_stays_an_int() {
        assert_eq!(
            render_literal(&Value::Int(i64::MIN)),
            "-9223372036854775807-1"
        );
        assert_eq!(render_literal(&Value::Int(i64::MAX)), "9223372036854775807");

        let map = Value::map([(ArrayKey::Int(i64::MIN), Value::Bool(true))]);
        assert_eq!(render_literal(&map), "[-9223372036854775807-1 => true]");
    }

    #[test]
    fn test_floats_keep_their_type() {
        assert_eq!(render_literal(&Value::Float(1.0)), "1.0");
        assert_eq!(render_literal(&Value::Float(0.1)), "0.1");
        assert_eq!(render_literal(&Value::Float(-2.5)), "-2.5");
        assert_eq!(render_literal(&Value::Float(1e25)), "1.0E+25");
        assert_eq!(render_literal(&Value::Float(1.5e-7)), "1.5E-7");
        assert_eq!(render_literal(&Value::Float(f64::INFINITY)), "INF");
        assert_eq!(render_literal(&Value::Float(f64::NEG_INFINITY)), "-INF");
        assert_eq!(render_literal(&Value::Float(f64::NAN)), "NAN");
    }

    #[test]
    fn test_string_escaping() {
        assert_eq!(quote_string("it's"), r"'it\'s'");
        assert_eq!(quote_string(r"C:\path"), r"'C:\\path'");
        assert_eq!(quote_string(""), "''");
        assert_eq!(quote_string("a\0b"), r#"'a' . "\0" . 'b'"#);
        // Anything else is literal inside single quotes
        assert_eq!(quote_string("$x\n"), "'$x\n'");
    }

    #[test]
    fn test_arrays() {
        assert_eq!(render_literal(&Value::list(Vec::new())), "[]");
        assert_eq!(
            render_literal(&Value::list([Value::Int(1), Value::Int(2), Value::Int(3)])),
            "[1, 2, 3]"
        );
        let map = Value::map([
            (ArrayKey::String("mode".to_string()), Value::from("r")),
            (ArrayKey::Int(5), Value::list([Value::Null])),
        ]);
        assert_eq!(render_literal(&map), "['mode' => 'r', 5 => [NULL]]");
    }

    #[test]
    fn test_sparse_list_keeps_keys() {
        let sparse = Value::map([
            (ArrayKey::Int(1), Value::from("a")),
            (ArrayKey::Int(2), Value::from("b")),
        ]);
        assert_eq!(render_literal(&sparse), "[1 => 'a', 2 => 'b']");
    }
}
