use std::convert::TryFrom;

use nom::combinator::all_consuming;
use nom::number::complete::double;

use crate::model::Value;

pub fn to_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Int(n) => Some(*n),
        // Hashes are unsigned on the wire and reinterpreted bit for bit.
        Value::Uint(n) => Some(*n as i64),
        Value::Float(f) => Some(*f as i64),
        Value::Bool(b) => Some(*b as i64),
        Value::Str(s) => parse_int(s),
        _ => None,
    }
}

pub fn to_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Float(f) => Some(*f),
        Value::Int(n) => Some(*n as f64),
        Value::Uint(n) => Some(*n as f64),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::Str(s) => parse_float(s),
        _ => None,
    }
}

pub fn to_string(value: &Value) -> Option<String> {
    match value {
        Value::Str(s) => Some(s.clone()),
        Value::Bin(b) => Some(String::from_utf8_lossy(b).into_owned()),
        Value::Bool(b) => Some(if *b { "1" } else { "0" }.to_owned()),
        Value::Int(n) => Some(n.to_string()),
        Value::Uint(n) => Some(n.to_string()),
        Value::Float(f) => Some(f.to_string()),
        _ => None,
    }
}

/// Elements of a list-valued field. A lone scalar counts as a list of one.
pub fn items(value: &Value) -> Vec<&Value> {
    match value {
        Value::Array(a) => a.iter().collect(),
        Value::Nil => vec![],
        Value::Map(m) if m.is_empty() => vec![],
        v => vec![v],
    }
}

fn parse_float(s: &str) -> Option<f64> {
    if s.is_empty() {
        return Some(0.0);
    }
    all_consuming(double::<&str, nom::error::Error<&str>>)(s)
        .ok()
        .map(|(_, n)| n)
}

// Decimal, or 0x/0o/0b prefixed, or a leading 0 for octal.
fn parse_int(s: &str) -> Option<i64> {
    if s.is_empty() {
        return Some(0);
    }

    let (negative, digits) = match s.as_bytes()[0] {
        b'-' => (true, &s[1..]),
        b'+' => (false, &s[1..]),
        _ => (false, s),
    };

    let (radix, digits) = match digits.get(..2) {
        Some("0x") | Some("0X") => (16, &digits[2..]),
        Some("0o") | Some("0O") => (8, &digits[2..]),
        Some("0b") | Some("0B") => (2, &digits[2..]),
        _ if digits.len() > 1 && digits.starts_with('0') => (8, &digits[1..]),
        _ => (10, digits),
    };

    if digits.is_empty() || digits.starts_with(|c: char| c == '+' || c == '-') {
        return None;
    }

    let n = i128::from(u64::from_str_radix(digits, radix).ok()?);
    i64::try_from(if negative { -n } else { n }).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_i64() {
        #[rustfmt::skip]
        let tests = [
            (Value::Int(-3), Some(-3)),
            (Value::Uint(7), Some(7)),
            (Value::Uint(u64::MAX), Some(-1)),
            (Value::Float(2.9), Some(2)),
            (Value::Float(-2.9), Some(-2)),
            (Value::Bool(true), Some(1)),
            (Value::from(""), Some(0)),
            (Value::from("42"), Some(42)),
            (Value::from("-42"), Some(-42)),
            (Value::from("+42"), Some(42)),
            (Value::from("0x1f"), Some(31)),
            (Value::from("0o17"), Some(15)),
            (Value::from("017"), Some(15)),
            (Value::from("0b101"), Some(5)),
            (Value::from("0"), Some(0)),
            (Value::from("-9223372036854775808"), Some(i64::MIN)),
            (Value::from("9223372036854775808"), None),
            (Value::from("4.2"), None),
            (Value::from("--1"), None),
            (Value::from("0x"), None),
            (Value::from("abc"), None),
            (Value::Nil, None),
            (Value::Array(vec![]), None),
        ];

        for (input, expected) in &tests {
            assert_eq!(*expected, to_i64(input), "while coercing {:?}", input);
        }
    }

    #[test]
    fn test_to_f64() {
        #[rustfmt::skip]
        let tests = [
            (Value::Float(42.4), Some(42.4)),
            (Value::Int(-1), Some(-1.0)),
            (Value::Uint(3), Some(3.0)),
            (Value::Bool(false), Some(0.0)),
            (Value::from(""), Some(0.0)),
            (Value::from("1"), Some(1.0)),
            (Value::from("42.4"), Some(42.4)),
            (Value::from("-0.5"), Some(-0.5)),
            (Value::from("2e-5"), Some(0.00002)),
            (Value::from("1.5x"), None),
            (Value::from("x"), None),
            (Value::Nil, None),
        ];

        for (input, expected) in &tests {
            assert_eq!(*expected, to_f64(input), "while coercing {:?}", input);
        }
    }

    #[test]
    fn test_to_string() {
        #[rustfmt::skip]
        let tests = [
            (Value::from("us"), Some("us")),
            (Value::Bin(b"eu".to_vec()), Some("eu")),
            (Value::Bool(true), Some("1")),
            (Value::Bool(false), Some("0")),
            (Value::Int(-5), Some("-5")),
            (Value::Uint(5), Some("5")),
            (Value::Float(1.0), Some("1")),
            (Value::Float(0.25), Some("0.25")),
            (Value::Nil, None),
            (Value::Array(vec![]), None),
        ];

        for (input, expected) in &tests {
            assert_eq!(
                expected.map(String::from),
                to_string(input),
                "while coercing {:?}",
                input
            );
        }
    }

    #[test]
    fn test_items() {
        let list = Value::Array(vec![Value::from("a"), Value::Uint(1)]);
        assert_eq!(2, items(&list).len());
        assert_eq!(vec![&Value::from("a")], items(&Value::from("a")));
        assert!(items(&Value::Nil).is_empty());
        assert!(items(&Value::Map(Default::default())).is_empty());
    }
}
