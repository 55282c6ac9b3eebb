//! Scalar values carried by value artifacts.

use std::fmt;

use num_bigint::BigInt;
use serde::{Deserialize, Serialize};

/// The closed set of scalar kinds a value artifact can hold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueKind {
    /// Raw byte sequence
    Bytes,

    /// Unicode text
    String,

    /// Arbitrary-precision integer
    Integer,

    /// 64-bit float
    Float,
}

impl ValueKind {
    pub const ALL: [ValueKind; 4] = [Self::Bytes, Self::String, Self::Integer, Self::Float];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bytes => "Bytes",
            Self::String => "String",
            Self::Integer => "Integer",
            Self::Float => "Float",
        }
    }

    /// Name of the accepted input type, as used in mismatch errors
    pub fn expected(&self) -> &'static str {
        match self {
            Self::Bytes => "bytes",
            Self::String => "text",
            Self::Integer => "int",
            Self::Float => "float",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A scalar value
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bytes(Vec<u8>),
    String(String),
    Integer(BigInt),
    Float(f64),
}

impl Value {
    /// Runtime type name, matching [`ValueKind::expected`]
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Bytes(_) => "bytes",
            Self::String(_) => "text",
            Self::Integer(_) => "int",
            Self::Float(_) => "float",
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Bytes(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<&BigInt> {
        match self {
            Self::Integer(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(v) => Some(*v),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bytes(v) => write!(f, "b\"{}\"", v.escape_ascii()),
            Self::String(v) => write!(f, "{:?}", v),
            Self::Integer(v) => write!(f, "{}", v),
            Self::Float(v) => f.write_str(&format_float(*v)),
        }
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Self::Bytes(v)
    }
}

impl From<&[u8]> for Value {
    fn from(v: &[u8]) -> Self {
        Self::Bytes(v.to_vec())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<BigInt> for Value {
    fn from(v: BigInt) -> Self {
        Self::Integer(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Integer(BigInt::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

/// Canonical string form of an `f64`.
///
/// Uses the shortest digit string that round-trips. Decimal exponents in
/// `[-4, 16)` are written positionally with at least one fractional digit
/// (`3.0`, `0.0001`); others use scientific notation with a signed exponent
/// of at least two digits (`1e+16`, `1.5e-05`).
pub fn format_float(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    // `{:e}` yields the shortest round-trip digits, e.g. "-1.25e-7"
    let sci = format!("{:e}", value);
    let Some((mantissa, exponent)) = sci.split_once('e') else {
        return sci;
    };
    let exponent: i32 = exponent.parse().unwrap_or(0);
    let (sign, mantissa) = match mantissa.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", mantissa),
    };
    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();

    let mut out = String::from(sign);
    if (-4..16).contains(&exponent) {
        if exponent < 0 {
            out.push_str("0.");
            out.push_str(&"0".repeat((-exponent - 1) as usize));
            out.push_str(&digits);
        } else {
            let int_len = exponent as usize + 1;
            if digits.len() > int_len {
                out.push_str(&digits[..int_len]);
                out.push('.');
                out.push_str(&digits[int_len..]);
            } else {
                out.push_str(&digits);
                out.push_str(&"0".repeat(int_len - digits.len()));
                out.push_str(".0");
            }
        }
    } else {
        out.push_str(&digits[..1]);
        if digits.len() > 1 {
            out.push('.');
            out.push_str(&digits[1..]);
        }
        let exp_sign = if exponent < 0 { '-' } else { '+' };
        out.push_str(&format!("e{}{:02}", exp_sign, exponent.abs()));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(Value::from(b"a\n".as_slice()).to_string(), "b\"a\\n\"");
        assert_eq!(Value::from("hi").to_string(), "\"hi\"");
        assert_eq!(Value::from(-12i64).to_string(), "-12");
        assert_eq!(Value::from(2.5f64).to_string(), "2.5");
    }

    #[test]
    fn test_type_names_match_kinds() {
        let values = [
            Value::from(vec![1u8]),
            Value::from("a"),
            Value::from(1i64),
            Value::from(1.0f64),
        ];
        for (value, kind) in values.iter().zip(ValueKind::ALL) {
            assert_eq!(value.type_name(), kind.expected());
        }
    }

    #[test]
    fn test_format_float_positional() {
        assert_eq!(format_float(3.0), "3.0");
        assert_eq!(format_float(-0.0), "-0.0");
        assert_eq!(format_float(0.5), "0.5");
        assert_eq!(format_float(3.1415926535), "3.1415926535");
        assert_eq!(format_float(0.0001), "0.0001");
        assert_eq!(format_float(123456.75), "123456.75");
        assert_eq!(format_float(1e15), "1000000000000000.0");
    }

    #[test]
    fn test_format_float_scientific() {
        assert_eq!(format_float(1e16), "1e+16");
        assert_eq!(format_float(0.00001), "1e-05");
        assert_eq!(format_float(-1.5e-5), "-1.5e-05");
        assert_eq!(format_float(1.7976931348623157e308), "1.7976931348623157e+308");
        assert_eq!(format_float(5e-324), "5e-324");
    }

    #[test]
    fn test_format_float_non_finite() {
        assert_eq!(format_float(f64::INFINITY), "inf");
        assert_eq!(format_float(f64::NEG_INFINITY), "-inf");
        assert_eq!(format_float(f64::NAN), "nan");
    }
}
