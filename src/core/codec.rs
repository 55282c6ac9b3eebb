//! Encoding of scalar values to and from byte payloads.
//!
//! Wire formats:
//! - Bytes: the payload is the value itself
//! - String: UTF-8
//! - Integer: ASCII decimal, `-` for negatives, no leading zeros
//! - Float: the canonical float string produced by [`format_float`]
//!
//! Float decoding re-serializes the parsed value and compares it with the
//! payload text as exact decimals. A mismatch means the literal carried more
//! precision than an `f64` holds; the decode still succeeds and reports a
//! [`PrecisionLoss`] alongside the value.

use std::fmt;
use std::str::FromStr;

use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use tracing::warn;

use crate::domain::{format_float, ArtifactError, Value, ValueKind};

/// Encode/decode capability of a value artifact
pub trait Encodable {
    /// The value kind this codec encodes
    fn value_kind(&self) -> ValueKind;

    /// Serialize a value, rejecting anything outside the accepted domain
    fn encode(&self, value: &Value) -> Result<Vec<u8>, ArtifactError>;

    /// Rebuild a value from a payload produced by `encode`
    fn decode(&self, payload: &[u8]) -> Result<Decoded, ArtifactError>;
}

/// Result of a successful decode
#[derive(Debug, Clone, PartialEq)]
pub struct Decoded {
    pub value: Value,

    /// Set when the payload could not be represented exactly
    pub diagnostic: Option<PrecisionLoss>,
}

impl Decoded {
    pub fn exact(value: Value) -> Self {
        Self {
            value,
            diagnostic: None,
        }
    }
}

/// A float literal that lost precision on decode
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrecisionLoss {
    /// Payload text as stored
    pub original: String,

    /// Canonical string of the decoded float
    pub reserialized: String,
}

impl fmt::Display for PrecisionLoss {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "The number \"{}\" has lost precision when converted to float \"{}\"",
            self.original, self.reserialized
        )
    }
}

impl Encodable for ValueKind {
    fn value_kind(&self) -> ValueKind {
        *self
    }

    fn encode(&self, value: &Value) -> Result<Vec<u8>, ArtifactError> {
        match (self, value) {
            (ValueKind::Bytes, Value::Bytes(bytes)) => Ok(bytes.clone()),
            (ValueKind::String, Value::String(text)) => Ok(text.as_bytes().to_vec()),
            (ValueKind::Integer, Value::Integer(n)) => Ok(n.to_string().into_bytes()),
            (ValueKind::Float, Value::Float(x)) => Ok(format_float(*x).into_bytes()),
            (kind, other) => Err(ArtifactError::type_mismatch(
                kind.expected(),
                other.type_name(),
                other.to_string(),
            )),
        }
    }

    fn decode(&self, payload: &[u8]) -> Result<Decoded, ArtifactError> {
        match self {
            ValueKind::Bytes => Ok(Decoded::exact(Value::Bytes(payload.to_vec()))),
            ValueKind::String => {
                let text = std::str::from_utf8(payload)
                    .map_err(|e| ArtifactError::decoding(self.as_str(), e))?;
                Ok(Decoded::exact(Value::String(text.to_string())))
            }
            ValueKind::Integer => {
                let text = payload_text(*self, payload)?;
                let n = BigInt::from_str(text.trim())
                    .map_err(|e| ArtifactError::decoding(self.as_str(), format!("{}: {:?}", e, text)))?;
                Ok(Decoded::exact(Value::Integer(n)))
            }
            ValueKind::Float => decode_float(payload),
        }
    }
}

fn payload_text(kind: ValueKind, payload: &[u8]) -> Result<&str, ArtifactError> {
    std::str::from_utf8(payload).map_err(|e| ArtifactError::decoding(kind.as_str(), e))
}

fn decode_float(payload: &[u8]) -> Result<Decoded, ArtifactError> {
    let original = payload_text(ValueKind::Float, payload)?.trim();
    let value = f64::from_str(original).map_err(|e| {
        ArtifactError::decoding(ValueKind::Float.as_str(), format!("{}: {:?}", e, original))
    })?;

    let reserialized = format_float(value);
    let diagnostic = if is_exact(original, value, &reserialized) {
        None
    } else {
        warn!(
            original = %original,
            reserialized = %reserialized,
            "The number has lost precision when converted to float"
        );
        Some(PrecisionLoss {
            original: original.to_string(),
            reserialized,
        })
    };

    Ok(Decoded {
        value: Value::Float(value),
        diagnostic,
    })
}

/// Compare the payload literal and the re-serialized float as exact decimals
fn is_exact(original: &str, value: f64, reserialized: &str) -> bool {
    if is_non_finite_literal(original) {
        return true;
    }

    match BigDecimal::from_str(original) {
        // A finite literal that overflowed to infinity
        Ok(_) if !value.is_finite() => false,
        Ok(literal) => match BigDecimal::from_str(reserialized) {
            Ok(roundtrip) => literal == roundtrip,
            Err(_) => false,
        },
        // Finite spelling with an exponent beyond what a decimal can hold
        Err(_) => false,
    }
}

/// `inf`, `infinity` or `nan`, in any case, with an optional sign
fn is_non_finite_literal(literal: &str) -> bool {
    let unsigned = literal
        .strip_prefix(['+', '-'])
        .unwrap_or(literal)
        .to_ascii_lowercase();
    matches!(unsigned.as_str(), "inf" | "infinity" | "nan")
}
