//! Value Codec Integration Tests
//!
//! Tests for the payload formats of the Bytes, String, Integer and Float
//! value kinds, their domain checks, and the float precision diagnostic.

use artifacts::core::Encodable;
use artifacts::{ArtifactError, Value, ValueKind};
use num_bigint::BigInt;

fn decode_value(kind: ValueKind, payload: &[u8]) -> Value {
    kind.decode(payload).unwrap().value
}

#[test]
fn test_bytes_type() {
    let kind = ValueKind::Bytes;
    assert_eq!(
        kind.encode(&Value::from(b"hello world".as_slice())).unwrap(),
        b"hello world"
    );
    assert_eq!(
        decode_value(kind, b"hello world"),
        Value::Bytes(b"hello world".to_vec())
    );
}

#[test]
fn test_bytes_roundtrip_arbitrary() {
    let kind = ValueKind::Bytes;
    let samples: [&[u8]; 3] = [b"", &[0, 159, 146, 150, 255], b"\n\r\t"];

    for sample in samples {
        let payload = kind.encode(&Value::from(sample)).unwrap();
        assert_eq!(decode_value(kind, &payload), Value::from(sample));
    }
}

#[test]
fn test_string_type() {
    let kind = ValueKind::String;
    assert_eq!(kind.encode(&Value::from("hello world")).unwrap(), b"hello world");
    assert_eq!(decode_value(kind, b"hello world"), Value::from("hello world"));
}

#[test]
fn test_string_multibyte_roundtrip() {
    let kind = ValueKind::String;
    for text in ["", "héllo wörld", "数据集", "emoji 🦀 crab"] {
        let payload = kind.encode(&Value::from(text)).unwrap();
        assert_eq!(payload, text.as_bytes());
        assert_eq!(decode_value(kind, &payload), Value::from(text));
    }
}

#[test]
fn test_string_rejects_invalid_utf8() {
    let result = ValueKind::String.decode(&[0xff, 0xfe]);
    assert!(matches!(result, Err(ArtifactError::DecodingFailure { .. })));
}

#[test]
fn test_integer_type() {
    let kind = ValueKind::Integer;
    assert_eq!(kind.encode(&Value::from(19260817i64)).unwrap(), b"19260817");
    assert_eq!(decode_value(kind, b"19260817"), Value::from(19260817i64));
}

#[test]
fn test_integer_roundtrip_any_magnitude() {
    let kind = ValueKind::Integer;
    let huge: BigInt = "-123456789012345678901234567890123456789".parse().unwrap();
    let samples = [
        BigInt::from(0),
        BigInt::from(-1),
        BigInt::from(i64::MAX),
        BigInt::from(i64::MIN),
        huge,
    ];

    for n in samples {
        let payload = kind.encode(&Value::Integer(n.clone())).unwrap();
        assert_eq!(payload, n.to_string().as_bytes());
        assert_eq!(decode_value(kind, &payload), Value::Integer(n));
    }
}

#[test]
fn test_integer_wire_format() {
    let kind = ValueKind::Integer;
    assert_eq!(kind.encode(&Value::from(-7i64)).unwrap(), b"-7");
    assert_eq!(kind.encode(&Value::from(0i64)).unwrap(), b"0");
}

#[test]
fn test_integer_rejects_non_numeric_payload() {
    for payload in [b"abc".as_slice(), b"1.5".as_slice(), b"".as_slice()] {
        let result = ValueKind::Integer.decode(payload);
        assert!(matches!(result, Err(ArtifactError::DecodingFailure { .. })));
    }
}

#[test]
fn test_float_type() {
    let kind = ValueKind::Float;
    assert_eq!(kind.encode(&Value::from(3.1415926535f64)).unwrap(), b"3.1415926535");

    let decoded = kind.decode(b"3.1415926535").unwrap();
    let value = decoded.value.as_float().unwrap();
    assert!((value - 3.1415926535).abs() < f64::EPSILON);
    assert!(decoded.diagnostic.is_none());
}

#[test]
fn test_float_precision_loss_warning() {
    let raw = b"3.14159265358979323846264338327950288";
    let decoded = ValueKind::Float.decode(raw).unwrap();

    assert_eq!(decoded.value, Value::Float(std::f64::consts::PI));
    let loss = decoded.diagnostic.expect("precision loss should be reported");
    assert_eq!(loss.original, "3.14159265358979323846264338327950288");
    assert_eq!(loss.reserialized, "3.141592653589793");
    assert!(loss.to_string().contains("lost precision"));
}

#[test]
fn test_float_roundtrip_has_no_diagnostic() {
    let kind = ValueKind::Float;
    for x in [0.0, -2.5, 1e-7, 6.02214076e23, 0.1 + 0.2, f64::MAX, f64::MIN_POSITIVE] {
        let payload = kind.encode(&Value::Float(x)).unwrap();
        let decoded = kind.decode(&payload).unwrap();
        assert_eq!(decoded.value, Value::Float(x));
        assert!(decoded.diagnostic.is_none(), "unexpected loss for {}", x);
    }
}

#[test]
fn test_float_accepts_exact_literals_with_extra_zeros() {
    let decoded = ValueKind::Float.decode(b"2.500000").unwrap();
    assert_eq!(decoded.value, Value::Float(2.5));
    assert!(decoded.diagnostic.is_none());
}

#[test]
fn test_float_rejects_non_numeric_payload() {
    let result = ValueKind::Float.decode(b"three");
    assert!(matches!(result, Err(ArtifactError::DecodingFailure { .. })));
}

#[test]
fn test_encode_domain_checks() {
    let cases = [
        (ValueKind::Integer, Value::from("5")),
        (ValueKind::Float, Value::from(3i64)),
        (ValueKind::Bytes, Value::from("text")),
        (ValueKind::String, Value::from(b"bytes".as_slice())),
    ];

    for (kind, value) in cases {
        match kind.encode(&value) {
            Err(ArtifactError::TypeMismatch { expected, found, .. }) => {
                assert_eq!(expected, kind.expected());
                assert_eq!(found, value.type_name());
            }
            other => panic!("{} accepted {:?}: {:?}", kind, value, other),
        }
    }
}
