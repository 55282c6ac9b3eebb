//! Property descriptors and property values.
//!
//! A property is a typed slot declared by an artifact kind. Descriptors are
//! plain `Copy` data built in `const` context, so one schema table is shared
//! by every artifact of a kind.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::ArtifactError;

/// Primitive kinds a property may hold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyType {
    /// 64-bit signed integer
    Int,

    /// UTF-8 text
    String,

    /// 64-bit float
    Double,
}

impl PropertyType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Int => "int",
            Self::String => "string",
            Self::Double => "double",
        }
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable descriptor of a declared property
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Property {
    pub property_type: PropertyType,
}

impl Property {
    pub const fn new(property_type: PropertyType) -> Self {
        Self { property_type }
    }
}

/// A named entry in an artifact kind's schema table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropertyDef {
    pub name: &'static str,
    pub property: Property,
}

impl PropertyDef {
    pub const fn new(name: &'static str, property: Property) -> Self {
        Self { name, property }
    }
}

/// A value stored in an artifact property
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyValue {
    Int(i64),
    Double(f64),
    String(String),
}

impl PropertyValue {
    /// The property type this value satisfies
    pub fn property_type(&self) -> PropertyType {
        match self {
            Self::Int(_) => PropertyType::Int,
            Self::Double(_) => PropertyType::Double,
            Self::String(_) => PropertyType::String,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_double(&self) -> Option<f64> {
        match self {
            Self::Double(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(v) => Some(v),
            _ => None,
        }
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{}", v),
            Self::Double(v) => write!(f, "{}", v),
            Self::String(v) => write!(f, "{:?}", v),
        }
    }
}

impl From<i64> for PropertyValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for PropertyValue {
    fn from(v: f64) -> Self {
        Self::Double(v)
    }
}

impl From<String> for PropertyValue {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<&str> for PropertyValue {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

/// Join split names into the comma-separated `split_names` form.
///
/// An empty list encodes as the empty string. Names must be non-empty and
/// free of commas so that decoding gives back the same list.
pub fn encode_split_names<S: AsRef<str>>(splits: &[S]) -> Result<String, ArtifactError> {
    let mut names = Vec::with_capacity(splits.len());
    for split in splits {
        let name = split.as_ref();
        if name.is_empty() {
            return Err(invalid_split_name(name, "split names must not be empty"));
        }
        if name.contains(',') {
            return Err(invalid_split_name(name, "split names must not contain ','"));
        }
        names.push(name);
    }
    Ok(names.join(","))
}

fn invalid_split_name(name: &str, reason: &str) -> ArtifactError {
    ArtifactError::InvalidSplitName {
        name: name.to_string(),
        reason: reason.to_string(),
    }
}

/// Parse a `split_names` string. The empty string means no splits.
pub fn decode_split_names(encoded: &str) -> Vec<String> {
    if encoded.is_empty() {
        return Vec::new();
    }
    encoded.split(',').map(str::to_string).collect()
}
