//! Domain types for typed pipeline artifacts.
//!
//! This module contains the core data structures:
//! - Property: declared, typed property slots and their values
//! - Artifact: kind declarations and schema-checked artifact instances
//! - Value: scalars carried by value artifacts
//! - Error: failures of artifact operations

pub mod artifact;
pub mod error;
pub mod property;
pub mod value;

// Re-export commonly used types
pub use artifact::{Artifact, ArtifactKind, ArtifactRecord, SPAN_KEY, SPLIT_NAMES_KEY};
pub use error::ArtifactError;
pub use property::{
    decode_split_names, encode_split_names, Property, PropertyDef, PropertyType, PropertyValue,
};
pub use value::{format_float, Value, ValueKind};
