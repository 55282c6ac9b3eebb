//! artifacts - Typed pipeline artifacts with scalar value encoding
//!
//! Artifacts are typed metadata records passed between pipeline steps.
//! Each artifact kind declares a fixed property schema, and every property
//! write is checked against it. Value artifacts carry a single scalar
//! (bytes, text, integer or float) stored as a byte payload.
//!
//! # Modules
//!
//! - `domain`: Data structures (Artifact, Property, Value)
//! - `core`: Kind registry, value codecs, value artifacts
//! - `adapters`: Payload storage backends
//! - `cli`: Command-line interface
//!
//! # Usage
//!
//! ```bash
//! # Encode a float into the store
//! artifacts encode Float 3.25 --uri runs/1/threshold
//!
//! # Decode it back
//! artifacts decode Float --uri runs/1/threshold
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;

// Re-export main types at crate root for convenience
pub use adapters::{FsPayloadStore, MemoryPayloadStore, PayloadStore};
pub use core::{registry, Decoded, Encodable, PayloadState, PrecisionLoss, ValueArtifact};
pub use domain::{
    Artifact, ArtifactError, ArtifactKind, Property, PropertyType, PropertyValue, Value, ValueKind,
};
