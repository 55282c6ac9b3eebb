//! Core artifact logic.
//!
//! This module contains:
//! - Codec: value encoding and the float fidelity check
//! - Registry: standard artifact kinds and name lookup
//! - ValueArtifact: cached read-through/write-through scalar artifacts

pub mod codec;
pub mod registry;
pub mod value_artifact;

// Re-export commonly used types
pub use codec::{Decoded, Encodable, PrecisionLoss};
pub use registry::{registry, Registry, STANDARD_KINDS};
pub use value_artifact::{PayloadState, ValueArtifact};
