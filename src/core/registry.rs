//! Standard artifact kinds and the process-wide kind registry.
//!
//! Kinds are `'static` schema tables. The registry indexes them by name,
//! is built once on first use, and is never mutated afterwards.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use anyhow::{Context, Result};
use tracing::warn;

use crate::domain::{
    Artifact, ArtifactError, ArtifactKind, ArtifactRecord, Property, PropertyDef, PropertyType,
    ValueKind, SPAN_KEY, SPLIT_NAMES_KEY,
};

/// Span for an artifact
pub const SPAN_PROPERTY: Property = Property::new(PropertyType::Int);

/// Comma separated splits of an artifact; empty string means no split
pub const SPLIT_NAMES_PROPERTY: Property = Property::new(PropertyType::String);

const SPAN: PropertyDef = PropertyDef::new(SPAN_KEY, SPAN_PROPERTY);
const SPLIT_NAMES: PropertyDef = PropertyDef::new(SPLIT_NAMES_KEY, SPLIT_NAMES_PROPERTY);

pub static EXAMPLES: ArtifactKind = ArtifactKind::record("Examples", &[SPAN, SPLIT_NAMES]);
pub static EXAMPLE_ANOMALIES: ArtifactKind = ArtifactKind::record("ExampleAnomalies", &[SPAN]);
pub static EXAMPLE_STATISTICS: ArtifactKind =
    ArtifactKind::record("ExampleStatistics", &[SPAN, SPLIT_NAMES]);
pub static EXTERNAL_ARTIFACT: ArtifactKind = ArtifactKind::record("ExternalArtifact", &[]);
pub static INFERENCE_RESULT: ArtifactKind = ArtifactKind::record("InferenceResult", &[]);
pub static INFRA_BLESSING: ArtifactKind = ArtifactKind::record("InfraBlessing", &[]);
pub static MODEL: ArtifactKind = ArtifactKind::record("Model", &[]);
pub static MODEL_BLESSING: ArtifactKind = ArtifactKind::record("ModelBlessing", &[]);
pub static MODEL_EVALUATION: ArtifactKind = ArtifactKind::record("ModelEvaluation", &[]);
pub static PUSHED_MODEL: ArtifactKind = ArtifactKind::record("PushedModel", &[]);
pub static SCHEMA: ArtifactKind = ArtifactKind::record("Schema", &[]);
pub static TRANSFORM_GRAPH: ArtifactKind = ArtifactKind::record("TransformGraph", &[]);
// Still subject to change
pub static HYPER_PARAMETERS: ArtifactKind = ArtifactKind::record("HyperParameters", &[]);

pub static BYTES: ArtifactKind = ArtifactKind::value("Bytes", ValueKind::Bytes);
pub static STRING: ArtifactKind = ArtifactKind::value("String", ValueKind::String);
pub static INTEGER: ArtifactKind = ArtifactKind::value("Integer", ValueKind::Integer);
pub static FLOAT: ArtifactKind = ArtifactKind::value("Float", ValueKind::Float);

/// Every standard kind, records first
pub static STANDARD_KINDS: [&ArtifactKind; 17] = [
    &EXAMPLES,
    &EXAMPLE_ANOMALIES,
    &EXAMPLE_STATISTICS,
    &EXTERNAL_ARTIFACT,
    &INFERENCE_RESULT,
    &INFRA_BLESSING,
    &MODEL,
    &MODEL_BLESSING,
    &MODEL_EVALUATION,
    &PUSHED_MODEL,
    &SCHEMA,
    &TRANSFORM_GRAPH,
    &HYPER_PARAMETERS,
    &BYTES,
    &STRING,
    &INTEGER,
    &FLOAT,
];

static REGISTRY: OnceLock<Registry> = OnceLock::new();

/// Get the process-wide registry of standard kinds
pub fn registry() -> &'static Registry {
    REGISTRY.get_or_init(|| Registry::from_kinds(&STANDARD_KINDS))
}

/// Name-indexed, immutable set of artifact kinds
#[derive(Debug, Clone)]
pub struct Registry {
    kinds: BTreeMap<&'static str, &'static ArtifactKind>,
}

impl Registry {
    /// Build a registry; the first declaration of a name wins
    pub fn from_kinds(kinds: &[&'static ArtifactKind]) -> Self {
        let mut map = BTreeMap::new();
        for kind in kinds {
            if map.contains_key(kind.name()) {
                warn!(kind = kind.name(), "Duplicate artifact kind ignored");
                continue;
            }
            map.insert(kind.name(), *kind);
        }
        Self { kinds: map }
    }

    pub fn get(&self, name: &str) -> Option<&'static ArtifactKind> {
        self.kinds.get(name).copied()
    }

    pub fn resolve(&self, name: &str) -> Result<&'static ArtifactKind, ArtifactError> {
        self.get(name)
            .ok_or_else(|| ArtifactError::UnknownKind(name.to_string()))
    }

    /// Resolve a kind that carries a scalar value
    pub fn resolve_value(&self, name: &str) -> Result<&'static ArtifactKind, ArtifactError> {
        let kind = self.resolve(name)?;
        match kind.value_kind() {
            Some(_) => Ok(kind),
            None => Err(ArtifactError::NotAValueKind(name.to_string())),
        }
    }

    /// Kinds in name order
    pub fn kinds(&self) -> impl Iterator<Item = &'static ArtifactKind> + '_ {
        self.kinds.values().copied()
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    /// Parse an artifact record, resolving its kind by name
    pub fn parse_artifact(&self, json: &str) -> Result<Artifact> {
        let record: ArtifactRecord =
            serde_json::from_str(json).context("Failed to parse artifact record")?;
        let kind = self.resolve(&record.type_name)?;
        Ok(Artifact::from_record(kind, record)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_registry() {
        let registry = registry();
        assert_eq!(registry.len(), STANDARD_KINDS.len());
        assert!(std::ptr::eq(registry.resolve("Examples").unwrap(), &EXAMPLES));
        assert!(matches!(
            registry.resolve("Nope"),
            Err(ArtifactError::UnknownKind(_))
        ));
    }

    #[test]
    fn test_resolve_value_kind() {
        let registry = registry();
        assert_eq!(
            registry.resolve_value("Float").unwrap().value_kind(),
            Some(ValueKind::Float)
        );
        assert_eq!(
            registry.resolve_value("Model").unwrap_err(),
            ArtifactError::NotAValueKind("Model".to_string())
        );
    }

    #[test]
    fn test_duplicate_kind_keeps_first() {
        static SHADOW: ArtifactKind = ArtifactKind::record("Model", &[SPAN]);
        let registry = Registry::from_kinds(&[&MODEL, &SHADOW]);
        assert_eq!(registry.len(), 1);
        assert!(registry.get("Model").unwrap().schema().is_empty());
    }

    #[test]
    fn test_example_schemas() {
        assert_eq!(EXAMPLES.property_type("span"), Some(PropertyType::Int));
        assert_eq!(
            EXAMPLE_STATISTICS.property_type("split_names"),
            Some(PropertyType::String)
        );
        assert_eq!(EXAMPLE_ANOMALIES.property_type("split_names"), None);
        assert!(MODEL.schema().is_empty());
    }
}
