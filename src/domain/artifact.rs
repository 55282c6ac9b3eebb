//! Artifacts passed between pipeline steps.
//!
//! An artifact is a typed metadata record: a kind plus a set of property
//! values. Each kind declares its properties once in a `'static` schema table,
//! and every write is checked against it.

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::ArtifactError;
use super::property::{decode_split_names, encode_split_names, PropertyDef, PropertyType, PropertyValue};
use super::value::ValueKind;

/// Property holding the span of an artifact
pub const SPAN_KEY: &str = "span";

/// Property holding comma-separated split names
pub const SPLIT_NAMES_KEY: &str = "split_names";

/// Declaration of an artifact kind: its name, schema, and value kind (if any)
#[derive(Debug)]
pub struct ArtifactKind {
    name: &'static str,
    properties: &'static [PropertyDef],
    value_kind: Option<ValueKind>,
}

impl ArtifactKind {
    /// Declare a record kind carrying only properties
    pub const fn record(name: &'static str, properties: &'static [PropertyDef]) -> Self {
        Self {
            name,
            properties,
            value_kind: None,
        }
    }

    /// Declare a value kind whose content is a single scalar
    pub const fn value(name: &'static str, value_kind: ValueKind) -> Self {
        Self {
            name,
            properties: &[],
            value_kind: Some(value_kind),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn schema(&self) -> &'static [PropertyDef] {
        self.properties
    }

    pub fn value_kind(&self) -> Option<ValueKind> {
        self.value_kind
    }

    /// Declared type of a property, if the schema has it
    pub fn property_type(&self, name: &str) -> Option<PropertyType> {
        self.properties
            .iter()
            .find(|def| def.name == name)
            .map(|def| def.property.property_type)
    }
}

impl PartialEq for ArtifactKind {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for ArtifactKind {}

/// An artifact instance
#[derive(Debug, Clone)]
pub struct Artifact {
    kind: &'static ArtifactKind,

    /// Id assigned by the metadata store
    pub id: Option<i64>,

    /// Location of the artifact payload
    pub uri: Option<String>,

    /// When the artifact was created
    pub created_at: DateTime<Utc>,

    properties: BTreeMap<String, PropertyValue>,
    custom_properties: BTreeMap<String, PropertyValue>,
}

impl Artifact {
    /// Create an empty artifact of the given kind
    pub fn new(kind: &'static ArtifactKind) -> Self {
        Self {
            kind,
            id: None,
            uri: None,
            created_at: Utc::now(),
            properties: BTreeMap::new(),
            custom_properties: BTreeMap::new(),
        }
    }

    /// Set the payload uri
    pub fn with_uri(mut self, uri: impl Into<String>) -> Self {
        self.uri = Some(uri.into());
        self
    }

    pub fn kind(&self) -> &'static ArtifactKind {
        self.kind
    }

    pub fn kind_id(&self) -> &'static str {
        self.kind.name
    }

    pub fn schema(&self) -> &'static [PropertyDef] {
        self.kind.properties
    }

    /// Set a declared property, checking name and type against the schema
    pub fn set_property(
        &mut self,
        name: &str,
        value: impl Into<PropertyValue>,
    ) -> Result<(), ArtifactError> {
        let value = value.into();
        let expected = self
            .kind
            .property_type(name)
            .ok_or_else(|| ArtifactError::SchemaViolation {
                kind: self.kind.name.to_string(),
                property: name.to_string(),
            })?;

        if value.property_type() != expected {
            return Err(ArtifactError::type_mismatch(
                expected.as_str(),
                value.property_type().as_str(),
                value.to_string(),
            ));
        }

        self.properties.insert(name.to_string(), value);
        Ok(())
    }

    /// Get a property value; unset properties are an error, never a default
    pub fn get_property(&self, name: &str) -> Result<&PropertyValue, ArtifactError> {
        if self.kind.property_type(name).is_none() {
            return Err(ArtifactError::SchemaViolation {
                kind: self.kind.name.to_string(),
                property: name.to_string(),
            });
        }
        self.properties
            .get(name)
            .ok_or_else(|| ArtifactError::PropertyNotSet {
                kind: self.kind.name.to_string(),
                property: name.to_string(),
            })
    }

    /// Iterate over the properties that have been set
    pub fn properties(&self) -> impl Iterator<Item = (&str, &PropertyValue)> {
        self.properties.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Set a custom property; custom properties are not schema-checked
    pub fn set_custom_property(&mut self, name: impl Into<String>, value: impl Into<PropertyValue>) {
        self.custom_properties.insert(name.into(), value.into());
    }

    pub fn custom_property(&self, name: &str) -> Option<&PropertyValue> {
        self.custom_properties.get(name)
    }

    pub fn span(&self) -> Result<i64, ArtifactError> {
        let value = self.get_property(SPAN_KEY)?;
        value.as_int().ok_or_else(|| {
            ArtifactError::type_mismatch("int", value.property_type().as_str(), value.to_string())
        })
    }

    pub fn set_span(&mut self, span: i64) -> Result<(), ArtifactError> {
        self.set_property(SPAN_KEY, span)
    }

    /// Split names of this artifact; an empty `split_names` means no splits
    pub fn split_names(&self) -> Result<Vec<String>, ArtifactError> {
        let value = self.get_property(SPLIT_NAMES_KEY)?;
        let encoded = value.as_str().ok_or_else(|| {
            ArtifactError::type_mismatch("string", value.property_type().as_str(), value.to_string())
        })?;
        Ok(decode_split_names(encoded))
    }

    pub fn set_split_names<S: AsRef<str>>(&mut self, splits: &[S]) -> Result<(), ArtifactError> {
        self.set_property(SPLIT_NAMES_KEY, encode_split_names(splits)?)
    }

    /// Snapshot this artifact into its serializable form
    pub fn to_record(&self) -> ArtifactRecord {
        ArtifactRecord {
            type_name: self.kind.name.to_string(),
            id: self.id,
            uri: self.uri.clone(),
            created_at: self.created_at,
            properties: self.properties.clone(),
            custom_properties: self.custom_properties.clone(),
        }
    }

    /// Rebuild an artifact from a record, re-validating every property
    pub fn from_record(
        kind: &'static ArtifactKind,
        record: ArtifactRecord,
    ) -> Result<Self, ArtifactError> {
        if record.type_name != kind.name {
            return Err(ArtifactError::UnknownKind(record.type_name));
        }

        let mut artifact = Self::new(kind);
        artifact.id = record.id;
        artifact.uri = record.uri;
        artifact.created_at = record.created_at;
        for (name, value) in record.properties {
            artifact.set_property(&name, value)?;
        }
        artifact.custom_properties = record.custom_properties;
        Ok(artifact)
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(&self.to_record()).context("Failed to serialize artifact")
    }
}

/// Serializable form of an artifact, as handed to a metadata store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtifactRecord {
    pub type_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,

    pub created_at: DateTime<Utc>,

    #[serde(default)]
    pub properties: BTreeMap<String, PropertyValue>,

    #[serde(default)]
    pub custom_properties: BTreeMap<String, PropertyValue>,
}
