//! Artifacts whose content is a single scalar value.
//!
//! The value is read through and written through a byte payload:
//! - Reading decodes the payload once and caches the result
//! - Writing encodes immediately and marks the payload dirty
//!
//! Moving the payload to and from storage is left to a [`PayloadStore`].

use anyhow::{Context, Result};
use tracing::debug;

use super::codec::{Encodable, PrecisionLoss};
use crate::adapters::PayloadStore;
use crate::domain::{Artifact, ArtifactError, ArtifactKind, Value, ValueKind};

/// Cache state of a value artifact's payload
#[derive(Debug, Clone, PartialEq)]
pub enum PayloadState {
    /// Nothing decoded yet (a payload may or may not be present)
    Empty,

    /// Decoded from a payload that matches storage
    LoadedClean(Value),

    /// Written locally and not yet persisted
    LoadedDirty(Value),
}

/// An artifact carrying one scalar value
#[derive(Debug, Clone)]
pub struct ValueArtifact<C = ValueKind> {
    artifact: Artifact,
    codec: C,
    payload: Option<Vec<u8>>,
    state: PayloadState,
    diagnostic: Option<PrecisionLoss>,
}

impl ValueArtifact<ValueKind> {
    /// Create a value artifact of a kind that declares a value kind
    pub fn new(kind: &'static ArtifactKind) -> Result<Self, ArtifactError> {
        let value_kind = kind
            .value_kind()
            .ok_or_else(|| ArtifactError::NotAValueKind(kind.name().to_string()))?;
        Ok(Self::unchecked(Artifact::new(kind), value_kind))
    }

    pub fn bytes() -> Self {
        Self::unchecked(Artifact::new(&super::registry::BYTES), ValueKind::Bytes)
    }

    pub fn string() -> Self {
        Self::unchecked(Artifact::new(&super::registry::STRING), ValueKind::String)
    }

    pub fn integer() -> Self {
        Self::unchecked(Artifact::new(&super::registry::INTEGER), ValueKind::Integer)
    }

    pub fn float() -> Self {
        Self::unchecked(Artifact::new(&super::registry::FLOAT), ValueKind::Float)
    }
}

impl<C: Encodable> ValueArtifact<C> {
    /// Wrap an artifact with an explicit codec.
    ///
    /// The codec must encode the value kind the artifact's kind declares.
    pub fn with_codec(artifact: Artifact, codec: C) -> Result<Self, ArtifactError> {
        let kind = artifact.kind();
        let declared = kind
            .value_kind()
            .ok_or_else(|| ArtifactError::NotAValueKind(kind.name().to_string()))?;
        if codec.value_kind() != declared {
            return Err(ArtifactError::type_mismatch(
                declared.as_str(),
                codec.value_kind().as_str(),
                format!("{} codec", codec.value_kind()),
            ));
        }
        Ok(Self::unchecked(artifact, codec))
    }

    fn unchecked(artifact: Artifact, codec: C) -> Self {
        Self {
            artifact,
            codec,
            payload: None,
            state: PayloadState::Empty,
            diagnostic: None,
        }
    }

    pub fn artifact(&self) -> &Artifact {
        &self.artifact
    }

    pub fn artifact_mut(&mut self) -> &mut Artifact {
        &mut self.artifact
    }

    pub fn codec(&self) -> &C {
        &self.codec
    }

    pub fn payload(&self) -> Option<&[u8]> {
        self.payload.as_deref()
    }

    pub fn state(&self) -> &PayloadState {
        &self.state
    }

    pub fn is_dirty(&self) -> bool {
        matches!(self.state, PayloadState::LoadedDirty(_))
    }

    /// Precision diagnostic from the last decode, if it was lossy
    pub fn precision_diagnostic(&self) -> Option<&PrecisionLoss> {
        self.diagnostic.as_ref()
    }

    /// Install a payload read from storage; the cached value is dropped
    pub fn set_payload(&mut self, payload: Vec<u8>) {
        self.payload = Some(payload);
        self.state = PayloadState::Empty;
        self.diagnostic = None;
    }

    /// Get the value, decoding the payload on first access
    pub fn value(&mut self) -> Result<&Value, ArtifactError> {
        if let PayloadState::Empty = self.state {
            let payload = self
                .payload
                .as_deref()
                .ok_or_else(|| ArtifactError::ValueUnavailable {
                    kind: self.artifact.kind_id().to_string(),
                })?;
            let decoded = self.codec.decode(payload)?;
            debug!(kind = self.artifact.kind_id(), "Decoded artifact value");
            self.diagnostic = decoded.diagnostic;
            self.state = PayloadState::LoadedClean(decoded.value);
        }

        match &self.state {
            PayloadState::LoadedClean(value) | PayloadState::LoadedDirty(value) => Ok(value),
            PayloadState::Empty => Err(ArtifactError::ValueUnavailable {
                kind: self.artifact.kind_id().to_string(),
            }),
        }
    }

    /// Set the value, encoding it immediately
    pub fn set_value(&mut self, value: impl Into<Value>) -> Result<(), ArtifactError> {
        let value = value.into();
        let payload = self.codec.encode(&value)?;
        self.payload = Some(payload);
        self.state = PayloadState::LoadedDirty(value);
        self.diagnostic = None;
        Ok(())
    }

    /// Read the payload from `<uri>/value`, replacing any cached value.
    ///
    /// Returns `false` when the store has no payload for this artifact.
    pub async fn load<S>(&mut self, store: &S) -> Result<bool>
    where
        S: PayloadStore + ?Sized,
    {
        let uri = self.require_uri()?.to_string();
        let Some(payload) = store
            .read(&uri)
            .await
            .with_context(|| format!("Failed to load value of {}", uri))?
        else {
            return Ok(false);
        };

        debug!(uri = %uri, size_bytes = payload.len(), "Loaded artifact payload");
        self.set_payload(payload);
        Ok(true)
    }

    /// Write a dirty payload to its store; clean artifacts are left alone.
    ///
    /// Returns `true` when a payload was written.
    pub async fn commit<S>(&mut self, store: &S) -> Result<bool>
    where
        S: PayloadStore + ?Sized,
    {
        if !self.is_dirty() {
            return Ok(false);
        }

        let uri = self.require_uri()?;
        let payload = self.payload.as_deref().ok_or_else(|| ArtifactError::ValueUnavailable {
            kind: self.artifact.kind_id().to_string(),
        })?;
        store
            .write(uri, payload)
            .await
            .with_context(|| format!("Failed to commit value of {}", uri))?;
        debug!(uri = %uri, size_bytes = payload.len(), "Committed artifact payload");

        if let PayloadState::LoadedDirty(value) =
            std::mem::replace(&mut self.state, PayloadState::Empty)
        {
            self.state = PayloadState::LoadedClean(value);
        }
        Ok(true)
    }

    fn require_uri(&self) -> Result<&str, ArtifactError> {
        self.artifact
            .uri
            .as_deref()
            .ok_or_else(|| ArtifactError::UriNotSet {
                kind: self.artifact.kind_id().to_string(),
            })
    }
}
