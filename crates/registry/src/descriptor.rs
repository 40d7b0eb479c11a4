//! Model descriptor

use crate::{Error, ModelId, Result};
use compact_str::CompactString;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Well-known compute-backend capability names.
pub mod features {
    /// Half-precision float support in shaders.
    pub const SHADER_F16: &str = "shader-f16";
}

/// One buildable model variant and the resources it needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModelDescriptor {
    /// Unique id, e.g. `Llama-3-8B-Instruct-q4f16_1-MLC-1k`.
    pub id: CompactString,

    /// Curatorial family heading the variant is grouped under.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub family: Option<CompactString>,

    /// Estimated peak device memory in MB.
    pub vram_required_mb: f64,

    /// Whether the variant is tuned for constrained devices.
    pub low_resources_required: bool,

    /// Backend capabilities the device must report.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_features: Option<BTreeSet<CompactString>>,

    /// Hard minimum for the largest single buffer allocation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buffer_size_required_bytes: Option<u64>,
}

impl ModelDescriptor {
    /// Create a descriptor with no feature or buffer requirements.
    pub fn new(id: impl Into<CompactString>, vram_required_mb: f64, low_resources: bool) -> Self {
        Self {
            id: id.into(),
            family: None,
            vram_required_mb,
            low_resources_required: low_resources,
            required_features: None,
            buffer_size_required_bytes: None,
        }
    }

    /// Set the family heading.
    pub fn with_family(mut self, family: impl Into<CompactString>) -> Self {
        self.family = Some(family.into());
        self
    }

    /// Add a required capability.
    pub fn with_feature(mut self, feature: impl Into<CompactString>) -> Self {
        self.required_features
            .get_or_insert_with(BTreeSet::new)
            .insert(feature.into());
        self
    }

    /// Set the minimum buffer size.
    pub fn with_buffer_size(mut self, bytes: u64) -> Self {
        self.buffer_size_required_bytes = Some(bytes);
        self
    }

    /// Check the per-descriptor invariants.
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(Error::InvalidId(self.id.clone()));
        }
        if !self.vram_required_mb.is_finite() || self.vram_required_mb <= 0.0 {
            return Err(Error::InvalidVram {
                id: self.id.clone(),
                vram: self.vram_required_mb,
            });
        }
        if self.required_features.as_ref().is_some_and(|f| f.is_empty()) {
            return Err(Error::EmptyFeatures {
                id: self.id.clone(),
            });
        }
        if self.buffer_size_required_bytes == Some(0) {
            return Err(Error::InvalidBufferSize {
                id: self.id.clone(),
            });
        }
        Ok(())
    }

    /// Whether `feature` is among the required capabilities.
    pub fn requires_feature(&self, feature: &str) -> bool {
        self.required_features
            .as_ref()
            .is_some_and(|f| f.contains(feature))
    }

    /// Required capabilities absent from `supported`.
    pub fn missing_features(
        &self,
        supported: &BTreeSet<CompactString>,
    ) -> BTreeSet<CompactString> {
        match &self.required_features {
            Some(required) => required.difference(supported).cloned().collect(),
            None => BTreeSet::new(),
        }
    }

    /// Parse the id into its base, quantization and context parts.
    pub fn model_id(&self) -> Result<ModelId> {
        self.id.parse()
    }
}
