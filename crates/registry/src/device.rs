//! Device capability profile

use compact_str::CompactString;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Resources a device reports for running a model.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DeviceProfile {
    /// Memory budget the device can give a model, in MB.
    #[serde(default)]
    pub available_vram_mb: f64,

    /// Capability names the compute backend reports.
    #[serde(default)]
    pub supported_features: BTreeSet<CompactString>,

    /// Largest single buffer allocation, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_buffer_size_bytes: Option<u64>,

    /// Prefer constrained-footprint variants.
    #[serde(default)]
    pub prefer_low_resource: bool,
}

impl DeviceProfile {
    /// A profile with `available_vram_mb` and nothing else.
    pub fn new(available_vram_mb: f64) -> Self {
        Self {
            available_vram_mb,
            ..Default::default()
        }
    }

    /// Add a supported capability.
    pub fn with_feature(mut self, feature: impl Into<CompactString>) -> Self {
        self.supported_features.insert(feature.into());
        self
    }

    /// Add several supported capabilities.
    pub fn with_features<I, F>(mut self, features: I) -> Self
    where
        I: IntoIterator<Item = F>,
        F: Into<CompactString>,
    {
        self.supported_features
            .extend(features.into_iter().map(Into::into));
        self
    }

    /// Set the largest single allocation.
    pub fn with_max_buffer_size(mut self, bytes: u64) -> Self {
        self.max_buffer_size_bytes = Some(bytes);
        self
    }

    /// Set the low-resource preference.
    pub fn prefer_low_resource(mut self, prefer: bool) -> Self {
        self.prefer_low_resource = prefer;
        self
    }

    /// Whether the backend reports `feature`.
    pub fn supports(&self, feature: &str) -> bool {
        self.supported_features.contains(feature)
    }
}
