//! Compatibility selection
//!
//! A descriptor is eligible when, in order:
//! 1. its VRAM requirement fits `available_vram_mb`,
//! 2. its required features are all supported,
//! 3. its buffer requirement fits `max_buffer_size_bytes`, when the device
//!    reports one.
//!
//! The default pick is the first eligible descriptor whose
//! `low_resources_required` matches the caller's preference, else the first
//! eligible one. Catalog order is the tie-break unless
//! [`TieBreak::MinimizeVram`] is chosen.

use crate::{DeviceProfile, Error, ModelDescriptor, Registry, Result};
use compact_str::CompactString;
use serde::{Deserialize, Serialize};
use std::{collections::BTreeSet, fmt::Display};

/// How to choose among candidates matching the low-resource preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TieBreak {
    /// First candidate in catalog order.
    #[default]
    CatalogOrder,
    /// Smallest VRAM requirement, catalog order on ties.
    MinimizeVram,
}

/// Why a descriptor is not eligible. Only the first failing rule is reported.
#[derive(Debug, Clone, PartialEq)]
pub enum Rejection {
    /// Needs more memory than the device offers.
    InsufficientVram { required: f64, available: f64 },
    /// Needs capabilities the backend does not report.
    MissingFeatures(BTreeSet<CompactString>),
    /// Needs a larger single allocation than the device supports.
    BufferTooSmall { required: u64, max: u64 },
}

impl Display for Rejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InsufficientVram {
                required,
                available,
            } => write!(f, "needs {required} MB of vram, {available} MB available"),
            Self::MissingFeatures(missing) => {
                let names: Vec<&str> = missing.iter().map(CompactString::as_str).collect();
                write!(f, "missing features: {}", names.join(", "))
            }
            Self::BufferTooSmall { required, max } => {
                write!(f, "needs a {required} byte buffer, device max is {max}")
            }
        }
    }
}

/// Eligible descriptors and the chosen default.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection<'r> {
    /// Eligible descriptors in registry order.
    pub eligible: Vec<&'r ModelDescriptor>,
    /// The preferred pick, always a member of `eligible`.
    pub default: &'r ModelDescriptor,
}

/// Filters a registry snapshot against device profiles.
///
/// Pure and synchronous; holds only a shared borrow of the registry.
#[derive(Debug, Clone, Copy)]
pub struct Selector<'r> {
    registry: &'r Registry,
    tie_break: TieBreak,
}

impl<'r> Selector<'r> {
    /// Selector over `registry` with the catalog-order tie-break.
    pub fn new(registry: &'r Registry) -> Self {
        Self {
            registry,
            tie_break: TieBreak::default(),
        }
    }

    /// Use a different tie-break.
    pub fn with_tie_break(mut self, tie_break: TieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }

    /// The tie-break in use.
    pub fn tie_break(&self) -> TieBreak {
        self.tie_break
    }

    /// Test one descriptor against a profile.
    pub fn check(
        descriptor: &ModelDescriptor,
        profile: &DeviceProfile,
    ) -> std::result::Result<(), Rejection> {
        // A NaN budget fits nothing.
        if profile.available_vram_mb.is_nan()
            || descriptor.vram_required_mb > profile.available_vram_mb
        {
            return Err(Rejection::InsufficientVram {
                required: descriptor.vram_required_mb,
                available: profile.available_vram_mb,
            });
        }

        let missing = descriptor.missing_features(&profile.supported_features);
        if !missing.is_empty() {
            return Err(Rejection::MissingFeatures(missing));
        }

        if let (Some(required), Some(max)) = (
            descriptor.buffer_size_required_bytes,
            profile.max_buffer_size_bytes,
        ) {
            if required > max {
                return Err(Rejection::BufferTooSmall { required, max });
            }
        }

        Ok(())
    }

    /// Whether `descriptor` can run on the device.
    pub fn is_eligible(descriptor: &ModelDescriptor, profile: &DeviceProfile) -> bool {
        Self::check(descriptor, profile).is_ok()
    }

    /// Eligible descriptors in registry order.
    pub fn eligible(&self, profile: &DeviceProfile) -> Vec<&'r ModelDescriptor> {
        self.registry
            .iter()
            .filter(|descriptor| match Self::check(descriptor, profile) {
                Ok(()) => true,
                Err(reason) => {
                    tracing::trace!(id = %descriptor.id, %reason, "rejected");
                    false
                }
            })
            .collect()
    }

    /// Eligible descriptors plus the default pick.
    ///
    /// Returns [`Error::NoCompatibleModel`] when nothing fits; never falls
    /// back to an ineligible descriptor.
    pub fn select(&self, profile: &DeviceProfile) -> Result<Selection<'r>> {
        let eligible = self.eligible(profile);
        let default = self
            .pick(&eligible, profile.prefer_low_resource)
            .ok_or(Error::NoCompatibleModel)?;
        tracing::debug!(
            eligible = eligible.len(),
            default = %default.id,
            "selected model"
        );
        Ok(Selection { eligible, default })
    }

    fn pick(
        &self,
        eligible: &[&'r ModelDescriptor],
        prefer_low: bool,
    ) -> Option<&'r ModelDescriptor> {
        let preferred: Vec<&'r ModelDescriptor> = eligible
            .iter()
            .copied()
            .filter(|m| m.low_resources_required == prefer_low)
            .collect();

        let candidates = if preferred.is_empty() {
            if !eligible.is_empty() {
                tracing::debug!(
                    prefer_low,
                    "no eligible model matches preference, falling back"
                );
            }
            eligible
        } else {
            &preferred[..]
        };

        match self.tie_break {
            TieBreak::CatalogOrder => candidates.first().copied(),
            TieBreak::MinimizeVram => candidates.iter().copied().reduce(|best, m| {
                if m.vram_required_mb < best.vram_required_mb {
                    m
                } else {
                    best
                }
            }),
        }
    }
}
