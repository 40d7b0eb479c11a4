//! Registry of quantized model builds and the device resources each needs.
//!
//! The built-in catalog is static data validated once at first access.
//! [`Selector`] filters it against a [`DeviceProfile`] and picks a default.

pub use {
    descriptor::{ModelDescriptor, features},
    device::DeviceProfile,
    error::{Error, Result},
    registry::Registry,
    select::{Rejection, Selection, Selector, TieBreak},
    variant::{ContextWindow, ModelId, Precision, Quantization},
};

pub mod catalog;
mod descriptor;
mod device;
mod error;
mod registry;
mod select;
mod variant;
