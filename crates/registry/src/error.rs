//! Registry errors.

use compact_str::CompactString;

/// Result alias for registry operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while building, querying or selecting from a registry.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Two descriptors share an id. Construction aborts.
    #[error("duplicate model id '{0}'")]
    DuplicateId(CompactString),

    /// No descriptor has the requested id.
    #[error("model '{0}' not found")]
    NotFound(CompactString),

    /// The device profile satisfies no descriptor.
    #[error("no compatible model for this device")]
    NoCompatibleModel,

    /// VRAM requirement is zero, negative or not finite.
    #[error("model '{id}' has invalid vram requirement {vram} MB")]
    InvalidVram { id: CompactString, vram: f64 },

    /// `required_features` is present but empty.
    #[error("model '{id}' declares an empty feature set")]
    EmptyFeatures { id: CompactString },

    /// `buffer_size_required_bytes` is present but zero.
    #[error("model '{id}' declares a zero buffer size")]
    InvalidBufferSize { id: CompactString },

    /// The id is empty or does not follow `<base>-<quant>-MLC[-<ctx>]`.
    #[error("invalid model id '{0}'")]
    InvalidId(CompactString),

    /// Reading a catalog file failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Catalog file is not valid TOML for the catalog schema.
    #[error("invalid catalog: {0}")]
    Toml(#[from] toml::de::Error),

    /// Catalog could not be rendered as TOML.
    #[error("failed to serialize catalog: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}
