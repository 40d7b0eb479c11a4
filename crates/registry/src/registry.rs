//! `Registry` — validated, ordered, read-only catalog with an id index.

use crate::{Error, ModelDescriptor, Result, catalog};
use compact_str::CompactString;
use serde::{Deserialize, Serialize};
use std::{
    collections::{HashMap, hash_map::Entry},
    path::Path,
    sync::LazyLock,
};

static BUILTIN: LazyLock<Registry> = LazyLock::new(|| {
    Registry::new(catalog::descriptors())
        .map(|registry| registry.with_version(env!("CARGO_PKG_VERSION")))
        .unwrap_or_else(|e| panic!("built-in catalog is invalid: {e}"))
});

/// Ordered collection of model descriptors.
///
/// Built once, never mutated. Shared references are safe to read from any
/// number of threads without locking.
#[derive(Debug, Clone)]
pub struct Registry {
    /// Catalog version, if the source declared one.
    version: Option<CompactString>,
    /// Descriptors in declaration order.
    models: Vec<ModelDescriptor>,
    /// Id to position in `models`.
    index: HashMap<CompactString, usize>,
}

/// On-disk shape of a catalog file.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct CatalogFile {
    #[serde(default)]
    version: Option<CompactString>,
    #[serde(default)]
    models: Vec<ModelDescriptor>,
}

/// Borrowed view serialized in the same shape as `CatalogFile`.
#[derive(Serialize)]
struct CatalogRef<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    version: Option<&'a str>,
    models: &'a [ModelDescriptor],
}

impl Registry {
    /// Validate `models` and build the id index.
    ///
    /// Fails on the first invalid descriptor or duplicate id; nothing is
    /// overwritten.
    pub fn new(models: Vec<ModelDescriptor>) -> Result<Self> {
        let mut index = HashMap::with_capacity(models.len());
        for (position, model) in models.iter().enumerate() {
            model.validate()?;
            match index.entry(model.id.clone()) {
                Entry::Occupied(_) => return Err(Error::DuplicateId(model.id.clone())),
                Entry::Vacant(slot) => {
                    slot.insert(position);
                }
            }
        }

        let registry = Self {
            version: None,
            models,
            index,
        };
        tracing::debug!(
            models = registry.len(),
            families = registry.families().len(),
            "built model registry"
        );
        Ok(registry)
    }

    /// The process-wide built-in catalog.
    ///
    /// Built on first access. Panics if the compiled-in rows break an
    /// invariant, which the catalog tests rule out.
    pub fn builtin() -> &'static Registry {
        &BUILTIN
    }

    /// Parse a TOML catalog with a `[[models]]` array.
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        let file: CatalogFile = toml::from_str(toml_str)?;
        let mut registry = Self::new(file.models)?;
        registry.version = file.version;
        Ok(registry)
    }

    /// Load a TOML catalog from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Render the catalog as TOML, readable by [`Registry::from_toml`].
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(&self.as_file())?)
    }

    /// Attach a version label.
    pub fn with_version(mut self, version: impl Into<CompactString>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Catalog version, if any.
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// Every descriptor in declaration order.
    pub fn list_all(&self) -> &[ModelDescriptor] {
        &self.models
    }

    /// Iterate descriptors in declaration order.
    pub fn iter(&self) -> std::slice::Iter<'_, ModelDescriptor> {
        self.models.iter()
    }

    /// Number of descriptors.
    pub fn len(&self) -> usize {
        self.models.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    /// Exact-match lookup by id.
    pub fn get_by_id(&self, id: &str) -> Result<&ModelDescriptor> {
        self.index
            .get(id)
            .map(|&position| &self.models[position])
            .ok_or_else(|| Error::NotFound(id.into()))
    }

    /// Whether a descriptor with `id` exists.
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Family headings in first-appearance order.
    pub fn families(&self) -> Vec<&str> {
        let mut families: Vec<&str> = Vec::new();
        for family in self.models.iter().filter_map(|m| m.family.as_deref()) {
            if !families.contains(&family) {
                families.push(family);
            }
        }
        families
    }

    /// Members of a family in declaration order.
    pub fn by_family(&self, family: &str) -> Vec<&ModelDescriptor> {
        self.models
            .iter()
            .filter(|m| m.family.as_deref() == Some(family))
            .collect()
    }

    fn as_file(&self) -> CatalogRef<'_> {
        CatalogRef {
            version: self.version.as_deref(),
            models: &self.models,
        }
    }
}

impl Serialize for Registry {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.as_file().serialize(serializer)
    }
}

impl<'a> IntoIterator for &'a Registry {
    type Item = &'a ModelDescriptor;
    type IntoIter = std::slice::Iter<'a, ModelDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
