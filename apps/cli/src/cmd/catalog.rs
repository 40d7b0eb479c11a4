//! Catalog browsing commands: list, families, get, export.

use anyhow::Result;
use registry::{ModelDescriptor, Registry};
use std::io::Write;

/// Print catalog entries, optionally filtered.
pub fn list(
    registry: &Registry,
    family: Option<&str>,
    low: bool,
    json: bool,
    out: &mut impl Write,
) -> Result<()> {
    let models: Vec<&ModelDescriptor> = registry
        .iter()
        .filter(|m| family.is_none_or(|f| m.family.as_deref() == Some(f)))
        .filter(|m| !low || m.low_resources_required)
        .collect();

    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&models)?)?;
        return Ok(());
    }
    for model in models {
        writeln!(out, "{}", summary(model))?;
    }
    Ok(())
}

/// Print family headings in catalog order.
pub fn families(registry: &Registry, out: &mut impl Write) -> Result<()> {
    for family in registry.families() {
        writeln!(out, "{family} ({})", registry.by_family(family).len())?;
    }
    Ok(())
}

/// Print one entry.
pub fn get(registry: &Registry, id: &str, json: bool, out: &mut impl Write) -> Result<()> {
    let model = registry.get_by_id(id)?;
    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(model)?)?;
        return Ok(());
    }

    writeln!(out, "id:       {}", model.id)?;
    if let Some(family) = &model.family {
        writeln!(out, "family:   {family}")?;
    }
    writeln!(out, "vram:     {:.2} MB", model.vram_required_mb)?;
    writeln!(out, "low:      {}", model.low_resources_required)?;
    if let Some(features) = &model.required_features {
        let names: Vec<&str> = features.iter().map(|f| f.as_str()).collect();
        writeln!(out, "features: {}", names.join(", "))?;
    }
    if let Some(bytes) = model.buffer_size_required_bytes {
        writeln!(out, "buffer:   {bytes} bytes")?;
    }
    if let Ok(parsed) = model.model_id() {
        writeln!(out, "base:     {}", parsed.base)?;
        writeln!(out, "quant:    {}", parsed.quantization)?;
        if let Some(ctx) = parsed.context {
            writeln!(out, "context:  {ctx}")?;
        }
    }
    Ok(())
}

/// Print the whole catalog as TOML or JSON.
pub fn export(registry: &Registry, json: bool, out: &mut impl Write) -> Result<()> {
    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(registry)?)?;
    } else {
        write!(out, "{}", registry.to_toml()?)?;
    }
    Ok(())
}

/// One-line summary of an entry.
pub fn summary(model: &ModelDescriptor) -> String {
    let mut line = format!("{:<48} {:>9.2} MB", model.id, model.vram_required_mb);
    if model.low_resources_required {
        line.push_str("  low");
    }
    if let Some(features) = &model.required_features {
        for feature in features {
            line.push_str("  +");
            line.push_str(feature);
        }
    }
    if let Some(bytes) = model.buffer_size_required_bytes {
        line.push_str(&format!("  buffer>={bytes}"));
    }
    line
}
