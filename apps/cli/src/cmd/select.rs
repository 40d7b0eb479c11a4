//! Device selection commands: select, explain.

use crate::{
    cmd::{DeviceArgs, catalog::summary},
    config::Config,
};
use anyhow::Result;
use registry::{Registry, Selector, TieBreak};
use std::io::Write;

/// Print the eligible builds and the default pick.
pub fn select(
    registry: &Registry,
    config: &Config,
    device: &DeviceArgs,
    minimize_vram: bool,
    json: bool,
    out: &mut impl Write,
) -> Result<()> {
    let profile = device.apply(&config.device);
    let tie_break = if minimize_vram {
        TieBreak::MinimizeVram
    } else {
        config.tie_break
    };
    let selection = Selector::new(registry)
        .with_tie_break(tie_break)
        .select(&profile)?;

    if json {
        let value = serde_json::json!({
            "default": selection.default.id,
            "eligible": selection.eligible,
        });
        writeln!(out, "{}", serde_json::to_string_pretty(&value)?)?;
        return Ok(());
    }

    writeln!(out, "default: {}", selection.default.id)?;
    writeln!(out, "eligible ({}):", selection.eligible.len())?;
    for model in &selection.eligible {
        writeln!(out, "  {}", summary(model))?;
    }
    Ok(())
}

/// Print whether one build fits the device and why not.
pub fn explain(
    registry: &Registry,
    config: &Config,
    id: &str,
    device: &DeviceArgs,
    out: &mut impl Write,
) -> Result<()> {
    let model = registry.get_by_id(id)?;
    let profile = device.apply(&config.device);
    match Selector::check(model, &profile) {
        Ok(()) => writeln!(out, "{id}: eligible")?,
        Err(reason) => writeln!(out, "{id}: rejected, {reason}")?,
    }
    Ok(())
}
